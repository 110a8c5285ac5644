use std::any::TypeId;

use crate::{Dep, State, Updater};

/// `(state ids, compute ids)` a compute reads.
pub type ComputeDeps = (&'static [TypeId], &'static [TypeId]);

/// A derived value, re-run by [`crate::StateCtx::run_computed`] after any of its
/// dependencies changed. Results are published through the [`Updater`] and land on
/// the next [`crate::StateCtx::sync_computes`].
///
/// Computes must stay free of side effects; network IO belongs in a [`crate::Command`].
pub trait Compute: State {
    fn deps(&self) -> ComputeDeps;

    fn compute(&self, deps: Dep<'_>, updater: Updater);
}
