use std::future::Future;
use std::pin::Pin;

use tokio_util::sync::CancellationToken;

use crate::{CommandSnapshot, Updater};

pub type CommandFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Manual-only side effect, dispatched with [`crate::StateCtx::dispatch`].
///
/// The command receives a snapshot of the context at dispatch time and reports back through the
/// [`Updater`]. Long-running work should race against `cancel.cancelled()`.
pub trait Command: Send + Sync + 'static {
    fn run(&self, snap: CommandSnapshot, updater: Updater, cancel: CancellationToken)
    -> CommandFuture;
}
