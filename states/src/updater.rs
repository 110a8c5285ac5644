use std::any::{Any, TypeId, type_name};

use flume::{Receiver, Sender};
use log::warn;

pub(crate) type Update = (TypeId, Box<dyn Any + Send>);

/// Send-side handle used by computes and commands to publish new values.
///
/// Values are applied on the UI thread by [`crate::StateCtx::sync_computes`].
#[derive(Debug, Clone)]
pub struct Updater {
    send: Sender<Update>,
}

impl Updater {
    pub(crate) fn channel() -> (Self, Receiver<Update>) {
        let (send, recv) = flume::unbounded();
        (Self { send }, recv)
    }

    /// Replace the registered state or compute of type `T` with `value`.
    pub fn set<T: Any + Send>(&self, value: T) {
        if self
            .send
            .send((TypeId::of::<T>(), Box::new(value)))
            .is_err()
        {
            warn!("Updater: context dropped, discarding {}", type_name::<T>());
        }
    }
}
