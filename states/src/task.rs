//! Bookkeeping for spawned command futures.
//!
//! Every dispatch gets a [`TaskId`] (command type + generation) and a [`TaskHandle`] wrapping the
//! `CancellationToken` handed to the command. Handles are kept so the context can cancel
//! outstanding work when it shuts down.

use std::any::TypeId;

use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId {
    type_id: TypeId,
    generation: u64,
}

impl TaskId {
    pub fn new(type_id: TypeId, generation: u64) -> Self {
        Self {
            type_id,
            generation,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Higher generation values indicate more recently dispatched tasks.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: TaskId,
    cancel_token: CancellationToken,
}

impl TaskHandle {
    pub fn new(id: TaskId, cancel_token: CancellationToken) -> Self {
        Self { id, cancel_token }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker;

    #[test]
    fn generations_distinguish_tasks_of_same_type() {
        let first = TaskId::new(TypeId::of::<Marker>(), 1);
        let second = TaskId::new(TypeId::of::<Marker>(), 2);

        assert_eq!(first.type_id(), second.type_id());
        assert!(second.generation() > first.generation());
        assert_ne!(first, second);
    }

    #[test]
    fn cancel_propagates_to_token_clones() {
        let token = CancellationToken::new();
        let handle = TaskHandle::new(TaskId::new(TypeId::of::<Marker>(), 1), token.clone());

        assert!(!handle.is_cancelled());
        handle.cancel();
        assert!(token.is_cancelled());
        assert!(handle.is_cancelled());
    }
}
