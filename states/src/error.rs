use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("State not found: {name}, context: {context}")]
    StateNotFound { name: &'static str, context: String },
    #[error("Snapshot for {name} is missing")]
    SnapshotMissing { name: &'static str },
}

impl StateError {
    pub fn state_not_found(name: &'static str, context: impl Into<String>) -> Self {
        Self::StateNotFound {
            name,
            context: context.into(),
        }
    }
}
