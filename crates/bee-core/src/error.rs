#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Submissions rejected before they reach the store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Submission contained no words")]
    EmptySubmission,
}

impl InputError {
    pub fn user_message(&self) -> String {
        match self {
            InputError::EmptySubmission => "Please type at least one word! ✏️".to_string(),
        }
    }
}
