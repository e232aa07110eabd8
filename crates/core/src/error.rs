#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The persisted session could not be read or written.
    #[error("Session storage error: {0}")]
    Storage(String),
}

impl CoreError {
    /// Shorthand for a validation failure with a user-facing message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
