use std::path::PathBuf;
use thiserror::Error;

pub type PickResult<T> = Result<T, PickError>;

#[derive(Debug, Error)]
pub enum PickError {
    /// Bad name, weight, count or number typed by the user.
    #[error("{0}")]
    Input(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No options available.")]
    NoItems,

    /// The state file exists but is not something we wrote.
    #[error("State file {path} is corrupt: {reason}")]
    CorruptState { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PickError {
    pub fn input(message: impl Into<String>) -> Self {
        PickError::Input(message.into())
    }

    /// Errors the session reports and carries on from.
    pub fn recoverable(&self) -> bool {
        matches!(
            self,
            PickError::Input(_) | PickError::NotFound(_) | PickError::NoItems
        )
    }
}
