use thiserror::Error;

/// Top-level error type for the Voxmail system.
///
/// Each variant wraps a subsystem-specific failure. Subsystem crates define
/// their own error types and implement `From<SubsystemError> for VoxmailError`
/// so that the `?` operator works across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VoxmailError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Contact book error: {0}")]
    Contacts(String),

    #[error("Assistant error: {0}")]
    Assistant(String),

    #[error("Mail error: {0}")]
    Mail(String),

    #[error("Capture error: {0}")]
    Capture(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Shutdown in progress")]
    ShuttingDown,
}

impl From<toml::de::Error> for VoxmailError {
    fn from(err: toml::de::Error) -> Self {
        VoxmailError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for VoxmailError {
    fn from(err: toml::ser::Error) -> Self {
        VoxmailError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for VoxmailError {
    fn from(err: serde_json::Error) -> Self {
        VoxmailError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Voxmail operations.
pub type Result<T> = std::result::Result<T, VoxmailError>;
