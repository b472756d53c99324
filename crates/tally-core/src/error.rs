use thiserror::Error;

/// Top-level error type for the Tally system.
///
/// Each variant wraps a subsystem-specific error. Subsystem crates define
/// their own error types and convert into `TallyError` so that the `?`
/// operator works seamlessly across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TallyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Nlu error: {0}")]
    Nlu(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Chat error: {0}")]
    Chat(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for TallyError {
    fn from(err: toml::de::Error) -> Self {
        TallyError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for TallyError {
    fn from(err: toml::ser::Error) -> Self {
        TallyError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for TallyError {
    fn from(err: serde_json::Error) -> Self {
        TallyError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Tally operations.
pub type Result<T> = std::result::Result<T, TallyError>;
