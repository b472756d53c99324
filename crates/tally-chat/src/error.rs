//! Error types for the conversational interface.

/// Errors from the chat engine that the caller must handle.
///
/// Domain failures (unknown customer, malformed slots, storage trouble) are
/// not errors at this boundary; they become reply text. Only messages the
/// pipeline refuses to process at all surface here.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
}
