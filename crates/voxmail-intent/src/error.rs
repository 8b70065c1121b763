//! Error types for the conversation engine.

use voxmail_core::VoxmailError;

/// Errors surfaced by collaborators during a conversation turn.
///
/// Nothing here is fatal: analysis failures recover into the fallback
/// parser, and validation or transport failures degrade to a spoken/logged
/// message for that turn with the draft left unchanged.
#[derive(Debug, thiserror::Error)]
pub enum ConversationError {
    #[error("analysis failed: {0}")]
    Analysis(String),
    #[error("invalid recipient: {0}")]
    InvalidRecipient(String),
    #[error("email body cannot be empty")]
    EmptyBody,
    #[error("recipient is required")]
    MissingRecipient,
    #[error("send failed: {0}")]
    Send(String),
}

impl From<VoxmailError> for ConversationError {
    fn from(err: VoxmailError) -> Self {
        match err {
            VoxmailError::Assistant(msg) => ConversationError::Analysis(msg),
            VoxmailError::Mail(msg) => ConversationError::Send(msg),
            other => ConversationError::Send(other.to_string()),
        }
    }
}
