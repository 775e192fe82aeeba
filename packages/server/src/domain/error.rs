//! Domain layer errors.

use thiserror::Error;

/// Value object validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("connection id must not be empty")]
    EmptyConnectionId,

    #[error("message id must not be empty")]
    EmptyMessageId,

    #[error("display name must not be blank")]
    BlankDisplayName,

    #[error("message text must not be blank")]
    BlankMessageText,

    #[error("reaction must not be blank")]
    BlankReaction,

    #[error("reaction is longer than {max} characters")]
    ReactionTooLong { max: usize },

    #[error("'{0}' is not a #rrggbb color")]
    InvalidColor(String),
}

/// Errors raised by the room stores
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("connection '{0}' is not registered")]
    ConnectionNotFound(String),

    #[error("message '{0}' is not in history")]
    MessageNotFound(String),
}

/// Errors raised while pushing outbound events to connections
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client '{0}' is not registered for push")]
    ClientNotFound(String),

    #[error("outbound queue of client '{0}' is full")]
    QueueFull(String),

    #[error("outbound channel of client '{0}' is closed")]
    ChannelClosed(String),

    #[error("failed to encode outbound event: {0}")]
    Encode(String),
}
