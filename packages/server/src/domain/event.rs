//! Inbound and outbound events of the relay protocol, in domain terms.
//!
//! Wire encoding lives in `infrastructure::dto`; these types carry only
//! domain values.

use super::{
    identity::Identity,
    message::{ChatMessage, Reactions},
    value_object::{ConnectionId, MessageId},
};

/// An event sent by a client over its connection.
///
/// Payloads are raw client input; use cases validate them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    SetName(String),
    SendText(String),
    SetTyping(bool),
    React { message_id: String, symbol: String },
}

impl InboundEvent {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            InboundEvent::SetName(_) => "set-username",
            InboundEvent::SendText(_) => "message",
            InboundEvent::SetTyping(_) => "typing",
            InboundEvent::React { .. } => "react",
        }
    }
}

/// Why an inbound event was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    NotFound,
    InvalidInput,
}

/// An event fanned out by the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEvent {
    /// Sent to a new connection only.
    Init {
        identity: Identity,
        history: Vec<ChatMessage>,
        online: Vec<Identity>,
        typing: Vec<ConnectionId>,
    },
    UserJoined(Identity),
    UserUpdated(Identity),
    UserLeft(ConnectionId),
    NewMessage(ChatMessage),
    TypingUsers(Vec<ConnectionId>),
    MessageReaction {
        message_id: MessageId,
        reactions: Reactions,
    },
    /// Sent to the originator of a rejected event only.
    Error {
        kind: RejectionKind,
        message: String,
    },
}

impl OutboundEvent {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            OutboundEvent::Init { .. } => "init",
            OutboundEvent::UserJoined(_) => "user-joined",
            OutboundEvent::UserUpdated(_) => "user-updated",
            OutboundEvent::UserLeft(_) => "user-left",
            OutboundEvent::NewMessage(_) => "new-message",
            OutboundEvent::TypingUsers(_) => "typing-users",
            OutboundEvent::MessageReaction { .. } => "message-reaction",
            OutboundEvent::Error { .. } => "error",
        }
    }
}
