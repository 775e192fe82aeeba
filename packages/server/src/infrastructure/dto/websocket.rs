//! WebSocket frame DTOs.
//!
//! Every frame is one JSON object `{"type": <string>, "data": <payload>}`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Frame sent by a client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum InboundFrame {
    SetUsername(String),
    Message(String),
    Typing(bool),
    React(ReactPayload),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactPayload {
    pub message_id: String,
    pub reaction: String,
}

impl InboundFrame {
    /// Decode a text frame.
    pub fn decode(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Decode a binary frame carrying the same JSON.
    pub fn decode_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

/// Frame sent by the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum OutboundFrame {
    Init(InitPayload),
    NewMessage(MessageDto),
    UserJoined(UserDto),
    UserLeft(UserLeftPayload),
    UserUpdated(UserDto),
    TypingUsers(Vec<String>),
    MessageReaction(MessageReactionPayload),
    Error(ErrorPayload),
}

impl OutboundFrame {
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Identity as announced in `user-joined` / `user-updated`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub user_id: String,
    pub username: String,
    pub user_color: String,
}

/// Identity as listed in `init.onlineUsers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnlineUserDto {
    pub id: String,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub user_color: String,
    pub text: String,
    /// RFC 3339, UTC, millisecond precision
    pub timestamp: String,
    pub reactions: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitPayload {
    pub user_id: String,
    pub username: String,
    pub user_color: String,
    pub history: Vec<MessageDto>,
    pub online_users: Vec<OnlineUserDto>,
    pub typing_users: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLeftPayload {
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageReactionPayload {
    pub message_id: String,
    pub reactions: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// `not-found` or `invalid-input`
    pub code: String,
    pub message: String,
}
