//! HTTP response DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::{MessageDto, OnlineUserDto};

/// Response of `GET /debug/room`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomStateDto {
    pub online_users: Vec<OnlineUserDto>,
    pub typing_users: Vec<String>,
    pub messages: Vec<MessageDto>,
    pub history_capacity: usize,
}
