//! Conversion logic between DTOs and domain values.

use std::collections::BTreeMap;

use hiroba_shared::time::timestamp_to_rfc3339;

use crate::{
    domain::{ChatMessage, Identity, InboundEvent, OutboundEvent, Reactions, RejectionKind},
    infrastructure::dto::{http::RoomStateDto, websocket as dto},
    usecase::RoomSnapshot,
};

// ========================================
// DTO → Domain
// ========================================

impl From<dto::InboundFrame> for InboundEvent {
    fn from(frame: dto::InboundFrame) -> Self {
        match frame {
            dto::InboundFrame::SetUsername(name) => InboundEvent::SetName(name),
            dto::InboundFrame::Message(text) => InboundEvent::SendText(text),
            dto::InboundFrame::Typing(is_typing) => InboundEvent::SetTyping(is_typing),
            dto::InboundFrame::React(payload) => InboundEvent::React {
                message_id: payload.message_id,
                symbol: payload.reaction,
            },
        }
    }
}

// ========================================
// Domain → DTO
// ========================================

fn reactions_to_dto(reactions: &Reactions) -> BTreeMap<String, u32> {
    reactions
        .iter()
        .map(|(symbol, count)| (symbol.as_str().to_string(), count))
        .collect()
}

fn rejection_code(kind: RejectionKind) -> &'static str {
    match kind {
        RejectionKind::NotFound => "not-found",
        RejectionKind::InvalidInput => "invalid-input",
    }
}

impl From<&Identity> for dto::UserDto {
    fn from(identity: &Identity) -> Self {
        Self {
            user_id: identity.connection_id.as_str().to_string(),
            username: identity.display_name.as_str().to_string(),
            user_color: identity.color.as_str().to_string(),
        }
    }
}

impl From<&Identity> for dto::OnlineUserDto {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.connection_id.as_str().to_string(),
            name: identity.display_name.as_str().to_string(),
            color: identity.color.as_str().to_string(),
        }
    }
}

impl From<&ChatMessage> for dto::MessageDto {
    fn from(message: &ChatMessage) -> Self {
        Self {
            id: message.id.as_str().to_string(),
            user_id: message.sender_id.as_str().to_string(),
            username: message.sender_name.as_str().to_string(),
            user_color: message.sender_color.as_str().to_string(),
            text: message.text.as_str().to_string(),
            timestamp: timestamp_to_rfc3339(message.timestamp.value()),
            reactions: reactions_to_dto(&message.reactions),
        }
    }
}

impl From<&OutboundEvent> for dto::OutboundFrame {
    fn from(event: &OutboundEvent) -> Self {
        match event {
            OutboundEvent::Init {
                identity,
                history,
                online,
                typing,
            } => dto::OutboundFrame::Init(dto::InitPayload {
                user_id: identity.connection_id.as_str().to_string(),
                username: identity.display_name.as_str().to_string(),
                user_color: identity.color.as_str().to_string(),
                history: history.iter().map(Into::into).collect(),
                online_users: online.iter().map(Into::into).collect(),
                typing_users: typing.iter().map(|id| id.as_str().to_string()).collect(),
            }),
            OutboundEvent::UserJoined(identity) => dto::OutboundFrame::UserJoined(identity.into()),
            OutboundEvent::UserUpdated(identity) => {
                dto::OutboundFrame::UserUpdated(identity.into())
            }
            OutboundEvent::UserLeft(connection_id) => {
                dto::OutboundFrame::UserLeft(dto::UserLeftPayload {
                    user_id: connection_id.as_str().to_string(),
                })
            }
            OutboundEvent::NewMessage(message) => dto::OutboundFrame::NewMessage(message.into()),
            OutboundEvent::TypingUsers(ids) => dto::OutboundFrame::TypingUsers(
                ids.iter().map(|id| id.as_str().to_string()).collect(),
            ),
            OutboundEvent::MessageReaction {
                message_id,
                reactions,
            } => dto::OutboundFrame::MessageReaction(dto::MessageReactionPayload {
                message_id: message_id.as_str().to_string(),
                reactions: reactions_to_dto(reactions),
            }),
            OutboundEvent::Error { kind, message } => {
                dto::OutboundFrame::Error(dto::ErrorPayload {
                    code: rejection_code(*kind).to_string(),
                    message: message.clone(),
                })
            }
        }
    }
}

impl From<&RoomSnapshot> for RoomStateDto {
    fn from(snapshot: &RoomSnapshot) -> Self {
        Self {
            online_users: snapshot.online.iter().map(Into::into).collect(),
            typing_users: snapshot
                .typing
                .iter()
                .map(|id| id.as_str().to_string())
                .collect(),
            messages: snapshot.history.iter().map(Into::into).collect(),
            history_capacity: snapshot.history_capacity,
        }
    }
}
