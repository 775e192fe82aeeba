//! The room aggregate: every store the relay mutates.

use super::{
    error::RoomError,
    history::{DEFAULT_HISTORY_CAPACITY, HistoryStore},
    message::Reactions,
    presence::PresenceSet,
    registry::ConnectionRegistry,
    value_object::{MessageId, ReactionSymbol},
};

/// Live state of the single chat room.
///
/// Owned by exactly one task; nothing here is synchronized.
#[derive(Debug, Clone)]
pub struct Room {
    pub registry: ConnectionRegistry,
    pub history: HistoryStore,
    pub presence: PresenceSet,
}

impl Room {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            history: HistoryStore::new(history_capacity),
            presence: PresenceSet::new(),
        }
    }

    /// Increment `symbol` on the message `message_id` and return its reactions.
    ///
    /// Leaves every store untouched when the message is not in history.
    pub fn apply_reaction(
        &mut self,
        message_id: &MessageId,
        symbol: &ReactionSymbol,
    ) -> Result<Reactions, RoomError> {
        let message = self
            .history
            .find_by_id_mut(message_id)
            .ok_or_else(|| RoomError::MessageNotFound(message_id.as_str().to_string()))?;
        message.reactions.increment(symbol);
        Ok(message.reactions.clone())
    }
}

impl Default for Room {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        identity::Identity,
        message::ChatMessage,
        value_object::{Color, ConnectionId, DisplayName, MessageText, Timestamp},
    };

    fn create_test_room_with_message(message_id: &str) -> Room {
        let mut room = Room::default();
        let sender = Identity::new(
            ConnectionId::new("alice".to_string()).unwrap(),
            DisplayName::new("Alice".to_string()).unwrap(),
            Color::from_rgb(0xff0000),
        );
        room.history.append(ChatMessage::new(
            MessageId::new(message_id.to_string()).unwrap(),
            &sender,
            MessageText::new("hi".to_string()).unwrap(),
            Timestamp::new(1000),
        ));
        room
    }

    #[test]
    fn test_apply_reaction_counts_every_increment() {
        // テスト項目: 同じメッセージへの N 回のリアクションで件数が N になる
        // given (前提条件):
        let mut room = create_test_room_with_message("m1");
        let message_id = MessageId::new("m1".to_string()).unwrap();
        let thumbs_up = ReactionSymbol::new("👍".to_string()).unwrap();

        // when (操作):
        room.apply_reaction(&message_id, &thumbs_up).unwrap();
        room.apply_reaction(&message_id, &thumbs_up).unwrap();
        let last = room.apply_reaction(&message_id, &thumbs_up).unwrap();

        // then (期待する結果):
        assert_eq!(last.count(&thumbs_up), 3);
        let stored = room.history.find_by_id(&message_id).unwrap();
        assert_eq!(stored.reactions, last);
    }

    #[test]
    fn test_apply_reaction_to_unknown_message() {
        // テスト項目: 存在しないメッセージへのリアクションは MessageNotFound となり、状態は変化しない
        // given (前提条件):
        let mut room = create_test_room_with_message("m1");
        let before = room.history.recent(10);

        // when (操作):
        let result = room.apply_reaction(
            &MessageId::new("missing".to_string()).unwrap(),
            &ReactionSymbol::new("👍".to_string()).unwrap(),
        );

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RoomError::MessageNotFound("missing".to_string()))
        );
        assert_eq!(room.history.recent(10), before);
    }
}
