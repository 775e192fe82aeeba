//! Bounded message history.

use std::collections::VecDeque;

use super::{message::ChatMessage, value_object::MessageId};

/// Default number of retained messages.
pub const DEFAULT_HISTORY_CAPACITY: usize = 200;

/// FIFO of the most recent messages, in arrival order.
///
/// Length never exceeds `capacity`; appending to a full store evicts the
/// oldest message.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    messages: VecDeque<ChatMessage>,
    capacity: usize,
}

impl HistoryStore {
    /// Create a store retaining at most `capacity` messages (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push_back(message);
        while self.messages.len() > self.capacity {
            self.messages.pop_front();
        }
    }

    /// The last `min(k, len)` messages, oldest first.
    pub fn recent(&self, k: usize) -> Vec<ChatMessage> {
        let skip = self.messages.len().saturating_sub(k);
        self.messages.iter().skip(skip).cloned().collect()
    }

    pub fn find_by_id(&self, id: &MessageId) -> Option<&ChatMessage> {
        self.messages.iter().find(|message| &message.id == id)
    }

    pub fn find_by_id_mut(&mut self, id: &MessageId) -> Option<&mut ChatMessage> {
        self.messages.iter_mut().find(|message| &message.id == id)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        identity::Identity,
        value_object::{Color, ConnectionId, DisplayName, MessageText, Timestamp},
    };

    fn create_test_message(n: usize) -> ChatMessage {
        let sender = Identity::new(
            ConnectionId::new("alice".to_string()).unwrap(),
            DisplayName::new("Alice".to_string()).unwrap(),
            Color::from_rgb(0),
        );
        ChatMessage::new(
            MessageId::new(format!("m{}", n)).unwrap(),
            &sender,
            MessageText::new(format!("message {}", n)).unwrap(),
            Timestamp::new(n as i64),
        )
    }

    fn texts(messages: &[ChatMessage]) -> Vec<String> {
        messages.iter().map(|m| m.text.as_str().to_string()).collect()
    }

    #[test]
    fn test_append_below_capacity_keeps_everything() {
        // テスト項目: 容量未満であれば全てのメッセージが到着順に保持される
        // given (前提条件):
        let mut history = HistoryStore::new(5);

        // when (操作):
        for n in 0..3 {
            history.append(create_test_message(n));
        }

        // then (期待する結果):
        assert_eq!(history.len(), 3);
        assert_eq!(
            texts(&history.recent(10)),
            vec!["message 0", "message 1", "message 2"]
        );
    }

    #[test]
    fn test_append_beyond_capacity_evicts_oldest() {
        // テスト項目: 容量を超えると最も古いメッセージから破棄される
        // given (前提条件):
        let mut history = HistoryStore::new(3);

        // when (操作):
        for n in 0..5 {
            history.append(create_test_message(n));
            assert!(history.len() <= 3);
        }

        // then (期待する結果):
        assert_eq!(
            texts(&history.recent(3)),
            vec!["message 2", "message 3", "message 4"]
        );
        assert!(history.find_by_id(&MessageId::new("m0".to_string()).unwrap()).is_none());
    }

    #[test]
    fn test_recent_returns_last_c_after_many_appends() {
        // テスト項目: 既定容量を大きく超えて追加しても、直近 C 件が到着順で返される
        // given (前提条件):
        let mut history = HistoryStore::default();

        // when (操作):
        for n in 0..(DEFAULT_HISTORY_CAPACITY * 2 + 7) {
            history.append(create_test_message(n));
        }
        let recent = history.recent(DEFAULT_HISTORY_CAPACITY);

        // then (期待する結果):
        assert_eq!(recent.len(), DEFAULT_HISTORY_CAPACITY);
        assert_eq!(recent[0].id.as_str(), "m207");
        assert_eq!(recent[DEFAULT_HISTORY_CAPACITY - 1].id.as_str(), "m406");
    }

    #[test]
    fn test_recent_with_zero_returns_empty() {
        // テスト項目: k = 0 の場合は空のリストが返される
        // given (前提条件):
        let mut history = HistoryStore::new(3);
        history.append(create_test_message(0));

        // when (操作):
        let recent = history.recent(0);

        // then (期待する結果):
        assert!(recent.is_empty());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_recent_returns_tail_only() {
        // テスト項目: k が件数より小さい場合は末尾 k 件のみが返される
        // given (前提条件):
        let mut history = HistoryStore::new(10);
        for n in 0..4 {
            history.append(create_test_message(n));
        }

        // when (操作):
        let recent = history.recent(2);

        // then (期待する結果):
        assert_eq!(texts(&recent), vec!["message 2", "message 3"]);
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        // テスト項目: 容量 0 を指定しても最低 1 件は保持される
        // given (前提条件):
        let mut history = HistoryStore::new(0);

        // when (操作):
        history.append(create_test_message(0));
        history.append(create_test_message(1));

        // then (期待する結果):
        assert_eq!(history.capacity(), 1);
        assert_eq!(texts(&history.recent(5)), vec!["message 1"]);
    }

    #[test]
    fn test_find_by_id_mut_allows_reaction_update() {
        // テスト項目: ID で検索したメッセージを更新できる
        // given (前提条件):
        let mut history = HistoryStore::new(3);
        history.append(create_test_message(0));
        let id = MessageId::new("m0".to_string()).unwrap();

        // when (操作):
        let found = history.find_by_id_mut(&id);

        // then (期待する結果):
        assert!(found.is_some());
        assert!(history
            .find_by_id(&MessageId::new("missing".to_string()).unwrap())
            .is_none());
    }
}
