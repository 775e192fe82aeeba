//! Typing presence.

use super::value_object::ConnectionId;

/// Connections currently flagged as typing, in the order they started.
#[derive(Debug, Clone, Default)]
pub struct PresenceSet {
    typing: Vec<ConnectionId>,
}

impl PresenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or remove `connection_id`. Returns `true` if the set changed.
    pub fn set_typing(&mut self, connection_id: &ConnectionId, is_typing: bool) -> bool {
        if is_typing {
            if self.contains(connection_id) {
                return false;
            }
            self.typing.push(connection_id.clone());
            true
        } else {
            self.clear(connection_id)
        }
    }

    /// Remove `connection_id`. Returns `true` if it was present.
    pub fn clear(&mut self, connection_id: &ConnectionId) -> bool {
        let before = self.typing.len();
        self.typing.retain(|id| id != connection_id);
        self.typing.len() != before
    }

    pub fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.typing.contains(connection_id)
    }

    pub fn members(&self) -> Vec<ConnectionId> {
        self.typing.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.typing.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string()).unwrap()
    }

    #[test]
    fn test_set_typing_adds_once() {
        // テスト項目: 入力中フラグを 2 回立てても重複しない
        // given (前提条件):
        let mut presence = PresenceSet::new();

        // when (操作):
        let first = presence.set_typing(&id("alice"), true);
        let second = presence.set_typing(&id("alice"), true);

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        assert_eq!(presence.members(), vec![id("alice")]);
    }

    #[test]
    fn test_set_typing_false_removes() {
        // テスト項目: 入力中フラグを下ろすと集合から削除される
        // given (前提条件):
        let mut presence = PresenceSet::new();
        presence.set_typing(&id("alice"), true);
        presence.set_typing(&id("bob"), true);

        // when (操作):
        let changed = presence.set_typing(&id("alice"), false);

        // then (期待する結果):
        assert!(changed);
        assert_eq!(presence.members(), vec![id("bob")]);
    }

    #[test]
    fn test_set_typing_false_when_absent_is_noop() {
        // テスト項目: 入力中でない接続のフラグを下ろしても変化しない
        // given (前提条件):
        let mut presence = PresenceSet::new();

        // when (操作):
        let changed = presence.set_typing(&id("alice"), false);

        // then (期待する結果):
        assert!(!changed);
        assert!(presence.is_empty());
    }

    #[test]
    fn test_members_keep_start_order() {
        // テスト項目: メンバーは入力を開始した順に並ぶ
        // given (前提条件):
        let mut presence = PresenceSet::new();

        // when (操作):
        presence.set_typing(&id("charlie"), true);
        presence.set_typing(&id("alice"), true);
        presence.set_typing(&id("bob"), true);

        // then (期待する結果):
        assert_eq!(
            presence.members(),
            vec![id("charlie"), id("alice"), id("bob")]
        );
    }

    #[test]
    fn test_clear_on_disconnect() {
        // テスト項目: 切断時の clear で入力中の接続が取り除かれる
        // given (前提条件):
        let mut presence = PresenceSet::new();
        presence.set_typing(&id("alice"), true);

        // when (操作):
        let removed = presence.clear(&id("alice"));
        let removed_again = presence.clear(&id("alice"));

        // then (期待する結果):
        assert!(removed);
        assert!(!removed_again);
        assert!(!presence.contains(&id("alice")));
    }
}
