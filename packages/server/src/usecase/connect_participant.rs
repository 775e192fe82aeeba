//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 既定 Identity の割り当て、init の送信、user-joined のブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 新規接続者が init だけで部屋の状態を復元できることを保証
//! - user-joined が新規接続者自身には届かないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：最初の参加者、既存参加者がいる状態での参加
//! - エッジケース：履歴が init の上限件数を超えている場合

use std::sync::Arc;

use crate::domain::{
    ConnectionId, Identity, IdentityGenerator, MessagePusher, OutboundEvent, PusherChannel, Room,
};

use super::error::UseCaseError;

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 既定の表示名・色の生成器
    identity_generator: Arc<dyn IdentityGenerator>,
    /// init に含める履歴の件数
    init_history_len: usize,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(
        message_pusher: Arc<dyn MessagePusher>,
        identity_generator: Arc<dyn IdentityGenerator>,
        init_history_len: usize,
    ) -> Self {
        Self {
            message_pusher,
            identity_generator,
            init_history_len,
        }
    }

    /// 参加者接続を実行
    ///
    /// # Arguments
    ///
    /// * `room` - 部屋の状態
    /// * `connection_id` - 新しい接続の ID
    /// * `sender` - 接続への送信キュー
    ///
    /// # Returns
    ///
    /// * `Ok(Identity)` - 割り当てられた Identity
    pub async fn execute(
        &self,
        room: &mut Room,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<Identity, UseCaseError> {
        // 1. 既定 Identity を割り当てて登録
        let identity = room
            .registry
            .register(connection_id.clone(), self.identity_generator.as_ref());

        // 2. MessagePusher に送信キューを登録
        self.message_pusher
            .register_client(connection_id.clone(), sender)
            .await;

        // 3. 新規接続者にだけ init を送信
        let init = OutboundEvent::Init {
            identity: identity.clone(),
            history: room.history.recent(self.init_history_len),
            online: room.registry.snapshot(),
            typing: room.presence.members(),
        };
        if let Err(e) = self.message_pusher.push_to(&connection_id, &init).await {
            // 送信キューが閉じていれば、UI 層の切断処理で登録解除される
            tracing::warn!("Failed to send init to '{}': {}", connection_id, e);
        }

        // 4. 他の参加者に user-joined をブロードキャスト
        let targets = room.registry.connection_ids_except(&connection_id);
        self.message_pusher
            .broadcast(&targets, &OutboundEvent::UserJoined(identity.clone()))
            .await?;

        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ChatMessage, MessageId, MessageText, Timestamp},
        usecase::test_support::{
            RecordingPusher, SequentialIdentityGenerator, connection_id, join_all,
        },
    };

    fn create_test_usecase(
        pusher: Arc<RecordingPusher>,
        init_history_len: usize,
    ) -> ConnectParticipantUseCase {
        ConnectParticipantUseCase::new(
            pusher,
            Arc::new(SequentialIdentityGenerator::default()),
            init_history_len,
        )
    }

    #[tokio::test]
    async fn test_first_participant_receives_init_only() {
        // テスト項目: 最初の参加者は自分の Identity を含む init だけを受け取る
        // given (前提条件):
        let pusher = RecordingPusher::new();
        let usecase = create_test_usecase(pusher.clone(), 100);
        let mut room = Room::default();
        let (sender, _frames, _evicted) = PusherChannel::bounded(8);

        // when (操作):
        let identity = usecase
            .execute(&mut room, connection_id("alice"), sender)
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(identity.display_name.as_str(), "User-0");
        assert!(room.registry.contains(&connection_id("alice")));
        let events = pusher.events_for(&connection_id("alice"));
        assert_eq!(
            events,
            vec![OutboundEvent::Init {
                identity: identity.clone(),
                history: vec![],
                online: vec![identity],
                typing: vec![],
            }]
        );
    }

    #[tokio::test]
    async fn test_existing_participants_receive_user_joined() {
        // テスト項目: 既存の参加者に user-joined が届き、init には全員が含まれる
        // given (前提条件):
        let pusher = RecordingPusher::new();
        let usecase = create_test_usecase(pusher.clone(), 100);
        let mut room = Room::default();
        join_all(&mut room, &pusher, &["alice", "bob"]).await;
        room.presence.set_typing(&connection_id("bob"), true);
        let (sender, _frames, _evicted) = PusherChannel::bounded(8);

        // when (操作):
        let identity = usecase
            .execute(&mut room, connection_id("charlie"), sender)
            .await
            .unwrap();

        // then (期待する結果):
        for other in ["alice", "bob"] {
            assert_eq!(
                pusher.events_for(&connection_id(other)),
                vec![OutboundEvent::UserJoined(identity.clone())]
            );
        }
        let events = pusher.events_for(&connection_id("charlie"));
        assert_eq!(events.len(), 1);
        match &events[0] {
            OutboundEvent::Init { online, typing, .. } => {
                let ids: Vec<&str> = online.iter().map(|i| i.connection_id.as_str()).collect();
                assert_eq!(ids, vec!["alice", "bob", "charlie"]);
                assert_eq!(typing, &vec![connection_id("bob")]);
            }
            other => panic!("expected init, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_init_history_is_limited() {
        // テスト項目: init に含まれる履歴は直近の指定件数に限られる
        // given (前提条件):
        let pusher = RecordingPusher::new();
        let usecase = create_test_usecase(pusher.clone(), 2);
        let mut room = Room::default();
        join_all(&mut room, &pusher, &["alice"]).await;
        let alice = room.registry.get(&connection_id("alice")).unwrap().clone();
        for n in 0..5 {
            room.history.append(ChatMessage::new(
                MessageId::new(format!("m{}", n)).unwrap(),
                &alice,
                MessageText::new(format!("text {}", n)).unwrap(),
                Timestamp::new(n),
            ));
        }
        let (sender, _frames, _evicted) = PusherChannel::bounded(8);

        // when (操作):
        usecase
            .execute(&mut room, connection_id("bob"), sender)
            .await
            .unwrap();

        // then (期待する結果):
        match &pusher.events_for(&connection_id("bob"))[0] {
            OutboundEvent::Init { history, .. } => {
                let ids: Vec<&str> = history.iter().map(|m| m.id.as_str()).collect();
                assert_eq!(ids, vec!["m3", "m4"]);
            }
            other => panic!("expected init, got {:?}", other),
        }
    }
}
