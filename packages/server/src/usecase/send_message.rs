//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - メッセージの生成（ID・送信者・時刻）、履歴への追加、全員への new-message 通知
//!
//! ### なぜこのテストが必要か
//! - 送信者を含む全員に同じメッセージが届くことを保証
//! - 履歴の容量を超えても古いものから破棄され、送信自体は成功することを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージ送信とブロードキャスト
//! - 異常系：空白のみのメッセージ、未登録の送信者
//! - エッジケース：履歴容量の超過

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{
    ChatMessage, ConnectionId, MessageId, MessagePusher, MessageText, OutboundEvent, Room,
    RoomError, Timestamp,
};

use super::error::UseCaseError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 送信時刻の取得元
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>, clock: Arc<dyn Clock>) -> Self {
        Self {
            message_pusher,
            clock,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `room` - 部屋の状態
    /// * `from` - 送信者の接続 ID
    /// * `text` - クライアントから受け取った本文
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - 履歴に追加されたメッセージ
    /// * `Err(UseCaseError)` - 本文が不正、または送信者が未登録
    pub async fn execute(
        &self,
        room: &mut Room,
        from: &ConnectionId,
        text: String,
    ) -> Result<ChatMessage, UseCaseError> {
        let text = MessageText::new(text)?;
        let sender = room
            .registry
            .get(from)
            .ok_or_else(|| RoomError::ConnectionNotFound(from.to_string()))?;

        // 1. メッセージを生成して履歴に追加
        let message = ChatMessage::new(
            MessageId::generate(),
            sender,
            text,
            Timestamp::new(self.clock.now_millis()),
        );
        room.history.append(message.clone());

        // 2. 送信者を含む全員にブロードキャスト
        self.message_pusher
            .broadcast(
                &room.registry.connection_ids(),
                &OutboundEvent::NewMessage(message.clone()),
            )
            .await?;

        Ok(message)
    }
}
