//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 登録解除、入力中状態の解除、user-left → typing-users の順での通知
//!
//! ### なぜこのテストが必要か
//! - 入力中のまま切断した接続が typing-users に残らないことを保証
//! - 同じ接続の切断が二重に通知されないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：入力中の参加者の切断
//! - エッジケース：最後の参加者の切断（通知対象なし）
//! - 異常系：登録されていない接続の切断

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, OutboundEvent, Room, RoomError};

use super::error::UseCaseError;

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 参加者切断を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ConnectionId>)` - 通知したクライアント ID リスト
    /// * `Err(UseCaseError::NotFound)` - 既に切断済み（通知は行わない）
    pub async fn execute(
        &self,
        room: &mut Room,
        connection_id: &ConnectionId,
    ) -> Result<Vec<ConnectionId>, UseCaseError> {
        // 1. 送信キューを登録解除（冪等）
        self.message_pusher.unregister_client(connection_id).await;

        // 2. 入力中状態と登録を削除
        room.presence.clear(connection_id);
        room.registry
            .unregister(connection_id)
            .ok_or_else(|| RoomError::ConnectionNotFound(connection_id.to_string()))?;

        // 3. 残りの参加者に user-left と最新の typing-users を通知
        let notify_targets = room.registry.connection_ids();
        self.message_pusher
            .broadcast(&notify_targets, &OutboundEvent::UserLeft(connection_id.clone()))
            .await?;
        self.message_pusher
            .broadcast(
                &notify_targets,
                &OutboundEvent::TypingUsers(room.presence.members()),
            )
            .await?;

        Ok(notify_targets)
    }
}
