//! UseCase: メッセージへのリアクション
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ReactToMessageUseCase::execute() メソッド
//! - リアクション件数の加算と message-reaction の通知
//!
//! ### なぜこのテストが必要か
//! - 件数が単調増加し、加算が失われないことを保証
//! - 存在しないメッセージへのリアクションで状態が変化しないことを確認

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessageId, MessagePusher, OutboundEvent, ReactionSymbol, Reactions, Room,
    RoomError,
};

use super::error::UseCaseError;

/// リアクションのユースケース
pub struct ReactToMessageUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl ReactToMessageUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// リアクションを 1 件加算し、更新後の件数を全員に通知する
    ///
    /// # Arguments
    ///
    /// * `room` - 部屋の状態
    /// * `from` - リアクションした接続の ID
    /// * `message_id` - 対象メッセージの ID（クライアント入力）
    /// * `symbol` - リアクション記号（クライアント入力）
    pub async fn execute(
        &self,
        room: &mut Room,
        from: &ConnectionId,
        message_id: String,
        symbol: String,
    ) -> Result<Reactions, UseCaseError> {
        if !room.registry.contains(from) {
            return Err(RoomError::ConnectionNotFound(from.to_string()).into());
        }
        let message_id = MessageId::new(message_id)?;
        let symbol = ReactionSymbol::new(symbol)?;

        let reactions = room.apply_reaction(&message_id, &symbol)?;

        self.message_pusher
            .broadcast(
                &room.registry.connection_ids(),
                &OutboundEvent::MessageReaction {
                    message_id,
                    reactions: reactions.clone(),
                },
            )
            .await?;

        Ok(reactions)
    }
}
