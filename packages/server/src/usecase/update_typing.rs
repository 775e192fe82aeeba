//! UseCase: 入力中状態の更新

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, OutboundEvent, Room, RoomError};

use super::error::UseCaseError;

/// 入力中状態更新のユースケース
pub struct UpdateTypingUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl UpdateTypingUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 入力中フラグを更新し、集合が変化した場合のみ typing-users を全員に通知する
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - 集合が変化し、通知した
    /// * `Ok(false)` - 変化がなく、通知を省略した
    pub async fn execute(
        &self,
        room: &mut Room,
        connection_id: &ConnectionId,
        is_typing: bool,
    ) -> Result<bool, UseCaseError> {
        if !room.registry.contains(connection_id) {
            return Err(RoomError::ConnectionNotFound(connection_id.to_string()).into());
        }

        if !room.presence.set_typing(connection_id, is_typing) {
            return Ok(false);
        }

        self.message_pusher
            .broadcast(
                &room.registry.connection_ids(),
                &OutboundEvent::TypingUsers(room.presence.members()),
            )
            .await?;

        Ok(true)
    }
}
