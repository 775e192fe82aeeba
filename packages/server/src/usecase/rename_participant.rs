//! UseCase: 表示名の変更

use std::sync::Arc;

use crate::domain::{ConnectionId, DisplayName, Identity, MessagePusher, OutboundEvent, Room};

use super::error::UseCaseError;

/// 表示名変更のユースケース
pub struct RenameParticipantUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl RenameParticipantUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 表示名を変更し、全員に user-updated を通知する
    ///
    /// 名前が不正な場合や接続が存在しない場合は、状態を変更せず通知も行わない。
    pub async fn execute(
        &self,
        room: &mut Room,
        connection_id: &ConnectionId,
        new_name: String,
    ) -> Result<Identity, UseCaseError> {
        let display_name = DisplayName::new(new_name)?;
        let identity = room.registry.rename(connection_id, display_name)?;

        self.message_pusher
            .broadcast(
                &room.registry.connection_ids(),
                &OutboundEvent::UserUpdated(identity.clone()),
            )
            .await?;

        Ok(identity)
    }
}
