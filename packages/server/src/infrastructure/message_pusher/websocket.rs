//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの送信キュー（`PusherChannel`）を管理
//! - ドメインイベントを JSON フレームにエンコードしてキューへ投入（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! キューへの投入は `try_send` で行い、決して待機しません。
//! キューが満杯の接続は送信キューを破棄され、切り離しが通知されます。通知を受けた UI 層は
//! WebSocket を閉じ、通常の切断処理を 1 回だけ実行します。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::error::TrySendError};

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, OutboundEvent, PusherChannel},
    infrastructure::dto::websocket::OutboundFrame,
};

/// WebSocket を使った MessagePusher 実装
///
/// ## フィールド
///
/// - `clients`: 接続中のクライアントと対応する送信キューのマップ
pub struct WebSocketMessagePusher {
    clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new(clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>) -> Self {
        Self { clients }
    }

    fn encode(event: &OutboundEvent) -> Result<String, MessagePushError> {
        OutboundFrame::from(event)
            .encode()
            .map_err(|e| MessagePushError::Encode(e.to_string()))
    }

    /// 1 つの接続のキューに投入する。満杯・切断済みのキューは取り除く。
    fn enqueue(
        clients: &mut HashMap<ConnectionId, PusherChannel>,
        connection_id: &ConnectionId,
        frame: String,
    ) -> Result<(), MessagePushError> {
        let sender = clients
            .get(connection_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(connection_id.to_string()))?;

        match sender.try_send(frame) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                if let Some(channel) = clients.remove(connection_id) {
                    channel.evict();
                }
                Err(MessagePushError::QueueFull(connection_id.to_string()))
            }
            Err(TrySendError::Closed(_)) => {
                if let Some(channel) = clients.remove(connection_id) {
                    channel.evict();
                }
                Err(MessagePushError::ChannelClosed(connection_id.to_string()))
            }
        }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(HashMap::new())))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        tracing::debug!("Client '{}' registered to MessagePusher", connection_id);
        clients.insert(connection_id, sender);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(connection_id);
        tracing::debug!("Client '{}' unregistered from MessagePusher", connection_id);
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError> {
        let frame = Self::encode(event)?;
        let mut clients = self.clients.lock().await;
        Self::enqueue(&mut clients, connection_id, frame)?;
        tracing::debug!("Pushed '{}' to client '{}'", event.kind(), connection_id);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: &[ConnectionId],
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError> {
        let frame = Self::encode(event)?;
        let mut clients = self.clients.lock().await;

        for target in targets {
            // ブロードキャストでは一部の送信失敗を許容
            match Self::enqueue(&mut clients, target, frame.clone()) {
                Ok(()) => {}
                Err(MessagePushError::QueueFull(_)) => {
                    tracing::warn!(
                        "Outbound queue of client '{}' is full, disconnecting slow consumer",
                        target
                    );
                }
                Err(e) => tracing::warn!("Failed to push '{}': {}", event.kind(), e),
            }
        }
        tracing::debug!("Broadcasted '{}' to {} clients", event.kind(), targets.len());

        Ok(())
    }
}
