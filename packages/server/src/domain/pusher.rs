//! MessagePusher trait 定義
//!
//! ドメイン層が必要とする「接続へのイベント送信」のインターフェース。
//! 具体的な実装（WebSocket など）は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::{
    mpsc::{self, error::TrySendError},
    oneshot,
};

use super::{error::MessagePushError, event::OutboundEvent, value_object::ConnectionId};

/// 接続ごとの送信キュー（有界）
///
/// 受信側は UI 層が保持します。
/// - `mpsc::Receiver<String>`: 送信ループが読み出すフレーム
/// - `oneshot::Receiver<()>`: MessagePusher がこの接続を手放したことの通知
///
/// 通知は `evict` の呼び出し時だけでなく、`PusherChannel` が破棄された時点でも
/// 受信側で完了します。送信ループが停止したソケットへの書き込みで止まっていても、
/// UI 層は通知を受けて切断処理を開始できます。
#[derive(Debug)]
pub struct PusherChannel {
    frames: mpsc::Sender<String>,
    evicted: oneshot::Sender<()>,
}

impl PusherChannel {
    /// 長さ `capacity` の送信キューを作成
    pub fn bounded(capacity: usize) -> (Self, mpsc::Receiver<String>, oneshot::Receiver<()>) {
        let (frames, frames_rx) = mpsc::channel(capacity.max(1));
        let (evicted, evicted_rx) = oneshot::channel();
        (Self { frames, evicted }, frames_rx, evicted_rx)
    }

    /// 待機せずにフレームをキューへ投入
    pub fn try_send(&self, frame: String) -> Result<(), TrySendError<String>> {
        self.frames.try_send(frame)
    }

    /// 接続を切り離したことを UI 層に通知
    pub fn evict(self) {
        let _ = self.evicted.send(());
    }
}

/// MessagePusher trait
///
/// 送信は全てノンブロッキングで行われ、遅いクライアントが他の接続への
/// 配信を遅らせることはありません。
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// クライアントの送信キューを登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// クライアントの送信キューを登録解除（冪等）
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 特定のクライアントにイベントを送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError>;

    /// 複数のクライアントにイベントを送信
    ///
    /// 一部のクライアントへの送信失敗は許容され、ログに記録されます。
    async fn broadcast(
        &self,
        targets: &[ConnectionId],
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError>;
}
