//! Server state shared by the handlers.

use crate::usecase::EngineHandle;

/// Per-connection outbound queue length used when nothing else is configured.
pub const DEFAULT_OUTBOUND_BUFFER: usize = 256;
/// Largest inbound WebSocket frame accepted when nothing else is configured.
pub const DEFAULT_MAX_FRAME_BYTES: usize = 64 * 1024;

/// Shared application state
pub struct AppState {
    /// BroadcastEngine へのハンドル（ルーム状態の唯一の所有者）
    pub engine: EngineHandle,
    /// `GET /api/messages` が返す履歴の件数
    pub init_history_len: usize,
    /// 接続ごとの送信キューの長さ
    pub outbound_buffer: usize,
    /// 受信フレームの最大サイズ（バイト）
    pub max_frame_bytes: usize,
}

impl AppState {
    pub fn new(engine: EngineHandle, init_history_len: usize) -> Self {
        Self {
            engine,
            init_history_len,
            outbound_buffer: DEFAULT_OUTBOUND_BUFFER,
            max_frame_bytes: DEFAULT_MAX_FRAME_BYTES,
        }
    }
}
