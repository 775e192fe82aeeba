//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{MessagePushError, RejectionKind, RoomError, ValueObjectError};

/// 1 件のイベント処理の失敗
///
/// `NotFound` と `InvalidInput` は発信元のイベントだけを破棄し、
/// `Transport` はその接続の切断処理につながります。いずれもプロセス全体には波及しません。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UseCaseError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("transport error: {0}")]
    Transport(String),
}

impl UseCaseError {
    /// 発信元へ通知すべき拒否理由（Transport は通知しない）
    pub fn rejection_kind(&self) -> Option<RejectionKind> {
        match self {
            UseCaseError::NotFound(_) => Some(RejectionKind::NotFound),
            UseCaseError::InvalidInput(_) => Some(RejectionKind::InvalidInput),
            UseCaseError::Transport(_) => None,
        }
    }
}

impl From<ValueObjectError> for UseCaseError {
    fn from(error: ValueObjectError) -> Self {
        UseCaseError::InvalidInput(error.to_string())
    }
}

impl From<RoomError> for UseCaseError {
    fn from(error: RoomError) -> Self {
        UseCaseError::NotFound(error.to_string())
    }
}

impl From<MessagePushError> for UseCaseError {
    fn from(error: MessagePushError) -> Self {
        UseCaseError::Transport(error.to_string())
    }
}

/// BroadcastEngine との通信の失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("broadcast engine has stopped")]
    Stopped,

    #[error("connection refused: {0}")]
    Refused(UseCaseError),
}
