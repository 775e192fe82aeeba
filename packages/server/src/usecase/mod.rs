//! UseCase layer: one use case per inbound event kind, and the engine that
//! serializes them.

mod connect_participant;
mod disconnect_participant;
mod engine;
mod error;
mod react_to_message;
mod rename_participant;
mod send_message;
mod update_typing;

#[cfg(test)]
mod test_support;

pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use engine::{
    BroadcastEngine, DEFAULT_COMMAND_BUFFER, DEFAULT_INIT_HISTORY_LEN, EngineConfig,
    EngineHandle, RoomSnapshot,
};
pub use error::{EngineError, UseCaseError};
pub use react_to_message::ReactToMessageUseCase;
pub use rename_participant::RenameParticipantUseCase;
pub use send_message::SendMessageUseCase;
pub use update_typing::UpdateTypingUseCase;
