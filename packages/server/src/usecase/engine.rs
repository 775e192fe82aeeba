//! BroadcastEngine: the single owner of the room state.
//!
//! Every inbound event from every connection is funneled through one bounded
//! command channel into one task that owns the [`Room`]. Each command runs to
//! completion (store mutation, then fan-out) before the next is taken, so
//! events never interleave and no client observes a fan-out whose effect is
//! not yet visible to later reads.
//!
//! Fan-out never blocks on a client: the [`MessagePusher`] enqueues into
//! per-connection bounded queues without waiting.

use std::sync::Arc;

use hiroba_shared::time::Clock;
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

use crate::domain::{
    ChatMessage, ConnectionId, DEFAULT_HISTORY_CAPACITY, Identity, IdentityGenerator,
    InboundEvent, MessagePusher, OutboundEvent, PusherChannel, Room,
};

use super::{
    connect_participant::ConnectParticipantUseCase,
    disconnect_participant::DisconnectParticipantUseCase,
    error::{EngineError, UseCaseError},
    react_to_message::ReactToMessageUseCase,
    rename_participant::RenameParticipantUseCase,
    send_message::SendMessageUseCase,
    update_typing::UpdateTypingUseCase,
};

/// Number of history entries sent in `init` and served by the history endpoint.
pub const DEFAULT_INIT_HISTORY_LEN: usize = 100;
/// Commands that may wait for the engine before senders are suspended.
pub const DEFAULT_COMMAND_BUFFER: usize = 1024;

/// Engine tuning.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub history_capacity: usize,
    pub init_history_len: usize,
    pub command_buffer: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            init_history_len: DEFAULT_INIT_HISTORY_LEN,
            command_buffer: DEFAULT_COMMAND_BUFFER,
        }
    }
}

/// Point-in-time copy of the whole room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub online: Vec<Identity>,
    pub typing: Vec<ConnectionId>,
    pub history: Vec<ChatMessage>,
    pub history_capacity: usize,
}

enum Command {
    Open {
        sender: PusherChannel,
        reply: oneshot::Sender<Result<Identity, UseCaseError>>,
    },
    Inbound {
        connection_id: ConnectionId,
        event: InboundEvent,
    },
    Reject {
        connection_id: ConnectionId,
        error: UseCaseError,
    },
    Close {
        connection_id: ConnectionId,
    },
    RecentHistory {
        limit: usize,
        reply: oneshot::Sender<Vec<ChatMessage>>,
    },
    Snapshot {
        reply: oneshot::Sender<RoomSnapshot>,
    },
}

/// Cloneable handle used by the transport to talk to the engine.
#[derive(Clone)]
pub struct EngineHandle {
    commands: mpsc::Sender<Command>,
}

impl EngineHandle {
    async fn send(&self, command: Command) -> Result<(), EngineError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| EngineError::Stopped)
    }

    /// Register a new connection whose outbound frames go to `sender`.
    ///
    /// `init` is already queued on `sender` when this returns.
    pub async fn open(&self, sender: PusherChannel) -> Result<Identity, EngineError> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Open { sender, reply }).await?;
        response
            .await
            .map_err(|_| EngineError::Stopped)?
            .map_err(EngineError::Refused)
    }

    /// Deliver one decoded inbound event from `connection_id`.
    pub async fn dispatch(
        &self,
        connection_id: ConnectionId,
        event: InboundEvent,
    ) -> Result<(), EngineError> {
        self.send(Command::Inbound {
            connection_id,
            event,
        })
        .await
    }

    /// Report a frame from `connection_id` that could not be decoded.
    pub async fn reject(
        &self,
        connection_id: ConnectionId,
        error: UseCaseError,
    ) -> Result<(), EngineError> {
        self.send(Command::Reject {
            connection_id,
            error,
        })
        .await
    }

    /// Notify the engine that `connection_id` is gone.
    pub async fn close(&self, connection_id: ConnectionId) -> Result<(), EngineError> {
        self.send(Command::Close { connection_id }).await
    }

    /// The last `limit` messages, oldest first.
    pub async fn recent_history(&self, limit: usize) -> Result<Vec<ChatMessage>, EngineError> {
        let (reply, response) = oneshot::channel();
        self.send(Command::RecentHistory { limit, reply }).await?;
        response.await.map_err(|_| EngineError::Stopped)
    }

    pub async fn snapshot(&self) -> Result<RoomSnapshot, EngineError> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Snapshot { reply }).await?;
        response.await.map_err(|_| EngineError::Stopped)
    }
}

/// Owner of the room; dispatches inbound events to the use cases.
pub struct BroadcastEngine {
    room: Room,
    message_pusher: Arc<dyn MessagePusher>,
    connect_participant_usecase: ConnectParticipantUseCase,
    disconnect_participant_usecase: DisconnectParticipantUseCase,
    rename_participant_usecase: RenameParticipantUseCase,
    send_message_usecase: SendMessageUseCase,
    update_typing_usecase: UpdateTypingUseCase,
    react_to_message_usecase: ReactToMessageUseCase,
    command_buffer: usize,
}

impl BroadcastEngine {
    pub fn new(
        config: EngineConfig,
        message_pusher: Arc<dyn MessagePusher>,
        identity_generator: Arc<dyn IdentityGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            room: Room::new(config.history_capacity),
            connect_participant_usecase: ConnectParticipantUseCase::new(
                message_pusher.clone(),
                identity_generator,
                config.init_history_len,
            ),
            disconnect_participant_usecase: DisconnectParticipantUseCase::new(
                message_pusher.clone(),
            ),
            rename_participant_usecase: RenameParticipantUseCase::new(message_pusher.clone()),
            send_message_usecase: SendMessageUseCase::new(message_pusher.clone(), clock),
            update_typing_usecase: UpdateTypingUseCase::new(message_pusher.clone()),
            react_to_message_usecase: ReactToMessageUseCase::new(message_pusher.clone()),
            message_pusher,
            command_buffer: config.command_buffer.max(1),
        }
    }

    /// Start the engine task. It stops once every handle has been dropped.
    pub fn spawn(self) -> (EngineHandle, JoinHandle<()>) {
        let (commands, receiver) = mpsc::channel(self.command_buffer);
        let task = tokio::spawn(self.run(receiver));
        (EngineHandle { commands }, task)
    }

    async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        tracing::info!(
            "Broadcast engine started (history capacity {})",
            self.room.history.capacity()
        );
        while let Some(command) = commands.recv().await {
            self.handle(command).await;
        }
        tracing::info!("Broadcast engine stopped");
    }

    async fn handle(&mut self, command: Command) {
        match command {
            Command::Open { sender, reply } => self.open(sender, reply).await,
            Command::Inbound {
                connection_id,
                event,
            } => {
                let kind = event.kind();
                if let Err(e) = self.handle_inbound(&connection_id, event).await {
                    self.notify_rejection(&connection_id, kind, e).await;
                }
            }
            Command::Reject {
                connection_id,
                error,
            } => self.notify_rejection(&connection_id, "frame", error).await,
            Command::Close { connection_id } => self.close(&connection_id).await,
            Command::RecentHistory { limit, reply } => {
                let _ = reply.send(self.room.history.recent(limit));
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(RoomSnapshot {
                    online: self.room.registry.snapshot(),
                    typing: self.room.presence.members(),
                    history: self.room.history.recent(self.room.history.capacity()),
                    history_capacity: self.room.history.capacity(),
                });
            }
        }
    }

    async fn open(
        &mut self,
        sender: PusherChannel,
        reply: oneshot::Sender<Result<Identity, UseCaseError>>,
    ) {
        let connection_id = ConnectionId::generate();
        let result = self
            .connect_participant_usecase
            .execute(&mut self.room, connection_id.clone(), sender)
            .await;

        match &result {
            Ok(identity) => tracing::info!(
                "Connection '{}' joined as '{}' ({} online)",
                connection_id,
                identity.display_name.as_str(),
                self.room.registry.len()
            ),
            Err(e) => tracing::warn!("Failed to open connection '{}': {}", connection_id, e),
        }

        let failed = result.is_err();
        if reply.send(result).is_err() || failed {
            // Nobody will ever send Close for this id.
            self.close(&connection_id).await;
        }
    }

    async fn handle_inbound(
        &mut self,
        connection_id: &ConnectionId,
        event: InboundEvent,
    ) -> Result<(), UseCaseError> {
        match event {
            InboundEvent::SetName(name) => {
                let identity = self
                    .rename_participant_usecase
                    .execute(&mut self.room, connection_id, name)
                    .await?;
                tracing::info!(
                    "Connection '{}' renamed to '{}'",
                    connection_id,
                    identity.display_name.as_str()
                );
            }
            InboundEvent::SendText(text) => {
                let message = self
                    .send_message_usecase
                    .execute(&mut self.room, connection_id, text)
                    .await?;
                tracing::debug!(
                    "Message '{}' from '{}' appended ({} in history)",
                    message.id.as_str(),
                    connection_id,
                    self.room.history.len()
                );
            }
            InboundEvent::SetTyping(is_typing) => {
                let changed = self
                    .update_typing_usecase
                    .execute(&mut self.room, connection_id, is_typing)
                    .await?;
                tracing::debug!(
                    "Connection '{}' typing={} (changed: {})",
                    connection_id,
                    is_typing,
                    changed
                );
            }
            InboundEvent::React { message_id, symbol } => {
                self.react_to_message_usecase
                    .execute(&mut self.room, connection_id, message_id, symbol)
                    .await?;
            }
        }
        Ok(())
    }

    async fn notify_rejection(
        &self,
        connection_id: &ConnectionId,
        kind: &str,
        error: UseCaseError,
    ) {
        let Some(rejection) = error.rejection_kind() else {
            tracing::warn!(
                "Transport failure while handling '{}' from '{}': {}",
                kind,
                connection_id,
                error
            );
            return;
        };

        tracing::debug!("Rejected '{}' from '{}': {}", kind, connection_id, error);
        let event = OutboundEvent::Error {
            kind: rejection,
            message: error.to_string(),
        };
        if let Err(e) = self.message_pusher.push_to(connection_id, &event).await {
            tracing::debug!("Could not notify '{}' of rejection: {}", connection_id, e);
        }
    }

    async fn close(&mut self, connection_id: &ConnectionId) {
        match self
            .disconnect_participant_usecase
            .execute(&mut self.room, connection_id)
            .await
        {
            Ok(notified) => tracing::info!(
                "Connection '{}' left ({} notified)",
                connection_id,
                notified.len()
            ),
            Err(UseCaseError::NotFound(_)) => {
                tracing::debug!("Connection '{}' was already closed", connection_id)
            }
            Err(e) => tracing::warn!("Failed to close connection '{}': {}", connection_id, e),
        }
    }
}
