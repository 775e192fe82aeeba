//! Domain layer: value objects, entities, room stores and the ports the
//! relay depends on.

pub mod error;
pub mod event;
pub mod history;
pub mod identity;
pub mod message;
pub mod presence;
pub mod pusher;
pub mod registry;
pub mod room;
pub mod value_object;

pub use error::{MessagePushError, RoomError, ValueObjectError};
pub use event::{InboundEvent, OutboundEvent, RejectionKind};
pub use history::{DEFAULT_HISTORY_CAPACITY, HistoryStore};
pub use identity::{Identity, IdentityGenerator};
pub use message::{ChatMessage, Reactions};
pub use presence::PresenceSet;
pub use pusher::{MessagePusher, PusherChannel};
pub use registry::ConnectionRegistry;
pub use room::Room;
pub use value_object::{
    Color, ConnectionId, DisplayName, MessageId, MessageText, ReactionSymbol, Timestamp,
};
