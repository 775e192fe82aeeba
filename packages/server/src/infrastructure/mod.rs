//! Infrastructure layer: wire DTOs, the WebSocket pusher and the random
//! identity generator.

pub mod dto;
pub mod identity_generator;
pub mod message_pusher;

pub use identity_generator::RandomIdentityGenerator;
pub use message_pusher::WebSocketMessagePusher;
