//! HTTP and WebSocket handlers.

mod http;
mod websocket;

pub use http::{debug_room_state, get_messages, health_check};
pub use websocket::{root_handler, websocket_handler};
