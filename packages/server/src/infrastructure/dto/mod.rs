//! Data Transfer Objects (DTOs) for external communication.
//!
//! - `websocket`: the `{type, data}` envelope exchanged over WebSocket
//! - `http`: responses of the HTTP endpoints
//! - `conversion`: domain ⇔ DTO conversions

pub mod conversion;
pub mod http;
pub mod websocket;
