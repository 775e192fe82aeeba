//! Hiroba chat relay: one shared room with presence, typing indicators,
//! reactions and a bounded message history over WebSocket.

pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
