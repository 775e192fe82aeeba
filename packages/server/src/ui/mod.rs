//! WebSocket chat relay transport: axum router, handlers and server runner.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
pub use state::AppState;
