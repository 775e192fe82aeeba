//! Hiroba chat relay server.
//!
//! Every connected client joins one shared room and receives its history,
//! presence, typing indicators and reactions in real time.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;
use hiroba_server::{
    infrastructure::{RandomIdentityGenerator, WebSocketMessagePusher},
    ui::{AppState, Server},
    usecase::{BroadcastEngine, DEFAULT_COMMAND_BUFFER, EngineConfig},
};
use hiroba_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "WebSocket group chat relay with presence, typing and reactions")]
#[command(long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// First port number tried
    #[arg(short = 'p', long, default_value = "3000")]
    port: u16,

    /// How many consecutive ports to try when the port is already in use
    #[arg(long, default_value = "10")]
    max_port_attempts: u16,

    /// Number of messages kept in the history
    #[arg(long, default_value = "200")]
    history_capacity: usize,

    /// Number of history entries sent on join and served by /api/messages
    #[arg(long, default_value = "100")]
    init_history: usize,

    /// Outbound queue length per connection; slower clients are disconnected
    #[arg(long, default_value = "256")]
    outbound_buffer: usize,

    /// Largest accepted inbound WebSocket frame in bytes
    #[arg(long, default_value = "65536")]
    max_frame_bytes: usize,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Initialize dependencies in order:
    // 1. MessagePusher
    // 2. BroadcastEngine
    // 3. AppState
    // 4. Server

    // 1. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::default());

    // 2. Start the BroadcastEngine (sole owner of the room)
    let config = EngineConfig {
        history_capacity: args.history_capacity,
        init_history_len: args.init_history,
        command_buffer: DEFAULT_COMMAND_BUFFER,
    };
    let (engine, _engine_task) = BroadcastEngine::new(
        config,
        message_pusher,
        Arc::new(RandomIdentityGenerator),
        Arc::new(SystemClock),
    )
    .spawn();

    // 3. Create AppState
    let state = AppState {
        engine,
        init_history_len: args.init_history,
        outbound_buffer: args.outbound_buffer,
        max_frame_bytes: args.max_frame_bytes,
    };

    // 4. Create and run the server
    let server = Server::new(state);
    if let Err(e) = server
        .run(&args.host, args.port, args.max_port_attempts)
        .await
    {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
