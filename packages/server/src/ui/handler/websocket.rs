//! WebSocket connection handlers.
//!
//! Each socket gets two loops: the receive loop decodes inbound frames and
//! hands them to the engine, the pusher loop drains the connection's bounded
//! outbound queue into the socket. Whichever ends first aborts the other, and
//! the engine is told to close the connection exactly once.
//!
//! A connection evicted by the pusher is closed the same way, even while its
//! pusher loop is stuck writing to a client that stopped reading.

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade, rejection::WebSocketUpgradeRejection},
    },
    response::{IntoResponse, Response},
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::sync::mpsc;

use super::http::root;
use crate::{
    domain::{ConnectionId, PusherChannel},
    infrastructure::dto::websocket::InboundFrame,
    ui::state::AppState,
    usecase::{EngineHandle, UseCaseError},
};

/// How long an evicted connection may keep flushing its queue before the socket is dropped.
const EVICTION_FLUSH_TIMEOUT: Duration = Duration::from_secs(1);

/// `/` upgrades WebSocket requests and answers plain HTTP with the liveness text.
pub async fn root_handler(
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
    state: State<Arc<AppState>>,
) -> Response {
    match ws {
        Ok(ws) => websocket_handler(ws, state).await.into_response(),
        Err(_) => root().await.into_response(),
    }
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let max_frame_bytes = state.max_frame_bytes;
    ws.max_message_size(max_frame_bytes)
        .max_frame_size(max_frame_bytes)
        .on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that drains the outbound queue into the WebSocket sender.
///
/// The queue closes when the engine unregisters the connection or when the
/// pusher gives up on a slow consumer; the socket is closed in both cases.
fn pusher_loop(
    mut rx: mpsc::Receiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                return;
            }
        }
        let _ = sender.send(Message::Close(None)).await;
    })
}

/// Spawns a task that decodes frames from this client and forwards them to the engine.
fn receive_loop(
    mut receiver: SplitStream<WebSocket>,
    engine: EngineHandle,
    connection_id: ConnectionId,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            let decoded = match msg {
                Message::Text(text) => InboundFrame::decode(text.as_str()),
                Message::Binary(bytes) => InboundFrame::decode_bytes(&bytes),
                Message::Close(_) => {
                    tracing::info!("Client '{}' requested close", connection_id);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                Message::Ping(_) | Message::Pong(_) => continue,
            };

            let forwarded = match decoded {
                Ok(frame) => engine.dispatch(connection_id.clone(), frame.into()).await,
                Err(e) => {
                    tracing::warn!("Dropping malformed frame from '{}': {}", connection_id, e);
                    engine
                        .reject(
                            connection_id.clone(),
                            UseCaseError::InvalidInput(format!("malformed frame: {}", e)),
                        )
                        .await
                }
            };
            if let Err(e) = forwarded {
                tracing::error!("Could not forward frame from '{}': {}", connection_id, e);
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    // Create a bounded queue for this client's outbound frames
    let (channel, rx, evicted) = PusherChannel::bounded(state.outbound_buffer);

    // `init` is already queued on `rx` once the engine replies
    let identity = match state.engine.open(channel).await {
        Ok(identity) => identity,
        Err(e) => {
            tracing::error!("Failed to open connection: {}", e);
            return;
        }
    };
    let connection_id = identity.connection_id;

    let (sender, receiver) = socket.split();
    let mut send_task = pusher_loop(rx, sender);
    let mut recv_task = receive_loop(receiver, state.engine.clone(), connection_id.clone());

    // If any one of the tasks completes or the pusher gives up on this client, stop both
    let was_evicted = tokio::select! {
        _ = &mut recv_task => false,
        _ = &mut send_task => false,
        _ = evicted => true,
    };
    recv_task.abort();
    if !was_evicted {
        send_task.abort();
    }

    if let Err(e) = state.engine.close(connection_id.clone()).await {
        tracing::error!("Failed to close connection '{}': {}", connection_id, e);
    }

    if was_evicted {
        tracing::warn!("Connection '{}' evicted as a slow consumer", connection_id);
        // A slow reader still gets the queued frames and a Close; a stalled one is dropped
        if tokio::time::timeout(EVICTION_FLUSH_TIMEOUT, &mut send_task).await.is_err() {
            send_task.abort();
        }
    }
}
