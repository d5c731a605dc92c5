//! WebSocket handler
//!
//! Upgrades `/ws` requests and attaches each socket to the notifier. A writer
//! task drains the observer queue into the socket; the read side only watches
//! for the peer going away.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use super::GatewayState;

/// Live events endpoint
pub async fn live_handler(
    State(state): State<GatewayState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(state, socket))
}

async fn handle_socket(state: GatewayState, socket: WebSocket) {
    let (tx, mut rx) = mpsc::channel::<Arc<str>>(state.queue_size());
    let observer_id = state.notifier().attach(tx);

    tracing::info!(observer_id = %observer_id, "Live connection established");

    let (mut ws_sink, mut ws_stream) = socket.split();

    let mut send_task = tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            if ws_sink.send(Message::Text(payload.to_string())).await.is_err() {
                break;
            }
        }

        // Queue closed: either detached by the notifier or shutting down
        let _ = ws_sink.close().await;
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_stream.next().await {
            match msg {
                Ok(Message::Close(_)) => break,
                Ok(_) => {
                    tracing::trace!(observer_id = %observer_id, "Ignoring inbound frame");
                }
                Err(e) => {
                    tracing::debug!(observer_id = %observer_id, error = %e, "WebSocket error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    state.notifier().detach(observer_id);

    tracing::info!(observer_id = %observer_id, "Live connection closed");
}
