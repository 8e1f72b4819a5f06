//! WebSocket handler
//!
//! One task pair per connection: a receive loop parsing inbound control
//! frames, and a send task draining the connection's outbound queue into
//! the socket. Closing the socket, from either side, disconnects the
//! connection from every group.

use crate::connection::Connection;
use crate::protocol::ClientFrame;
use crate::server::GatewayState;
use axum::{
    extract::{ws::Message, ws::WebSocket, State, WebSocketUpgrade},
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use groupchat_core::ConnectionId;
use tokio::sync::mpsc;

/// WebSocket upgrade endpoint
pub async fn ws_handler(
    State(state): State<GatewayState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(state, socket))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: GatewayState, socket: WebSocket) {
    let (tx, mut rx) = mpsc::channel(state.config().limits.outbound_buffer);
    let connection = Connection::new(tx);
    let connection_id = connection.id().clone();

    state.registry().register(connection);
    tracing::info!(connection_id = %connection_id, "WebSocket connection established");

    let (mut ws_sink, mut ws_stream) = socket.split();

    // Receive loop: inbound control frames
    let state_recv = state.clone();
    let connection_id_recv = connection_id.clone();
    let recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_stream.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    handle_control_frame(&state_recv, &connection_id_recv, &text);
                }
                Ok(Message::Close(_)) => {
                    tracing::debug!(
                        connection_id = %connection_id_recv,
                        "Client closed connection"
                    );
                    break;
                }
                // Binary frames are not part of the protocol; ping/pong is
                // handled by axum. All are ignored.
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(
                        connection_id = %connection_id_recv,
                        error = %e,
                        "WebSocket error"
                    );
                    break;
                }
            }
        }
    });

    // Send task: drain the outbound queue into the socket
    let connection_id_send = connection_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            let json = match frame.to_json() {
                Ok(json) => json,
                Err(e) => {
                    tracing::warn!(
                        connection_id = %connection_id_send,
                        error = %e,
                        "Failed to serialize outbound frame"
                    );
                    continue;
                }
            };
            if ws_sink.send(Message::Text(json)).await.is_err() {
                tracing::debug!(
                    connection_id = %connection_id_send,
                    "Failed to write to WebSocket"
                );
                break;
            }
        }
        let _ = ws_sink.close().await;
    });

    // Either task ending means the transport is done
    tokio::select! {
        _ = recv_task => {}
        _ = send_task => {}
    }

    state.registry().disconnect(&connection_id);
    tracing::info!(connection_id = %connection_id, "WebSocket connection closed");
}

/// Handle one inbound control frame
///
/// A malformed frame (bad JSON, unknown type, missing or mistyped
/// groupId) is dropped and the connection stays open.
fn handle_control_frame(state: &GatewayState, connection_id: &ConnectionId, text: &str) {
    match ClientFrame::from_json(text) {
        Ok(ClientFrame::Subscribe { group_id }) => {
            state.registry().subscribe(connection_id, group_id);
        }
        Ok(ClientFrame::Unsubscribe { group_id }) => {
            state.registry().unsubscribe(connection_id, &group_id);
        }
        Err(e) => {
            tracing::debug!(
                connection_id = %connection_id,
                error = %e,
                "Ignoring malformed control frame"
            );
        }
    }
}
