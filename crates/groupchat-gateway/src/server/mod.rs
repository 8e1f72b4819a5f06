//! Gateway server setup
//!
//! Routes, state wiring, and the server entry point.

mod extract;
mod handler;
mod http;
mod response;
mod state;

pub use extract::Identity;
pub use handler::ws_handler;
pub use http::{create_message, get_messages, health_check, CreateMessageRequest};
pub use response::{ApiError, ApiResult};
pub use state::GatewayState;

use crate::store::{MemoryMembership, MemoryMessageStore};
use axum::{
    routing::{get, post},
    Router,
};
use groupchat_common::{AppConfig, AppError};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Create the gateway router
pub fn create_router() -> Router<GatewayState> {
    Router::new()
        .route("/ws", get(ws_handler))
        .route(
            "/groups/:group_id/messages",
            post(create_message).get(get_messages),
        )
        .route("/health", get(health_check))
}

/// Build the complete application
pub fn create_app(state: GatewayState) -> Router {
    create_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Create `GatewayState` backed by the in-memory collaborators
///
/// Production deployments substitute real `MessageStore` and
/// `MembershipChecker` implementations via `GatewayState::new`.
pub fn create_gateway_state(config: AppConfig) -> GatewayState {
    GatewayState::new(
        Arc::new(MemoryMessageStore::new()),
        Arc::new(MemoryMembership::allow_all()),
        config,
    )
}

/// Run the gateway server on the given address
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    tracing::info!("Gateway listening on ws://{}/ws", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete gateway server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .gateway
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid gateway address: {e}")))?;

    let state = create_gateway_state(config);
    let app = create_app(state);

    run_server(app, addr).await
}
