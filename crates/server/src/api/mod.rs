//! API layer - the WebSocket entry point.

pub mod connections;
pub mod websocket;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

pub use connections::{ConnectionInfo, ConnectionManager};
pub use websocket::WsState;

/// The protocol is served on the root path.
pub fn router(state: Arc<WsState>) -> Router {
    Router::new()
        .route("/", get(websocket::ws_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
