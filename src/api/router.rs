use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::auth;
use super::health;
use super::state::AppState;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints (no auth required)
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        // Authentication endpoints (no auth required for login)
        .nest("/auth", auth::create_auth_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
