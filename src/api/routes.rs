use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::api::{handlers, state::AppState, websocket::websocket_handler};

pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/api/health", get(handlers::health_handler))
        // Match endpoints
        .route("/api/live-matches", get(handlers::get_live_matches))
        .route("/api/match/:id/stats", get(handlers::get_match_stats))
        .route("/api/match/:id/analysis", get(handlers::get_match_analysis))
        .route("/api/analysis", get(handlers::get_analysis))
        // WebSocket endpoint
        .route("/ws/live-feed", get(websocket_handler))
        // Add state and CORS
        .with_state(state)
        .layer(cors)
}
