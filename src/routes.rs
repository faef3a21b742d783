use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{catalog, health, session};
use crate::state::AppState;

/// Build the relay router with CORS and request tracing applied.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors_allowed_origins);
    Router::new()
        .route("/", get(health::health_check))
        .route("/session", post(session::create_session))
        .route("/filter", post(catalog::filter))
        .route("/products.json", get(catalog::list_products))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// `*` opens the relay to any origin; otherwise only the listed origins.
#[must_use]
pub fn cors_layer(origins: &str) -> CorsLayer {
    if origins.trim() == "*" {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}
