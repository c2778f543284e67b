use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

mod error;
pub mod movies;
pub mod system;
mod types;
pub mod upload;

pub use error::ApiError;
pub use types::*;

use crate::state::AppState;

#[must_use]
pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().server.cors_allowed_origins.clone();
    let max_upload_bytes = state.config().server.max_upload_bytes;

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .route("/upload_csv", post(upload::upload_csv))
        .route("/movies", get(movies::list_movies))
        .route("/health/live", get(system::health_live))
        .route("/health/ready", get(system::health_ready))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
