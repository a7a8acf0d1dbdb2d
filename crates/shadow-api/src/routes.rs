//! API routes.

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{analyze_video, health, list_sports, login, me, root, signup};
use crate::middleware::{cors_layer, request_logging, security_headers};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/me", get(me))
        .route("/sports", get(list_sports))
        .route("/analyze-video/:sport", post(analyze_video));

    Router::new()
        .nest("/api", api_routes)
        .route("/", get(root))
        .route("/health", get(health))
        // Uploads are whole videos; raise axum's default body cap.
        .layer(DefaultBodyLimit::max(state.config.max_body_size))
        .layer(middleware::from_fn(request_logging))
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
