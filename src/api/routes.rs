//! HTTP route definitions

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::handlers;
use crate::AppState;

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/models", get(handlers::list_models))
        .route("/test-connection", get(handlers::test_connection))
        .route("/generate/image", post(handlers::generate_image))
        .route("/generate/video", post(handlers::generate_video))
        .route("/remove-background", post(handlers::remove_background))
        .route("/upscale-image", post(handlers::upscale_image))
        .route("/caption-image", post(handlers::caption_image))
        .route("/image-to-text", post(handlers::image_to_text))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
