//! HTTP request handlers

use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::info;

use crate::api::models::{
    available_models, GenerateImageBody, GenerateVideoBody, HealthResponse, ModelsResponse,
    ProcessImageBody,
};
use crate::error::AppError;
use crate::gateway::envelope::{
    CaptionPayload, ConnectionTestPayload, Envelope, ImagePayload, ProcessedPayload, TextPayload,
    unix_now, VideoPayload,
};
use crate::{AppState, SERVICE_NAME};

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        runware_connected: state.gateway.connection().is_connected(),
        timestamp: unix_now(),
    })
}

/// Static model catalog
pub async fn list_models() -> Json<ModelsResponse> {
    Json(ModelsResponse {
        success: true,
        models: available_models(),
    })
}

/// Probe the provider connection with a small generation
pub async fn test_connection(
    State(state): State<Arc<AppState>>,
) -> Json<Envelope<ConnectionTestPayload>> {
    info!("Received connection test request");

    Json(state.gateway.test_connection().await)
}

/// Generate an image from a prompt
pub async fn generate_image(
    State(state): State<Arc<AppState>>,
    Json(body): Json<GenerateImageBody>,
) -> Result<Json<Envelope<ImagePayload>>, AppError> {
    info!(prompt = %body.prompt, "Received image generation request");

    let envelope = state.gateway.generate_image(body.into()).await?;
    Ok(Json(envelope))
}

/// Generate a video from a prompt
pub async fn generate_video(
    State(state): State<Arc<AppState>>,
    Json(body): Json<GenerateVideoBody>,
) -> Result<Json<Envelope<VideoPayload>>, AppError> {
    info!(prompt = %body.prompt, "Received video generation request");

    let envelope = state.gateway.generate_video(body.into()).await?;
    Ok(Json(envelope))
}

/// Remove the background from an image
pub async fn remove_background(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ProcessImageBody>,
) -> Result<Json<Envelope<ProcessedPayload>>, AppError> {
    info!("Received background removal request");

    let envelope = state.gateway.remove_background(body.image).await?;
    Ok(Json(envelope))
}

/// Upscale an image
pub async fn upscale_image(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ProcessImageBody>,
) -> Result<Json<Envelope<ProcessedPayload>>, AppError> {
    info!("Received upscaling request");

    let envelope = state.gateway.upscale_image(body.into()).await?;
    Ok(Json(envelope))
}

/// Generate a caption for an image
pub async fn caption_image(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ProcessImageBody>,
) -> Result<Json<Envelope<CaptionPayload>>, AppError> {
    info!("Received caption request");

    let envelope = state.gateway.caption_image(body.image).await?;
    Ok(Json(envelope))
}

/// Extract text from an image
pub async fn image_to_text(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ProcessImageBody>,
) -> Result<Json<Envelope<TextPayload>>, AppError> {
    info!("Received image to text request");

    let envelope = state.gateway.image_to_text(body.image).await?;
    Ok(Json(envelope))
}
