//! Runware Media Gateway
//!
//! A Rust-based HTTP gateway that forwards generative-media requests (image
//! and video generation, background removal, upscaling, captioning) to the
//! Runware API and reshapes responses into a stable JSON contract.

pub mod api;
pub mod config;
pub mod error;
pub mod gateway;
pub mod provider;

pub use error::{AppError, Result};

use std::sync::Arc;

use gateway::MediaGateway;

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "runware-gateway";

/// Application state shared across all handlers
pub struct AppState {
    pub settings: config::Settings,
    pub gateway: MediaGateway,
}

impl AppState {
    pub fn new(settings: config::Settings, gateway: MediaGateway) -> Arc<Self> {
        Arc::new(Self { settings, gateway })
    }
}
