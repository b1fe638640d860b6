//! API request and response models

use serde::{Deserialize, Serialize};

use crate::gateway::requests::{ImageGenerationRequest, UpscaleRequest, VideoGenerationRequest};

/// Image generation request body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageBody {
    /// The prompt to generate an image from
    #[serde(default)]
    pub prompt: String,

    /// Model identifier (optional, uses the gateway default if not specified)
    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub width: Option<u32>,

    #[serde(default)]
    pub height: Option<u32>,

    #[serde(default)]
    pub steps: Option<u32>,

    #[serde(default)]
    pub cfg_scale: Option<u32>,
}

impl From<GenerateImageBody> for ImageGenerationRequest {
    fn from(body: GenerateImageBody) -> Self {
        Self {
            prompt: body.prompt,
            model: body.model,
            width: body.width,
            height: body.height,
            steps: body.steps,
            cfg_scale: body.cfg_scale,
        }
    }
}

/// Video generation request body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVideoBody {
    #[serde(default)]
    pub prompt: String,

    #[serde(default)]
    pub model: Option<String>,

    /// Clip length in seconds
    #[serde(default)]
    pub duration: Option<u32>,

    #[serde(default)]
    pub width: Option<u32>,

    #[serde(default)]
    pub height: Option<u32>,

    #[serde(default)]
    pub output_format: Option<String>,

    #[serde(default)]
    pub output_quality: Option<u32>,
}

impl From<GenerateVideoBody> for VideoGenerationRequest {
    fn from(body: GenerateVideoBody) -> Self {
        Self {
            prompt: body.prompt,
            model: body.model,
            duration: body.duration,
            width: body.width,
            height: body.height,
            output_format: body.output_format,
            output_quality: body.output_quality,
        }
    }
}

/// Request body for the image processing endpoints; `image` is a base64
/// payload or a URL, passed through to the provider opaquely
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessImageBody {
    #[serde(default)]
    pub image: String,

    /// Only meaningful for upscaling
    #[serde(default)]
    pub scale_factor: Option<u32>,
}

impl From<ProcessImageBody> for UpscaleRequest {
    fn from(body: ProcessImageBody) -> Self {
        Self {
            image: body.image,
            scale_factor: body.scale_factor,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub runware_connected: bool,
    pub timestamp: f64,
}

/// Model catalog entry
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Model catalog response
#[derive(Debug, Clone, Serialize)]
pub struct ModelsResponse {
    pub success: bool,
    pub models: Vec<ModelInfo>,
}

/// Static model catalog exposed to front-end consumers
pub fn available_models() -> Vec<ModelInfo> {
    vec![
        ModelInfo {
            id: "runware:101@1".to_string(),
            name: "Runware Default".to_string(),
            description: "High-quality general purpose model".to_string(),
        },
        ModelInfo {
            id: "civitai:102438@133677".to_string(),
            name: "CivitAI Realistic".to_string(),
            description: "Photorealistic image generation".to_string(),
        },
        ModelInfo {
            id: "runware:100@1".to_string(),
            name: "Runware Artistic".to_string(),
            description: "Artistic and creative styles".to_string(),
        },
    ]
}
