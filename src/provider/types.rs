//! Wire types for the Runware task protocol.
//!
//! Every call posts a JSON array of task objects and receives
//! `{"data": [...], "errors": [...]}` back. Field names follow the provider's
//! casing exactly; mapping from the gateway's normalized records is renaming
//! only.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Provider error code for a video task rejected due to insufficient credits
pub const VIDEO_INSUFFICIENT_CREDITS: &str = "videoInferenceInsufficientCredits";

/// Authentication handshake task, sent once when establishing the handle
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationTask {
    pub task_type: &'static str,
    pub api_key: String,
}

impl AuthenticationTask {
    pub fn new(api_key: String) -> Self {
        Self {
            task_type: "authentication",
            api_key,
        }
    }
}

/// Image generation task
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInferenceTask {
    pub task_type: &'static str,
    #[serde(rename = "taskUUID")]
    pub task_uuid: Uuid,
    pub positive_prompt: String,
    pub model: String,
    pub width: u32,
    pub height: u32,
    pub steps: u32,
    #[serde(rename = "CFGScale")]
    pub cfg_scale: u32,
    pub number_results: u32,
}

impl ImageInferenceTask {
    pub fn new(prompt: String, model: String, width: u32, height: u32, steps: u32, cfg_scale: u32) -> Self {
        Self {
            task_type: "imageInference",
            task_uuid: Uuid::new_v4(),
            positive_prompt: prompt,
            model,
            width,
            height,
            steps,
            cfg_scale,
            number_results: 1,
        }
    }
}

/// Video generation task
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInferenceTask {
    pub task_type: &'static str,
    #[serde(rename = "taskUUID")]
    pub task_uuid: Uuid,
    pub positive_prompt: String,
    pub model: String,
    pub duration: u32,
    pub width: u32,
    pub height: u32,
    pub number_results: u32,
    pub include_cost: bool,
    pub seed: i64,
}

impl VideoInferenceTask {
    pub fn new(prompt: String, model: String, duration: u32, width: u32, height: u32) -> Self {
        Self {
            task_type: "videoInference",
            task_uuid: Uuid::new_v4(),
            positive_prompt: prompt,
            model,
            duration,
            width,
            height,
            number_results: 1,
            include_cost: true,
            seed: 42,
        }
    }
}

/// Background removal task
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundRemovalTask {
    pub task_type: &'static str,
    #[serde(rename = "taskUUID")]
    pub task_uuid: Uuid,
    pub input_image: String,
}

impl BackgroundRemovalTask {
    pub fn new(input_image: String) -> Self {
        Self {
            task_type: "imageBackgroundRemoval",
            task_uuid: Uuid::new_v4(),
            input_image,
        }
    }
}

/// Upscaling task
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpscaleTask {
    pub task_type: &'static str,
    #[serde(rename = "taskUUID")]
    pub task_uuid: Uuid,
    pub input_image: String,
    pub upscale_factor: u32,
}

impl UpscaleTask {
    pub fn new(input_image: String, upscale_factor: u32) -> Self {
        Self {
            task_type: "imageUpscale",
            task_uuid: Uuid::new_v4(),
            input_image,
            upscale_factor,
        }
    }
}

/// Captioning task, shared by caption and text extraction
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTask {
    pub task_type: &'static str,
    #[serde(rename = "taskUUID")]
    pub task_uuid: Uuid,
    pub input_image: String,
}

impl CaptionTask {
    pub fn new(input_image: String) -> Self {
        Self {
            task_type: "imageCaption",
            task_uuid: Uuid::new_v4(),
            input_image,
        }
    }
}

/// Generated image returned by the provider
#[derive(Debug, Clone, Deserialize)]
pub struct ImageInferenceResult {
    #[serde(rename = "imageUUID")]
    pub image_uuid: String,
    #[serde(rename = "imageURL")]
    pub image_url: String,
}

/// Generated video returned by the provider
#[derive(Debug, Clone, Deserialize)]
pub struct VideoInferenceResult {
    #[serde(rename = "videoUUID")]
    pub video_uuid: String,
    #[serde(rename = "videoURL")]
    pub video_url: String,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub seed: Option<i64>,
}

/// Processed image (background removal, upscaling)
#[derive(Debug, Clone, Deserialize)]
pub struct ImageProcessResult {
    #[serde(rename = "imageUUID")]
    pub image_uuid: String,
    #[serde(rename = "imageURL")]
    pub image_url: String,
}

/// Caption / text-extraction result
#[derive(Debug, Clone, Deserialize)]
pub struct CaptionResult {
    pub text: String,
}

/// Authentication acknowledgement
#[derive(Debug, Clone, Deserialize)]
pub struct AuthenticationResult {
    #[serde(rename = "connectionSessionUUID", default)]
    pub connection_session_uuid: Option<String>,
}

/// Error entry in the provider's `errors` array
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ProviderErrorBody {
    pub fn message(&self) -> String {
        self.message
            .clone()
            .or_else(|| self.error.clone())
            .or_else(|| self.code.clone())
            .unwrap_or_else(|| "Unknown provider error".to_string())
    }
}

/// Top-level response wrapper for a task submission
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderResponse<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub errors: Vec<ProviderErrorBody>,
}
