//! Normalized operation inputs and their documented defaults.
//!
//! Omitted optional fields are filled in by the adapters, and the resolved
//! values are echoed back in the success payload.

pub const DEFAULT_IMAGE_MODEL: &str = "runware:101@1";
pub const DEFAULT_IMAGE_WIDTH: u32 = 1024;
pub const DEFAULT_IMAGE_HEIGHT: u32 = 1024;
pub const DEFAULT_IMAGE_STEPS: u32 = 20;
pub const DEFAULT_IMAGE_CFG_SCALE: u32 = 7;

pub const DEFAULT_VIDEO_MODEL: &str = "klingai:5@3";
pub const DEFAULT_VIDEO_DURATION: u32 = 10;
pub const DEFAULT_VIDEO_WIDTH: u32 = 1920;
pub const DEFAULT_VIDEO_HEIGHT: u32 = 1080;
pub const DEFAULT_VIDEO_OUTPUT_FORMAT: &str = "mp4";
pub const DEFAULT_VIDEO_OUTPUT_QUALITY: u32 = 95;

pub const DEFAULT_UPSCALE_FACTOR: u32 = 2;

/// Image generation input
#[derive(Debug, Clone, Default)]
pub struct ImageGenerationRequest {
    pub prompt: String,
    pub model: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub steps: Option<u32>,
    pub cfg_scale: Option<u32>,
}

impl ImageGenerationRequest {
    pub fn with_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }
}

/// Video generation input
#[derive(Debug, Clone, Default)]
pub struct VideoGenerationRequest {
    pub prompt: String,
    pub model: Option<String>,
    pub duration: Option<u32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub output_format: Option<String>,
    pub output_quality: Option<u32>,
}

impl VideoGenerationRequest {
    pub fn with_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }
}

/// Upscaling input
#[derive(Debug, Clone, Default)]
pub struct UpscaleRequest {
    pub image: String,
    pub scale_factor: Option<u32>,
}
