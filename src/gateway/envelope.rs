//! Uniform success/failure envelope and the per-capability result payloads

use chrono::Utc;
use serde::Serialize;

/// Round a duration in seconds to two decimals for the JSON contract
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Current Unix time in fractional seconds
pub fn unix_now() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}

/// Timing metadata attached to every operation result
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub timestamp: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Metadata {
    /// Metadata carrying the elapsed wall-clock time of the provider call
    pub fn processing(elapsed_secs: f64) -> Self {
        Self {
            timestamp: unix_now(),
            processing_time: Some(round2(elapsed_secs)),
            note: None,
        }
    }

    /// Metadata carrying an explanatory note instead of a duration
    pub fn note(note: impl Into<String>) -> Self {
        Self {
            timestamp: unix_now(),
            processing_time: None,
            note: Some(note.into()),
        }
    }
}

/// The `{success, ...}` wrapper returned by every operation.
///
/// Success carries a capability-specific payload flattened into the object;
/// failure carries only an error message. There is no partial-success shape.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    // A flattened `None` serializes to nothing, so failures carry no payload keys.
    #[serde(flatten)]
    pub payload: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(payload: T) -> Self {
        Self {
            success: true,
            payload: Some(payload),
            metadata: None,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            payload: None,
            metadata: None,
            error: Some(error.into()),
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Echoed image generation parameters
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageParameters {
    pub width: u32,
    pub height: u32,
    pub steps: u32,
    pub cfg_scale: u32,
}

/// Successful image generation record
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    pub url: String,
    pub uuid: String,
    pub prompt: String,
    pub model: String,
    pub parameters: ImageParameters,
    pub generation_time: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImagePayload {
    pub image: GeneratedImage,
}

/// Echoed video generation parameters
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoParameters {
    pub duration: u32,
    pub width: u32,
    pub height: u32,
    pub output_format: String,
    pub output_quality: u32,
}

/// Video generation record.
///
/// `status` is `"completed"` for a real result and `"demo"` for the
/// degraded-success path, which fills `message`/`processing_time` instead of
/// the url/uuid fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedVideo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    pub prompt: String,
    pub model: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub parameters: VideoParameters,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VideoPayload {
    pub video: GeneratedVideo,
}

/// Processed image record (background removal, upscaling)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedImage {
    pub url: String,
    pub uuid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_factor: Option<u32>,
    pub processing_time: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessedPayload {
    pub image: ProcessedImage,
}

/// Caption result, flattened to the top level of the envelope
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionPayload {
    pub caption: String,
    pub processing_time: f64,
}

/// Text extraction result, flattened to the top level of the envelope
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextPayload {
    pub text: String,
    pub processing_time: f64,
}

/// Connection probe result
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionTestPayload {
    pub connection: String,
    pub response_time: f64,
    pub test_image: Option<String>,
}
