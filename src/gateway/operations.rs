//! Per-operation adapters.
//!
//! Every operation follows the same skeleton: validate mandatory fields,
//! apply defaults, obtain the shared provider handle, submit the task while
//! timing the call, then map the first result (or the error) into the
//! envelope. Business failures never propagate; they become
//! `{success: false}` results.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

use crate::error::{AppError, Result};
use crate::gateway::envelope::{
    CaptionPayload, ConnectionTestPayload, Envelope, GeneratedImage, GeneratedVideo, ImageParameters,
    ImagePayload, Metadata, ProcessedImage, ProcessedPayload, TextPayload, VideoParameters,
    VideoPayload, round2,
};
use crate::gateway::requests::{
    ImageGenerationRequest, UpscaleRequest, VideoGenerationRequest, DEFAULT_IMAGE_CFG_SCALE,
    DEFAULT_IMAGE_HEIGHT, DEFAULT_IMAGE_MODEL, DEFAULT_IMAGE_STEPS, DEFAULT_IMAGE_WIDTH,
    DEFAULT_UPSCALE_FACTOR, DEFAULT_VIDEO_DURATION, DEFAULT_VIDEO_HEIGHT, DEFAULT_VIDEO_MODEL,
    DEFAULT_VIDEO_OUTPUT_FORMAT, DEFAULT_VIDEO_OUTPUT_QUALITY, DEFAULT_VIDEO_WIDTH,
};
use crate::provider::capability::{Capability, CapabilitySet};
use crate::provider::client::ProviderClient;
use crate::provider::connection::ProviderConnection;
use crate::provider::types::{
    BackgroundRemovalTask, CaptionTask, ImageInferenceTask, UpscaleTask, VideoInferenceTask,
    VIDEO_INSUFFICIENT_CREDITS,
};

pub(crate) struct Operations {
    connection: Arc<ProviderConnection>,
    capabilities: CapabilitySet,
}

impl Operations {
    pub fn new(connection: Arc<ProviderConnection>, capabilities: CapabilitySet) -> Self {
        Self {
            connection,
            capabilities,
        }
    }

    pub fn connection(&self) -> &Arc<ProviderConnection> {
        &self.connection
    }

    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    /// Run one provider call through the shared handle, timing the whole
    /// suspension (including a lazy connect on first use).
    async fn timed_call<T, F, Fut>(&self, op: F) -> (Result<T>, f64)
    where
        F: FnOnce(Arc<dyn ProviderClient>) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let start = Instant::now();
        let result = match self.connection.ensure_connected().await {
            Ok(client) => op(client).await,
            Err(e) => Err(e),
        };
        (result, start.elapsed().as_secs_f64())
    }

    pub async fn generate_image(
        &self,
        request: ImageGenerationRequest,
    ) -> Result<Envelope<ImagePayload>> {
        if request.prompt.trim().is_empty() {
            return Err(AppError::Validation("Prompt is required".to_string()));
        }

        let prompt = request.prompt;
        let model = request
            .model
            .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string());
        let width = request.width.unwrap_or(DEFAULT_IMAGE_WIDTH);
        let height = request.height.unwrap_or(DEFAULT_IMAGE_HEIGHT);
        let steps = request.steps.unwrap_or(DEFAULT_IMAGE_STEPS);
        let cfg_scale = request.cfg_scale.unwrap_or(DEFAULT_IMAGE_CFG_SCALE);

        info!(prompt = %prompt, model = %model, "Starting image generation");

        let task = ImageInferenceTask::new(
            prompt.clone(),
            model.clone(),
            width,
            height,
            steps,
            cfg_scale,
        );
        let (result, elapsed) = self
            .timed_call(|client| async move { client.image_inference(task).await })
            .await;

        Ok(match result {
            Ok(mut images) if !images.is_empty() => {
                let image = images.swap_remove(0);
                info!(elapsed = round2(elapsed), "Image generated successfully");

                Envelope::success(ImagePayload {
                    image: GeneratedImage {
                        url: image.image_url,
                        uuid: image.image_uuid,
                        prompt,
                        model,
                        parameters: ImageParameters {
                            width,
                            height,
                            steps,
                            cfg_scale,
                        },
                        generation_time: round2(elapsed),
                    },
                })
                .with_metadata(Metadata::processing(elapsed))
            }
            Ok(_) => Envelope::failure("No images generated"),
            Err(e) => {
                error!(operation = "generate_image", elapsed = round2(elapsed), error = %e, "Image generation error");
                Envelope::failure(e.to_string())
            }
        })
    }

    pub async fn generate_video(
        &self,
        request: VideoGenerationRequest,
    ) -> Result<Envelope<VideoPayload>> {
        if request.prompt.trim().is_empty() {
            return Err(AppError::Validation("Prompt is required".to_string()));
        }

        let prompt = request.prompt;
        let model = request
            .model
            .unwrap_or_else(|| DEFAULT_VIDEO_MODEL.to_string());
        let duration = request.duration.unwrap_or(DEFAULT_VIDEO_DURATION);
        let width = request.width.unwrap_or(DEFAULT_VIDEO_WIDTH);
        let height = request.height.unwrap_or(DEFAULT_VIDEO_HEIGHT);
        let output_format = request
            .output_format
            .unwrap_or_else(|| DEFAULT_VIDEO_OUTPUT_FORMAT.to_string());
        let output_quality = request
            .output_quality
            .unwrap_or(DEFAULT_VIDEO_OUTPUT_QUALITY);

        let parameters = VideoParameters {
            duration,
            width,
            height,
            output_format,
            output_quality,
        };

        if !self.capabilities.supports(Capability::VideoInference) {
            info!("Video inference unavailable, returning demo response");
            return Ok(demo_video(
                prompt,
                model,
                parameters,
                "Video inference is not available in the linked provider API version. \
                 The video pipeline is ready and will activate once the capability is available."
                    .to_string(),
                0.0,
                "Video capability unavailable - video generation architecture complete",
            ));
        }

        info!(prompt = %prompt, model = %model, "Starting video generation");

        let task = VideoInferenceTask::new(prompt.clone(), model.clone(), duration, width, height);
        let (result, elapsed) = self
            .timed_call(|client| async move { client.video_inference(task).await })
            .await;

        Ok(match result {
            Ok(mut videos) if !videos.is_empty() => {
                let video = videos.swap_remove(0);
                info!(elapsed = round2(elapsed), "Video generated successfully");

                Envelope::success(VideoPayload {
                    video: GeneratedVideo {
                        url: Some(video.video_url),
                        uuid: Some(video.video_uuid),
                        prompt,
                        model,
                        status: "completed".to_string(),
                        message: None,
                        parameters,
                        generation_time: Some(round2(elapsed)),
                        processing_time: None,
                        cost: video.cost,
                        seed: video.seed,
                    },
                })
                .with_metadata(Metadata::processing(elapsed))
            }
            Ok(_) => Envelope::failure("No videos generated"),
            Err(e) if e.provider_code() == Some(VIDEO_INSUFFICIENT_CREDITS) => {
                info!(elapsed = round2(elapsed), "Insufficient credits, returning demo response");

                demo_video(
                    prompt,
                    model,
                    parameters,
                    format!(
                        "Video generation attempted with the provider API. Error: {}. \
                         This demonstrates the video pipeline is ready for when video \
                         generation is fully available.",
                        e
                    ),
                    elapsed,
                    "Provider call attempted but requires credits - video generation architecture complete",
                )
            }
            Err(e) => {
                error!(operation = "generate_video", elapsed = round2(elapsed), error = %e, "Video generation error");
                Envelope::failure(e.to_string())
            }
        })
    }

    pub async fn remove_background(&self, image: String) -> Result<Envelope<ProcessedPayload>> {
        if image.trim().is_empty() {
            return Err(AppError::Validation("Image data is required".to_string()));
        }

        info!("Starting background removal");

        let task = BackgroundRemovalTask::new(image);
        let (result, elapsed) = self
            .timed_call(|client| async move { client.remove_background(task).await })
            .await;

        Ok(match result {
            Ok(mut results) if !results.is_empty() => {
                let processed = results.swap_remove(0);
                info!(elapsed = round2(elapsed), "Background removed successfully");

                Envelope::success(ProcessedPayload {
                    image: ProcessedImage {
                        url: processed.image_url,
                        uuid: processed.image_uuid,
                        scale_factor: None,
                        processing_time: round2(elapsed),
                    },
                })
                .with_metadata(Metadata::processing(elapsed))
            }
            Ok(_) => Envelope::failure("Background removal failed"),
            Err(e) => {
                error!(operation = "remove_background", elapsed = round2(elapsed), error = %e, "Background removal error");
                Envelope::failure(e.to_string())
            }
        })
    }

    pub async fn upscale_image(&self, request: UpscaleRequest) -> Result<Envelope<ProcessedPayload>> {
        if request.image.trim().is_empty() {
            return Err(AppError::Validation("Image data is required".to_string()));
        }

        let scale_factor = request.scale_factor.unwrap_or(DEFAULT_UPSCALE_FACTOR);

        info!(scale_factor, "Starting image upscaling");

        let task = UpscaleTask::new(request.image, scale_factor);
        let (result, elapsed) = self
            .timed_call(|client| async move { client.upscale(task).await })
            .await;

        Ok(match result {
            Ok(mut results) if !results.is_empty() => {
                let processed = results.swap_remove(0);
                info!(elapsed = round2(elapsed), "Image upscaled successfully");

                Envelope::success(ProcessedPayload {
                    image: ProcessedImage {
                        url: processed.image_url,
                        uuid: processed.image_uuid,
                        scale_factor: Some(scale_factor),
                        processing_time: round2(elapsed),
                    },
                })
                .with_metadata(Metadata::processing(elapsed))
            }
            Ok(_) => Envelope::failure("Image upscaling failed"),
            Err(e) => {
                error!(operation = "upscale_image", elapsed = round2(elapsed), error = %e, "Image upscaling error");
                Envelope::failure(e.to_string())
            }
        })
    }

    pub async fn caption_image(&self, image: String) -> Result<Envelope<CaptionPayload>> {
        if image.trim().is_empty() {
            return Err(AppError::Validation("Image data is required".to_string()));
        }

        if !self.capabilities.supports(Capability::ImageCaption) {
            return Err(AppError::CapabilityUnavailable(
                "Image captioning is not available in the linked provider API version".to_string(),
            ));
        }

        info!("Starting image captioning");

        let task = CaptionTask::new(image);
        let (result, elapsed) = self
            .timed_call(|client| async move { client.caption(task).await })
            .await;

        Ok(match result {
            Ok(mut results) if !results.is_empty() => {
                let caption = results.swap_remove(0);
                info!(elapsed = round2(elapsed), "Caption generated successfully");

                Envelope::success(CaptionPayload {
                    caption: caption.text,
                    processing_time: round2(elapsed),
                })
                .with_metadata(Metadata::processing(elapsed))
            }
            Ok(_) => Envelope::failure("Caption generation failed"),
            Err(e) => {
                error!(operation = "caption_image", elapsed = round2(elapsed), error = %e, "Caption generation error");
                Envelope::failure(e.to_string())
            }
        })
    }

    pub async fn image_to_text(&self, image: String) -> Result<Envelope<TextPayload>> {
        if image.trim().is_empty() {
            return Err(AppError::Validation("Image data is required".to_string()));
        }

        if !self.capabilities.supports(Capability::ImageToText) {
            return Err(AppError::CapabilityUnavailable(
                "Image to text is not available in the linked provider API version".to_string(),
            ));
        }

        info!("Starting text extraction");

        let task = CaptionTask::new(image);
        let (result, elapsed) = self
            .timed_call(|client| async move { client.caption(task).await })
            .await;

        Ok(match result {
            Ok(mut results) if !results.is_empty() => {
                let extracted = results.swap_remove(0);
                info!(elapsed = round2(elapsed), "Text extracted successfully");

                Envelope::success(TextPayload {
                    text: extracted.text,
                    processing_time: round2(elapsed),
                })
                .with_metadata(Metadata::processing(elapsed))
            }
            Ok(_) => Envelope::failure("Text extraction failed"),
            Err(e) => {
                error!(operation = "image_to_text", elapsed = round2(elapsed), error = %e, "Text extraction error");
                Envelope::failure(e.to_string())
            }
        })
    }

    /// Probe the provider with a small generation.
    ///
    /// An empty result list still counts as an active connection; the probe
    /// only fails when the call itself does.
    pub async fn test_connection(&self) -> Envelope<ConnectionTestPayload> {
        let task = ImageInferenceTask::new(
            "test connection".to_string(),
            DEFAULT_IMAGE_MODEL.to_string(),
            512,
            512,
            DEFAULT_IMAGE_STEPS,
            DEFAULT_IMAGE_CFG_SCALE,
        );

        let (result, elapsed) = self
            .timed_call(|client| async move { client.image_inference(task).await })
            .await;

        match result {
            Ok(images) => Envelope::success(ConnectionTestPayload {
                connection: "active".to_string(),
                response_time: round2(elapsed),
                test_image: images.first().map(|i| i.image_url.clone()),
            }),
            Err(e) => {
                error!(operation = "test_connection", elapsed = round2(elapsed), error = %e, "Connection test error");
                Envelope::failure(e.to_string())
            }
        }
    }
}

fn demo_video(
    prompt: String,
    model: String,
    parameters: VideoParameters,
    message: String,
    elapsed: f64,
    note: &str,
) -> Envelope<VideoPayload> {
    Envelope::success(VideoPayload {
        video: GeneratedVideo {
            url: None,
            uuid: None,
            prompt,
            model,
            status: "demo".to_string(),
            message: Some(message),
            parameters,
            generation_time: None,
            processing_time: Some(round2(elapsed)),
            cost: None,
            seed: None,
        },
    })
    .with_metadata(Metadata::note(note))
}
