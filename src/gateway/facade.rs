//! Entry point for the web layer.
//!
//! Pure pass-through: one method per capability, each delegating to the
//! matching adapter and returning its envelope unchanged.

use std::sync::Arc;

use crate::error::Result;
use crate::gateway::envelope::{
    CaptionPayload, ConnectionTestPayload, Envelope, ImagePayload, ProcessedPayload, TextPayload,
    VideoPayload,
};
use crate::gateway::operations::Operations;
use crate::gateway::requests::{ImageGenerationRequest, UpscaleRequest, VideoGenerationRequest};
use crate::provider::capability::CapabilitySet;
use crate::provider::connection::ProviderConnection;

pub struct MediaGateway {
    operations: Operations,
}

impl MediaGateway {
    pub fn new(connection: Arc<ProviderConnection>, capabilities: CapabilitySet) -> Self {
        Self {
            operations: Operations::new(connection, capabilities),
        }
    }

    pub fn connection(&self) -> &Arc<ProviderConnection> {
        self.operations.connection()
    }

    pub fn capabilities(&self) -> &CapabilitySet {
        self.operations.capabilities()
    }

    pub async fn generate_image(
        &self,
        request: ImageGenerationRequest,
    ) -> Result<Envelope<ImagePayload>> {
        self.operations.generate_image(request).await
    }

    pub async fn generate_video(
        &self,
        request: VideoGenerationRequest,
    ) -> Result<Envelope<VideoPayload>> {
        self.operations.generate_video(request).await
    }

    pub async fn remove_background(&self, image: String) -> Result<Envelope<ProcessedPayload>> {
        self.operations.remove_background(image).await
    }

    pub async fn upscale_image(&self, request: UpscaleRequest) -> Result<Envelope<ProcessedPayload>> {
        self.operations.upscale_image(request).await
    }

    pub async fn caption_image(&self, image: String) -> Result<Envelope<CaptionPayload>> {
        self.operations.caption_image(image).await
    }

    pub async fn image_to_text(&self, image: String) -> Result<Envelope<TextPayload>> {
        self.operations.image_to_text(image).await
    }

    pub async fn test_connection(&self) -> Envelope<ConnectionTestPayload> {
        self.operations.test_connection().await
    }
}
