//! Provider client trait and the Runware HTTP implementation

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

use crate::config::ProviderConfig;
use crate::error::{AppError, Result};
use crate::provider::capability::CapabilitySet;
use crate::provider::types::{
    AuthenticationResult, AuthenticationTask, BackgroundRemovalTask, CaptionResult, CaptionTask,
    ImageInferenceResult, ImageInferenceTask, ImageProcessResult, ProviderResponse, UpscaleTask,
    VideoInferenceResult, VideoInferenceTask,
};

/// Remote generative-media provider operations.
///
/// One method per task type; each submits a single task and returns the
/// provider's result list unchanged.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    async fn image_inference(&self, task: ImageInferenceTask) -> Result<Vec<ImageInferenceResult>>;

    async fn video_inference(&self, task: VideoInferenceTask) -> Result<Vec<VideoInferenceResult>>;

    async fn remove_background(&self, task: BackgroundRemovalTask) -> Result<Vec<ImageProcessResult>>;

    async fn upscale(&self, task: UpscaleTask) -> Result<Vec<ImageProcessResult>>;

    async fn caption(&self, task: CaptionTask) -> Result<Vec<CaptionResult>>;
}

/// Factory for provider client handles, injectable for test doubles
#[async_trait]
pub trait Connector: Send + Sync {
    /// Establish a fresh provider handle.
    ///
    /// Fails with `Configuration` when the credential is missing and with
    /// `Connection`-class errors on transport or auth failures.
    async fn connect(&self) -> Result<Arc<dyn ProviderClient>>;

    /// Capabilities declared by the linked provider API
    fn capabilities(&self) -> CapabilitySet;
}

/// Runware HTTP client speaking the task-array protocol
pub struct RunwareClient {
    http: Client,
    api_url: String,
    api_key: String,
    timeout_secs: u64,
}

impl RunwareClient {
    pub fn new(config: &ProviderConfig, api_key: String) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            api_key,
            timeout_secs: config.request_timeout_secs,
        })
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", self.api_key)) {
            headers.insert(AUTHORIZATION, value);
        }

        headers
    }

    /// Verify the credential by posting an authentication task
    pub async fn authenticate(&self) -> Result<()> {
        let task = AuthenticationTask::new(self.api_key.clone());
        let _: Vec<AuthenticationResult> = self.submit(&task).await?;
        Ok(())
    }

    /// Submit one task and return the provider's result list
    async fn submit<T, R>(&self, task: &T) -> Result<Vec<R>>
    where
        T: Serialize + Sync,
        R: DeserializeOwned,
    {
        let response = self
            .http
            .post(&self.api_url)
            .headers(self.headers())
            .json(&[task])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Timeout(self.timeout_secs)
                } else {
                    AppError::HttpClient(e)
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(AppError::HttpClient)?;

        let parsed: ProviderResponse<R> = serde_json::from_str(&body).map_err(|e| {
            if status.is_success() {
                error!(error = %e, "Failed to parse provider response");
                AppError::Provider {
                    code: None,
                    message: format!("Failed to parse provider response: {}", e),
                }
            } else {
                AppError::Provider {
                    code: None,
                    message: format!("Provider returned {}: {}", status, body),
                }
            }
        })?;

        if let Some(first) = parsed.errors.first() {
            debug!(code = ?first.code, "Provider reported task error");
            return Err(AppError::Provider {
                code: first.code.clone(),
                message: first.message(),
            });
        }

        if !status.is_success() {
            return Err(AppError::Provider {
                code: None,
                message: format!("Provider returned {}", status),
            });
        }

        Ok(parsed.data)
    }
}

#[async_trait]
impl ProviderClient for RunwareClient {
    async fn image_inference(&self, task: ImageInferenceTask) -> Result<Vec<ImageInferenceResult>> {
        self.submit(&task).await
    }

    async fn video_inference(&self, task: VideoInferenceTask) -> Result<Vec<VideoInferenceResult>> {
        self.submit(&task).await
    }

    async fn remove_background(&self, task: BackgroundRemovalTask) -> Result<Vec<ImageProcessResult>> {
        self.submit(&task).await
    }

    async fn upscale(&self, task: UpscaleTask) -> Result<Vec<ImageProcessResult>> {
        self.submit(&task).await
    }

    async fn caption(&self, task: CaptionTask) -> Result<Vec<CaptionResult>> {
        self.submit(&task).await
    }
}

/// Connector producing authenticated Runware handles
pub struct RunwareConnector {
    config: ProviderConfig,
}

impl RunwareConnector {
    pub fn new(config: ProviderConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Connector for RunwareConnector {
    async fn connect(&self) -> Result<Arc<dyn ProviderClient>> {
        let api_key = self.config.resolve_api_key()?;
        let client = RunwareClient::new(&self.config, api_key)?;
        client.authenticate().await?;
        Ok(Arc::new(client))
    }

    fn capabilities(&self) -> CapabilitySet {
        // The REST task protocol carries every task type this gateway issues.
        CapabilitySet::full()
    }
}
