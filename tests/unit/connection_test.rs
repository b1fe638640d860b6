//! Unit tests for the shared provider connection

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use runware_gateway::error::{AppError, Result};
use runware_gateway::provider::capability::CapabilitySet;
use runware_gateway::provider::client::{Connector, ProviderClient};
use runware_gateway::provider::connection::ProviderConnection;
use runware_gateway::provider::types::{
    BackgroundRemovalTask, CaptionResult, CaptionTask, ImageInferenceResult, ImageInferenceTask,
    ImageProcessResult, UpscaleTask, VideoInferenceResult, VideoInferenceTask,
};

struct NoopClient;

#[async_trait]
impl ProviderClient for NoopClient {
    async fn image_inference(&self, _task: ImageInferenceTask) -> Result<Vec<ImageInferenceResult>> {
        Ok(vec![])
    }

    async fn video_inference(&self, _task: VideoInferenceTask) -> Result<Vec<VideoInferenceResult>> {
        Ok(vec![])
    }

    async fn remove_background(
        &self,
        _task: BackgroundRemovalTask,
    ) -> Result<Vec<ImageProcessResult>> {
        Ok(vec![])
    }

    async fn upscale(&self, _task: UpscaleTask) -> Result<Vec<ImageProcessResult>> {
        Ok(vec![])
    }

    async fn caption(&self, _task: CaptionTask) -> Result<Vec<CaptionResult>> {
        Ok(vec![])
    }
}

/// Connector that counts physical connect attempts and can be told to fail
struct CountingConnector {
    attempts: AtomicUsize,
    fail: AtomicBool,
    delay: Duration,
}

impl CountingConnector {
    fn new() -> Self {
        Self {
            attempts: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
            delay: Duration::ZERO,
        }
    }

    fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::new()
        }
    }

    fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connector for CountingConnector {
    async fn connect(&self) -> Result<Arc<dyn ProviderClient>> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.fail.load(Ordering::SeqCst) {
            Err(AppError::Connection("simulated connect failure".to_string()))
        } else {
            Ok(Arc::new(NoopClient))
        }
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::full()
    }
}

#[tokio::test]
async fn test_starts_disconnected() {
    let connector = Arc::new(CountingConnector::new());
    let connection = ProviderConnection::new(connector.clone());

    assert!(!connection.is_connected());
    assert_eq!(connector.attempts(), 0);
}

#[tokio::test]
async fn test_connect_reports_success() {
    let connector = Arc::new(CountingConnector::new());
    let connection = ProviderConnection::new(connector.clone());

    assert!(connection.connect().await);
    assert!(connection.is_connected());
    assert_eq!(connector.attempts(), 1);
}

#[tokio::test]
async fn test_connect_reports_failure_without_raising() {
    let connector = Arc::new(CountingConnector::new());
    connector.fail.store(true, Ordering::SeqCst);
    let connection = ProviderConnection::new(connector.clone());

    assert!(!connection.connect().await);
    assert!(!connection.is_connected());
}

#[tokio::test]
async fn test_ensure_connected_is_idempotent() {
    let connector = Arc::new(CountingConnector::new());
    let connection = ProviderConnection::new(connector.clone());

    for _ in 0..5 {
        connection.ensure_connected().await.unwrap();
    }

    assert_eq!(connector.attempts(), 1);
}

#[tokio::test]
async fn test_concurrent_first_requests_connect_once() {
    let connector = Arc::new(CountingConnector::with_delay(Duration::from_millis(50)));
    let connection = Arc::new(ProviderConnection::new(connector.clone()));

    let a = connection.clone();
    let b = connection.clone();
    let (first, second) = tokio::join!(
        tokio::spawn(async move { a.ensure_connected().await.map(|_| ()) }),
        tokio::spawn(async move { b.ensure_connected().await.map(|_| ()) }),
    );

    first.unwrap().unwrap();
    second.unwrap().unwrap();
    assert_eq!(connector.attempts(), 1);
}

#[tokio::test]
async fn test_ensure_connected_fails_the_operation() {
    let connector = Arc::new(CountingConnector::new());
    connector.fail.store(true, Ordering::SeqCst);
    let connection = ProviderConnection::new(connector.clone());

    let err = connection.ensure_connected().await.unwrap_err();
    assert!(matches!(err, AppError::Connection(_)));
    assert!(!connection.is_connected());
}

#[tokio::test]
async fn test_failed_connect_can_retry_later() {
    let connector = Arc::new(CountingConnector::new());
    connector.fail.store(true, Ordering::SeqCst);
    let connection = ProviderConnection::new(connector.clone());

    assert!(connection.ensure_connected().await.is_err());

    // Provider comes back; the next call establishes the handle
    connector.fail.store(false, Ordering::SeqCst);
    connection.ensure_connected().await.unwrap();

    assert!(connection.is_connected());
    assert_eq!(connector.attempts(), 2);
}
