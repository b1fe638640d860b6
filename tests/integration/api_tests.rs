//! API endpoint tests with a wiremock provider behind the gateway

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

use runware_gateway::api::routes::create_router;
use runware_gateway::config::Settings;
use runware_gateway::gateway::MediaGateway;
use runware_gateway::provider::{Connector, ProviderConnection, RunwareConnector};
use runware_gateway::AppState;

fn app_for(api_url: String) -> axum::Router {
    let mut settings = Settings::default();
    settings.provider.api_url = api_url;
    settings.provider.api_key = Some("test-key".to_string());

    let connector = Arc::new(RunwareConnector::new(settings.provider.clone()));
    let capabilities = connector.capabilities();
    let connection = Arc::new(ProviderConnection::new(connector));
    let gateway = MediaGateway::new(connection, capabilities);

    create_router(AppState::new(settings, gateway))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Mount the authentication handshake the connector performs on first use
async fn mount_auth(server: &MockServer) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!([{ "taskType": "authentication" }])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "taskType": "authentication", "connectionSessionUUID": "session-1" }]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_health_reports_service_and_connection_state() {
    let server = MockServer::start().await;
    let app = app_for(server.uri());

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "runware-gateway");
    assert_eq!(json["runware_connected"], false);
    assert!(json["timestamp"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn test_models_returns_static_catalog() {
    let server = MockServer::start().await;
    let app = app_for(server.uri());

    let response = app.oneshot(get("/models")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    let models = json["models"].as_array().unwrap();
    assert_eq!(models.len(), 3);
    assert_eq!(models[0]["id"], "runware:101@1");
    assert_eq!(models[0]["name"], "Runware Default");
}

#[tokio::test]
async fn test_missing_prompt_is_rejected_before_any_provider_call() {
    let server = MockServer::start().await;

    // No request of any kind may reach the provider
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let app = app_for(server.uri());
    let response = app
        .oneshot(post_json("/generate/image", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Prompt is required");
}

#[tokio::test]
async fn test_missing_image_is_rejected_before_any_provider_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let app = app_for(server.uri());

    for uri in [
        "/remove-background",
        "/upscale-image",
        "/caption-image",
        "/image-to-text",
    ] {
        let response = app
            .clone()
            .oneshot(post_json(uri, json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {}", uri);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Image data is required");
    }
}

#[tokio::test]
async fn test_generate_image_end_to_end() {
    let server = MockServer::start().await;
    mount_auth(&server).await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!([{
            "taskType": "imageInference",
            "positivePrompt": "a cat",
            "model": "runware:101@1",
            "width": 1024,
            "height": 1024,
            "steps": 20,
            "CFGScale": 7,
            "numberResults": 1
        }])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "taskType": "imageInference",
                "imageUUID": "img-uuid-1",
                "imageURL": "https://im.runware.ai/img-uuid-1.png"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = app_for(server.uri());
    let response = app
        .clone()
        .oneshot(post_json("/generate/image", json!({ "prompt": "a cat" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["success"], true);
    assert_eq!(json["image"]["url"], "https://im.runware.ai/img-uuid-1.png");
    assert_eq!(json["image"]["uuid"], "img-uuid-1");
    assert_eq!(json["image"]["prompt"], "a cat");
    assert_eq!(json["image"]["model"], "runware:101@1");
    assert_eq!(json["image"]["parameters"]["width"], 1024);
    assert_eq!(json["image"]["parameters"]["height"], 1024);
    assert_eq!(json["image"]["parameters"]["steps"], 20);
    assert_eq!(json["image"]["parameters"]["cfgScale"], 7);
    assert!(json["image"]["generationTime"].is_number());
    assert!(json["metadata"]["timestamp"].is_number());
    assert!(json["metadata"]["processingTime"].is_number());

    // The connection established by the operation is visible to /health
    let health = app.oneshot(get("/health")).await.unwrap();
    let health_json = body_json(health).await;
    assert_eq!(health_json["runware_connected"], true);
}

#[tokio::test]
async fn test_provider_task_error_is_a_soft_failure() {
    let server = MockServer::start().await;
    mount_auth(&server).await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!([{ "taskType": "imageInference" }])))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errors": [{ "code": "invalidModel", "message": "Model not found" }]
        })))
        .mount(&server)
        .await;

    let app = app_for(server.uri());
    let response = app
        .oneshot(post_json(
            "/generate/image",
            json!({ "prompt": "a cat", "model": "bogus:1@1" }),
        ))
        .await
        .unwrap();

    // Characterized business failures keep HTTP 200
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Model not found");
}

#[tokio::test]
async fn test_upscale_end_to_end_with_default_factor() {
    let server = MockServer::start().await;
    mount_auth(&server).await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!([{
            "taskType": "imageUpscale",
            "upscaleFactor": 2
        }])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "taskType": "imageUpscale",
                "imageUUID": "up-uuid-1",
                "imageURL": "https://im.runware.ai/up-uuid-1.png"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = app_for(server.uri());
    let response = app
        .oneshot(post_json(
            "/upscale-image",
            json!({ "image": "data:image/png;base64,AAAA" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["image"]["uuid"], "up-uuid-1");
    assert_eq!(json["image"]["scaleFactor"], 2);
    assert!(json["image"]["processingTime"].is_number());
}

#[tokio::test]
async fn test_caption_end_to_end() {
    let server = MockServer::start().await;
    mount_auth(&server).await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!([{ "taskType": "imageCaption" }])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "taskType": "imageCaption", "text": "a dog on a beach" }]
        })))
        .mount(&server)
        .await;

    let app = app_for(server.uri());
    let response = app
        .oneshot(post_json(
            "/caption-image",
            json!({ "image": "data:image/png;base64,AAAA" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["caption"], "a dog on a beach");
    assert!(json["processingTime"].is_number());
    assert!(json["metadata"]["timestamp"].is_number());
}

#[tokio::test]
async fn test_test_connection_reports_failure_softly() {
    let server = MockServer::start().await;

    // Authentication itself is refused, so the connection cannot establish
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errors": [{ "code": "invalidApiKey", "message": "Invalid API key" }]
        })))
        .mount(&server)
        .await;

    let app = app_for(server.uri());
    let response = app.oneshot(get("/test-connection")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert!(json["error"].is_string());
}
