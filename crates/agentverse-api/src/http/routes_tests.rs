use super::*;
use crate::storage::{MemoryPluginConfigStore, MemoryWorkflowStore};
use agentverse_config::Config;
use agentverse_core::CapabilityRegistry;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

fn create_test_router(default_user: Option<&str>) -> Router {
    let mut config = Config::default();
    config.auth.default_user = default_user.map(str::to_string);

    let plugins = Arc::new(MemoryPluginConfigStore::new());
    let registry = CapabilityRegistry::new();
    agentverse_capabilities::register_builtin(&registry, plugins.clone()).unwrap();

    let state = AppState::new(
        config,
        Arc::new(MemoryWorkflowStore::new()),
        plugins,
        Arc::new(registry),
    );
    create_router(Arc::new(state))
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_needs_no_identity() {
    let app = create_test_router(None);
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["capabilities"], 3);
}

#[tokio::test]
async fn test_livez() {
    let app = create_test_router(None);
    let response = app
        .oneshot(Request::builder().uri("/livez").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_api_requires_identity() {
    let app = create_test_router(None);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/workflows")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["status"], "error");
    assert_eq!(json["error_type"], "unauthorized");
}

#[tokio::test]
async fn test_capabilities_listing() {
    let app = create_test_router(Some("dev"));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/capabilities")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["count"], 3);
    assert_eq!(json["capabilities"][0]["step_type"], "agent");
    assert_eq!(json["capabilities"][1]["step_type"], "plugin");
    assert_eq!(json["capabilities"][2]["step_type"], "tool");
}

#[tokio::test]
async fn test_unknown_workflow_is_404() {
    let app = create_test_router(Some("dev"));
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/workflows/wf5/run")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"inputs": {}}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error_type"], "not_found");
    assert!(json["detail"].as_str().unwrap().contains("Workflow not found"));
}

async fn post_json(app: Router, uri: &str, body: &'static str) -> axum::response::Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn test_malformed_body_uses_error_envelope() {
    let app = create_test_router(Some("dev"));
    let response = post_json(app, "/api/v1/workflows", "{not json").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["status"], "error");
    assert_eq!(json["error_type"], "bad_request");
    assert!(!json["detail"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_mistyped_body_uses_error_envelope() {
    let app = create_test_router(Some("dev"));
    let response = post_json(app.clone(), "/api/v1/workflows", r#"{"name": "n"}"#).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error_type"], "bad_request");

    let response = post_json(app, "/api/v1/plugins", r#"{"plugin_type": 7}"#).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["status"], "error");
}

#[tokio::test]
async fn test_run_body_must_be_json() {
    let app = create_test_router(Some("dev"));
    let response = post_json(app, "/api/v1/workflows/wf1/run", "inputs=1").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error_type"], "bad_request");
}

#[test]
fn test_cors_layer_variants() {
    let _ = cors_layer(&[]);
    let _ = cors_layer(&["*".to_string()]);
    let _ = cors_layer(&["http://localhost:5173".to_string(), "bad\norigin".to_string()]);
}
