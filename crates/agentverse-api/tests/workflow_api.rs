//! End-to-end workflow runs through the HTTP router.

use std::sync::Arc;

use agentverse_api::{AppState, MemoryPluginConfigStore, MemoryWorkflowStore, create_router};
use agentverse_config::Config;
use agentverse_core::CapabilityRegistry;
use agentverse_protocols::{
    NewWorkflow, StoreError, WorkflowDefinition, WorkflowStore, WorkflowUpdate,
};
use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::{Value, json};
use tower::ServiceExt;

fn bearer(user: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let claims = URL_SAFE_NO_PAD.encode(json!({ "sub": user }).to_string());
    format!("Bearer {}.{}.sig", header, claims)
}

fn app_with(workflows: Arc<dyn WorkflowStore>) -> Router {
    let plugins = Arc::new(MemoryPluginConfigStore::new());
    let registry = CapabilityRegistry::new();
    agentverse_capabilities::register_builtin(&registry, plugins.clone()).unwrap();
    let state = AppState::new(Config::default(), workflows, plugins, Arc::new(registry));
    create_router(Arc::new(state))
}

fn app() -> Router {
    app_with(Arc::new(MemoryWorkflowStore::new()))
}

async fn call(
    app: &Router,
    method: &str,
    uri: &str,
    user: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", bearer(user));
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create_workflow(app: &Router, user: &str, steps: Value) -> String {
    let (status, body) = call(
        app,
        "POST",
        "/api/v1/workflows",
        user,
        Some(json!({ "name": "test", "steps": steps })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

async fn create_plugin(app: &Router, user: &str, plugin_type: &str, blob: &str) -> String {
    let (status, body) = call(
        app,
        "POST",
        "/api/v1/plugins",
        user,
        Some(json!({ "plugin_type": plugin_type, "name": "Summarizer", "config_blob": blob })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn plugin_step_run() {
    let app = app();
    let cfg = create_plugin(&app, "u1", "static", r#"{"result": "plugin success"}"#).await;
    let wf = create_workflow(
        &app,
        "u1",
        json!([{ "id": "s1", "type": "plugin", "config_id": cfg, "parameters": { "param1": "foo" } }]),
    )
    .await;

    let (status, body) = call(
        &app,
        "POST",
        &format!("/api/v1/workflows/{}/run", wf),
        "u1",
        Some(json!({ "inputs": { "input1": "bar" } })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["output"], json!({ "s1": { "result": "plugin success" } }));
    let logs = body["logs"].as_array().unwrap();
    assert!(logs.iter().any(|l| l.as_str().unwrap().contains("plugin result")));
}

#[tokio::test]
async fn echo_plugin_sees_merged_parameters() {
    let app = app();
    let cfg = create_plugin(&app, "u1", "echo", "").await;
    let wf = create_workflow(
        &app,
        "u1",
        json!([{ "id": "s1", "type": "plugin", "config_id": cfg, "parameters": { "param1": "foo" } }]),
    )
    .await;

    let (_, body) = call(
        &app,
        "POST",
        &format!("/api/v1/workflows/{}/run", wf),
        "u1",
        Some(json!({ "inputs": { "input1": "bar", "user_id": "spoof" } })),
    )
    .await;

    let inputs = &body["output"]["s1"]["inputs"];
    assert_eq!(body["output"]["s1"]["result"], "Plugin executed");
    assert_eq!(inputs["param1"], "foo");
    assert_eq!(inputs["input1"], "bar");
    assert_eq!(inputs["user_id"], "u1");
}

#[tokio::test]
async fn agent_and_tool_stubs() {
    let app = app();
    let wf = create_workflow(
        &app,
        "u1",
        json!([
            { "id": "s2", "type": "agent", "parameters": { "foo": "bar" } },
            { "id": "s3", "type": "tool", "parameters": { "baz": "qux" } }
        ]),
    )
    .await;

    let (status, body) = call(
        &app,
        "POST",
        &format!("/api/v1/workflows/{}/run", wf),
        "u1",
        Some(json!({ "inputs": {} })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["output"]["s2"]["message"], "Agent execution not implemented");
    assert_eq!(body["output"]["s3"]["message"], "Tool execution not implemented");
    let logs: Vec<&str> = body["logs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l.as_str().unwrap())
        .collect();
    assert!(logs.contains(&"Step s2: agent execution is a stub"));
    assert!(logs.contains(&"Step s3: tool execution is a stub"));
}

#[tokio::test]
async fn failed_steps_still_return_200() {
    let app = app();
    let wf = create_workflow(
        &app,
        "u1",
        json!([
            { "id": "s4", "type": "plugin" },
            { "id": "s5", "type": "unknown_type" },
            { "id": "s6", "type": "tool" }
        ]),
    )
    .await;

    let (status, body) = call(
        &app,
        "POST",
        &format!("/api/v1/workflows/{}/run", wf),
        "u1",
        Some(json!({ "inputs": {} })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "error");
    assert!(body["output"]["s4"]["error"].as_str().unwrap().contains("config_id"));
    assert_eq!(body["output"]["s5"]["error"], "Unknown step type: unknown_type");
    assert_eq!(body["output"]["s6"]["message"], "Tool execution not implemented");
    let logs = body["logs"].as_array().unwrap();
    assert!(logs.iter().any(|l| l.as_str().unwrap().contains("Error in step s4")));
    assert!(logs.iter().any(|l| l.as_str().unwrap().contains("has unknown type")));
}

#[tokio::test]
async fn foreign_plugin_configuration_fails_the_step() {
    let app = app();
    let cfg = create_plugin(&app, "u2", "echo", "").await;
    let wf = create_workflow(
        &app,
        "u1",
        json!([{ "id": "s1", "type": "plugin", "config_id": cfg }]),
    )
    .await;

    let (status, body) = call(
        &app,
        "POST",
        &format!("/api/v1/workflows/{}/run", wf),
        "u1",
        Some(json!({ "inputs": {} })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "error");
    assert!(body["output"]["s1"]["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn workflows_are_owner_scoped() {
    let app = app();
    let wf = create_workflow(&app, "u1", json!([{ "type": "agent" }])).await;

    let uri = format!("/api/v1/workflows/{}", wf);
    let (status, body) = call(&app, "GET", &uri, "u2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "error");

    let (status, _) = call(
        &app,
        "POST",
        &format!("/api/v1/workflows/{}/run", wf),
        "u2",
        Some(json!({ "inputs": {} })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = call(&app, "GET", "/api/v1/workflows", "u2", None).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn workflow_crud() {
    let app = app();
    let wf = create_workflow(&app, "u1", json!([{ "type": "agent" }])).await;

    let (status, body) = call(
        &app,
        "PUT",
        &format!("/api/v1/workflows/{}", wf),
        "u1",
        Some(json!({ "name": "renamed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "renamed");
    assert_eq!(body["steps"].as_array().unwrap().len(), 1);

    let (_, body) = call(&app, "GET", "/api/v1/workflows", "u1", None).await;
    assert_eq!(body["count"], 1);

    let uri = format!("/api/v1/workflows/{}", wf);
    let (status, _) = call(&app, "DELETE", &uri, "u1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = call(&app, "DELETE", &uri, "u1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn plugin_crud() {
    let app = app();
    let cfg = create_plugin(&app, "u1", "echo", "").await;
    let uri = format!("/api/v1/plugins/{}", cfg);

    let (status, body) = call(&app, "PUT", &uri, "u1", Some(json!({ "config_blob": "{}" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["config_blob"], "{}");
    assert_eq!(body["plugin_type"], "echo");

    let (status, _) = call(&app, "GET", &uri, "u2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, "DELETE", &uri, "u1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = call(
        &app,
        "POST",
        "/api/v1/plugins",
        "u1",
        Some(json!({ "plugin_type": " ", "name": "blank" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "bad_request");
}

struct UnreachableStore;

#[async_trait]
impl WorkflowStore for UnreachableStore {
    async fn create(&self, _owner: &str, _new: NewWorkflow) -> Result<WorkflowDefinition, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn get(&self, _id: &str, _owner: &str) -> Result<Option<WorkflowDefinition>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn list(&self, _owner: &str) -> Result<Vec<WorkflowDefinition>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn update(
        &self,
        _id: &str,
        _owner: &str,
        _update: WorkflowUpdate,
    ) -> Result<Option<WorkflowDefinition>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn delete(&self, _id: &str, _owner: &str) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

#[tokio::test]
async fn store_failure_is_500() {
    let app = app_with(Arc::new(UnreachableStore));

    let (status, body) = call(
        &app,
        "POST",
        "/api/v1/workflows/wf1/run",
        "u1",
        Some(json!({ "inputs": {} })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error_type"], "internal_error");

    let (status, _) = call(&app, "GET", "/api/v1/workflows", "u1", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
