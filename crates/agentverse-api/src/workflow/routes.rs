//! Workflow HTTP route handlers.
//!
//! - POST   /workflows          - Create workflow
//! - GET    /workflows          - List workflows
//! - GET    /workflows/{id}     - Get workflow
//! - PUT    /workflows/{id}     - Update workflow
//! - DELETE /workflows/{id}     - Delete workflow
//! - POST   /workflows/{id}/run - Run workflow

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::info;

use agentverse_core::RunResult;
use agentverse_protocols::{NewWorkflow, Parameters, WorkflowDefinition, WorkflowUpdate};

use crate::auth::CallerIdentity;
use crate::error::ApiError;
use crate::http::json::ApiJson;
use crate::state::AppState;

/// Response for listing workflows.
#[derive(Debug, Serialize)]
pub struct WorkflowListResponse {
    pub count: usize,
    pub workflows: Vec<WorkflowDefinition>,
}

/// Body of a run request.
#[derive(Debug, Default, Deserialize)]
pub struct RunRequest {
    #[serde(default)]
    pub inputs: Parameters,
}

fn not_found(id: &str) -> ApiError {
    ApiError::NotFound(format!("Workflow not found: {}", id))
}

/// POST /workflows
pub async fn create_workflow(
    State(state): State<Arc<AppState>>,
    caller: CallerIdentity,
    ApiJson(new): ApiJson<NewWorkflow>,
) -> Result<(StatusCode, Json<WorkflowDefinition>), ApiError> {
    let workflow = state.workflows.create(caller.as_str(), new).await?;
    info!(
        "Created workflow {} ({}) for {}",
        workflow.id,
        workflow.name,
        caller.as_str()
    );
    Ok((StatusCode::CREATED, Json(workflow)))
}

/// GET /workflows
pub async fn list_workflows(
    State(state): State<Arc<AppState>>,
    caller: CallerIdentity,
) -> Result<Json<WorkflowListResponse>, ApiError> {
    let workflows = state.workflows.list(caller.as_str()).await?;
    Ok(Json(WorkflowListResponse {
        count: workflows.len(),
        workflows,
    }))
}

/// GET /workflows/{id}
pub async fn get_workflow(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    caller: CallerIdentity,
) -> Result<Json<WorkflowDefinition>, ApiError> {
    state
        .workflows
        .get(&id, caller.as_str())
        .await?
        .map(Json)
        .ok_or_else(|| not_found(&id))
}

/// PUT /workflows/{id}
pub async fn update_workflow(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    caller: CallerIdentity,
    ApiJson(update): ApiJson<WorkflowUpdate>,
) -> Result<Json<WorkflowDefinition>, ApiError> {
    state
        .workflows
        .update(&id, caller.as_str(), update)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(&id))
}

/// DELETE /workflows/{id}
pub async fn delete_workflow(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    caller: CallerIdentity,
) -> Result<StatusCode, ApiError> {
    if state.workflows.delete(&id, caller.as_str()).await? {
        info!("Deleted workflow {}", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(&id))
    }
}

/// POST /workflows/{id}/run
///
/// Completed and cancelled runs are 200 even when steps failed; the run
/// status is in the body.
pub async fn run_workflow(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    caller: CallerIdentity,
    ApiJson(request): ApiJson<RunRequest>,
) -> Result<Json<RunResult>, ApiError> {
    info!("Running workflow {} for {}", id, caller.as_str());

    let result = state
        .executor
        .run_with(&id, caller.as_str(), request.inputs, state.run_options())
        .await?;
    Ok(Json(result))
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
