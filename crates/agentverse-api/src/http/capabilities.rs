//! Capability listing.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::auth::CallerIdentity;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CapabilityInfo {
    pub step_type: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct CapabilityListResponse {
    pub count: usize,
    pub capabilities: Vec<CapabilityInfo>,
}

/// GET /api/v1/capabilities
pub async fn list_capabilities(
    State(state): State<Arc<AppState>>,
    _caller: CallerIdentity,
) -> Json<CapabilityListResponse> {
    let capabilities: Vec<CapabilityInfo> = state
        .registry
        .describe()
        .into_iter()
        .map(|(step_type, description)| CapabilityInfo {
            step_type,
            description,
        })
        .collect();

    Json(CapabilityListResponse {
        count: capabilities.len(),
        capabilities,
    })
}
