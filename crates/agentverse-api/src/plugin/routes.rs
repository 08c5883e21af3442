//! Plugin configuration HTTP route handlers.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Serialize;
use tracing::info;

use agentverse_protocols::{
    NewPluginConfiguration, PluginConfiguration, PluginConfigurationUpdate,
};

use crate::auth::CallerIdentity;
use crate::error::ApiError;
use crate::http::json::ApiJson;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PluginListResponse {
    pub count: usize,
    pub plugins: Vec<PluginConfiguration>,
}

fn not_found(id: &str) -> ApiError {
    ApiError::NotFound(format!("Plugin configuration not found: {}", id))
}

/// POST /plugins
pub async fn create_plugin(
    State(state): State<Arc<AppState>>,
    caller: CallerIdentity,
    ApiJson(new): ApiJson<NewPluginConfiguration>,
) -> Result<(StatusCode, Json<PluginConfiguration>), ApiError> {
    if new.plugin_type.trim().is_empty() {
        return Err(ApiError::BadRequest("plugin_type cannot be empty".to_string()));
    }
    let plugin = state.plugins.create(caller.as_str(), new).await?;
    info!(
        "Created plugin configuration {} ({}) for {}",
        plugin.id,
        plugin.plugin_type,
        caller.as_str()
    );
    Ok((StatusCode::CREATED, Json(plugin)))
}

/// GET /plugins
pub async fn list_plugins(
    State(state): State<Arc<AppState>>,
    caller: CallerIdentity,
) -> Result<Json<PluginListResponse>, ApiError> {
    let plugins = state.plugins.list(caller.as_str()).await?;
    Ok(Json(PluginListResponse {
        count: plugins.len(),
        plugins,
    }))
}

/// GET /plugins/{id}
pub async fn get_plugin(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    caller: CallerIdentity,
) -> Result<Json<PluginConfiguration>, ApiError> {
    state
        .plugins
        .get(&id, caller.as_str())
        .await?
        .map(Json)
        .ok_or_else(|| not_found(&id))
}

/// PUT /plugins/{id}
pub async fn update_plugin(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    caller: CallerIdentity,
    ApiJson(update): ApiJson<PluginConfigurationUpdate>,
) -> Result<Json<PluginConfiguration>, ApiError> {
    state
        .plugins
        .update(&id, caller.as_str(), update)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(&id))
}

/// DELETE /plugins/{id}
pub async fn delete_plugin(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    caller: CallerIdentity,
) -> Result<StatusCode, ApiError> {
    if state.plugins.delete(&id, caller.as_str()).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(&id))
    }
}
