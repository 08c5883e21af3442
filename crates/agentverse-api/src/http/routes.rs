//! HTTP route definitions.

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::http::{capabilities, monitoring};
use crate::plugin::routes as plugin_routes;
use crate::state::AppState;
use crate::workflow::routes as workflow_routes;

/// Create the main router.
///
/// ```text
/// /api/v1/workflows
///   POST   /api/v1/workflows           - Create workflow
///   GET    /api/v1/workflows           - List workflows
///   GET    /api/v1/workflows/{id}      - Get workflow
///   PUT    /api/v1/workflows/{id}      - Update workflow
///   DELETE /api/v1/workflows/{id}      - Delete workflow
///   POST   /api/v1/workflows/{id}/run  - Run workflow
///
/// /api/v1/plugins
///   POST   /api/v1/plugins             - Create plugin configuration
///   GET    /api/v1/plugins             - List plugin configurations
///   GET    /api/v1/plugins/{id}        - Get plugin configuration
///   PUT    /api/v1/plugins/{id}        - Update plugin configuration
///   DELETE /api/v1/plugins/{id}        - Delete plugin configuration
///
/// /api/v1/capabilities                 - Registered step types
///
/// /health  - Health check
/// /livez   - Liveness probe
/// ```
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);

    let workflow_router = Router::new()
        .route(
            "/",
            post(workflow_routes::create_workflow).get(workflow_routes::list_workflows),
        )
        .route(
            "/{id}",
            get(workflow_routes::get_workflow)
                .put(workflow_routes::update_workflow)
                .delete(workflow_routes::delete_workflow),
        )
        .route("/{id}/run", post(workflow_routes::run_workflow));

    let plugin_router = Router::new()
        .route(
            "/",
            post(plugin_routes::create_plugin).get(plugin_routes::list_plugins),
        )
        .route(
            "/{id}",
            get(plugin_routes::get_plugin)
                .put(plugin_routes::update_plugin)
                .delete(plugin_routes::delete_plugin),
        );

    let api_v1 = Router::new()
        .nest("/workflows", workflow_router)
        .nest("/plugins", plugin_router)
        .route("/capabilities", get(capabilities::list_capabilities));

    Router::new()
        .nest("/api/v1", api_v1)
        .route("/health", get(monitoring::health_check))
        .route("/livez", get(monitoring::liveness_probe))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// CORS for the configured origins; any origin when none are configured.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(parsed)
        .allow_methods(Any)
        .allow_headers(Any)
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
