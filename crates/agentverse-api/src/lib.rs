//! # AgentVerse API
//!
//! HTTP surface of the AgentVerse workflow engine.
//!
//! - **Workflows**: CRUD and `POST /api/v1/workflows/{id}/run`
//! - **Plugins**: CRUD of plugin configurations used by `plugin` steps
//! - **Capabilities**: registered step types
//! - **Monitoring**: `/health` and `/livez`
//!
//! Every `/api/v1` route runs as the caller identity extracted by
//! [`CallerIdentity`]; records of other owners behave as missing.

pub mod auth;
pub mod error;
pub mod http;
pub mod plugin;
pub mod server;
pub mod state;
pub mod storage;
pub mod workflow;

pub use auth::CallerIdentity;
pub use error::ApiError;
pub use http::routes::create_router;
pub use server::ApiServer;
pub use state::AppState;
pub use storage::{
    FilePluginConfigStore, FileWorkflowStore, MemoryPluginConfigStore, MemoryWorkflowStore,
    open_stores,
};
