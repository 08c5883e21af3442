//! One-shot workflow execution from the command line.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use agentverse_api::{MemoryPluginConfigStore, MemoryWorkflowStore};
use agentverse_config::Config;
use agentverse_core::{RunContext, RunExecutor, RunOptions, RunResult, StepDispatcher};
use agentverse_protocols::{Parameters, PluginConfiguration, WorkflowDefinition};

use crate::register::build_registry;

/// Run a workflow file once as `user` and print the result as JSON.
pub(crate) async fn run_workflow_file(
    config: &Config,
    workflow_path: PathBuf,
    inputs: &str,
    user: String,
    plugins_path: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let definition = load_definition(&workflow_path, &user).await?;
    let inputs = parse_inputs(inputs)?;

    // The definition is executed directly and never stored.
    let workflows = Arc::new(MemoryWorkflowStore::new());
    let plugins = Arc::new(MemoryPluginConfigStore::new());
    if let Some(path) = plugins_path {
        for plugin in load_plugins(&path, &user).await? {
            plugins.insert(plugin).await;
        }
    }

    let registry = build_registry(plugins)?;
    let executor = RunExecutor::new(workflows, StepDispatcher::new(registry))
        .with_step_timeout(config.executor.step_timeout());

    let cancel = CancellationToken::new();
    let mut options = RunOptions::new().with_cancellation(cancel.clone());
    if let Some(timeout) = config.executor.run_timeout() {
        options = options.with_timeout(timeout);
    }

    let signal_task = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling run");
            cancel.cancel();
        }
    });

    info!("Running workflow {} as {}", definition.id, user);
    let result = executor
        .execute_definition(&definition, &user, &RunContext::new(inputs), &options)
        .await;
    signal_task.abort();

    print_result(&result)
}

fn print_result(result: &RunResult) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}

/// Read a workflow definition and make it owned by `user`.
async fn load_definition(
    path: &Path,
    user: &str,
) -> Result<WorkflowDefinition, Box<dyn std::error::Error>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("Failed to read workflow {}: {}", path.display(), e))?;
    let mut definition: WorkflowDefinition = serde_json::from_str(&content)
        .map_err(|e| format!("Invalid workflow {}: {}", path.display(), e))?;

    definition.user_id = user.to_string();
    if definition.id.is_empty() {
        definition.id = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "workflow".to_string());
    }
    Ok(definition)
}

/// Read a JSON array of plugin configurations, all owned by `user`.
async fn load_plugins(
    path: &Path,
    user: &str,
) -> Result<Vec<PluginConfiguration>, Box<dyn std::error::Error>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("Failed to read plugins {}: {}", path.display(), e))?;
    parse_plugins(&content, user)
}

fn parse_plugins(
    content: &str,
    user: &str,
) -> Result<Vec<PluginConfiguration>, Box<dyn std::error::Error>> {
    let entries: Vec<Value> = serde_json::from_str(content)?;
    let mut plugins = Vec::with_capacity(entries.len());
    for mut entry in entries {
        let Some(object) = entry.as_object_mut() else {
            return Err("Plugin configuration must be a JSON object".into());
        };
        object.insert("user_id".to_string(), Value::String(user.to_string()));
        plugins.push(serde_json::from_value(entry)?);
    }
    Ok(plugins)
}

/// Parse run inputs. Anything but a JSON object is rejected.
fn parse_inputs(inputs: &str) -> Result<Parameters, Box<dyn std::error::Error>> {
    match serde_json::from_str::<Value>(inputs)? {
        Value::Object(map) => Ok(map),
        _ => Err("Run inputs must be a JSON object".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_inputs_object() {
        let inputs = parse_inputs(r#"{"input1": "bar"}"#).unwrap();
        assert_eq!(inputs["input1"], "bar");
    }

    #[test]
    fn test_parse_inputs_rejects_non_object() {
        assert!(parse_inputs("[1, 2]").is_err());
        assert!(parse_inputs("not json").is_err());
    }

    #[test]
    fn test_parse_plugins_sets_owner() {
        let plugins = parse_plugins(
            r#"[{"id": "cfg1", "user_id": "someone", "plugin_type": "static", "name": "p"}]"#,
            "local",
        )
        .unwrap();
        assert_eq!(plugins.len(), 1);
        assert_eq!(plugins[0].id, "cfg1");
        assert_eq!(plugins[0].user_id, "local");
        assert!(plugins[0].config_blob.is_empty());

        let without_owner =
            parse_plugins(r#"[{"id": "cfg2", "plugin_type": "echo", "name": "q"}]"#, "local")
                .unwrap();
        assert_eq!(without_owner[0].user_id, "local");
    }

    #[test]
    fn test_parse_plugins_rejects_non_object() {
        assert!(parse_plugins(r#"["cfg1"]"#, "local").is_err());
    }

    #[tokio::test]
    async fn test_load_definition_uses_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nightly.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"{{"name": "n", "steps": [{{"type": "agent"}}]}}"#).unwrap();

        let definition = load_definition(&path, "local").await.unwrap();
        assert_eq!(definition.id, "nightly");
        assert_eq!(definition.user_id, "local");
        assert_eq!(definition.steps.len(), 1);
    }

    #[tokio::test]
    async fn test_load_definition_keeps_declared_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.json");
        std::fs::write(&path, r#"{"id": "wf1", "user_id": "other", "steps": []}"#).unwrap();

        let definition = load_definition(&path, "local").await.unwrap();
        assert_eq!(definition.id, "wf1");
        assert_eq!(definition.user_id, "local");
    }

    #[tokio::test]
    async fn test_load_files_report_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");

        let err = load_definition(&missing, "local").await.unwrap_err();
        assert!(err.to_string().contains("Failed to read workflow"));
        let err = load_plugins(&missing, "local").await.unwrap_err();
        assert!(err.to_string().contains("Failed to read plugins"));
    }

    #[tokio::test]
    async fn test_load_plugins_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plugins.json");
        std::fs::write(
            &path,
            r#"[{"id": "cfg1", "plugin_type": "static", "name": "p", "config_blob": "{}"}]"#,
        )
        .unwrap();

        let plugins = load_plugins(&path, "local").await.unwrap();
        assert_eq!(plugins.len(), 1);
        assert_eq!(plugins[0].user_id, "local");
    }
}
