//! AgentVerse - workflow step execution backend.

mod cli;
mod cmd_run;
mod register;
mod server;

use clap::Parser;

use agentverse_config::{ConfigLoader, ConfigValidator};

use crate::cli::{Cli, Commands};
use crate::server::{init_tracing, run_server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = ConfigLoader::load_or_default(cli.config.as_deref())?;

    init_tracing(&config.logging)?;

    match cli.command {
        None => {
            ensure_valid(&config)?;
            run_server(config).await
        }
        Some(Commands::Serve { host, port }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            ensure_valid(&config)?;
            run_server(config).await
        }
        Some(Commands::Run {
            workflow,
            inputs,
            user,
            plugins,
        }) => {
            ensure_valid(&config)?;
            cmd_run::run_workflow_file(&config, workflow, &inputs, user, plugins).await
        }
        Some(Commands::CheckConfig) => {
            ensure_valid(&config)?;
            println!("Configuration OK");
            Ok(())
        }
    }
}

/// Print validation warnings to stderr, failing on any error.
fn ensure_valid(config: &agentverse_config::Config) -> Result<(), Box<dyn std::error::Error>> {
    for warning in ConfigValidator::validate(config).into_result()? {
        eprintln!("warning: {}: {}", warning.path, warning.message);
    }
    Ok(())
}
