//! CLI definitions for AgentVerse.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// AgentVerse CLI.
#[derive(Parser)]
#[command(name = "agentverse")]
#[command(about = "Workflow step execution backend for agents, plugins and tools")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "AGENTVERSE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the HTTP server in foreground (default)
    Serve {
        /// Server host (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run a workflow definition file once and print the result as JSON
    Run {
        /// Path to a workflow definition (JSON)
        workflow: PathBuf,

        /// Run inputs as a JSON object
        #[arg(long, default_value = "{}")]
        inputs: String,

        /// Owner the run executes as
        #[arg(long, default_value = "local")]
        user: String,

        /// Plugin configurations (JSON array) available to plugin steps
        #[arg(long)]
        plugins: Option<PathBuf>,
    },

    /// Validate the configuration and exit
    CheckConfig,
}
