//! Tracing setup and server startup.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use agentverse_api::{ApiServer, AppState, open_stores};
use agentverse_config::{Config, LoggingConfig};

use crate::register::build_registry;

/// Initialize tracing with a stderr layer and, when configured, a daily rolling file layer.
pub(crate) fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let file_layer = match logging.resolved_directory() {
        Some(log_dir) => {
            std::fs::create_dir_all(&log_dir)?;

            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("agentverse")
                .filename_suffix("log")
                .max_log_files(30)
                .build(&log_dir)?;

            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // The guard flushes on drop and must live for the whole program.
            static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
                std::sync::OnceLock::new();
            let _ = GUARD.set(guard);

            Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
        }
        None => None,
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    // stdout is reserved for command output.
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(true),
        )
        .with(file_layer)
        .init();

    Ok(())
}

/// Run the server in foreground until Ctrl+C.
pub(crate) async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting AgentVerse v{}", env!("CARGO_PKG_VERSION"));

    let (workflows, plugins) = open_stores(&config.storage).await?;
    let registry = build_registry(plugins.clone())?;

    if let Some(user) = &config.auth.default_user {
        warn!(
            "Unauthenticated requests will run as '{}'; do not expose this server publicly",
            user
        );
    }

    let state = Arc::new(AppState::new(config, workflows, plugins, registry));
    let server = ApiServer::new(state);
    info!("Listening on http://{}", server.addr());

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down...");
        }
        signal_token.cancel();
    });

    server.run(shutdown).await?;
    info!("AgentVerse stopped");
    Ok(())
}
