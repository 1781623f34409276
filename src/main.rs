use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use basta::api::{self, AppState};
use basta::config::AppConfig;
use basta::db::Database;
use basta::logging::init_logging;
use basta::metrics::MetricsCollector;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Bind address override
    #[arg(long)]
    bind: Option<String>,

    /// Port override
    #[arg(short, long)]
    port: Option<u16>,

    /// Database file override
    #[arg(long)]
    database: Option<String>,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration, then apply command-line overrides
    let mut config = AppConfig::load()?;
    if let Some(bind) = cli.bind {
        config.server.bind_address = bind;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(database) = cli.database {
        config.database.path = database;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    config.validate()?;

    // Initialize logging; the guard must outlive the server
    let _log_guard = init_logging(
        Some(&config.get_log_level()),
        config.logging.file_path.as_deref().map(Path::new),
    )?;

    if let Err(e) = MetricsCollector::init() {
        tracing::warn!(error = %e, "metrics recorder not installed");
    }

    info!("Starting basta back-office server");

    let db = Database::new(&config.get_database_path(), config.database.max_connections)
        .context("failed to open database")?;
    MetricsCollector::default().update_connection_pool_size(db.pool_size() as usize);

    let addr = config.socket_addr()?;
    let state = AppState {
        db: Arc::new(db),
        config: Arc::new(config),
    };
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Listening on {addr}");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
