use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use clap::{Parser, ValueEnum};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;

use roster_server::{build_router, config, Database, MemoryPlayerRepository, PlayerService};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StoreKind {
    /// SQLite file under the data directory
    Sqlite,
    /// Process-local store, lost on exit
    Memory,
}

#[derive(Parser, Debug)]
#[command(name = "roster-server", about = "Player roster HTTP server")]
struct Args {
    /// Address to listen on
    #[arg(long, env = "ROSTER_BIND", default_value = "127.0.0.1:8080")]
    bind: String,

    /// Storage backend
    #[arg(long, value_enum, default_value_t = StoreKind::Sqlite)]
    store: StoreKind,

    /// Directory holding roster.db (defaults to ROSTER_DATA_DIR or ~/.config/roster/data)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Write logs to daily rolling files in this directory instead of stdout
    #[arg(long, env = "ROSTER_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _guard = init_tracing(args.log_dir.as_deref());

    tracing::info!("Starting roster server");

    let (app, db) = match args.store {
        StoreKind::Sqlite => {
            let data_dir = args.data_dir.clone().unwrap_or_else(config::get_data_dir);
            tracing::info!("Using data directory: {}", data_dir.display());
            let db = Database::open(&config::database_path(&data_dir))
                .await
                .context("failed to open SQLite database")?;
            let app = build_router(PlayerService::new(Arc::new(db.players())));
            (app, Some(db))
        }
        StoreKind::Memory => {
            tracing::warn!("Using in-memory store; records are lost on exit");
            let service = PlayerService::new(Arc::new(MemoryPlayerRepository::new()));
            (build_router(service), None)
        }
    };

    serve(app, &args.bind).await?;

    if let Some(db) = db {
        db.close().await;
    }
    Ok(())
}

/// Initialize tracing with span durations. Returns the appender guard when
/// logging to files; dropping it flushes pending lines.
fn init_tracing(log_dir: Option<&std::path::Path>) -> Option<WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    match log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "roster-server.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_span_events(FmtSpan::CLOSE)
                .with_writer(non_blocking)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_span_events(FmtSpan::CLOSE)
                .init();
            None
        }
    }
}

async fn serve(app: Router, bind: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
