//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use tokio::sync::watch;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::{Config, StorageBackend};
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, FileRepository, Repository, SqlRepository};
use crate::jobs::ActivityLogger;

/// Execute the serve command
pub async fn execute(args: ServeArgs, mut config: Config) -> AppResult<()> {
    if let Some(host) = args.host {
        config.server_host = host;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }
    if let Some(storage) = args.storage {
        config.storage_backend = storage;
    }

    tracing::info!("Starting server with {:?} storage...", config.storage_backend);

    let (repo, database) = open_storage(&config).await?;

    // Activity logger runs until the server shuts down
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let activity = ActivityLogger::new(repo.clone()).spawn(config.activity_log_interval, shutdown_rx);

    let addr = config.server_addr();
    let app = create_router(AppState::from_config(repo, config, database));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)));

    let _ = shutdown_tx.send(true);
    if let Err(e) = activity.await {
        tracing::warn!("Activity logger ended abnormally: {}", e);
    }

    tracing::info!("Server stopped");
    served
}

async fn open_storage(
    config: &Config,
) -> AppResult<(Arc<dyn Repository>, Option<Arc<Database>>)> {
    match config.storage_backend {
        StorageBackend::File => {
            let repo = FileRepository::open(&config.data_dir).await?;
            Ok((Arc::new(repo), None))
        }
        StorageBackend::Postgres => {
            let db = Arc::new(Database::connect(config).await?);
            tracing::info!("Database connected");
            let repo = SqlRepository::new(db.clone());
            Ok((Arc::new(repo), Some(db)))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
