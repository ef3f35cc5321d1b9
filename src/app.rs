//! Startup wiring: storage selection, optional seeding and serving.

use crate::config::{AppConfig, ConfigError, StorageBackend};
use crate::http;
use crate::routing::RouteDefinitionError;
use crate::task::{
    adapters::{
        memory::InMemoryTaskRepository,
        postgres::{PostgresTaskRepository, connect_pool},
    },
    ports::{TaskRepository, TaskRepositoryError},
    seed::seed_sample_tasks,
};
use std::io;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing_subscriber::util::TryInitError;

/// Fatal errors that stop the service.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The tracing subscriber could not be installed.
    #[error("failed to initialise logging: {0}")]
    Telemetry(#[from] TryInitError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The route table is malformed.
    #[error(transparent)]
    Routes(#[from] RouteDefinitionError),

    /// Storage could not be reached or seeded.
    #[error("storage unavailable: {0}")]
    Storage(#[from] TaskRepositoryError),

    /// The listener could not bind.
    #[error("failed to bind {address}: {source}")]
    Bind {
        /// Address that failed to bind.
        address: String,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The server stopped with an I/O error.
    #[error("server error: {0}")]
    Serve(#[source] io::Error),
}

/// Builds the configured store and serves the task API until Ctrl+C.
///
/// # Errors
///
/// Returns [`ServerError`] when storage, routing or the listener fail.
pub async fn run(config: AppConfig) -> Result<(), ServerError> {
    match &config.storage {
        StorageBackend::Memory => {
            tracing::info!("using in-memory task store");
            run_with(&config, Arc::new(InMemoryTaskRepository::new())).await
        }
        StorageBackend::Postgres {
            database_url,
            pool_size,
        } => {
            tracing::info!(pool_size, "connecting to PostgreSQL task store");
            let url = database_url.clone();
            let size = *pool_size;
            let pool = tokio::task::spawn_blocking(move || connect_pool(&url, size))
                .await
                .map_err(TaskRepositoryError::persistence)??;
            run_with(&config, Arc::new(PostgresTaskRepository::new(pool))).await
        }
    }
}

async fn run_with<R>(config: &AppConfig, repository: Arc<R>) -> Result<(), ServerError>
where
    R: TaskRepository + 'static,
{
    if config.seed_sample_tasks {
        let inserted = seed_sample_tasks(repository.as_ref()).await?;
        tracing::info!(inserted, "sample task seeding finished");
    }

    let app = http::build_app(repository)?;
    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;
    tracing::info!("task service listening on http://{address}");

    http::serve(listener, app, shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;
    tracing::info!("task service stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(err) => tracing::error!(error = %err, "failed to listen for Ctrl+C"),
    }
}
