//! HTTP server bootstrap: configuration, storage selection and lifecycle.

mod config;
pub mod telemetry;

pub use config::{LogFormat, ServerConfig, StorageKind};

use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::task::{
    adapters::{
        http::task_router,
        memory::InMemoryTaskRepository,
        postgres::{PostgresTaskRepository, build_pool},
    },
    ports::{TaskRepository, TaskRepositoryError},
    services::TaskService,
};

/// Errors raised while starting or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// `PostgreSQL` storage was selected without a database URL.
    #[error("--database-url (or DATABASE_URL) is required for postgres storage")]
    MissingDatabaseUrl,

    /// The connection pool could not be built.
    #[error("failed to build the database connection pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    /// Schema bootstrap or another repository call failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// A blocking startup step was cancelled or panicked.
    #[error("startup task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// The listener could not bind its address.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address that was requested.
        addr: SocketAddr,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The server failed while accepting or serving connections.
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A global tracing subscriber was already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Telemetry(#[from] tracing_subscriber::util::TryInitError),
}

/// Builds the repository selected by `config`.
///
/// For `PostgreSQL` storage this establishes the pool and creates the
/// `tasks` table when it is missing.
///
/// # Errors
///
/// Returns [`ServerError`] when the database URL is missing, the pool cannot
/// connect, or the schema cannot be created.
pub async fn build_repository(
    config: &ServerConfig,
) -> Result<Arc<dyn TaskRepository>, ServerError> {
    match config.storage {
        StorageKind::Memory => {
            info!("using in-memory task storage");
            Ok(Arc::new(InMemoryTaskRepository::new()))
        }
        StorageKind::Postgres => {
            let database_url = config
                .database_url
                .clone()
                .ok_or(ServerError::MissingDatabaseUrl)?;
            let pool_size = config.pool_size;
            let pool_timeout = config.pool_timeout();
            let pool = tokio::task::spawn_blocking(move || {
                build_pool(&database_url, pool_size, pool_timeout)
            })
            .await??;

            let repository = PostgresTaskRepository::new(pool);
            repository.ensure_schema().await?;
            info!(pool_size, "using PostgreSQL task storage");
            Ok(Arc::new(repository))
        }
    }
}

/// Runs the HTTP server until a shutdown signal arrives.
///
/// # Errors
///
/// Returns [`ServerError`] when storage setup, binding or serving fails.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let repository = build_repository(&config).await?;
    let app = task_router(TaskService::new(repository));

    let listener = TcpListener::bind(config.bind)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.bind,
            source,
        })?;
    let local_addr = listener.local_addr()?;
    info!(%local_addr, storage = %config.storage, "taskhub listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("taskhub stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    info!("shutdown signal received");
}
