//! Command-line and environment configuration for the server.

use clap::{Parser, ValueEnum};
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

/// Storage backend selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageKind {
    /// Process-local store; contents vanish on restart.
    Memory,
    /// `PostgreSQL` table reached through a connection pool.
    Postgres,
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::Postgres => f.write_str("postgres"),
        }
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per line.
    Json,
}

/// Server configuration.
///
/// Every flag can also be supplied through the environment variable named in
/// its help text; a `.env` file is loaded before parsing.
#[derive(Debug, Clone, Parser)]
#[command(name = "taskhub", version, about = "Task tracking API server")]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to.
    #[arg(long, env = "TASKHUB_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Storage backend for tasks.
    #[arg(long, env = "TASKHUB_STORAGE", value_enum, default_value_t = StorageKind::Memory)]
    pub storage: StorageKind,

    /// `PostgreSQL` connection URL, required with `--storage postgres`.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum number of pooled database connections.
    #[arg(
        long,
        env = "TASKHUB_POOL_SIZE",
        default_value_t = 5,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub pool_size: u32,

    /// Seconds to wait for a free pooled connection.
    #[arg(long, env = "TASKHUB_POOL_TIMEOUT_SECS", default_value_t = 30)]
    pub pool_timeout_secs: u64,

    /// Log line format.
    #[arg(long, env = "TASKHUB_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Returns the pool checkout timeout.
    #[must_use]
    pub const fn pool_timeout(&self) -> Duration {
        Duration::from_secs(self.pool_timeout_secs)
    }
}
