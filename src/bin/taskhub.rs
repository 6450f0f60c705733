//! Taskhub HTTP server.
//!
//! Usage:
//!
//! ```text
//! taskhub [--bind 0.0.0.0:8080] [--storage memory|postgres] [--database-url URL]
//! ```
//!
//! Every flag also reads an environment variable (see `taskhub --help`), and
//! a `.env` file in the working directory is loaded first when present.

use clap::Parser;
use taskhub::server::{self, ServerConfig, telemetry};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let env_file = dotenvy::dotenv();
    let config = ServerConfig::parse();
    telemetry::init_tracing(config.log_format)?;

    if let Err(err) = env_file
        && !err.not_found()
    {
        tracing::warn!(error = %err, "ignoring unreadable .env file");
    }

    server::run(config).await?;
    Ok(())
}
