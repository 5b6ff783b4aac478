//! HTTP server command
//!
//! Builds the store, hands it to the server, and closes it on shutdown.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use postgraph_server::{run_server, MemoryStore, ServerConfig, SharedStore};

use super::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "POSTGRAPH_BIND", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    #[command(flatten)]
    pub db: DatabaseArgs,

    /// Serve from an in-memory store instead of PostgreSQL (data is lost on exit)
    #[arg(long)]
    pub in_memory: bool,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Do not serve GraphiQL on GET /graphql
    #[arg(long)]
    pub no_graphiql: bool,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let store: SharedStore = if args.in_memory {
        tracing::warn!("Using in-memory store - data is lost on shutdown");
        Arc::new(MemoryStore::new())
    } else {
        args.db.connect().await?
    };

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        graphiql: !args.no_graphiql,
        request_timeout: Duration::from_secs(args.timeout),
    };

    tracing::info!("Starting postgraph server on {}", args.bind);

    // Run server (blocks until shutdown)
    run_server(store, config).await.context("Server error")?;

    Ok(())
}
