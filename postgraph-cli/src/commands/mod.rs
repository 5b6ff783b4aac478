//! Command implementations for the postgraph CLI

pub mod schema;
pub mod serve;
pub mod user;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use postgraph_server::db::DEFAULT_MAX_CONNECTIONS;
use postgraph_server::{PgStore, SharedStore};

// Re-export dispatcher functions for flat access from main.rs
pub use schema::run_schema;
pub use serve::run_serve;
pub use user::run_user;

/// Database connection options shared by commands that touch PostgreSQL
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// Database URL (overrides .env)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum connections in the pool
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

impl DatabaseArgs {
    /// Connect and bootstrap the schema.
    pub async fn connect(&self) -> Result<SharedStore> {
        let database_url = self
            .database_url
            .as_deref()
            .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;

        let store = PgStore::connect(database_url, self.max_connections)
            .await
            .context("Failed to connect to database")?;

        Ok(Arc::new(store))
    }
}
