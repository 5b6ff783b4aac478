//! postgraph CLI - users and posts over REST and GraphQL
//!
//! This is the process entry point:
//! - `serve` runs the HTTP/GraphQL server (port 3000 by default)
//! - `schema` prints the GraphQL SDL
//! - `user` seeds and lists users out of band

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "postgraph",
    author,
    version,
    about = "Users and posts over REST and GraphQL, backed by PostgreSQL"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server (REST post feed + GraphQL)
    Serve(commands::serve::ServeArgs),
    /// Print the GraphQL schema (SDL)
    Schema,
    /// Manage users (create, list)
    User(commands::user::UserArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before clap reads env fallbacks; a missing file is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Schema => commands::run_schema()?,
        Commands::User(args) => commands::run_user(args).await?,
    }
    Ok(())
}
