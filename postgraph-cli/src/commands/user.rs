//! Out-of-band user management
//!
//! The HTTP surface never creates users; this is how they get into the
//! database before posts can reference them.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use postgraph_server::db::UserInclude;
use postgraph_server::models::{NewUser, RecordId, UserName};

use super::DatabaseArgs;

#[derive(Parser, Debug)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Create a user and print it as JSON
    Create {
        /// Display name
        #[arg(long)]
        name: String,

        /// Explicit id (a UUID is generated when omitted)
        #[arg(long)]
        id: Option<String>,

        #[command(flatten)]
        db: DatabaseArgs,
    },
    /// List users with their posts as JSON
    List {
        #[command(flatten)]
        db: DatabaseArgs,
    },
}

pub async fn run_user(args: UserArgs) -> Result<()> {
    match args.command {
        UserCommand::Create { name, id, db } => {
            // Validate before touching the database
            let new = NewUser {
                id: id.as_deref().map(|id| RecordId::new("id", id)).transpose()?,
                name: UserName::new(&name)?,
            };

            let store = db.connect().await?;
            let created = store.create_user(new).await;
            store.close().await;

            let user = created.context("Failed to create user")?;
            tracing::info!(user_id = %user.id, "User created");
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        UserCommand::List { db } => {
            let store = db.connect().await?;
            let listed = store.find_users(UserInclude { posts: true }).await;
            store.close().await;

            let users = listed.context("Failed to list users")?;
            println!("{}", serde_json::to_string_pretty(&users)?);
        }
    }
    Ok(())
}
