//! Table bootstrap for users and posts
//!
//! Idempotent `CREATE ... IF NOT EXISTS` statements run at startup. There is
//! no versioning; changing a table means dropping it by hand.

use sqlx::PgPool;

use super::DbError;

const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS posts (
        id TEXT PRIMARY KEY,
        text TEXT NOT NULL,
        user_id TEXT NOT NULL REFERENCES users(id),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS posts_user_id_idx ON posts (user_id)",
];

/// Create the users and posts tables if they are missing
pub async fn bootstrap(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Bootstrapping database schema...");

    for statement in STATEMENTS {
        sqlx::query(*statement).execute(pool).await?;
    }

    tracing::info!("Database schema ready");
    Ok(())
}
