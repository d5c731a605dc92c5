//! Schema migrations
//!
//! SQL files live in `crates/duck-db/migrations` and are applied at startup
//! with the sqlx runtime migrator. `MIGRATIONS_DIR` overrides the location for
//! deployments that ship the files elsewhere.

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::PgPool;
use std::path::PathBuf;
use tracing::info;

/// Directory holding the migration files
pub fn migrations_dir() -> PathBuf {
    std::env::var_os("MIGRATIONS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations"))
}

/// Apply all pending migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    let dir = migrations_dir();
    let migrator = Migrator::new(dir.clone()).await?;
    migrator.run(pool).await?;
    info!(dir = %dir.display(), "Database migrations applied");
    Ok(())
}
