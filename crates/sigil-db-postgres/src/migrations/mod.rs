//! Database migration management.
//!
//! Migrations are embedded in the binary at compile time and applied
//! synchronously at startup, before the service accepts traffic. A failed
//! migration is fatal: the process must not serve requests against a schema
//! it does not understand.

use std::borrow::Cow;

use sqlx_core::migrate::{Migration, MigrationType, Migrator};
use sqlx_postgres::PgPool;
use tracing::{info, instrument};

use crate::error::{PostgresError, Result};

/// Macro to define embedded migrations at compile time.
///
/// Usage: add new migrations here in chronological order.
/// Each migration is a tuple of (version, description, sql_path).
macro_rules! embedded_migrations {
    () => {
        &[
            (
                20260110000001i64,
                "create_users",
                include_str!("../../migrations/20260110000001_create_users.sql"),
            ),
            (
                20260110000002i64,
                "create_verification_tokens",
                include_str!("../../migrations/20260110000002_create_verification_tokens.sql"),
            ),
        ]
    };
}

/// Builds a vector of Migration structs from embedded migration data.
fn build_migrations() -> Vec<Migration> {
    embedded_migrations!()
        .iter()
        .map(|(version, description, sql)| Migration {
            version: *version,
            description: Cow::Borrowed(description),
            migration_type: MigrationType::Simple,
            sql: Cow::Borrowed(sql),
            checksum: Cow::Borrowed(&[]), // Empty checksum for embedded migrations
            no_tx: false,                 // Run in transaction
        })
        .collect()
}

/// Runs all pending database migrations.
///
/// Applied migrations are tracked in the `_sqlx_migrations` table and
/// executed in version order; each runs inside a transaction.
///
/// # Errors
///
/// Returns an error if a migration fails to execute.
#[instrument(skip(pool))]
pub async fn run(pool: &PgPool) -> Result<()> {
    let migrations = build_migrations();
    info!(count = migrations.len(), "Running database migrations");

    let migrator = Migrator {
        migrations: Cow::Owned(migrations),
        ignore_missing: false,
        locking: true,
        no_tx: false,
    };

    migrator
        .run(pool)
        .await
        .map_err(|e| PostgresError::Migration(format!("Migration failed: {e}")))?;

    info!("Database migrations completed successfully");

    Ok(())
}
