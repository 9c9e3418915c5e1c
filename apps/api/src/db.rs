use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::tier::DEFAULT_TIER;

pub type Db = Pool<Sqlite>;

/// Opens (creating if missing) the SQLite database at `path`.
pub async fn create_pool(path: &str) -> Result<Db> {
    info!("Opening SQLite database at {path}");

    if let Some(parent) = Path::new(path).parent() {
        // A bare filename has an empty parent; nothing to create then.
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{path}"))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        // Prevent transient "database is locked" errors under concurrent access.
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        // SQLite permits limited write concurrency; a single connection avoids
        // "database is locked" failures under axum concurrency at this scale.
        .max_connections(1)
        .connect_with(opts)
        .await?;

    Ok(pool)
}

/// Ordered, idempotent schema steps run once at startup, before the
/// listener binds. Any failure here aborts startup.
///
/// 1. Create the accounts table in its original (tier-less) shape.
/// 2. Add the `tier` column if an older database lacks it.
/// 3. Backfill NULL/blank tiers to the default.
/// 4. Index `tier`, only once the column is guaranteed to exist.
pub async fn run_migrations(pool: &Db) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS vip_accounts (
            login TEXT PRIMARY KEY,
            note  TEXT,
            created_at TEXT DEFAULT (datetime('now'))
        )",
    )
    .execute(pool)
    .await?;

    // SQLite has no ADD COLUMN IF NOT EXISTS, so check the table shape first.
    if !has_column(pool, "vip_accounts", "tier").await? {
        info!("Migrating schema: adding tier column to vip_accounts");
        sqlx::query(&format!(
            "ALTER TABLE vip_accounts ADD COLUMN tier TEXT NOT NULL DEFAULT '{DEFAULT_TIER}'"
        ))
        .execute(pool)
        .await?;
    }

    sqlx::query(&format!(
        "UPDATE vip_accounts SET tier = '{DEFAULT_TIER}' WHERE tier IS NULL OR TRIM(tier) = ''"
    ))
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_vip_accounts_tier ON vip_accounts (tier)")
        .execute(pool)
        .await?;

    info!("Database ready (tier enabled)");
    Ok(())
}

async fn has_column(pool: &Db, table: &str, column: &str) -> Result<bool> {
    // PRAGMA table_info rows: (cid, name, type, notnull, dflt_value, pk)
    let columns: Vec<(i32, String, String, i32, Option<String>, i32)> =
        sqlx::query_as(&format!("PRAGMA table_info({table})"))
            .fetch_all(pool)
            .await?;

    Ok(columns
        .iter()
        .any(|(_, name, _, _, _, _)| name.eq_ignore_ascii_case(column)))
}
