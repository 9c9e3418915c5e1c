use crate::db::Db;
use crate::models::account::AccountRow;

pub async fn get_by_login(db: &Db, login: &str) -> Result<Option<AccountRow>, sqlx::Error> {
    sqlx::query_as("SELECT login, tier, note, created_at FROM vip_accounts WHERE login = ?")
        .bind(login)
        .fetch_optional(db)
        .await
}

pub async fn list_all(db: &Db) -> Result<Vec<AccountRow>, sqlx::Error> {
    sqlx::query_as(
        "SELECT login, tier, note, created_at FROM vip_accounts ORDER BY created_at DESC",
    )
    .fetch_all(db)
    .await
}

/// `tier` must already be normalized (uppercase).
pub async fn list_by_tier(db: &Db, tier: &str) -> Result<Vec<AccountRow>, sqlx::Error> {
    sqlx::query_as(
        "SELECT login, tier, note, created_at FROM vip_accounts
         WHERE UPPER(tier) = ? ORDER BY created_at DESC",
    )
    .bind(tier)
    .fetch_all(db)
    .await
}

/// Insert-or-replace keyed by login. REPLACE rewrites the whole row, so
/// `created_at` falls back to the column default and is reset on re-add.
pub async fn upsert(db: &Db, login: &str, tier: &str, note: &str) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT OR REPLACE INTO vip_accounts (login, tier, note) VALUES (?, ?, ?)")
        .bind(login)
        .bind(tier)
        .bind(note)
        .execute(db)
        .await?;
    Ok(())
}

/// Deleting an absent login is a no-op.
pub async fn remove(db: &Db, login: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM vip_accounts WHERE login = ?")
        .bind(login)
        .execute(db)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::run_migrations;
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use std::str::FromStr;

    async fn test_db() -> Db {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(SqliteConnectOptions::from_str("sqlite::memory:").unwrap())
            .await
            .unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    async fn pin_created_at(db: &Db, login: &str, ts: &str) {
        sqlx::query("UPDATE vip_accounts SET created_at = ? WHERE login = ?")
            .bind(ts)
            .bind(login)
            .execute(db)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_upsert_and_get_round_trip() {
        let db = test_db().await;
        upsert(&db, "alice", "VIP", "trading desk").await.unwrap();

        let row = get_by_login(&db, "alice").await.unwrap().unwrap();
        assert_eq!(row.login, "alice");
        assert_eq!(row.tier, "VIP");
        assert_eq!(row.note.as_deref(), Some("trading desk"));
    }

    #[tokio::test]
    async fn test_get_unknown_login_is_none() {
        let db = test_db().await;
        assert!(get_by_login(&db, "nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing_row() {
        let db = test_db().await;
        upsert(&db, "alice", "VIP", "first").await.unwrap();
        upsert(&db, "alice", "ELITE", "second").await.unwrap();

        let row = get_by_login(&db, "alice").await.unwrap().unwrap();
        assert_eq!(row.tier, "ELITE");
        assert_eq!(row.note.as_deref(), Some("second"));
        assert_eq!(list_all(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_all_orders_newest_first() {
        let db = test_db().await;
        for login in ["first", "second", "third"] {
            upsert(&db, login, "VIP", "").await.unwrap();
        }
        pin_created_at(&db, "first", "2026-01-01 00:00:00").await;
        pin_created_at(&db, "second", "2026-01-02 00:00:00").await;
        pin_created_at(&db, "third", "2026-01-03 00:00:00").await;

        let logins: Vec<String> = list_all(&db)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.login)
            .collect();
        assert_eq!(logins, ["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_list_by_tier_filters_exactly() {
        let db = test_db().await;
        upsert(&db, "alice", "VIP", "").await.unwrap();
        upsert(&db, "bob", "MASTER", "").await.unwrap();
        upsert(&db, "carol", "VIP", "").await.unwrap();

        let vips = list_by_tier(&db, "VIP").await.unwrap();
        assert_eq!(vips.len(), 2);
        assert!(vips.iter().all(|r| r.tier == "VIP"));

        assert!(list_by_tier(&db, "ELITE").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let db = test_db().await;
        upsert(&db, "alice", "VIP", "").await.unwrap();

        remove(&db, "alice").await.unwrap();
        assert!(get_by_login(&db, "alice").await.unwrap().is_none());

        // Second delete of the same login is still Ok.
        remove(&db, "alice").await.unwrap();
    }
}
