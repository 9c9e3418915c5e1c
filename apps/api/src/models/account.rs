use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// One membership row, as stored.
///
/// `tier` stays a plain string here: databases that predate the tier
/// migration may carry values outside the enumeration, which rank as 0
/// at check time rather than failing to decode.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AccountRow {
    pub login: String,
    pub tier: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}
