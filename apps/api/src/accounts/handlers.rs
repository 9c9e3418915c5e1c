use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::accounts::store;
use crate::errors::AppError;
use crate::models::account::AccountRow;
use crate::state::AppState;
use crate::tier::{self, Tier, DEFAULT_TIER};

#[derive(Deserialize)]
pub struct CheckQuery {
    pub tier: Option<String>,
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum CheckResponse {
    #[serde(rename_all = "camelCase")]
    Decided {
        ok: bool,
        allowed: bool,
        login: String,
        user_tier: String,
        required_tier: String,
        user_rank: u8,
        required_rank: u8,
    },
    #[serde(rename_all = "camelCase")]
    NotFound {
        allowed: bool,
        reason: &'static str,
        login: String,
        required_tier: String,
    },
}

/// GET /api/check/:login
///
/// Public hierarchical tier check: allowed iff the account's rank meets the
/// required rank. An unknown login is a normal outcome, not an error.
pub async fn handle_check(
    State(state): State<AppState>,
    Path(login): Path<String>,
    Query(params): Query<CheckQuery>,
) -> Result<Json<CheckResponse>, AppError> {
    let login = login.trim().to_string();
    if login.is_empty() {
        return Err(AppError::Validation("Missing login".to_string()));
    }

    let required_raw = tier::normalize(params.tier.as_deref().unwrap_or(""));
    let required = if required_raw.is_empty() {
        DEFAULT_TIER
    } else {
        Tier::parse(&required_raw)
            .ok_or_else(|| AppError::Validation("Invalid required tier".to_string()))?
    };

    let row = match store::get_by_login(&state.db, &login).await? {
        Some(row) => row,
        None => {
            return Ok(Json(CheckResponse::NotFound {
                allowed: false,
                reason: "NOT_FOUND",
                login,
                required_tier: required.as_str().to_string(),
            }))
        }
    };

    // A stored tier outside the enumeration ranks 0 and fails every check.
    let user_tier = tier::normalize(&row.tier);
    let user_rank = tier::rank_of(&user_tier);
    let required_rank = required.rank();

    Ok(Json(CheckResponse::Decided {
        ok: true,
        allowed: user_rank >= required_rank,
        login,
        user_tier,
        required_tier: required.as_str().to_string(),
        user_rank,
        required_rank,
    }))
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub tier: Option<String>,
}

#[derive(Serialize)]
pub struct ListResponse {
    pub ok: bool,
    pub rows: Vec<AccountRow>,
}

/// GET /api/admin/list
///
/// Newest first; optional exact tier filter. A filter outside the
/// enumeration matches nothing rather than erroring.
pub async fn handle_list(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<ListResponse>, AppError> {
    let tier_q = tier::normalize(params.tier.as_deref().unwrap_or(""));

    let rows = if tier_q.is_empty() {
        store::list_all(&state.db).await?
    } else {
        store::list_by_tier(&state.db, &tier_q).await?
    };

    Ok(Json(ListResponse { ok: true, rows }))
}

#[derive(Deserialize)]
pub struct AddRequest {
    pub login: Option<String>,
    pub tier: Option<String>,
    pub note: Option<String>,
}

#[derive(Serialize)]
pub struct AddResponse {
    pub ok: bool,
    pub added: String,
    pub tier: String,
}

/// POST /api/admin/add
///
/// Upsert keyed by login: an existing account is fully replaced, including
/// its creation timestamp (re-add counts as re-registration).
pub async fn handle_add(
    State(state): State<AppState>,
    Json(req): Json<AddRequest>,
) -> Result<Json<AddResponse>, AppError> {
    let login = req.login.as_deref().unwrap_or("").trim().to_string();
    if login.is_empty() {
        return Err(AppError::Validation("Missing login".to_string()));
    }

    let tier_raw = tier::normalize(req.tier.as_deref().unwrap_or(""));
    let tier = if tier_raw.is_empty() {
        DEFAULT_TIER
    } else {
        Tier::parse(&tier_raw).ok_or_else(|| AppError::Validation("Invalid tier".to_string()))?
    };

    let note = req.note.as_deref().unwrap_or("").trim().to_string();

    store::upsert(&state.db, &login, tier.as_str(), &note).await?;

    Ok(Json(AddResponse {
        ok: true,
        added: login,
        tier: tier.as_str().to_string(),
    }))
}

#[derive(Deserialize)]
pub struct RemoveRequest {
    pub login: Option<String>,
}

#[derive(Serialize)]
pub struct RemoveResponse {
    pub ok: bool,
    pub removed: String,
}

/// POST /api/admin/remove
///
/// Idempotent: removing an absent login still reports success.
pub async fn handle_remove(
    State(state): State<AppState>,
    Json(req): Json<RemoveRequest>,
) -> Result<Json<RemoveResponse>, AppError> {
    let login = req.login.as_deref().unwrap_or("").trim().to_string();
    if login.is_empty() {
        return Err(AppError::Validation("Missing login".to_string()));
    }

    store::remove(&state.db, &login).await?;

    Ok(Json(RemoveResponse { ok: true, removed: login }))
}
