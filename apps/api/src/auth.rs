//! Admin authorization middleware.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::errors::AppError;
use crate::state::AppState;

/// Header carrying the shared admin secret.
pub const ADMIN_SECRET_HEADER: &str = "x-admin-secret";

/// Rejects any request whose `x-admin-secret` header does not exactly match
/// the configured secret. Layered over the admin routes only, so the gate
/// runs before any handler logic.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let supplied = req
        .headers()
        .get(ADMIN_SECRET_HEADER)
        .and_then(|v| v.to_str().ok());

    match supplied {
        Some(secret) if secret == state.config.admin_secret => Ok(next.run(req).await),
        _ => Err(AppError::Unauthorized),
    }
}
