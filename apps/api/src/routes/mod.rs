pub mod health;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::accounts::handlers;
use crate::auth::require_admin;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/api/admin/list", get(handlers::handle_list))
        .route("/api/admin/add", post(handlers::handle_add))
        .route("/api/admin/remove", post(handlers::handle_remove))
        // Shared-secret gate; runs before any admin handler.
        .layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/", get(health::health_handler))
        .route("/api/check/:login", get(handlers::handle_check))
        .merge(admin_routes)
        // Static admin UI bundle; the API treats it as opaque files.
        .nest_service("/admin", ServeDir::new(&state.config.admin_ui_dir))
        .with_state(state)
}
