//! Route definitions for admin user management.

use axum::routing::post;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// ```text
/// POST   /users                    create_user
/// POST   /users/{id}/deactivate    deactivate_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", post(admin::create_user))
        .route("/users/{id}/deactivate", post(admin::deactivate_user))
}
