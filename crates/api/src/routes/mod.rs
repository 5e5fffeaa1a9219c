pub mod admin;
pub mod annotations;
pub mod auth;
pub mod export;
pub mod health;
pub mod moderation;
pub mod tools;
pub mod verses;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                  login (public)
///
/// /admin/users                                 create user (admin only)
/// /admin/users/{id}/deactivate                 deactivate user
///
/// /verses                                      list, create
/// /verses/{id}                                 get, update, delete
/// /verses/{id}/annotations                     verse + its Q&A pairs
///
/// /annotations                                 list, create
/// /annotations/{id}                            get, update, delete
///
/// /moderation/dashboard                        counts + newest pending
/// /moderation/verses/pending                   pending verse queue
/// /moderation/verses/bulk-approve              bulk approve (POST)
/// /moderation/verses/{id}/approve              approve (POST)
/// /moderation/verses/{id}/reject               reject (POST)
/// /moderation/annotations/pending              pending Q&A queue
/// /moderation/annotations/bulk-approve         bulk approve (POST)
/// /moderation/annotations/{id}/approve         approve (POST)
/// /moderation/annotations/{id}/reject          reject (POST)
/// /moderation/history                          this approver's decisions
///
/// /export                                      corpus totals
/// /export/filters                              distinct sources/categories
/// /export/json                                 corpus document download
///
/// /tools/transliterate                         scheme conversion (POST)
/// /tools/unicode                               unicode-escape encoding (POST)
/// /tools/schemes                               supported schemes
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/admin", admin::router())
        .nest("/auth", auth::router())
        .nest("/verses", verses::router())
        .nest("/annotations", annotations::router())
        .nest("/moderation", moderation::router())
        .nest("/export", export::router())
        .nest("/tools", tools::router())
}
