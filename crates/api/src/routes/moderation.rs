//! Route definitions for the moderation workflow.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::moderation;
use crate::state::AppState;

/// ```text
/// GET    /dashboard                       dashboard
/// GET    /verses/pending                  pending_verses
/// POST   /verses/bulk-approve             bulk_approve_verses
/// POST   /verses/{id}/approve             approve_verse
/// POST   /verses/{id}/reject              reject_verse
/// GET    /annotations/pending             pending_annotations
/// POST   /annotations/bulk-approve        bulk_approve_annotations
/// POST   /annotations/{id}/approve        approve_annotation
/// POST   /annotations/{id}/reject         reject_annotation
/// GET    /history                         history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(moderation::dashboard))
        .route("/verses/pending", get(moderation::pending_verses))
        .route(
            "/verses/bulk-approve",
            post(moderation::bulk_approve_verses),
        )
        .route("/verses/{id}/approve", post(moderation::approve_verse))
        .route("/verses/{id}/reject", post(moderation::reject_verse))
        .route("/annotations/pending", get(moderation::pending_annotations))
        .route(
            "/annotations/bulk-approve",
            post(moderation::bulk_approve_annotations),
        )
        .route(
            "/annotations/{id}/approve",
            post(moderation::approve_annotation),
        )
        .route(
            "/annotations/{id}/reject",
            post(moderation::reject_annotation),
        )
        .route("/history", get(moderation::history))
}
