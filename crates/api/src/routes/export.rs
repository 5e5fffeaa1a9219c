//! Route definitions for the export pipeline.

use axum::routing::get;
use axum::Router;

use crate::handlers::export;
use crate::state::AppState;

/// ```text
/// GET    /            export_stats
/// GET    /filters     export_filters
/// GET    /json        export_json (file download)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(export::export_stats))
        .route("/filters", get(export::export_filters))
        .route("/json", get(export::export_json))
}
