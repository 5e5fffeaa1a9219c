//! Route definitions for the script conversion tools.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::tools;
use crate::state::AppState;

/// ```text
/// POST   /transliterate    transliterate
/// POST   /unicode          unicode
/// GET    /schemes          schemes
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/transliterate", post(tools::transliterate))
        .route("/unicode", post(tools::unicode))
        .route("/schemes", get(tools::schemes))
}
