//! Route definitions for the annotations resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::annotations;
use crate::state::AppState;

/// ```text
/// GET    /        list_annotations
/// POST   /        create_annotation
/// GET    /{id}    get_annotation
/// PUT    /{id}    update_annotation
/// DELETE /{id}    delete_annotation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(annotations::list_annotations).post(annotations::create_annotation),
        )
        .route(
            "/{id}",
            get(annotations::get_annotation)
                .put(annotations::update_annotation)
                .delete(annotations::delete_annotation),
        )
}
