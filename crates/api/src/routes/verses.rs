//! Route definitions for the verses resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::verses;
use crate::state::AppState;

/// ```text
/// GET    /                    list_verses
/// POST   /                    create_verse
/// GET    /{id}                get_verse
/// PUT    /{id}                update_verse
/// DELETE /{id}                delete_verse
/// GET    /{id}/annotations    list_verse_annotations
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(verses::list_verses).post(verses::create_verse))
        .route(
            "/{id}",
            get(verses::get_verse)
                .put(verses::update_verse)
                .delete(verses::delete_verse),
        )
        .route("/{id}/annotations", get(verses::list_verse_annotations))
}
