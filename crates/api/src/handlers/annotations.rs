//! Handlers for the `/annotations` resource (Q&A pairs).
//!
//! An annotation belongs to exactly one verse for its whole life; changing
//! the target means deleting and recreating. Like verses, annotations are
//! created pending and are demoted back to pending when a significant field
//! of an approved entry changes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use shloka_core::change_detection::annotation_update_requires_rereview;
use shloka_core::error::CoreError;
use shloka_core::moderation::StatusFilter;
use shloka_core::roles;
use shloka_core::types::DbId;
use shloka_core::validation::validate_required_text;
use shloka_db::models::annotation::{
    Annotation, AnnotationListFilter, CreateAnnotation, UpdateAnnotation,
};
use shloka_db::repositories::AnnotationRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::verses::ensure_verse_exists;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAnnotationEditor;
use crate::query::{normalize_list, ListInput};
use crate::response::DataResponse;
use crate::state::AppState;

/// Load an annotation or fail with 404.
async fn ensure_annotation_exists(
    pool: &shloka_db::DbPool,
    id: DbId,
) -> Result<Annotation, AppError> {
    AnnotationRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Annotation",
                id,
            })
        })
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /annotations`.
#[derive(Debug, Default, Deserialize)]
pub struct AnnotationListParams {
    pub verse_id: Option<DbId>,
    /// `approved` or `pending`; absent means both.
    pub status: Option<String>,
    /// Restrict to the caller's own entries.
    #[serde(default)]
    pub mine: bool,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for `POST /annotations`.
#[derive(Debug, Deserialize)]
pub struct CreateAnnotationRequest {
    pub verse_id: DbId,
    pub question: String,
    pub answer: String,
    pub context: Option<String>,
    pub keywords: Option<ListInput>,
}

/// Request body for `PUT /annotations/{id}`. Absent fields keep stored
/// values; the owning verse cannot be changed.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAnnotationRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub context: Option<String>,
    pub keywords: Option<ListInput>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/annotations
///
/// List annotations with optional verse / status / ownership / search
/// filters, newest first.
pub async fn list_annotations(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<AnnotationListParams>,
) -> AppResult<impl IntoResponse> {
    let status = StatusFilter::parse(params.status.as_deref())?;

    let filter = AnnotationListFilter {
        verse_id: params.verse_id,
        approved: status.map(|s| s.approved_value()),
        created_by: params.mine.then_some(auth.user_id),
        search: params.search,
        limit: params.limit,
        offset: params.offset,
    };

    let annotations = AnnotationRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: annotations }))
}

/// GET /api/v1/annotations/{id}
pub async fn get_annotation(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let annotation = ensure_annotation_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: annotation }))
}

/// POST /api/v1/annotations
///
/// Create a Q&A pair against an existing verse. Requires annotation-entry
/// capability. The new pair is pending until an approver publishes it.
pub async fn create_annotation(
    RequireAnnotationEditor(user): RequireAnnotationEditor,
    State(state): State<AppState>,
    Json(input): Json<CreateAnnotationRequest>,
) -> AppResult<impl IntoResponse> {
    validate_required_text("question", &input.question)?;
    validate_required_text("answer", &input.answer)?;

    // The target verse must exist. Entry forms only offer approved verses,
    // but the API accepts any verse id.
    ensure_verse_exists(&state.pool, input.verse_id).await?;

    let create = CreateAnnotation {
        verse_id: input.verse_id,
        question: input.question,
        answer: input.answer,
        context: input.context.filter(|c| !c.is_empty()),
        keywords: normalize_list(input.keywords),
        created_by: user.user_id,
    };

    let annotation = AnnotationRepo::create(&state.pool, &create).await?;

    tracing::info!(
        user_id = user.user_id,
        annotation_id = annotation.id,
        verse_id = annotation.verse_id,
        "Q&A pair created (pending approval)"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: annotation })))
}

/// PUT /api/v1/annotations/{id}
///
/// Update a Q&A pair. Owners and admins only. Editing a significant field
/// on an approved pair demotes it back to pending in the same write.
pub async fn update_annotation(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAnnotationRequest>,
) -> AppResult<impl IntoResponse> {
    let annotation = ensure_annotation_exists(&state.pool, id).await?;

    if !roles::can_edit(auth.role, auth.user_id, annotation.created_by) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the creator or an admin may edit this Q&A pair".into(),
        )));
    }

    if let Some(question) = &input.question {
        validate_required_text("question", question)?;
    }
    if let Some(answer) = &input.answer {
        validate_required_text("answer", answer)?;
    }

    let update = UpdateAnnotation {
        question: input.question,
        answer: input.answer,
        context: input.context,
        keywords: normalize_list(input.keywords),
    };

    let demote = annotation.approved
        && annotation_update_requires_rereview(&annotation.content(), &update.patch());

    let updated = AnnotationRepo::update(&state.pool, id, &update, demote)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Annotation",
                id,
            })
        })?;

    if demote {
        tracing::info!(
            user_id = auth.user_id,
            annotation_id = id,
            "Approved Q&A pair edited; returned to pending for re-review"
        );
    }

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/annotations/{id}
///
/// Permanently delete a Q&A pair. The owning verse is unaffected.
pub async fn delete_annotation(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let annotation = ensure_annotation_exists(&state.pool, id).await?;

    if !roles::can_delete(auth.role, auth.user_id, annotation.created_by) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the creator or an admin may delete this Q&A pair".into(),
        )));
    }

    AnnotationRepo::delete(&state.pool, id).await?;

    tracing::info!(
        user_id = auth.user_id,
        annotation_id = id,
        "Q&A pair deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
