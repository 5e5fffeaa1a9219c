//! Handlers for the moderation workflow: pending queues, approve/reject,
//! bulk approval, approval history, and the approver dashboard.
//!
//! Every endpoint here requires approve-capability (admin or approver).
//! Re-approving an already-approved entry is a benign outcome: the stored
//! state is untouched and the response carries a warning instead of an
//! error.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use shloka_core::error::CoreError;
use shloka_core::moderation::already_approved_warning;
use shloka_core::pagination::DASHBOARD_PREVIEW_SIZE;
use shloka_core::types::DbId;
use shloka_db::models::annotation::AnnotationWithVerse;
use shloka_db::models::moderation::{BulkApproveRequest, BulkApproveResult, ModerationStats};
use shloka_db::models::verse::Verse;
use shloka_db::repositories::{AnnotationRepo, VerseRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireApprover;
use crate::query::PendingQueueParams;
use crate::response::{DataResponse, ModerationResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Dashboard payload: live counts plus the newest pending entries of each
/// type.
#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub stats: ModerationStats,
    pub pending_verses: Vec<Verse>,
    pub pending_annotations: Vec<AnnotationWithVerse>,
}

/// GET /api/v1/moderation/dashboard
///
/// Counts are recomputed on every view; there is no caching layer.
pub async fn dashboard(
    RequireApprover(_approver): RequireApprover,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let stats = ModerationStats {
        pending_verses: VerseRepo::count_by_approval(&state.pool, false).await?,
        pending_annotations: AnnotationRepo::count_by_approval(&state.pool, false).await?,
        approved_verses: VerseRepo::count_by_approval(&state.pool, true).await?,
        approved_annotations: AnnotationRepo::count_by_approval(&state.pool, true).await?,
    };

    let pending_verses =
        VerseRepo::list_pending(&state.pool, None, Some(DASHBOARD_PREVIEW_SIZE), None).await?;
    let pending_annotations =
        AnnotationRepo::list_pending(&state.pool, None, Some(DASHBOARD_PREVIEW_SIZE), None)
            .await?;

    Ok(Json(DataResponse {
        data: Dashboard {
            stats,
            pending_verses,
            pending_annotations,
        },
    }))
}

// ---------------------------------------------------------------------------
// Pending queues
// ---------------------------------------------------------------------------

/// GET /api/v1/moderation/verses/pending
///
/// Pending verses, newest first. `?search=` matches the external key, the
/// original text, and the source name.
pub async fn pending_verses(
    RequireApprover(_approver): RequireApprover,
    State(state): State<AppState>,
    Query(params): Query<PendingQueueParams>,
) -> AppResult<impl IntoResponse> {
    let verses = VerseRepo::list_pending(
        &state.pool,
        params.search.as_deref(),
        params.limit,
        params.offset,
    )
    .await?;
    Ok(Json(DataResponse { data: verses }))
}

/// GET /api/v1/moderation/annotations/pending
///
/// Pending Q&A pairs, newest first. `?search=` matches the question, the
/// answer, and the parent verse's external key.
pub async fn pending_annotations(
    RequireApprover(_approver): RequireApprover,
    State(state): State<AppState>,
    Query(params): Query<PendingQueueParams>,
) -> AppResult<impl IntoResponse> {
    let annotations = AnnotationRepo::list_pending(
        &state.pool,
        params.search.as_deref(),
        params.limit,
        params.offset,
    )
    .await?;
    Ok(Json(DataResponse { data: annotations }))
}

// ---------------------------------------------------------------------------
// Single approve / reject
// ---------------------------------------------------------------------------

/// POST /api/v1/moderation/verses/{id}/approve
///
/// Approve a pending verse. Approving an already-approved verse changes
/// nothing and reports a warning.
pub async fn approve_verse(
    RequireApprover(approver): RequireApprover,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let verse = VerseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Verse", id }))?;

    if verse.is_approved() {
        return Ok(Json(ModerationResponse {
            data: verse,
            warning: Some(already_approved_warning("Verse")),
        }));
    }

    let approved = VerseRepo::approve(&state.pool, id, approver.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Verse", id }))?;

    tracing::info!(
        user_id = approver.user_id,
        verse_id = id,
        "Verse approved"
    );

    Ok(Json(ModerationResponse {
        data: approved,
        warning: None,
    }))
}

/// POST /api/v1/moderation/verses/{id}/reject
///
/// Reject a verse unconditionally: the approval flag and approver are
/// cleared, and the decision timestamp is set to now.
pub async fn reject_verse(
    RequireApprover(approver): RequireApprover,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let verse = VerseRepo::reject(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Verse", id }))?;

    tracing::info!(
        user_id = approver.user_id,
        verse_id = id,
        "Verse rejected"
    );

    Ok(Json(DataResponse { data: verse }))
}

/// POST /api/v1/moderation/annotations/{id}/approve
pub async fn approve_annotation(
    RequireApprover(approver): RequireApprover,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let annotation = AnnotationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Annotation",
                id,
            })
        })?;

    if annotation.is_approved() {
        return Ok(Json(ModerationResponse {
            data: annotation,
            warning: Some(already_approved_warning("Q&A pair")),
        }));
    }

    let approved = AnnotationRepo::approve(&state.pool, id, approver.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Annotation",
                id,
            })
        })?;

    tracing::info!(
        user_id = approver.user_id,
        annotation_id = id,
        "Q&A pair approved"
    );

    Ok(Json(ModerationResponse {
        data: approved,
        warning: None,
    }))
}

/// POST /api/v1/moderation/annotations/{id}/reject
pub async fn reject_annotation(
    RequireApprover(approver): RequireApprover,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let annotation = AnnotationRepo::reject(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Annotation",
                id,
            })
        })?;

    tracing::info!(
        user_id = approver.user_id,
        annotation_id = id,
        "Q&A pair rejected"
    );

    Ok(Json(DataResponse { data: annotation }))
}

// ---------------------------------------------------------------------------
// Bulk approve
// ---------------------------------------------------------------------------

/// POST /api/v1/moderation/verses/bulk-approve
///
/// Approve every listed verse that is currently pending. Missing or
/// already-approved ids are skipped silently; the response reports how many
/// entries actually transitioned. Each approval is an independent write:
/// there is no transaction spanning the batch.
pub async fn bulk_approve_verses(
    RequireApprover(approver): RequireApprover,
    State(state): State<AppState>,
    Json(input): Json<BulkApproveRequest>,
) -> AppResult<impl IntoResponse> {
    if input.ids.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "ids must not be empty".into(),
        )));
    }

    let approved_count =
        VerseRepo::bulk_approve(&state.pool, &input.ids, approver.user_id).await?;

    tracing::info!(
        user_id = approver.user_id,
        requested = input.ids.len(),
        approved = approved_count,
        "Bulk verse approval"
    );

    Ok(Json(DataResponse {
        data: BulkApproveResult { approved_count },
    }))
}

/// POST /api/v1/moderation/annotations/bulk-approve
pub async fn bulk_approve_annotations(
    RequireApprover(approver): RequireApprover,
    State(state): State<AppState>,
    Json(input): Json<BulkApproveRequest>,
) -> AppResult<impl IntoResponse> {
    if input.ids.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "ids must not be empty".into(),
        )));
    }

    let approved_count =
        AnnotationRepo::bulk_approve(&state.pool, &input.ids, approver.user_id).await?;

    tracing::info!(
        user_id = approver.user_id,
        requested = input.ids.len(),
        approved = approved_count,
        "Bulk Q&A pair approval"
    );

    Ok(Json(DataResponse {
        data: BulkApproveResult { approved_count },
    }))
}

// ---------------------------------------------------------------------------
// Approval history
// ---------------------------------------------------------------------------

/// Query parameters for `GET /moderation/history`: each entity type pages
/// independently.
#[derive(Debug, Default, Deserialize)]
pub struct HistoryParams {
    pub verses_limit: Option<i64>,
    pub verses_offset: Option<i64>,
    pub annotations_limit: Option<i64>,
    pub annotations_offset: Option<i64>,
}

/// History payload: entries this approver published, newest decision first.
#[derive(Debug, Serialize)]
pub struct ApprovalHistory {
    pub verses: Vec<Verse>,
    pub annotations: Vec<AnnotationWithVerse>,
}

/// GET /api/v1/moderation/history
pub async fn history(
    RequireApprover(approver): RequireApprover,
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> AppResult<impl IntoResponse> {
    let verses = VerseRepo::history_for_approver(
        &state.pool,
        approver.user_id,
        params.verses_limit,
        params.verses_offset,
    )
    .await?;

    let annotations = AnnotationRepo::history_for_approver(
        &state.pool,
        approver.user_id,
        params.annotations_limit,
        params.annotations_offset,
    )
    .await?;

    Ok(Json(DataResponse {
        data: ApprovalHistory {
            verses,
            annotations,
        },
    }))
}
