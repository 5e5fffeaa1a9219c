//! Handlers for the `/verses` resource.
//!
//! Verses are created pending and stay publishable only while untouched:
//! any edit to a significant field sends an approved verse back to the
//! review queue (see `shloka_core::change_detection`).

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use shloka_core::change_detection::verse_update_requires_rereview;
use shloka_core::error::CoreError;
use shloka_core::moderation::StatusFilter;
use shloka_core::roles;
use shloka_core::types::DbId;
use shloka_core::unicode::to_unicode_escape;
use shloka_core::validation::{
    validate_citation_numbers, validate_required_text, validate_translations, validate_verse_key,
};
use shloka_db::models::annotation::Annotation;
use shloka_db::models::verse::{CreateVerse, UpdateVerse, Verse, VerseListFilter};
use shloka_db::repositories::{AnnotationRepo, VerseRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireVerseEditor;
use crate::query::{normalize_list, ListInput};
use crate::response::DataResponse;
use crate::state::AppState;

/// Load a verse or fail with 404.
pub async fn ensure_verse_exists(
    pool: &shloka_db::DbPool,
    id: DbId,
) -> Result<Verse, AppError> {
    VerseRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Verse", id }))
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /verses`.
#[derive(Debug, Default, Deserialize)]
pub struct VerseListParams {
    /// `approved` or `pending`; absent means both.
    pub status: Option<String>,
    /// Restrict to the caller's own entries.
    #[serde(default)]
    pub mine: bool,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for `POST /verses`.
#[derive(Debug, Deserialize)]
pub struct CreateVerseRequest {
    pub verse_key: String,
    pub sanskrit_text: String,
    /// Derived from `sanskrit_text` when absent or empty.
    pub unicode_text: Option<String>,
    /// Derived from `sanskrit_text` when absent or empty.
    pub transliteration: Option<String>,
    pub translations: BTreeMap<String, String>,
    pub source_text_name: String,
    pub source_section: String,
    pub source_chapter: i32,
    pub source_verse: i32,
    pub keywords: Option<ListInput>,
    pub category: Option<String>,
    pub commentaries: Option<ListInput>,
}

/// Request body for `PUT /verses/{id}`. Absent fields keep stored values.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateVerseRequest {
    pub verse_key: Option<String>,
    pub sanskrit_text: Option<String>,
    pub unicode_text: Option<String>,
    pub transliteration: Option<String>,
    pub translations: Option<BTreeMap<String, String>>,
    pub source_text_name: Option<String>,
    pub source_section: Option<String>,
    pub source_chapter: Option<i32>,
    pub source_verse: Option<i32>,
    pub keywords: Option<ListInput>,
    pub category: Option<String>,
    pub commentaries: Option<ListInput>,
}

/// Response body for `GET /verses/{id}/annotations`.
#[derive(Debug, Serialize)]
pub struct VerseAnnotations {
    pub verse: Verse,
    pub qa_pairs: Vec<Annotation>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/verses
///
/// List verses with optional status / ownership / search filters, newest
/// first.
pub async fn list_verses(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<VerseListParams>,
) -> AppResult<impl IntoResponse> {
    let status = StatusFilter::parse(params.status.as_deref())?;

    let filter = VerseListFilter {
        approved: status.map(|s| s.approved_value()),
        created_by: params.mine.then_some(auth.user_id),
        search: params.search,
        limit: params.limit,
        offset: params.offset,
    };

    let verses = VerseRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: verses }))
}

/// GET /api/v1/verses/{id}
pub async fn get_verse(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let verse = ensure_verse_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: verse }))
}

/// POST /api/v1/verses
///
/// Create a verse. Requires verse-entry capability. The new verse is
/// pending until an approver publishes it.
pub async fn create_verse(
    RequireVerseEditor(user): RequireVerseEditor,
    State(state): State<AppState>,
    Json(input): Json<CreateVerseRequest>,
) -> AppResult<impl IntoResponse> {
    validate_verse_key(&input.verse_key)?;
    validate_required_text("sanskrit_text", &input.sanskrit_text)?;
    validate_translations(&input.translations)?;
    validate_required_text("source_text_name", &input.source_text_name)?;
    validate_required_text("source_section", &input.source_section)?;
    validate_citation_numbers(input.source_chapter, input.source_verse)?;

    // Derive the unicode and transliteration forms unless the contributor
    // supplied non-empty values.
    let unicode_text = match input.unicode_text.filter(|s| !s.is_empty()) {
        Some(value) => value,
        None => to_unicode_escape(&input.sanskrit_text),
    };
    let transliteration = match input.transliteration.filter(|s| !s.is_empty()) {
        Some(value) => value,
        None => state.transliterator.devanagari_to_iast(&input.sanskrit_text),
    };

    let create = CreateVerse {
        verse_key: input.verse_key,
        sanskrit_text: input.sanskrit_text,
        unicode_text: Some(unicode_text),
        transliteration: Some(transliteration),
        translations: input.translations,
        source_text_name: input.source_text_name,
        source_section: input.source_section,
        source_chapter: input.source_chapter,
        source_verse: input.source_verse,
        keywords: normalize_list(input.keywords),
        category: input.category.filter(|c| !c.is_empty()),
        commentaries: normalize_list(input.commentaries),
        created_by: user.user_id,
    };

    let verse = VerseRepo::create(&state.pool, &create).await?;

    tracing::info!(
        user_id = user.user_id,
        verse_id = verse.id,
        verse_key = %verse.verse_key,
        "Verse created (pending approval)"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: verse })))
}

/// PUT /api/v1/verses/{id}
///
/// Update a verse. Owners and admins only. Editing a significant field on
/// an approved verse demotes it back to pending in the same write,
/// regardless of the payload.
pub async fn update_verse(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateVerseRequest>,
) -> AppResult<impl IntoResponse> {
    let verse = ensure_verse_exists(&state.pool, id).await?;

    if !roles::can_edit(auth.role, auth.user_id, verse.created_by) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the creator or an admin may edit this verse".into(),
        )));
    }

    if let Some(key) = &input.verse_key {
        validate_verse_key(key)?;
    }
    if let Some(text) = &input.sanskrit_text {
        validate_required_text("sanskrit_text", text)?;
    }
    if let Some(translations) = &input.translations {
        validate_translations(translations)?;
    }
    if let Some(name) = &input.source_text_name {
        validate_required_text("source_text_name", name)?;
    }
    if let Some(section) = &input.source_section {
        validate_required_text("source_section", section)?;
    }
    validate_citation_numbers(
        input.source_chapter.unwrap_or(verse.source_chapter),
        input.source_verse.unwrap_or(verse.source_verse),
    )?;

    let mut update = UpdateVerse {
        verse_key: input.verse_key,
        sanskrit_text: input.sanskrit_text,
        unicode_text: input.unicode_text,
        transliteration: input.transliteration,
        translations: input.translations,
        source_text_name: input.source_text_name,
        source_section: input.source_section,
        source_chapter: input.source_chapter,
        source_verse: input.source_verse,
        keywords: normalize_list(input.keywords),
        category: input.category,
        commentaries: normalize_list(input.commentaries),
    };

    // Re-derive the unicode and transliteration forms when the original
    // text changes and the edit did not supply explicit values.
    if let Some(new_text) = update.sanskrit_text.clone() {
        if new_text != verse.sanskrit_text {
            if update.unicode_text.as_deref().is_none_or(str::is_empty) {
                update.unicode_text = Some(to_unicode_escape(&new_text));
            }
            if update.transliteration.as_deref().is_none_or(str::is_empty) {
                update.transliteration =
                    Some(state.transliterator.devanagari_to_iast(&new_text));
            }
        }
    }

    let demote = verse.approved && verse_update_requires_rereview(&verse.content(), &update.patch());

    let updated = VerseRepo::update(&state.pool, id, &update, demote)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Verse", id }))?;

    if demote {
        tracing::info!(
            user_id = auth.user_id,
            verse_id = id,
            "Approved verse edited; returned to pending for re-review"
        );
    }

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/verses/{id}
///
/// Permanently delete a verse and, by cascade, all of its annotations.
pub async fn delete_verse(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let verse = ensure_verse_exists(&state.pool, id).await?;

    if !roles::can_delete(auth.role, auth.user_id, verse.created_by) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the creator or an admin may delete this verse".into(),
        )));
    }

    VerseRepo::delete(&state.pool, id).await?;

    tracing::info!(user_id = auth.user_id, verse_id = id, "Verse deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/verses/{id}/annotations
///
/// The verse together with all of its Q&A pairs, approved or not, in stored
/// order. Used by the annotation entry form.
pub async fn list_verse_annotations(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let verse = ensure_verse_exists(&state.pool, id).await?;
    let qa_pairs = AnnotationRepo::list_for_verse(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: VerseAnnotations { verse, qa_pairs },
    }))
}
