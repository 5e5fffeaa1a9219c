//! Handlers for the export pipeline.
//!
//! `GET /export/json` assembles the approved corpus into a single JSON
//! document: approved verses (unless `include_pending=true`), each joined
//! with its approved Q&A pairs. The document is written to the export store,
//! streamed back as a download, and the stored copy is deleted right away --
//! exports are never retained.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use shloka_core::export::{
    export_filename, first_non_empty_context, render_document, ExportFilter, ExportMetadata,
    ExportRecord, ExportSource, QaPairExport,
};
use shloka_core::types::DbId;
use shloka_db::models::annotation::Annotation;
use shloka_db::models::moderation::{CorpusStats, ExportFilterOptions};
use shloka_db::models::verse::Verse;
use shloka_db::repositories::{AnnotationRepo, VerseRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Raw query parameters for `GET /export/json`; validated into an
/// [`ExportFilter`] before any query runs.
#[derive(Debug, Default, Deserialize)]
pub struct ExportJsonParams {
    pub include_pending: Option<String>,
    pub source_filter: Option<String>,
    pub category_filter: Option<String>,
}

/// GET /api/v1/export
///
/// Corpus totals shown on the export page. Admin only.
pub async fn export_stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let stats = CorpusStats {
        total_verses: VerseRepo::count_all(&state.pool).await?,
        approved_verses: VerseRepo::count_by_approval(&state.pool, true).await?,
        total_annotations: AnnotationRepo::count_all(&state.pool).await?,
        approved_annotations: AnnotationRepo::count_by_approval(&state.pool, true).await?,
    };

    Ok(Json(DataResponse { data: stats }))
}

/// GET /api/v1/export/filters
///
/// Distinct source names and categories for the export filter dropdowns.
pub async fn export_filters(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let options = ExportFilterOptions {
        sources: VerseRepo::distinct_sources(&state.pool).await?,
        categories: VerseRepo::distinct_categories(&state.pool).await?,
    };

    Ok(Json(DataResponse { data: options }))
}

/// GET /api/v1/export/json
///
/// Produce the corpus document and return it as a file download. An empty
/// selection yields a valid document containing an empty list.
pub async fn export_json(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ExportJsonParams>,
) -> AppResult<impl IntoResponse> {
    let filter = ExportFilter::from_params(
        params.include_pending.as_deref(),
        params.source_filter,
        params.category_filter,
    )?;

    let verses = VerseRepo::list_for_export(&state.pool, &filter).await?;

    let verse_ids: Vec<DbId> = verses.iter().map(|v| v.id).collect();
    let annotations = AnnotationRepo::list_approved_for_verses(&state.pool, &verse_ids).await?;

    let mut by_verse: HashMap<DbId, Vec<Annotation>> = HashMap::new();
    for annotation in annotations {
        by_verse.entry(annotation.verse_id).or_default().push(annotation);
    }

    let records: Vec<ExportRecord> = verses
        .into_iter()
        .map(|verse| {
            let qa = by_verse.remove(&verse.id).unwrap_or_default();
            build_record(verse, qa)
        })
        .collect();

    let document = render_document(&records)?;
    let filename = export_filename(chrono::Utc::now());

    // The document is a durable byproduct only for the duration of this
    // request: write it, serve the bytes, drop the stored copy.
    state
        .export_store
        .put(&filename, document.as_bytes())
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store export document: {e}")))?;

    let response = axum::response::Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header(
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        )
        .body(axum::body::Body::from(document))
        .map_err(|e| AppError::InternalError(format!("Failed to build export response: {e}")))?;

    if let Err(e) = state.export_store.delete(&filename).await {
        tracing::warn!(filename = %filename, error = %e, "Failed to delete export byproduct");
    }

    tracing::info!(
        user_id = admin.user_id,
        records = records.len(),
        filename = %filename,
        "Corpus exported"
    );

    Ok(response)
}

/// Shape one verse row plus its approved annotations into an export record.
fn build_record(verse: Verse, annotations: Vec<Annotation>) -> ExportRecord {
    let context =
        first_non_empty_context(annotations.iter().map(|a| a.context.as_deref()));

    let qa_pairs = annotations
        .into_iter()
        .map(|a| QaPairExport {
            question: a.question,
            answer: a.answer,
            keywords: a.keywords.map(|k| k.0),
        })
        .collect();

    ExportRecord {
        id: verse.verse_key,
        sanskrit_shloka: verse.sanskrit_text,
        unicode: verse.unicode_text,
        transliteration: verse.transliteration,
        translations: verse.translations.0,
        metadata: ExportMetadata {
            source: ExportSource {
                text_name: verse.source_text_name,
                section: verse.source_section,
                chapter: verse.source_chapter,
                verse: verse.source_verse,
            },
            keywords: verse.keywords.map(|k| k.0),
            category: verse.category,
            commentaries: verse.commentaries.map(|c| c.0),
        },
        qa_pairs,
        context,
    }
}
