//! Repository for the `annotations` table.

use sqlx::types::Json;
use sqlx::PgPool;

use shloka_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use shloka_core::types::DbId;

use crate::models::annotation::{
    Annotation, AnnotationListFilter, AnnotationWithVerse, CreateAnnotation, UpdateAnnotation,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, verse_id, question, answer, context, keywords, created_by, \
    approved, approved_by, approved_at, created_at, updated_at";

/// Column list for queries joining the parent verse (aliased `a` / `v`).
const JOINED_COLUMNS: &str = "a.id, a.verse_id, v.verse_key, a.question, a.answer, \
    a.context, a.keywords, a.created_by, a.approved, a.approved_by, a.approved_at, \
    a.created_at, a.updated_at";

/// Provides CRUD and moderation operations for Q&A annotations.
pub struct AnnotationRepo;

impl AnnotationRepo {
    /// Insert a new annotation, returning the created row. New annotations
    /// are always pending.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAnnotation,
    ) -> Result<Annotation, sqlx::Error> {
        let query = format!(
            "INSERT INTO annotations (verse_id, question, answer, context, keywords, created_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(input.verse_id)
            .bind(&input.question)
            .bind(&input.answer)
            .bind(&input.context)
            .bind(input.keywords.as_ref().map(Json))
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find an annotation by its internal id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Annotation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM annotations WHERE id = $1");
        sqlx::query_as::<_, Annotation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// General listing with optional verse / status / creator / search
    /// filters, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &AnnotationListFilter,
    ) -> Result<Vec<Annotation>, sqlx::Error> {
        let limit = clamp_limit(filter.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        let offset = clamp_offset(filter.offset);
        let pattern = filter.search.as_ref().map(|s| format!("%{s}%"));

        let query = format!(
            "SELECT {COLUMNS} FROM annotations
             WHERE ($1::bigint IS NULL OR verse_id = $1)
               AND ($2::boolean IS NULL OR approved = $2)
               AND ($3::bigint IS NULL OR created_by = $3)
               AND ($4::text IS NULL
                    OR question ILIKE $4
                    OR answer ILIKE $4
                    OR context ILIKE $4)
             ORDER BY created_at DESC, id DESC
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(filter.verse_id)
            .bind(filter.approved)
            .bind(filter.created_by)
            .bind(pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// All annotations for one verse, oldest first (stored order).
    pub async fn list_for_verse(
        pool: &PgPool,
        verse_id: DbId,
    ) -> Result<Vec<Annotation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM annotations WHERE verse_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(verse_id)
            .fetch_all(pool)
            .await
    }

    /// List pending annotations for the review queue, newest first, joined
    /// with the parent verse key.
    ///
    /// The optional search matches the question, the answer, and the parent
    /// verse's external key (case-insensitive substring).
    pub async fn list_pending(
        pool: &PgPool,
        search: Option<&str>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<AnnotationWithVerse>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        let offset = clamp_offset(offset);
        let pattern = search.map(|s| format!("%{s}%"));

        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM annotations a
             JOIN verses v ON v.id = a.verse_id
             WHERE a.approved = FALSE
               AND ($1::text IS NULL
                    OR a.question ILIKE $1
                    OR a.answer ILIKE $1
                    OR v.verse_key ILIKE $1)
             ORDER BY a.created_at DESC, a.id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, AnnotationWithVerse>(&query)
            .bind(pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Approve an annotation. Returns `None` if the id does not exist.
    pub async fn approve(
        pool: &PgPool,
        id: DbId,
        approver_id: DbId,
    ) -> Result<Option<Annotation>, sqlx::Error> {
        let query = format!(
            "UPDATE annotations
             SET approved = TRUE, approved_by = $2, approved_at = NOW(), updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(id)
            .bind(approver_id)
            .fetch_optional(pool)
            .await
    }

    /// Reject an annotation: clears the flag and the approver but SETS the
    /// decision timestamp to now (same contract as `VerseRepo::reject`).
    pub async fn reject(pool: &PgPool, id: DbId) -> Result<Option<Annotation>, sqlx::Error> {
        let query = format!(
            "UPDATE annotations
             SET approved = FALSE, approved_by = NULL, approved_at = NOW(), updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Approve every listed id that is currently pending; missing or already
    /// approved ids are skipped. Returns the number actually transitioned.
    pub async fn bulk_approve(
        pool: &PgPool,
        ids: &[DbId],
        approver_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let mut approved = 0u64;
        for &id in ids {
            let result = sqlx::query(
                "UPDATE annotations
                 SET approved = TRUE, approved_by = $2, approved_at = NOW(), updated_at = NOW()
                 WHERE id = $1 AND approved = FALSE",
            )
            .bind(id)
            .bind(approver_id)
            .execute(pool)
            .await?;
            approved += result.rows_affected();
        }
        Ok(approved)
    }

    /// Update an annotation. Only non-`None` fields in `input` are applied;
    /// `demote` forces the entry back to pending in the same statement.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAnnotation,
        demote: bool,
    ) -> Result<Option<Annotation>, sqlx::Error> {
        let query = format!(
            "UPDATE annotations SET
                question = COALESCE($2, question),
                answer = COALESCE($3, answer),
                context = COALESCE($4, context),
                keywords = COALESCE($5, keywords),
                approved = CASE WHEN $6 THEN FALSE ELSE approved END,
                approved_by = CASE WHEN $6 THEN NULL ELSE approved_by END,
                approved_at = CASE WHEN $6 THEN NULL ELSE approved_at END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(id)
            .bind(&input.question)
            .bind(&input.answer)
            .bind(&input.context)
            .bind(input.keywords.as_ref().map(Json))
            .bind(demote)
            .fetch_optional(pool)
            .await
    }

    /// Delete an annotation. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM annotations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Approval history for one approver, newest decision first.
    pub async fn history_for_approver(
        pool: &PgPool,
        approver_id: DbId,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<AnnotationWithVerse>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        let offset = clamp_offset(offset);

        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM annotations a
             JOIN verses v ON v.id = a.verse_id
             WHERE a.approved = TRUE AND a.approved_by = $1
             ORDER BY a.approved_at DESC, a.id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, AnnotationWithVerse>(&query)
            .bind(approver_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Approved annotations for a set of verses, in stored order per verse.
    /// Used by the export pipeline; pending annotations never export.
    pub async fn list_approved_for_verses(
        pool: &PgPool,
        verse_ids: &[DbId],
    ) -> Result<Vec<Annotation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM annotations
             WHERE approved = TRUE AND verse_id = ANY($1)
             ORDER BY verse_id ASC, id ASC"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(verse_ids)
            .fetch_all(pool)
            .await
    }

    /// Count annotations in one approval state.
    pub async fn count_by_approval(pool: &PgPool, approved: bool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM annotations WHERE approved = $1")
            .bind(approved)
            .fetch_one(pool)
            .await
    }

    /// Count all annotations.
    pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM annotations")
            .fetch_one(pool)
            .await
    }
}
