//! Repository for the `verses` table.
//!
//! Approval transitions are single statements so the approval flag, the
//! approver reference, and the decision timestamp can never be observed in a
//! mutually inconsistent state, even when two approvers race (last write
//! wins; there is deliberately no optimistic locking).

use sqlx::types::Json;
use sqlx::PgPool;

use shloka_core::export::ExportFilter;
use shloka_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use shloka_core::types::DbId;

use crate::models::verse::{CreateVerse, UpdateVerse, Verse, VerseListFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, verse_key, sanskrit_text, unicode_text, transliteration, \
    translations, source_text_name, source_section, source_chapter, source_verse, \
    keywords, category, commentaries, created_by, approved, approved_by, approved_at, \
    created_at, updated_at";

/// Provides CRUD and moderation operations for verses.
pub struct VerseRepo;

impl VerseRepo {
    /// Insert a new verse, returning the created row. New verses are always
    /// pending.
    pub async fn create(pool: &PgPool, input: &CreateVerse) -> Result<Verse, sqlx::Error> {
        let query = format!(
            "INSERT INTO verses
                (verse_key, sanskrit_text, unicode_text, transliteration, translations,
                 source_text_name, source_section, source_chapter, source_verse,
                 keywords, category, commentaries, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Verse>(&query)
            .bind(&input.verse_key)
            .bind(&input.sanskrit_text)
            .bind(&input.unicode_text)
            .bind(&input.transliteration)
            .bind(Json(&input.translations))
            .bind(&input.source_text_name)
            .bind(&input.source_section)
            .bind(input.source_chapter)
            .bind(input.source_verse)
            .bind(input.keywords.as_ref().map(Json))
            .bind(&input.category)
            .bind(input.commentaries.as_ref().map(Json))
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a verse by its internal id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Verse>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM verses WHERE id = $1");
        sqlx::query_as::<_, Verse>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a verse by its external human-readable key.
    pub async fn find_by_key(pool: &PgPool, verse_key: &str) -> Result<Option<Verse>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM verses WHERE verse_key = $1");
        sqlx::query_as::<_, Verse>(&query)
            .bind(verse_key)
            .fetch_optional(pool)
            .await
    }

    /// General listing with optional status / creator / search filters,
    /// newest first.
    pub async fn list(pool: &PgPool, filter: &VerseListFilter) -> Result<Vec<Verse>, sqlx::Error> {
        let limit = clamp_limit(filter.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        let offset = clamp_offset(filter.offset);
        let pattern = filter.search.as_ref().map(|s| format!("%{s}%"));

        let query = format!(
            "SELECT {COLUMNS} FROM verses
             WHERE ($1::boolean IS NULL OR approved = $1)
               AND ($2::bigint IS NULL OR created_by = $2)
               AND ($3::text IS NULL
                    OR verse_key ILIKE $3
                    OR sanskrit_text ILIKE $3
                    OR source_text_name ILIKE $3
                    OR category ILIKE $3)
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Verse>(&query)
            .bind(filter.approved)
            .bind(filter.created_by)
            .bind(pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List pending verses for the review queue, newest first.
    ///
    /// The optional search matches the external key, the original text, and
    /// the source name (case-insensitive substring).
    pub async fn list_pending(
        pool: &PgPool,
        search: Option<&str>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Verse>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        let offset = clamp_offset(offset);
        let pattern = search.map(|s| format!("%{s}%"));

        let query = format!(
            "SELECT {COLUMNS} FROM verses
             WHERE approved = FALSE
               AND ($1::text IS NULL
                    OR verse_key ILIKE $1
                    OR sanskrit_text ILIKE $1
                    OR source_text_name ILIKE $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Verse>(&query)
            .bind(pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Approve a verse: one statement sets the flag, the approver, and the
    /// decision time together. Returns `None` if the id does not exist.
    pub async fn approve(
        pool: &PgPool,
        id: DbId,
        approver_id: DbId,
    ) -> Result<Option<Verse>, sqlx::Error> {
        let query = format!(
            "UPDATE verses
             SET approved = TRUE, approved_by = $2, approved_at = NOW(), updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Verse>(&query)
            .bind(id)
            .bind(approver_id)
            .fetch_optional(pool)
            .await
    }

    /// Reject a verse: clears the flag and the approver but SETS the
    /// decision timestamp to now.
    ///
    /// The timestamp records "last decision time", not "last approval
    /// time" -- an intentional asymmetry with the demotion in [`Self::update`],
    /// kept pending product confirmation.
    pub async fn reject(pool: &PgPool, id: DbId) -> Result<Option<Verse>, sqlx::Error> {
        let query = format!(
            "UPDATE verses
             SET approved = FALSE, approved_by = NULL, approved_at = NOW(), updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Verse>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Approve every listed id that is currently pending; missing or already
    /// approved ids are skipped. Returns the number actually transitioned.
    ///
    /// Each approval is an independent write: a failure mid-list leaves the
    /// earlier approvals committed.
    pub async fn bulk_approve(
        pool: &PgPool,
        ids: &[DbId],
        approver_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let mut approved = 0u64;
        for &id in ids {
            let result = sqlx::query(
                "UPDATE verses
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

    /// Update a verse. Only non-`None` fields in `input` are applied.
    ///
    /// When `demote` is true the same statement forces the entry back to
    /// pending: flag false, approver and decision time cleared, whatever the
    /// edit requested. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVerse,
        demote: bool,
    ) -> Result<Option<Verse>, sqlx::Error> {
        let query = format!(
            "UPDATE verses SET
                verse_key = COALESCE($2, verse_key),
                sanskrit_text = COALESCE($3, sanskrit_text),
                unicode_text = COALESCE($4, unicode_text),
                transliteration = COALESCE($5, transliteration),
                translations = COALESCE($6, translations),
                source_text_name = COALESCE($7, source_text_name),
                source_section = COALESCE($8, source_section),
                source_chapter = COALESCE($9, source_chapter),
                source_verse = COALESCE($10, source_verse),
                keywords = COALESCE($11, keywords),
                category = COALESCE($12, category),
                commentaries = COALESCE($13, commentaries),
                approved = CASE WHEN $14 THEN FALSE ELSE approved END,
                approved_by = CASE WHEN $14 THEN NULL ELSE approved_by END,
                approved_at = CASE WHEN $14 THEN NULL ELSE approved_at END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Verse>(&query)
            .bind(id)
            .bind(&input.verse_key)
            .bind(&input.sanskrit_text)
            .bind(&input.unicode_text)
            .bind(&input.transliteration)
            .bind(input.translations.as_ref().map(Json))
            .bind(&input.source_text_name)
            .bind(&input.source_section)
            .bind(input.source_chapter)
            .bind(input.source_verse)
            .bind(input.keywords.as_ref().map(Json))
            .bind(&input.category)
            .bind(input.commentaries.as_ref().map(Json))
            .bind(demote)
            .fetch_optional(pool)
            .await
    }

    /// Delete a verse. The foreign key cascades to its annotations.
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM verses WHERE id = $1")
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
    ) -> Result<Vec<Verse>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        let offset = clamp_offset(offset);

        let query = format!(
            "SELECT {COLUMNS} FROM verses
             WHERE approved = TRUE AND approved_by = $1
             ORDER BY approved_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Verse>(&query)
            .bind(approver_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Select verses for export in stored order. Approved-only unless the
    /// filter asks for pending too; source and category match exactly.
    pub async fn list_for_export(
        pool: &PgPool,
        filter: &ExportFilter,
    ) -> Result<Vec<Verse>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM verses
             WHERE ($1::boolean OR approved = TRUE)
               AND ($2::text IS NULL OR source_text_name = $2)
               AND ($3::text IS NULL OR category = $3)
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Verse>(&query)
            .bind(filter.include_pending)
            .bind(&filter.source_filter)
            .bind(&filter.category_filter)
            .fetch_all(pool)
            .await
    }

    /// Count verses in one approval state.
    pub async fn count_by_approval(pool: &PgPool, approved: bool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM verses WHERE approved = $1")
            .bind(approved)
            .fetch_one(pool)
            .await
    }

    /// Count all verses.
    pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM verses")
            .fetch_one(pool)
            .await
    }

    /// Distinct non-null source text names, for the export filter dropdown.
    pub async fn distinct_sources(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT source_text_name FROM verses ORDER BY source_text_name",
        )
        .fetch_all(pool)
        .await
    }

    /// Distinct non-null categories, for the export filter dropdown.
    pub async fn distinct_categories(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT category FROM verses WHERE category IS NOT NULL ORDER BY category",
        )
        .fetch_all(pool)
        .await
    }
}
