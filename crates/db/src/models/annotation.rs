//! Q&A annotation entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use shloka_core::change_detection::{AnnotationContent, AnnotationPatch};
use shloka_core::types::{DbId, Timestamp};

/// A row from the `annotations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Annotation {
    pub id: DbId,
    /// Owning verse. Immutable after creation; to re-target, delete and
    /// recreate.
    pub verse_id: DbId,
    pub question: String,
    pub answer: String,
    pub context: Option<String>,
    pub keywords: Option<Json<Vec<String>>>,
    pub created_by: DbId,
    pub approved: bool,
    pub approved_by: Option<DbId>,
    pub approved_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Annotation {
    pub fn is_approved(&self) -> bool {
        self.approved
    }

    /// Significant-field snapshot for change detection.
    pub fn content(&self) -> AnnotationContent<'_> {
        AnnotationContent {
            question: &self.question,
            answer: &self.answer,
            context: self.context.as_deref(),
            keywords: self.keywords.as_ref().map(|k| k.0.as_slice()),
        }
    }
}

/// An annotation row joined with its parent verse's external key, used in
/// pending-queue listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AnnotationWithVerse {
    pub id: DbId,
    pub verse_id: DbId,
    pub verse_key: String,
    pub question: String,
    pub answer: String,
    pub context: Option<String>,
    pub keywords: Option<Json<Vec<String>>>,
    pub created_by: DbId,
    pub approved: bool,
    pub approved_by: Option<DbId>,
    pub approved_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new annotation. Always inserted as pending.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAnnotation {
    pub verse_id: DbId,
    pub question: String,
    pub answer: String,
    pub context: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub created_by: DbId,
}

/// DTO for updating an existing annotation. Only non-`None` fields are
/// applied; the owning verse cannot be changed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAnnotation {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub context: Option<String>,
    pub keywords: Option<Vec<String>>,
}

impl UpdateAnnotation {
    /// Significant-field view of this patch for change detection.
    pub fn patch(&self) -> AnnotationPatch<'_> {
        AnnotationPatch {
            question: self.question.as_deref(),
            answer: self.answer.as_deref(),
            context: self.context.as_deref(),
            keywords: self.keywords.as_deref(),
        }
    }
}

/// Filter options for the general annotation listing.
#[derive(Debug, Clone, Default)]
pub struct AnnotationListFilter {
    pub verse_id: Option<DbId>,
    pub approved: Option<bool>,
    pub created_by: Option<DbId>,
    /// Case-insensitive substring over question, answer, and context.
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
