//! Verse entity model and DTOs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use shloka_core::change_detection::{VerseContent, VersePatch};
use shloka_core::types::{DbId, Timestamp};

/// A row from the `verses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Verse {
    pub id: DbId,
    /// External human-readable id, e.g. `CS_SUT_25.40`. Unique.
    pub verse_key: String,
    pub sanskrit_text: String,
    /// Derived Unicode-escape form of `sanskrit_text`.
    pub unicode_text: Option<String>,
    /// Derived phonetic (IAST) transliteration of `sanskrit_text`.
    pub transliteration: Option<String>,
    /// Language code -> translation text. `hindi` and `english` always present.
    pub translations: Json<BTreeMap<String, String>>,
    pub source_text_name: String,
    pub source_section: String,
    pub source_chapter: i32,
    pub source_verse: i32,
    pub keywords: Option<Json<Vec<String>>>,
    pub category: Option<String>,
    pub commentaries: Option<Json<Vec<String>>>,
    pub created_by: DbId,
    pub approved: bool,
    pub approved_by: Option<DbId>,
    pub approved_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Verse {
    pub fn is_approved(&self) -> bool {
        self.approved
    }

    /// Human-readable citation, e.g. `Charaka Samhita Sutrasthana 25.40`.
    pub fn citation(&self) -> String {
        format!(
            "{} {} {}.{}",
            self.source_text_name, self.source_section, self.source_chapter, self.source_verse
        )
    }

    /// Significant-field snapshot for change detection.
    pub fn content(&self) -> VerseContent<'_> {
        VerseContent {
            sanskrit_text: &self.sanskrit_text,
            translations: &self.translations.0,
            source_text_name: &self.source_text_name,
            source_section: &self.source_section,
            source_chapter: self.source_chapter,
            source_verse: self.source_verse,
        }
    }
}

/// DTO for creating a new verse. Always inserted as pending.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVerse {
    pub verse_key: String,
    pub sanskrit_text: String,
    pub unicode_text: Option<String>,
    pub transliteration: Option<String>,
    pub translations: BTreeMap<String, String>,
    pub source_text_name: String,
    pub source_section: String,
    pub source_chapter: i32,
    pub source_verse: i32,
    pub keywords: Option<Vec<String>>,
    pub category: Option<String>,
    pub commentaries: Option<Vec<String>>,
    pub created_by: DbId,
}

/// DTO for updating an existing verse. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateVerse {
    pub verse_key: Option<String>,
    pub sanskrit_text: Option<String>,
    pub unicode_text: Option<String>,
    pub transliteration: Option<String>,
    pub translations: Option<BTreeMap<String, String>>,
    pub source_text_name: Option<String>,
    pub source_section: Option<String>,
    pub source_chapter: Option<i32>,
    pub source_verse: Option<i32>,
    pub keywords: Option<Vec<String>>,
    pub category: Option<String>,
    pub commentaries: Option<Vec<String>>,
}

impl UpdateVerse {
    /// Significant-field view of this patch for change detection.
    pub fn patch(&self) -> VersePatch<'_> {
        VersePatch {
            sanskrit_text: self.sanskrit_text.as_deref(),
            translations: self.translations.as_ref(),
            source_text_name: self.source_text_name.as_deref(),
            source_section: self.source_section.as_deref(),
            source_chapter: self.source_chapter,
            source_verse: self.source_verse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_verse() -> Verse {
        let now = chrono::Utc::now();
        Verse {
            id: 1,
            verse_key: "CS_SUT_25.40".to_string(),
            sanskrit_text: "हिताहितं सुखं दुःखम्".to_string(),
            unicode_text: None,
            transliteration: None,
            translations: Json(BTreeMap::from([
                ("hindi".to_string(), "ह".to_string()),
                ("english".to_string(), "e".to_string()),
            ])),
            source_text_name: "Charaka Samhita".to_string(),
            source_section: "Sutrasthana".to_string(),
            source_chapter: 25,
            source_verse: 40,
            keywords: None,
            category: None,
            commentaries: None,
            created_by: 7,
            approved: false,
            approved_by: None,
            approved_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_citation_format() {
        assert_eq!(
            sample_verse().citation(),
            "Charaka Samhita Sutrasthana 25.40"
        );
    }

    #[test]
    fn test_content_snapshot_reflects_row() {
        let verse = sample_verse();
        let content = verse.content();
        assert_eq!(content.sanskrit_text, verse.sanskrit_text);
        assert_eq!(content.source_chapter, 25);
        assert_eq!(content.translations.get("hindi").unwrap(), "ह");
    }
}

/// Filter options for the general verse listing.
#[derive(Debug, Clone, Default)]
pub struct VerseListFilter {
    /// Restrict to a single approval state.
    pub approved: Option<bool>,
    /// Restrict to entries created by this user.
    pub created_by: Option<DbId>,
    /// Case-insensitive substring over key, text, source name, and category.
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
