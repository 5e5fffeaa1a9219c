//! Export document shaping.
//!
//! The export pipeline emits one JSON document containing the approved
//! corpus: one record per verse, each joined with its approved Q&A pairs.
//! This module owns the record types, the filter validation, and the
//! document rendering; the repository layer supplies the rows.
//!
//! Approver identities, decision timestamps, and internal ids never appear
//! in the document.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Validated export filter options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportFilter {
    /// Include pending verses as well. Never affects Q&A pairs, which are
    /// exported only when approved.
    pub include_pending: bool,
    /// Exact match on the verse's source text name.
    pub source_filter: Option<String>,
    /// Exact match on the verse's category.
    pub category_filter: Option<String>,
}

impl ExportFilter {
    /// Validate raw query parameters.
    ///
    /// `include_pending` accepts `true`/`false`/`1`/`0`; anything else fails
    /// validation before any query executes. Empty filter strings count as
    /// absent.
    pub fn from_params(
        include_pending: Option<&str>,
        source_filter: Option<String>,
        category_filter: Option<String>,
    ) -> Result<Self, CoreError> {
        let include_pending = match include_pending {
            None => false,
            Some("true") | Some("1") => true,
            Some("false") | Some("0") => false,
            Some(other) => {
                return Err(CoreError::Validation(format!(
                    "Invalid include_pending value '{other}'. Must be a boolean"
                )))
            }
        };

        Ok(Self {
            include_pending,
            source_filter: source_filter.filter(|s| !s.is_empty()),
            category_filter: category_filter.filter(|s| !s.is_empty()),
        })
    }
}

/// One export record per verse.
#[derive(Debug, Clone, Serialize)]
pub struct ExportRecord {
    /// The external human-readable verse id, e.g. `CS_SUT_25.40`.
    pub id: String,
    pub sanskrit_shloka: String,
    pub unicode: Option<String>,
    pub transliteration: Option<String>,
    /// Language code -> translation text.
    pub translations: BTreeMap<String, String>,
    pub metadata: ExportMetadata,
    pub qa_pairs: Vec<QaPairExport>,
    /// The first non-empty context string among the verse's approved Q&A
    /// pairs, in stored order. A single value by design, even when several
    /// pairs carry contexts.
    pub context: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    pub source: ExportSource,
    pub keywords: Option<Vec<String>>,
    pub category: Option<String>,
    pub commentaries: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportSource {
    pub text_name: String,
    pub section: String,
    pub chapter: i32,
    pub verse: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct QaPairExport {
    pub question: String,
    pub answer: String,
    pub keywords: Option<Vec<String>>,
}

/// Pick the context value for a record: the first non-empty entry.
pub fn first_non_empty_context<'a, I>(contexts: I) -> Option<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    contexts
        .into_iter()
        .flatten()
        .find(|c| !c.is_empty())
        .map(str::to_string)
}

/// Timestamped export filename, distinct per invocation.
pub fn export_filename(now: Timestamp) -> String {
    format!("shloka_export_{}.json", now.format("%Y_%m_%d_%H%M%S"))
}

/// Render the full record list as one pretty-printed JSON document.
///
/// serde_json writes non-ASCII characters literally and does not escape
/// path separators, which the consumers of this corpus rely on.
pub fn render_document(records: &[ExportRecord]) -> Result<String, CoreError> {
    serde_json::to_string_pretty(records)
        .map_err(|e| CoreError::Internal(format!("Failed to serialize export document: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_record() -> ExportRecord {
        ExportRecord {
            id: "CS_SUT_25.40".to_string(),
            sanskrit_shloka: "धर्मक्षेत्रे कुरुक्षेत्रे".to_string(),
            unicode: Some("derived".to_string()),
            transliteration: Some("dharmakṣetre".to_string()),
            translations: BTreeMap::from([
                ("hindi".to_string(), "हिंदी".to_string()),
                ("english".to_string(), "english".to_string()),
            ]),
            metadata: ExportMetadata {
                source: ExportSource {
                    text_name: "Charaka Samhita".to_string(),
                    section: "Sutrasthana".to_string(),
                    chapter: 25,
                    verse: 40,
                },
                keywords: Some(vec!["dharma".to_string()]),
                category: None,
                commentaries: None,
            },
            qa_pairs: vec![QaPairExport {
                question: "Q".to_string(),
                answer: "A".to_string(),
                keywords: None,
            }],
            context: None,
        }
    }

    #[test]
    fn test_filter_defaults() {
        let filter = ExportFilter::from_params(None, None, None).unwrap();
        assert_eq!(filter, ExportFilter::default());
        assert!(!filter.include_pending);
    }

    #[test]
    fn test_filter_accepts_boolean_spellings() {
        for value in ["true", "1"] {
            let filter = ExportFilter::from_params(Some(value), None, None).unwrap();
            assert!(filter.include_pending);
        }
        for value in ["false", "0"] {
            let filter = ExportFilter::from_params(Some(value), None, None).unwrap();
            assert!(!filter.include_pending);
        }
    }

    #[test]
    fn test_filter_rejects_non_boolean() {
        let result = ExportFilter::from_params(Some("yes"), None, None);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("include_pending"));
    }

    #[test]
    fn test_empty_filter_strings_count_as_absent() {
        let filter =
            ExportFilter::from_params(None, Some(String::new()), Some(String::new())).unwrap();
        assert_eq!(filter.source_filter, None);
        assert_eq!(filter.category_filter, None);
    }

    #[test]
    fn test_first_non_empty_context_skips_null_and_empty() {
        let contexts = vec![None, Some(""), Some("battlefield"), Some("later")];
        assert_eq!(
            first_non_empty_context(contexts),
            Some("battlefield".to_string())
        );
    }

    #[test]
    fn test_no_context_yields_none() {
        assert_eq!(first_non_empty_context(vec![None, Some("")]), None);
    }

    #[test]
    fn test_filename_uses_invocation_timestamp() {
        let now = chrono::Utc.with_ymd_and_hms(2026, 8, 7, 14, 30, 5).unwrap();
        assert_eq!(export_filename(now), "shloka_export_2026_08_07_143005.json");
    }

    #[test]
    fn test_empty_corpus_renders_empty_list() {
        assert_eq!(render_document(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_document_shape() {
        let doc = render_document(&[sample_record()]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&doc).unwrap();
        let record = &parsed[0];

        assert_eq!(record["id"], "CS_SUT_25.40");
        assert_eq!(record["metadata"]["source"]["chapter"], 25);
        assert_eq!(record["qa_pairs"][0]["question"], "Q");
        assert!(record["context"].is_null());
        // No moderation internals in the document.
        assert!(record.get("approved").is_none());
        assert!(record.get("approved_by").is_none());
    }

    #[test]
    fn test_non_ascii_is_written_literally() {
        let doc = render_document(&[sample_record()]).unwrap();
        assert!(doc.contains("धर्मक्षेत्रे"));
        assert!(doc.contains("हिंदी"));
        assert!(!doc.contains("\\u09"));
    }
}
