//! Change-detection policy for approved entries.
//!
//! An edit to an approved verse or annotation must send it back to review
//! when any "significant" field actually changes value. The repository layer
//! snapshots the stored row, pairs it with the incoming patch, and asks this
//! module whether the update must also demote the entry to pending.
//!
//! Patch fields use `Option`: `None` means "field not supplied, keep stored
//! value" and never triggers re-review. Comparison is by value, so supplying
//! a field with its current value is not a change.
//!
//! Significant fields:
//! - Verse: original text, translations map, and all four source citation
//!   fields. Category, keywords, commentaries, and the derived unicode /
//!   transliteration forms are not significant.
//! - Annotation: question, answer, context, keywords.

use std::collections::BTreeMap;

/// Stored significant fields of a verse.
#[derive(Debug)]
pub struct VerseContent<'a> {
    pub sanskrit_text: &'a str,
    pub translations: &'a BTreeMap<String, String>,
    pub source_text_name: &'a str,
    pub source_section: &'a str,
    pub source_chapter: i32,
    pub source_verse: i32,
}

/// Incoming significant fields of a verse update.
#[derive(Debug, Default)]
pub struct VersePatch<'a> {
    pub sanskrit_text: Option<&'a str>,
    pub translations: Option<&'a BTreeMap<String, String>>,
    pub source_text_name: Option<&'a str>,
    pub source_section: Option<&'a str>,
    pub source_chapter: Option<i32>,
    pub source_verse: Option<i32>,
}

/// Does applying `patch` to an approved verse require re-review?
pub fn verse_update_requires_rereview(current: &VerseContent, patch: &VersePatch) -> bool {
    differs(patch.sanskrit_text, current.sanskrit_text)
        || patch
            .translations
            .is_some_and(|t| t != current.translations)
        || differs(patch.source_text_name, current.source_text_name)
        || differs(patch.source_section, current.source_section)
        || patch
            .source_chapter
            .is_some_and(|c| c != current.source_chapter)
        || patch.source_verse.is_some_and(|v| v != current.source_verse)
}

/// Stored significant fields of an annotation.
#[derive(Debug)]
pub struct AnnotationContent<'a> {
    pub question: &'a str,
    pub answer: &'a str,
    pub context: Option<&'a str>,
    pub keywords: Option<&'a [String]>,
}

/// Incoming significant fields of an annotation update.
#[derive(Debug, Default)]
pub struct AnnotationPatch<'a> {
    pub question: Option<&'a str>,
    pub answer: Option<&'a str>,
    pub context: Option<&'a str>,
    pub keywords: Option<&'a [String]>,
}

/// Does applying `patch` to an approved annotation require re-review?
pub fn annotation_update_requires_rereview(
    current: &AnnotationContent,
    patch: &AnnotationPatch,
) -> bool {
    differs(patch.question, current.question)
        || differs(patch.answer, current.answer)
        || patch.context.is_some_and(|c| current.context != Some(c))
        || patch.keywords.is_some_and(|k| current.keywords != Some(k))
}

fn differs(patch: Option<&str>, current: &str) -> bool {
    patch.is_some_and(|p| p != current)
}
