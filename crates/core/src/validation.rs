//! Field validation shared by the verse and annotation write paths.
//!
//! Validation failures carry field-level messages and are raised before any
//! write occurs. Uniqueness of the external verse key is left to the
//! database constraint; the API layer maps that violation to a conflict.

use std::collections::BTreeMap;

use crate::error::CoreError;

/// Maximum length for the external verse key and source name fields.
pub const MAX_KEY_LENGTH: usize = 255;

/// Translation languages required on every verse.
pub const REQUIRED_TRANSLATION_LANGS: &[&str] = &["hindi", "english"];

/// Validate a required, non-blank text field.
pub fn validate_required_text(field: &'static str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Validate the external verse key (required, bounded length).
pub fn validate_verse_key(key: &str) -> Result<(), CoreError> {
    validate_required_text("verse_key", key)?;
    if key.len() > MAX_KEY_LENGTH {
        return Err(CoreError::Validation(format!(
            "verse_key exceeds maximum length of {MAX_KEY_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate the translations map: `hindi` and `english` entries must be
/// present and non-empty. Additional languages are allowed.
pub fn validate_translations(translations: &BTreeMap<String, String>) -> Result<(), CoreError> {
    for lang in REQUIRED_TRANSLATION_LANGS {
        match translations.get(*lang) {
            Some(text) if !text.trim().is_empty() => {}
            _ => {
                return Err(CoreError::Validation(format!(
                    "translations.{lang} is required"
                )))
            }
        }
    }

    Ok(())
}

/// Validate the numeric citation fields (both must be positive).
pub fn validate_citation_numbers(chapter: i32, verse: i32) -> Result<(), CoreError> {
    if chapter < 1 {
        return Err(CoreError::Validation(
            "source_chapter must be a positive integer".to_string(),
        ));
    }
    if verse < 1 {
        return Err(CoreError::Validation(
            "source_verse must be a positive integer".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translations(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_required_text_rejects_blank() {
        assert!(validate_required_text("question", "").is_err());
        assert!(validate_required_text("question", "   ").is_err());
        assert!(validate_required_text("question", "What is dharma?").is_ok());
    }

    #[test]
    fn test_verse_key_length_bound() {
        assert!(validate_verse_key("CS_SUT_25.40").is_ok());
        let long = "x".repeat(MAX_KEY_LENGTH + 1);
        let result = validate_verse_key(&long);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("maximum length"));
    }

    #[test]
    fn test_translations_require_hindi_and_english() {
        assert!(validate_translations(&translations(&[("hindi", "ह"), ("english", "e")])).is_ok());

        let missing_english = validate_translations(&translations(&[("hindi", "ह")]));
        assert!(missing_english.is_err());
        assert!(missing_english
            .unwrap_err()
            .to_string()
            .contains("translations.english"));

        let empty_hindi =
            validate_translations(&translations(&[("hindi", ""), ("english", "e")]));
        assert!(empty_hindi.is_err());
    }

    #[test]
    fn test_translations_allow_extra_languages() {
        let value = translations(&[("hindi", "ह"), ("english", "e"), ("german", "g")]);
        assert!(validate_translations(&value).is_ok());
    }

    #[test]
    fn test_citation_numbers_must_be_positive() {
        assert!(validate_citation_numbers(25, 40).is_ok());
        assert!(validate_citation_numbers(0, 40).is_err());
        assert!(validate_citation_numbers(25, 0).is_err());
        assert!(validate_citation_numbers(-1, -1).is_err());
    }
}
