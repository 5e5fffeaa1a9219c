//! Script transliteration with pluggable backends.
//!
//! Conversion between Indic script encodings is delegated to an ordered list
//! of [`TransliterationBackend`] strategies fixed at startup. Each backend is
//! asked in priority order; the hard-coded [`ManualTable`] is always appended
//! as the last resort. When no backend can map a request the engine returns
//! the input unchanged and emits a diagnostic — script conversion is a
//! best-effort utility and must never fail a user operation.

use serde::Serialize;

use crate::error::CoreError;
use crate::unicode::is_devanagari_char;

/// Supported transliteration schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scheme {
    Devanagari,
    Iast,
    HarvardKyoto,
    Itrans,
    Slp1,
    Velthuis,
}

/// All valid scheme names accepted at the API boundary.
pub const VALID_SCHEME_NAMES: &[&str] =
    &["devanagari", "iast", "hk", "itrans", "slp1", "velthuis"];

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Devanagari => "devanagari",
            Self::Iast => "iast",
            Self::HarvardKyoto => "hk",
            Self::Itrans => "itrans",
            Self::Slp1 => "slp1",
            Self::Velthuis => "velthuis",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "devanagari" => Ok(Self::Devanagari),
            "iast" => Ok(Self::Iast),
            "hk" => Ok(Self::HarvardKyoto),
            "itrans" => Ok(Self::Itrans),
            "slp1" => Ok(Self::Slp1),
            "velthuis" => Ok(Self::Velthuis),
            other => Err(CoreError::Validation(format!(
                "Unknown transliteration scheme '{other}'. Must be one of: {}",
                VALID_SCHEME_NAMES.join(", ")
            ))),
        }
    }

    /// Human-readable label for scheme listings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Devanagari => "Devanagari",
            Self::Iast => "IAST",
            Self::HarvardKyoto => "Harvard-Kyoto",
            Self::Itrans => "ITRANS",
            Self::Slp1 => "SLP1",
            Self::Velthuis => "Velthuis",
        }
    }
}

/// A transliteration strategy.
///
/// Returns `None` when the backend cannot map the requested scheme pair;
/// the engine then falls through to the next backend in priority order.
pub trait TransliterationBackend: Send + Sync {
    fn name(&self) -> &'static str;

    fn transliterate(&self, text: &str, from: Scheme, to: Scheme) -> Option<String>;
}

/// Last-resort backend: a fixed Devanagari → IAST character table.
///
/// Each character is mapped independently (consonants carry their inherent
/// `a`), so conjuncts and vowel signs are approximated rather than resolved.
/// Good enough for a readable phonetic rendering, by no means a full
/// transliterator.
pub struct ManualTable;

impl TransliterationBackend for ManualTable {
    fn name(&self) -> &'static str {
        "manual-table"
    }

    fn transliterate(&self, text: &str, from: Scheme, to: Scheme) -> Option<String> {
        if from != Scheme::Devanagari || to != Scheme::Iast {
            return None;
        }
        Some(text.chars().map(map_char).collect())
    }
}

/// Map a single Devanagari character to its IAST rendering.
///
/// Unmapped characters pass through unchanged.
fn map_char(ch: char) -> String {
    let mapped = match ch {
        // Independent vowels
        'अ' => "a",
        'आ' => "ā",
        'इ' => "i",
        'ई' => "ī",
        'उ' => "u",
        'ऊ' => "ū",
        'ऋ' => "ṛ",
        'ॠ' => "ṝ",
        'ऌ' => "ḷ",
        'ॡ' => "ḹ",
        'ए' => "e",
        'ऐ' => "ai",
        'ओ' => "o",
        'औ' => "au",

        // Consonants (inherent a)
        'क' => "ka",
        'ख' => "kha",
        'ग' => "ga",
        'घ' => "gha",
        'ङ' => "ṅa",
        'च' => "ca",
        'छ' => "cha",
        'ज' => "ja",
        'झ' => "jha",
        'ञ' => "ña",
        'ट' => "ṭa",
        'ठ' => "ṭha",
        'ड' => "ḍa",
        'ढ' => "ḍha",
        'ण' => "ṇa",
        'त' => "ta",
        'थ' => "tha",
        'द' => "da",
        'ध' => "dha",
        'न' => "na",
        'प' => "pa",
        'फ' => "pha",
        'ब' => "ba",
        'भ' => "bha",
        'म' => "ma",
        'य' => "ya",
        'र' => "ra",
        'ल' => "la",
        'व' => "va",
        'श' => "śa",
        'ष' => "ṣa",
        'स' => "sa",
        'ह' => "ha",

        // Dependent vowel signs
        'ा' => "ā",
        'ि' => "i",
        'ी' => "ī",
        'ु' => "u",
        'ू' => "ū",
        'ृ' => "ṛ",
        'ॄ' => "ṝ",
        'ॢ' => "ḷ",
        'ॣ' => "ḹ",
        'े' => "e",
        'ै' => "ai",
        'ो' => "o",
        'ौ' => "au",

        // Signs
        'ं' => "ṃ",
        'ः' => "ḥ",
        '्' => "",
        'ॐ' => "oṃ",
        '।' => ".",

        _ => return ch.to_string(),
    };
    mapped.to_string()
}

/// Ordered chain of transliteration strategies.
pub struct TransliterationEngine {
    backends: Vec<Box<dyn TransliterationBackend>>,
}

impl TransliterationEngine {
    /// Build an engine trying `backends` in order, with [`ManualTable`]
    /// appended as the guaranteed last resort.
    pub fn new(mut backends: Vec<Box<dyn TransliterationBackend>>) -> Self {
        backends.push(Box::new(ManualTable));
        Self { backends }
    }

    /// Engine with only the built-in fallback table.
    pub fn with_defaults() -> Self {
        Self::new(Vec::new())
    }

    /// Convert `text` between schemes.
    ///
    /// Never fails: if no backend can map the pair, the input is returned
    /// unchanged and a diagnostic is logged for operators.
    pub fn transliterate(&self, text: &str, from: Scheme, to: Scheme) -> String {
        if from == to {
            return text.to_string();
        }

        for backend in &self.backends {
            if let Some(result) = backend.transliterate(text, from, to) {
                tracing::debug!(
                    backend = backend.name(),
                    from = from.as_str(),
                    to = to.as_str(),
                    "transliteration handled"
                );
                return result;
            }
        }

        tracing::warn!(
            from = from.as_str(),
            to = to.as_str(),
            "no transliteration backend could map request; returning input unchanged"
        );
        text.to_string()
    }

    pub fn devanagari_to_iast(&self, text: &str) -> String {
        self.transliterate(text, Scheme::Devanagari, Scheme::Iast)
    }

    pub fn iast_to_devanagari(&self, text: &str) -> String {
        self.transliterate(text, Scheme::Iast, Scheme::Devanagari)
    }

    /// Detect the input script and convert to IAST.
    ///
    /// Text that is neither Devanagari nor Harvard-Kyoto is assumed to be
    /// IAST (or close enough) already.
    pub fn auto_to_iast(&self, text: &str) -> String {
        if is_devanagari(text) {
            self.devanagari_to_iast(text)
        } else if is_harvard_kyoto(text) {
            self.transliterate(text, Scheme::HarvardKyoto, Scheme::Iast)
        } else {
            text.to_string()
        }
    }
}

/// Does the text contain any Devanagari characters?
pub fn is_devanagari(text: &str) -> bool {
    text.chars().any(is_devanagari_char)
}

/// Uppercase letters characteristic of Harvard-Kyoto romanization.
const HK_MARKERS: &str = "AEIOURKLGHNGCJYNTDNPBMYRLVSH";

/// Rough heuristic: does the text look like Harvard-Kyoto romanization?
pub fn is_harvard_kyoto(text: &str) -> bool {
    text.chars().any(|c| HK_MARKERS.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_names_round_trip() {
        for name in VALID_SCHEME_NAMES {
            let scheme = Scheme::from_name(name).expect("valid scheme should parse");
            assert_eq!(scheme.as_str(), *name);
        }
    }

    #[test]
    fn test_unknown_scheme_rejected() {
        let result = Scheme::from_name("wx");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Unknown transliteration scheme"));
    }

    #[test]
    fn test_manual_table_maps_basic_consonants() {
        let engine = TransliterationEngine::with_defaults();
        assert_eq!(engine.devanagari_to_iast("धर्म"), "dharama");
        // Vowel signs are mapped independently of the preceding consonant's
        // inherent vowel, so the rendering is approximate.
        assert_eq!(engine.devanagari_to_iast("योग"), "yaoga");
    }

    #[test]
    fn test_manual_table_maps_signs() {
        let engine = TransliterationEngine::with_defaults();
        assert_eq!(engine.devanagari_to_iast("ॐ"), "oṃ");
        assert_eq!(engine.devanagari_to_iast("नमः"), "namaḥ");
    }

    #[test]
    fn test_unmapped_characters_pass_through() {
        let engine = TransliterationEngine::with_defaults();
        assert_eq!(engine.devanagari_to_iast("om 42"), "om 42");
    }

    #[test]
    fn test_unmappable_pair_returns_input_unchanged() {
        let engine = TransliterationEngine::with_defaults();
        // The manual table only covers devanagari -> iast.
        assert_eq!(engine.iast_to_devanagari("dharma"), "dharma");
        assert_eq!(
            engine.transliterate("rAmaH", Scheme::HarvardKyoto, Scheme::Slp1),
            "rAmaH"
        );
    }

    #[test]
    fn test_same_scheme_is_identity() {
        let engine = TransliterationEngine::with_defaults();
        assert_eq!(
            engine.transliterate("धर्म", Scheme::Devanagari, Scheme::Devanagari),
            "धर्म"
        );
    }

    #[test]
    fn test_higher_priority_backend_wins() {
        struct Upper;
        impl TransliterationBackend for Upper {
            fn name(&self) -> &'static str {
                "upper"
            }
            fn transliterate(&self, text: &str, _: Scheme, _: Scheme) -> Option<String> {
                Some(text.to_uppercase())
            }
        }

        let engine = TransliterationEngine::new(vec![Box::new(Upper)]);
        assert_eq!(
            engine.transliterate("rama", Scheme::Iast, Scheme::HarvardKyoto),
            "RAMA"
        );
    }

    #[test]
    fn test_script_detection() {
        assert!(is_devanagari("धर्म mixed"));
        assert!(!is_devanagari("dharma"));
        assert!(is_harvard_kyoto("rAmaH"));
        assert!(!is_harvard_kyoto("rama"));
    }

    #[test]
    fn test_auto_to_iast_detects_devanagari() {
        let engine = TransliterationEngine::with_defaults();
        assert_eq!(engine.auto_to_iast("नमः"), "namaḥ");
        // Plain lowercase latin is assumed to already be IAST.
        assert_eq!(engine.auto_to_iast("dharma"), "dharma");
    }
}
