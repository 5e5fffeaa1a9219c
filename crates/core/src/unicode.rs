//! Unicode-escape encoding for Devanagari text.
//!
//! The corpus stores a derived `\uXXXX` escape form of every verse so
//! downstream consumers without UTF-8-safe tooling can still carry the text.
//! ASCII passes through untouched; everything else becomes a four-hex-digit
//! escape. Codepoints above the BMP are written as UTF-16 surrogate pairs so
//! the form stays uniformly four digits wide (Devanagari itself is entirely
//! within U+0900..U+097F).

use std::fmt::Write as _;
use std::sync::OnceLock;

use regex::Regex;

/// First codepoint of the Devanagari block.
pub const DEVANAGARI_BLOCK_START: u32 = 0x0900;

/// Last codepoint of the Devanagari block.
pub const DEVANAGARI_BLOCK_END: u32 = 0x097F;

fn escape_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\\u[0-9a-fA-F]{4}").expect("static regex"))
}

/// Encode text into the Unicode-escape form.
///
/// ASCII characters are passed through literally; every other character is
/// written as one or two `\uXXXX` sequences (two for surrogate pairs).
pub fn to_unicode_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if (ch as u32) <= 0x7F {
            out.push(ch);
        } else {
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(out, "\\u{unit:04x}").expect("writing to String cannot fail");
            }
        }
    }
    out
}

/// Decode `\uXXXX` escape sequences back into text.
///
/// Surrogate pairs are recombined; an unpaired surrogate decodes to U+FFFD.
/// Anything that is not a well-formed escape passes through literally.
pub fn from_unicode_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find("\\u") {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        match take_escape(rest) {
            Some((unit, consumed)) => {
                rest = &rest[consumed..];
                if (0xD800..=0xDBFF).contains(&unit) {
                    // High surrogate: a following escape may complete the pair.
                    match take_escape(rest) {
                        Some((low, low_consumed)) if (0xDC00..=0xDFFF).contains(&low) => {
                            rest = &rest[low_consumed..];
                            let combined = 0x10000
                                + ((unit as u32 - 0xD800) << 10)
                                + (low as u32 - 0xDC00);
                            out.push(char::from_u32(combined).unwrap_or('\u{FFFD}'));
                        }
                        _ => out.push('\u{FFFD}'),
                    }
                } else if (0xDC00..=0xDFFF).contains(&unit) {
                    out.push('\u{FFFD}');
                } else {
                    out.push(char::from_u32(unit as u32).unwrap_or('\u{FFFD}'));
                }
            }
            None => {
                // "\u" not followed by four hex digits: literal text.
                out.push_str("\\u");
                rest = &rest[2..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Parse a leading `\uXXXX` sequence, returning the code unit and the number
/// of bytes consumed.
fn take_escape(text: &str) -> Option<(u16, usize)> {
    let hex = text.strip_prefix("\\u")?.get(..4)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(hex, 16).ok().map(|unit| (unit, 6))
}

/// Does the text contain any `\uXXXX` escape sequences?
pub fn has_unicode_escapes(text: &str) -> bool {
    escape_pattern().is_match(text)
}

/// Is this codepoint inside the Devanagari block?
pub fn is_devanagari_char(ch: char) -> bool {
    (DEVANAGARI_BLOCK_START..=DEVANAGARI_BLOCK_END).contains(&(ch as u32))
}

/// Diagnostic information about a single character.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CharInfo {
    pub character: char,
    pub codepoint: u32,
    pub hex: String,
    pub unicode_escape: String,
    pub is_devanagari: bool,
}

/// Describe a character's codepoint and escape form.
pub fn char_info(ch: char) -> CharInfo {
    CharInfo {
        character: ch,
        codepoint: ch as u32,
        hex: format!("{:x}", ch as u32),
        unicode_escape: to_unicode_escape(&ch.to_string()),
        is_devanagari: is_devanagari_char(ch),
    }
}

/// Strip zero-width characters (U+200B..U+200D, U+FEFF) and trim whitespace.
pub fn normalize_text(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(*c as u32, 0x200B..=0x200D | 0xFEFF))
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passes_through_unchanged() {
        assert_eq!(to_unicode_escape("hello 123"), "hello 123");
    }

    #[test]
    fn test_devanagari_encodes_to_escapes() {
        // धर्म = U+0927 U+0930 U+094D U+092E
        assert_eq!(to_unicode_escape("धर्म"), r"\u0927\u0930\u094d\u092e");
    }

    #[test]
    fn test_mixed_text_encodes_only_non_ascii() {
        assert_eq!(to_unicode_escape("om ॐ"), r"om \u0950");
    }

    #[test]
    fn test_decode_rebuilds_devanagari() {
        assert_eq!(from_unicode_escape(r"\u0927\u0930\u094d\u092e"), "धर्म");
    }

    #[test]
    fn test_devanagari_round_trip_is_identity() {
        let text = "धर्मक्षेत्रे कुरुक्षेत्रे समवेता युयुत्सवः।";
        assert_eq!(from_unicode_escape(&to_unicode_escape(text)), text);
    }

    #[test]
    fn test_astral_codepoint_round_trips_via_surrogate_pair() {
        let text = "\u{11013}"; // Brahmi KA
        let escaped = to_unicode_escape(text);
        assert_eq!(escaped, r"\ud804\udc13");
        assert_eq!(from_unicode_escape(&escaped), text);
    }

    #[test]
    fn test_unpaired_surrogate_decodes_to_replacement() {
        assert_eq!(from_unicode_escape(r"\ud804x"), "\u{FFFD}x");
        assert_eq!(from_unicode_escape(r"\udc13"), "\u{FFFD}");
    }

    #[test]
    fn test_malformed_escape_passes_through() {
        assert_eq!(from_unicode_escape(r"\u09"), r"\u09");
        assert_eq!(from_unicode_escape(r"\uzzzz"), r"\uzzzz");
    }

    #[test]
    fn test_has_unicode_escapes() {
        assert!(has_unicode_escapes(r"text \u0927 more"));
        assert!(!has_unicode_escapes("plain देवनागरी text"));
        assert!(!has_unicode_escapes(r"\u09"));
    }

    #[test]
    fn test_devanagari_range_check() {
        assert!(is_devanagari_char('ध'));
        assert!(is_devanagari_char('।'));
        assert!(!is_devanagari_char('d'));
        assert!(!is_devanagari_char('ā'));
    }

    #[test]
    fn test_char_info() {
        let info = char_info('ॐ');
        assert_eq!(info.codepoint, 0x0950);
        assert_eq!(info.hex, "950");
        assert_eq!(info.unicode_escape, r"\u0950");
        assert!(info.is_devanagari);
    }

    #[test]
    fn test_normalize_strips_zero_width_and_trims() {
        assert_eq!(normalize_text("  धर्म\u{200B}\u{FEFF} "), "धर्म");
    }
}
