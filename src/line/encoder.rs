//! Width-limited line encoding.
//!
//! The surface reconstructs a visible line purely from a team's prefix and
//! suffix fields, each capped at a fixed width. A line longer than one
//! field is split at the width boundary, and the suffix re-asserts the
//! color state active at the cut so the tail keeps its color.

use unicode_width::UnicodeWidthStr;

use crate::color::{last_color, COLOR_CHAR};
use crate::error::BoardError;

use super::translate::Translator;

/// Width of the surface's prefix and suffix fields, in units.
pub const LINE_WIDTH: usize = 64;

/// Width of the surface's team name field, in units.
///
/// A separate bound from [`LINE_WIDTH`]: it constrains team names at
/// creation and rename, never line content.
pub const TEAM_NAME_WIDTH: usize = 16;

/// Ceiling on a line's raw content before any encoding.
pub const MAX_LINE_LEN: usize = 128;

/// A display line mapped into the surface's prefix/suffix fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedLine {
    /// First field, at most [`LINE_WIDTH`] units.
    pub prefix: String,
    /// Continuation field, at most [`LINE_WIDTH`] units. Empty when the
    /// line fits in the prefix.
    pub suffix: String,
}

impl EncodedLine {
    /// Display width of the visible text, escape sequences stripped.
    pub fn visible_width(&self) -> usize {
        strip_codes(&self.prefix).width() + strip_codes(&self.suffix).width()
    }
}

/// Converts display lines into the surface's encoding.
#[derive(Debug, Clone)]
pub struct LineEncoder<T> {
    translator: T,
}

impl<T: Translator> LineEncoder<T> {
    /// Create an encoder over the given markup translator.
    pub const fn new(translator: T) -> Self {
        Self { translator }
    }

    /// Encode a display line into prefix/suffix fields.
    ///
    /// # Errors
    ///
    /// [`BoardError::LineTooLong`] when the raw content exceeds
    /// [`MAX_LINE_LEN`] before encoding; [`BoardError::NotTranslatable`]
    /// when the translator rejects the line.
    pub fn encode(&self, line: &str) -> Result<EncodedLine, BoardError> {
        let length = line.chars().count();
        if length > MAX_LINE_LEN {
            return Err(BoardError::LineTooLong {
                line: line.to_string(),
                length,
                max: MAX_LINE_LEN,
            });
        }

        let encoded = self.translator.translate(line)?;
        let (prefix, suffix) = split(&encoded, LINE_WIDTH);
        Ok(EncodedLine { prefix, suffix })
    }
}

/// Split an encoded line at `limit` units.
///
/// When the line fits, the suffix is empty. Otherwise the prefix is the
/// first `limit` units, except that a dangling escape marker at the cut is
/// moved into the suffix rather than left to end the prefix. The suffix is
/// the carried-forward color state, the moved marker if any, and the
/// remainder, itself truncated to `limit`; anything beyond that second
/// limit is dropped.
pub fn split(encoded: &str, limit: usize) -> (String, String) {
    let chars: Vec<char> = encoded.chars().collect();
    if chars.len() <= limit {
        return (encoded.to_string(), String::new());
    }

    let mut cut = limit;
    let mut carried_marker = false;
    if chars[cut - 1] == COLOR_CHAR {
        cut -= 1;
        carried_marker = true;
    }

    let prefix: String = chars[..cut].iter().collect();

    let mut suffix = last_color(&prefix);
    if carried_marker {
        suffix.push(COLOR_CHAR);
    }
    suffix.extend(&chars[limit..]);
    let suffix = suffix.chars().take(limit).collect();

    (prefix, suffix)
}

/// Remove every escape sequence (marker + one code unit) from `text`.
fn strip_codes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == COLOR_CHAR {
            chars.next();
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::translate::PlainTranslator;

    const MARK: char = '\u{a7}';

    fn encoder() -> LineEncoder<PlainTranslator> {
        LineEncoder::new(PlainTranslator)
    }

    struct Rejecting;

    impl Translator for Rejecting {
        fn translate(&self, line: &str) -> Result<String, BoardError> {
            Err(BoardError::NotTranslatable {
                line: line.to_string(),
                reason: "unbalanced tag".to_string(),
            })
        }
    }

    #[test]
    fn test_short_line_round_trips() {
        let line = "a".repeat(LINE_WIDTH);
        let encoded = encoder().encode(&line).unwrap();
        assert_eq!(encoded.prefix, line);
        assert_eq!(encoded.suffix, "");
    }

    #[test]
    fn test_split_reproduces_visible_text() {
        for extra in [1, 10, LINE_WIDTH] {
            let line: String = ('a'..='z').cycle().take(LINE_WIDTH + extra).collect();
            let encoded = encoder().encode(&line).unwrap();
            assert_eq!(encoded.prefix.chars().count(), LINE_WIDTH);
            assert!(encoded.suffix.chars().count() <= LINE_WIDTH);
            // No color state to carry, so the fields concatenate exactly.
            assert_eq!(format!("{}{}", encoded.prefix, encoded.suffix), line);
        }
    }

    #[test]
    fn test_split_carries_active_color() {
        let line = format!("{MARK}a{}", "x".repeat(70));
        let encoded = encoder().encode(&line).unwrap();
        assert_eq!(encoded.prefix.chars().count(), LINE_WIDTH);
        // 2 escape units + 62 'x' in the prefix, 8 'x' remain.
        assert_eq!(encoded.suffix, format!("{MARK}a{}", "x".repeat(8)));
    }

    #[test]
    fn test_split_moves_dangling_marker() {
        // Put the marker exactly at the cut so the code lands in the tail.
        let line = format!("{}{MARK}a{}", "x".repeat(LINE_WIDTH - 1), "y".repeat(5));
        let encoded = encoder().encode(&line).unwrap();
        assert_eq!(encoded.prefix, "x".repeat(LINE_WIDTH - 1));
        assert!(!encoded.prefix.ends_with(MARK));
        // Reunited escape, then the tail.
        assert_eq!(encoded.suffix, format!("{MARK}a{}", "y".repeat(5)));
    }

    #[test]
    fn test_suffix_overflow_dropped() {
        let line = "z".repeat(MAX_LINE_LEN);
        let encoded = encoder().encode(&line).unwrap();
        assert_eq!(encoded.prefix.chars().count(), LINE_WIDTH);
        assert_eq!(encoded.suffix.chars().count(), LINE_WIDTH);
    }

    #[test]
    fn test_suffix_truncated_after_color_carry() {
        // Colored line of maximum length: the carried color pushes the
        // suffix past the limit, and the overflow is dropped.
        let line = format!("{MARK}b{}", "q".repeat(MAX_LINE_LEN - 2));
        let encoded = encoder().encode(&line).unwrap();
        assert!(encoded.suffix.starts_with(&format!("{MARK}b")));
        assert_eq!(encoded.suffix.chars().count(), LINE_WIDTH);
    }

    #[test]
    fn test_line_too_long() {
        let line = "a".repeat(MAX_LINE_LEN + 1);
        let err = encoder().encode(&line).unwrap_err();
        assert_eq!(
            err,
            BoardError::LineTooLong {
                line,
                length: MAX_LINE_LEN + 1,
                max: MAX_LINE_LEN,
            }
        );
    }

    #[test]
    fn test_max_length_accepted() {
        assert!(encoder().encode(&"a".repeat(MAX_LINE_LEN)).is_ok());
    }

    #[test]
    fn test_translator_failure_propagates() {
        let encoder = LineEncoder::new(Rejecting);
        assert!(matches!(
            encoder.encode("<bad"),
            Err(BoardError::NotTranslatable { .. })
        ));
    }

    #[test]
    fn test_visible_width_ignores_codes() {
        let encoded = encoder()
            .encode(&format!("{MARK}a{MARK}lhi"))
            .unwrap();
        assert_eq!(encoded.visible_width(), 2);
    }

    #[test]
    fn test_split_empty() {
        let (prefix, suffix) = split("", LINE_WIDTH);
        assert_eq!(prefix, "");
        assert_eq!(suffix, "");
    }
}
