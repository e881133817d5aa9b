//! Recovery of the active color state at the end of a string.
//!
//! When a line is split across the surface's prefix/suffix fields, the
//! suffix must re-assert whatever color and formats were in effect at the
//! cut point, or the visible tail renders uncolored.

use super::palette::{LegacyColor, COLOR_CHAR};

/// Number of units in a hex color sequence: marker, `x`, then six
/// marker + hex-digit pairs.
const HEX_SEQUENCE_LEN: usize = 14;

/// Compute the color state active at the end of `input`.
///
/// Scans backward collecting escape codes in their order of appearance.
/// The scan stops as soon as the state is fully determined: at a display
/// color, a hex color sequence, or a reset, since each of those clears
/// everything before it. Format codes encountered on the way (which stack
/// on top of the color) are kept.
///
/// Returns the escape sequence to prepend, or an empty string when no
/// color is active.
pub fn last_color(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut result = String::new();

    let mut index = chars.len();
    while index > 1 {
        index -= 1;
        if chars[index - 1] != COLOR_CHAR {
            continue;
        }

        // `index` sits on the code, `index - 1` on its marker.
        if let Some(hex) = hex_color(&chars, index - 1) {
            result.insert_str(0, &hex);
            break;
        }

        let Some(code) = LegacyColor::from_code(chars[index]) else {
            continue;
        };

        result.insert_str(0, &code.escape());
        if !code.is_format() {
            // Display color or reset: nothing earlier can still apply.
            break;
        }
        index -= 1;
    }

    result
}

/// Check for a full hex color sequence (`§x§R§R§G§G§B§B`) ending at the
/// marker position `marker`, which must point at the sequence's last marker.
///
/// Returns the whole 14-unit sequence when present.
fn hex_color(chars: &[char], marker: usize) -> Option<String> {
    let start = marker.checked_sub(HEX_SEQUENCE_LEN - 2)?;
    if chars[start] != COLOR_CHAR || chars[start + 1] != 'x' {
        return None;
    }

    for pair in 1..=6 {
        let at = start + pair * 2;
        if chars[at] != COLOR_CHAR || !chars.get(at + 1)?.is_ascii_hexdigit() {
            return None;
        }
    }

    Some(chars[start..start + HEX_SEQUENCE_LEN].iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests spell the marker as \u{a7} to keep the source ASCII-safe.

    #[test]
    fn test_no_color() {
        assert_eq!(last_color("plain text"), "");
        assert_eq!(last_color(""), "");
    }

    #[test]
    fn test_single_color() {
        assert_eq!(last_color("\u{a7}ahello"), "\u{a7}a");
    }

    #[test]
    fn test_last_color_wins() {
        assert_eq!(last_color("\u{a7}b one \u{a7}c two"), "\u{a7}c");
    }

    #[test]
    fn test_formats_stack_on_color() {
        assert_eq!(last_color("\u{a7}a\u{a7}lword"), "\u{a7}a\u{a7}l");
        assert_eq!(
            last_color("\u{a7}e\u{a7}l\u{a7}nword"),
            "\u{a7}e\u{a7}l\u{a7}n"
        );
    }

    #[test]
    fn test_color_clears_earlier_formats() {
        // The bold precedes the color, so the color alone is active.
        assert_eq!(last_color("\u{a7}l\u{a7}aword"), "\u{a7}a");
    }

    #[test]
    fn test_reset_stops_the_scan() {
        assert_eq!(last_color("\u{a7}a one \u{a7}r two"), "\u{a7}r");
    }

    #[test]
    fn test_hex_color() {
        let hex = "\u{a7}x\u{a7}1\u{a7}2\u{a7}3\u{a7}a\u{a7}b\u{a7}c";
        let input = format!("{hex}hello");
        assert_eq!(last_color(&input), hex);
    }

    #[test]
    fn test_hex_color_with_following_format() {
        let hex = "\u{a7}x\u{a7}f\u{a7}f\u{a7}0\u{a7}0\u{a7}a\u{a7}a";
        let input = format!("{hex}\u{a7}lhello");
        assert_eq!(last_color(&input), format!("{hex}\u{a7}l"));
    }

    #[test]
    fn test_malformed_hex_falls_back_to_codes() {
        // `x` is not a recognized code, and the pairs are broken; the
        // trailing plain color is still found.
        assert_eq!(last_color("\u{a7}x\u{a7}1 \u{a7}9end"), "\u{a7}9");
    }

    #[test]
    fn test_dangling_marker_ignored() {
        assert_eq!(last_color("text\u{a7}"), "");
        assert_eq!(last_color("\u{a7}a text\u{a7}"), "\u{a7}a");
    }

    #[test]
    fn test_unknown_code_skipped() {
        assert_eq!(last_color("\u{a7}a and \u{a7}z"), "\u{a7}a");
    }
}
