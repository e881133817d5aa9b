//! The legacy color and format code table.

/// The escape marker that introduces a legacy color or format code.
pub const COLOR_CHAR: char = '\u{a7}';

/// A legacy display color or format code.
///
/// The sixteen color variants form the fixed palette used for entry-token
/// generation; the format variants only matter when scanning text for its
/// active color state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegacyColor {
    /// Color code `0`.
    Black,
    /// Color code `1`.
    DarkBlue,
    /// Color code `2`.
    DarkGreen,
    /// Color code `3`.
    DarkAqua,
    /// Color code `4`.
    DarkRed,
    /// Color code `5`.
    DarkPurple,
    /// Color code `6`.
    Gold,
    /// Color code `7`.
    Gray,
    /// Color code `8`.
    DarkGray,
    /// Color code `9`.
    Blue,
    /// Color code `a`.
    Green,
    /// Color code `b`.
    Aqua,
    /// Color code `c`.
    Red,
    /// Color code `d`.
    LightPurple,
    /// Color code `e`.
    Yellow,
    /// Color code `f`.
    White,
    /// Format code `k`.
    Obfuscated,
    /// Format code `l`.
    Bold,
    /// Format code `m`.
    Strikethrough,
    /// Format code `n`.
    Underline,
    /// Format code `o`.
    Italic,
    /// Format code `r`, clears both color and formats.
    Reset,
}

impl LegacyColor {
    /// The fixed, ordered palette of non-format display colors.
    ///
    /// Entry-token generation enumerates ordered pairs over this array, so
    /// its ordering is part of the engine's deterministic behavior.
    pub const PALETTE: [Self; 16] = [
        Self::Black,
        Self::DarkBlue,
        Self::DarkGreen,
        Self::DarkAqua,
        Self::DarkRed,
        Self::DarkPurple,
        Self::Gold,
        Self::Gray,
        Self::DarkGray,
        Self::Blue,
        Self::Green,
        Self::Aqua,
        Self::Red,
        Self::LightPurple,
        Self::Yellow,
        Self::White,
    ];

    /// The single-character code for this color or format.
    pub const fn code(self) -> char {
        match self {
            Self::Black => '0',
            Self::DarkBlue => '1',
            Self::DarkGreen => '2',
            Self::DarkAqua => '3',
            Self::DarkRed => '4',
            Self::DarkPurple => '5',
            Self::Gold => '6',
            Self::Gray => '7',
            Self::DarkGray => '8',
            Self::Blue => '9',
            Self::Green => 'a',
            Self::Aqua => 'b',
            Self::Red => 'c',
            Self::LightPurple => 'd',
            Self::Yellow => 'e',
            Self::White => 'f',
            Self::Obfuscated => 'k',
            Self::Bold => 'l',
            Self::Strikethrough => 'm',
            Self::Underline => 'n',
            Self::Italic => 'o',
            Self::Reset => 'r',
        }
    }

    /// Look up a color or format by its single-character code.
    pub const fn from_code(code: char) -> Option<Self> {
        Some(match code {
            '0' => Self::Black,
            '1' => Self::DarkBlue,
            '2' => Self::DarkGreen,
            '3' => Self::DarkAqua,
            '4' => Self::DarkRed,
            '5' => Self::DarkPurple,
            '6' => Self::Gold,
            '7' => Self::Gray,
            '8' => Self::DarkGray,
            '9' => Self::Blue,
            'a' => Self::Green,
            'b' => Self::Aqua,
            'c' => Self::Red,
            'd' => Self::LightPurple,
            'e' => Self::Yellow,
            'f' => Self::White,
            'k' => Self::Obfuscated,
            'l' => Self::Bold,
            'm' => Self::Strikethrough,
            'n' => Self::Underline,
            'o' => Self::Italic,
            'r' => Self::Reset,
            _ => return None,
        })
    }

    /// Whether this is a format code rather than a display color.
    pub const fn is_format(self) -> bool {
        matches!(
            self,
            Self::Obfuscated | Self::Bold | Self::Strikethrough | Self::Underline | Self::Italic
        )
    }

    /// Whether this is one of the sixteen display colors.
    pub const fn is_color(self) -> bool {
        !self.is_format() && !matches!(self, Self::Reset)
    }

    /// The two-character escape sequence (marker + code) for this value.
    pub fn escape(self) -> String {
        let mut s = String::with_capacity(2 + self.code().len_utf8());
        s.push(COLOR_CHAR);
        s.push(self.code());
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_has_sixteen_distinct_colors() {
        assert_eq!(LegacyColor::PALETTE.len(), 16);
        for color in LegacyColor::PALETTE {
            assert!(color.is_color());
        }
        for (i, a) in LegacyColor::PALETTE.iter().enumerate() {
            for b in &LegacyColor::PALETTE[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_code_round_trip() {
        for code in "0123456789abcdefklmnor".chars() {
            let color = LegacyColor::from_code(code).unwrap();
            assert_eq!(color.code(), code);
        }
        assert_eq!(LegacyColor::from_code('z'), None);
    }

    #[test]
    fn test_format_classification() {
        assert!(LegacyColor::Bold.is_format());
        assert!(!LegacyColor::Bold.is_color());
        assert!(!LegacyColor::Reset.is_format());
        assert!(!LegacyColor::Reset.is_color());
        assert!(LegacyColor::Red.is_color());
    }

    #[test]
    fn test_escape_shape() {
        assert_eq!(LegacyColor::Green.escape(), "\u{a7}a");
    }
}
