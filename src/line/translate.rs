//! The markup translation seam.
//!
//! Markup-to-rich-text translation is an external collaborator; the engine
//! only needs the result in the surface's legacy encoding.

use crate::error::BoardError;

/// Translates a markup display line into the surface's legacy encoding.
pub trait Translator {
    /// Translate `line` into legacy-encoded text.
    ///
    /// # Errors
    ///
    /// [`BoardError::NotTranslatable`] when the markup cannot be parsed.
    fn translate(&self, line: &str) -> Result<String, BoardError>;
}

/// The identity translator, for hosts whose lines are already
/// legacy-encoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTranslator;

impl Translator for PlainTranslator {
    fn translate(&self, line: &str) -> Result<String, BoardError> {
        Ok(line.to_string())
    }
}

impl<T: Translator + ?Sized> Translator for &T {
    fn translate(&self, line: &str) -> Result<String, BoardError> {
        (**self).translate(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_translator_is_identity() {
        let line = "\u{a7}ahello";
        assert_eq!(PlainTranslator.translate(line).unwrap(), line);
    }
}
