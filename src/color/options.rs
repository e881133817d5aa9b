//! Entry-token generation.
//!
//! A surface entry must be unique within its scoreboard, but display lines
//! routinely repeat (blank spacers, duplicated text). The engine therefore
//! never uses line content as the entry: each line position gets a token
//! built from an ordered pair of distinct palette colors, which is
//! invisible when rendered and collision-free by construction.

use super::palette::LegacyColor;
use crate::error::BoardError;

/// A unique two-color entry code used as a surface-visible entry.
///
/// Tokens assigned within one surface's line set are pairwise distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryToken(String);

impl EntryToken {
    /// The token as the raw entry string the surface accepts.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntryToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hard ceiling on tokens per surface: ordered unequal pairs over the
/// sixteen-color palette.
pub const MAX_ENTRY_TOKENS: usize = LegacyColor::PALETTE.len() * (LegacyColor::PALETTE.len() - 1);

/// Generate `count` pairwise-distinct entry tokens.
///
/// Enumerates ordered pairs `(first, second)` over [`LegacyColor::PALETTE`]
/// in palette order, skipping pairs with `first == second`, and
/// concatenates the two escape sequences into one token. The sequence is
/// deterministic, so a position's token never changes between updates with
/// the same line count.
///
/// # Errors
///
/// [`BoardError::InsufficientCodeSpace`] when `count` exceeds
/// [`MAX_ENTRY_TOKENS`]. The ceiling is exact: `MAX_ENTRY_TOKENS` succeeds,
/// one more fails.
pub fn entry_tokens(count: usize) -> Result<Vec<EntryToken>, BoardError> {
    if count > MAX_ENTRY_TOKENS {
        return Err(BoardError::InsufficientCodeSpace {
            requested: count,
            max: MAX_ENTRY_TOKENS,
        });
    }

    let mut tokens = Vec::with_capacity(count);
    'outer: for first in LegacyColor::PALETTE {
        for second in LegacyColor::PALETTE {
            if first == second {
                continue;
            }

            if tokens.len() == count {
                break 'outer;
            }
            tokens.push(EntryToken(format!("{}{}", first.escape(), second.escape())));
        }
    }

    Ok(tokens)
}
