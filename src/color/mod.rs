//! Legacy color codes, active-color scanning, and entry-token generation.
//!
//! The rendering surface speaks a legacy escape encoding: a marker
//! character followed by a single code selects a color or format. This
//! module owns the code table, the backward scan that recovers the active
//! color state at an arbitrary cut point, and the generator that turns
//! ordered color pairs into unique entry tokens.

mod options;
mod palette;
mod state;

pub use options::{entry_tokens, EntryToken, MAX_ENTRY_TOKENS};
pub use palette::{LegacyColor, COLOR_CHAR};
pub use state::last_color;
