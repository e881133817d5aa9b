//! # Sideboard
//!
//! A minimal-write sidebar scoreboard engine.
//!
//! Sideboard keeps a server-side model (title, ordered display lines, teams,
//! viewers) synchronized with externally owned rendering surfaces while
//! avoiding every surface write it can prove redundant.
//!
//! ## Core Concepts
//!
//! - **Cached diffing**: the last-applied line sequence is cached per
//!   surface; an unchanged update touches nothing but team membership
//! - **Entry tokens**: unique two-color codes stand in as surface entries,
//!   so duplicate or blank lines never collide
//! - **Split encoding**: lines longer than the surface's field width are
//!   split into prefix + suffix, carrying the active color across the cut
//! - **Board variants**: one shared surface for all viewers ([`GlobalBoard`])
//!   or one surface per viewer ([`PersonalBoard`])
//!
//! ## Example
//!
//! ```rust,ignore
//! use sideboard::{BoardConfig, GlobalBoard, LineEncoder, PlainTranslator};
//!
//! let encoder = LineEncoder::new(PlainTranslator);
//! let mut board = GlobalBoard::new(
//!     BoardConfig::default(),
//!     || "Lobby".to_string(),
//!     || vec!["Players: 7".to_string(), "Map: Canyon".to_string()],
//! );
//!
//! // Driven by the host's scheduler, at any cadence it likes.
//! board.update(&mut host, &encoder)?;
//! ```
//!
//! The rendering surface itself (objectives, teams, scores) is an external
//! collaborator reached through the [`surface`] traits; [`MemorySurface`]
//! is an in-memory implementation used by the test suite.

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod board;
pub mod color;
pub mod error;
pub mod line;
pub mod surface;

// Re-exports for convenience
pub use board::{Board, BoardConfig, GlobalBoard, Member, PersonalBoard, Team};
pub use color::{entry_tokens, EntryToken, LegacyColor, COLOR_CHAR, MAX_ENTRY_TOKENS};
pub use error::BoardError;
pub use line::{EncodedLine, LineEncoder, PlainTranslator, Translator};
pub use surface::{
    DisplaySlot, MemoryHost, MemorySurface, MutationStats, RenderSurface, SurfaceHost, SurfaceId,
    ViewerId,
};
