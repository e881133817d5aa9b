//! The rendering-surface seam.
//!
//! Surfaces (objective + teams + scores) are owned by the host process;
//! the engine reaches them only through the traits in this module and
//! refers to them by opaque handle. [`MemorySurface`] and [`MemoryHost`]
//! are complete in-memory implementations used by the test suite and by
//! hosts that want to inspect rendered output without a real surface.

mod memory;
mod traits;

pub use memory::{MemoryHost, MemorySurface, MutationStats};
pub use traits::{DisplaySlot, RenderSurface, SurfaceHost, SurfaceId, ViewerId};
