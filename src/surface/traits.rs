//! Collaborator traits: the mutation surface and the host around it.

use uuid::Uuid;

/// Opaque handle to one externally owned rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(u64);

impl SurfaceId {
    /// Wrap a raw handle value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw handle value.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

/// Stable identity of a display recipient.
///
/// Viewers are owned externally; the engine only ever holds their ids and
/// resolves presence through [`SurfaceHost::viewer_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewerId(Uuid);

impl ViewerId {
    /// A fresh random identity.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing identity.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The underlying identity.
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for ViewerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A display position a surface objective can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplaySlot {
    /// The sidebar, the slot this engine renders to.
    #[default]
    Sidebar,
    /// The player list.
    List,
    /// Below entity names.
    BelowName,
}

/// The only mutation surface the engine touches.
///
/// Mirrors the host's objective/team/score API one call per operation, so
/// an implementation can count exactly which state-mutating operations an
/// update performed.
pub trait RenderSurface {
    /// Create the display objective if absent; leaves an existing
    /// objective untouched.
    fn ensure_objective(&mut self, id: &str, title: &str);

    /// Set the objective's title.
    fn set_title(&mut self, title: &str);

    /// Show the objective in the given slot.
    fn set_display_slot(&mut self, slot: DisplaySlot);

    /// Empty the given slot.
    fn clear_slot(&mut self, slot: DisplaySlot);

    /// Set the score of an entry.
    fn set_score(&mut self, entry: &str, value: i32);

    /// Remove every score entry.
    fn reset_scores(&mut self);

    /// Names of all teams registered on this surface.
    fn team_names(&self) -> Vec<String>;

    /// Whether a team with this name is registered.
    fn has_team(&self, name: &str) -> bool;

    /// Register an empty team.
    fn register_team(&mut self, name: &str);

    /// Unregister a team and drop its entries.
    fn unregister_team(&mut self, name: &str);

    /// Entries currently on a team.
    fn team_entries(&self, name: &str) -> Vec<String>;

    /// Whether a team carries the given entry.
    fn team_has_entry(&self, name: &str, entry: &str) -> bool;

    /// Add an entry to a team.
    fn team_add_entry(&mut self, name: &str, entry: &str);

    /// Remove an entry from a team.
    fn team_remove_entry(&mut self, name: &str, entry: &str);

    /// Remove every entry from a team.
    fn team_clear_entries(&mut self, name: &str);

    /// Set a team's prefix field.
    fn set_team_prefix(&mut self, name: &str, prefix: &str);

    /// Set a team's suffix field.
    fn set_team_suffix(&mut self, name: &str, suffix: &str);

    /// Set a team's display label.
    fn set_team_display(&mut self, name: &str, display: &str);
}

/// The host process around the engine: surface factory, viewer resolution,
/// and surface assignment.
pub trait SurfaceHost {
    /// The surface type this host owns.
    type Surface: RenderSurface;

    /// Create a fresh surface and return its handle.
    fn create_surface(&mut self) -> SurfaceId;

    /// Mutable access to a surface. `None` when the handle is stale.
    fn surface_mut(&mut self, id: SurfaceId) -> Option<&mut Self::Surface>;

    /// Show the given surface to a viewer.
    fn assign_surface(&mut self, viewer: ViewerId, surface: SurfaceId);

    /// Reset a viewer to the host's default/main surface.
    fn assign_main_surface(&mut self, viewer: ViewerId);

    /// The display name of a viewer, or `None` when the viewer is not
    /// currently resolvable (disconnected).
    fn viewer_name(&self, viewer: ViewerId) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_id_round_trip() {
        let id = SurfaceId::new(7);
        assert_eq!(id.raw(), 7);
        assert_eq!(id.to_string(), "surface#7");
    }

    #[test]
    fn test_viewer_ids_distinct() {
        assert_ne!(ViewerId::random(), ViewerId::random());
    }

    #[test]
    fn test_display_slot_default_is_sidebar() {
        assert_eq!(DisplaySlot::default(), DisplaySlot::Sidebar);
    }
}
