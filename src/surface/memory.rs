//! In-memory surface and host.
//!
//! A faithful model of a real rendering surface that additionally counts
//! every state-mutating call, so tests can assert that an unchanged update
//! touches nothing. `rendered_lines` reconstructs the visible sidebar the
//! way a real surface would: entries by descending score, each line built
//! from its team's prefix + suffix.

use std::collections::{BTreeMap, HashMap};

use super::traits::{DisplaySlot, RenderSurface, SurfaceHost, SurfaceId, ViewerId};

/// Counters for state-mutating surface calls.
///
/// Title writes are tracked separately: the engine re-asserts the title on
/// every update, including no-op ones, so it is not part of the
/// content-mutation budget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MutationStats {
    /// `set_score` calls.
    pub score_writes: usize,
    /// `reset_scores` calls.
    pub score_resets: usize,
    /// `set_display_slot` + `clear_slot` calls.
    pub slot_changes: usize,
    /// `register_team` + `unregister_team` calls.
    pub team_registrations: usize,
    /// Entry add/remove/clear calls.
    pub entry_writes: usize,
    /// Prefix/suffix/display field writes.
    pub field_writes: usize,
    /// `set_title` calls (not counted as content mutation).
    pub title_writes: usize,
}

impl MutationStats {
    /// Total content-mutating calls (everything except title writes).
    pub const fn content_mutations(&self) -> usize {
        self.score_writes
            + self.score_resets
            + self.slot_changes
            + self.team_registrations
            + self.entry_writes
            + self.field_writes
    }
}

/// One team registered on a surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct TeamState {
    display: String,
    prefix: String,
    suffix: String,
    entries: Vec<String>,
}

/// An in-memory rendering surface with mutation counting.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    objective: Option<(String, String)>,
    displayed: Option<DisplaySlot>,
    scores: HashMap<String, i32>,
    teams: BTreeMap<String, TeamState>,
    stats: MutationStats,
}

impl MemorySurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutation counters accumulated so far.
    pub const fn stats(&self) -> &MutationStats {
        &self.stats
    }

    /// Zero the mutation counters.
    pub fn reset_stats(&mut self) {
        self.stats = MutationStats::default();
    }

    /// The objective's current title, if one exists.
    pub fn title(&self) -> Option<&str> {
        self.objective.as_ref().map(|(_, title)| title.as_str())
    }

    /// The slot the objective is currently displayed in.
    pub const fn displayed_slot(&self) -> Option<DisplaySlot> {
        self.displayed
    }

    /// The score of an entry, if set.
    pub fn score(&self, entry: &str) -> Option<i32> {
        self.scores.get(entry).copied()
    }

    /// Number of score entries.
    pub fn score_count(&self) -> usize {
        self.scores.len()
    }

    /// A team's prefix and suffix fields.
    pub fn team_fields(&self, name: &str) -> Option<(&str, &str)> {
        self.teams
            .get(name)
            .map(|t| (t.prefix.as_str(), t.suffix.as_str()))
    }

    /// A team's display label.
    pub fn team_display(&self, name: &str) -> Option<&str> {
        self.teams.get(name).map(|t| t.display.as_str())
    }

    /// Reconstruct the visible sidebar: for each score entry in descending
    /// score order, the prefix + suffix of the team carrying that entry.
    pub fn rendered_lines(&self) -> Vec<String> {
        if self.displayed.is_none() {
            return Vec::new();
        }

        let mut ranked: Vec<(&String, i32)> =
            self.scores.iter().map(|(entry, &s)| (entry, s)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        ranked
            .into_iter()
            .map(|(entry, _)| {
                self.teams
                    .values()
                    .find(|team| team.entries.iter().any(|e| e == entry))
                    .map_or_else(String::new, |team| {
                        format!("{}{}", team.prefix, team.suffix)
                    })
            })
            .collect()
    }
}

impl RenderSurface for MemorySurface {
    fn ensure_objective(&mut self, id: &str, title: &str) {
        if self.objective.is_none() {
            self.objective = Some((id.to_string(), title.to_string()));
        }
    }

    fn set_title(&mut self, title: &str) {
        self.stats.title_writes += 1;
        if let Some((_, current)) = &mut self.objective {
            title.clone_into(current);
        }
    }

    fn set_display_slot(&mut self, slot: DisplaySlot) {
        self.stats.slot_changes += 1;
        self.displayed = Some(slot);
    }

    fn clear_slot(&mut self, slot: DisplaySlot) {
        self.stats.slot_changes += 1;
        if self.displayed == Some(slot) {
            self.displayed = None;
        }
    }

    fn set_score(&mut self, entry: &str, value: i32) {
        self.stats.score_writes += 1;
        self.scores.insert(entry.to_string(), value);
    }

    fn reset_scores(&mut self) {
        self.stats.score_resets += 1;
        self.scores.clear();
    }

    fn team_names(&self) -> Vec<String> {
        self.teams.keys().cloned().collect()
    }

    fn has_team(&self, name: &str) -> bool {
        self.teams.contains_key(name)
    }

    fn register_team(&mut self, name: &str) {
        self.stats.team_registrations += 1;
        self.teams.insert(name.to_string(), TeamState::default());
    }

    fn unregister_team(&mut self, name: &str) {
        self.stats.team_registrations += 1;
        self.teams.remove(name);
    }

    fn team_entries(&self, name: &str) -> Vec<String> {
        self.teams.get(name).map(|t| t.entries.clone()).unwrap_or_default()
    }

    fn team_has_entry(&self, name: &str, entry: &str) -> bool {
        self.teams
            .get(name)
            .is_some_and(|t| t.entries.iter().any(|e| e == entry))
    }

    fn team_add_entry(&mut self, name: &str, entry: &str) {
        self.stats.entry_writes += 1;
        if let Some(team) = self.teams.get_mut(name) {
            if !team.entries.iter().any(|e| e == entry) {
                team.entries.push(entry.to_string());
            }
        }
    }

    fn team_remove_entry(&mut self, name: &str, entry: &str) {
        self.stats.entry_writes += 1;
        if let Some(team) = self.teams.get_mut(name) {
            team.entries.retain(|e| e != entry);
        }
    }

    fn team_clear_entries(&mut self, name: &str) {
        self.stats.entry_writes += 1;
        if let Some(team) = self.teams.get_mut(name) {
            team.entries.clear();
        }
    }

    fn set_team_prefix(&mut self, name: &str, prefix: &str) {
        self.stats.field_writes += 1;
        if let Some(team) = self.teams.get_mut(name) {
            prefix.clone_into(&mut team.prefix);
        }
    }

    fn set_team_suffix(&mut self, name: &str, suffix: &str) {
        self.stats.field_writes += 1;
        if let Some(team) = self.teams.get_mut(name) {
            suffix.clone_into(&mut team.suffix);
        }
    }

    fn set_team_display(&mut self, name: &str, display: &str) {
        self.stats.field_writes += 1;
        if let Some(team) = self.teams.get_mut(name) {
            display.clone_into(&mut team.display);
        }
    }
}

/// An in-memory host owning surfaces and viewer presence.
///
/// Surface handle `0` is the main surface every viewer starts on and
/// returns to when a board releases them.
#[derive(Debug, Default)]
pub struct MemoryHost {
    surfaces: HashMap<SurfaceId, MemorySurface>,
    next_surface: u64,
    viewers: HashMap<ViewerId, String>,
    assignments: HashMap<ViewerId, SurfaceId>,
}

impl MemoryHost {
    /// The handle of the main surface.
    pub const MAIN: SurfaceId = SurfaceId::new(0);

    /// Create a host with only the main surface.
    pub fn new() -> Self {
        let mut host = Self {
            next_surface: 1,
            ..Self::default()
        };
        host.surfaces.insert(Self::MAIN, MemorySurface::new());
        host
    }

    /// Register a connected viewer under a display name.
    pub fn connect(&mut self, name: impl Into<String>) -> ViewerId {
        let id = ViewerId::random();
        self.viewers.insert(id, name.into());
        self.assignments.insert(id, Self::MAIN);
        id
    }

    /// Drop a viewer from presence; its id stays valid but unresolvable.
    pub fn disconnect(&mut self, viewer: ViewerId) {
        self.viewers.remove(&viewer);
    }

    /// Read access to a surface.
    pub fn surface(&self, id: SurfaceId) -> Option<&MemorySurface> {
        self.surfaces.get(&id)
    }

    /// The surface a viewer is currently looking at.
    pub fn assigned(&self, viewer: ViewerId) -> Option<SurfaceId> {
        self.assignments.get(&viewer).copied()
    }
}

impl SurfaceHost for MemoryHost {
    type Surface = MemorySurface;

    fn create_surface(&mut self) -> SurfaceId {
        let id = SurfaceId::new(self.next_surface);
        self.next_surface += 1;
        self.surfaces.insert(id, MemorySurface::new());
        id
    }

    fn surface_mut(&mut self, id: SurfaceId) -> Option<&mut Self::Surface> {
        self.surfaces.get_mut(&id)
    }

    fn assign_surface(&mut self, viewer: ViewerId, surface: SurfaceId) {
        self.assignments.insert(viewer, surface);
    }

    fn assign_main_surface(&mut self, viewer: ViewerId) {
        self.assignments.insert(viewer, Self::MAIN);
    }

    fn viewer_name(&self, viewer: ViewerId) -> Option<String> {
        self.viewers.get(&viewer).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_objective_created_once() {
        let mut surface = MemorySurface::new();
        surface.ensure_objective("board", "first");
        surface.ensure_objective("board", "second");
        assert_eq!(surface.title(), Some("first"));
    }

    #[test]
    fn test_stats_count_content_mutations() {
        let mut surface = MemorySurface::new();
        surface.ensure_objective("board", "");
        surface.set_title("t");
        surface.register_team("a");
        surface.team_add_entry("a", "e");
        surface.set_score("e", 1);
        surface.set_display_slot(DisplaySlot::Sidebar);

        let stats = surface.stats();
        assert_eq!(stats.title_writes, 1);
        assert_eq!(stats.content_mutations(), 4);
    }

    #[test]
    fn test_rendered_lines_descending_score() {
        let mut surface = MemorySurface::new();
        surface.set_display_slot(DisplaySlot::Sidebar);
        for (i, entry) in ["one", "two", "three"].iter().enumerate() {
            let team = format!("line{}", i + 1);
            surface.register_team(&team);
            surface.team_add_entry(&team, entry);
            surface.set_team_prefix(&team, &format!("row {}", i + 1));
            surface.set_score(entry, (i + 1) as i32);
        }

        assert_eq!(surface.rendered_lines(), vec!["row 3", "row 2", "row 1"]);
    }

    #[test]
    fn test_rendered_lines_empty_when_slot_clear() {
        let mut surface = MemorySurface::new();
        surface.set_score("e", 1);
        assert!(surface.rendered_lines().is_empty());
    }

    #[test]
    fn test_host_viewer_lifecycle() {
        let mut host = MemoryHost::new();
        let viewer = host.connect("Avery");
        assert_eq!(host.viewer_name(viewer), Some("Avery".to_string()));
        assert_eq!(host.assigned(viewer), Some(MemoryHost::MAIN));

        let surface = host.create_surface();
        host.assign_surface(viewer, surface);
        assert_eq!(host.assigned(viewer), Some(surface));

        host.disconnect(viewer);
        assert_eq!(host.viewer_name(viewer), None);

        host.assign_main_surface(viewer);
        assert_eq!(host.assigned(viewer), Some(MemoryHost::MAIN));
    }

    #[test]
    fn test_unregister_drops_entries() {
        let mut surface = MemorySurface::new();
        surface.register_team("a");
        surface.team_add_entry("a", "e");
        surface.unregister_team("a");
        assert!(!surface.has_team("a"));
        assert!(surface.team_entries("a").is_empty());
    }
}
