//! The shared-surface board: every viewer sees the same sidebar.

use tracing::debug;

use crate::error::BoardError;
use crate::line::{LineEncoder, Translator};
use crate::surface::{SurfaceHost, SurfaceId, ViewerId};

use super::core::{BoardConfig, BoardCore};
use super::team::{Member, Team};

/// Produces the title of a global board.
pub type TitleProvider = Box<dyn Fn() -> String>;

/// Produces the line sequence of a global board, top-most line first.
pub type LinesProvider = Box<dyn Fn() -> Vec<String>>;

/// A board with one rendering surface shared by all viewers.
///
/// Title and lines come from viewer-independent providers; the surface is
/// created lazily on the first update and assigned to every viewer known
/// at that point.
pub struct GlobalBoard {
    core: BoardCore,
    surface: Option<SurfaceId>,
    title: TitleProvider,
    lines: LinesProvider,
}

impl GlobalBoard {
    /// Create a global board from its title and line providers.
    pub fn new(
        config: BoardConfig,
        title: impl Fn() -> String + 'static,
        lines: impl Fn() -> Vec<String> + 'static,
    ) -> Self {
        Self {
            core: BoardCore::new(config),
            surface: None,
            title: Box::new(title),
            lines: Box::new(lines),
        }
    }

    /// The shared surface, once lazily created.
    pub const fn surface(&self) -> Option<SurfaceId> {
        self.surface
    }

    /// Ids of the viewers currently on this board.
    pub fn viewers(&self) -> &[ViewerId] {
        self.core.viewers()
    }

    /// Swap the title provider.
    pub fn set_title(&mut self, title: impl Fn() -> String + 'static) {
        self.title = Box::new(title);
    }

    /// Swap the lines provider.
    pub fn set_lines(&mut self, lines: impl Fn() -> Vec<String> + 'static) {
        self.lines = Box::new(lines);
    }

    /// Resolve providers and synchronize the shared surface.
    ///
    /// Call this whenever board content may have changed; an external
    /// scheduler driving it periodically is the expected setup. Unchanged
    /// content costs no surface writes.
    pub fn update<H: SurfaceHost, T: Translator>(
        &mut self,
        host: &mut H,
        encoder: &LineEncoder<T>,
    ) -> Result<(), BoardError> {
        let surface = self.ensure_surface(host);
        let title = (self.title)();
        let lines = (self.lines)();
        self.core
            .update_surface(host, surface, &title, &lines, encoder)
    }

    /// Add a viewer: render the board, then show the shared surface to the
    /// viewer. Returns `false` when the viewer was already present.
    pub fn add_viewer<H: SurfaceHost, T: Translator>(
        &mut self,
        host: &mut H,
        encoder: &LineEncoder<T>,
        viewer: ViewerId,
    ) -> Result<bool, BoardError> {
        if !self.core.add_viewer(viewer) {
            return Ok(false);
        }

        self.update(host, encoder)?;
        if let Some(surface) = self.surface {
            host.assign_surface(viewer, surface);
        }
        Ok(true)
    }

    /// Remove a viewer, resetting it to the main surface and stripping it
    /// from every team.
    pub fn remove_viewer<H: SurfaceHost>(&mut self, host: &mut H, viewer: ViewerId) {
        let surfaces = self.surface_ids();
        self.core.remove_viewer(host, &surfaces, viewer);
    }

    /// Tear the board down: every viewer back to the main surface, all
    /// teams and caches cleared. Idempotent.
    pub fn destroy<H: SurfaceHost>(&mut self, host: &mut H) {
        let surfaces = self.surface_ids();
        self.core.destroy(host, &surfaces);
        self.surface = None;
    }

    // MARK: Teams

    /// Create a user team.
    pub fn create_team<H: SurfaceHost>(
        &mut self,
        host: &mut H,
        name: &str,
        display: &str,
    ) -> Result<(), BoardError> {
        let surfaces = self.surface_ids();
        self.core.create_team(host, &surfaces, name, display)
    }

    /// Remove a user team.
    pub fn remove_team<H: SurfaceHost>(&mut self, host: &mut H, name: &str) -> bool {
        let surfaces = self.surface_ids();
        self.core.remove_team(host, &surfaces, name)
    }

    /// Rename a user team.
    pub fn rename_team<H: SurfaceHost>(
        &mut self,
        host: &mut H,
        name: &str,
        new_name: &str,
    ) -> Result<bool, BoardError> {
        let surfaces = self.surface_ids();
        self.core.rename_team(host, &surfaces, name, new_name)
    }

    /// Change a team's display label.
    pub fn set_team_display<H: SurfaceHost>(
        &mut self,
        host: &mut H,
        name: &str,
        display: &str,
    ) -> bool {
        let surfaces = self.surface_ids();
        self.core.set_team_display(host, &surfaces, name, display)
    }

    /// Add a member to a team.
    pub fn add_team_member<H: SurfaceHost>(
        &mut self,
        host: &mut H,
        name: &str,
        member: impl Into<Member>,
    ) -> bool {
        let surfaces = self.surface_ids();
        self.core.add_team_member(host, &surfaces, name, member.into())
    }

    /// Remove a member from a team.
    pub fn remove_team_member<H: SurfaceHost>(
        &mut self,
        host: &mut H,
        name: &str,
        member: impl Into<Member>,
    ) -> bool {
        let surfaces = self.surface_ids();
        self.core
            .remove_team_member(host, &surfaces, name, &member.into())
    }

    /// Re-apply every team's membership to the shared surface.
    pub fn refresh_teams<H: SurfaceHost>(&mut self, host: &mut H) {
        let surfaces = self.surface_ids();
        let names: Vec<String> = self.core.teams().iter().map(|t| t.name().to_string()).collect();
        for name in names {
            self.core.refresh_team(host, &surfaces, &name);
        }
    }

    /// Find a team by name (case-insensitive).
    pub fn find_team(&self, name: &str) -> Option<&Team> {
        self.core.find_team(name)
    }

    /// All user teams on this board.
    pub fn teams(&self) -> &[Team] {
        self.core.teams()
    }

    // MARK: Internal

    /// Create the shared surface on first need and show it to every viewer
    /// already on the board.
    fn ensure_surface<H: SurfaceHost>(&mut self, host: &mut H) -> SurfaceId {
        if let Some(surface) = self.surface {
            return surface;
        }

        let surface = host.create_surface();
        debug!(%surface, "created shared surface");
        for &viewer in self.core.viewers() {
            host.assign_surface(viewer, surface);
        }
        self.surface = Some(surface);
        surface
    }

    fn surface_ids(&self) -> Vec<SurfaceId> {
        self.surface.into_iter().collect()
    }
}

impl std::fmt::Debug for GlobalBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalBoard")
            .field("surface", &self.surface)
            .field("viewers", &self.core.viewers().len())
            .field("teams", &self.core.teams().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::PlainTranslator;
    use crate::surface::{MemoryHost, RenderSurface};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn encoder() -> LineEncoder<PlainTranslator> {
        LineEncoder::new(PlainTranslator)
    }

    fn fixed_board(lines: &[&str]) -> GlobalBoard {
        let lines: Vec<String> = lines.iter().map(ToString::to_string).collect();
        GlobalBoard::new(BoardConfig::default(), || "Arena".to_string(), move || {
            lines.clone()
        })
    }

    #[test]
    fn test_surface_created_lazily() {
        let mut host = MemoryHost::new();
        let mut board = fixed_board(&["A"]);
        assert_eq!(board.surface(), None);

        board.update(&mut host, &encoder()).unwrap();
        let surface = board.surface().unwrap();
        assert_eq!(
            host.surface(surface).unwrap().rendered_lines(),
            vec!["A"]
        );
    }

    #[test]
    fn test_add_viewer_assigns_shared_surface() {
        let mut host = MemoryHost::new();
        let mut board = fixed_board(&["A", "B"]);
        let viewer = host.connect("Ana");

        assert!(board.add_viewer(&mut host, &encoder(), viewer).unwrap());
        assert_eq!(host.assigned(viewer), board.surface());

        // Duplicate add is a no-op.
        assert!(!board.add_viewer(&mut host, &encoder(), viewer).unwrap());
    }

    #[test]
    fn test_viewers_present_before_first_update_get_the_surface() {
        let mut host = MemoryHost::new();
        let viewer = host.connect("Ana");
        let mut board = fixed_board(&["A"]);
        // Joins while no surface exists yet.
        board.add_viewer(&mut host, &encoder(), viewer).unwrap();
        assert_eq!(host.assigned(viewer), board.surface());
    }

    #[test]
    fn test_provider_swap_changes_content() {
        let mut host = MemoryHost::new();
        let mut board = fixed_board(&["old"]);
        board.update(&mut host, &encoder()).unwrap();

        board.set_lines(|| vec!["new".to_string()]);
        board.update(&mut host, &encoder()).unwrap();
        let surface = board.surface().unwrap();
        assert_eq!(host.surface(surface).unwrap().rendered_lines(), vec!["new"]);
    }

    #[test]
    fn test_providers_resolved_each_update() {
        let mut host = MemoryHost::new();
        let counter = Rc::new(RefCell::new(0));
        let seen = Rc::clone(&counter);
        let mut board = GlobalBoard::new(
            BoardConfig::default(),
            || "T".to_string(),
            move || {
                *seen.borrow_mut() += 1;
                vec![format!("tick {}", seen.borrow())]
            },
        );

        board.update(&mut host, &encoder()).unwrap();
        board.update(&mut host, &encoder()).unwrap();
        assert_eq!(*counter.borrow(), 2);

        let surface = board.surface().unwrap();
        assert_eq!(
            host.surface(surface).unwrap().rendered_lines(),
            vec!["tick 2"]
        );
    }

    #[test]
    fn test_shrink_scenario() {
        let mut host = MemoryHost::new();
        let mut board = fixed_board(&["A", "B", "C"]);
        board.update(&mut host, &encoder()).unwrap();

        board.set_lines(|| vec!["A".to_string(), "B".to_string()]);
        board.update(&mut host, &encoder()).unwrap();

        let s = host.surface(board.surface().unwrap()).unwrap();
        assert!(s.stats().score_resets >= 1);
        assert!(!s.has_team("line3"));
        assert_eq!(s.rendered_lines(), vec!["A", "B"]);
    }

    #[test]
    fn test_destroy_resets_viewers_and_teams() {
        let mut host = MemoryHost::new();
        let mut board = fixed_board(&["A"]);
        let ana = host.connect("Ana");
        let ben = host.connect("Ben");
        board.add_viewer(&mut host, &encoder(), ana).unwrap();
        board.add_viewer(&mut host, &encoder(), ben).unwrap();
        board.create_team(&mut host, "crew", "Crew").unwrap();

        board.destroy(&mut host);
        assert_eq!(host.assigned(ana), Some(MemoryHost::MAIN));
        assert_eq!(host.assigned(ben), Some(MemoryHost::MAIN));
        assert!(board.teams().is_empty());
        assert_eq!(board.surface(), None);

        // Idempotent, even with no viewers left.
        board.destroy(&mut host);
    }

    #[test]
    fn test_team_membership_rendered_on_shared_surface() {
        let mut host = MemoryHost::new();
        let mut board = fixed_board(&["A"]);
        let ana = host.connect("Ana");
        board.add_viewer(&mut host, &encoder(), ana).unwrap();
        board.create_team(&mut host, "crew", "Crew").unwrap();
        board.add_team_member(&mut host, "crew", ana);

        let s = host.surface(board.surface().unwrap()).unwrap();
        assert!(s.team_has_entry("crew", "Ana"));
        assert_eq!(s.team_display("crew"), Some("Crew"));

        board.remove_team_member(&mut host, "crew", ana);
        let s = host.surface(board.surface().unwrap()).unwrap();
        assert!(!s.team_has_entry("crew", "Ana"));
    }
}
