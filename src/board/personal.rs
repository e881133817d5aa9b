//! The per-viewer board: every viewer gets its own surface and content.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::error::BoardError;
use crate::line::{LineEncoder, Translator};
use crate::surface::{SurfaceHost, SurfaceId, ViewerId};

use super::core::{BoardConfig, BoardCore};
use super::team::{Member, Team};

/// Produces the title a given viewer sees.
pub type ViewerTitleProvider = Box<dyn Fn(ViewerId) -> String>;

/// Produces the lines a given viewer sees, top-most line first.
pub type ViewerLinesProvider = Box<dyn Fn(ViewerId) -> Vec<String>>;

/// A board with one rendering surface per viewer.
///
/// Title and lines are functions of the viewer, so every viewer can see
/// different content. Each viewer's surface is diffed independently.
pub struct PersonalBoard {
    core: BoardCore,
    surfaces: HashMap<ViewerId, SurfaceId>,
    title: ViewerTitleProvider,
    lines: ViewerLinesProvider,
}

impl PersonalBoard {
    /// Create a personal board from its viewer-dependent providers.
    pub fn new(
        config: BoardConfig,
        title: impl Fn(ViewerId) -> String + 'static,
        lines: impl Fn(ViewerId) -> Vec<String> + 'static,
    ) -> Self {
        Self {
            core: BoardCore::new(config),
            surfaces: HashMap::new(),
            title: Box::new(title),
            lines: Box::new(lines),
        }
    }

    /// The surface shown to a viewer, if it has one.
    pub fn surface_for(&self, viewer: ViewerId) -> Option<SurfaceId> {
        self.surfaces.get(&viewer).copied()
    }

    /// Ids of the viewers currently on this board.
    pub fn viewers(&self) -> &[ViewerId] {
        self.core.viewers()
    }

    /// Swap the title provider.
    pub fn set_title(&mut self, title: impl Fn(ViewerId) -> String + 'static) {
        self.title = Box::new(title);
    }

    /// Swap the lines provider.
    pub fn set_lines(&mut self, lines: impl Fn(ViewerId) -> Vec<String> + 'static) {
        self.lines = Box::new(lines);
    }

    /// Synchronize every resolvable viewer's surface with that viewer's
    /// own resolved content.
    ///
    /// Unresolvable (disconnected) viewers are skipped without error:
    /// disconnection is an expected transient state.
    pub fn update<H: SurfaceHost, T: Translator>(
        &mut self,
        host: &mut H,
        encoder: &LineEncoder<T>,
    ) -> Result<(), BoardError> {
        let viewers: Vec<ViewerId> = self.core.viewers().to_vec();
        for viewer in viewers {
            if host.viewer_name(viewer).is_none() {
                trace!(%viewer, "viewer unresolvable, skipping");
                continue;
            }
            self.update_viewer(host, encoder, viewer)?;
        }
        Ok(())
    }

    /// Add a viewer: create its surface, show it, then render its content.
    /// Returns `false` when the viewer was already present.
    pub fn add_viewer<H: SurfaceHost, T: Translator>(
        &mut self,
        host: &mut H,
        encoder: &LineEncoder<T>,
        viewer: ViewerId,
    ) -> Result<bool, BoardError> {
        if !self.core.add_viewer(viewer) {
            return Ok(false);
        }

        let surface = host.create_surface();
        debug!(%viewer, %surface, "created personal surface");
        host.assign_surface(viewer, surface);
        self.surfaces.insert(viewer, surface);

        self.update_viewer(host, encoder, viewer)?;
        Ok(true)
    }

    /// Remove a viewer: drop its surface mapping, reset it to the main
    /// surface, and strip it from every team.
    pub fn remove_viewer<H: SurfaceHost>(&mut self, host: &mut H, viewer: ViewerId) {
        let surfaces = self.surface_ids();
        self.surfaces.remove(&viewer);
        self.core.remove_viewer(host, &surfaces, viewer);
    }

    /// Tear the board down: every viewer back to the main surface, all
    /// teams, surfaces, and caches cleared. Idempotent.
    pub fn destroy<H: SurfaceHost>(&mut self, host: &mut H) {
        let surfaces = self.surface_ids();
        self.core.destroy(host, &surfaces);
        self.surfaces.clear();
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

    /// Re-apply every team's membership to every viewer's surface.
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

    fn update_viewer<H: SurfaceHost, T: Translator>(
        &mut self,
        host: &mut H,
        encoder: &LineEncoder<T>,
        viewer: ViewerId,
    ) -> Result<(), BoardError> {
        let Some(surface) = self.surface_for(viewer) else {
            return Ok(());
        };
        let title = (self.title)(viewer);
        let lines = (self.lines)(viewer);
        self.core
            .update_surface(host, surface, &title, &lines, encoder)
    }

    fn surface_ids(&self) -> Vec<SurfaceId> {
        let mut ids: Vec<SurfaceId> = self.surfaces.values().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl std::fmt::Debug for PersonalBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersonalBoard")
            .field("surfaces", &self.surfaces.len())
            .field("viewers", &self.core.viewers().len())
            .field("teams", &self.core.teams().len())
            .finish_non_exhaustive()
    }
}
