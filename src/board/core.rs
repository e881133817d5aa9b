//! The shared board engine: cached diffing, placeholder line teams, and
//! team lifecycle.
//!
//! This is where redundant surface writes die. Every surface the engine
//! has touched carries a cache of the last-applied line sequence; an
//! update whose lines compare equal skips all content mutation and only
//! re-applies user-team membership. A length change triggers a hard reset
//! of the sidebar before the new lines go out, so shrunk boards never
//! leave orphaned placeholder teams behind.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::color::entry_tokens;
use crate::error::BoardError;
use crate::line::{EncodedLine, LineEncoder, Translator, TEAM_NAME_WIDTH};
use crate::surface::{DisplaySlot, RenderSurface, SurfaceHost, SurfaceId, ViewerId};

use super::team::{Member, Team};

/// Name prefix of the internally owned placeholder teams that carry line
/// content. `line1` is the bottom-most line (score 1).
const LINE_TEAM_PREFIX: &str = "line";

/// Configuration for a board.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Identifier of the display objective registered on each surface.
    pub objective_id: String,
    /// Slot the objective is displayed in.
    pub slot: DisplaySlot,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            objective_id: "sideboard".to_string(),
            slot: DisplaySlot::Sidebar,
        }
    }
}

/// Whether a surface team name follows the internal `line<N>` convention.
fn is_line_team(name: &str) -> bool {
    name.strip_prefix(LINE_TEAM_PREFIX)
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
}

/// A user team resolved against the host: name, display, surface entries.
type ResolvedTeam = (String, String, Vec<String>);

/// Shared state and algorithms behind both board variants.
#[derive(Debug)]
pub(crate) struct BoardCore {
    config: BoardConfig,
    viewers: Vec<ViewerId>,
    teams: Vec<Team>,
    cache: HashMap<SurfaceId, Vec<String>>,
}

impl BoardCore {
    pub(crate) fn new(config: BoardConfig) -> Self {
        Self {
            config,
            viewers: Vec::new(),
            teams: Vec::new(),
            cache: HashMap::new(),
        }
    }

    pub(crate) fn viewers(&self) -> &[ViewerId] {
        &self.viewers
    }

    /// Add a viewer id. Returns `false` when already present.
    pub(crate) fn add_viewer(&mut self, viewer: ViewerId) -> bool {
        if self.viewers.contains(&viewer) {
            return false;
        }
        self.viewers.push(viewer);
        true
    }

    /// Drop a viewer: reset it to the main surface and strip it from every
    /// team it is on.
    pub(crate) fn remove_viewer<H: SurfaceHost>(
        &mut self,
        host: &mut H,
        surfaces: &[SurfaceId],
        viewer: ViewerId,
    ) {
        self.viewers.retain(|v| *v != viewer);
        host.assign_main_surface(viewer);

        let member = Member::Viewer(viewer);
        let on_teams: Vec<String> = self
            .teams
            .iter()
            .filter(|t| t.members.contains(&member))
            .map(|t| t.name.clone())
            .collect();
        for name in on_teams {
            self.remove_team_member(host, surfaces, &name, &member);
        }
    }

    /// Tear everything down: viewers back to the main surface, teams off
    /// every surface, all collections cleared. Idempotent.
    pub(crate) fn destroy<H: SurfaceHost>(&mut self, host: &mut H, surfaces: &[SurfaceId]) {
        for viewer in self.viewers.drain(..) {
            host.assign_main_surface(viewer);
        }

        let names: Vec<String> = self.teams.iter().map(|t| t.name.clone()).collect();
        for &sid in surfaces {
            if let Some(surface) = host.surface_mut(sid) {
                for name in &names {
                    surface.unregister_team(name);
                }
            }
        }

        self.teams.clear();
        self.cache.clear();
        debug!("board destroyed");
    }

    // MARK: Update algorithm

    /// Synchronize one surface with a resolved title and line sequence.
    ///
    /// All lines are validated, encoded, and tokenized before the first
    /// surface write: a failure aborts with the surface untouched.
    pub(crate) fn update_surface<H: SurfaceHost, T: Translator>(
        &mut self,
        host: &mut H,
        surface: SurfaceId,
        title: &str,
        lines: &[String],
        encoder: &LineEncoder<T>,
    ) -> Result<(), BoardError> {
        let team_sync = self.resolved_teams(host);

        if self.cache.get(&surface).is_some_and(|prev| prev == lines) {
            trace!(%surface, "lines unchanged, skipping content mutation");
            if let Some(s) = host.surface_mut(surface) {
                s.ensure_objective(&self.config.objective_id, title);
                s.set_title(title);
                Self::apply_teams(s, &team_sync);
            }
            return Ok(());
        }

        // Lowest score renders bottom-most, so line 0 must get the highest
        // score: encode in reverse and hand out scores from 1 upward.
        let encoded: Vec<EncodedLine> = lines
            .iter()
            .rev()
            .map(|line| encoder.encode(line))
            .collect::<Result<_, _>>()?;
        let tokens = entry_tokens(encoded.len())?;

        let needs_reset = self
            .cache
            .get(&surface)
            .is_some_and(|prev| prev.len() != lines.len());

        let Some(s) = host.surface_mut(surface) else {
            trace!(%surface, "surface gone, skipping update");
            return Ok(());
        };

        s.ensure_objective(&self.config.objective_id, title);
        s.set_title(title);

        if needs_reset {
            debug!(%surface, lines = lines.len(), "line count changed, hard reset");
            s.clear_slot(self.config.slot);
            s.reset_scores();
            for name in s.team_names() {
                if is_line_team(&name) {
                    s.unregister_team(&name);
                }
            }
        }

        s.set_display_slot(self.config.slot);

        for (index, line) in encoded.iter().enumerate() {
            let score = index + 1;
            let team_name = format!("{LINE_TEAM_PREFIX}{score}");
            let token = tokens[index].as_str();

            if s.has_team(&team_name) {
                s.team_clear_entries(&team_name);
            } else {
                s.register_team(&team_name);
            }
            s.team_add_entry(&team_name, token);
            s.set_team_prefix(&team_name, &line.prefix);
            s.set_team_suffix(&team_name, &line.suffix);
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            s.set_score(token, score as i32);
        }

        Self::apply_teams(s, &team_sync);

        // Defensive copy: the caller may mutate its sequence afterwards.
        self.cache.insert(surface, lines.to_vec());
        Ok(())
    }

    // MARK: Team lifecycle

    pub(crate) fn find_team(&self, name: &str) -> Option<&Team> {
        self.teams
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub(crate) fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Register a user team and refresh it against every surface.
    pub(crate) fn create_team<H: SurfaceHost>(
        &mut self,
        host: &mut H,
        surfaces: &[SurfaceId],
        name: &str,
        display: &str,
    ) -> Result<(), BoardError> {
        if self.find_team(name).is_some() {
            return Err(BoardError::DuplicateTeam(name.to_string()));
        }
        Self::check_name(name)?;

        debug!(team = name, "team created");
        self.teams
            .push(Team::new(name.to_string(), display.to_string()));
        self.refresh_team(host, surfaces, name);
        Ok(())
    }

    /// Remove a user team, tearing it off every surface. Returns `false`
    /// when no team of this board carries the name.
    pub(crate) fn remove_team<H: SurfaceHost>(
        &mut self,
        host: &mut H,
        surfaces: &[SurfaceId],
        name: &str,
    ) -> bool {
        let Some(index) = self
            .teams
            .iter()
            .position(|t| t.name.eq_ignore_ascii_case(name))
        else {
            return false;
        };

        let team = self.teams.remove(index);
        for &sid in surfaces {
            if let Some(surface) = host.surface_mut(sid) {
                surface.unregister_team(&team.name);
            }
        }
        debug!(team = %team.name, "team removed");
        true
    }

    /// Rename a user team, re-validating the bounds. Returns `false` when
    /// the team does not exist.
    pub(crate) fn rename_team<H: SurfaceHost>(
        &mut self,
        host: &mut H,
        surfaces: &[SurfaceId],
        name: &str,
        new_name: &str,
    ) -> Result<bool, BoardError> {
        let Some(index) = self
            .teams
            .iter()
            .position(|t| t.name.eq_ignore_ascii_case(name))
        else {
            return Ok(false);
        };

        Self::check_name(new_name)?;
        let collision = self
            .teams
            .iter()
            .enumerate()
            .any(|(i, t)| i != index && t.name.eq_ignore_ascii_case(new_name));
        if collision {
            return Err(BoardError::DuplicateTeam(new_name.to_string()));
        }

        let old_name = std::mem::replace(&mut self.teams[index].name, new_name.to_string());
        for &sid in surfaces {
            if let Some(surface) = host.surface_mut(sid) {
                surface.unregister_team(&old_name);
            }
        }
        self.refresh_team(host, surfaces, new_name);
        Ok(true)
    }

    /// Change a team's display label and push it to every surface.
    pub(crate) fn set_team_display<H: SurfaceHost>(
        &mut self,
        host: &mut H,
        surfaces: &[SurfaceId],
        name: &str,
        display: &str,
    ) -> bool {
        let Some(team) = self
            .teams
            .iter_mut()
            .find(|t| t.name.eq_ignore_ascii_case(name))
        else {
            return false;
        };

        display.clone_into(&mut team.display);
        let team_name = team.name.clone();
        self.refresh_team(host, surfaces, &team_name);
        for &sid in surfaces {
            if let Some(surface) = host.surface_mut(sid) {
                surface.set_team_display(&team_name, display);
            }
        }
        true
    }

    /// Add a member to a team and refresh it. Returns `false` when the
    /// team does not exist.
    pub(crate) fn add_team_member<H: SurfaceHost>(
        &mut self,
        host: &mut H,
        surfaces: &[SurfaceId],
        name: &str,
        member: Member,
    ) -> bool {
        let Some(team) = self
            .teams
            .iter_mut()
            .find(|t| t.name.eq_ignore_ascii_case(name))
        else {
            return false;
        };

        if !team.members.contains(&member) {
            team.members.push(member);
        }
        let team_name = team.name.clone();
        self.refresh_team(host, surfaces, &team_name);
        true
    }

    /// Remove a member from a team and tear its entry off every surface.
    pub(crate) fn remove_team_member<H: SurfaceHost>(
        &mut self,
        host: &mut H,
        surfaces: &[SurfaceId],
        name: &str,
        member: &Member,
    ) -> bool {
        let Some(team) = self
            .teams
            .iter_mut()
            .find(|t| t.name.eq_ignore_ascii_case(name))
        else {
            return false;
        };

        // The surface may know this member under its resolved name or its
        // raw id, depending on presence when it was added.
        let mut entries = vec![member.entry(host)];
        if let Member::Viewer(id) = member {
            entries.push(id.to_string());
        }

        team.members.retain(|m| m != member);
        let team_name = team.name.clone();
        for &sid in surfaces {
            if let Some(surface) = host.surface_mut(sid) {
                for entry in &entries {
                    surface.team_remove_entry(&team_name, entry);
                }
            }
        }
        true
    }

    /// Ensure every member of a team has an entry on every surface.
    pub(crate) fn refresh_team<H: SurfaceHost>(
        &self,
        host: &mut H,
        surfaces: &[SurfaceId],
        name: &str,
    ) {
        let Some(team) = self.find_team(name) else {
            return;
        };
        let resolved = (team.name.clone(), team.display.clone(), team.entries(host));

        for &sid in surfaces {
            if let Some(surface) = host.surface_mut(sid) {
                Self::apply_teams(surface, std::slice::from_ref(&resolved));
            }
        }
    }

    /// Resolve every user team's members to surface entries.
    fn resolved_teams<H: SurfaceHost>(&self, host: &H) -> Vec<ResolvedTeam> {
        self.teams
            .iter()
            .map(|t| (t.name.clone(), t.display.clone(), t.entries(host)))
            .collect()
    }

    /// Apply resolved user teams to one surface, touching only what is
    /// missing.
    fn apply_teams<S: RenderSurface>(surface: &mut S, teams: &[ResolvedTeam]) {
        for (name, display, entries) in teams {
            if !surface.has_team(name) {
                surface.register_team(name);
                surface.set_team_display(name, display);
            }
            for entry in entries {
                if !surface.team_has_entry(name, entry) {
                    surface.team_add_entry(name, entry);
                }
            }
        }
    }

    /// Validate the team name length bound.
    fn check_name(name: &str) -> Result<(), BoardError> {
        let length = name.chars().count();
        if length > TEAM_NAME_WIDTH {
            return Err(BoardError::TeamNameTooLong {
                name: name.to_string(),
                length,
                max: TEAM_NAME_WIDTH,
            });
        }
        Ok(())
    }
}
