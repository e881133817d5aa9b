//! Boards: the engine core, the two variants, and teams.

mod core;
mod global;
mod personal;
mod team;

pub use self::core::BoardConfig;
pub use global::{GlobalBoard, LinesProvider, TitleProvider};
pub use personal::{PersonalBoard, ViewerLinesProvider, ViewerTitleProvider};
pub use team::{Member, Team};

use crate::error::BoardError;
use crate::line::{LineEncoder, Translator};
use crate::surface::{SurfaceHost, ViewerId};

/// A board of either variant.
///
/// Hosts that manage a mixed set of boards can hold this instead of the
/// concrete types; every shared operation dispatches on the variant here,
/// so nothing downstream needs to know which flavor it has.
#[derive(Debug)]
pub enum Board {
    /// One shared surface for all viewers.
    Global(GlobalBoard),
    /// One surface per viewer.
    Personal(PersonalBoard),
}

impl Board {
    /// Synchronize the board's surface(s) with freshly resolved content.
    pub fn update<H: SurfaceHost, T: Translator>(
        &mut self,
        host: &mut H,
        encoder: &LineEncoder<T>,
    ) -> Result<(), BoardError> {
        match self {
            Self::Global(board) => board.update(host, encoder),
            Self::Personal(board) => board.update(host, encoder),
        }
    }

    /// Add a viewer. Returns `false` when already present.
    pub fn add_viewer<H: SurfaceHost, T: Translator>(
        &mut self,
        host: &mut H,
        encoder: &LineEncoder<T>,
        viewer: ViewerId,
    ) -> Result<bool, BoardError> {
        match self {
            Self::Global(board) => board.add_viewer(host, encoder, viewer),
            Self::Personal(board) => board.add_viewer(host, encoder, viewer),
        }
    }

    /// Remove a viewer, resetting it to the main surface.
    pub fn remove_viewer<H: SurfaceHost>(&mut self, host: &mut H, viewer: ViewerId) {
        match self {
            Self::Global(board) => board.remove_viewer(host, viewer),
            Self::Personal(board) => board.remove_viewer(host, viewer),
        }
    }

    /// Ids of the viewers currently on this board.
    pub fn viewers(&self) -> &[ViewerId] {
        match self {
            Self::Global(board) => board.viewers(),
            Self::Personal(board) => board.viewers(),
        }
    }

    /// Tear the board down. Idempotent.
    pub fn destroy<H: SurfaceHost>(&mut self, host: &mut H) {
        match self {
            Self::Global(board) => board.destroy(host),
            Self::Personal(board) => board.destroy(host),
        }
    }

    /// Create a user team.
    pub fn create_team<H: SurfaceHost>(
        &mut self,
        host: &mut H,
        name: &str,
        display: &str,
    ) -> Result<(), BoardError> {
        match self {
            Self::Global(board) => board.create_team(host, name, display),
            Self::Personal(board) => board.create_team(host, name, display),
        }
    }

    /// Remove a user team.
    pub fn remove_team<H: SurfaceHost>(&mut self, host: &mut H, name: &str) -> bool {
        match self {
            Self::Global(board) => board.remove_team(host, name),
            Self::Personal(board) => board.remove_team(host, name),
        }
    }

    /// Rename a user team.
    pub fn rename_team<H: SurfaceHost>(
        &mut self,
        host: &mut H,
        name: &str,
        new_name: &str,
    ) -> Result<bool, BoardError> {
        match self {
            Self::Global(board) => board.rename_team(host, name, new_name),
            Self::Personal(board) => board.rename_team(host, name, new_name),
        }
    }

    /// Change a team's display label.
    pub fn set_team_display<H: SurfaceHost>(
        &mut self,
        host: &mut H,
        name: &str,
        display: &str,
    ) -> bool {
        match self {
            Self::Global(board) => board.set_team_display(host, name, display),
            Self::Personal(board) => board.set_team_display(host, name, display),
        }
    }

    /// Add a member to a team.
    pub fn add_team_member<H: SurfaceHost>(
        &mut self,
        host: &mut H,
        name: &str,
        member: impl Into<Member>,
    ) -> bool {
        match self {
            Self::Global(board) => board.add_team_member(host, name, member),
            Self::Personal(board) => board.add_team_member(host, name, member),
        }
    }

    /// Remove a member from a team.
    pub fn remove_team_member<H: SurfaceHost>(
        &mut self,
        host: &mut H,
        name: &str,
        member: impl Into<Member>,
    ) -> bool {
        match self {
            Self::Global(board) => board.remove_team_member(host, name, member),
            Self::Personal(board) => board.remove_team_member(host, name, member),
        }
    }

    /// Re-apply every team's membership to every relevant surface.
    pub fn refresh_teams<H: SurfaceHost>(&mut self, host: &mut H) {
        match self {
            Self::Global(board) => board.refresh_teams(host),
            Self::Personal(board) => board.refresh_teams(host),
        }
    }

    /// Find a team by name (case-insensitive).
    pub fn find_team(&self, name: &str) -> Option<&Team> {
        match self {
            Self::Global(board) => board.find_team(name),
            Self::Personal(board) => board.find_team(name),
        }
    }

    /// All user teams on this board.
    pub fn teams(&self) -> &[Team] {
        match self {
            Self::Global(board) => board.teams(),
            Self::Personal(board) => board.teams(),
        }
    }
}

impl From<GlobalBoard> for Board {
    fn from(board: GlobalBoard) -> Self {
        Self::Global(board)
    }
}

impl From<PersonalBoard> for Board {
    fn from(board: PersonalBoard) -> Self {
        Self::Personal(board)
    }
}
