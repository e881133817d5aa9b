//! User-created teams.
//!
//! A team groups members under a display label on every surface its board
//! touches. Teams are plain data addressed by name; all surface work goes
//! through the owning board, which knows which surfaces are relevant.

use crate::surface::{SurfaceHost, ViewerId};

/// A member of a team: a viewer identity or a raw entry string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    /// A viewer, rendered under its resolved display name (or its raw id
    /// when unresolvable).
    Viewer(ViewerId),
    /// A literal entry string, rendered as-is.
    Raw(String),
}

impl Member {
    /// The surface entry this member renders as.
    pub fn entry<H: SurfaceHost>(&self, host: &H) -> String {
        match self {
            Self::Viewer(id) => host
                .viewer_name(*id)
                .unwrap_or_else(|| id.to_string()),
            Self::Raw(entry) => entry.clone(),
        }
    }
}

impl From<ViewerId> for Member {
    fn from(id: ViewerId) -> Self {
        Self::Viewer(id)
    }
}

/// A named member grouping rendered with a display label.
///
/// Name uniqueness (case-insensitive) and the name length bound are
/// enforced by the owning board at creation and rename.
#[derive(Debug, Clone)]
pub struct Team {
    pub(crate) name: String,
    pub(crate) display: String,
    pub(crate) members: Vec<Member>,
}

impl Team {
    pub(crate) const fn new(name: String, display: String) -> Self {
        Self {
            name,
            display,
            members: Vec::new(),
        }
    }

    /// The team's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The team's display label.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// The team's members.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Whether a viewer is on this team.
    pub fn is_member(&self, viewer: ViewerId) -> bool {
        self.members.contains(&Member::Viewer(viewer))
    }

    /// Resolve every member to its surface entry.
    pub(crate) fn entries<H: SurfaceHost>(&self, host: &H) -> Vec<String> {
        self.members.iter().map(|m| m.entry(host)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemoryHost;

    #[test]
    fn test_member_resolves_to_display_name() {
        let mut host = MemoryHost::new();
        let viewer = host.connect("Sam");
        assert_eq!(Member::Viewer(viewer).entry(&host), "Sam");
    }

    #[test]
    fn test_unresolvable_member_falls_back_to_raw_id() {
        let mut host = MemoryHost::new();
        let viewer = host.connect("Sam");
        host.disconnect(viewer);
        assert_eq!(Member::Viewer(viewer).entry(&host), viewer.to_string());
    }

    #[test]
    fn test_raw_member_renders_as_is() {
        let host = MemoryHost::new();
        let member = Member::Raw("Herobrine".to_string());
        assert_eq!(member.entry(&host), "Herobrine");
    }

    #[test]
    fn test_membership_predicate() {
        let mut host = MemoryHost::new();
        let on = host.connect("On");
        let off = host.connect("Off");
        let mut team = Team::new("crew".to_string(), "Crew".to_string());
        team.members.push(Member::Viewer(on));

        assert!(team.is_member(on));
        assert!(!team.is_member(off));
    }
}
