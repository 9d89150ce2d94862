use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentSummary {
    pub id: String,
    pub name: String,
}

/// Both tournament sets as returned by `/api/tournaments`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentLists {
    #[serde(default)]
    pub active: Vec<TournamentSummary>,
    #[serde(default)]
    pub archived: Vec<TournamentSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TournamentsResponse {
    pub tournaments: TournamentLists,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentScope {
    #[default]
    Active,
    Archived,
}

impl TournamentScope {
    pub fn from_archived(show_archived: bool) -> Self {
        if show_archived { Self::Archived } else { Self::Active }
    }
}

impl TournamentLists {
    /// Tournaments visible for `scope`. The active list is cut to `max_active`, keeping order.
    pub fn visible(&self, scope: TournamentScope, max_active: usize) -> &[TournamentSummary] {
        match scope {
            TournamentScope::Active => &self.active[..self.active.len().min(max_active)],
            TournamentScope::Archived => &self.archived,
        }
    }
}
