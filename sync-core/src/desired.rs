//! Declared membership state for one user.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use teamsync_types::TeamId;
use thiserror::Error;

/// One declared (team, admin-flag) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TeamAssignment {
    /// Team the user should belong to.
    #[serde(rename = "id")]
    pub team_id: TeamId,
    /// Whether the user should administer that team.
    #[serde(default)]
    pub is_admin: bool,
}

impl TeamAssignment {
    /// Create an assignment from a raw team id.
    pub fn new(team_id: u64, is_admin: bool) -> Self {
        Self {
            team_id: TeamId::new(team_id),
            is_admin,
        }
    }
}

/// The full declared state of one user: an email and the teams it belongs to.
///
/// Team identities must be unique within `teams`. That invariant is checked
/// by whoever builds the value ([`DesiredUser::check_unique`]), not by the
/// reconciler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredUser {
    /// User email; the user's identity across teams.
    pub email: String,
    /// Declared team assignments.
    #[serde(default, rename = "team")]
    pub teams: Vec<TeamAssignment>,
}

/// A team id declared more than once for the same user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("team {team_id} is declared more than once for {email}")]
pub struct DuplicateTeam {
    /// User email.
    pub email: String,
    /// The repeated team.
    pub team_id: TeamId,
}

impl DesiredUser {
    /// Create a declared state.
    pub fn new(email: &str, teams: Vec<TeamAssignment>) -> Self {
        Self {
            email: email.to_string(),
            teams,
        }
    }

    /// Reject declared states that list the same team twice.
    pub fn check_unique(&self) -> Result<(), DuplicateTeam> {
        let mut seen = BTreeSet::new();
        for assignment in &self.teams {
            if !seen.insert(assignment.team_id) {
                return Err(DuplicateTeam {
                    email: self.email.clone(),
                    team_id: assignment.team_id,
                });
            }
        }
        Ok(())
    }
}
