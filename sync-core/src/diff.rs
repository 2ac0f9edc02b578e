//! State diff for team memberships.
//!
//! Given the previously declared teams of a user and the newly declared
//! teams, [`MembershipDiff::compute`] partitions team identities into
//! removals, additions and admin-flag updates. This is a pure function -
//! the caller (sync-client) executes the resulting [`Operation`]s.
//!
//! A team present on both sides is always an update, never a remove+add
//! pair, so a user whose admin flag changes keeps access throughout.

use std::collections::BTreeMap;
use std::fmt;

use teamsync_types::TeamId;

use crate::desired::TeamAssignment;

/// One remote call needed to move from the old state to the new state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Remove the user from a team.
    Remove {
        /// Team to leave.
        team_id: TeamId,
    },
    /// Invite the user to a team.
    Add {
        /// Team to join.
        team_id: TeamId,
        /// Admin flag to request.
        is_admin: bool,
    },
    /// Set the admin flag of an existing membership.
    UpdateAdmin {
        /// Team of the membership.
        team_id: TeamId,
        /// New admin flag.
        is_admin: bool,
    },
}

impl Operation {
    /// Team this operation targets.
    pub fn team_id(&self) -> TeamId {
        match self {
            Self::Remove { team_id }
            | Self::Add { team_id, .. }
            | Self::UpdateAdmin { team_id, .. } => *team_id,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remove { team_id } => write!(f, "remove from team {}", team_id),
            Self::Add { team_id, is_admin } => {
                write!(f, "invite to team {} (admin: {})", team_id, is_admin)
            }
            Self::UpdateAdmin { team_id, is_admin } => {
                write!(f, "set admin={} in team {}", is_admin, team_id)
            }
        }
    }
}

/// The partition of old and new team identities.
///
/// Every list is sorted by team id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipDiff {
    /// Teams only in the old state.
    pub to_remove: Vec<TeamId>,
    /// Assignments only in the new state.
    pub to_add: Vec<TeamAssignment>,
    /// Teams in both states, carrying the new admin flag.
    pub to_update: Vec<TeamAssignment>,
}

impl MembershipDiff {
    /// Compute the diff between two declared states.
    ///
    /// Both inputs are borrowed and left untouched. Team identities are
    /// expected to be unique within each input; if one repeats, the last
    /// occurrence wins.
    ///
    /// A team present in both states becomes an update even when its admin
    /// flag did not change, so `compute(x, x)` yields one no-op update per
    /// team.
    pub fn compute(old: &[TeamAssignment], new: &[TeamAssignment]) -> Self {
        let old_teams = by_team(old);
        let new_teams = by_team(new);

        let to_remove = old_teams
            .keys()
            .filter(|team_id| !new_teams.contains_key(team_id))
            .copied()
            .collect();

        let (to_update, to_add): (Vec<_>, Vec<_>) = new_teams
            .iter()
            .map(|(&team_id, &is_admin)| TeamAssignment { team_id, is_admin })
            .partition(|assignment| old_teams.contains_key(&assignment.team_id));

        Self {
            to_remove,
            to_add,
            to_update,
        }
    }

    /// True when there is nothing to remove, add or update.
    pub fn is_empty(&self) -> bool {
        self.to_remove.is_empty() && self.to_add.is_empty() && self.to_update.is_empty()
    }

    /// Updates whose admin flag differs from `old`.
    ///
    /// The operation plan still carries every update; this only reports
    /// which of them change something.
    pub fn changed_updates(&self, old: &[TeamAssignment]) -> Vec<TeamAssignment> {
        let old_teams = by_team(old);
        self.to_update
            .iter()
            .filter(|a| old_teams.get(&a.team_id) != Some(&a.is_admin))
            .copied()
            .collect()
    }

    /// The ordered operation list: every removal, then every addition,
    /// then every update.
    pub fn operations(&self) -> Vec<Operation> {
        let removes = self
            .to_remove
            .iter()
            .map(|&team_id| Operation::Remove { team_id });
        let adds = self.to_add.iter().map(|a| Operation::Add {
            team_id: a.team_id,
            is_admin: a.is_admin,
        });
        let updates = self.to_update.iter().map(|a| Operation::UpdateAdmin {
            team_id: a.team_id,
            is_admin: a.is_admin,
        });
        removes.chain(adds).chain(updates).collect()
    }
}

/// Diff two declared states and return the ordered operation list.
pub fn plan(old: &[TeamAssignment], new: &[TeamAssignment]) -> Vec<Operation> {
    MembershipDiff::compute(old, new).operations()
}

fn by_team(assignments: &[TeamAssignment]) -> BTreeMap<TeamId, bool> {
    assignments
        .iter()
        .map(|a| (a.team_id, a.is_admin))
        .collect()
}
