//! Unified membership view.
//!
//! The API reports accepted members and pending invitations as two separate
//! collections per team. This module merges them into one record per
//! (email, team) pair so that a pending invite is visible as a membership
//! until it is accepted.
//!
//! Precedence is decided per team: when the same email is both a member and
//! an invitee of one team, only the member record is kept. An invitation in
//! another team is unaffected.

use std::collections::HashSet;

use teamsync_types::{InvitationId, MemberId, Team, TeamId};

use crate::desired::TeamAssignment;

/// Which remote identity currently stands for a membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MembershipRef {
    /// An accepted member.
    Member(MemberId),
    /// A pending invitation.
    Invitation(InvitationId),
}

impl MembershipRef {
    /// Raw identifier regardless of source.
    pub fn value(&self) -> u64 {
        match self {
            Self::Member(id) => id.value(),
            Self::Invitation(id) => id.value(),
        }
    }

    /// True for a pending invitation.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Invitation(_))
    }
}

/// One user's membership in one team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipRecord {
    /// User email.
    pub email: String,
    /// Team of the membership.
    pub team_id: TeamId,
    /// Authoritative identity for this (email, team) pair.
    pub membership: MembershipRef,
    /// Admin flag.
    pub is_admin: bool,
}

impl MembershipRecord {
    /// This record in declared-state shape.
    pub fn assignment(&self) -> TeamAssignment {
        TeamAssignment {
            team_id: self.team_id,
            is_admin: self.is_admin,
        }
    }
}

/// Membership records across every visible team.
///
/// Holds at most one record per (email, team) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipView {
    records: Vec<MembershipRecord>,
}

impl MembershipView {
    /// Merge the members and invitations of every team.
    ///
    /// Records keep team order, then member order, then invitation order.
    pub fn build(teams: &[Team]) -> Self {
        let mut records = Vec::new();

        for team in teams {
            // Scoped to this team only.
            let mut seen: HashSet<&str> = HashSet::new();

            for member in &team.members {
                if !seen.insert(member.email.as_str()) {
                    continue;
                }
                records.push(MembershipRecord {
                    email: member.email.clone(),
                    team_id: team.id,
                    membership: MembershipRef::Member(member.id),
                    is_admin: member.admin,
                });
            }

            for invitation in &team.invitations {
                if !seen.insert(invitation.email.as_str()) {
                    continue;
                }
                records.push(MembershipRecord {
                    email: invitation.email.clone(),
                    team_id: team.id,
                    membership: MembershipRef::Invitation(invitation.id),
                    is_admin: invitation.admin,
                });
            }
        }

        Self { records }
    }

    /// Every record in the view.
    pub fn records(&self) -> &[MembershipRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no team has any member or invitation.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All memberships of one email.
    pub fn for_email(&self, email: &str) -> Vec<&MembershipRecord> {
        self.records.iter().filter(|r| r.email == email).collect()
    }

    /// The membership of one email in one team, if any.
    pub fn lookup(&self, email: &str, team_id: TeamId) -> Option<&MembershipRecord> {
        self.records
            .iter()
            .find(|r| r.team_id == team_id && r.email == email)
    }

    /// Observed state of one email in declared-state shape.
    pub fn assignments(&self, email: &str) -> Vec<TeamAssignment> {
        self.records
            .iter()
            .filter(|r| r.email == email)
            .map(MembershipRecord::assignment)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teamsync_types::{Invitation, Member, Owner};

    fn member(id: u64, email: &str, admin: bool) -> Member {
        Member {
            id: MemberId::new(id),
            name: None,
            email: email.to_string(),
            created_at: None,
            admin,
        }
    }

    fn invitation(id: u64, email: &str, admin: bool) -> Invitation {
        Invitation {
            id: InvitationId::new(id),
            token: None,
            email: email.to_string(),
            admin,
            accepted_at: None,
            created_at: None,
        }
    }

    fn team(id: u64, members: Vec<Member>, invitations: Vec<Invitation>) -> Team {
        Team {
            id: TeamId::new(id),
            name: format!("team-{}", id),
            created_at: None,
            owner: Owner::default(),
            members,
            invitations,
            projects: vec![],
        }
    }

    const E: &str = "e@example.com";

    #[test]
    fn members_and_invitations_become_records() {
        let view = MembershipView::build(&[team(
            1,
            vec![member(10, "a@example.com", true)],
            vec![invitation(20, "b@example.com", false)],
        )]);

        assert_eq!(view.len(), 2);
        let a = view.lookup("a@example.com", TeamId::new(1)).unwrap();
        assert_eq!(a.membership, MembershipRef::Member(MemberId::new(10)));
        assert!(a.is_admin);

        let b = view.lookup("b@example.com", TeamId::new(1)).unwrap();
        assert_eq!(b.membership, MembershipRef::Invitation(InvitationId::new(20)));
        assert!(b.membership.is_pending());
    }

    #[test]
    fn member_wins_over_invitation_in_same_team() {
        let view = MembershipView::build(&[team(
            1,
            vec![member(10, E, false)],
            vec![invitation(20, E, true)],
        )]);

        let records = view.for_email(E);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].membership, MembershipRef::Member(MemberId::new(10)));
        assert!(!records[0].is_admin);
    }

    #[test]
    fn membership_in_one_team_does_not_hide_invitation_in_another() {
        let view = MembershipView::build(&[
            team(1, vec![member(10, E, true)], vec![]),
            team(2, vec![], vec![invitation(20, E, false)]),
        ]);

        let records = view.for_email(E);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].team_id, TeamId::new(1));
        assert_eq!(records[0].membership, MembershipRef::Member(MemberId::new(10)));
        assert_eq!(records[1].team_id, TeamId::new(2));
        assert_eq!(
            records[1].membership,
            MembershipRef::Invitation(InvitationId::new(20))
        );
    }

    #[test]
    fn invitation_before_membership_in_team_order_is_kept() {
        // Team A only has the invite; team B has the member.
        let view = MembershipView::build(&[
            team(1, vec![], vec![invitation(20, E, false)]),
            team(2, vec![member(10, E, true)], vec![]),
        ]);

        assert!(view.lookup(E, TeamId::new(1)).unwrap().membership.is_pending());
        assert!(!view.lookup(E, TeamId::new(2)).unwrap().membership.is_pending());
    }

    #[test]
    fn repeated_invitations_collapse_to_first() {
        let view = MembershipView::build(&[team(
            1,
            vec![],
            vec![invitation(20, E, false), invitation(21, E, true)],
        )]);

        let records = view.for_email(E);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].membership.value(), 20);
    }

    #[test]
    fn lookup_missing_is_none() {
        let view = MembershipView::build(&[team(1, vec![member(10, E, true)], vec![])]);

        assert!(view.lookup(E, TeamId::new(2)).is_none());
        assert!(view.lookup("other@example.com", TeamId::new(1)).is_none());
        assert!(view.for_email("other@example.com").is_empty());
    }

    #[test]
    fn assignments_reflect_observed_flags() {
        let view = MembershipView::build(&[
            team(1, vec![member(10, E, true)], vec![]),
            team(2, vec![], vec![invitation(20, E, false)]),
            team(3, vec![member(11, "x@example.com", true)], vec![]),
        ]);

        assert_eq!(
            view.assignments(E),
            vec![TeamAssignment::new(1, true), TeamAssignment::new(2, false)]
        );
    }

    #[test]
    fn empty_teams_give_empty_view() {
        let view = MembershipView::build(&[team(1, vec![], vec![])]);
        assert!(view.is_empty());
        assert!(MembershipView::default().records().is_empty());
    }
}
