//! Records returned by the team API.
//!
//! These are read-only reflections of remote state. They are re-fetched on
//! every reconciliation pass and never cached between calls.

use serde::{Deserialize, Serialize};

use crate::{InvitationId, MemberId, ProjectId, TeamId};

/// A team with its accepted members and pending invitations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Team identifier.
    pub id: TeamId,
    /// Display name.
    pub name: String,
    /// Creation timestamp as sent by the server.
    #[serde(default)]
    pub created_at: Option<String>,
    /// The account that owns the team.
    #[serde(default)]
    pub owner: Owner,
    /// Accepted members, in server order.
    #[serde(default, deserialize_with = "crate::envelope::nullable_vec")]
    pub members: Vec<Member>,
    /// Pending invitations, in server order.
    #[serde(default, deserialize_with = "crate::envelope::nullable_vec")]
    pub invitations: Vec<Invitation>,
    /// Projects owned by the team.
    #[serde(default, deserialize_with = "crate::envelope::nullable_vec")]
    pub projects: Vec<ProjectSummary>,
}

/// Owner of a team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    /// Owner account identifier.
    #[serde(default)]
    pub id: u64,
    /// Owner email.
    #[serde(default)]
    pub email: String,
    /// Owner display name.
    #[serde(default)]
    pub name: Option<String>,
}

/// A user with confirmed membership in a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Membership identifier, unique within the team.
    pub id: MemberId,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Email address.
    pub email: String,
    /// Creation timestamp as sent by the server.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Whether the member administers the team.
    #[serde(default)]
    pub admin: bool,
}

/// A pending, unconfirmed membership request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    /// Invitation identifier.
    pub id: InvitationId,
    /// Invitation token.
    #[serde(default)]
    pub token: Option<String>,
    /// Invited email address.
    pub email: String,
    /// Whether the invitee becomes an admin on acceptance.
    #[serde(default)]
    pub admin: bool,
    /// Acceptance timestamp, if accepted.
    #[serde(default)]
    pub accepted_at: Option<String>,
    /// Creation timestamp as sent by the server.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Project reference embedded in a team record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// Project identifier.
    pub id: ProjectId,
    /// Project name.
    #[serde(default)]
    pub name: String,
}

/// A project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project identifier.
    pub id: ProjectId,
    /// Project name.
    pub name: String,
    /// Primary language, if set.
    #[serde(default)]
    pub language: Option<String>,
    /// Environments reported for the project.
    #[serde(default, deserialize_with = "crate::envelope::nullable_vec")]
    pub environments: Vec<String>,
    /// Creation timestamp as sent by the server.
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Team {
    /// Find an accepted member by email.
    pub fn member_by_email(&self, email: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.email == email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_decodes_with_nested_collections() {
        let json = r#"{
            "id": 10,
            "name": "Platform",
            "created_at": "2021-01-01T00:00:00Z",
            "owner": {"id": 1, "email": "owner@example.com", "name": "Owner"},
            "members": [
                {"id": 100, "name": "Ana", "email": "ana@example.com", "created_at": "x", "admin": true}
            ],
            "invitations": [
                {"id": 200, "token": "t", "email": "bo@example.com", "admin": false,
                 "accepted_at": null, "created_at": "y"}
            ],
            "projects": [{"id": 5, "name": "web"}]
        }"#;

        let team: Team = serde_json::from_str(json).unwrap();
        assert_eq!(team.id, TeamId::new(10));
        assert_eq!(team.owner.email, "owner@example.com");
        assert_eq!(team.members[0].id, MemberId::new(100));
        assert!(team.members[0].admin);
        assert_eq!(team.invitations[0].id, InvitationId::new(200));
        assert!(team.invitations[0].accepted_at.is_none());
        assert_eq!(team.projects[0].id, ProjectId::new(5));
    }

    #[test]
    fn team_missing_collections_default_to_empty() {
        let team: Team = serde_json::from_str(r#"{"id": 3, "name": "Ops"}"#).unwrap();
        assert!(team.members.is_empty());
        assert!(team.invitations.is_empty());
        assert!(team.projects.is_empty());
        assert_eq!(team.owner, Owner::default());
    }

    #[test]
    fn team_null_collections_decode_as_empty() {
        let team: Team = serde_json::from_str(
            r#"{"id": 1, "name": "a", "members": null, "invitations": null, "projects": null}"#,
        )
        .unwrap();
        assert!(team.members.is_empty());
        assert!(team.invitations.is_empty());
        assert!(team.projects.is_empty());

        let project: Project =
            serde_json::from_str(r#"{"id": 2, "name": "api", "environments": null}"#).unwrap();
        assert!(project.environments.is_empty());
    }

    #[test]
    fn member_by_email_matches_exactly() {
        let team: Team = serde_json::from_str(
            r#"{"id": 1, "name": "A", "members": [{"id": 9, "email": "x@example.com"}]}"#,
        )
        .unwrap();
        assert_eq!(team.member_by_email("x@example.com").unwrap().id, MemberId::new(9));
        assert!(team.member_by_email("y@example.com").is_none());
    }

    #[test]
    fn project_decodes_environments() {
        let project: Project = serde_json::from_str(
            r#"{"id": 1234, "name": "api", "environments": ["development", "production"]}"#,
        )
        .unwrap();
        assert_eq!(project.environments.len(), 2);
        assert!(project.language.is_none());
    }
}
