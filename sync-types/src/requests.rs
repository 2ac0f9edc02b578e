//! Request bodies for mutating API calls.
//!
//! The API nests every body under a resource key, e.g.
//! `{"team_invitation": {"email": "...", "admin": false}}`.

use serde::Serialize;

/// `POST /v2/teams/{team}/team_invitations`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateInvitation {
    /// Nested payload.
    pub team_invitation: InvitationFields,
}

/// `PUT /v2/teams/{team}/team_invitations/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateInvitation {
    /// Nested payload.
    pub team_invitation: AdminFlag,
}

/// Fields of a new invitation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvitationFields {
    /// Email to invite.
    pub email: String,
    /// Admin flag granted on acceptance.
    pub admin: bool,
}

/// `PUT /v2/teams/{team}/team_members/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateMember {
    /// Nested payload.
    pub team_member: AdminFlag,
}

/// A lone admin flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdminFlag {
    /// New admin flag.
    pub admin: bool,
}

/// `POST /v2/teams` and `PUT /v2/teams/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamBody {
    /// Nested payload.
    pub team: TeamFields,
}

/// Writable team fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamFields {
    /// Team name.
    pub name: String,
}

/// `POST /v2/projects` and `PUT /v2/projects/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectBody {
    /// Nested payload.
    pub project: ProjectFields,
}

/// Writable project fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectFields {
    /// Project name.
    pub name: String,
    /// Language, omitted when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl CreateInvitation {
    /// Invitation for `email` with the given admin flag.
    pub fn new(email: &str, admin: bool) -> Self {
        Self {
            team_invitation: InvitationFields {
                email: email.to_string(),
                admin,
            },
        }
    }
}

impl UpdateInvitation {
    /// Change the admin flag of a pending invitation.
    pub fn new(admin: bool) -> Self {
        Self {
            team_invitation: AdminFlag { admin },
        }
    }
}

impl UpdateMember {
    /// Change the admin flag of a member.
    pub fn new(admin: bool) -> Self {
        Self {
            team_member: AdminFlag { admin },
        }
    }
}

impl TeamBody {
    /// Body carrying a team name.
    pub fn new(name: &str) -> Self {
        Self {
            team: TeamFields {
                name: name.to_string(),
            },
        }
    }
}

impl ProjectBody {
    /// Body carrying a project name and optional language.
    ///
    /// An empty language is treated as unset.
    pub fn new(name: &str, language: Option<&str>) -> Self {
        Self {
            project: ProjectFields {
                name: name.to_string(),
                language: language.filter(|l| !l.is_empty()).map(str::to_string),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn invitation_body_shape() {
        let body = serde_json::to_value(CreateInvitation::new("a@example.com", true)).unwrap();
        assert_eq!(
            body,
            json!({"team_invitation": {"email": "a@example.com", "admin": true}})
        );
    }

    #[test]
    fn member_update_body_shape() {
        let body = serde_json::to_value(UpdateMember::new(false)).unwrap();
        assert_eq!(body, json!({"team_member": {"admin": false}}));
    }

    #[test]
    fn project_body_omits_empty_language() {
        let body = serde_json::to_value(ProjectBody::new("web", Some(""))).unwrap();
        assert_eq!(body, json!({"project": {"name": "web"}}));

        let body = serde_json::to_value(ProjectBody::new("web", Some("ruby"))).unwrap();
        assert_eq!(body, json!({"project": {"name": "web", "language": "ruby"}}));
    }

    #[test]
    fn team_body_shape() {
        let body = serde_json::to_value(TeamBody::new("Ops")).unwrap();
        assert_eq!(body, json!({"team": {"name": "Ops"}}));
    }
}
