//! TeamClient - typed access to the team API.
//!
//! This module provides [`TeamClient`], which turns team, membership and
//! project calls into requests on a [`Transport`].
//!
//! # Architecture
//!
//! Collection reads go through [`TeamClient::fetch_all`], an explicit loop
//! driven by the pure [`PageCursor`] from sync-core. Every other call is a
//! single request.
//!
//! ```text
//! Caller → TeamClient → Transport → API
//!              ↓
//!         sync-core (cursor, membership view)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use teamsync_client::{HttpTransport, HttpTransportConfig, TeamClient};
//!
//! let transport = HttpTransport::new(HttpTransportConfig::new("api-token"))?;
//! let client = TeamClient::new(transport);
//!
//! for team in client.list_teams().await? {
//!     println!("{} {}", team.id, team.name);
//! }
//! ```

use serde::{de::DeserializeOwned, Serialize};
use teamsync_core::{MembershipView, PageCursor, DEFAULT_MAX_PAGES};
use teamsync_types::requests::{
    CreateInvitation, ProjectBody, TeamBody, UpdateInvitation, UpdateMember,
};
use teamsync_types::{
    decode, encode, Invitation, InvitationId, Member, MemberId, Page, Project, ProjectId, Team,
    TeamId,
};

use crate::error::ClientError;
use crate::transport::{Method, Transport};

const TEAMS_PATH: &str = "/v2/teams";
const PROJECTS_PATH: &str = "/v2/projects";

/// Typed client for the team API.
pub struct TeamClient<T: Transport> {
    transport: T,
    max_pages: usize,
}

impl<T: Transport> TeamClient<T> {
    /// Create a client over a transport.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Set the page cap for collection fetches.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Get a reference to the transport (for testing).
    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ===========================================
    // Request helpers
    // ===========================================

    async fn call<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Vec<u8>, ClientError> {
        let encoded = body.map(encode).transpose()?;
        let bytes = self
            .transport
            .send(method, path, encoded.as_deref())
            .await?;
        Ok(bytes)
    }

    async fn call_json<B: Serialize, R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<R, ClientError> {
        let bytes = self.call(method, path, Some(body)).await?;
        Ok(decode(&bytes)?)
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.call::<()>(Method::Delete, path, None).await?;
        Ok(())
    }

    /// Fetch every record of a paginated collection.
    ///
    /// Follows `next` links until the server stops returning one. Records
    /// come back in page order. Any failure, including a cyclic link or
    /// exceeding the page cap, discards everything fetched so far.
    pub async fn fetch_all<R: DeserializeOwned>(
        &self,
        start_path: &str,
    ) -> Result<Vec<R>, ClientError> {
        let mut cursor = PageCursor::with_max_pages(start_path, self.max_pages);
        let mut records = Vec::new();

        while let Some(path) = cursor.next_path()? {
            let bytes = self.transport.send(Method::Get, &path, None).await?;
            let page: Page<R> = decode(&bytes)?;
            tracing::debug!(
                "Fetched page {} ({} records, next: {:?})",
                path,
                page.results.len(),
                page.next_path()
            );
            cursor.advance(page.next_path());
            records.extend(page.results);
        }

        Ok(records)
    }

    // ===========================================
    // Teams
    // ===========================================

    /// Every team visible to the token, with members and invitations.
    pub async fn list_teams(&self) -> Result<Vec<Team>, ClientError> {
        self.fetch_all(TEAMS_PATH).await
    }

    /// One team by id.
    pub async fn find_team(&self, team_id: TeamId) -> Result<Team, ClientError> {
        self.list_teams()
            .await?
            .into_iter()
            .find(|t| t.id == team_id)
            .ok_or_else(|| ClientError::not_found("team", team_id))
    }

    /// One team by exact name.
    pub async fn find_team_by_name(&self, name: &str) -> Result<Team, ClientError> {
        self.list_teams()
            .await?
            .into_iter()
            .find(|t| t.name == name)
            .ok_or_else(|| ClientError::not_found("team", name))
    }

    /// Create a team.
    pub async fn create_team(&self, name: &str) -> Result<Team, ClientError> {
        let team: Team = self
            .call_json(Method::Post, TEAMS_PATH, &TeamBody::new(name))
            .await?;
        tracing::info!("Created team {} ({})", team.id, team.name);
        Ok(team)
    }

    /// Rename a team.
    pub async fn rename_team(&self, team_id: TeamId, name: &str) -> Result<(), ClientError> {
        let path = format!("{}/{}", TEAMS_PATH, team_id);
        self.call(Method::Put, &path, Some(&TeamBody::new(name)))
            .await?;
        Ok(())
    }

    /// Delete a team.
    pub async fn delete_team(&self, team_id: TeamId) -> Result<(), ClientError> {
        self.delete(&format!("{}/{}", TEAMS_PATH, team_id)).await
    }

    // ===========================================
    // Members and invitations
    // ===========================================

    /// Accepted members of one team.
    pub async fn list_members(&self, team_id: TeamId) -> Result<Vec<Member>, ClientError> {
        self.fetch_all(&members_path(team_id)).await
    }

    /// Pending invitations of one team.
    pub async fn list_invitations(&self, team_id: TeamId) -> Result<Vec<Invitation>, ClientError> {
        self.fetch_all(&invitations_path(team_id)).await
    }

    /// Invite an email to a team.
    pub async fn invite(
        &self,
        team_id: TeamId,
        email: &str,
        is_admin: bool,
    ) -> Result<Invitation, ClientError> {
        self.call_json(
            Method::Post,
            &invitations_path(team_id),
            &CreateInvitation::new(email, is_admin),
        )
        .await
    }

    /// Set the admin flag of a member.
    pub async fn update_member_admin(
        &self,
        team_id: TeamId,
        member_id: MemberId,
        is_admin: bool,
    ) -> Result<(), ClientError> {
        let path = format!("{}/{}", members_path(team_id), member_id);
        self.call(Method::Put, &path, Some(&UpdateMember::new(is_admin)))
            .await?;
        Ok(())
    }

    /// Remove a member from a team.
    pub async fn remove_member(
        &self,
        team_id: TeamId,
        member_id: MemberId,
    ) -> Result<(), ClientError> {
        self.delete(&format!("{}/{}", members_path(team_id), member_id))
            .await
    }

    /// Set the admin flag a pending invitation will grant.
    pub async fn update_invitation_admin(
        &self,
        team_id: TeamId,
        invitation_id: InvitationId,
        is_admin: bool,
    ) -> Result<(), ClientError> {
        let path = format!("{}/{}", invitations_path(team_id), invitation_id);
        self.call(Method::Put, &path, Some(&UpdateInvitation::new(is_admin)))
            .await?;
        Ok(())
    }

    /// Revoke a pending invitation.
    pub async fn revoke_invitation(
        &self,
        team_id: TeamId,
        invitation_id: InvitationId,
    ) -> Result<(), ClientError> {
        self.delete(&format!("{}/{}", invitations_path(team_id), invitation_id))
            .await
    }

    /// List every team and merge its members and invitations.
    pub async fn membership_view(&self) -> Result<MembershipView, ClientError> {
        let teams = self.list_teams().await?;
        Ok(MembershipView::build(&teams))
    }

    // ===========================================
    // Projects
    // ===========================================

    /// Every project visible to the token.
    pub async fn list_projects(&self) -> Result<Vec<Project>, ClientError> {
        self.fetch_all(PROJECTS_PATH).await
    }

    /// One project by id.
    pub async fn find_project(&self, project_id: ProjectId) -> Result<Project, ClientError> {
        self.list_projects()
            .await?
            .into_iter()
            .find(|p| p.id == project_id)
            .ok_or_else(|| ClientError::not_found("project", project_id))
    }

    /// One project by exact name.
    pub async fn find_project_by_name(&self, name: &str) -> Result<Project, ClientError> {
        self.list_projects()
            .await?
            .into_iter()
            .find(|p| p.name == name)
            .ok_or_else(|| ClientError::not_found("project", name))
    }

    /// Create a project.
    pub async fn create_project(
        &self,
        name: &str,
        language: Option<&str>,
    ) -> Result<Project, ClientError> {
        let project: Project = self
            .call_json(Method::Post, PROJECTS_PATH, &ProjectBody::new(name, language))
            .await?;
        tracing::info!("Created project {} ({})", project.id, project.name);
        Ok(project)
    }

    /// Update a project's name and language.
    pub async fn update_project(
        &self,
        project_id: ProjectId,
        name: &str,
        language: Option<&str>,
    ) -> Result<(), ClientError> {
        let path = format!("{}/{}", PROJECTS_PATH, project_id);
        self.call(Method::Put, &path, Some(&ProjectBody::new(name, language)))
            .await?;
        Ok(())
    }

    /// Delete a project.
    pub async fn delete_project(&self, project_id: ProjectId) -> Result<(), ClientError> {
        self.delete(&format!("{}/{}", PROJECTS_PATH, project_id))
            .await
    }
}

fn members_path(team_id: TeamId) -> String {
    format!("{}/{}/team_members", TEAMS_PATH, team_id)
}

fn invitations_path(team_id: TeamId) -> String {
    format!("{}/{}/team_invitations", TEAMS_PATH, team_id)
}
