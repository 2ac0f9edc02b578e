//! Lifecycle entry points for one user's team memberships.
//!
//! A declarative caller keeps the last declared state of a user and calls
//! these hooks when it creates, reads, updates or deletes that user. Each
//! hook re-fetches remote state; nothing is cached between calls.

use teamsync_core::{plan, DesiredUser, TeamAssignment};

use crate::applier::{ApplyReport, OperationApplier};
use crate::client::TeamClient;
use crate::error::ClientError;
use crate::transport::Transport;

/// Create/read/update/delete hooks for user memberships.
pub struct UserMemberships<T: Transport> {
    client: TeamClient<T>,
}

impl<T: Transport> UserMemberships<T> {
    /// Wrap a client.
    pub fn new(client: TeamClient<T>) -> Self {
        Self { client }
    }

    /// The underlying client.
    pub fn client(&self) -> &TeamClient<T> {
        &self.client
    }

    /// Observed memberships of `email`, pending invitations included.
    pub async fn read(&self, email: &str) -> Result<Vec<TeamAssignment>, ClientError> {
        let view = self.client.membership_view().await?;
        Ok(view.assignments(email))
    }

    /// Invite a new user to every declared team.
    pub async fn create(&self, desired: &DesiredUser) -> Result<ApplyReport, ClientError> {
        self.update(&desired.email, &[], &desired.teams).await
    }

    /// Move a user from its previously declared state to a new one.
    pub async fn update(
        &self,
        email: &str,
        old: &[TeamAssignment],
        new: &[TeamAssignment],
    ) -> Result<ApplyReport, ClientError> {
        let operations = plan(old, new);
        tracing::debug!("{}: {} operation(s) planned", email, operations.len());

        let report = OperationApplier::new(&self.client)
            .apply(email, &operations)
            .await?;
        Ok(report)
    }

    /// Remove a user from every previously declared team.
    pub async fn delete(
        &self,
        email: &str,
        old: &[TeamAssignment],
    ) -> Result<ApplyReport, ClientError> {
        self.update(email, old, &[]).await
    }

    /// Diff observed remote state against `desired` and apply the result.
    ///
    /// Safe to re-run after a partial failure: the next pass starts from
    /// whatever the previous one left behind.
    pub async fn converge(&self, desired: &DesiredUser) -> Result<ApplyReport, ClientError> {
        let observed = self.read(&desired.email).await?;
        self.update(&desired.email, &observed, &desired.teams).await
    }
}
