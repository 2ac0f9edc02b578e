//! Operation applier.
//!
//! Executes a reconciliation plan against the API in the order given,
//! stopping at the first failure. Nothing is rolled back: operations that
//! already succeeded stay applied and the caller is expected to re-read
//! and reconcile again.
//!
//! Removals and admin-flag updates are keyed by the identity the server
//! assigned to the membership, not by email. That identity is resolved from
//! a [`MembershipView`] fetched once per batch, and only if the batch
//! contains an operation that needs it. A membership that is still a
//! pending invitation is routed to the invitations endpoint.

use std::fmt;
use teamsync_core::{MembershipRef, MembershipView, Operation};
use teamsync_types::TeamId;
use thiserror::Error;

use crate::client::TeamClient;
use crate::error::ClientError;
use crate::transport::Transport;

/// Outcome of a batch that ran to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Operations applied, in order.
    pub applied: Vec<Operation>,
}

impl ApplyReport {
    /// True when the batch was empty.
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }
}

/// A batch that stopped at a failing operation.
#[derive(Debug, Error)]
#[error(
    "`{failed}` failed after {} applied operation(s), {} skipped: {source}",
    .applied.len(),
    .skipped.len()
)]
pub struct ApplyError {
    /// Operations that succeeded before the failure. They are not undone.
    pub applied: Vec<Operation>,
    /// The operation that failed.
    pub failed: Operation,
    /// Operations never attempted.
    pub skipped: Vec<Operation>,
    /// Why `failed` failed.
    #[source]
    pub source: ClientError,
}

/// Applies operations for one user email.
pub struct OperationApplier<'a, T: Transport> {
    client: &'a TeamClient<T>,
}

impl<'a, T: Transport> OperationApplier<'a, T> {
    /// Create an applier over a client.
    pub fn new(client: &'a TeamClient<T>) -> Self {
        Self { client }
    }

    /// Apply `operations` for `email`, in order, stopping at the first failure.
    pub async fn apply(
        &self,
        email: &str,
        operations: &[Operation],
    ) -> Result<ApplyReport, ApplyError> {
        let mut view = None;
        let mut applied = Vec::with_capacity(operations.len());

        for (index, operation) in operations.iter().enumerate() {
            match self.apply_one(email, operation, &mut view).await {
                Ok(()) => {
                    tracing::info!("{}: {}", email, operation);
                    applied.push(*operation);
                }
                Err(source) => {
                    let skipped = operations[index + 1..].to_vec();
                    tracing::warn!(
                        "{}: {} failed ({}); {} operation(s) skipped",
                        email,
                        operation,
                        source,
                        skipped.len()
                    );
                    return Err(ApplyError {
                        applied,
                        failed: *operation,
                        skipped,
                        source,
                    });
                }
            }
        }

        Ok(ApplyReport { applied })
    }

    async fn apply_one(
        &self,
        email: &str,
        operation: &Operation,
        view: &mut Option<MembershipView>,
    ) -> Result<(), ClientError> {
        match *operation {
            Operation::Add { team_id, is_admin } => {
                self.client.invite(team_id, email, is_admin).await?;
            }
            Operation::Remove { team_id } => {
                match self.resolve(email, team_id, view).await? {
                    MembershipRef::Member(id) => self.client.remove_member(team_id, id).await?,
                    MembershipRef::Invitation(id) => {
                        self.client.revoke_invitation(team_id, id).await?
                    }
                }
            }
            Operation::UpdateAdmin { team_id, is_admin } => {
                match self.resolve(email, team_id, view).await? {
                    MembershipRef::Member(id) => {
                        self.client
                            .update_member_admin(team_id, id, is_admin)
                            .await?
                    }
                    MembershipRef::Invitation(id) => {
                        self.client
                            .update_invitation_admin(team_id, id, is_admin)
                            .await?
                    }
                }
            }
        }
        Ok(())
    }

    async fn resolve(
        &self,
        email: &str,
        team_id: TeamId,
        view: &mut Option<MembershipView>,
    ) -> Result<MembershipRef, ClientError> {
        if view.is_none() {
            *view = Some(self.client.membership_view().await?);
        }

        view.as_ref()
            .and_then(|v| v.lookup(email, team_id))
            .map(|record| record.membership)
            .ok_or_else(|| ClientError::not_found("membership", MembershipKey { email, team_id }))
    }
}

struct MembershipKey<'a> {
    email: &'a str,
    team_id: TeamId,
}

impl fmt::Display for MembershipKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in team {}", self.email, self.team_id)
    }
}
