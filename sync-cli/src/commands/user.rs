//! Reconcile one user's team memberships.

use anyhow::{Context, Result};
use std::fmt::Write;
use std::path::Path;
use teamsync_client::{ApplyReport, ClientError, Transport, UserMemberships};
use teamsync_core::{plan as diff_plan, MembershipRecord, MembershipRef};

use super::diff::render_plan;
use crate::config::load_desired_user;

/// Show every membership of `email`, pending invitations included.
pub async fn show<T: Transport>(hooks: &UserMemberships<T>, email: &str) -> Result<()> {
    let view = hooks
        .client()
        .membership_view()
        .await
        .context("Failed to read memberships")?;
    print!("{}", render_memberships(email, &view.for_email(email)));
    Ok(())
}

/// Print what `apply` would do for a declared user file.
pub async fn plan<T: Transport>(hooks: &UserMemberships<T>, file: &Path) -> Result<()> {
    let desired = load_desired_user(file)?;
    let observed = hooks
        .read(&desired.email)
        .await
        .context("Failed to read memberships")?;

    let operations = diff_plan(&observed, &desired.teams);
    print!("{}", render_plan(&desired.email, &operations));
    Ok(())
}

/// Converge a declared user file against the API.
pub async fn apply<T: Transport>(hooks: &UserMemberships<T>, file: &Path) -> Result<()> {
    let desired = load_desired_user(file)?;
    let result = hooks.converge(&desired).await;
    report(&desired.email, result)
}

/// Remove `email` from every team it currently belongs to.
pub async fn remove<T: Transport>(hooks: &UserMemberships<T>, email: &str) -> Result<()> {
    let observed = hooks
        .read(email)
        .await
        .context("Failed to read memberships")?;
    let result = hooks.delete(email, &observed).await;
    report(email, result)
}

fn report(email: &str, result: Result<ApplyReport, ClientError>) -> Result<()> {
    match result {
        Ok(report) => {
            print!("{}", render_plan(email, &report.applied));
            Ok(())
        }
        Err(ClientError::PartialApply(err)) => {
            println!("{} operation(s) applied before the failure:", err.applied.len());
            for operation in &err.applied {
                println!("  {}", operation);
            }
            println!("Re-run to reconcile the remaining changes.");
            Err(ClientError::PartialApply(err)).context(format!("Failed to converge {}", email))
        }
        Err(err) => Err(err).context(format!("Failed to converge {}", email)),
    }
}

/// Format membership records of one email.
pub fn render_memberships(email: &str, records: &[&MembershipRecord]) -> String {
    if records.is_empty() {
        return format!("{} has no memberships.\n", email);
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}:", email);
    for record in records {
        let source = match record.membership {
            MembershipRef::Member(id) => format!("member {}", id),
            MembershipRef::Invitation(id) => format!("invitation {} (pending)", id),
        };
        let _ = writeln!(
            out,
            "  team {:<10} admin: {:<5} {}",
            record.team_id, record.is_admin, source
        );
    }
    out
}
