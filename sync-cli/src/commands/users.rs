//! Members of one team.

use anyhow::{Context, Result};
use std::fmt::Write;
use teamsync_client::{TeamClient, Transport};
use teamsync_types::{Member, TeamId};

/// List the accepted members of a team.
pub async fn list<T: Transport>(client: &TeamClient<T>, team_id: u64) -> Result<()> {
    let members = client
        .list_members(TeamId::new(team_id))
        .await
        .with_context(|| format!("Failed to list members of team {}", team_id))?;
    print!("{}", render(&members));
    Ok(())
}

/// Format members as a table.
pub fn render(members: &[Member]) -> String {
    if members.is_empty() {
        return "No members.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{:<10} {:<40} {:<6} {}", "ID", "EMAIL", "ADMIN", "NAME");
    for member in members {
        let _ = writeln!(
            out,
            "{:<10} {:<40} {:<6} {}",
            member.id,
            member.email,
            if member.admin { "yes" } else { "no" },
            member.name.as_deref().unwrap_or("")
        );
    }
    out
}
