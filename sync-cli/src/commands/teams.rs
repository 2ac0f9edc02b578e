//! Team management.

use anyhow::{Context, Result};
use std::fmt::Write;
use teamsync_client::{TeamClient, Transport};
use teamsync_types::{Team, TeamId};

/// List every team.
pub async fn list<T: Transport>(client: &TeamClient<T>) -> Result<()> {
    let teams = client.list_teams().await.context("Failed to list teams")?;
    print!("{}", render(&teams));
    Ok(())
}

/// Create a team.
pub async fn create<T: Transport>(client: &TeamClient<T>, name: &str) -> Result<()> {
    let team = client
        .create_team(name)
        .await
        .with_context(|| format!("Failed to create team '{}'", name))?;
    println!("Created team {} ({})", team.id, team.name);
    Ok(())
}

/// Rename a team.
pub async fn rename<T: Transport>(client: &TeamClient<T>, team_id: u64, name: &str) -> Result<()> {
    client
        .rename_team(TeamId::new(team_id), name)
        .await
        .with_context(|| format!("Failed to rename team {}", team_id))?;
    println!("Renamed team {} to '{}'", team_id, name);
    Ok(())
}

/// Delete a team.
pub async fn delete<T: Transport>(client: &TeamClient<T>, team_id: u64) -> Result<()> {
    client
        .delete_team(TeamId::new(team_id))
        .await
        .with_context(|| format!("Failed to delete team {}", team_id))?;
    println!("Deleted team {}", team_id);
    Ok(())
}

/// Format teams as a table.
pub fn render(teams: &[Team]) -> String {
    if teams.is_empty() {
        return "No teams.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{:<10} {:<30} {:>8} {:>8}", "ID", "NAME", "MEMBERS", "INVITES");
    for team in teams {
        let _ = writeln!(
            out,
            "{:<10} {:<30} {:>8} {:>8}",
            team.id,
            team.name,
            team.members.len(),
            team.invitations.len()
        );
    }
    out
}
