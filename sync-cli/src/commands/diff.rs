//! Offline diff of two declared user files.

use anyhow::{Context, Result};
use std::fmt::Write;
use std::path::Path;
use teamsync_core::{plan, Operation};

use crate::config::load_desired_user;

/// Print the operations that turn `old` into `new`. No API access.
pub fn run(old: &Path, new: &Path) -> Result<()> {
    let old = load_desired_user(old).context("Failed to load old state")?;
    let new = load_desired_user(new).context("Failed to load new state")?;

    if old.email != new.email {
        anyhow::bail!(
            "old and new state declare different users ({} vs {})",
            old.email,
            new.email
        );
    }

    print!("{}", render_plan(&new.email, &plan(&old.teams, &new.teams)));
    Ok(())
}

/// Format an operation plan, one operation per line.
pub fn render_plan(email: &str, operations: &[Operation]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}: {} operation(s)", email, operations.len());
    for (i, operation) in operations.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, operation);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;
    use teamsync_types::TeamId;

    fn user_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn render_plan_numbers_operations() {
        let out = render_plan(
            "a@example.com",
            &[
                Operation::Remove {
                    team_id: TeamId::new(5),
                },
                Operation::Add {
                    team_id: TeamId::new(6),
                    is_admin: false,
                },
            ],
        );

        assert_eq!(
            out,
            "a@example.com: 2 operation(s)\n  1. remove from team 5\n  2. invite to team 6 (admin: false)\n"
        );
    }

    #[test]
    fn run_accepts_matching_users() {
        let old = user_file("email = \"a@example.com\"\n[[team]]\nid = 1\n");
        let new = user_file("email = \"a@example.com\"\n[[team]]\nid = 1\nis_admin = true\n");

        assert!(run(old.path(), new.path()).is_ok());
    }

    #[test]
    fn run_rejects_different_users() {
        let old = user_file("email = \"a@example.com\"\n");
        let new = user_file("email = \"b@example.com\"\n");

        let err = run(old.path(), new.path()).unwrap_err();
        assert!(err.to_string().contains("different users"));
    }
}
