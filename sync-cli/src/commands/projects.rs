//! Project management.

use anyhow::{Context, Result};
use std::fmt::Write;
use teamsync_client::{TeamClient, Transport};
use teamsync_types::{Project, ProjectId};

/// List every project.
pub async fn list<T: Transport>(client: &TeamClient<T>) -> Result<()> {
    let projects = client
        .list_projects()
        .await
        .context("Failed to list projects")?;
    print!("{}", render(&projects));
    Ok(())
}

/// Create a project.
pub async fn create<T: Transport>(
    client: &TeamClient<T>,
    name: &str,
    language: Option<&str>,
) -> Result<()> {
    let project = client
        .create_project(name, language)
        .await
        .with_context(|| format!("Failed to create project '{}'", name))?;
    println!("Created project {} ({})", project.id, project.name);
    Ok(())
}

/// Update a project's name and language.
pub async fn update<T: Transport>(
    client: &TeamClient<T>,
    project_id: u64,
    name: &str,
    language: Option<&str>,
) -> Result<()> {
    client
        .update_project(ProjectId::new(project_id), name, language)
        .await
        .with_context(|| format!("Failed to update project {}", project_id))?;
    println!("Updated project {}", project_id);
    Ok(())
}

/// Delete a project.
pub async fn delete<T: Transport>(client: &TeamClient<T>, project_id: u64) -> Result<()> {
    client
        .delete_project(ProjectId::new(project_id))
        .await
        .with_context(|| format!("Failed to delete project {}", project_id))?;
    println!("Deleted project {}", project_id);
    Ok(())
}

/// Format projects as a table.
pub fn render(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "No projects.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{:<10} {:<30} {:<12}", "ID", "NAME", "LANGUAGE");
    for project in projects {
        let _ = writeln!(
            out,
            "{:<10} {:<30} {:<12}",
            project.id,
            project.name,
            project.language.as_deref().unwrap_or("-")
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use teamsync_client::{Method, MockTransport};

    #[test]
    fn render_shows_missing_language_as_dash() {
        let projects: Vec<Project> = serde_json::from_value(json!([
            {"id": 1, "name": "web", "language": "ruby"},
            {"id": 2, "name": "cli"}
        ]))
        .unwrap();

        let out = render(&projects);
        assert!(out.lines().nth(1).unwrap().contains("ruby"));
        assert!(out.lines().nth(2).unwrap().trim_end().ends_with('-'));
    }

    #[tokio::test]
    async fn update_sends_language() {
        let client = TeamClient::new(MockTransport::new());
        client
            .transport()
            .respond(Method::Put, "/v2/projects/4", Vec::new());

        update(&client, 4, "api", Some("rust")).await.unwrap();

        assert_eq!(
            client.transport().last_request().unwrap().json(),
            Some(json!({"project": {"name": "api", "language": "rust"}}))
        );
    }
}
