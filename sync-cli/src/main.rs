//! # teamsync
//!
//! CLI for reconciling team memberships against the Honeybadger team API.
//!
//! ## Commands
//!
//! - `teams`: List, create, rename and delete teams
//! - `projects`: List, create, update and delete projects
//! - `users list`: List members of one team
//! - `user`: Show, plan, apply or remove one user's memberships
//! - `diff`: Compare two declared user files offline
//!
//! ## Example
//!
//! ```bash
//! export HONEYBADGER_API_KEY=...
//!
//! # See what would change for a declared user
//! teamsync user plan dev.toml
//!
//! # Converge the user
//! teamsync user apply dev.toml
//!
//! # Offline: what does editing the file change?
//! teamsync diff dev-old.toml dev.toml
//! ```

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use teamsync_client::{HttpTransport, TeamClient, UserMemberships};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{diff, projects, teams, user, users};
use config::{Config, Overrides};

/// Reconcile team memberships against the Honeybadger team API.
#[derive(Parser, Debug)]
#[command(name = "teamsync")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// API host
    #[arg(long, global = true, env = "HONEYBADGER_HOST")]
    host: Option<String>,

    /// API token
    #[arg(long, global = true, env = "HONEYBADGER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Default team for `users list`
    #[arg(long, global = true, env = "HONEYBADGER_TEAM_ID")]
    team_id: Option<u64>,

    /// Increase log verbosity
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage teams
    Teams {
        #[command(subcommand)]
        action: TeamsCommand,
    },

    /// Manage projects
    Projects {
        #[command(subcommand)]
        action: ProjectsCommand,
    },

    /// List team members
    Users {
        #[command(subcommand)]
        action: UsersCommand,
    },

    /// Reconcile one user's team memberships
    User {
        #[command(subcommand)]
        action: UserCommand,
    },

    /// Show the operations between two declared user files (offline)
    Diff {
        /// Previously declared state
        old: PathBuf,
        /// Newly declared state
        new: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum TeamsCommand {
    /// List teams
    List,
    /// Create a team
    Create {
        /// Team name
        name: String,
    },
    /// Rename a team
    Rename {
        /// Team id
        id: u64,
        /// New name
        name: String,
    },
    /// Delete a team
    Delete {
        /// Team id
        id: u64,
    },
}

#[derive(Subcommand, Debug)]
enum ProjectsCommand {
    /// List projects
    List,
    /// Create a project
    Create {
        /// Project name
        name: String,
        /// Primary language
        #[arg(long)]
        language: Option<String>,
    },
    /// Update a project
    Update {
        /// Project id
        id: u64,
        /// Project name
        name: String,
        /// Primary language
        #[arg(long)]
        language: Option<String>,
    },
    /// Delete a project
    Delete {
        /// Project id
        id: u64,
    },
}

#[derive(Subcommand, Debug)]
enum UsersCommand {
    /// List accepted members of a team
    List {
        /// Team id (default: api.team_id)
        #[arg(long)]
        team: Option<u64>,
    },
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    /// Show a user's memberships, pending invitations included
    Show {
        /// User email
        email: String,
    },
    /// Print the operations `apply` would run
    Plan {
        /// Declared user file (TOML)
        file: PathBuf,
    },
    /// Converge a user to its declared file
    Apply {
        /// Declared user file (TOML)
        file: PathBuf,
    },
    /// Remove a user from every team
    Remove {
        /// User email
        email: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Offline; needs neither config nor credentials.
    if let Commands::Diff { old, new } = &cli.command {
        return diff::run(old, new);
    }

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load config")?;
    config.apply_overrides(&Overrides {
        host: cli.host.as_deref(),
        api_key: cli.api_key.as_deref(),
        team_id: cli.team_id,
    });
    tracing::debug!("Using config: {:?}", config);

    let transport = HttpTransport::new(config.transport_config()?)
        .context("Failed to build HTTP client")?;
    let client = TeamClient::new(transport).with_max_pages(config.pagination.max_pages);

    match cli.command {
        Commands::Teams { action } => match action {
            TeamsCommand::List => teams::list(&client).await?,
            TeamsCommand::Create { name } => teams::create(&client, &name).await?,
            TeamsCommand::Rename { id, name } => teams::rename(&client, id, &name).await?,
            TeamsCommand::Delete { id } => teams::delete(&client, id).await?,
        },
        Commands::Projects { action } => match action {
            ProjectsCommand::List => projects::list(&client).await?,
            ProjectsCommand::Create { name, language } => {
                projects::create(&client, &name, language.as_deref()).await?
            }
            ProjectsCommand::Update { id, name, language } => {
                projects::update(&client, id, &name, language.as_deref()).await?
            }
            ProjectsCommand::Delete { id } => projects::delete(&client, id).await?,
        },
        Commands::Users { action } => match action {
            UsersCommand::List { team } => {
                let team_id = team
                    .or(config.api.team_id)
                    .context("No team given (use --team, --team-id or HONEYBADGER_TEAM_ID)")?;
                users::list(&client, team_id).await?
            }
        },
        Commands::User { action } => {
            let hooks = UserMemberships::new(client);
            match action {
                UserCommand::Show { email } => user::show(&hooks, &email).await?,
                UserCommand::Plan { file } => user::plan(&hooks, &file).await?,
                UserCommand::Apply { file } => user::apply(&hooks, &file).await?,
                UserCommand::Remove { email } => user::remove(&hooks, &email).await?,
            }
        }
        Commands::Diff { .. } => {}
    }

    Ok(())
}

/// Log to stderr. `RUST_LOG` wins; otherwise `-v` raises the level to debug.
fn init_tracing(verbose: u8) {
    let default_filter = if verbose > 0 { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
