//! Configuration management for teamsync.
//!
//! Configuration is loaded from a TOML file (default:
//! `<config dir>/teamsync/teamsync.toml`). Command-line flags and the
//! `HONEYBADGER_*` environment variables override the file.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use teamsync_client::{HttpTransportConfig, DEFAULT_HOST};
use teamsync_core::{DesiredUser, DuplicateTeam, DEFAULT_MAX_PAGES};

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// API connection settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Collection fetch settings.
    #[serde(default)]
    pub pagination: PaginationConfig,
}

/// API connection settings.
#[derive(Clone, Deserialize)]
pub struct ApiConfig {
    /// API host (default: https://app.honeybadger.io).
    #[serde(default = "default_host")]
    pub host: String,
    /// API token.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Team used when `users list` is given no `--team`.
    #[serde(default)]
    pub team_id: Option<u64>,
    /// Per-request timeout in seconds (default: 10).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Collection fetch settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationConfig {
    /// Maximum pages followed per listing (default: 1000).
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
}

// Default value functions
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_pages() -> usize {
    DEFAULT_MAX_PAGES
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            api_key: None,
            team_id: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
        }
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("host", &self.host)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("team_id", &self.team_id)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Values given on the command line or through the environment.
#[derive(Debug, Default)]
pub struct Overrides<'a> {
    /// `--host` / `HONEYBADGER_HOST`
    pub host: Option<&'a str>,
    /// `--api-key` / `HONEYBADGER_API_KEY`
    pub api_key: Option<&'a str>,
    /// `--team-id` / `HONEYBADGER_TEAM_ID`
    pub team_id: Option<u64>,
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load an explicit file, or the default file if it exists.
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Apply command-line and environment overrides. Empty values are ignored.
    pub fn apply_overrides(&mut self, overrides: &Overrides<'_>) {
        if let Some(host) = overrides.host.filter(|h| !h.is_empty()) {
            self.api.host = host.to_string();
        }
        if let Some(key) = overrides.api_key.filter(|k| !k.is_empty()) {
            self.api.api_key = Some(key.to_string());
        }
        if let Some(team_id) = overrides.team_id {
            self.api.team_id = Some(team_id);
        }
    }

    /// Transport settings, failing when no API key is configured.
    pub fn transport_config(&self) -> Result<HttpTransportConfig, ConfigError> {
        let api_key = self
            .api
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(HttpTransportConfig::new(api_key)
            .with_base_url(&self.api.host)
            .with_timeout(Duration::from_secs(self.api.timeout_secs)))
    }
}

/// Default configuration file location.
pub fn default_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("io", "teamsync", "teamsync")
        .map(|dirs| dirs.config_dir().join("teamsync.toml"))
}

/// Load a declared user from a TOML file.
///
/// ```toml
/// email = "dev@example.com"
///
/// [[team]]
/// id = 1
/// is_admin = true
/// ```
///
/// A team listed twice is rejected.
pub fn load_desired_user(path: &Path) -> Result<DesiredUser, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    let user: DesiredUser = toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;

    user.check_unique().map_err(|e| ConfigError::DuplicateTeam {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(user)
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a file.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Failed to parse a file.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Path to the file.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: toml::de::Error,
    },
    /// No API key in the file, the environment or the flags.
    #[error("no API key configured (set api.api_key, HONEYBADGER_API_KEY or --api-key)")]
    MissingApiKey,
    /// A declared user lists the same team twice.
    #[error("invalid user file {path}: {source}")]
    DuplicateTeam {
        /// Path to the file.
        path: PathBuf,
        /// The repeated team.
        source: DuplicateTeam,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use teamsync_core::TeamAssignment;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert_eq!(config.api.host, "https://app.honeybadger.io");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.pagination.max_pages, 1000);
        assert!(config.api.api_key.is_none());
    }

    #[test]
    fn config_from_toml_string() {
        let toml = r#"
[api]
host = "https://eu.example.com"
api_key = "secret"
team_id = 42
timeout_secs = 30

[pagination]
max_pages = 5
"#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.api.host, "https://eu.example.com");
        assert_eq!(config.api.api_key.as_deref(), Some("secret"));
        assert_eq!(config.api.team_id, Some(42));
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.pagination.max_pages, 5);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config: Config = toml::from_str("[api]\napi_key = \"k\"\n").unwrap();
        assert_eq!(config.api.host, "https://app.honeybadger.io");
        assert_eq!(config.pagination.max_pages, 1000);
    }

    #[test]
    fn from_file_reports_path_on_errors() {
        let file = write_temp("[api\nhost = ");
        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));

        let err = Config::from_file(Path::new("/nonexistent/teamsync.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/teamsync.toml"));
    }

    #[test]
    fn overrides_win_over_file() {
        let file = write_temp("[api]\nhost = \"https://file.example.com\"\napi_key = \"file\"\n");
        let mut config = Config::load(Some(file.path())).unwrap();

        config.apply_overrides(&Overrides {
            host: Some("https://flag.example.com"),
            api_key: Some(""),
            team_id: Some(7),
        });

        assert_eq!(config.api.host, "https://flag.example.com");
        // Empty override keeps the file value.
        assert_eq!(config.api.api_key.as_deref(), Some("file"));
        assert_eq!(config.api.team_id, Some(7));
    }

    #[test]
    fn transport_config_requires_api_key() {
        let config = Config::default();
        assert!(matches!(
            config.transport_config(),
            Err(ConfigError::MissingApiKey)
        ));

        let mut config = Config::default();
        config.api.api_key = Some("token".into());
        config.api.timeout_secs = 3;
        let transport = config.transport_config().unwrap();
        assert_eq!(transport.api_key, "token");
        assert_eq!(transport.timeout, Duration::from_secs(3));
    }

    #[test]
    fn debug_redacts_api_key() {
        let mut config = Config::default();
        config.api.api_key = Some("super-secret".into());
        assert!(!format!("{:?}", config).contains("super-secret"));
    }

    // ===========================================
    // Declared user files
    // ===========================================

    #[test]
    fn load_desired_user_reads_teams() {
        let file = write_temp(
            r#"
email = "dev@example.com"

[[team]]
id = 1
is_admin = true

[[team]]
id = 2
"#,
        );

        let user = load_desired_user(file.path()).unwrap();
        assert_eq!(user.email, "dev@example.com");
        assert_eq!(
            user.teams,
            vec![TeamAssignment::new(1, true), TeamAssignment::new(2, false)]
        );
    }

    #[test]
    fn load_desired_user_without_teams_is_empty() {
        let file = write_temp("email = \"dev@example.com\"\n");
        let user = load_desired_user(file.path()).unwrap();
        assert!(user.teams.is_empty());
    }

    #[test]
    fn load_desired_user_rejects_duplicate_team() {
        let file = write_temp(
            r#"
email = "dev@example.com"

[[team]]
id = 3

[[team]]
id = 3
is_admin = true
"#,
        );

        let err = load_desired_user(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateTeam { .. }));
        assert!(err.to_string().contains("team 3 is declared more than once"));
    }
}
