//! Configuration management for hstw.
//!
//! Parses `hstw.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `hubspot.access_token`
//! - `hubspot.base_url`
//! - `hubspot.content_group_id`
//! - `hubspot.folder_id`
//! - `hubspot.folder_path`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override HubSpot access token.
    pub access_token: Option<String>,
    /// Override HubSpot API base URL.
    pub base_url: Option<String>,
    /// Override blog (content group) identifier.
    pub content_group_id: Option<String>,
    /// Override target folder identifier.
    pub folder_id: Option<String>,
    /// Override target folder path.
    pub folder_path: Option<String>,
    /// Override remote link checking.
    pub linkcheck_remote: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "hstw.toml";

/// Default HubSpot API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.hubapi.com";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HubSpot API configuration.
    pub hubspot: HubSpotConfig,
    /// Link checker configuration.
    pub linkcheck: LinkcheckConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// HubSpot API configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HubSpotConfig {
    /// Private app access token.
    pub access_token: Option<String>,
    /// API base URL.
    pub base_url: String,
    /// Blog (content group) new posts are created in.
    pub content_group_id: Option<String>,
    /// Folder identifier for uploaded files.
    pub folder_id: Option<String>,
    /// Folder path for uploaded files.
    pub folder_path: Option<String>,
}

impl Default for HubSpotConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            base_url: DEFAULT_BASE_URL.to_owned(),
            content_group_id: None,
            folder_id: None,
            folder_path: None,
        }
    }
}

impl HubSpotConfig {
    /// Validate that all required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the access token is missing, the base URL
    /// is malformed, or both folder settings are present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let token = self.access_token.as_deref().unwrap_or_default();
        if token.is_empty() {
            return Err(ConfigError::Validation(
                "Communicating with the HubSpot API needs an access token".to_owned(),
            ));
        }
        require_non_empty(&self.base_url, "hubspot.base_url")?;
        require_http_url(&self.base_url, "hubspot.base_url")?;
        self.validate_folder()
    }

    /// Validate that at most one of `folder_id` and `folder_path` is set.
    fn validate_folder(&self) -> Result<(), ConfigError> {
        if self.folder_id.is_some() && self.folder_path.is_some() {
            return Err(ConfigError::Validation(
                "Use either `hubspot.folder_id` or `hubspot.folder_path`, but not both".to_owned(),
            ));
        }
        Ok(())
    }

    /// Access token, after [`validate`](Self::validate) succeeded.
    #[must_use]
    pub fn token(&self) -> &str {
        self.access_token.as_deref().unwrap_or_default()
    }
}

/// Link checker configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LinkcheckConfig {
    /// Whether remote (`http(s)://`) links are checked.
    pub remote: bool,
    /// Timeout for a single remote request, in seconds.
    pub timeout: u64,
}

impl Default for LinkcheckConfig {
    fn default() -> Self {
        Self {
            remote: true,
            timeout: 10,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`hubspot.access_token`").
        field: String,
        /// Error message (e.g., "${`HUBSPOT_ACCESS_TOKEN`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `hstw.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    ///
    /// A folder given on the command line replaces both folder settings from the
    /// file, so `--folder-path` can override a configured `folder_id`.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        let hubspot = &mut self.hubspot;
        if let Some(token) = &settings.access_token {
            hubspot.access_token = Some(token.clone());
        }
        if let Some(base_url) = &settings.base_url {
            hubspot.base_url.clone_from(base_url);
        }
        if let Some(content_group_id) = &settings.content_group_id {
            hubspot.content_group_id = Some(content_group_id.clone());
        }
        if settings.folder_id.is_some() || settings.folder_path.is_some() {
            hubspot.folder_id.clone_from(&settings.folder_id);
            hubspot.folder_path.clone_from(&settings.folder_path);
        }
        if let Some(remote) = settings.linkcheck_remote {
            self.linkcheck.remote = remote;
        }
    }

    /// Get validated HubSpot configuration.
    ///
    /// Use this instead of accessing the `hubspot` field directly when the
    /// command talks to the HubSpot API.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the access token is missing or any
    /// field is invalid.
    pub fn require_hubspot(&self) -> Result<&HubSpotConfig, ConfigError> {
        self.hubspot.validate()?;
        Ok(&self.hubspot)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse configuration text and expand environment variables.
    fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.expand_env_vars()?;
        Ok(config)
    }

    /// Validate configuration values that do not depend on the command.
    ///
    /// The access token is only checked by [`require_hubspot`](Self::require_hubspot),
    /// since `convert` and `linkcheck` work without it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.hubspot.base_url, "hubspot.base_url")?;
        require_http_url(&self.hubspot.base_url, "hubspot.base_url")?;
        self.hubspot.validate_folder()?;
        if self.linkcheck.timeout == 0 {
            return Err(ConfigError::Validation(
                "linkcheck.timeout must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let hubspot = &mut self.hubspot;
        hubspot.access_token =
            expand::expand_env_opt(hubspot.access_token.as_ref(), "hubspot.access_token")?;
        hubspot.base_url = expand::expand_env(&hubspot.base_url, "hubspot.base_url")?;
        hubspot.content_group_id =
            expand::expand_env_opt(hubspot.content_group_id.as_ref(), "hubspot.content_group_id")?;
        hubspot.folder_id = expand::expand_env_opt(hubspot.folder_id.as_ref(), "hubspot.folder_id")?;
        hubspot.folder_path =
            expand::expand_env_opt(hubspot.folder_path.as_ref(), "hubspot.folder_path")?;
        Ok(())
    }
}
