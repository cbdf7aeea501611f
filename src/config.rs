use crate::domain::TagFormat;
use crate::error::{Result, SemtagError};
use crate::git::{AuthMethod, PushAuth};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory and the user config directory
pub const CONFIG_FILE_NAME: &str = "semtag.toml";

/// Represents the complete configuration for semtag.
///
/// Values come from a TOML file and are then overridden by command line
/// flags or `SEMTAG_*` environment variables (see [Overrides]).
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Remote tags are pushed to
    pub remote_name: String,

    /// Tag a patch release even when no commit requires one
    pub always_patch: bool,

    /// Maintain a moving alias tag next to each release
    pub latest: bool,

    /// Name of the moving alias tag
    pub latest_name: String,

    /// Write tags without the `v` prefix
    pub no_prefix: bool,

    /// Base branch for pull request validation
    pub base_branch: Option<String>,

    pub auth: AuthConfig,
}

/// Credentials used when pushing tags.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AuthConfig {
    /// Forces an auth method instead of detecting it from the remote URL
    pub method: Option<AuthMethod>,
    pub token: Option<String>,
    pub token_username: Option<String>,
    pub key_path: Option<PathBuf>,
}

/// Returns the default SSH key used for public key auth.
fn default_key_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".ssh").join("id_ecdsa"))
}

impl Default for AuthConfig {
    fn default() -> Self {
        AuthConfig {
            method: None,
            token: None,
            token_username: None,
            key_path: default_key_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote_name: "origin".to_string(),
            always_patch: false,
            latest: false,
            latest_name: "latest".to_string(),
            no_prefix: false,
            base_branch: None,
            auth: AuthConfig::default(),
        }
    }
}

/// Values that take precedence over the configuration file.
///
/// `None` and `false` leave the file value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub remote_name: Option<String>,
    pub always_patch: bool,
    pub latest: bool,
    pub latest_name: Option<String>,
    pub no_prefix: bool,
    pub base_branch: Option<String>,
    pub auth_method: Option<AuthMethod>,
    pub auth_token: Option<String>,
    pub auth_token_username: Option<String>,
    pub auth_key_path: Option<PathBuf>,
}

impl Config {
    /// Apply command line / environment overrides on top of this config
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(remote_name) = overrides.remote_name {
            self.remote_name = remote_name;
        }
        self.always_patch |= overrides.always_patch;
        self.latest |= overrides.latest;
        if let Some(latest_name) = overrides.latest_name {
            self.latest_name = latest_name;
        }
        self.no_prefix |= overrides.no_prefix;
        if overrides.base_branch.is_some() {
            self.base_branch = overrides.base_branch;
        }
        if overrides.auth_method.is_some() {
            self.auth.method = overrides.auth_method;
        }
        if overrides.auth_token.is_some() {
            self.auth.token = overrides.auth_token;
        }
        if overrides.auth_token_username.is_some() {
            self.auth.token_username = overrides.auth_token_username;
        }
        if overrides.auth_key_path.is_some() {
            self.auth.key_path = overrides.auth_key_path;
        }
        self
    }

    /// How new tags are written
    pub fn tag_format(&self) -> TagFormat {
        TagFormat::from_no_prefix(self.no_prefix)
    }

    /// Alias tag to move on every release, if enabled
    pub fn alias_tag(&self) -> Option<&str> {
        self.latest.then_some(self.latest_name.as_str())
    }

    /// Credentials for pushing
    pub fn push_auth(&self) -> PushAuth {
        PushAuth {
            method: self.auth.method,
            key_path: self.auth.key_path.clone(),
            token: self.auth.token.clone(),
            token_username: self.auth.token_username.clone(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `semtag.toml` in current directory
/// 3. `semtag.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config_file(),
    };

    let Some(path) = path else {
        return Ok(Config::default());
    };

    let config_str = fs::read_to_string(&path).map_err(|e| {
        SemtagError::config(format!("Cannot read '{}': {}", path.display(), e))
    })?;

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}

fn discover_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.remote_name, "origin");
        assert_eq!(config.latest_name, "latest");
        assert!(!config.always_patch);
        assert!(!config.latest);
        assert_eq!(config.tag_format(), TagFormat::Preserve);
        assert_eq!(config.alias_tag(), None);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str("always_patch = true").unwrap();
        assert!(config.always_patch);
        assert_eq!(config.remote_name, "origin");
        assert_eq!(config.latest_name, "latest");
    }

    #[test]
    fn test_auth_section() {
        let config: Config = toml::from_str(
            r#"
[auth]
method = "token"
token_username = "ci-bot"
"#,
        )
        .unwrap();
        assert_eq!(config.auth.method, Some(AuthMethod::Token));
        assert_eq!(config.auth.token_username.as_deref(), Some("ci-bot"));
        assert_eq!(config.push_auth().method, Some(AuthMethod::Token));
    }

    #[test]
    fn test_overrides_take_precedence() {
        let config = Config::default().with_overrides(Overrides {
            remote_name: Some("upstream".to_string()),
            latest: true,
            latest_name: Some("stable".to_string()),
            no_prefix: true,
            auth_token: Some("secret".to_string()),
            ..Default::default()
        });

        assert_eq!(config.remote_name, "upstream");
        assert_eq!(config.alias_tag(), Some("stable"));
        assert_eq!(config.tag_format(), TagFormat::Bare);
        assert_eq!(config.auth.token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_empty_overrides_keep_file_values() {
        let file: Config = toml::from_str(
            r#"
remote_name = "upstream"
always_patch = true
base_branch = "develop"
"#,
        )
        .unwrap();
        let merged = file.clone().with_overrides(Overrides::default());
        assert_eq!(merged, file);
    }

    #[test]
    fn test_unknown_auth_method_rejected() {
        let result = toml::from_str::<Config>("[auth]\nmethod = \"password\"");
        assert!(result.is_err());
    }
}
