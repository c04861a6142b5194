use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ReleaseError, Result};

/// Project-local configuration file name.
pub const CONFIG_FILE_NAME: &str = "releasekit.toml";

/// Environment variable that overrides `content.stack_api_key`.
pub const STACK_KEY_ENV: &str = "CONTENT_STACK_API_KEY";

/// Placeholder substituted into commit and tag message templates.
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Represents the complete configuration for release-kit.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub manifest: ManifestConfig,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub content: ContentConfig,
}

fn default_manifest_path() -> String {
    "package.json".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_commit_message() -> String {
    "Release {version}".to_string()
}

fn default_tag_message() -> String {
    "Release version {version}".to_string()
}

fn default_content_dir() -> String {
    "content".to_string()
}

fn default_program() -> String {
    "csdx".to_string()
}

fn default_subcommand() -> String {
    "cm:export".to_string()
}

/// Location of the JSON manifest holding the project version.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ManifestConfig {
    #[serde(default = "default_manifest_path")]
    pub path: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        ManifestConfig {
            path: default_manifest_path(),
        }
    }
}

/// Settings for the tag reconciler.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Treat a failed `ls-remote` as fatal instead of "tag absent".
    #[serde(default)]
    pub strict_remote_probe: bool,

    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    #[serde(default = "default_tag_message")]
    pub tag_message: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            remote: default_remote(),
            strict_remote_probe: false,
            commit_message: default_commit_message(),
            tag_message: default_tag_message(),
        }
    }
}

impl GitConfig {
    pub fn commit_message_for(&self, version: &str) -> String {
        self.commit_message.replace(VERSION_PLACEHOLDER, version)
    }

    pub fn tag_message_for(&self, version: &str) -> String {
        self.tag_message.replace(VERSION_PLACEHOLDER, version)
    }
}

/// Settings for the content refresher and its export command.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ContentConfig {
    #[serde(default = "default_content_dir")]
    pub dir: String,

    #[serde(default = "default_program")]
    pub program: String,

    #[serde(default = "default_subcommand")]
    pub subcommand: String,

    #[serde(default)]
    pub stack_api_key: Option<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        ContentConfig {
            dir: default_content_dir(),
            program: default_program(),
            subcommand: default_subcommand(),
            stack_api_key: None,
        }
    }
}

impl ContentConfig {
    /// Returns the stack API key, or a configuration error naming both sources.
    pub fn require_stack_key(&self) -> Result<&str> {
        self.stack_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ReleaseError::config(format!(
                    "no stack API key: set content.stack_api_key in {} or {}",
                    CONFIG_FILE_NAME, STACK_KEY_ENV
                ))
            })
    }
}

/// Parses configuration from a TOML string.
pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config = toml::from_str(config_str)?;
    Ok(config)
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releasekit.toml` in `root`
/// 3. `.releasekit.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// The `CONTENT_STACK_API_KEY` environment variable is applied on top of
/// whichever source won.
pub fn load_config(config_path: Option<&str>, root: &Path) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        Some(fs::read_to_string(path).map_err(|e| {
            ReleaseError::config(format!("cannot read config file '{}': {}", path, e))
        })?)
    } else if root.join(CONFIG_FILE_NAME).exists() {
        Some(fs::read_to_string(root.join(CONFIG_FILE_NAME))?)
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            Some(fs::read_to_string(config_path)?)
        } else {
            None
        }
    } else {
        None
    };

    let mut config = match config_str {
        Some(s) => parse_config(&s)?,
        None => Config::default(),
    };

    if let Ok(key) = std::env::var(STACK_KEY_ENV) {
        if !key.trim().is_empty() {
            log::debug!("stack API key taken from {}", STACK_KEY_ENV);
            config.content.stack_api_key = Some(key);
        }
    }

    Ok(config)
}
