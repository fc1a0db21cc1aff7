use crate::domain::version::is_pure_tag;
use crate::error::{Result, TagReleaseError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const LOCAL_CONFIG: &str = "./tagrelease.toml";
const USER_CONFIG: &str = ".tagrelease.toml";

/// Represents the complete configuration for tag-release.
///
/// Every key is optional; a missing file yields [`Config::default`].
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Remote that tags are fetched from, deleted on and pushed to
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Manifest rewritten by `--write-to-package`, relative to the working directory
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,

    /// Git executable
    #[serde(default = "default_git")]
    pub git: String,

    /// Pure tag appended to the remote listing so a bump base always exists
    #[serde(default = "default_sentinel_tag")]
    pub sentinel_tag: String,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_manifest() -> PathBuf {
    PathBuf::from("package.json")
}

fn default_git() -> String {
    "git".to_string()
}

fn default_sentinel_tag() -> String {
    "v0.0.0".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote: default_remote(),
            manifest: default_manifest(),
            git: default_git(),
            sentinel_tag: default_sentinel_tag(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text and validate it
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| TagReleaseError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.remote.trim().is_empty() {
            return Err(TagReleaseError::config("remote must not be empty"));
        }
        if !is_pure_tag(&self.sentinel_tag) {
            return Err(TagReleaseError::config(format!(
                "sentinel_tag ({}) must be a plain MAJOR.MINOR.PATCH tag",
                self.sentinel_tag
            )));
        }
        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `tagrelease.toml` in current directory
/// 3. `.tagrelease.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path).map_err(|e| {
            TagReleaseError::config(format!("cannot read {}: {}", path.display(), e))
        })?
    } else if Path::new(LOCAL_CONFIG).exists() {
        fs::read_to_string(LOCAL_CONFIG)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(USER_CONFIG);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    Config::from_toml(&config_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.remote, "origin");
        assert_eq!(config.manifest, PathBuf::from("package.json"));
        assert_eq!(config.git, "git");
        assert_eq!(config.sentinel_tag, "v0.0.0");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml("remote = \"upstream\"").unwrap();
        assert_eq!(config.remote, "upstream");
        assert_eq!(config.manifest, PathBuf::from("package.json"));
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_staged_sentinel_rejected() {
        let err = Config::from_toml("sentinel_tag = \"v0.0.0-rc.0\"").unwrap_err();
        assert!(matches!(err, TagReleaseError::Config(_)));
    }

    #[test]
    fn test_empty_remote_rejected() {
        assert!(Config::from_toml("remote = \"  \"").is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_toml("branches = []").is_err());
    }
}
