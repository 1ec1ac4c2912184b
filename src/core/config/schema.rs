//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$YAMLNORM_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/yamlnorm/config.toml`
//! 3. `~/.yamlnorm/config.toml`
//!
//! # Project Config
//!
//! Located at `<root>/.yamlnorm.toml`.
//!
//! # Validation
//!
//! Config values are validated after parsing. Unknown keys are rejected.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::policy::Policy;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// root = "/srv/definitions"
/// policy = "classify"
/// skip_dirs = [".github", ".git"]
/// follow_symlinks = false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Root directory used when none is given on the command line
    pub root: Option<PathBuf>,

    /// Default filename policy
    pub policy: Option<Policy>,

    /// Directory names whose contents are never touched
    pub skip_dirs: Option<Vec<String>>,

    /// Follow symbolic links while walking
    pub follow_symlinks: Option<bool>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(root) = &self.root {
            if root.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue("root cannot be empty".to_string()));
            }
        }
        validate_skip_dirs(self.skip_dirs.as_deref())
    }
}

/// Project configuration, read from the root being processed.
///
/// # Example
///
/// ```toml
/// policy = "versioned"
/// skip_dirs = [".github", "vendor"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Filename policy for this tree
    pub policy: Option<Policy>,

    /// Directory names whose contents are never touched
    pub skip_dirs: Option<Vec<String>>,

    /// Follow symbolic links while walking
    pub follow_symlinks: Option<bool>,
}

impl ProjectConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_skip_dirs(self.skip_dirs.as_deref())
    }
}

/// Skip entries are single directory names, not paths.
fn validate_skip_dirs(dirs: Option<&[String]>) -> Result<(), ConfigError> {
    for dir in dirs.unwrap_or_default() {
        if dir.is_empty() {
            return Err(ConfigError::InvalidValue(
                "skip_dirs entries cannot be empty".to_string(),
            ));
        }
        if dir.contains('/') || dir.contains('\\') {
            return Err(ConfigError::InvalidValue(format!(
                "skip_dirs entry '{}' must be a directory name, not a path",
                dir
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_config_parses() {
        let config: GlobalConfig = toml::from_str(
            r#"
            root = "/data"
            policy = "versioned"
            skip_dirs = [".github", "build"]
            "#,
        )
        .unwrap();

        assert_eq!(config.root, Some(PathBuf::from("/data")));
        assert_eq!(config.policy, Some(Policy::Versioned));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn project_config_rejects_root() {
        let result: Result<ProjectConfig, _> = toml::from_str("root = \"/elsewhere\"");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_policy_rejected() {
        let result: Result<ProjectConfig, _> = toml::from_str("policy = \"alphabetical\"");
        assert!(result.is_err());
    }

    #[test]
    fn skip_dir_paths_rejected() {
        let config = ProjectConfig {
            skip_dirs: Some(vec!["a/b".to_string()]),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ProjectConfig {
            skip_dirs: Some(vec![String::new()]),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_config_is_valid() {
        assert!(GlobalConfig::default().validate().is_ok());
        assert!(ProjectConfig::default().validate().is_ok());
    }
}
