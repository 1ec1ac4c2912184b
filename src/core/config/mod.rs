//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! yamlnorm has two configuration scopes:
//! - **Global**: User-level settings
//! - **Project**: Settings stored in the root being processed
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Project config file
//! 4. CLI flags (not handled here)
//!
//! # Root Resolution
//!
//! The root is the CLI/environment value if given, else the global
//! config's `root`, else the current directory. The project config is
//! read from the resolved root.
//!
//! # Example
//!
//! ```no_run
//! use yamlnorm::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(Some(Path::new("/path/to/definitions"))).unwrap();
//!
//! println!("Root: {}", config.root().display());
//! println!("Policy: {}", config.policy());
//! println!("Skipping: {:?}", config.skip_dirs());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, ProjectConfig};

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::core::policy::Policy;

/// Name of the project config file inside a root.
pub const PROJECT_CONFIG_FILE: &str = ".yamlnorm.toml";

/// Directories skipped when nothing is configured.
pub const DEFAULT_SKIP_DIRS: &[&str] = &[".github"];

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", .path.display())]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{}': {message}", .path.display())]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("cannot determine working directory: {0}")]
    NoWorkingDir(std::io::Error),
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence automatically: project config overrides
/// global config, which overrides defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Project configuration (if the root has one)
    pub project: Option<ProjectConfig>,
    /// Resolved root directory
    root: PathBuf,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
    /// Path to the project config file (if loaded)
    project_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed, or if
    /// no root is given and the working directory is unavailable.
    /// Missing config files are not an error (defaults are used).
    pub fn load(root: Option<&Path>) -> Result<Config, ConfigError> {
        let global_path = Self::find_global();
        Self::load_from(global_path.as_deref(), root)
    }

    /// Load configuration using an explicit global config path.
    pub fn load_from(
        global_path: Option<&Path>,
        root: Option<&Path>,
    ) -> Result<Config, ConfigError> {
        let global = match global_path {
            Some(path) => Self::read_config::<GlobalConfig>(path)?,
            None => GlobalConfig::default(),
        };
        global.validate()?;

        let root = match root.map(Path::to_path_buf).or_else(|| global.root.clone()) {
            Some(root) => root,
            None => std::env::current_dir().map_err(ConfigError::NoWorkingDir)?,
        };

        let candidate = root.join(PROJECT_CONFIG_FILE);
        let (project, project_path) = if candidate.is_file() {
            let project = Self::read_config::<ProjectConfig>(&candidate)?;
            project.validate()?;
            (Some(project), Some(candidate))
        } else {
            (None, None)
        };

        Ok(Config {
            global,
            project,
            root,
            global_path: global_path.map(Path::to_path_buf),
            project_path,
        })
    }

    /// Find the global config file in standard locations.
    fn find_global() -> Option<PathBuf> {
        // 1. Check $YAMLNORM_CONFIG
        if let Ok(path) = std::env::var("YAMLNORM_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/yamlnorm/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("yamlnorm/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.yamlnorm/config.toml
        dirs::home_dir()
            .map(|home| home.join(".yamlnorm/config.toml"))
            .filter(|path| path.exists())
    }

    /// Read and parse a config file.
    fn read_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// The resolved root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the filename policy.
    ///
    /// Defaults to [`Policy::Classify`] if not configured.
    pub fn policy(&self) -> Policy {
        self.project
            .as_ref()
            .and_then(|p| p.policy)
            .or(self.global.policy)
            .unwrap_or_default()
    }

    /// Get the directory names to skip.
    ///
    /// Defaults to `[".github"]` if not configured.
    pub fn skip_dirs(&self) -> Vec<String> {
        self.project
            .as_ref()
            .and_then(|p| p.skip_dirs.clone())
            .or_else(|| self.global.skip_dirs.clone())
            .unwrap_or_else(|| DEFAULT_SKIP_DIRS.iter().map(|s| s.to_string()).collect())
    }

    /// Check if symbolic links are followed while walking.
    ///
    /// Defaults to `false` if not configured.
    pub fn follow_symlinks(&self) -> bool {
        self.project
            .as_ref()
            .and_then(|p| p.follow_symlinks)
            .or(self.global.follow_symlinks)
            .unwrap_or(false)
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded project config file.
    pub fn project_config_loaded_from(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }
}
