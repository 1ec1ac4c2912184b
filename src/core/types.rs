//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`CanonicalName`] - Normalized, filesystem-safe record name
//! - [`DeclaredVersion`] - Validated `major.minor.patch` version
//! - [`RecordKind`] - Declared `type` of a classified record
//! - [`LibraryKind`] - One of the shared library files
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, so the resolver never has to re-check them.
//!
//! # Examples
//!
//! ```
//! use yamlnorm::core::types::{CanonicalName, DeclaredVersion};
//!
//! let name = CanonicalName::from_declared("Foo Bar").unwrap();
//! assert_eq!(name.as_str(), "foo_bar");
//!
//! let version = DeclaredVersion::parse("1.2.3").unwrap();
//! assert_eq!(version.bump_patch().unwrap().to_string(), "1.2.4");
//!
//! assert!(CanonicalName::from_declared("-dash").is_err());
//! assert!(DeclaredVersion::parse("1.2.x").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::naming;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("invalid version: {0}")]
    InvalidVersion(String),
}

/// A validated canonical record name.
///
/// Canonical names are non-empty and contain only `[A-Za-z0-9_]`.
///
/// # Example
///
/// ```
/// use yamlnorm::core::types::CanonicalName;
///
/// let name = CanonicalName::new("data_loader").unwrap();
/// assert_eq!(name.as_str(), "data_loader");
///
/// assert!(CanonicalName::new("").is_err());
/// assert!(CanonicalName::new("Has Space").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CanonicalName(String);

impl CanonicalName {
    /// Create a canonical name from an already-normalized string.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidName` if the string is empty or contains
    /// characters outside `[A-Za-z0-9_]`.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        if !naming::is_canonical(&name) {
            return Err(TypeError::InvalidName(format!(
                "'{name}' must be non-empty and contain only alphanumeric characters and underscores"
            )));
        }
        Ok(Self(name))
    }

    /// Normalize a declared `name`/`title` and validate the result.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidName` if normalization leaves nothing usable.
    pub fn from_declared(raw: &str) -> Result<Self, TypeError> {
        let normalized = naming::normalize(raw);
        Self::new(normalized).map_err(|_| {
            TypeError::InvalidName(format!(
                "'{}' does not normalize to a name made of alphanumeric characters and underscores",
                raw.trim()
            ))
        })
    }

    /// The library this name designates, if any.
    pub fn library(&self) -> Option<LibraryKind> {
        LibraryKind::from_name(&self.0)
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CanonicalName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<CanonicalName> for String {
    fn from(name: CanonicalName) -> Self {
        name.0
    }
}

impl AsRef<str> for CanonicalName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CanonicalName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated semantic version declared by a record.
///
/// Pre-release and build metadata are tolerated when parsing, but a
/// patch bump always produces a plain `major.minor.patch`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeclaredVersion(semver::Version);

impl DeclaredVersion {
    /// Parse a version string.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidVersion` unless the string is a
    /// three-component version of non-negative integers.
    pub fn parse(raw: &str) -> Result<Self, TypeError> {
        semver::Version::parse(raw.trim())
            .map(Self)
            .map_err(|e| TypeError::InvalidVersion(format!("'{raw}' is not a valid SemVer: {e}")))
    }

    /// Return the next patch version.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidVersion` if the patch component is already
    /// `u64::MAX`.
    ///
    /// # Example
    ///
    /// ```
    /// use yamlnorm::core::types::DeclaredVersion;
    ///
    /// let v = DeclaredVersion::parse("2.0.9-rc.1").unwrap();
    /// assert_eq!(v.bump_patch().unwrap().to_string(), "2.0.10");
    /// ```
    pub fn bump_patch(&self) -> Result<Self, TypeError> {
        let patch = self.0.patch.checked_add(1).ok_or_else(|| {
            TypeError::InvalidVersion(format!("'{}' cannot be bumped: patch overflows", self.0))
        })?;
        Ok(Self(semver::Version::new(self.0.major, self.0.minor, patch)))
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn patch(&self) -> u64 {
        self.0.patch
    }
}

impl TryFrom<String> for DeclaredVersion {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<DeclaredVersion> for String {
    fn from(version: DeclaredVersion) -> Self {
        version.0.to_string()
    }
}

impl std::fmt::Display for DeclaredVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Declared `type` of a classified record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Tree,
    Workflow,
    Lut,
}

impl RecordKind {
    /// Parse the value of a record's `type` field.
    pub fn from_type_field(value: &str) -> Option<Self> {
        match value {
            "tree" => Some(Self::Tree),
            "workflow" => Some(Self::Workflow),
            "lut" => Some(Self::Lut),
            _ => None,
        }
    }

    /// The filename infix for this kind (`{name}.{suffix}.yaml`).
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Tree => "tree",
            Self::Workflow => "wflow",
            Self::Lut => "lut",
        }
    }
}

/// One of the shared library files that must exist exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LibraryKind {
    Nodes,
    Modules,
    Tools,
}

impl LibraryKind {
    /// All library kinds, in reporting order.
    pub const ALL: [LibraryKind; 3] = [Self::Nodes, Self::Modules, Self::Tools];

    /// Match a canonical name against the library names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "nodes" => Some(Self::Nodes),
            "modules" => Some(Self::Modules),
            "tools" => Some(Self::Tools),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nodes => "nodes",
            Self::Modules => "modules",
            Self::Tools => "tools",
        }
    }

    /// The required filename, e.g. `tools.lib.yaml`.
    pub fn file_name(self) -> String {
        format!("{}.lib.yaml", self.as_str())
    }
}

impl std::fmt::Display for LibraryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
