//! core::policy
//!
//! Target filename policies.
//!
//! Exactly one policy is active for a run:
//!
//! - [`Policy::Classify`]: `{name}.lib.yaml` for library names, otherwise
//!   `{name}.{tree|wflow|lut}.yaml` from the declared `type`.
//! - [`Policy::Versioned`]: `{name}-{version}.yaml`. Every pass also bumps
//!   the patch version, so a processed file always advances.
//!
//! Resolution is pure: it never touches the filesystem.

use serde::{Deserialize, Serialize};

use super::types::{CanonicalName, DeclaredVersion, RecordKind, TypeError};

/// How a record's target filename is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Classify by library name or declared `type`.
    #[default]
    Classify,
    /// Suffix the filename with the declared version and bump it.
    Versioned,
}

impl Policy {
    /// Valid policy names, as written in configuration.
    pub const NAMES: &'static [&'static str] = &["classify", "versioned"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Classify => "classify",
            Self::Versioned => "versioned",
        }
    }

    /// Whether this policy bumps the version on every pass.
    pub fn bumps_version(self) -> bool {
        matches!(self, Self::Versioned)
    }

    /// Whether this policy requires exactly one of each library file.
    pub fn requires_libraries(self) -> bool {
        matches!(self, Self::Classify)
    }

    /// Resolve the target filename for a record.
    ///
    /// `type_field` is the raw `type` value; only [`Policy::Classify`] reads it.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidName` under [`Policy::Classify`] when the
    /// name is not a library name and the `type` is not recognized.
    ///
    /// # Example
    ///
    /// ```
    /// use yamlnorm::core::policy::Policy;
    /// use yamlnorm::core::types::{CanonicalName, DeclaredVersion};
    ///
    /// let name = CanonicalName::new("resize").unwrap();
    /// let version = DeclaredVersion::parse("1.0.0").unwrap();
    ///
    /// assert_eq!(
    ///     Policy::Classify.resolve(&name, &version, Some("workflow")).unwrap(),
    ///     "resize.wflow.yaml"
    /// );
    /// assert_eq!(
    ///     Policy::Versioned.resolve(&name, &version, None).unwrap(),
    ///     "resize-1.0.0.yaml"
    /// );
    /// ```
    pub fn resolve(
        self,
        name: &CanonicalName,
        version: &DeclaredVersion,
        type_field: Option<&str>,
    ) -> Result<String, TypeError> {
        match self {
            Self::Classify => {
                if let Some(library) = name.library() {
                    return Ok(library.file_name());
                }
                match type_field.and_then(RecordKind::from_type_field) {
                    Some(kind) => Ok(format!("{}.{}.yaml", name, kind.suffix())),
                    None => Err(TypeError::InvalidName(format!(
                        "'{}' is not a library name and type {} is not one of tree, workflow, lut",
                        name,
                        type_field.map_or_else(|| "(missing)".to_string(), |t| format!("'{t}'"))
                    ))),
                }
            }
            Self::Versioned => Ok(versioned_file_name(name, version)),
        }
    }
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `{name}-{version}.yaml`
pub fn versioned_file_name(name: &CanonicalName, version: &DeclaredVersion) -> String {
    format!("{name}-{version}.yaml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> CanonicalName {
        CanonicalName::new(s).unwrap()
    }

    fn version(s: &str) -> DeclaredVersion {
        DeclaredVersion::parse(s).unwrap()
    }

    #[test]
    fn classify_library_names_ignore_type() {
        let target = Policy::Classify
            .resolve(&name("nodes"), &version("1.0.0"), Some("tree"))
            .unwrap();
        assert_eq!(target, "nodes.lib.yaml");
    }

    #[test]
    fn classify_by_type() {
        let v = version("0.1.0");
        assert_eq!(
            Policy::Classify
                .resolve(&name("walk"), &v, Some("tree"))
                .unwrap(),
            "walk.tree.yaml"
        );
        assert_eq!(
            Policy::Classify
                .resolve(&name("gamma"), &v, Some("lut"))
                .unwrap(),
            "gamma.lut.yaml"
        );
        assert_eq!(
            Policy::Classify
                .resolve(&name("pipeline"), &v, Some("workflow"))
                .unwrap(),
            "pipeline.wflow.yaml"
        );
    }

    #[test]
    fn classify_unknown_type_rejected() {
        let v = version("1.0.0");
        assert!(matches!(
            Policy::Classify.resolve(&name("thing"), &v, Some("widget")),
            Err(TypeError::InvalidName(_))
        ));
        assert!(matches!(
            Policy::Classify.resolve(&name("thing"), &v, None),
            Err(TypeError::InvalidName(_))
        ));
    }

    #[test]
    fn versioned_ignores_type() {
        let target = Policy::Versioned
            .resolve(&name("foo"), &version("2.3.4"), Some("tree"))
            .unwrap();
        assert_eq!(target, "foo-2.3.4.yaml");
    }

    #[test]
    fn policy_flags() {
        assert!(Policy::Versioned.bumps_version());
        assert!(!Policy::Classify.bumps_version());
        assert!(Policy::Classify.requires_libraries());
        assert!(!Policy::Versioned.requires_libraries());
        assert_eq!(Policy::default(), Policy::Classify);
    }
}
