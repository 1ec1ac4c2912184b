//! core::naming
//!
//! Name normalization and filename pattern recognition.
//!
//! # Features
//!
//! - Derive a canonical name from a declared `name`/`title`
//! - Recognize the filename shapes the tool produces

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex"));

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W").expect("static regex"));

static CLASSIFIED_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+)\.(tree|lut|wflow)\.yaml$").expect("static regex"));

static LIBRARY_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(nodes|modules|tools)\.lib\.yaml$").expect("static regex"));

static VERSIONED_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)-(\d+\.\d+\.\d+)\.yaml$").expect("static regex"));

/// Normalize a declared name into its canonical spelling.
///
/// Trims surrounding whitespace, lowercases, collapses whitespace runs to a
/// single `_`, then keeps everything up to the first non-word character.
/// The result is not validated; see [`is_canonical`].
///
/// # Example
///
/// ```
/// use yamlnorm::core::naming::normalize;
///
/// assert_eq!(normalize("Foo Bar"), "foo_bar");
/// assert_eq!(normalize("  Data   Loader "), "data_loader");
/// assert_eq!(normalize("fetch-tool v2"), "fetch");
/// ```
pub fn normalize(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let joined = WHITESPACE_RUN.replace_all(&lowered, "_");

    match NON_WORD.find(&joined) {
        Some(m) => joined[..m.start()].to_string(),
        None => joined.into_owned(),
    }
}

/// Check whether a string is a valid canonical name (`[A-Za-z0-9_]+`).
pub fn is_canonical(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A filename shape recognized by the tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilenamePattern {
    /// `{name}.{tree|lut|wflow}.yaml`
    Classified { stem: String, suffix: String },
    /// `{nodes|modules|tools}.lib.yaml`
    Library { stem: String },
    /// `{name}-{major.minor.patch}.yaml`
    Versioned { stem: String, version: String },
}

/// Recognize the shape of a filename, if it has one.
///
/// Library names are checked before the classified shape so that
/// `tools.lib.yaml` is never mistaken for anything else.
///
/// # Example
///
/// ```
/// use yamlnorm::core::naming::{recognize, FilenamePattern};
///
/// assert!(matches!(recognize("tools.lib.yaml"), Some(FilenamePattern::Library { .. })));
/// assert!(matches!(recognize("foo-1.2.3.yaml"), Some(FilenamePattern::Versioned { .. })));
/// assert_eq!(recognize("notes.yaml"), None);
/// ```
pub fn recognize(file_name: &str) -> Option<FilenamePattern> {
    if let Some(caps) = LIBRARY_FILE.captures(file_name) {
        return Some(FilenamePattern::Library {
            stem: caps[1].to_string(),
        });
    }
    if let Some(caps) = CLASSIFIED_FILE.captures(file_name) {
        return Some(FilenamePattern::Classified {
            stem: caps[1].to_string(),
            suffix: caps[2].to_string(),
        });
    }
    VERSIONED_FILE
        .captures(file_name)
        .map(|caps| FilenamePattern::Versioned {
            stem: caps[1].to_string(),
            version: caps[2].to_string(),
        })
}
