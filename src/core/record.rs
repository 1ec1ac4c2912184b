//! core::record
//!
//! The parsed content of one YAML definition file.
//!
//! # Preservation
//!
//! A [`Record`] keeps the whole top-level mapping, in its original key
//! order, so that writing it back only changes the fields the tool sets.
//! Comments and formatting are not preserved.

use serde_yaml::{Mapping, Value};
use thiserror::Error;

/// Errors from loading a record.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("malformed YAML: {0}")]
    Malformed(String),

    #[error("document must be a mapping, found {0}")]
    NotAMapping(&'static str),

    #[error("file is empty or contains only comments")]
    Empty,

    #[error("missing name/title")]
    MissingName,

    #[error("missing version")]
    MissingVersion,

    #[error("failed to serialize record: {0}")]
    Serialize(String),
}

/// Structured content of one definition file.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    fields: Mapping,
}

impl Record {
    /// Parse YAML text into a record.
    ///
    /// Only the document shape is checked here; required fields are checked
    /// by [`Record::require_fields`].
    pub fn parse(text: &str) -> Result<Self, RecordError> {
        if is_blank(text) {
            return Err(RecordError::Empty);
        }
        let value: Value =
            serde_yaml::from_str(text).map_err(|e| RecordError::Malformed(e.to_string()))?;

        match value {
            Value::Null => Err(RecordError::Empty),
            Value::Mapping(fields) if fields.is_empty() => Err(RecordError::Empty),
            Value::Mapping(fields) => Ok(Self { fields }),
            other => Err(RecordError::NotAMapping(kind_of(&other))),
        }
    }

    /// Confirm the record declares a name (or title) and a version.
    pub fn require_fields(&self) -> Result<(), RecordError> {
        if self.declared_name().is_none() {
            return Err(RecordError::MissingName);
        }
        if self.version().is_none() {
            return Err(RecordError::MissingVersion);
        }
        Ok(())
    }

    /// The declared `name`, falling back to `title` when `name` is absent or empty.
    pub fn declared_name(&self) -> Option<String> {
        self.scalar("name").or_else(|| self.scalar("title"))
    }

    /// The declared `version`, as written.
    pub fn version(&self) -> Option<String> {
        self.scalar("version")
    }

    /// The declared `type`, as written.
    pub fn type_field(&self) -> Option<String> {
        self.scalar("type")
    }

    /// Replace the `version` field, keeping its position in the mapping.
    pub fn set_version(&mut self, version: impl Into<String>) {
        let key = Value::String("version".to_string());
        let value = Value::String(version.into());
        match self.fields.get_mut(&key) {
            Some(slot) => *slot = value,
            None => {
                self.fields.insert(key, value);
            }
        }
    }

    /// Serialize the record back to YAML text.
    pub fn to_yaml(&self) -> Result<String, RecordError> {
        serde_yaml::to_string(&self.fields).map_err(|e| RecordError::Serialize(e.to_string()))
    }

    /// Read a scalar field through its YAML text form.
    ///
    /// Empty strings and non-scalar values read as absent.
    fn scalar(&self, key: &str) -> Option<String> {
        let text = match self.fields.get(key)? {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return None,
        };
        (!text.is_empty()).then_some(text)
    }
}

/// No content besides whitespace and comments.
fn is_blank(text: &str) -> bool {
    text.lines().map(str::trim).all(|line| line.is_empty() || line.starts_with('#'))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reads_fields() {
        let record = Record::parse("name: Foo Bar\nversion: 1.2.3\ntype: tree\n").unwrap();
        assert_eq!(record.declared_name().as_deref(), Some("Foo Bar"));
        assert_eq!(record.version().as_deref(), Some("1.2.3"));
        assert_eq!(record.type_field().as_deref(), Some("tree"));
    }

    #[test]
    fn title_used_when_name_absent() {
        let record = Record::parse("title: Fallback\nversion: 1.0.0\n").unwrap();
        assert_eq!(record.declared_name().as_deref(), Some("Fallback"));
    }

    #[test]
    fn title_used_when_name_empty() {
        let record = Record::parse("name: ''\ntitle: Fallback\nversion: 1.0.0\n").unwrap();
        assert_eq!(record.declared_name().as_deref(), Some("Fallback"));
    }

    #[test]
    fn numeric_version_reads_as_text() {
        let record = Record::parse("name: x\nversion: 1.5\n").unwrap();
        assert_eq!(record.version().as_deref(), Some("1.5"));
    }

    #[test]
    fn empty_document_rejected() {
        assert!(matches!(Record::parse(""), Err(RecordError::Empty)));
        assert!(matches!(
            Record::parse("# only a comment\n"),
            Err(RecordError::Empty)
        ));
        assert!(matches!(Record::parse("{}"), Err(RecordError::Empty)));
    }

    #[test]
    fn malformed_rejected() {
        assert!(matches!(
            Record::parse("name: [unclosed\n"),
            Err(RecordError::Malformed(_))
        ));
    }

    #[test]
    fn sequence_rejected() {
        assert!(matches!(
            Record::parse("- a\n- b\n"),
            Err(RecordError::NotAMapping("a sequence"))
        ));
    }

    #[test]
    fn require_fields_checks_name_then_version() {
        let no_name = Record::parse("version: 1.0.0\n").unwrap();
        assert!(matches!(
            no_name.require_fields(),
            Err(RecordError::MissingName)
        ));

        let no_version = Record::parse("name: foo\n").unwrap();
        assert!(matches!(
            no_version.require_fields(),
            Err(RecordError::MissingVersion)
        ));
    }

    #[test]
    fn set_version_preserves_order_and_unknown_fields() {
        let mut record =
            Record::parse("name: foo\nversion: 1.0.0\nextra:\n  nested: [1, 2]\n").unwrap();
        record.set_version("1.0.1");

        let text = record.to_yaml().unwrap();
        let version_at = text.find("version").unwrap();
        let extra_at = text.find("extra").unwrap();
        assert!(text.starts_with("name: foo"));
        assert!(version_at < extra_at);
        assert!(text.contains("nested:"));

        let reparsed = Record::parse(&text).unwrap();
        assert_eq!(reparsed.version().as_deref(), Some("1.0.1"));
    }
}
