//! engine::reconcile
//!
//! Per-file reconciliation: load/validate, resolve the target name, and
//! plan the steps that make the file's name match its content.
//!
//! Nothing here touches the filesystem; callers supply the file's path
//! and text, and apply the returned [`FilePlan`] themselves.

use std::path::Path;

use tracing::debug;

use crate::core::naming::recognize;
use crate::core::policy::{versioned_file_name, Policy};
use crate::core::record::Record;
use crate::core::types::{CanonicalName, DeclaredVersion};

use super::plan::{FilePlan, PlanStep};
use super::ReconcileError;

/// A record whose required fields have been validated.
#[derive(Debug, Clone)]
pub struct LoadedRecord {
    /// The full parsed content.
    pub record: Record,
    /// Canonical form of the declared name/title.
    pub name: CanonicalName,
    /// The declared version.
    pub version: DeclaredVersion,
}

/// Parse and validate one file's content.
///
/// Checks run in order: YAML shape, required fields, name, version.
///
/// # Errors
///
/// - `InvalidContent` if the text is not a YAML mapping
/// - `MissingRequiredFields` if it is empty or lacks name/title or version
/// - `InvalidName` / `InvalidVersion` if those fields do not validate
pub fn load(path: &Path, text: &str) -> Result<LoadedRecord, ReconcileError> {
    let record = Record::parse(text).map_err(|e| ReconcileError::from_record(path, e))?;
    record
        .require_fields()
        .map_err(|e| ReconcileError::from_record(path, e))?;

    // require_fields guarantees both are present
    let declared = record.declared_name().unwrap_or_default();
    let raw_version = record.version().unwrap_or_default();

    let name =
        CanonicalName::from_declared(&declared).map_err(|e| ReconcileError::from_type(path, e))?;
    let version =
        DeclaredVersion::parse(&raw_version).map_err(|e| ReconcileError::from_type(path, e))?;

    Ok(LoadedRecord {
        record,
        name,
        version,
    })
}

/// Plan the steps for one file under `policy`.
///
/// The current filename is compared to the resolved target exactly
/// (case-sensitive). Under [`Policy::Versioned`] a bump step is always
/// planned, after the rename if there is one.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use yamlnorm::core::policy::Policy;
/// use yamlnorm::engine::reconcile::plan_file;
///
/// let plan = plan_file(
///     Path::new("defs/draft.yaml"),
///     "name: Edge Detect\nversion: 1.0.0\ntype: tree\n",
///     Policy::Classify,
/// )
/// .unwrap();
///
/// assert_eq!(plan.target, Path::new("defs/edge_detect.tree.yaml"));
/// assert_eq!(plan.steps.len(), 1);
/// ```
pub fn plan_file(path: &Path, text: &str, policy: Policy) -> Result<FilePlan, ReconcileError> {
    let loaded = load(path, text)?;
    let type_field = loaded.record.type_field();

    let target_name = policy
        .resolve(&loaded.name, &loaded.version, type_field.as_deref())
        .map_err(|e| ReconcileError::from_type(path, e))?;

    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    let current_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();

    let mut steps = Vec::new();
    let mut at = path.to_path_buf();

    if current_name != target_name {
        if let Some(shape) = recognize(current_name) {
            debug!(path = %path.display(), ?shape, "generated name is stale");
        }
        let to = dir.join(&target_name);
        steps.push(PlanStep::Rename {
            from: at.clone(),
            to: to.clone(),
        });
        at = to;
    }

    if policy.bumps_version() {
        let bumped = loaded
            .version
            .bump_patch()
            .map_err(|e| ReconcileError::from_type(path, e))?;
        let mut record = loaded.record;
        record.set_version(bumped.to_string());
        let contents = record
            .to_yaml()
            .map_err(|e| ReconcileError::from_record(path, e))?;

        let to = dir.join(versioned_file_name(&loaded.name, &bumped));
        steps.push(PlanStep::RewriteVersion {
            from: at.clone(),
            to: to.clone(),
            old_version: loaded.version.to_string(),
            new_version: bumped.to_string(),
            contents,
        });
        at = to;
    }

    Ok(FilePlan {
        source: path.to_path_buf(),
        name: loaded.name,
        target: at,
        steps,
    })
}
