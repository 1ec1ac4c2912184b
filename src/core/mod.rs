//! core
//!
//! Core domain types, rules, and configuration for yamlnorm.
//!
//! # Modules
//!
//! - [`types`] - Strong types: CanonicalName, DeclaredVersion, RecordKind, LibraryKind
//! - [`naming`] - Name normalization and filename pattern recognition
//! - [`record`] - Parsed YAML content with field preservation
//! - [`policy`] - Target filename policies
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid names and versions from reaching the resolver
//! - Nothing in `core` touches the filesystem except config loading
//! - All resolution is deterministic

pub mod config;
pub mod naming;
pub mod policy;
pub mod record;
pub mod types;
