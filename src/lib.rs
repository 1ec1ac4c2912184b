//! yamlnorm - Validate YAML definition files and keep their names in sync
//!
//! yamlnorm walks a directory tree, checks that every YAML file declares a
//! `name` (or `title`) and a `major.minor.patch` version, and renames each
//! file so its name follows from its content.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Orchestrates Scan → Plan → Execute → Verify
//! - [`core`] - Domain types, naming rules, records, policies, configuration
//! - [`ui`] - User-facing output
//!
//! # Correctness Invariants
//!
//! 1. After a successful run, every file's name is consistent with its
//!    declared name, version and type under the active policy
//! 2. The first invalid file aborts the run
//! 3. Only the executor mutates the filesystem
//! 4. Rewritten content is written atomically

pub mod cli;
pub mod core;
pub mod engine;
pub mod ui;
