//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! Everything the user is meant to read goes through this module so that
//! `--quiet` is honored consistently. Diagnostics go through `tracing`
//! instead and are controlled by `--debug` / `RUST_LOG`.

pub mod output;
