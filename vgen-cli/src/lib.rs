//! # vgen-cli
//!
//! CLI library behind the `vgen` command, which compiles `#[vgen("...")]`
//! field annotations in a Rust source file into a companion file of
//! `Validate` implementations.
//!
//! ## Architecture
//!
//! - [`config`] - Configuration management and TOML parsing
//! - [`generator`] - Runs the `vgen-core` pipeline for one input file
//! - [`writer`] - Atomic file output and dry-run support
//! - [`error`] - Error types and exit codes

pub mod config;
pub mod error;
pub mod generator;
pub mod writer;

// Re-export main types for convenience
pub use config::{Config, ConfigManager};
pub use error::{CliError, CliResult};
pub use generator::{CheckOutcome, GeneratedArtifact, ValidatorGenerator};
pub use writer::{FileWriter, WriteResult};
