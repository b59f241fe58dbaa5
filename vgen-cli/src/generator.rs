//! Validator generation for one input file.
//!
//! Wraps the `vgen-core` pipeline with the CLI's configuration: where the
//! artifact goes and how the emitted code refers to the runtime crate.

use crate::config::Config;
use crate::error::{CliError, CliResult};
use std::path::{Path, PathBuf};
use vgen_core::{Generator, RustSource};

/// Artifact produced for an input file.
#[derive(Debug, Clone)]
pub struct GeneratedArtifact {
    /// Where the artifact belongs.
    pub path: PathBuf,

    /// Complete Rust source.
    pub content: String,

    /// Structs that received a validator, in source order.
    pub structs: Vec<String>,
}

impl GeneratedArtifact {
    /// Whether any struct carried annotations.
    pub fn is_empty(&self) -> bool {
        self.structs.is_empty()
    }
}

/// Outcome of comparing an artifact with what is on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The file on disk matches.
    UpToDate,
    /// The file on disk differs.
    Stale,
    /// There is no file on disk.
    Missing,
}

/// Validator generator driven by a [`Config`].
pub struct ValidatorGenerator {
    config: Config,
}

impl ValidatorGenerator {
    /// Create a new generator with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Read `input` and produce its artifact in memory.
    pub fn generate(&self, input: &Path) -> CliResult<GeneratedArtifact> {
        let path = self.config.artifact_path(input)?;

        tracing::info!(input = %input.display(), "parsing source");
        let source = RustSource::from_path(input).map_err(vgen_core::GenerateError::from)?;

        let generated = Generator::new(self.config.emit_options()).generate(&source)?;

        Ok(GeneratedArtifact {
            path,
            content: generated.content,
            structs: generated.structs,
        })
    }

    /// Compare an artifact with the file at its path.
    ///
    /// An input without annotations should have no artifact, so any file at
    /// the path is stale.
    pub fn check(&self, artifact: &GeneratedArtifact) -> CliResult<CheckOutcome> {
        let exists = artifact.path.exists();
        if artifact.is_empty() {
            return Ok(if exists {
                CheckOutcome::Stale
            } else {
                CheckOutcome::UpToDate
            });
        }
        if !exists {
            return Ok(CheckOutcome::Missing);
        }

        let existing = std::fs::read_to_string(&artifact.path)?;
        if existing == artifact.content {
            Ok(CheckOutcome::UpToDate)
        } else {
            Ok(CheckOutcome::Stale)
        }
    }

    /// Like [`check`](Self::check), but a missing or stale file is an error.
    pub fn ensure_up_to_date(&self, artifact: &GeneratedArtifact) -> CliResult<()> {
        match self.check(artifact)? {
            CheckOutcome::UpToDate => Ok(()),
            CheckOutcome::Stale => Err(CliError::Check(format!(
                "{} is out of date",
                artifact.path.display()
            ))),
            CheckOutcome::Missing => Err(CliError::Check(format!(
                "{} does not exist",
                artifact.path.display()
            ))),
        }
    }
}
