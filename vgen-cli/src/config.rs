//! Configuration management for the CLI.
//!
//! This module handles loading configuration from `vgen.toml` files
//! and merging with command-line arguments.

use crate::error::{CliResult, ConfigError, WriteError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use vgen_core::EmitOptions;

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "vgen.toml";

/// Main configuration structure.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Output configuration.
    pub output: OutputConfig,

    /// Emitted code settings.
    pub codegen: CodegenConfig,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory for the artifact. Next to the input when unset.
    pub dir: Option<PathBuf>,

    /// Appended to the input file stem: `user.rs` becomes `user_vgen.rs`.
    pub suffix: String,

    /// Whether to emit the "generated by" header.
    pub header: bool,
}

/// Emitted code settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodegenConfig {
    /// Path of the runtime crate in emitted code.
    pub runtime_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: None,
            suffix: "_vgen".to_string(),
            header: true,
        }
    }
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            runtime_path: "::vgen".to_string(),
        }
    }
}

impl Config {
    /// Reject values that would produce a broken or dangerous artifact.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let suffix = &self.output.suffix;
        if suffix.is_empty() {
            return Err(ConfigError::invalid_value(
                "output.suffix",
                "must not be empty, the artifact would replace its input",
            ));
        }
        if suffix.contains(['/', '\\']) {
            return Err(ConfigError::invalid_value(
                "output.suffix",
                "must not contain path separators",
            ));
        }
        if self.codegen.runtime_path.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "codegen.runtime_path",
                "must not be empty",
            ));
        }
        Ok(())
    }

    /// Emitter settings derived from this configuration.
    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            runtime_path: self.codegen.runtime_path.trim().to_string(),
            header: self.output.header,
        }
    }

    /// Where the artifact for `input` goes.
    pub fn artifact_path(&self, input: &Path) -> CliResult<PathBuf> {
        let stem = input
            .file_stem()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| WriteError::InvalidPath {
                path: input.to_path_buf(),
            })?;

        let file_name = format!("{}{}.rs", stem.to_string_lossy(), self.output.suffix);
        let dir = match &self.output.dir {
            Some(dir) => dir.clone(),
            None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
        };

        Ok(dir.join(file_name))
    }
}

/// Configuration manager for loading and merging configs.
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from a file path.
    ///
    /// An explicit path must exist. Without one, `vgen.toml` in the current
    /// directory is used if present, and defaults otherwise.
    pub fn load(path: Option<&Path>) -> CliResult<Config> {
        let config_path = match path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::not_found(path.to_path_buf()).into())
            }
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(CONFIG_FILENAME);
                if !default.exists() {
                    tracing::debug!("no {} found, using defaults", CONFIG_FILENAME);
                    return Ok(Config::default());
                }
                default
            }
        };

        tracing::debug!(path = %config_path.display(), "loading configuration");

        let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config = Self::parse(&config_path, &content)?;
        Ok(config)
    }

    /// Parse configuration text. `path` is used in error messages.
    pub fn parse(path: &Path, content: &str) -> Result<Config, ConfigError> {
        let config: Config = toml::from_str(content)
            .map_err(|e| ConfigError::invalid_toml(path.to_path_buf(), e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Merge CLI arguments into configuration.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn merge_cli_args(mut config: Config, args: &CliArgs) -> Config {
        if let Some(ref output) = args.output {
            config.output.dir = Some(output.clone());
        }

        if args.no_header {
            config.output.header = false;
        }

        config
    }

    /// Generate default configuration file content with comments.
    pub fn default_config_content() -> &'static str {
        r#"# vgen configuration file

[output]
# Directory for generated files. Defaults to the directory of the input file.
# dir = "src/generated"

# Appended to the input file stem: user.rs -> user_vgen.rs
suffix = "_vgen"

# Start generated files with a "Code generated by vgen" comment
header = true

[codegen]
# Path of the vgen runtime crate as seen from the generated code
runtime_path = "::vgen"
"#
    }
}

/// CLI arguments that can override configuration.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Output directory override.
    pub output: Option<PathBuf>,

    /// Suppress the header comment.
    pub no_header: bool,
}
