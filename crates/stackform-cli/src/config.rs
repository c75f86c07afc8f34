//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied by [`AppConfig::merge_args`])
//! 2. Environment variables, `STACKFORM_OUTPUT__PATH` style
//! 3. Config file (`--config FILE`, else the platform config dir)
//! 4. Built-in defaults
//!
//! ```toml
//! [output]
//! path = "stacks/vpc.yaml"
//! format = "yaml"
//! long_form = false
//! echo = true
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use stackform_adapters::blueprints::public_vpc::OUTPUT_FILE;

use crate::cli::{ArtifactFormat, GenerateArgs};

const ENV_PREFIX: &str = "STACKFORM";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Artifact path.
    pub path: PathBuf,
    pub format: ArtifactFormat,
    /// Long-form intrinsics in YAML.
    pub long_form: bool,
    /// Print the artifact on stdout after writing it.
    pub echo: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output: OutputConfig {
                path: PathBuf::from(OUTPUT_FILE),
                format: ArtifactFormat::Yaml,
                long_form: false,
                echo: true,
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, file, and environment.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("output.path", OUTPUT_FILE)?
            .set_default("output.format", defaults.output.format.to_string())?
            .set_default("output.long_form", defaults.output.long_form)?
            .set_default("output.echo", defaults.output.echo)?;

        builder = match config_file {
            Some(path) => {
                debug!(path = %path.display(), "Using config file");
                builder.add_source(File::from(path).format(FileFormat::Toml).required(true))
            }
            None => match Self::config_path() {
                Some(path) => {
                    builder.add_source(File::from(path).format(FileFormat::Toml).required(false))
                }
                None => builder,
            },
        };

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")
    }

    /// Apply flags given on the command line.
    pub fn merge_args(mut self, args: &GenerateArgs) -> Self {
        if let Some(path) = &args.output {
            self.output.path = path.clone();
        }
        if let Some(format) = args.format {
            self.output.format = format;
        }
        if args.long_form {
            self.output.long_form = true;
        }
        self
    }

    /// Default configuration file, `<config dir>/stackform/config.toml`.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "stackform")
            .map(|d| d.config_dir().join("config.toml"))
    }
}
