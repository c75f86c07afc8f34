//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};
use serde::{Deserialize, Serialize};

pub mod global;
pub use global::GlobalArgs;

/// Main CLI entry-point.
///
/// There are no subcommands: a bare `stackform` renders the public VPC
/// template, writes it, and echoes it on stdout.
#[derive(Debug, Parser)]
#[command(
    name     = "stackform",
    bin_name = "stackform",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate a CloudFormation template for a public two-subnet VPC",
    long_about = "Stackform emits a CloudFormation template describing a VPC with \
                  two public subnets, an internet gateway, and a default route. \
                  The template is written to vpc_new.yaml and printed on stdout.",
    after_help = "EXAMPLES:\n\
        \x20 stackform\n\
        \x20 stackform -o stacks/network.yaml\n\
        \x20 stackform --format json --dry-run\n\
        \x20 stackform --long-form -vv",
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(flatten)]
    pub generate: GenerateArgs,
}

/// Where and how the template is emitted. Unset flags fall back to the
/// loaded configuration.
#[derive(Debug, Args, Default)]
pub struct GenerateArgs {
    /// Artifact path.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Output file (default: vpc_new.yaml)"
    )]
    pub output: Option<PathBuf>,

    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        value_name = "FORMAT",
        help = "Artifact format (default: yaml)"
    )]
    pub format: Option<ArtifactFormat>,

    /// Write intrinsics as `{Ref: X}` / `{Fn::Select: [...]}` mappings
    /// instead of `!Ref X` tags. JSON is always long form.
    #[arg(long = "long-form", help = "Use long-form intrinsic functions in YAML")]
    pub long_form: bool,

    /// Render and print without touching the filesystem.
    #[arg(long = "dry-run", help = "Print the template without writing it")]
    pub dry_run: bool,
}

/// Serialization format of the artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum ArtifactFormat {
    #[default]
    #[value(alias = "yml")]
    #[serde(alias = "yml")]
    Yaml,
    Json,
}

impl std::fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yaml => write!(f, "yaml"),
            Self::Json => write!(f, "json"),
        }
    }
}
