//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `stackform-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::Template;
use crate::error::StackformResult;

/// Port for artifact writing.
///
/// Implemented by:
/// - `stackform_adapters::filesystem::LocalFilesystem` (production)
/// - `stackform_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StackformResult<()>;

    /// Replace `path` with `content`.
    ///
    /// Must be all-or-nothing: on error the previous file (or its absence)
    /// is left in place.
    fn write_file(&self, path: &Path, content: &str) -> StackformResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for document rendering.
///
/// Implemented by:
/// - `stackform_adapters::renderer::YamlRenderer` (short or long form YAML)
/// - `stackform_adapters::renderer::JsonRenderer`
///
/// Implementations must preserve declaration order and be deterministic.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Short format name for logs and errors.
    fn format(&self) -> &'static str;

    /// Serialize an already validated document.
    fn render(&self, template: &Template) -> StackformResult<String>;
}
