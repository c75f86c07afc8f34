//! Application layer errors.
//!
//! These errors represent failures in orchestration, not document rules.
//! Declaration and reference errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while rendering or writing an artifact.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The serializer rejected the document.
    #[error("Rendering {format} failed: {reason}")]
    RenderingFailed { format: &'static str, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::RenderingFailed { format, .. } => vec![
                format!("The document could not be serialized as {}", format),
                "Try another output format with --format".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to write: {}", path.display()),
                "Check that you have write permissions".into(),
                "Choose another destination with --output".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RenderingFailed { .. } | Self::FilesystemError { .. } => ErrorCategory::Internal,
        }
    }
}
