// ============================================================================
// domain/error.rs - DECLARATION AND VALIDATION ERRORS
// ============================================================================

use thiserror::Error;

use super::entities::Section;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Declaration Errors
    // ========================================================================
    #[error("Duplicate {section} declaration: '{name}' is already declared")]
    DuplicateDeclaration { section: Section, name: String },

    #[error("Invalid {section} name '{name}': must be non-empty and alphanumeric")]
    InvalidLogicalId { section: Section, name: String },

    #[error("Too many {section} declarations: at most {limit} allowed")]
    LimitExceeded { section: Section, limit: usize },

    #[error("Invalid default for parameter '{name}': {reason}")]
    InvalidParameterDefault { name: String, reason: String },

    // ========================================================================
    // Reference Errors
    // ========================================================================
    #[error("Unresolved reference in '{referrer}': '{target}' is not declared")]
    UnresolvedReference { referrer: String, target: String },

    #[error("Resource '{resource}' ({kind}) is missing required property '{property}'")]
    MissingProperty {
        resource: String,
        kind: String,
        property: &'static str,
    },

    #[error("Template declares no resources")]
    EmptyTemplate,

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("No {section} named '{name}' is declared")]
    UnknownDeclaration { section: Section, name: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::DuplicateDeclaration { section, name } => vec![
                format!("'{}' is already used by another declaration", name),
                format!("Give the {} a unique name", section),
                "Parameters and resources share one namespace".into(),
            ],
            Self::InvalidLogicalId { .. } => vec![
                "Use only ASCII letters and digits".into(),
                "Examples: VPC, Subnet1, DefaultRoute".into(),
            ],
            Self::UnresolvedReference { referrer, target } => vec![
                format!("'{}' refers to '{}'", referrer, target),
                format!("Declare '{}' as a parameter or resource", target),
                "Or remove the reference".into(),
            ],
            Self::MissingProperty { kind, property, .. } => vec![
                format!("{} resources require the '{}' property", kind, property),
            ],
            Self::EmptyTemplate => vec!["Declare at least one resource".into()],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DuplicateDeclaration { .. }
            | Self::InvalidLogicalId { .. }
            | Self::LimitExceeded { .. }
            | Self::InvalidParameterDefault { .. } => ErrorCategory::Declaration,
            Self::UnresolvedReference { .. } | Self::MissingProperty { .. } | Self::EmptyTemplate => {
                ErrorCategory::Reference
            }
            Self::UnknownDeclaration { .. } => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Declaration,
    Reference,
    NotFound,
}
