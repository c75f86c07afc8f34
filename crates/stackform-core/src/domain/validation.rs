use crate::domain::{entities::template::Template, error::DomainError};

/// Centralized domain validation.
///
/// Cross-declaration rules live on the aggregate; this is the single entry
/// point the application layer calls before rendering.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_template(template: &Template) -> Result<(), DomainError> {
        template.validate()
    }
}

/// Logical ids, parameter names, and output names: `[A-Za-z0-9]+`.
pub(crate) fn is_valid_logical_id(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric())
}
