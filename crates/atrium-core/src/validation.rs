//! Validation utilities.

use crate::{AtriumError, FieldError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns an `AtriumError` on failure.
    fn validate_request(&self) -> Result<(), AtriumError> {
        self.validate().map_err(validation_errors_to_atrium_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to field-level errors.
#[must_use]
pub fn validation_errors_to_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), |m| m.to_string()),
                code: error.code.to_string(),
            })
        })
        .collect()
}

/// Converts `validator::ValidationErrors` to `AtriumError`.
#[must_use]
pub fn validation_errors_to_atrium_error(errors: ValidationErrors) -> AtriumError {
    let field_errors = validation_errors_to_field_errors(&errors);

    let message = field_errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    AtriumError::Validation(message)
}
