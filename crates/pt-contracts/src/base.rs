//! Base contract system

use pt_core::error::ValidationErrors;

/// Result of contract validation
pub type ValidationResult = Result<(), ValidationErrors>;

/// Base contract trait
pub trait Contract<T> {
    /// Validate the input
    fn validate(&self, input: &T) -> ValidationResult;
}

/// Record a "can't be blank" error when `value` is empty after trimming
pub fn require_present(field: &str, value: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(field, "can't be blank");
    }
}

/// Fold `validator` derive errors into our error collection
pub fn merge_validator_errors(source: validator::ValidationErrors, errors: &mut ValidationErrors) {
    for (field, field_errors) in source.field_errors() {
        for error in field_errors {
            let message = match error.code.as_ref() {
                "email" => "is not a valid email address".to_string(),
                "length" => "has an invalid length".to_string(),
                other => format!("is invalid ({other})"),
            };
            errors.add(field, message);
        }
    }
}
