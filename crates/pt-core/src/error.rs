//! Core error types for prodtrack
//!
//! Every fallible operation in the workspace reports one of these variants.
//! Remote mirror failures are the exception: they are logged and swallowed
//! by the store, never returned.

use std::collections::BTreeMap;
use thiserror::Error;

/// Core error type for all prodtrack operations
#[derive(Error, Debug)]
pub enum PtError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Remote endpoint error: {0}")]
    Remote(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Standard Result type for prodtrack operations
pub type PtResult<T> = Result<T, PtError>;

impl PtError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl ToString) -> Self {
        PtError::NotFound {
            entity,
            field,
            value: value.to_string(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        PtError::Forbidden {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        PtError::Unauthorized {
            message: message.into(),
        }
    }

    /// Shorthand for a validation failure with a single base message
    pub fn invalid(message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add_base(message);
        PtError::Validation(errors)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PtError::NotFound { .. })
    }

    pub fn status_code(&self) -> u16 {
        match self {
            PtError::NotFound { .. } => 404,
            PtError::Unauthorized { .. } => 401,
            PtError::Forbidden { .. } => 403,
            PtError::Validation(_) => 422,
            PtError::Conflict { .. } => 409,
            PtError::Remote(_) => 502,
            PtError::Storage(_) | PtError::Config(_) | PtError::Internal(_) => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            PtError::NotFound { .. } => "not_found",
            PtError::Unauthorized { .. } => "unauthorized",
            PtError::Forbidden { .. } => "forbidden",
            PtError::Validation(_) => "validation_failed",
            PtError::Conflict { .. } => "conflict",
            PtError::Storage(_) => "storage_error",
            PtError::Remote(_) => "remote_error",
            PtError::Config(_) => "configuration_error",
            PtError::Internal(_) => "internal_error",
        }
    }
}

impl From<serde_json::Error> for PtError {
    fn from(err: serde_json::Error) -> Self {
        PtError::Storage(format!("serialization failed: {err}"))
    }
}

/// Validation errors collection
///
/// Field messages are kept in a `BTreeMap` so `full_messages` is stable.
#[derive(Error, Debug, Default, Clone, PartialEq)]
#[error("{}", self.full_messages().join(", "))]
pub struct ValidationErrors {
    /// Field-specific errors: field_name -> Vec<error_messages>
    pub errors: BTreeMap<String, Vec<String>>,
    /// Base errors not tied to a specific field
    pub base_errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn add_base(&mut self, message: impl Into<String>) {
        self.base_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.base_errors.is_empty()
    }

    /// Check if there are errors for a specific field
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Get errors for a specific field
    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.errors {
            self.errors.entry(field).or_default().extend(messages);
        }
        self.base_errors.extend(other.base_errors);
    }

    pub fn full_messages(&self) -> Vec<String> {
        let mut messages = self.base_errors.clone();
        for (field, field_messages) in &self.errors {
            for msg in field_messages {
                messages.push(format!("{} {}", field, msg));
            }
        }
        messages
    }

    /// `Ok(())` when empty, otherwise the collected errors
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_messages_order() {
        let mut errors = ValidationErrors::new();
        errors.add("quantity", "can't be blank");
        errors.add("productName", "can't be blank");
        errors.add_base("Selected date is marked as an Off Day.");

        assert_eq!(
            errors.full_messages(),
            vec![
                "Selected date is marked as an Off Day.".to_string(),
                "productName can't be blank".to_string(),
                "quantity can't be blank".to_string(),
            ]
        );
    }

    #[test]
    fn test_merge() {
        let mut a = ValidationErrors::new();
        a.add("username", "has already been taken");
        let mut b = ValidationErrors::new();
        b.add("username", "can't be blank");
        b.add_base("nope");
        a.merge(b);

        assert_eq!(a.get("username").map(Vec::len), Some(2));
        assert_eq!(a.base_errors, vec!["nope".to_string()]);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(PtError::not_found("ProductionEntry", "id", "42").status_code(), 404);
        assert_eq!(PtError::invalid("bad").status_code(), 422);
        assert_eq!(PtError::forbidden("no").error_code(), "forbidden");
        assert!(PtError::not_found("User", "id", 1).is_not_found());
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());
        let mut errors = ValidationErrors::new();
        errors.add("date", "is invalid");
        assert!(errors.into_result().is_err());
    }
}
