//! Contracts for user management

use pt_core::error::ValidationErrors;
use pt_models::{NewUser, User};
use serde::Deserialize;
use validator::Validate;

use crate::base::{merge_validator_errors, require_present, Contract, ValidationResult};

/// Contract for creating a user
///
/// Username uniqueness is case-insensitive and checked against the
/// collection as it stands at write time.
pub struct CreateUserContract<'a> {
    existing: &'a [User],
}

impl<'a> CreateUserContract<'a> {
    pub fn new(existing: &'a [User]) -> Self {
        Self { existing }
    }
}

impl Contract<NewUser> for CreateUserContract<'_> {
    fn validate(&self, input: &NewUser) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        require_present("name", &input.name, &mut errors);
        require_present("username", &input.username, &mut errors);
        require_present("password", &input.password, &mut errors);
        if let Err(field_errors) = input.validate() {
            merge_validator_errors(field_errors, &mut errors);
        }

        if !input.username.trim().is_empty()
            && self.existing.iter().any(|u| u.has_username(&input.username))
        {
            errors.add_base("Username already exists!");
            errors.add("username", "has already been taken");
        }

        errors.into_result()
    }
}

/// Password change request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePassword {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Contract for changing the acting user's password
pub struct ChangePasswordContract<'a> {
    user: &'a User,
}

impl<'a> ChangePasswordContract<'a> {
    pub fn new(user: &'a User) -> Self {
        Self { user }
    }
}

impl Contract<ChangePassword> for ChangePasswordContract<'_> {
    fn validate(&self, input: &ChangePassword) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        if input.new_password != input.confirm_password {
            errors.add_base("Passwords do not match");
            return Err(errors);
        }
        if self.user.password != input.current_password {
            errors.add_base("Incorrect current password");
            return Err(errors);
        }
        require_present("newPassword", &input.new_password, &mut errors);

        errors.into_result()
    }
}
