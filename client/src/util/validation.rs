//! Field checks for the login and registration forms.
//!
//! Validation runs before any request is sent; a form with errors is never
//! submitted. Each field carries at most one message, the first rule it fails.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// Loose `something@something.something` shape check.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("Invalid regex"));

const MIN_PASSWORD_LEN: usize = 6;
const MIN_NAME_LEN: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    FullName,
    Email,
    Password,
    ConfirmPassword,
    Terms,
}

/// Per-field error messages.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    /// Drop the error for a field the user just edited.
    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }

    fn insert(&mut self, field: Field, message: &'static str) {
        self.0.entry(field).or_insert(message);
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

fn check_email(errors: &mut FieldErrors, email: &str) {
    if email.is_empty() {
        errors.insert(Field::Email, "Email is required");
    } else if !is_valid_email(email) {
        errors.insert(Field::Email, "Email is invalid");
    }
}

pub fn validate_login(email: &str, password: &str) -> FieldErrors {
    let mut errors = FieldErrors::default();
    check_email(&mut errors, email);
    if password.is_empty() {
        errors.insert(Field::Password, "Password is required");
    }
    errors
}

/// Raw registration form contents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub accept_terms: bool,
}

impl RegisterForm {
    /// Request body for a validated form; the name is sent trimmed.
    pub fn to_request(&self) -> campus::RegisterRequest {
        campus::RegisterRequest {
            full_name: self.full_name.trim().to_owned(),
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

pub fn validate_register(form: &RegisterForm) -> FieldErrors {
    let mut errors = FieldErrors::default();

    let name = form.full_name.trim();
    if name.is_empty() {
        errors.insert(Field::FullName, "Full name is required");
    } else if name.chars().count() < MIN_NAME_LEN {
        errors.insert(Field::FullName, "Full name must be at least 2 characters");
    }

    check_email(&mut errors, &form.email);

    if form.password.is_empty() {
        errors.insert(Field::Password, "Password is required");
    } else if form.password.chars().count() < MIN_PASSWORD_LEN {
        errors.insert(Field::Password, "Password must be at least 6 characters");
    }

    if form.password != form.confirm_password {
        errors.insert(Field::ConfirmPassword, "Passwords do not match");
    }

    if !form.accept_terms {
        errors.insert(Field::Terms, "You must accept the terms and conditions");
    }

    errors
}
