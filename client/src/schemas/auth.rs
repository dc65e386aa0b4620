//! Login and registration form rules.
//!
//! Inputs are trimmed before length checks. An empty field reports only its
//! "required" message; every other failing rule for a non-empty field is
//! reported.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::ValidationErrors;

pub const USERNAME: &str = "username";
pub const EMAIL: &str = "email";
pub const PASSWORD: &str = "password";
pub const CONFIRM_PASSWORD: &str = "confirm_password";

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 50;
const PASSWORD_MIN: usize = 8;
const PASSWORD_MAX: usize = 100;
const EMAIL_MAX: usize = 255;

static USERNAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid username pattern"));

// Leading dots and `..` runs are rejected separately; the regex crate has no
// lookahead.
static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+\-]@([A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$").expect("valid email pattern")
});

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Record length failures for a non-empty value. Returns false when the
/// value was empty and only the required message was recorded.
fn check_length(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    (min, max): (usize, usize),
    messages: [&'static str; 3],
) -> bool {
    let [required, too_short, too_long] = messages;
    let len = char_len(value);
    if len == 0 {
        errors.add(field, required);
        return false;
    }
    if len < min {
        errors.add(field, too_short);
    }
    if len > max {
        errors.add(field, too_long);
    }
    true
}

fn check_username(errors: &mut ValidationErrors, username: &str, restrict_chars: bool) {
    let present = check_length(
        errors,
        USERNAME,
        username,
        (USERNAME_MIN, USERNAME_MAX),
        ["Username is required", "Username must be at least 3 characters", "Username cannot exceed 50 characters"],
    );
    if present && restrict_chars && !USERNAME_CHARS.is_match(username) {
        errors.add(USERNAME, "Username may only contain letters, numbers, hyphens and underscores");
    }
}

fn check_password(errors: &mut ValidationErrors, password: &str, require_classes: bool) {
    let present = check_length(
        errors,
        PASSWORD,
        password,
        (PASSWORD_MIN, PASSWORD_MAX),
        ["Password is required", "Password must be at least 8 characters", "Password cannot exceed 100 characters"],
    );
    if !present || !require_classes {
        return;
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.add(PASSWORD, "Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.add(PASSWORD, "Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.add(PASSWORD, "Password must contain at least one number");
    }
}

/// Whether `email` has a plausible `local@domain.tld` shape.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && EMAIL_SHAPE.is_match(email)
}

/// Validate the sign-in form.
///
/// # Errors
///
/// Returns every failing rule keyed by field.
pub fn validate_login(input: &LoginInput) -> Result<LoginInput, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let username = input.username.trim();

    check_username(&mut errors, username, false);
    check_password(&mut errors, &input.password, false);

    errors.into_result(LoginInput { username: username.to_owned(), password: input.password.clone() })
}

/// Validate the registration form. On success the username is trimmed and
/// the email trimmed and lower-cased.
///
/// # Errors
///
/// Returns every failing rule keyed by field. A confirmation mismatch is
/// attached to `confirm_password`.
pub fn validate_register(input: &RegisterInput) -> Result<RegisterInput, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let username = input.username.trim();
    let email = input.email.trim();

    check_username(&mut errors, username, true);

    if email.is_empty() {
        errors.add(EMAIL, "Email is required");
    } else {
        if !is_valid_email(email) {
            errors.add(EMAIL, "Invalid email");
        }
        if char_len(email) > EMAIL_MAX {
            errors.add(EMAIL, "Email cannot exceed 255 characters");
        }
    }

    check_password(&mut errors, &input.password, true);

    if input.confirm_password.is_empty() {
        errors.add(CONFIRM_PASSWORD, "Please confirm the password");
    } else if input.confirm_password != input.password {
        errors.add(CONFIRM_PASSWORD, "Passwords do not match");
    }

    errors.into_result(RegisterInput {
        username: username.to_owned(),
        email: email.to_lowercase(),
        password: input.password.clone(),
        confirm_password: input.confirm_password.clone(),
    })
}
