use super::*;

fn login(username: &str, password: &str) -> LoginInput {
    LoginInput { username: username.to_owned(), password: password.to_owned() }
}

fn register(username: &str, email: &str, password: &str, confirm: &str) -> RegisterInput {
    RegisterInput {
        username: username.to_owned(),
        email: email.to_owned(),
        password: password.to_owned(),
        confirm_password: confirm.to_owned(),
    }
}

// =============================================================
// Login
// =============================================================

#[test]
fn login_accepts_valid_input_and_trims_username() {
    let ok = validate_login(&login("  alice  ", "secret123")).unwrap();
    assert_eq!(ok.username, "alice");
    assert_eq!(ok.password, "secret123");
}

#[test]
fn login_rejects_short_username() {
    let err = validate_login(&login("ab", "secret123")).unwrap_err();
    assert_eq!(err.first(USERNAME), Some("Username must be at least 3 characters"));
    assert!(err.field(PASSWORD).is_empty());
}

#[test]
fn login_rejects_short_password() {
    let err = validate_login(&login("alice", "short")).unwrap_err();
    assert_eq!(err.first(PASSWORD), Some("Password must be at least 8 characters"));
    assert!(err.field(USERNAME).is_empty());
}

#[test]
fn login_empty_fields_report_required_only() {
    let err = validate_login(&login("   ", "")).unwrap_err();
    assert_eq!(err.field(USERNAME), ["Username is required"]);
    assert_eq!(err.field(PASSWORD), ["Password is required"]);
}

#[test]
fn login_rejects_overlong_values() {
    let err = validate_login(&login(&"a".repeat(51), &"p".repeat(101))).unwrap_err();
    assert_eq!(err.first(USERNAME), Some("Username cannot exceed 50 characters"));
    assert_eq!(err.first(PASSWORD), Some("Password cannot exceed 100 characters"));
}

#[test]
fn login_does_not_restrict_username_characters() {
    assert!(validate_login(&login("alice smith", "secret123")).is_ok());
}

#[test]
fn login_length_bounds_are_inclusive() {
    assert!(validate_login(&login("abc", "12345678")).is_ok());
    assert!(validate_login(&login(&"a".repeat(50), &"p".repeat(100))).is_ok());
}

// =============================================================
// Registration
// =============================================================

#[test]
fn register_accepts_valid_input_and_normalizes() {
    let ok = validate_register(&register(" new_user ", "  Alice@Example.COM ", "Abcdefg1", "Abcdefg1")).unwrap();
    assert_eq!(ok.username, "new_user");
    assert_eq!(ok.email, "alice@example.com");
}

#[test]
fn register_mismatch_is_reported_on_confirmation() {
    let err = validate_register(&register("new_user", "a@b.co", "Abcdefg1", "Abcdefg2")).unwrap_err();
    assert_eq!(err.field(CONFIRM_PASSWORD), ["Passwords do not match"]);
    assert!(err.field(PASSWORD).is_empty());
    assert_eq!(err.iter().count(), 1);
}

#[test]
fn register_requires_confirmation() {
    let err = validate_register(&register("new_user", "a@b.co", "Abcdefg1", "")).unwrap_err();
    assert_eq!(err.first(CONFIRM_PASSWORD), Some("Please confirm the password"));
}

#[test]
fn register_rejects_username_symbols() {
    let err = validate_register(&register("bad name!", "a@b.co", "Abcdefg1", "Abcdefg1")).unwrap_err();
    assert_eq!(err.first(USERNAME), Some("Username may only contain letters, numbers, hyphens and underscores"));
}

#[test]
fn register_reports_each_missing_password_class() {
    let err = validate_register(&register("new_user", "a@b.co", "abcdefgh", "abcdefgh")).unwrap_err();
    assert_eq!(
        err.field(PASSWORD),
        ["Password must contain at least one uppercase letter", "Password must contain at least one number"]
    );
}

#[test]
fn register_short_password_still_checks_classes() {
    let err = validate_register(&register("new_user", "a@b.co", "ABC", "ABC")).unwrap_err();
    assert_eq!(
        err.field(PASSWORD),
        [
            "Password must be at least 8 characters",
            "Password must contain at least one lowercase letter",
            "Password must contain at least one number",
        ]
    );
}

#[test]
fn register_requires_email() {
    let err = validate_register(&register("new_user", "  ", "Abcdefg1", "Abcdefg1")).unwrap_err();
    assert_eq!(err.field(EMAIL), ["Email is required"]);
}

#[test]
fn register_rejects_malformed_email() {
    for email in ["plain", "a@b", "@b.co", ".a@b.co", "a..b@c.co", "a@b.c", "a b@c.co"] {
        let err = validate_register(&register("new_user", email, "Abcdefg1", "Abcdefg1")).unwrap_err();
        assert_eq!(err.first(EMAIL), Some("Invalid email"), "{email}");
    }
}

#[test]
fn register_rejects_overlong_email() {
    let email = format!("{}@example.com", "a".repeat(250));
    let err = validate_register(&register("new_user", &email, "Abcdefg1", "Abcdefg1")).unwrap_err();
    assert_eq!(err.field(EMAIL), ["Email cannot exceed 255 characters"]);
}

#[test]
fn email_shape_accepts_common_addresses() {
    for email in ["a@b.co", "first.last+tag@mail.example.org", "o'neil@example.ie", "UP@EXAMPLE.COM"] {
        assert!(is_valid_email(email), "{email}");
    }
}

#[test]
fn validation_errors_display_lists_fields() {
    let err = validate_login(&login("", "")).unwrap_err();
    assert_eq!(err.to_string(), "invalid input: password: Password is required; username: Username is required");
}
