//! Input validation rules
//!
//! Pure predicate functions over user/post input. Each rule is checked
//! independently and failures accumulate in order; callers fail the operation
//! with `ApiError::InvalidInput` when the returned list is non-empty.

use validator::ValidateEmail;

use crate::error::FieldError;

pub const MIN_PASSWORD_LEN: usize = 5;
pub const MIN_TITLE_LEN: usize = 5;
pub const MIN_CONTENT_LEN: usize = 5;

/// Validate signup input. Order of reported errors: e-mail, then password.
pub fn validate_user_input(email: &str, password: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if !email.validate_email() {
        errors.push(FieldError::new("e-mail is invalid"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(FieldError::new("password is too short"));
    }
    errors
}

/// Validate post input. Order of reported errors: title, then content.
pub fn validate_post_input(title: &str, content: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if title.chars().count() < MIN_TITLE_LEN {
        errors.push(FieldError::new("title is too short"));
    }
    if content.chars().count() < MIN_CONTENT_LEN {
        errors.push(FieldError::new("content is too short"));
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_email_reported() {
        let errors = validate_user_input("not-an-email", "longenough");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("e-mail"));
    }

    #[test]
    fn test_short_password_reported() {
        let errors = validate_user_input("someone@example.com", "ab");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("password"));
    }

    #[test]
    fn test_both_invalid_accumulate_in_order() {
        // No short-circuit: both rules checked, e-mail error first
        let errors = validate_user_input("not-an-email", "ab");
        assert_eq!(errors.len(), 2);
        assert!(errors[0].message.contains("e-mail"));
        assert!(errors[1].message.contains("password"));
    }

    #[test]
    fn test_valid_user_input() {
        assert!(validate_user_input("someone@example.com", "hunter2!").is_empty());
    }

    #[test]
    fn test_post_input_rules() {
        assert!(validate_post_input("A good title", "Some real content").is_empty());

        let errors = validate_post_input("abc", "xy");
        assert_eq!(errors.len(), 2);
        assert!(errors[0].message.contains("title"));
        assert!(errors[1].message.contains("content"));
    }

    #[test]
    fn test_boundary_lengths() {
        // Exactly 5 chars passes
        assert!(validate_post_input("12345", "12345").is_empty());
        assert!(validate_user_input("a@b.io", "12345").is_empty());
    }
}
