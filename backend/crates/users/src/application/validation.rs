//! Request Field Validation
//!
//! Field rules shared by registration and profile editing. Password length
//! policy lives in `platform::password`; everything else is here.

use crate::error::{UserError, UserResult};

/// Maximum length of an email address
pub const MAX_EMAIL_LENGTH: usize = 256;

/// Maximum length of a first or last name
pub const MAX_NAME_LENGTH: usize = 64;

/// Validate an email address: `local@domain` where the domain has a dot
pub fn validate_email(email: &str) -> UserResult<()> {
    if email.is_empty() || email.chars().count() > MAX_EMAIL_LENGTH {
        return Err(UserError::Validation("Invalid email".to_string()));
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(UserError::Validation("Invalid email".to_string()));
    };

    let domain_ok = domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.');
    if local.is_empty() || !domain_ok {
        return Err(UserError::Validation("Invalid email".to_string()));
    }

    Ok(())
}

/// Validate a first or last name: non-empty, bounded length
pub fn validate_name(field: &str, value: &str) -> UserResult<()> {
    if value.is_empty() {
        return Err(UserError::Validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(UserError::Validation(format!(
            "{field} must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(validate_email("adam@example.com").is_ok());
        assert!(validate_email("a.b+c@mail.example.co.nz").is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("adam@nodot").is_err());
        assert!(validate_email("adam@.com").is_err());
        assert!(validate_email("adam@example.").is_err());
    }

    #[test]
    fn test_email_length_bound() {
        let long = format!("{}@example.com", "a".repeat(MAX_EMAIL_LENGTH));
        assert!(validate_email(&long).is_err());
    }

    #[test]
    fn test_names() {
        assert!(validate_name("firstName", "Adam").is_ok());
        assert!(validate_name("firstName", "").is_err());
        assert!(validate_name("lastName", &"x".repeat(MAX_NAME_LENGTH + 1)).is_err());
    }
}
