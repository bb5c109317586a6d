//! User validation rules.
//!
//! Rules are evaluated by plain functions returning a [`FieldErrors`]
//! report, so they can run before anything touches storage. Email
//! uniqueness needs storage and is appended by the service layer.

use once_cell::sync::Lazy;
use regex::Regex;
use validator::{Validate, ValidationErrors};

use crate::constants::{
    EMAIL_PATTERN, FIELD_NAME, FIELD_PASSWORD, REASON_BLANK, REASON_CONFIRMATION_MISMATCH,
};
use crate::error::FieldErrors;
use crate::user::{NewUser, UpdateUser};

pub static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"));

/// Check every rule that applies to a new registration.
pub fn validate_new_user(input: &NewUser) -> FieldErrors {
    let mut errors = collect(input.validate());
    check_present(&mut errors, FIELD_NAME, &input.name);
    check_present(&mut errors, FIELD_PASSWORD, &input.password);
    if input.password != input.password_confirmation {
        errors.add(FIELD_PASSWORD, REASON_CONFIRMATION_MISMATCH);
    }
    errors
}

/// Check the rules that apply to the fields supplied in an update.
pub fn validate_update_user(input: &UpdateUser) -> FieldErrors {
    let mut errors = collect(input.validate());
    if let Some(name) = &input.name {
        check_present(&mut errors, FIELD_NAME, name);
    }
    if let Some(password) = &input.password {
        check_present(&mut errors, FIELD_PASSWORD, password);
        if input.password_confirmation.as_deref() != Some(password.as_str()) {
            errors.add(FIELD_PASSWORD, REASON_CONFIRMATION_MISMATCH);
        }
    }
    errors
}

/// Whitespace-only values count as missing, whatever their length.
fn check_present(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, REASON_BLANK);
    }
}

/// Flatten validator output into a field/reason report, ordered by field.
fn collect(result: Result<(), ValidationErrors>) -> FieldErrors {
    let mut report = FieldErrors::new();
    let Err(errors) = result else {
        return report;
    };

    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    for (field, errs) in fields {
        for e in errs {
            let reason = e
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| "is invalid".to_string());
            report.add(field.to_string(), reason);
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FIELD_EMAIL;

    fn attrs() -> NewUser {
        NewUser {
            name: "Example User".to_string(),
            email: "user@example.com".to_string(),
            password: "foobar".to_string(),
            password_confirmation: "foobar".to_string(),
        }
    }

    fn with_password(password: &str) -> NewUser {
        NewUser {
            password: password.to_string(),
            password_confirmation: password.to_string(),
            ..attrs()
        }
    }

    #[test]
    fn valid_attributes_pass() {
        assert!(validate_new_user(&attrs()).is_empty());
    }

    #[test]
    fn requires_a_name() {
        let errors = validate_new_user(&NewUser {
            name: String::new(),
            ..attrs()
        });
        assert!(errors.has(FIELD_NAME));
    }

    #[test]
    fn whitespace_name_is_blank() {
        let errors = validate_new_user(&NewUser {
            name: "   ".to_string(),
            ..attrs()
        });
        assert_eq!(errors.reasons_for(FIELD_NAME).collect::<Vec<_>>(), [REASON_BLANK]);
    }

    #[test]
    fn requires_an_email() {
        let errors = validate_new_user(&NewUser {
            email: String::new(),
            ..attrs()
        });
        assert!(errors.has(FIELD_EMAIL));
    }

    #[test]
    fn name_length_bounds() {
        for (len, ok) in [(1, false), (2, true), (50, true), (51, false)] {
            let errors = validate_new_user(&NewUser {
                name: "a".repeat(len),
                ..attrs()
            });
            assert_eq!(errors.is_empty(), ok, "name length {len}");
        }
    }

    #[test]
    fn name_length_counts_characters() {
        let errors = validate_new_user(&NewUser {
            name: "é".repeat(50),
            ..attrs()
        });
        assert!(errors.is_empty());
    }

    #[test]
    fn accepts_valid_email_addresses() {
        for address in ["user@foo.com", "THE_USER@foo.bar.org", "first.last@foo.jp"] {
            let errors = validate_new_user(&NewUser {
                email: address.to_string(),
                ..attrs()
            });
            assert!(errors.is_empty(), "{address} should be accepted");
        }
    }

    #[test]
    fn rejects_invalid_email_addresses() {
        for address in ["user@foo,com", "user_at_foo.org", "example.user@foo."] {
            let errors = validate_new_user(&NewUser {
                email: address.to_string(),
                ..attrs()
            });
            assert!(errors.has(FIELD_EMAIL), "{address} should be rejected");
        }
    }

    #[test]
    fn rejects_non_ascii_email_addresses() {
        for address in ["ü@foo.com", "Ülla@foo.com", "user@föö.com"] {
            let errors = validate_new_user(&NewUser {
                email: address.to_string(),
                ..attrs()
            });
            assert!(errors.has(FIELD_EMAIL), "{address} should be rejected");
        }
    }

    #[test]
    fn requires_a_password() {
        let errors = validate_new_user(&with_password(""));
        assert!(errors.has(FIELD_PASSWORD));
    }

    #[test]
    fn whitespace_password_is_blank() {
        let errors = validate_new_user(&with_password("      "));
        assert_eq!(
            errors.reasons_for(FIELD_PASSWORD).collect::<Vec<_>>(),
            [REASON_BLANK]
        );
    }

    #[test]
    fn requires_matching_confirmation() {
        let errors = validate_new_user(&NewUser {
            password_confirmation: "invalid".to_string(),
            ..attrs()
        });
        assert_eq!(
            errors.reasons_for(FIELD_PASSWORD).collect::<Vec<_>>(),
            [REASON_CONFIRMATION_MISMATCH]
        );
    }

    #[test]
    fn password_length_bounds() {
        for (len, ok) in [(5, false), (6, true), (40, true), (41, false)] {
            let errors = validate_new_user(&with_password(&"a".repeat(len)));
            assert_eq!(errors.is_empty(), ok, "password length {len}");
        }
    }

    #[test]
    fn reports_every_failing_field() {
        let errors = validate_new_user(&NewUser {
            name: "a".to_string(),
            email: "nope".to_string(),
            password: "abc".to_string(),
            password_confirmation: "abc".to_string(),
        });
        assert!(errors.has(FIELD_NAME));
        assert!(errors.has(FIELD_EMAIL));
        assert!(errors.has(FIELD_PASSWORD));
    }

    #[test]
    fn empty_update_is_valid() {
        assert!(validate_update_user(&UpdateUser::default()).is_empty());
    }

    #[test]
    fn update_checks_supplied_fields_only() {
        let errors = validate_update_user(&UpdateUser {
            email: Some("user@foo,com".to_string()),
            ..Default::default()
        });
        assert!(errors.has(FIELD_EMAIL));
        assert!(!errors.has(FIELD_NAME));
    }

    #[test]
    fn update_rejects_blank_supplied_fields() {
        let errors = validate_update_user(&UpdateUser {
            name: Some("  ".to_string()),
            password: Some("       ".to_string()),
            password_confirmation: Some("       ".to_string()),
            ..Default::default()
        });
        assert!(errors.reasons_for(FIELD_NAME).any(|r| r == REASON_BLANK));
        assert_eq!(
            errors.reasons_for(FIELD_PASSWORD).collect::<Vec<_>>(),
            [REASON_BLANK]
        );
    }

    #[test]
    fn update_password_needs_confirmation() {
        let missing = validate_update_user(&UpdateUser {
            password: Some("newpass".to_string()),
            ..Default::default()
        });
        assert!(missing.has(FIELD_PASSWORD));

        let matching = validate_update_user(&UpdateUser {
            password: Some("newpass".to_string()),
            password_confirmation: Some("newpass".to_string()),
            ..Default::default()
        });
        assert!(matching.is_empty());
    }
}
