use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use crate::auth::password;

const MAX_FIELD_LENGTH: usize = 50;

/// Body for `POST /users`. All three fields are required; presence and shape
/// are checked by [`CreateUserRequest::validate`] so a single response can
/// name everything that is wrong.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Validated new-user input: trimmed fields plus a password that passed the
/// complexity policy. Only constructible through `validate`.
#[derive(Debug)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

impl CreateUserRequest {
    pub fn validate(self) -> Result<NewUser, Vec<String>> {
        let mut violations = Vec::new();

        let username = self
            .username
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_string();
        if username.is_empty() {
            violations.push("Username is a required field!".into());
        } else if username.chars().count() > MAX_FIELD_LENGTH {
            violations.push(format!(
                "Username must be at most {MAX_FIELD_LENGTH} characters!"
            ));
        }

        let email = self
            .email
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_string();
        if email.is_empty() {
            violations.push("Email is a required field!".into());
        } else if email.chars().count() > MAX_FIELD_LENGTH {
            violations.push(format!(
                "Email must be at most {MAX_FIELD_LENGTH} characters!"
            ));
        } else if !is_valid_email(&email) {
            violations.push("Email must be a valid address!".into());
        }

        let password = self.password.unwrap_or_default();
        if password.is_empty() {
            violations.push("Password is a required field!".into());
        } else if let Err(mut policy) = password::validate_complexity(&password) {
            violations.append(&mut policy);
        }

        if violations.is_empty() {
            Ok(NewUser {
                username,
                email,
                password,
            })
        } else {
            Err(violations)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, email: &str, password: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: Some(username.into()),
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }

    #[test]
    fn valid_request_passes_and_trims() {
        let new_user = request("  john_doe ", " john@example.com ", "Password1!")
            .validate()
            .expect("valid request");
        assert_eq!(new_user.username, "john_doe");
        assert_eq!(new_user.email, "john@example.com");
        assert_eq!(new_user.password, "Password1!");
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let violations = CreateUserRequest {
            username: None,
            email: None,
            password: None,
        }
        .validate()
        .expect_err("all fields missing");
        assert_eq!(violations.len(), 3);
        assert!(violations[0].contains("Username"));
        assert!(violations[1].contains("Email"));
        assert!(violations[2].contains("Password"));
    }

    #[test]
    fn whitespace_only_fields_count_as_missing() {
        let violations = request("   ", "  ", "Password1!")
            .validate()
            .expect_err("blank fields");
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn malformed_email_is_rejected() {
        for email in ["plainaddress", "a@b", "a b@c.com", "@no-local.com"] {
            let violations = request("john_doe", email, "Password1!")
                .validate()
                .expect_err("bad email");
            assert!(violations.iter().any(|v| v.contains("Email")));
        }
    }

    #[test]
    fn over_long_fields_are_rejected() {
        let long = "x".repeat(51);
        let violations = request(&long, "john@example.com", "Password1!")
            .validate()
            .expect_err("long username");
        assert!(violations[0].contains("at most 50"));

        let long_email = format!("{}@example.com", "x".repeat(45));
        let violations = request("john_doe", &long_email, "Password1!")
            .validate()
            .expect_err("long email");
        assert!(violations[0].contains("at most 50"));
    }

    #[test]
    fn weak_password_violations_surface() {
        let violations = request("john_doe", "john@example.com", "weak")
            .validate()
            .expect_err("weak password");
        assert!(violations.iter().any(|v| v.contains("characters")));
        assert!(violations.iter().any(|v| v.contains("uppercase")));
    }
}
