use serde::Deserialize;

use super::{FormErrors, clean_text};

pub const USERNAME_MAX_LENGTH: usize = 150;
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Submitted fields for creating an account.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrationForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// A cleaned registration form. The password is still plain text.
#[derive(Debug, Clone)]
pub struct ValidatedRegistration {
    username: String,
    password: String,
}

impl RegistrationForm {
    pub fn validate(self) -> Result<ValidatedRegistration, FormErrors> {
        let mut errors = FormErrors::new();
        let username = clean_text(
            &mut errors,
            "username",
            &self.username,
            Some(USERNAME_MAX_LENGTH),
        );
        if !username
            .chars()
            .all(|c| c.is_alphanumeric() || "@.+-_".contains(c))
        {
            errors.add(
                "username",
                "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
            );
        }

        // Passwords are not trimmed.
        let password = self.password;
        if password.chars().count() < PASSWORD_MIN_LENGTH {
            errors.add(
                "password",
                format!(
                    "This password is too short. It must contain at least {PASSWORD_MIN_LENGTH} characters."
                ),
            );
        } else if password.chars().all(|c| c.is_ascii_digit()) {
            errors.add("password", "This password is entirely numeric.");
        } else if password.eq_ignore_ascii_case(&username) {
            errors.add("password", "The password is too similar to the username.");
        }

        errors.finish(ValidatedRegistration { username, password })
    }
}

impl ValidatedRegistration {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}
