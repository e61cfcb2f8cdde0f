//! Form validators - whitelist and clean untrusted input before it reaches the domain.
//!
//! Each form is a plain struct listing exactly the fields a caller may submit.
//! Unknown fields are rejected at deserialization time. `validate()` never
//! touches the store: it returns a validated value that the service turns into
//! an entity, attaches foreign keys to, and persists.

mod comment_form;
mod post_form;
mod registration_form;

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

pub use comment_form::{COMMENT_AUTHOR_MAX_LENGTH, CommentForm, ValidatedComment};
pub use post_form::{PostForm, TITLE_MAX_LENGTH, ValidatedPost};
pub use registration_form::{
    PASSWORD_MIN_LENGTH, RegistrationForm, USERNAME_MAX_LENGTH, ValidatedRegistration,
};

pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// Field-level validation messages, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Single-field error, used when a check happens outside the form itself.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }

    /// `Ok(value)` if no errors were recorded.
    pub(crate) fn finish<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Trim a required text field and check its length in characters.
fn clean_text(
    errors: &mut FormErrors,
    field: &str,
    value: &str,
    max_length: Option<usize>,
) -> String {
    let cleaned = value.trim();
    if cleaned.is_empty() {
        errors.add(field, REQUIRED_MESSAGE);
        return String::new();
    }

    if let Some(max) = max_length {
        let length = cleaned.chars().count();
        if length > max {
            errors.add(
                field,
                format!("Ensure this value has at most {max} characters (it has {length})."),
            );
        }
    }

    cleaned.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_trims_whitespace() {
        let mut errors = FormErrors::new();
        let value = clean_text(&mut errors, "title", "  Hello  ", Some(10));

        assert!(errors.is_empty());
        assert_eq!(value, "Hello");
    }

    #[test]
    fn test_whitespace_only_is_required_error() {
        let mut errors = FormErrors::new();
        clean_text(&mut errors, "text", " \n\t ", None);

        assert_eq!(errors.get("text"), Some(&[REQUIRED_MESSAGE.to_string()][..]));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let mut errors = FormErrors::new();
        clean_text(&mut errors, "title", "ééé", Some(3));
        assert!(errors.is_empty());

        clean_text(&mut errors, "title", "éééé", Some(3));
        assert_eq!(
            errors.get("title").unwrap()[0],
            "Ensure this value has at most 3 characters (it has 4)."
        );
    }

    #[test]
    fn test_display_joins_fields() {
        let mut errors = FormErrors::new();
        errors.add("text", REQUIRED_MESSAGE);
        errors.add("author", "bad");

        assert_eq!(
            errors.to_string(),
            "author: bad; text: This field is required."
        );
    }
}
