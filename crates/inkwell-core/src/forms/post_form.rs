use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{FormErrors, clean_text};

pub const TITLE_MAX_LENGTH: usize = 200;

/// Submitted fields for creating or editing a post.
///
/// `author` is optional; when absent the post is attributed to the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostForm {
    #[serde(default)]
    pub author: Option<Uuid>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
}

/// A cleaned post form. Only obtainable through [`PostForm::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPost {
    author: Option<Uuid>,
    title: String,
    text: String,
}

impl PostForm {
    pub fn validate(self) -> Result<ValidatedPost, FormErrors> {
        let mut errors = FormErrors::new();
        let title = clean_text(&mut errors, "title", &self.title, Some(TITLE_MAX_LENGTH));
        let text = clean_text(&mut errors, "text", &self.text, None);

        errors.finish(ValidatedPost {
            author: self.author,
            title,
            text,
        })
    }
}

impl ValidatedPost {
    pub fn author(&self) -> Option<Uuid> {
        self.author
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn into_content(self) -> (String, String) {
        (self.title, self.text)
    }
}
