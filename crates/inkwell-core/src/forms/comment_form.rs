use serde::{Deserialize, Serialize};

use super::{FormErrors, clean_text};

pub const COMMENT_AUTHOR_MAX_LENGTH: usize = 200;

/// Submitted fields for a new comment. The owning post comes from the URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommentForm {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub text: String,
}

/// A cleaned comment form. Only obtainable through [`CommentForm::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedComment {
    author: String,
    text: String,
}

impl CommentForm {
    pub fn validate(self) -> Result<ValidatedComment, FormErrors> {
        let mut errors = FormErrors::new();
        let author = clean_text(
            &mut errors,
            "author",
            &self.author,
            Some(COMMENT_AUTHOR_MAX_LENGTH),
        );
        let text = clean_text(&mut errors, "text", &self.text, None);

        errors.finish(ValidatedComment { author, text })
    }
}

impl ValidatedComment {
    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn into_parts(self) -> (String, String) {
        (self.author, self.text)
    }
}
