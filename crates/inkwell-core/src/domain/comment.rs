use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::forms::ValidatedComment;

/// Comment entity - a reader comment attached to a post.
///
/// `author` is a free-text name, not a user reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author: String,
    pub text: String,
    pub created_date: DateTime<Utc>,
    pub approved_comment: bool,
}

impl Comment {
    /// Create a new, unapproved comment on `post_id`.
    pub fn new(post_id: Uuid, fields: ValidatedComment, now: DateTime<Utc>) -> Self {
        let (author, text) = fields.into_parts();
        Self {
            id: Uuid::new_v4(),
            post_id,
            author,
            text,
            created_date: now,
            approved_comment: false,
        }
    }

    pub fn approve(&mut self) {
        self.approved_comment = true;
    }
}
