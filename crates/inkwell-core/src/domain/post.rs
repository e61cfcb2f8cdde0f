use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::forms::ValidatedPost;

/// Post entity - a blog article, either a draft or published.
///
/// `published_date` is the only state flag: `None` means draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub text: String,
    pub created_date: DateTime<Utc>,
    pub published_date: Option<DateTime<Utc>>,
}

impl Post {
    /// Create a new, unsaved draft from validated form input.
    pub fn new(author_id: Uuid, fields: ValidatedPost, now: DateTime<Utc>) -> Self {
        let (title, text) = fields.into_content();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            text,
            created_date: now,
            published_date: None,
        }
    }

    /// Mark the post as published at `now`.
    ///
    /// Publishing an already published post refreshes the timestamp.
    pub fn publish(&mut self, now: DateTime<Utc>) {
        self.published_date = Some(now);
    }

    /// Replace the editable fields. `created_date` never changes.
    pub fn apply(&mut self, author_id: Uuid, fields: ValidatedPost) {
        let (title, text) = fields.into_content();
        self.author_id = author_id;
        self.title = title;
        self.text = text;
    }

    pub fn is_draft(&self) -> bool {
        self.published_date.is_none()
    }

    /// A post is visible in the published list once its timestamp is not in the future.
    pub fn is_published(&self, now: DateTime<Utc>) -> bool {
        matches!(self.published_date, Some(published) if published <= now)
    }
}
