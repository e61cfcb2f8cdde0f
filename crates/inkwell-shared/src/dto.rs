//! Data Transfer Objects - the JSON documents each route reads or returns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A post as rendered in lists and detail pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub text: String,
    pub created_date: DateTime<Utc>,
    pub published_date: Option<DateTime<Utc>>,
    pub draft: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author: String,
    pub text: String,
    pub created_date: DateTime<Utc>,
    pub approved_comment: bool,
}

/// `/` and `/drafts/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse {
    pub posts: Vec<PostResponse>,
}

/// `/post/<id>/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailResponse {
    pub post: PostResponse,
    pub comments: Vec<CommentResponse>,
}

/// Initial values for a form route, and where to submit it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormPage<T> {
    pub action: String,
    pub form: T,
}

/// `/post/<id>/remove/` confirmation page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmDeleteResponse {
    pub action: String,
    pub post: PostResponse,
}

/// Request to log in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub next: Option<String>,
}

/// `GET /login/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginPage {
    pub action: String,
    pub next: String,
}

/// Session issued by login or registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub username: String,
    /// Local path the client should continue to.
    pub next: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AboutResponse {
    pub name: String,
    pub description: String,
}
