//! Response documents built from domain values.

use actix_web::{HttpResponse, http::header};
use uuid::Uuid;

use inkwell_core::domain::{Comment, Post};
use inkwell_shared::dto::{CommentResponse, PostResponse};

pub fn post_response(post: &Post) -> PostResponse {
    PostResponse {
        id: post.id,
        author_id: post.author_id,
        title: post.title.clone(),
        text: post.text.clone(),
        created_date: post.created_date,
        published_date: post.published_date,
        draft: post.is_draft(),
    }
}

pub fn comment_response(comment: &Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        post_id: comment.post_id,
        author: comment.author.clone(),
        text: comment.text.clone(),
        created_date: comment.created_date,
        approved_comment: comment.approved_comment,
    }
}

/// `/post/<id>/`
pub fn post_path(id: Uuid) -> String {
    format!("/post/{id}/")
}

/// 302 to `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}
