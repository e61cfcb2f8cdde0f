//! Comment handlers: submission and moderation.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use inkwell_core::forms::CommentForm;
use inkwell_shared::dto::FormPage;

use super::views::{post_path, redirect};
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /post/{id}/comment/
pub async fn comment_form(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.blog.post(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(FormPage {
        action: format!("/post/{}/comment/", post.id),
        form: CommentForm::default(),
    }))
}

/// POST /post/{id}/comment/
pub async fn add_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CommentForm>,
) -> AppResult<HttpResponse> {
    let comment = state
        .blog
        .add_comment(&identity.actor(), path.into_inner(), body.into_inner())
        .await?;

    tracing::info!(
        comment_id = %comment.id,
        post_id = %comment.post_id,
        "Comment awaiting approval"
    );
    Ok(redirect(&post_path(comment.post_id)))
}

/// GET|POST /comment/{id}/approve/
pub async fn comment_approve(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comment = state
        .blog
        .approve_comment(&identity.actor(), path.into_inner())
        .await?;

    tracing::info!(comment_id = %comment.id, user = %identity.username, "Comment approved");
    Ok(redirect(&post_path(comment.post_id)))
}

/// GET|POST /comment/{id}/remove/
pub async fn comment_remove(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comment_id = path.into_inner();
    let post_id = state
        .blog
        .remove_comment(&identity.actor(), comment_id)
        .await?;

    tracing::info!(%comment_id, %post_id, user = %identity.username, "Comment removed");
    Ok(redirect(&post_path(post_id)))
}
