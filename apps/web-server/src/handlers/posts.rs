//! Post handlers: lists, detail, create, edit, delete and publish.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use inkwell_core::forms::PostForm;
use inkwell_core::ports::CommentFilter;
use inkwell_shared::dto::{ConfirmDeleteResponse, FormPage, PostDetailResponse, PostListResponse};

use super::views::{comment_response, post_path, post_response, redirect};
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /
pub async fn post_list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.blog.published_posts().await?;

    Ok(HttpResponse::Ok().json(PostListResponse {
        posts: posts.iter().map(post_response).collect(),
    }))
}

/// GET /drafts/
pub async fn draft_list(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let posts = state.blog.draft_posts(&identity.actor()).await?;

    Ok(HttpResponse::Ok().json(PostListResponse {
        posts: posts.iter().map(post_response).collect(),
    }))
}

/// GET /post/{id}/
///
/// Signed-in readers see every comment, including those awaiting approval.
pub async fn post_detail(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let filter = match identity.0 {
        Some(_) => CommentFilter::All,
        None => CommentFilter::Approved,
    };
    let detail = state.blog.post_detail(path.into_inner(), filter).await?;

    Ok(HttpResponse::Ok().json(PostDetailResponse {
        post: post_response(&detail.post),
        comments: detail.comments.iter().map(comment_response).collect(),
    }))
}

/// GET /post/new/
pub async fn post_new_form(_identity: Identity) -> HttpResponse {
    HttpResponse::Ok().json(FormPage {
        action: "/post/new/".to_string(),
        form: PostForm::default(),
    })
}

/// POST /post/new/
pub async fn post_new(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostForm>,
) -> AppResult<HttpResponse> {
    let post = state
        .blog
        .create_post(&identity.actor(), body.into_inner())
        .await?;

    tracing::info!(post_id = %post.id, user = %identity.username, "Draft created");
    Ok(redirect(&post_path(post.id)))
}

/// GET /post/{id}/edit/
pub async fn post_edit_form(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.blog.post(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(FormPage {
        action: format!("/post/{}/edit/", post.id),
        form: PostForm {
            author: Some(post.author_id),
            title: post.title,
            text: post.text,
        },
    }))
}

/// POST /post/{id}/edit/
pub async fn post_edit(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<PostForm>,
) -> AppResult<HttpResponse> {
    let post = state
        .blog
        .update_post(&identity.actor(), path.into_inner(), body.into_inner())
        .await?;

    tracing::info!(post_id = %post.id, user = %identity.username, "Post updated");
    Ok(redirect(&post_path(post.id)))
}

/// GET /post/{id}/remove/
pub async fn post_remove_confirm(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.blog.post(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ConfirmDeleteResponse {
        action: format!("/post/{}/remove/", post.id),
        post: post_response(&post),
    }))
}

/// POST /post/{id}/remove/
pub async fn post_remove(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .blog
        .delete_post(&identity.actor(), path.into_inner())
        .await?;

    tracing::info!(post_id = %post.id, user = %identity.username, "Post deleted");
    Ok(redirect("/"))
}

/// GET|POST /post/{id}/publish/
pub async fn post_publish(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .blog
        .publish_post(&identity.actor(), path.into_inner())
        .await?;

    tracing::info!(
        post_id = %post.id,
        published_date = ?post.published_date,
        "Post published"
    );
    Ok(redirect(&post_path(post.id)))
}
