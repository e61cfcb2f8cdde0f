//! HTTP handlers and route configuration.

mod auth;
mod comments;
mod health;
mod pages;
mod posts;
mod views;

use actix_web::web;

use crate::middleware::error::AppError;

pub use pages::not_found;

/// Configure all application routes.
///
/// `/post/new/` is registered ahead of `/post/{id}/` so it is never read as
/// an id.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(web::PathConfig::default().error_handler(|_err, req| {
        AppError::NotFound(format!("No page at {}", req.path())).into()
    }))
    // Public pages
    .route("/", web::get().to(posts::post_list))
    .route("/about/", web::get().to(pages::about))
    // Posts
    .route("/drafts/", web::get().to(posts::draft_list))
    .service(
        web::resource("/post/new/")
            .route(web::get().to(posts::post_new_form))
            .route(web::post().to(posts::post_new)),
    )
    .route("/post/{id}/", web::get().to(posts::post_detail))
    .service(
        web::resource("/post/{id}/edit/")
            .route(web::get().to(posts::post_edit_form))
            .route(web::post().to(posts::post_edit)),
    )
    .service(
        web::resource("/post/{id}/remove/")
            .route(web::get().to(posts::post_remove_confirm))
            .route(web::post().to(posts::post_remove)),
    )
    .service(
        web::resource("/post/{id}/publish/")
            .route(web::get().to(posts::post_publish))
            .route(web::post().to(posts::post_publish)),
    )
    // Comments
    .service(
        web::resource("/post/{id}/comment/")
            .route(web::get().to(comments::comment_form))
            .route(web::post().to(comments::add_comment)),
    )
    .service(
        web::resource("/comment/{id}/approve/")
            .route(web::get().to(comments::comment_approve))
            .route(web::post().to(comments::comment_approve)),
    )
    .service(
        web::resource("/comment/{id}/remove/")
            .route(web::get().to(comments::comment_remove))
            .route(web::post().to(comments::comment_remove)),
    )
    // Sessions
    .service(
        web::resource("/login/")
            .route(web::get().to(auth::login_page))
            .route(web::post().to(auth::login)),
    )
    .route("/register/", web::post().to(auth::register))
    .service(
        web::resource("/logout/")
            .route(web::get().to(auth::logout))
            .route(web::post().to(auth::logout)),
    )
    .service(web::scope("/api").route("/health", web::get().to(health::health_check)));
}
