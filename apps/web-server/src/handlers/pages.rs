//! Static pages and the fallback for unknown routes.

use actix_web::{HttpRequest, HttpResponse};

use inkwell_shared::dto::AboutResponse;

use crate::middleware::error::{AppError, AppResult};

/// GET /about/
pub async fn about() -> HttpResponse {
    HttpResponse::Ok().json(AboutResponse {
        name: "Inkwell".to_string(),
        description: "A small blog: draft posts, publish them, and moderate reader comments."
            .to_string(),
    })
}

/// Any unmatched route.
pub async fn not_found(req: HttpRequest) -> AppResult<HttpResponse> {
    Err(AppError::NotFound(format!("No page at {}", req.path())))
}
