//! Session handlers: login, registration and logout.

use actix_web::cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use actix_web::{HttpResponse, HttpResponseBuilder, http::header, web};
use serde::Deserialize;

use inkwell_core::domain::User;
use inkwell_core::forms::RegistrationForm;
use inkwell_core::ports::roles_for;
use inkwell_shared::dto::{AuthResponse, LoginPage, LoginRequest};

use crate::middleware::auth::{LOGIN_PATH, SESSION_COOKIE};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

/// Only local absolute paths are followed after login.
pub fn safe_next(next: Option<&str>) -> String {
    match next.map(str::trim) {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path.to_string()
        }
        _ => "/".to_string(),
    }
}

/// GET /login/
pub async fn login_page(query: web::Query<NextQuery>) -> HttpResponse {
    HttpResponse::Ok().json(LoginPage {
        action: LOGIN_PATH.to_string(),
        next: safe_next(query.next.as_deref()),
    })
}

/// POST /login/
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .accounts
        .authenticate(&req.username, &req.password)
        .await
        .inspect_err(|_| tracing::info!(username = %req.username, "Login failed"))?;

    tracing::info!(user_id = %user.id, "Logged in");
    start_session(
        &state,
        &user,
        HttpResponse::Ok(),
        safe_next(req.next.as_deref()),
    )
}

/// POST /register/
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegistrationForm>,
) -> AppResult<HttpResponse> {
    let user = state.accounts.register(body.into_inner()).await?;

    tracing::info!(user_id = %user.id, username = %user.username, "Account created");
    start_session(&state, &user, HttpResponse::Created(), "/".to_string())
}

/// GET|POST /logout/
pub async fn logout() -> HttpResponse {
    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();

    HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .cookie(cookie)
        .finish()
}

/// Issue a token and hand it out both as a cookie and in the body.
fn start_session(
    state: &AppState,
    user: &User,
    mut response: HttpResponseBuilder,
    next: String,
) -> AppResult<HttpResponse> {
    let token = state
        .tokens
        .generate_token(user.id, &user.username, roles_for(user))
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let expires_in = state.tokens.expiration_seconds();

    let cookie = Cookie::build(SESSION_COOKIE, token.clone())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(expires_in))
        .finish();

    Ok(response.cookie(cookie).json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: expires_in.max(0) as u64,
        username: user.username.clone(),
        next,
    }))
}
