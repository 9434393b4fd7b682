use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::error::AppError;
use crate::AppState;

/// Cookie carrying the session token.
pub const AUTH_COOKIE_NAME: &str = "auth_token";

const AUTH_COOKIE_MAX_AGE_HOURS: i64 = 24;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: Uuid,
    pub message: String,
}

// HTTP-only keeps the token away from scripts; SameSite=None + Secure lets
// the separately-hosted frontend send it cross-site over TLS.
fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build(AUTH_COOKIE_NAME, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::None)
        .secure(true)
        .max_age(CookieDuration::hours(AUTH_COOKIE_MAX_AGE_HOURS))
        .finish()
}

pub async fn register(
    req: web::Json<RegisterRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received registration request for email: {}", req.email);
    match state
        .auth_service
        .register(&req.email, &req.first_name, &req.last_name, &req.password)
        .await
    {
        Ok(session) => {
            info!("Registration successful for email: {}", req.email);
            Ok(HttpResponse::Ok()
                .cookie(session_cookie(session.token))
                .json(json!({ "message": "User created successfully" })))
        }
        Err(e) => {
            error!("Registration failed for email: {}: {}", req.email, e);
            Err(e)
        }
    }
}

pub async fn login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received login request for email: {}", req.email);
    match state.auth_service.login(&req.email, &req.password).await {
        Ok(session) => {
            info!("Login successful for email: {}", req.email);
            Ok(HttpResponse::Ok()
                .cookie(session_cookie(session.token))
                .json(LoginResponse {
                    user_id: session.user_id,
                    message: "Login Successful".to_string(),
                }))
        }
        Err(e) => {
            error!("Login failed for email: {}: {}", req.email, e);
            Err(e)
        }
    }
}

pub async fn validate_token(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let cookie = req
        .cookie(AUTH_COOKIE_NAME)
        .ok_or_else(|| AppError::Unauthorized("No session cookie provided".into()))?;

    let user_id = state.auth_service.validate_session(cookie.value())?;

    Ok(HttpResponse::Ok().json(json!({ "userId": user_id })))
}

pub async fn logout() -> HttpResponse {
    // Tokens are stateless, so there is nothing to revoke server-side;
    // logging out means telling the client to drop the cookie.
    let mut cookie = session_cookie(String::new());
    cookie.make_removal();

    HttpResponse::Ok()
        .cookie(cookie)
        .json(json!({ "message": "Logout Successful" }))
}
