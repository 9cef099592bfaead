use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::auth::{AuthError, AuthRouterExt, AuthService, AuthUser, LoginCredentials, TokenResponse};
use crate::ApiResponse;

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    summary = "Log in",
    description = "Verify credentials, look up the account profile, and issue a bearer token. Accounts without a profile record are refused.",
    request_body = LoginCredentials,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Account has no profile record"),
    )
)]
pub async fn login(
    State(auth_service): State<Arc<AuthService>>,
    Json(credentials): Json<LoginCredentials>,
) -> Result<Json<TokenResponse>, AuthError> {
    let token = auth_service.login(&credentials).await?;
    Ok(Json(token))
}

/// Revoke the presented bearer token
#[utoipa::path(
    post,
    path = "/auth/logout",
    summary = "Log out",
    responses(
        (status = 200, description = "Token revoked"),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("Bearer" = []))
)]
pub async fn logout(
    State(auth_service): State<Arc<AuthService>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AuthError> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        if let Ok(auth_value) = auth_header.to_str() {
            if auth_value.starts_with("Bearer ") {
                let token = auth_value.trim_start_matches("Bearer ").trim();
                auth_service.revoke_token(token).await?;
                return Ok(Json(json!({ "message": "Successfully logged out" })));
            }
        }
    }

    Err(AuthError::MissingAuth)
}

/// Who am I
#[utoipa::path(
    get,
    path = "/auth/me",
    summary = "Current user",
    responses(
        (status = 200, description = "Authenticated user", body = ApiResponse<AuthUser>),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("Bearer" = []))
)]
pub async fn me(auth_user: AuthUser) -> Json<ApiResponse<AuthUser>> {
    Json(ApiResponse::success(auth_user))
}

pub fn auth_routes() -> Router<Arc<AuthService>> {
    let protected = Router::new()
        .route("/logout", post(logout))
        .route("/me", get(me))
        .with_auth();

    Router::new().route("/login", post(login)).merge(protected)
}
