// handlers/public/login.rs - POST /admin/login handler

use axum::extract::{rejection::JsonRejection, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::auth::{generate_jwt, verify_admin, Claims};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    /// Seconds until the token expires.
    pub expires_in: u64,
}

/**
 * POST /admin/login - exchange admin credentials for a bearer token
 *
 * Input:  { "username": "admin", "password": "..." }
 * Output: { "success": true, "data": { "token": "eyJ...", "username": "admin", "expiresIn": 604800 } }
 */
pub async fn login_post(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let Json(req) = payload?;
    let security = &state.config.security;

    if !verify_admin(security, &req.username, &req.password) {
        tracing::warn!(username = %req.username, "Failed admin login");
        return Err(ApiError::unauthorized("Invalid username or password"));
    }

    let claims = Claims::admin(req.username.clone(), security.jwt_expiry_hours);
    let token = generate_jwt(&claims, &security.jwt_secret).map_err(|e| {
        tracing::error!("Token generation failed: {}", e);
        ApiError::internal_server_error("Could not issue token")
    })?;

    tracing::info!(username = %req.username, "Admin logged in");
    Ok(ApiResponse::success(LoginResponse {
        token,
        username: req.username,
        expires_in: security.jwt_expiry_hours * 3600,
    }))
}
