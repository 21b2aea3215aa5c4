//! Authentication routes
//!
//! Provides endpoints for user registration and login.

use crate::error::{ApiError, ApiResult};
use crate::services::{AuthError, AuthService};
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use dating_api_shared::types::{LoginRequest, LoginResponse, RegisterRequest, UserDetail};
use tracing::info;
use validator::Validate;

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new user
///
/// POST /api/auth/register
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    req.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    if AuthService::user_exists(state.users(), &req.username).await? {
        return Err(AuthError::UsernameTaken.into());
    }

    let user = AuthService::register(state.users(), &req.username, &req.password).await?;
    info!(user_id = user.id, "User registered");

    let location = format!("/api/users/{}", user.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(UserDetail::from(user)),
    ))
}

/// Login with username and password
///
/// POST /api/auth/login
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user = AuthService::login(state.users(), &req.username, &req.password).await?;
    let token = state.jwt().issue_token(&user)?;

    Ok(Json(LoginResponse {
        token,
        user: (&user).into(),
    }))
}
