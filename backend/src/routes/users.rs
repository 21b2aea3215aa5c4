//! User routes (authenticated)

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::services::AuthService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use dating_api_shared::types::UserDetail;
use tracing::debug;

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/:id", get(get_user))
}

/// Get a user by id
///
/// GET /api/users/:id
///
/// Requires valid Bearer token in Authorization header.
async fn get_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<UserDetail>> {
    debug!(
        caller_id = auth_user.user_id,
        caller = %auth_user.username,
        user_id = id,
        "Fetching user"
    );

    let user = AuthService::find_user(state.users(), id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}
