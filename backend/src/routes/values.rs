//! Values routes
//!
//! Anonymous pass-through reads over the values table.

use crate::error::ApiResult;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use dating_api_shared::types::ValueResponse;

pub fn value_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_values))
        .route("/:id", get(get_value))
}

/// GET /api/values
async fn list_values(State(state): State<AppState>) -> ApiResult<Json<Vec<ValueResponse>>> {
    let values = state.values().list().await?;
    Ok(Json(values.into_iter().map(Into::into).collect()))
}

/// GET /api/values/:id
///
/// A missing id yields `200` with a JSON `null` body.
async fn get_value(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Option<ValueResponse>>> {
    let value = state.values().find(id).await?;
    Ok(Json(value.map(Into::into)))
}
