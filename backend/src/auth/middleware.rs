//! Authentication extractor
//!
//! Validates the Bearer token on protected routes using the keys held in
//! AppState.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::debug;

/// Authenticated user extracted from JWT
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i32,
    pub username: String,
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|header| header.strip_prefix("Bearer "))
            .ok_or_else(|| {
                debug!("Missing or malformed authorization header");
                ApiError::Unauthorized
            })?;

        let claims = app_state.jwt().validate_token(token).map_err(|e| {
            debug!("Token rejected: {}", e);
            ApiError::Unauthorized
        })?;

        let user_id = claims.nameid.parse::<i32>().map_err(|_| {
            debug!("Token carries a non-numeric subject id");
            ApiError::Unauthorized
        })?;

        Ok(AuthUser {
            user_id,
            username: claims.unique_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Claims, JwtKeys, JwtService};
    use crate::repositories::InMemoryStore;
    use crate::services::User;
    use axum::{extract::FromRequestParts, http::Request};
    use jsonwebtoken::{encode, Algorithm, Header};
    use std::sync::Arc;

    const SECRET: &str = "extractor-test-secret";

    fn state() -> AppState {
        let store = Arc::new(InMemoryStore::new());
        AppState::new(store.clone(), store, JwtService::new(SECRET).unwrap())
    }

    async fn extract(state: &AppState, authorization: &str) -> Result<AuthUser, ApiError> {
        let request = Request::builder()
            .header(AUTHORIZATION, authorization)
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();
        AuthUser::from_request_parts(&mut parts, state).await
    }

    #[tokio::test]
    async fn test_extracts_identity_from_token() {
        let state = state();
        let user = User {
            id: 42,
            username: "carol".to_string(),
            created_at: chrono::Utc::now(),
            last_active: chrono::Utc::now(),
        };
        let token = state.jwt().issue_token(&user).unwrap();

        let auth_user = extract(&state, &format!("Bearer {}", token)).await.unwrap();

        assert_eq!(auth_user.user_id, 42);
        assert_eq!(auth_user.username, "carol");
    }

    #[tokio::test]
    async fn test_non_numeric_subject_rejected() {
        let state = state();
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            nameid: "not-a-number".to_string(),
            unique_name: "carol".to_string(),
            nbf: now,
            exp: now + 3600,
            iat: now,
        };
        let keys = JwtKeys::new(SECRET).unwrap();
        let token = encode(&Header::new(Algorithm::HS512), &claims, keys.encoding()).unwrap();

        let result = extract(&state, &format!("Bearer {}", token)).await;

        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_non_bearer_scheme_rejected() {
        let result = extract(&state(), "Basic Y2Fyb2w6cHc=").await;
        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }
}
