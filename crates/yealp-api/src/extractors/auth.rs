//! Authentication extractor
//!
//! Resolves the bearer token of the Authorization header to a live session.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use yealp_core::value_objects::UserId;
use yealp_service::{AuthService, Identity};

use crate::response::ApiError;
use crate::state::AppState;

/// Logged-in user behind the request
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl AuthUser {
    pub fn user_id(&self) -> &UserId {
        &self.0.user_id
    }

    pub fn identity(&self) -> &Identity {
        &self.0
    }
}

async fn authenticate(state: &AppState, bearer: &Bearer) -> Result<AuthUser, ApiError> {
    AuthService::new(state.service_context())
        .authenticate(bearer.token())
        .await
        .map(AuthUser)
        .map_err(|e| {
            tracing::warn!(error = %e, "Rejected access token");
            ApiError::from(e)
        })
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        authenticate(&AppState::from_ref(state), &bearer).await
    }
}

/// Optional authenticated user
///
/// None when no Authorization header is present. A header carrying a bad
/// or revoked token is still rejected.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalAuthUser {
    pub fn user_id(&self) -> Option<&UserId> {
        self.0.as_ref().map(AuthUser::user_id)
    }

    pub fn is_logged_in(&self) -> bool {
        self.0.is_some()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await {
            Ok(TypedHeader(Authorization(bearer))) => {
                let user = authenticate(&AppState::from_ref(state), &bearer).await?;
                Ok(OptionalAuthUser(Some(user)))
            }
            Err(_) => Ok(OptionalAuthUser(None)),
        }
    }
}
