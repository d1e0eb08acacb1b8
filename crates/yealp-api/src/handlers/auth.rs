//! Authentication handlers
//!
//! Registration, login, logout and the password reset flow. A visitor who is
//! already logged in is sent to the home page instead.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;
use yealp_service::dto::{LoginRequest, RegisterRequest, RequestResetRequest, ResetPasswordRequest};
use yealp_service::AuthService;

use crate::extractors::{
    ApiPath, ApiQuery, JsonBody, NextQuery, OptionalAuthUser, ResetTokenPath,
};
use crate::response::{Accepted, ApiResult, Created, NoContent};
use crate::state::AppState;

const HOME: &str = "/home";

/// Fields of an authentication form
#[derive(Debug, Serialize)]
pub struct FormPage {
    pub title: &'static str,
    pub fields: &'static [&'static str],
}

fn form_page(title: &'static str, fields: &'static [&'static str]) -> Response {
    Json(FormPage { title, fields }).into_response()
}

/// GET /register
pub async fn register_page(viewer: OptionalAuthUser) -> Response {
    if viewer.is_logged_in() {
        return Redirect::to(HOME).into_response();
    }
    form_page("Register", &["username", "email", "password", "confirm_password"])
}

/// Register a new user
///
/// POST /register
pub async fn register(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> ApiResult<Response> {
    if viewer.is_logged_in() {
        return Ok(Redirect::to(HOME).into_response());
    }
    let response = AuthService::new(state.service_context()).register(request).await?;
    Ok(Created(Json(response)).into_response())
}

/// GET /login
pub async fn login_page(viewer: OptionalAuthUser) -> Response {
    if viewer.is_logged_in() {
        return Redirect::to(HOME).into_response();
    }
    form_page("Log In", &["email", "password", "remember"])
}

/// Login with email and password
///
/// POST /login?next=/account
pub async fn login(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    ApiQuery(query): ApiQuery<NextQuery>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> ApiResult<Response> {
    if viewer.is_logged_in() {
        return Ok(Redirect::to(HOME).into_response());
    }
    let response = AuthService::new(state.service_context())
        .login(request, query.next.as_deref())
        .await?;
    Ok(Json(response).into_response())
}

/// Close the current session
///
/// GET|POST /logout
pub async fn logout(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
) -> ApiResult<NoContent> {
    if let Some(user) = viewer.0 {
        AuthService::new(state.service_context())
            .logout(user.identity())
            .await?;
    }
    Ok(NoContent)
}

/// GET /reset_password
pub async fn reset_request_page(viewer: OptionalAuthUser) -> Response {
    if viewer.is_logged_in() {
        return Redirect::to(HOME).into_response();
    }
    form_page("Reset Password", &["email"])
}

/// Mail a reset link
///
/// POST /reset_password
pub async fn request_reset(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    JsonBody(request): JsonBody<RequestResetRequest>,
) -> ApiResult<Response> {
    if viewer.is_logged_in() {
        return Ok(Redirect::to(HOME).into_response());
    }
    let response = AuthService::new(state.service_context())
        .request_reset(request)
        .await?;
    Ok(Accepted(Json(response)).into_response())
}

/// Check the token of a reset link
///
/// GET /reset_password/:token
pub async fn reset_token_page(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    ApiPath(path): ApiPath<ResetTokenPath>,
) -> ApiResult<Response> {
    if viewer.is_logged_in() {
        return Ok(Redirect::to(HOME).into_response());
    }
    let response = AuthService::new(state.service_context())
        .verify_reset_token(&path.token)
        .await?;
    Ok(Json(response).into_response())
}

/// Store a new password
///
/// POST /reset_password/:token
pub async fn reset_password(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    ApiPath(path): ApiPath<ResetTokenPath>,
    JsonBody(request): JsonBody<ResetPasswordRequest>,
) -> ApiResult<Response> {
    if viewer.is_logged_in() {
        return Ok(Redirect::to(HOME).into_response());
    }
    let response = AuthService::new(state.service_context())
        .reset_password(&path.token, request)
        .await?;
    Ok(Json(response).into_response())
}
