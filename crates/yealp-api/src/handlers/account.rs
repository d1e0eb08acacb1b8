//! Account handlers
//!
//! The logged-in user's own name, email and avatar.

use axum::{extract::State, Json};
use yealp_service::dto::{AccountPage, UpdateAccountRequest, UploadResponse};
use yealp_service::{AccountService, ServiceError};

use crate::extractors::{AuthUser, JsonBody, PictureUpload};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /account
pub async fn account_page(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<AccountPage>> {
    let page = AccountService::new(state.service_context())
        .page(auth.user_id())
        .await?;
    Ok(Json(page))
}

/// POST /account
pub async fn update_account(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(request): JsonBody<UpdateAccountRequest>,
) -> ApiResult<Json<AccountPage>> {
    let page = AccountService::new(state.service_context())
        .update(auth.user_id(), request)
        .await?;
    Ok(Json(page))
}

/// Replace the avatar (multipart field `picture`, jpg or png)
///
/// POST /account/picture
pub async fn upload_picture(
    State(state): State<AppState>,
    auth: AuthUser,
    PictureUpload(file): PictureUpload,
) -> ApiResult<Json<UploadResponse>> {
    let file = file.ok_or_else(|| ServiceError::field("picture", "Please upload a picture!"))?;
    let uploaded = AccountService::new(state.service_context())
        .upload_picture(auth.user_id(), &file.file_name, &file.bytes)
        .await?;
    Ok(Json(uploaded))
}
