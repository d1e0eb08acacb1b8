//! Business photo handlers

use axum::{extract::State, Json};
use yealp_service::dto::{PhotoFormPage, UploadResponse};
use yealp_service::PhotoService;

use crate::extractors::{ApiPath, AuthUser, BusinessPath, PictureUpload};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// GET /restaurant/:business_id/create_biz_photo
pub async fn photo_form(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiPath(path): ApiPath<BusinessPath>,
) -> ApiResult<Json<PhotoFormPage>> {
    let page = PhotoService::new(state.service_context())
        .form_page(&path.business_id()?)
        .await?;
    Ok(Json(page))
}

/// Upload a jpg of the business (multipart field `picture`)
///
/// POST /restaurant/:business_id/create_biz_photo
pub async fn upload_photo(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<BusinessPath>,
    PictureUpload(file): PictureUpload,
) -> ApiResult<Created<Json<UploadResponse>>> {
    let uploaded = PhotoService::new(state.service_context())
        .upload(&path.business_id()?, auth.user_id(), file)
        .await?;
    Ok(Created(Json(uploaded)))
}
