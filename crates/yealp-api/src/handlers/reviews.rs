//! Review and tip handlers

use axum::{extract::State, Json};
use yealp_core::entities::ReviewKind;
use yealp_service::dto::{
    CreateReviewRequest, CreateTipRequest, CreatedEntryResponse, EntryFormPage, ToggleResponse,
};
use yealp_service::ReviewService;

use crate::extractors::{ApiPath, AuthUser, BusinessPath, JsonBody, ReviewPath, UpvotePath};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /restaurant/:business_id/review/new
pub async fn review_form(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiPath(path): ApiPath<BusinessPath>,
) -> ApiResult<Json<EntryFormPage>> {
    let page = ReviewService::new(state.service_context())
        .form_page(&path.business_id()?, ReviewKind::Detailed)
        .await?;
    Ok(Json(page))
}

/// Post a detailed review
///
/// POST /restaurant/:business_id/review/new
pub async fn create_review(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<BusinessPath>,
    JsonBody(request): JsonBody<CreateReviewRequest>,
) -> ApiResult<Created<Json<CreatedEntryResponse>>> {
    let created = ReviewService::new(state.service_context())
        .create_review(&path.business_id()?, auth.user_id(), request)
        .await?;
    Ok(Created(Json(created)))
}

/// GET /restaurant/:business_id/tip/new
pub async fn tip_form(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiPath(path): ApiPath<BusinessPath>,
) -> ApiResult<Json<EntryFormPage>> {
    let page = ReviewService::new(state.service_context())
        .form_page(&path.business_id()?, ReviewKind::Tip)
        .await?;
    Ok(Json(page))
}

/// Post a tip
///
/// POST /restaurant/:business_id/tip/new
pub async fn create_tip(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<BusinessPath>,
    JsonBody(request): JsonBody<CreateTipRequest>,
) -> ApiResult<Created<Json<CreatedEntryResponse>>> {
    let created = ReviewService::new(state.service_context())
        .create_tip(&path.business_id()?, auth.user_id(), request)
        .await?;
    Ok(Created(Json(created)))
}

/// Delete one's own review or tip
///
/// POST /restaurant/:business_id/review/:review_id/delete
pub async fn delete_review(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<ReviewPath>,
) -> ApiResult<NoContent> {
    ReviewService::new(state.service_context())
        .delete(&path.business_id()?, path.review_id()?, auth.user_id())
        .await?;
    Ok(NoContent)
}

/// Toggle a useful/funny/cool vote on a review or a like on a tip
///
/// POST /restaurant/:business_id/review/:review_id/upvote/:upvote_type
pub async fn upvote(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<UpvotePath>,
) -> ApiResult<Json<ToggleResponse>> {
    let kind = path.upvote_type()?;
    let (business_id, review_id) = path.review()?;
    let toggled = ReviewService::new(state.service_context())
        .upvote(&business_id, review_id, kind, auth.user_id())
        .await?;
    Ok(Json(toggled))
}
