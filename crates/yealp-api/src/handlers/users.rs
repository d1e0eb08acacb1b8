//! Profile, followee and favorites handlers

use axum::{extract::State, Json};
use yealp_service::dto::{FavoritesPage, FollowUserRequest, FolloweesPage, ProfilePage};
use yealp_service::SocialService;

use crate::extractors::{ApiPath, AuthUser, JsonBody, OptionalAuthUser, UserPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /user/:user_id
pub async fn profile(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    ApiPath(path): ApiPath<UserPath>,
) -> ApiResult<Json<ProfilePage>> {
    let page = SocialService::new(state.service_context())
        .profile(&path.user_id()?, viewer.user_id())
        .await?;
    Ok(Json(page))
}

/// Follow button on a profile
///
/// POST /user/:user_id
pub async fn follow_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<UserPath>,
    JsonBody(request): JsonBody<FollowUserRequest>,
) -> ApiResult<Json<ProfilePage>> {
    let page = SocialService::new(state.service_context())
        .follow_user(&path.user_id()?, auth.user_id(), request.follow_action)
        .await?;
    Ok(Json(page))
}

/// GET /user/followees
pub async fn followees(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<FolloweesPage>> {
    let page = SocialService::new(state.service_context())
        .followees(auth.user_id())
        .await?;
    Ok(Json(page))
}

/// GET /favorites
pub async fn favorites(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<FavoritesPage>> {
    let page = SocialService::new(state.service_context())
        .favorites(auth.user_id())
        .await?;
    Ok(Json(page))
}
