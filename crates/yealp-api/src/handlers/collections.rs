//! Collection handlers

use axum::{extract::State, Json};
use yealp_service::dto::{
    CollectionPage, CollectionResponse, CollectionsPage, FollowCollectionRequest,
};
use yealp_service::CollectionService;

use crate::extractors::{
    ApiPath, AuthUser, CollectionPath, JsonBody, OptionalAuthUser, UserPath,
};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// GET /user/:user_id/collections
pub async fn list_collections(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    ApiPath(path): ApiPath<UserPath>,
) -> ApiResult<Json<CollectionsPage>> {
    let page = CollectionService::new(state.service_context())
        .list(&path.user_id()?, viewer.user_id())
        .await?;
    Ok(Json(page))
}

/// Create the owner's next numbered collection
///
/// POST /user/:user_id/collections
pub async fn create_collection(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<UserPath>,
) -> ApiResult<Created<Json<CollectionResponse>>> {
    let collection = CollectionService::new(state.service_context())
        .create(&path.user_id()?, auth.user_id())
        .await?;
    Ok(Created(Json(collection)))
}

/// GET /user/:user_id/collection/:collection_id
pub async fn collection_page(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    ApiPath(path): ApiPath<CollectionPath>,
) -> ApiResult<Json<CollectionPage>> {
    let page = CollectionService::new(state.service_context())
        .detail(&path.user_id()?, path.collection_id()?, viewer.user_id())
        .await?;
    Ok(Json(page))
}

/// Follow button on a collection
///
/// POST /user/:user_id/collection/:collection_id
pub async fn follow_collection(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<CollectionPath>,
    JsonBody(request): JsonBody<FollowCollectionRequest>,
) -> ApiResult<Json<CollectionPage>> {
    let page = CollectionService::new(state.service_context())
        .follow(
            &path.user_id()?,
            path.collection_id()?,
            auth.user_id(),
            request.follow_button,
        )
        .await?;
    Ok(Json(page))
}
