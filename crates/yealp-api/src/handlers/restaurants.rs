//! Search, listing and restaurant page handlers

use axum::{
    extract::State,
    response::Redirect,
    Json,
};
use yealp_service::dto::{
    CollectionResponse, ListingPage, RestaurantActionRequest, RestaurantPage, SearchPage,
    SearchRequest,
};
use yealp_service::BusinessService;

use crate::extractors::{
    ApiPath, ApiQuery, AuthUser, BusinessPath, JsonBody, ListingPath, OptionalAuthUser,
    OptionalJsonBody, ShowQuery,
};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Search form choices
///
/// GET /, /home
pub async fn search_page(State(state): State<AppState>) -> ApiResult<Json<SearchPage>> {
    let page = BusinessService::new(state.service_context())
        .search_page()
        .await?;
    Ok(Json(page))
}

/// Submit the search form; answers 303 to the filtered listing
///
/// POST /, /home, /restaurants and the listing paths
pub async fn search(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<SearchRequest>,
) -> ApiResult<Redirect> {
    let filter = BusinessService::new(state.service_context())
        .search(request)
        .await?;
    Ok(Redirect::to(&filter.listing_path()))
}

/// Unfiltered listing
///
/// GET /restaurants
pub async fn list_restaurants(State(state): State<AppState>) -> ApiResult<Json<ListingPage>> {
    let page = BusinessService::new(state.service_context()).list().await?;
    Ok(Json(page))
}

/// Filtered, sorted listing
///
/// GET /restaurants/:state/is_takeout:<bool>/is_open:<bool>/order_by:<rule>
pub async fn filtered_listing(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<ListingPath>,
) -> ApiResult<Json<ListingPage>> {
    let filter = path.filter()?;
    let page = BusinessService::new(state.service_context())
        .listing(&filter)
        .await?;
    Ok(Json(page))
}

/// Search form posted from a listing page. The segments must still be valid.
pub async fn search_from_listing(
    state: State<AppState>,
    ApiPath(path): ApiPath<ListingPath>,
    body: JsonBody<SearchRequest>,
) -> ApiResult<Redirect> {
    path.filter()?;
    search(state, body).await
}

/// Restaurant detail page
///
/// GET /restaurant/:business_id?show=review|tip
pub async fn restaurant_page(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    ApiPath(path): ApiPath<BusinessPath>,
    ApiQuery(query): ApiQuery<ShowQuery>,
) -> ApiResult<Json<RestaurantPage>> {
    let business_id = path.business_id()?;
    let page = BusinessService::new(state.service_context())
        .restaurant_page(&business_id, viewer.user_id(), query.show)
        .await?;
    Ok(Json(page))
}

/// Favorite button and collection checkboxes
///
/// POST /restaurant/:business_id
pub async fn restaurant_actions(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<BusinessPath>,
    ApiQuery(query): ApiQuery<ShowQuery>,
    OptionalJsonBody(request): OptionalJsonBody<RestaurantActionRequest>,
) -> ApiResult<Json<RestaurantPage>> {
    let business_id = path.business_id()?;
    let page = BusinessService::new(state.service_context())
        .apply_actions(
            &business_id,
            auth.user_id(),
            request.unwrap_or_default(),
            query.show,
        )
        .await?;
    Ok(Json(page))
}

/// New empty collection for the viewer, from the restaurant page
///
/// POST /restaurant/:business_id/new_collection
pub async fn new_collection(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<BusinessPath>,
) -> ApiResult<Created<Json<CollectionResponse>>> {
    let business_id = path.business_id()?;
    let collection = BusinessService::new(state.service_context())
        .new_collection(&business_id, auth.user_id())
        .await?;
    Ok(Created(Json(collection)))
}
