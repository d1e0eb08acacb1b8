//! Business service
//!
//! Search, listings, the restaurant detail page and the buttons on it.

use std::collections::HashMap;

use tracing::{debug, info, instrument};
use yealp_core::entities::{Business, Review, ViewerVotes};
use yealp_core::value_objects::{
    BusinessFilter, BusinessId, EdgeAction, OrderRule, ReviewId, UserId, LISTING_LIMIT,
};
use yealp_core::DomainError;

use crate::dto::{
    map_all, BusinessResponse, ChoiceResponse, CollectionResponse, FilterResponse, Flash,
    ListingPage, RestaurantActionRequest, RestaurantPage, ReviewForViewer, ReviewResponse,
    SearchDefaults, SearchPage, SearchRequest, ShowTab, TipResponse,
};
use crate::forms::check;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

const NO_RESULTS: &str = "No results! Randomly pick 50 restaurants:";

/// Business service
pub struct BusinessService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BusinessService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Choices for the search form
    #[instrument(skip(self))]
    pub async fn search_page(&self) -> ServiceResult<SearchPage> {
        let states = self.ctx.business_repo().states().await?;

        Ok(SearchPage {
            defaults: SearchDefaults {
                state: states.first().cloned(),
                order_rule: OrderRule::default(),
                is_takeout: false,
                is_open: false,
            },
            states,
            order_rules: OrderRule::ALL
                .iter()
                .map(|rule| ChoiceResponse {
                    value: rule.as_str().to_string(),
                    label: rule.label().to_string(),
                })
                .collect(),
        })
    }

    /// Validate a search submission into the filter its listing is built from
    #[instrument(skip(self))]
    pub async fn search(&self, request: SearchRequest) -> ServiceResult<BusinessFilter> {
        check(&request)?;

        let states = self.ctx.business_repo().states().await?;
        if !states.contains(&request.state) {
            return Err(ServiceError::field("state", "Not a valid choice."));
        }

        Ok(BusinessFilter {
            state: request.state,
            takeout_only: request.is_takeout,
            open_only: request.is_open,
            order: request.order_rule,
        })
    }

    /// Unfiltered listing
    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<ListingPage> {
        let businesses = self.ctx.business_repo().list(LISTING_LIMIT).await?;
        Ok(ListingPage {
            filter: None,
            restaurants: map_all(&businesses),
            flash: None,
        })
    }

    /// Filtered listing; an empty result falls back to random picks
    #[instrument(skip(self))]
    pub async fn listing(&self, filter: &BusinessFilter) -> ServiceResult<ListingPage> {
        let mut businesses = self.ctx.business_repo().search(filter).await?;
        let mut flash = None;

        if businesses.is_empty() {
            debug!(state = %filter.state, "Empty search, picking random restaurants");
            businesses = self.ctx.business_repo().random(LISTING_LIMIT).await?;
            flash = Some(Flash::fail(NO_RESULTS));
        }

        Ok(ListingPage {
            filter: Some(FilterResponse::from(filter)),
            restaurants: map_all(&businesses),
            flash,
        })
    }

    /// Restaurant detail page as seen by `viewer`
    #[instrument(skip(self))]
    pub async fn restaurant_page(
        &self,
        business_id: &BusinessId,
        viewer: Option<&UserId>,
        show: ShowTab,
    ) -> ServiceResult<RestaurantPage> {
        let business = self.load(business_id).await?;

        let reviews = self.ctx.review_repo().find_detailed_by_business(business_id).await?;
        let tips = self.ctx.review_repo().find_tips_by_business(business_id).await?;
        let photos = self.ctx.photo_repo().find_by_business(business_id).await?;

        let mut votes: HashMap<ReviewId, ViewerVotes> = HashMap::new();
        let mut favorite = false;
        let mut collections = Vec::new();

        if let Some(viewer_id) = viewer {
            for (review_id, kind) in self
                .ctx
                .upvote_repo()
                .find_by_user_for_business(viewer_id, business_id)
                .await?
            {
                votes.entry(review_id).or_default().record(kind);
            }
            favorite = self.ctx.favorite_repo().is_favorite(viewer_id, business_id).await?;
            collections = self
                .ctx
                .collection_repo()
                .memberships(viewer_id, business_id)
                .await?;
        }

        Ok(RestaurantPage {
            business: BusinessResponse::from(&business),
            reviews: reviews
                .iter()
                .map(|r| ReviewResponse::from(for_viewer(r, &votes, viewer)))
                .collect(),
            tips: tips
                .iter()
                .map(|r| TipResponse::from(for_viewer(r, &votes, viewer)))
                .collect(),
            photos: map_all(&photos),
            favorite,
            collections: map_all(&collections),
            show,
        })
    }

    /// Favorite button and collection checkboxes, then the refreshed page
    #[instrument(skip(self, request))]
    pub async fn apply_actions(
        &self,
        business_id: &BusinessId,
        viewer: &UserId,
        request: RestaurantActionRequest,
        show: ShowTab,
    ) -> ServiceResult<RestaurantPage> {
        self.load(business_id).await?;

        if let Some(action) = request.favorite_action {
            let active = self.set_favorite(business_id, viewer, action).await?;
            info!(user_id = %viewer, business_id = %business_id, active, "Favorite updated");
        }

        if let Some(ids) = request.collections_update {
            self.ctx
                .collection_repo()
                .replace_memberships(viewer, business_id, &ids)
                .await?;
            info!(user_id = %viewer, business_id = %business_id, count = ids.len(), "Collections updated");
        }

        self.restaurant_page(business_id, Some(viewer), show).await
    }

    /// Create an empty collection from the restaurant page
    #[instrument(skip(self))]
    pub async fn new_collection(
        &self,
        business_id: &BusinessId,
        viewer: &UserId,
    ) -> ServiceResult<CollectionResponse> {
        self.load(business_id).await?;

        let collection = self.ctx.collection_repo().create(viewer).await?;
        info!(user_id = %viewer, collection_id = %collection.id, "Collection created");

        let summary = self
            .ctx
            .collection_repo()
            .find(viewer, collection.id)
            .await?
            .ok_or_else(|| ServiceError::internal("created collection vanished"))?;
        Ok(CollectionResponse::from(&summary))
    }

    async fn set_favorite(
        &self,
        business_id: &BusinessId,
        viewer: &UserId,
        action: EdgeAction,
    ) -> ServiceResult<bool> {
        let repo = self.ctx.favorite_repo();
        match action.desired_state() {
            Some(active) => {
                repo.set(viewer, business_id, active).await?;
                Ok(active)
            }
            None => Ok(repo.toggle(viewer, business_id).await?.is_active()),
        }
    }

    pub(crate) async fn load(&self, business_id: &BusinessId) -> ServiceResult<Business> {
        self.ctx
            .business_repo()
            .find_by_id(business_id)
            .await?
            .ok_or_else(|| DomainError::BusinessNotFound(business_id.clone()).into())
    }
}

fn for_viewer<'r>(
    review: &'r Review,
    votes: &HashMap<ReviewId, ViewerVotes>,
    viewer: Option<&'r UserId>,
) -> ReviewForViewer<'r> {
    ReviewForViewer {
        review,
        votes: votes.get(&review.id).copied().unwrap_or_default(),
        viewer,
    }
}
