//! Collection service
//!
//! Numbered per-owner lists of restaurants that other users can follow.

use tracing::{info, instrument, warn};
use yealp_core::entities::CollectionSummary;
use yealp_core::value_objects::{CollectionId, EdgeAction, UserId};
use yealp_core::DomainError;

use crate::dto::{map_all, CollectionPage, CollectionResponse, CollectionsPage, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::social::SocialService;

/// Collection service
pub struct CollectionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CollectionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All collections of `owner_id`
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        owner_id: &UserId,
        viewer: Option<&UserId>,
    ) -> ServiceResult<CollectionsPage> {
        let owner = SocialService::new(self.ctx).load(owner_id).await?;
        let collections = self.ctx.collection_repo().find_by_owner(owner_id).await?;

        Ok(CollectionsPage {
            owner: UserResponse::from(&owner),
            is_owner: viewer == Some(owner_id),
            collections: map_all(&collections),
        })
    }

    /// Create the next numbered collection. Only the owner may.
    #[instrument(skip(self))]
    pub async fn create(
        &self,
        owner_id: &UserId,
        actor: &UserId,
    ) -> ServiceResult<CollectionResponse> {
        if owner_id != actor {
            warn!(owner_id = %owner_id, actor = %actor, "Create refused: not the owner");
            return Err(DomainError::NotCollectionOwner.into());
        }

        let collection = self.ctx.collection_repo().create(owner_id).await?;
        info!(owner_id = %owner_id, collection_id = %collection.id, "Collection created");

        let summary = self.load(owner_id, collection.id).await?;
        Ok(CollectionResponse::from(&summary))
    }

    /// One collection with its restaurants
    #[instrument(skip(self))]
    pub async fn detail(
        &self,
        owner_id: &UserId,
        collection_id: CollectionId,
        viewer: Option<&UserId>,
    ) -> ServiceResult<CollectionPage> {
        let summary = self.load(owner_id, collection_id).await?;
        let businesses = self
            .ctx
            .collection_repo()
            .find_businesses(owner_id, collection_id)
            .await?;

        let is_fan = match viewer {
            Some(fan) => {
                self.ctx
                    .follow_repo()
                    .is_following_collection(fan, owner_id, collection_id)
                    .await?
            }
            None => false,
        };

        Ok(CollectionPage {
            collection: CollectionResponse::from(&summary),
            restaurants: map_all(&businesses),
            is_fan,
            is_owner: viewer == Some(owner_id),
        })
    }

    /// Follow button on a collection page
    #[instrument(skip(self))]
    pub async fn follow(
        &self,
        owner_id: &UserId,
        collection_id: CollectionId,
        fan: &UserId,
        action: EdgeAction,
    ) -> ServiceResult<CollectionPage> {
        self.load(owner_id, collection_id).await?;

        let repo = self.ctx.follow_repo();
        let active = match action.desired_state() {
            Some(active) => {
                repo.set_collection(fan, owner_id, collection_id, active)
                    .await?;
                active
            }
            None => repo
                .toggle_collection(fan, owner_id, collection_id)
                .await?
                .is_active(),
        };

        info!(
            fan_id = %fan,
            owner_id = %owner_id,
            collection_id = %collection_id,
            active,
            "Collection follow updated"
        );
        self.detail(owner_id, collection_id, Some(fan)).await
    }

    async fn load(
        &self,
        owner_id: &UserId,
        collection_id: CollectionId,
    ) -> ServiceResult<CollectionSummary> {
        self.ctx
            .collection_repo()
            .find(owner_id, collection_id)
            .await?
            .ok_or_else(|| {
                ServiceError::from(DomainError::CollectionNotFound {
                    owner: owner_id.clone(),
                    id: collection_id,
                })
            })
    }
}
