//! Social service
//!
//! Profiles, following other users, followees and the favorites page.

use tracing::{info, instrument};
use yealp_core::entities::User;
use yealp_core::value_objects::{EdgeAction, UserId};
use yealp_core::DomainError;

use crate::dto::{map_all, FavoritesPage, FolloweesPage, ProfilePage, UserResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Social service
pub struct SocialService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SocialService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Profile page of `user_id` as seen by `viewer`
    #[instrument(skip(self))]
    pub async fn profile(
        &self,
        user_id: &UserId,
        viewer: Option<&UserId>,
    ) -> ServiceResult<ProfilePage> {
        let user = self.load(user_id).await?;

        let reviews = self.ctx.review_repo().find_by_author(user_id).await?;
        let collections = self.ctx.collection_repo().find_by_owner(user_id).await?;
        let n_fans = self.ctx.follow_repo().fan_count(user_id).await?;

        let is_fan = match viewer {
            Some(fan) if fan != user_id => {
                self.ctx.follow_repo().is_following_user(fan, user_id).await?
            }
            _ => false,
        };

        Ok(ProfilePage {
            user: UserResponse::from(&user),
            reviews: map_all(&reviews),
            collections: map_all(&collections),
            is_fan,
            is_self: viewer == Some(user_id),
            n_fans,
        })
    }

    /// Follow button on a profile
    #[instrument(skip(self))]
    pub async fn follow_user(
        &self,
        user_id: &UserId,
        fan: &UserId,
        action: EdgeAction,
    ) -> ServiceResult<ProfilePage> {
        if fan == user_id {
            return Err(DomainError::CannotFollowSelf.into());
        }
        self.load(user_id).await?;

        let repo = self.ctx.follow_repo();
        let active = match action.desired_state() {
            Some(active) => {
                repo.set_user(fan, user_id, active).await?;
                active
            }
            None => repo.toggle_user(fan, user_id).await?.is_active(),
        };

        info!(fan_id = %fan, followee_id = %user_id, active, "Follow updated");
        self.profile(user_id, Some(fan)).await
    }

    /// Users the viewer follows
    #[instrument(skip(self))]
    pub async fn followees(&self, fan: &UserId) -> ServiceResult<FolloweesPage> {
        let followees = self.ctx.follow_repo().find_followees(fan).await?;
        Ok(FolloweesPage {
            followees: map_all(&followees),
        })
    }

    /// Favorite restaurants and followed collections
    #[instrument(skip(self))]
    pub async fn favorites(&self, user_id: &UserId) -> ServiceResult<FavoritesPage> {
        let restaurants = self.ctx.favorite_repo().find_by_user(user_id).await?;
        let collections = self.ctx.follow_repo().find_followed_collections(user_id).await?;

        Ok(FavoritesPage {
            restaurants: map_all(&restaurants),
            collections: map_all(&collections),
        })
    }

    pub(crate) async fn load(&self, user_id: &UserId) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id.clone()).into())
    }
}
