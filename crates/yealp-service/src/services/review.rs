//! Review service
//!
//! Detailed reviews, short tips, deletion by the author and upvotes.

use tracing::{info, instrument, warn};
use yealp_core::entities::{NewReview, Review, ReviewContent, ReviewKind};
use yealp_core::value_objects::{BusinessId, ReviewId, StarRating, UpvoteType, UserId};
use yealp_core::DomainError;

use crate::dto::{
    BusinessResponse, CreateReviewRequest, CreateTipRequest, CreatedEntryResponse,
    EntryFormPage, Flash, ToggleResponse,
};
use crate::forms::check;

use super::business::BusinessService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Review service
pub struct ReviewService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReviewService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Blank review or tip form for a business
    #[instrument(skip(self))]
    pub async fn form_page(
        &self,
        business_id: &BusinessId,
        kind: ReviewKind,
    ) -> ServiceResult<EntryFormPage> {
        let business = BusinessService::new(self.ctx).load(business_id).await?;

        let (legend, star_choices) = match kind {
            ReviewKind::Detailed => (
                "Write a Review",
                StarRating::choices().map(StarRating::value).collect(),
            ),
            ReviewKind::Tip => ("Write a Tip", Vec::new()),
        };

        Ok(EntryFormPage {
            legend: legend.to_string(),
            business: BusinessResponse::from(&business),
            star_choices,
        })
    }

    /// Post a detailed review
    #[instrument(skip(self, request))]
    pub async fn create_review(
        &self,
        business_id: &BusinessId,
        author: &UserId,
        request: CreateReviewRequest,
    ) -> ServiceResult<CreatedEntryResponse> {
        check(&request)?;
        let stars = StarRating::from_f64(request.star)
            .map_err(|_| ServiceError::field("star", "Not a valid choice."))?;

        let content = ReviewContent::Detailed {
            text: request.content,
            stars,
        };
        let review = self.create(business_id, author, content).await?;

        Ok(CreatedEntryResponse {
            review_id: review.id.into_inner(),
            business_id: review.business_id.to_string(),
            flash: Flash::success("Your review has been created!"),
        })
    }

    /// Post a short tip
    #[instrument(skip(self, request))]
    pub async fn create_tip(
        &self,
        business_id: &BusinessId,
        author: &UserId,
        request: CreateTipRequest,
    ) -> ServiceResult<CreatedEntryResponse> {
        check(&request)?;

        let content = ReviewContent::Tip {
            text: request.content,
        };
        let review = self.create(business_id, author, content).await?;

        Ok(CreatedEntryResponse {
            review_id: review.id.into_inner(),
            business_id: review.business_id.to_string(),
            flash: Flash::success("Your tip has been created!"),
        })
    }

    /// Delete a review or tip. Only its author may.
    #[instrument(skip(self))]
    pub async fn delete(
        &self,
        business_id: &BusinessId,
        review_id: ReviewId,
        actor: &UserId,
    ) -> ServiceResult<Flash> {
        let review = self.load(business_id, review_id).await?;

        if !review.is_authored_by(actor) {
            warn!(user_id = %actor, review_id = %review_id, "Delete refused: not the author");
            return Err(DomainError::NotReviewAuthor.into());
        }

        if !self.ctx.review_repo().delete(review_id).await? {
            return Err(DomainError::ReviewNotFound(review_id).into());
        }

        info!(user_id = %actor, review_id = %review_id, "Review deleted");
        Ok(Flash::danger("Your review has been deleted!"))
    }

    /// Flip the voter's `kind` vote and report the new counter
    #[instrument(skip(self))]
    pub async fn upvote(
        &self,
        business_id: &BusinessId,
        review_id: ReviewId,
        kind: UpvoteType,
        voter: &UserId,
    ) -> ServiceResult<ToggleResponse> {
        let review = self.load(business_id, review_id).await?;

        if !kind.applies_to(review.kind()) {
            return Err(DomainError::UpvoteNotApplicable {
                vote: kind.as_str(),
            }
            .into());
        }

        let state = self
            .ctx
            .upvote_repo()
            .toggle(voter, review_id, kind)
            .await?;

        let count = self
            .ctx
            .review_repo()
            .find_by_id(review_id)
            .await?
            .map_or(0, |r| r.votes.get(kind));

        info!(user_id = %voter, review_id = %review_id, vote = %kind, ?state, "Upvote toggled");
        Ok(ToggleResponse {
            state,
            count: i64::from(count),
        })
    }

    async fn create(
        &self,
        business_id: &BusinessId,
        author: &UserId,
        content: ReviewContent,
    ) -> ServiceResult<Review> {
        BusinessService::new(self.ctx).load(business_id).await?;

        let new_review = NewReview::new(business_id.clone(), author.clone(), content);
        let review = self.ctx.review_repo().create(&new_review).await?;

        info!(
            user_id = %author,
            business_id = %business_id,
            review_id = %review.id,
            kind = ?review.kind(),
            "Review created"
        );
        Ok(review)
    }

    /// A review, as long as it belongs to `business_id`
    async fn load(&self, business_id: &BusinessId, review_id: ReviewId) -> ServiceResult<Review> {
        self.ctx
            .review_repo()
            .find_by_id(review_id)
            .await?
            .filter(|r| &r.business_id == business_id)
            .ok_or_else(|| DomainError::ReviewNotFound(review_id).into())
    }
}
