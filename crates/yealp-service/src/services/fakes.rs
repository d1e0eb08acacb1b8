//! In-memory repositories for service tests
//!
//! One `MemoryStore` implements every repository trait plus `Mailer`, so a
//! test can seed rows and inspect them through the same handle the
//! services use.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::io::Cursor;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use uuid::Uuid;
use yealp_common::auth::JwtService;
use yealp_core::entities::{
    AuthoredReview, Business, Collection, CollectionMembership, CollectionSummary, Followee,
    NewReview, Photo, Review, ReviewContent, ReviewKind, Session, User, VoteCounts,
};
use yealp_core::traits::{
    BusinessRepository, CollectionRepository, FavoriteRepository, FollowRepository,
    PhotoRepository, RepoResult, ReviewRepository, SessionRepository, UpvoteRepository,
    UserRepository,
};
use yealp_core::value_objects::{
    BusinessFilter, BusinessId, CollectionId, OrderRule, ReviewId, ToggleOutcome, UpvoteType,
    UserId,
};
use yealp_core::DomainError;

use super::context::{ServiceContext, ServiceContextBuilder, ServiceSettings};
use super::error::ServiceResult;
use super::mailer::{Mailer, OutgoingMail};
use super::storage::{random_file_stem, UploadStore};

#[derive(Default)]
struct State {
    users: Vec<(User, String)>,
    businesses: Vec<Business>,
    reviews: Vec<Review>,
    next_review_id: i64,
    upvotes: HashSet<(UserId, ReviewId, UpvoteType)>,
    favorites: HashSet<(UserId, BusinessId)>,
    user_follows: Vec<(UserId, UserId, NaiveDate)>,
    collection_follows: HashSet<(UserId, UserId, CollectionId)>,
    collections: Vec<Collection>,
    members: HashSet<(UserId, CollectionId, BusinessId)>,
    photos: Vec<Photo>,
    sessions: HashMap<Uuid, Session>,
    mails: Vec<OutgoingMail>,
}

impl State {
    fn user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().map(|(u, _)| u).find(|u| &u.id == id)
    }

    fn require_user(&self, id: &UserId) -> RepoResult<&User> {
        self.user(id).ok_or_else(|| DomainError::UserNotFound(id.clone()))
    }

    fn require_business(&self, id: &BusinessId) -> RepoResult<()> {
        if self.businesses.iter().any(|b| &b.id == id) {
            Ok(())
        } else {
            Err(DomainError::BusinessNotFound(id.clone()))
        }
    }

    fn with_aggregates(&self, business: &Business) -> Business {
        let stars: Vec<f64> = self
            .reviews
            .iter()
            .filter(|r| r.business_id == business.id)
            .filter_map(|r| r.content.stars())
            .map(|s| s.value())
            .collect();

        let mut business = business.clone();
        business.review_count = stars.len() as i64;
        business.average_stars = if stars.is_empty() {
            None
        } else {
            let mean = stars.iter().sum::<f64>() / stars.len() as f64;
            Some((mean * 100.0).round() / 100.0)
        };
        business
    }

    fn businesses_where(&self, keep: impl Fn(&Business) -> bool) -> Vec<Business> {
        self.businesses
            .iter()
            .filter(|b| keep(b))
            .map(|b| self.with_aggregates(b))
            .collect()
    }

    fn summary(&self, collection: &Collection) -> CollectionSummary {
        let owner = &collection.owner_id;
        CollectionSummary {
            collection: collection.clone(),
            owner_name: self.user(owner).map(|u| u.name.clone()).unwrap_or_default(),
            business_count: self
                .members
                .iter()
                .filter(|(o, c, _)| o == owner && *c == collection.id)
                .count() as i64,
            fan_count: self
                .collection_follows
                .iter()
                .filter(|(_, o, c)| o == owner && *c == collection.id)
                .count() as i64,
        }
    }

    fn collection(&self, owner: &UserId, id: CollectionId) -> Option<&Collection> {
        self.collections
            .iter()
            .find(|c| &c.owner_id == owner && c.id == id)
    }
}

fn counter(votes: &mut VoteCounts, kind: UpvoteType) -> &mut i32 {
    match kind {
        UpvoteType::Useful => &mut votes.useful,
        UpvoteType::Funny => &mut votes.funny,
        UpvoteType::Cool => &mut votes.cool,
        UpvoteType::Likes => &mut votes.likes,
    }
}

fn toggle_in<T: Eq + std::hash::Hash>(set: &mut HashSet<T>, key: T) -> ToggleOutcome {
    if set.remove(&key) {
        ToggleOutcome::Removed
    } else {
        set.insert(key);
        ToggleOutcome::Added
    }
}

fn set_in<T: Eq + std::hash::Hash>(set: &mut HashSet<T>, key: T, active: bool) -> bool {
    if active {
        set.insert(key)
    } else {
        set.remove(&key)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn seed_user(&self, name: &str, email: &str) -> User {
        let user = User::new(UserId::generate(), name.to_string(), email.to_string());
        self.state()
            .users
            .push((user.clone(), "unusable-hash".to_string()));
        user
    }

    pub fn seed_business(&self, id: &str, state: &str) -> Business {
        self.seed_named_business(id, &format!("Restaurant {id}"), state)
    }

    pub fn seed_named_business(&self, id: &str, name: &str, state: &str) -> Business {
        let business = Business {
            id: BusinessId::new(id),
            name: name.to_string(),
            address: "1 Main St".to_string(),
            city: "Phoenix".to_string(),
            state: state.to_string(),
            postal_code: None,
            is_open: true,
            is_takeout: true,
            average_stars: None,
            review_count: 0,
        };
        self.state().businesses.push(business.clone());
        business
    }

    pub fn seed_review(&self, business: &Business, author: &User, content: ReviewContent) -> Review {
        let mut state = self.state();
        state.next_review_id += 1;
        let review = Review {
            id: ReviewId::new(state.next_review_id),
            business_id: business.id.clone(),
            author_id: author.id.clone(),
            author_name: author.name.clone(),
            content,
            review_date: Utc::now().date_naive(),
            votes: VoteCounts::default(),
        };
        state.reviews.push(review.clone());
        review
    }

    pub fn user_count(&self) -> usize {
        self.state().users.len()
    }

    pub fn collection_count(&self, owner: &UserId) -> usize {
        self.state()
            .collections
            .iter()
            .filter(|c| &c.owner_id == owner)
            .count()
    }

    pub fn photo_count(&self, business_id: &BusinessId) -> usize {
        self.state()
            .photos
            .iter()
            .filter(|p| &p.business_id == business_id)
            .count()
    }

    pub fn last_mail(&self) -> Option<OutgoingMail> {
        self.state().mails.last().cloned()
    }
}

/// A context whose repositories and mailer all point at one fresh store
pub fn test_context() -> (Arc<MemoryStore>, ServiceContext) {
    let store = Arc::new(MemoryStore::default());
    let uploads_dir = std::env::temp_dir().join(format!("yealp-service-{}", random_file_stem()));

    let ctx = ServiceContextBuilder::new()
        .user_repo(store.clone())
        .business_repo(store.clone())
        .review_repo(store.clone())
        .upvote_repo(store.clone())
        .favorite_repo(store.clone())
        .follow_repo(store.clone())
        .collection_repo(store.clone())
        .photo_repo(store.clone())
        .session_repo(store.clone())
        .mailer(store.clone())
        .jwt_service(Arc::new(JwtService::new("test-secret-key", 1800)))
        .uploads(UploadStore::new(uploads_dir, 1024 * 1024))
        .settings(ServiceSettings::default())
        .build()
        .unwrap();

    (store, ctx)
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: &UserId) -> RepoResult<Option<User>> {
        Ok(self.state().user(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .state()
            .users
            .iter()
            .find(|(u, _)| u.email == email)
            .map(|(u, _)| u.clone()))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.state().users.iter().any(|(u, _)| u.email == email))
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let mut state = self.state();
        if state.users.iter().any(|(u, _)| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        state.users.push((user.clone(), password_hash.to_string()));
        Ok(())
    }

    async fn update_profile(&self, user: &User) -> RepoResult<()> {
        let mut state = self.state();
        if state
            .users
            .iter()
            .any(|(u, _)| u.email == user.email && u.id != user.id)
        {
            return Err(DomainError::EmailAlreadyExists);
        }
        let (stored, _) = state
            .users
            .iter_mut()
            .find(|(u, _)| u.id == user.id)
            .ok_or_else(|| DomainError::UserNotFound(user.id.clone()))?;
        *stored = user.clone();
        Ok(())
    }

    async fn get_password_hash(&self, id: &UserId) -> RepoResult<Option<String>> {
        Ok(self
            .state()
            .users
            .iter()
            .find(|(u, _)| &u.id == id)
            .map(|(_, h)| h.clone()))
    }

    async fn update_password(&self, id: &UserId, password_hash: &str) -> RepoResult<()> {
        let mut state = self.state();
        let (_, hash) = state
            .users
            .iter_mut()
            .find(|(u, _)| &u.id == id)
            .ok_or_else(|| DomainError::UserNotFound(id.clone()))?;
        *hash = password_hash.to_string();
        Ok(())
    }
}

/// Same keys as the SQL `ORDER BY` for each rule
fn listing_order(rule: OrderRule, a: &Business, b: &Business) -> Ordering {
    let by_name = || a.name.cmp(&b.name).then_with(|| a.id.as_str().cmp(b.id.as_str()));
    match rule {
        OrderRule::Name => by_name(),
        OrderRule::AverageStars => stars_desc_nulls_last(a, b).then_with(by_name),
        OrderRule::ReviewCount => b
            .review_count
            .cmp(&a.review_count)
            .then_with(|| stars_desc_nulls_last(a, b))
            .then_with(by_name),
    }
}

fn stars_desc_nulls_last(a: &Business, b: &Business) -> Ordering {
    match (a.average_stars, b.average_stars) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[async_trait]
impl BusinessRepository for MemoryStore {
    async fn find_by_id(&self, id: &BusinessId) -> RepoResult<Option<Business>> {
        Ok(self.state().businesses_where(|b| &b.id == id).pop())
    }

    async fn list(&self, limit: i64) -> RepoResult<Vec<Business>> {
        let mut all = self.state().businesses_where(|_| true);
        all.truncate(limit as usize);
        Ok(all)
    }

    async fn search(&self, filter: &BusinessFilter) -> RepoResult<Vec<Business>> {
        let mut found = self.state().businesses_where(|b| {
            b.state == filter.state
                && (!filter.takeout_only || b.is_takeout)
                && (!filter.open_only || b.is_open)
        });
        found.sort_by(|a, b| listing_order(filter.order, a, b));
        Ok(found)
    }

    async fn random(&self, limit: i64) -> RepoResult<Vec<Business>> {
        self.list(limit).await
    }

    async fn states(&self) -> RepoResult<Vec<String>> {
        let mut states: Vec<String> = self
            .state()
            .businesses
            .iter()
            .map(|b| b.state.clone())
            .collect();
        states.sort();
        states.dedup();
        Ok(states)
    }
}

#[async_trait]
impl ReviewRepository for MemoryStore {
    async fn find_by_id(&self, id: ReviewId) -> RepoResult<Option<Review>> {
        Ok(self.state().reviews.iter().find(|r| r.id == id).cloned())
    }

    async fn find_detailed_by_business(&self, business_id: &BusinessId) -> RepoResult<Vec<Review>> {
        Ok(self
            .state()
            .reviews
            .iter()
            .rev()
            .filter(|r| &r.business_id == business_id && r.kind() == ReviewKind::Detailed)
            .cloned()
            .collect())
    }

    async fn find_tips_by_business(&self, business_id: &BusinessId) -> RepoResult<Vec<Review>> {
        Ok(self
            .state()
            .reviews
            .iter()
            .rev()
            .filter(|r| &r.business_id == business_id && r.kind() == ReviewKind::Tip)
            .cloned()
            .collect())
    }

    async fn find_by_author(&self, author_id: &UserId) -> RepoResult<Vec<AuthoredReview>> {
        let state = self.state();
        Ok(state
            .reviews
            .iter()
            .rev()
            .filter(|r| r.is_authored_by(author_id))
            .map(|r| AuthoredReview {
                review: r.clone(),
                business_name: state
                    .businesses
                    .iter()
                    .find(|b| b.id == r.business_id)
                    .map(|b| b.name.clone())
                    .unwrap_or_default(),
            })
            .collect())
    }

    async fn create(&self, review: &NewReview) -> RepoResult<Review> {
        let mut state = self.state();
        state.require_business(&review.business_id)?;
        let author_name = state.require_user(&review.author_id)?.name.clone();

        state.next_review_id += 1;
        let created = Review {
            id: ReviewId::new(state.next_review_id),
            business_id: review.business_id.clone(),
            author_id: review.author_id.clone(),
            author_name,
            content: review.content.clone(),
            review_date: review.review_date,
            votes: VoteCounts::default(),
        };
        state.reviews.push(created.clone());
        Ok(created)
    }

    async fn delete(&self, id: ReviewId) -> RepoResult<bool> {
        let mut state = self.state();
        let before = state.reviews.len();
        state.reviews.retain(|r| r.id != id);
        state.upvotes.retain(|(_, r, _)| *r != id);
        Ok(state.reviews.len() < before)
    }
}

#[async_trait]
impl UpvoteRepository for MemoryStore {
    async fn toggle(
        &self,
        user_id: &UserId,
        review_id: ReviewId,
        kind: UpvoteType,
    ) -> RepoResult<ToggleOutcome> {
        let mut state = self.state();
        let index = state
            .reviews
            .iter()
            .position(|r| r.id == review_id)
            .ok_or(DomainError::ReviewNotFound(review_id))?;

        let outcome = toggle_in(&mut state.upvotes, (user_id.clone(), review_id, kind));
        let count = counter(&mut state.reviews[index].votes, kind);
        *count = match outcome {
            ToggleOutcome::Added => *count + 1,
            ToggleOutcome::Removed => (*count - 1).max(0),
        };
        Ok(outcome)
    }

    async fn find_by_user_for_business(
        &self,
        user_id: &UserId,
        business_id: &BusinessId,
    ) -> RepoResult<Vec<(ReviewId, UpvoteType)>> {
        let state = self.state();
        Ok(state
            .upvotes
            .iter()
            .filter(|(u, r, _)| {
                u == user_id
                    && state
                        .reviews
                        .iter()
                        .any(|rev| rev.id == *r && &rev.business_id == business_id)
            })
            .map(|(_, r, k)| (*r, *k))
            .collect())
    }
}

#[async_trait]
impl FavoriteRepository for MemoryStore {
    async fn is_favorite(&self, user_id: &UserId, business_id: &BusinessId) -> RepoResult<bool> {
        Ok(self
            .state()
            .favorites
            .contains(&(user_id.clone(), business_id.clone())))
    }

    async fn toggle(&self, user_id: &UserId, business_id: &BusinessId) -> RepoResult<ToggleOutcome> {
        let mut state = self.state();
        state.require_business(business_id)?;
        Ok(toggle_in(
            &mut state.favorites,
            (user_id.clone(), business_id.clone()),
        ))
    }

    async fn set(&self, user_id: &UserId, business_id: &BusinessId, active: bool) -> RepoResult<bool> {
        let mut state = self.state();
        state.require_business(business_id)?;
        Ok(set_in(
            &mut state.favorites,
            (user_id.clone(), business_id.clone()),
            active,
        ))
    }

    async fn find_by_user(&self, user_id: &UserId) -> RepoResult<Vec<Business>> {
        let state = self.state();
        let mut found =
            state.businesses_where(|b| state.favorites.contains(&(user_id.clone(), b.id.clone())));
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }
}

#[async_trait]
impl FollowRepository for MemoryStore {
    async fn is_following_user(&self, fan_id: &UserId, followee_id: &UserId) -> RepoResult<bool> {
        Ok(self
            .state()
            .user_follows
            .iter()
            .any(|(f, e, _)| f == fan_id && e == followee_id))
    }

    async fn toggle_user(&self, fan_id: &UserId, followee_id: &UserId) -> RepoResult<ToggleOutcome> {
        let active = self.is_following_user(fan_id, followee_id).await?;
        self.set_user(fan_id, followee_id, !active).await?;
        Ok(ToggleOutcome::from_active(!active))
    }

    async fn set_user(&self, fan_id: &UserId, followee_id: &UserId, active: bool) -> RepoResult<bool> {
        if fan_id == followee_id {
            return Err(DomainError::CannotFollowSelf);
        }
        let mut state = self.state();
        state.require_user(followee_id)?;

        let position = state
            .user_follows
            .iter()
            .position(|(f, e, _)| f == fan_id && e == followee_id);
        match (position, active) {
            (None, true) => {
                let since = Utc::now().date_naive();
                state
                    .user_follows
                    .push((fan_id.clone(), followee_id.clone(), since));
                Ok(true)
            }
            (Some(index), false) => {
                state.user_follows.remove(index);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn fan_count(&self, user_id: &UserId) -> RepoResult<i64> {
        Ok(self
            .state()
            .user_follows
            .iter()
            .filter(|(_, e, _)| e == user_id)
            .count() as i64)
    }

    async fn find_followees(&self, fan_id: &UserId) -> RepoResult<Vec<Followee>> {
        let state = self.state();
        let mut followees: Vec<Followee> = state
            .user_follows
            .iter()
            .filter(|(f, _, _)| f == fan_id)
            .filter_map(|(_, e, since)| {
                state.user(e).map(|user| Followee {
                    user: user.clone(),
                    follow_since: *since,
                })
            })
            .collect();
        followees.sort_by(|a, b| b.follow_since.cmp(&a.follow_since));
        Ok(followees)
    }

    async fn is_following_collection(
        &self,
        fan_id: &UserId,
        owner_id: &UserId,
        collection_id: CollectionId,
    ) -> RepoResult<bool> {
        Ok(self.state().collection_follows.contains(&(
            fan_id.clone(),
            owner_id.clone(),
            collection_id,
        )))
    }

    async fn toggle_collection(
        &self,
        fan_id: &UserId,
        owner_id: &UserId,
        collection_id: CollectionId,
    ) -> RepoResult<ToggleOutcome> {
        let active = self
            .is_following_collection(fan_id, owner_id, collection_id)
            .await?;
        self.set_collection(fan_id, owner_id, collection_id, !active)
            .await?;
        Ok(ToggleOutcome::from_active(!active))
    }

    async fn set_collection(
        &self,
        fan_id: &UserId,
        owner_id: &UserId,
        collection_id: CollectionId,
        active: bool,
    ) -> RepoResult<bool> {
        let mut state = self.state();
        if state.collection(owner_id, collection_id).is_none() {
            return Err(DomainError::CollectionNotFound {
                owner: owner_id.clone(),
                id: collection_id,
            });
        }
        Ok(set_in(
            &mut state.collection_follows,
            (fan_id.clone(), owner_id.clone(), collection_id),
            active,
        ))
    }

    async fn find_followed_collections(&self, fan_id: &UserId) -> RepoResult<Vec<CollectionSummary>> {
        let state = self.state();
        let mut summaries: Vec<CollectionSummary> = state
            .collections
            .iter()
            .filter(|c| {
                state
                    .collection_follows
                    .contains(&(fan_id.clone(), c.owner_id.clone(), c.id))
            })
            .map(|c| state.summary(c))
            .collect();
        summaries.sort_by(|a, b| b.business_count.cmp(&a.business_count));
        Ok(summaries)
    }
}

#[async_trait]
impl CollectionRepository for MemoryStore {
    async fn create(&self, owner_id: &UserId) -> RepoResult<Collection> {
        let mut state = self.state();
        state.require_user(owner_id)?;

        let next = state
            .collections
            .iter()
            .filter(|c| &c.owner_id == owner_id)
            .map(|c| c.id.into_inner())
            .max()
            .unwrap_or(0)
            + 1;
        let collection = Collection::new(owner_id.clone(), CollectionId::new(next));
        state.collections.push(collection.clone());
        Ok(collection)
    }

    async fn find(
        &self,
        owner_id: &UserId,
        collection_id: CollectionId,
    ) -> RepoResult<Option<CollectionSummary>> {
        let state = self.state();
        Ok(state
            .collection(owner_id, collection_id)
            .map(|c| state.summary(c)))
    }

    async fn find_by_owner(&self, owner_id: &UserId) -> RepoResult<Vec<CollectionSummary>> {
        let state = self.state();
        let mut summaries: Vec<CollectionSummary> = state
            .collections
            .iter()
            .filter(|c| &c.owner_id == owner_id)
            .map(|c| state.summary(c))
            .collect();
        summaries.sort_by_key(|s| s.collection.id);
        Ok(summaries)
    }

    async fn find_businesses(
        &self,
        owner_id: &UserId,
        collection_id: CollectionId,
    ) -> RepoResult<Vec<Business>> {
        let state = self.state();
        Ok(state.businesses_where(|b| {
            state
                .members
                .contains(&(owner_id.clone(), collection_id, b.id.clone()))
        }))
    }

    async fn memberships(
        &self,
        owner_id: &UserId,
        business_id: &BusinessId,
    ) -> RepoResult<Vec<CollectionMembership>> {
        let state = self.state();
        let mut memberships: Vec<CollectionMembership> = state
            .collections
            .iter()
            .filter(|c| &c.owner_id == owner_id)
            .map(|c| CollectionMembership {
                collection_id: c.id,
                contains_business: state.members.contains(&(
                    owner_id.clone(),
                    c.id,
                    business_id.clone(),
                )),
            })
            .collect();
        memberships.sort_by_key(|m| m.collection_id);
        Ok(memberships)
    }

    async fn replace_memberships(
        &self,
        owner_id: &UserId,
        business_id: &BusinessId,
        collection_ids: &[CollectionId],
    ) -> RepoResult<()> {
        let mut state = self.state();
        state
            .members
            .retain(|(o, c, b)| !(o == owner_id && b == business_id && !collection_ids.contains(c)));

        let owned: Vec<CollectionId> = collection_ids
            .iter()
            .copied()
            .filter(|id| state.collection(owner_id, *id).is_some())
            .collect();
        for id in owned {
            state
                .members
                .insert((owner_id.clone(), id, business_id.clone()));
        }
        Ok(())
    }
}

#[async_trait]
impl PhotoRepository for MemoryStore {
    async fn create(&self, photo: &Photo) -> RepoResult<()> {
        let mut state = self.state();
        state.require_business(&photo.business_id)?;
        state.photos.push(photo.clone());
        Ok(())
    }

    async fn find_by_business(&self, business_id: &BusinessId) -> RepoResult<Vec<Photo>> {
        Ok(self
            .state()
            .photos
            .iter()
            .rev()
            .filter(|p| &p.business_id == business_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn create(&self, session: &Session) -> RepoResult<()> {
        self.state().sessions.insert(session.id, session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Session>> {
        Ok(self.state().sessions.get(&id).cloned())
    }

    async fn revoke(&self, id: Uuid) -> RepoResult<bool> {
        let mut state = self.state();
        match state.sessions.get_mut(&id) {
            Some(session) if session.revoked_at.is_none() => {
                session.revoked_at = Some(Utc::now());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke_all_for_user(&self, user_id: &UserId) -> RepoResult<u64> {
        let mut state = self.state();
        let now = Utc::now();
        let mut revoked = 0;
        for session in state.sessions.values_mut() {
            if &session.user_id == user_id && session.revoked_at.is_none() {
                session.revoked_at = Some(now);
                revoked += 1;
            }
        }
        Ok(revoked)
    }
}

#[async_trait]
impl Mailer for MemoryStore {
    async fn send(&self, mail: OutgoingMail) -> ServiceResult<()> {
        self.state().mails.push(mail);
        Ok(())
    }
}

/// An encoded gradient picture of `width`×`height`
pub fn sample_picture(format: ImageFormat, width: u32, height: u32) -> Vec<u8> {
    let picture = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(picture)
        .write_to(&mut out, format)
        .unwrap();
    out.into_inner()
}
