//! Route definitions
//!
//! Paths follow the site's page URLs. Pages answer with JSON view models.

use axum::{routing::get, routing::post, Router};

use crate::handlers::{
    account, auth, collections, health, photos, restaurants, reviews, users,
};
use crate::state::AppState;

/// Create the main router with all page routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(search_routes())
        .merge(restaurant_routes())
        .merge(auth_routes())
        .merge(account_routes())
        .merge(user_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Search form and listings
fn search_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(restaurants::search_page).post(restaurants::search))
        .route("/home", get(restaurants::search_page).post(restaurants::search))
        .route(
            "/restaurants",
            get(restaurants::list_restaurants).post(restaurants::search),
        )
        // /restaurants/:state/is_takeout:<bool>/is_open:<bool>/order_by:<rule>
        .route(
            "/restaurants/:state/:takeout/:open/:order",
            get(restaurants::filtered_listing).post(restaurants::search_from_listing),
        )
}

/// Restaurant page, reviews, tips and photos
fn restaurant_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/restaurant/:business_id",
            get(restaurants::restaurant_page).post(restaurants::restaurant_actions),
        )
        .route(
            "/restaurant/:business_id/new_collection",
            post(restaurants::new_collection),
        )
        .route(
            "/restaurant/:business_id/review/new",
            get(reviews::review_form).post(reviews::create_review),
        )
        .route(
            "/restaurant/:business_id/tip/new",
            get(reviews::tip_form).post(reviews::create_tip),
        )
        .route(
            "/restaurant/:business_id/create_biz_photo",
            get(photos::photo_form).post(photos::upload_photo),
        )
        .route(
            "/restaurant/:business_id/review/:review_id/delete",
            post(reviews::delete_review),
        )
        .route(
            "/restaurant/:business_id/review/:review_id/upvote/:upvote_type",
            post(reviews::upvote),
        )
}

/// Registration, login and password reset
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout).post(auth::logout))
        .route(
            "/reset_password",
            get(auth::reset_request_page).post(auth::request_reset),
        )
        .route(
            "/reset_password/:token",
            get(auth::reset_token_page).post(auth::reset_password),
        )
}

/// The logged-in user's account
fn account_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/account",
            get(account::account_page).post(account::update_account),
        )
        .route("/account/picture", post(account::upload_picture))
        .route("/favorites", get(users::favorites))
}

/// Profiles, follows and collections
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user/followees", get(users::followees))
        .route("/user/:user_id", get(users::profile).post(users::follow_user))
        .route(
            "/user/:user_id/collections",
            get(collections::list_collections).post(collections::create_collection),
        )
        .route(
            "/user/:user_id/collection/:collection_id",
            get(collections::collection_page).post(collections::follow_collection),
        )
}
