//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL (JWT_SECRET defaults to a test value)
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, location, TestServer,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/health/ready").await.expect("Request failed");
    let ready: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(ready["checks"]["database"], "healthy");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_and_login() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/register", &request).await.unwrap();
    let registered: RegisterResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(registered.user.name, request.username);
    assert_eq!(registered.user.image_url, "/static/profile_pics/default.jpg");

    let response = server
        .post("/login?next=/favorites", &LoginRequest::from_register(&request))
        .await
        .unwrap();
    let login: LoginResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!login.access_token.is_empty());
    assert_eq!(login.redirect_to, "/favorites");

    // A logged-in visitor is sent home
    let response = server.get_auth("/login", &login.access_token).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/home"));
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();
    server.post("/register", &request).await.unwrap();

    let again = RegisterRequest {
        username: format!("other_{}", unique_suffix()),
        ..request
    };
    let response = server.post("/register", &again).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "VALIDATION_ERROR");
    assert_eq!(
        error.error.details.unwrap()["email"],
        "That email is taken. Please choose a different one."
    );
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();
    server.post("/register", &request).await.unwrap();

    let login = LoginRequest {
        password: "WrongPass123".to_string(),
        ..LoginRequest::from_register(&request)
    };
    let response = server.post("/login", &login).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error.error.code, "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_logout_revokes_session() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = server.register_and_login().await.unwrap();

    let response = server.get_auth("/account", &user.token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.post_empty_auth("/logout", &user.token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get_auth("/account", &user.token).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error.error.code, "SESSION_REVOKED");
}

#[tokio::test]
async fn test_password_reset_request() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = server.register_and_login().await.unwrap();

    let response = server
        .post("/reset_password", &json!({ "email": user.email }))
        .await
        .unwrap();
    assert_status(response, StatusCode::ACCEPTED).await.unwrap();

    let response = server
        .post("/reset_password", &json!({ "email": "nobody@example.com" }))
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(error.error.details.unwrap()["email"].is_string());

    let response = server.get("/reset_password/not-a-token").await.unwrap();
    let check: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(check["valid"], false);
}

#[tokio::test]
async fn test_protected_route_requires_auth() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/favorites").await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error.error.code, "MISSING_AUTH");
}

// ============================================================================
// Search Tests
// ============================================================================

#[tokio::test]
async fn test_search_redirects_to_listing() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    server.seed_business("AZ", true).await.unwrap();

    let response = server
        .post(
            "/home",
            &json!({ "state": "AZ", "is_takeout": true, "order_rule": "average_stars" }),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let target = location(&response).unwrap();
    assert_eq!(
        target,
        "/restaurants/AZ/is_takeout:True/is_open:False/order_by:average_stars"
    );

    let response = server.get(&target).await.unwrap();
    let page: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page["filter"]["state"], "AZ");
    assert!(!page["restaurants"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_listing_rejects_bad_segments() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .get("/restaurants/AZ/is_takeout:maybe/is_open:False/order_by:name")
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .get("/restaurants/AZ/is_takeout:True/is_open:False/order_by:stars")
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "INVALID_ORDER_RULE");
}

// ============================================================================
// Review Tests
// ============================================================================

#[tokio::test]
async fn test_review_upvote_toggle() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = server.register_and_login().await.unwrap();
    let voter = server.register_and_login().await.unwrap();
    let business = server.seed_business("NV", false).await.unwrap();

    let response = server
        .post_auth(
            &format!("/restaurant/{business}/review/new"),
            &author.token,
            &json!({ "star": 4.5, "content": LONG_REVIEW }),
        )
        .await
        .unwrap();
    let created: CreatedEntryResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.business_id, business);

    let upvote = format!(
        "/restaurant/{business}/review/{}/upvote/useful",
        created.review_id
    );

    let response = server.post_empty_auth(&upvote, &voter.token).await.unwrap();
    let first: ToggleResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(first.state, "added");
    assert_eq!(first.count, 1);

    let response = server.post_empty_auth(&upvote, &voter.token).await.unwrap();
    let second: ToggleResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(second.state, "removed");
    assert_eq!(second.count, 0);

    // Unknown vote columns never reach the database
    let bad = format!(
        "/restaurant/{business}/review/{}/upvote/stars",
        created.review_id
    );
    let response = server.post_empty_auth(&bad, &voter.token).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "INVALID_UPVOTE_TYPE");
}

#[tokio::test]
async fn test_only_author_deletes_review() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = server.register_and_login().await.unwrap();
    let other = server.register_and_login().await.unwrap();
    let business = server.seed_business("NV", false).await.unwrap();

    let response = server
        .post_auth(
            &format!("/restaurant/{business}/tip/new"),
            &author.token,
            &json!({ "content": "Try the horchata" }),
        )
        .await
        .unwrap();
    let created: CreatedEntryResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let delete = format!("/restaurant/{business}/review/{}/delete", created.review_id);

    let response = server.post_empty_auth(&delete, &other.token).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.error.code, "NOT_REVIEW_AUTHOR");

    let response = server.post_empty_auth(&delete, &author.token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.post_empty_auth(&delete, &author.token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_short_review_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = server.register_and_login().await.unwrap();
    let business = server.seed_business("NV", false).await.unwrap();

    let response = server
        .post_auth(
            &format!("/restaurant/{business}/review/new"),
            &author.token,
            &json!({ "star": 4.0, "content": "meh" }),
        )
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(
        error.error.details.unwrap()["content"],
        "Field must be at least 30 characters long."
    );
}

// ============================================================================
// Social Tests
// ============================================================================

#[tokio::test]
async fn test_favorite_and_collections() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = server.register_and_login().await.unwrap();
    let business = server.seed_business("OH", true).await.unwrap();
    let collections = format!("/user/{}/collections", user.user_id);

    let response = server.post_empty_auth(&collections, &user.token).await.unwrap();
    let first: CollectionResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let response = server.post_empty_auth(&collections, &user.token).await.unwrap();
    let second: CollectionResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(first.collection_id, 1);
    assert_eq!(second.collection_id, 2);

    let response = server
        .post_auth(
            &format!("/restaurant/{business}"),
            &user.token,
            &json!({ "favorite_action": "toggle", "collections_update": [2] }),
        )
        .await
        .unwrap();
    let page: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page["favorite"], true);

    let response = server
        .get(&format!("/user/{}/collection/2", user.user_id))
        .await
        .unwrap();
    let detail: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail["collection"]["name"], "Collection NO.2 with 1 restaurants");

    let response = server.get_auth("/favorites", &user.token).await.unwrap();
    let favorites: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(favorites["restaurants"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_collection_owner_only() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = server.register_and_login().await.unwrap();
    let other = server.register_and_login().await.unwrap();

    let response = server
        .post_empty_auth(&format!("/user/{}/collections", owner.user_id), &other.token)
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.error.code, "NOT_COLLECTION_OWNER");
}

#[tokio::test]
async fn test_follow_user() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let fan = server.register_and_login().await.unwrap();
    let star = server.register_and_login().await.unwrap();
    let profile = format!("/user/{}", star.user_id);

    let response = server
        .post_auth(&profile, &fan.token, &json!({ "follow_action": "follow" }))
        .await
        .unwrap();
    let page: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page["is_fan"], true);
    assert_eq!(page["n_fans"], 1);

    let response = server.get_auth("/user/followees", &fan.token).await.unwrap();
    let followees: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(followees["followees"][0]["user"]["user_id"], star.user_id);

    let response = server
        .post_auth(
            &format!("/user/{}", fan.user_id),
            &fan.token,
            &json!({ "follow_action": "toggle" }),
        )
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "CANNOT_FOLLOW_SELF");
}

// ============================================================================
// Upload Tests
// ============================================================================

#[tokio::test]
async fn test_business_photo_upload() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = server.register_and_login().await.unwrap();
    let business = server.seed_business("PA", false).await.unwrap();
    let path = format!("/restaurant/{business}/create_biz_photo");
    let jpeg = sample_jpeg();

    let response = server
        .post_picture_auth(&path, &user.token, "dinner.jpg", &jpeg)
        .await
        .unwrap();
    let uploaded: Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    let url = uploaded["url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/static/business_photos/"));

    // Served as a thumbnail, not the original upload
    let response = server.get(&url).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let stored = response.bytes().await.unwrap();
    let thumb = image::load_from_memory(&stored).unwrap();
    assert_eq!((thumb.width(), thumb.height()), (125, 125));
    assert!(thumb.width() < PHOTO_SIDE);

    let response = server
        .post_picture_auth(&path, &user.token, "dinner.png", &jpeg)
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "UNSUPPORTED_FILE_TYPE");
}
