//! Test fixtures and data generators
//!
//! Provides reusable request bodies and response shapes for integration tests.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use serde::{Deserialize, Serialize};

/// Unique suffix so repeated runs against one database never collide
pub fn unique_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}

/// Registration form
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("user_{suffix}"),
            email: format!("test_{suffix}@example.com"),
            password: "TestPass123!".to_string(),
            confirm_password: "TestPass123!".to_string(),
        }
    }
}

/// Login form
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub remember: bool,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
            remember: false,
        }
    }
}

/// Public user fields
#[derive(Debug, Deserialize)]
pub struct UserBody {
    pub user_id: String,
    pub name: String,
    pub image_url: String,
}

/// Registration result
#[derive(Debug, Deserialize)]
pub struct RegisterResponse {
    pub user: UserBody,
}

/// Login result
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserBody,
    pub redirect_to: String,
}

/// A registered and logged-in user
#[derive(Debug, Clone)]
pub struct TestUser {
    pub user_id: String,
    pub email: String,
    pub token: String,
}

/// Upvote or follow result
#[derive(Debug, Deserialize)]
pub struct ToggleResponse {
    pub state: String,
    pub count: i64,
}

/// Collection summary
#[derive(Debug, Deserialize)]
pub struct CollectionResponse {
    pub collection_id: i32,
    pub name: String,
    pub n_business: i64,
    pub n_fans: i64,
}

/// Created review or tip
#[derive(Debug, Deserialize)]
pub struct CreatedEntryResponse {
    pub review_id: i64,
    pub business_id: String,
}

/// Error body
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

/// A review long enough to pass the content rule
pub const LONG_REVIEW: &str = "Crispy tacos, friendly staff and the salsa bar is great.";

/// Side of the square test photo; larger than the stored thumbnail
pub const PHOTO_SIDE: u32 = 400;

/// An encoded `PHOTO_SIDE`-square JPEG
pub fn sample_jpeg() -> Vec<u8> {
    let picture = RgbImage::from_fn(PHOTO_SIDE, PHOTO_SIDE, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 64])
    });
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(picture)
        .write_to(&mut out, ImageFormat::Jpeg)
        .expect("encode test jpeg");
    out.into_inner()
}
