//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, making HTTP requests and
//! seeding the business rows the application never creates itself.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use reqwest::{multipart, redirect, Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use yealp_api::{create_app, create_app_state};
use yealp_common::AppConfig;

use crate::fixtures::{unique_suffix, LoginRequest, LoginResponse, RegisterRequest, TestUser};

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub pool: PgPool,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(config).await?;
        let pool = state.pool().clone();
        let app = create_app(state);

        // Port 0 lets the OS pick a free port
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Redirects are asserted, not followed
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self {
            addr,
            client,
            pool,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    fn authed(builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder.header("Authorization", format!("Bearer {token}"))
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(Self::authed(self.client.get(self.url(path)), token)
            .send()
            .await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a POST request with JSON body and auth token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(Self::authed(self.client.post(self.url(path)), token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a body-less POST request with auth token
    pub async fn post_empty_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(Self::authed(self.client.post(self.url(path)), token)
            .send()
            .await?)
    }

    /// Upload `bytes` as the `picture` field of a multipart form
    pub async fn post_picture_auth(
        &self,
        path: &str,
        token: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<Response> {
        let part = multipart::Part::bytes(bytes.to_vec()).file_name(file_name.to_string());
        let form = multipart::Form::new().part("picture", part);
        Ok(Self::authed(self.client.post(self.url(path)), token)
            .multipart(form)
            .send()
            .await?)
    }

    /// Register a fresh user and log them in
    pub async fn register_and_login(&self) -> Result<TestUser> {
        let register = RegisterRequest::unique();
        let response = self.post("/register", &register).await?;
        assert_status(response, StatusCode::CREATED).await?;

        let response = self
            .post("/login", &LoginRequest::from_register(&register))
            .await?;
        let login: LoginResponse = assert_json(response, StatusCode::OK).await?;

        Ok(TestUser {
            user_id: login.user.user_id,
            email: register.email,
            token: login.access_token,
        })
    }

    /// Insert a business row; returns its id
    pub async fn seed_business(&self, state: &str, is_takeout: bool) -> Result<String> {
        let id = format!("it{}", &uuid::Uuid::new_v4().simple().to_string()[..22]);
        sqlx::query(
            r"
            INSERT INTO business (business_id, name, address, city, state, postal_code, is_open, is_takeout)
            VALUES ($1, $2, '1 Main St', 'Phoenix', $3, '85001', TRUE, $4)
            ",
        )
        .bind(&id)
        .bind(format!("Diner {}", unique_suffix()))
        .bind(state)
        .bind(is_takeout)
        .execute(&self.pool)
        .await?;
        Ok(id)
    }
}

/// Create a test configuration
///
/// Uploads go to a fresh temporary directory and the rate limit is lifted so
/// parallel tests do not trip it.
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();
    if std::env::var("JWT_SECRET").is_err() {
        std::env::set_var("JWT_SECRET", "integration-test-secret");
    }

    let mut config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {e}"))?;
    config.storage.upload_dir = std::env::temp_dir()
        .join(format!("yealp-it-{}", unique_suffix()))
        .to_string_lossy()
        .into_owned();
    config.rate_limit.requests_per_second = 1000;
    config.rate_limit.burst = 10_000;
    Ok(config)
}

/// Helper to check if test environment is available
pub fn check_test_env() -> bool {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }
    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}

/// `Location` header of a redirect
pub fn location(response: &Response) -> Option<String> {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
