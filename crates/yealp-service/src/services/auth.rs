//! Authentication service
//!
//! Handles registration, login sessions, logout and the password reset flow.

use chrono::Duration;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use yealp_common::auth::{hash_password, verify_against_dummy, verify_password};
use yealp_common::AppError;
use yealp_core::entities::{Session, User};
use yealp_core::value_objects::UserId;
use yealp_core::DomainError;

use crate::dto::{
    CurrentUserResponse, Flash, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
    RegisterResponse, RequestResetRequest, ResetPasswordRequest, ResetTokenResponse,
};
use crate::forms::check;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::mailer::OutgoingMail;

pub(crate) const EMAIL_TAKEN: &str = "That email is taken. Please choose a different one.";
const EMAIL_UNKNOWN: &str = "There is no account with that email. You must register first.";
const INVALID_RESET_TOKEN: &str = "That is an invalid or expired token";
const DEFAULT_REDIRECT: &str = "/home";

/// The user and session behind a verified access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub session_id: Uuid,
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<RegisterResponse> {
        check(&request)?;

        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(ServiceError::field("email", EMAIL_TAKEN));
        }

        let password_hash = hash_password(&request.password)?;
        let user = User::new(UserId::generate(), request.username, request.email);

        // A concurrent registration can still win the unique constraint
        self.ctx
            .user_repo()
            .create(&user, &password_hash)
            .await
            .map_err(|e| match e {
                DomainError::EmailAlreadyExists => ServiceError::field("email", EMAIL_TAKEN),
                other => other.into(),
            })?;

        info!(user_id = %user.id, "User registered successfully");

        Ok(RegisterResponse {
            user: CurrentUserResponse::from(&user),
            flash: Flash::success("Your account has been created! You are now able to log in"),
        })
    }

    /// Login with email and password, opening a new session
    #[instrument(skip(self, request, next), fields(email = %request.email))]
    pub async fn login(
        &self,
        request: LoginRequest,
        next: Option<&str>,
    ) -> ServiceResult<LoginResponse> {
        check(&request)?;

        let Some(user) = self.ctx.user_repo().find_by_email(&request.email).await? else {
            verify_against_dummy(&request.password);
            warn!("Login failed: user not found");
            return Err(AppError::InvalidCredentials.into());
        };

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(&user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        if !verify_password(&request.password, &password_hash)? {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(AppError::InvalidCredentials.into());
        }

        let settings = self.ctx.settings();
        let lifetime = if request.remember {
            settings.remember_lifetime_secs
        } else {
            settings.session_lifetime_secs
        };

        let session = Session::start(user.id.clone(), Duration::seconds(lifetime));
        self.ctx.session_repo().create(&session).await?;

        let token = self
            .ctx
            .jwt_service()
            .generate_access_token(&user.id, session.id, lifetime)?;

        info!(user_id = %user.id, session_id = %session.id, "User logged in successfully");

        Ok(LoginResponse {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
            user: CurrentUserResponse::from(&user),
            redirect_to: safe_redirect(next),
        })
    }

    /// Resolve a bearer token to a live session
    #[instrument(skip(self, token))]
    pub async fn authenticate(&self, token: &str) -> ServiceResult<Identity> {
        let claims = self.ctx.jwt_service().validate_access_token(token)?;
        let user_id = claims.user_id()?;
        let session_id = claims.session_id()?;

        let session = self
            .ctx
            .session_repo()
            .find_by_id(session_id)
            .await?
            .ok_or(ServiceError::App(AppError::SessionRevoked))?;

        if session.user_id != user_id {
            warn!(session_id = %session_id, "Token subject does not own the session");
            return Err(AppError::InvalidToken.into());
        }
        if !session.is_active() {
            return Err(AppError::SessionRevoked.into());
        }

        Ok(Identity {
            user_id,
            session_id,
        })
    }

    /// Close the current session
    #[instrument(skip(self))]
    pub async fn logout(&self, identity: &Identity) -> ServiceResult<()> {
        if self.ctx.session_repo().revoke(identity.session_id).await? {
            info!(user_id = %identity.user_id, "User logged out");
        }
        Ok(())
    }

    /// Mail a reset link to the owner of `email`
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn request_reset(&self, request: RequestResetRequest) -> ServiceResult<MessageResponse> {
        check(&request)?;

        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| ServiceError::field("email", EMAIL_UNKNOWN))?;

        let token = self.ctx.jwt_service().generate_reset_token(&user.id)?;
        let settings = self.ctx.settings();
        let link = format!("{}/reset_password/{token}", settings.public_base_url);

        let mail = OutgoingMail::password_reset(&settings.mail_sender, &user.email, &user.name, &link);
        self.ctx.mailer().send(mail).await?;

        info!(user_id = %user.id, "Password reset requested");

        Ok(MessageResponse {
            flash: Flash::info("An email has been sent with instructions to reset your password."),
        })
    }

    /// Check a reset link without consuming it
    #[instrument(skip(self, token))]
    pub async fn verify_reset_token(&self, token: &str) -> ServiceResult<ResetTokenResponse> {
        let valid = match self.reset_token_owner(token).await {
            Ok(_) => true,
            Err(ServiceError::Form(_)) => false,
            Err(e) => return Err(e),
        };

        Ok(ResetTokenResponse {
            valid,
            flash: (!valid).then(|| Flash::warning(INVALID_RESET_TOKEN)),
        })
    }

    /// Store a new password and end every session of the user
    #[instrument(skip(self, token, request))]
    pub async fn reset_password(
        &self,
        token: &str,
        request: ResetPasswordRequest,
    ) -> ServiceResult<MessageResponse> {
        let user = self.reset_token_owner(token).await?;
        check(&request)?;

        let password_hash = hash_password(&request.password)?;
        self.ctx
            .user_repo()
            .update_password(&user.id, &password_hash)
            .await?;
        let revoked = self.ctx.session_repo().revoke_all_for_user(&user.id).await?;

        info!(user_id = %user.id, revoked_sessions = revoked, "Password reset");

        Ok(MessageResponse {
            flash: Flash::success("Your password has been updated! You are now able to log in"),
        })
    }

    async fn reset_token_owner(&self, token: &str) -> ServiceResult<User> {
        let Ok(user_id) = self.ctx.jwt_service().validate_reset_token(token) else {
            warn!("Rejected reset token");
            return Err(ServiceError::field("token", INVALID_RESET_TOKEN));
        };

        self.ctx
            .user_repo()
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| ServiceError::field("token", INVALID_RESET_TOKEN))
    }
}

/// Only same-site paths are followed after login
pub fn safe_redirect(next: Option<&str>) -> String {
    match next {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.contains("://") =>
        {
            path.to_string()
        }
        _ => DEFAULT_REDIRECT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fakes::test_context;

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            username: "alice".to_string(),
            email: email.to_string(),
            password: "password1".to_string(),
            confirm_password: "password1".to_string(),
        }
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
            remember: false,
        }
    }

    #[test]
    fn test_safe_redirect() {
        assert_eq!(safe_redirect(Some("/account")), "/account");
        assert_eq!(safe_redirect(Some("//evil.com")), "/home");
        assert_eq!(safe_redirect(Some("https://evil.com")), "/home");
        assert_eq!(safe_redirect(Some("/\\evil.com")), "/home");
        assert_eq!(safe_redirect(None), "/home");
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let (store, ctx) = test_context();
        let auth = AuthService::new(&ctx);

        let registered = auth.register(register_request("alice@example.com")).await.unwrap();
        assert_eq!(registered.user.email, "alice@example.com");
        assert_eq!(store.user_count(), 1);

        let login = auth
            .login(login_request("alice@example.com", "password1"), Some("/favorites"))
            .await
            .unwrap();
        assert_eq!(login.redirect_to, "/favorites");
        assert_eq!(login.token_type, "Bearer");

        let identity = auth.authenticate(&login.access_token).await.unwrap();
        assert_eq!(identity.user_id.as_str(), registered.user.user_id);
    }

    #[tokio::test]
    async fn test_register_duplicate_email_is_form_error() {
        let (store, ctx) = test_context();
        let auth = AuthService::new(&ctx);
        auth.register(register_request("dup@example.com")).await.unwrap();

        let err = auth.register(register_request("dup@example.com")).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.field_errors().unwrap().get("email"), Some(EMAIL_TAKEN));
        assert_eq!(store.user_count(), 1);
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let (_store, ctx) = test_context();
        let auth = AuthService::new(&ctx);
        auth.register(register_request("bob@example.com")).await.unwrap();

        let wrong = auth
            .login(login_request("bob@example.com", "password2"), None)
            .await
            .unwrap_err();
        assert_eq!(wrong.error_code(), "INVALID_CREDENTIALS");

        let unknown = auth
            .login(login_request("nobody@example.com", "password1"), None)
            .await
            .unwrap_err();
        assert_eq!(unknown.error_code(), "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn test_logout_revokes_session() {
        let (_store, ctx) = test_context();
        let auth = AuthService::new(&ctx);
        auth.register(register_request("carol@example.com")).await.unwrap();
        let login = auth
            .login(login_request("carol@example.com", "password1"), None)
            .await
            .unwrap();

        let identity = auth.authenticate(&login.access_token).await.unwrap();
        auth.logout(&identity).await.unwrap();

        let err = auth.authenticate(&login.access_token).await.unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[tokio::test]
    async fn test_password_reset_flow() {
        let (store, ctx) = test_context();
        let auth = AuthService::new(&ctx);
        auth.register(register_request("dave@example.com")).await.unwrap();
        let old_login = auth
            .login(login_request("dave@example.com", "password1"), None)
            .await
            .unwrap();

        let unknown = auth
            .request_reset(RequestResetRequest {
                email: "ghost@example.com".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(
            unknown.field_errors().unwrap().get("email"),
            Some(EMAIL_UNKNOWN)
        );

        auth.request_reset(RequestResetRequest {
            email: "dave@example.com".to_string(),
        })
        .await
        .unwrap();

        let mail = store.last_mail().unwrap();
        assert_eq!(mail.to, "dave@example.com");
        let token = mail
            .body
            .lines()
            .find_map(|line| line.split("/reset_password/").nth(1))
            .unwrap()
            .to_string();

        assert!(auth.verify_reset_token(&token).await.unwrap().valid);
        assert!(!auth.verify_reset_token("garbage").await.unwrap().valid);

        auth.reset_password(
            &token,
            ResetPasswordRequest {
                password: "newpassword".to_string(),
                confirm_password: "newpassword".to_string(),
            },
        )
        .await
        .unwrap();

        assert!(auth.authenticate(&old_login.access_token).await.is_err());
        assert!(auth
            .login(login_request("dave@example.com", "newpassword"), None)
            .await
            .is_ok());
    }
}
