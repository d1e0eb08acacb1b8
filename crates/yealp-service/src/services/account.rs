//! Account service
//!
//! The logged-in user's own profile: name, email and avatar.

use tracing::{info, instrument};
use yealp_core::entities::User;
use yealp_core::value_objects::UserId;
use yealp_core::DomainError;

use crate::dto::{
    AccountForm, AccountPage, CurrentUserResponse, Flash, UpdateAccountRequest, UploadResponse,
};
use crate::forms::check;

use super::auth::EMAIL_TAKEN;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::storage::{random_file_stem, UploadKind};

const ACCOUNT_UPDATED: &str = "Your account has been updated!";

/// Account service
pub struct AccountService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccountService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Account page with the form prefilled
    #[instrument(skip(self))]
    pub async fn page(&self, user_id: &UserId) -> ServiceResult<AccountPage> {
        let user = self.load(user_id).await?;
        Ok(account_page(&user, None))
    }

    /// Change name and email
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        user_id: &UserId,
        request: UpdateAccountRequest,
    ) -> ServiceResult<AccountPage> {
        check(&request)?;
        let mut user = self.load(user_id).await?;

        if request.email != user.email && self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(ServiceError::field("email", EMAIL_TAKEN));
        }

        user.set_profile(request.username, request.email);
        self.save(&user).await?;

        info!(user_id = %user.id, "Account updated");
        Ok(account_page(&user, Some(Flash::success(ACCOUNT_UPDATED))))
    }

    /// Replace the avatar
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload_picture(
        &self,
        user_id: &UserId,
        original_name: &str,
        bytes: &[u8],
    ) -> ServiceResult<UploadResponse> {
        let mut user = self.load(user_id).await?;

        let file_name = self
            .ctx
            .uploads()
            .save(UploadKind::ProfilePicture, original_name, &random_file_stem(), bytes)
            .await?;

        user.set_image_file(file_name);
        self.save(&user).await?;

        info!(user_id = %user.id, image = %user.image_file, "Profile picture updated");
        Ok(UploadResponse {
            url: user.image_url(),
            flash: Flash::success(ACCOUNT_UPDATED),
        })
    }

    async fn load(&self, user_id: &UserId) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id.clone()).into())
    }

    async fn save(&self, user: &User) -> ServiceResult<()> {
        self.ctx
            .user_repo()
            .update_profile(user)
            .await
            .map_err(|e| match e {
                DomainError::EmailAlreadyExists => ServiceError::field("email", EMAIL_TAKEN),
                other => other.into(),
            })
    }
}

fn account_page(user: &User, flash: Option<Flash>) -> AccountPage {
    AccountPage {
        user: CurrentUserResponse::from(user),
        image_url: user.image_url(),
        form: AccountForm {
            username: user.name.clone(),
            email: user.email.clone(),
        },
        flash,
    }
}
