//! Photo service
//!
//! Business photo uploads.

use tracing::{info, instrument};
use yealp_core::entities::Photo;
use yealp_core::value_objects::{BusinessId, PhotoId, UserId};

use crate::dto::{BusinessResponse, Flash, PhotoFormPage, UploadResponse};

use super::business::BusinessService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::storage::UploadKind;

/// An uploaded file as received from the client
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Photo service
pub struct PhotoService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PhotoService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn form_page(&self, business_id: &BusinessId) -> ServiceResult<PhotoFormPage> {
        let business = BusinessService::new(self.ctx).load(business_id).await?;
        Ok(PhotoFormPage {
            business: BusinessResponse::from(&business),
            accepted_extensions: UploadKind::BusinessPhoto.allowed_extensions().to_vec(),
        })
    }

    /// Store a photo of a business
    #[instrument(skip(self, file))]
    pub async fn upload(
        &self,
        business_id: &BusinessId,
        uploader: &UserId,
        file: Option<UploadedFile>,
    ) -> ServiceResult<UploadResponse> {
        let file = file.ok_or_else(|| ServiceError::field("picture", "Please upload a picture!"))?;
        BusinessService::new(self.ctx).load(business_id).await?;

        let photo_id = PhotoId::generate();
        self.ctx
            .uploads()
            .save(
                UploadKind::BusinessPhoto,
                &file.file_name,
                photo_id.as_str(),
                &file.bytes,
            )
            .await?;

        let photo = Photo::new(photo_id, business_id.clone(), uploader.clone());
        self.ctx.photo_repo().create(&photo).await?;

        info!(photo_id = %photo.id, business_id = %business_id, user_id = %uploader, "Photo uploaded");
        Ok(UploadResponse {
            url: photo.url(),
            flash: Flash::success("Your pictures has been uploaded!"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fakes::{sample_picture, test_context};
    use image::ImageFormat;

    #[tokio::test]
    async fn test_upload_photo() {
        let (store, ctx) = test_context();
        let biz = store.seed_business("b1", "AZ");
        let alice = store.seed_user("alice", "alice@example.com");
        let service = PhotoService::new(&ctx);
        let jpeg = sample_picture(ImageFormat::Jpeg, 160, 120);

        let file = UploadedFile {
            file_name: "dinner.jpg".to_string(),
            bytes: jpeg.clone(),
        };
        let uploaded = service.upload(&biz.id, &alice.id, Some(file)).await.unwrap();
        assert!(uploaded.url.starts_with("/static/business_photos/"));
        assert_eq!(store.photo_count(&biz.id), 1);

        let missing = service.upload(&biz.id, &alice.id, None).await.unwrap_err();
        assert_eq!(
            missing.field_errors().unwrap().get("picture"),
            Some("Please upload a picture!")
        );

        let png = UploadedFile {
            file_name: "dinner.png".to_string(),
            bytes: jpeg,
        };
        let err = service.upload(&biz.id, &alice.id, Some(png)).await.unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_FILE_TYPE");
        assert_eq!(store.photo_count(&biz.id), 1);

        tokio::fs::remove_dir_all(ctx.uploads().root()).await.ok();
    }
}
