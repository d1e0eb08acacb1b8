//! Multipart picture upload extractor

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
};
use yealp_service::UploadedFile;

use crate::response::ApiError;

/// Form field carrying the picture
pub const PICTURE_FIELD: &str = "picture";

/// The `picture` part of a multipart form.
///
/// None when the part is missing or empty, which is how browsers submit a
/// file input left blank.
#[derive(Debug, Clone)]
pub struct PictureUpload(pub Option<UploadedFile>);

#[async_trait]
impl<S> FromRequest<S> for PictureUpload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_body(e.body_text()))?;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::invalid_body(e.body_text()))?
        {
            if field.name() != Some(PICTURE_FIELD) {
                continue;
            }

            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::invalid_body(e.body_text()))?;

            if file_name.is_empty() && bytes.is_empty() {
                return Ok(PictureUpload(None));
            }
            return Ok(PictureUpload(Some(UploadedFile {
                file_name,
                bytes: bytes.to_vec(),
            })));
        }

        Ok(PictureUpload(None))
    }
}
