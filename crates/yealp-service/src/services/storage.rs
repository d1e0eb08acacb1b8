//! Storage for uploaded pictures
//!
//! Files land under `<upload_dir>/profile_pics` and
//! `<upload_dir>/business_photos` with random names; the API serves the
//! upload directory at `/static`. Every picture is shrunk to fit a
//! 125×125 box before it is written.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView, ImageFormat};
use tracing::{debug, info, instrument};
use yealp_common::StorageConfig;
use yealp_core::DomainError;

use super::error::{ServiceError, ServiceResult};

/// Which kind of picture is being stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    ProfilePicture,
    BusinessPhoto,
}

impl UploadKind {
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::ProfilePicture => "profile_pics",
            Self::BusinessPhoto => "business_photos",
        }
    }

    pub const fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            Self::ProfilePicture => &["jpg", "png"],
            Self::BusinessPhoto => &["jpg"],
        }
    }

    /// Lowercased extension of `file_name` if this kind accepts it
    pub fn accept(self, file_name: &str) -> Result<String, DomainError> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        if self.allowed_extensions().contains(&ext.as_str()) {
            Ok(ext)
        } else {
            Err(DomainError::UnsupportedFileType(file_name.to_string()))
        }
    }
}

/// Check the leading bytes against the claimed extension
fn content_matches(ext: &str, bytes: &[u8]) -> bool {
    match ext {
        "jpg" => bytes.starts_with(&[0xFF, 0xD8, 0xFF]),
        "png" => bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]),
        _ => false,
    }
}

/// Longest side of a stored picture, in pixels
pub const THUMBNAIL_SIZE: u32 = 125;

fn image_format(ext: &str) -> ImageFormat {
    match ext {
        "png" => ImageFormat::Png,
        _ => ImageFormat::Jpeg,
    }
}

/// Decode, shrink to fit `THUMBNAIL_SIZE` keeping the aspect ratio, re-encode.
/// Pictures that already fit are re-encoded at their own size.
fn thumbnail(ext: &str, bytes: &[u8]) -> Result<Vec<u8>, image::ImageError> {
    let format = image_format(ext);
    let picture = image::load_from_memory_with_format(bytes, format)?;
    let (width, height) = picture.dimensions();

    let picture = if width > THUMBNAIL_SIZE || height > THUMBNAIL_SIZE {
        picture.thumbnail(THUMBNAIL_SIZE, THUMBNAIL_SIZE)
    } else {
        picture
    };
    // JPEG has no alpha channel
    let picture = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(picture.to_rgb8()),
        _ => picture,
    };

    let mut out = Cursor::new(Vec::new());
    picture.write_to(&mut out, format)?;
    Ok(out.into_inner())
}

/// Random 16 hex character file stem
pub fn random_file_stem() -> String {
    format!("{:016x}", rand::random::<u64>())
}

/// Writes uploads below a root directory
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
    max_bytes: usize,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.upload_dir, config.max_file_size_bytes())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dir(&self, kind: UploadKind) -> PathBuf {
        self.root.join(kind.dir_name())
    }

    /// Create the upload directories if needed
    pub async fn ensure_dirs(&self) -> std::io::Result<()> {
        for kind in [UploadKind::ProfilePicture, UploadKind::BusinessPhoto] {
            tokio::fs::create_dir_all(self.dir(kind)).await?;
        }
        Ok(())
    }

    /// Validate an uploaded picture and write its thumbnail as
    /// `<stem>.<ext>`. Returns the stored file name.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn save(
        &self,
        kind: UploadKind,
        original_name: &str,
        stem: &str,
        bytes: &[u8],
    ) -> ServiceResult<String> {
        let ext = kind.accept(original_name)?;

        if bytes.is_empty() {
            return Err(ServiceError::field("picture", "Please upload a picture!"));
        }
        if bytes.len() > self.max_bytes {
            return Err(ServiceError::field("picture", "File is too large."));
        }
        if !content_matches(&ext, bytes) {
            return Err(DomainError::UnsupportedFileType(original_name.to_string()).into());
        }

        let decoded_ext = ext.clone();
        let upload = bytes.to_vec();
        let shrunk = tokio::task::spawn_blocking(move || thumbnail(&decoded_ext, &upload))
            .await
            .map_err(|e| DomainError::StorageError(e.to_string()))?
            .map_err(|e| {
                debug!(error = %e, "Picture could not be decoded");
                DomainError::UnsupportedFileType(original_name.to_string())
            })?;

        let file_name = format!("{stem}.{ext}");
        let dir = self.dir(kind);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| DomainError::StorageError(e.to_string()))?;
        tokio::fs::write(dir.join(&file_name), &shrunk)
            .await
            .map_err(|e| DomainError::StorageError(e.to_string()))?;

        info!(file_name = %file_name, dir = kind.dir_name(), "Upload stored");
        Ok(file_name)
    }
}
