//! Image uploads behind one trait.
//!
//! Production uses [`CloudinaryUploader`]; tests swap in [`MemoryUploader`].
//! Browsers post the picked file as a `data:` URL, which [`ImageFile`]
//! decodes and checks before anything leaves the server.

mod cloudinary;
mod memory;

use std::fmt;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

pub use cloudinary::CloudinaryUploader;
pub use memory::MemoryUploader;

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
pub const ALLOWED_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

#[derive(Debug)]
pub enum UploadError {
    NotADataUrl,
    BadEncoding(String),
    UnsupportedType(String),
    TooLarge(usize),
    NotConfigured,
    Transport(reqwest::Error),
    Rejected(String),
}

impl UploadError {
    /// Field-scoped message for the photo input.
    pub fn user_message(&self) -> String {
        match self {
            UploadError::NotADataUrl | UploadError::BadEncoding(_) => {
                "The selected file could not be read".to_string()
            }
            UploadError::UnsupportedType(_) => "Photo must be a JPEG, PNG or WebP image".to_string(),
            UploadError::TooLarge(_) => {
                format!("Photo must be smaller than {} MB", MAX_IMAGE_BYTES / (1024 * 1024))
            }
            UploadError::NotConfigured => "Photo uploads are not available right now".to_string(),
            UploadError::Transport(_) | UploadError::Rejected(_) => {
                "Photo upload failed, please try again".to_string()
            }
        }
    }
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::NotADataUrl => write!(f, "Upload is not a base64 data URL"),
            UploadError::BadEncoding(e) => write!(f, "Upload base64 decode error: {e}"),
            UploadError::UnsupportedType(t) => write!(f, "Unsupported upload type: {t}"),
            UploadError::TooLarge(n) => write!(f, "Upload too large: {n} bytes"),
            UploadError::NotConfigured => write!(f, "Uploads are not configured"),
            UploadError::Transport(e) => write!(f, "Upload transport error: {e}"),
            UploadError::Rejected(msg) => write!(f, "Upload rejected: {msg}"),
        }
    }
}

impl std::error::Error for UploadError {}

impl From<reqwest::Error> for UploadError {
    fn from(e: reqwest::Error) -> Self {
        UploadError::Transport(e)
    }
}

/// A decoded image ready to upload.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    /// Decode `data:<mime>;base64,<payload>`.
    pub fn from_data_url(data_url: &str) -> Result<Self, UploadError> {
        let rest = data_url
            .trim()
            .strip_prefix("data:")
            .ok_or(UploadError::NotADataUrl)?;
        let (meta, payload) = rest.split_once(',').ok_or(UploadError::NotADataUrl)?;
        let content_type = meta
            .strip_suffix(";base64")
            .ok_or(UploadError::NotADataUrl)?
            .to_ascii_lowercase();
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| UploadError::BadEncoding(e.to_string()))?;
        Ok(Self { content_type, bytes })
    }

    /// Enforce the allowed types and the size cap.
    pub fn check(&self) -> Result<(), UploadError> {
        if !ALLOWED_TYPES.contains(&self.content_type.as_str()) {
            return Err(UploadError::UnsupportedType(self.content_type.clone()));
        }
        if self.bytes.len() > MAX_IMAGE_BYTES {
            return Err(UploadError::TooLarge(self.bytes.len()));
        }
        Ok(())
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.content_type, STANDARD.encode(&self.bytes))
    }
}

#[async_trait]
pub trait Uploader: Send + Sync {
    /// Store the image and return its public URL.
    async fn upload(&self, file: &ImageFile) -> Result<String, UploadError>;
}

/// Decode, check and upload a browser data URL in one step.
pub async fn upload_data_url(uploader: &dyn Uploader, data_url: &str) -> Result<String, UploadError> {
    let file = ImageFile::from_data_url(data_url)?;
    file.check()?;
    uploader.upload(&file).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_data_url() {
        let file = ImageFile::from_data_url("data:image/PNG;base64,aGVsbG8=").unwrap();
        assert_eq!(file.content_type, "image/png");
        assert_eq!(file.bytes, b"hello");
        assert!(file.check().is_ok());
        assert_eq!(file.to_data_url(), "data:image/png;base64,aGVsbG8=");
    }

    #[test]
    fn test_rejects_malformed_urls() {
        assert!(matches!(ImageFile::from_data_url("hello"), Err(UploadError::NotADataUrl)));
        assert!(matches!(
            ImageFile::from_data_url("data:image/png,plain"),
            Err(UploadError::NotADataUrl)
        ));
        assert!(matches!(
            ImageFile::from_data_url("data:image/png;base64,!!!"),
            Err(UploadError::BadEncoding(_))
        ));
    }

    #[test]
    fn test_check_type_and_size() {
        let gif = ImageFile { content_type: "image/gif".into(), bytes: vec![0; 10] };
        assert!(matches!(gif.check(), Err(UploadError::UnsupportedType(_))));

        let big = ImageFile { content_type: "image/jpeg".into(), bytes: vec![0; MAX_IMAGE_BYTES + 1] };
        let err = big.check().unwrap_err();
        assert!(matches!(err, UploadError::TooLarge(_)));
        assert_eq!(err.user_message(), "Photo must be smaller than 5 MB");
    }

    #[tokio::test]
    async fn test_upload_data_url_checks_before_upload() {
        let uploader = MemoryUploader::default();
        let err = upload_data_url(&uploader, "data:text/plain;base64,aGVsbG8=")
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedType(_)));
        assert_eq!(uploader.uploaded().len(), 0);

        let url = upload_data_url(&uploader, "data:image/jpeg;base64,aGVsbG8=")
            .await
            .unwrap();
        assert_eq!(url, "memory://uploads/1.jpeg");
        assert_eq!(uploader.uploaded().len(), 1);
    }
}
