use async_trait::async_trait;
use serde::Deserialize;

use super::{ImageFile, UploadError, Uploader};

const CLOUDINARY_API: &str = "https://api.cloudinary.com";

/// Unsigned uploads to `POST {api}/v1_1/{cloud}/image/upload`.
#[derive(Clone)]
pub struct CloudinaryUploader {
    http: reqwest::Client,
    api_base: String,
    cloud_name: String,
    upload_preset: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    error: Option<ErrorBody>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl CloudinaryUploader {
    pub fn new(cloud_name: &str, upload_preset: &str) -> Self {
        Self::with_api_base(CLOUDINARY_API, cloud_name, upload_preset)
    }

    /// Point at a different API host (used by tests).
    pub fn with_api_base(api_base: &str, cloud_name: &str, upload_preset: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            cloud_name: cloud_name.to_string(),
            upload_preset: upload_preset.to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1_1/{}/image/upload", self.api_base, self.cloud_name)
    }
}

#[async_trait]
impl Uploader for CloudinaryUploader {
    async fn upload(&self, file: &ImageFile) -> Result<String, UploadError> {
        if self.cloud_name.is_empty() || self.upload_preset.is_empty() {
            return Err(UploadError::NotConfigured);
        }

        let data_url = file.to_data_url();
        let params = [
            ("file", data_url.as_str()),
            ("upload_preset", self.upload_preset.as_str()),
        ];
        let resp = self.http.post(self.endpoint()).form(&params).send().await?;
        let status = resp.status();
        let body: UploadResponse = resp
            .json()
            .await
            .map_err(|e| UploadError::Rejected(format!("unreadable response ({status}): {e}")))?;

        if let Some(err) = body.error {
            return Err(UploadError::Rejected(err.message));
        }
        if !status.is_success() {
            return Err(UploadError::Rejected(format!("status {status}")));
        }
        let url = body
            .secure_url
            .ok_or_else(|| UploadError::Rejected("response has no secure_url".to_string()))?;
        log::info!("Uploaded {} bytes to Cloudinary", file.bytes.len());
        Ok(url)
    }
}
