use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{ImageFile, UploadError, Uploader};

/// Keeps uploads in memory and hands back `memory://uploads/{n}.{ext}` URLs.
#[derive(Clone, Default)]
pub struct MemoryUploader {
    files: Arc<Mutex<Vec<ImageFile>>>,
    fail_with: Option<String>,
}

impl MemoryUploader {
    /// An uploader whose every upload is rejected with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            files: Arc::default(),
            fail_with: Some(message.to_string()),
        }
    }

    pub fn uploaded(&self) -> Vec<ImageFile> {
        self.files.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl Uploader for MemoryUploader {
    async fn upload(&self, file: &ImageFile) -> Result<String, UploadError> {
        if let Some(msg) = &self.fail_with {
            return Err(UploadError::Rejected(msg.clone()));
        }
        let mut files = self.files.lock().unwrap_or_else(|e| e.into_inner());
        files.push(file.clone());
        let ext = file.content_type.rsplit('/').next().unwrap_or("bin");
        Ok(format!("memory://uploads/{}.{}", files.len(), ext))
    }
}
