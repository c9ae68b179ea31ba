//! Media service: binary uploads.

use chirp_shared::{ApiError, MediaUpload};
use reqwest::multipart::{Form, Part};

use super::ApiClient;

#[derive(Debug, Clone)]
pub struct MediaApi {
    client: ApiClient,
}

impl MediaApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Upload a file, returning its hosted URL.
    pub async fn upload(
        &self,
        file_name: &str,
        mime: &str,
        bytes: Vec<u8>,
    ) -> Result<MediaUpload, ApiError> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)
            .map_err(|e| ApiError::Unexpected(format!("invalid mime type: {e}")))?;
        let form = Form::new().part("file", part);
        self.client.post_multipart("/upload", form).await
    }
}
