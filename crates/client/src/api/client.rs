//! Envelope-aware HTTP client.

use chirp_shared::{ApiEnvelope, ApiError, Page, Pagination};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// HTTP client bound to one service's base URL, attaching the bearer token
/// when a session is active.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Attach a bearer token to every request.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    fn url(&self, path: &str) -> String {
        if path.is_empty() {
            return self.base_url.clone();
        }
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    fn authorize(&self, rb: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => rb.header("Authorization", format!("Bearer {token}")),
            None => rb,
        }
    }

    async fn body(resp: reqwest::Response) -> Result<String, ApiError> {
        let status = resp.status().as_u16();
        let is_success = resp.status().is_success();
        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("failed to read body: {e}")))?;
        if !is_success {
            return Err(ApiError::from_status(status, &text));
        }
        Ok(text)
    }

    /// GET, returning the envelope's `data`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let rb = self.authorize(self.client.get(self.url(path)));
        let resp = rb.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let text = Self::body(resp).await?;
        unwrap_data(&text)
    }

    /// GET a paginated list endpoint, returning items plus cursor info.
    pub async fn get_page<T: DeserializeOwned>(&self, path: &str) -> Result<Page<T>, ApiError> {
        let rb = self.authorize(self.client.get(self.url(path)));
        let resp = rb.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let text = Self::body(resp).await?;
        let (items, pagination) = unwrap_list(&text)?;
        let pagination = pagination.unwrap_or_default();
        Ok(Page {
            items,
            next_cursor: pagination.next_cursor,
            has_more: pagination.has_more,
        })
    }

    /// POST a JSON body, returning the envelope's `data`.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let rb = self.authorize(self.client.post(self.url(path))).json(body);
        let resp = rb.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let text = Self::body(resp).await?;
        unwrap_data(&text)
    }

    /// POST with no body, ignoring any returned payload.
    pub async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        let rb = self.authorize(self.client.post(self.url(path)));
        let resp = rb.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        Self::body(resp).await?;
        Ok(())
    }

    /// POST a JSON body, ignoring any returned payload.
    pub async fn post_json_empty<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let rb = self.authorize(self.client.post(self.url(path))).json(body);
        let resp = rb.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        Self::body(resp).await?;
        Ok(())
    }

    /// POST a multipart form, returning the envelope's `data`.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ApiError> {
        let rb = self.authorize(self.client.post(self.url(path))).multipart(form);
        let resp = rb.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let text = Self::body(resp).await?;
        unwrap_data(&text)
    }

    /// DELETE, ignoring any returned payload.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let rb = self.authorize(self.client.delete(self.url(path)));
        let resp = rb.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        Self::body(resp).await?;
        Ok(())
    }
}

/// Parse an envelope body and pull out `data`.
fn unwrap_data<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    let envelope: ApiEnvelope<T> =
        serde_json::from_str(text).map_err(|e| ApiError::Unexpected(e.to_string()))?;
    if !envelope.success {
        let message = envelope
            .error
            .unwrap_or_else(|| "request reported failure".to_string());
        return Err(ApiError::Unexpected(message));
    }
    envelope
        .data
        .ok_or_else(|| ApiError::Unexpected("envelope is missing data".to_string()))
}

/// Parse a list envelope body into items plus pagination.
fn unwrap_list<T: DeserializeOwned>(
    text: &str,
) -> Result<(Vec<T>, Option<Pagination>), ApiError> {
    let envelope: ApiEnvelope<Vec<T>> =
        serde_json::from_str(text).map_err(|e| ApiError::Unexpected(e.to_string()))?;
    if !envelope.success {
        let message = envelope
            .error
            .unwrap_or_else(|| "request reported failure".to_string());
        return Err(ApiError::Unexpected(message));
    }
    Ok((envelope.data.unwrap_or_default(), envelope.pagination))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chirp_shared::Post;

    #[test]
    fn unwrap_data_rejects_success_false() {
        let err = unwrap_data::<Post>(r#"{"success": false, "error": "nope"}"#).unwrap_err();
        assert_eq!(err, ApiError::Unexpected("nope".into()));
    }

    #[test]
    fn unwrap_data_rejects_missing_data() {
        let err = unwrap_data::<Post>(r#"{"success": true}"#).unwrap_err();
        assert!(matches!(err, ApiError::Unexpected(_)));
    }

    #[test]
    fn unwrap_list_tolerates_missing_pagination() {
        let (items, pagination) =
            unwrap_list::<Post>(r#"{"success": true, "data": []}"#).unwrap();
        assert!(items.is_empty());
        assert!(pagination.is_none());
    }

    #[test]
    fn url_joins_base_and_path() {
        let client = ApiClient::new("http://localhost:3002/api/v1/posts/");
        assert_eq!(client.url("/feed"), "http://localhost:3002/api/v1/posts/feed");
        assert_eq!(client.url(""), "http://localhost:3002/api/v1/posts/");
    }
}
