//! Posts service: feed reads and post mutations.

use chirp_shared::{ApiError, CreatePostRequest, Page, Post};

use super::ApiClient;

#[derive(Debug, Clone)]
pub struct PostsApi {
    client: ApiClient,
}

impl PostsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Cursor-paginated home feed, newest first.
    pub async fn feed(&self, limit: u32, cursor: Option<&str>) -> Result<Page<Post>, ApiError> {
        let mut path = format!("/feed?limit={limit}");
        if let Some(cursor) = cursor {
            path.push_str(&format!("&cursor={}", urlencoding::encode(cursor)));
        }
        self.client.get_page(&path).await
    }

    /// Recent posts across the network (explore).
    pub async fn recent(&self, limit: u32) -> Result<Page<Post>, ApiError> {
        self.client.get_page(&format!("?limit={limit}")).await
    }

    /// Posts authored by one user.
    pub async fn by_author(&self, author_id: &str, limit: u32) -> Result<Page<Post>, ApiError> {
        let path = format!("?authorId={}&limit={limit}", urlencoding::encode(author_id));
        self.client.get_page(&path).await
    }

    pub async fn create(&self, request: &CreatePostRequest) -> Result<Post, ApiError> {
        self.client.post_json("", request).await
    }

    pub async fn delete(&self, post_id: &str) -> Result<(), ApiError> {
        self.client.delete(&format!("/{post_id}")).await
    }

    pub async fn like(&self, post_id: &str) -> Result<(), ApiError> {
        self.client.post_empty(&format!("/{post_id}/like")).await
    }

    pub async fn unlike(&self, post_id: &str) -> Result<(), ApiError> {
        self.client.delete(&format!("/{post_id}/like")).await
    }
}
