//! Comments service: threads under posts, with one level of replies.

use chirp_shared::{ApiError, Comment, CreateCommentRequest, Page};

use super::ApiClient;

#[derive(Debug, Clone)]
pub struct CommentsApi {
    client: ApiClient,
}

impl CommentsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Top-level comments on a post.
    pub async fn for_post(
        &self,
        post_id: &str,
        limit: u32,
        cursor: Option<&str>,
    ) -> Result<Page<Comment>, ApiError> {
        let mut path = format!("?postId={}&limit={limit}", urlencoding::encode(post_id));
        if let Some(cursor) = cursor {
            path.push_str(&format!("&cursor={}", urlencoding::encode(cursor)));
        }
        self.client.get_page(&path).await
    }

    /// Replies under one comment.
    pub async fn replies(&self, parent_id: &str, limit: u32) -> Result<Page<Comment>, ApiError> {
        let path = format!("?parentId={}&limit={limit}", urlencoding::encode(parent_id));
        self.client.get_page(&path).await
    }

    pub async fn create(&self, request: &CreateCommentRequest) -> Result<Comment, ApiError> {
        self.client.post_json("", request).await
    }

    pub async fn delete(&self, comment_id: &str) -> Result<(), ApiError> {
        self.client.delete(&format!("/{comment_id}")).await
    }

    pub async fn like(&self, comment_id: &str) -> Result<(), ApiError> {
        self.client.post_empty(&format!("/{comment_id}/like")).await
    }

    pub async fn unlike(&self, comment_id: &str) -> Result<(), ApiError> {
        self.client.delete(&format!("/{comment_id}/like")).await
    }
}
