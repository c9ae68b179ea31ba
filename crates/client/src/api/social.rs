//! Social service: the follow graph.

use chirp_shared::{ApiError, FollowStatus, User};

use super::ApiClient;

#[derive(Debug, Clone)]
pub struct SocialApi {
    client: ApiClient,
}

impl SocialApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn follow(&self, user_id: &str) -> Result<(), ApiError> {
        self.client.post_empty(&format!("/follow/{user_id}")).await
    }

    pub async fn unfollow(&self, user_id: &str) -> Result<(), ApiError> {
        self.client.delete(&format!("/follow/{user_id}")).await
    }

    /// Whether the current user follows `user_id`.
    pub async fn status(&self, user_id: &str) -> Result<FollowStatus, ApiError> {
        self.client.get_json(&format!("/follow/{user_id}/status")).await
    }

    /// Users that `user_id` follows.
    pub async fn following(&self, user_id: &str) -> Result<Vec<User>, ApiError> {
        self.client.get_json(&format!("/following/{user_id}")).await
    }

    /// Users that follow `user_id`.
    pub async fn followers(&self, user_id: &str) -> Result<Vec<User>, ApiError> {
        self.client.get_json(&format!("/followers/{user_id}")).await
    }
}
