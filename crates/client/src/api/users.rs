//! Users service: profile reads.

use chirp_shared::{ApiError, User};

use super::ApiClient;

#[derive(Debug, Clone)]
pub struct UsersApi {
    client: ApiClient,
}

impl UsersApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Validate the bearer token and fetch the current user's profile.
    pub async fn me(&self) -> Result<User, ApiError> {
        self.client.get_json("/me").await
    }

    pub async fn get(&self, user_id: &str) -> Result<User, ApiError> {
        self.client.get_json(&format!("/{user_id}")).await
    }
}
