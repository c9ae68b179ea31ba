//! Notifications service.

use chirp_shared::{ApiError, Notification};

use super::ApiClient;

#[derive(Debug, Clone)]
pub struct NotificationsApi {
    client: ApiClient,
}

impl NotificationsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, limit: u32) -> Result<Vec<Notification>, ApiError> {
        self.client.get_json(&format!("?limit={limit}")).await
    }

    pub async fn mark_read(&self, notification_id: &str) -> Result<(), ApiError> {
        self.client.post_empty(&format!("/{notification_id}/read")).await
    }

    pub async fn mark_all_read(&self) -> Result<(), ApiError> {
        self.client.post_empty("/read-all").await
    }
}
