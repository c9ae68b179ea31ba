//! Chat service REST surface, plus the polling-transport endpoints used
//! when the realtime channel falls back from streaming.

use chirp_shared::{
    ApiError, ChatMessage, ChatRoom, ClientEvent, CreateRoomRequest, EventBatch, Frame,
    SendMessageRequest,
};

use super::ApiClient;

#[derive(Debug, Clone)]
pub struct ChatApi {
    client: ApiClient,
}

impl ChatApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Find or create the room for a set of participants. The backend
    /// returns the existing room when one already exists.
    pub async fn find_or_create_room(
        &self,
        participant_ids: Vec<String>,
    ) -> Result<ChatRoom, ApiError> {
        let body = CreateRoomRequest { participant_ids };
        self.client.post_json("/rooms", &body).await
    }

    /// Message history for a room, most recent first.
    pub async fn history(&self, room_id: &str, limit: u32) -> Result<Vec<ChatMessage>, ApiError> {
        self.client
            .get_json(&format!("/rooms/{room_id}/messages?limit={limit}"))
            .await
    }

    pub async fn send(&self, room_id: &str, content: &str) -> Result<ChatMessage, ApiError> {
        let body = SendMessageRequest {
            content: content.to_string(),
        };
        self.client
            .post_json(&format!("/rooms/{room_id}/messages"), &body)
            .await
    }

    /// Drain queued pushes (polling transport).
    pub async fn poll_events(&self, since: Option<&str>) -> Result<EventBatch, ApiError> {
        let path = match since {
            Some(cursor) => format!("/events?since={}", urlencoding::encode(cursor)),
            None => "/events".to_string(),
        };
        self.client.get_json(&path).await
    }

    /// Submit a client event (polling transport).
    pub async fn push_event(&self, frame: &Frame<ClientEvent>) -> Result<(), ApiError> {
        self.client.post_json_empty("/events", frame).await
    }
}
