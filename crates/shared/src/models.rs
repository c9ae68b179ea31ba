//! Data models for the chirp backend services.
//!
//! Field names are camelCase on the wire; every response body is wrapped
//! in [`ApiEnvelope`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// --- Envelope ---

/// Standard response envelope used by every service.
///
/// Success responses carry `data`; failures carry `error`. List endpoints
/// additionally carry cursor `pagination`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default = "none", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

// `#[serde(default)]` alone requires `T: Default`; this does not.
fn none<T>() -> Option<T> {
    None
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// A page of items plus the cursor to fetch the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

// --- Identity ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub followers_count: u32,
    #[serde(default)]
    pub following_count: u32,
    #[serde(default)]
    pub posts_count: u32,
}

impl User {
    /// "First Last", falling back to the username when both are empty.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// Trimmed author record embedded in posts, comments and notifications.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub avatar: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
}

impl Author {
    pub fn display_name(&self) -> String {
        let full = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        );
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

// --- Auth ---

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Payload of a successful login or registration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: User,
}

// --- Posts ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub author_id: String,
    pub content: String,
    pub media_url: Option<String>,
    #[serde(default)]
    pub like_count: u32,
    #[serde(default)]
    pub comment_count: u32,
    #[serde(default)]
    pub is_liked: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    pub visibility: String,
}

// --- Comments ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub content: String,
    #[serde(default)]
    pub like_count: u32,
    #[serde(default)]
    pub reply_count: u32,
    #[serde(default)]
    pub is_liked: bool,
    #[serde(default)]
    pub parent_comment_id: Option<String>,
    #[serde(default)]
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub post_id: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

// --- Social graph ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FollowStatus {
    pub following: bool,
}

// --- Notifications ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    CommentOnPost,
    ReplyOnComment,
    PostLiked,
    CommentLiked,
    NewFollower,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub actor_id: String,
    #[serde(default)]
    pub post_id: Option<String>,
    #[serde(default)]
    pub comment_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<Author>,
}

// --- Media ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MediaUpload {
    pub url: String,
}

// --- Chat ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatRoom {
    pub id: String,
    pub participant_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub participant_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_success_with_pagination() {
        let body = r#"{
            "success": true,
            "data": [{"id": "p1", "authorId": "u1", "content": "hi",
                      "mediaUrl": null, "likeCount": 2, "commentCount": 0,
                      "isLiked": false, "createdAt": "2025-11-04T10:00:00Z"}],
            "pagination": {"nextCursor": "abc", "hasMore": true}
        }"#;
        let env: ApiEnvelope<Vec<Post>> = serde_json::from_str(body).unwrap();
        assert!(env.success);
        assert_eq!(env.data.as_ref().unwrap()[0].like_count, 2);
        let page = env.pagination.unwrap();
        assert_eq!(page.next_cursor.as_deref(), Some("abc"));
        assert!(page.has_more);
    }

    #[test]
    fn envelope_failure_carries_error() {
        let body = r#"{"success": false, "error": "Invalid credentials"}"#;
        let env: ApiEnvelope<AuthPayload> = serde_json::from_str(body).unwrap();
        assert!(!env.success);
        assert!(env.data.is_none());
        assert_eq!(env.error.as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn notification_kind_is_snake_case() {
        let body = r#"{
            "id": "n1", "userId": "u1", "actorId": "u2", "postId": "p1",
            "type": "post_liked", "title": "", "body": "", "isRead": false,
            "createdAt": "2025-11-04T10:00:00Z"
        }"#;
        let n: Notification = serde_json::from_str(body).unwrap();
        assert_eq!(n.kind, NotificationKind::PostLiked);
        assert!(!n.is_read);
    }

    #[test]
    fn display_name_falls_back_to_username() {
        let mut user: User = serde_json::from_str(
            r#"{"id": "u1", "username": "jdoe", "email": "j@d.e",
                "firstName": "Jane", "lastName": "Doe", "avatar": null}"#,
        )
        .unwrap();
        assert_eq!(user.display_name(), "Jane Doe");
        user.first_name.clear();
        user.last_name.clear();
        assert_eq!(user.display_name(), "jdoe");
    }
}
