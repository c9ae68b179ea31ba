//! Realtime chat event protocol.
//!
//! Events are JSON frames tagged by `event` with the payload under `data`.
//! Tags use snake_case to match the chat service's wire names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ChatMessage;

/// Wire frame wrapping a client or server event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame<T> {
    pub id: String,
    #[serde(flatten)]
    pub payload: T,
    pub ts: DateTime<Utc>,
}

impl<T> Frame<T> {
    pub fn new(payload: T) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            payload,
            ts: Utc::now(),
        }
    }
}

/// Events the client emits on the realtime channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    Authenticate {
        user_id: String,
    },
    JoinRoom {
        room_id: String,
    },
    LeaveRoom {
        room_id: String,
    },
    Typing {
        room_id: String,
        user_id: String,
    },
}

/// Events the chat service pushes to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerPush {
    NewMessage {
        message: ChatMessage,
    },
    UserTyping {
        user_id: String,
        room_id: String,
    },
    UserOnline {
        user_id: String,
    },
    UserOffline {
        user_id: String,
    },
    /// Handshake reply to [`ClientEvent::Authenticate`].
    AuthAck {
        user_id: String,
    },
    /// Handshake reply to [`ClientEvent::JoinRoom`].
    RoomJoined {
        room_id: String,
    },
}

/// Payload of the polling-transport drain endpoint (`GET /events`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBatch {
    #[serde(default)]
    pub events: Vec<Frame<ServerPush>>,
    /// Cursor to pass as `since` on the next poll.
    pub cursor: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_event_tags_are_snake_case() {
        let json = serde_json::to_value(ClientEvent::JoinRoom {
            room_id: "r1".into(),
        })
        .unwrap();
        assert_eq!(json["event"], "join_room");
        assert_eq!(json["data"]["room_id"], "r1");
    }

    #[test]
    fn new_message_push_wraps_the_message() {
        let body = r#"{
            "event": "new_message",
            "data": {"message": {"id": "m1", "senderId": "a", "receiverId": "b",
                     "content": "hey", "createdAt": "2025-11-04T10:00:00Z"}}
        }"#;
        let push: ServerPush = serde_json::from_str(body).unwrap();
        match push {
            ServerPush::NewMessage { message } => assert_eq!(message.content, "hey"),
            other => panic!("unexpected push: {other:?}"),
        }
    }

    #[test]
    fn frame_round_trips_with_flattened_payload() {
        let frame = Frame::new(ClientEvent::Typing {
            room_id: "r1".into(),
            user_id: "u1".into(),
        });
        let json = serde_json::to_string(&frame).unwrap();
        let back: Frame<ClientEvent> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.payload, frame.payload);
        assert_eq!(back.id, frame.id);
    }
}
