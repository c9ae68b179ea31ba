//! Per-service endpoint configuration.
//!
//! Each backend domain is its own microservice, so the client carries one
//! base URL per service. Defaults point at the local development ports;
//! overrides persist across reloads.

use serde::{Deserialize, Serialize};

use crate::storage;

const STORAGE_KEY: &str = "chirp_endpoints";

/// The backend services this client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Auth,
    Users,
    Posts,
    Chat,
    Social,
    Media,
    Comments,
    Notifications,
}

/// Base URLs for every backend service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceEndpoints {
    pub auth: String,
    pub users: String,
    pub posts: String,
    pub chat: String,
    pub social: String,
    pub media: String,
    pub comments: String,
    pub notifications: String,
}

impl Default for ServiceEndpoints {
    fn default() -> Self {
        Self {
            auth: "http://localhost:3001/api/v1/auth".into(),
            users: "http://localhost:3001/api/v1/users".into(),
            posts: "http://localhost:3002/api/v1/posts".into(),
            chat: "http://localhost:3003/api/v1/chat".into(),
            social: "http://localhost:3004/api/v1".into(),
            media: "http://localhost:3005/api/v1/media".into(),
            comments: "http://localhost:3006/api/v1/comments".into(),
            notifications: "http://localhost:3007/api/v1/notifications".into(),
        }
    }
}

impl ServiceEndpoints {
    /// Load persisted endpoints, falling back to the defaults.
    pub fn load() -> Self {
        storage::load(STORAGE_KEY).unwrap_or_default()
    }

    /// Persist the current endpoints.
    pub fn persist(&self) -> bool {
        storage::save(STORAGE_KEY, self)
    }

    pub fn base(&self, service: Service) -> &str {
        match service {
            Service::Auth => &self.auth,
            Service::Users => &self.users,
            Service::Posts => &self.posts,
            Service::Chat => &self.chat,
            Service::Social => &self.social,
            Service::Media => &self.media,
            Service::Comments => &self.comments,
            Service::Notifications => &self.notifications,
        }
    }

    /// WebSocket URL for the chat service's realtime endpoint.
    pub fn chat_ws_url(&self) -> String {
        format!("{}/ws", http_to_ws(self.chat.trim_end_matches('/')))
    }
}

/// Map an http(s) URL onto its ws(s) counterpart.
fn http_to_ws(url: &str) -> String {
    if let Some(rest) = url.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = url.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ports_per_service() {
        let endpoints = ServiceEndpoints::default();
        assert!(endpoints.base(Service::Auth).contains(":3001"));
        assert!(endpoints.base(Service::Posts).contains(":3002"));
        assert!(endpoints.base(Service::Comments).contains(":3006"));
        assert!(endpoints.base(Service::Notifications).contains(":3007"));
    }

    #[test]
    fn ws_url_derived_from_chat_base() {
        let endpoints = ServiceEndpoints::default();
        assert_eq!(
            endpoints.chat_ws_url(),
            "ws://localhost:3003/api/v1/chat/ws"
        );

        let secure = ServiceEndpoints {
            chat: "https://chat.example.com/api/v1/chat/".into(),
            ..ServiceEndpoints::default()
        };
        assert_eq!(
            secure.chat_ws_url(),
            "wss://chat.example.com/api/v1/chat/ws"
        );
    }
}
