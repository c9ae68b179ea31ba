//! HTTP API layer.
//!
//! [`ApiClient`] carries the envelope-aware request verbs; the submodules
//! wrap it with one thin typed surface per backend service.

mod client;

pub mod auth;
pub mod chat;
pub mod comments;
pub mod media;
pub mod notifications;
pub mod posts;
pub mod social;
pub mod users;

pub use auth::AuthApi;
pub use chat::ChatApi;
pub use client::ApiClient;
pub use comments::CommentsApi;
pub use media::MediaApi;
pub use notifications::NotificationsApi;
pub use posts::PostsApi;
pub use social::SocialApi;
pub use users::UsersApi;
