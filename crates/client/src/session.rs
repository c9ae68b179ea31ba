//! Authentication session management with persisted credentials.

use chirp_shared::{AuthPayload, User};
use dioxus::logger::tracing;
use dioxus::prelude::*;
use serde::{Deserialize, Serialize};

use crate::api::{
    ApiClient, AuthApi, ChatApi, CommentsApi, MediaApi, NotificationsApi, PostsApi, SocialApi,
    UsersApi,
};
use crate::config::{Service, ServiceEndpoints};
use crate::storage;

const SESSION_KEY: &str = "chirp_session";

/// Persisted session data.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub user: User,
    pub access_token: String,
    pub refresh_token: Option<String>,
}

/// Session context provided to the whole app.
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub session: Signal<Option<Session>>,
    pub endpoints: Signal<ServiceEndpoints>,
    /// Startup token validation in flight.
    pub validating: Signal<bool>,
}

/// Provider component that restores, persists and validates the session.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let session = use_signal(|| storage::load::<Session>(SESSION_KEY));
    let endpoints = use_signal(ServiceEndpoints::load);
    let validating = use_signal(|| false);

    let ctx = use_context_provider(|| SessionContext {
        session,
        endpoints,
        validating,
    });

    // Mirror the session into persistent storage.
    use_effect(move || match ctx.session.read().as_ref() {
        Some(session) => {
            storage::save(SESSION_KEY, session);
        }
        None => storage::remove(SESSION_KEY),
    });

    // Validate the restored token once at startup. A rejected token logs
    // the session out silently rather than surfacing an alert.
    use_future(move || async move {
        let mut ctx = ctx;
        if ctx.session.peek().is_none() {
            return;
        }
        ctx.validating.set(true);
        match ctx.users().me().await {
            Ok(user) => {
                let refreshed = ctx.session.peek().clone().map(|mut session| {
                    session.user = user;
                    session
                });
                ctx.session.set(refreshed);
            }
            Err(e) => {
                tracing::warn!("session validation failed, logging out: {}", e);
                ctx.log_out();
            }
        }
        ctx.validating.set(false);
    });

    children
}

impl SessionContext {
    /// Install a session from a successful login or registration.
    pub fn log_in(&mut self, payload: AuthPayload) {
        self.session.set(Some(Session {
            user: payload.user,
            access_token: payload.access_token,
            refresh_token: payload.refresh_token,
        }));
    }

    /// Drop the session and its persisted credentials.
    pub fn log_out(&mut self) {
        storage::remove(SESSION_KEY);
        self.session.set(None);
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_some()
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.read().as_ref().map(|s| s.user.clone())
    }

    pub fn user_id(&self) -> Option<String> {
        self.session.read().as_ref().map(|s| s.user.id.clone())
    }

    /// An [`ApiClient`] for one service, carrying the bearer token when a
    /// session is active.
    pub fn client(&self, service: Service) -> ApiClient {
        let base = self.endpoints.read().base(service).to_string();
        let token = self.session.read().as_ref().map(|s| s.access_token.clone());
        ApiClient::new(base).with_token(token)
    }

    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.client(Service::Auth))
    }

    pub fn users(&self) -> UsersApi {
        UsersApi::new(self.client(Service::Users))
    }

    pub fn posts(&self) -> PostsApi {
        PostsApi::new(self.client(Service::Posts))
    }

    pub fn comments(&self) -> CommentsApi {
        CommentsApi::new(self.client(Service::Comments))
    }

    pub fn social(&self) -> SocialApi {
        SocialApi::new(self.client(Service::Social))
    }

    pub fn notifications(&self) -> NotificationsApi {
        NotificationsApi::new(self.client(Service::Notifications))
    }

    pub fn media(&self) -> MediaApi {
        MediaApi::new(self.client(Service::Media))
    }

    pub fn chat(&self) -> ChatApi {
        ChatApi::new(self.client(Service::Chat))
    }
}
