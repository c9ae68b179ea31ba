//! Connection ownership and event routing for the realtime channel.

use std::collections::HashSet;
use std::rc::Rc;

use chirp_shared::{ClientEvent, ServerPush};
use dioxus::logger::tracing;
use dioxus::prelude::*;

use super::connection::{ChatConnection, ConnectionState, ReconnectConfig};
use crate::api::{ApiClient, ChatApi};
use crate::config::{Service, ServiceEndpoints};
use crate::session::{Session, SessionContext};

/// Injectable handle on the realtime channel.
///
/// Owns at most one [`ChatConnection`] per authenticated session, plus the
/// stores its events feed: the presence map and the message/typing inbox.
#[derive(Clone, Copy)]
pub struct ChatContext {
    /// Observable transport state.
    pub state: SyncSignal<ConnectionState>,
    /// Queued message/typing pushes, drained by the messaging view.
    pub inbox: SyncSignal<Vec<ServerPush>>,
    /// User ids currently online, per presence pushes.
    pub online: SyncSignal<HashSet<String>>,
    /// The single room the client is subscribed to, if any.
    pub active_room: Signal<Option<String>>,
    connection: Signal<Option<Rc<ChatConnection>>>,
}

impl ChatContext {
    /// Open the channel for `session`. Idempotent: a live connection is
    /// kept as-is.
    pub fn connect(&mut self, endpoints: &ServiceEndpoints, session: &Session) {
        if self.connection.peek().is_some() {
            return;
        }

        let token = session.access_token.clone();
        let user_id = session.user.id.clone();
        let url = format!(
            "{}?token={}&userId={}",
            endpoints.chat_ws_url(),
            urlencoding::encode(&token),
            urlencoding::encode(&user_id),
        );
        let api = ChatApi::new(
            ApiClient::new(endpoints.base(Service::Chat)).with_token(Some(token)),
        );

        let (state, inbox, online) = (self.state, self.inbox, self.online);
        let on_push = move |push: ServerPush| {
            // Signals are Copy; rebind mutably so the closure stays `Fn`.
            let (mut state, mut inbox, mut online) = (state, inbox, online);
            match push {
                ServerPush::UserOnline { user_id } => {
                    online.write().insert(user_id);
                }
                ServerPush::UserOffline { user_id } => {
                    online.write().remove(&user_id);
                }
                ServerPush::AuthAck { user_id } => {
                    tracing::info!("chat session authorized for {}", user_id);
                    state.set(ConnectionState::Authenticated);
                }
                ServerPush::RoomJoined { room_id } => {
                    tracing::debug!("room membership confirmed: {}", room_id);
                }
                other => inbox.write().push(other),
            }
        };

        let connection = ChatConnection::new(url, api, self.state, on_push, ReconnectConfig::default());
        self.connection.set(Some(Rc::new(connection)));
    }

    /// Close the channel and drop every queued event. Idempotent.
    pub fn disconnect(&mut self) {
        {
            if let Some(connection) = self.connection.peek().as_ref() {
                connection.shutdown();
            }
        }
        self.connection.set(None);
        self.state.set(ConnectionState::Disconnected);
        self.inbox.write().clear();
        self.online.write().clear();
        self.active_room.set(None);
    }

    /// Identify this session on the channel. The server answers with
    /// `auth_ack`, which moves the state to `Authenticated`.
    pub fn authenticate(&self, user_id: &str) {
        self.send_event(ClientEvent::Authenticate {
            user_id: user_id.to_string(),
        });
    }

    /// Subscribe to a room, leaving the previously active one first.
    pub fn join_room(&mut self, room_id: String) {
        let previous = self.active_room.peek().clone();
        if previous.as_deref() == Some(room_id.as_str()) {
            return;
        }
        if let Some(old) = previous {
            self.send_event(ClientEvent::LeaveRoom { room_id: old });
        }
        self.send_event(ClientEvent::JoinRoom {
            room_id: room_id.clone(),
        });
        self.active_room.set(Some(room_id));
    }

    /// Unsubscribe from `room_id`. A no-op unless it is the active room.
    pub fn leave_room(&mut self, room_id: &str) {
        if self.active_room.peek().as_deref() != Some(room_id) {
            return;
        }
        self.send_event(ClientEvent::LeaveRoom {
            room_id: room_id.to_string(),
        });
        self.active_room.set(None);
    }

    /// Tell the room's other participant we are typing.
    pub fn send_typing(&self, room_id: &str, user_id: &str) {
        self.send_event(ClientEvent::Typing {
            room_id: room_id.to_string(),
            user_id: user_id.to_string(),
        });
    }

    /// Take everything queued on the inbox. Reads the signal first, so an
    /// effect calling this re-runs when new pushes arrive.
    pub fn drain_inbox(&mut self) -> Vec<ServerPush> {
        if self.inbox.read().is_empty() {
            return Vec::new();
        }
        std::mem::take(&mut *self.inbox.write())
    }

    pub fn is_online(&self, user_id: &str) -> bool {
        self.online.read().contains(user_id)
    }

    fn send_event(&self, event: ClientEvent) {
        let handle = self.connection.peek().as_ref().map(|c| c.handle());
        match handle {
            Some(handle) => {
                if let Err(e) = handle.send(event) {
                    tracing::warn!("{}", e);
                }
            }
            None => tracing::warn!("chat event dropped, no active connection"),
        }
    }
}

/// Provider component owning the realtime channel state.
#[component]
pub fn ChatProvider(children: Element) -> Element {
    let session = use_context::<SessionContext>();

    let state = use_signal_sync(|| ConnectionState::Disconnected);
    let inbox = use_signal_sync(Vec::new);
    let online = use_signal_sync(HashSet::new);
    let active_room = use_signal(|| None);
    let connection = use_signal(|| None);

    let chat = use_context_provider(|| ChatContext {
        state,
        inbox,
        online,
        active_room,
        connection,
    });

    // Identify ourselves every time the transport (re)connects.
    use_effect(move || {
        let connected = matches!(&*chat.state.read(), ConnectionState::Connected);
        if connected {
            if let Some(user_id) = session.user_id() {
                chat.authenticate(&user_id);
            }
        }
    });

    // Once authorized (again), re-subscribe to the room the user was in.
    use_effect(move || {
        let authorized = chat.state.read().is_authenticated();
        if authorized {
            let room = chat.active_room.peek().clone();
            if let Some(room_id) = room {
                chat.send_event(ClientEvent::JoinRoom { room_id });
            }
        }
    });

    children
}
