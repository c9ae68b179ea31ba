//! Two-pane direct messaging view.
//!
//! The left pane lists followed users; selecting one drives the
//! [`Conversation`] state machine through room resolution into the active
//! room, with realtime pushes merged in as they arrive.

use chirp_shared::{ServerPush, User};
use chrono::{Local, Utc};
use dioxus::logger::tracing;
use dioxus::prelude::*;

use crate::chat::{Conversation, ConversationPhase, TYPING_VISIBLE_MS};
use crate::components::avatar_url;
use crate::platform::{self, sleep_ms};
use crate::realtime::{ChatContext, ConnectionState};
use crate::session::SessionContext;

#[component]
pub fn Messages() -> Element {
    let session = use_context::<SessionContext>();
    let chat = use_context::<ChatContext>();

    let mut conv = use_signal(Conversation::new);
    let mut following = use_signal(Vec::<User>::new);
    let mut loading_following = use_signal(|| true);
    let mut draft = use_signal(String::new);
    let mut sending = use_signal(|| false);

    let self_id = session.user_id().unwrap_or_default();

    // Open the realtime channel for this session. Idempotent, so the
    // effect re-running on session changes is harmless; identification is
    // handled by the provider once the transport reports Connected.
    use_effect(move || {
        let mut chat = chat;
        let endpoints = session.endpoints.read().clone();
        if let Some(active) = session.session.read().clone() {
            chat.connect(&endpoints, &active);
        }
    });

    // Tear the channel down with the view, like the page it was ported
    // from. In-flight requests are not cancelled; their completions are
    // discarded by the generation guard.
    use_drop(move || {
        let mut chat = chat;
        let mut conv = conv;
        if let Some(room) = conv.write().clear() {
            chat.leave_room(&room);
        }
        chat.disconnect();
    });

    // Fetch the peers we can message.
    use_future(move || async move {
        let Some(user_id) = session.user_id() else {
            loading_following.set(false);
            return;
        };
        match session.social().following(&user_id).await {
            Ok(users) => following.set(users),
            Err(e) => tracing::warn!("failed to fetch following list: {}", e),
        }
        loading_following.set(false);
    });

    // Merge realtime pushes into the conversation.
    use_effect(move || {
        let pushes = {
            let mut chat = chat;
            chat.drain_inbox()
        };
        if pushes.is_empty() {
            return;
        }
        let self_id = session
            .session
            .peek()
            .as_ref()
            .map(|s| s.user.id.clone())
            .unwrap_or_default();
        let now_ms = Utc::now().timestamp_millis();
        for push in pushes {
            match push {
                ServerPush::NewMessage { message } => {
                    conv.write().accept_push(&message);
                }
                ServerPush::UserTyping { user_id, room_id } => {
                    if conv.write().note_typing(&room_id, &user_id, &self_id, now_ms) {
                        // Sweep the flag once this event's deadline passes;
                        // a newer event re-arms its own sweep.
                        spawn(async move {
                            let mut conv = conv;
                            sleep_ms(TYPING_VISIBLE_MS as u32 + 100).await;
                            let now = Utc::now().timestamp_millis();
                            if !conv.peek().typing_visible(now) {
                                conv.write().refresh_typing(now);
                            }
                        });
                    }
                }
                _ => {}
            }
        }
    });

    // Select a peer: leave the current room, resolve the new one, load
    // history, join. Completions landing after another selection are
    // dropped.
    let mut select_peer = move |peer: User| {
        let outcome = conv.write().select_peer(peer.clone());
        if let Some(old_room) = outcome.leave_room.clone() {
            let mut chat = chat;
            chat.leave_room(&old_room);
        }

        let api = session.chat();
        let self_id = session.user_id().unwrap_or_default();
        spawn(async move {
            let mut conv = conv;
            let mut chat = chat;
            let result = async {
                let room = api
                    .find_or_create_room(vec![self_id, peer.id.clone()])
                    .await?;
                let history = api.history(&room.id, 50).await?;
                Ok::<_, chirp_shared::ApiError>((room, history))
            }
            .await;

            match result {
                Ok((room, history)) => {
                    if conv.write().room_ready(outcome.generation, room.id.clone(), history) {
                        chat.join_room(room.id);
                    }
                }
                Err(e) => {
                    if conv.peek().generation() == outcome.generation {
                        conv.write().clear();
                        platform::alert(&format!("Failed to open conversation: {e}"));
                    }
                }
            }
        });
    };

    // Optimistic send with reconciliation.
    let send_message = move |e: Event<FormData>| {
        e.prevent_default();
        let content = draft.peek().trim().to_string();
        if content.is_empty() || sending() {
            return;
        }
        let self_id = session.user_id().unwrap_or_default();

        let Some(provisional) = conv.write().begin_send(&self_id, &content, Utc::now()) else {
            return;
        };
        let Some(room_id) = conv.peek().room_id().map(str::to_string) else {
            return;
        };
        let generation = conv.peek().generation();
        draft.set(String::new());
        sending.set(true);

        let api = session.chat();
        spawn(async move {
            let mut conv = conv;
            match api.send(&room_id, &content).await {
                Ok(confirmed) => {
                    if conv.peek().generation() == generation {
                        conv.write().confirm_send(&provisional.id, confirmed);
                    }
                }
                Err(e) => {
                    if conv.peek().generation() == generation {
                        conv.write().fail_send(&provisional.id);
                    }
                    platform::alert(&format!("Failed to send message: {e}"));
                }
            }
            sending.set(false);
        });
    };

    let on_input = move |e: Event<FormData>| {
        draft.set(e.value());
        let room = conv.peek().room_id().map(str::to_string);
        if let (Some(room_id), Some(user_id)) = (room, session.user_id()) {
            chat.send_typing(&room_id, &user_id);
        }
    };

    let connection = chat.state.read().clone();
    let conversation = conv.read();
    let selected_peer = conversation.peer().cloned();
    let phase = conversation.phase();
    let typing = conversation.typing_visible(Utc::now().timestamp_millis());

    rsx! {
        div { class: "flex h-screen bg-white",
            // Following list
            div { class: "w-80 border-r border-gray-200 flex flex-col",
                div { class: "p-4 border-b border-gray-200 flex items-center justify-between",
                    h2 { class: "text-xl font-bold text-gray-900", "Messages" }
                    ConnectionBadge { state: connection.clone() }
                }

                if loading_following() {
                    div { class: "flex items-center justify-center p-8",
                        p { class: "text-gray-500", "Loading..." }
                    }
                } else if following.read().is_empty() {
                    div { class: "flex flex-col items-center justify-center p-8",
                        p { class: "text-gray-500 text-center",
                            "You're not following anyone yet. Follow people to start messaging!"
                        }
                    }
                } else {
                    div { class: "flex-1 overflow-y-auto",
                        for user in following.read().iter().cloned() {
                            {
                                let is_selected = selected_peer
                                    .as_ref()
                                    .is_some_and(|peer| peer.id == user.id);
                                let is_online = chat.is_online(&user.id);
                                let user_for_click = user.clone();
                                rsx! {
                                    button {
                                        key: "{user.id}",
                                        class: format!(
                                            "w-full flex items-center gap-3 p-4 hover:bg-gray-50 transition {}",
                                            if is_selected { "bg-blue-50" } else { "" },
                                        ),
                                        onclick: move |_| select_peer(user_for_click.clone()),
                                        div { class: "relative",
                                            img {
                                                class: "w-12 h-12 rounded-full",
                                                src: avatar_url(user.avatar.as_deref(), &user.username),
                                                alt: "{user.username}",
                                            }
                                            if is_online {
                                                span { class: "absolute bottom-0 right-0 w-3 h-3 bg-green-500 border-2 border-white rounded-full" }
                                            }
                                        }
                                        div { class: "flex-1 text-left",
                                            p { class: "font-medium text-gray-900", "{user.display_name()}" }
                                            p { class: "text-sm text-gray-500", "@{user.username}" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            // Chat area
            div { class: "flex-1 flex flex-col",
                if let Some(peer) = selected_peer.as_ref() {
                    div { class: "p-4 border-b border-gray-200 flex items-center gap-3",
                        img {
                            class: "w-10 h-10 rounded-full",
                            src: avatar_url(peer.avatar.as_deref(), &peer.username),
                            alt: "{peer.username}",
                        }
                        div {
                            p { class: "font-semibold text-gray-900", "{peer.display_name()}" }
                            p { class: "text-sm text-gray-500",
                                if chat.is_online(&peer.id) { "online" } else { "@{peer.username}" }
                            }
                        }
                    }

                    if phase == ConversationPhase::RoomResolving {
                        div { class: "flex-1 flex items-center justify-center",
                            div { class: "animate-spin rounded-full h-8 w-8 border-b-2 border-blue-600" }
                        }
                    } else {
                        div {
                            id: "chat-scroll",
                            class: "flex-1 overflow-y-auto p-4 space-y-4 flex flex-col",
                            if conversation.messages().is_empty() {
                                div { class: "flex items-center justify-center h-full",
                                    p { class: "text-gray-500", "No messages yet. Start the conversation!" }
                                }
                            } else {
                                for message in conversation.messages().iter() {
                                    {
                                        let own = message.sender_id == self_id;
                                        let provisional = Conversation::is_provisional(&message.id);
                                        let time = message
                                            .created_at
                                            .with_timezone(&Local)
                                            .format("%H:%M")
                                            .to_string();
                                        rsx! {
                                            div {
                                                key: "{message.id}",
                                                class: if own { "flex justify-end" } else { "flex justify-start" },
                                                div {
                                                    class: format!(
                                                        "max-w-xs px-4 py-2 rounded-2xl {} {}",
                                                        if own {
                                                            "bg-blue-600 text-white"
                                                        } else {
                                                            "bg-gray-100 text-gray-900"
                                                        },
                                                        if provisional { "opacity-60" } else { "" },
                                                    ),
                                                    p { "{message.content}" }
                                                    p { class: "text-xs opacity-70 mt-1", "{time}" }
                                                }
                                            }
                                        }
                                    }
                                }
                                if typing {
                                    div { class: "flex justify-start",
                                        div { class: "bg-gray-100 text-gray-900 px-4 py-2 rounded-2xl",
                                            p { class: "text-sm italic", "typing..." }
                                        }
                                    }
                                }
                            }
                        }

                        form { onsubmit: send_message, class: "p-4 border-t border-gray-200",
                            div { class: "flex gap-2",
                                input {
                                    class: "flex-1 px-4 py-2 border border-gray-300 rounded-full focus:outline-none focus:border-blue-600",
                                    r#type: "text",
                                    placeholder: "Type a message...",
                                    value: "{draft}",
                                    oninput: on_input,
                                }
                                button {
                                    r#type: "submit",
                                    disabled: sending() || draft.read().trim().is_empty(),
                                    class: "px-6 py-2 bg-blue-600 text-white rounded-full hover:bg-blue-700 disabled:opacity-50 disabled:cursor-not-allowed transition",
                                    svg {
                                        class: "w-5 h-5",
                                        fill: "none",
                                        stroke: "currentColor",
                                        view_box: "0 0 24 24",
                                        path {
                                            stroke_linecap: "round",
                                            stroke_linejoin: "round",
                                            stroke_width: "2",
                                            d: "M12 19l9 2-9-18-9 18 9-2zm0 0v-8",
                                        }
                                    }
                                }
                            }
                        }
                    }
                } else {
                    div { class: "flex items-center justify-center h-full",
                        p { class: "text-gray-500", "Select a user to start messaging" }
                    }
                }
            }
        }
    }
}

/// Small indicator for a degraded or recovering realtime channel.
#[component]
fn ConnectionBadge(state: ConnectionState) -> Element {
    let (label, classes) = match &state {
        ConnectionState::Authenticated => return rsx! {},
        ConnectionState::Connected | ConnectionState::Connecting => {
            ("connecting…", "bg-yellow-100 text-yellow-700")
        }
        ConnectionState::Reconnecting { .. } => ("reconnecting…", "bg-yellow-100 text-yellow-700"),
        ConnectionState::Polling => ("degraded", "bg-orange-100 text-orange-700"),
        ConnectionState::Disconnected => ("offline", "bg-gray-100 text-gray-600"),
        ConnectionState::Failed { .. } => ("offline", "bg-red-100 text-red-700"),
    };
    rsx! {
        span { class: "text-xs px-2 py-1 rounded-full {classes}", "{label}" }
    }
}
