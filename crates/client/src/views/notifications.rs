//! Notifications list with mark-read actions.

use chirp_shared::{Notification, NotificationKind};
use dioxus::logger::tracing;
use dioxus::prelude::*;

use crate::components::{avatar_url, format_relative};
use crate::platform;
use crate::session::SessionContext;
use crate::state::NotificationState;

fn notification_text(notification: &Notification) -> String {
    let actor_name = notification
        .actor
        .as_ref()
        .map(|actor| actor.display_name())
        .unwrap_or_else(|| "Someone".to_string());

    match notification.kind {
        NotificationKind::CommentOnPost => format!("{actor_name} commented on your post"),
        NotificationKind::ReplyOnComment => format!("{actor_name} replied to your comment"),
        NotificationKind::PostLiked => format!("{actor_name} liked your post"),
        NotificationKind::CommentLiked => format!("{actor_name} liked your comment"),
        NotificationKind::NewFollower => format!("{actor_name} started following you"),
    }
}

fn kind_icon(kind: NotificationKind) -> (&'static str, &'static str) {
    match kind {
        NotificationKind::PostLiked | NotificationKind::CommentLiked => (
            "text-red-500",
            "M4.318 6.318a4.5 4.5 0 000 6.364L12 20.364l7.682-7.682a4.5 4.5 0 00-6.364-6.364L12 7.636l-1.318-1.318a4.5 4.5 0 00-6.364 0z",
        ),
        NotificationKind::CommentOnPost | NotificationKind::ReplyOnComment => (
            "text-blue-500",
            "M8 12h.01M12 12h.01M16 12h.01M21 12c0 4.418-4.03 8-9 8a9.863 9.863 0 01-4.255-.949L3 20l1.395-3.72C3.512 15.042 3 13.574 3 12c0-4.418 4.03-8 9-8s9 3.582 9 8z",
        ),
        NotificationKind::NewFollower => (
            "text-green-500",
            "M18 9v3m0 0v3m0-3h3m-3 0h-3m-2-5a4 4 0 11-8 0 4 4 0 018 0zM3 20a6 6 0 0112 0v1H3v-1z",
        ),
    }
}

#[component]
pub fn Notifications() -> Element {
    let session = use_context::<SessionContext>();
    let mut store = use_context::<NotificationState>();
    let mut loading = use_signal(|| false);

    // Refresh on every visit, even though the sidebar already primed the
    // store at startup.
    use_future(move || async move {
        let mut store = store;
        loading.set(true);
        match session.notifications().list(50).await {
            Ok(items) => store.set_all(items),
            Err(e) => {
                tracing::warn!("failed to load notifications: {}", e);
                platform::alert(&format!("Failed to load notifications: {e}"));
            }
        }
        loading.set(false);
    });

    let unread = store.unread_count();

    let mark_read = move |notification_id: String| {
        let api = session.notifications();
        spawn(async move {
            let mut store = store;
            match api.mark_read(&notification_id).await {
                Ok(()) => store.mark_read(&notification_id),
                Err(e) => tracing::warn!("failed to mark notification read: {}", e),
            }
        });
    };

    let mark_all_read = move |_| {
        let api = session.notifications();
        spawn(async move {
            let mut store = store;
            match api.mark_all_read().await {
                Ok(()) => store.mark_all_read(),
                Err(e) => tracing::warn!("failed to mark all read: {}", e),
            }
        });
    };

    rsx! {
        div { class: "max-w-2xl mx-auto px-6 py-8",
            div { class: "flex items-center justify-between mb-8",
                div {
                    h1 { class: "text-3xl font-bold text-gray-900 mb-2",
                        "Notifications "
                        if unread > 0 {
                            span { class: "text-blue-600", "({unread})" }
                        }
                    }
                    p { class: "text-gray-600", "Stay updated with your activity" }
                }
                if unread > 0 {
                    button {
                        class: "px-4 py-2 text-sm text-blue-600 hover:bg-blue-50 rounded-lg transition",
                        onclick: mark_all_read,
                        "Mark all as read ({unread})"
                    }
                }
            }

            if loading() && !*store.loaded.read() {
                div { class: "flex items-center justify-center py-12",
                    div { class: "animate-spin rounded-full h-8 w-8 border-b-2 border-blue-600" }
                }
            } else if store.items.read().is_empty() {
                div { class: "text-center py-12 bg-white border border-gray-200 rounded-2xl",
                    p { class: "text-gray-500", "No notifications yet" }
                }
            } else {
                div { class: "space-y-3",
                    for notification in store.items.read().iter().cloned() {
                        {
                            let (icon_color, icon_path) = kind_icon(notification.kind);
                            let actor_username = notification
                                .actor
                                .as_ref()
                                .map(|a| a.username.clone())
                                .unwrap_or_else(|| "unknown".to_string());
                            let actor_avatar = avatar_url(
                                notification.actor.as_ref().and_then(|a| a.avatar.as_deref()),
                                &actor_username,
                            );
                            let text = notification_text(&notification);
                            let id_for_click = notification.id.clone();
                            let is_read = notification.is_read;
                            rsx! {
                                div {
                                    key: "{notification.id}",
                                    class: format!(
                                        "flex items-start gap-4 p-4 border rounded-2xl transition cursor-pointer {}",
                                        if is_read {
                                            "bg-white border-gray-200"
                                        } else {
                                            "bg-blue-50 border-blue-200 hover:bg-blue-100"
                                        },
                                    ),
                                    onclick: move |_| {
                                        if !is_read {
                                            mark_read(id_for_click.clone());
                                        }
                                    },
                                    div { class: "flex-shrink-0 w-12 h-12 rounded-full bg-gray-100 flex items-center justify-center",
                                        svg {
                                            class: "w-5 h-5 {icon_color}",
                                            fill: "none",
                                            stroke: "currentColor",
                                            view_box: "0 0 24 24",
                                            path {
                                                stroke_linecap: "round",
                                                stroke_linejoin: "round",
                                                stroke_width: "2",
                                                d: "{icon_path}",
                                            }
                                        }
                                    }
                                    div { class: "flex-1",
                                        div { class: "flex items-start justify-between",
                                            div { class: "flex items-center gap-2",
                                                img {
                                                    class: "w-8 h-8 rounded-full",
                                                    src: "{actor_avatar}",
                                                    alt: "{actor_username}",
                                                }
                                                div {
                                                    p { class: "text-gray-900", "{text}" }
                                                    p { class: "text-sm text-gray-500",
                                                        "{format_relative(notification.created_at)}"
                                                    }
                                                }
                                            }
                                            if !is_read {
                                                div { class: "w-2 h-2 bg-blue-600 rounded-full flex-shrink-0 mt-2" }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
