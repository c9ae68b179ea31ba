//! Navigation sidebar for authenticated pages.

use dioxus::logger::tracing;
use dioxus::prelude::*;

use super::avatar_url;
use crate::realtime::ChatContext;
use crate::session::SessionContext;
use crate::state::NotificationState;
use crate::Route;

struct NavItem {
    route: Route,
    label: &'static str,
    icon: &'static str,
}

const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        route: Route::Home {},
        label: "Home",
        icon: "M3 12l2-2m0 0l7-7 7 7M5 10v10a1 1 0 001 1h3m10-11l2 2m-2-2v10a1 1 0 01-1 1h-3m-6 0a1 1 0 001-1v-4a1 1 0 011-1h2a1 1 0 011 1v4a1 1 0 001 1m-6 0h6",
    },
    NavItem {
        route: Route::Explore {},
        label: "Explore",
        icon: "M21 21l-6-6m2-5a7 7 0 11-14 0 7 7 0 0114 0z",
    },
    NavItem {
        route: Route::Compose {},
        label: "Create",
        icon: "M12 9v3m0 0v3m0-3h3m-3 0H9m12 0a9 9 0 11-18 0 9 9 0 0118 0z",
    },
    NavItem {
        route: Route::Messages {},
        label: "Messages",
        icon: "M8 12h.01M12 12h.01M16 12h.01M21 12c0 4.418-4.03 8-9 8a9.863 9.863 0 01-4.255-.949L3 20l1.395-3.72C3.512 15.042 3 13.574 3 12c0-4.418 4.03-8 9-8s9 3.582 9 8z",
    },
    NavItem {
        route: Route::Notifications {},
        label: "Notifications",
        icon: "M15 17h5l-1.405-1.405A2.032 2.032 0 0118 14.158V11a6.002 6.002 0 00-4-5.659V5a2 2 0 10-4 0v.341C7.67 6.165 6 8.388 6 11v3.159c0 .538-.214 1.055-.595 1.436L4 17h5m6 0v1a3 3 0 11-6 0v-1m6 0H9",
    },
    NavItem {
        route: Route::Profile {},
        label: "Profile",
        icon: "M16 7a4 4 0 11-8 0 4 4 0 018 0zM12 14a7 7 0 00-7 7h14a7 7 0 00-7-7z",
    },
];

#[component]
pub fn Sidebar() -> Element {
    let mut session = use_context::<SessionContext>();
    let mut chat = use_context::<ChatContext>();
    let mut notifications = use_context::<NotificationState>();
    let nav = use_navigator();
    let route = use_route::<Route>();

    let unread = notifications.unread_count();
    let user = session.current_user();

    // Initial notification fetch, shared by the badge and the
    // notifications page. Failures only log.
    use_future(move || async move {
        let mut notifications = notifications;
        if !session.is_authenticated() || *notifications.loaded.peek() {
            return;
        }
        match session.notifications().list(50).await {
            Ok(items) => notifications.set_all(items),
            Err(e) => tracing::warn!("failed to fetch notifications: {}", e),
        }
    });

    let log_out = move |_| {
        chat.disconnect();
        notifications.clear();
        session.log_out();
        nav.push(Route::Login {});
    };

    rsx! {
        aside { class: "fixed left-0 top-0 h-screen w-64 border-r border-gray-200 bg-white flex flex-col",
            div { class: "p-6",
                span { class: "text-xl font-bold text-gray-900", "Chirp" }
            }

            nav { class: "flex-1 px-4",
                ul { class: "space-y-2",
                    for item in NAV_ITEMS.iter() {
                        li { key: "{item.label}",
                            Link {
                                to: item.route.clone(),
                                class: format!(
                                    "flex items-center gap-4 px-4 py-3 rounded-xl transition {}",
                                    if route == item.route {
                                        "bg-blue-50 text-blue-600"
                                    } else {
                                        "text-gray-700 hover:bg-gray-50"
                                    },
                                ),
                                div { class: "relative",
                                    svg {
                                        class: "w-6 h-6",
                                        fill: "none",
                                        stroke: "currentColor",
                                        view_box: "0 0 24 24",
                                        path {
                                            stroke_linecap: "round",
                                            stroke_linejoin: "round",
                                            stroke_width: "2",
                                            d: "{item.icon}",
                                        }
                                    }
                                    if item.label == "Notifications" && unread > 0 {
                                        span { class: "absolute -top-2 -right-2 bg-red-500 text-white text-xs rounded-full w-5 h-5 flex items-center justify-center",
                                            if unread > 9 { "9+" } else { "{unread}" }
                                        }
                                    }
                                }
                                span { class: "font-medium", "{item.label}" }
                            }
                        }
                    }
                }
            }

            if let Some(user) = user {
                div { class: "p-4 border-t border-gray-200",
                    div { class: "flex items-center gap-3 mb-3 px-2",
                        img {
                            class: "w-10 h-10 rounded-full",
                            src: avatar_url(user.avatar.as_deref(), &user.username),
                            alt: "{user.username}",
                        }
                        div { class: "flex-1 min-w-0",
                            p { class: "font-medium text-sm text-gray-900 truncate",
                                "{user.display_name()}"
                            }
                            p { class: "text-xs text-gray-500 truncate", "@{user.username}" }
                        }
                    }
                    button {
                        class: "w-full flex items-center gap-3 px-4 py-3 rounded-xl text-gray-700 hover:bg-red-50 hover:text-red-600 transition",
                        onclick: log_out,
                        svg {
                            class: "w-5 h-5",
                            fill: "none",
                            stroke: "currentColor",
                            view_box: "0 0 24 24",
                            path {
                                stroke_linecap: "round",
                                stroke_linejoin: "round",
                                stroke_width: "2",
                                d: "M17 16l4-4m0 0l-4-4m4 4H7m6 4v1a3 3 0 01-3 3H6a3 3 0 01-3-3V7a3 3 0 013-3h4a3 3 0 013 3v1",
                            }
                        }
                        span { class: "font-medium", "Logout" }
                    }
                }
            }
        }
    }
}
