//! Home feed.

use chirp_shared::Post;
use dioxus::logger::tracing;
use dioxus::prelude::*;

use crate::components::PostCard;
use crate::session::SessionContext;

async fn fetch_feed(
    session: SessionContext,
    mut posts: Signal<Vec<Post>>,
    mut error: Signal<Option<String>>,
) {
    match session.posts().feed(50, None).await {
        Ok(page) => {
            posts.set(page.items);
            error.set(None);
        }
        Err(e) => {
            tracing::warn!("failed to load feed: {}", e);
            error.set(Some(e.to_string()));
        }
    }
}

#[component]
pub fn Home() -> Element {
    let session = use_context::<SessionContext>();
    let mut posts = use_signal(Vec::<Post>::new);
    let mut loading = use_signal(|| true);
    let mut refreshing = use_signal(|| false);
    let error = use_signal(|| None::<String>);

    use_future(move || async move {
        fetch_feed(session, posts, error).await;
        loading.set(false);
    });

    let refresh = move |_| {
        if refreshing() {
            return;
        }
        refreshing.set(true);
        spawn(async move {
            fetch_feed(session, posts, error).await;
            refreshing.set(false);
        });
    };

    let try_again = move |_| {
        loading.set(true);
        spawn(async move {
            fetch_feed(session, posts, error).await;
            loading.set(false);
        });
    };

    let update_post = move |updated: Post| {
        let mut list = posts.write();
        if let Some(post) = list.iter_mut().find(|p| p.id == updated.id) {
            *post = updated;
        }
    };

    let remove_post = move |post_id: String| {
        posts.write().retain(|p| p.id != post_id);
    };

    rsx! {
        div { class: "max-w-2xl mx-auto px-6 py-8",
            div { class: "mb-8 flex items-center justify-between",
                div {
                    h1 { class: "text-3xl font-bold text-gray-900 mb-2", "Home Feed" }
                    p { class: "text-gray-600", "Latest posts from everyone" }
                }
                button {
                    class: "p-2 hover:bg-gray-100 rounded-full transition-colors",
                    title: "Refresh feed",
                    disabled: refreshing(),
                    onclick: refresh,
                    svg {
                        class: if refreshing() { "w-5 h-5 animate-spin" } else { "w-5 h-5" },
                        fill: "none",
                        stroke: "currentColor",
                        view_box: "0 0 24 24",
                        path {
                            stroke_linecap: "round",
                            stroke_linejoin: "round",
                            stroke_width: "2",
                            d: "M4 4v5h.582m15.356 2A8.001 8.001 0 004.582 9m0 0H9m11 11v-5h-.581m0 0a8.003 8.003 0 01-15.357-2m15.357 2H15",
                        }
                    }
                }
            }

            if loading() {
                div { class: "flex flex-col items-center justify-center py-12",
                    div { class: "animate-spin rounded-full h-8 w-8 border-b-2 border-blue-600 mb-4" }
                    p { class: "text-gray-600", "Loading your feed..." }
                }
            } else if let Some(message) = error.read().as_ref() {
                div { class: "text-center py-12 bg-white border border-red-200 rounded-2xl",
                    p { class: "text-red-600 mb-4", "{message}" }
                    button {
                        class: "px-4 py-2 bg-blue-600 text-white rounded-lg hover:bg-blue-700",
                        onclick: try_again,
                        "Try Again"
                    }
                }
            } else if posts.read().is_empty() {
                div { class: "text-center py-12 bg-white border border-gray-200 rounded-2xl",
                    p { class: "text-gray-500 mb-4", "No posts yet!" }
                    p { class: "text-sm text-gray-400", "Be the first to share something." }
                }
            } else {
                div { class: "space-y-6",
                    for post in posts.read().iter().cloned() {
                        PostCard {
                            key: "{post.id}",
                            post,
                            on_update: update_post,
                            on_delete: remove_post,
                        }
                    }
                }
            }
        }
    }
}
