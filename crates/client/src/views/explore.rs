//! Explore: recent posts across the network with client-side search.

use chirp_shared::Post;
use dioxus::logger::tracing;
use dioxus::prelude::*;

use crate::components::PostCard;
use crate::session::SessionContext;

fn matches_query(post: &Post, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    if post.content.to_lowercase().contains(query) {
        return true;
    }
    post.author
        .as_ref()
        .is_some_and(|author| author.username.to_lowercase().contains(query))
}

#[component]
pub fn Explore() -> Element {
    let session = use_context::<SessionContext>();
    let mut posts = use_signal(Vec::<Post>::new);
    let mut loading = use_signal(|| true);
    let mut search = use_signal(String::new);

    use_future(move || async move {
        match session.posts().recent(50).await {
            Ok(page) => posts.set(page.items),
            Err(e) => tracing::warn!("failed to load explore posts: {}", e),
        }
        loading.set(false);
    });

    let update_post = move |updated: Post| {
        let mut list = posts.write();
        if let Some(post) = list.iter_mut().find(|p| p.id == updated.id) {
            *post = updated;
        }
    };

    let remove_post = move |post_id: String| {
        posts.write().retain(|p| p.id != post_id);
    };

    let query = search.read().to_lowercase();
    let filtered: Vec<Post> = posts
        .read()
        .iter()
        .filter(|post| matches_query(post, &query))
        .cloned()
        .collect();
    let searching = !query.is_empty();

    rsx! {
        div { class: "max-w-4xl mx-auto px-6 py-8",
            div { class: "mb-8",
                h1 { class: "text-3xl font-bold text-gray-900 mb-4", "Explore" }
                div { class: "relative",
                    svg {
                        class: "absolute left-4 top-1/2 -translate-y-1/2 w-5 h-5 text-gray-400",
                        fill: "none",
                        stroke: "currentColor",
                        view_box: "0 0 24 24",
                        path {
                            stroke_linecap: "round",
                            stroke_linejoin: "round",
                            stroke_width: "2",
                            d: "M21 21l-6-6m2-5a7 7 0 11-14 0 7 7 0 0114 0z",
                        }
                    }
                    input {
                        class: "w-full pl-12 pr-4 py-3 border border-gray-300 rounded-xl focus:ring-2 focus:ring-blue-500 focus:border-transparent transition",
                        r#type: "text",
                        placeholder: "Search posts and people...",
                        value: "{search}",
                        oninput: move |e| search.set(e.value()),
                    }
                }
            }

            if loading() {
                div { class: "flex items-center justify-center py-12",
                    div { class: "animate-spin rounded-full h-8 w-8 border-b-2 border-blue-600" }
                }
            } else if filtered.is_empty() {
                div { class: "text-center py-12 bg-white border border-gray-200 rounded-2xl",
                    p { class: "text-gray-500",
                        if searching {
                            "No posts found matching your search."
                        } else {
                            "No posts to explore yet."
                        }
                    }
                }
            } else {
                div { class: "grid grid-cols-1 md:grid-cols-2 gap-6",
                    for post in filtered {
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
