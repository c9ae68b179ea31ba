//! Post card with like/delete actions and an expandable comment thread.

use chirp_shared::Post;
use dioxus::prelude::*;

use super::{avatar_url, format_count, format_relative, CommentSection, FollowButton};
use crate::platform;
use crate::session::SessionContext;

/// One post in a feed. Mutations are reported upward through `on_update`
/// and `on_delete`; the parent owns the list.
#[component]
pub fn PostCard(post: Post, on_update: EventHandler<Post>, on_delete: EventHandler<String>) -> Element {
    let session = use_context::<SessionContext>();
    let mut liking = use_signal(|| false);
    let mut show_menu = use_signal(|| false);
    let mut show_comments = use_signal(|| false);

    let is_own_post = session.user_id().as_deref() == Some(post.author_id.as_str());

    let (author_name, author_username, author_avatar, verified) = match &post.author {
        Some(author) => (
            author.display_name(),
            author.username.clone(),
            avatar_url(author.avatar.as_deref(), &author.username),
            author.is_verified,
        ),
        None => (
            "Unknown User".to_string(),
            post.author_id.clone(),
            avatar_url(None, &post.author_id),
            false,
        ),
    };

    // Flip the like optimistically, then reconcile: a failed request rolls
    // the card back to its pre-toggle values.
    let handle_like = {
        let post = post.clone();
        move |_| {
            if liking() {
                return;
            }
            liking.set(true);

            let before = post.clone();
            let mut updated = post.clone();
            updated.is_liked = !before.is_liked;
            updated.like_count = if before.is_liked {
                before.like_count.saturating_sub(1)
            } else {
                before.like_count + 1
            };
            on_update.call(updated);

            let api = session.posts();
            spawn(async move {
                let result = if before.is_liked {
                    api.unlike(&before.id).await
                } else {
                    api.like(&before.id).await
                };
                if let Err(e) = result {
                    on_update.call(before);
                    platform::alert(&format!("Failed to update like: {e}"));
                }
                liking.set(false);
            });
        }
    };

    let handle_delete = {
        let post_id = post.id.clone();
        move |_| {
            show_menu.set(false);
            if !platform::confirm("Are you sure you want to delete this post?") {
                return;
            }
            let api = session.posts();
            let post_id = post_id.clone();
            spawn(async move {
                match api.delete(&post_id).await {
                    Ok(()) => on_delete.call(post_id),
                    Err(e) => platform::alert(&format!("Failed to delete post: {e}")),
                }
            });
        }
    };

    let comment_count_changed = {
        let post = post.clone();
        move |count: u32| {
            let mut updated = post.clone();
            updated.comment_count = count;
            on_update.call(updated);
        }
    };

    rsx! {
        div { class: "bg-white border border-gray-200 rounded-2xl p-6 hover:border-gray-300 transition",
            div { class: "flex items-start justify-between mb-4",
                div { class: "flex items-center gap-3",
                    img {
                        class: "w-12 h-12 rounded-full",
                        src: "{author_avatar}",
                        alt: "{author_username}",
                    }
                    div {
                        div { class: "flex items-center gap-2",
                            span { class: "font-semibold text-gray-900", "{author_name}" }
                            if verified {
                                svg {
                                    class: "w-5 h-5 text-blue-600",
                                    fill: "currentColor",
                                    view_box: "0 0 24 24",
                                    path { d: "M9 12l2 2 4-4m6 2a9 9 0 11-18 0 9 9 0 0118 0z" }
                                }
                            }
                        }
                        div { class: "flex items-center gap-2 text-sm text-gray-500",
                            span { "@{author_username}" }
                            span { "•" }
                            span { "{format_relative(post.created_at)}" }
                        }
                    }
                }
                if !is_own_post {
                    FollowButton { user_id: post.author_id.clone() }
                }
                if is_own_post {
                    div { class: "relative",
                        button {
                            class: "p-2 hover:bg-gray-100 rounded-full transition",
                            onclick: move |_| show_menu.set(!show_menu()),
                            svg {
                                class: "w-5 h-5 text-gray-500",
                                fill: "none",
                                stroke: "currentColor",
                                view_box: "0 0 24 24",
                                path {
                                    stroke_linecap: "round",
                                    stroke_linejoin: "round",
                                    stroke_width: "2",
                                    d: "M12 5v.01M12 12v.01M12 19v.01",
                                }
                            }
                        }
                        if show_menu() {
                            div { class: "absolute right-0 mt-2 w-48 bg-white border border-gray-200 rounded-xl shadow-lg z-10",
                                button {
                                    class: "w-full flex items-center gap-3 px-4 py-3 text-red-600 hover:bg-red-50 rounded-xl transition",
                                    onclick: handle_delete,
                                    span { "Delete Post" }
                                }
                            }
                        }
                    }
                }
            }

            p { class: "text-gray-900 mb-4 leading-relaxed whitespace-pre-wrap", "{post.content}" }

            if let Some(media_url) = post.media_url.as_ref() {
                img {
                    class: "w-full rounded-xl mb-4 object-cover max-h-96",
                    src: "{media_url}",
                    alt: "Post media",
                }
            }

            div { class: "flex items-center gap-6 pt-4 border-t border-gray-100",
                button {
                    class: format!(
                        "flex items-center gap-2 transition {}",
                        if post.is_liked { "text-red-600" } else { "text-gray-500 hover:text-red-600" },
                    ),
                    onclick: handle_like,
                    svg {
                        class: "w-5 h-5",
                        fill: if post.is_liked { "currentColor" } else { "none" },
                        stroke: "currentColor",
                        view_box: "0 0 24 24",
                        path {
                            stroke_linecap: "round",
                            stroke_linejoin: "round",
                            stroke_width: "2",
                            d: "M4.318 6.318a4.5 4.5 0 000 6.364L12 20.364l7.682-7.682a4.5 4.5 0 00-6.364-6.364L12 7.636l-1.318-1.318a4.5 4.5 0 00-6.364 0z",
                        }
                    }
                    span { class: "font-medium", "{format_count(post.like_count)}" }
                }
                button {
                    class: "flex items-center gap-2 text-gray-500 hover:text-blue-600 transition",
                    onclick: move |_| show_comments.set(!show_comments()),
                    svg {
                        class: "w-5 h-5",
                        fill: "none",
                        stroke: "currentColor",
                        view_box: "0 0 24 24",
                        path {
                            stroke_linecap: "round",
                            stroke_linejoin: "round",
                            stroke_width: "2",
                            d: "M8 12h.01M12 12h.01M16 12h.01M21 12c0 4.418-4.03 8-9 8a9.863 9.863 0 01-4.255-.949L3 20l1.395-3.72C3.512 15.042 3 13.574 3 12c0-4.418 4.03-8 9-8s9 3.582 9 8z",
                        }
                    }
                    span { class: "font-medium", "{format_count(post.comment_count)}" }
                }
            }

            if show_comments() {
                CommentSection {
                    post_id: post.id.clone(),
                    on_count_change: comment_count_changed,
                }
            }
        }
    }
}
