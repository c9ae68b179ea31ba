//! Expandable comment thread under a post.

use std::collections::HashMap;

use chirp_shared::{Comment, CreateCommentRequest};
use dioxus::logger::tracing;
use dioxus::prelude::*;

use super::{avatar_url, format_count, format_relative};
use crate::platform;
use crate::session::SessionContext;

fn patch(comments: &mut [Comment], id: &str, apply: impl FnOnce(&mut Comment)) {
    if let Some(comment) = comments.iter_mut().find(|c| c.id == id) {
        apply(comment);
    }
}

fn author_line(comment: &Comment) -> (String, String) {
    match &comment.author {
        Some(author) => (
            author.display_name(),
            avatar_url(author.avatar.as_deref(), &author.username),
        ),
        None => (
            comment.user_id.clone(),
            avatar_url(None, &comment.user_id),
        ),
    }
}

#[component]
pub fn CommentSection(post_id: String, on_count_change: EventHandler<u32>) -> Element {
    let session = use_context::<SessionContext>();
    let mut comments = use_signal(Vec::<Comment>::new);
    let mut replies = use_signal(HashMap::<String, Vec<Comment>>::new);
    let mut loading = use_signal(|| true);
    let mut draft = use_signal(String::new);
    let mut reply_draft = use_signal(String::new);
    let mut replying_to = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let current_user_id = session.user_id().unwrap_or_default();
    // Copyable handle on the post id for the per-row reply closures.
    let post_id_sig = use_signal(|| post_id.clone());

    // Initial load.
    let pid = post_id.clone();
    use_future(move || {
        let pid = pid.clone();
        async move {
            match session.comments().for_post(&pid, 50, None).await {
                Ok(page) => {
                    on_count_change.call(page.items.len() as u32);
                    comments.set(page.items);
                }
                Err(e) => tracing::warn!("failed to load comments: {}", e),
            }
            loading.set(false);
        }
    });

    let pid_for_submit = post_id.clone();
    let submit = move |e: Event<FormData>| {
        e.prevent_default();
        let content = draft.peek().trim().to_string();
        if content.is_empty() || submitting() {
            return;
        }
        submitting.set(true);
        let api = session.comments();
        let post_id = pid_for_submit.clone();
        spawn(async move {
            let request = CreateCommentRequest {
                post_id,
                content,
                parent_id: None,
            };
            match api.create(&request).await {
                Ok(comment) => {
                    comments.write().insert(0, comment);
                    draft.set(String::new());
                    on_count_change.call(comments.peek().len() as u32);
                }
                Err(e) => platform::alert(&format!("Failed to post comment: {e}")),
            }
            submitting.set(false);
        });
    };

    let mut submit_reply = move |parent_id: String| {
        let content = reply_draft.peek().trim().to_string();
        if content.is_empty() || submitting() {
            return;
        }
        submitting.set(true);
        let api = session.comments();
        let post_id = post_id_sig.peek().clone();
        spawn(async move {
            let request = CreateCommentRequest {
                post_id,
                content,
                parent_id: Some(parent_id.clone()),
            };
            match api.create(&request).await {
                Ok(reply) => {
                    replies.write().entry(parent_id.clone()).or_default().push(reply);
                    patch(&mut comments.write(), &parent_id, |c| c.reply_count += 1);
                    reply_draft.set(String::new());
                    replying_to.set(None);
                }
                Err(e) => platform::alert(&format!("Failed to post reply: {e}")),
            }
            submitting.set(false);
        });
    };

    let mut toggle_like = move |comment: Comment| {
        let id = comment.id.clone();
        patch(&mut comments.write(), &id, |c| {
            c.is_liked = !comment.is_liked;
            c.like_count = if comment.is_liked {
                comment.like_count.saturating_sub(1)
            } else {
                comment.like_count + 1
            };
        });
        let api = session.comments();
        spawn(async move {
            let result = if comment.is_liked {
                api.unlike(&comment.id).await
            } else {
                api.like(&comment.id).await
            };
            if let Err(e) = result {
                // restore pre-toggle values
                patch(&mut comments.write(), &comment.id, |c| {
                    c.is_liked = comment.is_liked;
                    c.like_count = comment.like_count;
                });
                platform::alert(&format!("Failed to update like: {e}"));
            }
        });
    };

    let delete_comment = move |comment_id: String| {
        if !platform::confirm("Delete this comment?") {
            return;
        }
        let api = session.comments();
        spawn(async move {
            match api.delete(&comment_id).await {
                Ok(()) => {
                    comments.write().retain(|c| c.id != comment_id);
                    on_count_change.call(comments.peek().len() as u32);
                }
                Err(e) => platform::alert(&format!("Failed to delete comment: {e}")),
            }
        });
    };

    let mut toggle_replies = move |comment_id: String| {
        if replies.peek().contains_key(&comment_id) {
            replies.write().remove(&comment_id);
            return;
        }
        let api = session.comments();
        spawn(async move {
            match api.replies(&comment_id, 50).await {
                Ok(page) => {
                    replies.write().insert(comment_id, page.items);
                }
                Err(e) => tracing::warn!("failed to load replies: {}", e),
            }
        });
    };

    rsx! {
        div { class: "mt-4 pt-4 border-t border-gray-100",
            form { onsubmit: submit, class: "flex gap-2 mb-4",
                input {
                    class: "flex-1 px-4 py-2 border border-gray-300 rounded-full focus:outline-none focus:border-blue-600",
                    r#type: "text",
                    placeholder: "Write a comment...",
                    value: "{draft}",
                    oninput: move |e| draft.set(e.value()),
                }
                button {
                    r#type: "submit",
                    disabled: submitting(),
                    class: "px-4 py-2 bg-blue-600 text-white rounded-full hover:bg-blue-700 disabled:opacity-50 transition",
                    "Post"
                }
            }

            if loading() {
                div { class: "py-4 text-center text-gray-500 text-sm", "Loading comments..." }
            } else if comments.read().is_empty() {
                div { class: "py-4 text-center text-gray-500 text-sm", "No comments yet. Be the first!" }
            } else {
                div { class: "space-y-4",
                    for comment in comments.read().iter().cloned() {
                        {
                            let (name, avatar) = author_line(&comment);
                            let is_own = comment.user_id == current_user_id;
                            let comment_for_like = comment.clone();
                            let id_for_delete = comment.id.clone();
                            let id_for_replies = comment.id.clone();
                            let id_for_reply_btn = comment.id.clone();
                            let id_for_reply_submit = comment.id.clone();
                            rsx! {
                                div { key: "{comment.id}", class: "flex gap-3",
                                    img { class: "w-8 h-8 rounded-full", src: "{avatar}", alt: "{name}" }
                                    div { class: "flex-1",
                                        div { class: "bg-gray-50 rounded-xl px-4 py-2",
                                            div { class: "flex items-center gap-2",
                                                span { class: "font-medium text-sm text-gray-900", "{name}" }
                                                span { class: "text-xs text-gray-500",
                                                    "{format_relative(comment.created_at)}"
                                                }
                                            }
                                            p { class: "text-sm text-gray-800", "{comment.content}" }
                                        }
                                        div { class: "flex items-center gap-4 mt-1 px-2 text-xs text-gray-500",
                                            button {
                                                class: format!(
                                                    "hover:text-red-600 transition {}",
                                                    if comment.is_liked { "text-red-600 font-medium" } else { "" },
                                                ),
                                                onclick: move |_| toggle_like(comment_for_like.clone()),
                                                "Like ({format_count(comment.like_count)})"
                                            }
                                            button {
                                                class: "hover:text-blue-600 transition",
                                                onclick: move |_| {
                                                    let current = replying_to.peek().clone();
                                                    if current.as_deref() == Some(id_for_reply_btn.as_str()) {
                                                        replying_to.set(None);
                                                    } else {
                                                        replying_to.set(Some(id_for_reply_btn.clone()));
                                                    }
                                                },
                                                "Reply"
                                            }
                                            if comment.reply_count > 0 {
                                                button {
                                                    class: "hover:text-blue-600 transition",
                                                    onclick: move |_| toggle_replies(id_for_replies.clone()),
                                                    "Replies ({comment.reply_count})"
                                                }
                                            }
                                            if is_own {
                                                button {
                                                    class: "hover:text-red-600 transition",
                                                    onclick: move |_| delete_comment(id_for_delete.clone()),
                                                    "Delete"
                                                }
                                            }
                                        }

                                        if replying_to.read().as_deref() == Some(comment.id.as_str()) {
                                            div { class: "flex gap-2 mt-2",
                                                input {
                                                    class: "flex-1 px-3 py-1.5 text-sm border border-gray-300 rounded-full focus:outline-none focus:border-blue-600",
                                                    r#type: "text",
                                                    placeholder: "Write a reply...",
                                                    value: "{reply_draft}",
                                                    oninput: move |e| reply_draft.set(e.value()),
                                                }
                                                button {
                                                    class: "px-3 py-1.5 text-sm bg-blue-600 text-white rounded-full hover:bg-blue-700 transition",
                                                    onclick: move |_| submit_reply(id_for_reply_submit.clone()),
                                                    "Reply"
                                                }
                                            }
                                        }

                                        if let Some(thread) = replies.read().get(&comment.id) {
                                            div { class: "mt-2 ml-4 space-y-2 border-l-2 border-gray-100 pl-3",
                                                for reply in thread.iter() {
                                                    {
                                                        let (reply_name, reply_avatar) = author_line(reply);
                                                        rsx! {
                                                            div { key: "{reply.id}", class: "flex gap-2",
                                                                img {
                                                                    class: "w-6 h-6 rounded-full",
                                                                    src: "{reply_avatar}",
                                                                    alt: "{reply_name}",
                                                                }
                                                                div { class: "bg-gray-50 rounded-xl px-3 py-1.5 flex-1",
                                                                    div { class: "flex items-center gap-2",
                                                                        span { class: "font-medium text-xs text-gray-900",
                                                                            "{reply_name}"
                                                                        }
                                                                        span { class: "text-xs text-gray-400",
                                                                            "{format_relative(reply.created_at)}"
                                                                        }
                                                                    }
                                                                    p { class: "text-sm text-gray-800", "{reply.content}" }
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
                }
            }
        }
    }
}
