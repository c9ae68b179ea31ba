//! Compose a new post, optionally attaching media.

use chirp_shared::CreatePostRequest;
use dioxus::prelude::*;

use crate::components::avatar_url;
use crate::platform;
use crate::session::SessionContext;
use crate::Route;

const MAX_CONTENT_LEN: usize = 5_000;
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Content type from the file extension; the media service rejects
/// anything it does not recognize anyway.
fn guess_mime(file_name: &str) -> &'static str {
    let ext = file_name.rsplit('.').next().unwrap_or("").to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        _ => "application/octet-stream",
    }
}

fn is_media(mime: &str) -> bool {
    mime.starts_with("image/") || mime.starts_with("video/")
}

#[component]
pub fn Compose() -> Element {
    let session = use_context::<SessionContext>();
    let nav = use_navigator();

    let mut content = use_signal(String::new);
    let mut media_url = use_signal(String::new);
    let mut pending_file = use_signal(|| None::<(String, Vec<u8>)>);
    let mut loading = use_signal(|| false);
    let mut uploading = use_signal(|| false);

    let user = session.current_user();
    let (user_avatar, username) = match &user {
        Some(user) => (
            avatar_url(user.avatar.as_deref(), &user.username),
            user.username.clone(),
        ),
        None => (avatar_url(None, "anonymous"), String::new()),
    };

    let pick_file = move |evt: Event<FormData>| {
        spawn(async move {
            let Some(file) = evt.files().into_iter().next() else {
                return;
            };
            let name = file.name();
            let mime = guess_mime(&name);
            if !is_media(mime) {
                platform::alert("Please upload images or videos only.");
                return;
            }
            match file.read_bytes().await {
                Ok(bytes) => {
                    if bytes.len() > MAX_UPLOAD_BYTES {
                        platform::alert("File size must be under 10MB.");
                        return;
                    }
                    pending_file.set(Some((name, bytes.to_vec())));
                    // A picked file replaces any pasted URL.
                    media_url.set(String::new());
                }
                Err(e) => platform::alert(&format!("Failed to read file: {e}")),
            }
        });
    };

    let submit = move |e: Event<FormData>| {
        e.prevent_default();
        let text = content.peek().trim().to_string();
        if text.is_empty() {
            platform::alert("Please add some content to your post.");
            return;
        }
        if text.len() > MAX_CONTENT_LEN {
            platform::alert("Post content must be under 5000 characters.");
            return;
        }
        if loading() {
            return;
        }
        loading.set(true);

        let media = session.media();
        let posts = session.posts();
        spawn(async move {
            let mut final_media_url = media_url.peek().trim().to_string();

            // Upload the picked file first; a failed upload posts without
            // media rather than failing the whole submission.
            if let Some((name, bytes)) = pending_file.peek().clone() {
                uploading.set(true);
                match media.upload(&name, guess_mime(&name), bytes).await {
                    Ok(uploaded) => final_media_url = uploaded.url,
                    Err(e) => {
                        platform::alert(&format!(
                            "Failed to upload media, posting without it: {e}"
                        ));
                        final_media_url = String::new();
                    }
                }
                uploading.set(false);
            }

            let request = CreatePostRequest {
                content: text,
                media_url: (!final_media_url.is_empty()).then_some(final_media_url),
                visibility: "public".to_string(),
            };
            match posts.create(&request).await {
                Ok(_post) => {
                    nav.push(Route::Home {});
                }
                Err(e) => platform::alert(&format!("Failed to create post: {e}")),
            }
            loading.set(false);
        });
    };

    let has_pending_file = pending_file.read().is_some();
    let pending_name = pending_file
        .read()
        .as_ref()
        .map(|(name, _)| name.clone())
        .unwrap_or_default();
    let preview_url = media_url.read().trim().to_string();

    rsx! {
        div { class: "max-w-2xl mx-auto px-6 py-8",
            div { class: "mb-8",
                h1 { class: "text-3xl font-bold text-gray-900 mb-2", "Create Post" }
                p { class: "text-gray-600", "Share your thoughts with the world" }
            }

            div { class: "bg-white border border-gray-200 rounded-2xl p-6",
                form { onsubmit: submit, class: "space-y-6",
                    div { class: "flex items-start gap-4",
                        img {
                            class: "w-12 h-12 rounded-full flex-shrink-0",
                            src: "{user_avatar}",
                            alt: "{username}",
                        }
                        textarea {
                            class: "flex-1 min-h-[150px] p-4 border border-gray-300 rounded-xl focus:ring-2 focus:ring-blue-500 focus:border-transparent resize-none transition",
                            placeholder: "What's on your mind?",
                            required: true,
                            value: "{content}",
                            oninput: move |e| content.set(e.value()),
                        }
                    }

                    div {
                        label { class: "block text-sm font-medium text-gray-700 mb-2",
                            "Add media (optional)"
                        }
                        input {
                            class: "w-full px-4 py-3 border border-gray-300 rounded-xl focus:ring-2 focus:ring-blue-500 focus:border-transparent transition",
                            r#type: "url",
                            placeholder: "https://example.com/image.jpg",
                            disabled: has_pending_file,
                            value: "{media_url}",
                            oninput: move |e| media_url.set(e.value()),
                        }
                        div { class: "mt-3 flex items-center gap-3",
                            input {
                                r#type: "file",
                                accept: "image/*,video/*",
                                onchange: pick_file,
                            }
                            if has_pending_file {
                                span { class: "text-sm text-gray-600", "{pending_name}" }
                                button {
                                    r#type: "button",
                                    class: "text-sm text-red-600 hover:text-red-700",
                                    onclick: move |_| pending_file.set(None),
                                    "Remove"
                                }
                            }
                        }
                    }

                    if !preview_url.is_empty() {
                        div { class: "rounded-xl overflow-hidden border border-gray-200",
                            img {
                                class: "w-full max-h-96 object-cover",
                                src: "{preview_url}",
                                alt: "Preview",
                            }
                        }
                    }

                    div { class: "flex gap-3 pt-4 border-t border-gray-200",
                        button {
                            r#type: "button",
                            class: "flex-1 px-6 py-3 border border-gray-300 text-gray-700 font-medium rounded-xl hover:bg-gray-50 transition",
                            onclick: move |_| {
                                nav.push(Route::Home {});
                            },
                            "Cancel"
                        }
                        button {
                            r#type: "submit",
                            disabled: loading(),
                            class: "flex-1 px-6 py-3 bg-blue-600 text-white font-medium rounded-xl hover:bg-blue-700 transition disabled:opacity-50 disabled:cursor-not-allowed",
                            if uploading() {
                                "Uploading..."
                            } else if loading() {
                                "Posting..."
                            } else {
                                "Post"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_guessing() {
        assert_eq!(guess_mime("photo.JPG"), "image/jpeg");
        assert_eq!(guess_mime("clip.mp4"), "video/mp4");
        assert_eq!(guess_mime("notes.txt"), "application/octet-stream");
        assert_eq!(guess_mime("no_extension"), "application/octet-stream");
    }

    #[test]
    fn media_filter() {
        assert!(is_media("image/png"));
        assert!(is_media("video/webm"));
        assert!(!is_media("application/octet-stream"));
    }
}
