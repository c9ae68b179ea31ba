//! Current user's profile: header, follow stats and own posts.

use chirp_shared::{Post, User};
use dioxus::logger::tracing;
use dioxus::prelude::*;
use futures_util::join;

use crate::components::{avatar_url, format_count, PostCard};
use crate::platform;
use crate::session::SessionContext;

#[derive(Clone, Copy, Default, PartialEq)]
struct FollowStats {
    followers: u32,
    following: u32,
}

#[component]
pub fn Profile() -> Element {
    let session = use_context::<SessionContext>();
    let mut profile = use_signal(|| None::<User>);
    let mut posts = use_signal(Vec::<Post>::new);
    let mut stats = use_signal(FollowStats::default);
    let mut loading = use_signal(|| true);

    use_future(move || async move {
        let Some(user_id) = session.user_id() else {
            loading.set(false);
            return;
        };

        let users = session.users();
        let posts_api = session.posts();
        let (profile_result, posts_result) =
            join!(users.get(&user_id), posts_api.by_author(&user_id, 50));

        match profile_result {
            Ok(user) => profile.set(Some(user)),
            Err(e) => {
                platform::alert(&format!("Failed to load profile: {e}"));
                loading.set(false);
                return;
            }
        }
        match posts_result {
            Ok(page) => posts.set(page.items),
            Err(e) => tracing::warn!("failed to load own posts: {}", e),
        }

        // Count the follow lists; fall back to the profile's counters when
        // the social service is unreachable.
        let social = session.social();
        let (followers, following) =
            join!(social.followers(&user_id), social.following(&user_id));
        match (followers, following) {
            (Ok(followers), Ok(following)) => stats.set(FollowStats {
                followers: followers.len() as u32,
                following: following.len() as u32,
            }),
            _ => {
                let fallback = profile.peek().clone();
                if let Some(user) = fallback {
                    stats.set(FollowStats {
                        followers: user.followers_count,
                        following: user.following_count,
                    });
                }
            }
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

    rsx! {
        div { class: "max-w-2xl mx-auto px-6 py-8",
            if loading() {
                div { class: "flex items-center justify-center py-12",
                    div { class: "animate-spin rounded-full h-8 w-8 border-b-2 border-blue-600" }
                }
            } else if let Some(user) = profile.read().as_ref() {
                div { class: "bg-white border border-gray-200 rounded-2xl p-6 mb-8",
                    div { class: "flex items-center gap-4 mb-4",
                        img {
                            class: "w-20 h-20 rounded-full",
                            src: avatar_url(user.avatar.as_deref(), &user.username),
                            alt: "{user.username}",
                        }
                        div {
                            div { class: "flex items-center gap-2",
                                h1 { class: "text-2xl font-bold text-gray-900", "{user.display_name()}" }
                                if user.is_verified {
                                    svg {
                                        class: "w-6 h-6 text-blue-600",
                                        fill: "currentColor",
                                        view_box: "0 0 24 24",
                                        path { d: "M9 12l2 2 4-4m6 2a9 9 0 11-18 0 9 9 0 0118 0z" }
                                    }
                                }
                            }
                            p { class: "text-gray-500", "@{user.username}" }
                        }
                    }

                    if let Some(bio) = user.bio.as_ref() {
                        p { class: "text-gray-800 mb-4", "{bio}" }
                    }

                    div { class: "flex items-center gap-4 text-sm text-gray-500 mb-4",
                        if let Some(location) = user.location.as_ref() {
                            span { "📍 {location}" }
                        }
                        if let Some(website) = user.website.as_ref() {
                            a {
                                class: "text-blue-600 hover:underline",
                                href: "{website}",
                                target: "_blank",
                                "{website}"
                            }
                        }
                    }

                    div { class: "flex gap-6 pt-4 border-t border-gray-100",
                        div {
                            span { class: "font-bold text-gray-900", "{format_count(posts.read().len() as u32)}" }
                            span { class: "text-gray-500 ml-1", "Posts" }
                        }
                        div {
                            span { class: "font-bold text-gray-900", "{format_count(stats.read().followers)}" }
                            span { class: "text-gray-500 ml-1", "Followers" }
                        }
                        div {
                            span { class: "font-bold text-gray-900", "{format_count(stats.read().following)}" }
                            span { class: "text-gray-500 ml-1", "Following" }
                        }
                    }
                }

                if posts.read().is_empty() {
                    div { class: "text-center py-12 bg-white border border-gray-200 rounded-2xl",
                        p { class: "text-gray-500", "No posts yet." }
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
            } else {
                div { class: "text-center py-12 bg-white border border-gray-200 rounded-2xl",
                    p { class: "text-gray-500", "Profile not available." }
                }
            }
        }
    }
}
