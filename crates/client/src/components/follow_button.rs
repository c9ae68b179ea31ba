//! Follow/unfollow toggle for another user.

use dioxus::logger::tracing;
use dioxus::prelude::*;

use crate::platform;
use crate::session::SessionContext;

/// Button reflecting the follow edge towards `user_id`. Hidden until the
/// current state is known; the local flag is patched only after the
/// mutation succeeds.
#[component]
pub fn FollowButton(user_id: String) -> Element {
    let session = use_context::<SessionContext>();
    let mut following = use_signal(|| None::<bool>);
    let mut busy = use_signal(|| false);

    let uid = user_id.clone();
    use_future(move || {
        let uid = uid.clone();
        async move {
            match session.social().status(&uid).await {
                Ok(status) => following.set(Some(status.following)),
                Err(e) => tracing::debug!("follow status unavailable: {}", e),
            }
        }
    });

    let toggle = {
        let user_id = user_id.clone();
        move |_| {
            let Some(current) = *following.peek() else {
                return;
            };
            if busy() {
                return;
            }
            busy.set(true);

            let api = session.social();
            let user_id = user_id.clone();
            spawn(async move {
                let result = if current {
                    api.unfollow(&user_id).await
                } else {
                    api.follow(&user_id).await
                };
                match result {
                    Ok(()) => following.set(Some(!current)),
                    Err(e) => platform::alert(&format!("Failed to update follow: {e}")),
                }
                busy.set(false);
            });
        }
    };

    rsx! {
        if let Some(current) = *following.read() {
            button {
                class: format!(
                    "px-3 py-1 text-sm rounded-full border transition {}",
                    if current {
                        "border-gray-300 text-gray-600 hover:border-red-300 hover:text-red-600"
                    } else {
                        "border-blue-600 text-blue-600 hover:bg-blue-50"
                    },
                ),
                disabled: busy(),
                onclick: toggle,
                if current { "Following" } else { "Follow" }
            }
        }
    }
}
