//! Landing redirect and the authenticated page shell.

use dioxus::prelude::*;

use crate::components::Sidebar;
use crate::session::SessionContext;
use crate::Route;

/// Landing page: route to the feed or the login form.
#[component]
pub fn Landing() -> Element {
    let session = use_context::<SessionContext>();
    let nav = use_navigator();

    use_effect(move || {
        if session.is_authenticated() {
            nav.replace(Route::Home {});
        } else {
            nav.replace(Route::Login {});
        }
    });

    rsx! {
        div { class: "flex items-center justify-center min-h-screen text-gray-500",
            "Redirecting..."
        }
    }
}

/// Layout for authenticated pages: guard plus the navigation sidebar.
#[component]
pub fn AppShell() -> Element {
    let session = use_context::<SessionContext>();
    let nav = use_navigator();

    // Bounce unauthenticated visitors to the login form. Startup token
    // validation is still in flight on first render, so wait for it.
    use_effect(move || {
        if !*session.validating.read() && !session.is_authenticated() {
            nav.replace(Route::Login {});
        }
    });

    rsx! {
        div { class: "flex min-h-screen bg-gray-50",
            Sidebar {}
            main { class: "flex-1 ml-64",
                Outlet::<Route> {}
            }
        }
    }
}
