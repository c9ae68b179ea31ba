//! Chirp client - main entry point
//!
//! A Dioxus single-page client for the chirp social network.
//! Supports both web (WASM) and desktop platforms.

#![allow(non_snake_case)]

use chirp_client::realtime::ChatProvider;
use chirp_client::session::SessionProvider;
use chirp_client::state::NotificationProvider;
use chirp_client::routes::Route;
use dioxus::prelude::*;

// Assets
const MAIN_CSS: Asset = asset!("/assets/styling/main.css");

fn main() {
    // Initialize tracing for desktop
    #[cfg(not(target_arch = "wasm32"))]
    {
        use tracing_subscriber::EnvFilter;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("chirp_client=debug")),
            )
            .init();
    }

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Script { src: "https://cdn.tailwindcss.com" }

        SessionProvider {
            NotificationProvider {
                ChatProvider {
                    Router::<Route> {}
                }
            }
        }
    }
}
