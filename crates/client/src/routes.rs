//! Application routing configuration.

use dioxus::prelude::*;

use crate::views::{
    AppShell, Compose, Explore, Home, Landing, Login, Messages, Notifications, Profile, Register,
};

// Router configuration
#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    // Landing redirects to login or home depending on the session
    #[route("/")]
    Landing {},

    // Auth routes
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},

    // Authenticated pages share the sidebar shell
    #[layout(AppShell)]
        #[route("/home")]
        Home {},
        #[route("/explore")]
        Explore {},
        #[route("/compose")]
        Compose {},
        #[route("/profile")]
        Profile {},
        #[route("/notifications")]
        Notifications {},
        #[route("/messages")]
        Messages {},
}
