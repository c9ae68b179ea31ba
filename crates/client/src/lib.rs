//! Chirp client - Dioxus web application
//!
//! A single-page client for the chirp social network: feed, posts,
//! comments, follows, notifications and direct messaging over a realtime
//! channel. Builds for web (WASM) and desktop.

pub mod api;
pub mod chat;
pub mod config;
pub mod platform;
pub mod realtime;
pub mod routes;
pub mod session;
pub mod state;
pub mod storage;

pub mod components;
pub mod views;

pub use config::{Service, ServiceEndpoints};
pub use routes::Route;
pub use session::{Session, SessionContext, SessionProvider};
