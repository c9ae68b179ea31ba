//! Realtime chat channel.
//!
//! One live connection per authenticated session, owned by [`ChatContext`]
//! and provided to the tree by [`ChatProvider`]. The transport is a
//! WebSocket with a bounded, fixed-delay reconnect policy; when streaming
//! stays unavailable the connection falls back to request-based polling of
//! the chat service.
//!
//! Incoming pushes are not delivered through per-view callbacks. Presence
//! events update the context's online map directly; message and typing
//! events queue on the context's inbox, which the (single) messaging view
//! drains. That keeps subscriber exclusivity structural instead of
//! "last registration wins".

mod connection;
mod manager;

pub use connection::{ChatConnection, ChatHandle, ConnectionState, ReconnectConfig};
pub use manager::{ChatContext, ChatProvider};
