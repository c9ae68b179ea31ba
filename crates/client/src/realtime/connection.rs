//! Chat connection: shared types, the polling fallback, and the
//! platform-specific streaming transport.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chirp_shared::{ClientEvent, Frame, ServerPush};
use dioxus::logger::tracing;
use dioxus::prelude::*;
use futures_channel::mpsc::UnboundedSender;

use crate::api::ChatApi;
use crate::platform::sleep_ms;

/// Interval between polls once the connection has fallen back from
/// streaming.
const POLL_INTERVAL_MS: u32 = 2_000;

/// Consecutive poll failures tolerated before the connection is declared
/// dead.
const POLL_FAILURE_LIMIT: u32 = 5;

/// Observable state of the realtime channel.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    /// Transport open, identification not yet acknowledged.
    Connected,
    /// Transport open and the server acked `authenticate`.
    Authenticated,
    Reconnecting { attempt: u32 },
    /// Streaming unavailable; events flow over request polling.
    Polling,
    Failed { reason: String },
}

impl ConnectionState {
    /// Events can currently reach us (over either transport).
    pub fn is_live(&self) -> bool {
        matches!(
            self,
            ConnectionState::Connected | ConnectionState::Authenticated | ConnectionState::Polling
        )
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, ConnectionState::Authenticated)
    }

    pub fn is_connecting(&self) -> bool {
        matches!(
            self,
            ConnectionState::Connecting | ConnectionState::Reconnecting { .. }
        )
    }
}

/// Reconnect policy: a bounded number of attempts with a fixed delay
/// between them. Exhausting the attempts triggers the polling fallback
/// rather than giving up outright.
#[derive(Debug, Clone)]
pub struct ReconnectConfig {
    pub max_attempts: u32,
    pub delay_ms: u32,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay_ms: 2_000,
        }
    }
}

/// Handle for emitting client events on the channel.
#[derive(Clone)]
pub struct ChatHandle {
    sender: UnboundedSender<Frame<ClientEvent>>,
}

impl ChatHandle {
    pub(crate) fn new(sender: UnboundedSender<Frame<ClientEvent>>) -> Self {
        Self { sender }
    }

    /// Queue an event for delivery. Delivery is best-effort: the frame is
    /// dropped if the connection dies before it is flushed.
    pub fn send(&self, event: ClientEvent) -> Result<(), String> {
        self.sender
            .unbounded_send(Frame::new(event))
            .map_err(|e| format!("failed to queue event: {e}"))
    }
}

/// Polling transport: drain queued client events, fetch queued pushes,
/// sleep, repeat. Runs until shutdown or too many consecutive failures.
pub(crate) async fn run_polling<P, N>(
    api: ChatApi,
    mut state: SyncSignal<ConnectionState>,
    closed: Arc<AtomicBool>,
    mut next_outbound: N,
    on_push: P,
) where
    P: Fn(ServerPush),
    N: FnMut() -> Option<Frame<ClientEvent>>,
{
    tracing::warn!("streaming unavailable, falling back to polling transport");
    state.set(ConnectionState::Polling);

    let mut cursor: Option<String> = None;
    let mut failures = 0u32;

    while !closed.load(Ordering::Relaxed) {
        while let Some(frame) = next_outbound() {
            if let Err(e) = api.push_event(&frame).await {
                tracing::warn!("failed to push client event: {}", e);
            }
        }

        match api.poll_events(cursor.as_deref()).await {
            Ok(batch) => {
                failures = 0;
                cursor = Some(batch.cursor);
                for frame in batch.events {
                    on_push(frame.payload);
                }
            }
            Err(e) => {
                failures += 1;
                tracing::warn!("poll failed ({}/{}): {}", failures, POLL_FAILURE_LIMIT, e);
                if failures >= POLL_FAILURE_LIMIT {
                    state.set(ConnectionState::Failed {
                        reason: format!("polling transport gave up: {e}"),
                    });
                    return;
                }
            }
        }

        sleep_ms(POLL_INTERVAL_MS).await;
    }

    state.set(ConnectionState::Disconnected);
}

// Platform-specific streaming transport.
#[cfg(target_arch = "wasm32")]
mod transport_wasm;
#[cfg(target_arch = "wasm32")]
pub use transport_wasm::ChatConnection;

#[cfg(not(target_arch = "wasm32"))]
mod transport_native;
#[cfg(not(target_arch = "wasm32"))]
pub use transport_native::ChatConnection;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_states() {
        assert!(ConnectionState::Connected.is_live());
        assert!(ConnectionState::Authenticated.is_live());
        assert!(ConnectionState::Polling.is_live());
        assert!(!ConnectionState::Disconnected.is_live());
        assert!(!ConnectionState::Reconnecting { attempt: 2 }.is_live());
        assert!(!ConnectionState::Failed { reason: "x".into() }.is_live());
    }

    #[test]
    fn reconnect_delay_is_fixed() {
        let config = ReconnectConfig::default();
        // The delay never grows with the attempt number.
        assert_eq!(config.delay_ms, 2_000);
        assert_eq!(config.max_attempts, 5);
    }
}
