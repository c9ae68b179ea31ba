//! Desktop streaming transport over tokio-tungstenite.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chirp_shared::{ClientEvent, Frame, ServerPush};
use dioxus::logger::tracing;
use dioxus::prelude::*;
use futures_channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use super::{run_polling, ChatHandle, ConnectionState, ReconnectConfig};
use crate::api::ChatApi;
use crate::platform::sleep_ms;

/// The realtime connection for one authenticated session.
pub struct ChatConnection {
    sender: UnboundedSender<Frame<ClientEvent>>,
    closed: Arc<AtomicBool>,
    notify: Arc<tokio::sync::Notify>,
}

impl ChatConnection {
    /// Open the connection and start its lifecycle loop in a background
    /// task. `on_push` runs on that task, so it must be `Send + Sync`.
    pub fn new(
        url: String,
        api: ChatApi,
        state: SyncSignal<ConnectionState>,
        on_push: impl Fn(ServerPush) + Send + Sync + 'static,
        config: ReconnectConfig,
    ) -> Self {
        let (sender, receiver) = unbounded();
        let closed = Arc::new(AtomicBool::new(false));
        let notify = Arc::new(tokio::sync::Notify::new());

        run_loop(
            url,
            api,
            state,
            receiver,
            Arc::new(on_push),
            config,
            closed.clone(),
            notify.clone(),
        );

        Self {
            sender,
            closed,
            notify,
        }
    }

    pub fn handle(&self) -> ChatHandle {
        ChatHandle::new(self.sender.clone())
    }

    /// Stop the lifecycle loop and drop the socket. Idempotent.
    pub fn shutdown(&self) {
        self.closed.store(true, Ordering::Relaxed);
        self.notify.notify_waiters();
    }
}

#[allow(clippy::too_many_arguments)]
fn run_loop(
    url: String,
    api: ChatApi,
    mut state: SyncSignal<ConnectionState>,
    receiver: UnboundedReceiver<Frame<ClientEvent>>,
    on_push: Arc<dyn Fn(ServerPush) + Send + Sync>,
    config: ReconnectConfig,
    closed: Arc<AtomicBool>,
    notify: Arc<tokio::sync::Notify>,
) {
    tokio::spawn(async move {
        let receiver = Arc::new(tokio::sync::Mutex::new(receiver));
        let mut attempt = 0u32;

        loop {
            if closed.load(Ordering::Relaxed) {
                state.set(ConnectionState::Disconnected);
                return;
            }

            if attempt == 0 {
                state.set(ConnectionState::Connecting);
            } else {
                state.set(ConnectionState::Reconnecting { attempt });
            }

            match connect_async(&url).await {
                Ok((stream, _response)) => {
                    // Shutdown may have raced the open.
                    if closed.load(Ordering::Relaxed) {
                        state.set(ConnectionState::Disconnected);
                        return;
                    }
                    state.set(ConnectionState::Connected);
                    attempt = 0;
                    tracing::info!("chat socket connected");

                    let (mut write, mut read) = stream.split();
                    let (close_tx, mut close_rx) = tokio::sync::mpsc::unbounded_channel::<()>();

                    // Read task: dispatch pushes until the socket dies or
                    // shutdown is requested.
                    let on_push_for_read = on_push.clone();
                    let notify_for_read = notify.clone();
                    let close_tx_for_read = close_tx.clone();
                    tokio::spawn(async move {
                        loop {
                            tokio::select! {
                                _ = notify_for_read.notified() => break,
                                msg = read.next() => match msg {
                                    Some(Ok(Message::Text(text))) => {
                                        match serde_json::from_str::<Frame<ServerPush>>(text.as_str()) {
                                            Ok(frame) => on_push_for_read(frame.payload),
                                            Err(e) => tracing::warn!("unparseable push: {}", e),
                                        }
                                    }
                                    Some(Ok(Message::Close(_))) | None => break,
                                    Some(Ok(_)) => {}
                                    Some(Err(e)) => {
                                        tracing::warn!("ws read error: {}", e);
                                        break;
                                    }
                                },
                            }
                        }
                        let _ = close_tx_for_read.send(());
                    });

                    // Write task: flush queued client events.
                    let receiver_for_write = receiver.clone();
                    tokio::spawn(async move {
                        loop {
                            let frame = {
                                let mut rx = receiver_for_write.lock().await;
                                rx.next().await
                            };
                            let Some(frame) = frame else { break };
                            match serde_json::to_string(&frame) {
                                Ok(json) => {
                                    if let Err(e) = write.send(Message::Text(json.into())).await {
                                        tracing::warn!("ws send failed: {}", e);
                                        break;
                                    }
                                }
                                Err(e) => tracing::warn!("ws serialize failed: {}", e),
                            }
                        }
                        let _ = close_tx.send(());
                    });

                    close_rx.recv().await;
                    state.set(ConnectionState::Disconnected);
                    tracing::info!("chat socket closed");
                }
                Err(e) => {
                    tracing::warn!("chat socket connect failed: {}", e);
                    attempt += 1;
                    if attempt >= config.max_attempts {
                        let receiver_for_poll = receiver.clone();
                        let on_push_for_poll = on_push.clone();
                        run_polling(
                            api,
                            state,
                            closed,
                            move || {
                                receiver_for_poll
                                    .try_lock()
                                    .ok()
                                    .and_then(|mut rx| rx.try_next().ok().flatten())
                            },
                            move |push| on_push_for_poll(push),
                        )
                        .await;
                        return;
                    }
                    sleep_ms(config.delay_ms).await;
                }
            }
        }
    });
}
