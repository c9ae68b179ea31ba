//! Web (WASM) streaming transport over `web_sys::WebSocket`.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chirp_shared::{ClientEvent, Frame, ServerPush};
use dioxus::logger::tracing;
use dioxus::prelude::*;
use futures_channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use futures_util::StreamExt;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::js_sys;

use super::{run_polling, ChatHandle, ConnectionState, ReconnectConfig};
use crate::api::ChatApi;
use crate::platform::sleep_ms;

/// The realtime connection for one authenticated session.
pub struct ChatConnection {
    sender: UnboundedSender<Frame<ClientEvent>>,
    closed: Arc<AtomicBool>,
    current: Rc<RefCell<Option<web_sys::WebSocket>>>,
}

impl ChatConnection {
    /// Open the connection and start its lifecycle loop. `on_push` is
    /// invoked for every server push, on the UI task.
    pub fn new(
        url: String,
        api: ChatApi,
        state: SyncSignal<ConnectionState>,
        on_push: impl Fn(ServerPush) + 'static,
        config: ReconnectConfig,
    ) -> Self {
        let (sender, receiver) = unbounded();
        let closed = Arc::new(AtomicBool::new(false));
        let current = Rc::new(RefCell::new(None));

        run_loop(
            url,
            api,
            state,
            receiver,
            Rc::new(on_push),
            config,
            closed.clone(),
            current.clone(),
        );

        Self {
            sender,
            closed,
            current,
        }
    }

    pub fn handle(&self) -> ChatHandle {
        ChatHandle::new(self.sender.clone())
    }

    /// Stop the lifecycle loop and close the socket. Idempotent.
    pub fn shutdown(&self) {
        self.closed.store(true, Ordering::Relaxed);
        if let Some(ws) = self.current.borrow().as_ref() {
            let _ = ws.close();
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_loop(
    url: String,
    api: ChatApi,
    mut state: SyncSignal<ConnectionState>,
    receiver: UnboundedReceiver<Frame<ClientEvent>>,
    on_push: Rc<dyn Fn(ServerPush)>,
    config: ReconnectConfig,
    closed: Arc<AtomicBool>,
    current: Rc<RefCell<Option<web_sys::WebSocket>>>,
) {
    let receiver = Rc::new(RefCell::new(receiver));

    spawn_local(async move {
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

            match open_websocket(&url, on_push.clone()).await {
                Ok(ws) => {
                    // Shutdown may have raced the open.
                    if closed.load(Ordering::Relaxed) {
                        let _ = ws.close();
                        state.set(ConnectionState::Disconnected);
                        return;
                    }
                    state.set(ConnectionState::Connected);
                    attempt = 0;
                    *current.borrow_mut() = Some(ws.clone());

                    // Channel signalling that the socket closed.
                    let (close_tx, mut close_rx) = unbounded::<()>();
                    let onclose = Closure::wrap(Box::new(move |_: web_sys::CloseEvent| {
                        let _ = close_tx.unbounded_send(());
                    })
                        as Box<dyn FnMut(web_sys::CloseEvent)>);
                    ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));
                    onclose.forget();

                    // Flush queued client events until the socket dies.
                    let ws_for_send = ws.clone();
                    let receiver_for_send = receiver.clone();
                    spawn_local(async move {
                        loop {
                            let frame = {
                                let mut rx = receiver_for_send.borrow_mut();
                                rx.next().await
                            };
                            let Some(frame) = frame else { break };

                            // readyState 1 = OPEN
                            if ws_for_send.ready_state() != 1 {
                                break;
                            }
                            match serde_json::to_string(&frame) {
                                Ok(json) => {
                                    if let Err(e) = ws_for_send.send_with_str(&json) {
                                        tracing::warn!("ws send failed: {:?}", e);
                                    }
                                }
                                Err(e) => tracing::warn!("ws serialize failed: {}", e),
                            }
                        }
                    });

                    // Park until the socket closes.
                    close_rx.next().await;
                    *current.borrow_mut() = None;
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
                            move || receiver_for_poll.borrow_mut().try_next().ok().flatten(),
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

/// Open a socket and wire up its callbacks. Resolves once the socket is
/// open, or with the close/error reason.
async fn open_websocket(
    url: &str,
    on_push: Rc<dyn Fn(ServerPush)>,
) -> Result<web_sys::WebSocket, String> {
    use web_sys::{CloseEvent, ErrorEvent, MessageEvent, WebSocket};

    let ws = WebSocket::new(url).map_err(|e| format!("failed to create socket: {e:?}"))?;

    let is_open = Rc::new(RefCell::new(false));
    let fail_reason = Rc::new(RefCell::new(None::<String>));

    let is_open_cb = is_open.clone();
    let onopen = Closure::wrap(Box::new(move |_: web_sys::Event| {
        *is_open_cb.borrow_mut() = true;
    }) as Box<dyn FnMut(web_sys::Event)>);
    ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));
    onopen.forget();

    let fail_close = fail_reason.clone();
    let onclose = Closure::wrap(Box::new(move |e: CloseEvent| {
        let reason = if e.reason().is_empty() {
            format!("closed with code {}", e.code())
        } else {
            e.reason()
        };
        *fail_close.borrow_mut() = Some(reason);
    }) as Box<dyn FnMut(CloseEvent)>);
    ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));
    onclose.forget();

    let fail_err = fail_reason.clone();
    let onerror = Closure::wrap(Box::new(move |_: ErrorEvent| {
        *fail_err.borrow_mut() = Some("socket error".to_string());
    }) as Box<dyn FnMut(ErrorEvent)>);
    ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onerror.forget();

    let onmessage = Closure::wrap(Box::new(move |e: MessageEvent| {
        if let Ok(text) = e.data().dyn_into::<js_sys::JsString>() {
            let text: String = text.into();
            match serde_json::from_str::<Frame<ServerPush>>(&text) {
                Ok(frame) => on_push(frame.payload),
                Err(e) => tracing::warn!("unparseable push: {}", e),
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);
    ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
    onmessage.forget();

    // Wait up to 5s for the open callback.
    for _ in 0..500 {
        if *is_open.borrow() {
            return Ok(ws);
        }
        if let Some(reason) = fail_reason.borrow().clone() {
            return Err(reason);
        }
        sleep_ms(10).await;
    }

    Err("connection timeout".to_string())
}
