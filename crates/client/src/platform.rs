//! Small platform shims for things the two targets do differently.

#[cfg(not(target_arch = "wasm32"))]
use dioxus::logger::tracing;

/// Suspend the current task for `ms` milliseconds.
#[cfg(target_arch = "wasm32")]
pub async fn sleep_ms(ms: u32) {
    gloo_timers::future::TimeoutFuture::new(ms).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep_ms(ms: u32) {
    tokio::time::sleep(tokio::time::Duration::from_millis(u64::from(ms))).await;
}

/// Surface an error to the user. Blocking dialog on web, error log on
/// desktop.
#[cfg(target_arch = "wasm32")]
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn alert(message: &str) {
    tracing::error!("{}", message);
}

/// Ask the user to confirm a destructive action.
#[cfg(target_arch = "wasm32")]
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn confirm(message: &str) -> bool {
    // No native dialog on desktop; log and proceed.
    tracing::warn!("confirm: {}", message);
    true
}
