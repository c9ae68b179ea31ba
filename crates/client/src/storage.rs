//! Cross-platform persistent storage.
//!
//! Web builds use `localStorage`; desktop builds use JSON files under the
//! platform config directory (`~/.config/chirp/` on Linux).

use serde::{de::DeserializeOwned, Serialize};

/// Persist a value under `key`. Returns `false` when the backing store is
/// unavailable or serialization fails.
pub fn save<T: Serialize>(key: &str, value: &T) -> bool {
    match serde_json::to_string(value) {
        Ok(json) => save_raw(key, &json),
        Err(_) => false,
    }
}

/// Load a previously saved value. `None` when the key is missing or the
/// stored JSON no longer matches `T`.
pub fn load<T: DeserializeOwned>(key: &str) -> Option<T> {
    serde_json::from_str(&load_raw(key)?).ok()
}

/// Remove a value.
pub fn remove(key: &str) {
    remove_raw(key);
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

#[cfg(target_arch = "wasm32")]
fn save_raw(key: &str, value: &str) -> bool {
    local_storage()
        .map(|storage| storage.set_item(key, value).is_ok())
        .unwrap_or(false)
}

#[cfg(target_arch = "wasm32")]
fn load_raw(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok()?
}

#[cfg(target_arch = "wasm32")]
fn remove_raw(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn file_for(key: &str) -> Option<std::path::PathBuf> {
    let dir = dirs::config_dir()?.join("chirp");
    if !dir.exists() {
        std::fs::create_dir_all(&dir).ok()?;
    }
    // Keys are short identifiers, but keep filenames safe anyway.
    let safe: String = key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect();
    Some(dir.join(format!("{safe}.json")))
}

#[cfg(not(target_arch = "wasm32"))]
fn save_raw(key: &str, value: &str) -> bool {
    file_for(key)
        .map(|path| std::fs::write(path, value).is_ok())
        .unwrap_or(false)
}

#[cfg(not(target_arch = "wasm32"))]
fn load_raw(key: &str) -> Option<String> {
    std::fs::read_to_string(file_for(key)?).ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn remove_raw(key: &str) {
    if let Some(path) = file_for(key) {
        let _ = std::fs::remove_file(path);
    }
}
