//! Persistent storage for the session's bearer tokens.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store persists exactly two raw strings, under [`TOKEN_KEY`]
//! and [`REFRESH_TOKEN_KEY`]. In the browser they live in `localStorage`;
//! server rendering and tests use the in-memory implementation.
//!
//! TRADE-OFFS
//! ==========
//! Writes are best-effort: a browser with storage disabled keeps the session
//! in memory for the lifetime of the page and nothing more.

#[cfg(test)]
#[path = "token_storage_test.rs"]
mod token_storage_test;

use std::collections::HashMap;
use std::sync::Mutex;

/// Storage key of the access token.
pub const TOKEN_KEY: &str = "token";
/// Storage key of the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// String key/value storage that survives page reloads.
pub trait TokenStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Process-local storage, used for SSR and tests.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with both tokens, as if a previous page load had
    /// logged in.
    #[must_use]
    pub fn with_tokens(token: &str, refresh_token: &str) -> Self {
        let storage = Self::new();
        storage.set(TOKEN_KEY, token);
        storage.set(REFRESH_TOKEN_KEY, refresh_token);
        storage
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().map_or(true, |entries| entries.is_empty())
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_owned(), value.to_owned());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

/// Browser `localStorage`. Outside the `hydrate` build every call is a no-op.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTokenStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl TokenStorage for BrowserTokenStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.set_item(key, value);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}
