//! Bearer-token persistence.
//!
//! The token is a single opaque string. On the web it lives in
//! `localStorage` under [`TOKEN_KEY`], matching what the backend's other
//! clients expect; on native targets (and in tests) it lives in memory.

use std::sync::Mutex;

/// localStorage key holding the bearer token.
pub const TOKEN_KEY: &str = "access_token";

/// Storage backend for the session credential.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str);
    fn clear(&self);
}

/// In-memory store used on native targets and in tests.
#[derive(Default)]
pub struct MemoryStore {
    token: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryStore {
    fn get(&self) -> Option<String> {
        self.token.lock().ok().and_then(|guard| guard.clone())
    }

    fn set(&self, token: &str) {
        if let Ok(mut guard) = self.token.lock() {
            *guard = Some(token.to_string());
        }
    }

    fn clear(&self) {
        if let Ok(mut guard) = self.token.lock() {
            *guard = None;
        }
    }
}

/// Browser `localStorage` store. Holds no JS handle so it stays `Send`;
/// the storage object is looked up on every call.
#[cfg(target_arch = "wasm32")]
#[derive(Default)]
pub struct BrowserStore;

#[cfg(target_arch = "wasm32")]
impl BrowserStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl TokenStore for BrowserStore {
    fn get(&self) -> Option<String> {
        Self::storage()?.get_item(TOKEN_KEY).ok().flatten()
    }

    fn set(&self, token: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(TOKEN_KEY, token).is_err() {
                tracing::warn!("localStorage rejected the access token");
            }
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(TOKEN_KEY);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get(), None);

        store.set("tok-123");
        assert_eq!(store.get(), Some("tok-123".to_string()));

        store.clear();
        assert_eq!(store.get(), None);
    }
}
