//! Key/value persistence
//!
//! The browser build stores strings in LocalStorage. Native builds and tests
//! use an in-memory map. Storage is best effort: failures are logged and the
//! game carries on with defaults.

use std::collections::HashMap;

/// String key/value store
pub trait Storage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str);
}

/// Volatile storage backed by a `HashMap`
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    /// Number of `set_item` calls so far
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with one entry
    pub fn with_item(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.items.insert(key.to_string(), value.to_string());
        storage
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        self.writes += 1;
        self.items.insert(key.to_string(), value.to_string());
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    inner: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn open() -> Self {
        let inner = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if inner.is_none() {
            log::warn!("LocalStorage unavailable - the best score will not persist");
        }
        Self { inner }
    }
}

#[cfg(target_arch = "wasm32")]
impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.inner.as_ref()?.get_item(key).ok().flatten()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        if let Some(storage) = &self.inner {
            if storage.set_item(key, value).is_err() {
                log::warn!("Failed to write '{key}' to LocalStorage");
            }
        }
    }
}
