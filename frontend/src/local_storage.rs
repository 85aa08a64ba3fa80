use shared::storage::{MemoryStorage, Storage};

use crate::utils::get_window;

/// `window.localStorage`, or process memory when the browser refuses it.
pub enum BrowserStorage {
    Local(web_sys::Storage),
    Memory(MemoryStorage),
}

impl BrowserStorage {
    pub fn open() -> Self {
        match get_window().and_then(|w| w.local_storage().ok()).and_then(|s| s) {
            Some(storage) => BrowserStorage::Local(storage),
            None => {
                log::warn!("localStorage is not available, session will not survive a reload");
                BrowserStorage::Memory(MemoryStorage::new())
            }
        }
    }
}

impl Storage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self {
            BrowserStorage::Local(storage) => storage.get_item(key).ok().and_then(|v| v),
            BrowserStorage::Memory(storage) => storage.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) {
        match self {
            BrowserStorage::Local(storage) => {
                if let Err(err) = storage.set_item(key, value) {
                    log::error!("local_storage set {key}: {:?}", err);
                }
            }
            BrowserStorage::Memory(storage) => storage.set(key, value),
        }
    }

    fn remove(&self, key: &str) {
        match self {
            BrowserStorage::Local(storage) => {
                storage.remove_item(key).ok();
            }
            BrowserStorage::Memory(storage) => storage.remove(key),
        }
    }
}
