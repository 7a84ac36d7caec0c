use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use web_sys::window;

/// Persistence for the small string entries the app keeps between visits
/// (auth blob, theme preference).
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// `window.localStorage`. Failures are logged and otherwise ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        get_local_storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        match get_local_storage() {
            Some(storage) => {
                if let Err(err) = storage.set_item(key, value) {
                    log::warn!("failed to store {}: {:?}", key, err);
                }
            }
            None => log::warn!("localStorage unavailable; {} not saved", key),
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = get_local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.lock().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_clones_share_entries() {
        let store = MemoryStore::default();
        let other = store.clone();
        store.set("theme", "dark");
        assert_eq!(other.get("theme").as_deref(), Some("dark"));

        other.remove("theme");
        assert_eq!(store.get("theme"), None);
    }
}
