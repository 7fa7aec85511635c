//! Session id persistence
//!
//! The session id is the player's only client-side progress handle; the
//! backend keys all scores and unlocks off it. Storage is behind a trait
//! so the controller never touches LocalStorage directly.

/// LocalStorage key holding the session id
pub const SESSION_KEY: &str = "chaos_blender_session";

const SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Key/value storage for the session id
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-memory store for native builds and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: std::collections::HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Browser LocalStorage store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl SessionStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&mut self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// Generate a fresh session id: `session-<unix_millis>-<random suffix>`
pub fn generate_session_id(now_ms: u64) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36[rand::Rng::random_range(&mut rng, 0..BASE36.len())] as char)
        .collect();
    format!("session-{now_ms}-{suffix}")
}

/// Read the stored session id, generating and persisting one when absent
pub fn get_or_create_session_id(store: &mut impl SessionStore, now_ms: u64) -> String {
    if let Some(id) = store.get(SESSION_KEY) {
        return id;
    }
    let id = generate_session_id(now_ms);
    store.set(SESSION_KEY, &id);
    log::info!("Created new session {id}");
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_session_id_format() {
        let id = generate_session_id(1_700_000_000_000);
        let parts: Vec<&str> = id.splitn(3, '-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "session");
        assert_eq!(parts[1], "1700000000000");
        assert_eq!(parts[2].len(), SUFFIX_LEN);
        assert!(parts[2].bytes().all(|b| BASE36.contains(&b)));
    }

    #[test]
    fn test_get_or_create_persists_and_is_stable() {
        let mut store = MemoryStore::new();
        let first = get_or_create_session_id(&mut store, 42);
        let second = get_or_create_session_id(&mut store, 43);
        assert_eq!(first, second);
        assert_eq!(store.get(SESSION_KEY).as_deref(), Some(first.as_str()));
    }

    #[test]
    fn test_remove_forces_regeneration() {
        let mut store = MemoryStore::new();
        let first = get_or_create_session_id(&mut store, 42);
        store.remove(SESSION_KEY);
        let second = get_or_create_session_id(&mut store, 42);
        // Same timestamp, but the random suffix makes a collision
        // vanishingly unlikely
        assert_ne!(first, second);
    }
}
