// In-memory session storage, filled per request
use crate::application::runtime_config::SessionStorage;
use axum::http::HeaderMap;
use std::collections::HashMap;

const FORWARDED_KEYS: [&str; 2] = ["bx_auth_ticket", "bx-auth-ticket"];

#[derive(Debug, Clone, Default)]
pub struct MemorySessionStorage {
    entries: HashMap<String, String>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Copy the caller's auth ticket headers into a fresh session.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut session = Self::new();
        for key in FORWARDED_KEYS {
            if let Some(value) = headers.get(key).and_then(|v| v.to_str().ok()) {
                session.insert(key, value);
            }
        }
        session
    }
}

impl SessionStorage for MemorySessionStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}
