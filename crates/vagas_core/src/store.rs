use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::JobId;

/// String-keyed flag storage supplied by the platform.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store, used by tests and as a fallback when nothing is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// Which jobs the user already opened. Only the rendering layer uses it.
pub trait VisitedStore {
    fn is_visited(&self, id: JobId) -> bool;
    fn mark_visited(&mut self, id: JobId);
}

const VISITED_VALUE: &str = "true";

/// [`VisitedStore`] kept as `card_<id> = "true"` entries of a key-value store.
#[derive(Debug, Clone, Default)]
pub struct VisitedFlags<S> {
    store: S,
}

impl<S: KeyValueStore> VisitedFlags<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn key(id: JobId) -> String {
        format!("card_{id}")
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

impl<S: KeyValueStore> VisitedStore for VisitedFlags<S> {
    fn is_visited(&self, id: JobId) -> bool {
        self.store.get(&Self::key(id)).as_deref() == Some(VISITED_VALUE)
    }

    fn mark_visited(&mut self, id: JobId) {
        self.store.set(&Self::key(id), VISITED_VALUE);
    }
}
