//! Persistence adapter — the single serialized snapshot in a synchronous,
//! origin-scoped key-value store.
//!
//! The browser backend is `browser::LocalStorage`; `MemoryStore` backs the
//! native tests. There is no versioning or migration: a shape change simply
//! shows up as missing fields on the next load, which `state::decode_snapshot`
//! tolerates.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::AppError;

/// Synchronous get/set/remove by string key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
    fn remove(&self, key: &str) -> Result<(), AppError>;
}

/// In-memory store. Clones share the same map, so a test can keep a handle
/// while the app owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Rc<RefCell<HashMap<String, String>>>,
    writes: Rc<Cell<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// `load` / `save` / `clear` of one snapshot under a fixed key.
#[derive(Debug, Clone)]
pub struct SnapshotStore<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> SnapshotStore<S> {
    pub fn new(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Returns the raw snapshot, or `None` when nothing has been saved yet.
    pub fn load(&self) -> Result<Option<String>, AppError> {
        self.backend.get(&self.key)
    }

    pub fn save(&self, snapshot: &str) -> Result<(), AppError> {
        self.backend.set(&self.key, snapshot)?;
        log::debug!("snapshot persisted ({} bytes)", snapshot.len());
        Ok(())
    }

    pub fn clear(&self) -> Result<(), AppError> {
        self.backend.remove(&self.key)
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }
}
