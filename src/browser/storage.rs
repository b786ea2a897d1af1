use web_sys::Storage;

use super::describe;
use crate::error::AppError;
use crate::model::store::KeyValueStore;

/// `window.localStorage`. When the browser refuses storage (private mode,
/// disabled cookies) every call fails with `AppError::Storage` and the app
/// runs on defaults without persisting.
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("localStorage unavailable, changes will not persist");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, AppError> {
        self.storage
            .as_ref()
            .ok_or_else(|| AppError::Storage("localStorage unavailable".to_string()))
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| AppError::Storage(describe(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| AppError::Storage(describe(&e)))
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| AppError::Storage(describe(&e)))
    }
}
