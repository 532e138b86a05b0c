use web_sys::Storage;

use crate::error::{DAppKitError, Result};
use crate::persistence::KeyValueStore;

/// `window.localStorage`
#[derive(Clone)]
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    pub fn new() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| DAppKitError::Storage("no window".into()))?;
        let storage = window
            .local_storage()
            .map_err(|e| DAppKitError::Storage(super::js_error(e)))?
            .ok_or_else(|| DAppKitError::Storage("localStorage unavailable".into()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.storage.get_item(key).map_err(|e| DAppKitError::Storage(super::js_error(e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.storage.set_item(key, value).map_err(|e| DAppKitError::Storage(super::js_error(e)))
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.storage.remove_item(key).map_err(|e| DAppKitError::Storage(super::js_error(e)))
    }
}
