//! Process-local key-value storage.
//!
//! Nothing survives a restart; suited to tests and throwaway sessions.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::domain::ports::{KeyValueStore, KeyValueStoreError};

/// `KeyValueStore` backed by a hash map.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    values: RwLock<HashMap<String, String>>,
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), KeyValueStoreError> {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = InMemoryKeyValueStore::default();
        assert_eq!(store.get("token").expect("get"), None);
        store.set("token", "abc").expect("set");
        assert_eq!(store.get("token").expect("get").as_deref(), Some("abc"));
        store.remove("token").expect("remove");
        store.remove("token").expect("removing twice is fine");
        assert_eq!(store.get("token").expect("get"), None);
    }
}
