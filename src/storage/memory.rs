//! In-memory key-value store

use super::KeyValueStore;
use crate::core::error::Result;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::BTreeMap;

/// Process-local store; contents vanish with the value
#[derive(Debug)]
pub struct MemoryStore {
    name: String,
    items: RwLock<BTreeMap<String, Value>>,
}

impl MemoryStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: RwLock::new(BTreeMap::new()),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_item(&self, key: &str, value: &Value) -> Result<()> {
        self.items.write().insert(key.to_string(), value.clone());
        Ok(())
    }

    fn get_item(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.items.read().get(key).cloned())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items.write().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.items.write().clear();
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.items.read().keys().cloned().collect())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.items.read().len())
    }

    fn iterate(&self, visit: &mut dyn FnMut(&str, &Value)) -> Result<()> {
        for (key, value) in self.items.read().iter() {
            visit(key, value);
        }
        Ok(())
    }
}
