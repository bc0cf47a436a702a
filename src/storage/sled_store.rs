//! `sled`-backed key-value store
//!
//! Each store is one tree of a shared database; values are JSON bytes.

use super::KeyValueStore;
use crate::core::error::{LoggerError, Result};
use serde_json::Value;

/// A `KeyValueStore` over one `sled::Tree`
#[derive(Debug, Clone)]
pub struct SledStore {
    name: String,
    tree: sled::Tree,
}

impl SledStore {
    /// Open (or create) the tree named `name` in `db`
    pub fn new(db: &sled::Db, name: &str) -> Result<Self> {
        let tree = db.open_tree(name)?;
        Ok(Self {
            name: name.to_string(),
            tree,
        })
    }

    fn decode(&self, key: &[u8], bytes: &[u8]) -> Result<Value> {
        serde_json::from_slice(bytes).map_err(|e| {
            LoggerError::storage(
                &self.name,
                format!("corrupt value under '{}': {}", String::from_utf8_lossy(key), e),
            )
        })
    }
}

impl KeyValueStore for SledStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_item(&self, key: &str, value: &Value) -> Result<()> {
        let bytes = serde_json::to_vec(value)?;
        self.tree.insert(key.as_bytes(), bytes)?;
        self.tree.flush()?;
        Ok(())
    }

    fn get_item(&self, key: &str) -> Result<Option<Value>> {
        match self.tree.get(key.as_bytes())? {
            Some(bytes) => Ok(Some(self.decode(key.as_bytes(), &bytes)?)),
            None => Ok(None),
        }
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.tree.remove(key.as_bytes())?;
        self.tree.flush()?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.tree.clear()?;
        self.tree.flush()?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        self.tree
            .iter()
            .keys()
            .map(|key| -> Result<String> { Ok(String::from_utf8_lossy(&key?).into_owned()) })
            .collect()
    }

    fn len(&self) -> Result<usize> {
        Ok(self.tree.len())
    }

    fn iterate(&self, visit: &mut dyn FnMut(&str, &Value)) -> Result<()> {
        for item in self.tree.iter() {
            let (key, bytes) = item?;
            let value = self.decode(&key, &bytes)?;
            visit(&String::from_utf8_lossy(&key), &value);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_trees_are_separate() {
        let dir = TempDir::new().unwrap();
        let db = sled::open(dir.path()).unwrap();
        let logs = SledStore::new(&db, "logs").unwrap();
        let config = SledStore::new(&db, "config").unwrap();

        logs.set_item("k", &json!("log")).unwrap();
        config.set_item("k", &json!({"level": "warn"})).unwrap();

        assert_eq!(logs.get_item("k").unwrap(), Some(json!("log")));
        assert_eq!(config.get_item("k").unwrap(), Some(json!({"level": "warn"})));

        logs.clear().unwrap();
        assert!(logs.is_empty().unwrap());
        assert_eq!(config.len().unwrap(), 1);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let db = sled::open(dir.path()).unwrap();
            let store = SledStore::new(&db, "config").unwrap();
            store.set_item("app", &json!({"enabled": false})).unwrap();
        }
        let db = sled::open(dir.path()).unwrap();
        let store = SledStore::new(&db, "config").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["app"]);
        assert_eq!(store.get_item("app").unwrap(), Some(json!({"enabled": false})));
    }
}
