//! Key-value persistence for recorded logs and logger configuration
//!
//! Two stores are used per logger: `logs` holds recorded entries keyed by a
//! random id, `config` holds one persisted [`crate::LoggerConfig`] per
//! namespace.

pub mod export;
pub mod memory;
#[cfg(feature = "sled-store")]
pub mod sled_store;

pub use export::{download_logs, export_logs, recorded_entries};
pub use memory::MemoryStore;
#[cfg(feature = "sled-store")]
pub use sled_store::SledStore;

use crate::core::error::Result;
use serde_json::Value;
use std::sync::Arc;

/// Store holding recorded log entries
pub const LOGS_STORE: &str = "logs";
/// Store holding persisted logger configuration
pub const CONFIG_STORE: &str = "config";

/// A named string-keyed store of JSON values
pub trait KeyValueStore: Send + Sync {
    fn name(&self) -> &str;

    fn set_item(&self, key: &str, value: &Value) -> Result<()>;

    fn get_item(&self, key: &str) -> Result<Option<Value>>;

    fn remove_item(&self, key: &str) -> Result<()>;

    fn clear(&self) -> Result<()>;

    fn keys(&self) -> Result<Vec<String>>;

    fn len(&self) -> Result<usize>;

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Visit every entry in key order
    fn iterate(&self, visit: &mut dyn FnMut(&str, &Value)) -> Result<()>;
}

/// The pair of stores a logger records into
#[derive(Clone)]
pub struct LogStores {
    pub logs: Arc<dyn KeyValueStore>,
    pub config: Arc<dyn KeyValueStore>,
}

impl LogStores {
    pub fn new(logs: Arc<dyn KeyValueStore>, config: Arc<dyn KeyValueStore>) -> Self {
        Self { logs, config }
    }

    /// Fresh process-local stores
    pub fn in_memory() -> Self {
        Self {
            logs: Arc::new(MemoryStore::new(LOGS_STORE)),
            config: Arc::new(MemoryStore::new(CONFIG_STORE)),
        }
    }

    /// Both stores as trees of one sled database
    #[cfg(feature = "sled-store")]
    pub fn open_sled(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let db = sled::open(path)?;
        Ok(Self {
            logs: Arc::new(SledStore::new(&db, LOGS_STORE)?),
            config: Arc::new(SledStore::new(&db, CONFIG_STORE)?),
        })
    }
}

impl std::fmt::Debug for LogStores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogStores")
            .field("logs", &self.logs.name())
            .field("config", &self.config.name())
            .finish()
    }
}
