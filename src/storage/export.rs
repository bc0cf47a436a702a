//! Export of recorded logs to text

use super::KeyValueStore;
use crate::core::local::{local_log, local_warn};
use crate::core::{LogEntry, Logger, Result, TimestampFormat};
use chrono::Local;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// All recorded entries of a store, oldest first.
///
/// Values that do not decode as entries are skipped with a warning.
pub fn recorded_entries(store: &dyn KeyValueStore) -> Result<Vec<LogEntry>> {
    let mut entries = Vec::new();
    let mut skipped = 0usize;
    store.iterate(&mut |_, value| {
        match serde_json::from_value::<LogEntry>(value.clone()) {
            Ok(entry) => entries.push(entry),
            Err(_) => skipped += 1,
        }
    })?;
    if skipped > 0 {
        local_warn(format!(
            "skipped {} undecodable entries in store '{}'",
            skipped,
            store.name()
        ));
    }
    entries.sort_by_key(|entry| entry.timestamp);
    Ok(entries)
}

/// Each message on its own paragraph: strings verbatim, values as
/// indented JSON
fn serialize_messages(messages: &[Value]) -> String {
    messages
        .iter()
        .map(|message| match message {
            Value::String(text) => format!("\n\n{}", text),
            other => format!(
                "\n\n{}",
                serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string())
            ),
        })
        .collect()
}

/// Render every recorded entry as `<title> -> <messages>` paragraphs
pub fn export_logs(store: &dyn KeyValueStore) -> Result<String> {
    let content = recorded_entries(store)?
        .iter()
        .map(|entry| {
            format!(
                "{} -> {}\n\n",
                entry.title,
                serialize_messages(entry.messages.values())
            )
        })
        .collect();
    Ok(content)
}

/// Write a logger's recorded entries to `<dir>/<namespace>_<stamp>.log`
/// and clear its store.
///
/// Pending records are flushed first. Returns `Ok(None)` with a warning
/// when nothing was recorded.
pub fn download_logs(logger: &Logger, dir: impl AsRef<Path>) -> Result<Option<PathBuf>> {
    if let Err(e) = logger.flush_records() {
        local_warn(format!("pending records of '{}' not flushed: {}", logger.namespace(), e));
    }

    let store = logger.stores().logs.as_ref();
    if store.is_empty()? {
        local_warn(format!(
            "download logs failed! store of '{}' is empty",
            logger.namespace()
        ));
        return Ok(None);
    }

    let content = export_logs(store)?;
    let stamp = TimestampFormat::FileStamp.format(&Local::now());
    let path = dir
        .as_ref()
        .join(format!("{}_{}.log", logger.namespace(), stamp));
    std::fs::write(&path, content)?;
    store.clear()?;

    local_log(format!("download logs success! {}", path.display()));
    Ok(Some(path))
}
