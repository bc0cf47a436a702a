//! Recorded log entry

use super::log_level::LogLevel;
use super::message::Messages;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One log call as written to the `logs` store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Rendered title without target decoration
    pub title: String,
    pub messages: Messages,
    pub level: LogLevel,
    pub namespace: String,
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    pub fn new(
        namespace: impl Into<String>,
        level: LogLevel,
        title: impl Into<String>,
        messages: Messages,
    ) -> Self {
        Self {
            title: title.into(),
            messages,
            level,
            namespace: namespace.into(),
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_json_shape() {
        let entry = LogEntry::new(
            "App",
            LogLevel::Warn,
            "[App] [WARN]",
            Messages::new().with("disk").with(json!({"free": 3})),
        );
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["level"], "warn");
        assert_eq!(value["messages"], json!(["disk", {"free": 3}]));

        let back: LogEntry = serde_json::from_value(value).unwrap();
        assert_eq!(back, entry);
    }
}
