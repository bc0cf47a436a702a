//! Timestamp formatting utilities
//!
//! Titles carry local wall-clock time by default; exported log files are
//! stamped with a filesystem-safe variant of the same clock.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp format used for the `$time$` placeholder
///
/// # Examples
///
/// ```
/// use namespace_logger::TimestampFormat;
///
/// let format = TimestampFormat::default();
/// let text = format.now();
/// // e.g. "2025-01-08 10:30:45"
/// assert_eq!(text.len(), 19);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Local time `2025-01-08 10:30:45`
    #[default]
    LocalDateTime,

    /// Local time with underscores, safe in file names: `2025_01_08_10_30_45`
    FileStamp,

    /// ISO 8601 UTC with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// RFC 3339 with the local offset: `2025-01-08T10:30:45+08:00`
    Rfc3339,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format, applied to local time
    ///
    /// ```
    /// use namespace_logger::TimestampFormat;
    ///
    /// let format = TimestampFormat::Custom("%H:%M:%S".to_string());
    /// assert_eq!(format.now().len(), 8);
    /// ```
    Custom(String),
}

impl TimestampFormat {
    /// Format a local `DateTime` according to this format
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Local>) -> String {
        match self {
            TimestampFormat::LocalDateTime => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
            TimestampFormat::FileStamp => datetime.format("%Y_%m_%d_%H_%M_%S").to_string(),
            TimestampFormat::Iso8601 => datetime
                .with_timezone(&Utc)
                .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                .to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }

    /// Format the current local time
    #[must_use]
    pub fn now(&self) -> String {
        self.format(&Local::now())
    }
}
