//! Log level definitions and the level gate

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log call.
///
/// The four real severities are ordered `Debug < Info < Warn < Error`.
/// `Silent` is a sentinel used by unleveled calls (`log`, `time`, `table`,
/// `image`); it always passes [`should_log`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    Debug,
    Info,
    Warn,
    Error,
    Silent,
}

/// Gated severities in ascending order.
pub const ORDERED_LEVELS: [LogLevel; 4] = [
    LogLevel::Debug,
    LogLevel::Info,
    LogLevel::Warn,
    LogLevel::Error,
];

impl LogLevel {
    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Silent => "SILENT",
        }
    }

    /// Lower-case name, as accepted by configuration setters
    pub fn as_key(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Silent => "silent",
        }
    }

    /// Position in [`ORDERED_LEVELS`], `None` for `Silent`
    #[inline]
    pub fn ordinal(&self) -> Option<usize> {
        ORDERED_LEVELS.iter().position(|level| level == self)
    }

    /// Text used for the `$level$` placeholder; empty for `Silent`
    pub fn title(&self) -> &'static str {
        match self {
            LogLevel::Silent => "",
            other => other.to_str(),
        }
    }
}

/// Decide whether a call at `requested` passes a `minimum` threshold.
///
/// Absent or `Silent` requests always pass. Otherwise the request passes when
/// its ordinal is at least the minimum's (`Debug` when unset). A `Silent`
/// minimum has no ordinal and lets every call through.
pub fn should_log(requested: Option<LogLevel>, minimum: Option<LogLevel>) -> bool {
    let requested = match requested {
        None | Some(LogLevel::Silent) => return true,
        Some(level) => level,
    };
    let minimum = minimum.unwrap_or(LogLevel::Debug);
    match requested.ordinal() {
        Some(req) => minimum.ordinal().map_or(true, |min| req >= min),
        None => true,
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "silent" => Ok(LogLevel::Silent),
            _ => Err(format!(
                "level must be one of debug, info, warn, error, silent (got '{}')",
                s
            )),
        }
    }
}
