//! Logging macros for ergonomic message formatting.
//!
//! The level macros format their arguments like `format!` and log the
//! result as a single message. [`messages!`](crate::messages) builds a
//! multi-value [`Messages`](crate::Messages) list.
//!
//! # Examples
//!
//! ```
//! use namespace_logger::prelude::*;
//! use namespace_logger::{info, messages};
//!
//! let logger = Logger::builder("server").sink(MemoryConsole::new()).build();
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! logger.warn(messages!["slow request", serde_json::json!({"ms": 812})]);
//! ```

/// Build a [`Messages`](crate::Messages) list from values convertible
/// into `serde_json::Value`.
///
/// ```
/// use namespace_logger::messages;
///
/// let list = messages!["user", 42, true];
/// assert_eq!(list.len(), 3);
/// assert!(messages![].is_empty());
/// ```
#[macro_export]
macro_rules! messages {
    () => {
        $crate::Messages::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Messages::new()$(.with($value))+
    };
}

/// Log an unleveled, formatted message.
///
/// ```
/// # use namespace_logger::prelude::*;
/// # let logger = Logger::builder("app").sink(MemoryConsole::new()).build();
/// use namespace_logger::log;
/// log!(logger, "Simple message");
/// log!(logger, "Status code: {}", 204);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log(format!($($arg)+))
    };
}

/// Log a debug-level message.
///
/// ```
/// # use namespace_logger::prelude::*;
/// # let logger = Logger::builder("app").sink(MemoryConsole::new()).build();
/// use namespace_logger::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug(format!($($arg)+))
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.info(format!($($arg)+))
    };
}

/// Log a warning-level message.
///
/// ```
/// # use namespace_logger::prelude::*;
/// # let logger = Logger::builder("app").sink(MemoryConsole::new()).build();
/// use namespace_logger::warn;
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warn(format!($($arg)+))
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.error(format!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{LogLevel, Logger};
    use crate::sinks::MemoryConsole;
    use serde_json::{json, Value};

    fn capture() -> (Logger, MemoryConsole) {
        let console = MemoryConsole::new();
        let logger = Logger::builder("Macros")
            .formatter("[$namespace$]")
            .emoji(false)
            .color(false)
            .sink(console.clone())
            .build();
        (logger, console)
    }

    #[test]
    fn test_level_macros_format_arguments() {
        let (logger, console) = capture();
        log!(logger, "plain {}", 1);
        debug!(logger, "count: {}", 5);
        info!(logger, "items: {}", 100);
        warn!(logger, "retry {} of {}", 1, 3);
        error!(logger, "code: {}", 500);

        let logs = console.logs();
        let levels: Vec<LogLevel> = logs.iter().map(|(level, _)| *level).collect();
        assert_eq!(
            levels,
            vec![
                LogLevel::Silent,
                LogLevel::Debug,
                LogLevel::Info,
                LogLevel::Warn,
                LogLevel::Error
            ]
        );
        assert_eq!(console.log_lines()[3], "[Macros] retry 1 of 3");
    }

    #[test]
    fn test_messages_macro_keeps_values() {
        let list = messages!["a", 2, json!({"k": null})];
        assert_eq!(
            list.values(),
            &[Value::from("a"), Value::from(2), json!({"k": null})]
        );
    }
}
