//! # Namespace Logger
//!
//! A namespaced, decorated console logger.
//!
//! Every [`Logger`] carries a namespace, a minimum level and a title
//! template. Log calls are gated by level, decorated through a fluent
//! call-scoped style builder, rendered for an ANSI terminal or a browser
//! devtools console, and optionally recorded into a key-value store for
//! later export.
//!
//! ## Features
//!
//! - **Call-scoped styling**: `logger.color("red").label("cart").warn(..)`
//!   decorates exactly one call
//! - **Call-site tracking**: file, function and line of the caller in the
//!   `$tracker$` placeholder
//! - **Two targets**: ANSI terminals and `%c`-style browser consoles
//! - **Recording**: off-thread persistence into memory or `sled` stores,
//!   with text export
//! - **Registry**: one logger per namespace with process-wide settings
//!
//! ## Example
//!
//! ```
//! use namespace_logger::prelude::*;
//!
//! let console = MemoryConsole::new();
//! let logger = Logger::builder("checkout")
//!     .level(LogLevel::Info)
//!     .sink(console.clone())
//!     .build();
//!
//! logger.debug("hidden");
//! logger.color("orange").label("payment").warn("card declined");
//!
//! assert_eq!(console.log_lines().len(), 1);
//! ```

pub mod core;
pub mod macros;
pub mod sinks;
pub mod storage;

pub mod prelude {
    pub use crate::core::{
        create_logger, ConfigPatch, ConsoleArg, ConsoleSink, Env, Language, LogEntry, LogLevel,
        LogOptions, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
        LoggerOptions, Messages, OverflowCallback, OverflowPolicy, Registry, RegistrySetting,
        Result, StyleDefaults, StyledCall, Target, TimestampFormat,
    };
    pub use crate::sinks::{FileConsole, MemoryConsole, SinkRecord, TerminalConsole};
    pub use crate::storage::{download_logs, export_logs, KeyValueStore, LogStores, MemoryStore};
}

pub use crate::core::{
    create_logger, should_log, CallStackInfo, ConfigPatch, ConsoleArg, ConsoleSink,
    DiagnosticHook, DiagnosticLevel, Env, ImageData, Language, LogEntry, LogLevel, LogOptions,
    Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, LoggerOptions, Messages,
    OverflowCallback, OverflowPolicy, PrintKind, PrintRequest, Registry, RegistrySetting, Result,
    Style, StyleDefaults, StyledCall, Target, TerminalOnlyFlag, TimestampFormat,
    DEFAULT_NAMESPACE, DEFAULT_SHUTDOWN_TIMEOUT, DEFAULT_TEMPLATE,
};
pub use crate::core::local::{clear_diagnostic_hook, set_diagnostic_hook};
pub use sinks::{FileConsole, MemoryConsole, SinkRecord, TerminalConsole};
#[cfg(feature = "sled-store")]
pub use storage::SledStore;
pub use storage::{
    download_logs, export_logs, recorded_entries, KeyValueStore, LogStores, MemoryStore,
};
