//! Core logger types and traits

pub mod call_stack;
pub mod color;
pub mod dispatcher;
pub mod error;
pub mod formatter;
pub mod image;
pub mod local;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod message;
pub mod metrics;
pub mod notice;
pub mod options;
pub mod overflow_policy;
pub mod recorder;
pub mod registry;
pub mod sink;
pub mod style;
pub mod template;
pub mod timestamp;

pub use call_stack::CallStackInfo;
pub use dispatcher::{PrintKind, PrintRequest};
pub use error::{LoggerError, Result};
pub use image::ImageData;
pub use local::{DiagnosticHook, DiagnosticLevel};
pub use log_entry::LogEntry;
pub use log_level::{should_log, LogLevel};
pub use logger::{Logger, LoggerBuilder};
pub use message::Messages;
pub use metrics::LoggerMetrics;
pub use options::{
    ConfigPatch, Env, Language, LogOptions, LoggerConfig, LoggerOptions, StyleDefaults, Target,
    DEFAULT_NAMESPACE,
};
pub use overflow_policy::{OverflowCallback, OverflowPolicy};
pub use recorder::{Recorder, DEFAULT_QUEUE_CAPACITY, DEFAULT_SHUTDOWN_TIMEOUT};
pub use registry::{create_logger, Registry, RegistrySetting};
pub use sink::{ConsoleArg, ConsoleSink};
pub use style::{Style, StyledCall, TerminalOnlyFlag};
pub use template::{render_title, TitleFields, DEFAULT_TEMPLATE};
pub use timestamp::TimestampFormat;
