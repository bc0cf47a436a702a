//! Namespaced logger
//!
//! A [`Logger`] owns its console sink, its runtime config and the stores it
//! records into. Every public logging method funnels into [`Logger::print`],
//! which gates the call, resolves the call-site, renders and dispatches.

use super::call_stack::{self, CallStackInfo};
use super::dispatcher::{self, PrintRequest};
use super::error::{LoggerError, Result};
use super::formatter::RenderContext;
use super::local::{local_error, local_warn};
use super::log_entry::LogEntry;
use super::log_level::{should_log, LogLevel};
use super::message::Messages;
use super::metrics::LoggerMetrics;
use super::notice::debug_alert_text;
use super::options::{
    ConfigPatch, Env, Language, LogOptions, LoggerConfig, LoggerOptions, StyleDefaults, Target,
    DEFAULT_NAMESPACE,
};
use super::overflow_policy::{OverflowCallback, OverflowPolicy};
use super::recorder::{Recorder, DEFAULT_QUEUE_CAPACITY, DEFAULT_SHUTDOWN_TIMEOUT};
use super::sink::ConsoleSink;
use super::style::{Style, StyledCall, TerminalOnlyFlag};
use super::template::DEFAULT_TEMPLATE;
use super::timestamp::TimestampFormat;
use crate::sinks::TerminalConsole;
use crate::storage::LogStores;
use chrono::Local;
use once_cell::sync::OnceCell;
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use std::collections::HashSet;
use std::panic::{AssertUnwindSafe, Location};
use std::path::PathBuf;
use std::sync::Arc;

pub struct Logger {
    namespace: String,
    config: RwLock<LoggerConfig>,
    options: RwLock<LogOptions>,
    sink: Mutex<Box<dyn ConsoleSink>>,
    stores: LogStores,
    /// Spawned on the first recorded entry
    recorder: OnceCell<Recorder>,
    queue_capacity: usize,
    overflow_policy: OverflowPolicy,
    on_overflow: Option<OverflowCallback>,
    /// Capabilities already warned about
    warned: Mutex<HashSet<&'static str>>,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    pub fn builder(namespace: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(namespace)
    }

    /// Logger with default options writing to the terminal
    #[must_use]
    pub fn new(namespace: impl Into<String>) -> Self {
        LoggerBuilder::new(namespace).build()
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Snapshot of the runtime config
    pub fn config(&self) -> LoggerConfig {
        self.config.read().clone()
    }

    /// Snapshot of the formatting options
    pub fn options(&self) -> LogOptions {
        self.options.read().clone()
    }

    pub fn is_enabled(&self) -> bool {
        self.config.read().enabled
    }

    pub fn level(&self) -> LogLevel {
        self.config.read().level
    }

    pub fn target(&self) -> Target {
        self.options.read().target
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn stores(&self) -> &LogStores {
        &self.stores
    }

    /// Apply a partial config update.
    ///
    /// With `persist_config` on, the resulting config is written to the
    /// config store under the namespace; with it off, any stored copy is
    /// removed.
    pub fn set_config(&self, patch: ConfigPatch) {
        if patch.is_empty() {
            return;
        }
        let snapshot = {
            let mut config = self.config.write();
            config.apply(&patch);
            config.clone()
        };
        self.persist_config(&snapshot);
    }

    /// Set one config switch from its name and textual value.
    ///
    /// Returns `false`, with a diagnostic, when the name or value is not
    /// recognised.
    pub fn set_config_value(&self, name: &str, raw: &str) -> bool {
        match ConfigPatch::from_named(name, raw) {
            Ok(patch) => {
                self.set_config(patch);
                true
            }
            Err(e) => {
                local_warn(format!("[{}] {}", self.namespace, e));
                false
            }
        }
    }

    /// Edit the formatting options in place
    pub fn patch_options(&self, change: impl FnOnce(&mut LogOptions)) {
        let mut options = self.options.write();
        change(&mut options);
        if options.formatter.trim().is_empty() {
            options.formatter = DEFAULT_TEMPLATE.to_string();
        }
        if options.target == Target::Browser {
            options.style.clear_terminal_only();
        }
    }

    fn persist_config(&self, config: &LoggerConfig) {
        let store = &self.stores.config;
        let result = if config.persist_config {
            serde_json::to_value(config)
                .map_err(LoggerError::from)
                .and_then(|value| store.set_item(&self.namespace, &value))
        } else {
            store.remove_item(&self.namespace)
        };
        if let Err(e) = result {
            local_warn(format!("config of '{}' not persisted: {}", self.namespace, e));
        }
    }

    /// Whether a terminal-only emphasis flag can be rendered.
    ///
    /// Browser loggers warn once per flag and ignore it.
    pub(crate) fn supports(&self, flag: TerminalOnlyFlag) -> bool {
        if self.target() != Target::Browser {
            return true;
        }
        self.warn_capability(
            flag.name(),
            &format!("{} is not supported by browser consoles and is ignored", flag.name()),
        );
        false
    }

    fn warn_capability(&self, capability: &'static str, message: &str) {
        if self.warned.lock().insert(capability) {
            local_warn(format!("[{}] {}", self.namespace, message));
        }
    }

    pub fn style(&self) -> StyledCall<'_> {
        StyledCall::new(self)
    }

    pub fn color(&self, color: impl Into<String>) -> StyledCall<'_> {
        StyledCall::new(self).color(color)
    }

    pub fn bg_color(&self, color: impl Into<String>) -> StyledCall<'_> {
        StyledCall::new(self).bg_color(color)
    }

    pub fn label(&self, label: impl Into<String>) -> StyledCall<'_> {
        StyledCall::new(self).label(label)
    }

    pub fn bold(&self) -> StyledCall<'_> {
        StyledCall::new(self).bold()
    }

    pub fn italic(&self) -> StyledCall<'_> {
        StyledCall::new(self).italic()
    }

    pub fn underline(&self) -> StyledCall<'_> {
        StyledCall::new(self).underline()
    }

    pub fn strikethrough(&self) -> StyledCall<'_> {
        StyledCall::new(self).strikethrough()
    }

    pub fn overline(&self) -> StyledCall<'_> {
        StyledCall::new(self).overline()
    }

    pub fn dim(&self) -> StyledCall<'_> {
        StyledCall::new(self).dim()
    }

    pub fn inverse(&self) -> StyledCall<'_> {
        StyledCall::new(self).inverse()
    }

    /// Ignore the logger's default decoration for the next call
    pub fn reset(&self) -> StyledCall<'_> {
        StyledCall::new(self).reset()
    }

    /// Unleveled message; shown whenever the logger is enabled
    #[track_caller]
    pub fn log(&self, messages: impl Into<Messages>) -> &Self {
        let request = PrintRequest::log(LogLevel::Silent, messages.into());
        self.print(request, Style::default(), Location::caller());
        self
    }

    #[track_caller]
    pub fn debug(&self, messages: impl Into<Messages>) -> &Self {
        let request = PrintRequest::log(LogLevel::Debug, messages.into());
        self.print(request, Style::default(), Location::caller());
        self
    }

    #[track_caller]
    pub fn info(&self, messages: impl Into<Messages>) -> &Self {
        let request = PrintRequest::log(LogLevel::Info, messages.into());
        self.print(request, Style::default(), Location::caller());
        self
    }

    #[track_caller]
    pub fn warn(&self, messages: impl Into<Messages>) -> &Self {
        let request = PrintRequest::log(LogLevel::Warn, messages.into());
        self.print(request, Style::default(), Location::caller());
        self
    }

    #[track_caller]
    pub fn error(&self, messages: impl Into<Messages>) -> &Self {
        let request = PrintRequest::log(LogLevel::Error, messages.into());
        self.print(request, Style::default(), Location::caller());
        self
    }

    #[track_caller]
    pub fn time(&self) -> &Self {
        self.print(PrintRequest::Time, Style::default(), Location::caller());
        self
    }

    #[track_caller]
    pub fn time_end(&self) -> &Self {
        self.print(PrintRequest::TimeEnd, Style::default(), Location::caller());
        self
    }

    #[track_caller]
    pub fn table(&self, data: impl Into<Value>) -> &Self {
        let request = PrintRequest::Table(data.into());
        self.print(request, Style::default(), Location::caller());
        self
    }

    #[track_caller]
    pub fn image(&self, path: impl Into<PathBuf>, scale: f64) -> &Self {
        let request = PrintRequest::Image {
            path: path.into(),
            scale,
        };
        self.print(request, Style::default(), Location::caller());
        self
    }

    /// Gate, render and dispatch one call.
    ///
    /// Must be called directly from a public logging method: the call-site
    /// is found by counting frames from here.
    #[inline(never)]
    pub(crate) fn print(&self, request: PrintRequest, style: Style, caller: &Location<'_>) {
        let config = self.config();
        let level = request.level();
        if !config.enabled || !should_log(Some(level), Some(config.level)) {
            self.metrics.record_gated();
            return;
        }

        let options = self.options.read();
        let alert = level == LogLevel::Debug && config.debug_alert && options.target == Target::Browser;
        let call_site = if alert || options.formatter.contains("$tracker$") {
            call_stack::resolve(options.skip_depth, Some(caller))
        } else {
            CallStackInfo::default()
        };

        let style = style.merged_over(&options.style);
        let now = Local::now();
        let ctx = RenderContext {
            namespace: &self.namespace,
            level,
            call_site: &call_site,
            style: &style,
            options: &options,
            source_location_visible: config.source_location_visible,
            now,
        };

        match request {
            PrintRequest::Log { messages, .. } => {
                let Some(title) = self.with_sink(|sink| dispatcher::emit_log(sink, &ctx, &messages))
                else {
                    return;
                };
                self.metrics.record_emitted();
                if config.record_to_storage {
                    self.record(LogEntry::new(&self.namespace, level, title, messages));
                }
                if alert {
                    let text = debug_alert_text(
                        config.language,
                        &TimestampFormat::LocalDateTime.format(&now),
                        &self.namespace,
                        &style.labels,
                        &call_site,
                    );
                    self.with_sink(|sink| sink.alert(&text));
                }
            }
            PrintRequest::Time => {
                if self.with_sink(|sink| dispatcher::emit_time(sink, &ctx)).is_some() {
                    self.metrics.record_emitted();
                }
            }
            PrintRequest::TimeEnd => {
                if self.with_sink(|sink| dispatcher::emit_time_end(sink, &ctx)).is_some() {
                    self.metrics.record_emitted();
                }
            }
            PrintRequest::Table(data) => {
                if self.with_sink(|sink| dispatcher::emit_table(sink, &ctx, &data)).is_some() {
                    self.metrics.record_emitted();
                }
            }
            PrintRequest::Image { path, scale } => {
                if options.target != Target::Browser {
                    self.warn_capability("image", "images can only be logged to browser consoles");
                    return;
                }
                match dispatcher::image_args(&ctx, &path, scale) {
                    Ok(args) => {
                        if self.with_sink(|sink| sink.log(LogLevel::Silent, &args)).is_some() {
                            self.metrics.record_emitted();
                        }
                    }
                    Err(e) => local_warn(format!("[{}] image not logged: {}", self.namespace, e)),
                }
            }
        }
    }

    /// Run a sink operation; failures and panics are reported locally and
    /// never reach the caller.
    fn with_sink<T>(&self, op: impl FnOnce(&mut dyn ConsoleSink) -> Result<T>) -> Option<T> {
        let mut sink = self.sink.lock();
        let result = std::panic::catch_unwind(AssertUnwindSafe(|| op(&mut **sink)));
        match result {
            Ok(Ok(value)) => Some(value),
            Ok(Err(e)) => {
                local_error(format!("console '{}' failed: {}", sink.name(), e));
                None
            }
            Err(panic) => {
                let reason = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                local_error(format!("console '{}' panicked: {}", sink.name(), reason));
                None
            }
        }
    }

    fn record(&self, entry: LogEntry) {
        let recorder = self.recorder.get_or_init(|| {
            Recorder::spawn(
                Arc::clone(&self.stores.logs),
                self.queue_capacity,
                self.overflow_policy.clone(),
                self.on_overflow.clone(),
                Arc::clone(&self.metrics),
            )
        });
        recorder.record(entry);
    }

    /// Wait until every queued entry has reached the log store
    pub fn flush_records(&self) -> Result<()> {
        match self.recorder.get() {
            None => Ok(()),
            Some(recorder) if recorder.flush(DEFAULT_SHUTDOWN_TIMEOUT) => Ok(()),
            Some(_) => Err(LoggerError::RecorderStopped),
        }
    }

    /// Flush the console sink and pending records
    pub fn flush(&self) -> Result<()> {
        self.sink.lock().flush()?;
        self.flush_records()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.sink.get_mut().flush() {
            local_error(format!("console of '{}' not flushed: {}", self.namespace, e));
        }
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("namespace", &self.namespace)
            .field("config", &*self.config.read())
            .field("sink", &self.sink.lock().name())
            .field("stores", &self.stores)
            .finish()
    }
}

/// Builder for [`Logger`]
///
/// # Example
///
/// ```
/// use namespace_logger::prelude::*;
///
/// let logger = Logger::builder("payments")
///     .level(LogLevel::Warn)
///     .emoji(false)
///     .sink(MemoryConsole::new())
///     .build();
/// assert_eq!(logger.level(), LogLevel::Warn);
/// ```
pub struct LoggerBuilder {
    namespace: String,
    options: LoggerOptions,
    sink: Option<Box<dyn ConsoleSink>>,
    stores: Option<LogStores>,
    queue_capacity: usize,
    overflow_policy: OverflowPolicy,
    on_overflow: Option<OverflowCallback>,
}

impl LoggerBuilder {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            options: LoggerOptions::default(),
            sink: None,
            stores: None,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            overflow_policy: OverflowPolicy::default(),
            on_overflow: None,
        }
    }

    /// Replace every option at once
    pub fn options(mut self, options: LoggerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn env(mut self, env: Env) -> Self {
        self.options.env = env;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.options.enabled = Some(enabled);
        self
    }

    pub fn level(mut self, level: LogLevel) -> Self {
        self.options.level = Some(level);
        self
    }

    pub fn target(mut self, target: Target) -> Self {
        self.options.target = target;
        self
    }

    pub fn formatter(mut self, template: impl Into<String>) -> Self {
        self.options.formatter = Some(template.into());
        self
    }

    pub fn emoji(mut self, emoji: bool) -> Self {
        self.options.emoji = emoji;
        self
    }

    pub fn color(mut self, color: bool) -> Self {
        self.options.color = color;
        self
    }

    pub fn level_color(mut self, level: LogLevel, color: impl Into<String>) -> Self {
        self.options.level_colors.insert(level, color.into());
        self
    }

    pub fn skip_depth(mut self, depth: usize) -> Self {
        self.options.skip_depth = depth;
        self
    }

    pub fn style(mut self, style: StyleDefaults) -> Self {
        self.options.style = style;
        self
    }

    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.options.timestamp_format = format;
        self
    }

    pub fn record_to_storage(mut self, record: bool) -> Self {
        self.options.record_to_storage = record;
        self
    }

    pub fn persist_config(mut self, persist: bool) -> Self {
        self.options.persist_config = persist;
        self
    }

    pub fn source_location_visible(mut self, visible: bool) -> Self {
        self.options.source_location_visible = visible;
        self
    }

    pub fn debug_alert(mut self, alert: bool) -> Self {
        self.options.debug_alert = alert;
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.options.language = language;
        self
    }

    pub fn sink(mut self, sink: impl ConsoleSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn stores(mut self, stores: LogStores) -> Self {
        self.stores = Some(stores);
        self
    }

    /// Capacity of the record queue
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    pub fn overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.overflow_policy = policy;
        self
    }

    /// Called with the total drop count whenever a record is dropped
    pub fn on_overflow(mut self, callback: OverflowCallback) -> Self {
        self.on_overflow = Some(callback);
        self
    }

    /// Build the logger.
    ///
    /// A config previously persisted for the namespace takes precedence
    /// over the options.
    pub fn build(self) -> Logger {
        let namespace = if self.namespace.trim().is_empty() {
            DEFAULT_NAMESPACE.to_string()
        } else {
            self.namespace
        };
        let (mut config, options) = self.options.split();
        let stores = self.stores.unwrap_or_else(LogStores::in_memory);

        match stores.config.get_item(&namespace) {
            Ok(Some(value)) => match serde_json::from_value::<LoggerConfig>(value) {
                Ok(persisted) => config = persisted,
                Err(e) => local_warn(format!("ignoring persisted config of '{}': {}", namespace, e)),
            },
            Ok(None) => {}
            Err(e) => local_warn(format!("persisted config of '{}' unreadable: {}", namespace, e)),
        }

        Logger {
            namespace,
            config: RwLock::new(config),
            options: RwLock::new(options),
            sink: Mutex::new(
                self.sink
                    .unwrap_or_else(|| Box::new(TerminalConsole::new())),
            ),
            stores,
            recorder: OnceCell::new(),
            queue_capacity: self.queue_capacity,
            overflow_policy: self.overflow_policy,
            on_overflow: self.on_overflow,
            warned: Mutex::new(HashSet::new()),
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::image::tests::png_header;
    use crate::core::local::{clear_diagnostic_hook, set_diagnostic_hook, HOOK_TEST_LOCK};
    use crate::sinks::{MemoryConsole, SinkRecord};
    use crate::storage::recorded_entries;
    use tempfile::TempDir;

    fn capture_logger(builder: LoggerBuilder) -> (Logger, MemoryConsole) {
        let console = MemoryConsole::new();
        (builder.emoji(false).color(false).sink(console.clone()).build(), console)
    }

    /// Diagnostics mentioning `namespace`, collected until the hook is cleared
    fn capture_diagnostics(namespace: &'static str) -> Arc<Mutex<Vec<String>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        set_diagnostic_hook(Arc::new(move |_, message: &str| {
            if message.contains(namespace) {
                sink.lock().push(message.to_string());
            }
        }));
        seen
    }

    #[test]
    fn test_level_gate() {
        let (logger, console) = capture_logger(Logger::builder("App").level(LogLevel::Warn));
        logger.debug("d").info("i").warn("w").error("e").log("plain");

        let lines = console.log_lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("w"));
        assert!(lines[2].ends_with("plain"));
        assert_eq!(logger.metrics().gated(), 2);
        assert_eq!(logger.metrics().emitted(), 3);
    }

    #[test]
    fn test_disabled_logger_is_silent() {
        let (logger, console) = capture_logger(Logger::builder("App").enabled(false));
        logger.log("x").error("y").table(serde_json::json!([1])).time();
        assert!(console.is_empty());
    }

    #[test]
    fn test_silent_minimum_lets_every_level_through() {
        let (logger, console) = capture_logger(Logger::builder("App").level(LogLevel::Silent));
        logger.debug("d").info("i").error("e").log("plain");
        assert_eq!(console.log_lines().len(), 4);
        assert_eq!(logger.metrics().gated(), 0);
    }

    #[test]
    fn test_labels_do_not_leak_between_calls() {
        let (logger, console) = capture_logger(Logger::builder("App").formatter("[$label$]"));
        logger.label("a").label("b").info("first");
        logger.info("second");

        let lines = console.log_lines();
        assert_eq!(lines[0], "[a|b] first");
        assert_eq!(lines[1], "second");
    }

    #[test]
    fn test_tracker_points_at_caller() {
        let (logger, console) =
            capture_logger(Logger::builder("App").formatter("[$tracker$]"));
        logger.info("here");
        let line = &console.log_lines()[0];
        assert!(line.contains("logger.rs:"), "{}", line);
    }

    #[test]
    fn test_terminal_only_flags_warn_once_on_browser() {
        let _guard = HOOK_TEST_LOCK.lock();
        let seen = capture_diagnostics("[DimWeb]");
        let (logger, console) = capture_logger(Logger::builder("DimWeb").target(Target::Browser));

        logger.dim().info("a");
        logger.dim().overline().info("b");
        clear_diagnostic_hook();

        let warnings = seen.lock().clone();
        assert_eq!(warnings.len(), 2, "{:?}", warnings);
        assert!(warnings[0].contains("dim"));
        assert!(warnings[1].contains("overline"));
        assert_eq!(console.log_lines().len(), 2);
    }

    #[test]
    fn test_image_on_terminal_warns_and_skips() {
        let _guard = HOOK_TEST_LOCK.lock();
        let seen = capture_diagnostics("[ImageTerm]");
        let (logger, console) = capture_logger(Logger::builder("ImageTerm"));

        logger.image("missing.png", 1.0).image("missing.png", 1.0);
        clear_diagnostic_hook();

        assert!(console.is_empty());
        assert_eq!(seen.lock().len(), 1);
    }

    #[test]
    fn test_image_on_browser_embeds_data_url() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pixel.png");
        std::fs::write(&path, png_header(20, 10)).unwrap();

        let (logger, console) = capture_logger(Logger::builder("Web").target(Target::Browser));
        logger.image(&path, 0.5);

        let logs = console.logs();
        assert_eq!(logs.len(), 1);
        let css = logs[0].1.last().and_then(|arg| arg.as_text()).unwrap();
        assert!(css.contains("data:image/png;base64,"));
        assert!(css.contains("background-size: 10px 5px;"));
    }

    #[test]
    fn test_debug_alert_on_browser() {
        let (logger, console) = capture_logger(
            Logger::builder("Web")
                .target(Target::Browser)
                .debug_alert(true),
        );
        logger.label("cart").debug("inspect");
        logger.info("no alert");

        let alerts: Vec<_> = console
            .records()
            .into_iter()
            .filter_map(|r| match r {
                SinkRecord::Alert(text) => Some(text),
                _ => None,
            })
            .collect();
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].contains("Namespace: Web"));
        assert!(alerts[0].contains("Label: cart"));
    }

    #[test]
    fn test_recorded_entries_reach_store() {
        let (logger, _console) =
            capture_logger(Logger::builder("Shop").record_to_storage(true));
        logger.info("one").warn(serde_json::json!({"id": 7}));
        logger.flush_records().unwrap();

        let entries = recorded_entries(logger.stores().logs.as_ref()).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|entry| entry.namespace == "Shop"));
        assert!(entries
            .iter()
            .any(|entry| entry.messages.first() == Some(&serde_json::json!({"id": 7}))));
        assert_eq!(logger.metrics().recorded(), 2);
    }

    #[test]
    fn test_flush_records_without_recorder() {
        let (logger, _console) = capture_logger(Logger::builder("Shop"));
        logger.info("not recorded");
        assert!(logger.flush_records().is_ok());
        assert!(logger.stores().logs.is_empty().unwrap());
    }

    #[test]
    fn test_persisted_config_survives_rebuild() {
        let stores = LogStores::in_memory();
        let (first, _) = capture_logger(
            Logger::builder("Shop")
                .persist_config(true)
                .stores(stores.clone()),
        );
        first.set_config(ConfigPatch::new().level(LogLevel::Error));
        assert!(stores.config.get_item("Shop").unwrap().is_some());

        let (second, _) = capture_logger(Logger::builder("Shop").stores(stores.clone()));
        assert_eq!(second.level(), LogLevel::Error);

        second.set_config(ConfigPatch::new().persist_config(false));
        assert!(stores.config.get_item("Shop").unwrap().is_none());
    }

    #[test]
    fn test_set_config_value_by_name() {
        let _guard = HOOK_TEST_LOCK.lock();
        let seen = capture_diagnostics("[ByName]");
        let (logger, _) = capture_logger(Logger::builder("ByName"));

        assert!(logger.set_config_value("level", "warn"));
        assert_eq!(logger.level(), LogLevel::Warn);
        assert!(!logger.set_config_value("level", "loud"));
        clear_diagnostic_hook();

        assert_eq!(seen.lock().len(), 1);
    }

    #[test]
    fn test_empty_namespace_falls_back() {
        let (logger, _) = capture_logger(Logger::builder("  "));
        assert_eq!(logger.namespace(), DEFAULT_NAMESPACE);
    }

    #[test]
    fn test_patch_options_restores_blank_formatter() {
        let (logger, _) = capture_logger(Logger::builder("App"));
        logger.patch_options(|options| options.formatter = String::new());
        assert_eq!(logger.options().formatter, DEFAULT_TEMPLATE);
    }
}
