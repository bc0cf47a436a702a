//! Logger configuration
//!
//! [`LoggerOptions`] is what callers hand to [`crate::create_logger`] or the
//! builder. It splits into the runtime-mutable [`LoggerConfig`] and the
//! formatting-oriented [`LogOptions`].

use super::color::default_level_colors;
use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::template::DEFAULT_TEMPLATE;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Namespace used when none is given
pub const DEFAULT_NAMESPACE: &str = "Namespace-Logger";

/// Deployment environment; production disables logging unless told otherwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Env {
    #[default]
    Development,
    Production,
}

/// Language of debug alerts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Cn,
}

/// Rendering target of the console output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// ANSI-styled title followed by the raw message values
    #[default]
    Terminal,
    /// `%c`/`%o` console-format string with CSS arguments
    Browser,
}

/// Default decoration applied under every call's own style
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleDefaults {
    pub padding: String,
    pub font_weight: String,
    pub font_size: u32,
    pub color: Option<String>,
    pub bg_color: Option<String>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    /// Terminal only
    pub overline: bool,
    /// Terminal only
    pub dim: bool,
    /// Terminal only
    pub inverse: bool,
}

impl Default for StyleDefaults {
    fn default() -> Self {
        Self {
            padding: "5px".to_string(),
            font_weight: "500".to_string(),
            font_size: 12,
            color: None,
            bg_color: None,
            bold: false,
            italic: false,
            underline: false,
            strikethrough: false,
            overline: false,
            dim: false,
            inverse: false,
        }
    }
}

impl StyleDefaults {
    /// Browsers cannot render these flags
    pub(crate) fn clear_terminal_only(&mut self) {
        self.overline = false;
        self.dim = false;
        self.inverse = false;
    }
}

/// Runtime-mutable switches of a logger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub enabled: bool,
    pub level: LogLevel,
    pub record_to_storage: bool,
    pub persist_config: bool,
    pub source_location_visible: bool,
    pub debug_alert: bool,
    pub language: Language,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: LogLevel::Debug,
            record_to_storage: false,
            persist_config: false,
            source_location_visible: false,
            debug_alert: false,
            language: Language::En,
        }
    }
}

/// Partial update of a [`LoggerConfig`]; unset fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigPatch {
    pub enabled: Option<bool>,
    pub level: Option<LogLevel>,
    pub record_to_storage: Option<bool>,
    pub persist_config: Option<bool>,
    pub source_location_visible: Option<bool>,
    pub debug_alert: Option<bool>,
    pub language: Option<Language>,
}

impl ConfigPatch {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    #[must_use]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use]
    pub fn record_to_storage(mut self, record: bool) -> Self {
        self.record_to_storage = Some(record);
        self
    }

    #[must_use]
    pub fn persist_config(mut self, persist: bool) -> Self {
        self.persist_config = Some(persist);
        self
    }

    #[must_use]
    pub fn source_location_visible(mut self, visible: bool) -> Self {
        self.source_location_visible = Some(visible);
        self
    }

    #[must_use]
    pub fn debug_alert(mut self, alert: bool) -> Self {
        self.debug_alert = Some(alert);
        self
    }

    #[must_use]
    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Build a single-field patch from a property name and raw value.
    ///
    /// Accepts the camel-case names hosts use (`showLog`, `level`,
    /// `recordLog`, `persistConfig`, `sourceLocation`, `debugLog`,
    /// `language`) as well as the snake-case field names.
    pub fn from_named(name: &str, raw: &str) -> Result<Self> {
        let patch = Self::new();
        match name {
            "enabled" | "showLog" | "isEnableLog" => Ok(patch.enabled(parse_bool(name, raw)?)),
            "level" => raw
                .parse::<LogLevel>()
                .map(|level| patch.level(level))
                .map_err(|msg| LoggerError::config(name, msg)),
            "record_to_storage" | "recordLog" => {
                Ok(patch.record_to_storage(parse_bool(name, raw)?))
            }
            "persist_config" | "persistConfig" => Ok(patch.persist_config(parse_bool(name, raw)?)),
            "source_location_visible" | "sourceLocation" => {
                Ok(patch.source_location_visible(parse_bool(name, raw)?))
            }
            "debug_alert" | "debugLog" => Ok(patch.debug_alert(parse_bool(name, raw)?)),
            "language" => match raw.trim().to_lowercase().as_str() {
                "en" => Ok(patch.language(Language::En)),
                "cn" | "zh" => Ok(patch.language(Language::Cn)),
                _ => Err(LoggerError::config(name, "must be one of en, cn")),
            },
            _ => Err(LoggerError::config(
                name,
                "attempted to set unsupported property",
            )),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Combine with a later patch; fields set in `later` win
    #[must_use]
    pub fn merge(self, later: &ConfigPatch) -> Self {
        Self {
            enabled: later.enabled.or(self.enabled),
            level: later.level.or(self.level),
            record_to_storage: later.record_to_storage.or(self.record_to_storage),
            persist_config: later.persist_config.or(self.persist_config),
            source_location_visible: later.source_location_visible.or(self.source_location_visible),
            debug_alert: later.debug_alert.or(self.debug_alert),
            language: later.language.or(self.language),
        }
    }
}

pub(crate) fn parse_bool(name: &str, raw: &str) -> Result<bool> {
    match raw.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(LoggerError::config(name, "must be a boolean")),
    }
}

impl LoggerConfig {
    pub fn apply(&mut self, patch: &ConfigPatch) {
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
        if let Some(level) = patch.level {
            self.level = level;
        }
        if let Some(record) = patch.record_to_storage {
            self.record_to_storage = record;
        }
        if let Some(persist) = patch.persist_config {
            self.persist_config = persist;
        }
        if let Some(visible) = patch.source_location_visible {
            self.source_location_visible = visible;
        }
        if let Some(alert) = patch.debug_alert {
            self.debug_alert = alert;
        }
        if let Some(language) = patch.language {
            self.language = language;
        }
    }
}

/// Formatting options, set at construction and occasionally patched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogOptions {
    pub formatter: String,
    pub emoji: bool,
    pub color: bool,
    pub level_colors: HashMap<LogLevel, String>,
    /// Extra frames to skip when resolving the call-site
    pub skip_depth: usize,
    pub style: StyleDefaults,
    pub timestamp_format: TimestampFormat,
    pub target: Target,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            formatter: DEFAULT_TEMPLATE.to_string(),
            emoji: true,
            color: true,
            level_colors: default_level_colors(),
            skip_depth: 0,
            style: StyleDefaults::default(),
            timestamp_format: TimestampFormat::default(),
            target: Target::default(),
        }
    }
}

/// Everything a logger can be created with
///
/// # Example
///
/// ```
/// use namespace_logger::{LoggerOptions, LogLevel};
///
/// let options: LoggerOptions = serde_json::from_str(r#"{"level": "warn", "emoji": false}"#).unwrap();
/// assert_eq!(options.level, Some(LogLevel::Warn));
/// assert!(!options.emoji);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerOptions {
    pub env: Env,
    /// Defaults to `env != Production`
    pub enabled: Option<bool>,
    pub level: Option<LogLevel>,
    pub record_to_storage: bool,
    pub persist_config: bool,
    pub source_location_visible: bool,
    pub debug_alert: bool,
    pub language: Language,
    pub target: Target,
    pub formatter: Option<String>,
    pub emoji: bool,
    pub color: bool,
    /// Merged over the built-in level colours
    pub level_colors: HashMap<LogLevel, String>,
    pub skip_depth: usize,
    pub style: StyleDefaults,
    pub timestamp_format: TimestampFormat,
    /// Print the creation banner
    pub banner: bool,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            env: Env::Development,
            enabled: None,
            level: None,
            record_to_storage: false,
            persist_config: false,
            source_location_visible: false,
            debug_alert: false,
            language: Language::En,
            target: Target::Terminal,
            formatter: None,
            emoji: true,
            color: true,
            level_colors: HashMap::new(),
            skip_depth: 0,
            style: StyleDefaults::default(),
            timestamp_format: TimestampFormat::default(),
            banner: false,
        }
    }
}

impl LoggerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split into the runtime config and the formatting options
    pub fn split(self) -> (LoggerConfig, LogOptions) {
        let config = LoggerConfig {
            enabled: self.enabled.unwrap_or(self.env != Env::Production),
            level: self.level.unwrap_or(LogLevel::Debug),
            record_to_storage: self.record_to_storage,
            persist_config: self.persist_config,
            source_location_visible: self.source_location_visible,
            debug_alert: self.debug_alert,
            language: self.language,
        };

        let mut level_colors = default_level_colors();
        level_colors.extend(self.level_colors);

        let mut style = self.style;
        if self.target == Target::Browser {
            style.clear_terminal_only();
        }

        let formatter = self
            .formatter
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TEMPLATE.to_string());

        let options = LogOptions {
            formatter,
            emoji: self.emoji,
            color: self.color,
            level_colors,
            skip_depth: self.skip_depth,
            style,
            timestamp_format: self.timestamp_format,
            target: self.target,
        };

        (config, options)
    }
}
