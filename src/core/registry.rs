//! Namespace registry
//!
//! Keeps one logger per namespace. Settings applied through the registry
//! reach every registered logger and every logger created afterwards.

use super::error::{LoggerError, Result};
use super::local::{local_log, local_warn};
use super::log_level::LogLevel;
use super::logger::{Logger, LoggerBuilder};
use super::notice::creation_banner;
use super::options::{parse_bool, ConfigPatch, LoggerOptions};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::new);

/// Properties that may be set on every logger at once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrySetting {
    ShowLog(bool),
    Level(LogLevel),
    RecordLog(bool),
    DebugLog(bool),
}

impl RegistrySetting {
    /// Parse a property name and its textual value
    pub fn parse(name: &str, raw: &str) -> Result<Self> {
        match name {
            "showLog" | "show_log" => Ok(RegistrySetting::ShowLog(parse_bool(name, raw)?)),
            "level" => raw
                .parse::<LogLevel>()
                .map(RegistrySetting::Level)
                .map_err(|msg| LoggerError::config(name, msg)),
            "recordLog" | "record_log" => Ok(RegistrySetting::RecordLog(parse_bool(name, raw)?)),
            "debugLog" | "debug_log" => Ok(RegistrySetting::DebugLog(parse_bool(name, raw)?)),
            _ => Err(LoggerError::config(
                name,
                "attempted to set unsupported property",
            )),
        }
    }

    pub fn into_patch(self) -> ConfigPatch {
        let patch = ConfigPatch::new();
        match self {
            RegistrySetting::ShowLog(show) => patch.enabled(show),
            RegistrySetting::Level(level) => patch.level(level),
            RegistrySetting::RecordLog(record) => patch.record_to_storage(record),
            RegistrySetting::DebugLog(alert) => patch.debug_alert(alert),
        }
    }
}

/// Map of namespace to logger
///
/// # Example
///
/// ```
/// use namespace_logger::prelude::*;
///
/// let registry = Registry::new();
/// let a = registry.get_or_create("cart", || Logger::builder("cart").sink(MemoryConsole::new()).build());
/// let b = registry.get_or_create("cart", || unreachable!());
/// assert!(std::sync::Arc::ptr_eq(&a, &b));
///
/// registry.apply(RegistrySetting::ShowLog(false));
/// assert!(!a.is_enabled());
/// ```
#[derive(Default)]
pub struct Registry {
    loggers: RwLock<HashMap<String, Arc<Logger>>>,
    /// Accumulated settings, replayed onto newly created loggers
    settings: RwLock<ConfigPatch>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Logger registered under `namespace`, created by `factory` on first
    /// use.
    ///
    /// The factory runs without any registry lock held, so it may itself
    /// use the registry. When two callers race, the first insert wins and
    /// the other instance is dropped.
    pub fn get_or_create(&self, namespace: &str, factory: impl FnOnce() -> Logger) -> Arc<Logger> {
        self.register(namespace, factory).0
    }

    /// Registered logger for `namespace`, built from `options` on first use
    pub fn create_logger(&self, namespace: &str, options: LoggerOptions) -> Arc<Logger> {
        let banner = options.banner;
        let (logger, created) = self.register(namespace, || {
            LoggerBuilder::new(namespace).options(options).build()
        });
        if created {
            if banner {
                local_log(creation_banner(logger.namespace(), env!("CARGO_PKG_VERSION")));
            }
            local_log(format!("logger '{}' created", logger.namespace()));
        }
        logger
    }

    /// Look up or insert, reporting whether this call inserted
    fn register(&self, namespace: &str, factory: impl FnOnce() -> Logger) -> (Arc<Logger>, bool) {
        if let Some(logger) = self.get(namespace) {
            return (logger, false);
        }

        let candidate = Arc::new(factory());
        let (logger, created) = {
            let mut loggers = self.loggers.write();
            let entry = loggers
                .entry(namespace.to_string())
                .or_insert_with(|| Arc::clone(&candidate));
            (Arc::clone(entry), Arc::ptr_eq(entry, &candidate))
        };
        if created {
            // Held across the replay so a concurrent `apply` lands after it
            let settings = self.settings.read();
            logger.set_config(settings.clone());
        }
        (logger, created)
    }

    pub fn get(&self, namespace: &str) -> Option<Arc<Logger>> {
        self.loggers.read().get(namespace).cloned()
    }

    /// Registered namespaces, sorted
    pub fn namespaces(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn remove(&self, namespace: &str) -> Option<Arc<Logger>> {
        self.loggers.write().remove(namespace)
    }

    pub fn len(&self) -> usize {
        self.loggers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.read().is_empty()
    }

    /// Apply a setting to every registered logger and to later ones
    pub fn apply(&self, setting: RegistrySetting) {
        let patch = setting.into_patch();
        {
            let mut settings = self.settings.write();
            let merged = std::mem::take(&mut *settings).merge(&patch);
            *settings = merged;
        }
        for logger in self.loggers.read().values() {
            logger.set_config(patch.clone());
        }
    }

    /// String-keyed [`Registry::apply`].
    ///
    /// Unknown properties and invalid values are reported on the local
    /// channel and yield `false`.
    pub fn set(&self, name: &str, raw: &str) -> bool {
        match RegistrySetting::parse(name, raw) {
            Ok(setting) => {
                self.apply(setting);
                true
            }
            Err(e) => {
                local_warn(e.to_string());
                false
            }
        }
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("namespaces", &self.namespaces())
            .field("settings", &*self.settings.read())
            .finish()
    }
}

/// Logger for `namespace` from the global registry
pub fn create_logger(namespace: &str, options: LoggerOptions) -> Arc<Logger> {
    Registry::global().create_logger(namespace, options)
}
