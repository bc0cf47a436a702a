//! Call-scoped style builder
//!
//! Style modifiers never touch the logger. Each one returns (or refines) a
//! [`StyledCall`] that owns its [`Style`]; the terminal log method consumes
//! the builder, so decoration applies to exactly one call.

use super::dispatcher::PrintRequest;
use super::log_level::LogLevel;
use super::logger::Logger;
use super::message::Messages;
use super::options::StyleDefaults;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::panic::Location;
use std::path::PathBuf;

/// Decoration of a single log call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub color: Option<String>,
    pub bg_color: Option<String>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub overline: bool,
    pub dim: bool,
    pub inverse: bool,
    /// Drop the logger's default decoration for this call
    pub reset: bool,
    /// Appended in call order
    pub labels: Vec<String>,
}

/// Emphasis flags that only ANSI terminals can render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalOnlyFlag {
    Overline,
    Dim,
    Inverse,
}

impl TerminalOnlyFlag {
    pub fn name(&self) -> &'static str {
        match self {
            TerminalOnlyFlag::Overline => "overline",
            TerminalOnlyFlag::Dim => "dim",
            TerminalOnlyFlag::Inverse => "inverse",
        }
    }
}

impl Style {
    pub fn label_text(&self) -> String {
        self.labels.join("|")
    }

    /// Layer this call's style over the logger defaults.
    ///
    /// Call values win where set; with `reset` the defaults are ignored.
    pub fn merged_over(&self, defaults: &StyleDefaults) -> Style {
        if self.reset {
            return self.clone();
        }
        Style {
            color: self.color.clone().or_else(|| defaults.color.clone()),
            bg_color: self.bg_color.clone().or_else(|| defaults.bg_color.clone()),
            bold: self.bold || defaults.bold,
            italic: self.italic || defaults.italic,
            underline: self.underline || defaults.underline,
            strikethrough: self.strikethrough || defaults.strikethrough,
            overline: self.overline || defaults.overline,
            dim: self.dim || defaults.dim,
            inverse: self.inverse || defaults.inverse,
            reset: false,
            labels: self.labels.clone(),
        }
    }
}

/// A log call under construction
///
/// # Example
///
/// ```
/// use namespace_logger::prelude::*;
///
/// let logger = Logger::builder("checkout").sink(MemoryConsole::new()).build();
/// logger.color("red").label("cart").label("retry").info("payment declined");
/// ```
#[must_use = "a styled call does nothing until a log method consumes it"]
pub struct StyledCall<'a> {
    logger: &'a Logger,
    style: Style,
}

impl<'a> StyledCall<'a> {
    pub(crate) fn new(logger: &'a Logger) -> Self {
        Self {
            logger,
            style: Style::default(),
        }
    }

    /// The style accumulated so far
    pub fn style(&self) -> &Style {
        &self.style
    }

    fn modify(mut self, change: impl FnOnce(&mut Style)) -> Self {
        if self.logger.is_enabled() {
            change(&mut self.style);
        }
        self
    }

    fn modify_terminal_only(self, flag: TerminalOnlyFlag) -> Self {
        if !self.logger.supports(flag) {
            return self;
        }
        self.modify(|style| match flag {
            TerminalOnlyFlag::Overline => style.overline = true,
            TerminalOnlyFlag::Dim => style.dim = true,
            TerminalOnlyFlag::Inverse => style.inverse = true,
        })
    }

    pub fn color(self, color: impl Into<String>) -> Self {
        let color = color.into();
        self.modify(|style| style.color = Some(color))
    }

    pub fn bg_color(self, color: impl Into<String>) -> Self {
        let color = color.into();
        self.modify(|style| style.bg_color = Some(color))
    }

    pub fn label(self, label: impl Into<String>) -> Self {
        let label = label.into();
        self.modify(|style| style.labels.push(label))
    }

    pub fn bold(self) -> Self {
        self.modify(|style| style.bold = true)
    }

    pub fn italic(self) -> Self {
        self.modify(|style| style.italic = true)
    }

    pub fn underline(self) -> Self {
        self.modify(|style| style.underline = true)
    }

    pub fn strikethrough(self) -> Self {
        self.modify(|style| style.strikethrough = true)
    }

    pub fn reset(self) -> Self {
        self.modify(|style| style.reset = true)
    }

    pub fn overline(self) -> Self {
        self.modify_terminal_only(TerminalOnlyFlag::Overline)
    }

    pub fn dim(self) -> Self {
        self.modify_terminal_only(TerminalOnlyFlag::Dim)
    }

    pub fn inverse(self) -> Self {
        self.modify_terminal_only(TerminalOnlyFlag::Inverse)
    }

    /// Unleveled message; never gated by level
    #[track_caller]
    pub fn log(self, messages: impl Into<Messages>) -> &'a Logger {
        let request = PrintRequest::log(LogLevel::Silent, messages.into());
        self.logger.print(request, self.style, Location::caller());
        self.logger
    }

    #[track_caller]
    pub fn debug(self, messages: impl Into<Messages>) -> &'a Logger {
        let request = PrintRequest::log(LogLevel::Debug, messages.into());
        self.logger.print(request, self.style, Location::caller());
        self.logger
    }

    #[track_caller]
    pub fn info(self, messages: impl Into<Messages>) -> &'a Logger {
        let request = PrintRequest::log(LogLevel::Info, messages.into());
        self.logger.print(request, self.style, Location::caller());
        self.logger
    }

    #[track_caller]
    pub fn warn(self, messages: impl Into<Messages>) -> &'a Logger {
        let request = PrintRequest::log(LogLevel::Warn, messages.into());
        self.logger.print(request, self.style, Location::caller());
        self.logger
    }

    #[track_caller]
    pub fn error(self, messages: impl Into<Messages>) -> &'a Logger {
        let request = PrintRequest::log(LogLevel::Error, messages.into());
        self.logger.print(request, self.style, Location::caller());
        self.logger
    }

    /// Start a console timer keyed by the rendered title
    #[track_caller]
    pub fn time(self) -> &'a Logger {
        self.logger
            .print(PrintRequest::Time, self.style, Location::caller());
        self.logger
    }

    /// Stop the timer started with the same namespace and labels
    #[track_caller]
    pub fn time_end(self) -> &'a Logger {
        self.logger
            .print(PrintRequest::TimeEnd, self.style, Location::caller());
        self.logger
    }

    #[track_caller]
    pub fn table(self, data: impl Into<Value>) -> &'a Logger {
        let request = PrintRequest::Table(data.into());
        self.logger.print(request, self.style, Location::caller());
        self.logger
    }

    /// Browser consoles only; `scale` must be positive
    #[track_caller]
    pub fn image(self, path: impl Into<PathBuf>, scale: f64) -> &'a Logger {
        let request = PrintRequest::Image {
            path: path.into(),
            scale,
        };
        self.logger.print(request, self.style, Location::caller());
        self.logger
    }
}
