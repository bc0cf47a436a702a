//! Print requests and their routing onto console sink primitives

use super::error::Result;
use super::formatter::{browser_css, browser_image_args, RenderContext};
use super::image::{check_scale, load_image};
use super::log_level::LogLevel;
use super::message::Messages;
use super::sink::{ConsoleArg, ConsoleSink};
use serde_json::Value;
use std::path::PathBuf;

/// Kind of console operation a call maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrintKind {
    Log,
    Time,
    TimeEnd,
    Table,
    Image,
}

/// A call as issued by a public logging method
#[derive(Debug, Clone, PartialEq)]
pub enum PrintRequest {
    Log { level: LogLevel, messages: Messages },
    Time,
    TimeEnd,
    Table(Value),
    Image { path: PathBuf, scale: f64 },
}

impl PrintRequest {
    pub fn log(level: LogLevel, messages: Messages) -> Self {
        PrintRequest::Log { level, messages }
    }

    pub fn kind(&self) -> PrintKind {
        match self {
            PrintRequest::Log { .. } => PrintKind::Log,
            PrintRequest::Time => PrintKind::Time,
            PrintRequest::TimeEnd => PrintKind::TimeEnd,
            PrintRequest::Table(_) => PrintKind::Table,
            PrintRequest::Image { .. } => PrintKind::Image,
        }
    }

    /// Level used for gating and colour; only `Log` carries one
    pub fn level(&self) -> LogLevel {
        match self {
            PrintRequest::Log { level, .. } => *level,
            _ => LogLevel::Silent,
        }
    }
}

pub(crate) fn emit_log(
    sink: &mut dyn ConsoleSink,
    ctx: &RenderContext<'_>,
    messages: &Messages,
) -> Result<String> {
    let rendered = ctx.render_log(messages);
    sink.log(ctx.level, &rendered.args)?;
    Ok(rendered.title)
}

pub(crate) fn emit_time(sink: &mut dyn ConsoleSink, ctx: &RenderContext<'_>) -> Result<()> {
    sink.time(&ctx.timer_title())
}

pub(crate) fn emit_time_end(sink: &mut dyn ConsoleSink, ctx: &RenderContext<'_>) -> Result<()> {
    sink.time_end(&ctx.timer_title())
}

/// Collapsed group titled like a log line, holding the table
pub(crate) fn emit_table(
    sink: &mut dyn ConsoleSink,
    ctx: &RenderContext<'_>,
    data: &Value,
) -> Result<()> {
    let rendered = ctx.render(ctx.plain_title(), &Messages::new());
    sink.group_collapsed(&rendered.args)?;
    let table = sink.table(data);
    sink.group_end()?;
    table
}

/// Build image arguments; load failures surface as `Err` for the caller to
/// report.
pub(crate) fn image_args(
    ctx: &RenderContext<'_>,
    path: &std::path::Path,
    scale: f64,
) -> Result<Vec<ConsoleArg>> {
    let scale = check_scale(&path.display().to_string(), scale)?;
    let image = load_image(path)?;
    let rendered = ctx.render(ctx.plain_title(), &Messages::new());
    let title_css = browser_css(ctx.style, rendered.color.as_deref(), &ctx.options.style);
    Ok(browser_image_args(&rendered.title, &title_css, &image.css(scale)))
}
