//! Console sink trait for log output destinations

use super::{error::Result, log_level::LogLevel, message::value_to_plain};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

static ANSI_SEQUENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("ansi pattern is valid"));

/// One argument of a console call
///
/// Titles and CSS strings are `Text`; caller-supplied message values keep
/// their structure as `Value` so the console can inspect them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConsoleArg {
    Text(String),
    Value(Value),
}

impl ConsoleArg {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ConsoleArg::Text(text) => Some(text),
            ConsoleArg::Value(Value::String(text)) => Some(text),
            ConsoleArg::Value(_) => None,
        }
    }
}

/// Text of console arguments with all styling removed.
///
/// A leading `%c`/`%o` format string is expanded the way a browser console
/// would: `%c` consumes a CSS argument, `%o` prints the next value, `%%` is a
/// literal percent. Otherwise arguments are joined by spaces. ANSI escape
/// sequences are stripped either way.
pub fn plain_text(args: &[ConsoleArg]) -> String {
    let Some(ConsoleArg::Text(first)) = args.first() else {
        return join_plain(args);
    };
    if !first.starts_with("%c") {
        return join_plain(args);
    }

    let mut rest = args[1..].iter();
    let mut out = String::with_capacity(first.len());
    let mut chars = first.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('c') => {
                chars.next();
                rest.next();
            }
            Some('o') | Some('O') => {
                chars.next();
                if let Some(arg) = rest.next() {
                    out.push_str(&arg_plain(arg));
                }
            }
            Some('%') => {
                chars.next();
                out.push('%');
            }
            _ => out.push('%'),
        }
    }
    for arg in rest {
        out.push(' ');
        out.push_str(&arg_plain(arg));
    }
    strip_ansi(&out)
}

fn join_plain(args: &[ConsoleArg]) -> String {
    args.iter()
        .map(|arg| strip_ansi(&arg_plain(arg)))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn arg_plain(arg: &ConsoleArg) -> String {
    match arg {
        ConsoleArg::Text(text) => text.clone(),
        ConsoleArg::Value(value) => value_to_plain(value),
    }
}

pub fn strip_ansi(text: &str) -> String {
    ANSI_SEQUENCE.replace_all(text, "").into_owned()
}

/// Anything that behaves like a console
pub trait ConsoleSink: Send {
    fn log(&mut self, level: LogLevel, args: &[ConsoleArg]) -> Result<()>;
    fn time(&mut self, label: &str) -> Result<()>;
    fn time_end(&mut self, label: &str) -> Result<()>;
    fn table(&mut self, data: &Value) -> Result<()>;
    fn group_collapsed(&mut self, args: &[ConsoleArg]) -> Result<()>;
    fn group_end(&mut self) -> Result<()>;

    /// Blocking notice shown to a human; consoles without one ignore it
    fn alert(&mut self, _text: &str) -> Result<()> {
        Ok(())
    }

    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
