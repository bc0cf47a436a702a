//! Terminal console
//!
//! Writes log lines to stdout, warnings and errors to stderr, keeps named
//! timers and renders tables as ASCII grids.

use crate::core::local::local_warn;
use crate::core::message::value_to_plain;
use crate::core::{ConsoleArg, ConsoleSink, LogLevel, Result};
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::io::Write;
use std::time::Instant;

pub struct TerminalConsole {
    out: Box<dyn Write + Send>,
    err: Box<dyn Write + Send>,
    timers: HashMap<String, Instant>,
    indent: usize,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self::with_writers(std::io::stdout(), std::io::stderr())
    }

    /// Redirect both streams, e.g. into buffers
    pub fn with_writers(out: impl Write + Send + 'static, err: impl Write + Send + 'static) -> Self {
        Self {
            out: Box::new(out),
            err: Box::new(err),
            timers: HashMap::new(),
            indent: 0,
        }
    }

    fn write_line(&mut self, to_err: bool, line: &str) -> Result<()> {
        let pad = " ".repeat(self.indent);
        let stream = if to_err { &mut self.err } else { &mut self.out };
        for part in line.split('\n') {
            writeln!(stream, "{}{}", pad, part)?;
        }
        Ok(())
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

fn join_args(args: &[ConsoleArg]) -> String {
    args.iter()
        .map(|arg| match arg {
            ConsoleArg::Text(text) => text.clone(),
            ConsoleArg::Value(value) => value_to_plain(value),
        })
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

impl ConsoleSink for TerminalConsole {
    fn log(&mut self, level: LogLevel, args: &[ConsoleArg]) -> Result<()> {
        // Route Warn and Error to stderr, others to stdout
        let to_err = matches!(level, LogLevel::Warn | LogLevel::Error);
        self.write_line(to_err, &join_args(args))
    }

    fn time(&mut self, label: &str) -> Result<()> {
        if self.timers.contains_key(label) {
            local_warn(format!("timer '{}' already exists", label));
            return Ok(());
        }
        self.timers.insert(label.to_string(), Instant::now());
        Ok(())
    }

    fn time_end(&mut self, label: &str) -> Result<()> {
        match self.timers.remove(label) {
            Some(start) => {
                let elapsed = start.elapsed().as_secs_f64() * 1000.0;
                self.write_line(false, &format!("{}: {:.3}ms", label, elapsed))
            }
            None => {
                local_warn(format!("timer '{}' does not exist", label));
                Ok(())
            }
        }
    }

    fn table(&mut self, data: &Value) -> Result<()> {
        for line in render_table(data) {
            self.write_line(false, &line)?;
        }
        Ok(())
    }

    fn group_collapsed(&mut self, args: &[ConsoleArg]) -> Result<()> {
        self.write_line(false, &join_args(args))?;
        self.indent += 2;
        Ok(())
    }

    fn group_end(&mut self) -> Result<()> {
        self.indent = self.indent.saturating_sub(2);
        Ok(())
    }

    fn alert(&mut self, text: &str) -> Result<()> {
        self.write_line(true, text)
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        self.err.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "terminal"
    }
}

const INDEX_COLUMN: &str = "(index)";
const VALUES_COLUMN: &str = "Values";

/// Render tabular data as an ASCII grid.
///
/// Arrays and objects become one row per element, keyed by index or
/// property name; element objects spread into columns, anything else lands
/// in a `Values` column. Scalars print as a single line.
pub fn render_table(data: &Value) -> Vec<String> {
    let rows: Vec<(String, &Value)> = match data {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        other => return vec![value_to_plain(other)],
    };

    let mut columns: Vec<String> = Vec::new();
    let mut seen = BTreeSet::new();
    let mut has_values = false;
    for (_, value) in &rows {
        match value {
            Value::Object(map) => {
                for key in map.keys() {
                    if seen.insert(key.clone()) {
                        columns.push(key.clone());
                    }
                }
            }
            _ => has_values = true,
        }
    }

    let mut header = vec![INDEX_COLUMN.to_string()];
    header.extend(columns.iter().cloned());
    if has_values {
        header.push(VALUES_COLUMN.to_string());
    }

    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|(index, value)| {
            let mut cells = vec![index.clone()];
            for column in &columns {
                let cell = match value {
                    Value::Object(map) => map.get(column).map(value_to_plain).unwrap_or_default(),
                    _ => String::new(),
                };
                cells.push(cell);
            }
            if has_values {
                cells.push(match value {
                    Value::Object(_) => String::new(),
                    other => value_to_plain(other),
                });
            }
            cells
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|i| {
            body.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(header[i].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let border = format!(
        "+{}+",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+")
    );
    let format_row = |cells: &[String]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let fill = width - cell.chars().count();
                format!(" {}{} ", cell, " ".repeat(fill))
            })
            .collect();
        format!("|{}|", padded.join("|"))
    };

    let mut lines = vec![border.clone(), format_row(&header), border.clone()];
    lines.extend(body.iter().map(|row| format_row(row)));
    lines.push(border);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use serde_json::json;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    #[test]
    fn test_table_of_objects() {
        let lines = render_table(&json!([
            {"name": "a", "size": 1},
            {"name": "bb", "extra": true}
        ]));
        assert_eq!(
            lines,
            vec![
                "+---------+------+------+-------+",
                "| (index) | name | size | extra |",
                "+---------+------+------+-------+",
                "| 0       | a    | 1    |       |",
                "| 1       | bb   |      | true  |",
                "+---------+------+------+-------+",
            ]
        );
    }

    #[test]
    fn test_table_of_scalars() {
        let lines = render_table(&json!({"x": 1, "y": "two"}));
        assert_eq!(lines[1], "| (index) | Values |");
        assert_eq!(lines[3], "| x       | 1      |");
        assert_eq!(lines[4], "| y       | two    |");
        assert_eq!(render_table(&json!(5)), vec!["5"]);
    }

    #[test]
    fn test_levels_route_to_streams_and_groups_indent() {
        let out = SharedBuffer::default();
        let err = SharedBuffer::default();
        let mut console = TerminalConsole::with_writers(out.clone(), err.clone());

        console
            .group_collapsed(&[ConsoleArg::Text("title".into())])
            .unwrap();
        console
            .log(LogLevel::Info, &[ConsoleArg::Text("inside".into())])
            .unwrap();
        console.group_end().unwrap();
        console
            .log(LogLevel::Error, &[ConsoleArg::Value(json!({"e": 1}))])
            .unwrap();

        assert_eq!(out.text(), "title\n  inside\n");
        assert_eq!(err.text(), "{\"e\":1}\n");
    }

    #[test]
    fn test_timer_reports_elapsed() {
        let out = SharedBuffer::default();
        let mut console = TerminalConsole::with_writers(out.clone(), std::io::sink());
        console.time("load").unwrap();
        console.time_end("load").unwrap();
        let text = out.text();
        assert!(text.starts_with("load: "), "{}", text);
        assert!(text.trim_end().ends_with("ms"));
    }
}
