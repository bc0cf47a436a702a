//! Record file console
//!
//! Mirrors console output into a plain text file. New files start with a
//! UTF-8 byte order mark so editors pick the right encoding.

use super::terminal::render_table;
use crate::core::sink::plain_text;
use crate::core::{ConsoleArg, ConsoleSink, LogLevel, LoggerError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

const BOM: &str = "\u{FEFF}";

pub struct FileConsole {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    timers: HashMap<String, Instant>,
    indent: usize,
}

impl FileConsole {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let is_new = std::fs::metadata(&path).map(|m| m.len() == 0).unwrap_or(true);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation("open record file", path.display().to_string(), e)
            })?;
        let mut writer = BufWriter::new(file);
        if is_new {
            writer.write_all(BOM.as_bytes())?;
        }

        Ok(Self {
            path,
            writer: Some(writer),
            timers: HashMap::new(),
            indent: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::other("record file is closed"))?;
        let pad = " ".repeat(self.indent);
        for part in line.split('\n') {
            writeln!(writer, "{}{}", pad, part)?;
        }
        Ok(())
    }
}

impl ConsoleSink for FileConsole {
    fn log(&mut self, level: LogLevel, args: &[ConsoleArg]) -> Result<()> {
        let text = plain_text(args);
        match level {
            LogLevel::Silent => self.write_line(&text),
            other => self.write_line(&format!("{:5} {}", other.to_str(), text)),
        }
    }

    fn time(&mut self, label: &str) -> Result<()> {
        self.timers.insert(label.to_string(), Instant::now());
        Ok(())
    }

    fn time_end(&mut self, label: &str) -> Result<()> {
        if let Some(start) = self.timers.remove(label) {
            let elapsed = start.elapsed().as_secs_f64() * 1000.0;
            self.write_line(&format!("{}: {:.3}ms", label, elapsed))?;
        }
        Ok(())
    }

    fn table(&mut self, data: &Value) -> Result<()> {
        for line in render_table(data) {
            self.write_line(&line)?;
        }
        Ok(())
    }

    fn group_collapsed(&mut self, args: &[ConsoleArg]) -> Result<()> {
        let title = plain_text(args);
        self.write_line(&title)?;
        self.indent += 2;
        Ok(())
    }

    fn group_end(&mut self) -> Result<()> {
        self.indent = self.indent.saturating_sub(2);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileConsole {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_writes_plain_lines_with_bom() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        {
            let mut console = FileConsole::new(&path).unwrap();
            console
                .log(
                    LogLevel::Info,
                    &[
                        ConsoleArg::Text("%c[App] %cready".into()),
                        ConsoleArg::Text("color: red;".into()),
                        ConsoleArg::Text("color: red;".into()),
                    ],
                )
                .unwrap();
            console.table(&json!([1])).unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with(BOM));
        assert!(content.contains("INFO  [App] ready\n"));
        assert!(content.contains("| (index) | Values |"));
    }

    #[test]
    fn test_bom_written_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        for _ in 0..2 {
            let mut console = FileConsole::new(&path).unwrap();
            console
                .log(LogLevel::Silent, &[ConsoleArg::Text("line".into())])
                .unwrap();
        }
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches(BOM).count(), 1);
        assert_eq!(content.matches("line\n").count(), 2);
    }
}
