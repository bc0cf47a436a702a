//! In-memory console that captures every call

use crate::core::sink::plain_text;
use crate::core::{ConsoleArg, ConsoleSink, LogLevel, Result};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

/// One captured console call
#[derive(Debug, Clone, PartialEq)]
pub enum SinkRecord {
    Log { level: LogLevel, args: Vec<ConsoleArg> },
    Time(String),
    TimeEnd(String),
    Table(Value),
    GroupCollapsed(Vec<ConsoleArg>),
    GroupEnd,
    Alert(String),
}

/// Capturing console
///
/// Clones share the same capture buffer, so a clone can be handed to a
/// logger while the original is inspected.
///
/// # Example
///
/// ```
/// use namespace_logger::prelude::*;
///
/// let console = MemoryConsole::new();
/// let logger = Logger::builder("app").sink(console.clone()).build();
/// logger.info("ready");
/// assert_eq!(console.log_lines().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryConsole {
    records: Arc<Mutex<Vec<SinkRecord>>>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<SinkRecord> {
        self.records.lock().clone()
    }

    /// Remove and return everything captured so far
    pub fn take(&self) -> Vec<SinkRecord> {
        std::mem::take(&mut *self.records.lock())
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Arguments of every `log` call
    pub fn logs(&self) -> Vec<(LogLevel, Vec<ConsoleArg>)> {
        self.records
            .lock()
            .iter()
            .filter_map(|record| match record {
                SinkRecord::Log { level, args } => Some((*level, args.clone())),
                _ => None,
            })
            .collect()
    }

    /// Unstyled text of every `log` call
    pub fn log_lines(&self) -> Vec<String> {
        self.logs().iter().map(|(_, args)| plain_text(args)).collect()
    }

    fn push(&self, record: SinkRecord) -> Result<()> {
        self.records.lock().push(record);
        Ok(())
    }
}

impl ConsoleSink for MemoryConsole {
    fn log(&mut self, level: LogLevel, args: &[ConsoleArg]) -> Result<()> {
        self.push(SinkRecord::Log {
            level,
            args: args.to_vec(),
        })
    }

    fn time(&mut self, label: &str) -> Result<()> {
        self.push(SinkRecord::Time(label.to_string()))
    }

    fn time_end(&mut self, label: &str) -> Result<()> {
        self.push(SinkRecord::TimeEnd(label.to_string()))
    }

    fn table(&mut self, data: &Value) -> Result<()> {
        self.push(SinkRecord::Table(data.clone()))
    }

    fn group_collapsed(&mut self, args: &[ConsoleArg]) -> Result<()> {
        self.push(SinkRecord::GroupCollapsed(args.to_vec()))
    }

    fn group_end(&mut self) -> Result<()> {
        self.push(SinkRecord::GroupEnd)
    }

    fn alert(&mut self, text: &str) -> Result<()> {
        self.push(SinkRecord::Alert(text.to_string()))
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_records() {
        let console = MemoryConsole::new();
        let mut handle = console.clone();
        handle.time("t").unwrap();
        handle
            .log(LogLevel::Info, &[ConsoleArg::Text("x".into())])
            .unwrap();

        assert_eq!(console.len(), 2);
        assert_eq!(console.records()[0], SinkRecord::Time("t".into()));
        assert_eq!(console.log_lines(), vec!["x"]);

        let taken = console.take();
        assert_eq!(taken.len(), 2);
        assert!(console.is_empty());
    }
}
