//! Background recording of log entries into a key-value store
//!
//! Callers enqueue entries on a bounded channel and return immediately. A
//! worker thread batches them into the store under fresh UUID keys; store
//! failures are reported on the local diagnostic channel and counted.

use super::local::{local_error, local_warn};
use super::log_entry::LogEntry;
use super::metrics::LoggerMetrics;
use super::overflow_policy::{OverflowCallback, OverflowPolicy};
use crate::storage::KeyValueStore;
use crossbeam_channel::{bounded, Receiver, SendTimeoutError, Sender, TrySendError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Default shutdown timeout for the recorder worker (5 seconds)
///
/// Used when a logger is dropped; call [`Recorder::shutdown`] for a
/// different bound.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Default capacity of the record queue
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

const BATCH_SIZE: usize = 50;

enum Command {
    Record(Box<LogEntry>),
    /// Acknowledged once everything queued before it is written
    Flush(Sender<()>),
}

/// Handle to the recording worker
pub struct Recorder {
    sender: Option<Sender<Command>>,
    handle: Option<thread::JoinHandle<()>>,
    metrics: Arc<LoggerMetrics>,
    overflow_policy: OverflowPolicy,
    on_overflow: Option<OverflowCallback>,
}

impl Recorder {
    pub fn spawn(
        store: Arc<dyn KeyValueStore>,
        capacity: usize,
        overflow_policy: OverflowPolicy,
        on_overflow: Option<OverflowCallback>,
        metrics: Arc<LoggerMetrics>,
    ) -> Self {
        let (sender, receiver) = bounded(capacity.max(1));
        let worker_metrics = Arc::clone(&metrics);

        let handle = thread::Builder::new()
            .name(format!("namespace-logger-recorder-{}", store.name()))
            .spawn(move || Self::run(&receiver, store.as_ref(), &worker_metrics));

        let (sender, handle) = match handle {
            Ok(handle) => (Some(sender), Some(handle)),
            Err(e) => {
                local_error(format!("failed to start recorder thread: {}", e));
                (None, None)
            }
        };

        Self {
            sender,
            handle,
            metrics,
            overflow_policy,
            on_overflow,
        }
    }

    fn run(receiver: &Receiver<Command>, store: &dyn KeyValueStore, metrics: &LoggerMetrics) {
        let mut batch: Vec<LogEntry> = Vec::with_capacity(BATCH_SIZE);

        // Blocks for the first command, then drains whatever is already queued
        while let Ok(first) = receiver.recv() {
            let mut acks = Vec::new();
            let mut next = Some(first);

            while let Some(command) = next.take() {
                match command {
                    Command::Record(entry) => batch.push(*entry),
                    Command::Flush(ack) => {
                        Self::write_batch(store, &mut batch, metrics);
                        acks.push(ack);
                    }
                }
                if batch.len() >= BATCH_SIZE {
                    Self::write_batch(store, &mut batch, metrics);
                }
                next = receiver.try_recv().ok();
            }

            Self::write_batch(store, &mut batch, metrics);
            for ack in acks {
                let _ = ack.send(());
            }
        }

        // Channel closed
        Self::write_batch(store, &mut batch, metrics);
    }

    /// Write and clear a batch, isolating store panics
    fn write_batch(store: &dyn KeyValueStore, batch: &mut Vec<LogEntry>, metrics: &LoggerMetrics) {
        for entry in batch.drain(..) {
            let key = Uuid::new_v4().to_string();
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                let value = serde_json::to_value(&entry)?;
                store.set_item(&key, &value)
            }));

            match result {
                Ok(Ok(())) => {
                    metrics.record_recorded();
                }
                Ok(Err(e)) => {
                    local_error(format!("failed to record log entry: {}", e));
                    metrics.record_failure();
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "unknown panic".to_string()
                    };
                    local_error(format!(
                        "store '{}' panicked while recording: {}",
                        store.name(),
                        panic_msg
                    ));
                    metrics.record_failure();
                }
            }
        }
    }

    /// Queue an entry; never blocks unless the policy says so
    pub fn record(&self, entry: LogEntry) {
        let Some(sender) = &self.sender else {
            self.metrics.record_dropped_record();
            return;
        };

        match sender.try_send(Command::Record(Box::new(entry))) {
            Ok(()) => {}
            Err(TrySendError::Full(command)) => self.handle_overflow(sender, command),
            Err(TrySendError::Disconnected(_)) => {
                self.metrics.record_dropped_record();
            }
        }
    }

    fn handle_overflow(&self, sender: &Sender<Command>, command: Command) {
        self.metrics.record_queue_full();

        match &self.overflow_policy {
            OverflowPolicy::DropNewest => {
                self.metrics.record_dropped_record();
            }
            OverflowPolicy::Block => {
                if sender.send(command).is_err() {
                    self.metrics.record_dropped_record();
                }
            }
            OverflowPolicy::BlockWithTimeout(timeout) => match sender.send_timeout(command, *timeout) {
                Ok(()) => {}
                Err(SendTimeoutError::Timeout(_)) => self.alert_and_drop(),
                Err(SendTimeoutError::Disconnected(_)) => {
                    self.metrics.record_dropped_record();
                }
            },
            OverflowPolicy::AlertAndDrop => self.alert_and_drop(),
        }
    }

    fn alert_and_drop(&self) {
        let dropped = self.metrics.record_dropped_record() + 1;

        // First drop, then every thousandth
        if dropped == 1 || dropped % 1000 == 0 {
            local_warn(format!(
                "record queue full, {} log entries dropped; consider a larger queue",
                dropped
            ));
            if let Some(callback) = &self.on_overflow {
                callback(dropped);
            }
        }
    }

    /// Wait until everything queued so far is written.
    ///
    /// Returns `false` if the worker is gone or did not answer in time.
    pub fn flush(&self, timeout: Duration) -> bool {
        let Some(sender) = &self.sender else {
            return false;
        };
        let (ack_tx, ack_rx) = bounded(1);
        if sender.send_timeout(Command::Flush(ack_tx), timeout).is_err() {
            return false;
        }
        ack_rx.recv_timeout(timeout).is_ok()
    }

    /// Stop the worker after it drains the queue.
    ///
    /// Returns `true` if it finished within `timeout`.
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        drop(self.sender.take());

        let Some(handle) = self.handle.take() else {
            return true;
        };

        let start = Instant::now();
        loop {
            if handle.is_finished() {
                if handle.join().is_err() {
                    local_error("recorder thread panicked during shutdown");
                    return false;
                }
                return true;
            }

            if start.elapsed() >= timeout {
                local_warn(format!(
                    "recorder thread did not finish within {:?}; some log entries may be lost",
                    timeout
                ));
                return false;
            }

            thread::sleep(Duration::from_millis(10));
        }
    }

    pub fn is_running(&self) -> bool {
        self.sender.is_some()
    }
}

impl Drop for Recorder {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);

        let dropped = self.metrics.dropped_records();
        if dropped > 0 {
            local_warn(format!(
                "recorder shutting down with {} dropped log entries (loss rate: {:.2}%)",
                dropped,
                self.metrics.record_loss_rate()
            ));
        }
    }
}

impl std::fmt::Debug for Recorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recorder")
            .field("running", &self.is_running())
            .field("overflow_policy", &self.overflow_policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{LoggerError, Result};
    use crate::core::log_level::LogLevel;
    use crate::core::message::Messages;
    use crate::storage::MemoryStore;
    use serde_json::Value;

    fn entry(n: usize) -> LogEntry {
        LogEntry::new("App", LogLevel::Info, format!("[App] {}", n), Messages::from("m"))
    }

    #[test]
    fn test_flush_writes_everything_queued() {
        let store = Arc::new(MemoryStore::new("logs"));
        let metrics = Arc::new(LoggerMetrics::new());
        let recorder = Recorder::spawn(
            store.clone(),
            DEFAULT_QUEUE_CAPACITY,
            OverflowPolicy::Block,
            None,
            Arc::clone(&metrics),
        );

        for n in 0..120 {
            recorder.record(entry(n));
        }
        assert!(recorder.flush(Duration::from_secs(5)));

        assert_eq!(store.len().unwrap(), 120);
        assert_eq!(metrics.recorded(), 120);

        // keys are uuids
        let key = &store.keys().unwrap()[0];
        assert!(Uuid::parse_str(key).is_ok());
    }

    #[test]
    fn test_shutdown_drains_queue() {
        let store = Arc::new(MemoryStore::new("logs"));
        let metrics = Arc::new(LoggerMetrics::new());
        let mut recorder = Recorder::spawn(
            store.clone(),
            16,
            OverflowPolicy::Block,
            None,
            Arc::clone(&metrics),
        );
        for n in 0..10 {
            recorder.record(entry(n));
        }
        assert!(recorder.shutdown(Duration::from_secs(5)));
        assert_eq!(store.len().unwrap(), 10);

        // after shutdown entries are dropped, not queued
        recorder.record(entry(11));
        assert_eq!(metrics.dropped_records(), 1);
        assert!(!recorder.flush(Duration::from_millis(10)));
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn name(&self) -> &str {
            "failing"
        }
        fn set_item(&self, _key: &str, _value: &Value) -> Result<()> {
            Err(LoggerError::storage("failing", "quota exceeded"))
        }
        fn get_item(&self, _key: &str) -> Result<Option<Value>> {
            Ok(None)
        }
        fn remove_item(&self, _key: &str) -> Result<()> {
            Ok(())
        }
        fn clear(&self) -> Result<()> {
            Ok(())
        }
        fn keys(&self) -> Result<Vec<String>> {
            Ok(Vec::new())
        }
        fn len(&self) -> Result<usize> {
            Ok(0)
        }
        fn iterate(&self, _visit: &mut dyn FnMut(&str, &Value)) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_store_failures_are_counted_not_raised() {
        let _guard = crate::core::local::HOOK_TEST_LOCK.lock();
        let messages = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = Arc::clone(&messages);
        crate::core::local::set_diagnostic_hook(Arc::new(move |_, msg| {
            sink.lock().push(msg.to_string())
        }));

        let metrics = Arc::new(LoggerMetrics::new());
        let recorder = Recorder::spawn(
            Arc::new(FailingStore),
            8,
            OverflowPolicy::Block,
            None,
            Arc::clone(&metrics),
        );
        recorder.record(entry(1));
        assert!(recorder.flush(Duration::from_secs(5)));
        crate::core::local::clear_diagnostic_hook();

        assert_eq!(metrics.record_failures(), 1);
        assert_eq!(metrics.recorded(), 0);
        assert!(messages.lock().iter().any(|m| m.contains("quota exceeded")));
    }
}
