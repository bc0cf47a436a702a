//! Local diagnostic channel
//!
//! The logger never reports its own problems through the application's
//! log stream. Warnings about misuse, storage failures and unsupported
//! capabilities go here instead: stderr by default, or a process-wide hook.

use colored::Colorize;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;

/// Prefix carried by every diagnostic line
pub const DIAGNOSTIC_PREFIX: &str = "[namespace-logger]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Log,
    Warn,
    Error,
}

/// Receiver for diagnostics, replacing stderr output when installed
pub type DiagnosticHook = Arc<dyn Fn(DiagnosticLevel, &str) + Send + Sync>;

static HOOK: Lazy<RwLock<Option<DiagnosticHook>>> = Lazy::new(|| RwLock::new(None));

/// Install a process-wide diagnostic hook; returns the previous one.
pub fn set_diagnostic_hook(hook: DiagnosticHook) -> Option<DiagnosticHook> {
    HOOK.write().replace(hook)
}

/// Remove the diagnostic hook, restoring stderr output.
pub fn clear_diagnostic_hook() -> Option<DiagnosticHook> {
    HOOK.write().take()
}

fn emit(level: DiagnosticLevel, message: &str) {
    let hook = HOOK.read().clone();
    if let Some(hook) = hook {
        hook(level, message);
        return;
    }

    let line = format!("{} {}", DIAGNOSTIC_PREFIX, message);
    match level {
        DiagnosticLevel::Log => eprintln!("{}", line.truecolor(0x00, 0xbf, 0xff)),
        DiagnosticLevel::Warn => eprintln!("{}", line.yellow()),
        DiagnosticLevel::Error => eprintln!("{}", line.red()),
    }
}

pub fn local_log(message: impl AsRef<str>) {
    emit(DiagnosticLevel::Log, message.as_ref());
}

pub fn local_warn(message: impl AsRef<str>) {
    emit(DiagnosticLevel::Warn, message.as_ref());
}

pub fn local_error(message: impl AsRef<str>) {
    emit(DiagnosticLevel::Error, message.as_ref());
}

/// Serialises tests that install the process-wide hook.
#[cfg(test)]
pub(crate) static HOOK_TEST_LOCK: parking_lot::Mutex<()> = parking_lot::const_mutex(());

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_hook_receives_diagnostics() {
        let _guard = HOOK_TEST_LOCK.lock();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        set_diagnostic_hook(Arc::new(move |level, msg| {
            sink.lock().push((level, msg.to_string()));
        }));

        local_warn("store failed");
        local_error("file create failed");
        clear_diagnostic_hook();

        let seen = seen.lock();
        assert!(seen.contains(&(DiagnosticLevel::Warn, "store failed".to_string())));
        assert!(seen.contains(&(DiagnosticLevel::Error, "file create failed".to_string())));
    }
}
