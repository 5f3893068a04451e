//! Translator warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the selector scanner to report input it tolerates instead of
//! rejecting (stray characters, empty group members, unbalanced parentheses).

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use owo_colors::OwoColorize;

/// Maximum number of distinct warnings remembered between clears.
pub const MAX_TRACKED_WARNINGS: usize = 256;

/// Global log of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<WarningLog>> = Mutex::new(None);

/// Whether warnings are printed with ANSI colors
static COLOR: AtomicBool = AtomicBool::new(true);

/// A deduplication set that forgets everything once it reaches its
/// capacity, so long-running library use stays bounded.
#[derive(Debug)]
struct WarningLog {
    seen: HashSet<String>,
    capacity: usize,
}

impl WarningLog {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            seen: HashSet::new(),
            capacity,
        }
    }

    /// Record `key`; returns `true` if it was not already recorded.
    fn record(&mut self, key: String) -> bool {
        if self.seen.contains(&key) {
            return false;
        }
        if self.seen.len() >= self.capacity {
            self.seen.clear();
        }
        self.seen.insert(key)
    }

    fn contains(&self, key: &str) -> bool {
        self.seen.contains(key)
    }

    fn len(&self) -> usize {
        self.seen.len()
    }

    fn clear(&mut self) {
        self.seen.clear();
    }
}

fn warned() -> MutexGuard<'static, Option<WarningLog>> {
    WARNED.lock().unwrap_or_else(PoisonError::into_inner)
}

fn key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Warn about tolerated input (prints once per unique message)
///
/// # Example
/// ```
/// css2xpath_common::warning::warn_once("Selector", "stray '+' at offset 2");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let should_print = warned()
        .get_or_insert_with(|| WarningLog::with_capacity(MAX_TRACKED_WARNINGS))
        .record(key(component, message));

    if should_print {
        let line = format!("[css2xpath {component}] ⚠ {message}");
        if COLOR.load(Ordering::Relaxed) {
            eprintln!("{}", line.yellow());
        } else {
            eprintln!("{line}");
        }
    }
}

/// Check whether a warning has been emitted since the last [`clear_warnings`].
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    warned()
        .as_ref()
        .is_some_and(|log| log.contains(&key(component, message)))
}

/// Number of distinct warnings currently remembered.
#[must_use]
pub fn tracked_warnings() -> usize {
    warned().as_ref().map_or(0, WarningLog::len)
}

/// Clear all recorded warnings (call before translating a new input)
pub fn clear_warnings() {
    if let Some(log) = warned().as_mut() {
        log.clear();
    }
}

/// Enable or disable ANSI colors on warning output.
pub fn set_color_enabled(enabled: bool) {
    COLOR.store(enabled, Ordering::Relaxed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warn_once_records_message() {
        warn_once("Test", "recorded once");
        assert!(has_warned("Test", "recorded once"));
        assert!(!has_warned("Other", "recorded once"));
    }

    #[test]
    fn test_log_deduplicates() {
        let mut log = WarningLog::with_capacity(4);
        assert!(log.record("a".to_owned()));
        assert!(!log.record("a".to_owned()));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_log_stays_within_capacity() {
        let mut log = WarningLog::with_capacity(8);
        for i in 0..1000 {
            assert!(log.record(format!("message {i}")));
            assert!(log.len() <= 8);
        }
        assert!(log.contains("message 999"));
        assert!(!log.contains("message 0"));
    }

    #[test]
    fn test_key_includes_component() {
        assert_eq!(key("Selector", "msg"), "[Selector] msg");
    }
}
