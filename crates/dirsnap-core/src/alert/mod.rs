//! Operation Log: the transient notification stream shown to the user.
//!
//! Every store interaction and engine operation reports its outcome here.
//! Entries expire FIFO: each append schedules exactly one removal of the
//! **head** entry a fixed time-to-live later, regardless of which entry
//! scheduled it. Appending faster than one entry per TTL therefore grows
//! the queue, and a burst of expirations removes entries out of
//! correspondence with the appends that scheduled them.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    /// Successful outcome worth surfacing.
    Info,
    /// Degraded outcome; the operation continued.
    Warning,
    /// Failed outcome; in-memory state may now be ahead of the store.
    Error,
}

/// One outcome notification.
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity.
    pub kind: LogKind,
    /// Human-readable message, carrying the operation's key and cause.
    pub message: String,
    /// When the entry was appended.
    pub created_at: Instant,
}

/// Default entry time-to-live.
pub const DEFAULT_LOG_TTL: Duration = Duration::from_secs(10);

/// Append-only, time-expiring log of outcome notifications.
///
/// Expiry is pulled, not pushed: the owning shell calls
/// [`OperationLog::expire_due`] from its tick (or after awaiting a timer)
/// and each elapsed deadline removes one head entry.
#[derive(Debug)]
pub struct OperationLog {
    entries: VecDeque<LogEntry>,
    deadlines: VecDeque<Instant>,
    ttl: Duration,
}

impl Default for OperationLog {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationLog {
    /// Creates an empty log with the default 10-second TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_LOG_TTL)
    }

    /// Creates an empty log expiring entries after `ttl`.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: VecDeque::new(),
            deadlines: VecDeque::new(),
            ttl,
        }
    }

    /// Appends an entry and schedules one head-removal `ttl` from now.
    pub fn append(&mut self, kind: LogKind, message: impl Into<String>) {
        self.append_at(kind, message, Instant::now());
    }

    fn append_at(&mut self, kind: LogKind, message: impl Into<String>, now: Instant) {
        self.entries.push_back(LogEntry {
            kind,
            message: message.into(),
            created_at: now,
        });
        self.deadlines.push_back(now + self.ttl);
    }

    /// Fires every removal whose deadline has elapsed at `now`.
    ///
    /// Each elapsed deadline removes the entry currently at the head of
    /// the queue, not the entry whose append scheduled it. Returns the
    /// number of entries removed.
    pub fn expire_due(&mut self, now: Instant) -> usize {
        let mut removed = 0;
        while let Some(deadline) = self.deadlines.front() {
            if *deadline > now {
                break;
            }
            self.deadlines.pop_front();
            if self.entries.pop_front().is_some() {
                removed += 1;
            }
        }
        removed
    }

    /// The entries currently alive, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

/// Capability for reporting outcomes.
///
/// The engine holds one injected sink instead of threading a logging
/// callback through every call signature.
pub trait LogSink: Send + Sync {
    /// Appends one outcome notification.
    fn append(&self, kind: LogKind, message: String);
}

/// Shareable handle to an [`OperationLog`].
///
/// Cloning is cheap; the engine holds one clone as its [`LogSink`] while
/// the shell keeps another for display and expiry ticks.
#[derive(Debug, Clone, Default)]
pub struct SharedLog {
    inner: Arc<Mutex<OperationLog>>,
}

impl SharedLog {
    /// Creates a shared log with the default TTL.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a shared log wrapping `log`.
    pub fn from_log(log: OperationLog) -> Self {
        Self {
            inner: Arc::new(Mutex::new(log)),
        }
    }

    /// Locks the underlying log for reading or expiry.
    pub fn lock(&self) -> std::sync::MutexGuard<'_, OperationLog> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the live messages, oldest first.
    pub fn messages(&self) -> Vec<(LogKind, String)> {
        self.lock()
            .entries()
            .map(|e| (e.kind, e.message.clone()))
            .collect()
    }
}

impl LogSink for SharedLog {
    fn append(&self, kind: LogKind, message: String) {
        self.lock().append(kind, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_adds_entry_at_tail() {
        let mut log = OperationLog::new();
        log.append(LogKind::Info, "first");
        log.append(LogKind::Error, "second");

        let messages: Vec<&str> = log.entries().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }

    #[test]
    fn entry_expires_after_ttl() {
        let mut log = OperationLog::new();
        let t0 = Instant::now();
        log.append_at(LogKind::Info, "gone soon", t0);

        assert_eq!(log.expire_due(t0 + Duration::from_secs(9)), 0);
        assert_eq!(log.expire_due(t0 + Duration::from_secs(10)), 1);
        assert!(log.is_empty());
    }

    #[test]
    fn expiry_removes_head_not_scheduling_entry() {
        // The removal scheduled by the first append fires against whatever
        // is at the head at that moment.
        let mut log = OperationLog::new();
        let t0 = Instant::now();
        log.append_at(LogKind::Info, "a", t0);
        log.append_at(LogKind::Info, "b", t0 + Duration::from_secs(1));

        log.expire_due(t0 + Duration::from_secs(10));

        let messages: Vec<&str> = log.entries().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["b"]);
    }

    #[test]
    fn burst_removes_exactly_one_per_elapsed_deadline() {
        // Append at T, then five more before T+ttl: at T+ttl the length
        // decreases by exactly 1 regardless of the intervening appends.
        let mut log = OperationLog::new();
        let t0 = Instant::now();
        log.append_at(LogKind::Info, "t0", t0);
        for i in 0..5 {
            log.append_at(LogKind::Info, format!("burst {i}"), t0 + Duration::from_secs(1));
        }
        assert_eq!(log.len(), 6);

        let removed = log.expire_due(t0 + Duration::from_millis(10_500));
        assert_eq!(removed, 1);
        assert_eq!(log.len(), 5);
    }

    #[test]
    fn queue_grows_when_appends_outpace_ttl() {
        let mut log = OperationLog::new();
        let t0 = Instant::now();
        for i in 0..20 {
            log.append_at(LogKind::Info, format!("m{i}"), t0 + Duration::from_millis(i));
        }
        // No deadline has elapsed yet.
        assert_eq!(log.expire_due(t0 + Duration::from_secs(5)), 0);
        assert_eq!(log.len(), 20);

        // All twenty deadlines elapse together: the whole burst drains.
        assert_eq!(log.expire_due(t0 + Duration::from_secs(11)), 20);
        assert!(log.is_empty());
    }

    #[test]
    fn custom_ttl_is_respected() {
        let mut log = OperationLog::with_ttl(Duration::from_secs(2));
        let t0 = Instant::now();
        log.append_at(LogKind::Warning, "short-lived", t0);

        assert_eq!(log.expire_due(t0 + Duration::from_secs(1)), 0);
        assert_eq!(log.expire_due(t0 + Duration::from_secs(2)), 1);
    }

    #[test]
    fn expire_on_empty_log_is_noop() {
        let mut log = OperationLog::new();
        assert_eq!(log.expire_due(Instant::now()), 0);
    }

    #[test]
    fn shared_log_sink_appends() {
        let shared = SharedLog::new();
        shared.append(LogKind::Error, "boom".to_string());

        let messages = shared.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0], (LogKind::Error, "boom".to_string()));
    }

    #[test]
    fn shared_log_clones_view_same_entries() {
        let shared = SharedLog::new();
        let clone = shared.clone();
        shared.append(LogKind::Info, "visible to both".to_string());

        assert_eq!(clone.messages().len(), 1);
    }
}
