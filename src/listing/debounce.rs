//! Debounce for rapid free-text input.
//!
//! Modeled as an explicit deadline machine instead of a timer: callers feed
//! keystrokes with a timestamp and poll for the settled value. Each push
//! discards the previous pending value and re-arms the deadline, so only the
//! final value after a quiet window is ever emitted.

use std::time::{Duration, Instant};

/// Quiet window applied to search boxes.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Records a new input value at `now`, cancelling any pending one.
    pub fn push(&mut self, value: impl Into<String>, now: Instant) {
        self.pending = Some((value.into(), now + self.delay));
    }

    /// Emits the pending value once its quiet window has elapsed.
    ///
    /// Returns `None` while the window is still open or nothing is pending;
    /// a value is emitted at most once.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    /// Drops the pending value without emitting it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_last_value_within_window_propagates() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();

        debouncer.push("a", start);
        debouncer.push("al", start + Duration::from_millis(100));
        debouncer.push("ali", start + Duration::from_millis(200));

        // Still inside the quiet window of the last keystroke.
        assert_eq!(debouncer.poll(start + Duration::from_millis(350)), None);

        // 300ms of quiet after "ali": exactly one emission.
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(500)),
            Some("ali".to_string())
        );
        assert_eq!(debouncer.poll(start + Duration::from_millis(600)), None);
    }

    #[test]
    fn poll_before_deadline_emits_nothing() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();
        debouncer.push("a", start);
        assert_eq!(debouncer.poll(start + Duration::from_millis(299)), None);
        assert!(debouncer.is_pending());
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(300)),
            Some("a".to_string())
        );
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn cancel_discards_pending() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();
        debouncer.push("a", start);
        debouncer.cancel();
        assert_eq!(debouncer.poll(start + Duration::from_secs(1)), None);
    }
}
