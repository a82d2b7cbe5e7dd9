//! Coalescing writer for rapid repeated writes
//!
//! Cancel-and-reschedule: every new write replaces the pending value and
//! restarts the quiet period, so only the last value within the window is
//! ever dispatched. A single slot, not a queue.

use sync_types::Tick;

/// Latest-value-wins write coalescer
#[derive(Debug, Clone)]
pub struct DebouncedWriter {
    window: Tick,
    pending: Option<String>,
    deadline: Option<Tick>,
}

impl DebouncedWriter {
    /// Creates a writer with the given quiet-period window
    pub fn new(window: Tick) -> Self {
        Self {
            window,
            pending: None,
            deadline: None,
        }
    }

    /// Replaces the pending value and restarts the quiet period
    pub fn schedule(&mut self, value: impl Into<String>, now: Tick) {
        self.pending = Some(value.into());
        self.deadline = Some(now.saturating_add(self.window));
    }

    /// Takes the pending value if its quiet period has elapsed
    pub fn take_due(&mut self, now: Tick) -> Option<String> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.pending.take()
            }
            _ => None,
        }
    }

    /// Drops the pending value and its timer
    pub fn cancel(&mut self) {
        self.pending = None;
        self.deadline = None;
    }

    /// Whether a value is waiting for its quiet period
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the configured window
    pub fn window(&self) -> Tick {
        self.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_due_before_window() {
        let mut writer = DebouncedWriter::new(100);
        writer.schedule("a", 0);
        assert!(writer.is_pending());
        assert_eq!(writer.take_due(99), None);
        assert!(writer.is_pending());
    }

    #[test]
    fn test_due_at_window_boundary() {
        let mut writer = DebouncedWriter::new(100);
        writer.schedule("a", 0);
        assert_eq!(writer.take_due(100), Some("a".to_string()));
        assert!(!writer.is_pending());
    }

    #[test]
    fn test_rapid_writes_deliver_only_last_value() {
        let mut writer = DebouncedWriter::new(100);
        writer.schedule("one", 0);
        writer.schedule("two", 30);
        writer.schedule("three", 60);

        // The first two deadlines never fire: each schedule restarted the
        // quiet period.
        assert_eq!(writer.take_due(100), None);
        assert_eq!(writer.take_due(160), Some("three".to_string()));
        assert_eq!(writer.take_due(300), None);
    }

    #[test]
    fn test_cancel_clears_value_and_timer() {
        let mut writer = DebouncedWriter::new(100);
        writer.schedule("a", 0);
        writer.cancel();
        assert!(!writer.is_pending());
        assert_eq!(writer.take_due(1000), None);
    }

    #[test]
    fn test_reschedule_after_take() {
        let mut writer = DebouncedWriter::new(100);
        writer.schedule("a", 0);
        assert_eq!(writer.take_due(100), Some("a".to_string()));

        writer.schedule("b", 200);
        assert_eq!(writer.take_due(299), None);
        assert_eq!(writer.take_due(300), Some("b".to_string()));
    }
}
