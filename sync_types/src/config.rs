//! Typed configuration for the synchronization core
//!
//! No config files and no environment variables; hosts construct a config
//! value and pass it in at page load.

use serde::{Deserialize, Serialize};

use crate::clock::Tick;

/// Default debounce window for embedded-widget writes, in ticks
pub const DEFAULT_WRITE_DEBOUNCE_TICKS: Tick = 100;

/// Default notification reading speed, deliberately below average
pub const DEFAULT_NOTICE_WORDS_PER_MINUTE: u32 = 100;

/// Tunable parameters for a page's synchronization session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Quiet period before a coalesced widget write is dispatched
    pub write_debounce_ticks: Tick,
    /// Reading speed used to derive notification display durations
    pub notice_words_per_minute: u32,
}

impl SyncConfig {
    /// Sets the debounce window
    pub fn with_write_debounce(mut self, ticks: Tick) -> Self {
        self.write_debounce_ticks = ticks;
        self
    }

    /// Sets the notification reading speed
    pub fn with_notice_wpm(mut self, wpm: u32) -> Self {
        self.notice_words_per_minute = wpm;
        self
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            write_debounce_ticks: DEFAULT_WRITE_DEBOUNCE_TICKS,
            notice_words_per_minute: DEFAULT_NOTICE_WORDS_PER_MINUTE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SyncConfig::default();
        assert_eq!(config.write_debounce_ticks, DEFAULT_WRITE_DEBOUNCE_TICKS);
        assert_eq!(
            config.notice_words_per_minute,
            DEFAULT_NOTICE_WORDS_PER_MINUTE
        );
    }

    #[test]
    fn test_builder_overrides() {
        let config = SyncConfig::default()
            .with_write_debounce(50)
            .with_notice_wpm(180);
        assert_eq!(config.write_debounce_ticks, 50);
        assert_eq!(config.notice_words_per_minute, 180);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = SyncConfig::default().with_write_debounce(250);
        let json = serde_json::to_string(&config).unwrap();
        let back: SyncConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
