//! Pipeline tuning knobs.

use std::time::Duration;

/// How long a typing-search rule waits for the keystroke stream to quiet
/// down before it runs the filter.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Tunables for the event pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Debounce window for typing-driven rules.
    pub debounce: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

impl PipelineConfig {
    /// Default tuning.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the debounce window. Tests shrink this to keep suites fast.
    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}
