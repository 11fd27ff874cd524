use serde::{Deserialize, Serialize};

/// Shortest accepted navigation debounce window.
pub const MIN_DEBOUNCE_MS: u32 = 100;
/// Longest accepted navigation debounce window.
pub const MAX_DEBOUNCE_MS: u32 = 400;
pub const DEFAULT_DEBOUNCE_MS: u32 = 300;

/// Per-lesson behaviour knobs supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonSettings {
    debounce_ms: u32,
    allow_dot_navigation: bool,
}

impl LessonSettings {
    /// Debounce is clamped to `MIN_DEBOUNCE_MS..=MAX_DEBOUNCE_MS`.
    #[must_use]
    pub fn new(debounce_ms: u32, allow_dot_navigation: bool) -> Self {
        Self {
            debounce_ms: debounce_ms.clamp(MIN_DEBOUNCE_MS, MAX_DEBOUNCE_MS),
            allow_dot_navigation,
        }
    }

    #[must_use]
    pub fn debounce_ms(&self) -> u32 {
        self.debounce_ms
    }

    #[must_use]
    pub fn allow_dot_navigation(&self) -> bool {
        self.allow_dot_navigation
    }

    #[must_use]
    pub fn with_dot_navigation(mut self, allow: bool) -> Self {
        self.allow_dot_navigation = allow;
        self
    }
}

impl Default for LessonSettings {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debounce_is_clamped() {
        assert_eq!(LessonSettings::new(5, true).debounce_ms(), MIN_DEBOUNCE_MS);
        assert_eq!(LessonSettings::new(10_000, true).debounce_ms(), MAX_DEBOUNCE_MS);
        assert_eq!(LessonSettings::new(250, false).debounce_ms(), 250);
    }
}
