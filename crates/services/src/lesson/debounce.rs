use chrono::{DateTime, Duration, Utc};

/// Swallows navigation requests that arrive too soon after the last move.
#[derive(Debug, Clone)]
pub(crate) struct NavigationDebounce {
    window: Duration,
    last_move: Option<DateTime<Utc>>,
}

impl NavigationDebounce {
    pub(crate) fn new(window_ms: u32) -> Self {
        Self {
            window: Duration::milliseconds(i64::from(window_ms)),
            last_move: None,
        }
    }

    /// Returns `true` and arms the window when `now` is outside it.
    pub(crate) fn try_acquire(&mut self, now: DateTime<Utc>) -> bool {
        if let Some(last) = self.last_move {
            if now - last < self.window {
                return false;
            }
        }
        self.last_move = Some(now);
        true
    }

    pub(crate) fn clear(&mut self) {
        self.last_move = None;
    }
}
