//! Time source shared by navigation debounce and persistence timestamps.

use chrono::{DateTime, Duration, TimeZone, Utc};

/// Where "now" comes from.
///
/// Sessions read it on every navigation attempt, so tests swap in a
/// `Fixed` clock and step it forward by hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn default_clock() -> Self {
        Self::System
    }

    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(at) => *at,
        }
    }

    /// Step a fixed clock forward. The system clock ignores this.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(at) = self {
            *at += delta;
        }
    }

    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self, Clock::Fixed(_))
    }
}

/// 2024-09-02 09:00 UTC, the first lesson of a school term.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 2, 9, 0, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}
