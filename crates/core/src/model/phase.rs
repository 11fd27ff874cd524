use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PhaseParseError {
    #[error("unknown phase tag: {0}")]
    UnknownTag(String),
}

//
// ─── PHASE ────────────────────────────────────────────────────────────────────
//

/// One step of the fixed ten-stage lesson sequence.
///
/// Declaration order is progression order; `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Opening question that frames the concept.
    Hook,
    /// Learner commits to a prediction before experimenting.
    Predict,
    /// Hands-on experiment with the lesson's controls.
    Play,
    /// Explains the result of the experiment.
    Review,
    /// Prediction about the surprising follow-up.
    TwistPredict,
    /// Experiment for the twist.
    TwistPlay,
    /// Explains the twist.
    TwistReview,
    /// Real-world applications; every tab must be opened.
    Transfer,
    /// Multiple-choice quiz.
    Test,
    /// Final summary.
    Mastery,
}

impl Phase {
    pub const ALL: [Phase; 10] = [
        Phase::Hook,
        Phase::Predict,
        Phase::Play,
        Phase::Review,
        Phase::TwistPredict,
        Phase::TwistPlay,
        Phase::TwistReview,
        Phase::Transfer,
        Phase::Test,
        Phase::Mastery,
    ];

    pub const COUNT: usize = Self::ALL.len();

    #[must_use]
    pub fn first() -> Self {
        Phase::Hook
    }

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    #[must_use]
    pub fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    #[must_use]
    pub fn is_first(self) -> bool {
        self == Phase::Hook
    }

    #[must_use]
    pub fn is_last(self) -> bool {
        self == Phase::Mastery
    }

    /// Stable tag used in saved state and events.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Hook => "hook",
            Phase::Predict => "predict",
            Phase::Play => "play",
            Phase::Review => "review",
            Phase::TwistPredict => "twist_predict",
            Phase::TwistPlay => "twist_play",
            Phase::TwistReview => "twist_review",
            Phase::Transfer => "transfer",
            Phase::Test => "test",
            Phase::Mastery => "mastery",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Phase::Hook => "Hook",
            Phase::Predict => "Predict",
            Phase::Play => "Lab",
            Phase::Review => "Review",
            Phase::TwistPredict => "Twist Predict",
            Phase::TwistPlay => "Twist Lab",
            Phase::TwistReview => "Twist Review",
            Phase::Transfer => "Real World",
            Phase::Test => "Test",
            Phase::Mastery => "Mastery",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = PhaseParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|phase| phase.as_str() == s)
            .ok_or_else(|| PhaseParseError::UnknownTag(s.to_string()))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
