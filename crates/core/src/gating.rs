//! Preconditions for leaving each phase.
//!
//! Gates are derived from state on every call; nothing about attempts is stored.

use serde::{Deserialize, Serialize};

use crate::content::LessonContent;
use crate::model::{LessonState, Phase};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum GateReason {
    PredictionRequired,
    ExperimentRequired,
    TwistPredictionRequired,
    ApplicationsRemaining { remaining: usize },
    AnswersRemaining { remaining: usize },
    SubmitRequired,
    FinalPhase,
}

impl GateReason {
    /// Hint shown next to a disabled Next button.
    #[must_use]
    pub fn hint(self) -> String {
        match self {
            GateReason::PredictionRequired | GateReason::TwistPredictionRequired => {
                "Make a prediction to continue".to_string()
            }
            GateReason::ExperimentRequired => "Try the experiment first".to_string(),
            GateReason::ApplicationsRemaining { remaining } => {
                format!("Explore {remaining} more application(s)")
            }
            GateReason::AnswersRemaining { remaining } => {
                format!("Answer {remaining} more question(s)")
            }
            GateReason::SubmitRequired => "Submit your answers".to_string(),
            GateReason::FinalPhase => "Lesson complete".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Open,
    Blocked(GateReason),
}

impl Gate {
    #[must_use]
    pub fn is_open(self) -> bool {
        matches!(self, Gate::Open)
    }
}

/// Whether the learner may advance from the current phase.
#[must_use]
pub fn gate(state: &LessonState, content: &LessonContent) -> Gate {
    if state.phase().is_last() {
        return Gate::Blocked(GateReason::FinalPhase);
    }
    requirement(state, content).map_or(Gate::Open, Gate::Blocked)
}

/// Whether every phase between the current one and `target` lets the learner through.
///
/// Moving backwards is always reachable.
#[must_use]
pub fn can_reach(state: &LessonState, content: &LessonContent, target: Phase) -> bool {
    let mut walker = state.clone();
    let mut phase = state.phase();
    while phase < target {
        walker.set_phase(phase);
        if requirement(&walker, content).is_some() {
            return false;
        }
        match phase.next() {
            Some(next) => phase = next,
            None => return false,
        }
    }
    true
}

/// The unmet requirement of the current phase, if any.
pub(crate) fn requirement(state: &LessonState, content: &LessonContent) -> Option<GateReason> {
    match state.phase() {
        Phase::Hook | Phase::Review | Phase::TwistReview | Phase::Mastery => None,
        Phase::Predict => state
            .prediction()
            .is_none()
            .then_some(GateReason::PredictionRequired),
        Phase::Play => (!state.touched()).then_some(GateReason::ExperimentRequired),
        Phase::TwistPredict => state
            .twist_prediction()
            .is_none()
            .then_some(GateReason::TwistPredictionRequired),
        Phase::TwistPlay => (!state.twist_touched()).then_some(GateReason::ExperimentRequired),
        Phase::Transfer => {
            let remaining = content
                .applications
                .len()
                .saturating_sub(state.completed_apps().len());
            (remaining > 0).then_some(GateReason::ApplicationsRemaining { remaining })
        }
        Phase::Test => {
            let remaining = state.answers().remaining();
            if remaining > 0 {
                Some(GateReason::AnswersRemaining { remaining })
            } else if !state.is_submitted() {
                Some(GateReason::SubmitRequired)
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::LessonKind;
    use crate::physics::Wavelength;

    #[test]
    fn hook_and_reviews_are_open() {
        let content = LessonKind::SolarCells.content();
        let mut state = LessonState::new(content);
        for phase in [Phase::Hook, Phase::Review, Phase::TwistReview] {
            state.set_phase(phase);
            assert_eq!(gate(&state, content), Gate::Open);
        }
    }

    #[test]
    fn play_opens_after_first_touch() {
        let content = LessonKind::SolarCells.content();
        let mut state = LessonState::new(content);
        state.set_phase(Phase::Play);
        assert_eq!(
            gate(&state, content),
            Gate::Blocked(GateReason::ExperimentRequired)
        );
        state.set_intensity(80).unwrap();
        assert!(gate(&state, content).is_open());

        state.set_phase(Phase::TwistPlay);
        assert!(!gate(&state, content).is_open());
        state.set_wavelength(Wavelength::Green).unwrap();
        assert!(gate(&state, content).is_open());
    }

    #[test]
    fn transfer_counts_remaining_tabs() {
        let content = LessonKind::SeismicWaves.content();
        let mut state = LessonState::new(content);
        state.set_phase(Phase::Transfer);
        state.open_application(content, 2).unwrap();
        assert_eq!(
            gate(&state, content),
            Gate::Blocked(GateReason::ApplicationsRemaining {
                remaining: content.applications.len() - 1
            })
        );
    }

    #[test]
    fn test_needs_answers_then_submit() {
        let content = LessonKind::SeismicWaves.content();
        let mut state = LessonState::new(content);
        state.set_phase(Phase::Test);
        assert_eq!(
            gate(&state, content),
            Gate::Blocked(GateReason::AnswersRemaining {
                remaining: content.questions.len()
            })
        );
        for i in 0..content.questions.len() {
            state.select_answer(content, i, 0).unwrap();
        }
        assert_eq!(gate(&state, content), Gate::Blocked(GateReason::SubmitRequired));
        state.submit_test(content).unwrap();
        assert_eq!(gate(&state, content), Gate::Open);
    }

    #[test]
    fn can_reach_stops_at_first_unmet_requirement() {
        let content = LessonKind::SolarCells.content();
        let mut state = LessonState::new(content);
        assert!(can_reach(&state, content, Phase::Predict));
        assert!(!can_reach(&state, content, Phase::Play));

        state.set_phase(Phase::Predict);
        state.select_prediction(content, 0).unwrap();
        assert!(can_reach(&state, content, Phase::Play));
        assert!(!can_reach(&state, content, Phase::Review));
        assert!(can_reach(&state, content, Phase::Hook));
    }

    #[test]
    fn mastery_is_final() {
        let content = LessonKind::SeismicWaves.content();
        let mut state = LessonState::new(content);
        state.set_phase(Phase::Mastery);
        assert_eq!(gate(&state, content), Gate::Blocked(GateReason::FinalPhase));
    }
}
