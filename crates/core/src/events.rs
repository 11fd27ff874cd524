use serde::{Deserialize, Serialize};

use crate::content::LessonKind;
use crate::model::{ControlKind, Phase};

/// Analytics events reported to the host after user actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LessonEvent {
    LessonStarted {
        lesson: LessonKind,
    },
    LessonResumed {
        lesson: LessonKind,
        phase: Phase,
    },
    PhaseChange {
        from: Phase,
        to: Phase,
    },
    PredictionMade {
        choice: usize,
        correct: bool,
    },
    TwistPredictionMade {
        choice: usize,
        correct: bool,
    },
    ControlChanged {
        control: ControlKind,
    },
    AppExplored {
        index: usize,
        completed: usize,
        total: usize,
    },
    AnswerSelected {
        question: usize,
        choice: usize,
    },
    TestCompleted {
        correct: u32,
        total: u32,
        passed: bool,
    },
    MasteryAchieved {
        correct: u32,
        total: u32,
    },
    LessonReset,
}

impl LessonEvent {
    /// Snake-case tag, matching the serialized `type` field.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            LessonEvent::LessonStarted { .. } => "lesson_started",
            LessonEvent::LessonResumed { .. } => "lesson_resumed",
            LessonEvent::PhaseChange { .. } => "phase_change",
            LessonEvent::PredictionMade { .. } => "prediction_made",
            LessonEvent::TwistPredictionMade { .. } => "twist_prediction_made",
            LessonEvent::ControlChanged { .. } => "control_changed",
            LessonEvent::AppExplored { .. } => "app_explored",
            LessonEvent::AnswerSelected { .. } => "answer_selected",
            LessonEvent::TestCompleted { .. } => "test_completed",
            LessonEvent::MasteryAchieved { .. } => "mastery_achieved",
            LessonEvent::LessonReset => "lesson_reset",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let event = LessonEvent::PhaseChange {
            from: Phase::Hook,
            to: Phase::Predict,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "phase_change");
        assert_eq!(json["from"], "hook");
        assert_eq!(json["to"], "predict");
    }

    #[test]
    fn name_matches_wire_tag() {
        let events = [
            LessonEvent::LessonReset,
            LessonEvent::TestCompleted {
                correct: 7,
                total: 10,
                passed: true,
            },
            LessonEvent::ControlChanged {
                control: ControlKind::Angle,
            },
        ];
        for event in events {
            let json = serde_json::to_value(&event).unwrap();
            assert_eq!(json["type"], event.name());
        }
    }
}
