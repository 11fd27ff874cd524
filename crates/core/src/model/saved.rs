use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content::{LessonContent, LessonKind};
use crate::gating;
use crate::model::controls::ExperimentControls;
use crate::model::phase::Phase;
use crate::model::quiz::{self, QuizAnswers, QuizScore};
use crate::model::state::LessonState;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SavedStateError {
    #[error("malformed saved state: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Snapshot handed to the host after every mutation and accepted back on resume.
///
/// Every field is optional on the wire; hydration repairs whatever does not
/// fit the lesson.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SavedLessonState {
    pub lesson: Option<LessonKind>,
    pub phase: String,
    pub furthest: Option<String>,
    pub prediction: Option<usize>,
    pub twist_prediction: Option<usize>,
    pub answers: QuizAnswers,
    pub score: Option<QuizScore>,
    pub completed_apps: Vec<usize>,
    pub controls: Option<ExperimentControls>,
    pub touched: Option<bool>,
    pub twist_touched: Option<bool>,
}

impl SavedLessonState {
    /// # Errors
    ///
    /// Returns `SavedStateError::Malformed` when the text is not a saved-state object.
    pub fn from_json(raw: &str) -> Result<Self, SavedStateError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// # Errors
    ///
    /// Returns `SavedStateError::Malformed` if serialization fails.
    pub fn to_json(&self) -> Result<String, SavedStateError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl LessonState {
    #[must_use]
    pub fn to_saved(&self) -> SavedLessonState {
        SavedLessonState {
            lesson: Some(self.kind()),
            phase: self.phase().as_str().to_string(),
            furthest: Some(self.furthest().as_str().to_string()),
            prediction: self.prediction(),
            twist_prediction: self.twist_prediction(),
            answers: self.answers().clone(),
            score: self.score(),
            completed_apps: self.completed_apps().iter().copied().collect(),
            controls: Some(*self.controls()),
            touched: Some(self.touched()),
            twist_touched: Some(self.twist_touched()),
        }
    }

    /// Rebuild state from a host-supplied snapshot.
    ///
    /// Parts that do not fit the lesson fall back to defaults. A snapshot for
    /// another lesson is discarded entirely. The resumed phase is pulled back
    /// to the first phase whose requirement the snapshot does not satisfy, so
    /// gating matches what live navigation would have allowed. The saved
    /// furthest-reached marker is kept as is.
    #[must_use]
    pub fn hydrate(saved: &SavedLessonState, content: &LessonContent) -> Self {
        let fresh = Self::new(content);
        if saved.lesson.is_some_and(|kind| kind != content.kind) {
            return fresh;
        }

        let saved_phase = saved.phase.parse::<Phase>().unwrap_or(Phase::first());
        let saved_furthest = saved
            .furthest
            .as_deref()
            .and_then(|tag| tag.parse::<Phase>().ok())
            .unwrap_or(saved_phase)
            .max(saved_phase);

        let prediction = saved
            .prediction
            .filter(|choice| *choice < content.prediction.options.len());
        let twist_prediction = saved
            .twist_prediction
            .filter(|choice| *choice < content.twist.options.len());

        let answers = if saved.answers.fits(content.questions) {
            saved.answers.clone()
        } else {
            QuizAnswers::new(content.questions.len())
        };
        // recompute instead of trusting the stored number
        let score = saved
            .score
            .filter(|_| answers.is_complete())
            .and_then(|_| quiz::score(content.questions, &answers).ok());

        let completed_apps: BTreeSet<usize> = saved
            .completed_apps
            .iter()
            .copied()
            .filter(|index| *index < content.applications.len())
            .collect();

        let controls = saved
            .controls
            .filter(|c| c.same_kind(fresh.controls()))
            .unwrap_or(*fresh.controls());

        let touched = saved.touched.unwrap_or(saved_furthest > Phase::Play);
        let twist_touched = saved
            .twist_touched
            .unwrap_or(saved_furthest > Phase::TwistPlay);

        let mut state = Self::from_parts(
            content.kind,
            Phase::first(),
            Phase::first(),
            prediction,
            twist_prediction,
            answers,
            score,
            completed_apps,
            controls,
            touched,
            twist_touched,
        );

        let reachable = reachable(&mut state, content, saved_furthest);
        // the marker only drives dot status; jumps still check requirements
        state.set_phase(saved_furthest);
        state.set_phase(saved_phase.min(reachable));
        state
    }
}

/// Walk forward from the first phase while requirements hold, up to `target`.
fn reachable(state: &mut LessonState, content: &LessonContent, target: Phase) -> Phase {
    let mut phase = Phase::first();
    while phase < target {
        state.set_phase(phase);
        if gating::requirement(state, content).is_some() {
            break;
        }
        match phase.next() {
            Some(next) => phase = next,
            None => break,
        }
    }
    phase
}
