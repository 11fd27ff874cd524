use std::collections::BTreeSet;

use thiserror::Error;

use crate::content::{LessonContent, LessonKind};
use crate::model::controls::{
    ExperimentControls, MAX_ANGLE_DEG, MAX_INTENSITY_PCT, SeismicControls, SolarControls,
};
use crate::model::phase::Phase;
use crate::model::quiz::{self, QuizAnswers, QuizError, QuizScore};
use crate::physics::{Medium, WaveType, Wavelength};

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Rejected mutations. Callers treat these as "ignore the click".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StateError {
    #[error("action not available in phase {phase}")]
    WrongPhase { phase: Phase },

    #[error("choice {choice} is out of range ({len} options)")]
    ChoiceOutOfRange { choice: usize, len: usize },

    #[error("application {index} is out of range ({len} applications)")]
    ApplicationOutOfRange { index: usize, len: usize },

    #[error("control does not belong to this lesson")]
    ControlUnavailable,

    #[error("{remaining} questions are still unanswered")]
    AnswersIncomplete { remaining: usize },

    #[error("test already submitted")]
    AlreadySubmitted,

    #[error(transparent)]
    Quiz(#[from] QuizError),
}

//
// ─── LESSON STATE ─────────────────────────────────────────────────────────────
//

/// Flat view-model of one lesson run.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonState {
    kind: LessonKind,
    phase: Phase,
    furthest: Phase,
    prediction: Option<usize>,
    twist_prediction: Option<usize>,
    answers: QuizAnswers,
    score: Option<QuizScore>,
    completed_apps: BTreeSet<usize>,
    active_app: usize,
    controls: ExperimentControls,
    touched: bool,
    twist_touched: bool,
}

impl LessonState {
    #[must_use]
    pub fn new(content: &LessonContent) -> Self {
        Self {
            kind: content.kind,
            phase: Phase::first(),
            furthest: Phase::first(),
            prediction: None,
            twist_prediction: None,
            answers: QuizAnswers::new(content.questions.len()),
            score: None,
            completed_apps: BTreeSet::new(),
            active_app: 0,
            controls: content.kind.default_controls(),
            touched: false,
            twist_touched: false,
        }
    }

    /// Back to a fresh run at the first phase.
    pub fn reset(&mut self, content: &LessonContent) {
        *self = Self::new(content);
    }

    #[must_use]
    pub fn kind(&self) -> LessonKind {
        self.kind
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Latest phase reached in this run.
    #[must_use]
    pub fn furthest(&self) -> Phase {
        self.furthest
    }

    #[must_use]
    pub fn prediction(&self) -> Option<usize> {
        self.prediction
    }

    #[must_use]
    pub fn twist_prediction(&self) -> Option<usize> {
        self.twist_prediction
    }

    #[must_use]
    pub fn answers(&self) -> &QuizAnswers {
        &self.answers
    }

    #[must_use]
    pub fn score(&self) -> Option<QuizScore> {
        self.score
    }

    #[must_use]
    pub fn completed_apps(&self) -> &BTreeSet<usize> {
        &self.completed_apps
    }

    #[must_use]
    pub fn active_app(&self) -> usize {
        self.active_app
    }

    #[must_use]
    pub fn controls(&self) -> &ExperimentControls {
        &self.controls
    }

    #[must_use]
    pub fn touched(&self) -> bool {
        self.touched
    }

    #[must_use]
    pub fn twist_touched(&self) -> bool {
        self.twist_touched
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.score.is_some()
    }

    /// Move to `phase` and extend the furthest-reached marker.
    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.furthest = self.furthest.max(phase);
    }

    //
    // ─── PREDICTIONS ──────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `StateError` outside the predict phase or for an unknown option.
    pub fn select_prediction(
        &mut self,
        content: &LessonContent,
        choice: usize,
    ) -> Result<(), StateError> {
        self.require_phase(Phase::Predict)?;
        check_choice(choice, content.prediction.options.len())?;
        self.prediction = Some(choice);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `StateError` outside the twist-predict phase or for an unknown option.
    pub fn select_twist_prediction(
        &mut self,
        content: &LessonContent,
        choice: usize,
    ) -> Result<(), StateError> {
        self.require_phase(Phase::TwistPredict)?;
        check_choice(choice, content.twist.options.len())?;
        self.twist_prediction = Some(choice);
        Ok(())
    }

    //
    // ─── EXPERIMENT CONTROLS ──────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `StateError` outside a lab phase or for a non-solar lesson.
    pub fn set_intensity(&mut self, pct: u8) -> Result<(), StateError> {
        let pct = pct.min(MAX_INTENSITY_PCT);
        self.with_solar(|c| c.intensity_pct = pct)
    }

    /// # Errors
    ///
    /// Returns `StateError` outside a lab phase or for a non-solar lesson.
    pub fn set_angle(&mut self, deg: u8) -> Result<(), StateError> {
        let deg = deg.min(MAX_ANGLE_DEG);
        self.with_solar(|c| c.angle_deg = deg)
    }

    /// # Errors
    ///
    /// Returns `StateError` outside a lab phase or for a non-solar lesson.
    pub fn set_wavelength(&mut self, wavelength: Wavelength) -> Result<(), StateError> {
        self.with_solar(|c| c.wavelength = wavelength)
    }

    /// # Errors
    ///
    /// Returns `StateError` outside a lab phase or for a non-seismic lesson.
    pub fn set_wave_type(&mut self, wave_type: WaveType) -> Result<(), StateError> {
        self.with_seismic(|c| c.wave_type = wave_type)
    }

    /// # Errors
    ///
    /// Returns `StateError` outside a lab phase or for a non-seismic lesson.
    pub fn set_medium(&mut self, medium: Medium) -> Result<(), StateError> {
        self.with_seismic(|c| c.medium = medium)
    }

    /// Counts as touching the experiment without changing a value,
    /// e.g. launching a wave.
    ///
    /// # Errors
    ///
    /// Returns `StateError::WrongPhase` outside a lab phase.
    pub fn mark_touched(&mut self) -> Result<(), StateError> {
        match self.phase {
            Phase::Play => self.touched = true,
            Phase::TwistPlay => self.twist_touched = true,
            phase => return Err(StateError::WrongPhase { phase }),
        }
        Ok(())
    }

    fn with_solar(&mut self, f: impl FnOnce(&mut SolarControls)) -> Result<(), StateError> {
        self.require_lab()?;
        let ExperimentControls::Solar(controls) = &mut self.controls else {
            return Err(StateError::ControlUnavailable);
        };
        f(controls);
        self.mark_touched()
    }

    fn with_seismic(&mut self, f: impl FnOnce(&mut SeismicControls)) -> Result<(), StateError> {
        self.require_lab()?;
        let ExperimentControls::Seismic(controls) = &mut self.controls else {
            return Err(StateError::ControlUnavailable);
        };
        f(controls);
        self.mark_touched()
    }

    //
    // ─── TRANSFER ─────────────────────────────────────────────────────────
    //

    /// Open an application tab and record it as explored.
    ///
    /// Returns `true` when the tab had not been explored before.
    ///
    /// # Errors
    ///
    /// Returns `StateError` outside the transfer phase or for an unknown tab.
    pub fn open_application(
        &mut self,
        content: &LessonContent,
        index: usize,
    ) -> Result<bool, StateError> {
        self.require_phase(Phase::Transfer)?;
        let len = content.applications.len();
        if index >= len {
            return Err(StateError::ApplicationOutOfRange { index, len });
        }
        self.active_app = index;
        Ok(self.completed_apps.insert(index))
    }

    #[must_use]
    pub fn all_apps_explored(&self, content: &LessonContent) -> bool {
        self.completed_apps.len() >= content.applications.len()
    }

    //
    // ─── TEST ─────────────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `StateError` outside the test phase, after submission, or for
    /// out-of-range indices.
    pub fn select_answer(
        &mut self,
        content: &LessonContent,
        question: usize,
        option: usize,
    ) -> Result<(), StateError> {
        self.require_phase(Phase::Test)?;
        if self.is_submitted() {
            return Err(StateError::AlreadySubmitted);
        }
        self.answers.select(content.questions, question, option)?;
        Ok(())
    }

    /// Score the answers and lock them.
    ///
    /// # Errors
    ///
    /// Returns `StateError::AnswersIncomplete` until every question is answered.
    pub fn submit_test(&mut self, content: &LessonContent) -> Result<QuizScore, StateError> {
        self.require_phase(Phase::Test)?;
        if self.is_submitted() {
            return Err(StateError::AlreadySubmitted);
        }
        if !self.answers.is_complete() {
            return Err(StateError::AnswersIncomplete {
                remaining: self.answers.remaining(),
            });
        }
        let score = quiz::score(content.questions, &self.answers)?;
        self.score = Some(score);
        Ok(score)
    }

    /// Clear answers and score so the quiz can be taken again.
    ///
    /// # Errors
    ///
    /// Returns `StateError::WrongPhase` outside the test phase.
    pub fn retry_test(&mut self) -> Result<(), StateError> {
        self.require_phase(Phase::Test)?;
        self.answers.clear();
        self.score = None;
        Ok(())
    }

    #[must_use]
    pub fn passed(&self, content: &LessonContent) -> bool {
        self.score
            .is_some_and(|score| score.passed(content.pass_threshold))
    }

    //
    // ─── HELPERS ──────────────────────────────────────────────────────────
    //

    fn require_phase(&self, expected: Phase) -> Result<(), StateError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(StateError::WrongPhase { phase: self.phase })
        }
    }

    fn require_lab(&self) -> Result<(), StateError> {
        match self.phase {
            Phase::Play | Phase::TwistPlay => Ok(()),
            phase => Err(StateError::WrongPhase { phase }),
        }
    }

    /// Used by hydration; every field was validated by the caller.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        kind: LessonKind,
        phase: Phase,
        furthest: Phase,
        prediction: Option<usize>,
        twist_prediction: Option<usize>,
        answers: QuizAnswers,
        score: Option<QuizScore>,
        completed_apps: BTreeSet<usize>,
        controls: ExperimentControls,
        touched: bool,
        twist_touched: bool,
    ) -> Self {
        let active_app = completed_apps.iter().next_back().copied().unwrap_or(0);
        Self {
            kind,
            phase,
            furthest,
            prediction,
            twist_prediction,
            answers,
            score,
            completed_apps,
            active_app,
            controls,
            touched,
            twist_touched,
        }
    }
}

fn check_choice(choice: usize, len: usize) -> Result<(), StateError> {
    if choice < len {
        Ok(())
    } else {
        Err(StateError::ChoiceOutOfRange { choice, len })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
