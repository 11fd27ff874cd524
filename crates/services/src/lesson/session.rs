use std::sync::Arc;

use chrono::Duration;
use lesson_core::model::{ControlKind, StateError};
use lesson_core::physics::{Medium, SolarReading, WaveType, Wavelength};
use lesson_core::{
    Clock, Gate, GateReason, LessonContent, LessonEvent, LessonKind, LessonSettings, LessonState,
    Phase, SavedLessonState, can_reach, gate,
};

use super::debounce::NavigationDebounce;
use super::observer::LessonObserver;
use super::progress::LessonProgress;

//
// ─── NAVIGATION OUTCOME ────────────────────────────────────────────────────────
//

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    Moved { from: Phase, to: Phase },
    Blocked(GateReason),
    /// Arrived inside the debounce window of the previous move.
    Debounced,
    /// Not a valid target from here.
    Ignored,
}

impl NavOutcome {
    #[must_use]
    pub fn moved(self) -> bool {
        matches!(self, NavOutcome::Moved { .. })
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One learner's run through a lesson.
///
/// Owns the lesson state and enforces the phase gates. Every accepted action
/// is reported to the attached observer; rejected input returns `false` and
/// leaves the state untouched.
#[derive(Clone)]
pub struct LessonSession {
    content: &'static LessonContent,
    state: LessonState,
    settings: LessonSettings,
    clock: Clock,
    debounce: NavigationDebounce,
    observer: Option<Arc<dyn LessonObserver>>,
    resumed: bool,
    /// `mastery_achieved` already sent for the current score.
    mastery_announced: bool,
}

impl LessonSession {
    #[must_use]
    pub fn new(kind: LessonKind, settings: LessonSettings) -> Self {
        let content = kind.content();
        Self::from_state(content, LessonState::new(content), settings, false)
    }

    /// Continue from a host-supplied snapshot. Whatever does not fit the
    /// lesson is repaired during hydration.
    #[must_use]
    pub fn resume(kind: LessonKind, saved: &SavedLessonState, settings: LessonSettings) -> Self {
        let content = kind.content();
        let state = LessonState::hydrate(saved, content);
        tracing::debug!(lesson = %kind, phase = %state.phase(), "hydrated lesson state");
        Self::from_state(content, state, settings, true)
    }

    fn from_state(
        content: &'static LessonContent,
        state: LessonState,
        settings: LessonSettings,
        resumed: bool,
    ) -> Self {
        // a snapshot that already reached mastery with a pass was announced
        // by the session that saved it
        let mastery_announced =
            state.furthest() == Phase::Mastery && state.passed(content);
        Self {
            content,
            state,
            settings,
            clock: Clock::default_clock(),
            debounce: NavigationDebounce::new(settings.debounce_ms()),
            observer: None,
            resumed,
            mastery_announced,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Attach the host observer and announce the session to it with
    /// `lesson_started` or `lesson_resumed`.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn LessonObserver>) -> Self {
        self.observer = Some(observer);
        let opening = if self.resumed {
            LessonEvent::LessonResumed {
                lesson: self.kind(),
                phase: self.state.phase(),
            }
        } else {
            LessonEvent::LessonStarted { lesson: self.kind() }
        };
        tracing::info!(lesson = %self.kind(), event = opening.name(), "lesson opened");
        self.emit(&opening);
        self
    }

    /// Advance a fixed clock. Has no effect on the system clock.
    pub fn advance_clock(&mut self, delta: Duration) {
        self.clock.advance(delta);
    }

    //
    // ─── ACCESSORS ─────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn kind(&self) -> LessonKind {
        self.content.kind
    }

    #[must_use]
    pub fn content(&self) -> &'static LessonContent {
        self.content
    }

    #[must_use]
    pub fn state(&self) -> &LessonState {
        &self.state
    }

    #[must_use]
    pub fn settings(&self) -> LessonSettings {
        self.settings
    }

    #[must_use]
    pub fn is_resumed(&self) -> bool {
        self.resumed
    }

    #[must_use]
    pub fn gate(&self) -> Gate {
        gate(&self.state, self.content)
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.gate().is_open()
    }

    #[must_use]
    pub fn snapshot(&self) -> SavedLessonState {
        self.state.to_saved()
    }

    /// Live meter values for the solar lab; `None` for other lessons.
    #[must_use]
    pub fn solar_reading(&self) -> Option<SolarReading> {
        self.state.controls().solar().map(|c| c.reading())
    }

    #[must_use]
    pub fn progress(&self) -> LessonProgress {
        LessonProgress {
            index: self.state.phase().index(),
            total: Phase::COUNT,
            reached: self.state.furthest().index(),
        }
    }

    /// Whether `target` is a valid progress-dot jump right now.
    #[must_use]
    pub fn can_jump_to(&self, target: Phase) -> bool {
        if !self.settings.allow_dot_navigation() {
            return false;
        }
        let current = self.state.phase();
        if target == current {
            return false;
        }
        if target < current {
            return true;
        }
        let limit = current.next().map_or(current, |next| next.max(self.state.furthest()));
        target <= limit && can_reach(&self.state, self.content, target)
    }

    //
    // ─── NAVIGATION ────────────────────────────────────────────────────────
    //

    pub fn next(&mut self) -> NavOutcome {
        if let Gate::Blocked(reason) = self.gate() {
            tracing::debug!(phase = %self.state.phase(), ?reason, "advance blocked");
            return NavOutcome::Blocked(reason);
        }
        match self.state.phase().next() {
            Some(to) => self.navigate(to),
            None => NavOutcome::Ignored,
        }
    }

    pub fn back(&mut self) -> NavOutcome {
        match self.state.phase().prev() {
            Some(to) => self.navigate(to),
            None => NavOutcome::Ignored,
        }
    }

    /// Progress-dot jump. Only reached phases, or the next one once its gate
    /// is open, are valid targets.
    pub fn go_to_phase(&mut self, target: Phase) -> NavOutcome {
        if !self.can_jump_to(target) {
            return NavOutcome::Ignored;
        }
        self.navigate(target)
    }

    fn navigate(&mut self, to: Phase) -> NavOutcome {
        if !self.debounce.try_acquire(self.clock.now()) {
            tracing::trace!(to = %to, "navigation debounced");
            return NavOutcome::Debounced;
        }
        let from = self.state.phase();
        self.state.set_phase(to);
        tracing::debug!(lesson = %self.kind(), from = %from, to = %to, "phase change");
        self.emit(&LessonEvent::PhaseChange { from, to });

        if to == Phase::Mastery && !self.mastery_announced {
            if let Some(score) = self.state.score().filter(|_| self.state.passed(self.content)) {
                self.mastery_announced = true;
                tracing::info!(
                    lesson = %self.kind(),
                    correct = score.correct,
                    total = score.total,
                    "mastery achieved"
                );
                self.emit(&LessonEvent::MasteryAchieved {
                    correct: score.correct,
                    total: score.total,
                });
            }
        }
        self.notify_state();
        NavOutcome::Moved { from, to }
    }

    //
    // ─── PREDICTIONS ───────────────────────────────────────────────────────
    //

    pub fn select_prediction(&mut self, choice: usize) -> bool {
        let result = self.state.select_prediction(self.content, choice);
        let correct = self.content.prediction.is_correct(choice);
        self.apply(
            "select_prediction",
            result,
            Some(LessonEvent::PredictionMade { choice, correct }),
        )
    }

    pub fn select_twist_prediction(&mut self, choice: usize) -> bool {
        let result = self.state.select_twist_prediction(self.content, choice);
        let correct = self.content.twist.is_correct(choice);
        self.apply(
            "select_twist_prediction",
            result,
            Some(LessonEvent::TwistPredictionMade { choice, correct }),
        )
    }

    //
    // ─── EXPERIMENT ────────────────────────────────────────────────────────
    //

    pub fn set_intensity(&mut self, pct: u8) -> bool {
        let result = self.state.set_intensity(pct);
        self.control("set_intensity", result, ControlKind::Intensity)
    }

    pub fn set_angle(&mut self, deg: u8) -> bool {
        let result = self.state.set_angle(deg);
        self.control("set_angle", result, ControlKind::Angle)
    }

    pub fn set_wavelength(&mut self, wavelength: Wavelength) -> bool {
        let result = self.state.set_wavelength(wavelength);
        self.control("set_wavelength", result, ControlKind::Wavelength)
    }

    pub fn set_wave_type(&mut self, wave_type: WaveType) -> bool {
        let result = self.state.set_wave_type(wave_type);
        self.control("set_wave_type", result, ControlKind::WaveType)
    }

    pub fn set_medium(&mut self, medium: Medium) -> bool {
        let result = self.state.set_medium(medium);
        self.control("set_medium", result, ControlKind::Medium)
    }

    /// Launch a wave in the seismic lab. Counts as touching the experiment.
    pub fn send_wave(&mut self) -> bool {
        if self.state.controls().seismic().is_none() {
            return self.reject("send_wave", &StateError::ControlUnavailable);
        }
        let result = self.state.mark_touched();
        self.control("send_wave", result, ControlKind::SendWave)
    }

    fn control(
        &mut self,
        action: &'static str,
        result: Result<(), StateError>,
        control: ControlKind,
    ) -> bool {
        self.apply(action, result, Some(LessonEvent::ControlChanged { control }))
    }

    //
    // ─── TRANSFER ──────────────────────────────────────────────────────────
    //

    pub fn open_application(&mut self, index: usize) -> bool {
        match self.state.open_application(self.content, index) {
            Ok(newly_explored) => {
                let completed = self.state.completed_apps().len();
                let total = self.content.applications.len();
                if newly_explored {
                    tracing::debug!(index, completed, total, "application explored");
                }
                self.emit(&LessonEvent::AppExplored {
                    index,
                    completed,
                    total,
                });
                self.notify_state();
                true
            }
            Err(err) => self.reject("open_application", &err),
        }
    }

    //
    // ─── TEST ──────────────────────────────────────────────────────────────
    //

    pub fn select_answer(&mut self, question: usize, option: usize) -> bool {
        let result = self.state.select_answer(self.content, question, option);
        self.apply(
            "select_answer",
            result,
            Some(LessonEvent::AnswerSelected {
                question,
                choice: option,
            }),
        )
    }

    /// Score the quiz. Rejected until every question has an answer.
    pub fn submit_test(&mut self) -> bool {
        match self.state.submit_test(self.content) {
            Ok(score) => {
                let passed = score.passed(self.content.pass_threshold);
                tracing::info!(
                    lesson = %self.kind(),
                    correct = score.correct,
                    total = score.total,
                    passed,
                    "test completed"
                );
                self.emit(&LessonEvent::TestCompleted {
                    correct: score.correct,
                    total: score.total,
                    passed,
                });
                self.notify_state();
                true
            }
            Err(err) => self.reject("submit_test", &err),
        }
    }

    /// Clear answers and score so a failed quiz can be retaken.
    pub fn retry_test(&mut self) -> bool {
        let result = self.state.retry_test();
        if result.is_ok() {
            self.mastery_announced = false;
        }
        self.apply("retry_test", result, None)
    }

    /// Start over from the hook with a fresh state ("Review Again").
    pub fn reset(&mut self) -> bool {
        self.state.reset(self.content);
        self.debounce.clear();
        self.resumed = false;
        self.mastery_announced = false;
        tracing::info!(lesson = %self.kind(), "lesson reset");
        self.emit(&LessonEvent::LessonReset);
        self.notify_state();
        true
    }

    //
    // ─── HELPERS ───────────────────────────────────────────────────────────
    //

    fn apply(
        &mut self,
        action: &'static str,
        result: Result<(), StateError>,
        event: Option<LessonEvent>,
    ) -> bool {
        match result {
            Ok(()) => {
                if let Some(event) = event {
                    self.emit(&event);
                }
                self.notify_state();
                true
            }
            Err(err) => self.reject(action, &err),
        }
    }

    fn reject(&self, action: &'static str, err: &StateError) -> bool {
        tracing::debug!(action, phase = %self.state.phase(), error = %err, "ignored input");
        false
    }

    fn emit(&self, event: &LessonEvent) {
        if let Some(observer) = &self.observer {
            observer.on_event(event);
        }
    }

    fn notify_state(&self) {
        if let Some(observer) = &self.observer {
            observer.on_state_change(&self.state.to_saved());
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson::RecordingObserver;
    use lesson_core::time::fixed_clock;

    fn session(kind: LessonKind) -> (LessonSession, Arc<RecordingObserver>) {
        let observer = Arc::new(RecordingObserver::new());
        let session = LessonSession::new(kind, LessonSettings::default())
            .with_clock(fixed_clock())
            .with_observer(observer.clone());
        (session, observer)
    }

    /// Step past the debounce window, then advance.
    fn step(session: &mut LessonSession) -> NavOutcome {
        session.advance_clock(Duration::milliseconds(500));
        session.next()
    }

    #[test]
    fn attaching_observer_announces_start() {
        let (_session, observer) = session(LessonKind::SolarCells);
        assert_eq!(
            observer.drain_events(),
            vec![LessonEvent::LessonStarted {
                lesson: LessonKind::SolarCells
            }]
        );
    }

    #[test]
    fn next_respects_prediction_gate() {
        let (mut session, _observer) = session(LessonKind::SolarCells);
        assert!(step(&mut session).moved());
        assert_eq!(
            step(&mut session),
            NavOutcome::Blocked(GateReason::PredictionRequired)
        );
        assert!(session.select_prediction(0));
        assert_eq!(
            step(&mut session),
            NavOutcome::Moved {
                from: Phase::Predict,
                to: Phase::Play
            }
        );
    }

    #[test]
    fn rapid_navigation_is_debounced() {
        let (mut session, observer) = session(LessonKind::SeismicWaves);
        assert!(session.next().moved());
        assert_eq!(session.back(), NavOutcome::Debounced);
        session.advance_clock(Duration::milliseconds(299));
        assert_eq!(session.back(), NavOutcome::Debounced);
        session.advance_clock(Duration::milliseconds(1));
        assert!(session.back().moved());

        let phase_changes = observer
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, LessonEvent::PhaseChange { .. }))
            .count();
        assert_eq!(phase_changes, 2);
    }

    #[test]
    fn back_from_first_phase_is_ignored() {
        let (mut session, _observer) = session(LessonKind::SolarCells);
        assert_eq!(session.back(), NavOutcome::Ignored);
    }

    #[test]
    fn out_of_range_input_is_ignored_silently() {
        let (mut session, observer) = session(LessonKind::SolarCells);
        step(&mut session);
        let before = observer.state_changes();
        assert!(!session.select_prediction(99));
        assert!(!session.set_intensity(40));
        assert!(!session.open_application(0));
        assert!(!session.submit_test());
        assert_eq!(observer.state_changes(), before);
        assert!(session.state().prediction().is_none());
    }

    #[test]
    fn controls_only_apply_to_their_lesson() {
        let (mut session, _observer) = session(LessonKind::SeismicWaves);
        step(&mut session);
        session.select_prediction(0);
        step(&mut session);
        assert_eq!(session.state().phase(), Phase::Play);
        assert!(!session.set_intensity(80));
        assert!(session.solar_reading().is_none());
        assert!(session.send_wave());
        assert!(session.can_advance());
    }

    #[test]
    fn solar_reading_follows_sliders() {
        let (mut session, observer) = session(LessonKind::SolarCells);
        step(&mut session);
        session.select_prediction(0);
        step(&mut session);
        observer.drain_events();

        assert!(session.set_intensity(100));
        assert!(session.set_angle(0));
        let reading = session.solar_reading().unwrap();
        assert!((reading.current - 1.0).abs() < 1e-9);

        assert!(session.set_angle(90));
        let reading = session.solar_reading().unwrap();
        assert!(reading.current.abs() < 1e-9);
        assert!(reading.voltage.abs() < 1e-9);

        let events = observer.drain_events();
        assert_eq!(
            events,
            vec![
                LessonEvent::ControlChanged {
                    control: ControlKind::Intensity
                },
                LessonEvent::ControlChanged {
                    control: ControlKind::Angle
                },
                LessonEvent::ControlChanged {
                    control: ControlKind::Angle
                },
            ]
        );
    }

    #[test]
    fn dot_navigation_limits_targets() {
        let (mut session, _observer) = session(LessonKind::SolarCells);
        step(&mut session);
        session.select_prediction(1);
        step(&mut session);
        session.set_intensity(70);
        step(&mut session);
        assert_eq!(session.state().phase(), Phase::Review);

        session.advance_clock(Duration::seconds(1));
        assert!(session.go_to_phase(Phase::Hook).moved());
        session.advance_clock(Duration::seconds(1));
        assert!(session.go_to_phase(Phase::Review).moved());
        session.advance_clock(Duration::seconds(1));
        assert!(session.go_to_phase(Phase::TwistPredict).moved());
        session.advance_clock(Duration::seconds(1));
        assert_eq!(session.go_to_phase(Phase::TwistPlay), NavOutcome::Ignored);
        assert_eq!(session.go_to_phase(Phase::Mastery), NavOutcome::Ignored);
    }

    #[test]
    fn dot_navigation_can_be_disabled() {
        let mut session = LessonSession::new(
            LessonKind::SolarCells,
            LessonSettings::default().with_dot_navigation(false),
        )
        .with_clock(fixed_clock());
        assert!(!session.can_jump_to(Phase::Predict));
        assert_eq!(session.go_to_phase(Phase::Predict), NavOutcome::Ignored);
    }

    #[test]
    fn reset_returns_to_hook_with_fresh_state() {
        let (mut session, observer) = session(LessonKind::SolarCells);
        step(&mut session);
        session.select_prediction(2);
        assert!(session.reset());
        assert_eq!(session.state().phase(), Phase::Hook);
        assert_eq!(session.state().furthest(), Phase::Hook);
        assert!(session.state().prediction().is_none());
        assert!(observer.drain_events().contains(&LessonEvent::LessonReset));
        // reset clears the debounce window
        assert!(session.next().moved());
    }

    #[test]
    fn resume_announces_resumed_phase() {
        let mut saved = LessonSession::new(LessonKind::SeismicWaves, LessonSettings::default())
            .snapshot();
        saved.phase = "predict".to_string();
        let observer = Arc::new(RecordingObserver::new());
        let session = LessonSession::resume(LessonKind::SeismicWaves, &saved, LessonSettings::default())
            .with_observer(observer.clone());
        assert!(session.is_resumed());
        assert_eq!(
            observer.drain_events(),
            vec![LessonEvent::LessonResumed {
                lesson: LessonKind::SeismicWaves,
                phase: Phase::Predict
            }]
        );
    }

    #[test]
    fn progress_tracks_furthest_phase() {
        let (mut session, _observer) = session(LessonKind::SolarCells);
        step(&mut session);
        session.advance_clock(Duration::seconds(1));
        session.back();
        let progress = session.progress();
        assert_eq!(progress.index, 0);
        assert_eq!(progress.total, 10);
        assert_eq!(progress.reached, 1);
        assert!(progress.is_reached(1));
        assert!(!progress.is_reached(2));
    }
}
