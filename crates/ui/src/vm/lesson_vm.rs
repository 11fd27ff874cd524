use lesson_core::model::{PassThreshold, QuizScore, SeismicControls};
use lesson_core::physics::{Medium, WaveType, Wavelength, arrives, wave_speed};
use lesson_core::{Gate, LessonKind, Phase};
use services::LessonSession;

//
// ─── INTENTS ───────────────────────────────────────────────────────────────────
//

/// Everything the learner can ask the lesson to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LessonIntent {
    Next,
    Back,
    GoTo(Phase),
    Predict(usize),
    TwistPredict(usize),
    Intensity(u8),
    Angle(u8),
    Wavelength(Wavelength),
    WaveType(WaveType),
    Medium(Medium),
    SendWave,
    OpenApplication(usize),
    Answer { question: usize, option: usize },
    Submit,
    Retry,
    Reset,
}

/// Route an intent to the session. Returns `true` when the state changed.
pub fn apply_intent(session: &mut LessonSession, intent: LessonIntent) -> bool {
    match intent {
        LessonIntent::Next => session.next().moved(),
        LessonIntent::Back => session.back().moved(),
        LessonIntent::GoTo(phase) => session.go_to_phase(phase).moved(),
        LessonIntent::Predict(choice) => session.select_prediction(choice),
        LessonIntent::TwistPredict(choice) => session.select_twist_prediction(choice),
        LessonIntent::Intensity(pct) => session.set_intensity(pct),
        LessonIntent::Angle(deg) => session.set_angle(deg),
        LessonIntent::Wavelength(wavelength) => session.set_wavelength(wavelength),
        LessonIntent::WaveType(wave_type) => session.set_wave_type(wave_type),
        LessonIntent::Medium(medium) => session.set_medium(medium),
        LessonIntent::SendWave => session.send_wave(),
        LessonIntent::OpenApplication(index) => session.open_application(index),
        LessonIntent::Answer { question, option } => session.select_answer(question, option),
        LessonIntent::Submit => session.submit_test(),
        LessonIntent::Retry => session.retry_test(),
        LessonIntent::Reset => session.reset(),
    }
}

//
// ─── VIEW MODEL ────────────────────────────────────────────────────────────────
//

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DotStatus {
    Current,
    Visited,
    Upcoming,
}

impl DotStatus {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            DotStatus::Current => "dot dot--current",
            DotStatus::Visited => "dot dot--visited",
            DotStatus::Upcoming => "dot dot--upcoming",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseDotVm {
    pub phase: Phase,
    pub label: &'static str,
    pub status: DotStatus,
    pub clickable: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NextButtonVm {
    pub label: &'static str,
    pub visible: bool,
    pub enabled: bool,
    pub hint: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizVm {
    pub answered: usize,
    pub total: usize,
    pub submitted: bool,
    pub can_submit: bool,
    pub passed: Option<bool>,
    pub result_text: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SolarReadoutVm {
    pub intensity_pct: u8,
    pub angle_deg: u8,
    pub wavelength: Wavelength,
    pub current_text: String,
    pub voltage_text: String,
    /// Meter fill, 0..=100.
    pub meter_pct: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SeismicReadoutVm {
    pub wave_type: WaveType,
    pub medium: Medium,
    pub speed_text: String,
    pub arrives: bool,
    pub status_text: &'static str,
}

/// Display-ready projection of a `LessonSession`.
#[derive(Clone, Debug, PartialEq)]
pub struct LessonVm {
    pub kind: LessonKind,
    pub title: &'static str,
    pub phase: Phase,
    pub phase_label: &'static str,
    pub step_label: String,
    pub dots: Vec<PhaseDotVm>,
    pub back_enabled: bool,
    pub next: NextButtonVm,
    pub quiz: QuizVm,
    pub solar: Option<SolarReadoutVm>,
    pub seismic: Option<SeismicReadoutVm>,
}

impl LessonVm {
    #[must_use]
    pub fn from_session(session: &LessonSession) -> Self {
        let state = session.state();
        let content = session.content();
        let phase = state.phase();
        let progress = session.progress();

        let dots = Phase::ALL
            .into_iter()
            .map(|dot| {
                let status = if dot == phase {
                    DotStatus::Current
                } else if progress.is_reached(dot.index()) {
                    DotStatus::Visited
                } else {
                    DotStatus::Upcoming
                };
                PhaseDotVm {
                    phase: dot,
                    label: dot.label(),
                    status,
                    clickable: session.can_jump_to(dot),
                }
            })
            .collect();

        Self {
            kind: session.kind(),
            title: content.title,
            phase,
            phase_label: phase.label(),
            step_label: format!("Step {} of {}", progress.index + 1, progress.total),
            dots,
            back_enabled: !phase.is_first(),
            next: next_button(phase, session.gate()),
            quiz: quiz_vm(session, content.pass_threshold),
            solar: solar_readout(session),
            seismic: state.controls().seismic().map(seismic_readout),
        }
    }
}

fn next_button(phase: Phase, gate: Gate) -> NextButtonVm {
    let label = match phase {
        Phase::Hook => "Start",
        Phase::Test => "See Results",
        _ => "Next",
    };
    match gate {
        Gate::Open => NextButtonVm {
            label,
            visible: true,
            enabled: true,
            hint: None,
        },
        Gate::Blocked(reason) => NextButtonVm {
            label,
            visible: !phase.is_last(),
            enabled: false,
            hint: (!phase.is_last()).then(|| reason.hint()),
        },
    }
}

fn quiz_vm(session: &LessonSession, threshold: PassThreshold) -> QuizVm {
    let state = session.state();
    let answers = state.answers();
    let score = state.score();
    QuizVm {
        answered: answers.answered(),
        total: answers.len(),
        submitted: score.is_some(),
        can_submit: score.is_none() && answers.is_complete(),
        passed: score.map(|s| s.passed(threshold)),
        result_text: score.map(|s| result_text(s, threshold)),
    }
}

/// Summary line shown after the quiz is submitted.
#[must_use]
fn result_text(score: QuizScore, threshold: PassThreshold) -> String {
    let QuizScore { correct, total } = score;
    let percent = score.percent();
    if score.passed(threshold) {
        format!("You scored {correct}/{total} ({percent}%). Passed!")
    } else {
        let required = threshold.required(total);
        format!("You scored {correct}/{total} ({percent}%). You need {required} to pass.")
    }
}

fn solar_readout(session: &LessonSession) -> Option<SolarReadoutVm> {
    let controls = session.state().controls().solar()?;
    let reading = session.solar_reading()?;
    Some(SolarReadoutVm {
        intensity_pct: controls.intensity_pct,
        angle_deg: controls.angle_deg,
        wavelength: controls.wavelength,
        current_text: format!("Current: {:.0}%", reading.current_percent()),
        voltage_text: format!("Voltage: {:.2} V", reading.voltage),
        meter_pct: reading.current_percent().clamp(0.0, 100.0),
    })
}

fn seismic_readout(controls: &SeismicControls) -> SeismicReadoutVm {
    let speed = wave_speed(controls.wave_type, controls.medium);
    let arrives = arrives(controls.wave_type, controls.medium);
    SeismicReadoutVm {
        wave_type: controls.wave_type,
        medium: controls.medium,
        speed_text: format!("Speed: {speed:.1} km/s"),
        arrives,
        status_text: if arrives {
            "The wave reaches the station."
        } else {
            "No signal: liquids cannot carry shear waves."
        },
    }
}
