mod controls;
mod phase;
pub mod quiz;
mod saved;
mod state;

pub use controls::{ControlKind, ExperimentControls, SeismicControls, SolarControls};
pub use phase::{Phase, PhaseParseError};
pub use quiz::{PassThreshold, QuizAnswers, QuizError, QuizQuestion, QuizScore};
pub use saved::{SavedLessonState, SavedStateError};
pub use state::{LessonState, StateError};
