#![forbid(unsafe_code)]

pub mod content;
pub mod events;
pub mod gating;
pub mod model;
pub mod physics;
pub mod settings;
pub mod time;

pub use content::{Application, Choice, LessonContent, LessonKind};
pub use events::LessonEvent;
pub use gating::{Gate, GateReason, can_reach, gate};
pub use model::{LessonState, Phase, QuizAnswers, QuizScore, SavedLessonState};
pub use settings::LessonSettings;
pub use time::Clock;
