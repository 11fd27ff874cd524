mod home_vm;
mod lesson_vm;
mod wave_vm;

pub use home_vm::{LessonCardVm, map_lesson_card};
pub use lesson_vm::{
    DotStatus, LessonIntent, LessonVm, NextButtonVm, PhaseDotVm, QuizVm, SeismicReadoutVm,
    SolarReadoutVm, apply_intent,
};
pub use wave_vm::{PARTICLE_COUNT, ParticleVm, WaveFrameVm, wave_frame};
