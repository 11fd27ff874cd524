//! Closed-form formulas that drive the lesson experiments.

mod animation;
mod seismic;
mod solar;

pub use animation::{ANIMATION_DURATION_SECS, WaveAnimation};
pub use seismic::{
    FREQUENCY_HZ, LIQUID_DECAY_LENGTH, Medium, Offset, WAVE_AMPLITUDE, WAVELENGTH, WaveType,
    arrives, particle_offset, wave_speed,
};
pub use solar::{SolarReading, Wavelength, open_circuit_voltage, photocurrent};
