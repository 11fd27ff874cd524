use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Peak particle displacement in diagram units.
pub const WAVE_AMPLITUDE: f64 = 10.0;
/// Spatial period in diagram units.
pub const WAVELENGTH: f64 = 60.0;
pub const FREQUENCY_HZ: f64 = 1.0;
/// e-folding distance of S-wave motion inside a liquid.
pub const LIQUID_DECAY_LENGTH: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveType {
    /// Primary, compressional.
    #[default]
    P,
    /// Secondary, shear.
    S,
}

impl WaveType {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            WaveType::P => "P-wave (compressional)",
            WaveType::S => "S-wave (shear)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Medium {
    #[default]
    Solid,
    Liquid,
}

impl Medium {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Medium::Solid => "Solid rock",
            Medium::Liquid => "Liquid outer core",
        }
    }
}

/// Particle displacement from rest.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

/// Illustrative propagation speed in km/s. Zero means the wave does not travel.
#[must_use]
pub fn wave_speed(wave: WaveType, medium: Medium) -> f64 {
    match (wave, medium) {
        (WaveType::P, Medium::Solid) => 6.0,
        (WaveType::P, Medium::Liquid) => 1.5,
        (WaveType::S, Medium::Solid) => 3.5,
        (WaveType::S, Medium::Liquid) => 0.0,
    }
}

/// Whether a wave reaches a distant station through the medium.
#[must_use]
pub fn arrives(wave: WaveType, medium: Medium) -> bool {
    wave_speed(wave, medium) > 0.0
}

/// Displacement of the particle at distance `x` and time `t` seconds.
///
/// P-waves move particles along the direction of travel, S-waves across it.
/// In a liquid the shear motion dies off exponentially with distance.
#[must_use]
pub fn particle_offset(wave: WaveType, medium: Medium, x: f64, t: f64) -> Offset {
    let k = 2.0 * PI / WAVELENGTH;
    let omega = 2.0 * PI * FREQUENCY_HZ;
    let phase = k * x - omega * t;
    match wave {
        WaveType::P => Offset {
            dx: WAVE_AMPLITUDE * phase.sin(),
            dy: 0.0,
        },
        WaveType::S => {
            let amplitude = match medium {
                Medium::Solid => WAVE_AMPLITUDE,
                Medium::Liquid => WAVE_AMPLITUDE * (-x.max(0.0) / LIQUID_DECAY_LENGTH).exp(),
            };
            Offset {
                dx: 0.0,
                dy: amplitude * phase.sin(),
            }
        }
    }
}
