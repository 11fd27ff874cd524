use serde::{Deserialize, Serialize};

use crate::physics::{Medium, SolarReading, WaveType, Wavelength};

pub const MAX_INTENSITY_PCT: u8 = 100;
pub const MAX_ANGLE_DEG: u8 = 90;

/// Which control the learner moved; carried on `control_changed` events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    Intensity,
    Angle,
    Wavelength,
    WaveType,
    Medium,
    SendWave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolarControls {
    pub intensity_pct: u8,
    pub angle_deg: u8,
    pub wavelength: Wavelength,
}

impl SolarControls {
    #[must_use]
    pub fn reading(&self) -> SolarReading {
        SolarReading::compute(
            f64::from(self.intensity_pct) / 100.0,
            f64::from(self.angle_deg),
            self.wavelength,
        )
    }
}

impl Default for SolarControls {
    fn default() -> Self {
        Self {
            intensity_pct: 50,
            angle_deg: 0,
            wavelength: Wavelength::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeismicControls {
    pub wave_type: WaveType,
    pub medium: Medium,
}

/// Slider and toggle values of the lesson experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExperimentControls {
    Solar(SolarControls),
    Seismic(SeismicControls),
}

impl ExperimentControls {
    #[must_use]
    pub fn solar(&self) -> Option<&SolarControls> {
        match self {
            ExperimentControls::Solar(c) => Some(c),
            ExperimentControls::Seismic(_) => None,
        }
    }

    #[must_use]
    pub fn seismic(&self) -> Option<&SeismicControls> {
        match self {
            ExperimentControls::Seismic(c) => Some(c),
            ExperimentControls::Solar(_) => None,
        }
    }

    #[must_use]
    pub fn same_kind(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_solar_reading_is_half_current() {
        let reading = SolarControls::default().reading();
        assert!((reading.current - 0.5).abs() < 1e-9);
        assert!(reading.voltage > 0.45);
    }

    #[test]
    fn tagged_serialization() {
        let controls = ExperimentControls::Seismic(SeismicControls {
            wave_type: WaveType::S,
            medium: Medium::Liquid,
        });
        let json = serde_json::to_string(&controls).unwrap();
        assert_eq!(json, r#"{"kind":"seismic","wave_type":"s","medium":"liquid"}"#);
    }

    #[test]
    fn kind_comparison() {
        let a = ExperimentControls::Solar(SolarControls::default());
        let b = ExperimentControls::Seismic(SeismicControls::default());
        assert!(!a.same_kind(&b));
        assert!(a.same_kind(&a));
    }
}
