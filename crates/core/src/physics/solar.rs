use serde::{Deserialize, Serialize};

/// Baseline open-circuit voltage of a lit silicon cell, in volts.
const BASE_VOLTAGE: f64 = 0.45;
/// Voltage gain per decade of current.
const VOLTAGE_PER_DECADE: f64 = 0.1;

/// Colour of the incident light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Wavelength {
    #[default]
    Red,
    Green,
    Blue,
}

impl Wavelength {
    pub const ALL: [Wavelength; 3] = [Wavelength::Red, Wavelength::Green, Wavelength::Blue];

    /// Relative spectral response of a silicon cell.
    #[must_use]
    pub fn factor(self) -> f64 {
        match self {
            Wavelength::Red => 1.0,
            Wavelength::Green => 0.85,
            Wavelength::Blue => 0.7,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Wavelength::Red => "Red (650 nm)",
            Wavelength::Green => "Green (530 nm)",
            Wavelength::Blue => "Blue (450 nm)",
        }
    }
}

/// Relative photocurrent: `intensity × cos(angle) × wavelength factor`.
///
/// `intensity` is a fraction in `[0, 1]`; `angle_deg` is clamped to `[0, 90]`.
/// The result is never negative.
#[must_use]
pub fn photocurrent(intensity: f64, angle_deg: f64, wavelength: Wavelength) -> f64 {
    let intensity = intensity.clamp(0.0, 1.0);
    let angle = angle_deg.clamp(0.0, 90.0).to_radians();
    let current = intensity * angle.cos() * wavelength.factor();
    // cos(90°) is ~6e-17, not zero
    if current < 1e-12 { 0.0 } else { current }
}

/// Open-circuit voltage for a given relative current; zero when dark.
#[must_use]
pub fn open_circuit_voltage(current: f64) -> f64 {
    if current <= 0.0 {
        return 0.0;
    }
    BASE_VOLTAGE + VOLTAGE_PER_DECADE * (current * 100.0 + 1.0).log10()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarReading {
    pub current: f64,
    pub voltage: f64,
}

impl SolarReading {
    #[must_use]
    pub fn compute(intensity: f64, angle_deg: f64, wavelength: Wavelength) -> Self {
        let current = photocurrent(intensity, angle_deg, wavelength);
        Self {
            current,
            voltage: open_circuit_voltage(current),
        }
    }

    /// Current as a percentage of the brightest, head-on red reading.
    #[must_use]
    pub fn current_percent(&self) -> f64 {
        self.current * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn head_on_full_red_is_unity() {
        assert!((photocurrent(1.0, 0.0, Wavelength::Red) - 1.0).abs() < EPS);
    }

    #[test]
    fn grazing_angle_gives_no_current() {
        assert_eq!(photocurrent(1.0, 90.0, Wavelength::Red), 0.0);
        assert_eq!(photocurrent(1.0, 120.0, Wavelength::Red), 0.0);
    }

    #[test]
    fn cosine_law_at_sixty_degrees() {
        let c = photocurrent(0.8, 60.0, Wavelength::Red);
        assert!((c - 0.4).abs() < EPS);
    }

    #[test]
    fn wavelength_scales_current() {
        let blue = photocurrent(1.0, 0.0, Wavelength::Blue);
        let green = photocurrent(1.0, 0.0, Wavelength::Green);
        assert!((blue - 0.7).abs() < EPS);
        assert!((green - 0.85).abs() < EPS);
    }

    #[test]
    fn dark_cell_has_zero_voltage() {
        let reading = SolarReading::compute(0.0, 0.0, Wavelength::Red);
        assert_eq!(reading.current, 0.0);
        assert_eq!(reading.voltage, 0.0);
    }

    #[test]
    fn voltage_is_logarithmic() {
        // current 0.99 -> log10(100) = 2
        let v = open_circuit_voltage(0.99);
        assert!((v - 0.65).abs() < EPS);
        // small currents still sit near the baseline
        let dim = open_circuit_voltage(0.01);
        assert!((dim - (0.45 + 0.1 * 2f64.log10())).abs() < EPS);
    }
}
