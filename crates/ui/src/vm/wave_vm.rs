use lesson_core::model::SeismicControls;
use lesson_core::physics::{WaveAnimation, particle_offset};

/// Particles drawn along the wave diagram.
pub const PARTICLE_COUNT: usize = 12;
const SPACING: f64 = 40.0;
const ORIGIN_X: f64 = 20.0;
const BASELINE_Y: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleVm {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WaveFrameVm {
    pub particles: Vec<ParticleVm>,
    /// Leading edge of the disturbance, in diagram units.
    pub front_x: f64,
    pub progress_pct: u32,
    pub running: bool,
}

/// Particle positions for the current animation frame.
///
/// Particles ahead of the wave front stay at rest.
#[must_use]
pub fn wave_frame(controls: &SeismicControls, animation: &WaveAnimation) -> WaveFrameVm {
    let width = SPACING * PARTICLE_COUNT as f64;
    let front_x = ORIGIN_X + animation.progress() * width;
    let particles = (0..PARTICLE_COUNT)
        .map(|i| {
            let rest_x = ORIGIN_X + SPACING * i as f64;
            if animation.progress() <= 0.0 || rest_x > front_x {
                return ParticleVm {
                    x: rest_x,
                    y: BASELINE_Y,
                };
            }
            let offset = particle_offset(
                controls.wave_type,
                controls.medium,
                rest_x - ORIGIN_X,
                animation.time(),
            );
            ParticleVm {
                x: rest_x + offset.dx,
                y: BASELINE_Y + offset.dy,
            }
        })
        .collect();

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let progress_pct = (animation.progress() * 100.0).round() as u32;
    WaveFrameVm {
        particles,
        front_x,
        progress_pct,
        running: animation.is_running(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_core::physics::{Medium, WAVE_AMPLITUDE, WaveType};

    fn controls(wave_type: WaveType, medium: Medium) -> SeismicControls {
        SeismicControls { wave_type, medium }
    }

    #[test]
    fn idle_animation_keeps_particles_at_rest() {
        let frame = wave_frame(&controls(WaveType::P, Medium::Solid), &WaveAnimation::new());
        assert_eq!(frame.particles.len(), PARTICLE_COUNT);
        assert!(frame.particles.iter().all(|p| p.y == BASELINE_Y));
        assert_eq!(frame.progress_pct, 0);
        assert!(!frame.running);
    }

    #[test]
    fn s_wave_moves_particles_vertically_only() {
        let mut animation = WaveAnimation::new();
        animation.start();
        animation.tick(2.25);
        let frame = wave_frame(&controls(WaveType::S, Medium::Solid), &animation);
        let reached: Vec<_> = frame
            .particles
            .iter()
            .enumerate()
            .filter(|(i, _)| ORIGIN_X + SPACING * *i as f64 <= frame.front_x)
            .collect();
        assert!(!reached.is_empty());
        for (i, p) in reached {
            assert!((p.x - (ORIGIN_X + SPACING * i as f64)).abs() < 1e-9);
            assert!((p.y - BASELINE_Y).abs() <= WAVE_AMPLITUDE + 1e-9);
        }
    }

    #[test]
    fn liquid_damps_shear_motion_downstream() {
        let mut animation = WaveAnimation::new();
        animation.start();
        animation.tick(3.8);
        let frame = wave_frame(&controls(WaveType::S, Medium::Liquid), &animation);
        let far = frame.particles[PARTICLE_COUNT - 2];
        assert!((far.y - BASELINE_Y).abs() < 0.01 * WAVE_AMPLITUDE);
        assert_eq!(frame.progress_pct, 95);
    }
}
