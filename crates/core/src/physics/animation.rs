/// Time for a wave front to cross the diagram, in seconds.
pub const ANIMATION_DURATION_SECS: f64 = 4.0;

/// Frame-driven wave animation clock.
///
/// `progress` runs from 0 to 1 and the animation stops itself on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WaveAnimation {
    time: f64,
    progress: f64,
    running: bool,
}

impl WaveAnimation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart from the beginning.
    pub fn start(&mut self) {
        self.time = 0.0;
        self.progress = 0.0;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance by `dt` seconds. Returns `true` while still running.
    pub fn tick(&mut self, dt: f64) -> bool {
        if !self.running || dt <= 0.0 {
            return self.running;
        }
        self.time += dt;
        self.progress = (self.progress + dt / ANIMATION_DURATION_SECS).min(1.0);
        if self.progress >= 1.0 {
            self.running = false;
        }
        self.running
    }

    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }
}
