/// Position along the phase track, for progress dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonProgress {
    pub index: usize,
    pub total: usize,
    pub reached: usize,
}

impl LessonProgress {
    /// Whether the dot at `index` may be shown as visited.
    #[must_use]
    pub fn is_reached(&self, index: usize) -> bool {
        index <= self.reached
    }
}
