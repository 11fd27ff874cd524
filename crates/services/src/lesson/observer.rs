use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use lesson_core::{LessonEvent, SavedLessonState};

/// Host callbacks for a running lesson.
pub trait LessonObserver: Send + Sync {
    /// Called after every effective mutation with a fresh snapshot.
    fn on_state_change(&self, snapshot: &SavedLessonState);

    fn on_event(&self, event: &LessonEvent);
}

/// Buffers notifications until the host drains them.
///
/// Useful where the host cannot react inside the callback, e.g. a UI that
/// persists snapshots from its own task.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    latest: Mutex<Option<SavedLessonState>>,
    events: Mutex<Vec<LessonEvent>>,
    state_changes: AtomicUsize,
}

impl RecordingObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent snapshot not yet taken.
    #[must_use]
    pub fn take_snapshot(&self) -> Option<SavedLessonState> {
        self.latest.lock().ok().and_then(|mut guard| guard.take())
    }

    #[must_use]
    pub fn drain_events(&self) -> Vec<LessonEvent> {
        self.events
            .lock()
            .map(|mut guard| std::mem::take(&mut *guard))
            .unwrap_or_default()
    }

    /// Total `on_state_change` calls since creation.
    #[must_use]
    pub fn state_changes(&self) -> usize {
        self.state_changes.load(Ordering::Relaxed)
    }
}

impl LessonObserver for RecordingObserver {
    fn on_state_change(&self, snapshot: &SavedLessonState) {
        self.state_changes.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut guard) = self.latest.lock() {
            *guard = Some(snapshot.clone());
        }
    }

    fn on_event(&self, event: &LessonEvent) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(event.clone());
        }
    }
}
