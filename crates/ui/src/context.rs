use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use lesson_core::{LessonKind, LessonSettings};
use services::ProgressService;

pub trait UiApp: Send + Sync {
    fn progress(&self) -> Arc<ProgressService>;
    fn lesson_settings(&self) -> LessonSettings;

    /// Lesson to open straight away instead of showing the home list.
    fn launch_lesson(&self) -> Option<LessonKind>;

    /// Whether saved progress should be restored when a lesson opens.
    fn resume_saved(&self) -> bool;
}

#[derive(Clone)]
pub struct AppContext {
    progress: Arc<ProgressService>,
    settings: LessonSettings,
    resume_saved: bool,
    launch_lesson: Option<LessonKind>,
    launch_pending: Arc<AtomicBool>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        let launch_lesson = app.launch_lesson();
        Self {
            progress: app.progress(),
            settings: app.lesson_settings(),
            resume_saved: app.resume_saved(),
            launch_lesson,
            launch_pending: Arc::new(AtomicBool::new(launch_lesson.is_some())),
        }
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn lesson_settings(&self) -> LessonSettings {
        self.settings
    }

    #[must_use]
    pub fn resume_saved(&self) -> bool {
        self.resume_saved
    }

    /// One-shot: returns the launch lesson on the first call only.
    #[must_use]
    pub fn take_launch_lesson(&self) -> Option<LessonKind> {
        if self.launch_pending.swap(false, Ordering::AcqRel) {
            self.launch_lesson
        } else {
            None
        }
    }
}

// Provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
