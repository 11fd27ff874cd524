mod debounce;
mod observer;
mod progress;
mod session;

pub use observer::{LessonObserver, RecordingObserver};
pub use progress::LessonProgress;
pub use session::{LessonSession, NavOutcome};
