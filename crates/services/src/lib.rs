#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod lesson;
pub mod progress_service;
pub mod progress_writer;

pub use lesson_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, ProgressServiceError};
pub use lesson::{LessonObserver, LessonProgress, LessonSession, NavOutcome, RecordingObserver};
pub use progress_service::ProgressService;
pub use progress_writer::ProgressWriter;
pub use storage::repository::CompletionRecord;
