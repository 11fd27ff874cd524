use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lesson_core::LessonKind;
use lesson_core::model::QuizScore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted snapshot of one lesson's progress.
///
/// `state_json` is the host-facing saved-state document; storage does not
/// interpret it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressRecord {
    pub lesson: LessonKind,
    pub state_json: String,
    pub updated_at: DateTime<Utc>,
}

/// One submitted test, kept for the history list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRecord {
    pub lesson: LessonKind,
    pub score: QuizScore,
    pub passed: bool,
    pub completed_at: DateTime<Utc>,
}

/// Repository contract for resumable lesson progress.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Insert or replace the snapshot for `record.lesson`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be stored.
    async fn save_progress(&self, record: &ProgressRecord) -> Result<(), StorageError>;

    /// Fetch the snapshot for a lesson, if one was saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn load_progress(&self, lesson: LessonKind)
    -> Result<Option<ProgressRecord>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if nothing was saved for the lesson.
    async fn delete_progress(&self, lesson: LessonKind) -> Result<(), StorageError>;
}

#[async_trait]
pub trait CompletionRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn append_completion(&self, record: &CompletionRecord) -> Result<i64, StorageError>;

    /// Most recent completions first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_completions(
        &self,
        lesson: LessonKind,
        limit: u32,
    ) -> Result<Vec<CompletionRecord>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    progress: Arc<Mutex<HashMap<LessonKind, ProgressRecord>>>,
    completions: Arc<Mutex<Vec<CompletionRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn save_progress(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(record.lesson, record.clone());
        Ok(())
    }

    async fn load_progress(
        &self,
        lesson: LessonKind,
    ) -> Result<Option<ProgressRecord>, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&lesson).cloned())
    }

    async fn delete_progress(&self, lesson: LessonKind) -> Result<(), StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard
            .remove(&lesson)
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl CompletionRepository for InMemoryRepository {
    async fn append_completion(&self, record: &CompletionRecord) -> Result<i64, StorageError> {
        let mut guard = self
            .completions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.push(record.clone());
        i64::try_from(guard.len()).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    async fn list_completions(
        &self,
        lesson: LessonKind,
        limit: u32,
    ) -> Result<Vec<CompletionRecord>, StorageError> {
        let guard = self
            .completions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        let mut items: Vec<_> = guard
            .iter()
            .filter(|record| record.lesson == lesson)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        items.truncate(limit);
        Ok(items)
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
    pub completions: Arc<dyn CompletionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo.clone());
        let completions: Arc<dyn CompletionRepository> = Arc::new(repo);
        Self {
            progress,
            completions,
        }
    }
}
