use std::sync::Arc;

use lesson_core::model::QuizScore;
use lesson_core::{LessonKind, LessonSettings, SavedLessonState};
use storage::repository::{
    CompletionRecord, CompletionRepository, ProgressRecord, ProgressRepository, StorageError,
};

use crate::Clock;
use crate::error::ProgressServiceError;
use crate::lesson::LessonSession;

/// Persists resumable snapshots and the quiz history.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    progress: Arc<dyn ProgressRepository>,
    completions: Arc<dyn CompletionRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(
        clock: Clock,
        progress: Arc<dyn ProgressRepository>,
        completions: Arc<dyn CompletionRepository>,
    ) -> Self {
        Self {
            clock,
            progress,
            completions,
        }
    }

    /// Store `saved` as the resume point of its lesson.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::MissingLesson` when the snapshot has no
    /// lesson tag, or a storage/serialization error.
    pub async fn save(&self, saved: &SavedLessonState) -> Result<(), ProgressServiceError> {
        let lesson = saved.lesson.ok_or(ProgressServiceError::MissingLesson)?;
        let record = ProgressRecord {
            lesson,
            state_json: saved.to_json()?,
            updated_at: self.clock.now(),
        };
        self.progress.save_progress(&record).await?;
        tracing::debug!(lesson = %lesson, phase = %saved.phase, "progress saved");
        Ok(())
    }

    /// Load the saved snapshot for `lesson`.
    ///
    /// A stored document that no longer parses is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` on backend failures.
    pub async fn load(
        &self,
        lesson: LessonKind,
    ) -> Result<Option<SavedLessonState>, ProgressServiceError> {
        let Some(record) = self.progress.load_progress(lesson).await? else {
            return Ok(None);
        };
        match SavedLessonState::from_json(&record.state_json) {
            Ok(saved) => Ok(Some(saved)),
            Err(err) => {
                tracing::warn!(lesson = %lesson, error = %err, "discarding unreadable progress");
                Ok(None)
            }
        }
    }

    /// Forget the resume point for `lesson`. Clearing twice is not an error.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` on backend failures.
    pub async fn clear(&self, lesson: LessonKind) -> Result<(), ProgressServiceError> {
        match self.progress.delete_progress(lesson).await {
            Ok(()) | Err(StorageError::NotFound) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Resume from the saved snapshot when `resume` is set and one exists,
    /// otherwise start fresh.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` on backend failures.
    pub async fn open_session(
        &self,
        lesson: LessonKind,
        settings: LessonSettings,
        resume: bool,
    ) -> Result<LessonSession, ProgressServiceError> {
        let saved = if resume { self.load(lesson).await? } else { None };
        let session = match saved {
            Some(saved) => LessonSession::resume(lesson, &saved, settings),
            None => LessonSession::new(lesson, settings),
        };
        Ok(session.with_clock(self.clock))
    }

    /// Append a submitted quiz to the history.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the record cannot be stored.
    pub async fn record_completion(
        &self,
        lesson: LessonKind,
        score: QuizScore,
        passed: bool,
    ) -> Result<i64, ProgressServiceError> {
        let record = CompletionRecord {
            lesson,
            score,
            passed,
            completed_at: self.clock.now(),
        };
        let id = self.completions.append_completion(&record).await?;
        tracing::info!(lesson = %lesson, correct = score.correct, total = score.total, passed, "completion recorded");
        Ok(id)
    }

    /// Most recent quiz results for `lesson`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` on backend failures.
    pub async fn history(
        &self,
        lesson: LessonKind,
        limit: u32,
    ) -> Result<Vec<CompletionRecord>, ProgressServiceError> {
        Ok(self.completions.list_completions(lesson, limit).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_core::Phase;
    use lesson_core::time::{fixed_clock, fixed_now};
    use storage::repository::InMemoryRepository;

    fn service(repo: &InMemoryRepository) -> ProgressService {
        ProgressService::new(
            fixed_clock(),
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
        )
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let repo = InMemoryRepository::new();
        let svc = service(&repo);
        let mut session = LessonSession::new(LessonKind::SolarCells, LessonSettings::default())
            .with_clock(fixed_clock());
        session.next();

        svc.save(&session.snapshot()).await.unwrap();
        let loaded = svc.load(LessonKind::SolarCells).await.unwrap().unwrap();
        assert_eq!(loaded, session.snapshot());

        let stored = repo
            .load_progress(LessonKind::SolarCells)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.updated_at, fixed_now());
    }

    #[tokio::test]
    async fn malformed_document_loads_as_none() {
        let repo = InMemoryRepository::new();
        repo.save_progress(&ProgressRecord {
            lesson: LessonKind::SeismicWaves,
            state_json: "not json".to_string(),
            updated_at: fixed_now(),
        })
        .await
        .unwrap();
        let svc = service(&repo);
        assert!(svc.load(LessonKind::SeismicWaves).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_requires_lesson_tag() {
        let svc = service(&InMemoryRepository::new());
        let err = svc.save(&SavedLessonState::default()).await.unwrap_err();
        assert!(matches!(err, ProgressServiceError::MissingLesson));
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let repo = InMemoryRepository::new();
        let svc = service(&repo);
        let session = LessonSession::new(LessonKind::SolarCells, LessonSettings::default());
        svc.save(&session.snapshot()).await.unwrap();
        svc.clear(LessonKind::SolarCells).await.unwrap();
        svc.clear(LessonKind::SolarCells).await.unwrap();
        assert!(svc.load(LessonKind::SolarCells).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn open_session_resumes_only_when_asked() {
        let repo = InMemoryRepository::new();
        let svc = service(&repo);
        let mut session = LessonSession::new(LessonKind::SolarCells, LessonSettings::default())
            .with_clock(fixed_clock());
        session.next();
        svc.save(&session.snapshot()).await.unwrap();

        let resumed = svc
            .open_session(LessonKind::SolarCells, LessonSettings::default(), true)
            .await
            .unwrap();
        assert!(resumed.is_resumed());
        assert_eq!(resumed.state().phase(), Phase::Predict);

        let fresh = svc
            .open_session(LessonKind::SolarCells, LessonSettings::default(), false)
            .await
            .unwrap();
        assert!(!fresh.is_resumed());
        assert_eq!(fresh.state().phase(), Phase::Hook);
    }

    #[tokio::test]
    async fn history_lists_recorded_completions() {
        let svc = service(&InMemoryRepository::new());
        svc.record_completion(
            LessonKind::SeismicWaves,
            QuizScore {
                correct: 8,
                total: 10,
            },
            true,
        )
        .await
        .unwrap();
        let items = svc.history(LessonKind::SeismicWaves, 5).await.unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].passed);
        assert!(svc.history(LessonKind::SolarCells, 5).await.unwrap().is_empty());
    }
}
