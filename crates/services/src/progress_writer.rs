use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use lesson_core::SavedLessonState;

use crate::progress_service::ProgressService;

/// Single-writer queue for lesson snapshots.
///
/// Snapshots wait in one slot, so a newer snapshot replaces one that has not
/// been written yet. At most one `flush` writes at a time and it drains the
/// slot before returning, so the last submitted snapshot is the last stored.
#[derive(Clone)]
pub struct ProgressWriter {
    progress: Arc<ProgressService>,
    pending: Arc<Mutex<Option<SavedLessonState>>>,
    flushing: Arc<AtomicBool>,
}

impl ProgressWriter {
    #[must_use]
    pub fn new(progress: Arc<ProgressService>) -> Self {
        Self {
            progress,
            pending: Arc::new(Mutex::new(None)),
            flushing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Queue `snapshot`, replacing any unwritten one.
    pub fn submit(&self, snapshot: SavedLessonState) {
        if let Ok(mut slot) = self.pending.lock() {
            if let Some(stale) = slot.replace(snapshot) {
                tracing::trace!(phase = %stale.phase, "superseded unwritten snapshot");
            }
        }
    }

    /// Write queued snapshots in submission order and return how many were
    /// stored.
    ///
    /// Returns at once while another flush is running; that flush picks up
    /// whatever is queued. Failed writes are logged and dropped.
    pub async fn flush(&self) -> usize {
        let mut written = 0;
        loop {
            if self
                .flushing
                .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                .is_err()
            {
                return written;
            }
            while let Some(snapshot) = self.take_pending() {
                match self.progress.save(&snapshot).await {
                    Ok(()) => written += 1,
                    Err(err) => {
                        tracing::warn!(phase = %snapshot.phase, error = %err, "failed to save progress");
                    }
                }
            }
            self.flushing.store(false, Ordering::SeqCst);
            // something may have arrived after the last take
            if !self.has_pending() {
                return written;
            }
        }
    }

    fn take_pending(&self) -> Option<SavedLessonState> {
        self.pending.lock().ok().and_then(|mut slot| slot.take())
    }

    fn has_pending(&self) -> bool {
        self.pending.lock().is_ok_and(|slot| slot.is_some())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    use super::*;
    use lesson_core::LessonKind;
    use lesson_core::time::fixed_clock;
    use storage::repository::{
        InMemoryRepository, ProgressRecord, ProgressRepository, StorageError,
    };

    /// Makes the first write slow and remembers the order writes landed in.
    #[derive(Default)]
    struct SlowFirstWrite {
        inner: InMemoryRepository,
        calls: AtomicUsize,
        landed: Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl ProgressRepository for SlowFirstWrite {
        async fn save_progress(&self, record: &ProgressRecord) -> Result<(), StorageError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                tokio::time::sleep(Duration::from_millis(40)).await;
            }
            self.inner.save_progress(record).await?;
            let phase = SavedLessonState::from_json(&record.state_json)
                .map(|saved| saved.phase)
                .unwrap_or_default();
            self.landed.lock().unwrap().push(phase);
            Ok(())
        }

        async fn load_progress(
            &self,
            lesson: LessonKind,
        ) -> Result<Option<ProgressRecord>, StorageError> {
            self.inner.load_progress(lesson).await
        }

        async fn delete_progress(&self, lesson: LessonKind) -> Result<(), StorageError> {
            self.inner.delete_progress(lesson).await
        }
    }

    fn snapshot(phase: &str) -> SavedLessonState {
        SavedLessonState {
            lesson: Some(LessonKind::SeismicWaves),
            phase: phase.to_string(),
            ..SavedLessonState::default()
        }
    }

    fn writer(repo: &Arc<SlowFirstWrite>) -> (ProgressWriter, Arc<ProgressService>) {
        let progress = Arc::new(ProgressService::new(
            fixed_clock(),
            repo.clone(),
            Arc::new(InMemoryRepository::new()),
        ));
        (ProgressWriter::new(progress.clone()), progress)
    }

    const PHASES: [&str; 4] = ["hook", "predict", "play", "review"];

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn last_submitted_snapshot_wins() {
        let repo = Arc::new(SlowFirstWrite::default());
        let (writer, progress) = writer(&repo);

        let mut tasks = Vec::new();
        for phase in PHASES {
            writer.submit(snapshot(phase));
            let writer = writer.clone();
            tasks.push(tokio::spawn(async move { writer.flush().await }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let saved = progress.load(LessonKind::SeismicWaves).await.unwrap().unwrap();
        assert_eq!(saved.phase, "review");

        let landed = repo.landed.lock().unwrap().clone();
        assert_eq!(landed.last().map(String::as_str), Some("review"));
        let positions: Vec<usize> = landed
            .iter()
            .map(|phase| PHASES.iter().position(|p| p == phase).unwrap())
            .collect();
        assert!(
            positions.windows(2).all(|pair| pair[0] < pair[1]),
            "writes out of order: {landed:?}"
        );
    }

    #[tokio::test(flavor = "current_thread")]
    async fn queued_snapshots_collapse_to_the_newest() {
        let repo = Arc::new(SlowFirstWrite::default());
        let (writer, progress) = writer(&repo);

        for phase in PHASES {
            writer.submit(snapshot(phase));
        }
        assert_eq!(writer.flush().await, 1);
        assert_eq!(writer.flush().await, 0);

        let saved = progress.load(LessonKind::SeismicWaves).await.unwrap().unwrap();
        assert_eq!(saved.phase, "review");
        assert_eq!(*repo.landed.lock().unwrap(), vec!["review".to_string()]);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn failed_write_does_not_block_later_ones() {
        let writer = ProgressWriter::new(Arc::new(ProgressService::new(
            fixed_clock(),
            Arc::new(InMemoryRepository::new()),
            Arc::new(InMemoryRepository::new()),
        )));
        // no lesson tag, so the save is rejected
        writer.submit(SavedLessonState::default());
        assert_eq!(writer.flush().await, 0);

        writer.submit(snapshot("predict"));
        assert_eq!(writer.flush().await, 1);
    }
}
