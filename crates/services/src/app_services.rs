use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::error::AppServicesError;
use crate::progress_service::ProgressService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    progress: Arc<ProgressService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock))
    }

    /// Build services over throwaway in-memory storage.
    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::from_storage(&Storage::in_memory(), clock)
    }

    fn from_storage(storage: &Storage, clock: Clock) -> Self {
        let progress = Arc::new(ProgressService::new(
            clock,
            Arc::clone(&storage.progress),
            Arc::clone(&storage.completions),
        ));
        Self { clock, progress }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }
}
