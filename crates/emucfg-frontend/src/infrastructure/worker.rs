//! Background worker for settings file I/O.
//!
//! Reading and writing `.ini` files is blocking file system work.  The worker
//! runs each operation on tokio's blocking thread pool so an async host (a UI
//! event loop, the CLI's runtime) never stalls on disk access.
//!
//! The session itself stays synchronous: the worker performs the I/O and then
//! hands the result to [`SettingsSession::finish_load`] or
//! [`SettingsSession::finish_save`] on the caller's task.

use std::sync::Arc;

use emucfg_core::{FileId, SectionMap};
use thiserror::Error;
use tokio::task::JoinError;
use tracing::{debug, error};

use crate::application::repository::{EmulationCore, SettingsRepository, SettingsView, StorageError};
use crate::application::session::{SaveOutcome, SettingsSession};

/// Error type for background settings operations.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The blocking task panicked or was cancelled.
    #[error("settings task failed: {0}")]
    Join(#[from] JoinError),
}

impl From<WorkerError> for StorageError {
    fn from(e: WorkerError) -> Self {
        match e {
            WorkerError::Storage(e) => e,
            WorkerError::Join(e) => StorageError::Interrupted(e.to_string()),
        }
    }
}

/// Runs repository operations off the async executor.
pub struct SettingsWorker<R> {
    repository: Arc<R>,
}

impl<R> Clone for SettingsWorker<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: SettingsRepository + 'static> SettingsWorker<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Loads `file` on the blocking pool.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::Storage`] if the repository fails and
    /// [`WorkerError::Join`] if the task does not complete.
    pub async fn load(&self, file: FileId) -> Result<SectionMap, WorkerError> {
        let repository = Arc::clone(&self.repository);
        let sections = tokio::task::spawn_blocking(move || repository.load(&file)).await??;
        Ok(sections)
    }

    /// Saves `sections` to `file` on the blocking pool.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::Storage`] if the repository fails and
    /// [`WorkerError::Join`] if the task does not complete.
    pub async fn save(&self, file: FileId, sections: SectionMap) -> Result<(), WorkerError> {
        let repository = Arc::clone(&self.repository);
        tokio::task::spawn_blocking(move || repository.save(&file, &sections)).await??;
        Ok(())
    }

    /// Loads the session's file in the background if it has not been loaded.
    pub async fn load_session<'s>(
        &self,
        session: &'s mut SettingsSession,
        view: &dyn SettingsView,
    ) -> &'s SectionMap {
        if !session.needs_load() {
            debug!("{} already loaded", session.file());
            return session.current_sections();
        }

        let result = self.load(session.file().clone()).await;
        if let Err(WorkerError::Join(e)) = &result {
            error!("background load of {} failed: {e}", session.file());
        }
        session.finish_load(result.map_err(StorageError::from), view)
    }

    /// Background counterpart of [`SettingsSession::on_stop`].
    pub async fn stop_session(
        &self,
        session: &mut SettingsSession,
        finishing: bool,
        view: &dyn SettingsView,
        core: &dyn EmulationCore,
    ) -> SaveOutcome {
        let Some(sections) = session.begin_save(finishing) else {
            return SaveOutcome::Skipped;
        };

        let result = self.save(session.file().clone(), sections).await;
        session.finish_save(result.map_err(StorageError::from), view, core)
    }
}
