//! Ports between the settings session and the outside world.
//!
//! The session never touches the file system, the screen or the emulator
//! directly.  It talks to three traits instead:
//!
//! - [`SettingsRepository`] – loads and stores one file's sections.
//! - [`SettingsView`] – shows messages to the user.
//! - [`EmulationCore`] – tells the running core to pick up new settings.
//!
//! The infrastructure layer provides the real implementations; tests use the
//! `mockall`-generated mocks.

use std::path::PathBuf;

use emucfg_core::{FileId, SectionMap};
use thiserror::Error;

/// Error type for settings file operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The settings file does not exist.
    #[error("settings file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// A file system I/O error occurred.
    #[error("I/O error accessing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The game id cannot be used as a file name.
    #[error("invalid game id {game_id:?}: must be a plain file name")]
    InvalidGameId { game_id: String },

    /// The load or save ran elsewhere and did not complete.
    #[error("settings task did not complete: {0}")]
    Interrupted(String),
}

/// Loads and stores the sections of one settings file.
#[cfg_attr(test, mockall::automock)]
pub trait SettingsRepository: Send + Sync {
    /// Reads every section of `file`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] when the file does not exist and
    /// [`StorageError::Io`] when it cannot be read.
    fn load(&self, file: &FileId) -> Result<SectionMap, StorageError>;

    /// Overwrites `file` with `sections`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] when the file cannot be written.
    fn save(&self, file: &FileId, sections: &SectionMap) -> Result<(), StorageError>;
}

/// User-facing callbacks raised by the session.
#[cfg_attr(test, mockall::automock)]
pub trait SettingsView {
    /// The settings file could not be read; the session continues with
    /// defaults.
    fn on_settings_file_not_found(&self, file: &FileId);

    /// Shows a one-shot message (a toast, a status line, stdout).
    fn show_message(&self, message: &str, long: bool);
}

/// The running emulation core.
#[cfg_attr(test, mockall::automock)]
pub trait EmulationCore {
    /// Asks the core to re-read its configuration files.
    fn reload_settings(&self);
}
