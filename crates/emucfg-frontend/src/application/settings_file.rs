//! Reading and writing one settings file with user-facing error reporting.
//!
//! [`SettingsRepository`] returns typed errors.  The functions here turn those
//! errors into the recoverable behaviour the UI expects:
//!
//! - a file that cannot be read becomes an empty section map plus a single
//!   "not found" callback, so the user can carry on with defaults;
//! - a file that cannot be written becomes a one-shot message, and the
//!   settings stay in memory.

use emucfg_core::{FileId, SectionMap};
use tracing::{debug, error};

use super::repository::{SettingsRepository, SettingsView, StorageError};

/// Reads `file` through `repository`, reporting failures to `view`.
pub fn read_file(
    repository: &dyn SettingsRepository,
    file: &FileId,
    view: &dyn SettingsView,
) -> SectionMap {
    sections_or_default(file, repository.load(file), view)
}

/// Writes `sections` to `file` through `repository`, reporting failures to `view`.
///
/// # Errors
///
/// Returns the [`StorageError`] after it has been shown to the user, so the
/// caller can keep its dirty state.
pub fn save_file(
    repository: &dyn SettingsRepository,
    file: &FileId,
    sections: &SectionMap,
    view: &dyn SettingsView,
) -> Result<(), StorageError> {
    let result = repository.save(file, sections);
    report_save_result(file, &result, view);
    result
}

/// Applies the outcome of a load that may have run elsewhere.
pub fn sections_or_default(
    file: &FileId,
    result: Result<SectionMap, StorageError>,
    view: &dyn SettingsView,
) -> SectionMap {
    match result {
        Ok(sections) => {
            debug!("loaded {} section(s) from {file}", sections.len());
            sections
        }
        Err(e) => {
            error!("could not read {file}: {e}");
            view.on_settings_file_not_found(file);
            SectionMap::new(file.clone())
        }
    }
}

/// Shows the error of a failed save to the user.
pub fn report_save_result(file: &FileId, result: &Result<(), StorageError>, view: &dyn SettingsView) {
    match result {
        Ok(()) => debug!("saved {file}"),
        Err(e) => {
            error!("could not save {file}: {e}");
            view.show_message(&format!("Error saving {file}: {e}"), false);
        }
    }
}
