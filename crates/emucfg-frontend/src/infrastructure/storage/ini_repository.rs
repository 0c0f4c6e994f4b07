//! `.ini` file implementation of [`SettingsRepository`].
//!
//! Loading parses the whole file with [`emucfg_core::ini::parse`]; malformed
//! lines are dropped there and logged.  Saving always rewrites the whole file
//! from the in-memory sections, so keys removed in memory disappear from disk
//! and comments are not preserved.

use std::fs;
use std::io::ErrorKind;

use emucfg_core::{ini, FileId, SectionMap};
use tracing::{debug, info};

use super::layout::DirectoryLayout;
use crate::application::repository::{SettingsRepository, StorageError};

/// Stores settings files under a [`DirectoryLayout`].
#[derive(Debug, Clone)]
pub struct IniFileRepository {
    layout: DirectoryLayout,
}

impl IniFileRepository {
    pub fn new(layout: DirectoryLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &DirectoryLayout {
        &self.layout
    }
}

impl SettingsRepository for IniFileRepository {
    fn load(&self, file: &FileId) -> Result<SectionMap, StorageError> {
        let path = self.layout.settings_path(file)?;
        let text = fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => StorageError::NotFound { path: path.clone() },
            _ => StorageError::Io {
                path: path.clone(),
                source,
            },
        })?;

        let parsed = ini::parse(&text, file);
        debug!(
            "read {} ({} section(s), {} skipped line(s))",
            path.display(),
            parsed.sections.len(),
            parsed.skipped.len()
        );
        Ok(parsed.into_sections())
    }

    fn save(&self, file: &FileId, sections: &SectionMap) -> Result<(), StorageError> {
        let path = self.layout.settings_path(file)?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|source| StorageError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        fs::write(&path, ini::serialize(sections)).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;
        info!("wrote {}", path.display());
        Ok(())
    }
}
