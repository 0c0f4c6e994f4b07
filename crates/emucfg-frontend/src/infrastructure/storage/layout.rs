//! Locations of settings files inside the emulator's user directory.
//!
//! ```text
//! <user>/
//!   config/config.ini                 global configuration
//!   GameSettings/<game id>.ini        per-game overrides
//! ```

use std::path::{Component, Path, PathBuf};

use emucfg_core::FileId;

use crate::application::repository::StorageError;

const CONFIG_DIR: &str = "config";
const GAME_SETTINGS_DIR: &str = "GameSettings";

/// Maps settings files to paths under one user directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryLayout {
    user_dir: PathBuf,
}

impl DirectoryLayout {
    pub fn new(user_dir: impl Into<PathBuf>) -> Self {
        Self {
            user_dir: user_dir.into(),
        }
    }

    pub fn user_dir(&self) -> &Path {
        &self.user_dir
    }

    /// Full path of `file`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidGameId`] when a game id is not a plain
    /// file name, so `GameSettings/<id>.ini` cannot point outside its directory.
    pub fn settings_path(&self, file: &FileId) -> Result<PathBuf, StorageError> {
        let dir = match file {
            FileId::Config => CONFIG_DIR,
            FileId::Game(game_id) => {
                check_game_id(game_id)?;
                GAME_SETTINGS_DIR
            }
        };
        Ok(self.user_dir.join(dir).join(file.to_string()))
    }
}

fn check_game_id(game_id: &str) -> Result<(), StorageError> {
    let mut components = Path::new(game_id).components();
    let plain_name = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if plain_name && !game_id.contains(['/', '\\']) {
        Ok(())
    } else {
        Err(StorageError::InvalidGameId {
            game_id: game_id.to_string(),
        })
    }
}
