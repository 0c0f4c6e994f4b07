//! SettingsSession: load-on-demand and save-on-exit for one settings screen.
//!
//! A session covers the lifetime of one settings UI: it is created when the
//! screen opens and stopped when the screen closes.
//!
//! # Lifecycle (for beginners)
//!
//! ```text
//! new(file) ──► load_settings ──► edits … ──► on_stop(finishing = true)
//!                  │                │               │
//!                  │ read once      │ dirty = true  │ dirty? write, show message,
//!                  │ (4.1)          │               │ ask core to reload
//! ```
//!
//! - Loading only happens the first time; reopening a submenu reuses the
//!   in-memory settings.
//! - Every edit that changes a stored value sets the dirty flag.
//! - Stopping writes the file only when the screen is really finishing and at
//!   least one edit happened.  Otherwise the in-memory settings are dropped.
//!
//! Each I/O step is also available as a `begin_*`/`finish_*` pair so a host can
//! run the repository call on a background worker and apply the result on its
//! own thread (see `infrastructure::worker`).

use emucfg_core::{FileId, SectionMap, Setting, Settings, SettingsError};
use tracing::{debug, info};

use super::repository::{EmulationCore, SettingsRepository, SettingsView, StorageError};
use super::settings_file::{report_save_result, sections_or_default};

/// What [`SettingsSession::on_stop`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Nothing to write: not finishing, no edits, or nothing loaded.
    Skipped,
    /// The file was written and the core was asked to reload.
    Saved,
    /// The write failed; the session stays dirty.
    Failed,
}

/// In-memory settings for one settings screen.
#[derive(Debug)]
pub struct SettingsSession {
    file: FileId,
    settings: Settings,
    loaded: bool,
    should_save: bool,
}

impl SettingsSession {
    /// Creates a session for `file`.  Nothing is read until
    /// [`load_settings`](Self::load_settings).
    pub fn new(file: FileId) -> Self {
        Self {
            file,
            settings: Settings::new(),
            loaded: false,
            should_save: false,
        }
    }

    /// Creates a session for a game's override file, or for the global config
    /// when `game_id` is absent or empty.
    pub fn for_game(game_id: Option<&str>) -> Self {
        match game_id {
            Some(id) if !id.is_empty() => Self::new(FileId::Game(id.to_string())),
            _ => Self::new(FileId::Config),
        }
    }

    pub fn file(&self) -> &FileId {
        &self.file
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The sections of this session's file, once loaded.
    pub fn sections(&self) -> Option<&SectionMap> {
        self.settings.file(&self.file)
    }

    // ── Loading ───────────────────────────────────────────────────────────────

    /// `true` until the first load has completed (successfully or not).
    pub fn needs_load(&self) -> bool {
        !self.loaded
    }

    /// The session file's sections, created empty if absent.
    pub fn current_sections(&mut self) -> &SectionMap {
        self.settings.file_mut(&self.file)
    }

    /// Reads the file on the first call; later calls return the in-memory
    /// sections untouched.
    pub fn load_settings(
        &mut self,
        repository: &dyn SettingsRepository,
        view: &dyn SettingsView,
    ) -> &SectionMap {
        if self.needs_load() {
            let result = repository.load(&self.file);
            self.finish_load(result, view)
        } else {
            debug!("{} already loaded; skipping reload", self.file);
            self.current_sections()
        }
    }

    /// Applies the result of a load performed by the caller.
    ///
    /// A failed load reports "not found" to `view` and leaves an empty map.
    /// Settings edited before the load finished are kept and win over the
    /// values read from the file.
    pub fn finish_load(
        &mut self,
        result: Result<SectionMap, StorageError>,
        view: &dyn SettingsView,
    ) -> &SectionMap {
        let mut sections = sections_or_default(&self.file, result, view);
        if let Some(pending) = self.settings.file(&self.file) {
            let mut kept = 0;
            for section in pending.sections() {
                for setting in section.settings() {
                    sections
                        .section_mut(section.name())
                        .set(setting.key(), setting.value().clone());
                    kept += 1;
                }
            }
            if kept > 0 {
                debug!("kept {kept} setting(s) edited before {} was loaded", self.file);
            }
        }
        self.settings.insert_file(sections);
        self.loaded = true;
        self.settings.file_mut(&self.file)
    }

    // ── Editing ───────────────────────────────────────────────────────────────

    /// Marks the session dirty.  Called for every edit made in the UI.
    pub fn on_setting_changed(&mut self) {
        self.should_save = true;
    }

    pub fn should_save(&self) -> bool {
        self.should_save
    }

    /// Restores the dirty flag saved by a host across a UI restart.
    pub fn restore_should_save(&mut self, should_save: bool) {
        self.should_save = should_save;
    }

    /// Stores an edited setting under its own file and section and marks the
    /// session dirty.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the setting's identity is inconsistent.
    pub fn put_setting(&mut self, setting: Setting) -> Result<Option<Setting>, SettingsError> {
        let replaced = self.settings.put_setting(setting)?;
        self.on_setting_changed();
        Ok(replaced)
    }

    /// Runs an edit against the settings and marks the session dirty when the
    /// edit reports a change.
    ///
    /// # Errors
    ///
    /// Propagates the edit's own error; the dirty flag is left untouched.
    pub fn edit<E>(
        &mut self,
        edit: impl FnOnce(&mut Settings) -> Result<bool, E>,
    ) -> Result<bool, E> {
        let changed = edit(&mut self.settings)?;
        if changed {
            self.on_setting_changed();
        }
        Ok(changed)
    }

    // ── Saving ────────────────────────────────────────────────────────────────

    /// Returns a snapshot to write if the session should save on this stop.
    pub fn begin_save(&self, finishing: bool) -> Option<SectionMap> {
        if !finishing || !self.should_save {
            return None;
        }
        self.sections().cloned()
    }

    /// Applies the result of a save performed by the caller.
    pub fn finish_save(
        &mut self,
        result: Result<(), StorageError>,
        view: &dyn SettingsView,
        core: &dyn EmulationCore,
    ) -> SaveOutcome {
        report_save_result(&self.file, &result, view);
        if result.is_err() {
            return SaveOutcome::Failed;
        }

        let message = match self.file.game_id() {
            Some(game_id) => format!("Saved settings for {game_id}"),
            None => "Saved settings".to_string(),
        };
        view.show_message(&message, false);
        core.reload_settings();
        self.should_save = false;
        SaveOutcome::Saved
    }

    /// Called when the settings screen stops.
    ///
    /// Writes the file only when `finishing` is set and the session is dirty.
    pub fn on_stop(
        &mut self,
        repository: &dyn SettingsRepository,
        finishing: bool,
        view: &dyn SettingsView,
        core: &dyn EmulationCore,
    ) -> SaveOutcome {
        let Some(sections) = self.begin_save(finishing) else {
            debug!("settings session stopping without changes to {}", self.file);
            return SaveOutcome::Skipped;
        };

        info!("settings session stopping; saving settings to {}", self.file);
        let result = repository.save(&self.file, &sections);
        self.finish_save(result, view, core)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use emucfg_core::{keys, SettingValue};

    use super::*;
    use crate::application::repository::{
        MockEmulationCore, MockSettingsRepository, MockSettingsView,
    };

    fn config_sections() -> SectionMap {
        let mut sections = SectionMap::new(FileId::Config);
        sections.section_mut(keys::SECTION_CORE).set(keys::KEY_CPU_JIT, 1);
        sections
    }

    fn quiet_view() -> MockSettingsView {
        let mut view = MockSettingsView::new();
        view.expect_on_settings_file_not_found().never();
        view
    }

    fn loaded_session(repository: &MockSettingsRepository) -> SettingsSession {
        let mut session = SettingsSession::new(FileId::Config);
        session.load_settings(repository, &quiet_view());
        session
    }

    // ── Construction ──────────────────────────────────────────────────────────

    #[test]
    fn test_for_game_without_id_uses_global_config() {
        assert_eq!(SettingsSession::for_game(None).file(), &FileId::Config);
        assert_eq!(SettingsSession::for_game(Some("")).file(), &FileId::Config);
    }

    #[test]
    fn test_for_game_with_id_uses_override_file() {
        let session = SettingsSession::for_game(Some("0004000000030800"));
        assert_eq!(session.file(), &FileId::Game("0004000000030800".into()));
    }

    // ── Loading ───────────────────────────────────────────────────────────────

    #[test]
    fn test_second_load_does_not_touch_repository() {
        // Arrange
        let mut repository = MockSettingsRepository::new();
        repository
            .expect_load()
            .times(1)
            .returning(|_| Ok(config_sections()));
        let mut session = SettingsSession::new(FileId::Config);

        // Act
        session.load_settings(&repository, &quiet_view());
        let sections = session.load_settings(&repository, &quiet_view());

        // Assert
        assert_eq!(sections.len(), 1);
        assert!(!session.needs_load());
    }

    #[test]
    fn test_failed_load_is_not_retried() {
        let mut repository = MockSettingsRepository::new();
        repository.expect_load().times(1).returning(|_| {
            Err(StorageError::NotFound {
                path: PathBuf::from("config.ini"),
            })
        });
        let mut view = MockSettingsView::new();
        view.expect_on_settings_file_not_found().times(1).return_const(());
        let mut session = SettingsSession::new(FileId::Config);

        assert!(session.load_settings(&repository, &view).is_empty());
        assert!(session.load_settings(&repository, &view).is_empty());
    }

    #[test]
    fn test_load_does_not_mark_dirty() {
        let mut repository = MockSettingsRepository::new();
        repository.expect_load().returning(|_| Ok(config_sections()));

        let session = loaded_session(&repository);

        assert!(!session.should_save());
    }

    #[test]
    fn test_edit_before_load_survives_load() {
        // Arrange
        let mut repository = MockSettingsRepository::new();
        repository.expect_load().times(1).returning(|_| {
            let mut sections = config_sections();
            sections.section_mut("Audio").set("volume", 1.0_f32);
            Ok(sections)
        });
        let mut session = SettingsSession::new(FileId::Config);
        session
            .put_setting(Setting::new("volume", "Audio", FileId::Config, 0.5_f32))
            .unwrap();

        // Act
        let sections = session.load_settings(&repository, &quiet_view()).clone();

        // Assert
        assert_eq!(
            sections.setting("Audio", "volume").map(|s| s.value()),
            Some(&SettingValue::Float(0.5))
        );
        assert_eq!(
            sections.setting(keys::SECTION_CORE, keys::KEY_CPU_JIT).map(|s| s.value()),
            Some(&SettingValue::Int(1))
        );
        assert!(session.should_save());
    }

    // ── Editing ───────────────────────────────────────────────────────────────

    #[test]
    fn test_put_setting_marks_dirty() {
        let mut session = SettingsSession::new(FileId::Config);

        session
            .put_setting(Setting::new("volume", "Audio", FileId::Config, 0.5_f32))
            .unwrap();

        assert!(session.should_save());
        assert_eq!(
            session.sections().unwrap().setting("Audio", "volume").unwrap().value(),
            &SettingValue::Float(0.5)
        );
    }

    #[test]
    fn test_edit_without_change_stays_clean() {
        let mut repository = MockSettingsRepository::new();
        repository.expect_load().returning(|_| Ok(config_sections()));
        let mut session = loaded_session(&repository);

        let changed = session
            .edit(|settings| {
                Ok::<_, SettingsError>(
                    settings
                        .section_mut(&FileId::Config, keys::SECTION_CORE)
                        .set(keys::KEY_CPU_JIT, 1),
                )
            })
            .unwrap();

        assert!(!changed);
        assert!(!session.should_save());
    }

    #[test]
    fn test_edit_with_change_marks_dirty() {
        let mut session = SettingsSession::new(FileId::Config);

        let changed = session
            .edit(|settings| {
                Ok::<_, SettingsError>(
                    settings
                        .section_mut(&FileId::Config, keys::SECTION_CORE)
                        .set(keys::KEY_CPU_JIT, 0),
                )
            })
            .unwrap();

        assert!(changed);
        assert!(session.should_save());
    }

    #[test]
    fn test_restore_should_save() {
        let mut session = SettingsSession::new(FileId::Config);
        session.restore_should_save(true);
        assert!(session.should_save());
    }

    // ── Saving ────────────────────────────────────────────────────────────────

    #[test]
    fn test_stop_without_edits_writes_nothing() {
        // Arrange
        let mut repository = MockSettingsRepository::new();
        repository.expect_load().returning(|_| Ok(config_sections()));
        repository.expect_save().never();
        let mut session = loaded_session(&repository);
        let mut core = MockEmulationCore::new();
        core.expect_reload_settings().never();

        // Act
        let outcome = session.on_stop(&repository, true, &quiet_view(), &core);

        // Assert
        assert_eq!(outcome, SaveOutcome::Skipped);
    }

    #[test]
    fn test_stop_while_not_finishing_writes_nothing() {
        let mut repository = MockSettingsRepository::new();
        repository.expect_load().returning(|_| Ok(config_sections()));
        repository.expect_save().never();
        let mut session = loaded_session(&repository);
        session.on_setting_changed();
        let core = MockEmulationCore::new();

        let outcome = session.on_stop(&repository, false, &quiet_view(), &core);

        assert_eq!(outcome, SaveOutcome::Skipped);
        assert!(session.should_save(), "still dirty for the real stop");
    }

    #[test]
    fn test_stop_after_edit_saves_once_and_reloads_core() {
        // Arrange
        let mut repository = MockSettingsRepository::new();
        repository.expect_load().returning(|_| Ok(config_sections()));
        repository
            .expect_save()
            .withf(|file, sections| {
                *file == FileId::Config
                    && sections.setting("Core", "use_cpu_jit").map(|s| s.value().clone())
                        == Some(SettingValue::Int(0))
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let mut session = loaded_session(&repository);
        session
            .edit(|settings| {
                Ok::<_, SettingsError>(
                    settings
                        .section_mut(&FileId::Config, keys::SECTION_CORE)
                        .set(keys::KEY_CPU_JIT, 0),
                )
            })
            .unwrap();

        let mut view = MockSettingsView::new();
        view.expect_show_message()
            .withf(|message, _| message == "Saved settings")
            .times(1)
            .return_const(());
        let mut core = MockEmulationCore::new();
        core.expect_reload_settings().times(1).return_const(());

        // Act
        let outcome = session.on_stop(&repository, true, &view, &core);

        // Assert
        assert_eq!(outcome, SaveOutcome::Saved);
        assert!(!session.should_save());
    }

    #[test]
    fn test_stop_for_game_shows_game_message() {
        let game = FileId::Game("0004000000033500".into());
        let mut repository = MockSettingsRepository::new();
        repository.expect_save().times(1).returning(|_, _| Ok(()));
        let mut session = SettingsSession::new(game.clone());
        session
            .put_setting(Setting::new("shaders_accurate_mul", "Renderer", game, 1))
            .unwrap();

        let mut view = MockSettingsView::new();
        view.expect_show_message()
            .withf(|message, _| message == "Saved settings for 0004000000033500")
            .times(1)
            .return_const(());
        let mut core = MockEmulationCore::new();
        core.expect_reload_settings().times(1).return_const(());

        assert_eq!(session.on_stop(&repository, true, &view, &core), SaveOutcome::Saved);
    }

    #[test]
    fn test_failed_save_keeps_session_dirty_and_skips_reload() {
        // Arrange
        let mut repository = MockSettingsRepository::new();
        repository.expect_load().returning(|_| Ok(config_sections()));
        repository.expect_save().times(1).returning(|_, _| {
            Err(StorageError::Io {
                path: PathBuf::from("config.ini"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        });
        let mut session = loaded_session(&repository);
        session.on_setting_changed();

        let mut view = MockSettingsView::new();
        view.expect_show_message()
            .withf(|message, _| message.starts_with("Error saving config.ini"))
            .times(1)
            .return_const(());
        let mut core = MockEmulationCore::new();
        core.expect_reload_settings().never();

        // Act
        let outcome = session.on_stop(&repository, true, &view, &core);

        // Assert
        assert_eq!(outcome, SaveOutcome::Failed);
        assert!(session.should_save());
    }

    #[test]
    fn test_begin_save_without_loaded_sections_is_none() {
        let mut session = SettingsSession::new(FileId::Config);
        session.on_setting_changed();
        assert!(session.begin_save(true).is_none());
    }
}
