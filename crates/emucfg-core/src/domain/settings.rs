//! The `Settings` aggregate: every loaded file's sections, keyed by file.

use std::collections::BTreeMap;

use super::section::{SectionMap, SettingSection};
use super::setting::{FileId, Setting, SettingValue};
use super::validate;
use super::SettingsError;

/// In-memory settings for one front-end session.
///
/// Files are created lazily like sections are: [`Settings::file_mut`] returns
/// an empty [`SectionMap`] for a file that was never loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    files: BTreeMap<FileId, SectionMap>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the sections read for one file, replacing earlier contents.
    pub fn insert_file(&mut self, sections: SectionMap) -> Option<SectionMap> {
        self.files.insert(sections.file().clone(), sections)
    }

    pub fn file(&self, file: &FileId) -> Option<&SectionMap> {
        self.files.get(file)
    }

    /// Returns the sections of `file`, creating an empty map if needed.
    pub fn file_mut(&mut self, file: &FileId) -> &mut SectionMap {
        self.files
            .entry(file.clone())
            .or_insert_with(|| SectionMap::new(file.clone()))
    }

    pub fn contains_file(&self, file: &FileId) -> bool {
        self.files.contains_key(file)
    }

    /// Read-only section lookup across files.
    pub fn section(&self, file: &FileId, section: &str) -> Option<&SettingSection> {
        self.file(file).and_then(|map| map.section(section))
    }

    /// Returns a section, creating both the file entry and the section if needed.
    pub fn section_mut(&mut self, file: &FileId, section: &str) -> &mut SettingSection {
        self.file_mut(file).section_mut(section)
    }

    /// Sets `key` in `section` of `file` after checking that the section
    /// name, key and value can all be written and read back unchanged.
    ///
    /// Returns `true` if the stored value changed.
    ///
    /// # Errors
    ///
    /// Returns the [`SettingsError`] validation variant for the first
    /// problem; nothing is created or stored in that case.
    pub fn try_set(
        &mut self,
        file: &FileId,
        section: &str,
        key: &str,
        value: impl Into<SettingValue>,
    ) -> Result<bool, SettingsError> {
        let value = value.into();
        validate::section_name(section)?;
        validate::entry(key, &value)?;
        Ok(self.section_mut(file, section).set(key, value))
    }

    pub fn setting(&self, file: &FileId, section: &str, key: &str) -> Option<&Setting> {
        self.section(file, section).and_then(|s| s.setting(key))
    }

    /// Stores `setting` under the file and section named by its identity.
    ///
    /// # Errors
    ///
    /// Propagates [`SettingsError`] from the section; with routing by identity
    /// this only happens if the invariant was already broken elsewhere.
    pub fn put_setting(&mut self, setting: Setting) -> Result<Option<Setting>, SettingsError> {
        let file = setting.file().clone();
        self.file_mut(&file).put_setting(setting)
    }

    pub fn files(&self) -> impl Iterator<Item = &SectionMap> {
        self.files.values()
    }

    /// `true` when no file holds any section.
    pub fn is_empty(&self) -> bool {
        self.files.values().all(SectionMap::is_empty)
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::setting::SettingValue;

    #[test]
    fn test_new_settings_is_empty() {
        let settings = Settings::new();
        assert!(settings.is_empty());
        assert!(settings.file(&FileId::Config).is_none());
    }

    #[test]
    fn test_section_mut_creates_file_and_section() {
        // Arrange
        let mut settings = Settings::new();

        // Act
        settings
            .section_mut(&FileId::Config, "Core")
            .set("use_cpu_jit", 1);

        // Assert
        assert!(settings.contains_file(&FileId::Config));
        assert_eq!(
            settings
                .setting(&FileId::Config, "Core", "use_cpu_jit")
                .map(Setting::value),
            Some(&SettingValue::Int(1))
        );
    }

    #[test]
    fn test_try_set_rejects_invalid_entry_without_creating_anything() {
        let mut settings = Settings::new();

        let bad_value = settings.try_set(&FileId::Config, "Controls", "button_a", "x\n[Evil]");
        let bad_section = settings.try_set(&FileId::Config, "", "button_a", "x");

        assert!(matches!(bad_value, Err(SettingsError::InvalidValue { .. })));
        assert!(matches!(bad_section, Err(SettingsError::InvalidSectionName { .. })));
        assert!(!settings.contains_file(&FileId::Config));
    }

    #[test]
    fn test_try_set_reports_change() {
        let mut settings = Settings::new();

        assert_eq!(settings.try_set(&FileId::Config, "Core", "use_cpu_jit", 1), Ok(true));
        assert_eq!(settings.try_set(&FileId::Config, "Core", "use_cpu_jit", 1), Ok(false));
    }

    #[test]
    fn test_put_setting_routes_by_identity() {
        let mut settings = Settings::new();
        let game = FileId::Game("0004000000054000".into());

        settings
            .put_setting(Setting::new("resolution_factor", "Renderer", game.clone(), 3))
            .unwrap();

        assert!(settings.setting(&FileId::Config, "Renderer", "resolution_factor").is_none());
        assert!(settings.setting(&game, "Renderer", "resolution_factor").is_some());
    }

    #[test]
    fn test_insert_file_replaces_previous_contents() {
        let mut settings = Settings::new();
        settings.section_mut(&FileId::Config, "Core").set("use_cpu_jit", 1);

        let previous = settings.insert_file(SectionMap::new(FileId::Config));

        assert!(previous.is_some());
        assert!(settings.is_empty());
    }

    #[test]
    fn test_is_empty_ignores_files_without_sections() {
        let mut settings = Settings::new();
        settings.file_mut(&FileId::Config);
        assert!(settings.is_empty());
    }
}
