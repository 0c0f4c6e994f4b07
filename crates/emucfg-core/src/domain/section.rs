//! Named groups of settings within one file.

use std::collections::BTreeMap;

use serde::Serialize;

use super::setting::{FileId, Setting, SettingValue};
use super::validate;
use super::SettingsError;

/// A named group of settings within one file (`[Renderer]`, `[Core]`, …).
///
/// Keys are unique within a section.  A `BTreeMap` keeps iteration sorted by
/// key so the writer always produces the same text for the same contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingSection {
    name: String,
    #[serde(skip)]
    file: FileId,
    settings: BTreeMap<String, Setting>,
}

impl SettingSection {
    pub fn new(name: impl Into<String>, file: FileId) -> Self {
        Self {
            name: name.into(),
            file,
            settings: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file(&self) -> &FileId {
        &self.file
    }

    /// Looks up a setting by key.
    pub fn setting(&self, key: &str) -> Option<&Setting> {
        self.settings.get(key)
    }

    /// Mutable lookup by key.
    pub fn setting_mut(&mut self, key: &str) -> Option<&mut Setting> {
        self.settings.get_mut(key)
    }

    /// Stores `setting`, replacing any setting with the same key.
    ///
    /// Returns the replaced setting, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::SectionMismatch`] or
    /// [`SettingsError::FileMismatch`] when the setting's identity does not
    /// name this section.
    pub fn put_setting(&mut self, setting: Setting) -> Result<Option<Setting>, SettingsError> {
        if setting.section() != self.name {
            return Err(SettingsError::SectionMismatch {
                key: setting.key().to_string(),
                expected: setting.section().to_string(),
                found: self.name.clone(),
            });
        }
        if setting.file() != &self.file {
            return Err(SettingsError::FileMismatch {
                key: setting.key().to_string(),
                expected: setting.file().to_string(),
                found: self.file.to_string(),
            });
        }
        Ok(self.settings.insert(setting.key().to_string(), setting))
    }

    /// Sets `key` to `value`, creating the setting when missing.
    ///
    /// Returns `true` if the stored value changed.
    pub fn set(&mut self, key: &str, value: impl Into<SettingValue>) -> bool {
        let value = value.into();
        match self.settings.get_mut(key) {
            Some(existing) => existing.set_value(value),
            None => {
                let setting = Setting::new(key, self.name.clone(), self.file.clone(), value);
                self.settings.insert(key.to_string(), setting);
                true
            }
        }
    }

    /// Like [`set`](Self::set), but first checks that the key and value can
    /// be written and read back unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidKey`] or [`SettingsError::InvalidValue`];
    /// nothing is stored in that case.
    pub fn try_set(&mut self, key: &str, value: impl Into<SettingValue>) -> Result<bool, SettingsError> {
        let value = value.into();
        validate::entry(key, &value)?;
        Ok(self.set(key, value))
    }

    /// Removes a setting, returning it if present.
    pub fn remove(&mut self, key: &str) -> Option<Setting> {
        self.settings.remove(key)
    }

    /// Iterates settings in key order.
    pub fn settings(&self) -> impl Iterator<Item = &Setting> {
        self.settings.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.settings.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }
}

/// All sections of one settings file, keyed by section name.
///
/// Mutable access through [`SectionMap::section_mut`] creates a missing section
/// on the fly, so callers never have to handle "section not found" when
/// editing.  Read-only access through [`SectionMap::section`] never creates
/// anything.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionMap {
    #[serde(skip)]
    file: FileId,
    #[serde(flatten)]
    sections: BTreeMap<String, SettingSection>,
}

impl SectionMap {
    pub fn new(file: FileId) -> Self {
        Self {
            file,
            sections: BTreeMap::new(),
        }
    }

    pub fn file(&self) -> &FileId {
        &self.file
    }

    /// Read-only section lookup.
    pub fn section(&self, name: &str) -> Option<&SettingSection> {
        self.sections.get(name)
    }

    /// Returns the named section, creating an empty one if it does not exist.
    pub fn section_mut(&mut self, name: &str) -> &mut SettingSection {
        let file = &self.file;
        self.sections
            .entry(name.to_string())
            .or_insert_with(|| SettingSection::new(name, file.clone()))
    }

    /// Inserts `section`, replacing any section with the same name.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::FileMismatch`] if the section belongs to a
    /// different file.
    pub fn insert(&mut self, section: SettingSection) -> Result<Option<SettingSection>, SettingsError> {
        if section.file() != &self.file {
            return Err(SettingsError::FileMismatch {
                key: section.name().to_string(),
                expected: section.file().to_string(),
                found: self.file.to_string(),
            });
        }
        Ok(self.sections.insert(section.name().to_string(), section))
    }

    /// Like [`section_mut`](Self::section_mut), but rejects a name that
    /// would not read back as the same header.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidSectionName`].
    pub fn try_section_mut(&mut self, name: &str) -> Result<&mut SettingSection, SettingsError> {
        validate::section_name(name)?;
        Ok(self.section_mut(name))
    }

    /// Looks up a setting by section and key.
    pub fn setting(&self, section: &str, key: &str) -> Option<&Setting> {
        self.section(section).and_then(|s| s.setting(key))
    }

    /// Stores `setting` under its own section, creating the section if needed.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::FileMismatch`] if the setting names another file.
    pub fn put_setting(&mut self, setting: Setting) -> Result<Option<Setting>, SettingsError> {
        if setting.file() != &self.file {
            return Err(SettingsError::FileMismatch {
                key: setting.key().to_string(),
                expected: setting.file().to_string(),
                found: self.file.to_string(),
            });
        }
        let section = setting.section().to_string();
        self.section_mut(&section).put_setting(setting)
    }

    /// Iterates sections in name order.
    pub fn sections(&self) -> impl Iterator<Item = &SettingSection> {
        self.sections.values()
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> FileId {
        FileId::Game("0004000000033500".to_string())
    }

    // ── SettingSection ────────────────────────────────────────────────────────

    #[test]
    fn test_put_setting_into_matching_section() {
        // Arrange
        let mut section = SettingSection::new("Core", FileId::Config);
        let setting = Setting::new("use_cpu_jit", "Core", FileId::Config, 1);

        // Act
        let replaced = section.put_setting(setting).expect("same section");

        // Assert
        assert!(replaced.is_none());
        assert_eq!(section.len(), 1);
        assert_eq!(
            section.setting("use_cpu_jit").map(Setting::value),
            Some(&SettingValue::Int(1))
        );
    }

    #[test]
    fn test_put_setting_replaces_existing_key() {
        let mut section = SettingSection::new("Core", FileId::Config);
        section
            .put_setting(Setting::new("use_cpu_jit", "Core", FileId::Config, 1))
            .unwrap();

        let replaced = section
            .put_setting(Setting::new("use_cpu_jit", "Core", FileId::Config, 0))
            .unwrap();

        assert_eq!(replaced.map(|s| s.value().clone()), Some(SettingValue::Int(1)));
        assert_eq!(section.len(), 1);
    }

    #[test]
    fn test_put_setting_rejects_wrong_section() {
        let mut section = SettingSection::new("Core", FileId::Config);
        let result = section.put_setting(Setting::new("volume", "Audio", FileId::Config, 1.0_f32));

        assert!(matches!(result, Err(SettingsError::SectionMismatch { .. })));
        assert!(section.is_empty());
    }

    #[test]
    fn test_put_setting_rejects_wrong_file() {
        let mut section = SettingSection::new("Core", FileId::Config);
        let result = section.put_setting(Setting::new("use_cpu_jit", "Core", game(), 1));

        assert!(matches!(result, Err(SettingsError::FileMismatch { .. })));
    }

    #[test]
    fn test_set_creates_setting_with_section_identity() {
        let mut section = SettingSection::new("Renderer", game());

        assert!(section.set("resolution_factor", 2));

        let setting = section.setting("resolution_factor").expect("created");
        assert_eq!(setting.section(), "Renderer");
        assert_eq!(setting.file(), &game());
    }

    #[test]
    fn test_try_set_rejects_key_with_separator() {
        let mut section = SettingSection::new("Core", FileId::Config);

        let result = section.try_set("a=b", 1);

        assert!(matches!(result, Err(SettingsError::InvalidKey { .. })));
        assert!(section.is_empty());
    }

    #[test]
    fn test_try_set_stores_valid_entry() {
        let mut section = SettingSection::new("Controls", FileId::Config);

        assert_eq!(section.try_set("button_a", "engine:keyboard,code:65"), Ok(true));
        assert_eq!(section.len(), 1);
    }

    #[test]
    fn test_try_section_mut_rejects_header_injection() {
        let mut sections = SectionMap::new(FileId::Config);

        let result = sections.try_section_mut("Core]\n[Evil");

        assert!(matches!(result, Err(SettingsError::InvalidSectionName { .. })));
        assert!(sections.is_empty());
    }

    #[test]
    fn test_set_same_value_reports_unchanged() {
        let mut section = SettingSection::new("Renderer", FileId::Config);
        section.set("resolution_factor", 2);
        assert!(!section.set("resolution_factor", 2));
    }

    #[test]
    fn test_keys_are_sorted() {
        let mut section = SettingSection::new("Renderer", FileId::Config);
        section.set("use_vsync_new", 1);
        section.set("filter_mode", 1);
        section.set("resolution_factor", 1);

        let keys: Vec<&str> = section.keys().collect();
        assert_eq!(keys, ["filter_mode", "resolution_factor", "use_vsync_new"]);
    }

    // ── SectionMap ────────────────────────────────────────────────────────────

    #[test]
    fn test_section_mut_creates_missing_section() {
        // Arrange
        let mut map = SectionMap::new(FileId::Config);
        assert!(map.section("Audio").is_none());

        // Act
        let section = map.section_mut("Audio");

        // Assert
        assert_eq!(section.name(), "Audio");
        assert!(section.is_empty());
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_section_lookup_does_not_create() {
        let map = SectionMap::new(FileId::Config);
        assert!(map.section("Audio").is_none());
        assert!(map.is_empty());
    }

    #[test]
    fn test_put_setting_routes_to_its_section() {
        let mut map = SectionMap::new(FileId::Config);
        map.put_setting(Setting::new("volume", "Audio", FileId::Config, 0.5_f32))
            .unwrap();

        assert_eq!(
            map.setting("Audio", "volume").map(Setting::value),
            Some(&SettingValue::Float(0.5))
        );
    }

    #[test]
    fn test_put_setting_rejects_other_file() {
        let mut map = SectionMap::new(FileId::Config);
        let result = map.put_setting(Setting::new("volume", "Audio", game(), 0.5_f32));

        assert!(matches!(result, Err(SettingsError::FileMismatch { .. })));
        assert!(map.is_empty());
    }

    #[test]
    fn test_insert_replaces_section_with_same_name() {
        let mut map = SectionMap::new(FileId::Config);
        map.section_mut("Core").set("use_cpu_jit", 1);

        let replaced = map.insert(SettingSection::new("Core", FileId::Config)).unwrap();

        assert_eq!(replaced.map(|s| s.len()), Some(1));
        assert!(map.section("Core").unwrap().is_empty());
    }

    #[test]
    fn test_same_key_in_different_sections_is_independent() {
        let mut map = SectionMap::new(FileId::Config);
        map.section_mut("Core").set("enabled", 1);
        map.section_mut("Audio").set("enabled", 0);

        assert_eq!(map.setting("Core", "enabled").unwrap().value(), &SettingValue::Int(1));
        assert_eq!(map.setting("Audio", "enabled").unwrap().value(), &SettingValue::Int(0));
    }
}
