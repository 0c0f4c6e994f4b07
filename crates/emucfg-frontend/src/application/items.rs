//! Setting rows: typed adapters between a stored [`Setting`] and a UI row.
//!
//! Each editable row is bound to one `(file, section, key)` triple through a
//! [`SettingRef`].  A row never owns its setting; it reads from and writes to
//! the session's [`Settings`] so a missing setting simply shows the row's
//! default and is created on the first edit.
//!
//! Every write returns `true` when the stored value actually changed.  Pass
//! writes through [`SettingsSession::edit`](super::session::SettingsSession::edit)
//! so only real changes mark the session dirty.

use chrono::NaiveDateTime;
use emucfg_core::{FileId, Setting, SettingValue, Settings, SettingsError};
use thiserror::Error;

use super::menus::MenuTag;

/// Text format of date-time rows, e.g. `2000-01-01 00:00:01`.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Errors raised by row edits.
#[derive(Debug, Error, PartialEq)]
pub enum ItemError {
    #[error("invalid date-time `{0}`: expected YYYY-MM-DD HH:MM:SS")]
    InvalidDateTime(String),

    #[error("choice index {index} out of range (0..{len})")]
    ChoiceOutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Setting(#[from] SettingsError),
}

/// Where a row's setting lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingRef {
    pub file: FileId,
    pub section: String,
    pub key: String,
}

impl SettingRef {
    pub fn new(file: FileId, section: &str, key: &str) -> Self {
        Self {
            file,
            section: section.to_string(),
            key: key.to_string(),
        }
    }

    pub fn get<'a>(&self, settings: &'a Settings) -> Option<&'a Setting> {
        settings.setting(&self.file, &self.section, &self.key)
    }

    fn value<'a>(&self, settings: &'a Settings) -> Option<&'a SettingValue> {
        self.get(settings).map(Setting::value)
    }

    fn set(&self, settings: &mut Settings, value: impl Into<SettingValue>) -> bool {
        settings
            .section_mut(&self.file, &self.section)
            .set(&self.key, value)
    }
}

// ── Row kinds ─────────────────────────────────────────────────────────────────

/// A non-interactive group title.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderItem {
    pub title: String,
}

/// A row that opens another menu.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmenuItem {
    pub title: String,
    pub menu: MenuTag,
}

/// An on/off option stored as integer `1`/`0`.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckBoxItem {
    pub setting: SettingRef,
    pub title: String,
    pub description: Option<String>,
    pub default: bool,
}

impl CheckBoxItem {
    /// Non-zero integers are checked; a missing or non-integer value shows
    /// the default.
    pub fn is_checked(&self, settings: &Settings) -> bool {
        self.setting
            .value(settings)
            .and_then(SettingValue::as_int)
            .map_or(self.default, |value| value != 0)
    }

    pub fn set_checked(&self, settings: &mut Settings, checked: bool) -> bool {
        self.setting.set(settings, i32::from(checked))
    }
}

/// How a slider's position maps to the stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderStorage {
    /// The position is stored as-is.
    Integer,
    /// The position is a percentage stored as a float ratio (`75` → `0.75`).
    Fraction,
}

/// An integer range option.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderItem {
    pub setting: SettingRef,
    pub title: String,
    pub description: Option<String>,
    pub min: i32,
    pub max: i32,
    pub units: String,
    pub default: i32,
    pub storage: SliderStorage,
}

impl SliderItem {
    /// Current slider position.
    pub fn selected_value(&self, settings: &Settings) -> i32 {
        let scale = match self.storage {
            SliderStorage::Integer => 1.0,
            SliderStorage::Fraction => 100.0,
        };
        match self.setting.value(settings) {
            Some(SettingValue::Int(value)) => (*value as f32 * scale).round() as i32,
            Some(SettingValue::Float(value)) => (value * scale).round() as i32,
            _ => self.default,
        }
    }

    /// Moves the slider, clamped into `[min, max]`.
    ///
    /// Fraction sliders and sliders whose setting is already a float write a
    /// float; everything else writes an integer.
    pub fn set_selected_value(&self, settings: &mut Settings, position: i32) -> bool {
        let position = position.clamp(self.min, self.max);
        let stored_as_float = matches!(self.setting.value(settings), Some(SettingValue::Float(_)));
        match self.storage {
            SliderStorage::Fraction => self.setting.set(settings, position as f32 / 100.0),
            SliderStorage::Integer if stored_as_float => self.setting.set(settings, position as f32),
            SliderStorage::Integer => self.setting.set(settings, position),
        }
    }

    /// Text shown next to the slider, e.g. `100%` or `2x`.
    pub fn display(&self, settings: &Settings) -> String {
        format!("{}{}", self.selected_value(settings), self.units)
    }
}

/// One entry of a [`SingleChoiceItem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub value: i32,
}

impl Choice {
    pub fn new(label: &str, value: i32) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

/// A pick-one option stored as the chosen entry's integer value.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleChoiceItem {
    pub setting: SettingRef,
    pub title: String,
    pub description: Option<String>,
    pub choices: Vec<Choice>,
    pub default: i32,
}

impl SingleChoiceItem {
    pub fn selected_value(&self, settings: &Settings) -> i32 {
        self.setting
            .value(settings)
            .and_then(SettingValue::as_int)
            .unwrap_or(self.default)
    }

    /// Index of the selected choice, or `None` if the stored value matches
    /// no choice.
    pub fn selected_index(&self, settings: &Settings) -> Option<usize> {
        let value = self.selected_value(settings);
        self.choices.iter().position(|choice| choice.value == value)
    }

    pub fn selected_label(&self, settings: &Settings) -> Option<&str> {
        self.selected_index(settings)
            .map(|index| self.choices[index].label.as_str())
    }

    /// Stores the value of the choice at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::ChoiceOutOfRange`] for an index past the end.
    pub fn select_index(&self, settings: &mut Settings, index: usize) -> Result<bool, ItemError> {
        let choice = self.choices.get(index).ok_or(ItemError::ChoiceOutOfRange {
            index,
            len: self.choices.len(),
        })?;
        Ok(self.setting.set(settings, choice.value))
    }
}

/// A date-time option stored as `YYYY-MM-DD HH:MM:SS` text.
#[derive(Debug, Clone, PartialEq)]
pub struct DateTimeItem {
    pub setting: SettingRef,
    pub title: String,
    pub description: Option<String>,
    pub default: String,
}

impl DateTimeItem {
    pub fn value(&self, settings: &Settings) -> String {
        self.setting
            .get(settings)
            .map_or_else(|| self.default.clone(), Setting::value_as_string)
    }

    /// The stored value parsed, if it is a valid date-time.
    pub fn date_time(&self, settings: &Settings) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.value(settings), DATE_TIME_FORMAT).ok()
    }

    /// Stores `text` after checking it is a valid date-time.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::InvalidDateTime`] when `text` does not match
    /// [`DATE_TIME_FORMAT`].
    pub fn set_value(&self, settings: &mut Settings, text: &str) -> Result<bool, ItemError> {
        let parsed = NaiveDateTime::parse_from_str(text.trim(), DATE_TIME_FORMAT)
            .map_err(|_| ItemError::InvalidDateTime(text.to_string()))?;
        Ok(self.set_date_time(settings, parsed))
    }

    pub fn set_date_time(&self, settings: &mut Settings, value: NaiveDateTime) -> bool {
        self.setting
            .set(settings, value.format(DATE_TIME_FORMAT).to_string())
    }
}

/// A controller binding stored as raw text.
#[derive(Debug, Clone, PartialEq)]
pub struct InputBindingItem {
    pub setting: SettingRef,
    pub title: String,
}

impl InputBindingItem {
    /// The binding, or an empty string when unbound.
    pub fn value(&self, settings: &Settings) -> String {
        self.setting
            .get(settings)
            .map(Setting::value_as_string)
            .unwrap_or_default()
    }

    /// Stores `binding` verbatim.
    ///
    /// The value is written as a string even if it looks numeric, so what the
    /// user bound is exactly what the core reads.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::Setting`] for a binding that cannot be stored as
    /// one INI line (empty, multi-line, or padded with whitespace).
    pub fn set_binding(&self, settings: &mut Settings, binding: &str) -> Result<bool, ItemError> {
        let setting = &self.setting;
        Ok(settings.try_set(&setting.file, &setting.section, &setting.key, binding)?)
    }
}

// ── SettingsItem ──────────────────────────────────────────────────────────────

/// One row of a settings screen.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsItem {
    Header(HeaderItem),
    Submenu(SubmenuItem),
    CheckBox(CheckBoxItem),
    Slider(SliderItem),
    SingleChoice(SingleChoiceItem),
    DateTime(DateTimeItem),
    InputBinding(InputBindingItem),
}

impl SettingsItem {
    pub fn title(&self) -> &str {
        match self {
            Self::Header(item) => &item.title,
            Self::Submenu(item) => &item.title,
            Self::CheckBox(item) => &item.title,
            Self::Slider(item) => &item.title,
            Self::SingleChoice(item) => &item.title,
            Self::DateTime(item) => &item.title,
            Self::InputBinding(item) => &item.title,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::CheckBox(item) => item.description.as_deref(),
            Self::Slider(item) => item.description.as_deref(),
            Self::SingleChoice(item) => item.description.as_deref(),
            Self::DateTime(item) => item.description.as_deref(),
            Self::Header(_) | Self::Submenu(_) | Self::InputBinding(_) => None,
        }
    }

    /// The setting this row edits; `None` for headers and submenus.
    pub fn setting(&self) -> Option<&SettingRef> {
        match self {
            Self::CheckBox(item) => Some(&item.setting),
            Self::Slider(item) => Some(&item.setting),
            Self::SingleChoice(item) => Some(&item.setting),
            Self::DateTime(item) => Some(&item.setting),
            Self::InputBinding(item) => Some(&item.setting),
            Self::Header(_) | Self::Submenu(_) => None,
        }
    }

    /// Short name of the row kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Header(_) => "header",
            Self::Submenu(_) => "submenu",
            Self::CheckBox(_) => "checkbox",
            Self::Slider(_) => "slider",
            Self::SingleChoice(_) => "single-choice",
            Self::DateTime(_) => "date-time",
            Self::InputBinding(_) => "input-binding",
        }
    }

    /// The row's current value as display text; `None` for headers and
    /// submenus.
    pub fn display_value(&self, settings: &Settings) -> Option<String> {
        match self {
            Self::Header(_) | Self::Submenu(_) => None,
            Self::CheckBox(item) => Some(if item.is_checked(settings) { "on" } else { "off" }.to_string()),
            Self::Slider(item) => Some(item.display(settings)),
            Self::SingleChoice(item) => Some(
                item.selected_label(settings)
                    .map_or_else(|| item.selected_value(settings).to_string(), str::to_string),
            ),
            Self::DateTime(item) => Some(item.value(settings)),
            Self::InputBinding(item) => Some(item.value(settings)),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
