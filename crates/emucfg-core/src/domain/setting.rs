//! A single typed setting and the identifier of the file it lives in.
//!
//! # Value coercion
//!
//! INI files carry no type information, so every value is guessed from its
//! text in a fixed order:
//!
//! 1. a 32-bit signed integer (`1`, `-4`, `+7`),
//! 2. a finite 32-bit float (`1.5`, `1.0`, `2e3`),
//! 3. otherwise the raw string (`engine:keyboard,code:65`).
//!
//! Boolean-like options (`use_cpu_jit=1`) therefore become integers.

use std::fmt;

use serde::Serialize;

/// Logical settings file a setting belongs to.
///
/// `Config` is the global file read by the emulator core at start-up;
/// `Game` holds per-game overrides keyed by the game's identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileId {
    /// The global configuration file.
    Config,
    /// A per-game override file.
    Game(String),
}

impl FileId {
    /// Logical name of the global configuration file.
    pub const CONFIG_FILE_NAME: &'static str = "config";

    /// The file name without directory or `.ini` extension.
    pub fn file_name(&self) -> &str {
        match self {
            Self::Config => Self::CONFIG_FILE_NAME,
            Self::Game(game_id) => game_id,
        }
    }

    /// Returns the game identifier for per-game files.
    pub fn game_id(&self) -> Option<&str> {
        match self {
            Self::Config => None,
            Self::Game(game_id) => Some(game_id),
        }
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.ini", self.file_name())
    }
}

/// The typed value of a [`Setting`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    Int(i32),
    Float(f32),
    Str(String),
}

impl SettingValue {
    /// Coerces raw INI text into a typed value: integer, then float, then string.
    ///
    /// Non-finite floats (`nan`, `inf`) stay strings so they are written back
    /// exactly as they were read.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use emucfg_core::SettingValue;
    ///
    /// assert_eq!(SettingValue::coerce("1"), SettingValue::Int(1));
    /// assert_eq!(SettingValue::coerce("0.5"), SettingValue::Float(0.5));
    /// assert_eq!(SettingValue::coerce("auto"), SettingValue::Str("auto".into()));
    /// ```
    pub fn coerce(raw: &str) -> Self {
        if let Ok(value) = raw.parse::<i32>() {
            return Self::Int(value);
        }
        match raw.parse::<f32>() {
            Ok(value) if value.is_finite() => Self::Float(value),
            _ => Self::Str(raw.to_string()),
        }
    }

    /// Returns the integer payload, if this is an integer value.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the float payload, if this is a float value.
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the string payload, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Returns `true` when both values have the same variant.
    pub fn same_kind(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl fmt::Display for SettingValue {
    /// Formats the value the way it is written to an INI file.
    ///
    /// Integral floats keep a trailing `.0` so `1.0` reads back as a float
    /// instead of collapsing into the integer `1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) if value.fract() == 0.0 => write!(f, "{value:.1}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Str(value) => f.write_str(value),
        }
    }
}

impl From<i32> for SettingValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<f32> for SettingValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

/// One typed key/value pair.
///
/// The identity (`key`, `section`, `file`) is fixed at construction; only the
/// value can change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Setting {
    key: String,
    section: String,
    file: FileId,
    value: SettingValue,
}

impl Setting {
    /// Creates a setting for `key` in `section` of `file`.
    pub fn new(
        key: impl Into<String>,
        section: impl Into<String>,
        file: FileId,
        value: impl Into<SettingValue>,
    ) -> Self {
        Self {
            key: key.into(),
            section: section.into(),
            file,
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn file(&self) -> &FileId {
        &self.file
    }

    pub fn value(&self) -> &SettingValue {
        &self.value
    }

    /// Replaces the value, returning `true` if it differs from the old one.
    pub fn set_value(&mut self, value: impl Into<SettingValue>) -> bool {
        let value = value.into();
        let changed = self.value != value;
        self.value = value;
        changed
    }

    /// The value as it appears on the right-hand side of `key=value`.
    pub fn value_as_string(&self) -> String {
        self.value.to_string()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
