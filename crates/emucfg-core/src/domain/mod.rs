//! Domain entities for emucfg.
//!
//! This module contains the typed settings model with no file-system or UI
//! dependencies.
//!
//! # How the model fits together (for beginners)
//!
//! The emulator core reads INI files made of named sections, each holding
//! `key=value` lines.  The domain mirrors that shape with three nested types:
//!
//! ```text
//! Settings                       one per front-end session
//!  └─ FileId ──► SectionMap      global config or a per-game override
//!                 └─ name ──► SettingSection
//!                              └─ key ──► Setting { value: Int | Float | Str }
//! ```
//!
//! Code in outer layers (the INI codec, the session, the CLI) depends on these
//! types, but the domain never depends on them.  That keeps it trivially
//! testable.

/// Well-known section and key names.
pub mod keys;
/// `SettingSection` and the lazily-populated `SectionMap`.
pub mod section;
/// `Setting`, `SettingValue` and `FileId`.
pub mod setting;
/// The `Settings` aggregate keyed by file identifier.
pub mod settings;
/// Checks for text that cannot be stored in an INI file.
pub mod validate;

use thiserror::Error;

/// Errors raised when the domain invariants are violated.
#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    /// A setting was stored under a section it does not belong to.
    #[error("setting `{key}` belongs to section `{expected}`, not `{found}`")]
    SectionMismatch {
        key: String,
        expected: String,
        found: String,
    },

    /// A setting was stored under a file it does not belong to.
    #[error("setting `{key}` belongs to file `{expected}`, not `{found}`")]
    FileMismatch {
        key: String,
        expected: String,
        found: String,
    },

    /// A section name that would not read back as the same header.
    #[error("invalid section name {name:?}: {reason}")]
    InvalidSectionName { name: String, reason: &'static str },

    /// A key that would not read back as the same key.
    #[error("invalid key {key:?}: {reason}")]
    InvalidKey { key: String, reason: &'static str },

    /// A value that would not read back as the same value.
    #[error("invalid value for {key:?}: {reason}")]
    InvalidValue { key: String, reason: &'static str },
}
