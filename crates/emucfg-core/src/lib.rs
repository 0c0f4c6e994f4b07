//! # emucfg-core
//!
//! Shared library for emucfg containing the typed settings model and the INI
//! codec used to read and write the emulator core's configuration files.
//!
//! This crate does no file-system I/O of its own; it turns text into typed
//! settings and back.  The front-end crate decides where the text lives.
//!
//! # Architecture overview (for beginners)
//!
//! The emulator's native core is configured through INI files: a global
//! `config.ini` plus optional per-game override files.  A front-end lets the
//! user edit those files through typed settings screens, then writes them back
//! so the core picks the changes up.
//!
//! - **`domain`** – The typed model.  A [`Setting`] is one `key=value` pair
//!   whose value is an integer, a float or a string; settings are grouped into
//!   a [`SettingSection`], sections into a [`SectionMap`] per file, and files
//!   into the [`Settings`] aggregate.
//!
//! - **`ini`** – The codec.  [`ini::parse`] reads text into a [`SectionMap`],
//!   logging and skipping malformed lines; [`ini::serialize`] writes it back.

pub mod domain;
pub mod ini;

// Re-export the most-used types at the crate root so callers can write
// `emucfg_core::Setting` instead of `emucfg_core::domain::setting::Setting`.
pub use domain::keys;
pub use domain::section::{SectionMap, SettingSection};
pub use domain::setting::{FileId, Setting, SettingValue};
pub use domain::settings::Settings;
pub use domain::SettingsError;
