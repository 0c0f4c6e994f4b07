//! Storage infrastructure: everything that touches the file system.
//!
//! - `layout`         – Where each settings file lives under the user directory.
//! - `ini_repository` – The [`SettingsRepository`](crate::application::repository::SettingsRepository)
//!   backed by `.ini` files.
//! - `config`         – The front-end's own TOML configuration.

pub mod config;
pub mod ini_repository;
pub mod layout;

pub use ini_repository::IniFileRepository;
pub use layout::DirectoryLayout;
