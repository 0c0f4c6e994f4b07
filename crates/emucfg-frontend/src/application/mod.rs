//! Application layer of the settings front-end.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (the typed settings model in `emucfg_core`) and the infrastructure
//! (files on disk, the console, the background worker).
//!
//! Code in this layer:
//!
//! - **Orchestrates** domain objects to fulfil a user goal (e.g., "save the
//!   game's settings when the screen closes, then tell the core to reload").
//! - **Depends on abstractions** (traits in [`repository`]) rather than
//!   concrete implementations, so storage can be swapped without changing
//!   this code.
//! - **Contains no file system access** of its own.
//!
//! # Sub-modules
//!
//! - **`repository`**    – The ports: storage, user messages, core reload.
//! - **`settings_file`** – Reads and writes one file, turning storage errors
//!   into user-facing messages.
//! - **`session`**       – The lifecycle of one settings screen: load once,
//!   track edits, save on close.
//! - **`items`**         – Typed setting rows (checkbox, slider, choice, ...).
//! - **`menus`**         – Which rows each settings screen shows.

pub mod items;
pub mod menus;
pub mod repository;
pub mod session;
pub mod settings_file;
