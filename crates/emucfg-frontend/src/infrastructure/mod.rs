//! Infrastructure layer of the settings front-end.
//!
//! Contains the OS-facing adapters: `.ini` storage, the front-end's own TOML
//! config, the blocking-I/O worker and the console implementations of the
//! user-facing ports.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `emucfg_core`, but MUST NOT be imported by the `application` or domain
//! layers.

pub mod console;
pub mod storage;
pub mod worker;
