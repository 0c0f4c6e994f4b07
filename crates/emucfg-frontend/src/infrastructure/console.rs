//! Terminal implementations of the session's user-facing ports.

use std::io::Write;

use emucfg_core::FileId;
use tracing::{info, warn};

use crate::application::repository::{EmulationCore, SettingsView};

/// Prints session messages to stdout.
#[derive(Debug, Default)]
pub struct ConsoleView;

impl SettingsView for ConsoleView {
    fn on_settings_file_not_found(&self, file: &FileId) {
        warn!("{file} not found; starting from defaults");
    }

    fn show_message(&self, message: &str, _long: bool) {
        let mut stdout = std::io::stdout().lock();
        // A closed stdout is not worth failing the save over.
        let _ = writeln!(stdout, "{message}");
    }
}

/// Stand-in for a running core when the front-end runs on its own.
///
/// There is no emulator process to notify, so a reload request is only
/// logged.
#[derive(Debug, Default)]
pub struct LoggingCore;

impl EmulationCore for LoggingCore {
    fn reload_settings(&self) {
        info!("settings changed; the emulator reloads them on next start");
    }
}
