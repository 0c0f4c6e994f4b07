//! emucfg command-line front-end.
//!
//! Inspects and edits the emulator's settings files from a terminal, using the
//! same session, worker and menu definitions a graphical front-end would.
//!
//! # Usage
//!
//! ```text
//! emucfg [OPTIONS] <COMMAND>
//!
//! Commands:
//!   show [--json]                 Print the settings file
//!   get  <SECTION> <KEY>          Print one value
//!   set  <SECTION> <KEY> <VALUE>  Store one value and save
//!   menu <TAG>                    Print a settings screen with current values
//!   path                          Print the settings file path
//!   set-user-dir <DIR>            Remember DIR in the front-end's config.toml
//!
//! Options:
//!   --user-dir <DIR>  Emulator user directory [env: EMUCFG_USER_DIR]
//!   --game <ID>       Edit a game's overrides instead of config.ini [env: EMUCFG_GAME]
//! ```
//!
//! When `--user-dir` is absent the `user_directory` field of the front-end's
//! own `config.toml` is used.  The log level comes from `RUST_LOG`, falling
//! back to that file's `log_level`.  `set-user-dir` writes that field so later
//! runs need no `--user-dir`.
//!
//! # Architecture overview
//!
//! ```text
//! main()
//!  └─ load FrontendConfig        -- infrastructure::storage::config
//!  └─ SettingsWorker             -- blocking .ini I/O on the tokio pool
//!       └─ IniFileRepository     -- <user>/config, <user>/GameSettings
//!  └─ SettingsSession            -- load once, edit, save on stop
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use emucfg_core::{ini, SectionMap, SettingValue};
use emucfg_frontend::application::menus::{build_menu, screen_title, MenuTag};
use emucfg_frontend::application::session::{SaveOutcome, SettingsSession};
use emucfg_frontend::infrastructure::console::{ConsoleView, LoggingCore};
use emucfg_frontend::infrastructure::storage::config::{self, FrontendConfig};
use emucfg_frontend::infrastructure::storage::{DirectoryLayout, IniFileRepository};
use emucfg_frontend::infrastructure::worker::SettingsWorker;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Inspect and edit emulator settings files.
#[derive(Debug, Parser)]
#[command(name = "emucfg", about = "Typed editor for emulator INI settings", version)]
struct Cli {
    /// Emulator user directory containing `config/` and `GameSettings/`.
    #[arg(long, env = "EMUCFG_USER_DIR")]
    user_dir: Option<PathBuf>,

    /// Game identifier; selects `GameSettings/<ID>.ini` instead of `config.ini`.
    #[arg(long, env = "EMUCFG_GAME")]
    game: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the settings file.
    Show {
        /// Print JSON instead of INI text.
        #[arg(long)]
        json: bool,
    },
    /// Print one value.
    Get { section: String, key: String },
    /// Store one value and save the file.
    Set {
        section: String,
        key: String,
        value: String,
    },
    /// Print a settings screen with its current values.
    Menu { tag: MenuTag },
    /// Print the path of the settings file.
    Path,
    /// Store the emulator user directory in the front-end's config.toml.
    SetUserDir { dir: PathBuf },
}

impl Cli {
    /// Resolves the user directory from the CLI, then the front-end config.
    ///
    /// # Errors
    ///
    /// Returns an error when neither source names a directory.
    fn user_dir(&self, config: &FrontendConfig) -> anyhow::Result<PathBuf> {
        self.user_dir
            .clone()
            .or_else(|| config.user_directory.clone())
            .context("no user directory: pass --user-dir, set EMUCFG_USER_DIR, or set user_directory in config.toml")
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, config_error) = match config::load_config() {
        Ok(config) => (config, None),
        Err(e) => (FrontendConfig::default(), Some(e)),
    };

    // `RUST_LOG` wins over the config file.  Logs go to stderr so command
    // output on stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str())),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Some(e) = &config_error {
        warn!("ignoring front-end config: {e}");
    }

    if let Command::SetUserDir { dir } = &cli.command {
        // Never replace a config.toml that could not be read.
        if let Some(e) = config_error {
            return Err(e).context("not overwriting the front-end config");
        }
        let dir = dir
            .canonicalize()
            .with_context(|| format!("user directory {} is not accessible", dir.display()))?;
        let config = FrontendConfig {
            user_directory: Some(dir.clone()),
            ..config
        };
        config::save_config(&config).context("saving the front-end config")?;
        println!("user directory set to {}", dir.display());
        return Ok(());
    }

    let layout = DirectoryLayout::new(cli.user_dir(&config)?);
    let mut session = SettingsSession::for_game(cli.game.as_deref());
    let file = session.file().clone();
    let path = layout.settings_path(&file)?;
    debug!("editing {}", path.display());

    if let Command::Path = cli.command {
        println!("{}", path.display());
        return Ok(());
    }

    let worker = SettingsWorker::new(Arc::new(IniFileRepository::new(layout)));
    let view = ConsoleView;
    let sections = worker.load_session(&mut session, &view).await;

    match cli.command {
        Command::Show { json } => {
            if json {
                let values = section_values(sections);
                println!("{}", serde_json::to_string_pretty(&values).context("encoding settings as JSON")?);
            } else {
                print!("{}", ini::serialize(sections));
            }
        }
        Command::Get { section, key } => {
            let setting = sections
                .setting(&section, &key)
                .with_context(|| format!("{key} is not set in [{section}] of {file}"))?;
            println!("{}", setting.value_as_string());
        }
        Command::Set {
            section,
            key,
            value,
        } => {
            let changed = session
                .edit(|settings| settings.try_set(&file, &section, &key, SettingValue::coerce(&value)))
                .with_context(|| format!("cannot store {key} in [{section}]"))?;
            if !changed {
                println!("{key} is already {value}");
            }
            if worker.stop_session(&mut session, true, &view, &LoggingCore).await == SaveOutcome::Failed {
                anyhow::bail!("could not save {file}");
            }
        }
        Command::Menu { tag } => {
            println!("{}", screen_title(tag, &file));
            for item in build_menu(tag, &file) {
                match item.display_value(session.settings()) {
                    Some(value) => println!("  {:<28} {value}", item.title()),
                    None => println!("{}", item.title()),
                }
            }
        }
        Command::Path | Command::SetUserDir { .. } => {}
    }

    Ok(())
}

/// `section -> key -> value` view used for JSON output.
fn section_values(sections: &SectionMap) -> BTreeMap<&str, BTreeMap<&str, &SettingValue>> {
    sections
        .sections()
        .map(|section| {
            let values = section
                .settings()
                .map(|setting| (setting.key(), setting.value()))
                .collect();
            (section.name(), values)
        })
        .collect()
}
