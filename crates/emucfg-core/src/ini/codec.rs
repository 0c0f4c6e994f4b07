//! Line-oriented codec for the emulator's INI settings files.
//!
//! Text format:
//! ```text
//! [Core]
//! use_cpu_jit=1
//!
//! [Renderer]
//! resolution_factor=2
//! bg_red=0.0
//! ```
//!
//! - `[Name]` opens a section.  Re-opening a name starts that section over.
//! - `key=value` is split on the first `=`; key and value are trimmed.
//! - Lines before the first header are ignored.  Blank lines are ignored.
//! - A line with no `=`, an empty key or an empty value is skipped with a
//!   warning.  Parsing never fails.
//!
//! There is no comment, quoting or escaping syntax: the emulator core reads
//! the same files and expects plain `key=value` text.

use std::fmt::Write as _;

use tracing::warn;

use crate::domain::section::{SectionMap, SettingSection};
use crate::domain::setting::{FileId, Setting, SettingValue};

/// Why a line was dropped by [`parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The line has no `=`.
    MissingSeparator,
    /// Nothing before the `=`.
    EmptyKey,
    /// Nothing after the `=`.
    EmptyValue,
}

/// A line dropped by [`parse`], kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number.
    pub line_number: usize,
    pub text: String,
    pub reason: SkipReason,
}

/// Result of parsing one file: the sections plus any dropped lines.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFile {
    pub sections: SectionMap,
    pub skipped: Vec<SkippedLine>,
}

impl ParsedFile {
    pub fn into_sections(self) -> SectionMap {
        self.sections
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Parses INI `text` into the sections of `file`.
///
/// # Examples
///
/// ```rust
/// use emucfg_core::{ini, FileId, SettingValue};
///
/// let parsed = ini::parse("[Core]\nuse_cpu_jit=1\n", &FileId::Config);
/// let setting = parsed.sections.setting("Core", "use_cpu_jit").unwrap();
/// assert_eq!(setting.value(), &SettingValue::Int(1));
/// ```
pub fn parse(text: &str, file: &FileId) -> ParsedFile {
    let mut sections = SectionMap::new(file.clone());
    let mut skipped = Vec::new();
    let mut current: Option<SettingSection> = None;

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(name) = section_header(line) {
            if let Some(done) = current.take() {
                store_section(&mut sections, done);
            }
            current = Some(SettingSection::new(name, file.clone()));
            continue;
        }

        // Lines before the first header have nowhere to go.
        let Some(section) = current.as_mut() else {
            continue;
        };

        match setting_from_line(section, line) {
            Ok(setting) => {
                // Identity comes from `section`, so this cannot mismatch.
                let _ = section.put_setting(setting);
            }
            Err(reason) => {
                warn!("skipping invalid config line {} in {file}: \"{line}\" ({reason:?})", index + 1);
                skipped.push(SkippedLine {
                    line_number: index + 1,
                    text: line.to_string(),
                    reason,
                });
            }
        }
    }

    if let Some(done) = current.take() {
        store_section(&mut sections, done);
    }

    ParsedFile { sections, skipped }
}

/// Serializes `sections` to INI text.
///
/// Sections are written in name order, settings in key order, with a blank
/// line between sections.  Empty sections are omitted.
pub fn serialize(sections: &SectionMap) -> String {
    let mut out = String::new();
    for section in sections.sections().filter(|s| !s.is_empty()) {
        if !out.is_empty() {
            out.push('\n');
        }
        // Writing into a String cannot fail.
        let _ = writeln!(out, "[{}]", section.name());
        for setting in section.settings() {
            let _ = writeln!(out, "{}={}", setting.key(), setting.value());
        }
    }
    out
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Returns the section name if `line` is a `[Name]` header.
fn section_header(line: &str) -> Option<&str> {
    line.strip_prefix('[')?.strip_suffix(']')
}

fn store_section(sections: &mut SectionMap, section: SettingSection) {
    // Sections are built for the map's own file.
    let _ = sections.insert(section);
}

fn setting_from_line(section: &SettingSection, line: &str) -> Result<Setting, SkipReason> {
    let (key, value) = line.split_once('=').ok_or(SkipReason::MissingSeparator)?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() {
        return Err(SkipReason::EmptyKey);
    }
    if value.is_empty() {
        return Err(SkipReason::EmptyValue);
    }

    Ok(Setting::new(
        key,
        section.name(),
        section.file().clone(),
        SettingValue::coerce(value),
    ))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
