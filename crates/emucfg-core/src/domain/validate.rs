//! Checks that a section, key or value survives a write/read cycle.
//!
//! The INI format has no quoting or escaping, so some text cannot be stored
//! at all: a newline splits one entry into two lines, an `=` in a key moves
//! the split point, and surrounding whitespace is trimmed on read.  Anything
//! that enters the model from outside (the command line, an input binding)
//! goes through these checks before it is stored.

use super::setting::SettingValue;
use super::SettingsError;

fn has_line_break(text: &str) -> bool {
    text.contains(['\n', '\r'])
}

fn has_surrounding_whitespace(text: &str) -> bool {
    text.trim() != text
}

/// Checks that `name` is written and read back as the same `[name]` header.
///
/// # Errors
///
/// Returns [`SettingsError::InvalidSectionName`] for an empty name, a line
/// break, or a bracket.
pub fn section_name(name: &str) -> Result<(), SettingsError> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if has_line_break(name) {
        "name contains a line break"
    } else if name.contains(['[', ']']) {
        "name contains a bracket"
    } else {
        return Ok(());
    };
    Err(SettingsError::InvalidSectionName {
        name: name.to_string(),
        reason,
    })
}

/// Checks that `key=value` is written and read back as the same entry.
///
/// # Errors
///
/// Returns [`SettingsError::InvalidKey`] or [`SettingsError::InvalidValue`]
/// naming the first problem found.
pub fn entry(key: &str, value: &SettingValue) -> Result<(), SettingsError> {
    let invalid_key = |reason| {
        Err(SettingsError::InvalidKey {
            key: key.to_string(),
            reason,
        })
    };
    if key.is_empty() {
        return invalid_key("key is empty");
    }
    if has_line_break(key) {
        return invalid_key("key contains a line break");
    }
    if key.contains('=') {
        return invalid_key("key contains `=`");
    }
    if has_surrounding_whitespace(key) {
        return invalid_key("key has leading or trailing whitespace");
    }

    let text = value.to_string();
    let invalid_value = |reason| {
        Err(SettingsError::InvalidValue {
            key: key.to_string(),
            reason,
        })
    };
    if text.is_empty() {
        return invalid_value("value is empty");
    }
    if has_line_break(&text) {
        return invalid_value("value contains a line break");
    }
    if has_surrounding_whitespace(&text) {
        return invalid_value("value has leading or trailing whitespace");
    }
    // `[k=v]` would read back as a section header.
    if key.starts_with('[') && text.ends_with(']') {
        return invalid_key("entry would read back as a section header");
    }
    Ok(())
}
