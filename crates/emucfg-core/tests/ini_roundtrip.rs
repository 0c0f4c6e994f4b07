//! Integration tests for the emucfg-core INI codec.
//!
//! These tests drive the public API end-to-end: text is parsed into the typed
//! model, edited through `Settings`, and serialized back.

use emucfg_core::{ini, keys, FileId, SectionMap, Setting, SettingValue, Settings};

/// A realistic global config as written by the emulator core.
const CONFIG_TEXT: &str = "\
[Audio]
enable_audio_stretching=1
output_engine=auto
volume=1.0

[Controls]
button_a=engine:keyboard,code:65
circlepad_axis_vertical=engine:analog_from_button,up:code$087

[Core]
use_cpu_jit=1

[Renderer]
bg_red=0.25
frame_limit=100
resolution_factor=2
use_frame_limit=1
";

fn parse_config(text: &str) -> SectionMap {
    ini::parse(text, &FileId::Config).into_sections()
}

#[test]
fn test_full_config_parses_every_section() {
    let sections = parse_config(CONFIG_TEXT);

    let names: Vec<&str> = sections.section_names().collect();
    assert_eq!(names, ["Audio", "Controls", "Core", "Renderer"]);
    assert_eq!(sections.section(keys::SECTION_RENDERER).unwrap().len(), 4);
}

#[test]
fn test_full_config_round_trips_byte_for_byte() {
    // The file is already in canonical order and formatting, so parsing and
    // serializing must reproduce it exactly.
    let sections = parse_config(CONFIG_TEXT);
    assert_eq!(ini::serialize(&sections), CONFIG_TEXT);
}

#[test]
fn test_written_then_read_back_has_identical_key_sets() {
    // Arrange
    let mut settings = Settings::new();
    let file = FileId::Game("0004000000055D00".to_string());
    settings
        .section_mut(&file, keys::SECTION_RENDERER)
        .set(keys::KEY_RESOLUTION_FACTOR, 3);
    settings
        .section_mut(&file, keys::SECTION_RENDERER)
        .set(keys::KEY_BACKGROUND_GREEN, 0.75_f32);
    settings
        .section_mut(&file, keys::SECTION_SYSTEM)
        .set(keys::KEY_INIT_TIME, "2015-06-01 12:00:00");

    // Act
    let text = ini::serialize(settings.file(&file).unwrap());
    let reread = ini::parse(&text, &file).into_sections();

    // Assert
    let original = settings.file(&file).unwrap();
    for section in original.sections() {
        let other = reread.section(section.name()).expect("section survives");
        let a: Vec<&str> = section.keys().collect();
        let b: Vec<&str> = other.keys().collect();
        assert_eq!(a, b, "key set of [{}]", section.name());
        for setting in section.settings() {
            assert_eq!(
                other.setting(setting.key()).map(Setting::value),
                Some(setting.value())
            );
        }
    }
}

#[test]
fn test_malformed_lines_do_not_reach_output() {
    let text = "[Core]\nuse_cpu_jit=1\nbroken line\nempty=\n";
    let parsed = ini::parse(text, &FileId::Config);

    assert_eq!(parsed.skipped.len(), 2);
    assert_eq!(ini::serialize(&parsed.sections), "[Core]\nuse_cpu_jit=1\n");
}

#[test]
fn test_edit_after_parse_is_reflected_in_output() {
    let mut sections = parse_config("[Core]\nuse_cpu_jit=1\n");

    let changed = sections.section_mut(keys::SECTION_CORE).set(keys::KEY_CPU_JIT, 0);

    assert!(changed);
    assert_eq!(ini::serialize(&sections), "[Core]\nuse_cpu_jit=0\n");
}

#[test]
fn test_float_ambiguity_is_preserved_as_float() {
    // "1.0" is not an integer, so it is stored as a float and written back
    // with its decimal point.
    let sections = parse_config("[Audio]\nvolume=1.0\n");

    assert_eq!(
        sections.setting("Audio", "volume").unwrap().value(),
        &SettingValue::Float(1.0)
    );
    assert_eq!(ini::serialize(&sections), "[Audio]\nvolume=1.0\n");
}

#[test]
fn test_entries_that_would_not_read_back_are_refused() {
    // Arrange
    let mut settings = Settings::new();
    settings.insert_file(parse_config(CONFIG_TEXT));

    // Act
    let split_key = settings.try_set(&FileId::Config, keys::SECTION_CORE, "a=b", 1);
    let injected_binding = settings.try_set(
        &FileId::Config,
        keys::SECTION_CONTROLS,
        keys::KEY_BUTTON_A,
        "x\n[Evil]\nuse_cpu_jit=0",
    );
    let injected_section = settings.try_set(&FileId::Config, "Core]\n[Evil", "k", 1);

    // Assert
    assert!(split_key.is_err());
    assert!(injected_binding.is_err());
    assert!(injected_section.is_err());
    let text = ini::serialize(settings.file(&FileId::Config).unwrap());
    assert_eq!(text, CONFIG_TEXT);
}

#[test]
fn test_accepted_entries_read_back_with_same_keys() {
    // Arrange
    let mut settings = Settings::new();
    let entries = [
        (keys::SECTION_CONTROLS, keys::KEY_BUTTON_A, SettingValue::from("engine:keyboard,code:65")),
        (keys::SECTION_CONTROLS, "[odd_key", SettingValue::Int(4)),
        ("Debug", "log_filter", SettingValue::from("*:Info Render.OpenGL:Debug")),
        (keys::SECTION_AUDIO, keys::KEY_VOLUME, SettingValue::Float(1.0e20)),
    ];
    for (section, key, value) in entries.clone() {
        settings.try_set(&FileId::Config, section, key, value).unwrap();
    }

    // Act
    let text = ini::serialize(settings.file(&FileId::Config).unwrap());
    let reread = parse_config(&text);

    // Assert
    for (section, key, value) in entries {
        let setting = reread.setting(section, key).unwrap_or_else(|| panic!("{section}/{key} lost"));
        assert_eq!(setting.value_as_string(), value.to_string());
    }
}
