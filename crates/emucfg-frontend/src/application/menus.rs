//! Settings screens and the rows they show.
//!
//! A [`MenuTag`] names a screen.  [`build_menu`] returns that screen's rows for
//! one settings file; the rows are bound to the file passed in, so the same
//! screen edits either the global configuration or a per-game override.

use std::fmt;
use std::str::FromStr;

use emucfg_core::keys::*;
use emucfg_core::FileId;

use super::items::{
    CheckBoxItem, Choice, DateTimeItem, HeaderItem, InputBindingItem, SettingRef, SettingsItem,
    SingleChoiceItem, SliderItem, SliderStorage, SubmenuItem,
};

/// Default value of the emulated system clock.
pub const DEFAULT_INIT_TIME: &str = "2000-01-01 00:00:01";

/// A settings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuTag {
    Config,
    Core,
    System,
    Controls,
    Renderer,
    Audio,
}

impl MenuTag {
    pub const ALL: [MenuTag; 6] = [
        MenuTag::Config,
        MenuTag::Core,
        MenuTag::System,
        MenuTag::Controls,
        MenuTag::Renderer,
        MenuTag::Audio,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Config => "Settings",
            Self::Core => "General",
            Self::System => "System",
            Self::Controls => "Controls",
            Self::Renderer => "Graphics",
            Self::Audio => "Audio",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Core => "core",
            Self::System => "system",
            Self::Controls => "controls",
            Self::Renderer => "renderer",
            Self::Audio => "audio",
        }
    }
}

impl fmt::Display for MenuTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no menu.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown menu `{0}`")]
pub struct UnknownMenu(pub String);

impl FromStr for MenuTag {
    type Err = UnknownMenu;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownMenu(s.to_string()))
    }
}

/// Title bar text for `tag` when editing `file`.
pub fn screen_title(tag: MenuTag, file: &FileId) -> String {
    match file.game_id() {
        Some(game_id) => format!("Game Settings: {game_id}"),
        None => tag.title().to_string(),
    }
}

/// Builds the rows of `tag` bound to `file`.
pub fn build_menu(tag: MenuTag, file: &FileId) -> Vec<SettingsItem> {
    let rows = MenuRows { file };
    match tag {
        MenuTag::Config => config_menu(),
        MenuTag::Core => rows.core(),
        MenuTag::System => rows.system(),
        MenuTag::Controls => rows.controls(),
        MenuTag::Renderer => rows.renderer(),
        MenuTag::Audio => rows.audio(),
    }
}

fn config_menu() -> Vec<SettingsItem> {
    [
        MenuTag::Core,
        MenuTag::System,
        MenuTag::Controls,
        MenuTag::Renderer,
        MenuTag::Audio,
    ]
    .into_iter()
    .map(|menu| {
        SettingsItem::Submenu(SubmenuItem {
            title: menu.title().to_string(),
            menu,
        })
    })
    .collect()
}

// ── Row builders ──────────────────────────────────────────────────────────────

struct MenuRows<'a> {
    file: &'a FileId,
}

impl MenuRows<'_> {
    fn setting(&self, section: &str, key: &str) -> SettingRef {
        SettingRef::new(self.file.clone(), section, key)
    }

    fn check_box(&self, section: &str, key: &str, title: &str, description: &str, default: bool) -> SettingsItem {
        SettingsItem::CheckBox(CheckBoxItem {
            setting: self.setting(section, key),
            title: title.to_string(),
            description: Some(description.to_string()),
            default,
        })
    }

    fn binding(&self, key: &str, title: &str) -> SettingsItem {
        SettingsItem::InputBinding(InputBindingItem {
            setting: self.setting(SECTION_CONTROLS, key),
            title: title.to_string(),
        })
    }

    fn core(&self) -> Vec<SettingsItem> {
        vec![
            self.check_box(
                SECTION_CORE,
                KEY_CPU_JIT,
                "Enable CPU JIT",
                "Use the JIT compiler for the emulated CPU.",
                true,
            ),
            self.check_box(
                SECTION_RENDERER,
                KEY_FRAME_LIMIT_ENABLED,
                "Limit Speed",
                "Limit emulation speed to a percentage of normal speed.",
                true,
            ),
            SettingsItem::Slider(SliderItem {
                setting: self.setting(SECTION_RENDERER, KEY_FRAME_LIMIT),
                title: "Limit Speed Percent".to_string(),
                description: Some("Percentage of normal speed to run at.".to_string()),
                min: 0,
                max: 200,
                units: "%".to_string(),
                default: 100,
                storage: SliderStorage::Integer,
            }),
        ]
    }

    fn system(&self) -> Vec<SettingsItem> {
        let region = [
            ("Auto-select", -1),
            ("JPN", 0),
            ("USA", 1),
            ("EUR", 2),
            ("AUS", 3),
            ("CHN", 4),
            ("KOR", 5),
            ("TWN", 6),
        ];
        let language = [
            ("Japanese", 0),
            ("English", 1),
            ("French", 2),
            ("German", 3),
            ("Italian", 4),
            ("Spanish", 5),
            ("Simplified Chinese", 6),
            ("Korean", 7),
            ("Dutch", 8),
            ("Portuguese", 9),
            ("Russian", 10),
            ("Traditional Chinese", 11),
        ];
        let clock = [("System Clock", 0), ("Fixed Time", 1)];

        vec![
            self.single_choice(KEY_REGION_VALUE, "Emulated Region", &region, -1),
            self.single_choice(KEY_LANGUAGE, "Emulated Language", &language, 1),
            self.single_choice(KEY_INIT_CLOCK, "Clock", &clock, 0),
            SettingsItem::DateTime(DateTimeItem {
                setting: self.setting(SECTION_SYSTEM, KEY_INIT_TIME),
                title: "System Clock".to_string(),
                description: Some("Start time used when the clock is fixed.".to_string()),
                default: DEFAULT_INIT_TIME.to_string(),
            }),
        ]
    }

    fn single_choice(&self, key: &str, title: &str, choices: &[(&str, i32)], default: i32) -> SettingsItem {
        SettingsItem::SingleChoice(SingleChoiceItem {
            setting: self.setting(SECTION_SYSTEM, key),
            title: title.to_string(),
            description: None,
            choices: choices
                .iter()
                .map(|&(label, value)| Choice::new(label, value))
                .collect(),
            default,
        })
    }

    fn controls(&self) -> Vec<SettingsItem> {
        let header = |title: &str| SettingsItem::Header(HeaderItem { title: title.to_string() });
        vec![
            header("Buttons"),
            self.binding(KEY_BUTTON_A, "A"),
            self.binding(KEY_BUTTON_B, "B"),
            self.binding(KEY_BUTTON_X, "X"),
            self.binding(KEY_BUTTON_Y, "Y"),
            self.binding(KEY_BUTTON_SELECT, "Select"),
            self.binding(KEY_BUTTON_START, "Start"),
            header("Circle Pad"),
            self.binding(KEY_CIRCLEPAD_AXIS_VERTICAL, "Up/Down"),
            self.binding(KEY_CIRCLEPAD_AXIS_HORIZONTAL, "Left/Right"),
            header("C-Stick"),
            self.binding(KEY_CSTICK_AXIS_VERTICAL, "Up/Down"),
            self.binding(KEY_CSTICK_AXIS_HORIZONTAL, "Left/Right"),
            header("D-Pad"),
            self.binding(KEY_DPAD_AXIS_VERTICAL, "Up/Down"),
            self.binding(KEY_DPAD_AXIS_HORIZONTAL, "Left/Right"),
            header("Triggers"),
            self.binding(KEY_BUTTON_L, "L"),
            self.binding(KEY_BUTTON_R, "R"),
            self.binding(KEY_BUTTON_ZL, "ZL"),
            self.binding(KEY_BUTTON_ZR, "ZR"),
        ]
    }

    fn renderer(&self) -> Vec<SettingsItem> {
        vec![
            self.check_box(
                SECTION_RENDERER,
                KEY_HW_RENDERER,
                "Hardware Renderer",
                "Render with the GPU instead of the CPU.",
                true,
            ),
            self.check_box(
                SECTION_RENDERER,
                KEY_HW_SHADER,
                "Hardware Shader",
                "Emulate shaders on the GPU.",
                true,
            ),
            self.check_box(
                SECTION_RENDERER,
                KEY_SHADERS_ACCURATE_MUL,
                "Accurate Multiplication",
                "Slower but more accurate shader multiplication.",
                false,
            ),
            SettingsItem::Slider(SliderItem {
                setting: self.setting(SECTION_RENDERER, KEY_RESOLUTION_FACTOR),
                title: "Internal Resolution".to_string(),
                description: Some("Multiple of the native resolution to render at.".to_string()),
                min: 1,
                max: 4,
                units: "x".to_string(),
                default: 1,
                storage: SliderStorage::Integer,
            }),
            self.check_box(
                SECTION_RENDERER,
                KEY_USE_VSYNC,
                "V-Sync",
                "Synchronise frames with the display refresh rate.",
                true,
            ),
            self.check_box(
                SECTION_RENDERER,
                KEY_FILTER_MODE,
                "Linear Filtering",
                "Smooth textures with linear filtering.",
                true,
            ),
        ]
    }

    fn audio(&self) -> Vec<SettingsItem> {
        vec![self.check_box(
            SECTION_AUDIO,
            KEY_ENABLE_AUDIO_STRETCHING,
            "Audio Stretching",
            "Stretch audio to reduce stuttering when emulation runs slow.",
            false,
        )]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
