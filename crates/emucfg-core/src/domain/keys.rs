//! Section and key names understood by the emulator core.
//!
//! These must match the names the core looks up in its own config reader
//! exactly; renaming one silently orphans the user's stored value.

// ── Sections ──────────────────────────────────────────────────────────────────

pub const SECTION_CORE: &str = "Core";
pub const SECTION_SYSTEM: &str = "System";
pub const SECTION_CONTROLS: &str = "Controls";
pub const SECTION_RENDERER: &str = "Renderer";
pub const SECTION_AUDIO: &str = "Audio";

/// Sections stored in the global `config` file, in menu order.
pub const CONFIG_SECTIONS: [&str; 5] = [
    SECTION_CORE,
    SECTION_SYSTEM,
    SECTION_CONTROLS,
    SECTION_RENDERER,
    SECTION_AUDIO,
];

// ── Core ──────────────────────────────────────────────────────────────────────

pub const KEY_CPU_JIT: &str = "use_cpu_jit";

// ── Renderer ──────────────────────────────────────────────────────────────────

pub const KEY_HW_RENDERER: &str = "use_hw_renderer";
pub const KEY_HW_SHADER: &str = "use_hw_shader";
pub const KEY_SHADERS_ACCURATE_MUL: &str = "shaders_accurate_mul";
pub const KEY_USE_SHADER_JIT: &str = "use_shader_jit";
pub const KEY_USE_VSYNC: &str = "use_vsync_new";
pub const KEY_RESOLUTION_FACTOR: &str = "resolution_factor";
pub const KEY_FRAME_LIMIT_ENABLED: &str = "use_frame_limit";
pub const KEY_FRAME_LIMIT: &str = "frame_limit";
pub const KEY_BACKGROUND_RED: &str = "bg_red";
pub const KEY_BACKGROUND_GREEN: &str = "bg_green";
pub const KEY_BACKGROUND_BLUE: &str = "bg_blue";
pub const KEY_FACTOR_3D: &str = "factor_3d";
pub const KEY_FILTER_MODE: &str = "filter_mode";

// ── Layout ────────────────────────────────────────────────────────────────────

pub const KEY_LAYOUT_OPTION: &str = "layout_option";
pub const KEY_SWAP_SCREEN: &str = "swap_screen";

// ── Audio ─────────────────────────────────────────────────────────────────────

pub const KEY_AUDIO_OUTPUT_ENGINE: &str = "output_engine";
pub const KEY_ENABLE_AUDIO_STRETCHING: &str = "enable_audio_stretching";
pub const KEY_VOLUME: &str = "volume";

// ── System ────────────────────────────────────────────────────────────────────

pub const KEY_USE_VIRTUAL_SD: &str = "use_virtual_sd";
pub const KEY_IS_NEW_3DS: &str = "is_new_3ds";
pub const KEY_REGION_VALUE: &str = "region_value";
pub const KEY_LANGUAGE: &str = "language";
pub const KEY_INIT_CLOCK: &str = "init_clock";
pub const KEY_INIT_TIME: &str = "init_time";

// ── Controls ──────────────────────────────────────────────────────────────────

pub const KEY_BUTTON_A: &str = "button_a";
pub const KEY_BUTTON_B: &str = "button_b";
pub const KEY_BUTTON_X: &str = "button_x";
pub const KEY_BUTTON_Y: &str = "button_y";
pub const KEY_BUTTON_SELECT: &str = "button_select";
pub const KEY_BUTTON_START: &str = "button_start";
pub const KEY_BUTTON_UP: &str = "button_up";
pub const KEY_BUTTON_DOWN: &str = "button_down";
pub const KEY_BUTTON_LEFT: &str = "button_left";
pub const KEY_BUTTON_RIGHT: &str = "button_right";
pub const KEY_BUTTON_L: &str = "button_l";
pub const KEY_BUTTON_R: &str = "button_r";
pub const KEY_BUTTON_ZL: &str = "button_zl";
pub const KEY_BUTTON_ZR: &str = "button_zr";
pub const KEY_CIRCLEPAD_AXIS_VERTICAL: &str = "circlepad_axis_vertical";
pub const KEY_CIRCLEPAD_AXIS_HORIZONTAL: &str = "circlepad_axis_horizontal";
pub const KEY_CSTICK_AXIS_VERTICAL: &str = "cstick_axis_vertical";
pub const KEY_CSTICK_AXIS_HORIZONTAL: &str = "cstick_axis_horizontal";
pub const KEY_DPAD_AXIS_VERTICAL: &str = "dpad_axis_vertical";
pub const KEY_DPAD_AXIS_HORIZONTAL: &str = "dpad_axis_horizontal";

// ── Camera ────────────────────────────────────────────────────────────────────

pub const KEY_CAMERA_OUTER_RIGHT_NAME: &str = "camera_outer_right_name";
pub const KEY_CAMERA_OUTER_RIGHT_CONFIG: &str = "camera_outer_right_config";
pub const KEY_CAMERA_OUTER_RIGHT_FLIP: &str = "camera_outer_right_flip";
pub const KEY_CAMERA_OUTER_LEFT_FLIP: &str = "camera_outer_left_flip";
pub const KEY_CAMERA_INNER_NAME: &str = "camera_inner_name";
pub const KEY_CAMERA_INNER_CONFIG: &str = "camera_inner_config";
pub const KEY_CAMERA_INNER_FLIP: &str = "camera_inner_flip";

// ── Miscellaneous ─────────────────────────────────────────────────────────────

pub const KEY_LOG_FILTER: &str = "log_filter";
