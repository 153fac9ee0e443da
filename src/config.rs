//! Application-level configuration constants.

// Request defaults
pub const DEFAULT_DURATION_MS: u32 = 6_500;
pub const DEFAULT_DISSOLVE_MS: u32 = 0;
pub const DEFAULT_ICON_BACKGROUND_COLOR: &str = "#8BC34A";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#2E7D32";
pub const DEFAULT_TEXT_COLOR: &str = "#FFFFFF";
pub const DEFAULT_SHADOW_COLOR: &str = "rgba(0,0,0,0.3)";

// Geometry
pub const FIXED_WIDTH_PX: u32 = 400;
pub const MIN_FLOATING_WIDTH_PX: u32 = 300;
pub const VIEWPORT_MARGIN_PX: u32 = 40;
pub const EDGE_OFFSET_PX: u32 = 20;
pub const CARD_HEIGHT_PX: u32 = 80;
pub const STACK_GAP_PX: u32 = 10;
pub const OVERLAY_Z_INDEX: u32 = 10_000;

// Animation (milliseconds unless noted)
pub const SLIDE_IN_DELAY_MS: u32 = 50;
pub const SLIDE_IN_MS: u32 = 800;
pub const FADE_FLOATING_MS: u32 = 800;
pub const FADE_INLINE_MS: u32 = 600;
pub const TEXT_FADE_MS: u32 = 600;
pub const ICON_PULSE_MS: u32 = 800;
/// Browser timers take an `i32` delay, and removal lands at dissolve + fade.
pub const MAX_SCHEDULE_MS: u32 = i32::MAX as u32 - FADE_FLOATING_MS;

// Fractions of the hold time (trigger to dissolve start)
pub const EXPAND_START_RATIO: f64 = 0.16;
pub const EXPAND_LEN_RATIO: f64 = 0.50;
pub const ICON_PULSE_RATIO: f64 = 0.24;
pub const TITLE_REVEAL_RATIO: f64 = 0.30;
pub const DESCRIPTION_REVEAL_RATIO: f64 = 0.36;
pub const POINTS_REVEAL_RATIO: f64 = 0.42;

// DOM
pub const STYLE_ELEMENT_ID: &str = "achievement-toast-styles";
pub const FALLBACK_ROOT_ID: &str = "root";
pub const MOUNT_CLASS: &str = "achievement-mount";
pub const ID_ATTRIBUTE: &str = "data-achievement-id";
pub const CONTAINER_ATTRIBUTE: &str = "data-achievement-container";

// Demo form limits
pub const MAX_POINTS: u32 = 1_000;
pub const MIN_DURATION_MS: u32 = 1_000;
pub const MAX_DURATION_MS: u32 = 30_000;
