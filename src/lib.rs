use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use wasm_bindgen::prelude::*;

pub mod components;
pub mod config;
pub mod hooks;
pub mod layout;
pub mod registry;
pub mod renderer;
pub mod style;
pub mod timeline;
pub mod utils;

pub use registry::AchievementId;
pub use renderer::{AchievementHandle, Renderer, StackPolicy};

/// Default request parameters
pub mod defaults {
    pub use crate::config::{
        DEFAULT_BACKGROUND_COLOR as BACKGROUND_COLOR, DEFAULT_DISSOLVE_MS as DISSOLVE_MS,
        DEFAULT_DURATION_MS as DURATION_MS, DEFAULT_ICON_BACKGROUND_COLOR as ICON_BACKGROUND_COLOR,
        DEFAULT_SHADOW_COLOR as SHADOW_COLOR, DEFAULT_TEXT_COLOR as TEXT_COLOR,
    };
    pub const AUTO_WIDTH: bool = true;
    pub const FLOATING: bool = false;
    pub const POSITION: &str = "top";
}

// Errors surfaced by request construction and by the renderer
#[derive(Debug, Clone, PartialEq)]
pub enum AchievementError {
    /// A request field is out of range or malformed.
    InvalidParameter { field: &'static str, reason: String },
    /// The trigger guard rejected a trigger that arrived too soon after the previous one.
    Interrupted { since_last_ms: u32 },
    MissingDocument,
    MissingContainer,
    /// A DOM call failed.
    Dom(String),
}

impl AchievementError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        AchievementError::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for AchievementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AchievementError::InvalidParameter { field, reason } => {
                write!(f, "Invalid parameter `{}`: {}", field, reason)
            }
            AchievementError::Interrupted { since_last_ms } => write!(
                f,
                "Achievement suppressed: previous one was triggered {} ms ago and is still showing",
                since_last_ms
            ),
            AchievementError::MissingDocument => write!(f, "No window or document is available"),
            AchievementError::MissingContainer => {
                write!(f, "No container element or document body to render into")
            }
            AchievementError::Dom(msg) => write!(f, "DOM operation failed: {}", msg),
        }
    }
}

impl std::error::Error for AchievementError {}

impl From<JsValue> for AchievementError {
    fn from(value: JsValue) -> Self {
        AchievementError::Dom(
            value
                .as_string()
                .unwrap_or_else(|| format!("{:?}", value)),
        )
    }
}

/// A validated CSS color: hex (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`) or `rgb()`/`rgba()`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    // Only for the compile-time defaults in `config`
    fn known(css: &str) -> Self {
        Color(css.to_string())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        utils::parse_color(s).map(Color)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Vertical anchor of a floating achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Position {
    #[default]
    Top,
    Middle,
    Bottom,
    /// Explicit offset from the top of the viewport, in pixels.
    Offset(u32),
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        utils::parse_position(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Top => f.write_str("top"),
            Position::Middle => f.write_str("middle"),
            Position::Bottom => f.write_str("bottom"),
            Position::Offset(px) => write!(f, "{}px", px),
        }
    }
}

/// Everything needed to show one achievement. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct AchievementRequest {
    title: String,
    description: String,
    points: u32,
    icon_text: String,
    duration: u32,
    dissolve: u32,
    icon_background_color: Color,
    background_color: Color,
    text_color: Color,
    shadow_color: Color,
    auto_width: bool,
    floating: bool,
    position: Position,
}

impl AchievementRequest {
    /// A request with every styling and timing parameter at its default.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        points: u32,
        icon_text: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            points,
            icon_text: icon_text.into(),
            duration: defaults::DURATION_MS,
            dissolve: defaults::DISSOLVE_MS,
            icon_background_color: Color::known(defaults::ICON_BACKGROUND_COLOR),
            background_color: Color::known(defaults::BACKGROUND_COLOR),
            text_color: Color::known(defaults::TEXT_COLOR),
            shadow_color: Color::known(defaults::SHADOW_COLOR),
            auto_width: defaults::AUTO_WIDTH,
            floating: defaults::FLOATING,
            position: Position::Top,
        }
    }

    pub fn builder() -> AchievementRequestBuilder {
        AchievementRequestBuilder::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn icon_text(&self) -> &str {
        &self.icon_text
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Raw dissolve setting; `0` means the fade starts at `duration`.
    pub fn dissolve(&self) -> u32 {
        self.dissolve
    }

    pub fn icon_background_color(&self) -> &Color {
        &self.icon_background_color
    }

    pub fn background_color(&self) -> &Color {
        &self.background_color
    }

    pub fn text_color(&self) -> &Color {
        &self.text_color
    }

    pub fn shadow_color(&self) -> &Color {
        &self.shadow_color
    }

    pub fn auto_width(&self) -> bool {
        self.auto_width
    }

    pub fn floating(&self) -> bool {
        self.floating
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Offset from trigger at which the fade-out begins.
    pub fn dissolve_at(&self) -> u32 {
        if self.dissolve == 0 {
            self.duration
        } else {
            self.dissolve
        }
    }

    /// Length of the fade-out that precedes removal.
    pub fn fade_ms(&self) -> u32 {
        if self.floating {
            config::FADE_FLOATING_MS
        } else {
            config::FADE_INLINE_MS
        }
    }

    pub fn shows_title(&self) -> bool {
        !self.title.is_empty()
    }

    pub fn shows_description(&self) -> bool {
        !self.description.is_empty()
    }

    pub fn shows_points(&self) -> bool {
        self.points > 0
    }
}

/// Builder for [`AchievementRequest`]. All checks happen in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct AchievementRequestBuilder {
    title: String,
    description: String,
    points: u32,
    icon_text: String,
    duration: u32,
    dissolve: u32,
    icon_background_color: String,
    background_color: String,
    text_color: String,
    shadow_color: String,
    auto_width: bool,
    floating: bool,
    position: String,
}

impl Default for AchievementRequestBuilder {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            points: 0,
            icon_text: String::new(),
            duration: defaults::DURATION_MS,
            dissolve: defaults::DISSOLVE_MS,
            icon_background_color: defaults::ICON_BACKGROUND_COLOR.to_string(),
            background_color: defaults::BACKGROUND_COLOR.to_string(),
            text_color: defaults::TEXT_COLOR.to_string(),
            shadow_color: defaults::SHADOW_COLOR.to_string(),
            auto_width: defaults::AUTO_WIDTH,
            floating: defaults::FLOATING,
            position: defaults::POSITION.to_string(),
        }
    }
}

impl AchievementRequestBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn points(mut self, points: u32) -> Self {
        self.points = points;
        self
    }

    pub fn icon_text(mut self, icon_text: impl Into<String>) -> Self {
        self.icon_text = icon_text.into();
        self
    }

    /// Time in milliseconds from trigger until the fade-out starts. Must be positive.
    pub fn duration(mut self, duration_ms: u32) -> Self {
        self.duration = duration_ms;
        self
    }

    /// Absolute offset in milliseconds from trigger at which the fade-out starts,
    /// overriding `duration`. It is not a delay added after `duration`.
    /// Must not exceed `duration`. `0` keeps the fade at `duration`.
    pub fn dissolve(mut self, dissolve_ms: u32) -> Self {
        self.dissolve = dissolve_ms;
        self
    }

    pub fn icon_background_color(mut self, color: impl Into<String>) -> Self {
        self.icon_background_color = color.into();
        self
    }

    pub fn background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = color.into();
        self
    }

    pub fn text_color(mut self, color: impl Into<String>) -> Self {
        self.text_color = color.into();
        self
    }

    pub fn shadow_color(mut self, color: impl Into<String>) -> Self {
        self.shadow_color = color.into();
        self
    }

    pub fn auto_width(mut self, auto_width: bool) -> Self {
        self.auto_width = auto_width;
        self
    }

    pub fn floating(mut self, floating: bool) -> Self {
        self.floating = floating;
        self
    }

    /// `"top"`, `"middle"`, `"bottom"` or a pixel offset such as `"120px"`.
    pub fn position(mut self, position: impl Into<String>) -> Self {
        self.position = position.into();
        self
    }

    pub fn build(self) -> Result<AchievementRequest, AchievementError> {
        if self.duration == 0 {
            return Err(AchievementError::invalid("duration", "must be a positive number of milliseconds"));
        }
        if self.duration > config::MAX_SCHEDULE_MS {
            return Err(AchievementError::invalid(
                "duration",
                format!("{} ms exceeds the maximum of {} ms", self.duration, config::MAX_SCHEDULE_MS),
            ));
        }
        if self.dissolve > self.duration {
            return Err(AchievementError::invalid(
                "dissolve",
                format!("{} ms exceeds duration of {} ms", self.dissolve, self.duration),
            ));
        }

        let color = |field: &'static str, raw: &str| {
            raw.parse::<Color>().map_err(|e| AchievementError::invalid(field, e))
        };
        let request = AchievementRequest {
            icon_background_color: color("icon_background_color", &self.icon_background_color)?,
            background_color: color("background_color", &self.background_color)?,
            text_color: color("text_color", &self.text_color)?,
            shadow_color: color("shadow_color", &self.shadow_color)?,
            position: self
                .position
                .parse()
                .map_err(|e| AchievementError::invalid("position", e))?,
            title: self.title,
            description: self.description,
            points: self.points,
            icon_text: self.icon_text,
            duration: self.duration,
            dissolve: self.dissolve,
            auto_width: self.auto_width,
            floating: self.floating,
        };
        debug!("Built achievement request: {:?}", request);
        Ok(request)
    }
}

/// Parameter object as sent by a JavaScript host. Missing keys take their defaults.
///
/// Numeric fields are read as plain JS numbers so that a fractional value is
/// reported against its field instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AchievementArgs {
    pub title: String,
    pub description: String,
    pub points: f64,
    pub icon_text: String,
    pub duration: f64,
    pub icon_background_color: String,
    pub background_color: String,
    pub text_color: String,
    pub shadow_color: String,
    pub auto_width: bool,
    pub floating: bool,
    pub position: String,
    pub dissolve: f64,
}

impl Default for AchievementArgs {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            points: 0.0,
            icon_text: String::new(),
            duration: defaults::DURATION_MS as f64,
            icon_background_color: defaults::ICON_BACKGROUND_COLOR.to_string(),
            background_color: defaults::BACKGROUND_COLOR.to_string(),
            text_color: defaults::TEXT_COLOR.to_string(),
            shadow_color: defaults::SHADOW_COLOR.to_string(),
            auto_width: defaults::AUTO_WIDTH,
            floating: defaults::FLOATING,
            position: defaults::POSITION.to_string(),
            dissolve: defaults::DISSOLVE_MS as f64,
        }
    }
}

impl TryFrom<AchievementArgs> for AchievementRequest {
    type Error = AchievementError;

    fn try_from(args: AchievementArgs) -> Result<Self, Self::Error> {
        let int = |field: &'static str, value: f64, min: u32, max: u32| {
            utils::integer_in_range(value, min, max, field).map_err(|e| AchievementError::invalid(field, e))
        };
        AchievementRequest::builder()
            .points(int("points", args.points, 0, u32::MAX)?)
            .duration(int("duration", args.duration, 1, config::MAX_SCHEDULE_MS)?)
            .dissolve(int("dissolve", args.dissolve, 0, config::MAX_SCHEDULE_MS)?)
            .title(args.title)
            .description(args.description)
            .icon_text(args.icon_text)
            .icon_background_color(args.icon_background_color)
            .background_color(args.background_color)
            .text_color(args.text_color)
            .shadow_color(args.shadow_color)
            .auto_width(args.auto_width)
            .floating(args.floating)
            .position(args.position)
            .build()
    }
}

/// Status reported back to the host once an achievement is on screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShownEvent {
    pub status: &'static str,
    pub id: String,
    pub title: String,
    pub description: String,
    pub points: u32,
    pub floating: bool,
    pub timestamp: f64,
}

impl ShownEvent {
    pub fn new(id: AchievementId, request: &AchievementRequest, timestamp: f64) -> Self {
        Self {
            status: "shown",
            id: id.to_string(),
            title: request.title.clone(),
            description: request.description.clone(),
            points: request.points,
            floating: request.floating,
            timestamp,
        }
    }
}

/// Show an achievement with the default renderer (page body, or `#root` for inline cards).
///
/// Returns as soon as the card is mounted and its timers are scheduled.
pub fn display(request: AchievementRequest) -> Result<(), AchievementError> {
    Renderer::new().display(request).map(|_| ())
}

/// JavaScript entry point.
///
/// Accepts a parameter object with the same keys as [`AchievementArgs`] and
/// returns the serialized [`ShownEvent`]. Errors are thrown as `Error` objects.
#[wasm_bindgen(js_name = displayAchievement)]
pub fn display_achievement(args: JsValue) -> Result<JsValue, JsValue> {
    let args: AchievementArgs = if args.is_undefined() || args.is_null() {
        AchievementArgs::default()
    } else {
        serde_wasm_bindgen::from_value(args)
            .map_err(|e| js_sys::Error::new(&format!("Failed to read achievement arguments: {}", e)))?
    };

    let request = AchievementRequest::try_from(args).map_err(to_js_error)?;
    let handle = Renderer::new().display(request).map_err(to_js_error)?;
    serde_wasm_bindgen::to_value(handle.shown_event())
        .map_err(|e| js_sys::Error::new(&e.to_string()).into())
}

fn to_js_error(err: AchievementError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}
