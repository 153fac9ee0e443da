use crate::Position;
use once_cell::sync::Lazy;
use regex::Regex;

// Compiled regexes for parameter parsing
static HEX_COLOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3,4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap());
static RGB_COLOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)(rgba?)\(\s*([^()]*?)\s*\)$").unwrap());
static CHANNEL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,3}(?:\.\d+)?)(%?)$").unwrap());
static ALPHA_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d*\.?\d+)(%?)$").unwrap());
static PIXEL_OFFSET_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?i)(\d+)\s*px$").unwrap());

/// Parse a CSS color string into its canonical form.
///
/// Supported formats:
/// - Hex: "#8BC34A", "#fff", "#ffff", "#2E7D32CC" (kept as written)
/// - Functional: "rgb(46, 125, 50)", "rgba(0,0,0,0.3)", "rgba(100%, 0%, 0%, 50%)"
///
/// Functional colors are returned with whitespace removed and a lowercase
/// function name.
///
/// # Examples
/// ```
/// use achievement_toast::utils::parse_color;
/// assert_eq!(parse_color(" #8BC34A "), Ok("#8BC34A".to_string()));
/// assert_eq!(parse_color("rgba(0, 0, 0, 0.3)"), Ok("rgba(0,0,0,0.3)".to_string()));
/// assert!(parse_color("#12345").is_err());
/// ```
pub fn parse_color(input: &str) -> Result<String, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Color cannot be empty".to_string());
    }

    if HEX_COLOR_REGEX.is_match(trimmed) {
        return Ok(trimmed.to_string());
    }

    let captures = RGB_COLOR_REGEX.captures(trimmed).ok_or_else(|| {
        format!("Invalid color '{}'. Use #rrggbb, #rgb, rgb(r,g,b) or rgba(r,g,b,a)", trimmed)
    })?;
    let function = captures[1].to_ascii_lowercase();
    let parts: Vec<&str> = captures[2].split(',').map(str::trim).collect();

    if parts.len() != 3 && parts.len() != 4 {
        return Err(format!(
            "Invalid color '{}': expected 3 or 4 components, found {}",
            trimmed,
            parts.len()
        ));
    }
    for channel in &parts[..3] {
        validate_channel(channel).map_err(|e| format!("Invalid color '{}': {}", trimmed, e))?;
    }
    if let Some(alpha) = parts.get(3) {
        validate_alpha(alpha).map_err(|e| format!("Invalid color '{}': {}", trimmed, e))?;
    }

    Ok(format!("{}({})", function, parts.join(",")))
}

fn validate_channel(channel: &str) -> Result<(), String> {
    let captures = CHANNEL_REGEX
        .captures(channel)
        .ok_or_else(|| format!("channel '{}' is not a number", channel))?;
    let value: f64 = captures[1]
        .parse()
        .map_err(|_| format!("channel '{}' is not a number", channel))?;
    let max = if &captures[2] == "%" { 100.0 } else { 255.0 };
    if value > max {
        return Err(format!("channel '{}' exceeds {}", channel, max));
    }
    Ok(())
}

fn validate_alpha(alpha: &str) -> Result<(), String> {
    let captures = ALPHA_REGEX
        .captures(alpha)
        .ok_or_else(|| format!("alpha '{}' is not a number", alpha))?;
    let value: f64 = captures[1]
        .parse()
        .map_err(|_| format!("alpha '{}' is not a number", alpha))?;
    let max = if &captures[2] == "%" { 100.0 } else { 1.0 };
    if value > max {
        return Err(format!("alpha '{}' must be between 0 and {}", alpha, max));
    }
    Ok(())
}

/// Parse a floating position: "top", "middle", "bottom" (any case) or "<n>px".
pub fn parse_position(input: &str) -> Result<Position, String> {
    let trimmed = input.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "top" => return Ok(Position::Top),
        "middle" => return Ok(Position::Middle),
        "bottom" => return Ok(Position::Bottom),
        _ => {}
    }

    if let Some(captures) = PIXEL_OFFSET_REGEX.captures(trimmed) {
        let px: u32 = captures[1]
            .parse()
            .map_err(|_| format!("Pixel offset '{}' is too large", trimmed))?;
        return Ok(Position::Offset(px));
    }

    Err(format!(
        "Unrecognized position '{}'. Use top, middle, bottom or a pixel offset like 120px",
        trimmed
    ))
}

/// Check that `value` lies within `[min, max]` (either bound optional).
pub fn validate_range<T>(value: T, min: Option<T>, max: Option<T>, field_name: &str) -> Result<T, String>
where
    T: std::fmt::Display + PartialOrd,
{
    if let Some(min_val) = min {
        if value < min_val {
            return Err(format!("{} must be at least {}", field_name, min_val));
        }
    }
    if let Some(max_val) = max {
        if value > max_val {
            return Err(format!("{} cannot exceed {}", field_name, max_val));
        }
    }
    Ok(value)
}

/// Generic numeric input validation
pub fn validate_numeric_input<T>(
    input: &str,
    min: Option<T>,
    max: Option<T>,
    field_name: &str,
) -> Result<T, String>
where
    T: std::str::FromStr + std::fmt::Display + PartialOrd,
{
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(format!("{} cannot be empty", field_name));
    }

    match trimmed.parse::<T>() {
        Ok(val) => validate_range(val, min, max, field_name),
        Err(_) => Err(format!("{} must be a valid number", field_name)),
    }
}

/// Narrow a host-supplied number to a whole `u32` within `[min, max]`.
pub fn integer_in_range(value: f64, min: u32, max: u32, field_name: &str) -> Result<u32, String> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(format!("{} must be a whole number, got {}", field_name, value));
    }
    let checked = validate_range(value, Some(min as f64), Some(max as f64), field_name)?;
    Ok(checked as u32)
}

/// Validate points input
pub fn validate_points(input: &str) -> Result<u32, String> {
    validate_numeric_input(input, Some(0), Some(crate::config::MAX_POINTS), "Points")
}

/// Validate duration input (milliseconds)
pub fn validate_duration(input: &str) -> Result<u32, String> {
    validate_numeric_input(
        input,
        Some(crate::config::MIN_DURATION_MS),
        Some(crate::config::MAX_DURATION_MS),
        "Duration",
    )
}

/// Validate dissolve input (milliseconds, 0 = at duration)
pub fn validate_dissolve(input: &str) -> Result<u32, String> {
    validate_numeric_input(input, Some(0), Some(crate::config::MAX_DURATION_MS), "Dissolve")
}

/// Build an `rgba(0,0,0,a)` shadow color from a slider opacity in `[0, 1]`.
pub fn shadow_from_opacity(opacity: f64) -> String {
    let clamped = opacity.clamp(0.0, 1.0);
    let rounded = (clamped * 100.0).round() / 100.0;
    format!("rgba(0,0,0,{})", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors() {
        for ok in ["#fff", "#FFFF", "#8BC34A", "#2e7d32cc"] {
            assert_eq!(parse_color(ok), Ok(ok.to_string()), "{ok}");
        }
        for bad in ["#ff", "#fffff", "#8BC34", "8BC34A", "#GGGGGG", ""] {
            assert!(parse_color(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn functional_colors_are_normalized() {
        assert_eq!(parse_color("rgba(0, 0, 0, 0.3)"), Ok("rgba(0,0,0,0.3)".to_string()));
        assert_eq!(parse_color("RGB( 46 ,125, 50 )"), Ok("rgb(46,125,50)".to_string()));
        assert_eq!(parse_color("rgba(100%,0%,0%,50%)"), Ok("rgba(100%,0%,0%,50%)".to_string()));
        assert_eq!(parse_color("rgba(0,0,0,.5)"), Ok("rgba(0,0,0,.5)".to_string()));
    }

    #[test]
    fn functional_colors_out_of_range() {
        assert!(parse_color("rgb(256,0,0)").is_err());
        assert!(parse_color("rgb(0,0,101%)").is_err());
        assert!(parse_color("rgba(0,0,0,1.5)").is_err());
        assert!(parse_color("rgba(0,0,0,-1)").is_err());
        assert!(parse_color("rgb(0,0)").is_err());
        assert!(parse_color("rgb(0,0,0,0,0)").is_err());
        assert!(parse_color("rgb(red,0,0)").is_err());
    }

    #[test]
    fn positions() {
        assert_eq!(parse_position("top"), Ok(Position::Top));
        assert_eq!(parse_position(" Middle "), Ok(Position::Middle));
        assert_eq!(parse_position("BOTTOM"), Ok(Position::Bottom));
        assert_eq!(parse_position("120px"), Ok(Position::Offset(120)));
        assert_eq!(parse_position("0 px"), Ok(Position::Offset(0)));
        assert!(parse_position("120").is_err());
        assert!(parse_position("-5px").is_err());
        assert!(parse_position("center").is_err());
        assert!(parse_position("99999999999px").is_err());
    }

    #[test]
    fn numeric_fields() {
        assert_eq!(validate_points("10"), Ok(10));
        assert_eq!(validate_points(" 0 "), Ok(0));
        assert!(validate_points("1001").unwrap_err().contains("cannot exceed"));
        assert!(validate_points("").unwrap_err().contains("cannot be empty"));
        assert!(validate_points("ten").unwrap_err().contains("valid number"));
        assert!(validate_duration("500").unwrap_err().contains("at least"));
        assert_eq!(validate_dissolve("0"), Ok(0));
    }

    #[test]
    fn host_integers() {
        assert_eq!(integer_in_range(10.0, 0, u32::MAX, "points"), Ok(10));
        assert!(integer_in_range(-1.0, 0, u32::MAX, "points").is_err());
        assert!(integer_in_range(0.0, 1, u32::MAX, "duration").is_err());
        assert!(integer_in_range(u32::MAX as f64 + 1.0, 0, u32::MAX, "points").is_err());
        assert_eq!(integer_in_range(3000.0, 1, 3000, "duration"), Ok(3000));
        assert!(integer_in_range(3001.0, 1, 3000, "duration").is_err());
    }

    #[test]
    fn fractional_and_non_finite_numbers_are_rejected() {
        let err = integer_in_range(1.5, 0, u32::MAX, "points").unwrap_err();
        assert!(err.contains("whole number"), "{err}");
        assert!(integer_in_range(f64::NAN, 0, u32::MAX, "points").is_err());
        assert!(integer_in_range(f64::INFINITY, 0, u32::MAX, "points").is_err());
    }

    #[test]
    fn shadow_opacity_is_clamped_and_rounded() {
        assert_eq!(shadow_from_opacity(0.3), "rgba(0,0,0,0.3)");
        assert_eq!(shadow_from_opacity(1.7), "rgba(0,0,0,1)");
        assert_eq!(shadow_from_opacity(0.333333), "rgba(0,0,0,0.33)");
        assert!(parse_color(&shadow_from_opacity(0.45)).is_ok());
    }
}
