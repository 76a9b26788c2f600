//! Parsing and range conversion utilities.
//!
//! Host UIs describe color as hue 0-360 and saturation 0-100; the device
//! stores both as 0-255. The helpers here convert between the two and parse
//! the value formats accepted by the CLI.

use crate::error::{ColorWallError, Result};

// =============================================================================
// Range Conversion
// =============================================================================

/// Linearly map `x` from `[in_min, in_max]` to `[out_min, out_max]`.
///
/// # Example
/// ```
/// use color_wall::utils::parsing::remap;
///
/// assert_eq!(remap(127.5, 0.0, 255.0, 0.0, 360.0), 180.0);
/// ```
pub fn remap(x: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Round and clamp a converted value into a device byte.
fn to_byte(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Convert UI hue (0-360) and saturation (0-100) to device range.
pub fn hs_to_device(hue: f64, saturation: f64) -> (u8, u8) {
    (
        to_byte(remap(hue, 0.0, 360.0, 0.0, 255.0)),
        to_byte(remap(saturation, 0.0, 100.0, 0.0, 255.0)),
    )
}

/// Convert device hue and saturation to UI range (0-360, 0-100).
pub fn device_to_hs(hue: u8, saturation: u8) -> (f64, f64) {
    (
        remap(hue as f64, 0.0, 255.0, 0.0, 360.0),
        remap(saturation as f64, 0.0, 255.0, 0.0, 100.0),
    )
}

// =============================================================================
// CLI Values
// =============================================================================

/// Parse an effect parameter assignment of the form `name=value`.
///
/// # Example
/// ```
/// use color_wall::utils::parsing::parse_param;
///
/// let (name, value) = parse_param("deltaHue=24").unwrap();
/// assert_eq!(name, "deltaHue");
/// assert_eq!(value, 24);
/// ```
pub fn parse_param(input: &str) -> Result<(String, i32)> {
    let (name, value) = input.split_once('=').ok_or_else(|| {
        ColorWallError::InvalidInput(format!(
            "Invalid parameter '{}'. Use name=value",
            input
        ))
    })?;

    let name = name.trim();
    if name.is_empty() {
        return Err(ColorWallError::InvalidInput(format!(
            "Missing parameter name in '{}'",
            input
        )));
    }

    let value: i32 = value.trim().parse().map_err(|_| {
        ColorWallError::InvalidInput(format!(
            "Invalid value for '{}': '{}' is not an integer",
            name, value
        ))
    })?;

    Ok((name.to_string(), value))
}

/// Parse an on/off switch value.
pub fn parse_switch(input: &str) -> Result<bool> {
    match input.to_lowercase().as_str() {
        "on" | "true" | "1" => Ok(true),
        "off" | "false" | "0" => Ok(false),
        _ => Err(ColorWallError::InvalidInput(format!(
            "Unknown switch value '{}'. Use: on or off",
            input
        ))),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remap_endpoints() {
        assert_eq!(remap(0.0, 0.0, 255.0, 0.0, 360.0), 0.0);
        assert_eq!(remap(255.0, 0.0, 255.0, 0.0, 360.0), 360.0);
        assert_eq!(remap(50.0, 0.0, 100.0, 0.0, 255.0), 127.5);
    }

    #[test]
    fn test_remap_inverse() {
        for x in 0..=255u8 {
            let there = remap(x as f64, 0.0, 255.0, 0.0, 360.0);
            let back = remap(there, 0.0, 360.0, 0.0, 255.0);
            assert!((back - x as f64).abs() < 1e-9, "x = {}", x);
        }
    }

    #[test]
    fn test_hs_roundtrip_within_rounding() {
        for hue in 0..=255u8 {
            let (h, s) = device_to_hs(hue, 255 - hue);
            assert_eq!(hs_to_device(h, s), (hue, 255 - hue));
        }
    }

    #[test]
    fn test_hs_to_device_clamps() {
        assert_eq!(hs_to_device(400.0, 120.0), (255, 255));
        assert_eq!(hs_to_device(-10.0, -1.0), (0, 0));
        assert_eq!(hs_to_device(180.0, 50.0), (128, 128));
    }

    #[test]
    fn test_parse_param() {
        assert_eq!(parse_param("speed=3").unwrap(), ("speed".to_string(), 3));
        assert_eq!(parse_param(" width = -2 ").unwrap(), ("width".to_string(), -2));
        assert!(parse_param("speed").is_err());
        assert!(parse_param("=3").is_err());
        assert!(parse_param("speed=fast").is_err());
    }

    #[test]
    fn test_parse_switch() {
        assert!(parse_switch("ON").unwrap());
        assert!(!parse_switch("off").unwrap());
        assert!(parse_switch("maybe").is_err());
    }
}
