use super::color::Color;
use crate::error::{AssignError, Result};

/// Parse `#rrggbb`, `#rgb` or `#rrggbbaa` (leading `#` optional) into a Color.
/// Alpha bytes are ignored.
pub fn parse_hex_rgb(hex: &str) -> Result<Color> {
    let raw = hex.trim();
    let raw = raw.strip_prefix('#').unwrap_or(raw);
    let expanded: String = match raw.len() {
        3 | 4 => raw.chars().take(3).flat_map(|c| [c, c]).collect(),
        6 | 8 => raw.get(..6).unwrap_or_default().to_string(),
        _ => return Err(AssignError::invalid(format!("malformed hex color {hex:?}"))),
    };
    let byte = |range: std::ops::Range<usize>| {
        expanded
            .get(range)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .ok_or_else(|| AssignError::invalid(format!("malformed hex color {hex:?}")))
    };
    Ok(Color::new(byte(0..2)?, byte(2..4)?, byte(4..6)?))
}

/// Format a color as lowercase `#rrggbb`.
pub fn to_hex(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_6digit_hex() {
        assert_eq!(parse_hex_rgb("#ff0000").unwrap(), Color::new(255, 0, 0));
        assert_eq!(parse_hex_rgb("#00ff00").unwrap(), Color::new(0, 255, 0));
        assert_eq!(parse_hex_rgb("#1e293b").unwrap(), Color::new(30, 41, 59));
    }

    #[test]
    fn parse_without_hash() {
        assert_eq!(parse_hex_rgb("1E293B").unwrap(), Color::new(30, 41, 59));
    }

    #[test]
    fn parse_3digit_expands() {
        assert_eq!(parse_hex_rgb("#f0a").unwrap(), Color::new(255, 0, 170));
    }

    #[test]
    fn parse_8digit_hex_ignores_alpha() {
        assert_eq!(parse_hex_rgb("#ff000080").unwrap(), Color::new(255, 0, 0));
    }

    #[test]
    fn parse_malformed_is_error() {
        assert!(parse_hex_rgb("not-a-color").is_err());
        assert!(parse_hex_rgb("#xyz").is_err());
        assert!(parse_hex_rgb("#12345").is_err());
        assert!(parse_hex_rgb("#ééé").is_err());
    }

    #[test]
    fn format_lowercase() {
        assert_eq!(to_hex(Color::new(30, 41, 59)), "#1e293b");
        assert_eq!(to_hex(Color::BLACK), "#000000");
    }
}
