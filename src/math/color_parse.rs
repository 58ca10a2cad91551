use super::color::Color;
use crate::error::{AssignError, Result};

/// Convert any CSS color value to an opaque Color.
/// Handles: hex, rgb, hsl, oklch, named colors. Alpha is discarded.
/// Rejects: transparent, inherit, currentColor and anything unrecognized.
pub fn parse_css_color(value: &str) -> Result<Color> {
    let trimmed = value.trim();

    match trimmed.to_lowercase().as_str() {
        "" | "transparent" | "inherit" | "currentcolor" | "initial" | "unset" => {
            return Err(AssignError::invalid(format!(
                "{trimmed:?} does not name a concrete color"
            )));
        }
        _ => {}
    }

    if trimmed.starts_with('#') {
        return super::hex::parse_hex_rgb(trimmed);
    }

    match trimmed.parse::<csscolorparser::Color>() {
        Ok(color) => {
            let [r, g, b, _] = color.to_rgba8();
            Ok(Color::new(r, g, b))
        }
        Err(err) => Err(AssignError::invalid(format!(
            "unrecognized color {trimmed:?}: {err}"
        ))),
    }
}

/// Parse a list of color strings, failing on the first bad entry.
pub fn parse_palette<S: AsRef<str>>(codes: &[S]) -> Result<Vec<Color>> {
    codes.iter().map(|c| parse_css_color(c.as_ref())).collect()
}
