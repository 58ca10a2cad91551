use serde::{Deserialize, Serialize};

use crate::error::{AssignError, Result};

/// An sRGB color with 8-bit channels.
///
/// Serializes as a `[r, g, b]` array, the shape the plugin sends and reads back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Build a color from loosely typed channels (JS numbers, JSON arrays).
    /// Fractional channels are truncated; anything outside 0-255 or not
    /// exactly three channels is rejected.
    pub fn from_channels(channels: &[f64]) -> Result<Self> {
        let [r, g, b] = checked_channels(channels)?;
        Ok(Self::new(r as u8, g as u8, b as u8))
    }

    /// Euclidean distance in RGB space.
    pub fn distance(self, other: Color) -> f64 {
        let dr = self.r as f64 - other.r as f64;
        let dg = self.g as f64 - other.g as f64;
        let db = self.b as f64 - other.b as f64;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// Euclidean distance to an unquantized `[r, g, b]` point.
    pub fn distance_to(self, target: [f64; 3]) -> f64 {
        let [r, g, b] = target;
        let dr = self.r as f64 - r;
        let dg = self.g as f64 - g;
        let db = self.b as f64 - b;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// Multiply every channel by `factor`, clamp to 0-255, truncate.
    pub fn scale(self, factor: f64) -> Self {
        let s = |c: u8| (c as f64 * factor).clamp(0.0, 255.0) as u8;
        Self::new(s(self.r), s(self.g), s(self.b))
    }

    /// Arithmetic mean of the three channels.
    pub fn channel_mean(self) -> f64 {
        (self.r as f64 + self.g as f64 + self.b as f64) / 3.0
    }
}

/// Check that `channels` holds exactly three finite values within 0-255.
/// The values are returned untouched, fractions included.
pub fn checked_channels(channels: &[f64]) -> Result<[f64; 3]> {
    let [r, g, b] = channels else {
        return Err(AssignError::invalid(format!(
            "color must have 3 channels, got {}",
            channels.len()
        )));
    };
    for &value in [r, g, b] {
        if !value.is_finite() || !(0.0..=255.0).contains(&value) {
            return Err(AssignError::invalid(format!(
                "color channel {value} is outside 0-255"
            )));
        }
    }
    Ok([*r, *g, *b])
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Color> for [u8; 3] {
    fn from(color: Color) -> Self {
        color.channels()
    }
}

impl From<Color> for [f64; 3] {
    fn from(color: Color) -> Self {
        [color.r as f64, color.g as f64, color.b as f64]
    }
}

impl From<Color> for Vec<u32> {
    fn from(color: Color) -> Self {
        color.channels().iter().map(|&c| c as u32).collect()
    }
}

/// Component-wise mean of `colors`, each channel truncated to an integer.
/// Returns `None` for an empty slice.
pub fn mean_color(colors: &[Color]) -> Option<Color> {
    if colors.is_empty() {
        return None;
    }
    let n = colors.len() as f64;
    let (r, g, b) = colors.iter().fold((0.0, 0.0, 0.0), |(r, g, b), c| {
        (r + c.r as f64, g + c.g as f64, b + c.b as f64)
    });
    Some(Color::new((r / n) as u8, (g / n) as u8, (b / n) as u8))
}
