use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::math::Color;

/// Axis-aligned layer bounds in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// True when the two rectangles share a region of positive area.
    pub fn intersects(&self, other: &Bounds) -> bool {
        let overlap_w = (self.x + self.width).min(other.x + other.width) - self.x.max(other.x);
        let overlap_h = (self.y + self.height).min(other.y + other.height) - self.y.max(other.y);
        overlap_w > 0.0 && overlap_h > 0.0
    }
}

/// A named visual element awaiting colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub name: String,
    /// Intrinsic color the layer currently carries, if known. Kept
    /// unquantized so fractional channels survive nearest-color matching.
    pub color: Option<[f64; 3]>,
    pub text_color: Option<Color>,
    pub bounds: Option<Bounds>,
}

impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
            text_color: None,
            bounds: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<[f64; 3]>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = Some(color);
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Declared text color, black when none was given.
    pub fn text_color_or_default(&self) -> Color {
        self.text_color.unwrap_or(Color::BLACK)
    }
}

/// Resolved colors for one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerColors {
    pub background_color: Color,
    pub text_color: Color,
}

/// Layer name -> resolved colors. Holds exactly one entry per input layer.
pub type Assignment = BTreeMap<String, LayerColors>;
