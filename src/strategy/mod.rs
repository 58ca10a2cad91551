pub mod distinctiveness;
pub mod luminance;
pub mod nearest;
pub mod sequential;

use std::fmt;
use std::str::FromStr;

use crate::error::{AssignError, Result};
use crate::math::Color;
use crate::model::{Assignment, Layer};
use crate::repair::RepairConfig;

pub use distinctiveness::{assign_background_colors, DistinctivenessRepair};
pub use luminance::LuminanceBackgroundPick;
pub use nearest::NearestMatch;
pub use sequential::SequentialNoRepeat;

/// One way of turning a palette and a layer list into an assignment.
///
/// Implementors only choose backgrounds. Input validation, the text-contrast
/// pass and building the final mapping are shared by all strategies through
/// [`crate::engine::assign`].
pub trait AssignmentStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    /// Background for every layer, index-aligned with `layers`.
    /// `palette` and `layers` are already validated as non-empty.
    fn backgrounds(&self, palette: &[Color], layers: &[Layer]) -> Result<Vec<Color>>;

    fn repair_config(&self) -> &RepairConfig;

    fn assign(&self, palette: &[Color], layers: &[Layer]) -> Result<Assignment>
    where
        Self: Sized,
    {
        crate::engine::assign(self, palette, layers)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyKind {
    /// Distinctiveness ordering, cyclic assignment, pairwise repair.
    #[default]
    DistinctivenessRepair,
    /// Lowest-average-contrast color for the background layer, cyclic elsewhere.
    LuminanceBackgroundPick,
    /// Lowest-average-contrast background, then unused palette colors in order.
    SequentialNoRepeat,
    /// Palette color nearest to each layer's current color.
    NearestMatch,
}

impl StrategyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::DistinctivenessRepair => "distinctiveness",
            StrategyKind::LuminanceBackgroundPick => "luminance",
            StrategyKind::SequentialNoRepeat => "sequential",
            StrategyKind::NearestMatch => "nearest",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = AssignError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distinctiveness" => Ok(StrategyKind::DistinctivenessRepair),
            "luminance" => Ok(StrategyKind::LuminanceBackgroundPick),
            "sequential" => Ok(StrategyKind::SequentialNoRepeat),
            "nearest" => Ok(StrategyKind::NearestMatch),
            other => Err(AssignError::invalid(format!("unknown strategy {other:?}"))),
        }
    }
}

/// The layer reserved for the luminance-picked background: the last one.
pub(crate) fn background_layer_index(layers: &[Layer]) -> usize {
    layers.len().saturating_sub(1)
}
