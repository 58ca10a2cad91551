use log::debug;

use super::{background_layer_index, AssignmentStrategy, StrategyKind};
use crate::engine::run_stage;
use crate::error::{AssignError, Result};
use crate::math::Color;
use crate::model::Layer;
use crate::palette::pick_background_by_luminance;
use crate::repair::RepairConfig;

/// The last layer gets the palette color with the lowest average contrast
/// against the rest; the other layers cycle through the remaining colors
/// in palette order. No pairwise repair.
#[derive(Debug, Clone, Default)]
pub struct LuminanceBackgroundPick {
    repair: RepairConfig,
}

impl LuminanceBackgroundPick {
    pub fn new(repair: RepairConfig) -> Self {
        Self { repair }
    }
}

/// Pick the background color or report the empty palette as an internal
/// failure, since callers have already validated it.
pub(crate) fn pick_background(palette: &[Color]) -> Result<Color> {
    run_stage("background pick", || {
        pick_background_by_luminance(palette).ok_or_else(|| AssignError::Internal {
            stage: "background pick",
            message: "palette is empty".to_string(),
        })
    })
}

impl AssignmentStrategy for LuminanceBackgroundPick {
    fn kind(&self) -> StrategyKind {
        StrategyKind::LuminanceBackgroundPick
    }

    fn backgrounds(&self, palette: &[Color], layers: &[Layer]) -> Result<Vec<Color>> {
        let background = pick_background(palette)?;
        debug!("luminance background pick: {background:?}");

        let rest: Vec<Color> = palette.iter().copied().filter(|&c| c != background).collect();
        let cycle: &[Color] = if rest.is_empty() { &[background] } else { &rest };

        let bg_index = background_layer_index(layers);
        run_stage("background assignment", || {
            Ok((0..layers.len())
                .map(|i| if i == bg_index { background } else { cycle[i % cycle.len()] })
                .collect())
        })
    }

    fn repair_config(&self) -> &RepairConfig {
        &self.repair
    }
}
