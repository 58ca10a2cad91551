use std::str::FromStr;

use crate::error::{AssignError, Result};
use crate::repair::{BoundsOverlap, RepairConfig};
use crate::strategy::{
    AssignmentStrategy, DistinctivenessRepair, LuminanceBackgroundPick, NearestMatch,
    SequentialNoRepeat, StrategyKind,
};
use crate::types::AssignOptions;

/// How overlap between layers is decided during pairwise repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapMode {
    #[default]
    All,
    Bounds,
}

impl FromStr for OverlapMode {
    type Err = AssignError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(OverlapMode::All),
            "bounds" => Ok(OverlapMode::Bounds),
            other => Err(AssignError::invalid(format!("unknown overlap mode {other:?}"))),
        }
    }
}

/// Fully resolved settings for one assignment call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AssignConfig {
    pub strategy: StrategyKind,
    pub overlap: OverlapMode,
    pub repair: RepairConfig,
}

impl AssignConfig {
    /// Apply the caller's options over the defaults.
    pub fn from_options(options: Option<&AssignOptions>) -> Result<Self> {
        let mut config = Self::default();
        let Some(options) = options else {
            return Ok(config);
        };

        if let Some(name) = &options.strategy {
            config.strategy = name.parse()?;
        }
        if let Some(name) = &options.overlap {
            config.overlap = name.parse()?;
        }
        if let Some(v) = options.pair_threshold {
            config.repair.pair_threshold = non_negative("pair_threshold", v)?;
        }
        if let Some(v) = options.contrast_factor {
            config.repair.contrast_factor = non_negative("contrast_factor", v)?;
        }
        if let Some(v) = options.text_threshold {
            config.repair.text_threshold = non_negative("text_threshold", v)?;
        }
        Ok(config)
    }

    pub fn build_strategy(&self) -> Box<dyn AssignmentStrategy> {
        match self.strategy {
            StrategyKind::DistinctivenessRepair => {
                let strategy = DistinctivenessRepair::new(self.repair);
                match self.overlap {
                    OverlapMode::All => Box::new(strategy),
                    OverlapMode::Bounds => Box::new(strategy.with_overlap(BoundsOverlap)),
                }
            }
            StrategyKind::LuminanceBackgroundPick => Box::new(LuminanceBackgroundPick::new(self.repair)),
            StrategyKind::SequentialNoRepeat => Box::new(SequentialNoRepeat::new(self.repair)),
            StrategyKind::NearestMatch => Box::new(NearestMatch::new(self.repair)),
        }
    }
}

fn non_negative(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(AssignError::invalid(format!("{field} must be a non-negative number, got {value}")))
    }
}
