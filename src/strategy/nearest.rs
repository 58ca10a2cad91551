use super::{AssignmentStrategy, StrategyKind};
use crate::engine::run_stage;
use crate::error::{AssignError, Result};
use crate::math::Color;
use crate::model::Layer;
use crate::palette::nearest_color;
use crate::repair::RepairConfig;

/// Recolor each layer with the palette entry closest to the color it
/// already carries. Layers without a color are matched against black.
#[derive(Debug, Clone, Default)]
pub struct NearestMatch {
    repair: RepairConfig,
}

impl NearestMatch {
    pub fn new(repair: RepairConfig) -> Self {
        Self { repair }
    }
}

impl AssignmentStrategy for NearestMatch {
    fn kind(&self) -> StrategyKind {
        StrategyKind::NearestMatch
    }

    fn backgrounds(&self, palette: &[Color], layers: &[Layer]) -> Result<Vec<Color>> {
        run_stage("nearest match", || {
            layers
                .iter()
                .map(|layer| {
                    nearest_color(layer.color.unwrap_or([0.0; 3]), palette).ok_or_else(|| {
                        AssignError::Internal {
                            stage: "nearest match",
                            message: "palette is empty".to_string(),
                        }
                    })
                })
                .collect()
        })
    }

    fn repair_config(&self) -> &RepairConfig {
        &self.repair
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_layer_gets_closest_entry() {
        let palette = [Color::new(250, 10, 10), Color::new(10, 10, 250), Color::new(240, 240, 240)];
        let layers = [
            Layer::new("bluish").with_color(Color::new(30, 40, 200)),
            Layer::new("reddish").with_color(Color::new(200, 30, 40)),
            Layer::new("light").with_color(Color::new(200, 210, 220)),
        ];
        let bgs = NearestMatch::default().backgrounds(&palette, &layers).unwrap();
        assert_eq!(bgs, vec![palette[1], palette[0], palette[2]]);
    }

    #[test]
    fn colorless_layer_matches_black() {
        let palette = [Color::WHITE, Color::new(20, 20, 20)];
        let bgs = NearestMatch::default()
            .backgrounds(&palette, &[Layer::new("plain")])
            .unwrap();
        assert_eq!(bgs, vec![Color::new(20, 20, 20)]);
    }

    #[test]
    fn colors_may_repeat() {
        let palette = [Color::BLACK, Color::WHITE];
        let layers = [
            Layer::new("a").with_color(Color::new(5, 5, 5)),
            Layer::new("b").with_color(Color::new(9, 9, 9)),
        ];
        let bgs = NearestMatch::default().backgrounds(&palette, &layers).unwrap();
        assert_eq!(bgs, vec![Color::BLACK, Color::BLACK]);
    }

    #[test]
    fn fractional_layer_color_is_not_truncated() {
        let palette = [Color::new(127, 0, 0), Color::new(128, 0, 0)];
        let layers = [Layer::new("shade").with_color([127.9, 0.0, 0.0])];
        let bgs = NearestMatch::default().backgrounds(&palette, &layers).unwrap();
        assert_eq!(bgs, vec![Color::new(128, 0, 0)]);
    }
}
