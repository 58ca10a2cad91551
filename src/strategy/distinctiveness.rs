use std::fmt;

use log::debug;

use super::{AssignmentStrategy, StrategyKind};
use crate::engine::run_stage;
use crate::error::Result;
use crate::math::Color;
use crate::model::Layer;
use crate::palette::order_palette_by_distinctiveness;
use crate::repair::{repair_pairwise_contrast, AllOverlap, OverlapPredicate, RepairConfig};

/// Layer `i` gets `ordered_palette[i % len]`, so colors repeat cyclically
/// once layers outnumber the palette. Empty palette yields no backgrounds.
pub fn assign_background_colors(layers: &[Layer], ordered_palette: &[Color]) -> Vec<Color> {
    if ordered_palette.is_empty() {
        return Vec::new();
    }
    (0..layers.len())
        .map(|i| ordered_palette[i % ordered_palette.len()])
        .collect()
}

/// Most distinctive colors first, then a one-shot pairwise repair between
/// overlapping layers.
pub struct DistinctivenessRepair {
    overlap: Box<dyn OverlapPredicate>,
    repair: RepairConfig,
}

impl DistinctivenessRepair {
    pub fn new(repair: RepairConfig) -> Self {
        Self {
            overlap: Box::new(AllOverlap),
            repair,
        }
    }

    pub fn with_overlap(mut self, overlap: impl OverlapPredicate + 'static) -> Self {
        self.overlap = Box::new(overlap);
        self
    }
}

impl fmt::Debug for DistinctivenessRepair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DistinctivenessRepair")
            .field("repair", &self.repair)
            .finish_non_exhaustive()
    }
}

impl Default for DistinctivenessRepair {
    fn default() -> Self {
        Self::new(RepairConfig::default())
    }
}

impl AssignmentStrategy for DistinctivenessRepair {
    fn kind(&self) -> StrategyKind {
        StrategyKind::DistinctivenessRepair
    }

    fn backgrounds(&self, palette: &[Color], layers: &[Layer]) -> Result<Vec<Color>> {
        let ordered = run_stage("palette ordering", || Ok(order_palette_by_distinctiveness(palette)))?;
        debug!("ordered palette: {ordered:?}");

        let mut backgrounds = run_stage("background assignment", || {
            Ok(assign_background_colors(layers, &ordered))
        })?;

        run_stage("pairwise repair", || {
            repair_pairwise_contrast(&mut backgrounds, layers, self.overlap.as_ref(), &self.repair);
            Ok(())
        })?;
        Ok(backgrounds)
    }

    fn repair_config(&self) -> &RepairConfig {
        &self.repair
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Bounds;

    fn layers(n: usize) -> Vec<Layer> {
        (0..n).map(|i| Layer::new(format!("layer_{i}"))).collect()
    }

    #[test]
    fn cyclic_when_layers_outnumber_palette() {
        let ordered = [Color::new(1, 1, 1), Color::new(2, 2, 2)];
        let bgs = assign_background_colors(&layers(5), &ordered);
        assert_eq!(
            bgs,
            vec![ordered[0], ordered[1], ordered[0], ordered[1], ordered[0]]
        );
    }

    #[test]
    fn fewer_layers_than_palette() {
        let ordered = [Color::new(1, 1, 1), Color::new(2, 2, 2), Color::new(3, 3, 3)];
        assert_eq!(assign_background_colors(&layers(2), &ordered), vec![ordered[0], ordered[1]]);
    }

    #[test]
    fn distinct_palette_needs_no_repair() {
        let palette = [Color::BLACK, Color::WHITE, Color::new(255, 0, 0)];
        let bgs = DistinctivenessRepair::default()
            .backgrounds(&palette, &layers(3))
            .unwrap();
        // mean (170, 85, 85): white 255.0, black ~208.2, red ~147.2
        assert_eq!(bgs, vec![Color::WHITE, Color::BLACK, Color::new(255, 0, 0)]);
    }

    #[test]
    fn repeated_color_is_scaled() {
        let palette = [Color::new(100, 50, 20)];
        let bgs = DistinctivenessRepair::default()
            .backgrounds(&palette, &layers(2))
            .unwrap();
        assert_eq!(bgs, vec![Color::new(100, 50, 20), Color::new(120, 60, 24)]);
    }

    #[test]
    fn debug_shows_repair_config() {
        let strategy = DistinctivenessRepair::default().with_overlap(|_: &Layer, _: &Layer| false);
        let out = format!("{strategy:?}");
        assert!(out.starts_with("DistinctivenessRepair { repair: RepairConfig {"));
        assert!(out.ends_with(", .. }"));
    }

    #[test]
    fn custom_overlap_skips_repair() {
        let palette = [Color::new(100, 50, 20)];
        let mut ls = layers(2);
        ls[0].bounds = Some(Bounds { x: 0.0, y: 0.0, width: 10.0, height: 10.0 });
        ls[1].bounds = Some(Bounds { x: 100.0, y: 0.0, width: 10.0, height: 10.0 });
        let bgs = DistinctivenessRepair::default()
            .with_overlap(crate::repair::BoundsOverlap)
            .backgrounds(&palette, &ls)
            .unwrap();
        assert_eq!(bgs, vec![Color::new(100, 50, 20), Color::new(100, 50, 20)]);
    }
}
