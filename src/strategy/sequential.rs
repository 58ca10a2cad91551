use std::collections::HashSet;

use log::{debug, warn};

use super::luminance::pick_background;
use super::{background_layer_index, AssignmentStrategy, StrategyKind};
use crate::engine::run_stage;
use crate::error::Result;
use crate::math::Color;
use crate::model::Layer;
use crate::repair::RepairConfig;

/// The last layer gets the luminance-picked background; every other layer,
/// in order, takes the first palette color nobody has used yet. Once the
/// palette runs dry the used set is cleared and assignment starts over from
/// the top of the palette.
#[derive(Debug, Clone, Default)]
pub struct SequentialNoRepeat {
    repair: RepairConfig,
}

impl SequentialNoRepeat {
    pub fn new(repair: RepairConfig) -> Self {
        Self { repair }
    }
}

impl AssignmentStrategy for SequentialNoRepeat {
    fn kind(&self) -> StrategyKind {
        StrategyKind::SequentialNoRepeat
    }

    fn backgrounds(&self, palette: &[Color], layers: &[Layer]) -> Result<Vec<Color>> {
        let background = pick_background(palette)?;
        debug!("sequential background pick: {background:?}");

        let bg_index = background_layer_index(layers);
        run_stage("background assignment", || {
            let mut used: HashSet<Color> = HashSet::from([background]);
            let mut backgrounds = Vec::with_capacity(layers.len());
            for i in 0..layers.len() {
                if i == bg_index {
                    backgrounds.push(background);
                    continue;
                }
                let next = match palette.iter().find(|c| !used.contains(*c)) {
                    Some(&c) => c,
                    None => {
                        warn!("palette exhausted at layer {:?}, reusing colors", layers[i].name);
                        used.clear();
                        palette[0]
                    }
                };
                used.insert(next);
                backgrounds.push(next);
            }
            Ok(backgrounds)
        })
    }

    fn repair_config(&self) -> &RepairConfig {
        &self.repair
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layers(n: usize) -> Vec<Layer> {
        (0..n).map(|i| Layer::new(format!("layer_{i}"))).collect()
    }

    const GRAY: Color = Color::new(118, 118, 118);
    const RED: Color = Color::new(255, 0, 0);

    #[test]
    fn no_repeats_while_palette_lasts() {
        let palette = [Color::BLACK, GRAY, Color::WHITE, RED];
        let bgs = SequentialNoRepeat::default().backgrounds(&palette, &layers(4)).unwrap();
        let picked = bgs[3];
        assert!(palette.contains(&picked));
        let unique: HashSet<Color> = bgs.iter().copied().collect();
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn exhausted_palette_starts_over() {
        let palette = [Color::BLACK, GRAY, Color::WHITE];
        let bgs = SequentialNoRepeat::default().backgrounds(&palette, &layers(6)).unwrap();
        // gray is the pick; black, white, then reuse from the top
        assert_eq!(
            bgs,
            vec![Color::BLACK, Color::WHITE, Color::BLACK, GRAY, Color::WHITE, GRAY]
        );
    }

    #[test]
    fn duplicate_entries_count_once() {
        let palette = [Color::BLACK, Color::BLACK, GRAY, Color::WHITE];
        let bgs = SequentialNoRepeat::default().backgrounds(&palette, &layers(4)).unwrap();
        assert_eq!(bgs.len(), 4);
        assert_eq!(bgs[0], Color::BLACK);
        assert_eq!(bgs[1], Color::WHITE);
        assert_eq!(bgs[2], Color::BLACK);
    }

    #[test]
    fn single_color_palette() {
        let c = Color::new(1, 2, 3);
        let bgs = SequentialNoRepeat::default().backgrounds(&[c], &layers(3)).unwrap();
        assert_eq!(bgs, vec![c, c, c]);
    }
}
