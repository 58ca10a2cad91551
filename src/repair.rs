use log::trace;

use crate::math::Color;
use crate::model::Layer;

/// Thresholds and factors for the contrast repair passes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepairConfig {
    /// Backgrounds of overlapping layers closer than this (inclusive) get repaired.
    pub pair_threshold: f64,
    pub contrast_factor: f64,
    /// Text closer than this (inclusive) to its background gets repaired.
    pub text_threshold: f64,
    pub darken_factor: f64,
    pub lighten_factor: f64,
    /// Background channel mean above which a background counts as light.
    pub light_background_cutoff: f64,
}

impl RepairConfig {
    pub const PAIR_THRESHOLD: f64 = 100.0;
    pub const CONTRAST_FACTOR: f64 = 1.2;
    pub const TEXT_THRESHOLD: f64 = 120.0;
    pub const DARKEN_FACTOR: f64 = 0.7;
    pub const LIGHTEN_FACTOR: f64 = 1.3;
    pub const LIGHT_BACKGROUND_CUTOFF: f64 = 128.0;
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            pair_threshold: Self::PAIR_THRESHOLD,
            contrast_factor: Self::CONTRAST_FACTOR,
            text_threshold: Self::TEXT_THRESHOLD,
            darken_factor: Self::DARKEN_FACTOR,
            lighten_factor: Self::LIGHTEN_FACTOR,
            light_background_cutoff: Self::LIGHT_BACKGROUND_CUTOFF,
        }
    }
}

/// Decides whether two layers visually overlap and therefore need
/// distinguishable backgrounds.
pub trait OverlapPredicate: Send + Sync {
    fn overlaps(&self, a: &Layer, b: &Layer) -> bool;
}

/// Every pair overlaps. Used when no geometry is known.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllOverlap;

impl OverlapPredicate for AllOverlap {
    fn overlaps(&self, _a: &Layer, _b: &Layer) -> bool {
        true
    }
}

/// Rectangle intersection on layer bounds. A layer without bounds is
/// assumed to overlap everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundsOverlap;

impl OverlapPredicate for BoundsOverlap {
    fn overlaps(&self, a: &Layer, b: &Layer) -> bool {
        match (&a.bounds, &b.bounds) {
            (Some(ba), Some(bb)) => ba.intersects(bb),
            _ => true,
        }
    }
}

impl<F> OverlapPredicate for F
where
    F: Fn(&Layer, &Layer) -> bool + Send + Sync,
{
    fn overlaps(&self, a: &Layer, b: &Layer) -> bool {
        self(a, b)
    }
}

/// Push apart the backgrounds of overlapping layer pairs.
///
/// `backgrounds[i]` belongs to `layers[i]`. Pairs `(i, j)` with `i < j` are
/// visited in lexicographic order; when the two backgrounds are within
/// `pair_threshold`, the background of `j` is scaled by `contrast_factor`.
/// Each pair is adjusted at most once and never re-checked, so a later
/// adjustment can undo an earlier pair's separation.
pub fn repair_pairwise_contrast(
    backgrounds: &mut [Color],
    layers: &[Layer],
    overlap: &dyn OverlapPredicate,
    config: &RepairConfig,
) {
    let n = backgrounds.len().min(layers.len());
    for i in 0..n {
        for j in (i + 1)..n {
            if !overlap.overlaps(&layers[i], &layers[j]) {
                continue;
            }
            if backgrounds[i].distance(backgrounds[j]) <= config.pair_threshold {
                let adjusted = backgrounds[j].scale(config.contrast_factor);
                trace!(
                    "pair ({}, {}): {:?} -> {:?}",
                    layers[i].name,
                    layers[j].name,
                    backgrounds[j],
                    adjusted
                );
                backgrounds[j] = adjusted;
            }
        }
    }
}

/// Darken or lighten `text` when it sits too close to `background`.
/// One pass only; the result is not re-checked against the threshold.
pub fn repair_text_contrast(background: Color, text: Color, config: &RepairConfig) -> Color {
    if text.distance(background) > config.text_threshold {
        return text;
    }
    if background.channel_mean() > config.light_background_cutoff {
        text.scale(config.darken_factor)
    } else {
        text.scale(config.lighten_factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Bounds;

    fn layers(names: &[&str]) -> Vec<Layer> {
        names.iter().map(|n| Layer::new(*n)).collect()
    }

    #[test]
    fn close_pair_scales_second_exactly() {
        let mut bgs = vec![Color::new(100, 100, 100), Color::new(110, 120, 130)];
        repair_pairwise_contrast(&mut bgs, &layers(&["a", "b"]), &AllOverlap, &RepairConfig::default());
        assert_eq!(bgs[0], Color::new(100, 100, 100));
        assert_eq!(bgs[1], Color::new(132, 144, 156));
    }

    #[test]
    fn threshold_is_inclusive() {
        // distance exactly 100
        let mut bgs = vec![Color::new(0, 0, 0), Color::new(100, 0, 0)];
        repair_pairwise_contrast(&mut bgs, &layers(&["a", "b"]), &AllOverlap, &RepairConfig::default());
        assert_eq!(bgs[1], Color::new(120, 0, 0));
    }

    #[test]
    fn distant_pair_untouched() {
        let mut bgs = vec![Color::BLACK, Color::WHITE];
        repair_pairwise_contrast(&mut bgs, &layers(&["a", "b"]), &AllOverlap, &RepairConfig::default());
        assert_eq!(bgs, vec![Color::BLACK, Color::WHITE]);
    }

    #[test]
    fn identical_blacks_stay_black() {
        // scaling zero channels cannot separate them
        let mut bgs = vec![Color::BLACK, Color::BLACK];
        repair_pairwise_contrast(&mut bgs, &layers(&["a", "b"]), &AllOverlap, &RepairConfig::default());
        assert_eq!(bgs, vec![Color::BLACK, Color::BLACK]);
    }

    #[test]
    fn later_pairs_see_earlier_adjustments() {
        let c = Color::new(50, 50, 50);
        let mut bgs = vec![c, c, c];
        repair_pairwise_contrast(&mut bgs, &layers(&["a", "b", "c"]), &AllOverlap, &RepairConfig::default());
        // (a,b): b -> 60; (a,c): c -> 60; (b,c): 60 vs 60 -> c -> 72
        assert_eq!(bgs[0], c);
        assert_eq!(bgs[1], Color::new(60, 60, 60));
        assert_eq!(bgs[2], Color::new(72, 72, 72));
    }

    #[test]
    fn non_overlapping_pairs_skipped() {
        let c = Color::new(50, 50, 50);
        let mut bgs = vec![c, c];
        let never = |_: &Layer, _: &Layer| false;
        repair_pairwise_contrast(&mut bgs, &layers(&["a", "b"]), &never, &RepairConfig::default());
        assert_eq!(bgs, vec![c, c]);
    }

    #[test]
    fn bounds_overlap_uses_geometry() {
        let a = Layer::new("a").with_bounds(Bounds { x: 0.0, y: 0.0, width: 10.0, height: 10.0 });
        let b = Layer::new("b").with_bounds(Bounds { x: 20.0, y: 0.0, width: 10.0, height: 10.0 });
        let c = Layer::new("c").with_bounds(Bounds { x: 5.0, y: 5.0, width: 10.0, height: 10.0 });
        assert!(!BoundsOverlap.overlaps(&a, &b));
        assert!(BoundsOverlap.overlaps(&a, &c));
    }

    #[test]
    fn bounds_overlap_without_geometry_is_true() {
        let a = Layer::new("a").with_bounds(Bounds { x: 0.0, y: 0.0, width: 10.0, height: 10.0 });
        assert!(BoundsOverlap.overlaps(&a, &Layer::new("b")));
        assert!(BoundsOverlap.overlaps(&Layer::new("b"), &Layer::new("c")));
    }

    #[test]
    fn text_far_enough_is_identity() {
        let config = RepairConfig::default();
        let bg = Color::new(200, 200, 200);
        // distance ~346 > 120
        assert_eq!(repair_text_contrast(bg, Color::BLACK, &config), Color::BLACK);
    }

    #[test]
    fn black_text_on_dark_stays_black() {
        // distance ~17, mean 10 -> lighten, but 0 * 1.3 is still 0
        let out = repair_text_contrast(Color::new(10, 10, 10), Color::BLACK, &RepairConfig::default());
        assert_eq!(out, Color::BLACK);
    }

    #[test]
    fn light_background_darkens_text() {
        let out = repair_text_contrast(
            Color::new(200, 200, 200),
            Color::new(180, 190, 210),
            &RepairConfig::default(),
        );
        assert_eq!(out, Color::new(125, 133, 147));
    }

    #[test]
    fn dark_background_lightens_text() {
        let out = repair_text_contrast(
            Color::new(40, 40, 40),
            Color::new(60, 80, 100),
            &RepairConfig::default(),
        );
        assert_eq!(out, Color::new(78, 104, 130));
    }

    #[test]
    fn cutoff_mean_of_128_counts_as_dark() {
        let out = repair_text_contrast(
            Color::new(128, 128, 128),
            Color::new(100, 100, 100),
            &RepairConfig::default(),
        );
        assert_eq!(out, Color::new(130, 130, 130));
    }

    #[test]
    fn text_repair_is_single_pass() {
        // lightened text is still within threshold of the background
        let bg = Color::new(60, 60, 60);
        let out = repair_text_contrast(bg, Color::new(50, 50, 50), &RepairConfig::default());
        assert_eq!(out, Color::new(65, 65, 65));
        assert!(out.distance(bg) <= RepairConfig::TEXT_THRESHOLD);
    }
}
