use crate::math::color::mean_color;
use crate::math::wcag::contrast_ratio;
use crate::math::Color;

/// Sort palette colors by descending distance from the palette mean, so the
/// most distinctive entries come first. Ties keep their original order.
pub fn order_palette_by_distinctiveness(palette: &[Color]) -> Vec<Color> {
    let Some(mean) = mean_color(palette) else {
        return Vec::new();
    };

    let mut ranked: Vec<(Color, f64)> = palette.iter().map(|&c| (c, c.distance(mean))).collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.into_iter().map(|(c, _)| c).collect()
}

/// Pick the color with the lowest average contrast ratio against every other
/// palette entry. A one-color palette returns that color; ties keep the
/// earliest entry. `None` only for an empty palette.
pub fn pick_background_by_luminance(palette: &[Color]) -> Option<Color> {
    if palette.len() <= 1 {
        return palette.first().copied();
    }

    let others = (palette.len() - 1) as f64;
    let mut best: Option<(Color, f64)> = None;
    for (i, &candidate) in palette.iter().enumerate() {
        let total: f64 = palette
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(_, &other)| contrast_ratio(candidate, other))
            .sum();
        let average = total / others;
        match best {
            Some((_, lowest)) if average >= lowest => {}
            _ => best = Some((candidate, average)),
        }
    }
    best.map(|(c, _)| c)
}

/// Palette entry closest to `target`; earliest entry wins a tie.
/// `target` is compared at full precision, before any quantization.
pub fn nearest_color(target: [f64; 3], palette: &[Color]) -> Option<Color> {
    let mut best: Option<(Color, f64)> = None;
    for &candidate in palette {
        let d = candidate.distance_to(target);
        match best {
            Some((_, closest)) if d >= closest => {}
            _ => best = Some((candidate, d)),
        }
    }
    best.map(|(c, _)| c)
}
