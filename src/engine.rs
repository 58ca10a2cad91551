use std::any::Any;
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};

use log::{debug, error};
use rayon::prelude::*;

use crate::config::AssignConfig;
use crate::error::{AssignError, Result};
use crate::math::color::checked_channels;
use crate::math::color_parse::parse_css_color;
use crate::math::Color;
use crate::model::{Assignment, Bounds, Layer, LayerColors};
use crate::palette::order_palette_by_distinctiveness;
use crate::repair::repair_text_contrast;
use crate::strategy::AssignmentStrategy;
use crate::types::{AssignOptions, AssignRequest, LayerAssignment, LayerInput, PaletteEntry};

/// Run one pipeline stage. A panic inside the stage becomes
/// `AssignError::Internal` naming the stage; internal failures are logged
/// before they are returned.
pub(crate) fn run_stage<T>(stage: &'static str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        Err(AssignError::Internal {
            stage,
            message: panic_message(payload.as_ref()),
        })
    });
    if let Err(err @ AssignError::Internal { .. }) = &outcome {
        error!("{stage} failed: {err}");
    }
    outcome
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Reject an empty palette and missing or duplicate layer names.
pub fn validate(palette: &[Color], layers: &[Layer]) -> Result<()> {
    if palette.is_empty() {
        return Err(AssignError::invalid("palette is empty"));
    }
    let mut seen = HashSet::with_capacity(layers.len());
    for (i, layer) in layers.iter().enumerate() {
        if layer.name.trim().is_empty() {
            return Err(AssignError::invalid(format!("layer at index {i} has no name")));
        }
        if !seen.insert(layer.name.as_str()) {
            return Err(AssignError::invalid(format!("duplicate layer name {:?}", layer.name)));
        }
    }
    Ok(())
}

/// Assign colors to every layer with the given strategy.
///
/// Validates the input, lets the strategy choose backgrounds, then runs the
/// text-contrast repair for each layer. Either every layer gets an entry or
/// the call fails; partial assignments are never returned.
pub fn assign(
    strategy: &dyn AssignmentStrategy,
    palette: &[Color],
    layers: &[Layer],
) -> Result<Assignment> {
    validate(palette, layers)?;
    debug!(
        "assigning {} layers from {} colors with {} strategy",
        layers.len(),
        palette.len(),
        strategy.kind()
    );

    let backgrounds = strategy.backgrounds(palette, layers)?;
    if backgrounds.len() != layers.len() {
        let err = AssignError::Internal {
            stage: "background assignment",
            message: format!("{} backgrounds for {} layers", backgrounds.len(), layers.len()),
        };
        error!("{err}");
        return Err(err);
    }

    let repair = strategy.repair_config();
    let assignment = run_stage("text repair", || {
        Ok(layers
            .iter()
            .zip(backgrounds)
            .map(|(layer, background)| {
                let text_color = repair_text_contrast(background, layer.text_color_or_default(), repair);
                (
                    layer.name.clone(),
                    LayerColors {
                        background_color: background,
                        text_color,
                    },
                )
            })
            .collect::<Assignment>())
    })?;

    debug!("assignment complete: {} entries", assignment.len());
    Ok(assignment)
}

/// Assign the same layers against several palettes in parallel.
/// Fails as a whole if any palette fails.
pub fn assign_many(
    strategy: &dyn AssignmentStrategy,
    palettes: &[Vec<Color>],
    layers: &[Layer],
) -> Result<Vec<Assignment>> {
    palettes
        .par_iter()
        .map(|palette| assign(strategy, palette, layers))
        .collect()
}

/// Convert plugin layers into validated domain layers.
pub fn into_layers(inputs: &[LayerInput]) -> Result<Vec<Layer>> {
    inputs
        .iter()
        .enumerate()
        .map(|(i, input)| {
            let name = input
                .name
                .as_deref()
                .filter(|n| !n.trim().is_empty())
                .ok_or_else(|| AssignError::invalid(format!("layer at index {i} has no name")))?;
            let in_layer = |e: AssignError| AssignError::invalid(format!("layer {name:?}: {e}"));
            // the intrinsic color stays unquantized for nearest matching
            let color = input
                .color
                .as_deref()
                .map(checked_channels)
                .transpose()
                .map_err(in_layer)?;
            let text_color = input
                .text_color
                .as_deref()
                .map(Color::from_channels)
                .transpose()
                .map_err(in_layer)?;
            Ok(Layer {
                name: name.to_string(),
                color,
                text_color,
                bounds: input.bounds.map(|b| Bounds {
                    x: b.x,
                    y: b.y,
                    width: b.width,
                    height: b.height,
                }),
            })
        })
        .collect()
}

pub fn palette_from_channels(palette: &[Vec<f64>]) -> Result<Vec<Color>> {
    palette.iter().map(|c| Color::from_channels(c)).collect()
}

/// Entry point for the `orderPalette` export.
pub fn order_palette_inputs(palette: &[Vec<f64>]) -> Result<Vec<Color>> {
    let palette = palette_from_channels(palette)?;
    if palette.is_empty() {
        return Err(AssignError::invalid("palette is empty"));
    }
    Ok(order_palette_by_distinctiveness(&palette))
}

fn palette_from_entries(palette: &[PaletteEntry]) -> Result<Vec<Color>> {
    palette
        .iter()
        .map(|entry| match entry {
            PaletteEntry::Channels(channels) => Color::from_channels(channels),
            PaletteEntry::Css(code) => parse_css_color(code),
        })
        .collect()
}

/// Flatten an assignment back into input order for JS.
fn to_layer_assignments(layers: &[Layer], assignment: &Assignment) -> Result<Vec<LayerAssignment>> {
    layers
        .iter()
        .map(|layer| {
            let colors = assignment.get(&layer.name).ok_or_else(|| AssignError::Internal {
                stage: "output",
                message: format!("no entry for layer {:?}", layer.name),
            })?;
            Ok(LayerAssignment {
                name: layer.name.clone(),
                background_color: colors.background_color.into(),
                text_color: colors.text_color.into(),
            })
        })
        .collect()
}

/// Entry point for the `assignColors` export.
pub fn assign_inputs(
    palette: &[Vec<f64>],
    layers: &[LayerInput],
    options: Option<&AssignOptions>,
) -> Result<Vec<LayerAssignment>> {
    let config = AssignConfig::from_options(options)?;
    let palette = palette_from_channels(palette)?;
    let layers = into_layers(layers)?;
    let assignment = assign(config.build_strategy().as_ref(), &palette, &layers)?;
    to_layer_assignments(&layers, &assignment)
}

/// Entry point for the `assignPalettes` export.
pub fn assign_palettes_inputs(
    palettes: &[Vec<Vec<f64>>],
    layers: &[LayerInput],
    options: Option<&AssignOptions>,
) -> Result<Vec<Vec<LayerAssignment>>> {
    let config = AssignConfig::from_options(options)?;
    let palettes = palettes
        .iter()
        .map(|p| palette_from_channels(p))
        .collect::<Result<Vec<_>>>()?;
    let layers = into_layers(layers)?;
    let assignments = assign_many(config.build_strategy().as_ref(), &palettes, &layers)?;
    assignments
        .iter()
        .map(|assignment| to_layer_assignments(&layers, assignment))
        .collect()
}

/// Handle a raw JSON request `{ "layers": [...], "palette": [...] }` and
/// return the assignment as `{ name: { background_color, text_color } }`.
/// Options in the request body take precedence over `options`.
pub fn assign_json(request_json: &str, options: Option<&AssignOptions>) -> Result<String> {
    let request: AssignRequest = serde_json::from_str(request_json)
        .map_err(|e| AssignError::invalid(format!("malformed request: {e}")))?;
    let config = AssignConfig::from_options(request.options.as_ref().or(options))?;
    let palette = palette_from_entries(&request.palette)?;
    let layers = into_layers(&request.layers)?;
    let assignment = assign(config.build_strategy().as_ref(), &palette, &layers)?;
    serde_json::to_string(&assignment).map_err(|e| AssignError::Internal {
        stage: "output",
        message: e.to_string(),
    })
}
