#[macro_use]
extern crate napi_derive;

pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod generator;
pub mod math;
pub mod model;
pub mod palette;
pub mod repair;
pub mod strategy;
pub mod types;

use math::Color;
use types::{AssignOptions, LayerAssignment, LayerInput};

#[napi]
pub fn health_check() -> String {
    "palette-assign-native ok".to_string()
}

/// Assign background and text colors to `layers` from `palette`.
/// Results come back in layer order.
#[napi]
pub fn assign_colors(
    palette: Vec<Vec<f64>>,
    layers: Vec<LayerInput>,
    options: Option<AssignOptions>,
) -> napi::Result<Vec<LayerAssignment>> {
    Ok(engine::assign_inputs(&palette, &layers, options.as_ref())?)
}

/// Run the same layers against several palettes in parallel.
#[napi]
pub fn assign_palettes(
    palettes: Vec<Vec<Vec<f64>>>,
    layers: Vec<LayerInput>,
    options: Option<AssignOptions>,
) -> napi::Result<Vec<Vec<LayerAssignment>>> {
    Ok(engine::assign_palettes_inputs(&palettes, &layers, options.as_ref())?)
}

/// JSON in, JSON out: `{ layers, palette }` -> `{ name: { background_color, text_color } }`.
#[napi]
pub fn assign_colors_json(request: String, options: Option<AssignOptions>) -> napi::Result<String> {
    Ok(engine::assign_json(&request, options.as_ref())?)
}

#[napi]
pub fn order_palette(palette: Vec<Vec<f64>>) -> napi::Result<Vec<Vec<u32>>> {
    Ok(to_channels(engine::order_palette_inputs(&palette)?))
}

#[napi]
pub fn contrast_ratio(a: Vec<f64>, b: Vec<f64>) -> napi::Result<f64> {
    let a = Color::from_channels(&a)?;
    let b = Color::from_channels(&b)?;
    Ok(math::wcag::contrast_ratio(a, b))
}

#[napi]
pub fn color_to_hex(color: Vec<f64>) -> napi::Result<String> {
    Ok(math::hex::to_hex(Color::from_channels(&color)?))
}

/// CSS color strings (hex, rgb(), hsl(), names) to `[r, g, b]`.
#[napi]
pub fn parse_palette(codes: Vec<String>) -> napi::Result<Vec<Vec<u32>>> {
    Ok(to_channels(math::color_parse::parse_palette(&codes)?))
}

#[napi]
pub fn build_palette_prompt(prompt: String, size: Option<u32>) -> String {
    let size = size.map_or(generator::DEFAULT_PALETTE_SIZE, |s| s as usize);
    generator::build_palette_prompt(&prompt, size)
}

#[napi]
pub fn parse_palette_response(text: String) -> napi::Result<Vec<Vec<u32>>> {
    Ok(to_channels(generator::parse_palette_response(&text)?))
}

fn to_channels(colors: Vec<Color>) -> Vec<Vec<u32>> {
    colors.into_iter().map(Vec::from).collect()
}
