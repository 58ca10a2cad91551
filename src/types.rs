use napi_derive::napi;
use serde::Deserialize;

/// A layer as sent from the plugin. Colors are `[r, g, b]` with 0-255 channels.
#[napi(object)]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayerInput {
    pub name: Option<String>,
    /// Current fill of the layer; used by the nearest-match strategy.
    pub color: Option<Vec<f64>>,
    /// Defaults to black.
    pub text_color: Option<Vec<f64>>,
    pub bounds: Option<BoundsInput>,
}

#[napi(object)]
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct BoundsInput {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Per-call configuration passed from JS to Rust. Every field is optional.
#[napi(object)]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignOptions {
    /// "distinctiveness" | "luminance" | "sequential" | "nearest"
    pub strategy: Option<String>,
    /// "all" | "bounds"
    pub overlap: Option<String>,
    pub pair_threshold: Option<f64>,
    pub contrast_factor: Option<f64>,
    pub text_threshold: Option<f64>,
}

/// Resolved colors for one layer, returned to JS in input order.
#[napi(object)]
#[derive(Debug, Clone, PartialEq)]
pub struct LayerAssignment {
    pub name: String,
    pub background_color: Vec<u32>,
    pub text_color: Vec<u32>,
}

/// Palette entry in a JSON request: channel array or CSS color string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PaletteEntry {
    Channels(Vec<f64>),
    Css(String),
}

/// Body of a JSON assignment request, `{ "layers": [...], "palette": [...] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignRequest {
    pub layers: Vec<LayerInput>,
    pub palette: Vec<PaletteEntry>,
    pub options: Option<AssignOptions>,
}
