use log::debug;
use secrecy::SecretString;

use crate::error::{AssignError, BoxError, Result};
use crate::math::color_parse::parse_css_color;
use crate::math::Color;

pub const DEFAULT_PALETTE_SIZE: usize = 5;
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Settings for the text-generation backend, built once by the host.
#[derive(Debug)]
pub struct GeneratorConfig {
    pub api_key: SecretString,
    pub model: String,
    pub palette_size: usize,
}

impl GeneratorConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            palette_size: DEFAULT_PALETTE_SIZE,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_palette_size(mut self, size: usize) -> Self {
        self.palette_size = size;
        self
    }
}

/// Opaque request/response call to a text-generation model.
pub trait PaletteGenerator {
    fn generate(&self, config: &GeneratorConfig, prompt: &str) -> std::result::Result<String, BoxError>;
}

impl<F> PaletteGenerator for F
where
    F: Fn(&GeneratorConfig, &str) -> std::result::Result<String, BoxError>,
{
    fn generate(&self, config: &GeneratorConfig, prompt: &str) -> std::result::Result<String, BoxError> {
        self(config, prompt)
    }
}

/// Append the palette instructions to a free-text design prompt.
pub fn build_palette_prompt(prompt: &str, size: usize) -> String {
    format!(
        "{} And make sure the colors are not too similar to each other and used together \
         to create a beautiful design. Also, the color palette must consist of {size} colors \
         and make sure to return the color codes of the color palette in hex format \
         and return only the color codes in the response, do not return text or anything else.",
        prompt.trim_end()
    )
}

/// Parse a generated response: whitespace-separated color codes, stray
/// commas and backticks ignored.
pub fn parse_palette_response(text: &str) -> Result<Vec<Color>> {
    let palette = text
        .split_whitespace()
        .map(|token| token.trim_matches(|c: char| c == ',' || c == '`'))
        .filter(|token| !token.is_empty())
        .map(|token| {
            parse_css_color(token).map_err(|e| AssignError::PaletteGeneration {
                message: format!("response contains non-color token {token:?}"),
                source: Some(Box::new(e)),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if palette.is_empty() {
        return Err(AssignError::generation("response contains no colors"));
    }
    Ok(palette)
}

/// Turns design prompts into palettes through an injected generator.
pub struct PaletteSource<G> {
    config: GeneratorConfig,
    generator: G,
}

impl<G: PaletteGenerator> PaletteSource<G> {
    pub fn new(config: GeneratorConfig, generator: G) -> Self {
        Self { config, generator }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Ask the generator for a palette. Failures are surfaced, never
    /// replaced with a default palette.
    pub fn generate(&self, prompt: &str) -> Result<Vec<Color>> {
        generate_palette(&self.config, &self.generator, prompt)
    }
}

/// Build the full prompt, call `generator` once and parse its response.
pub fn generate_palette(
    config: &GeneratorConfig,
    generator: &dyn PaletteGenerator,
    prompt: &str,
) -> Result<Vec<Color>> {
    let full_prompt = build_palette_prompt(prompt, config.palette_size);
    debug!("requesting {} colors from {}", config.palette_size, config.model);
    let response = generator
        .generate(config, &full_prompt)
        .map_err(|source| AssignError::PaletteGeneration {
            message: "generator call failed".to_string(),
            source: Some(source),
        })?;
    let palette = parse_palette_response(&response)?;
    debug!("generated palette: {palette:?}");
    Ok(palette)
}
