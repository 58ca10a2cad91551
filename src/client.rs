use napi::{Env, JsFunction};
use secrecy::ExposeSecret;

use crate::error::BoxError;
use crate::generator::{self, GeneratorConfig};

/// JS handle on palette generation. Holds the generator settings; the host
/// supplies the model call as a callback on every `generate`.
#[napi]
pub struct PaletteClient {
    config: GeneratorConfig,
}

#[napi]
impl PaletteClient {
    #[napi(constructor)]
    pub fn new(api_key: String, model: Option<String>, palette_size: Option<u32>) -> Self {
        let mut config = GeneratorConfig::new(api_key);
        if let Some(model) = model {
            config = config.with_model(model);
        }
        if let Some(size) = palette_size {
            config = config.with_palette_size(size as usize);
        }
        Self { config }
    }

    #[napi(getter)]
    pub fn model(&self) -> String {
        self.config.model.clone()
    }

    #[napi(getter)]
    pub fn palette_size(&self) -> u32 {
        self.config.palette_size as u32
    }

    /// Calls `callback(prompt, model, apiKey)` once and parses the string it
    /// returns into `[r, g, b]` colors. A thrown callback or an unparsable
    /// response rejects with the generation error.
    #[napi]
    pub fn generate(
        &self,
        env: Env,
        prompt: String,
        callback: JsFunction,
    ) -> napi::Result<Vec<Vec<u32>>> {
        let call = |config: &GeneratorConfig, full_prompt: &str| -> napi::Result<String> {
            let args = [
                env.create_string(full_prompt)?,
                env.create_string(&config.model)?,
                env.create_string(config.api_key.expose_secret())?,
            ];
            let response = callback.call(None, &args)?;
            response.coerce_to_string()?.into_utf8()?.into_owned()
        };
        let js_generator = |config: &GeneratorConfig, full_prompt: &str| {
            call(config, full_prompt).map_err(|e| BoxError::from(e.reason))
        };
        let palette = generator::generate_palette(&self.config, &js_generator, &prompt)?;
        Ok(palette.into_iter().map(Vec::from).collect())
    }
}
