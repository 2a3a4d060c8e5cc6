use crate::error::{PlotError, PlotResult};
use serde::{Deserialize, Serialize};

/// Output image width (pixels).
pub const DEFAULT_WIDTH: u32 = 800;
/// Output image height (pixels).
pub const DEFAULT_HEIGHT: u32 = 600;
/// Upper bound on samples per render.
pub const DEFAULT_MAX_STEP_COUNT: usize = 1_000_000;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Chart canvas width in pixels.
    pub width: u32,
    /// Chart canvas height in pixels.
    pub height: u32,
    /// Largest step count a render request may ask for.
    pub max_step_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            max_step_count: DEFAULT_MAX_STEP_COUNT,
        }
    }
}

impl Config {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> PlotResult<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| PlotError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration back to TOML with comments.
    pub fn to_toml_string(&self) -> String {
        format!(
            "# funcplot configuration\n\
             \n\
             # Chart canvas size in pixels\n\
             width = {}\n\
             height = {}\n\
             \n\
             # Largest step count a render request may ask for\n\
             max_step_count = {}\n",
            self.width, self.height, self.max_step_count,
        )
    }

    pub fn validate(&self) -> PlotResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PlotError::config(format!(
                "canvas size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.max_step_count == 0 {
            return Err(PlotError::config("max_step_count must be at least 1"));
        }
        Ok(())
    }
}
