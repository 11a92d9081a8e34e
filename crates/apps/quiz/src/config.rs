use std::path::{Path, PathBuf};

use layers::Palette;
use scene::picking::GlobeConfig;
use scene::resolve::ResolveOptions;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::globe_controller::MotionConfig;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Pointer travel (Manhattan, pixels) below which a press is a click.
    pub click_threshold_px: f64,
    /// Quiet period after the last keystroke before a typed guess is judged.
    pub guess_debounce_s: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            click_threshold_px: 5.0,
            guess_debounce_s: 0.5,
        }
    }
}

/// Tunables for a quiz session. Every field has a default, so a config file
/// only needs the keys it overrides.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    pub motion: MotionConfig,
    pub interaction: InteractionConfig,
    pub resolve: ResolveOptions,
    pub globe: GlobeConfig,
    pub palette: Palette,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl QuizConfig {
    pub fn from_json_str(payload: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(payload)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let payload = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&payload)
    }
}
