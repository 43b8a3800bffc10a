//! Settings file (`config.toml`)
//!
//! Every field is optional; a missing file means all defaults.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::highlight::LexiconSettings;
use crate::style::{Palette, Rgba};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Theme name from the registry
    pub theme: Option<String>,
    pub base_size: Option<f32>,
    pub highlight: LexiconSettings,
    /// Per-color overrides applied on top of the theme
    pub colors: PaletteOverrides,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaletteOverrides {
    pub foreground: Option<Rgba>,
    pub contrast: Option<Rgba>,
    pub symbol: Option<Rgba>,
    pub string: Option<Rgba>,
    pub link: Option<Rgba>,
}

impl PaletteOverrides {
    pub fn apply(&self, palette: &mut Palette) {
        let slots = [
            (self.foreground, &mut palette.foreground),
            (self.contrast, &mut palette.contrast),
            (self.symbol, &mut palette.symbol),
            (self.string, &mut palette.string),
            (self.link, &mut palette.link),
        ];
        for (value, slot) in slots {
            if let Some(color) = value {
                *slot = color;
            }
        }
    }
}

impl Settings {
    /// `<config dir>/mdspan/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("mdspan").join("config.toml"))
    }

    /// Load settings from `path`; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let settings = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Loaded config");
        Ok(settings)
    }
}
