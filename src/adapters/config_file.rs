//! JSON file configuration adapter.
//!
//! Implements [`ConfigPort`] on top of a single JSON document on the host
//! filesystem.  A missing file is not an error: the defaults are used.
//! Fields absent from the document also fall back to their defaults.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::IncubatorConfig;

pub struct JsonConfigFile {
    path: PathBuf,
}

impl JsonConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<IncubatorConfig, ConfigError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("JsonConfigFile: {} not found, using defaults", self.path.display());
                return Ok(IncubatorConfig::default());
            }
            Err(e) => {
                warn!("JsonConfigFile: reading {} failed: {e}", self.path.display());
                return Err(ConfigError::IoError);
            }
        };
        let cfg: IncubatorConfig = serde_json::from_str(&text).map_err(|e| {
            warn!("JsonConfigFile: {} is not valid config: {e}", self.path.display());
            ConfigError::Corrupted
        })?;
        cfg.validate()?;
        info!("JsonConfigFile: loaded config from {}", self.path.display());
        Ok(cfg)
    }

    fn save(&self, config: &IncubatorConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let text = serde_json::to_string_pretty(config).map_err(|_| ConfigError::IoError)?;
        fs::write(&self.path, text).map_err(|e| {
            warn!("JsonConfigFile: writing {} failed: {e}", self.path.display());
            ConfigError::IoError
        })?;
        info!("JsonConfigFile: config saved to {}", self.path.display());
        Ok(())
    }
}
