// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! User configuration for the overlay.
//!
//! Loaded from a TOML file; every field is optional and falls back to the
//! constants in `settings.rs`.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::settings;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatterningConfig {
    /// Unit written to fonts that don't have one yet
    pub default_unit: i64,

    /// Font lib key the unit is stored under
    pub unit_lib_key: String,

    /// Label font size in screen points
    pub label_point_size: f64,

    /// Whether the overlay starts visible
    pub show_on_start: bool,
}

impl Default for PatterningConfig {
    fn default() -> Self {
        Self {
            default_unit: settings::unit::DEFAULT,
            unit_lib_key: settings::unit::LIB_KEY.to_string(),
            label_point_size: settings::label::POINT_SIZE,
            show_on_start: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

impl PatterningConfig {
    /// Parse config from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        Ok(config.sanitized())
    }

    /// Load config from a path
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load config from a path, or return the defaults if it can't be read
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Using default config, {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to a path
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Replace unusable values with defaults
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.default_unit <= 0 {
            tracing::warn!(
                "Ignoring non-positive default_unit {}, using {}",
                self.default_unit,
                defaults.default_unit
            );
            self.default_unit = defaults.default_unit;
        }
        if !(self.label_point_size > 0.0) {
            self.label_point_size = defaults.label_point_size;
        }
        if self.unit_lib_key.is_empty() {
            self.unit_lib_key = defaults.unit_lib_key;
        }
        self
    }
}
