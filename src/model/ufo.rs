// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! UFO-backed host for the overlay.
//!
//! `UfoFont` wraps a `norad` font: it measures the glyph being edited and
//! keeps the grid unit in the font lib, where other tools (Glyphs'
//! unitizer) read it too. Changes stay in memory until [`UfoFont::save`].

use anyhow::{Context, Result, bail};
use norad::Font;
use std::path::{Path, PathBuf};

use super::outline::horizontal_bounds;
use crate::config::PatterningConfig;
use crate::host::{GlyphMetrics, MetricsProvider, UnitStore};
use crate::settings;

/// Fallback when the font info has no unitsPerEm
const DEFAULT_UNITS_PER_EM: f64 = 1000.0;

/// A loaded UFO and the glyph currently shown in the editor
#[derive(Debug, Clone)]
pub struct UfoFont {
    /// Path to the UFO directory
    path: PathBuf,
    font: Font,
    /// Font lib key the unit is stored under
    unit_key: String,
    current_glyph: Option<String>,
}

impl UfoFont {
    /// Load a UFO from a directory path
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let font =
            Font::load(path).with_context(|| format!("Failed to load UFO from {:?}", path))?;
        tracing::info!("Loaded {} for patterning", path.display());
        Ok(Self::from_font(font, path))
    }

    /// Wrap an already loaded font; `path` is where [`save`](Self::save)
    /// writes it
    pub fn from_font<P: AsRef<Path>>(font: Font, path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            font,
            unit_key: settings::unit::LIB_KEY.to_string(),
            current_glyph: None,
        }
    }

    /// Store the unit under a different lib key
    pub fn with_unit_key(mut self, key: impl Into<String>) -> Self {
        self.unit_key = key.into();
        self
    }

    /// Apply the font-side parts of a user config (the unit lib key)
    pub fn with_config(self, config: &PatterningConfig) -> Self {
        self.with_unit_key(config.unit_lib_key.as_str())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn current_glyph(&self) -> Option<&str> {
        self.current_glyph.as_deref()
    }

    /// Switch the glyph being measured. `None` means no glyph is open.
    pub fn set_current_glyph(&mut self, name: Option<&str>) -> Result<()> {
        if let Some(name) = name {
            if self.font.default_layer().get_glyph(name).is_none() {
                bail!("Glyph '{}' not found in {:?}", name, self.path);
            }
        }
        self.current_glyph = name.map(str::to_string);
        Ok(())
    }

    /// Change a glyph's advance width
    pub fn set_glyph_width(&mut self, name: &str, width: f64) -> Result<()> {
        let glyph = self
            .font
            .default_layer_mut()
            .get_glyph_mut(name)
            .with_context(|| format!("Glyph '{}' not found", name))?;
        glyph.width = width;
        Ok(())
    }

    pub fn units_per_em(&self) -> f64 {
        self.font
            .font_info
            .units_per_em
            .map(|n| n.as_f64())
            .unwrap_or(DEFAULT_UNITS_PER_EM)
    }

    pub fn descender(&self) -> f64 {
        self.font.font_info.descender.unwrap_or(0.0)
    }

    /// Measure a glyph by name.
    ///
    /// Margins come from the outline's horizontal bounds, components
    /// included. A glyph with no outline has a left margin of 0 and a right
    /// margin equal to its width.
    pub fn metrics_for(&self, name: &str) -> Option<GlyphMetrics> {
        let layer = self.font.default_layer();
        let glyph = layer.get_glyph(name)?;
        let (left_margin, right_margin) = match horizontal_bounds(glyph, layer) {
            Some((min_x, max_x)) => (min_x, glyph.width - max_x),
            None => (0.0, glyph.width),
        };
        Some(GlyphMetrics {
            width: glyph.width,
            left_margin,
            right_margin,
            descender: self.descender(),
            units_per_em: self.units_per_em(),
        })
    }

    /// Save the UFO back to disk
    pub fn save(&self) -> Result<()> {
        self.font
            .save(&self.path)
            .with_context(|| format!("Failed to save UFO to {:?}", self.path))?;
        Ok(())
    }
}

impl MetricsProvider for UfoFont {
    fn glyph_metrics(&self) -> Option<GlyphMetrics> {
        self.metrics_for(self.current_glyph.as_deref()?)
    }
}

impl UnitStore for UfoFont {
    /// Accepts integer, real and numeric string values; reals are
    /// truncated toward zero.
    fn stored_unit(&self) -> Option<i64> {
        let value = self.font.lib.get(&self.unit_key)?;
        let unit = value
            .as_signed_integer()
            .or_else(|| value.as_real().map(|r| r.trunc() as i64))
            .or_else(|| value.as_string().and_then(|s| s.trim().parse().ok()));
        if unit.is_none() {
            tracing::warn!("Ignoring unreadable grid unit under '{}'", self.unit_key);
        }
        unit
    }

    fn store_unit(&mut self, unit: i64) {
        self.font.lib.insert(self.unit_key.clone(), unit.into());
    }
}
