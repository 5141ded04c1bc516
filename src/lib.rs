// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Patterning: a unit grid and sidebearing overlay for glyph editors.
//!
//! The overlay draws a vertical grid every `unit` design units across the
//! glyph box, with half-unit subdivisions, and labels the advance width and
//! both margins as unit counts. Widths that don't land on the grid are
//! flagged in red.
//!
//! [`layout`] holds the pure calculation. An editor plugs in through the
//! traits in [`host`], keeps a [`PatterningSession`] per glyph window, and
//! forwards its events to it:
//!
//! ```no_run
//! use patterning::{PatterningConfig, PatterningSession, UfoFont};
//! use patterning::surface::SceneSurface;
//! use kurbo::Affine;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = PatterningConfig::load_or_default("patterning.toml".as_ref());
//! let mut font = UfoFont::load("MyFont.ufo")?.with_config(&config);
//! font.set_current_glyph(Some("a"))?;
//!
//! let mut surface = SceneSurface::new(Affine::FLIP_Y);
//! let mut session = PatterningSession::new(config);
//! session.toggle_visibility(&mut font, &mut surface)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod host;
pub mod layout;
pub mod model;
pub mod render;
pub mod session;
pub mod settings;
pub mod surface;
pub mod theme;

pub use config::PatterningConfig;
pub use host::{DrawingSurface, GlyphMetrics, MetricsProvider, UnitStore};
pub use layout::{
    GridLayout, GridLine, Label, LayoutError, Metrics, compute_grid_lines, compute_labels,
    compute_layout,
};
pub use model::UfoFont;
pub use session::{PatterningHost, PatterningSession, SessionError};
