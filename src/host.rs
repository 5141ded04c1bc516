// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! The seams between the overlay and the editor hosting it.
//!
//! A host supplies glyph metrics, stores the grid unit with the font, and
//! provides somewhere to draw. The session only talks to these traits, so
//! the same overlay logic runs against a UFO on disk, a live editor, or a
//! recording surface in tests.

use kurbo::{Line, Point};
use peniko::Color;

pub use crate::layout::TextAlign;

/// Measurements of the glyph currently being edited
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMetrics {
    pub width: f64,
    pub left_margin: f64,
    pub right_margin: f64,
    pub descender: f64,
    pub units_per_em: f64,
}

/// Read access to the current glyph's metrics
pub trait MetricsProvider {
    /// Metrics of the active glyph, or `None` when no glyph is set
    fn glyph_metrics(&self) -> Option<GlyphMetrics>;
}

/// Per-font storage for the grid unit
pub trait UnitStore {
    /// The stored unit, or `None` if the font has never had one
    fn stored_unit(&self) -> Option<i64>;

    /// Persist a new unit with the font
    fn store_unit(&mut self, unit: i64);
}

/// Read the stored unit, writing `default` first if the font has none
pub fn read_unit_or_init<S: UnitStore + ?Sized>(store: &mut S, default: i64) -> i64 {
    match store.stored_unit() {
        Some(unit) => unit,
        None => {
            tracing::info!("No grid unit stored in font, initializing to {}", default);
            store.store_unit(default);
            default
        }
    }
}

/// Somewhere the overlay can draw lines and text.
///
/// Coordinates are in design space; the surface owns the mapping to the
/// screen.
pub trait DrawingSurface {
    /// Remove everything previously drawn by the overlay
    fn clear(&mut self);

    fn add_line(&mut self, line: Line, color: Color, stroke_width: f64);

    /// Draw `text` anchored at `position`. `point_size` is in screen points.
    fn add_text(
        &mut self,
        position: Point,
        point_size: f64,
        color: Color,
        align: TextAlign,
        text: &str,
    );
}
