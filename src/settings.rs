// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Overlay settings and configuration constants.
//!
//! This module holds non-visual settings that stay stable across theme
//! changes. Visual styling (colors, stroke widths) belongs in `theme.rs`.

// ============================================================================
// UNIT SETTINGS
// ============================================================================
/// Grid unit used when the font has no stored unit yet (design units)
const DEFAULT_UNIT: i64 = 20;

/// Font lib key holding the unit (shared with Glyphs' unitizer parameter)
const UNIT_LIB_KEY: &str = "com.schriftgestaltung.customParameter.GSFontMaster.unitizerUnit";

// ============================================================================
// GRID SETTINGS
// ============================================================================
/// Whole units of extra grid drawn past a negative margin
const NEGATIVE_MARGIN_OVERSHOOT: f64 = 2.0;

/// Tolerance when counting unit steps, so 0.1-style units still reach the end
const STEP_EPSILON: f64 = 1e-9;

/// Past this many unit lines the grid is unreadable, so none is drawn
const MAX_MAJOR_LINES: usize = 10_000;

// ============================================================================
// LABEL SETTINGS
// ============================================================================
/// Text prefix marking the width label
const WIDTH_LABEL_PREFIX: &str = "|||";

/// Decimal places shown for a fractional unit count
const FRACTION_DIGITS: usize = 3;

/// Width label offset right of the advance (design units)
const WIDTH_LABEL_DX: f64 = 3.0;
/// Width label offset above the top of the grid (design units)
const WIDTH_LABEL_DY: f64 = 20.0;

/// Left margin label offset left of the origin (design units)
const LEFT_LABEL_DX: f64 = -6.0;
/// Right margin label offset right of the advance (design units)
const RIGHT_LABEL_DX: f64 = 6.0;
/// Margin labels sit this far below the bottom of the grid (design units)
const MARGIN_LABEL_DROP: f64 = 40.0;

/// Label font size (screen points, independent of zoom)
const LABEL_POINT_SIZE: f64 = 12.0;

// ============================================================================
// PUBLIC API - Don't edit below this line unless you know what you're doing
// ============================================================================

/// Unit storage settings
pub mod unit {
    /// Grid unit used when the font has no stored unit yet
    pub const DEFAULT: i64 = super::DEFAULT_UNIT;

    /// Font lib key holding the unit
    pub const LIB_KEY: &str = super::UNIT_LIB_KEY;
}

/// Grid line layout settings
pub mod grid {
    /// Extra whole units drawn past a negative margin
    pub const NEGATIVE_MARGIN_OVERSHOOT: f64 = super::NEGATIVE_MARGIN_OVERSHOOT;

    /// Tolerance when counting unit steps
    pub const STEP_EPSILON: f64 = super::STEP_EPSILON;

    /// Unit lines above which no grid is drawn
    pub const MAX_MAJOR_LINES: usize = super::MAX_MAJOR_LINES;
}

/// Measurement label settings
///
/// Offsets are in design units relative to the glyph box; the point size
/// is in screen points.
pub mod label {
    pub const WIDTH_PREFIX: &str = super::WIDTH_LABEL_PREFIX;
    pub const FRACTION_DIGITS: usize = super::FRACTION_DIGITS;

    pub const WIDTH_DX: f64 = super::WIDTH_LABEL_DX;
    pub const WIDTH_DY: f64 = super::WIDTH_LABEL_DY;

    pub const LEFT_DX: f64 = super::LEFT_LABEL_DX;
    pub const RIGHT_DX: f64 = super::RIGHT_LABEL_DX;
    pub const MARGIN_DROP: f64 = super::MARGIN_LABEL_DROP;

    pub const POINT_SIZE: f64 = super::LABEL_POINT_SIZE;
}
