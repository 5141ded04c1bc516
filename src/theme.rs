// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Theme colors and constants
//!
//! All colors use hexadecimal format: Color::from_rgba8(0xRR, 0xGG, 0xBB, 0xAA)

use peniko::Color;

// ============================================================================
// GRID LINES
// ============================================================================
const GRID_MAJOR: Color = Color::from_rgba8(0x00, 0x00, 0x00, 0x40); // 25%
const GRID_MINOR: Color = Color::from_rgba8(0x00, 0x00, 0x00, 0x1a); // 10%

const GRID_MAJOR_WIDTH: f64 = 0.8;
const GRID_MINOR_WIDTH: f64 = 0.5;

// ============================================================================
// LABELS
// ============================================================================
const LABEL_TEXT: Color = Color::from_rgba8(0x00, 0x00, 0x00, 0x80); // 50%

// Width that doesn't divide into whole units
const LABEL_OFF_GRID: Color = Color::from_rgb8(0xff, 0x00, 0x00);

// ============================================================================
// PUBLIC API - Don't edit below this line unless you know what you're doing
// ============================================================================

/// Colors and stroke widths for the unit grid
pub mod grid {
    use super::Color;

    /// Unit boundary lines
    pub const MAJOR: Color = super::GRID_MAJOR;
    /// Half-unit lines
    pub const MINOR: Color = super::GRID_MINOR;

    pub const MAJOR_WIDTH: f64 = super::GRID_MAJOR_WIDTH;
    pub const MINOR_WIDTH: f64 = super::GRID_MINOR_WIDTH;
}

/// Colors for the width and margin labels
pub mod label {
    use super::Color;

    pub const TEXT: Color = super::LABEL_TEXT;
    pub const OFF_GRID: Color = super::LABEL_OFF_GRID;
}
