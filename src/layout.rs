// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Grid and measurement layout for the patterning overlay.
//!
//! Everything here is a pure function of [`Metrics`]: the same input always
//! produces the same lines and labels, and nothing outside the call is
//! touched. Coordinates are in design space (y up).
//!
//! Grid lines run from the origin to the advance width, one major line per
//! unit with a minor line at each half unit. When a margin is negative the
//! outline pokes out of the glyph box, so the grid is extended past it by
//! [`settings::grid::NEGATIVE_MARGIN_OVERSHOOT`] extra units.

use kurbo::{Line, Point};
use thiserror::Error;

use crate::settings;

// ============================================================================
// ERRORS
// ============================================================================

/// Errors raised when the layout input is unusable
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum LayoutError {
    #[error("grid unit must be a positive number, got {0}")]
    InvalidUnit(f64),
}

// ============================================================================
// INPUT
// ============================================================================

/// Font and glyph measurements the overlay is computed from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    /// Grid spacing in design units (must be > 0)
    pub unit: f64,
    pub descender: f64,
    pub units_per_em: f64,
    /// Advance width of the glyph
    pub width: f64,
    pub left_margin: f64,
    pub right_margin: f64,
}

impl Metrics {
    /// Lower end of every grid line
    pub fn bottom(&self) -> f64 {
        self.descender
    }

    /// Upper end of every grid line
    pub fn top(&self) -> f64 {
        self.units_per_em + self.descender
    }

    fn checked_unit(&self) -> Result<f64, LayoutError> {
        if self.unit.is_finite() && self.unit > 0.0 {
            Ok(self.unit)
        } else {
            Err(LayoutError::InvalidUnit(self.unit))
        }
    }
}

// ============================================================================
// OUTPUT
// ============================================================================

/// Visual weight of a grid line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEmphasis {
    /// Unit boundary
    Major,
    /// Half-unit subdivision
    Minor,
}

/// A vertical grid line at `x`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub x: f64,
    pub emphasis: LineEmphasis,
}

impl GridLine {
    fn major(x: f64) -> Self {
        Self {
            x,
            emphasis: LineEmphasis::Major,
        }
    }

    fn minor(x: f64) -> Self {
        Self {
            x,
            emphasis: LineEmphasis::Minor,
        }
    }

    /// The line segment between `bottom` and `top` in design space
    pub fn to_line(&self, bottom: f64, top: f64) -> Line {
        Line::new(Point::new(self.x, bottom), Point::new(self.x, top))
    }
}

/// Which measurement a label reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Width,
    LeftMargin,
    RightMargin,
}

/// Whether a measurement is a whole number of units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelEmphasis {
    Exact,
    Fractional,
}

/// Horizontal anchoring of label text at its position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// Text starts at the position
    Left,
    /// Text ends at the position
    Right,
}

/// A measurement label, expressed in units
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub kind: LabelKind,
    pub position: Point,
    pub text: String,
    pub emphasis: LabelEmphasis,
    pub align: TextAlign,
}

impl Label {
    /// A width that doesn't land on the grid gets a warning color
    pub fn is_highlighted(&self) -> bool {
        self.kind == LabelKind::Width && self.emphasis == LabelEmphasis::Fractional
    }
}

/// Everything the overlay draws for one glyph
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    /// Grid lines in ascending `x`
    pub lines: Vec<GridLine>,
    /// Width, left margin and right margin labels, in that order
    pub labels: [Label; 3],
    /// Lower end of every grid line
    pub bottom: f64,
    /// Upper end of every grid line
    pub top: f64,
}

// ============================================================================
// CALCULATION
// ============================================================================

/// Compute the full overlay for `metrics`
pub fn compute_layout(metrics: &Metrics) -> Result<GridLayout, LayoutError> {
    Ok(GridLayout {
        lines: compute_grid_lines(metrics)?,
        labels: compute_labels(metrics)?,
        bottom: metrics.bottom(),
        top: metrics.top(),
    })
}

/// Compute the grid lines, ordered by ascending `x`.
///
/// Major lines are placed every `unit` from the start offset to
/// `width + end` inclusive; each major line left of that bound is followed
/// by a minor line half a unit to its right. Ties in the margin rounding go
/// to the even neighbour, so a left margin of -2.5 units rounds to -2.
///
/// Returns an empty sequence when the range is degenerate, when a bound is
/// not finite, or when the range would need more than
/// [`settings::grid::MAX_MAJOR_LINES`] lines.
pub fn compute_grid_lines(metrics: &Metrics) -> Result<Vec<GridLine>, LayoutError> {
    let unit = metrics.checked_unit()?;
    let start = start_offset(metrics.left_margin, unit);
    let stop = metrics.width + end_offset(metrics.right_margin, unit);

    if !(start.is_finite() && stop.is_finite()) {
        tracing::warn!(
            "Grid bounds not finite ({} to {}), drawing no grid",
            start,
            stop
        );
        return Ok(Vec::new());
    }
    if start > stop {
        return Ok(Vec::new());
    }

    let tolerance = settings::grid::STEP_EPSILON * unit;
    let steps = ((stop - start + tolerance) / unit).floor();
    if !(steps < settings::grid::MAX_MAJOR_LINES as f64) {
        tracing::warn!(
            "Unit {} would need {} grid lines, drawing no grid",
            unit,
            steps
        );
        return Ok(Vec::new());
    }
    let steps = steps as usize;

    let mut lines = Vec::with_capacity(steps * 2 + 1);
    for i in 0..=steps {
        let x = start + i as f64 * unit;
        lines.push(GridLine::major(x));
        if x + tolerance < stop {
            lines.push(GridLine::minor(x + unit / 2.0));
        }
    }
    Ok(lines)
}

/// Compute the width, left margin and right margin labels
pub fn compute_labels(metrics: &Metrics) -> Result<[Label; 3], LayoutError> {
    use settings::label;

    let unit = metrics.checked_unit()?;
    let margin_y = metrics.bottom() - label::MARGIN_DROP;

    let (width_text, width_emphasis) = unit_count(metrics.width, unit);
    let width = Label {
        kind: LabelKind::Width,
        position: Point::new(
            metrics.width + label::WIDTH_DX,
            metrics.top() + label::WIDTH_DY,
        ),
        text: format!("{}{}", label::WIDTH_PREFIX, width_text),
        emphasis: width_emphasis,
        align: TextAlign::Left,
    };

    let (left_text, left_emphasis) = unit_count(metrics.left_margin, unit);
    let left = Label {
        kind: LabelKind::LeftMargin,
        position: Point::new(label::LEFT_DX, margin_y),
        text: left_text,
        emphasis: left_emphasis,
        align: TextAlign::Right,
    };

    let (right_text, right_emphasis) = unit_count(metrics.right_margin, unit);
    let right = Label {
        kind: LabelKind::RightMargin,
        position: Point::new(metrics.width + label::RIGHT_DX, margin_y),
        text: right_text,
        emphasis: right_emphasis,
        align: TextAlign::Left,
    };

    Ok([width, left, right])
}

/// Leftmost grid x: extends past a negative left margin
fn start_offset(left_margin: f64, unit: f64) -> f64 {
    if left_margin < 0.0 {
        let units = (left_margin / unit).round_ties_even();
        (units - settings::grid::NEGATIVE_MARGIN_OVERSHOOT) * unit
    } else {
        0.0
    }
}

/// Extra grid right of the advance: extends past a negative right margin
fn end_offset(right_margin: f64, unit: f64) -> f64 {
    if right_margin < 0.0 {
        let units = (right_margin / unit).round_ties_even();
        (units - settings::grid::NEGATIVE_MARGIN_OVERSHOOT) * -unit
    } else {
        0.0
    }
}

/// Format `value` as a count of units.
///
/// Whole counts use floor division so negative margins keep their sign;
/// anything else is rounded on its exact decimal value to a fixed number of
/// places, with trailing zeros dropped. A fractional count that rounds to a
/// whole number keeps one decimal ("30.0") so it still reads as off-grid.
fn unit_count(value: f64, unit: f64) -> (String, LabelEmphasis) {
    let quotient = value / unit;
    if quotient.fract() != 0.0 {
        let digits = settings::label::FRACTION_DIGITS;
        let fixed = format!("{quotient:.digits$}");
        let trimmed = fixed.trim_end_matches('0');
        let text = match trimmed.strip_suffix('.') {
            Some(whole) => format!("{whole}.0"),
            None => trimmed.to_string(),
        };
        (text, LabelEmphasis::Fractional)
    } else {
        (format!("{}", quotient.floor() as i64), LabelEmphasis::Exact)
    }
}
