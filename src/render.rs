// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Draw a computed [`GridLayout`] onto a [`DrawingSurface`]

use crate::host::DrawingSurface;
use crate::layout::{GridLayout, Label, LineEmphasis};
use crate::theme;

/// Replace the surface contents with `layout`.
///
/// Major lines are drawn heavier than the half-unit lines; a width label
/// that is off the grid is drawn in the warning color.
pub fn render_layout<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    layout: &GridLayout,
    label_point_size: f64,
) {
    surface.clear();

    for grid_line in &layout.lines {
        let (color, width) = match grid_line.emphasis {
            LineEmphasis::Major => (theme::grid::MAJOR, theme::grid::MAJOR_WIDTH),
            LineEmphasis::Minor => (theme::grid::MINOR, theme::grid::MINOR_WIDTH),
        };
        surface.add_line(grid_line.to_line(layout.bottom, layout.top), color, width);
    }

    for label in &layout.labels {
        draw_label(surface, label, label_point_size);
    }
}

fn draw_label<S: DrawingSurface + ?Sized>(surface: &mut S, label: &Label, point_size: f64) {
    let color = if label.is_highlighted() {
        theme::label::OFF_GRID
    } else {
        theme::label::TEXT
    };
    surface.add_text(label.position, point_size, color, label.align, &label.text);
}
