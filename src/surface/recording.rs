// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! In-memory drawing surface that records what the overlay draws

use kurbo::{Line, Point};
use peniko::Color;

use crate::host::{DrawingSurface, TextAlign};

/// A single drawing call
#[derive(Debug, Clone)]
pub enum DrawCommand {
    Line {
        line: Line,
        color: Color,
        stroke_width: f64,
    },
    Text {
        position: Point,
        point_size: f64,
        color: Color,
        align: TextAlign,
        text: String,
    },
}

/// Keeps the commands drawn since the last clear.
///
/// Useful for hosts that diff overlay output between frames, and for tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    clears: usize,
}

impl RecordingSurface {
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of times the surface has been cleared
    pub fn clear_count(&self) -> usize {
        self.clears
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Recorded lines as `(line, color, stroke_width)`
    pub fn lines(&self) -> impl Iterator<Item = (Line, Color, f64)> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Line {
                line,
                color,
                stroke_width,
            } => Some((*line, *color, *stroke_width)),
            DrawCommand::Text { .. } => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &DrawCommand> + '_ {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Text { .. }))
    }

    /// Just the label strings, in drawing order
    pub fn text_strings(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                DrawCommand::Line { .. } => None,
            })
            .collect()
    }
}

impl DrawingSurface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.clear();
        self.clears += 1;
    }

    fn add_line(&mut self, line: Line, color: Color, stroke_width: f64) {
        self.commands.push(DrawCommand::Line {
            line,
            color,
            stroke_width,
        });
    }

    fn add_text(
        &mut self,
        position: Point,
        point_size: f64,
        color: Color,
        align: TextAlign,
        text: &str,
    ) {
        self.commands.push(DrawCommand::Text {
            position,
            point_size,
            color,
            align,
            text: text.to_string(),
        });
    }
}
