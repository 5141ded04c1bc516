// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Drawing surface backed by a vello [`Scene`]
//!
//! The host renders this scene as a layer behind the glyph outline. Lines
//! are mapped to screen space with the current view transform and stroked
//! at a fixed pixel width; labels are shaped with parley at a fixed point
//! size so they stay readable at any zoom.

use kurbo::{Affine, Line, Point, Stroke};
use masonry::core::{BrushIndex, StyleProperty, render_text};
use masonry::vello::Scene;
use parley::{FontContext, FontFamily, FontStack, GenericFamily, LayoutContext};
use peniko::{Brush, Color};

use crate::host::{DrawingSurface, TextAlign};

/// Overlay layer drawn into its own vello scene
pub struct SceneSurface {
    scene: Scene,
    /// Design space to screen space (y flipped)
    transform: Affine,
    font_cx: FontContext,
    layout_cx: LayoutContext<BrushIndex>,
}

impl SceneSurface {
    pub fn new(transform: Affine) -> Self {
        Self {
            scene: Scene::new(),
            transform,
            font_cx: FontContext::default(),
            layout_cx: LayoutContext::new(),
        }
    }

    /// Update the view transform after a zoom or scroll.
    ///
    /// Already drawn content keeps the old transform until the next
    /// render.
    pub fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// The overlay layer, ready to be appended to the editor's scene
    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}

impl DrawingSurface for SceneSurface {
    fn clear(&mut self) {
        self.scene.reset();
    }

    fn add_line(&mut self, line: Line, color: Color, stroke_width: f64) {
        let screen_line = Line::new(self.transform * line.p0, self.transform * line.p1);
        self.scene.stroke(
            &Stroke::new(stroke_width),
            Affine::IDENTITY,
            &Brush::Solid(color),
            None,
            &screen_line,
        );
    }

    fn add_text(
        &mut self,
        position: Point,
        point_size: f64,
        color: Color,
        align: TextAlign,
        text: &str,
    ) {
        let mut builder = self
            .layout_cx
            .ranged_builder(&mut self.font_cx, text, 1.0, false);
        builder.push_default(StyleProperty::FontSize(point_size as f32));
        builder.push_default(StyleProperty::FontStack(FontStack::Single(
            FontFamily::Generic(GenericFamily::SansSerif),
        )));
        builder.push_default(StyleProperty::Brush(BrushIndex(0)));
        let mut layout = builder.build(text);
        layout.break_all_lines(None);

        let text_width = layout.width() as f64;
        let text_height = layout.height() as f64;

        // Text sits on the anchor in screen space (no flip)
        let screen_pos = self.transform * position;
        let x = match align {
            TextAlign::Left => screen_pos.x,
            TextAlign::Right => screen_pos.x - text_width,
        };
        let brushes = vec![Brush::Solid(color)];
        render_text(
            &mut self.scene,
            Affine::translate((x, screen_pos.y - text_height)),
            &layout,
            &brushes,
            false,
        );
    }
}
