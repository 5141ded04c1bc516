// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Glyph outlines - converts norad contours to Kurbo paths for measuring

use kurbo::{Affine, BezPath, Point, Shape};
use norad::{Contour, ContourPoint, Glyph, Layer, PointType};

/// Components nested deeper than this are ignored
const MAX_COMPONENT_DEPTH: usize = 16;

/// Stop expanding components after this many contours, so wide component
/// trees can't blow up
const MAX_EXPANDED_CONTOURS: usize = 100_000;

/// Horizontal extent `(min_x, max_x)` of a glyph's outline, including
/// components. `None` for a glyph with nothing drawn.
///
/// A component that refers back to a glyph already being expanded is
/// skipped, so cyclic references measure as if the cycle weren't there.
pub fn horizontal_bounds(glyph: &Glyph, layer: &Layer) -> Option<(f64, f64)> {
    let mut path = BezPath::new();
    let mut expansion = Expansion::default();
    expansion.append_glyph(&mut path, glyph, layer, Affine::IDENTITY);
    if path.elements().is_empty() {
        return None;
    }
    let bounds = path.bounding_box();
    Some((bounds.x0, bounds.x1))
}

/// Recursion state while flattening components
#[derive(Default)]
struct Expansion {
    /// Glyph names from the measured glyph down to the current one
    stack: Vec<String>,
    contours: usize,
}

impl Expansion {
    /// Append a glyph's contours and, recursively, its components
    fn append_glyph(
        &mut self,
        path: &mut BezPath,
        glyph: &Glyph,
        layer: &Layer,
        transform: Affine,
    ) {
        for contour in &glyph.contours {
            if self.contours >= MAX_EXPANDED_CONTOURS {
                tracing::warn!(
                    "Outline of '{}' too large, measuring part of it",
                    glyph.name()
                );
                return;
            }
            self.contours += 1;
            let mut contour_path = BezPath::new();
            append_contour(&mut contour_path, contour);
            path.extend((transform * &contour_path).elements().iter().cloned());
        }

        if glyph.components.is_empty() {
            return;
        }
        if self.stack.len() >= MAX_COMPONENT_DEPTH {
            tracing::warn!(
                "Component nesting too deep in '{}', ignoring the rest",
                glyph.name()
            );
            return;
        }

        self.stack.push(glyph.name().to_string());
        for component in &glyph.components {
            let base_name = component.base.to_string();
            if self.stack.contains(&base_name) {
                tracing::warn!(
                    "Component '{}' refers back to itself, skipping",
                    base_name
                );
                continue;
            }
            let Some(base) = layer.get_glyph(&base_name) else {
                tracing::warn!("Component base glyph '{}' not found", base_name);
                continue;
            };
            let t = &component.transform;
            let component_transform = Affine::new([
                t.x_scale, t.xy_scale, t.yx_scale, t.y_scale, t.x_offset, t.y_offset,
            ]);
            self.append_glyph(path, base, layer, transform * component_transform);
        }
        self.stack.pop();
    }
}

fn is_on_curve(typ: &PointType) -> bool {
    !matches!(typ, PointType::OffCurve)
}

fn to_point(pt: &ContourPoint) -> Point {
    Point::new(pt.x, pt.y)
}

/// Append a single contour.
///
/// Closed contours are rotated to start on an on-curve point so the
/// off-curve points that wrap around the end feed the closing segment.
fn append_contour(path: &mut BezPath, contour: &Contour) {
    let points = &contour.points;
    if points.is_empty() {
        return;
    }

    let open = matches!(points[0].typ, PointType::Move);

    let Some(start) = points.iter().position(|p| is_on_curve(&p.typ)) else {
        append_implied_quadratic_loop(path, points);
        return;
    };

    let rotated: Vec<&ContourPoint> = points[start..]
        .iter()
        .chain(points[..start].iter())
        .collect();
    path.move_to(to_point(rotated[0]));

    let mut offs: Vec<Point> = Vec::new();
    for pt in &rotated[1..] {
        if is_on_curve(&pt.typ) {
            append_segment(path, &pt.typ, &offs, to_point(pt));
            offs.clear();
        } else {
            offs.push(to_point(pt));
        }
    }

    if open {
        return;
    }
    if !offs.is_empty() {
        append_segment(path, &rotated[0].typ, &offs, to_point(rotated[0]));
    }
    path.close_path();
}

/// Append the segment ending at `end`, given the off-curve points before it
fn append_segment(path: &mut BezPath, typ: &PointType, offs: &[Point], end: Point) {
    match (typ, offs.len()) {
        (_, 0) => path.line_to(end),
        (PointType::QCurve, _) => append_quadratic_run(path, offs, end),
        (_, 1) => path.quad_to(offs[0], end),
        (_, n) => path.curve_to(offs[n - 2], offs[n - 1], end),
    }
}

/// TrueType-style run of quadratic off-curves with implied on-curve
/// midpoints between them
fn append_quadratic_run(path: &mut BezPath, offs: &[Point], end: Point) {
    for pair in offs.windows(2) {
        path.quad_to(pair[0], pair[0].midpoint(pair[1]));
    }
    if let Some(last) = offs.last() {
        path.quad_to(*last, end);
    }
}

/// A closed contour made only of off-curve points
fn append_implied_quadratic_loop(path: &mut BezPath, points: &[ContourPoint]) {
    let offs: Vec<Point> = points.iter().map(to_point).collect();
    let (Some(first), Some(last)) = (offs.first(), offs.last()) else {
        return;
    };
    let start = last.midpoint(*first);
    path.move_to(start);
    append_quadratic_run(path, &offs, start);
    path.close_path();
}

#[cfg(test)]
mod tests {
    use super::*;
    use norad::{AffineTransform, Component, Font, Name};

    fn point(x: f64, y: f64, typ: PointType) -> ContourPoint {
        ContourPoint::new(x, y, typ, false, None, None, None)
    }

    fn rect_contour(x0: f64, x1: f64) -> Contour {
        Contour::new(
            vec![
                point(x0, 0.0, PointType::Line),
                point(x1, 0.0, PointType::Line),
                point(x1, 100.0, PointType::Line),
                point(x0, 100.0, PointType::Line),
            ],
            None,
            None,
        )
    }

    #[test]
    fn test_line_contour_bounds() {
        let font = Font::new();
        let mut glyph = Glyph::new("a");
        glyph.contours.push(rect_contour(40.0, 460.0));
        assert_eq!(
            horizontal_bounds(&glyph, font.default_layer()),
            Some((40.0, 460.0))
        );
    }

    #[test]
    fn test_curve_bounds_exclude_handles() {
        // A bump whose handles reach x=-40 but the curve itself does not
        let font = Font::new();
        let mut glyph = Glyph::new("o");
        glyph.contours.push(Contour::new(
            vec![
                point(0.0, 0.0, PointType::Curve),
                point(100.0, 0.0, PointType::Line),
                point(100.0, 100.0, PointType::Line),
                point(0.0, 100.0, PointType::Line),
                point(-40.0, 100.0, PointType::OffCurve),
                point(-40.0, 0.0, PointType::OffCurve),
            ],
            None,
            None,
        ));
        let (min_x, max_x) = horizontal_bounds(&glyph, font.default_layer()).unwrap();
        assert!(min_x > -40.0 && min_x < 0.0);
        assert_eq!(max_x, 100.0);
    }

    #[test]
    fn test_empty_glyph_has_no_bounds() {
        let font = Font::new();
        let glyph = Glyph::new("space");
        assert_eq!(horizontal_bounds(&glyph, font.default_layer()), None);
    }

    #[test]
    fn test_component_bounds_use_transform() {
        let mut font = Font::new();
        let mut base = Glyph::new("a");
        base.contours.push(rect_contour(40.0, 460.0));
        font.default_layer_mut().insert_glyph(base);

        let mut composite = Glyph::new("aacute");
        composite.components.push(Component::new(
            Name::new("a").unwrap(),
            AffineTransform {
                x_scale: 1.0,
                xy_scale: 0.0,
                yx_scale: 0.0,
                y_scale: 1.0,
                x_offset: -100.0,
                y_offset: 0.0,
            },
            None,
            None,
        ));
        assert_eq!(
            horizontal_bounds(&composite, font.default_layer()),
            Some((-60.0, 360.0))
        );
    }

    fn offset_component(base: &str, x_offset: f64) -> Component {
        Component::new(
            Name::new(base).unwrap(),
            AffineTransform {
                x_scale: 1.0,
                xy_scale: 0.0,
                yx_scale: 0.0,
                y_scale: 1.0,
                x_offset,
                y_offset: 0.0,
            },
            None,
            None,
        )
    }

    #[test]
    fn test_self_reference_skipped() {
        let mut font = Font::new();
        let mut glyph = Glyph::new("loop");
        glyph.contours.push(rect_contour(0.0, 10.0));
        glyph.components.push(offset_component("loop", 1.0));
        font.default_layer_mut().insert_glyph(glyph.clone());

        assert_eq!(
            horizontal_bounds(&glyph, font.default_layer()),
            Some((0.0, 10.0))
        );
    }

    #[test]
    fn test_self_reference_fan_out_terminates() {
        let mut font = Font::new();
        let mut glyph = Glyph::new("loop");
        glyph.contours.push(rect_contour(0.0, 10.0));
        for i in 0..3 {
            glyph.components.push(offset_component("loop", i as f64 * 5.0));
        }
        font.default_layer_mut().insert_glyph(glyph.clone());

        assert_eq!(
            horizontal_bounds(&glyph, font.default_layer()),
            Some((0.0, 10.0))
        );
    }

    #[test]
    fn test_indirect_cycle_skipped() {
        let mut font = Font::new();
        let mut a = Glyph::new("a");
        a.contours.push(rect_contour(0.0, 10.0));
        a.components.push(offset_component("b", 100.0));
        let mut b = Glyph::new("b");
        b.contours.push(rect_contour(0.0, 10.0));
        b.components.push(offset_component("a", 100.0));
        font.default_layer_mut().insert_glyph(a.clone());
        font.default_layer_mut().insert_glyph(b);

        // a, then b shifted by 100; b's reference back to a is dropped
        assert_eq!(
            horizontal_bounds(&a, font.default_layer()),
            Some((0.0, 110.0))
        );
    }

    #[test]
    fn test_wide_component_tree_is_bounded() {
        // Each level references the next one three times: 3^15 leaves
        // without the contour budget
        let mut font = Font::new();
        for level in 0..16 {
            let mut glyph = Glyph::new(&format!("g{level}"));
            glyph.contours.push(rect_contour(0.0, 10.0));
            if level < 15 {
                let next = format!("g{}", level + 1);
                for _ in 0..3 {
                    glyph.components.push(offset_component(&next, 0.0));
                }
            }
            font.default_layer_mut().insert_glyph(glyph);
        }

        let root = font.default_layer().get_glyph("g0").unwrap();
        assert_eq!(
            horizontal_bounds(root, font.default_layer()),
            Some((0.0, 10.0))
        );
    }
}
