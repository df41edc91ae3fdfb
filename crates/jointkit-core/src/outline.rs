//! Conversion of recorded primitives to lyon paths.
//!
//! Connected lines and arcs become one open sub-path each, arcs are
//! flattened. Holes become closed sub-paths and slits become two-point
//! sub-paths. Rounded corners of rectangular holes are not reproduced.

use crate::cursor::Primitive;
use crate::geometry::Point;
use lyon::math::point;
use lyon::path::path::Builder;
use lyon::path::{Path, Winding};

const ARC_STEP_DEGREES: f64 = 5.0;

struct OutlineBuilder {
    builder: Builder,
    open: Option<Point>,
}

impl OutlineBuilder {
    fn new() -> Self {
        Self {
            builder: Path::builder(),
            open: None,
        }
    }

    fn connect(&mut self, from: Point) {
        match self.open {
            Some(end) if end.approx_eq(&from, 1e-9) => {}
            Some(_) => {
                self.builder.end(false);
                self.builder.begin(to_lyon(from));
            }
            None => {
                self.builder.begin(to_lyon(from));
            }
        }
    }

    fn line_to(&mut self, to: Point) {
        self.builder.line_to(to_lyon(to));
        self.open = Some(to);
    }

    fn finish_open(&mut self) {
        if self.open.take().is_some() {
            self.builder.end(false);
        }
    }

    fn push(&mut self, primitive: &Primitive) {
        match primitive {
            Primitive::Line { from, to } => {
                self.connect(*from);
                self.line_to(*to);
            }
            Primitive::Arc {
                center,
                from,
                to,
                sweep,
                ..
            } => {
                self.connect(*from);
                let steps = (sweep.abs() / ARC_STEP_DEGREES).ceil().max(1.0) as usize;
                for i in 1..steps {
                    let angle = sweep * i as f64 / steps as f64;
                    self.line_to(*center + (*from - *center).rotated(angle));
                }
                self.line_to(*to);
            }
            Primitive::Hole { center, radius } => {
                self.finish_open();
                self.builder
                    .add_circle(to_lyon(*center), *radius as f32, Winding::Negative);
            }
            Primitive::RectangularHole {
                center,
                width,
                height,
                rotation,
                ..
            } => {
                self.finish_open();
                let (hw, hh) = (width / 2.0, height / 2.0);
                let corners = [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)]
                    .map(|(x, y)| *center + Point::new(x, y).rotated(*rotation));
                self.builder.begin(to_lyon(corners[0]));
                for corner in &corners[1..] {
                    self.builder.line_to(to_lyon(*corner));
                }
                self.builder.close();
            }
            Primitive::Slit { from, to } => {
                self.finish_open();
                self.builder.begin(to_lyon(*from));
                self.builder.line_to(to_lyon(*to));
                self.builder.end(false);
            }
        }
    }

    fn build(mut self) -> Path {
        self.finish_open();
        self.builder.build()
    }
}

fn to_lyon(p: Point) -> lyon::math::Point {
    point(p.x as f32, p.y as f32)
}

/// Builds a lyon path from recorded primitives.
pub fn to_path(primitives: &[Primitive]) -> Path {
    let mut builder = OutlineBuilder::new();
    for primitive in primitives {
        builder.push(primitive);
    }
    builder.build()
}

/// Axis aligned bounds as `(min, max)`, `None` when nothing was drawn.
pub fn bounds(primitives: &[Primitive]) -> Option<(Point, Point)> {
    if primitives.is_empty() {
        return None;
    }
    let path = to_path(primitives);
    let bb = lyon::algorithms::aabb::bounding_box(path.iter());
    Some((
        Point::new(bb.min.x as f64, bb.min.y as f64),
        Point::new(bb.max.x as f64, bb.max.y as f64),
    ))
}
