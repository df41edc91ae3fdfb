//! Turtle-style drawing contract.
//!
//! Every edge generator drives a [`Cursor`]: a position plus a heading in
//! degrees. Lengths advance along the heading, positive angles turn left.
//! The outside of a part is on the right of the direction of travel, so
//! joints that stick out of the part turn right first.
//!
//! Hole and slit coordinates are given in the local frame: x along the
//! current heading, y to its left.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

/// One entry of a polyline: a straight run, a sharp turn or a rounded turn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PolyStep {
    Line(f64),
    Turn(f64),
    Arc { angle: f64, radius: f64 },
}

impl PolyStep {
    pub fn arc(angle: f64, radius: f64) -> Self {
        PolyStep::Arc { angle, radius }
    }

    /// Builds steps from a flat list alternating lengths and angles.
    pub fn alternating(values: &[f64]) -> Vec<PolyStep> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                if i % 2 == 0 {
                    PolyStep::Line(v)
                } else {
                    PolyStep::Turn(v)
                }
            })
            .collect()
    }

    /// The same steps in reverse order.
    ///
    /// Walking a profile backwards with the same turn signs mirrors it, which
    /// is how the end-of-edge variant of a hinge or lid is produced.
    pub fn reversed(steps: &[PolyStep]) -> Vec<PolyStep> {
        steps.iter().rev().copied().collect()
    }
}

/// Drawing operations consumed by the edge generators.
pub trait Cursor {
    /// Straight segment along the heading.
    fn edge(&mut self, length: f64);

    /// Turns by `angle` degrees; a positive radius draws an arc.
    fn corner(&mut self, angle: f64, radius: f64);

    /// Circular hole centred at a local position.
    fn hole(&mut self, x: f64, y: f64, radius: f64);

    /// Rectangular hole centred at a local position, aligned with the heading.
    fn rectangular_hole(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64);

    /// Internal cut line between two local positions. Does not move the cursor.
    fn slit(&mut self, from: Point, to: Point);

    /// Moves without drawing to a local position and turns by `angle`.
    fn move_to(&mut self, x: f64, y: f64, angle: f64);

    /// Pushes the current frame.
    fn save(&mut self);

    /// Pops the frame pushed by the matching [`Cursor::save`].
    fn restore(&mut self);

    fn position(&self) -> Point;

    fn heading(&self) -> f64;

    fn polyline(&mut self, steps: &[PolyStep]) {
        for step in steps {
            match *step {
                PolyStep::Line(length) => self.edge(length),
                PolyStep::Turn(angle) => self.corner(angle, 0.0),
                PolyStep::Arc { angle, radius } => self.corner(angle, radius),
            }
        }
    }
}

/// Saved cursor frame that is restored when dropped.
///
/// Dereferences to the cursor, so drawing through the guard happens in the
/// moved frame and the previous frame comes back on every exit path.
pub struct ScopedFrame<'a> {
    cursor: &'a mut dyn Cursor,
}

impl<'a> ScopedFrame<'a> {
    pub fn new(cursor: &'a mut dyn Cursor) -> Self {
        cursor.save();
        Self { cursor }
    }
}

impl<'a> Deref for ScopedFrame<'a> {
    type Target = dyn Cursor + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.cursor
    }
}

impl<'a> DerefMut for ScopedFrame<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.cursor
    }
}

impl Drop for ScopedFrame<'_> {
    fn drop(&mut self) {
        self.cursor.restore();
    }
}

/// Emitted drawing primitive in world coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Line {
        from: Point,
        to: Point,
    },
    Arc {
        center: Point,
        radius: f64,
        from: Point,
        to: Point,
        /// Signed sweep in degrees, positive counter-clockwise.
        sweep: f64,
    },
    Hole {
        center: Point,
        radius: f64,
    },
    RectangularHole {
        center: Point,
        width: f64,
        height: f64,
        radius: f64,
        /// Heading of the hole's width axis in degrees.
        rotation: f64,
    },
    Slit {
        from: Point,
        to: Point,
    },
}

impl Primitive {
    /// Length this primitive contributes to the cut outline.
    pub fn outline_length(&self) -> f64 {
        match self {
            Primitive::Line { from, to } => from.distance_to(to),
            Primitive::Arc { radius, sweep, .. } => radius * sweep.to_radians().abs(),
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Frame {
    origin: Point,
    heading: f64,
}

impl Frame {
    fn to_world(&self, x: f64, y: f64) -> Point {
        self.origin + Point::new(x, y).rotated(self.heading)
    }
}

/// Cursor that records primitives in world coordinates.
#[derive(Debug, Clone)]
pub struct RecordingCursor {
    frame: Frame,
    stack: Vec<Frame>,
    primitives: Vec<Primitive>,
}

impl Default for RecordingCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingCursor {
    pub fn new() -> Self {
        Self::at(Point::origin(), 0.0)
    }

    pub fn at(origin: Point, heading: f64) -> Self {
        Self {
            frame: Frame { origin, heading },
            stack: Vec::new(),
            primitives: Vec::new(),
        }
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn into_primitives(self) -> Vec<Primitive> {
        self.primitives
    }

    /// Total length of lines and arcs drawn so far.
    pub fn path_length(&self) -> f64 {
        self.primitives.iter().map(Primitive::outline_length).sum()
    }

    /// Number of frames currently saved.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Runs `draw` on a fresh cursor and returns where it ended.
    pub fn measure(draw: impl FnOnce(&mut RecordingCursor)) -> (Point, f64) {
        let mut cursor = RecordingCursor::new();
        draw(&mut cursor);
        (cursor.position(), cursor.heading())
    }
}

impl Cursor for RecordingCursor {
    fn edge(&mut self, length: f64) {
        if length == 0.0 {
            return;
        }
        let from = self.frame.origin;
        let to = self.frame.to_world(length, 0.0);
        self.primitives.push(Primitive::Line { from, to });
        self.frame.origin = to;
    }

    fn corner(&mut self, angle: f64, radius: f64) {
        if radius > 0.0 && angle != 0.0 {
            let side = if angle > 0.0 { radius } else { -radius };
            let center = self.frame.to_world(0.0, side);
            let from = self.frame.origin;
            let to = center + (from - center).rotated(angle);
            self.primitives.push(Primitive::Arc {
                center,
                radius,
                from,
                to,
                sweep: angle,
            });
            self.frame.origin = to;
        }
        self.frame.heading += angle;
    }

    fn hole(&mut self, x: f64, y: f64, radius: f64) {
        let center = self.frame.to_world(x, y);
        self.primitives.push(Primitive::Hole { center, radius });
    }

    fn rectangular_hole(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64) {
        let center = self.frame.to_world(x, y);
        self.primitives.push(Primitive::RectangularHole {
            center,
            width,
            height,
            radius,
            rotation: self.frame.heading,
        });
    }

    fn slit(&mut self, from: Point, to: Point) {
        let from = self.frame.to_world(from.x, from.y);
        let to = self.frame.to_world(to.x, to.y);
        self.primitives.push(Primitive::Slit { from, to });
    }

    fn move_to(&mut self, x: f64, y: f64, angle: f64) {
        self.frame.origin = self.frame.to_world(x, y);
        self.frame.heading += angle;
    }

    fn save(&mut self) {
        self.stack.push(self.frame);
    }

    fn restore(&mut self) {
        if let Some(frame) = self.stack.pop() {
            self.frame = frame;
        }
    }

    fn position(&self) -> Point {
        self.frame.origin
    }

    fn heading(&self) -> f64 {
        self.frame.heading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_arc_ends_above() {
        let mut cursor = RecordingCursor::new();
        cursor.corner(90.0, 5.0);
        assert!(cursor.position().approx_eq(&Point::new(5.0, 5.0), 1e-9));
        assert_eq!(cursor.heading(), 90.0);
    }

    #[test]
    fn test_zero_length_edge_is_not_recorded() {
        let mut cursor = RecordingCursor::new();
        cursor.edge(0.0);
        assert!(cursor.primitives().is_empty());
    }

    #[test]
    fn test_alternating_steps() {
        let steps = PolyStep::alternating(&[1.0, 90.0, 2.0]);
        assert_eq!(
            steps,
            vec![PolyStep::Line(1.0), PolyStep::Turn(90.0), PolyStep::Line(2.0)]
        );
    }
}
