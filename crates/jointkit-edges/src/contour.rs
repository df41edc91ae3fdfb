//! Assembling edges into closed part outlines.
//!
//! A contour is a closed polygon with a corner radius per vertex and an
//! edge per side. [`plan_contour`] does the arithmetic, [`polygon_wall`]
//! draws it, and [`panel_flex_wall`] lays the same perimeter out flat as a
//! bendable panel.

use crate::corner::{edge_corner, width_jog};
use crate::edge::{Edge, EdgeRef};
use crate::flex::{FlexEdge, FlexSettings};
use crate::layout::PartExtent;
use crate::straight::StraightEdge;
use jointkit_core::{
    BedBolts, Cursor, GeometryError, JointContext, Point, Result, ScopedFrame, EPSILON,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Signed angle in degrees turning from `incoming` onto `outgoing`.
///
/// The magnitude comes from the dot product, the sign from the cross
/// product; left turns are positive.
pub fn signed_turn_angle(incoming: Point, outgoing: Point) -> f64 {
    let norms = incoming.norm() * outgoing.norm();
    if norms <= 0.0 {
        return 0.0;
    }
    let cos = (incoming.dot(&outgoing) / norms).clamp(-1.0, 1.0);
    let angle = cos.acos().to_degrees();
    if incoming.cross(&outgoing) >= 0.0 {
        angle
    } else {
        -angle
    }
}

/// One side of a planned contour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContourSide {
    /// Distance between the side's vertices.
    pub length: f64,
    /// Turn at the side's end vertex.
    pub turn: f64,
    /// Corner radius at the side's end vertex.
    pub radius: f64,
    /// Length taken by the rounding at the start vertex.
    pub shorten_start: f64,
    /// Length taken by the rounding at the end vertex.
    pub shorten_end: f64,
    /// Length of the corner arc after the side.
    pub arc_length: f64,
}

impl ContourSide {
    /// Straight length handed to the side's edge.
    pub fn line_length(&self) -> f64 {
        self.length - self.shorten_start - self.shorten_end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourPlan {
    pub sides: Vec<ContourSide>,
}

impl ContourPlan {
    /// Line and corner arc lengths, alternating, starting with side 0.
    pub fn line_lengths(&self) -> Vec<f64> {
        self.sides
            .iter()
            .flat_map(|side| [side.line_length(), side.arc_length])
            .collect()
    }

    /// Length of the rounded outline.
    pub fn perimeter(&self) -> f64 {
        self.line_lengths().iter().sum()
    }
}

/// Radius at vertex `i`; missing entries repeat the last one.
fn radius_at(radii: &[f64], i: usize) -> f64 {
    radii
        .get(i)
        .or_else(|| radii.last())
        .copied()
        .unwrap_or(0.0)
}

/// Computes side lengths, turns and corner shortenings of a closed polygon.
pub fn plan_contour(points: &[Point], radii: &[f64]) -> Result<ContourPlan> {
    let n = points.len();
    if n < 3 {
        return Err(GeometryError::TooFewVertices(n).into());
    }
    let start_radius = radius_at(radii, 0);
    if start_radius != 0.0 {
        return Err(GeometryError::StartCornerRadius(start_radius).into());
    }

    let side = |i: usize| points[(i + 1) % n] - points[i % n];
    let mut sides = Vec::with_capacity(n);
    let mut shorten_start = 0.0;

    for i in 0..n {
        let incoming = side(i);
        let outgoing = side(i + 1);
        let length = incoming.norm();
        if length < EPSILON {
            return Err(GeometryError::DegenerateSide(i).into());
        }
        if outgoing.norm() < EPSILON {
            return Err(GeometryError::DegenerateSide((i + 1) % n).into());
        }

        let turn = signed_turn_angle(incoming, outgoing);
        let radius = radius_at(radii, (i + 1) % n);
        let shorten_end = radius * (turn.abs() / 2.0).to_radians().tan();
        if length < shorten_start + shorten_end - EPSILON {
            return Err(GeometryError::too_short(
                "contour side",
                length,
                shorten_start + shorten_end,
            )
            .into());
        }

        sides.push(ContourSide {
            length,
            turn,
            radius,
            shorten_start,
            shorten_end,
            arc_length: turn.to_radians().abs() * radius,
        });
        shorten_start = shorten_end;
    }

    let plan = ContourPlan { sides };
    debug!(vertices = n, perimeter = plan.perimeter(), "planned contour");
    Ok(plan)
}

/// Edge for side `i`; missing entries repeat the last one.
fn edge_at(edges: &[EdgeRef], i: usize) -> Result<&EdgeRef> {
    edges.get(i).or_else(|| edges.last()).ok_or_else(|| {
        GeometryError::InvalidProfile("polygon wall needs at least one edge".to_string()).into()
    })
}

/// Draws a closed polygon wall and returns its alternating line and arc
/// lengths, ready for [`panel_flex_wall`].
///
/// The wall starts at `points[0]` heading along the first side. `edges`
/// and `radii` repeat their last entry for the remaining sides; `bolts`
/// holds optional bed bolts per side.
pub fn polygon_wall(
    cursor: &mut dyn Cursor,
    points: &[Point],
    edges: &[EdgeRef],
    radii: &[f64],
    bolts: &[Option<BedBolts>],
) -> Result<Vec<f64>> {
    let plan = plan_contour(points, radii)?;
    let n = plan.sides.len();

    let start = points[0];
    let heading = (points[1] - start).heading();
    let mut frame = ScopedFrame::new(cursor);
    frame.move_to(start.x, start.y, heading);

    for (i, side) in plan.sides.iter().enumerate() {
        let edge = edge_at(edges, i)?;
        let next = edge_at(edges, (i + 1) % n)?;
        edge.draw(&mut *frame, side.line_length(), bolts.get(i).and_then(Option::as_ref))?;
        if side.radius == 0.0 {
            edge_corner(&mut *frame, edge.as_ref(), next.as_ref(), side.turn);
        } else {
            width_jog(&mut *frame, edge.end_width(), next.start_width());
            // the arc runs on the next edge's outer face, concentric with the nominal one
            let radius = side.radius + side.turn.signum() * next.start_width();
            frame.corner(side.turn, radius);
        }
    }
    Ok(plan.line_lengths())
}

/// Flat panel matching a rounded contour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlexPanel {
    /// Summed length of the straight sections.
    pub rigid: f64,
    /// Summed length of the flex sections.
    pub flex: f64,
    /// Extra tabs at both ends.
    pub ends: f64,
    pub extent: PartExtent,
}

impl FlexPanel {
    /// Unrolled length along the contour, without the end tabs.
    pub fn contour_length(&self) -> f64 {
        self.rigid + self.flex
    }
}

/// Lays out the line lengths of a rounded contour as a flat panel `width`
/// high: straight segments stay rigid, corner arcs become flex sections.
///
/// `bolts` is either empty or holds one entry per line and arc pair. With
/// `outset_ends` each end gets an extra `thickness` so the panel meets
/// parts with finger hole edges.
pub fn panel_flex_wall(
    cursor: &mut dyn Cursor,
    line_lengths: &[f64],
    width: f64,
    ctx: &JointContext,
    flex: &Arc<FlexSettings>,
    bolts: &[Option<BedBolts>],
    outset_ends: bool,
) -> Result<FlexPanel> {
    if line_lengths.len() % 2 != 0 {
        return Err(GeometryError::InvalidProfile(format!(
            "line lengths must pair lines with arcs, got {} entries",
            line_lengths.len()
        ))
        .into());
    }
    let pairs = line_lengths.len() / 2;
    if !bolts.is_empty() && bolts.len() != pairs {
        return Err(GeometryError::InvalidProfile(format!(
            "expected {pairs} bed bolt entries, got {}",
            bolts.len()
        ))
        .into());
    }

    let t = ctx.thickness;
    let rigid_edge = StraightEdge::outset(ctx);
    let flex_edge = FlexEdge::new(Arc::clone(flex), ctx, width + 2.0 * t);
    let bolt = |i: usize| bolts.get(i).and_then(Option::as_ref);
    let ends = if outset_ends { t } else { 0.0 };

    let mut frame = ScopedFrame::new(cursor);
    frame.move_to(2.0 * t, 0.0, 0.0);

    // bottom: rigid and flex sections
    rigid_edge.draw(&mut *frame, ends, None)?;
    for (i, pair) in line_lengths.chunks_exact(2).enumerate() {
        rigid_edge.draw(&mut *frame, pair[0], bolt(i))?;
        flex_edge.draw(&mut *frame, pair[1], None)?;
    }
    rigid_edge.draw(&mut *frame, ends, None)?;
    edge_corner(&mut *frame, &rigid_edge, &rigid_edge, 90.0);
    rigid_edge.draw(&mut *frame, width, None)?;
    edge_corner(&mut *frame, &rigid_edge, &rigid_edge, 90.0);

    // top: the same run backwards
    rigid_edge.draw(&mut *frame, ends, None)?;
    for (i, pair) in line_lengths.chunks_exact(2).enumerate().rev() {
        rigid_edge.draw(&mut *frame, pair[1], None)?;
        rigid_edge.draw(&mut *frame, pair[0], bolt(i))?;
    }
    rigid_edge.draw(&mut *frame, ends, None)?;
    edge_corner(&mut *frame, &rigid_edge, &rigid_edge, 90.0);
    rigid_edge.draw(&mut *frame, width, None)?;
    edge_corner(&mut *frame, &rigid_edge, &rigid_edge, 90.0);

    let rigid: f64 = line_lengths.iter().step_by(2).sum();
    let flex_length: f64 = line_lengths.iter().skip(1).step_by(2).sum();
    let total: f64 = rigid + flex_length + 2.0 * ends;
    Ok(FlexPanel {
        rigid,
        flex: flex_length,
        ends: 2.0 * ends,
        extent: PartExtent::new(total + 4.0 * t, width + 3.0 * t),
    })
}

/// Rectangular wall `x` by `y` with edges bottom, right, top, left.
///
/// Returns the part's size including the edges' spacing.
pub fn rectangular_wall(
    cursor: &mut dyn Cursor,
    x: f64,
    y: f64,
    edges: &[EdgeRef; 4],
    bolts: [Option<&BedBolts>; 4],
) -> Result<PartExtent> {
    let extent = PartExtent::new(
        x + edges[3].spacing() + edges[1].spacing(),
        y + edges[0].spacing() + edges[2].spacing(),
    );

    let mut frame = ScopedFrame::new(cursor);
    frame.move_to(edges[3].spacing(), edges[0].margin(), 0.0);
    for (i, length) in [x, y, x, y].into_iter().enumerate() {
        let (edge, next) = (&edges[i], &edges[(i + 1) % 4]);
        edge.draw(&mut *frame, length, bolts[i])?;
        edge_corner(&mut *frame, edge.as_ref(), next.as_ref(), 90.0);
    }
    Ok(extent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_turns() {
        let east = Point::new(1.0, 0.0);
        assert!((signed_turn_angle(east, Point::new(0.0, 1.0)) - 90.0).abs() < 1e-9);
        assert!((signed_turn_angle(east, Point::new(0.0, -1.0)) + 90.0).abs() < 1e-9);
        assert!(signed_turn_angle(east, east).abs() < 1e-9);
    }

    #[test]
    fn test_rounded_corner_shortens_both_sides() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(40.0, 0.0),
            Point::new(40.0, 20.0),
            Point::new(0.0, 20.0),
        ];
        let plan = plan_contour(&points, &[0.0, 5.0, 0.0]).unwrap();
        assert!((plan.sides[0].line_length() - 35.0).abs() < 1e-9);
        assert!((plan.sides[1].line_length() - 15.0).abs() < 1e-9);
        assert!((plan.sides[0].arc_length - 2.5 * std::f64::consts::PI).abs() < 1e-9);
    }
}
