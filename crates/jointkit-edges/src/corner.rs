//! Reconciling neighbouring edges at a corner.

use crate::edge::Edge;
use jointkit_core::{Cursor, EPSILON};

/// Sharp corner between two edges.
///
/// Each edge's material offset is extended along the other so the outer
/// faces meet: first by the next edge's start width, then, after the turn,
/// by the previous edge's end width.
pub fn edge_corner(cursor: &mut dyn Cursor, from: &dyn Edge, to: &dyn Edge, angle: f64) {
    let extension = (angle / 2.0).to_radians().tan();
    cursor.edge(to.start_width() * extension);
    cursor.corner(angle, 0.0);
    cursor.edge(from.end_width() * extension);
}

/// Perpendicular step from one material offset to another.
pub fn width_jog(cursor: &mut dyn Cursor, from_width: f64, to_width: f64) {
    let diff = to_width - from_width;
    if diff > EPSILON {
        cursor.corner(-90.0, 0.0);
        cursor.edge(diff);
        cursor.corner(90.0, 0.0);
    } else if diff < -EPSILON {
        cursor.corner(90.0, 0.0);
        cursor.edge(-diff);
        cursor.corner(-90.0, 0.0);
    }
}
