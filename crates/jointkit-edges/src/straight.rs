//! Straight edges and the bed bolt notch.

use crate::edge::Edge;
use jointkit_core::{BedBoltSettings, BedBolts, Cursor, JointContext, Result};

/// Cuts a bed bolt notch centred in `length`: a slot for the bolt with a
/// wider pocket for the nut, ending at the far end with the same heading.
pub fn bed_bolt_hole(cursor: &mut dyn Cursor, length: f64, bolt: &BedBoltSettings) {
    let d = bolt.diameter;
    let nut_shoulder = (bolt.nut_diameter - d) / 2.0;
    let shank = bolt.length - bolt.nut_distance - bolt.nut_height;

    cursor.edge((length - d) / 2.0);
    cursor.corner(90.0, 0.0);
    cursor.edge(bolt.nut_distance);
    cursor.corner(90.0, 0.0);
    cursor.edge(nut_shoulder);
    cursor.corner(-90.0, 0.0);
    cursor.edge(bolt.nut_height);
    cursor.corner(-90.0, 0.0);
    cursor.edge(nut_shoulder);
    cursor.corner(90.0, 0.0);
    cursor.edge(shank);
    cursor.corner(-90.0, 0.0);
    cursor.edge(d);
    cursor.corner(-90.0, 0.0);
    cursor.edge(shank);
    cursor.corner(90.0, 0.0);
    cursor.edge(nut_shoulder);
    cursor.corner(-90.0, 0.0);
    cursor.edge(bolt.nut_height);
    cursor.corner(-90.0, 0.0);
    cursor.edge(nut_shoulder);
    cursor.corner(90.0, 0.0);
    cursor.edge(bolt.nut_distance);
    cursor.corner(90.0, 0.0);
    cursor.edge((length - d) / 2.0);
}

/// Plain straight edge, optionally outset by one material thickness.
#[derive(Debug, Clone)]
pub struct StraightEdge {
    ctx: JointContext,
    outset: bool,
}

impl StraightEdge {
    pub fn new(ctx: &JointContext) -> Self {
        Self {
            ctx: *ctx,
            outset: false,
        }
    }

    pub fn outset(ctx: &JointContext) -> Self {
        Self {
            ctx: *ctx,
            outset: true,
        }
    }
}

impl Edge for StraightEdge {
    fn tag(&self) -> Option<char> {
        Some(if self.outset { 'E' } else { 'e' })
    }

    fn description(&self) -> &'static str {
        if self.outset {
            "Straight Edge (outset by thickness)"
        } else {
            "Straight Edge"
        }
    }

    fn draw(&self, cursor: &mut dyn Cursor, length: f64, bolts: Option<&BedBolts>) -> Result<()> {
        let count = bolts.map_or(0, |b| b.policy.bolts());
        let Some(bolts) = bolts.filter(|_| count > 0) else {
            cursor.edge(length);
            return Ok(());
        };

        let interval = length / count as f64;
        let dims = bolts.dimensions(&self.ctx.bed_bolts);
        for _ in 0..count {
            if self.outset {
                cursor.hole(0.5 * interval, 0.5 * self.ctx.thickness, 0.5 * dims.diameter);
                cursor.edge(interval);
            } else {
                bed_bolt_hole(cursor, interval, &dims);
            }
        }
        Ok(())
    }

    fn start_width(&self) -> f64 {
        if self.outset {
            self.ctx.thickness
        } else {
            0.0
        }
    }
}
