//! Straight sections separated by slots for crossing parts.

use crate::edge::{Edge, EdgeRef};
use jointkit_core::{
    BedBolts, Cursor, GeometryError, LengthMismatchError, Result, EPSILON,
};

/// Notch of fixed depth that another part slides into.
#[derive(Debug, Clone, Copy)]
pub struct Slot {
    depth: f64,
}

impl Slot {
    pub fn new(depth: f64) -> Self {
        Self { depth }
    }
}

impl Edge for Slot {
    fn description(&self) -> &'static str {
        "Slot"
    }

    fn draw(&self, cursor: &mut dyn Cursor, length: f64, _bolts: Option<&BedBolts>) -> Result<()> {
        if self.depth > 0.0 {
            cursor.corner(90.0, 0.0);
            cursor.edge(self.depth);
            cursor.corner(-90.0, 0.0);
            cursor.edge(length);
            cursor.corner(-90.0, 0.0);
            cursor.edge(self.depth);
            cursor.corner(90.0, 0.0);
        } else {
            cursor.edge(length);
        }
        Ok(())
    }
}

/// Sections of a base edge with a material-thick gap or slot between them.
#[derive(Debug, Clone)]
pub struct SlottedEdge {
    edge: EdgeRef,
    sections: Vec<f64>,
    slot: Slot,
    thickness: f64,
}

impl SlottedEdge {
    pub fn new(edge: EdgeRef, sections: Vec<f64>, slot_depth: f64, thickness: f64) -> Result<Self> {
        if sections.is_empty() {
            return Err(
                GeometryError::InvalidProfile("slotted edge needs a section".to_string()).into(),
            );
        }
        Ok(Self {
            edge,
            sections,
            slot: Slot::new(slot_depth),
            thickness,
        })
    }

    /// Sections plus the gaps between them.
    pub fn length(&self) -> f64 {
        self.sections.iter().sum::<f64>() + (self.sections.len() - 1) as f64 * self.thickness
    }
}

impl Edge for SlottedEdge {
    fn description(&self) -> &'static str {
        "Straight Edge with slots"
    }

    fn draw(&self, cursor: &mut dyn Cursor, length: f64, _bolts: Option<&BedBolts>) -> Result<()> {
        let expected = self.length();
        if length != 0.0 && (length - expected).abs() > EPSILON {
            return Err(LengthMismatchError {
                edge: "SlottedEdge".to_string(),
                expected: length,
                actual: expected,
            }
            .into());
        }

        let (last, rest) = match self.sections.split_last() {
            Some(split) => split,
            None => return Ok(()),
        };
        for &section in rest {
            self.edge.draw(cursor, section, None)?;
            self.slot.draw(cursor, self.thickness, None)?;
        }
        self.edge.draw(cursor, *last, None)
    }

    fn start_width(&self) -> f64 {
        self.edge.start_width()
    }

    fn end_width(&self) -> f64 {
        self.edge.end_width()
    }

    fn margin(&self) -> f64 {
        self.edge.margin()
    }
}
