//! The edge abstraction.
//!
//! An edge draws a profile of exactly the requested length along the
//! cursor's heading and leaves the cursor at `(length, start_width -
//! end_width)` in its starting frame, pointing the same way. The widths
//! tell neighbouring edges how far the material sits outside the nominal
//! outline so corners can be reconciled.

use jointkit_core::{BedBolts, Cursor, GeometryError, Result, EPSILON};
use std::fmt;
use std::sync::Arc;

pub trait Edge: fmt::Debug + Send + Sync {
    /// Default registry tag.
    fn tag(&self) -> Option<char> {
        None
    }

    fn description(&self) -> &'static str;

    fn draw(&self, cursor: &mut dyn Cursor, length: f64, bolts: Option<&BedBolts>) -> Result<()>;

    /// Offset of the material at the start of the edge.
    fn start_width(&self) -> f64 {
        0.0
    }

    /// Offset of the material at the end of the edge.
    fn end_width(&self) -> f64 {
        self.start_width()
    }

    /// Space needed on the outside beyond the start width.
    fn margin(&self) -> f64 {
        0.0
    }

    /// Total space needed on the outside.
    fn spacing(&self) -> f64 {
        self.start_width() + self.margin()
    }
}

/// Shared handle to an edge.
pub type EdgeRef = Arc<dyn Edge>;

/// Which half of a two-part joint an edge draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Tabs stick out of the part.
    Positive,
    /// Receives the tabs of the mating part.
    Counterpart,
}

impl Polarity {
    pub fn is_positive(self) -> bool {
        self == Polarity::Positive
    }

    /// `1.0` for positive, `-1.0` for the counterpart.
    pub fn sign(self) -> f64 {
        match self {
            Polarity::Positive => 1.0,
            Polarity::Counterpart => -1.0,
        }
    }
}

/// Fails when `length` cannot hold `required`.
pub(crate) fn ensure_fits(edge: &str, length: f64, required: f64) -> Result<()> {
    if length < required - EPSILON {
        return Err(GeometryError::too_short(edge, length, required).into());
    }
    Ok(())
}
