//! Edges made of several edges laid end to end.

use crate::corner::width_jog;
use crate::edge::{Edge, EdgeRef};
use crate::registry::EdgeRegistry;
use jointkit_core::{
    BedBolts, Cursor, GeometryError, LengthMismatchError, Result, EPSILON,
};

/// Several edges drawn one after another at fixed lengths.
///
/// Drawing checks the requested length against the summed part lengths.
/// A requested length of zero skips that check and draws the parts as
/// given, for callers that only know the parts.
#[derive(Debug, Clone)]
pub struct CompoundEdge {
    edges: Vec<EdgeRef>,
    lengths: Vec<f64>,
    total: f64,
}

impl CompoundEdge {
    pub fn new(edges: Vec<EdgeRef>, lengths: Vec<f64>) -> Result<Self> {
        if edges.is_empty() || edges.len() != lengths.len() {
            return Err(GeometryError::InvalidProfile(format!(
                "compound edge needs one length per edge ({} edges, {} lengths)",
                edges.len(),
                lengths.len()
            ))
            .into());
        }
        let total = lengths.iter().sum();
        Ok(Self {
            edges,
            lengths,
            total,
        })
    }

    /// Resolves each char of `tags` in `registry`.
    pub fn from_tags(registry: &EdgeRegistry, tags: &str, lengths: Vec<f64>) -> Result<Self> {
        Self::new(registry.resolve_all(tags)?, lengths)
    }

    /// Sum of the part lengths.
    pub fn length(&self) -> f64 {
        self.total
    }

    fn first(&self) -> &EdgeRef {
        &self.edges[0]
    }
}

impl Edge for CompoundEdge {
    fn description(&self) -> &'static str {
        "Compound Edge"
    }

    /// A zero `length` draws the parts at their own lengths.
    fn draw(&self, cursor: &mut dyn Cursor, length: f64, _bolts: Option<&BedBolts>) -> Result<()> {
        if length != 0.0 && (length - self.total).abs() > EPSILON {
            return Err(LengthMismatchError {
                edge: "CompoundEdge".to_string(),
                expected: length,
                actual: self.total,
            }
            .into());
        }

        let mut last_width = self.first().start_width();
        for (edge, &part) in self.edges.iter().zip(&self.lengths) {
            width_jog(cursor, last_width, edge.start_width());
            edge.draw(cursor, part, None)?;
            last_width = edge.end_width();
        }
        Ok(())
    }

    fn start_width(&self) -> f64 {
        self.first().start_width()
    }

    fn end_width(&self) -> f64 {
        self.edges
            .last()
            .map_or(0.0, |edge| edge.end_width())
    }

    fn margin(&self) -> f64 {
        let widest = self
            .edges
            .iter()
            .map(|e| e.margin() + e.start_width())
            .fold(f64::NEG_INFINITY, f64::max);
        widest - self.first().start_width()
    }
}
