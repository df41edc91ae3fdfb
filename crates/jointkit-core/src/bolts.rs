//! Bed bolt distribution.
//!
//! A bolt policy decides which of the gaps between fingers of a joint get
//! a bed bolt. Positions are mirrored about the centre so the pattern is
//! symmetric, and the outermost gaps never carry a bolt.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Rounds down to an even count.
pub fn evenify(n: usize) -> usize {
    n - n % 2
}

/// Rounds down to an odd count; zero stays zero.
pub fn oddify(n: usize) -> usize {
    if n % 2 == 1 {
        n
    } else {
        n.saturating_sub(1)
    }
}

/// Decides where bed bolts go along a finger joint.
pub trait BoltPolicy: fmt::Debug + Send + Sync {
    /// Number of bolts the policy places.
    fn bolts(&self) -> usize;

    /// Largest finger count not above `fingers` that the policy can use.
    fn num_fingers(&self, fingers: usize) -> usize;

    /// Whether the gap before finger `pos` carries a bolt.
    fn draw_bolt(&self, fingers: usize, pos: usize) -> bool;
}

/// Evenly spread bolts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bolts {
    pub bolts: usize,
}

impl Bolts {
    pub fn new(bolts: usize) -> Self {
        Self { bolts }
    }

    /// All positions in `0..fingers` that carry a bolt.
    pub fn positions(&self, fingers: usize) -> Vec<usize> {
        (0..fingers)
            .filter(|&pos| self.draw_bolt(fingers, pos))
            .collect()
    }

    fn bucket(&self, pos: usize, fingers: usize) -> f64 {
        (pos as f64 * (self.bolts + 1) as f64 / fingers as f64 - 0.01).floor()
    }
}

impl BoltPolicy for Bolts {
    fn bolts(&self) -> usize {
        self.bolts
    }

    fn num_fingers(&self, fingers: usize) -> usize {
        if self.bolts % 2 == 1 {
            evenify(fingers)
        } else {
            fingers
        }
    }

    fn draw_bolt(&self, fingers: usize, pos: usize) -> bool {
        if fingers == 0 || self.bolts == 0 {
            return false;
        }
        let half = fingers / 2;
        let pos = if pos > half { fingers.saturating_sub(pos) } else { pos };
        if pos == 0 {
            return false;
        }
        if pos == half && self.bolts % 2 == 0 {
            return false;
        }
        self.bucket(pos, fingers) != self.bucket(pos + 1, fingers)
    }
}

/// Dimensions of the bolt and nut used for bed bolts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BedBoltSettings {
    /// Bolt diameter
    pub diameter: f64,
    /// Nut width across flats
    pub nut_diameter: f64,
    /// Nut height
    pub nut_height: f64,
    /// Bolt length
    pub length: f64,
    /// Distance from the panel edge to the nut
    pub nut_distance: f64,
}

impl Default for BedBoltSettings {
    fn default() -> Self {
        Self {
            diameter: 3.0,
            nut_diameter: 5.5,
            nut_height: 2.0,
            length: 20.0,
            nut_distance: 15.0,
        }
    }
}

/// A bolt policy plus optional bolt dimensions for one edge.
#[derive(Debug, Clone)]
pub struct BedBolts {
    pub policy: Arc<dyn BoltPolicy>,
    pub settings: Option<BedBoltSettings>,
}

impl BedBolts {
    pub fn new(policy: impl BoltPolicy + 'static) -> Self {
        Self {
            policy: Arc::new(policy),
            settings: None,
        }
    }

    /// Evenly spread bolts with default dimensions.
    pub fn even(bolts: usize) -> Self {
        Self::new(Bolts::new(bolts))
    }

    pub fn with_settings(mut self, settings: BedBoltSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// The edge's own dimensions, or `fallback`.
    pub fn dimensions(&self, fallback: &BedBoltSettings) -> BedBoltSettings {
        self.settings.unwrap_or(*fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parity_helpers() {
        assert_eq!(evenify(7), 6);
        assert_eq!(evenify(8), 8);
        assert_eq!(oddify(8), 7);
        assert_eq!(oddify(7), 7);
        assert_eq!(oddify(0), 0);
    }

    #[test]
    fn test_odd_bolts_need_even_fingers() {
        assert_eq!(Bolts::new(3).num_fingers(11), 10);
        assert_eq!(Bolts::new(2).num_fingers(11), 11);
    }

    #[test]
    fn test_no_bolts_never_draws() {
        let policy = Bolts::new(0);
        assert!(policy.positions(10).is_empty());
        assert!(!Bolts::new(2).draw_bolt(0, 0));
    }
}
