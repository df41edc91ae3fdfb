//! Drawing context shared by the edges of one render.

use crate::bolts::BedBoltSettings;
use serde::{Deserialize, Serialize};

/// Material and cutter parameters every edge needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointContext {
    /// Material thickness
    pub thickness: f64,
    /// Half the kerf of the cutter
    pub burn: f64,
    pub bed_bolts: BedBoltSettings,
}

impl Default for JointContext {
    fn default() -> Self {
        Self {
            thickness: 3.0,
            burn: 0.1,
            bed_bolts: BedBoltSettings::default(),
        }
    }
}

impl JointContext {
    pub fn new(thickness: f64) -> Self {
        Self {
            thickness,
            ..Self::default()
        }
    }

    pub fn with_burn(mut self, burn: f64) -> Self {
        self.burn = burn;
        self
    }

    pub fn with_bed_bolts(mut self, bed_bolts: BedBoltSettings) -> Self {
        self.bed_bolts = bed_bolts;
        self
    }

    /// Gap kept between separate parts.
    pub fn spacing(&self) -> f64 {
        2.0 * self.burn + 0.5 * self.thickness
    }
}
