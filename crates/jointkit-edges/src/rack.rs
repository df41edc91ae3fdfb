//! Gear rack edge.

use crate::edge::{Edge, EdgeRef};
use crate::registry::{EdgeFamily, EdgeRegistry};
use jointkit_core::{
    BedBolts, ConfigResult, Cursor, FamilySettings, GeometryError, JointContext, ParamDecl,
    PolyStep, Result, Settings, SettingsSchema,
};
use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

use PolyStep::{Line as L, Turn as T};

pub static GEAR_SCHEMA: SettingsSchema = SettingsSchema {
    family: "Gear",
    absolute: &[
        ParamDecl::float("dimension", 3.0, "tooth pitch of the rack"),
        ParamDecl::float("angle", 20.0, "pressure angle"),
        ParamDecl::float("profile_shift", 20.0, "profile shift in percent of the module"),
        ParamDecl::float("clearance", 0.0, "extra depth below the mating teeth"),
    ],
    relative: &[],
};

#[derive(Debug, Clone)]
pub struct GearSettings {
    settings: Settings,
}

impl FamilySettings for GearSettings {
    fn schema() -> &'static SettingsSchema {
        &GEAR_SCHEMA
    }

    fn from_settings(settings: Settings) -> ConfigResult<Self> {
        Ok(Self { settings })
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl GearSettings {
    pub fn dimension(&self) -> f64 {
        self.settings.float("dimension")
    }

    pub fn angle(&self) -> f64 {
        self.settings.float("angle")
    }

    pub fn profile_shift(&self) -> f64 {
        self.settings.float("profile_shift")
    }

    pub fn clearance(&self) -> f64 {
        self.settings.float("clearance")
    }
}

/// Shape of a single rack tooth.
pub trait RackProfile: fmt::Debug + Send + Sync {
    /// Distance between neighbouring teeth.
    fn pitch(&self) -> f64;

    /// How far a tooth sticks out of the edge.
    fn height(&self) -> f64;

    /// Draws one tooth period starting and ending on the edge line.
    fn draw_tooth(&self, cursor: &mut dyn Cursor);
}

/// Involute rack approximated by straight flanks, which is exact for a rack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StraightFlankRack {
    pitch: f64,
    pressure_angle: f64,
    addendum: f64,
    dedendum: f64,
    tip: f64,
    gap: f64,
}

impl StraightFlankRack {
    pub fn new(pitch: f64, pressure_angle: f64, profile_shift: f64, clearance: f64) -> Result<Self> {
        if pitch <= 0.0 || !(0.0..90.0).contains(&pressure_angle) {
            return Err(GeometryError::InvalidProfile(format!(
                "rack needs a positive pitch and a pressure angle below 90, got {pitch} and {pressure_angle}"
            ))
            .into());
        }
        let module = pitch / PI;
        let tan = pressure_angle.to_radians().tan();
        let addendum = module;
        let dedendum = module + clearance;
        // tooth thickness on the pitch line
        let thickness = pitch / 2.0 + 2.0 * profile_shift / 100.0 * module * tan;
        let tip = thickness - 2.0 * addendum * tan;
        let gap = pitch - thickness - 2.0 * dedendum * tan;

        if tip < 0.0 {
            return Err(GeometryError::InvalidProfile(format!(
                "rack tooth tip width is negative ({tip:.3})"
            ))
            .into());
        }
        if gap < 0.0 {
            return Err(GeometryError::InvalidProfile(format!(
                "rack tooth root gap is negative ({gap:.3})"
            ))
            .into());
        }
        Ok(Self {
            pitch,
            pressure_angle,
            addendum,
            dedendum,
            tip,
            gap,
        })
    }

    pub fn from_settings(settings: &GearSettings) -> Result<Self> {
        Self::new(
            settings.dimension(),
            settings.angle(),
            settings.profile_shift(),
            settings.clearance(),
        )
    }

    pub fn tip_width(&self) -> f64 {
        self.tip
    }

    pub fn root_gap(&self) -> f64 {
        self.gap
    }
}

impl RackProfile for StraightFlankRack {
    fn pitch(&self) -> f64 {
        self.pitch
    }

    fn height(&self) -> f64 {
        self.addendum + self.dedendum
    }

    fn draw_tooth(&self, cursor: &mut dyn Cursor) {
        let turn = 90.0 - self.pressure_angle;
        let flank = self.height() / self.pressure_angle.to_radians().cos();
        cursor.polyline(&[
            L(self.gap / 2.0),
            T(-turn),
            L(flank),
            T(turn),
            L(self.tip),
            T(turn),
            L(flank),
            T(-turn),
            L(self.gap / 2.0),
        ]);
    }
}

/// Edge with rack teeth, the remainder split evenly at both ends.
#[derive(Debug, Clone)]
pub struct RackEdge {
    settings: Arc<GearSettings>,
    profile: Arc<dyn RackProfile>,
}

impl RackEdge {
    pub fn new(settings: Arc<GearSettings>) -> Result<Self> {
        let profile = Arc::new(StraightFlankRack::from_settings(&settings)?);
        Ok(Self { settings, profile })
    }

    pub fn with_profile(settings: Arc<GearSettings>, profile: Arc<dyn RackProfile>) -> Self {
        Self { settings, profile }
    }
}

impl Edge for RackEdge {
    fn tag(&self) -> Option<char> {
        Some('R')
    }

    fn description(&self) -> &'static str {
        "Rack (and pinion) Edge"
    }

    fn draw(&self, cursor: &mut dyn Cursor, length: f64, _bolts: Option<&BedBolts>) -> Result<()> {
        let pitch = self.profile.pitch();
        let teeth = (length / pitch).floor().max(0.0) as usize;
        if teeth == 0 {
            warn!(length, pitch, "no rack tooth fits, drawing a straight edge");
            cursor.edge(length);
            return Ok(());
        }

        let tab = (length - teeth as f64 * pitch) / 2.0;
        cursor.edge(tab);
        for _ in 0..teeth {
            self.profile.draw_tooth(cursor);
        }
        cursor.edge(tab);
        Ok(())
    }

    fn margin(&self) -> f64 {
        self.settings.dimension() * 1.1
    }
}

impl EdgeFamily for GearSettings {
    fn edge_objects(
        self: &Arc<Self>,
        _ctx: &JointContext,
        _registry: &EdgeRegistry,
    ) -> Result<Vec<EdgeRef>> {
        Ok(vec![Arc::new(RackEdge::new(Arc::clone(self))?)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rack_is_valid() {
        let settings = GearSettings::with_defaults(3.0).unwrap();
        let rack = StraightFlankRack::from_settings(&settings).unwrap();
        assert!(rack.tip_width() > 0.0);
        assert!(rack.root_gap() > 0.0);
        assert!((rack.height() - 6.0 / PI).abs() < 1e-9);
    }

    #[test]
    fn test_steep_pressure_angle_is_rejected() {
        assert!(StraightFlankRack::new(3.0, 60.0, 0.0, 0.0).is_err());
    }
}
