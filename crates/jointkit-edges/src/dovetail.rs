//! Dovetail joints.

use crate::edge::{Edge, EdgeRef, Polarity};
use crate::registry::{EdgeFamily, EdgeRegistry};
use jointkit_core::{
    BedBolts, ConfigResult, Cursor, FamilySettings, GeometryError, JointContext, ParamDecl,
    Result, Settings, SettingsSchema,
};
use std::f64::consts::FRAC_PI_2;
use std::sync::Arc;
use tracing::warn;

pub static DOVETAIL_SCHEMA: SettingsSchema = SettingsSchema {
    family: "DoveTail",
    absolute: &[ParamDecl::float("angle", 50.0, "how much should fingers widen (-80 to 80)")],
    relative: &[
        ParamDecl::float("size", 3.0, "from one middle of a dove tail to another"),
        ParamDecl::float("depth", 1.5, "how far the dove tails stick out of/into the edge"),
        ParamDecl::float("radius", 0.2, "radius used on all four corners"),
    ],
};

#[derive(Debug, Clone)]
pub struct DoveTailSettings {
    settings: Settings,
}

impl FamilySettings for DoveTailSettings {
    fn schema() -> &'static SettingsSchema {
        &DOVETAIL_SCHEMA
    }

    fn from_settings(settings: Settings) -> ConfigResult<Self> {
        Ok(Self { settings })
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl DoveTailSettings {
    pub fn angle(&self) -> f64 {
        self.settings.float("angle")
    }

    pub fn size(&self) -> f64 {
        self.settings.float("size")
    }

    pub fn depth(&self) -> f64 {
        self.settings.float("depth")
    }

    pub fn radius(&self) -> f64 {
        self.settings.float("radius")
    }

    /// Number of tails that fit and the space left over.
    pub fn sections(&self, length: f64) -> (usize, f64) {
        let period = 2.0 * self.size();
        if period <= 0.0 || length < period {
            return (0, length);
        }
        let sections = (length / period).floor() as usize;
        (sections, length - sections as f64 * period)
    }
}

#[derive(Debug, Clone)]
pub struct DoveTailJoint {
    settings: Arc<DoveTailSettings>,
    ctx: JointContext,
    polarity: Polarity,
}

impl DoveTailJoint {
    pub fn new(settings: Arc<DoveTailSettings>, ctx: &JointContext, polarity: Polarity) -> Self {
        Self {
            settings,
            ctx: *ctx,
            polarity,
        }
    }
}

impl Edge for DoveTailJoint {
    fn tag(&self) -> Option<char> {
        Some(if self.polarity.is_positive() { 'd' } else { 'D' })
    }

    fn description(&self) -> &'static str {
        if self.polarity.is_positive() {
            "Dove Tail Joint"
        } else {
            "Dove Tail Joint (opposing side)"
        }
    }

    fn draw(&self, cursor: &mut dyn Cursor, length: f64, _bolts: Option<&BedBolts>) -> Result<()> {
        let s = &self.settings;
        if s.angle().abs() >= 90.0 {
            return Err(GeometryError::InvalidProfile(format!(
                "dovetail angle {} must lie strictly between -90 and 90",
                s.angle()
            ))
            .into());
        }

        let (sections, leftover) = s.sections(length);
        if sections == 0 {
            warn!(length, size = s.size(), "no dovetail fits, drawing a straight edge");
            cursor.edge(length);
            return Ok(());
        }

        // never round tighter than the cutter can
        let radius = s.radius().max(self.ctx.burn);
        let p = self.polarity.sign();
        let a = s.angle() + 90.0;
        let alpha = FRAC_PI_2 - s.angle().to_radians();
        let size = s.size();

        let l1 = radius / (alpha / 2.0).tan();
        let diffx = 0.5 * s.depth() / alpha.tan();
        let l2 = 0.5 * s.depth() / alpha.sin();
        let end = (size + leftover) / 2.0 + diffx - l1;
        let between = 2.0 * (diffx - l1) + size;

        cursor.edge(end);
        for i in 0..sections {
            cursor.corner(-p * a, radius);
            cursor.edge(2.0 * (l2 - l1));
            cursor.corner(p * a, radius);
            cursor.edge(between);
            cursor.corner(p * a, radius);
            cursor.edge(2.0 * (l2 - l1));
            cursor.corner(-p * a, radius);
            if i + 1 < sections {
                cursor.edge(between);
            }
        }
        cursor.edge(end);
        Ok(())
    }

    fn margin(&self) -> f64 {
        if self.polarity.is_positive() {
            self.settings.depth()
        } else {
            0.0
        }
    }
}

impl EdgeFamily for DoveTailSettings {
    fn edge_objects(
        self: &Arc<Self>,
        ctx: &JointContext,
        _registry: &EdgeRegistry,
    ) -> Result<Vec<EdgeRef>> {
        Ok(vec![
            Arc::new(DoveTailJoint::new(Arc::clone(self), ctx, Polarity::Positive)),
            Arc::new(DoveTailJoint::new(Arc::clone(self), ctx, Polarity::Counterpart)),
        ])
    }
}
