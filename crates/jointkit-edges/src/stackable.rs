//! Stackable feet.
//!
//! The bottom edge has two feet and finger holes for the wall above it,
//! the top edge has matching recesses so boxes stack.

use crate::edge::{ensure_fits, Edge, EdgeRef};
use crate::finger::FingerHoles;
use crate::registry::{EdgeFamily, EdgeRegistry};
use jointkit_core::{
    BedBolts, ConfigError, ConfigResult, Cursor, FamilySettings, JointContext, ParamDecl, Result,
    Settings, SettingsSchema,
};
use std::sync::Arc;

pub static STACKABLE_SCHEMA: SettingsSchema = SettingsSchema {
    family: "Stackable",
    absolute: &[ParamDecl::float("angle", 60.0, "inside angle of the feet")],
    relative: &[
        ParamDecl::float("height", 2.0, "height of the feet"),
        ParamDecl::float("width", 4.0, "width of the feet"),
        ParamDecl::float("holedistance", 1.0, "distance from finger holes to bottom edge"),
    ],
};

#[derive(Debug, Clone)]
pub struct StackableSettings {
    settings: Settings,
}

impl FamilySettings for StackableSettings {
    fn schema() -> &'static SettingsSchema {
        &STACKABLE_SCHEMA
    }

    fn from_settings(settings: Settings) -> ConfigResult<Self> {
        Ok(Self { settings })
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl StackableSettings {
    pub fn angle(&self) -> f64 {
        self.settings.float("angle")
    }

    pub fn height(&self) -> f64 {
        self.settings.float("height")
    }

    pub fn width(&self) -> f64 {
        self.settings.float("width")
    }

    pub fn hole_distance(&self) -> f64 {
        self.settings.float("holedistance")
    }

    /// Radius of the foot flanks and their run along the edge.
    fn flank(&self) -> (f64, f64) {
        let angle = self.angle().to_radians();
        let r = self.height() / 2.0 / (1.0 - angle.cos());
        (r, r * angle.sin())
    }

    /// Distance from the foot to the wall's inner face.
    pub fn total_height(&self) -> f64 {
        self.height() + self.hole_distance() + self.thickness()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackablePosition {
    Bottom,
    Top,
}

#[derive(Debug, Clone)]
pub struct StackableEdge {
    settings: Arc<StackableSettings>,
    holes: Arc<FingerHoles>,
    ctx: JointContext,
    position: StackablePosition,
}

impl StackableEdge {
    pub fn new(
        settings: Arc<StackableSettings>,
        holes: Arc<FingerHoles>,
        ctx: &JointContext,
        position: StackablePosition,
    ) -> Self {
        Self {
            settings,
            holes,
            ctx: *ctx,
            position,
        }
    }

    fn bottom(&self) -> bool {
        self.position == StackablePosition::Bottom
    }
}

impl Edge for StackableEdge {
    fn tag(&self) -> Option<char> {
        Some(if self.bottom() { 's' } else { 'S' })
    }

    fn description(&self) -> &'static str {
        if self.bottom() {
            "Stackable (bottom, finger joint holes)"
        } else {
            "Stackable (top)"
        }
    }

    fn draw(&self, cursor: &mut dyn Cursor, length: f64, _bolts: Option<&BedBolts>) -> Result<()> {
        let s = &self.settings;
        let (r, l) = s.flank();
        let angle = s.angle();
        let width = s.width();
        let middle = length - 2.0 * width - 4.0 * l;
        ensure_fits("stackable edge", length, 2.0 * width + 4.0 * l)?;

        let p = if self.bottom() { 1.0 } else { -1.0 };
        if self.bottom() {
            let y = s.height() + s.hole_distance() + 0.5 * self.ctx.thickness;
            self.holes.draw_at(cursor, 0.0, y, length, 0.0, None);
        }

        cursor.edge(width);
        cursor.corner(p * angle, r);
        cursor.corner(-p * angle, r);
        cursor.edge(middle.max(0.0));
        cursor.corner(-p * angle, r);
        cursor.corner(p * angle, r);
        cursor.edge(width);
        Ok(())
    }

    fn start_width(&self) -> f64 {
        if self.bottom() {
            self.settings.total_height()
        } else {
            0.0
        }
    }

    fn margin(&self) -> f64 {
        if self.bottom() {
            0.0
        } else {
            self.settings.total_height()
        }
    }
}

impl EdgeFamily for StackableSettings {
    fn edge_objects(
        self: &Arc<Self>,
        ctx: &JointContext,
        registry: &EdgeRegistry,
    ) -> Result<Vec<EdgeRef>> {
        let holes = registry.finger_holes().ok_or_else(|| {
            ConfigError::MissingDependency(
                "stackable edges need a finger joint family registered first".to_string(),
            )
        })?;
        Ok([StackablePosition::Bottom, StackablePosition::Top]
            .into_iter()
            .map(|position| {
                Arc::new(StackableEdge::new(
                    Arc::clone(self),
                    Arc::clone(&holes),
                    ctx,
                    position,
                )) as EdgeRef
            })
            .collect())
    }
}
