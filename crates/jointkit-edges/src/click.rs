//! Click-on lids held by flexible hooks.

use crate::edge::{ensure_fits, Edge, EdgeRef};
use crate::registry::{EdgeFamily, EdgeRegistry};
use jointkit_core::{
    BedBolts, ConfigResult, Cursor, FamilySettings, JointContext, ParamDecl, PolyStep, Result,
    RecordingCursor, Settings, SettingsSchema,
};
use std::sync::Arc;

use PolyStep::{Line as L, Turn as T};

pub static CLICK_SCHEMA: SettingsSchema = SettingsSchema {
    family: "Click",
    absolute: &[ParamDecl::float("angle", 5.0, "angle of the hooks bending outward")],
    relative: &[
        ParamDecl::float("depth", 3.0, "length of the hooks"),
        ParamDecl::float("bottom_radius", 0.1, "radius at the bottom"),
    ],
};

#[derive(Debug, Clone)]
pub struct ClickSettings {
    settings: Settings,
}

impl FamilySettings for ClickSettings {
    fn schema() -> &'static SettingsSchema {
        &CLICK_SCHEMA
    }

    fn from_settings(settings: Settings) -> ConfigResult<Self> {
        Ok(Self { settings })
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl ClickSettings {
    pub fn angle(&self) -> f64 {
        self.settings.float("angle")
    }

    pub fn depth(&self) -> f64 {
        self.settings.float("depth")
    }

    pub fn bottom_radius(&self) -> f64 {
        self.settings.float("bottom_radius")
    }

    fn hook_parts(&self) -> ([PolyStep; 3], [PolyStep; 7], [PolyStep; 3]) {
        let t = self.thickness();
        let a = self.angle();
        let d = self.depth();
        let (s, c) = a.to_radians().sin_cos();
        (
            [L(0.0), T(90.0 - a), L(c * d)],
            [
                L(d + t),
                T(-90.0),
                L(0.5 * t),
                T(135.0),
                L(t * 2f64.sqrt()),
                T(135.0),
                L(d + 2.0 * t + s * 0.5 * t),
            ],
            [L(c * d - s * c * 0.2 * t), T(-a), L(0.0)],
        )
    }

    /// Draws one hook; the reversed hook mirrors it.
    fn hook(&self, cursor: &mut dyn Cursor, reverse: bool) {
        let (p1, p2, p3) = self.hook_parts();
        let a = self.angle();
        let r = self.bottom_radius();
        if reverse {
            cursor.polyline(&PolyStep::reversed(&p3));
            cursor.corner(-180.0 + 2.0 * a, r);
            cursor.polyline(&PolyStep::reversed(&p2));
            cursor.corner(-180.0, r);
            cursor.polyline(&PolyStep::reversed(&p1));
        } else {
            cursor.polyline(&p1);
            cursor.corner(-180.0, r);
            cursor.polyline(&p2);
            cursor.corner(-180.0 + 2.0 * a, r);
            cursor.polyline(&p3);
        }
    }

    /// Lead-in, hook, finger and mirrored hook at one end of a connector.
    fn hook_assembly(&self, cursor: &mut dyn Cursor) {
        let t = self.thickness();
        cursor.edge(4.0 * t);
        self.hook(cursor, false);
        cursor.polyline(&[L(2.0 * t), T(90.0), L(2.0 * t), T(90.0), L(2.0 * t)]);
        self.hook(cursor, true);
    }

    /// Distance one hook assembly advances along the edge.
    pub fn assembly_length(&self) -> f64 {
        let (end, _) = RecordingCursor::measure(|cursor| self.hook_assembly(cursor));
        end.x
    }

    /// Width of a single hook along the edge.
    pub fn hook_width(&self) -> f64 {
        (self.assembly_length() - 6.0 * self.thickness()) / 2.0
    }

    /// How far the hook tip overhangs the slot it snaps into.
    pub fn hook_offset(&self) -> f64 {
        let (s, c) = self.angle().to_radians().sin_cos();
        s * self.depth() * c + 2.0 * self.bottom_radius()
    }
}

/// Bottom side with two hooks at each end.
#[derive(Debug, Clone)]
pub struct ClickConnector {
    settings: Arc<ClickSettings>,
}

impl ClickConnector {
    pub fn new(settings: Arc<ClickSettings>) -> Self {
        Self { settings }
    }
}

impl Edge for ClickConnector {
    fn tag(&self) -> Option<char> {
        Some('c')
    }

    fn description(&self) -> &'static str {
        "Click on (bottom side)"
    }

    fn draw(&self, cursor: &mut dyn Cursor, length: f64, _bolts: Option<&BedBolts>) -> Result<()> {
        let s = &self.settings;
        let assembly = s.assembly_length();
        ensure_fits("click connector", length, 2.0 * assembly)?;

        s.hook_assembly(cursor);
        cursor.edge(length - 2.0 * assembly);
        s.hook_assembly(cursor);
        Ok(())
    }

    fn margin(&self) -> f64 {
        2.0 * self.settings.thickness()
    }
}

/// Top side with the slots the hooks snap into.
#[derive(Debug, Clone)]
pub struct ClickEdge {
    settings: Arc<ClickSettings>,
    ctx: JointContext,
}

impl ClickEdge {
    pub fn new(settings: Arc<ClickSettings>, ctx: &JointContext) -> Self {
        Self {
            settings,
            ctx: *ctx,
        }
    }
}

impl Edge for ClickEdge {
    fn tag(&self) -> Option<char> {
        Some('C')
    }

    fn description(&self) -> &'static str {
        "Click on (top)"
    }

    fn draw(&self, cursor: &mut dyn Cursor, length: f64, _bolts: Option<&BedBolts>) -> Result<()> {
        let s = &self.settings;
        let t = s.thickness();
        let o = s.hook_offset();
        let w = s.hook_width();
        let notch = [
            L(4.0 * t + o),
            T(90.0),
            L(t),
            T(-90.0),
            L(2.0 * (t + w - o)),
            T(-90.0),
            L(t),
            T(90.0),
            L(0.0),
        ];
        let middle = length - 2.0 * (6.0 * t + 2.0 * w) + 2.0 * o;
        ensure_fits("click edge", length, length - middle)?;

        cursor.polyline(&notch);
        cursor.edge(middle);
        cursor.polyline(&PolyStep::reversed(&notch));
        Ok(())
    }

    fn start_width(&self) -> f64 {
        self.ctx.thickness
    }
}

impl EdgeFamily for ClickSettings {
    fn edge_objects(
        self: &Arc<Self>,
        ctx: &JointContext,
        _registry: &EdgeRegistry,
    ) -> Result<Vec<EdgeRef>> {
        Ok(vec![
            Arc::new(ClickConnector::new(Arc::clone(self))),
            Arc::new(ClickEdge::new(Arc::clone(self), ctx)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_assembly_returns_to_baseline() {
        let settings = ClickSettings::with_defaults(3.0).unwrap();
        let (end, heading) = RecordingCursor::measure(|cursor| settings.hook_assembly(cursor));
        assert!(end.y.abs() < 1e-9);
        assert!(jointkit_core::normalize_degrees(heading).abs() < 1e-9);
        assert!(settings.hook_width() > 0.0);
    }
}
