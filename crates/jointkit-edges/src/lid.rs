//! Slide-on lids.
//!
//! The lid runs in a groove formed by the box sides. A small spring tab
//! on the lid snaps into a hole in the side to hold it closed.

use crate::edge::{ensure_fits, Edge, EdgeRef, Polarity};
use crate::finger::{FingerHoleEdge, FingerHoles, FingerJointEdge, FingerJointSettings};
use crate::registry::{EdgeFamily, EdgeRegistry};
use jointkit_core::{
    BedBolts, ConfigError, ConfigResult, Cursor, FamilySettings, JointContext, ParamDecl,
    PolyStep, Result, Settings, SettingsSchema,
};
use std::sync::Arc;

use PolyStep::{Line as L, Turn as T};

pub static LID_SCHEMA: SettingsSchema = SettingsSchema {
    family: "Lid",
    absolute: &[
        ParamDecl::float(
            "surroundingspaces",
            2.0,
            "maximum space at the start and end in multiple of normal spaces",
        ),
        ParamDecl::float("angle", 90.0, "angle of the walls meeting"),
        ParamDecl::flag("second_pin", true, "additional pin for better positioning"),
        ParamDecl::choice(
            "spring",
            &["both", "none", "left", "right"],
            "position(s) of the extra locking springs in the lid",
        ),
    ],
    relative: &[
        ParamDecl::float("space", 2.0, "space between fingers"),
        ParamDecl::float("finger", 3.0, "width of the fingers"),
        ParamDecl::float("width", 1.0, "width of finger holes"),
        ParamDecl::float("edge_width", 1.0, "space below holes of the finger hole edge"),
        ParamDecl::float("play", 0.05, "extra space to allow movement"),
    ],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spring {
    Both,
    None,
    Left,
    Right,
}

impl Spring {
    fn on(self, side: LidSide) -> bool {
        match self {
            Spring::Both => true,
            Spring::None => false,
            Spring::Left => side == LidSide::Left,
            Spring::Right => side == LidSide::Right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LidSide {
    Right,
    Left,
}

/// Finger joint parameters plus the lid's locking options.
#[derive(Debug, Clone)]
pub struct LidSettings {
    settings: Settings,
    fingers: Arc<FingerJointSettings>,
    spring: Spring,
}

impl FamilySettings for LidSettings {
    fn schema() -> &'static SettingsSchema {
        &LID_SCHEMA
    }

    fn from_settings(settings: Settings) -> ConfigResult<Self> {
        let spring = match settings.text("spring") {
            "both" => Spring::Both,
            "none" => Spring::None,
            "left" => Spring::Left,
            "right" => Spring::Right,
            other => {
                return Err(ConfigError::InvalidChoice {
                    family: LID_SCHEMA.family.to_string(),
                    name: "spring".to_string(),
                    value: other.to_string(),
                    choices: "both, none, left, right".to_string(),
                })
            }
        };
        // the lid schema declares every finger joint parameter
        let fingers = Arc::new(FingerJointSettings::from_settings(settings.clone())?);
        Ok(Self {
            settings,
            fingers,
            spring,
        })
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl LidSettings {
    pub fn second_pin(&self) -> bool {
        self.settings.flag("second_pin")
    }

    pub fn spring(&self) -> Spring {
        self.spring
    }

    pub fn play(&self) -> f64 {
        self.settings.float("play")
    }

    /// The finger joint view used by the `l` and `L` edges.
    pub fn fingers(&self) -> &Arc<FingerJointSettings> {
        &self.fingers
    }
}

/// Lid edge running in the groove, with spring and positioning pin.
#[derive(Debug, Clone)]
pub struct LidEdge {
    settings: Arc<LidSettings>,
    ctx: JointContext,
    side: LidSide,
}

impl LidEdge {
    pub fn new(settings: Arc<LidSettings>, ctx: &JointContext, side: LidSide) -> Self {
        Self {
            settings,
            ctx: *ctx,
            side,
        }
    }

    fn right(&self) -> bool {
        self.side == LidSide::Right
    }
}

impl Edge for LidEdge {
    fn tag(&self) -> Option<char> {
        Some(if self.right() { 'n' } else { 'm' })
    }

    fn description(&self) -> &'static str {
        if self.right() {
            "Edge for slide on lid (right)"
        } else {
            "Edge for slide on lid (left)"
        }
    }

    fn draw(&self, cursor: &mut dyn Cursor, length: f64, _bolts: Option<&BedBolts>) -> Result<()> {
        let t = self.ctx.thickness;
        let pin = self.settings.second_pin();
        ensure_fits("lid", length, if pin { 4.0 * t } else { 2.0 * t })?;

        let mut profile = if self.settings.spring().on(self.side) {
            let l = (6.0 * t).min(length - 2.0 * t);
            let a: f64 = 30.0;
            let sqt = 0.4 * t / a.to_radians().cos();
            let sw = 0.5 * t;
            vec![
                L(0.0),
                T(90.0),
                L(1.5 * t + sw),
                T(-90.0),
                L(l),
                PolyStep::arc(-180.0, 0.25 * t),
                L(l - 0.2 * t),
                T(90.0),
                L(sw),
                T(90.0 - a),
                L(sqt),
                T(2.0 * a),
                L(sqt),
                T(-a),
                L(length - t),
            ]
        } else {
            vec![L(t), T(90.0), L(t), T(-90.0), L(length - t)]
        };

        if pin {
            let pinl = 2.0 * t;
            profile.pop();
            profile.extend([
                L(length - 2.0 * t - pinl),
                T(-90.0),
                L(t),
                T(90.0),
                L(pinl),
                T(90.0),
                L(t),
                T(-90.0),
                L(t),
            ]);
        }

        if self.right() {
            cursor.polyline(&profile);
        } else {
            cursor.polyline(&PolyStep::reversed(&profile));
        }
        Ok(())
    }

    fn start_width(&self) -> f64 {
        if self.right() {
            self.ctx.thickness
        } else {
            0.0
        }
    }

    fn end_width(&self) -> f64 {
        if self.right() {
            0.0
        } else {
            self.ctx.thickness
        }
    }

    fn margin(&self) -> f64 {
        self.end_width()
    }
}

/// Box side forming the groove the lid slides in.
#[derive(Debug, Clone)]
pub struct LidSideEdge {
    settings: Arc<LidSettings>,
    ctx: JointContext,
    side: LidSide,
}

impl LidSideEdge {
    pub fn new(settings: Arc<LidSettings>, ctx: &JointContext, side: LidSide) -> Self {
        Self {
            settings,
            ctx: *ctx,
            side,
        }
    }

    fn right(&self) -> bool {
        self.side == LidSide::Right
    }
}

impl Edge for LidSideEdge {
    fn tag(&self) -> Option<char> {
        Some(if self.right() { 'N' } else { 'M' })
    }

    fn description(&self) -> &'static str {
        if self.right() {
            "Edge for slide on lid (box right)"
        } else {
            "Edge for slide on lid (box left)"
        }
    }

    fn draw(&self, cursor: &mut dyn Cursor, length: f64, _bolts: Option<&BedBolts>) -> Result<()> {
        let t = self.ctx.thickness;
        let s = self.settings.play();
        let pin = self.settings.second_pin();
        let spring = self.settings.spring().on(self.side);
        if pin {
            ensure_fits("lid side", length, 4.0 * t)?;
        }

        let mut profile = if spring {
            vec![L(s), T(-90.0), L(t + s), T(-90.0), L(t + s), T(90.0), L(t - s), T(90.0)]
        } else {
            vec![
                L(t + s),
                T(-90.0),
                L(t + s),
                T(-90.0),
                L(2.0 * t + s),
                T(90.0),
                L(t - s),
                T(90.0),
            ]
        };
        if pin {
            let pinl = 2.0 * t;
            profile.extend([
                L(length - 4.0 * t),
                T(90.0),
                L(2.0 * t + s),
                T(-90.0),
                L(2.0 * pinl + s),
                T(-90.0),
                L(t + s),
                T(-90.0),
                L(pinl),
                T(90.0),
                L(t),
                T(90.0),
                L(pinl + t - s),
            ]);
        } else {
            profile.push(L(length + t));
        }

        let (mut hole_x, mut hole_y) = (0.6 * t, -0.5 * t);
        if self.right() {
            profile = PolyStep::reversed(&profile);
            hole_x = length - hole_x;
            hole_y = 1.5 * t;
        }
        if spring {
            cursor.rectangular_hole(hole_x, hole_y, 0.4 * t, t + 2.0 * s, 0.0);
        }
        cursor.polyline(&profile);
        Ok(())
    }

    fn start_width(&self) -> f64 {
        if self.right() {
            2.0 * self.ctx.thickness
        } else {
            0.0
        }
    }

    fn end_width(&self) -> f64 {
        if self.right() {
            0.0
        } else {
            2.0 * self.ctx.thickness
        }
    }

    fn margin(&self) -> f64 {
        self.end_width()
    }
}

impl EdgeFamily for LidSettings {
    fn edge_objects(
        self: &Arc<Self>,
        ctx: &JointContext,
        _registry: &EdgeRegistry,
    ) -> Result<Vec<EdgeRef>> {
        let fingers = Arc::clone(self.fingers());
        let holes = Arc::new(FingerHoles::new(Arc::clone(&fingers), ctx));
        Ok(vec![
            Arc::new(
                FingerJointEdge::new(fingers, ctx, Polarity::Positive)
                    .with_tag('l', "Edge for slide on lid"),
            ),
            Arc::new(FingerHoleEdge::new(holes).with_tag('L', "Edge for slide on lid (holes)")),
            Arc::new(LidEdge::new(Arc::clone(self), ctx, LidSide::Right)),
            Arc::new(LidEdge::new(Arc::clone(self), ctx, LidSide::Left)),
            Arc::new(LidSideEdge::new(Arc::clone(self), ctx, LidSide::Right)),
            Arc::new(LidSideEdge::new(Arc::clone(self), ctx, LidSide::Left)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lid_uses_its_own_finger_defaults() {
        let lid = LidSettings::with_defaults(3.0).unwrap();
        assert!((lid.fingers().finger() - 9.0).abs() < 1e-9);
        assert!((lid.fingers().play() - 0.15).abs() < 1e-9);
        assert_eq!(lid.spring(), Spring::Both);
        assert!(lid.second_pin());
    }

    #[test]
    fn test_spring_sides() {
        assert!(Spring::Left.on(LidSide::Left));
        assert!(!Spring::Left.on(LidSide::Right));
        assert!(!Spring::None.on(LidSide::Right));
    }
}
