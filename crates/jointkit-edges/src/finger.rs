//! Finger joints.
//!
//! Both halves of a joint and the matching hole rows are built from one
//! shared [`FingerJointSettings`], so the finger arithmetic is identical
//! on every edge that meets at the joint.

use crate::edge::{Edge, EdgeRef, Polarity};
use crate::registry::{EdgeFamily, EdgeRegistry};
use crate::straight::bed_bolt_hole;
use jointkit_core::{
    BedBolts, BoltPolicy, ConfigResult, Cursor, FamilySettings, JointContext, ParamDecl, PolyStep,
    Result, ScopedFrame, Settings, SettingsSchema,
};
use std::sync::Arc;
use tracing::{debug, warn};

pub static FINGER_JOINT_SCHEMA: SettingsSchema = SettingsSchema {
    family: "FingerJoint",
    absolute: &[
        ParamDecl::float(
            "surroundingspaces",
            2.0,
            "maximum space at the start and end in multiple of normal spaces",
        ),
        ParamDecl::float("angle", 90.0, "angle of the walls meeting"),
    ],
    relative: &[
        ParamDecl::float("space", 2.0, "space between fingers"),
        ParamDecl::float("finger", 2.0, "width of the fingers"),
        ParamDecl::float("width", 1.0, "width of finger holes"),
        ParamDecl::float("edge_width", 1.0, "space below holes of the finger hole edge"),
        ParamDecl::float("play", 0.0, "extra space to allow movement"),
    ],
};

/// Finger layout along an edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FingerLayout {
    pub fingers: usize,
    /// Space left over, split evenly between both ends.
    pub leftover: f64,
}

/// Finger joint parameters.
#[derive(Debug, Clone)]
pub struct FingerJointSettings {
    settings: Settings,
}

impl FamilySettings for FingerJointSettings {
    fn schema() -> &'static SettingsSchema {
        &FINGER_JOINT_SCHEMA
    }

    fn from_settings(settings: Settings) -> ConfigResult<Self> {
        Ok(Self { settings })
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl FingerJointSettings {
    pub fn space(&self) -> f64 {
        self.settings.float("space")
    }

    pub fn finger(&self) -> f64 {
        self.settings.float("finger")
    }

    pub fn width(&self) -> f64 {
        self.settings.float("width")
    }

    pub fn edge_width(&self) -> f64 {
        self.settings.float("edge_width")
    }

    pub fn play(&self) -> f64 {
        self.settings.float("play")
    }

    pub fn surrounding_spaces(&self) -> f64 {
        self.settings.float("surroundingspaces")
    }

    pub fn angle(&self) -> f64 {
        self.settings.float("angle")
    }

    /// Number of fingers that fit in `length` and the leftover space.
    pub fn calc_fingers(&self, length: f64, bolts: Option<&dyn BoltPolicy>) -> FingerLayout {
        let space = self.space();
        let finger = self.finger();
        let pitch = space + finger;

        let fit = if finger > 0.0 && pitch > 0.0 {
            ((length - (self.surrounding_spaces() - 1.0) * space) / pitch).floor()
        } else {
            0.0
        };
        let mut fingers = if fit > 0.0 { fit as usize } else { 0 };
        if let Some(policy) = bolts {
            fingers = policy.num_fingers(fingers);
        }

        if fingers == 0 {
            return FingerLayout {
                fingers: 0,
                leftover: length,
            };
        }

        let leftover = length - fingers as f64 * pitch + space;
        debug!(length, fingers, leftover, "calculated fingers");
        FingerLayout { fingers, leftover }
    }

    /// Finger depth for walls meeting at `angle` and the recess subtracted
    /// on the counterpart.
    pub fn finger_length(&self, angle: f64) -> (f64, f64) {
        let t = self.thickness();
        if angle >= 90.0 {
            return (t, 0.0);
        }
        let a = 90.0 - (180.0 - angle) / 2.0;
        let length = t * a.to_radians().tan();
        let b = 90.0 - 2.0 * a;
        let recess = -b.to_radians().sin() * length;
        (length, recess)
    }

    /// Start offsets of the fingers along an edge of `length`.
    pub fn finger_positions(&self, length: f64, bolts: Option<&dyn BoltPolicy>) -> Vec<f64> {
        let layout = self.calc_fingers(length, bolts);
        let pitch = self.space() + self.finger();
        (0..layout.fingers)
            .map(|i| layout.leftover / 2.0 + i as f64 * pitch)
            .collect()
    }
}

/// One half of a finger joint.
#[derive(Debug, Clone)]
pub struct FingerJointEdge {
    settings: Arc<FingerJointSettings>,
    ctx: JointContext,
    polarity: Polarity,
    tag: char,
    description: &'static str,
}

impl FingerJointEdge {
    pub fn new(settings: Arc<FingerJointSettings>, ctx: &JointContext, polarity: Polarity) -> Self {
        let (tag, description) = match polarity {
            Polarity::Positive => ('f', "Finger Joint"),
            Polarity::Counterpart => ('F', "Finger Joint (opposing side)"),
        };
        Self {
            settings,
            ctx: *ctx,
            polarity,
            tag,
            description,
        }
    }

    /// Same geometry under another tag, as used by lids.
    pub fn with_tag(mut self, tag: char, description: &'static str) -> Self {
        self.tag = tag;
        self.description = description;
        self
    }

    pub fn settings(&self) -> &FingerJointSettings {
        &self.settings
    }
}

impl Edge for FingerJointEdge {
    fn tag(&self) -> Option<char> {
        Some(self.tag)
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn draw(&self, cursor: &mut dyn Cursor, length: f64, bolts: Option<&BedBolts>) -> Result<()> {
        let s = &self.settings;
        let positive = self.polarity.is_positive();
        let p = self.polarity.sign();
        let policy = bolts.map(|b| b.policy.as_ref());

        let layout = s.calc_fingers(length, policy);
        if layout.fingers == 0 {
            warn!(length, "no fingers fit, drawing a straight edge");
        }

        let (mut space, mut finger, mut leftover) = (s.space(), s.finger(), layout.leftover);
        if !positive && layout.fingers > 0 {
            let play = s.play();
            finger += play;
            space -= play;
            leftover -= play;
        }

        let (l1, l2) = s.finger_length(s.angle());
        let h = l1 - l2;
        let dims = bolts.map(|b| b.dimensions(&self.ctx.bed_bolts));
        let profile = [
            PolyStep::Turn(-90.0 * p),
            PolyStep::Line(h),
            PolyStep::Turn(90.0 * p),
            PolyStep::Line(finger),
            PolyStep::Turn(90.0 * p),
            PolyStep::Line(h),
            PolyStep::Turn(-90.0 * p),
        ];

        cursor.edge(leftover / 2.0);
        for i in 0..layout.fingers {
            if i != 0 {
                let bolt = match (policy, dims) {
                    (Some(policy), Some(dims)) if policy.draw_bolt(layout.fingers, i) => Some(dims),
                    _ => None,
                };
                match bolt {
                    Some(dims) if positive => bed_bolt_hole(cursor, space, &dims),
                    Some(dims) => {
                        cursor.hole(0.5 * space, 0.5 * s.thickness(), 0.5 * dims.diameter);
                        cursor.edge(space);
                    }
                    None => cursor.edge(space),
                }
            }
            cursor.polyline(&profile);
        }
        cursor.edge(leftover / 2.0);
        Ok(())
    }

    fn start_width(&self) -> f64 {
        let (length, recess) = self.settings.finger_length(self.settings.angle());
        if self.polarity.is_positive() {
            recess
        } else {
            length
        }
    }

    fn margin(&self) -> f64 {
        let (length, recess) = self.settings.finger_length(self.settings.angle());
        if self.polarity.is_positive() {
            length - recess
        } else {
            0.0
        }
    }
}

/// Rows of slots matching a finger joint edge.
#[derive(Debug, Clone)]
pub struct FingerHoles {
    settings: Arc<FingerJointSettings>,
    ctx: JointContext,
}

impl FingerHoles {
    pub fn new(settings: Arc<FingerJointSettings>, ctx: &JointContext) -> Self {
        Self {
            settings,
            ctx: *ctx,
        }
    }

    pub fn settings(&self) -> &FingerJointSettings {
        &self.settings
    }

    /// Cuts the slots for a mating edge of `length` starting at the local
    /// position `(x, y)` and running at `angle`. The cursor is left as it was.
    pub fn draw_at(
        &self,
        cursor: &mut dyn Cursor,
        x: f64,
        y: f64,
        length: f64,
        angle: f64,
        bolts: Option<&BedBolts>,
    ) {
        let s = &self.settings;
        let mut frame = ScopedFrame::new(cursor);
        frame.move_to(x, y, angle);

        let policy = bolts.map(|b| b.policy.as_ref());
        let layout = s.calc_fingers(length, policy);
        let (space, finger, play) = (s.space(), s.finger(), s.play());
        for i in 0..layout.fingers {
            let pos = layout.leftover / 2.0 + i as f64 * (space + finger);
            if let Some(bolts) = bolts {
                if bolts.policy.draw_bolt(layout.fingers, i) {
                    let d = bolts.dimensions(&self.ctx.bed_bolts).diameter;
                    frame.hole(pos - 0.5 * space, 0.0, 0.5 * d);
                }
            }
            frame.rectangular_hole(pos + 0.5 * finger, 0.0, finger + play, s.width() + play, 0.0);
        }
    }
}

/// Straight edge with a row of finger holes running parallel inside it.
#[derive(Debug, Clone)]
pub struct FingerHoleEdge {
    holes: Arc<FingerHoles>,
    tag: char,
    description: &'static str,
}

impl FingerHoleEdge {
    pub fn new(holes: Arc<FingerHoles>) -> Self {
        Self {
            holes,
            tag: 'h',
            description: "Edge (parallel Finger Joint Holes)",
        }
    }

    pub fn with_tag(mut self, tag: char, description: &'static str) -> Self {
        self.tag = tag;
        self.description = description;
        self
    }
}

impl Edge for FingerHoleEdge {
    fn tag(&self) -> Option<char> {
        Some(self.tag)
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn draw(&self, cursor: &mut dyn Cursor, length: f64, bolts: Option<&BedBolts>) -> Result<()> {
        let s = self.holes.settings();
        let y = s.edge_width() + s.thickness() / 2.0;
        self.holes.draw_at(cursor, 0.0, y, length, 0.0, bolts);
        cursor.edge(length);
        Ok(())
    }

    fn start_width(&self) -> f64 {
        let s = self.holes.settings();
        s.edge_width() + s.thickness()
    }
}

/// Straight edge with finger holes for a wall standing on it at 90°.
#[derive(Debug, Clone)]
pub struct CrossingFingerHoleEdge {
    holes: Arc<FingerHoles>,
    ctx: JointContext,
    height: f64,
}

impl CrossingFingerHoleEdge {
    pub fn new(holes: Arc<FingerHoles>, ctx: &JointContext, height: f64) -> Self {
        Self {
            holes,
            ctx: *ctx,
            height,
        }
    }
}

impl Edge for CrossingFingerHoleEdge {
    fn tag(&self) -> Option<char> {
        Some('|')
    }

    fn description(&self) -> &'static str {
        "Edge (orthogonal Finger Joint Holes)"
    }

    fn draw(&self, cursor: &mut dyn Cursor, length: f64, _bolts: Option<&BedBolts>) -> Result<()> {
        self.holes
            .draw_at(cursor, length / 2.0, self.ctx.burn, self.height, 90.0, None);
        cursor.edge(length);
        Ok(())
    }
}

impl EdgeFamily for FingerJointSettings {
    fn edge_objects(
        self: &Arc<Self>,
        ctx: &JointContext,
        _registry: &EdgeRegistry,
    ) -> Result<Vec<EdgeRef>> {
        let holes = Arc::new(FingerHoles::new(Arc::clone(self), ctx));
        Ok(vec![
            Arc::new(FingerJointEdge::new(Arc::clone(self), ctx, Polarity::Positive)),
            Arc::new(FingerJointEdge::new(Arc::clone(self), ctx, Polarity::Counterpart)),
            Arc::new(FingerHoleEdge::new(holes)),
        ])
    }

    fn finger_holes(self: &Arc<Self>, ctx: &JointContext) -> Option<Arc<FingerHoles>> {
        Some(Arc::new(FingerHoles::new(Arc::clone(self), ctx)))
    }
}
