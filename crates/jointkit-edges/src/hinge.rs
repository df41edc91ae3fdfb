//! Hinges made of an eye on one part and a pin on the other.

use crate::edge::{ensure_fits, Edge, EdgeRef};
use crate::grip::{GripSettings, GrippingEdge};
use crate::registry::{EdgeFamily, EdgeRegistry};
use jointkit_core::{
    BedBolts, ConfigError, ConfigResult, Cursor, FamilySettings, GeometryError, JointContext,
    ParamDecl, PolyStep, Result, Settings, SettingsSchema,
};
use std::sync::Arc;
use tracing::debug;

use PolyStep::{Line as L, Turn as T};

pub static HINGE_SCHEMA: SettingsSchema = SettingsSchema {
    family: "Hinge",
    absolute: &[
        ParamDecl::choice("style", &["outset", "flush"], "shape of the hinge eye"),
        ParamDecl::flag("outset", false, "have lid overlap at the sides"),
        ParamDecl::float("pinwidth", 0.5, "set to lower value to get disks surrounding the pins"),
        ParamDecl::float("grip_percentage", 0.0, "percentage of the lid that should get grips"),
    ],
    relative: &[
        ParamDecl::float("hingestrength", 1.0, "thickness of the arc holding the pin in place"),
        ParamDecl::float("axle", 2.0, "diameter of the pin hole"),
        ParamDecl::float("grip_length", 0.0, "fixed length of the grips on the lids"),
    ],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HingeStyle {
    /// Eye bulges out around the axle.
    Outset,
    /// Eye stays inside the part outline.
    Flush,
}

/// Which ends of the edge carry a hinge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HingeLayout {
    Start = 1,
    End = 2,
    Both = 3,
}

impl HingeLayout {
    pub fn from_bits(bits: u8) -> std::result::Result<Self, GeometryError> {
        match bits {
            1 => Ok(Self::Start),
            2 => Ok(Self::End),
            3 => Ok(Self::Both),
            other => Err(GeometryError::InvalidLayout(other)),
        }
    }

    pub fn at_start(self) -> bool {
        self as u8 & 1 != 0
    }

    pub fn at_end(self) -> bool {
        self as u8 & 2 != 0
    }

    fn count(self) -> f64 {
        (self.at_start() as u8 + self.at_end() as u8) as f64
    }

    fn suffix(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone)]
pub struct HingeSettings {
    settings: Settings,
    style: HingeStyle,
}

impl FamilySettings for HingeSettings {
    fn schema() -> &'static SettingsSchema {
        &HINGE_SCHEMA
    }

    fn from_settings(settings: Settings) -> ConfigResult<Self> {
        let style = match settings.text("style") {
            "outset" => HingeStyle::Outset,
            "flush" => HingeStyle::Flush,
            other => {
                return Err(ConfigError::InvalidChoice {
                    family: HINGE_SCHEMA.family.to_string(),
                    name: "style".to_string(),
                    value: other.to_string(),
                    choices: "outset, flush".to_string(),
                })
            }
        };
        Ok(Self { settings, style })
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }
}

/// Derived eye and pin dimensions.
#[derive(Debug, Clone, Copy)]
struct Axle {
    /// Angle at which the eye's arc leaves the edge, degrees.
    alpha: f64,
    /// Distance of the axle from the end of the eye.
    pos: f64,
    /// Length of the flat on the pin.
    pin_length: f64,
}

impl HingeSettings {
    pub fn style(&self) -> HingeStyle {
        self.style
    }

    pub fn outset(&self) -> bool {
        self.settings.flag("outset")
    }

    pub fn pin_width(&self) -> f64 {
        self.settings.float("pinwidth")
    }

    pub fn grip_percentage(&self) -> f64 {
        self.settings.float("grip_percentage")
    }

    pub fn hinge_strength(&self) -> f64 {
        self.settings.float("hingestrength")
    }

    pub fn axle(&self) -> f64 {
        self.settings.float("axle")
    }

    pub fn grip_length(&self) -> f64 {
        self.settings.float("grip_length")
    }

    fn geometry(&self) -> Result<Axle> {
        let t = self.thickness();
        let axle = self.axle();
        if axle < t {
            return Err(GeometryError::InvalidProfile(format!(
                "hinge axle {:.3} is thinner than the material {:.3}",
                axle, t
            ))
            .into());
        }
        let r = 0.5 * axle;
        let alpha = (0.5 * t / r).asin().to_degrees();
        Ok(Axle {
            alpha,
            pos: alpha.to_radians().cos() * r,
            pin_length: (axle * axle - t * t).sqrt() * self.pin_width(),
        })
    }
}

/// Straight edge with hinge eyes.
#[derive(Debug, Clone)]
pub struct HingeEye {
    settings: Arc<HingeSettings>,
    layout: HingeLayout,
}

impl HingeEye {
    pub fn new(settings: Arc<HingeSettings>, layout: HingeLayout) -> Self {
        Self { settings, layout }
    }

    fn eye_length(&self, axle: &Axle) -> f64 {
        let s = &self.settings;
        match s.style() {
            HingeStyle::Outset => 2.0 * axle.pos + 1.5 * s.thickness(),
            HingeStyle::Flush => s.axle() + 2.0 * s.hinge_strength() + 0.5 * s.thickness(),
        }
    }

    fn draw_eye(&self, cursor: &mut dyn Cursor, axle: &Axle, reversed: bool) {
        let s = &self.settings;
        let t = s.thickness();
        match s.style() {
            HingeStyle::Outset => {
                let r = 0.5 * s.axle();
                let profile = [
                    L(0.0),
                    T(90.0 - axle.alpha),
                    L(0.0),
                    PolyStep::arc(-360.0, r),
                    L(0.0),
                    T(90.0 + axle.alpha),
                    L(t),
                    T(90.0),
                    L(0.5 * t),
                    PolyStep::arc(180.0, t + axle.pos),
                    L(0.0),
                    PolyStep::arc(-90.0, 0.5 * t),
                    L(0.0),
                ];
                if reversed {
                    cursor.polyline(&PolyStep::reversed(&profile));
                    cursor.rectangular_hole(-axle.pos, -0.5 * t, axle.pin_length, t, 0.0);
                } else {
                    cursor.rectangular_hole(axle.pos, -0.5 * t, axle.pin_length, t, 0.0);
                    cursor.polyline(&profile);
                }
            }
            HingeStyle::Flush => {
                let pos = 0.5 * s.axle() + s.hinge_strength();
                let profile = [
                    L(0.0),
                    T(-90.0),
                    L(0.5 * t),
                    PolyStep::arc(180.0, pos),
                    L(0.0),
                    PolyStep::arc(-90.0, 0.5 * t),
                    L(0.0),
                ];
                let x = if reversed { 0.5 * t + pos } else { pos };
                cursor.hole(x, -0.5 * t, 0.5 * s.axle());
                cursor.rectangular_hole(x, -0.5 * t, axle.pin_length, t, 0.0);
                if reversed {
                    cursor.polyline(&PolyStep::reversed(&profile));
                } else {
                    cursor.polyline(&profile);
                }
            }
        }
    }
}

impl Edge for HingeEye {
    fn tag(&self) -> Option<char> {
        ['e', 'i', 'j', 'k'].get(self.layout.suffix()).copied()
    }

    fn description(&self) -> &'static str {
        match self.layout {
            HingeLayout::Start => "Straight edge with hinge eye (start)",
            HingeLayout::End => "Straight edge with hinge eye (end)",
            HingeLayout::Both => "Straight edge with hinge eye (both ends)",
        }
    }

    fn draw(&self, cursor: &mut dyn Cursor, length: f64, _bolts: Option<&BedBolts>) -> Result<()> {
        let axle = self.settings.geometry()?;
        let eye = self.eye_length(&axle);
        ensure_fits("hinge eye", length, self.layout.count() * eye)?;

        if self.layout.at_start() {
            self.draw_eye(cursor, &axle, false);
        }
        cursor.edge(length - self.layout.count() * eye);
        if self.layout.at_end() {
            self.draw_eye(cursor, &axle, true);
        }
        Ok(())
    }

    fn margin(&self) -> f64 {
        3.0 * self.settings.thickness()
    }
}

/// Edge with hinge pins and optional grip on the lid side.
#[derive(Debug, Clone)]
pub struct HingePin {
    settings: Arc<HingeSettings>,
    ctx: JointContext,
    layout: HingeLayout,
    grip: EdgeRef,
}

impl HingePin {
    pub fn new(
        settings: Arc<HingeSettings>,
        ctx: &JointContext,
        layout: HingeLayout,
        grip: EdgeRef,
    ) -> Self {
        Self {
            settings,
            ctx: *ctx,
            layout,
            grip,
        }
    }

    fn pin_length(&self, axle: &Axle) -> f64 {
        let s = &self.settings;
        let t = s.thickness();
        match (s.style(), s.outset()) {
            (HingeStyle::Outset, true) => 2.0 * axle.pos + 1.5 * t,
            (HingeStyle::Outset, false) => 2.0 * axle.pos,
            (HingeStyle::Flush, true) => 2.0 * s.hinge_strength() + s.axle() + 0.5 * t,
            (HingeStyle::Flush, false) => s.hinge_strength() + s.axle(),
        }
    }

    fn profile(&self, axle: &Axle) -> Vec<PolyStep> {
        let s = &self.settings;
        let t = s.thickness();
        let pinl = axle.pin_length;
        match s.style() {
            HingeStyle::Outset => {
                let lead = axle.pos - 0.5 * pinl;
                let mut pin = vec![L(lead), T(-90.0), L(t), T(90.0), L(pinl), T(90.0), L(t), T(-90.0)];
                if s.outset() {
                    pin.extend([L(lead + 1.5 * t), T(-90.0), L(t), T(90.0), L(0.0)]);
                } else {
                    pin.push(L(lead));
                }
                pin
            }
            HingeStyle::Flush => {
                let hs = s.hinge_strength();
                let d = (s.axle() - pinl) / 2.0;
                let mut pin = vec![
                    L(hs + d),
                    T(-90.0),
                    L(t),
                    T(90.0),
                    L(pinl),
                    T(90.0),
                    L(t),
                    T(-90.0),
                    L(d),
                ];
                if s.outset() {
                    pin.extend([T(0.0), L(hs + 0.5 * t), T(-90.0), L(t), T(90.0), L(0.0)]);
                }
                pin
            }
        }
    }

    fn outset_width(&self) -> f64 {
        if self.settings.outset() {
            self.ctx.thickness
        } else {
            0.0
        }
    }
}

impl Edge for HingePin {
    fn tag(&self) -> Option<char> {
        ['E', 'I', 'J', 'K'].get(self.layout.suffix()).copied()
    }

    fn description(&self) -> &'static str {
        match self.layout {
            HingeLayout::Start => "Edge with hinge pin (start)",
            HingeLayout::End => "Edge with hinge pin (end)",
            HingeLayout::Both => "Edge with hinge pin (both ends)",
        }
    }

    fn draw(&self, cursor: &mut dyn Cursor, length: f64, _bolts: Option<&BedBolts>) -> Result<()> {
        let s = &self.settings;
        let axle = s.geometry()?;
        let plen = self.pin_length(&axle);
        let profile = self.profile(&axle);
        ensure_fits("hinge pin", length, self.layout.count() * plen)?;

        let grip = if s.outset() {
            (length * s.grip_percentage() + s.grip_length()).min(length - plen)
        } else {
            0.0
        };

        match self.layout {
            HingeLayout::Both => {
                cursor.polyline(&profile);
                cursor.edge(length - 2.0 * plen);
                cursor.polyline(&PolyStep::reversed(&profile));
            }
            HingeLayout::Start => {
                cursor.polyline(&profile);
                cursor.edge(length - plen - grip);
                self.grip.draw(cursor, grip, None)?;
            }
            HingeLayout::End => {
                self.grip.draw(cursor, grip, None)?;
                cursor.edge(length - plen - grip);
                cursor.polyline(&PolyStep::reversed(&profile));
            }
        }
        Ok(())
    }

    fn start_width(&self) -> f64 {
        if self.layout.at_start() {
            0.0
        } else {
            self.outset_width()
        }
    }

    fn end_width(&self) -> f64 {
        if self.layout.at_end() {
            0.0
        } else {
            self.outset_width()
        }
    }

    fn margin(&self) -> f64 {
        self.settings.thickness()
    }
}

impl EdgeFamily for HingeSettings {
    fn edge_objects(
        self: &Arc<Self>,
        ctx: &JointContext,
        registry: &EdgeRegistry,
    ) -> Result<Vec<EdgeRef>> {
        let grip = match registry.get('g') {
            Some(grip) => grip,
            None => {
                debug!("no grip edge registered, hinge pins use default grip settings");
                let settings = GripSettings::with_defaults(ctx.thickness)?;
                Arc::new(GrippingEdge::new(Arc::new(settings))) as EdgeRef
            }
        };

        let mut edges: Vec<EdgeRef> = Vec::with_capacity(6);
        for layout in [HingeLayout::Start, HingeLayout::End, HingeLayout::Both] {
            edges.push(Arc::new(HingeEye::new(Arc::clone(self), layout)));
            edges.push(Arc::new(HingePin::new(
                Arc::clone(self),
                ctx,
                layout,
                Arc::clone(&grip),
            )));
        }
        Ok(edges)
    }
}
