//! Chest hinges: a disc on the lid turning inside a ring on the box wall.

use crate::edge::{ensure_fits, Edge, EdgeRef};
use crate::registry::{EdgeFamily, EdgeRegistry};
use jointkit_core::{
    BedBolts, ConfigResult, Cursor, FamilySettings, GeometryError, JointContext, ParamDecl,
    PolyStep, Result, Settings, SettingsSchema,
};
use std::sync::Arc;

use PolyStep::{Line as L, Turn as T};

pub static CHEST_HINGE_SCHEMA: SettingsSchema = SettingsSchema {
    family: "ChestHinge",
    absolute: &[],
    relative: &[
        ParamDecl::float("pin_height", 2.0, "radius of the disc rotating in the hinge"),
        ParamDecl::float("hinge_strength", 1.0, "thickness of the arc holding the pin in place"),
        ParamDecl::float("play", 0.1, "space between disc and ring"),
    ],
};

#[derive(Debug, Clone)]
pub struct ChestHingeSettings {
    settings: Settings,
}

impl FamilySettings for ChestHingeSettings {
    fn schema() -> &'static SettingsSchema {
        &CHEST_HINGE_SCHEMA
    }

    fn from_settings(settings: Settings) -> ConfigResult<Self> {
        Ok(Self { settings })
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl ChestHingeSettings {
    pub fn pin_height(&self) -> f64 {
        self.settings.float("pin_height")
    }

    pub fn hinge_strength(&self) -> f64 {
        self.settings.float("hinge_strength")
    }

    pub fn play(&self) -> f64 {
        self.settings.float("play")
    }

    /// Height of the flat pin holding the disc.
    pub fn pin_flat_height(&self) -> Result<f64> {
        let outer = 0.9 * self.pin_height();
        let t = self.thickness();
        if outer < t {
            return Err(GeometryError::InvalidProfile(format!(
                "chest hinge pin height {:.3} too small for material {:.3}",
                self.pin_height(),
                t
            ))
            .into());
        }
        Ok((outer * outer - t * t).sqrt())
    }

    /// Radius of the ring around the disc.
    fn ring(&self) -> f64 {
        self.pin_height() + self.hinge_strength()
    }
}

/// Which end of the edge holds the hinge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HingeEnd {
    Start,
    End,
}

/// Box wall edge with the hinge ring.
#[derive(Debug, Clone)]
pub struct ChestHinge {
    settings: Arc<ChestHingeSettings>,
    end: HingeEnd,
}

impl ChestHinge {
    pub fn new(settings: Arc<ChestHingeSettings>, end: HingeEnd) -> Self {
        Self { settings, end }
    }

    fn reversed(&self) -> bool {
        self.end == HingeEnd::End
    }
}

impl Edge for ChestHinge {
    fn tag(&self) -> Option<char> {
        Some(if self.reversed() { 'O' } else { 'o' })
    }

    fn description(&self) -> &'static str {
        if self.reversed() {
            "Edge with chest hinge (end)"
        } else {
            "Edge with chest hinge (start)"
        }
    }

    fn draw(&self, cursor: &mut dyn Cursor, length: f64, _bolts: Option<&BedBolts>) -> Result<()> {
        let s = &self.settings;
        let (t, p, ring) = (s.thickness(), s.pin_height(), s.ring());
        let pinh = s.pin_flat_height()?;
        ensure_fits("chest hinge", length, ring - t)?;

        if self.reversed() {
            cursor.hole(length + t, 0.0, p);
            cursor.rectangular_hole(length + 0.5 * t, -0.5 * pinh, t, pinh, 0.0);
        } else {
            cursor.hole(-t, -ring, p);
            cursor.rectangular_hole(-0.5 * t, -ring - 0.5 * pinh, t, pinh, 0.0);
        }

        let profile = [
            L(0.0),
            T(-180.0),
            L(t),
            PolyStep::arc(270.0, ring),
            L(0.0),
            T(-90.0),
            L(length + t - ring),
        ];
        if self.reversed() {
            cursor.polyline(&PolyStep::reversed(&profile));
        } else {
            cursor.polyline(&profile);
        }
        Ok(())
    }

    fn start_width(&self) -> f64 {
        if self.reversed() {
            self.settings.ring()
        } else {
            0.0
        }
    }

    fn end_width(&self) -> f64 {
        if self.reversed() {
            0.0
        } else {
            self.settings.ring()
        }
    }

    fn margin(&self) -> f64 {
        if self.reversed() {
            0.0
        } else {
            self.settings.ring()
        }
    }
}

/// Edge above a chest hinge, clearing the ring.
#[derive(Debug, Clone)]
pub struct ChestHingeTop {
    settings: Arc<ChestHingeSettings>,
    end: HingeEnd,
}

impl ChestHingeTop {
    pub fn new(settings: Arc<ChestHingeSettings>, end: HingeEnd) -> Self {
        Self { settings, end }
    }

    fn reversed(&self) -> bool {
        self.end == HingeEnd::End
    }

    fn clearance(&self) -> f64 {
        self.settings.ring() + self.settings.play()
    }
}

impl Edge for ChestHingeTop {
    fn tag(&self) -> Option<char> {
        Some(if self.reversed() { 'P' } else { 'p' })
    }

    fn description(&self) -> &'static str {
        if self.reversed() {
            "Edge above a chest hinge (end)"
        } else {
            "Edge above a chest hinge (start)"
        }
    }

    fn draw(&self, cursor: &mut dyn Cursor, length: f64, _bolts: Option<&BedBolts>) -> Result<()> {
        let t = self.settings.thickness();
        let clearance = self.clearance();
        ensure_fits("chest hinge top", length, clearance - t)?;

        let profile = [
            L(0.0),
            T(-180.0),
            L(t),
            T(-180.0),
            L(0.0),
            PolyStep::arc(-90.0, clearance),
            L(0.0),
            T(90.0),
            L(length + t - clearance),
        ];
        if self.reversed() {
            cursor.polyline(&PolyStep::reversed(&profile));
        } else {
            cursor.polyline(&profile);
        }
        Ok(())
    }

    fn start_width(&self) -> f64 {
        if self.reversed() {
            self.clearance()
        } else {
            0.0
        }
    }

    fn end_width(&self) -> f64 {
        if self.reversed() {
            0.0
        } else {
            self.clearance()
        }
    }

    fn margin(&self) -> f64 {
        if self.reversed() {
            0.0
        } else {
            self.clearance()
        }
    }
}

/// Lid edge carrying the pins at both ends.
#[derive(Debug, Clone)]
pub struct ChestHingePin {
    settings: Arc<ChestHingeSettings>,
}

impl ChestHingePin {
    pub fn new(settings: Arc<ChestHingeSettings>) -> Self {
        Self { settings }
    }
}

impl Edge for ChestHingePin {
    fn tag(&self) -> Option<char> {
        Some('q')
    }

    fn description(&self) -> &'static str {
        "Edge with pins for a chest hinge"
    }

    fn draw(&self, cursor: &mut dyn Cursor, length: f64, _bolts: Option<&BedBolts>) -> Result<()> {
        let s = &self.settings;
        let t = s.thickness();
        let pinh = s.pin_flat_height()?;
        let pin = [
            L(0.0),
            T(-90.0),
            L(s.ring() - pinh),
            T(-90.0),
            L(t),
            T(90.0),
            L(pinh),
            T(90.0),
        ];
        let mut profile = pin.to_vec();
        profile.push(L(length + 2.0 * t));
        profile.extend(PolyStep::reversed(&pin));
        cursor.polyline(&profile);
        Ok(())
    }

    fn margin(&self) -> f64 {
        self.settings.ring()
    }
}

/// Straight edge on the side opposing the hinge.
#[derive(Debug, Clone)]
pub struct ChestHingeFront {
    settings: Arc<ChestHingeSettings>,
}

impl ChestHingeFront {
    pub fn new(settings: Arc<ChestHingeSettings>) -> Self {
        Self { settings }
    }
}

impl Edge for ChestHingeFront {
    fn tag(&self) -> Option<char> {
        Some('Q')
    }

    fn description(&self) -> &'static str {
        "Edge opposing a chest hinge"
    }

    fn draw(&self, cursor: &mut dyn Cursor, length: f64, _bolts: Option<&BedBolts>) -> Result<()> {
        cursor.edge(length);
        Ok(())
    }

    fn start_width(&self) -> f64 {
        self.settings.ring()
    }
}

impl EdgeFamily for ChestHingeSettings {
    fn edge_objects(
        self: &Arc<Self>,
        _ctx: &JointContext,
        _registry: &EdgeRegistry,
    ) -> Result<Vec<EdgeRef>> {
        Ok(vec![
            Arc::new(ChestHinge::new(Arc::clone(self), HingeEnd::Start)),
            Arc::new(ChestHinge::new(Arc::clone(self), HingeEnd::End)),
            Arc::new(ChestHingeTop::new(Arc::clone(self), HingeEnd::Start)),
            Arc::new(ChestHingeTop::new(Arc::clone(self), HingeEnd::End)),
            Arc::new(ChestHingePin::new(Arc::clone(self))),
            Arc::new(ChestHingeFront::new(Arc::clone(self))),
        ])
    }
}
