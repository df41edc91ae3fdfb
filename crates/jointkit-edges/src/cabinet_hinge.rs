//! Cabinet hinges built from separate eye pieces on a metal pin.
//!
//! The edge cuts the slots the eyes sit in, [`CabinetHingeEdge::draw_parts`]
//! cuts the eyes themselves.

use crate::edge::{Edge, EdgeRef};
use crate::layout::PartExtent;
use crate::registry::{EdgeFamily, EdgeRegistry};
use jointkit_core::{
    BedBolts, ConfigResult, Cursor, FamilySettings, JointContext, ParamDecl, PolyStep, Result,
    ScopedFrame, Settings, SettingsSchema,
};
use std::sync::Arc;
use tracing::{debug, warn};

pub static CABINET_HINGE_SCHEMA: SettingsSchema = SettingsSchema {
    family: "CabinetHinge",
    absolute: &[
        ParamDecl::float("bore", 3.2, "diameter of the pin hole in mm"),
        ParamDecl::int("eyes_per_hinge", 5, "pieces per hinge"),
        ParamDecl::int("hinges", 2, "number of hinges per edge"),
    ],
    relative: &[
        ParamDecl::float("eye", 1.5, "radius of the eye"),
        ParamDecl::float("play", 0.05, "space between eyes"),
        ParamDecl::float("spacing", 2.0, "minimum space around the hinge"),
    ],
};

#[derive(Debug, Clone)]
pub struct CabinetHingeSettings {
    settings: Settings,
}

impl FamilySettings for CabinetHingeSettings {
    fn schema() -> &'static SettingsSchema {
        &CABINET_HINGE_SCHEMA
    }

    fn from_settings(settings: Settings) -> ConfigResult<Self> {
        Ok(Self { settings })
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl CabinetHingeSettings {
    pub fn bore(&self) -> f64 {
        self.settings.float("bore")
    }

    pub fn eyes_per_hinge(&self) -> usize {
        self.settings.int("eyes_per_hinge").max(0) as usize
    }

    pub fn hinges(&self) -> usize {
        self.settings.int("hinges").max(0) as usize
    }

    pub fn eye(&self) -> f64 {
        self.settings.float("eye")
    }

    pub fn play(&self) -> f64 {
        self.settings.float("play")
    }

    pub fn spacing(&self) -> f64 {
        self.settings.float("spacing")
    }

    /// Length of edge taken by one hinge.
    pub fn hinge_width(&self) -> f64 {
        let (t, p) = (self.thickness(), self.play());
        (t + p) * self.eyes_per_hinge() as f64 + p + 2.0 * self.spacing()
    }
}

#[derive(Debug, Clone)]
pub struct CabinetHingeEdge {
    settings: Arc<CabinetHingeSettings>,
    top: bool,
    angled: bool,
}

impl CabinetHingeEdge {
    pub fn new(settings: Arc<CabinetHingeSettings>, top: bool, angled: bool) -> Self {
        Self {
            settings,
            top,
            angled,
        }
    }

    /// Eye radius, lowered on angled bottom edges to leave room for the lid.
    fn eye(&self) -> f64 {
        let s = &self.settings;
        if self.angled && !self.top {
            s.eye() - s.thickness()
        } else {
            s.eye()
        }
    }

    /// Whether position `i` of a hinge carries an eye on this edge.
    fn has_eye(&self, i: usize) -> bool {
        (i % 2 == 1) == self.top
    }

    fn profile(&self) -> Vec<PolyStep> {
        let s = &self.settings;
        let (t, p, spacing) = (s.thickness(), s.play(), s.spacing());
        let e = self.eye();
        let n = s.eyes_per_hinge();

        let mut values = if self.top {
            vec![spacing, 90.0, e + p, 180.0, 0.0]
        } else {
            vec![spacing + p, 90.0, e + p, 0.0]
        };
        for i in 0..n {
            if self.has_eye(i) {
                values.extend([t - p, -90.0, t, -90.0, t - p]);
            } else {
                values.extend([90.0, t + 2.0 * p, 90.0]);
            }
        }
        if (n % 2 == 1) != self.top {
            values.extend([0.0, e + p, 90.0, p + spacing]);
        } else {
            values.extend([0.0, 180.0, e + p, 90.0, spacing]);
        }
        PolyStep::alternating(&values)
    }

    /// Cuts the eye pieces for every hinge on one edge and returns the
    /// space they take.
    pub fn draw_parts(&self, cursor: &mut dyn Cursor, spacing: f64) -> PartExtent {
        let s = &self.settings;
        let (e, bore, t) = (s.eye(), s.bore(), s.thickness());
        let n = s.eyes_per_hinge() * s.hinges();
        let pairs = n / 2 + 2 * (n % 2);
        let column = e.max(2.0 * t);

        let corner = if e <= 2.0 * t {
            if self.angled {
                vec![
                    PolyStep::Line(2.0 * e - t),
                    PolyStep::arc(90.0, 2.0 * t - e),
                    PolyStep::Line(0.0),
                    PolyStep::Turn(-90.0),
                    PolyStep::Line(t),
                    PolyStep::arc(90.0, e),
                ]
            } else {
                vec![PolyStep::Line(2.0 * e), PolyStep::arc(90.0, 2.0 * t)]
            }
        } else {
            let a = (2.0 * t / e).asin();
            let angle = a.to_degrees();
            vec![
                PolyStep::Line(e * (1.0 - a.cos()) + 2.0 * t),
                PolyStep::Turn(-90.0 + angle),
                PolyStep::Line(0.0),
                PolyStep::arc(180.0 - angle, e),
            ]
        };
        let mut outline = vec![PolyStep::Line(0.0), PolyStep::arc(180.0, e), PolyStep::Line(0.0)];
        for turn in [-90.0, 90.0, -90.0, -90.0, 90.0, 90.0] {
            outline.push(PolyStep::Turn(turn));
            outline.push(PolyStep::Line(t));
        }
        outline.push(PolyStep::arc(90.0, t));
        outline.extend(corner);

        let mut frame = ScopedFrame::new(cursor);
        frame.move_to(column, 0.0, 0.0);
        for i in 0..n {
            frame.hole(0.0, e, 0.5 * bore);
            frame.polyline(&outline);
            frame.move_to(spacing, 4.0 * e + 3.0 * t + spacing, 180.0);
            if i % 2 == 1 {
                frame.move_to(2.0 * column + 2.0 * spacing, 0.0, 0.0);
            }
        }
        debug!(pieces = n, "cut cabinet hinge eyes");

        PartExtent::new(4.0 * e + 3.0 * t + spacing, column * pairs as f64)
    }
}

impl Edge for CabinetHingeEdge {
    fn tag(&self) -> Option<char> {
        ['u', 'U', 'v', 'V'].get(self.top as usize + 2 * self.angled as usize).copied()
    }

    fn description(&self) -> &'static str {
        match (self.top, self.angled) {
            (false, false) => "Edge with cabinet hinges",
            (true, false) => "Edge with cabinet hinges for top",
            (false, true) => "Edge with cabinet hinges for 90° lid",
            (true, true) => "Edge with cabinet hinges 90° lid",
        }
    }

    fn draw(&self, cursor: &mut dyn Cursor, length: f64, _bolts: Option<&BedBolts>) -> Result<()> {
        let s = &self.settings;
        let t = s.thickness();
        let p = s.play();
        let e = self.eye();
        let width = s.hinge_width();
        let fit = if width > 0.0 { (length / width).floor().max(0.0) as usize } else { 0 };
        let hinges = s.hinges().min(fit);

        if hinges == 0 {
            warn!(length, width, "no cabinet hinge fits, drawing a straight edge");
            cursor.edge(length);
            return Ok(());
        }

        let profile = self.profile();
        let gap = if hinges > 1 {
            (length - hinges as f64 * width) / (hinges - 1) as f64
        } else {
            0.0
        };

        if hinges == 1 {
            cursor.edge((length - width) / 2.0);
        }
        for j in 0..hinges {
            for i in (0..s.eyes_per_hinge()).filter(|&i| self.has_eye(i)) {
                let x = s.spacing() + 0.5 * t + p + i as f64 * (t + p);
                cursor.rectangular_hole(x, e + 2.5 * t, t, t, 0.0);
            }
            cursor.polyline(&profile);
            if j + 1 < hinges {
                cursor.edge(gap);
            }
        }
        if hinges == 1 {
            cursor.edge((length - width) / 2.0);
        }
        Ok(())
    }

    fn start_width(&self) -> f64 {
        if self.top && self.angled {
            self.settings.thickness()
        } else {
            0.0
        }
    }
}

impl EdgeFamily for CabinetHingeSettings {
    fn edge_objects(
        self: &Arc<Self>,
        _ctx: &JointContext,
        _registry: &EdgeRegistry,
    ) -> Result<Vec<EdgeRef>> {
        Ok([(false, false), (true, false), (false, true), (true, true)]
            .into_iter()
            .map(|(top, angled)| {
                Arc::new(CabinetHingeEdge::new(Arc::clone(self), top, angled)) as EdgeRef
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hinge_width() {
        let settings = CabinetHingeSettings::with_defaults(3.0).unwrap();
        assert!((settings.hinge_width() - (3.15 * 5.0 + 0.15 + 12.0)).abs() < 1e-9);
    }

    #[test]
    fn test_eye_positions_alternate() {
        let settings = Arc::new(CabinetHingeSettings::with_defaults(3.0).unwrap());
        let bottom = CabinetHingeEdge::new(Arc::clone(&settings), false, false);
        let top = CabinetHingeEdge::new(settings, true, false);
        for i in 0..5 {
            assert_ne!(bottom.has_eye(i), top.has_eye(i));
        }
        assert!(bottom.has_eye(0));
    }
}
