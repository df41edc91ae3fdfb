//! Corrugated gripping edge.

use crate::edge::{Edge, EdgeRef};
use crate::registry::{EdgeFamily, EdgeRegistry};
use jointkit_core::{
    BedBolts, ConfigError, ConfigResult, Cursor, FamilySettings, JointContext, ParamDecl, Result,
    Settings, SettingsSchema,
};
use std::sync::Arc;

pub static GRIP_SCHEMA: SettingsSchema = SettingsSchema {
    family: "Grip",
    absolute: &[
        ParamDecl::choice("style", &["wave", "bumps"], "shape of the grooves"),
        ParamDecl::flag("outset", true, "extend outward the straight edge"),
    ],
    relative: &[ParamDecl::float("depth", 0.3, "depth of the grooves")],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GripStyle {
    /// Continuous S-curves.
    Wave,
    /// Half-round bumps.
    Bumps,
}

#[derive(Debug, Clone)]
pub struct GripSettings {
    settings: Settings,
    style: GripStyle,
}

impl FamilySettings for GripSettings {
    fn schema() -> &'static SettingsSchema {
        &GRIP_SCHEMA
    }

    fn from_settings(settings: Settings) -> ConfigResult<Self> {
        let style = match settings.text("style") {
            "wave" => GripStyle::Wave,
            "bumps" => GripStyle::Bumps,
            other => {
                return Err(ConfigError::InvalidChoice {
                    family: GRIP_SCHEMA.family.to_string(),
                    name: "style".to_string(),
                    value: other.to_string(),
                    choices: "wave, bumps".to_string(),
                })
            }
        };
        Ok(Self { settings, style })
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl GripSettings {
    pub fn style(&self) -> GripStyle {
        self.style
    }

    pub fn outset(&self) -> bool {
        self.settings.flag("outset")
    }

    pub fn depth(&self) -> f64 {
        self.settings.float("depth")
    }
}

#[derive(Debug, Clone)]
pub struct GrippingEdge {
    settings: Arc<GripSettings>,
}

impl GrippingEdge {
    pub fn new(settings: Arc<GripSettings>) -> Self {
        Self { settings }
    }

    fn grooves(&self, length: f64) -> usize {
        let depth = self.settings.depth();
        if depth <= 0.0 {
            return 1;
        }
        (length / (depth * 2.0)).floor().max(0.0) as usize + 1
    }

    fn wave(&self, cursor: &mut dyn Cursor, length: f64) {
        let grooves = self.grooves(length);
        let radius = length / grooves as f64 / 4.0;
        let o = if self.settings.outset() { 1.0 } else { -1.0 };
        for _ in 0..grooves {
            cursor.corner(o * -90.0, radius);
            cursor.corner(o * 180.0, radius);
            cursor.corner(o * -90.0, radius);
        }
    }

    fn bumps(&self, cursor: &mut dyn Cursor, length: f64) {
        let grooves = self.grooves(length);
        let radius = length / grooves as f64 / 2.0;
        let outset = self.settings.outset();

        if outset {
            cursor.corner(-90.0, 0.0);
        } else {
            cursor.corner(90.0, 0.0);
            cursor.edge(radius);
            cursor.corner(-180.0, 0.0);
        }
        for _ in 0..grooves {
            cursor.corner(180.0, radius);
            cursor.corner(-180.0, 0.0);
        }
        if outset {
            cursor.corner(90.0, 0.0);
        } else {
            cursor.edge(radius);
            cursor.corner(90.0, 0.0);
        }
    }
}

impl Edge for GrippingEdge {
    fn tag(&self) -> Option<char> {
        Some('g')
    }

    fn description(&self) -> &'static str {
        "Corrugated edge useful as a gripping area"
    }

    fn draw(&self, cursor: &mut dyn Cursor, length: f64, _bolts: Option<&BedBolts>) -> Result<()> {
        if length <= 0.0 {
            return Ok(());
        }
        match self.settings.style() {
            GripStyle::Wave => self.wave(cursor, length),
            GripStyle::Bumps => self.bumps(cursor, length),
        }
        Ok(())
    }

    fn margin(&self) -> f64 {
        if self.settings.outset() {
            self.settings.depth()
        } else {
            0.0
        }
    }
}

impl EdgeFamily for GripSettings {
    fn edge_objects(
        self: &Arc<Self>,
        _ctx: &JointContext,
        _registry: &EdgeRegistry,
    ) -> Result<Vec<EdgeRef>> {
        Ok(vec![Arc::new(GrippingEdge::new(Arc::clone(self)))])
    }
}
