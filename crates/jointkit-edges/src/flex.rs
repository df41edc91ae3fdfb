//! Living hinge: rows of staggered slits that let a panel bend.

use crate::edge::Edge;
use jointkit_core::{
    BedBolts, ConfigResult, Cursor, FamilySettings, JointContext, ParamDecl, Point, Result,
    Settings, SettingsSchema,
};
use std::sync::Arc;
use tracing::warn;

pub static FLEX_SCHEMA: SettingsSchema = SettingsSchema {
    family: "Flex",
    absolute: &[ParamDecl::float(
        "stretch",
        1.05,
        "hint of how much the flex part should be shortened",
    )],
    relative: &[
        ParamDecl::float("distance", 0.5, "width of the pattern perpendicular to the cuts"),
        ParamDecl::float("connection", 1.0, "width of the gaps in the cuts"),
        ParamDecl::float("width", 5.0, "width of the pattern in direction of the cuts"),
    ],
};

#[derive(Debug, Clone)]
pub struct FlexSettings {
    settings: Settings,
}

impl FamilySettings for FlexSettings {
    fn schema() -> &'static SettingsSchema {
        &FLEX_SCHEMA
    }

    fn from_settings(settings: Settings) -> ConfigResult<Self> {
        Ok(Self { settings })
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl FlexSettings {
    pub fn stretch(&self) -> f64 {
        self.settings.float("stretch")
    }

    pub fn distance(&self) -> f64 {
        self.settings.float("distance")
    }

    pub fn connection(&self) -> f64 {
        self.settings.float("connection")
    }

    pub fn width(&self) -> f64 {
        self.settings.float("width")
    }
}

/// Slit pattern of a flex section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlexPattern {
    /// Height of the pattern including the burn allowance.
    pub height: f64,
    /// Number of slit rows, including the one at position 0 that is never cut.
    pub lines: usize,
    pub leftover: f64,
    /// Slit segments per row.
    pub sections: usize,
    pub section_height: f64,
}

/// Straight edge whose part is cut with a flex pattern up to `height`.
///
/// The opposing side of the panel is a plain straight edge.
#[derive(Debug, Clone)]
pub struct FlexEdge {
    settings: Arc<FlexSettings>,
    ctx: JointContext,
    height: f64,
}

impl FlexEdge {
    pub fn new(settings: Arc<FlexSettings>, ctx: &JointContext, height: f64) -> Self {
        Self {
            settings,
            ctx: *ctx,
            height,
        }
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn pattern(&self, length: f64) -> FlexPattern {
        let s = &self.settings;
        let distance = s.distance();
        let connection = s.connection();
        let height = self.height + 2.0 * self.ctx.burn;

        let lines = if distance > 0.0 {
            (length / distance).floor().max(0.0) as usize
        } else {
            0
        };
        let leftover = length - lines as f64 * distance;

        let fit = if s.width() > 0.0 {
            ((height - connection) / s.width()).floor()
        } else {
            0.0
        };
        let sections = if fit < 1.0 {
            warn!(height, width = s.width(), "flex pattern too low, using one section");
            1
        } else {
            fit as usize
        };
        let section_height = (height - connection) / sections as f64 - connection;

        FlexPattern {
            height,
            lines,
            leftover,
            sections,
            section_height,
        }
    }

    /// Slits of row `i`; odd rows start at the edge, even rows at the far side.
    fn row(&self, pattern: &FlexPattern, i: usize) -> Vec<(f64, f64)> {
        let h = pattern.height;
        let c = self.settings.connection();
        let sh = pattern.section_height;
        let sections = pattern.sections;
        let mut slits = Vec::new();

        if i % 2 == 1 {
            slits.push((0.0, c + sh));
            for j in 0..(sections - 1) / 2 {
                let j = j as f64;
                slits.push((
                    (2.0 * j + 1.0) * sh + (2.0 * j + 2.0) * c,
                    (2.0 * j + 3.0) * (sh + c),
                ));
            }
            if sections % 2 == 0 {
                slits.push((h - sh - c, h));
            }
        } else if sections % 2 == 1 {
            slits.push((h, h - c - sh));
            for j in 0..(sections - 1) / 2 {
                let j = j as f64;
                slits.push((
                    h - ((2.0 * j + 1.0) * sh + (2.0 * j + 2.0) * c),
                    h - (2.0 * j + 3.0) * (sh + c),
                ));
            }
        } else {
            for j in 0..sections / 2 {
                let j = j as f64;
                slits.push((
                    h - c - 2.0 * j * (sh + c),
                    h - 2.0 * (j + 1.0) * (sh + c),
                ));
            }
        }
        slits
    }
}

impl Edge for FlexEdge {
    fn tag(&self) -> Option<char> {
        Some('X')
    }

    fn description(&self) -> &'static str {
        "Flex cut"
    }

    fn draw(&self, cursor: &mut dyn Cursor, length: f64, _bolts: Option<&BedBolts>) -> Result<()> {
        let pattern = self.pattern(length);
        let distance = self.settings.distance();
        for i in 1..pattern.lines {
            let x = i as f64 * distance + pattern.leftover / 2.0;
            for (from, to) in self.row(&pattern, i) {
                cursor.slit(Point::new(x, from), Point::new(x, to));
            }
        }
        cursor.edge(length);
        Ok(())
    }
}
