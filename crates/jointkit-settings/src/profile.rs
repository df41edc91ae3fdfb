//! Joint profiles
//!
//! A profile is everything needed to rebuild an edge registry: the material,
//! the cutter, bed bolt dimensions and per-family parameter overrides.
//! Profiles are stored as TOML or JSON depending on the file extension.

use crate::error::{SettingsError, SettingsResult};
use jointkit_core::{
    BedBoltSettings, ConfigError, FamilyOverrides, JointContext, Overrides, ParamValue, Settings,
};
use jointkit_edges::family_schema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// On-disk format of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileFormat {
    Json,
    Toml,
}

impl ProfileFormat {
    /// TOML for `.toml` files, JSON for everything else.
    pub fn from_path(path: &Path) -> Self {
        if path.extension().is_some_and(|ext| ext == "toml") {
            Self::Toml
        } else {
            Self::Json
        }
    }
}

/// Persisted joint profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JointProfile {
    /// Material thickness in mm
    pub thickness: f64,
    /// Half the kerf of the cutter
    pub burn: f64,
    /// Scale relative parameters by the thickness
    pub relative: bool,
    pub bed_bolts: BedBoltSettings,
    /// Overrides keyed by family name, e.g. `FingerJoint`.
    pub families: BTreeMap<String, Overrides>,
}

impl Default for JointProfile {
    fn default() -> Self {
        let ctx = JointContext::default();
        Self {
            thickness: ctx.thickness,
            burn: ctx.burn,
            relative: true,
            bed_bolts: ctx.bed_bolts,
            families: BTreeMap::new(),
        }
    }
}

impl JointProfile {
    pub fn new(thickness: f64) -> Self {
        Self {
            thickness,
            ..Self::default()
        }
    }

    /// Sets one override for `family`.
    pub fn set_override(&mut self, family: &str, name: &str, value: impl Into<ParamValue>) {
        self.families
            .entry(family.to_string())
            .or_default()
            .insert(name.to_string(), value.into());
    }

    /// Load a profile from a TOML or JSON file.
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let profile: Self = match ProfileFormat::from_path(path) {
            ProfileFormat::Toml => toml::from_str(&content)?,
            ProfileFormat::Json => serde_json::from_str(&content)?,
        };
        profile.validate()?;
        info!(path = %path.display(), families = profile.families.len(), "loaded joint profile");
        Ok(profile)
    }

    /// Save the profile as TOML or JSON.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ProfileFormat::from_path(path) {
            ProfileFormat::Toml => toml::to_string_pretty(self)?,
            ProfileFormat::Json => serde_json::to_string_pretty(self)?,
        };
        std::fs::write(path, content)?;
        debug!(path = %path.display(), "saved joint profile");
        Ok(())
    }

    /// Checks the material values and builds every family's settings once
    /// so bad overrides surface here instead of at render time.
    pub fn validate(&self) -> SettingsResult<()> {
        if !(self.thickness.is_finite() && self.thickness > 0.0) {
            return Err(SettingsError::invalid("thickness", "must be > 0"));
        }
        if !(self.burn.is_finite() && self.burn >= 0.0) {
            return Err(SettingsError::invalid("burn", "must be >= 0"));
        }

        let bolts = &self.bed_bolts;
        for (key, value) in [
            ("bed_bolts.diameter", bolts.diameter),
            ("bed_bolts.nut_diameter", bolts.nut_diameter),
            ("bed_bolts.nut_height", bolts.nut_height),
            ("bed_bolts.length", bolts.length),
            ("bed_bolts.nut_distance", bolts.nut_distance),
        ] {
            if value <= 0.0 {
                return Err(SettingsError::invalid(key, "must be > 0"));
            }
        }
        if bolts.nut_diameter <= bolts.diameter {
            return Err(SettingsError::invalid(
                "bed_bolts.nut_diameter",
                "must be larger than the bolt diameter",
            ));
        }
        if bolts.nut_distance + bolts.nut_height > bolts.length {
            return Err(SettingsError::invalid(
                "bed_bolts.nut_distance",
                "nut must sit within the bolt length",
            ));
        }

        for (family, overrides) in &self.families {
            let schema = family_schema(family)
                .ok_or_else(|| ConfigError::UnknownFamily(family.clone()))?;
            Settings::new(schema, self.thickness, self.relative, overrides)?;
        }
        Ok(())
    }

    /// Drawing context for this profile.
    pub fn context(&self) -> JointContext {
        JointContext::new(self.thickness)
            .with_burn(self.burn)
            .with_bed_bolts(self.bed_bolts)
    }

    /// Overrides in the form the edge registry takes them.
    pub fn family_overrides(&self) -> FamilyOverrides {
        FamilyOverrides {
            relative: self.relative,
            families: self.families.clone(),
        }
    }
}
