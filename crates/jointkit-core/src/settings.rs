//! Joint settings model.
//!
//! Each joint family declares its parameters in a static [`SettingsSchema`].
//! Absolute parameters are stored as given. Relative parameters are
//! multiplied by the material thickness when relative mode is on, so a
//! finger width of `2.0` means two material thicknesses.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Value type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Bool,
    Int,
    Float,
    String,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::String => write!(f, "string"),
        }
    }
}

/// A live or overriding parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl ParamValue {
    pub fn kind(&self) -> ParamKind {
        match self {
            Self::Bool(_) => ParamKind::Bool,
            Self::Int(_) => ParamKind::Int,
            Self::Float(_) => ParamKind::Float,
            Self::Str(_) => ParamKind::String,
        }
    }

    /// Numeric value; integers widen to floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{}", v),
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Str(v) => write!(f, "{}", v),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

/// Declared default of a parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamDefault {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(&'static str),
    /// Enumerated string choice; the first entry is the default.
    Choice(&'static [&'static str]),
}

impl ParamDefault {
    pub fn kind(&self) -> ParamKind {
        match self {
            Self::Bool(_) => ParamKind::Bool,
            Self::Int(_) => ParamKind::Int,
            Self::Float(_) => ParamKind::Float,
            Self::Str(_) | Self::Choice(_) => ParamKind::String,
        }
    }

    pub fn choices(&self) -> Option<&'static [&'static str]> {
        match self {
            Self::Choice(choices) => Some(*choices),
            _ => None,
        }
    }

    fn value(&self) -> Option<ParamValue> {
        Some(match self {
            Self::Bool(v) => ParamValue::Bool(*v),
            Self::Int(v) => ParamValue::Int(*v),
            Self::Float(v) => ParamValue::Float(*v),
            Self::Str(v) => ParamValue::Str((*v).to_string()),
            Self::Choice(choices) => ParamValue::Str((*choices.first()?).to_string()),
        })
    }
}

/// A single parameter declaration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDecl {
    pub name: &'static str,
    pub default: ParamDefault,
    pub description: &'static str,
}

impl ParamDecl {
    pub const fn new(name: &'static str, default: ParamDefault, description: &'static str) -> Self {
        Self {
            name,
            default,
            description,
        }
    }

    pub const fn float(name: &'static str, value: f64, description: &'static str) -> Self {
        Self::new(name, ParamDefault::Float(value), description)
    }

    pub const fn int(name: &'static str, value: i64, description: &'static str) -> Self {
        Self::new(name, ParamDefault::Int(value), description)
    }

    pub const fn flag(name: &'static str, value: bool, description: &'static str) -> Self {
        Self::new(name, ParamDefault::Bool(value), description)
    }

    pub const fn choice(
        name: &'static str,
        choices: &'static [&'static str],
        description: &'static str,
    ) -> Self {
        Self::new(name, ParamDefault::Choice(choices), description)
    }
}

/// Static parameter declarations of one joint family.
#[derive(Debug, PartialEq)]
pub struct SettingsSchema {
    pub family: &'static str,
    pub absolute: &'static [ParamDecl],
    pub relative: &'static [ParamDecl],
}

/// Parameter description handed to configuration front ends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamInfo {
    pub family: &'static str,
    pub name: &'static str,
    /// Front-end name, `<Family>_<name>`.
    pub cli_name: String,
    pub kind: ParamKind,
    pub default: ParamValue,
    pub choices: Option<Vec<&'static str>>,
    pub description: &'static str,
    /// Whether the value is scaled by the material thickness.
    pub relative: bool,
}

impl SettingsSchema {
    /// Checks that every declaration can be carried by the settings model.
    pub fn validate(&self) -> ConfigResult<()> {
        for decl in self.absolute {
            if let ParamDefault::Choice(choices) = decl.default {
                if choices.is_empty() {
                    return Err(self.unsupported(decl.name, "empty choice list"));
                }
            }
        }
        for decl in self.relative {
            if !matches!(decl.default, ParamDefault::Float(_) | ParamDefault::Int(_)) {
                return Err(self.unsupported(
                    decl.name,
                    &format!("relative parameters must be numeric, not {}", decl.default.kind()),
                ));
            }
        }
        Ok(())
    }

    fn unsupported(&self, name: &str, reason: &str) -> ConfigError {
        ConfigError::UnsupportedType {
            family: self.family.to_string(),
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Finds a declaration; the flag is true for relative parameters.
    pub fn lookup(&self, name: &str) -> Option<(&'static ParamDecl, bool)> {
        self.absolute
            .iter()
            .find(|d| d.name == name)
            .map(|d| (d, false))
            .or_else(|| self.relative.iter().find(|d| d.name == name).map(|d| (d, true)))
    }

    /// Declared parameters, absolute first, in declaration order.
    pub fn parameters(&self) -> Vec<ParamInfo> {
        let absolute = self.absolute.iter().map(|d| (d, false));
        let relative = self.relative.iter().map(|d| (d, true));
        absolute
            .chain(relative)
            .filter_map(|(decl, relative)| {
                Some(ParamInfo {
                    family: self.family,
                    name: decl.name,
                    cli_name: format!("{}_{}", self.family, decl.name),
                    kind: decl.default.kind(),
                    default: decl.default.value()?,
                    choices: decl.default.choices().map(|c| c.to_vec()),
                    description: decl.description,
                    relative,
                })
            })
            .collect()
    }
}

/// Parameter overrides keyed by parameter name.
pub type Overrides = BTreeMap<String, ParamValue>;

/// Overrides for every family of a render session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyOverrides {
    /// Scale relative parameters by the material thickness.
    pub relative: bool,
    pub families: BTreeMap<String, Overrides>,
}

impl Default for FamilyOverrides {
    fn default() -> Self {
        Self {
            relative: true,
            families: BTreeMap::new(),
        }
    }
}

impl FamilyOverrides {
    /// Overrides for one family, empty when none were given.
    pub fn family(&self, name: &str) -> Overrides {
        self.families.get(name).cloned().unwrap_or_default()
    }
}

/// Live parameter values of one joint family.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    schema: &'static SettingsSchema,
    thickness: f64,
    relative: bool,
    values: BTreeMap<&'static str, ParamValue>,
}

impl Settings {
    /// Builds settings from the schema defaults and applies `overrides`.
    pub fn new(
        schema: &'static SettingsSchema,
        thickness: f64,
        relative: bool,
        overrides: &Overrides,
    ) -> ConfigResult<Self> {
        schema.validate()?;
        let mut settings = Self {
            schema,
            thickness,
            relative,
            values: BTreeMap::new(),
        };
        for decl in schema.absolute {
            if let Some(value) = decl.default.value() {
                settings.values.insert(decl.name, value);
            }
        }
        let factor = settings.factor(thickness, relative);
        for decl in schema.relative {
            if let Some(value) = decl.default.value().and_then(|v| v.as_f64()) {
                settings
                    .values
                    .insert(decl.name, ParamValue::Float(value * factor));
            }
        }
        settings.set_values(thickness, relative, overrides)?;
        Ok(settings)
    }

    /// Defaults in relative mode.
    pub fn defaults(schema: &'static SettingsSchema, thickness: f64) -> ConfigResult<Self> {
        Self::new(schema, thickness, true, &Overrides::new())
    }

    fn factor(&self, thickness: f64, relative: bool) -> f64 {
        if relative {
            thickness
        } else {
            1.0
        }
    }

    /// Merges overrides. Relative values are scaled by `thickness` when
    /// `relative` is set, and both become the live scaling state. Nothing is
    /// changed when any override is rejected.
    pub fn set_values(
        &mut self,
        thickness: f64,
        relative: bool,
        overrides: &Overrides,
    ) -> ConfigResult<()> {
        let factor = self.factor(thickness, relative);
        let mut staged = Vec::with_capacity(overrides.len());
        for (name, value) in overrides {
            let (decl, is_relative) =
                self.schema
                    .lookup(name)
                    .ok_or_else(|| ConfigError::UnknownParameter {
                        family: self.schema.family.to_string(),
                        name: name.clone(),
                    })?;
            let live = if is_relative {
                let v = value.as_f64().ok_or_else(|| self.mismatch(decl, value))?;
                ParamValue::Float(v * factor)
            } else {
                self.check_absolute(decl, value)?
            };
            staged.push((decl.name, live));
        }
        if !staged.is_empty() {
            debug!(
                family = self.schema.family,
                count = staged.len(),
                "merged parameter overrides"
            );
        }
        self.values.extend(staged);
        self.thickness = thickness;
        self.relative = relative;
        Ok(())
    }

    fn check_absolute(&self, decl: &ParamDecl, value: &ParamValue) -> ConfigResult<ParamValue> {
        match (decl.default, value) {
            (ParamDefault::Bool(_), ParamValue::Bool(_))
            | (ParamDefault::Int(_), ParamValue::Int(_))
            | (ParamDefault::Str(_), ParamValue::Str(_)) => Ok(value.clone()),
            (ParamDefault::Float(_), ParamValue::Float(_) | ParamValue::Int(_)) => value
                .as_f64()
                .map(ParamValue::Float)
                .ok_or_else(|| self.mismatch(decl, value)),
            (ParamDefault::Choice(choices), ParamValue::Str(s)) => {
                if choices.contains(&s.as_str()) {
                    Ok(value.clone())
                } else {
                    Err(ConfigError::InvalidChoice {
                        family: self.schema.family.to_string(),
                        name: decl.name.to_string(),
                        value: s.clone(),
                        choices: choices.join(", "),
                    })
                }
            }
            _ => Err(self.mismatch(decl, value)),
        }
    }

    fn mismatch(&self, decl: &ParamDecl, value: &ParamValue) -> ConfigError {
        ConfigError::TypeMismatch {
            family: self.schema.family.to_string(),
            name: decl.name.to_string(),
            expected: decl.default.kind(),
            found: value.kind(),
        }
    }

    pub fn family(&self) -> &'static str {
        self.schema.family
    }

    pub fn schema(&self) -> &'static SettingsSchema {
        self.schema
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn is_relative(&self) -> bool {
        self.relative
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Numeric parameter, `0.0` when the schema does not declare it.
    pub fn float(&self, name: &str) -> f64 {
        self.get(name).and_then(ParamValue::as_f64).unwrap_or(0.0)
    }

    pub fn int(&self, name: &str) -> i64 {
        self.get(name).and_then(ParamValue::as_i64).unwrap_or(0)
    }

    pub fn flag(&self, name: &str) -> bool {
        self.get(name).and_then(ParamValue::as_bool).unwrap_or(false)
    }

    pub fn text(&self, name: &str) -> &str {
        self.get(name).and_then(ParamValue::as_str).unwrap_or("")
    }

    /// Snapshot of all live values.
    pub fn values(&self) -> impl Iterator<Item = (&'static str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }
}

/// Typed view over [`Settings`] for one joint family.
pub trait FamilySettings: Sized {
    fn schema() -> &'static SettingsSchema;

    fn from_settings(settings: Settings) -> ConfigResult<Self>;

    fn settings(&self) -> &Settings;

    fn new(thickness: f64, relative: bool, overrides: &Overrides) -> ConfigResult<Self> {
        Self::from_settings(Settings::new(Self::schema(), thickness, relative, overrides)?)
    }

    fn with_defaults(thickness: f64) -> ConfigResult<Self> {
        Self::new(thickness, true, &Overrides::new())
    }

    fn thickness(&self) -> f64 {
        self.settings().thickness()
    }
}
