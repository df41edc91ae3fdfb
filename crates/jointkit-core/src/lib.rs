//! # JointKit Core
//!
//! Shared building blocks for joint generation:
//! - the settings model with absolute and thickness-relative parameters
//! - bed bolt distribution
//! - the turtle cursor contract and a recording implementation
//! - error types

pub mod bolts;
pub mod context;
pub mod cursor;
pub mod error;
pub mod geometry;
pub mod outline;
pub mod settings;

pub use bolts::{evenify, oddify, BedBoltSettings, BedBolts, BoltPolicy, Bolts};
pub use context::JointContext;
pub use cursor::{Cursor, PolyStep, Primitive, RecordingCursor, ScopedFrame};
pub use error::{
    ConfigError, ConfigResult, GeometryError, JointError, LengthMismatchError, Result,
};
pub use geometry::{normalize_degrees, Point, EPSILON};
pub use settings::{
    FamilyOverrides, FamilySettings, Overrides, ParamDecl, ParamDefault, ParamInfo, ParamKind,
    ParamValue, Settings, SettingsSchema,
};
