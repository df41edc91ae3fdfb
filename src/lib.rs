//! # JointKit
//!
//! Parametric joint and edge geometry for laser-cut and CNC-cut panels.
//!
//! Every edge generator draws a profile of exactly the requested length
//! through a turtle-style [`Cursor`], reporting how far its material sits
//! outside the nominal outline so neighbouring edges can meet cleanly.
//!
//! ## Architecture
//!
//! JointKit is organized as a workspace with multiple crates:
//!
//! 1. **jointkit-core** - Settings model, bolt policy, cursor contract, errors, lyon export
//! 2. **jointkit-edges** - Edge families, edge registry, contour assembly and part layout
//! 3. **jointkit-settings** - Persisted joint profiles (TOML/JSON)
//! 4. **jointkit** - This crate: re-exports, logging setup and the demo binary
//!
//! ## Joint Families
//!
//! - **Finger joints** with matching hole rows and bed bolts
//! - **Hinges**: pin/eye hinges, chest hinges and cabinet hinges
//! - **Dovetails**, **click locks**, **stackable feet** and **slide-on lids**
//! - **Gripping edges**, **flex cuts** and **racks**

pub use jointkit_core as core;
pub use jointkit_edges as edges;
pub use jointkit_settings as settings;

pub use jointkit_core::{
    outline, BedBoltSettings, BedBolts, BoltPolicy, Bolts, ConfigError, Cursor, FamilyOverrides,
    FamilySettings, GeometryError, JointContext, JointError, LengthMismatchError, ParamValue,
    Point, PolyStep, Primitive, RecordingCursor, Result, ScopedFrame, Settings, SettingsSchema,
};

pub use jointkit_edges::{
    panel_flex_wall, plan_contour, polygon_wall, rectangular_wall, ContourPlan, Edge, EdgeFamily,
    EdgeRef, EdgeRegistry, FlexPanel, FlexSettings, PartExtent, PartLayout, FAMILY_NAMES,
};

pub use jointkit_settings::{JointProfile, ProfileStore, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty console output on stderr, keeping stdout free for generated data
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
