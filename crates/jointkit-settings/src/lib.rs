//! JointKit Settings Crate
//!
//! Loads, validates and saves joint profiles and finds their default
//! location.

pub mod error;
pub mod profile;
pub mod store;

pub use error::{SettingsError, SettingsResult};
pub use profile::{JointProfile, ProfileFormat};
pub use store::ProfileStore;
