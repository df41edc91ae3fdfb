//! Default profile location.

use crate::error::{SettingsError, SettingsResult};
use crate::profile::JointProfile;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const APP_DIR: &str = "jointkit";
const PROFILE_FILE: &str = "profile.toml";

/// A profile file on disk.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config_dir>/jointkit/profile.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            SettingsError::ConfigDirectory("no configuration directory on this platform".into())
        })?;
        Ok(dir.join(APP_DIR).join(PROFILE_FILE))
    }

    /// Store at the platform default location.
    pub fn open_default() -> SettingsResult<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored profile, or the default one if nothing was saved yet.
    pub fn load_or_default(&self) -> SettingsResult<JointProfile> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no saved profile, using defaults");
            return Ok(JointProfile::default());
        }
        JointProfile::load_from_file(&self.path).inspect_err(|e| {
            warn!(path = %self.path.display(), error = %e, "failed to load profile");
        })
    }

    /// Saves `profile`, creating the directory if needed.
    pub fn save(&self, profile: &JointProfile) -> SettingsResult<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        profile.save_to_file(&self.path)
    }
}
