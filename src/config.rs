//! TOML configuration
//!
//! ```toml
//! [session]
//! lower = 2
//! upper = 6
//! max_count = 4
//!
//! [display]
//! tick_ms = 500
//! live_timer = true
//! staff_width = 24
//! ```
//!
//! Looked up from `$NOTEDRILL_CONFIG`, then `<config dir>/notedrill/config.toml`.
//! A missing file means defaults; a malformed one is an error.

use anyhow::{bail, Context, Result};
use log::{debug, info};
use notedrill_core::types::{DEFAULT_GROUP_RANGE, DEFAULT_MAX_COUNT};
use notedrill_core::{OctaveRange, SessionConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "NOTEDRILL_CONFIG";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct DrillConfig {
    pub session: SessionSettings,
    pub display: DisplaySettings,
}

/// Starting values for the session configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionSettings {
    pub lower: u8,
    pub upper: u8,
    pub max_count: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            lower: DEFAULT_GROUP_RANGE.0,
            upper: DEFAULT_GROUP_RANGE.1,
            max_count: DEFAULT_MAX_COUNT,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplaySettings {
    /// Refresh cadence of the elapsed-time display
    pub tick_ms: u64,
    /// Print the running time while a trial is open
    pub live_timer: bool,
    /// Width of the drawn staff in columns
    pub staff_width: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            tick_ms: 500,
            live_timer: true,
            staff_width: 24,
        }
    }
}

impl DisplaySettings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

impl DrillConfig {
    /// Parse and validate a TOML document
    pub fn from_toml(toml: &str) -> Result<DrillConfig> {
        let config: DrillConfig = toml::from_str(toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the first configured location, or fall back to defaults
    pub fn load() -> Result<DrillConfig> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::load_from(Path::new(&path));
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                debug!("no config file found, using defaults");
                Ok(DrillConfig::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<DrillConfig> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::from_toml(&contents)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("notedrill").join("config.toml"))
    }

    /// Session configuration built from the `[session]` table
    pub fn session_config(&self) -> Result<SessionConfig> {
        let range = OctaveRange::new(self.session.lower, self.session.upper)?;
        Ok(SessionConfig::new(range, self.session.max_count)?)
    }

    fn validate(&self) -> Result<()> {
        self.session_config()?;
        if self.display.tick_ms == 0 {
            bail!("display.tick_ms must be greater than 0");
        }
        if self.display.staff_width < 8 {
            bail!("display.staff_width must be at least 8");
        }
        Ok(())
    }
}
