//! Dashboard configuration.
//!
//! Read from `~/.config/meetgrid/config.toml`, overridable with
//! `MEETGRID_*` environment variables (e.g. `MEETGRID_FIRST_HOUR=9`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{MeetgridError, MeetgridResult};
use crate::layout::{
    GridScale, HourRange, DEFAULT_FIRST_HOUR, DEFAULT_LAST_HOUR, DEFAULT_MIN_BLOCK_HEIGHT,
    DEFAULT_PX_PER_HOUR,
};

static DEFAULT_SNAPSHOT_TTL: &str = "5m";
static DEFAULT_REFRESH_INTERVAL: &str = "30s";

fn default_first_hour() -> u32 {
    DEFAULT_FIRST_HOUR
}

fn default_last_hour() -> u32 {
    DEFAULT_LAST_HOUR
}

fn default_px_per_hour() -> f64 {
    DEFAULT_PX_PER_HOUR
}

fn default_min_block_height() -> f64 {
    DEFAULT_MIN_BLOCK_HEIGHT
}

fn default_snapshot_ttl() -> String {
    DEFAULT_SNAPSHOT_TTL.to_string()
}

fn default_refresh_interval() -> String {
    DEFAULT_REFRESH_INTERVAL.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetgridConfig {
    #[serde(default = "default_first_hour")]
    pub first_hour: u32,
    #[serde(default = "default_last_hour")]
    pub last_hour: u32,
    #[serde(default = "default_px_per_hour")]
    pub px_per_hour: f64,
    #[serde(default = "default_min_block_height")]
    pub min_block_height: f64,

    /// Viewer the dashboard is projected for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    /// JSON file of raw meeting records. `~` is expanded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_path: Option<PathBuf>,

    /// How long a fetched snapshot is reused, e.g. "5m"
    #[serde(default = "default_snapshot_ttl")]
    pub snapshot_ttl: String,
    /// How often `watch` re-evaluates, e.g. "30s"
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: String,
}

impl Default for MeetgridConfig {
    fn default() -> Self {
        MeetgridConfig {
            first_hour: DEFAULT_FIRST_HOUR,
            last_hour: DEFAULT_LAST_HOUR,
            px_per_hour: DEFAULT_PX_PER_HOUR,
            min_block_height: DEFAULT_MIN_BLOCK_HEIGHT,
            viewer_id: None,
            event_id: None,
            snapshot_path: None,
            snapshot_ttl: default_snapshot_ttl(),
            refresh_interval: default_refresh_interval(),
        }
    }
}

impl MeetgridConfig {
    pub fn config_path() -> MeetgridResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| MeetgridError::Config("Could not determine config directory".into()))?
            .join("meetgrid");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user config, creating a commented default file on first run.
    pub fn load() -> MeetgridResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from a specific file (which may be missing) plus the environment.
    pub fn load_from(path: &Path) -> MeetgridResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("MEETGRID").try_parsing(true))
            .build()
            .map_err(|e| MeetgridError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| MeetgridError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> MeetgridResult<()> {
        let contents = format!(
            "\
# meetgrid configuration

# Calendar grid window (inclusive hour rows):
# first_hour = {DEFAULT_FIRST_HOUR}
# last_hour = {DEFAULT_LAST_HOUR}

# Grid scale:
# px_per_hour = {DEFAULT_PX_PER_HOUR:.1}
# min_block_height = {DEFAULT_MIN_BLOCK_HEIGHT:.1}

# Who is looking, and at which event:
# viewer_id = \"user-1\"
# event_id = \"expo-2025\"

# Where meeting records are read from:
# snapshot_path = \"~/meetgrid/meetings.json\"

# snapshot_ttl = \"{DEFAULT_SNAPSHOT_TTL}\"
# refresh_interval = \"{DEFAULT_REFRESH_INTERVAL}\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                MeetgridError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| MeetgridError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn hour_range(&self) -> MeetgridResult<HourRange> {
        HourRange::new(self.first_hour, self.last_hour)
    }

    pub fn grid_scale(&self) -> MeetgridResult<GridScale> {
        GridScale::new(self.px_per_hour, self.min_block_height)
    }

    pub fn snapshot_ttl(&self) -> MeetgridResult<Duration> {
        parse_duration("snapshot_ttl", &self.snapshot_ttl)
    }

    pub fn refresh_interval(&self) -> MeetgridResult<Duration> {
        parse_duration("refresh_interval", &self.refresh_interval)
    }

    /// Snapshot path with `~` expanded.
    pub fn snapshot_path(&self) -> Option<PathBuf> {
        self.snapshot_path.as_ref().map(|p| {
            PathBuf::from(shellexpand::tilde(&p.to_string_lossy()).into_owned())
        })
    }
}

fn parse_duration(key: &str, value: &str) -> MeetgridResult<Duration> {
    humantime::parse_duration(value)
        .map_err(|e| MeetgridError::Config(format!("Invalid {key} '{value}': {e}")))
}
