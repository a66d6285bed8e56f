pub mod day;
pub mod tabs;
pub mod watch;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use meetgrid_core::config::MeetgridConfig;
use meetgrid_core::time::parse_instant;
use meetgrid_core::{Clock, FixedClock, GridScale, HourRange, SystemClock};

use crate::snapshot::FileSnapshotProvider;

/// Flags shared by every command. Anything left out comes from the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct SnapshotArgs {
    /// JSON file of meeting records
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Event whose meetings are shown
    #[arg(long)]
    pub event: Option<String>,

    /// Viewer the dashboard is projected for
    #[arg(long)]
    pub viewer: Option<String>,

    /// Evaluate as of this instant (e.g. "2025-03-20 09:20") instead of the wall clock
    #[arg(long)]
    pub now: Option<String>,
}

/// Everything a command needs, resolved from flags and config.
pub struct Context {
    pub snapshot_path: PathBuf,
    pub event_id: String,
    pub viewer_id: String,
    pub clock: Box<dyn Clock>,
    pub hours: HourRange,
    pub scale: GridScale,
    pub config: MeetgridConfig,
}

impl Context {
    pub fn resolve(args: SnapshotArgs, config: MeetgridConfig) -> Result<Self> {
        let Some(snapshot_path) = args.snapshot.or_else(|| config.snapshot_path()) else {
            anyhow::bail!(
                "No snapshot file given.\n\n\
                Pass one with:\n  \
                meetgrid <command> --snapshot meetings.json\n\n\
                or set snapshot_path in {}",
                config_hint()
            );
        };

        let Some(event_id) = args.event.or_else(|| config.event_id.clone()) else {
            anyhow::bail!("No event given. Use --event <id> or set event_id in {}", config_hint());
        };

        let Some(viewer_id) = args.viewer.or_else(|| config.viewer_id.clone()) else {
            anyhow::bail!("No viewer given. Use --viewer <id> or set viewer_id in {}", config_hint());
        };

        let clock: Box<dyn Clock> = match args.now.as_deref() {
            Some(s) => {
                let now = parse_instant(s).with_context(|| {
                    format!("Invalid --now '{}'. Expected e.g. \"2025-03-20 09:20\"", s)
                })?;
                Box::new(FixedClock(now))
            }
            None => Box::new(SystemClock),
        };

        Ok(Context {
            snapshot_path,
            event_id,
            viewer_id,
            clock,
            hours: config.hour_range()?,
            scale: config.grid_scale()?,
            config,
        })
    }

    pub fn provider(&self) -> FileSnapshotProvider {
        FileSnapshotProvider::new(self.snapshot_path.clone())
    }
}

fn config_hint() -> String {
    MeetgridConfig::config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "the meetgrid config file".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn args() -> SnapshotArgs {
        SnapshotArgs {
            snapshot: Some(PathBuf::from("meetings.json")),
            event: Some("expo".to_string()),
            viewer: Some("alice".to_string()),
            now: Some("2025-03-20 09:20".to_string()),
        }
    }

    #[test]
    fn test_flags_resolve_context() {
        let ctx = Context::resolve(args(), MeetgridConfig::default()).unwrap();

        assert_eq!(ctx.event_id, "expo");
        assert_eq!(ctx.viewer_id, "alice");
        assert_eq!(
            ctx.clock.now(),
            NaiveDate::from_ymd_opt(2025, 3, 20)
                .unwrap()
                .and_hms_opt(9, 20, 0)
                .unwrap()
        );
        assert_eq!(ctx.hours, HourRange::default());
    }

    #[test]
    fn test_config_fills_missing_flags() {
        let config = MeetgridConfig {
            viewer_id: Some("bob".to_string()),
            ..MeetgridConfig::default()
        };
        let ctx = Context::resolve(
            SnapshotArgs {
                viewer: None,
                ..args()
            },
            config,
        )
        .unwrap();

        assert_eq!(ctx.viewer_id, "bob");
    }

    #[test]
    fn test_missing_viewer_is_an_error() {
        let result = Context::resolve(
            SnapshotArgs {
                viewer: None,
                ..args()
            },
            MeetgridConfig::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_now_is_an_error() {
        let result = Context::resolve(
            SnapshotArgs {
                now: Some("tomorrow-ish".to_string()),
                ..args()
            },
            MeetgridConfig::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_hour_window_is_an_error() {
        let config = MeetgridConfig {
            first_hour: 20,
            last_hour: 8,
            ..MeetgridConfig::default()
        };
        assert!(Context::resolve(args(), config).is_err());
    }
}
