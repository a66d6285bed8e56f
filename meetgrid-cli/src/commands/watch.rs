use std::time::Duration;

use anyhow::Result;
use meetgrid_core::classify;
use owo_colors::OwoColorize;
use tracing::warn;

use super::Context;
use crate::render::Render;
use crate::snapshot::{CachedProvider, SnapshotProvider, TtlSnapshotCache};

/// Re-classify on a timer so Ongoing/Completed stay current.
/// The snapshot itself is re-fetched only once the cached copy expires.
pub async fn run(ctx: Context, interval: Option<Duration>) -> Result<()> {
    let period = match interval {
        Some(d) => d,
        None => ctx.config.refresh_interval()?,
    };
    anyhow::ensure!(!period.is_zero(), "Refresh interval must be greater than zero");

    let mut provider =
        CachedProvider::new(ctx.provider(), TtlSnapshotCache::new(), ctx.config.snapshot_ttl()?);

    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    println!(
        "{}",
        format!(
            "Watching {} for {} every {} (Ctrl-C to stop)",
            ctx.event_id,
            ctx.viewer_id,
            humantime::format_duration(period)
        )
        .dimmed()
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = ctx.clock.now();

                match provider.fetch_meetings(&ctx.event_id, &ctx.viewer_id) {
                    Ok(meetings) => {
                        let counts = classify(&meetings, now).counts();
                        println!("{} {}", now.format("%H:%M:%S").dimmed(), counts.render());
                    }
                    Err(e) => {
                        // Keep watching; the file may be mid-write
                        warn!(error = %e, "snapshot fetch failed");
                        println!("{} {}", now.format("%H:%M:%S").dimmed(), e.to_string().red());
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                return Ok(());
            }
        }
    }
}
