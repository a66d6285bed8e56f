use std::collections::HashMap;

use anyhow::Result;
use chrono::NaiveDate;
use meetgrid_core::{layout_calendar, DayLayout, Meeting};
use owo_colors::OwoColorize;

use super::Context;
use crate::render::render_block;
use crate::snapshot::SnapshotProvider;

pub fn run(ctx: Context, date: Option<NaiveDate>, json: bool) -> Result<()> {
    let meetings = ctx.provider().fetch_meetings(&ctx.event_id, &ctx.viewer_id)?;
    let now = ctx.clock.now();
    let today = now.date();

    let days: Vec<DayLayout> = layout_calendar(&meetings, now, &ctx.hours, &ctx.scale)
        .into_iter()
        .filter(|d| date.is_none_or(|wanted| d.date == wanted))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&days)?);
        return Ok(());
    }

    if days.is_empty() {
        println!("{}", "No upcoming meetings to lay out".dimmed());
        return Ok(());
    }

    let by_id: HashMap<&str, &Meeting> = meetings.iter().map(|m| (m.id.as_str(), m)).collect();

    for (i, day) in days.iter().enumerate() {
        println!("{}", format_date_label(day.date, today).bold());
        for block in &day.blocks {
            println!("  {}", render_block(block, by_id.get(block.meeting_id.as_str()).copied()));
        }

        // Add spacing between days (but not after the last one)
        if i < days.len() - 1 {
            println!();
        }
    }

    Ok(())
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25")
fn format_date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_date_label_is_relative_to_given_day() {
        assert_eq!(format_date_label(date(20), date(20)), "Today");
        assert_eq!(format_date_label(date(21), date(20)), "Tomorrow");
        assert_eq!(format_date_label(date(22), date(20)), "Sat Mar 22");
        assert_eq!(format_date_label(date(19), date(20)), "Wed Mar 19");
    }
}
