//! Column layout and grid geometry for the calendar day view.
//!
//! Each overlap cluster is split into equal-width columns, one per member,
//! in start-time order. This is not minimum interval-graph colouring: a
//! chain A-B-C where A and C don't touch still gets three columns, not two.
//!
//! Geometry is expressed against an hour-slot grid: `hour_slot` is the row
//! the block's top falls in and `top_offset` is measured from the top of
//! that row. Blocks are clamped so they never leave the day's grid.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MeetgridError, MeetgridResult};
use crate::lifecycle::is_upcoming;
use crate::meeting::Meeting;
use crate::overlap::{group_overlaps, MinuteSpan, OverlapCluster, Placed};

pub const DEFAULT_FIRST_HOUR: u32 = 8;
pub const DEFAULT_LAST_HOUR: u32 = 18;
pub const DEFAULT_PX_PER_HOUR: f64 = 60.0;
pub const DEFAULT_MIN_BLOCK_HEIGHT: f64 = 20.0;

/// Inclusive range of hour rows shown on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourRange {
    pub first_hour: u32,
    pub last_hour: u32,
}

impl Default for HourRange {
    /// Business hours, used when no venue window is known.
    fn default() -> Self {
        HourRange {
            first_hour: DEFAULT_FIRST_HOUR,
            last_hour: DEFAULT_LAST_HOUR,
        }
    }
}

impl HourRange {
    pub fn new(first_hour: u32, last_hour: u32) -> MeetgridResult<Self> {
        if first_hour > last_hour || last_hour > 23 {
            return Err(MeetgridError::InvalidHourRange {
                first: first_hour,
                last: last_hour,
            });
        }

        Ok(HourRange {
            first_hour,
            last_hour,
        })
    }

    /// Number of hour rows.
    pub fn slot_count(&self) -> u32 {
        self.last_hour.saturating_sub(self.first_hour) + 1
    }

    fn start_minute(&self) -> i64 {
        i64::from(self.first_hour) * 60
    }
}

/// Pixel scale of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridScale {
    pub px_per_hour: f64,
    /// Floor for block height so very short meetings stay visible.
    pub min_block_height: f64,
}

impl Default for GridScale {
    fn default() -> Self {
        GridScale {
            px_per_hour: DEFAULT_PX_PER_HOUR,
            min_block_height: DEFAULT_MIN_BLOCK_HEIGHT,
        }
    }
}

impl GridScale {
    pub fn new(px_per_hour: f64, min_block_height: f64) -> MeetgridResult<Self> {
        let valid = |v: f64| v.is_finite() && v >= 0.0;
        if !valid(px_per_hour) || px_per_hour == 0.0 || !valid(min_block_height) {
            return Err(MeetgridError::Config(format!(
                "Invalid grid scale: px_per_hour={px_per_hour}, min_block_height={min_block_height}"
            )));
        }

        Ok(GridScale {
            px_per_hour,
            min_block_height,
        })
    }

    /// Total height of the grid for `hours`.
    pub fn grid_height(&self, hours: &HourRange) -> f64 {
        f64::from(hours.slot_count()) * self.px_per_hour
    }
}

/// Render geometry for one meeting. Recomputed on every pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutBlock {
    pub meeting_id: String,
    pub cluster_size: usize,
    pub column_index: usize,
    pub column_width_pct: f64,
    pub left_pct: f64,
    /// Hour row containing the block's top edge.
    pub hour_slot: u32,
    /// Pixels from the top of `hour_slot`.
    pub top_offset: f64,
    pub height: f64,
}

/// Layout of one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayLayout {
    pub date: NaiveDate,
    pub blocks: Vec<LayoutBlock>,
}

/// Assign one equal-width column per cluster member, ordered by start time
/// (ties keep input order).
pub fn assign_columns(
    cluster: &OverlapCluster<'_>,
    hours: &HourRange,
    scale: &GridScale,
) -> Vec<LayoutBlock> {
    let mut members: Vec<Placed<'_>> = cluster.members().to_vec();
    members.sort_by_key(|p| (p.span.start, p.order));

    let cluster_size = members.len();
    let column_width_pct = 100.0 / cluster_size as f64;

    members
        .iter()
        .enumerate()
        .map(|(column_index, placed)| {
            let (hour_slot, top_offset, height) = geometry(&placed.span, hours, scale);

            LayoutBlock {
                meeting_id: placed.meeting.id.clone(),
                cluster_size,
                column_index,
                column_width_pct,
                left_pct: column_index as f64 * column_width_pct,
                hour_slot,
                top_offset,
                height,
            }
        })
        .collect()
}

/// Vertical placement: `(hour_slot, top_offset, height)`.
///
/// Row and minute-within-row come from integer minutes; pixels only at the end.
fn geometry(span: &MinuteSpan, hours: &HourRange, scale: &GridScale) -> (u32, f64, f64) {
    let px = scale.px_per_hour;
    let to_px = |minutes: i64| minutes as f64 / 60.0 * px;

    let grid_minutes = i64::from(hours.slot_count()) * 60;
    let start = (span.start - hours.start_minute()).max(0).min(grid_minutes);
    let end = (span.end - hours.start_minute()).min(grid_minutes);

    let last_slot = i64::from(hours.slot_count()) - 1;
    let slot_index = (start / 60).min(last_slot);
    let minute_in_slot = start - slot_index * 60;

    let height = to_px(end - start)
        .max(scale.min_block_height)
        .min(to_px(grid_minutes - start))
        .max(0.0);

    // slot_index is within 0..slot_count, which fits in u32
    let slot_index = u32::try_from(slot_index).unwrap_or_default();

    (hours.first_hour + slot_index, to_px(minute_in_slot), height)
}

/// Lay out one day's meetings: cluster, then assign columns per cluster.
///
/// Meetings without both times are skipped. Output is in cluster order,
/// then column order.
pub fn layout_day<'a, I>(meetings: I, hours: &HourRange, scale: &GridScale) -> Vec<LayoutBlock>
where
    I: IntoIterator<Item = &'a Meeting>,
{
    let meetings: Vec<&Meeting> = meetings.into_iter().collect();

    for m in meetings.iter().filter(|m| MinuteSpan::of(m).is_none()) {
        debug!(meeting = %m.id, "skipping meeting without start and end");
    }

    group_overlaps(meetings.iter().copied())
        .iter()
        .flat_map(|cluster| assign_columns(cluster, hours, scale))
        .collect()
}

/// Upcoming meetings grouped by the day they start on.
pub fn calendar_days(meetings: &[Meeting], now: NaiveDateTime) -> BTreeMap<NaiveDate, Vec<&Meeting>> {
    let mut days: BTreeMap<NaiveDate, Vec<&Meeting>> = BTreeMap::new();

    for m in meetings.iter().filter(|m| is_upcoming(m, now)) {
        if let Some(date) = m.start_date() {
            days.entry(date).or_default().push(m);
        }
    }

    days
}

/// Calendar view: upcoming meetings, per day, laid out.
pub fn layout_calendar(
    meetings: &[Meeting],
    now: NaiveDateTime,
    hours: &HourRange,
    scale: &GridScale,
) -> Vec<DayLayout> {
    calendar_days(meetings, now)
        .into_iter()
        .map(|(date, day_meetings)| DayLayout {
            date,
            blocks: layout_day(day_meetings, hours, scale),
        })
        .collect()
}
