//! Grouping of same-day meetings into overlap clusters.
//!
//! Two meetings overlap when their half-open minute intervals intersect.
//! Touching endpoints (09:00-10:00 then 10:00-11:00) do not overlap.
//! A cluster is a connected component of the overlap relation, so a meeting
//! that overlaps two otherwise disjoint meetings pulls all three together.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::meeting::Meeting;
use crate::time::minutes_since_midnight;

/// A half-open interval `[start, end)` in minutes from midnight of the
/// meeting's start day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinuteSpan {
    pub start: i64,
    pub end: i64,
}

impl MinuteSpan {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Span of a meeting, or `None` if either time is unknown.
    ///
    /// An inverted meeting (end before start) yields an inverted span; it
    /// is not corrected here.
    pub fn of(meeting: &Meeting) -> Option<Self> {
        let start = meeting.start_at?;
        let end = meeting.end_at?;
        let day: NaiveDate = start.date();

        Some(Self {
            start: minutes_since_midnight(start, day),
            end: minutes_since_midnight(end, day),
        })
    }

    /// Length in minutes. Negative for inverted spans.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }

    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A meeting placed on the day's minute axis.
#[derive(Debug, Clone, Copy)]
pub struct Placed<'a> {
    pub meeting: &'a Meeting,
    pub span: MinuteSpan,
    /// Position in the grouper's input.
    pub order: usize,
}

/// A maximal set of transitively overlapping meetings.
///
/// Members are kept in input order. Never empty.
#[derive(Debug, Clone)]
pub struct OverlapCluster<'a> {
    members: Vec<Placed<'a>>,
}

impl<'a> OverlapCluster<'a> {
    pub fn members(&self) -> &[Placed<'a>] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Earliest start minute among the members.
    pub fn earliest_start(&self) -> i64 {
        self.members
            .iter()
            .map(|p| p.span.start)
            .min()
            .unwrap_or_default()
    }

    fn first_order(&self) -> usize {
        self.members.iter().map(|p| p.order).min().unwrap_or_default()
    }

    fn touches(&self, candidate: &MinuteSpan) -> bool {
        self.members.iter().any(|p| p.span.overlaps(candidate))
    }
}

/// Partition meetings into overlap clusters.
///
/// Every input meeting that has both times lands in exactly one cluster;
/// meetings without a span are not placeable and are left out. Clusters
/// come back sorted by earliest start, ties by first input position.
pub fn group_overlaps<'a, I>(meetings: I) -> Vec<OverlapCluster<'a>>
where
    I: IntoIterator<Item = &'a Meeting>,
{
    let placed: Vec<Placed<'a>> = meetings
        .into_iter()
        .enumerate()
        .filter_map(|(order, meeting)| {
            let span = MinuteSpan::of(meeting);
            if span.is_none() {
                trace!(meeting = %meeting.id, "no span, not placeable");
            }
            span.map(|span| Placed { meeting, span, order })
        })
        .collect();

    group_placed(placed)
}

/// Cluster already-placed meetings.
fn group_placed(placed: Vec<Placed<'_>>) -> Vec<OverlapCluster<'_>> {
    let mut pending: Vec<Option<Placed<'_>>> = placed.into_iter().map(Some).collect();
    let mut clusters = Vec::new();

    for seed_idx in 0..pending.len() {
        let Some(seed) = pending[seed_idx].take() else {
            continue;
        };

        let mut cluster = OverlapCluster {
            members: vec![seed],
        };

        // Grow until a full pass over the remaining meetings adds nothing
        loop {
            let mut grew = false;

            for slot in pending.iter_mut() {
                let joins = slot.as_ref().is_some_and(|p| cluster.touches(&p.span));
                if joins {
                    if let Some(p) = slot.take() {
                        cluster.members.push(p);
                        grew = true;
                    }
                }
            }

            if !grew {
                break;
            }
        }

        cluster.members.sort_by_key(|p| p.order);
        trace!(size = cluster.len(), start = cluster.earliest_start(), "cluster formed");
        clusters.push(cluster);
    }

    clusters.sort_by_key(|c| (c.earliest_start(), c.first_order()));
    clusters
}
