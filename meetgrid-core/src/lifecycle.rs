//! Lifecycle classification for dashboard tabs.
//!
//! Five independent predicates, one per tab. They are deliberately not
//! derived from a single state enum: a meeting can satisfy none of them or
//! several at once (e.g. `is_approved` with a "pending" hint while the
//! meeting is running is both Pending and Ongoing). Callers that need a
//! single answer use `primary_category`.
//!
//! Predicates that need a time return `false` when that time is unknown.
//! An inverted meeting (start after end) is never Ongoing or Completed.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::meeting::Meeting;

const CANCELLED: &str = "cancelled";
const PENDING: &str = "pending";
const UPCOMING: &str = "upcoming";

pub fn is_cancelled(m: &Meeting) -> bool {
    m.status_is(CANCELLED) || m.is_cancelled
}

pub fn is_pending(m: &Meeting) -> bool {
    !is_cancelled(m) && (m.hint_is(PENDING) || (!m.is_approved && !m.hint_is(UPCOMING)))
}

pub fn is_upcoming(m: &Meeting, now: NaiveDateTime) -> bool {
    let Some(start) = m.start_at else {
        return false;
    };

    !is_cancelled(m) && (m.hint_is(UPCOMING) || (m.is_approved && !m.hint_is(PENDING))) && start > now
}

pub fn is_ongoing(m: &Meeting, now: NaiveDateTime) -> bool {
    let (Some(start), Some(end)) = (m.start_at, m.end_at) else {
        return false;
    };

    !is_cancelled(m) && is_confirmed(m) && start <= end && start <= now && now <= end
}

pub fn is_completed(m: &Meeting, now: NaiveDateTime) -> bool {
    let Some(end) = m.end_at else {
        return false;
    };

    !is_cancelled(m) && is_confirmed(m) && !is_inverted(m) && now > end
}

/// Both times known and the start lies after the end.
fn is_inverted(m: &Meeting) -> bool {
    matches!((m.start_at, m.end_at), (Some(start), Some(end)) if start > end)
}

fn is_confirmed(m: &Meeting) -> bool {
    m.is_approved || m.hint_is(UPCOMING)
}

/// Dashboard tab a meeting can be listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Pending,
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

impl Category {
    /// Tab order.
    pub const ALL: [Category; 5] = [
        Category::Pending,
        Category::Upcoming,
        Category::Ongoing,
        Category::Completed,
        Category::Cancelled,
    ];

    /// Order used when a meeting must be shown under exactly one tab.
    const PRECEDENCE: [Category; 5] = [
        Category::Cancelled,
        Category::Ongoing,
        Category::Completed,
        Category::Pending,
        Category::Upcoming,
    ];

    pub fn matches(self, m: &Meeting, now: NaiveDateTime) -> bool {
        match self {
            Category::Pending => is_pending(m),
            Category::Upcoming => is_upcoming(m, now),
            Category::Ongoing => is_ongoing(m, now),
            Category::Completed => is_completed(m, now),
            Category::Cancelled => is_cancelled(m),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Pending => "pending",
            Category::Upcoming => "upcoming",
            Category::Ongoing => "ongoing",
            Category::Completed => "completed",
            Category::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Unknown category '{}'. Expected one of: pending, upcoming, ongoing, completed, cancelled",
                    s
                )
            })
    }
}

/// Every category the meeting satisfies, in tab order.
pub fn categories_of(m: &Meeting, now: NaiveDateTime) -> Vec<Category> {
    Category::ALL
        .into_iter()
        .filter(|c| c.matches(m, now))
        .collect()
}

/// Single display category: cancelled > ongoing > completed > pending > upcoming.
pub fn primary_category(m: &Meeting, now: NaiveDateTime) -> Option<Category> {
    Category::PRECEDENCE
        .into_iter()
        .find(|c| c.matches(m, now))
}

/// Contradictory approval flags on a meeting.
///
/// These are reported, not corrected; the predicates resolve them by their
/// own precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagConflict {
    /// `is_approved` is set but the hint says "pending".
    ApprovedButHintPending,
    /// `is_approved` is unset but the hint says "upcoming".
    UnapprovedButHintUpcoming,
}

impl fmt::Display for FlagConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagConflict::ApprovedButHintPending => write!(f, "approved but hint is pending"),
            FlagConflict::UnapprovedButHintUpcoming => write!(f, "not approved but hint is upcoming"),
        }
    }
}

pub fn flag_conflict(m: &Meeting) -> Option<FlagConflict> {
    if m.is_approved && m.hint_is(PENDING) {
        Some(FlagConflict::ApprovedButHintPending)
    } else if !m.is_approved && m.hint_is(UPCOMING) {
        Some(FlagConflict::UnapprovedButHintUpcoming)
    } else {
        None
    }
}

/// Per-tab cardinalities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub pending: usize,
    pub upcoming: usize,
    pub ongoing: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl CategoryCounts {
    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::Pending => self.pending,
            Category::Upcoming => self.upcoming,
            Category::Ongoing => self.ongoing,
            Category::Completed => self.completed,
            Category::Cancelled => self.cancelled,
        }
    }
}

/// A snapshot split into tabs. A meeting appears in every tab whose
/// predicate it satisfies.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Classification<'a> {
    pub pending: Vec<&'a Meeting>,
    pub upcoming: Vec<&'a Meeting>,
    pub ongoing: Vec<&'a Meeting>,
    pub completed: Vec<&'a Meeting>,
    pub cancelled: Vec<&'a Meeting>,
}

impl<'a> Classification<'a> {
    pub fn get(&self, category: Category) -> &[&'a Meeting] {
        match category {
            Category::Pending => &self.pending,
            Category::Upcoming => &self.upcoming,
            Category::Ongoing => &self.ongoing,
            Category::Completed => &self.completed,
            Category::Cancelled => &self.cancelled,
        }
    }

    fn bucket_mut(&mut self, category: Category) -> &mut Vec<&'a Meeting> {
        match category {
            Category::Pending => &mut self.pending,
            Category::Upcoming => &mut self.upcoming,
            Category::Ongoing => &mut self.ongoing,
            Category::Completed => &mut self.completed,
            Category::Cancelled => &mut self.cancelled,
        }
    }

    pub fn counts(&self) -> CategoryCounts {
        CategoryCounts {
            pending: self.pending.len(),
            upcoming: self.upcoming.len(),
            ongoing: self.ongoing.len(),
            completed: self.completed.len(),
            cancelled: self.cancelled.len(),
        }
    }
}

/// Evaluate all five predicates for every meeting in the snapshot.
pub fn classify(meetings: &[Meeting], now: NaiveDateTime) -> Classification<'_> {
    let mut classification = Classification::default();

    for m in meetings {
        if let Some(conflict) = flag_conflict(m) {
            debug!(meeting = %m.id, %conflict, "inconsistent approval flags");
        }

        for category in Category::ALL {
            if category.matches(m, now) {
                classification.bucket_mut(category).push(m);
            }
        }
    }

    classification
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 20)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn approved_meeting() -> Meeting {
        Meeting::new("m1", "Intro")
            .with_times(at(10, 0), at(11, 0))
            .approved(true)
    }

    #[test]
    fn test_clean_meeting_moves_through_lifecycle() {
        let m = approved_meeting();

        assert_eq!(categories_of(&m, at(9, 0)), vec![Category::Upcoming]);
        assert_eq!(categories_of(&m, at(10, 0)), vec![Category::Ongoing]);
        assert_eq!(categories_of(&m, at(10, 30)), vec![Category::Ongoing]);
        assert_eq!(categories_of(&m, at(11, 0)), vec![Category::Ongoing]);
        assert_eq!(categories_of(&m, at(11, 1)), vec![Category::Completed]);
    }

    #[test]
    fn test_clean_meeting_is_never_in_two_time_tabs() {
        let m = approved_meeting();
        let mut now = at(8, 0);
        let mut last_rank = 0;

        while now <= at(13, 0) {
            let cats: Vec<_> = categories_of(&m, now)
                .into_iter()
                .filter(|c| *c != Category::Cancelled)
                .collect();
            assert!(cats.len() <= 1, "at {now}: {cats:?}");

            let rank = match cats.first() {
                Some(Category::Upcoming) => 1,
                Some(Category::Ongoing) => 2,
                Some(Category::Completed) => 3,
                other => panic!("unexpected category at {now}: {other:?}"),
            };
            assert!(rank >= last_rank, "went backwards at {now}");
            last_rank = rank;

            now += Duration::minutes(1);
        }
    }

    #[test]
    fn test_cancelled_dominates_every_other_predicate() {
        let variants = [
            approved_meeting(),
            approved_meeting().approved(false),
            approved_meeting().with_hint("pending"),
            approved_meeting().with_hint("upcoming"),
        ];

        for base in variants {
            for cancelled in [base.clone().cancelled(true), base.clone().with_status("cancelled")] {
                for now in [at(9, 0), at(10, 30), at(12, 0)] {
                    assert!(is_cancelled(&cancelled));
                    assert!(!is_pending(&cancelled));
                    assert!(!is_upcoming(&cancelled, now));
                    assert!(!is_ongoing(&cancelled, now));
                    assert!(!is_completed(&cancelled, now));
                    assert_eq!(primary_category(&cancelled, now), Some(Category::Cancelled));
                }
            }
        }
    }

    #[test]
    fn test_unapproved_meeting_is_pending() {
        let m = approved_meeting().approved(false);
        assert!(is_pending(&m));
        assert!(!is_upcoming(&m, at(9, 0)));
        assert!(!is_ongoing(&m, at(10, 30)));
        assert!(!is_completed(&m, at(12, 0)));
    }

    #[test]
    fn test_upcoming_hint_overrides_missing_approval() {
        let m = approved_meeting().approved(false).with_hint("upcoming");
        assert!(!is_pending(&m));
        assert!(is_upcoming(&m, at(9, 0)));
        assert!(is_ongoing(&m, at(10, 30)));
        assert!(is_completed(&m, at(12, 0)));
    }

    #[test]
    fn test_pending_hint_overrides_approval() {
        let m = approved_meeting().with_hint("pending");
        assert!(is_pending(&m));
        assert!(!is_upcoming(&m, at(9, 0)));
    }

    #[test]
    fn test_contradictory_flags_yield_two_tabs() {
        // Surfaced, not normalized: approved + "pending" hint during the meeting
        let m = approved_meeting().with_hint("pending");

        assert_eq!(flag_conflict(&m), Some(FlagConflict::ApprovedButHintPending));
        assert_eq!(
            categories_of(&m, at(10, 30)),
            vec![Category::Pending, Category::Ongoing]
        );
        assert_eq!(primary_category(&m, at(10, 30)), Some(Category::Ongoing));
    }

    #[test]
    fn test_flag_conflict_detection() {
        assert_eq!(flag_conflict(&approved_meeting()), None);
        assert_eq!(
            flag_conflict(&approved_meeting().approved(false).with_hint("upcoming")),
            Some(FlagConflict::UnapprovedButHintUpcoming)
        );
        assert_eq!(flag_conflict(&approved_meeting().approved(false)), None);
    }

    #[test]
    fn test_missing_end_never_ongoing_or_completed() {
        let m = approved_meeting().with_end(None);
        let mut now = at(0, 0);

        while now < at(23, 59) {
            assert!(!is_ongoing(&m, now));
            assert!(!is_completed(&m, now));
            now += Duration::minutes(7);
        }

        // Still reachable through the predicates that don't need an end
        assert!(is_upcoming(&m, at(9, 0)));
    }

    #[test]
    fn test_inverted_meeting_never_ongoing_or_completed() {
        let m = approved_meeting().with_times(at(11, 0), at(10, 0));
        let mut now = at(0, 0);

        while now < at(23, 59) {
            assert!(!is_ongoing(&m, now), "ongoing at {now}");
            assert!(!is_completed(&m, now), "completed at {now}");
            now += Duration::minutes(5);
        }

        assert_eq!(categories_of(&m, at(10, 30)), vec![Category::Upcoming]);
        assert!(categories_of(&m, at(12, 0)).is_empty());
    }

    #[test]
    fn test_missing_start_blocks_upcoming_and_ongoing_only() {
        let m = approved_meeting().with_start(None);
        assert!(!is_upcoming(&m, at(9, 0)));
        assert!(!is_ongoing(&m, at(10, 30)));
        assert!(is_completed(&m, at(12, 0)));

        let unapproved = m.approved(false);
        assert!(is_pending(&unapproved));
    }

    #[test]
    fn test_primary_category_precedence() {
        let m = approved_meeting().approved(false);
        assert_eq!(primary_category(&m, at(9, 0)), Some(Category::Pending));

        let declined = approved_meeting().approved(false).with_hint("declined");
        assert_eq!(primary_category(&declined, at(9, 0)), Some(Category::Pending));

        // Approved, "pending" hint, already over: completed outranks pending
        let stale = approved_meeting().with_hint("pending");
        assert_eq!(primary_category(&stale, at(12, 0)), Some(Category::Completed));
    }

    #[test]
    fn test_classify_counts() {
        let meetings = vec![
            approved_meeting(),
            Meeting::new("m2", "Pitch").with_times(at(9, 0), at(9, 30)),
            Meeting::new("m3", "Demo")
                .with_times(at(8, 0), at(8, 30))
                .approved(true),
            Meeting::new("m4", "Lunch")
                .with_times(at(12, 0), at(13, 0))
                .approved(true)
                .cancelled(true),
        ];

        let classification = classify(&meetings, at(9, 15));
        let counts = classification.counts();

        assert_eq!(
            counts,
            CategoryCounts {
                pending: 1,
                upcoming: 1,
                ongoing: 0,
                completed: 1,
                cancelled: 1,
            }
        );
        assert_eq!(classification.get(Category::Upcoming)[0].id, "m1");
        assert_eq!(classification.get(Category::Pending)[0].id, "m2");
        assert_eq!(classification.get(Category::Completed)[0].id, "m3");
        assert_eq!(counts.get(Category::Cancelled), 1);
    }

    #[test]
    fn test_classify_empty_snapshot() {
        let classification = classify(&[], at(9, 0));
        assert_eq!(classification.counts(), CategoryCounts::default());
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("Ongoing".parse::<Category>(), Ok(Category::Ongoing));
        assert!("archived".parse::<Category>().is_err());
    }
}
