//! Viewer-relative meeting snapshot types.
//!
//! A `Meeting` is built fresh on every data refresh and never mutated by
//! this crate. Only `id` is stable across refreshes.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One meeting as seen by the current viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: String,
    pub title: String,

    /// `None` when the source time could not be parsed.
    pub start_at: Option<NaiveDateTime>,
    /// `None` when the source time could not be parsed.
    pub end_at: Option<NaiveDateTime>,

    /// At least one invited attendee has confirmed.
    pub is_approved: bool,
    pub is_cancelled: bool,

    /// Remote status string, e.g. "pending", "scheduled", "cancelled"
    #[serde(default)]
    pub status: String,
    /// Lower-cased override signal ("pending", "upcoming", or anything else).
    /// May disagree with `is_approved`.
    #[serde(default)]
    pub approval_status_hint: String,

    /// The current viewer created this meeting.
    #[serde(default)]
    pub is_initiator: bool,
}

impl Meeting {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Meeting {
            id: id.into(),
            title: title.into(),
            start_at: None,
            end_at: None,
            is_approved: false,
            is_cancelled: false,
            status: String::new(),
            approval_status_hint: String::new(),
            is_initiator: false,
        }
    }

    pub fn with_times(mut self, start_at: NaiveDateTime, end_at: NaiveDateTime) -> Self {
        self.start_at = Some(start_at);
        self.end_at = Some(end_at);
        self
    }

    pub fn with_start(mut self, start_at: Option<NaiveDateTime>) -> Self {
        self.start_at = start_at;
        self
    }

    pub fn with_end(mut self, end_at: Option<NaiveDateTime>) -> Self {
        self.end_at = end_at;
        self
    }

    pub fn approved(mut self, is_approved: bool) -> Self {
        self.is_approved = is_approved;
        self
    }

    pub fn cancelled(mut self, is_cancelled: bool) -> Self {
        self.is_cancelled = is_cancelled;
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.approval_status_hint = hint.into().to_lowercase();
        self
    }

    /// Calendar day the meeting starts on.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_at.map(|dt| dt.date())
    }

    /// Whether the override hint equals `value` (trimmed, ASCII case-insensitive).
    pub(crate) fn hint_is(&self, value: &str) -> bool {
        self.approval_status_hint.trim().eq_ignore_ascii_case(value)
    }

    pub(crate) fn status_is(&self, value: &str) -> bool {
        self.status.trim().eq_ignore_ascii_case(value)
    }
}
