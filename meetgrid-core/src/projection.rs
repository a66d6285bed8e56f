//! Ingestion of provider records into viewer-relative meetings.
//!
//! Providers deliver one `RawMeeting` per meeting regardless of who is
//! looking at it. `project_for_viewer` applies the per-viewer parts once,
//! at ingestion, so the classifier only ever sees a `Meeting`.

use serde::{Deserialize, Serialize};

use crate::meeting::Meeting;
use crate::time::{parse_date_time, parse_instant};

const CONFIRMED_RESPONSES: [&str; 3] = ["accepted", "approved", "confirmed"];
const AWAITING_RESPONSES: [&str; 4] = ["pending", "needsaction", "needs_action", "invited"];

/// A meeting record as delivered by the snapshot provider.
///
/// Times may be combined (`start`/`end`) or split across `date`,
/// `start_time` and `end_time`. Combined fields win when they parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMeeting {
    pub id: String,
    pub event_id: String,
    #[serde(default)]
    pub title: String,
    pub creator_id: String,

    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,

    #[serde(default)]
    pub status: Option<String>,
    /// Meeting-level approval string, used as the hint for viewers who are not invitees.
    #[serde(default)]
    pub approval_status: Option<String>,
    #[serde(default)]
    pub is_cancelled: bool,

    #[serde(default)]
    pub attendees: Vec<RawAttendee>,
}

/// An invited participant and their response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAttendee {
    pub user_id: String,
    /// Response status: "accepted", "declined", "pending", ...
    #[serde(default)]
    pub response: String,
}

impl RawAttendee {
    fn is_confirmed(&self) -> bool {
        response_in(&self.response, &CONFIRMED_RESPONSES)
    }
}

fn response_in(response: &str, set: &[&str]) -> bool {
    let response = response.trim();
    set.iter().any(|s| response.eq_ignore_ascii_case(s))
}

/// Project a provider record onto the current viewer.
pub fn project_for_viewer(raw: &RawMeeting, viewer_id: &str) -> Meeting {
    let is_initiator = raw.creator_id == viewer_id;

    let is_approved = raw
        .attendees
        .iter()
        .filter(|a| a.user_id != raw.creator_id)
        .any(RawAttendee::is_confirmed);

    let own_response = raw
        .attendees
        .iter()
        .find(|a| !is_initiator && a.user_id == viewer_id);

    let approval_status_hint = match own_response {
        Some(a) if a.is_confirmed() => "upcoming".to_string(),
        Some(a) if a.response.trim().is_empty() || response_in(&a.response, &AWAITING_RESPONSES) => {
            "pending".to_string()
        }
        Some(a) => a.response.trim().to_lowercase(),
        None => raw
            .approval_status
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_lowercase(),
    };

    Meeting {
        id: raw.id.clone(),
        title: raw.title.clone(),
        start_at: resolve_time(raw.start.as_deref(), raw.date.as_deref(), raw.start_time.as_deref()),
        end_at: resolve_time(raw.end.as_deref(), raw.date.as_deref(), raw.end_time.as_deref()),
        is_approved,
        is_cancelled: raw.is_cancelled,
        status: raw.status.clone().unwrap_or_default(),
        approval_status_hint,
        is_initiator,
    }
}

fn resolve_time(
    combined: Option<&str>,
    date: Option<&str>,
    time: Option<&str>,
) -> Option<chrono::NaiveDateTime> {
    combined.and_then(parse_instant).or_else(|| match (date, time) {
        (Some(d), Some(t)) => parse_date_time(d, t),
        _ => None,
    })
}
