//! Snapshot providers: where meeting lists come from.
//!
//! The core never fetches or caches anything. These types sit on the
//! data-fetch side and hand it an already-projected `Vec<Meeting>`.

mod cache;
mod file;

pub use cache::{CachedProvider, TtlSnapshotCache};
pub use file::FileSnapshotProvider;

use meetgrid_core::{Meeting, MeetgridResult};

/// Cache key: snapshots are per viewer and per event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SnapshotKey {
    pub viewer_id: String,
    pub event_id: String,
}

impl SnapshotKey {
    pub fn new(viewer_id: &str, event_id: &str) -> Self {
        SnapshotKey {
            viewer_id: viewer_id.to_string(),
            event_id: event_id.to_string(),
        }
    }
}

pub trait SnapshotProvider {
    /// One projected meeting per record for `event_id`, as seen by `viewer_id`.
    fn fetch_meetings(&mut self, event_id: &str, viewer_id: &str) -> MeetgridResult<Vec<Meeting>>;
}
