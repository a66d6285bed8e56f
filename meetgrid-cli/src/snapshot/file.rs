//! Snapshot provider backed by a JSON file of raw meeting records.

use std::path::PathBuf;

use meetgrid_core::{project_for_viewer, Meeting, MeetgridError, MeetgridResult, RawMeeting};
use tracing::debug;

use super::SnapshotProvider;

/// Reads a JSON array of `RawMeeting` on every fetch.
#[derive(Debug, Clone)]
pub struct FileSnapshotProvider {
    path: PathBuf,
}

impl FileSnapshotProvider {
    pub fn new(path: PathBuf) -> Self {
        FileSnapshotProvider { path }
    }
}

impl SnapshotProvider for FileSnapshotProvider {
    fn fetch_meetings(&mut self, event_id: &str, viewer_id: &str) -> MeetgridResult<Vec<Meeting>> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            MeetgridError::Snapshot(format!("Could not read {}: {e}", self.path.display()))
        })?;

        let records: Vec<RawMeeting> = serde_json::from_str(&content)?;
        let total = records.len();

        let meetings: Vec<Meeting> = records
            .iter()
            .filter(|r| r.event_id == event_id)
            .map(|r| project_for_viewer(r, viewer_id))
            .collect();

        debug!(
            path = %self.path.display(),
            total,
            matched = meetings.len(),
            event_id,
            "loaded snapshot"
        );

        Ok(meetings)
    }
}
