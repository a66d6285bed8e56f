//! Time-limited reuse of fetched snapshots.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use meetgrid_core::{Meeting, MeetgridResult};
use tracing::debug;

use super::{SnapshotKey, SnapshotProvider};

/// Storage for fetched snapshots. Expiry is decided by the writer.
pub trait SnapshotCache {
    fn get(&self, key: &SnapshotKey) -> Option<Vec<Meeting>>;
    fn put(&mut self, key: SnapshotKey, snapshot: Vec<Meeting>, expires_at: Instant);
}

/// In-memory cache; expired entries are treated as absent.
#[derive(Debug, Default)]
pub struct TtlSnapshotCache {
    entries: HashMap<SnapshotKey, (Vec<Meeting>, Instant)>,
}

impl TtlSnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotCache for TtlSnapshotCache {
    fn get(&self, key: &SnapshotKey) -> Option<Vec<Meeting>> {
        let (snapshot, expires_at) = self.entries.get(key)?;
        (Instant::now() < *expires_at).then(|| snapshot.clone())
    }

    fn put(&mut self, key: SnapshotKey, snapshot: Vec<Meeting>, expires_at: Instant) {
        self.entries.insert(key, (snapshot, expires_at));
    }
}

/// Wraps a provider so repeated fetches within `ttl` reuse the last snapshot.
pub struct CachedProvider<P, C> {
    inner: P,
    cache: C,
    ttl: Duration,
}

impl<P, C> CachedProvider<P, C> {
    pub fn new(inner: P, cache: C, ttl: Duration) -> Self {
        CachedProvider { inner, cache, ttl }
    }
}

impl<P: SnapshotProvider, C: SnapshotCache> SnapshotProvider for CachedProvider<P, C> {
    fn fetch_meetings(&mut self, event_id: &str, viewer_id: &str) -> MeetgridResult<Vec<Meeting>> {
        let key = SnapshotKey::new(viewer_id, event_id);

        if let Some(snapshot) = self.cache.get(&key) {
            debug!(event_id, viewer_id, "snapshot cache hit");
            return Ok(snapshot);
        }

        let snapshot = self.inner.fetch_meetings(event_id, viewer_id)?;
        self.cache.put(key, snapshot.clone(), Instant::now() + self.ttl);
        Ok(snapshot)
    }
}
