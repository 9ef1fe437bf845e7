//! Single-flight, time-bounded cache in front of another source
//!
//! Concurrent fetches queue behind one async lock: the first caller performs
//! the upstream fetch and the rest reuse its snapshot. Failures are never
//! stored, so the next caller retries upstream.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use super::traits::PlaylistSource;
use crate::errors::SourceResult;
use crate::models::{RawPlaylist, SourceKind};

struct Snapshot {
    fetched_at: Instant,
    playlist: RawPlaylist,
}

pub struct CachedPlaylistSource {
    inner: Arc<dyn PlaylistSource>,
    ttl: Duration,
    slot: Mutex<Option<Snapshot>>,
}

impl CachedPlaylistSource {
    pub fn new(inner: Arc<dyn PlaylistSource>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// Drop the current snapshot so the next fetch goes upstream
    pub async fn invalidate(&self) {
        self.slot.lock().await.take();
    }
}

#[async_trait]
impl PlaylistSource for CachedPlaylistSource {
    fn kind(&self) -> SourceKind {
        self.inner.kind()
    }

    fn describe(&self) -> String {
        format!(
            "{} (cached {})",
            self.inner.describe(),
            humantime::format_duration(self.ttl)
        )
    }

    async fn fetch(&self) -> SourceResult<RawPlaylist> {
        let mut slot = self.slot.lock().await;

        if let Some(snapshot) = slot.as_ref()
            && snapshot.fetched_at.elapsed() < self.ttl
        {
            debug!("Serving cached playlist from {}", snapshot.playlist.origin);
            return Ok(snapshot.playlist.clone());
        }

        let playlist = self.inner.fetch().await?;
        *slot = Some(Snapshot {
            fetched_at: Instant::now(),
            playlist: playlist.clone(),
        });
        Ok(playlist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SourceError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingSource {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail,
            })
        }
    }

    #[async_trait]
    impl PlaylistSource for CountingSource {
        fn kind(&self) -> SourceKind {
            SourceKind::Http
        }

        fn describe(&self) -> String {
            "counting".to_string()
        }

        async fn fetch(&self) -> SourceResult<RawPlaylist> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            tokio::time::sleep(Duration::from_millis(20)).await;
            if self.fail {
                return Err(SourceError::Timeout {
                    url: "counting".to_string(),
                });
            }
            Ok(RawPlaylist::new(
                SourceKind::Http,
                "counting",
                format!("#EXTM3U\n# call {call}\n"),
            ))
        }
    }

    #[tokio::test]
    async fn test_concurrent_fetches_coalesce() {
        let inner = CountingSource::new(false);
        let cached = CachedPlaylistSource::new(inner.clone(), Duration::from_secs(60));

        let (a, b, c) = tokio::join!(cached.fetch(), cached.fetch(), cached.fetch());

        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
        assert_eq!(a.unwrap().content, b.unwrap().content);
        assert!(c.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_snapshot_expires() {
        let inner = CountingSource::new(false);
        let cached = CachedPlaylistSource::new(inner.clone(), Duration::from_secs(5));

        cached.fetch().await.unwrap();
        cached.fetch().await.unwrap();
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(6)).await;
        let refreshed = cached.fetch().await.unwrap();
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
        assert!(refreshed.content.contains("call 2"));
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let inner = CountingSource::new(true);
        let cached = CachedPlaylistSource::new(inner.clone(), Duration::from_secs(60));

        assert!(cached.fetch().await.is_err());
        assert!(cached.fetch().await.is_err());
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let inner = CountingSource::new(false);
        let cached = CachedPlaylistSource::new(inner.clone(), Duration::from_secs(60));

        cached.fetch().await.unwrap();
        cached.invalidate().await;
        cached.fetch().await.unwrap();
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }
}
