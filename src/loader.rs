//! Cache-or-fetch loading of the news snapshot
//!
//! Runs once per start-up. A snapshot stored less than an hour ago is served
//! straight from the store; otherwise the backend is asked once. A successful
//! fetch overwrites the stored copy, a failed one leaves it untouched and
//! resolves to `LoadState::Failed` (stale data is never shown as a fallback).

use chrono::{DateTime, Duration, Utc};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::cache::KeyValueStore;
use crate::data::{FetchedNews, NewsSnapshot, NewsSource};

/// Store key holding the snapshot JSON
pub const NEWS_DATA_KEY: &str = "newsData";

/// Store key holding the fetch time in milliseconds since the Unix epoch
pub const NEWS_TIMESTAMP_KEY: &str = "newsTimestamp";

/// How long a stored snapshot is served without asking the backend (1 hour)
pub const CACHE_TTL_MS: i64 = 3_600_000;

/// Resolution of a load, driving what the screen shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Load has not finished yet
    Loading,
    /// A snapshot is available
    Ready(NewsSnapshot),
    /// The fetch failed; carries a human-readable reason
    Failed(String),
}

impl LoadState {
    /// The resolved snapshot, if any
    pub fn snapshot(&self) -> Option<&NewsSnapshot> {
        match self {
            LoadState::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// Loads the news snapshot from the store or the backend
pub struct NewsLoader<S, F> {
    store: S,
    source: F,
    ttl: Duration,
    clock: fn() -> DateTime<Utc>,
}

impl<S: KeyValueStore, F: NewsSource> NewsLoader<S, F> {
    /// Creates a loader with the default one-hour freshness window
    pub fn new(store: S, source: F) -> Self {
        Self {
            store,
            source,
            ttl: Duration::milliseconds(CACHE_TTL_MS),
            clock: Utc::now,
        }
    }

    /// Overrides the freshness window
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Overrides the wall clock used for freshness checks and timestamps
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn source(&self) -> &F {
        &self.source
    }

    /// Resolves the snapshot to display
    ///
    /// Never returns `LoadState::Loading`.
    pub async fn load(&self) -> LoadState {
        let now = (self.clock)();

        if let Some(snapshot) = self.read_fresh_cache(now) {
            info!("serving cached news");
            return LoadState::Ready(snapshot);
        }

        match self.source.fetch_news().await {
            Ok(fetched) => {
                self.write_cache(&fetched);
                info!(headlines = fetched.snapshot.news_links.len(), "fetched news");
                LoadState::Ready(fetched.snapshot)
            }
            Err(e) => {
                error!(error = %e, "error fetching news");
                LoadState::Failed(e.to_string())
            }
        }
    }

    /// Returns the stored snapshot when it exists and is younger than the TTL
    ///
    /// Anything unreadable is a cache miss.
    fn read_fresh_cache(&self, now: DateTime<Utc>) -> Option<NewsSnapshot> {
        let data = self.read_key(NEWS_DATA_KEY)?;
        let raw_timestamp = self.read_key(NEWS_TIMESTAMP_KEY)?;

        let timestamp: i64 = match raw_timestamp.trim().parse() {
            Ok(ts) => ts,
            Err(e) => {
                warn!(value = %raw_timestamp, error = %e, "ignoring unparseable cache timestamp");
                return None;
            }
        };

        let Some(age_ms) = now.timestamp_millis().checked_sub(timestamp) else {
            warn!(timestamp, "ignoring out-of-range cache timestamp");
            return None;
        };
        if age_ms >= self.ttl.num_milliseconds() {
            debug!(age_ms, "cached news is stale");
            return None;
        }

        match NewsSnapshot::from_json(&data) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(error = %e, "ignoring malformed cached news");
                None
            }
        }
    }

    fn read_key(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "failed to read news cache");
                None
            }
        }
    }

    fn write_cache(&self, fetched: &FetchedNews) {
        let timestamp = (self.clock)().timestamp_millis().to_string();

        let result = self
            .store
            .set(NEWS_DATA_KEY, &fetched.body)
            .and_then(|()| self.store.set(NEWS_TIMESTAMP_KEY, &timestamp));
        if let Err(e) = result {
            warn!(error = %e, "failed to write news cache");
        }
    }
}

/// Runs `loader` in a background task, delivering its result on the channel
///
/// Aborting the returned handle cancels an in-flight fetch; the store is only
/// written once a fetch has completed.
pub fn spawn_load<S, F>(loader: NewsLoader<S, F>) -> (JoinHandle<()>, mpsc::Receiver<LoadState>)
where
    S: KeyValueStore + 'static,
    F: NewsSource + 'static,
{
    let (tx, rx) = mpsc::channel(1);
    let handle = tokio::spawn(async move {
        let state = loader.load().await;
        let _ = tx.send(state).await;
    });
    (handle, rx)
}
