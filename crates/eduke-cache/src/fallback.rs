//! Cache-then-revalidate view state.
//!
//! Each view keeps a [`ViewState`]. Starting a fetch enters `Loading` while
//! keeping the data on screen. A successful fetch persists its payload and
//! goes `Live`. A failed fetch goes `Offline` and shows the last snapshot
//! stored for the same key, if there is one.
//!
//! Fetches are tagged with a generation. Only the most recently started
//! fetch of a view may update it; earlier ones that resolve late are dropped.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fmt::Display;
use std::future::Future;
use tracing::{debug, warn};

use crate::snapshot::SnapshotCache;
use crate::store::SnapshotStore;

/// Where a view's data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Freshness {
    /// A fetch is in flight; any data shown is from before it started.
    #[default]
    Loading,
    /// The last fetch succeeded.
    Live,
    /// The last fetch failed; data is the stored snapshot, if any.
    Offline,
}

/// Result of one fetch after fallback has been applied.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Live(T),
    Offline(Option<T>),
}

impl<T> FetchOutcome<T> {
    pub fn is_live(&self) -> bool {
        matches!(self, FetchOutcome::Live(_))
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            FetchOutcome::Live(data) => Some(data),
            FetchOutcome::Offline(data) => data,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchOutcome<U> {
        match self {
            FetchOutcome::Live(data) => FetchOutcome::Live(f(data)),
            FetchOutcome::Offline(data) => FetchOutcome::Offline(data.map(f)),
        }
    }
}

/// Proof that a fetch was started, carrying its generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a ticket must be passed back to `resolve`"]
pub struct Ticket {
    generation: u64,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Data and freshness of one view.
#[derive(Debug, Clone)]
pub struct ViewState<T> {
    freshness: Freshness,
    data: Option<T>,
    generation: u64,
    resolved: bool,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            freshness: Freshness::Loading,
            data: None,
            generation: 0,
            resolved: false,
        }
    }
}

impl<T> ViewState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show previously stored data until the first fetch resolves.
    ///
    /// Leaves the generation alone so fetches already in flight still apply.
    /// Returns `false`, changing nothing, once any fetch has resolved.
    pub fn hydrate(&mut self, data: Option<T>) -> bool {
        if self.resolved {
            return false;
        }
        if data.is_some() {
            self.data = data;
        }
        true
    }

    /// Start a fetch: enter `Loading`, keep current data.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.freshness = Freshness::Loading;
        Ticket {
            generation: self.generation,
        }
    }

    /// Whether `ticket` belongs to the most recently started fetch.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.generation == self.generation
    }

    /// Apply a finished fetch. Returns `false`, leaving the state untouched,
    /// when a newer fetch has been started since `ticket` was issued.
    pub fn resolve(&mut self, ticket: Ticket, outcome: FetchOutcome<T>) -> bool {
        if !self.is_current(ticket) {
            debug!(
                stale_generation = ticket.generation,
                current_generation = self.generation,
                "Discarding superseded fetch result"
            );
            return false;
        }

        match outcome {
            FetchOutcome::Live(data) => {
                self.data = Some(data);
                self.freshness = Freshness::Live;
            }
            FetchOutcome::Offline(snapshot) => {
                self.data = snapshot;
                self.freshness = Freshness::Offline;
            }
        }
        self.resolved = true;
        true
    }

    pub fn freshness(&self) -> Freshness {
        self.freshness
    }

    pub fn is_loading(&self) -> bool {
        self.freshness == Freshness::Loading
    }

    pub fn is_offline(&self) -> bool {
        self.freshness == Freshness::Offline
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Local edits to displayed data, e.g. removing a deleted row.
    pub fn data_mut(&mut self) -> Option<&mut T> {
        self.data.as_mut()
    }
}

/// Await `fetch`; persist its payload on success, fall back to the stored
/// snapshot for `key` on failure.
///
/// The fetch error is logged and swallowed. A failure to persist a fresh
/// payload is logged too; the payload is still returned as live data.
pub async fn fetch_with_fallback<S, T, E, F>(
    cache: &SnapshotCache<S>,
    key: &str,
    fetch: F,
) -> FetchOutcome<T>
where
    S: SnapshotStore,
    T: Serialize + DeserializeOwned,
    E: Display,
    F: Future<Output = Result<T, E>>,
{
    match fetch.await {
        Ok(payload) => {
            persist(cache, key, &payload).await;
            FetchOutcome::Live(payload)
        }
        Err(e) => {
            warn!(cache.key = %key, error = %e, "Fetch failed, falling back to snapshot");
            FetchOutcome::Offline(cache.get(key).await)
        }
    }
}

/// Store a fresh payload, logging instead of failing.
pub async fn persist<S, T>(cache: &SnapshotCache<S>, key: &str, payload: &T)
where
    S: SnapshotStore,
    T: Serialize + ?Sized,
{
    if let Err(e) = cache.put(key, payload).await {
        warn!(cache.key = %key, error = %e, "Failed to store snapshot");
    }
}
