//! Debounced, supersedable loads against a remote catalogue

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::slot::LoadedEntry;
use crate::catalog::RemoteCatalog;
use crate::error::CatalogError;

/// How a load request resolved
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The record, normalized and projected into every slot
    Success(LoadedEntry),
    Failure(CatalogError),
    /// Superseded by a newer request or cancelled outright
    Cancelled,
}

impl LoadOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, LoadOutcome::Cancelled)
    }
}

/// Caller's side of one load request
pub struct LoadHandle {
    key: u32,
    generation: u64,
    fetch_started: Option<oneshot::Receiver<()>>,
    outcome: oneshot::Receiver<LoadOutcome>,
}

impl LoadHandle {
    pub fn key(&self) -> u32 {
        self.key
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Wait until the debounce window elapses and the lookup is issued.
    ///
    /// Returns `false` if the request ended before reaching the network, or
    /// if this was already awaited once.
    pub async fn fetch_started(&mut self) -> bool {
        match self.fetch_started.take() {
            Some(started) => started.await.is_ok(),
            None => false,
        }
    }

    /// Wait for the request to resolve
    pub async fn outcome(self) -> LoadOutcome {
        self.outcome.await.unwrap_or(LoadOutcome::Cancelled)
    }
}

/// The outstanding request, if any
struct InFlight {
    key: u32,
    generation: u64,
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl InFlight {
    /// Clear the debounce timer or drop the in-flight lookup
    fn cancel(self) {
        self.token.cancel();
        self.task.abort();
    }
}

/// Issues debounced lookups shared by every content slot.
///
/// One request fetches a record once; the slots are fed from its outcome.
/// Only the newest request can resolve with content. A request arriving
/// while an older one is still debouncing clears the older timer, so bursts
/// of navigation cost a single lookup. A request arriving while a lookup is
/// outstanding aborts it and its eventual result is dropped.
pub struct CancellableLoader {
    catalog: Arc<dyn RemoteCatalog>,
    runtime: Handle,
    generation: u64,
    in_flight: Option<InFlight>,
}

impl CancellableLoader {
    pub fn new(catalog: Arc<dyn RemoteCatalog>, runtime: Handle) -> Self {
        Self {
            catalog,
            runtime,
            generation: 0,
            in_flight: None,
        }
    }

    /// Start a request for `key`, superseding any outstanding one
    pub fn request(&mut self, key: u32, debounce: Duration) -> LoadHandle {
        if let Some(previous) = self.in_flight.take() {
            debug!(superseded = previous.key, key, "Superseding load");
            previous.cancel();
        }

        self.generation += 1;
        let generation = self.generation;
        let token = CancellationToken::new();
        let (fetch_tx, fetch_rx) = oneshot::channel();
        let (outcome_tx, outcome_rx) = oneshot::channel();

        let task = self.runtime.spawn(run_request(
            Arc::clone(&self.catalog),
            key,
            debounce,
            token.clone(),
            fetch_tx,
            outcome_tx,
        ));

        self.in_flight = Some(InFlight {
            key,
            generation,
            token,
            task,
        });

        LoadHandle {
            key,
            generation,
            fetch_started: Some(fetch_rx),
            outcome: outcome_rx,
        }
    }

    /// Cancel the outstanding request. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            debug!(key = in_flight.key, "Cancelling load");
            in_flight.cancel();
        }
    }

    /// Whether a debounce timer or lookup is still outstanding
    pub fn is_armed(&self) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|in_flight| !in_flight.task.is_finished())
    }

    /// Whether `generation` belongs to the newest, uncancelled request
    pub fn is_current(&self, generation: u64) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|in_flight| in_flight.generation == generation)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for CancellableLoader {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn run_request(
    catalog: Arc<dyn RemoteCatalog>,
    key: u32,
    debounce: Duration,
    token: CancellationToken,
    fetch_tx: oneshot::Sender<()>,
    outcome_tx: oneshot::Sender<LoadOutcome>,
) {
    let work = async move {
        tokio::time::sleep(debounce).await;
        let _ = fetch_tx.send(());
        debug!(key, source = catalog.source_name(), "Fetching");

        match catalog.lookup(key).await {
            Ok(record) => LoadOutcome::Success(LoadedEntry::from_record(&record)),
            Err(err) => LoadOutcome::Failure(err),
        }
    };

    let outcome = tokio::select! {
        biased;
        _ = token.cancelled() => LoadOutcome::Cancelled,
        outcome = work => outcome,
    };

    let _ = outcome_tx.send(outcome);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::slot::ContentSlot;
    use crate::content::test_support::ScriptedCatalog;

    const DEBOUNCE: Duration = Duration::from_millis(250);

    fn loader(catalog: &Arc<ScriptedCatalog>) -> CancellableLoader {
        let catalog: Arc<dyn RemoteCatalog> = catalog.clone();
        CancellableLoader::new(catalog, Handle::current())
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_issues_single_lookup() {
        let catalog = Arc::new(ScriptedCatalog::new(Duration::from_millis(100)));
        let mut loader = loader(&catalog);

        let first = loader.request(1025, DEBOUNCE);
        let second = loader.request(1, DEBOUNCE);
        let last = loader.request(2, DEBOUNCE);

        assert!(first.outcome().await.is_cancelled());
        assert!(second.outcome().await.is_cancelled());
        match last.outcome().await {
            LoadOutcome::Success(entry) => {
                assert_eq!(entry.key(), 2);
                let name = entry.content(ContentSlot::Name).unwrap();
                assert_eq!(name.display_text, "Ivysaur");
                let description = entry.content(ContentSlot::Description).unwrap();
                assert_eq!(description.display_text, "A strange seed was planted on its back at birth.");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(catalog.calls(), vec![2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_supersede_in_flight_lookup() {
        let catalog = Arc::new(
            ScriptedCatalog::new(Duration::from_millis(50))
                .with_latency(1, Duration::from_millis(1000)),
        );
        let mut loader = loader(&catalog);

        let mut slow = loader.request(1, DEBOUNCE);
        assert!(slow.fetch_started().await);
        assert_eq!(catalog.calls(), vec![1]);

        let fast = loader.request(3, DEBOUNCE);
        assert!(!loader.is_current(slow.generation()));
        assert!(loader.is_current(fast.generation()));

        assert!(slow.outcome().await.is_cancelled());
        match fast.outcome().await {
            LoadOutcome::Success(entry) => {
                assert_eq!(entry.content(ContentSlot::Name).unwrap().source_text, "venusaur");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_outcome() {
        let catalog = Arc::new(
            ScriptedCatalog::new(Duration::from_millis(10))
                .with_failure(7, CatalogError::Network("connection reset".into())),
        );
        let mut loader = loader(&catalog);

        let outcome = loader.request(7, DEBOUNCE).outcome().await;
        assert_eq!(
            outcome,
            LoadOutcome::Failure(CatalogError::Network("connection reset".into()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_clears_timer() {
        let catalog = Arc::new(ScriptedCatalog::new(Duration::from_millis(10)));
        let mut loader = loader(&catalog);

        let mut handle = loader.request(4, DEBOUNCE);
        assert!(loader.is_armed());

        loader.cancel();
        loader.cancel();
        assert!(!loader.is_armed());
        assert!(!handle.fetch_started().await);
        assert!(handle.outcome().await.is_cancelled());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(catalog.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_generation_is_monotonic() {
        let catalog = Arc::new(ScriptedCatalog::new(Duration::from_millis(10)));
        let mut loader = loader(&catalog);

        let a = loader.request(1, DEBOUNCE).generation();
        let b = loader.request(2, DEBOUNCE).generation();
        loader.cancel();
        let c = loader.request(3, DEBOUNCE).generation();
        assert!(a < b && b < c);
        assert_eq!(loader.generation(), c);
    }
}
