use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::domain::SearchResult;
use crate::search::SearchAggregator;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// What the Explore screen renders.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub is_loading: bool,
    /// Latest issued generation. Each `set_query` bumps it.
    pub latest: u64,
    /// Generation whose results are currently shown.
    pub applied: u64,
}

/// Debounced, last-query-wins search over an aggregator.
///
/// Every query gets a generation number. Work started for an older
/// generation keeps running but its results are dropped.
#[derive(Clone)]
pub struct SearchSession {
    aggregator: Arc<SearchAggregator>,
    debounce: Duration,
    state: Arc<Mutex<SearchState>>,
}

impl SearchSession {
    pub fn new(aggregator: Arc<SearchAggregator>) -> Self {
        Self::with_debounce(aggregator, DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(aggregator: Arc<SearchAggregator>, debounce: Duration) -> Self {
        Self {
            aggregator,
            debounce,
            state: Arc::new(Mutex::new(SearchState::default())),
        }
    }

    /// Record a new query. Blank queries clear results at once; anything
    /// else runs after the debounce window unless superseded.
    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        let generation = {
            let mut state = lock(&self.state);
            state.latest += 1;
            state.query = query.clone();
            if query.trim().is_empty() {
                state.results.clear();
                state.is_loading = false;
                state.applied = state.latest;
                return;
            }
            state.latest
        };

        let aggregator = self.aggregator.clone();
        let state = self.state.clone();
        let debounce = self.debounce;

        tokio::spawn(async move {
            tokio::time::sleep(debounce).await;

            {
                let mut state = lock(&state);
                if state.latest != generation {
                    return;
                }
                state.is_loading = true;
            }

            let query = query.trim();
            tracing::debug!("Searching for {:?} (generation {})", query, generation);
            let results = aggregator.search(query).await;

            let mut state = lock(&state);
            if state.latest != generation {
                tracing::debug!("Discarding stale results for generation {}", generation);
                return;
            }
            state.results = results;
            state.is_loading = false;
            state.applied = generation;
        });
    }

    pub fn snapshot(&self) -> SearchState {
        lock(&self.state).clone()
    }
}

fn lock(state: &Mutex<SearchState>) -> MutexGuard<'_, SearchState> {
    // State stays consistent across a panic in a holder; keep going.
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;

    use async_trait::async_trait;

    use super::*;
    use crate::app::Result;
    use crate::domain::SourceTag;
    use crate::search::SearchSource;

    /// Echoes the query back; queries starting with "slow" take a second.
    #[derive(Default)]
    struct EchoSource {
        queries: StdMutex<Vec<String>>,
    }

    #[async_trait]
    impl SearchSource for EchoSource {
        fn name(&self) -> &str {
            "echo"
        }

        async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
            self.queries.lock().unwrap().push(query.to_string());
            if query.starts_with("slow") {
                tokio::time::sleep(Duration::from_millis(1_000)).await;
            }
            Ok(vec![SearchResult::new(query, query, SourceTag::Other, "echo")])
        }
    }

    fn session() -> (SearchSession, Arc<EchoSource>) {
        let source = Arc::new(EchoSource::default());
        let aggregator = Arc::new(SearchAggregator::new(vec![source.clone()]));
        (SearchSession::new(aggregator), source)
    }

    async fn wait(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_within_window_runs_once_with_final_query() {
        let (session, source) = session();

        session.set_query("c");
        wait(100).await;
        session.set_query("ca");
        wait(100).await;
        session.set_query("cat");
        wait(1_000).await;

        assert_eq!(*source.queries.lock().unwrap(), vec!["cat".to_string()]);
        let state = session.snapshot();
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.results[0].title, "cat");
        assert!(!state.is_loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_query_clears_without_request() {
        let (session, source) = session();

        session.set_query("cat");
        wait(1_000).await;
        assert_eq!(session.snapshot().results.len(), 1);

        session.set_query("   ");
        let state = session.snapshot();
        assert!(state.results.is_empty());
        assert!(!state.is_loading);

        wait(1_000).await;
        assert_eq!(source.queries.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_results_from_older_query_are_discarded() {
        let (session, source) = session();

        session.set_query("slow cat");
        wait(400).await;
        assert!(session.snapshot().is_loading);

        session.set_query("dog");
        wait(2_000).await;

        assert_eq!(source.queries.lock().unwrap().len(), 2);
        let state = session.snapshot();
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.results[0].title, "dog");
        assert_eq!(state.applied, state.latest);
        assert!(!state.is_loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_until_sources_settle() {
        let (session, _) = session();

        session.set_query("slow search");
        assert!(!session.snapshot().is_loading);
        wait(350).await;
        assert!(session.snapshot().is_loading);
        wait(1_000).await;
        assert!(!session.snapshot().is_loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_query_supersedes_in_flight_search() {
        let (session, _) = session();

        session.set_query("slow cat");
        wait(400).await;
        session.set_query("");
        wait(2_000).await;

        let state = session.snapshot();
        assert!(state.results.is_empty());
        assert!(!state.is_loading);
    }
}
