//! Search pipeline with last-query-wins result application.
//!
//! Every submission bumps a generation counter kept in the observed state.
//! The fetch spawned for a submission applies its outcome only if that
//! generation is still current, so a slow response for an older query can
//! never overwrite a newer one. The previous in-flight task is also aborted.

use std::sync::Arc;

use lustre_commerce::catalog::{map_products, ProductView};
use lustre_commerce::search::ProductQuery;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::failure::FetchFailure;
use crate::source::ProductSource;

/// What the search page renders.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchView {
    /// No query; offer suggestions.
    Prompt { suggestions: Vec<String> },
    Loading,
    Results(Vec<ProductView>),
    /// The query matched nothing; offer suggestions.
    NoResults { suggestions: Vec<String> },
    Failed(FetchFailure),
}

/// Observed search state.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    /// Trimmed text of the current query.
    pub query: String,
    /// Submission counter; increases on every `submit`.
    pub generation: u64,
    pub view: SearchView,
}

impl SearchState {
    fn initial(suggestions: &[String]) -> Self {
        Self {
            query: String::new(),
            generation: 0,
            view: SearchView::Prompt {
                suggestions: suggestions.to_vec(),
            },
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.view, SearchView::Loading)
    }

    /// Apply the outcome of submission `generation`. Returns `false` and
    /// leaves the state untouched when a newer submission has been made.
    fn apply(&mut self, generation: u64, view: SearchView) -> bool {
        if self.generation != generation {
            tracing::debug!(
                stale = generation,
                current = self.generation,
                "discarding stale search result"
            );
            return false;
        }
        self.view = view;
        true
    }
}

pub struct SearchPipeline<S> {
    source: Arc<S>,
    state: Arc<watch::Sender<SearchState>>,
    suggestions: Arc<[String]>,
    limit: Option<u32>,
    in_flight: Option<JoinHandle<()>>,
}

impl<S> Drop for SearchPipeline<S> {
    fn drop(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }
}

impl<S: ProductSource + 'static> SearchPipeline<S> {
    pub fn new(source: Arc<S>, suggestions: Vec<String>) -> Self {
        let (state, _) = watch::channel(SearchState::initial(&suggestions));
        Self {
            source,
            state: Arc::new(state),
            suggestions: suggestions.into(),
            limit: None,
            in_flight: None,
        }
    }

    /// Cap the number of results requested per search.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Submit a query and return its generation.
    ///
    /// Blank text shows the prompt without fetching. Anything else shows
    /// `Loading` and spawns a fetch on the current tokio runtime.
    pub fn submit(&mut self, query: &str) -> u64 {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }

        let text = query.trim().to_string();
        let suggestions = self.suggestions.to_vec();
        let mut generation = 0;
        self.state.send_modify(|state| {
            state.generation += 1;
            generation = state.generation;
            state.query = text.clone();
            state.view = if text.is_empty() {
                SearchView::Prompt {
                    suggestions: suggestions.clone(),
                }
            } else {
                SearchView::Loading
            };
        });

        if text.is_empty() {
            return generation;
        }

        let mut request = ProductQuery::new().with_query(text);
        if let Some(limit) = self.limit {
            request = request.with_limit(limit);
        }
        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);

        self.in_flight = Some(tokio::spawn(async move {
            let view = match source.list_products(&request).await {
                Ok(page) if page.is_empty() => SearchView::NoResults { suggestions },
                Ok(page) => SearchView::Results(map_products(&page.products)),
                Err(error) => {
                    tracing::warn!(key = %request.cache_key(), %error, "search failed");
                    SearchView::Failed(FetchFailure::from(&error))
                }
            };

            state.send_if_modified(|current| current.apply(generation, view));
        }));

        generation
    }

    /// Re-submit the current query.
    pub fn retry(&mut self) -> u64 {
        let query = self.state.borrow().query.clone();
        self.submit(&query)
    }

    /// Wait until the current submission has settled and return the state.
    pub async fn settled(&self) -> SearchState {
        let mut rx = self.state.subscribe();
        let settled = rx.wait_for(|state| !state.is_loading()).await;
        match settled {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        }
    }
}
