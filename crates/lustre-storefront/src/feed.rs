//! Page-level product fetch with observable state.

use lustre_commerce::search::{ProductPage, ProductQuery};
use lustre_commerce::store::{SubscriptionId, Subscribers};

use crate::failure::FetchFailure;
use crate::source::ProductSource;

/// What a product page shows while it fetches.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState {
    /// Nothing requested yet.
    #[default]
    Idle,
    Loading,
    Failed(FetchFailure),
    /// The request succeeded with zero records.
    Empty,
    /// Every record loaded so far, with the latest pagination.
    Ready(ProductPage),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn page(&self) -> Option<&ProductPage> {
        match self {
            FetchState::Ready(page) => Some(page),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&FetchFailure> {
        match self {
            FetchState::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Request {
    query: ProductQuery,
    /// Append to the pages already loaded instead of replacing them.
    append: bool,
}

/// Fetch state for one product collection.
///
/// Failures are never retried automatically; [`ProductFeed::retry`]
/// re-issues the identical last request.
pub struct ProductFeed<S> {
    source: S,
    state: FetchState,
    last: Option<Request>,
    /// Pages kept across a failed `load_more`, so a retry can append to them.
    retained: Option<ProductPage>,
    subscribers: Subscribers<FetchState>,
}

impl<S: ProductSource> ProductFeed<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: FetchState::Idle,
            last: None,
            retained: None,
            subscribers: Subscribers::new(),
        }
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// The query behind the current state, if any.
    pub fn last_query(&self) -> Option<&ProductQuery> {
        self.last.as_ref().map(|r| &r.query)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn subscribe(&mut self, callback: impl Fn(&FetchState) + Send + 'static) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Fetch the first page for `query`, replacing anything loaded.
    pub async fn load(&mut self, query: ProductQuery) -> &FetchState {
        self.run(Request {
            query,
            append: false,
        })
        .await;
        &self.state
    }

    /// Re-issue the last request. Returns `false` if nothing was requested yet.
    pub async fn retry(&mut self) -> bool {
        match self.last.clone() {
            Some(request) => {
                tracing::debug!(key = %request.query.cache_key(), "retrying product fetch");
                self.run(request).await;
                true
            }
            None => false,
        }
    }

    /// Fetch the next page and append it.
    ///
    /// Returns `false` without fetching unless the feed is ready and the
    /// server reported another page.
    pub async fn load_more(&mut self) -> bool {
        let next = match (&self.state, &self.last) {
            (FetchState::Ready(page), Some(last)) => last.query.next_page(&page.pagination),
            _ => None,
        };
        match next {
            Some(query) => {
                self.run(Request {
                    query,
                    append: true,
                })
                .await;
                true
            }
            None => false,
        }
    }

    async fn run(&mut self, request: Request) {
        let previous = std::mem::replace(&mut self.state, FetchState::Loading);
        let base = if request.append {
            match previous {
                FetchState::Ready(page) => Some(page),
                _ => self.retained.take(),
            }
        } else {
            self.retained = None;
            None
        };
        self.subscribers.notify(&self.state);

        let result = self.source.list_products(&request.query).await;
        self.state = match result {
            Ok(page) => {
                let page = match base {
                    Some(mut loaded) => {
                        loaded.products.extend(page.products);
                        loaded.pagination = page.pagination;
                        loaded.skipped += page.skipped;
                        loaded
                    }
                    None => page,
                };
                if page.is_empty() {
                    FetchState::Empty
                } else {
                    FetchState::Ready(page)
                }
            }
            Err(error) => {
                tracing::warn!(key = %request.query.cache_key(), %error, "product fetch failed");
                self.retained = base;
                FetchState::Failed(FetchFailure::from(&error))
            }
        };
        self.last = Some(request);
        self.subscribers.notify(&self.state);
    }
}
