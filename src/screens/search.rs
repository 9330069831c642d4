//! Search screen: submit-driven title search

use crate::error::FetchError;
use crate::models::AnimeSummary;

use super::navigation::Navigator;
use super::results::{ListContent, ListVariant, list_content};
use super::{FetchRequest, Generation, RequestTicket, ScreenQueryState};

/// Search lifecycle for the current query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    /// Nothing searched yet
    #[default]
    Idle,
    /// Waiting for the gateway
    Searching,
    /// Last attempt finished, success or failure alike
    Settled,
}

/// Controller for the search screen
#[derive(Debug, Default)]
pub struct SearchController {
    state: ScreenQueryState,
    phase: SearchPhase,
    generation: Generation,
    last_error: Option<FetchError>,
}

impl SearchController {
    /// Create an idle controller
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the screen with the incoming `query` route parameter
    pub fn mount(&mut self, param: Option<&str>) -> Option<FetchRequest> {
        let query = param.map(str::trim).filter(|q| !q.is_empty())?;
        self.state.current_query = query.to_string();
        self.perform_search(query)
    }

    /// Run a search for `query`.
    ///
    /// An empty (after trimming) query clears the results without a request.
    pub fn perform_search(&mut self, query: &str) -> Option<FetchRequest> {
        let query = query.trim();
        if query.is_empty() {
            // Supersedes anything still in flight
            self.generation.invalidate();
            self.state.settle(Vec::new());
            self.phase = SearchPhase::Settled;
            return None;
        }

        self.state.is_loading = true;
        self.phase = SearchPhase::Searching;
        let ticket = self.generation.next();
        tracing::debug!("search: querying {query:?} ({ticket:?})");
        Some(FetchRequest::Search {
            ticket,
            query: query.to_string(),
        })
    }

    /// Handle a submitted query.
    ///
    /// A value equal to the current query (after trimming) is ignored.
    /// Otherwise the query becomes current, is written to the route
    /// parameter, and searched.
    pub fn submit(&mut self, query: &str, nav: &mut Navigator) -> Option<FetchRequest> {
        let query = query.trim();
        if query == self.state.current_query.trim() {
            return None;
        }

        self.state.current_query = query.to_string();
        nav.set_query_param(query);
        self.perform_search(query)
    }

    /// Re-run the current query with the refresh indicator
    pub fn refresh(&mut self) -> Option<FetchRequest> {
        self.state.is_refreshing = true;
        let query = self.state.current_query.clone();
        self.perform_search(&query)
    }

    /// Apply a settled request. Returns `false` for a stale ticket.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<AnimeSummary>, FetchError>,
    ) -> bool {
        if !self.generation.is_current(ticket) {
            tracing::debug!("search: dropping stale response {ticket:?}");
            return false;
        }

        match result {
            Ok(items) => {
                tracing::debug!(
                    "search: {} results for {:?}",
                    items.len(),
                    self.state.current_query
                );
                self.last_error = None;
                self.state.settle(items);
            }
            Err(e) => {
                tracing::warn!("Search error: {e}");
                self.last_error = Some(e);
                self.state.settle(Vec::new());
            }
        }
        self.phase = SearchPhase::Settled;
        true
    }

    /// What the list area shows
    pub fn list_content(&self) -> ListContent {
        list_content(
            &self.state.results,
            self.state.is_loading,
            self.state.is_refreshing,
            ListVariant::Search {
                has_query: self.state.has_query(),
            },
        )
    }

    /// `Results for: "<query>"` heading
    pub fn heading(&self) -> String {
        let query = if self.state.current_query.is_empty() {
            "..."
        } else {
            self.state.current_query.as_str()
        };
        format!("Results for: \"{query}\"")
    }

    /// Active query
    pub fn current_query(&self) -> &str {
        &self.state.current_query
    }

    /// Current lifecycle phase
    pub const fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// View state
    pub const fn state(&self) -> &ScreenQueryState {
        &self.state
    }

    /// Current results
    pub fn results(&self) -> &[AnimeSummary] {
        &self.state.results
    }

    /// Error of the last settled request, if it failed
    pub const fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }
}
