//! Screen controllers and the presentational pieces they share
//!
//! Controllers are plain state machines. They never await anything: every
//! operation that needs data returns a [`FetchRequest`], the caller executes
//! it against an [`AnimeGateway`], and the resulting [`FetchOutcome`] is fed
//! back through the controller's `complete`. Each request carries a
//! [`RequestTicket`]; only the most recently issued ticket may commit, so a
//! slow response can never overwrite a newer one.

pub mod detail;
pub mod home;
pub mod navigation;
pub mod query_input;
pub mod results;
pub mod search;

pub use detail::{DetailController, DetailPhase};
pub use home::{HomeController, HomePhase};
pub use navigation::{Navigator, Route};
pub use query_input::QueryInput;
pub use results::{CardView, ListContent, ListVariant, list_content};
pub use search::{SearchController, SearchPhase};

use crate::api::{AnimeGateway, TopFilter};
use crate::error::FetchError;
use crate::models::{AnimeDetail, AnimeSummary};

/// Identifies one issued request within a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket(u64);

/// Per-controller request generation counter
#[derive(Debug, Default)]
pub struct Generation {
    current: u64,
}

impl Generation {
    /// Issue a ticket, invalidating all earlier ones
    pub fn next(&mut self) -> RequestTicket {
        self.current = self.current.wrapping_add(1);
        RequestTicket(self.current)
    }

    /// Invalidate outstanding tickets without issuing a new one
    pub fn invalidate(&mut self) {
        self.current = self.current.wrapping_add(1);
    }

    /// Whether `ticket` is the latest one issued
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.current
    }
}

/// View state owned by a list screen
#[derive(Debug, Clone, Default)]
pub struct ScreenQueryState {
    /// Active query (always empty on the home screen)
    pub current_query: String,
    /// A request is in flight
    pub is_loading: bool,
    /// The in-flight request came from a refresh
    pub is_refreshing: bool,
    /// Results of the last settled request
    pub results: Vec<AnimeSummary>,
}

impl ScreenQueryState {
    /// Whether the trimmed query is non-empty
    pub fn has_query(&self) -> bool {
        !self.current_query.trim().is_empty()
    }

    /// Commit a settled request: results replaced wholesale, flags cleared
    fn settle(&mut self, results: Vec<AnimeSummary>) {
        self.results = results;
        self.is_loading = false;
        self.is_refreshing = false;
    }
}

/// A gateway call a controller wants made
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    /// Top ranked anime
    TopAnime {
        /// Issuing ticket
        ticket: RequestTicket,
        /// Ranking filter
        filter: TopFilter,
    },
    /// Title search
    Search {
        /// Issuing ticket
        ticket: RequestTicket,
        /// Trimmed, non-empty query
        query: String,
    },
    /// Full record for one title
    Detail {
        /// Issuing ticket
        ticket: RequestTicket,
        /// MyAnimeList id
        id: u32,
    },
}

/// The settled result of a [`FetchRequest`]
#[derive(Debug)]
pub enum FetchOutcome {
    /// Result of [`FetchRequest::TopAnime`]
    TopAnime {
        /// Issuing ticket
        ticket: RequestTicket,
        /// Records or failure
        result: Result<Vec<AnimeSummary>, FetchError>,
    },
    /// Result of [`FetchRequest::Search`]
    Search {
        /// Issuing ticket
        ticket: RequestTicket,
        /// Records or failure
        result: Result<Vec<AnimeSummary>, FetchError>,
    },
    /// Result of [`FetchRequest::Detail`]
    Detail {
        /// Issuing ticket
        ticket: RequestTicket,
        /// Record or failure
        result: Result<AnimeDetail, FetchError>,
    },
}

impl FetchRequest {
    /// Ticket of the issuing controller
    pub const fn ticket(&self) -> RequestTicket {
        match self {
            Self::TopAnime { ticket, .. }
            | Self::Search { ticket, .. }
            | Self::Detail { ticket, .. } => *ticket,
        }
    }

    /// Run the request against a gateway
    pub async fn execute<G: AnimeGateway>(&self, gateway: &G) -> FetchOutcome {
        match self {
            Self::TopAnime { ticket, filter } => FetchOutcome::TopAnime {
                ticket: *ticket,
                result: gateway.top_anime(*filter).await,
            },
            Self::Search { ticket, query } => FetchOutcome::Search {
                ticket: *ticket,
                result: gateway.search_by_title(query).await,
            },
            Self::Detail { ticket, id } => FetchOutcome::Detail {
                ticket: *ticket,
                result: gateway.anime_detail(*id).await,
            },
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording gateway double for controller tests

    use std::sync::Mutex;

    use super::*;

    /// Gateway that records every call and answers from canned data
    #[derive(Default)]
    pub struct RecordingGateway {
        pub calls: Mutex<Vec<String>>,
        pub results: Vec<AnimeSummary>,
        pub fail: bool,
    }

    impl RecordingGateway {
        pub fn with_results(results: Vec<AnimeSummary>) -> Self {
            Self {
                results,
                ..Self::default()
            }
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn answer(&self, call: String) -> Result<Vec<AnimeSummary>, FetchError> {
            self.calls.lock().unwrap().push(call);
            if self.fail {
                Err(FetchError::Network("connection refused".to_string()))
            } else {
                Ok(self.results.clone())
            }
        }
    }

    impl AnimeGateway for RecordingGateway {
        async fn top_anime(&self, filter: TopFilter) -> Result<Vec<AnimeSummary>, FetchError> {
            self.answer(format!("top:{filter}"))
        }

        async fn search_by_title(&self, query: &str) -> Result<Vec<AnimeSummary>, FetchError> {
            self.answer(format!("search:{query}"))
        }

        async fn anime_detail(&self, id: u32) -> Result<AnimeDetail, FetchError> {
            let mut found = self.answer(format!("detail:{id}"))?;
            match found.iter().position(|a| a.id == id) {
                Some(idx) => Ok(AnimeDetail::from_summary(found.swap_remove(idx))),
                None => Err(FetchError::not_found(format!("anime {id}"))),
            }
        }
    }

    pub fn sample(id: u32, title: &str, score: Option<f64>) -> AnimeSummary {
        let mut anime = AnimeSummary::new(id, title);
        anime.score = score;
        anime
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_latest_wins() {
        let mut generation = Generation::default();
        let first = generation.next();
        let second = generation.next();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));

        generation.invalidate();
        assert!(!generation.is_current(second));
    }
}
