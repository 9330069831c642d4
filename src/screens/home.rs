//! Home screen: top airing anime

use crate::api::TopFilter;
use crate::error::FetchError;
use crate::models::AnimeSummary;

use super::navigation::{Navigator, Route};
use super::results::{ListContent, ListVariant, list_content};
use super::{FetchRequest, Generation, RequestTicket, ScreenQueryState};

/// Home lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HomePhase {
    /// Not mounted yet
    #[default]
    Idle,
    /// Waiting for the gateway
    Loading,
    /// Settled (success and failure alike)
    Loaded,
}

/// Controller for the home screen
#[derive(Debug, Default)]
pub struct HomeController {
    state: ScreenQueryState,
    phase: HomePhase,
    generation: Generation,
    last_error: Option<FetchError>,
}

impl HomeController {
    /// The fixed ranking shown on the home screen
    pub const FILTER: TopFilter = TopFilter::Airing;

    /// Create an idle controller
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the screen: start loading top airing anime
    pub fn mount(&mut self) -> FetchRequest {
        self.state.is_loading = true;
        self.state.is_refreshing = false;
        self.issue()
    }

    /// Refetch with the same filter; shows the refresh indicator
    pub fn refresh(&mut self) -> FetchRequest {
        self.state.is_loading = true;
        self.state.is_refreshing = true;
        self.issue()
    }

    fn issue(&mut self) -> FetchRequest {
        self.phase = HomePhase::Loading;
        let ticket = self.generation.next();
        tracing::debug!("home: requesting top {} ({ticket:?})", Self::FILTER);
        FetchRequest::TopAnime {
            ticket,
            filter: Self::FILTER,
        }
    }

    /// Apply a settled request. Returns `false` for a stale ticket.
    ///
    /// Failures are logged and shown as an empty list.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<AnimeSummary>, FetchError>,
    ) -> bool {
        if !self.generation.is_current(ticket) {
            tracing::debug!("home: dropping stale response {ticket:?}");
            return false;
        }

        match result {
            Ok(items) => {
                tracing::debug!("home: loaded {} titles", items.len());
                self.last_error = None;
                self.state.settle(items);
            }
            Err(e) => {
                tracing::warn!("Failed to fetch top airing anime: {e}");
                self.last_error = Some(e);
                self.state.settle(Vec::new());
            }
        }
        self.phase = HomePhase::Loaded;
        true
    }

    /// Forward a submitted query to the search screen.
    ///
    /// Returns the query when navigation happened; empty queries go nowhere.
    pub fn submit(&self, query: &str, nav: &mut Navigator) -> Option<String> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return None;
        }
        nav.push(Route::Search {
            query: Some(trimmed.to_string()),
        });
        Some(trimmed.to_string())
    }

    /// What the list area shows
    pub fn list_content(&self) -> ListContent {
        list_content(
            &self.state.results,
            self.state.is_loading,
            self.state.is_refreshing,
            ListVariant::Home,
        )
    }

    /// Current lifecycle phase
    pub const fn phase(&self) -> HomePhase {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::testing::{RecordingGateway, sample};
    use crate::screens::{FetchOutcome, results};

    fn run(ctl: &mut HomeController, gateway: &RecordingGateway, request: &FetchRequest) -> bool {
        match tokio_test::block_on(request.execute(gateway)) {
            FetchOutcome::TopAnime { ticket, result } => ctl.complete(ticket, result),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_mount_loads_airing() {
        let gateway = RecordingGateway::with_results(vec![
            sample(1, "Frieren", Some(9.3)),
            sample(2, "Dandadan", None),
        ]);
        let mut ctl = HomeController::new();

        let request = ctl.mount();
        assert_eq!(ctl.phase(), HomePhase::Loading);
        assert_eq!(ctl.list_content(), ListContent::Loading);

        assert!(run(&mut ctl, &gateway, &request));
        assert_eq!(gateway.calls(), vec!["top:airing"]);
        assert_eq!(ctl.phase(), HomePhase::Loaded);
        assert_eq!(ctl.results().len(), 2);
        assert_eq!(ctl.list_content(), ListContent::Items);
    }

    #[test]
    fn test_empty_response_shows_message_not_loader() {
        let gateway = RecordingGateway::with_results(Vec::new());
        let mut ctl = HomeController::new();
        let request = ctl.mount();
        run(&mut ctl, &gateway, &request);

        assert_eq!(ctl.list_content(), ListContent::NoResults);
        assert!(results::HOME_EMPTY.starts_with("No top airing anime available"));
    }

    #[test]
    fn test_failure_degrades_to_empty() {
        let gateway = RecordingGateway::with_results(vec![sample(1, "Frieren", None)]);
        let mut ctl = HomeController::new();
        let request = ctl.mount();
        run(&mut ctl, &gateway, &request);
        assert_eq!(ctl.results().len(), 1);

        let failing = RecordingGateway::failing();
        let request = ctl.refresh();
        assert!(ctl.state().is_refreshing);
        run(&mut ctl, &failing, &request);

        assert!(ctl.results().is_empty());
        assert!(!ctl.state().is_loading);
        assert!(!ctl.state().is_refreshing);
        assert!(ctl.last_error().is_some());
        assert_eq!(ctl.list_content(), ListContent::NoResults);
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let slow = RecordingGateway::with_results(vec![sample(1, "Old", None)]);
        let fast = RecordingGateway::with_results(vec![sample(2, "New", None)]);
        let mut ctl = HomeController::new();

        let first = ctl.mount();
        let second = ctl.refresh();

        // Newer request settles first, then the older one arrives late
        assert!(run(&mut ctl, &fast, &second));
        assert!(!run(&mut ctl, &slow, &first));
        assert_eq!(ctl.results()[0].title, "New");
    }

    #[test]
    fn test_submit_navigates_with_trimmed_query() {
        let ctl = HomeController::new();
        let mut nav = Navigator::new();

        assert_eq!(ctl.submit("   ", &mut nav), None);
        assert_eq!(nav.current(), &Route::Home);

        assert_eq!(ctl.submit("  one piece ", &mut nav), Some("one piece".to_string()));
        assert_eq!(nav.query_param(), Some("one piece"));
        assert_eq!(nav.location(), "/search?query=one%20piece");
    }
}
