//! Application state

use std::collections::{HashMap, HashSet};

use anyhow::Result;
use image::DynamicImage;
use ratatui_image::protocol::StatefulProtocol;

use crate::config::Config;
use crate::favorites::FavoritesStore;
use crate::images::{self, CoverCache};
use crate::models::AnimeSummary;
use crate::screens::{
    DetailController, FetchOutcome, FetchRequest, HomeController, Navigator, QueryInput, Route,
    SearchController,
};
use crate::theme::Theme;

/// Placeholder of the home search bar
pub const HOME_PLACEHOLDER: &str = "Search anime...";
/// Placeholder of the search screen's bar
pub const SEARCH_PLACEHOLDER: &str = "Search again...";

/// Which screen is visible, derived from the navigation stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Top airing listing
    Home,
    /// Search results
    Search,
    /// One title
    Detail,
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Navigating lists and details
    #[default]
    Normal,
    /// Typing into the visible query input
    Input,
    /// Help popup
    Help,
    /// Theme selector
    ThemePicker,
}

/// Application state
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Favorites database
    pub favorites: FavoritesStore,
    /// Cached favorite ids, for card markers
    pub favorite_ids: HashSet<u32>,
    /// Whether to quit
    pub should_quit: bool,
    /// Current theme
    pub theme: Theme,
    /// Current mode
    pub mode: Mode,
    /// Theme picker cursor
    pub theme_picker_index: usize,

    /// Route stack
    pub nav: Navigator,
    /// Home screen controller
    pub home: HomeController,
    /// Search screen controller
    pub search: SearchController,
    /// Detail screen controller
    pub detail: DetailController,
    /// Home search bar
    pub home_input: QueryInput,
    /// Search screen bar
    pub search_input: QueryInput,

    /// Selected card on the home list
    pub home_selected: usize,
    /// Selected card on the search list
    pub search_selected: usize,
    /// Scroll offset for the detail view
    pub detail_scroll: u16,

    /// Status message (bottom bar)
    pub status: String,

    /// Decoded covers
    pub covers: CoverCache,
    /// Covers currently downloading
    pub loading_covers: HashSet<String>,
    /// Render state per cover URL
    cover_protocols: HashMap<String, StatefulProtocol>,
    /// Covers that failed once; not retried this session
    failed_covers: HashSet<String>,

    /// Tick counter for animations
    tick: u64,
}

impl AppState {
    /// Create a new app state
    pub fn new(config: Config, favorites: FavoritesStore) -> Result<Self> {
        let theme = config.theme;
        let favorite_ids = favorites.ids()?;

        Ok(Self {
            config,
            favorites,
            favorite_ids,
            should_quit: false,
            theme,
            mode: Mode::Normal,
            theme_picker_index: 0,
            nav: Navigator::new(),
            home: HomeController::new(),
            search: SearchController::new(),
            detail: DetailController::new(),
            home_input: QueryInput::new("", HOME_PLACEHOLDER),
            search_input: QueryInput::new("", SEARCH_PLACEHOLDER),
            home_selected: 0,
            search_selected: 0,
            detail_scroll: 0,
            status: String::new(),
            covers: CoverCache::new(),
            loading_covers: HashSet::new(),
            cover_protocols: HashMap::new(),
            failed_covers: HashSet::new(),
            tick: 0,
        })
    }

    /// Mount the initial screen
    pub fn start(&mut self) -> FetchRequest {
        self.home.mount()
    }

    /// Tick for animations
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Get current tick
    pub const fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Set status message
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = msg.into();
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status.clear();
    }

    /// The visible screen
    pub fn view(&self) -> View {
        match self.nav.current() {
            Route::Home => View::Home,
            Route::Search { .. } => View::Search,
            Route::Detail { .. } => View::Detail,
        }
    }

    /// Whether any visible request is in flight
    pub fn is_busy(&self) -> bool {
        match self.view() {
            View::Home => self.home.state().is_loading,
            View::Search => self.search.state().is_loading,
            View::Detail => self.detail.is_loading(),
        }
    }

    /// Apply a settled request to the controller that issued it
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::TopAnime { ticket, result } => {
                if self.home.complete(ticket, result) {
                    self.home_selected = clamp(self.home_selected, self.home.results().len());
                }
            }
            FetchOutcome::Search { ticket, result } => {
                if self.search.complete(ticket, result) {
                    self.search_selected = 0;
                }
            }
            FetchOutcome::Detail { ticket, result } => {
                self.detail.complete(ticket, result);
            }
        }
    }

    // ---- drawer / routes ----

    /// Switch to a drawer screen. Drawer screens stay mounted, so nothing is fetched.
    pub fn open_drawer(&mut self, route: Route) {
        self.mode = Mode::Normal;
        self.nav.open_drawer(route);
        self.sync_search_input();
    }

    /// Toggle between the two drawer screens
    pub fn next_drawer(&mut self) {
        match self.nav.drawer() {
            Route::Home => self.open_drawer(Route::Search { query: None }),
            _ => self.open_drawer(Route::Home),
        }
    }

    /// Leave the detail screen. Returns `false` when there is nothing to go back to.
    pub fn back(&mut self) -> bool {
        if self.view() != View::Detail {
            return false;
        }
        let popped = self.nav.back();
        self.detail_scroll = 0;
        self.sync_search_input();
        popped
    }

    fn sync_search_input(&mut self) {
        let query = self.nav.query_param().unwrap_or("").to_string();
        self.search_input.sync_initial(&query);
    }

    // ---- query input ----

    /// The input of the visible screen, if it has one
    pub fn active_input(&mut self) -> Option<&mut QueryInput> {
        match self.view() {
            View::Home => Some(&mut self.home_input),
            View::Search => Some(&mut self.search_input),
            View::Detail => None,
        }
    }

    /// Submit the visible input
    pub fn submit_input(&mut self) -> Option<FetchRequest> {
        match self.view() {
            View::Home => {
                let text = self.home_input.submit();
                let query = self.home.submit(&text, &mut self.nav)?;
                self.search_input.sync_initial(&query);
                self.search_selected = 0;
                self.search.mount(self.nav.query_param())
            }
            View::Search => {
                let text = self.search_input.submit();
                self.search.submit(&text, &mut self.nav)
            }
            View::Detail => None,
        }
    }

    /// Clear the visible input. On the search screen this submits the empty query.
    pub fn clear_input(&mut self) -> Option<FetchRequest> {
        match self.view() {
            View::Home => {
                self.home_input.clear();
                None
            }
            View::Search => {
                let cleared = self.search_input.clear()?;
                self.search.submit(&cleared, &mut self.nav)
            }
            View::Detail => None,
        }
    }

    /// Refresh the visible screen
    pub fn refresh(&mut self) -> Option<FetchRequest> {
        match self.view() {
            View::Home => Some(self.home.refresh()),
            View::Search => self.search.refresh(),
            View::Detail => {
                let id = self.detail.id()?;
                let is_favorite = self.favorite_ids.contains(&id);
                Some(self.detail.mount(id, is_favorite))
            }
        }
    }

    // ---- list selection ----

    /// Results of the visible list
    pub fn current_results(&self) -> &[AnimeSummary] {
        match self.view() {
            View::Home => self.home.results(),
            View::Search => self.search.results(),
            View::Detail => &[],
        }
    }

    /// Selected index of the visible list
    pub fn selected_index(&self) -> usize {
        match self.view() {
            View::Search => self.search_selected,
            _ => self.home_selected,
        }
    }

    fn selected_mut(&mut self) -> Option<&mut usize> {
        match self.view() {
            View::Home => Some(&mut self.home_selected),
            View::Search => Some(&mut self.search_selected),
            View::Detail => None,
        }
    }

    /// The selected card's record
    pub fn selected_anime(&self) -> Option<&AnimeSummary> {
        self.current_results().get(self.selected_index())
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        let len = self.current_results().len();
        if let Some(selected) = self.selected_mut()
            && len > 0
        {
            *selected = (*selected + 1).min(len - 1);
        }
    }

    /// Move selection up
    pub fn select_prev(&mut self) {
        if let Some(selected) = self.selected_mut() {
            *selected = selected.saturating_sub(1);
        }
    }

    /// Jump to the first card
    pub fn select_first(&mut self) {
        if let Some(selected) = self.selected_mut() {
            *selected = 0;
        }
    }

    /// Jump to the last card
    pub fn select_last(&mut self) {
        let len = self.current_results().len();
        if let Some(selected) = self.selected_mut() {
            *selected = len.saturating_sub(1);
        }
    }

    /// Navigate to the selected card's detail screen
    pub fn open_selected(&mut self) -> Option<FetchRequest> {
        let id = self.selected_anime()?.id;
        self.nav.push(Route::Detail { id });
        self.detail_scroll = 0;
        Some(self.detail.mount(id, self.favorite_ids.contains(&id)))
    }

    // ---- detail ----

    /// Toggle the favorite flag of the displayed title
    pub fn toggle_favorite(&mut self) {
        let Some(id) = self.detail.id() else {
            return;
        };
        match self.detail.toggle_favorite(&self.favorites) {
            Ok(Some(true)) => {
                self.favorite_ids.insert(id);
                self.set_status("♥ Added to favorites");
            }
            Ok(Some(false)) => {
                self.favorite_ids.remove(&id);
                self.set_status("♡ Removed from favorites");
            }
            Ok(None) => self.set_status("Nothing to favorite yet"),
            Err(e) => {
                tracing::warn!("Failed to update favorites: {e:#}");
                self.set_status(format!("❌ Could not update favorites: {e}"));
            }
        }
    }

    /// Open the displayed title (or the selected card) on MyAnimeList
    pub fn open_in_browser(&mut self) {
        let url = match self.view() {
            View::Detail => self.detail.detail().and_then(|d| d.summary.url.clone()),
            _ => self.selected_anime().and_then(|a| a.url.clone()),
        };
        match url {
            Some(url) => match open::that(&url) {
                Ok(()) => self.set_status("✓ Opened in browser"),
                Err(e) => self.set_status(format!("❌ Could not open browser: {e}")),
            },
            None => self.set_status("No page for this title"),
        }
    }

    // ---- covers ----

    /// Cover of the loaded detail or the selected card that still needs a download
    pub fn cover_to_load(&self) -> Option<String> {
        if !self.config.show_images {
            return None;
        }
        let url = match self.view() {
            View::Detail => &self.detail.detail()?.summary.image_url,
            View::Home | View::Search => &self.selected_anime()?.image_url,
        };
        let pending = url.is_empty()
            || self.covers.contains(url)
            || self.loading_covers.contains(url)
            || self.failed_covers.contains(url);
        (!pending).then(|| url.clone())
    }

    /// Record a cover download as started
    pub fn mark_cover_loading(&mut self, url: &str) {
        self.loading_covers.insert(url.to_string());
    }

    /// Store a decoded cover and prepare it for rendering
    pub fn cover_loaded(&mut self, url: String, image: DynamicImage) {
        self.loading_covers.remove(&url);
        if let Some(picker) = images::picker() {
            let protocol = picker.new_resize_protocol(image.clone());
            self.cover_protocols.insert(url.clone(), protocol);
        }
        self.covers.insert(&url, image);
        // Drop render state for covers the cache evicted
        self.cover_protocols.retain(|key, _| self.covers.contains(key));
    }

    /// Forget a failed cover download
    pub fn cover_failed(&mut self, url: &str, error: &str) {
        self.loading_covers.remove(url);
        self.failed_covers.insert(url.to_string());
        tracing::warn!("Failed to load cover {url}: {error}");
    }

    /// Render state for a cover, when one is ready
    pub fn cover_protocol(&mut self, url: &str) -> Option<&mut StatefulProtocol> {
        self.cover_protocols.get_mut(url)
    }

    /// Whether a cover can be rendered now
    pub fn has_cover(&self, url: &str) -> bool {
        self.cover_protocols.contains_key(url)
    }

    // ---- theme ----

    /// Open the theme picker at the current theme
    pub fn open_theme_picker(&mut self) {
        self.theme_picker_index = Theme::all()
            .iter()
            .position(|t| *t == self.theme.inner())
            .unwrap_or(0);
        self.mode = Mode::ThemePicker;
    }
}

const fn clamp(index: usize, len: usize) -> usize {
    if index >= len { len.saturating_sub(1) } else { index }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::DemoGateway;
    use crate::screens::{ListContent, SearchPhase};
    use tempfile::{TempDir, tempdir};

    fn state() -> (AppState, TempDir) {
        let dir = tempdir().unwrap();
        let favorites = FavoritesStore::open_path(&dir.path().join("favorites.sqlite")).unwrap();
        let config = Config {
            show_images: false,
            ..Config::default()
        };
        (AppState::new(config, favorites).unwrap(), dir)
    }

    fn run(state: &mut AppState, gateway: &DemoGateway, request: Option<FetchRequest>) {
        let request = request.expect("request");
        let outcome = tokio_test::block_on(request.execute(gateway));
        state.apply_outcome(outcome);
    }

    fn type_text(state: &mut AppState, text: &str) {
        let input = state.active_input().expect("input");
        for c in text.chars() {
            input.insert(c);
        }
    }

    #[test]
    fn test_start_loads_home() {
        let gateway = DemoGateway::new().unwrap();
        let (mut state, _dir) = state();

        let request = state.start();
        assert!(state.is_busy());
        run(&mut state, &gateway, Some(request));

        assert_eq!(state.view(), View::Home);
        assert!(!state.home.results().is_empty());
        assert_eq!(state.home.list_content(), ListContent::Items);
    }

    #[test]
    fn test_home_submit_opens_search() {
        let gateway = DemoGateway::new().unwrap();
        let (mut state, _dir) = state();

        type_text(&mut state, "  naruto ");
        let request = state.submit_input();
        assert_eq!(state.view(), View::Search);
        assert_eq!(state.nav.location(), "/search?query=naruto");
        assert_eq!(state.search_input.text(), "naruto");

        run(&mut state, &gateway, request);
        assert_eq!(state.search.phase(), SearchPhase::Settled);
        assert_eq!(state.search.results().len(), 2);
    }

    #[test]
    fn test_home_submit_empty_stays_home() {
        let (mut state, _dir) = state();
        type_text(&mut state, "   ");
        assert!(state.submit_input().is_none());
        assert_eq!(state.view(), View::Home);
    }

    #[test]
    fn test_drawer_switch_keeps_search_mounted() {
        let gateway = DemoGateway::new().unwrap();
        let (mut state, _dir) = state();
        type_text(&mut state, "bebop");
        let request = state.submit_input();
        run(&mut state, &gateway, request);

        state.next_drawer();
        assert_eq!(state.view(), View::Home);
        state.next_drawer();
        assert_eq!(state.view(), View::Search);
        assert_eq!(state.search.current_query(), "bebop");
        assert_eq!(state.search.results().len(), 1);
        assert_eq!(state.search_input.text(), "bebop");
    }

    #[test]
    fn test_tab_from_detail_over_search_goes_home() {
        let gateway = DemoGateway::new().unwrap();
        let (mut state, _dir) = state();
        type_text(&mut state, "bebop");
        let request = state.submit_input();
        run(&mut state, &gateway, request);
        let request = state.open_selected();
        run(&mut state, &gateway, request);
        assert_eq!(state.view(), View::Detail);

        state.next_drawer();
        assert_eq!(state.view(), View::Home);
        assert_eq!(state.nav.depth(), 1);
    }

    #[test]
    fn test_clear_on_search_empties_results() {
        let gateway = DemoGateway::new().unwrap();
        let (mut state, _dir) = state();
        type_text(&mut state, "naruto");
        let request = state.submit_input();
        run(&mut state, &gateway, request);

        assert!(state.clear_input().is_none());
        assert!(state.search.results().is_empty());
        assert_eq!(state.search.list_content(), ListContent::EnterQuery);
        assert_eq!(state.nav.query_param(), Some(""));
    }

    #[test]
    fn test_detail_flow_and_favorite() {
        let gateway = DemoGateway::new().unwrap();
        let (mut state, _dir) = state();
        type_text(&mut state, "fullmetal");
        let request = state.submit_input();
        run(&mut state, &gateway, request);

        let request = state.open_selected();
        assert_eq!(state.view(), View::Detail);
        assert_eq!(state.nav.location(), "/anime/5114");
        run(&mut state, &gateway, request);
        assert_eq!(
            state.detail.detail().map(|d| d.summary.title.as_str()),
            Some("Fullmetal Alchemist: Brotherhood")
        );

        state.toggle_favorite();
        assert!(state.favorite_ids.contains(&5114));
        assert!(state.favorites.is_favorite(5114).unwrap());

        assert!(state.back());
        assert_eq!(state.view(), View::Search);
        assert!(!state.back());
    }

    #[test]
    fn test_selection_bounds() {
        let gateway = DemoGateway::new().unwrap();
        let (mut state, _dir) = state();
        let request = state.start();
        run(&mut state, &gateway, Some(request));

        let len = state.home.results().len();
        for _ in 0..len + 3 {
            state.select_next();
        }
        assert_eq!(state.selected_index(), len - 1);
        state.select_first();
        state.select_prev();
        assert_eq!(state.selected_index(), 0);
        state.select_last();
        assert_eq!(state.selected_index(), len - 1);
    }

    #[test]
    fn test_cover_skipped_when_images_disabled() {
        let gateway = DemoGateway::new().unwrap();
        let (mut state, _dir) = state();
        let request = state.start();
        run(&mut state, &gateway, Some(request));
        let request = state.open_selected();
        run(&mut state, &gateway, request);

        assert!(state.cover_to_load().is_none());
        state.config.show_images = true;
        let url = state.cover_to_load().unwrap();

        state.mark_cover_loading(&url);
        assert!(state.cover_to_load().is_none());

        // A failed cover is not retried
        state.cover_failed(&url, "timed out");
        assert!(state.loading_covers.is_empty());
        assert!(state.cover_to_load().is_none());
    }

    #[test]
    fn test_cover_follows_list_selection() {
        let gateway = DemoGateway::new().unwrap();
        let (mut state, _dir) = state();
        state.config.show_images = true;
        let request = state.start();
        run(&mut state, &gateway, Some(request));

        let first = state.cover_to_load().unwrap();
        assert_eq!(first, state.home.results()[0].image_url);
        state.mark_cover_loading(&first);
        assert!(state.cover_to_load().is_none());

        state.select_next();
        let second = state.cover_to_load().unwrap();
        assert_eq!(second, state.home.results()[1].image_url);
        assert_ne!(first, second);
    }
}
