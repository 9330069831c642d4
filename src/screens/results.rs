//! Result list policy and card formatting
//!
//! Rendering itself lives in the TUI; this module decides *what* a list
//! screen shows and how each card's text reads.

use unicode_width::UnicodeWidthStr;

use crate::models::AnimeSummary;

/// Genre chips shown on a card before collapsing into "+N more"
pub const MAX_GENRE_CHIPS: usize = 3;

/// Title lines kept on a card
pub const MAX_TITLE_LINES: usize = 2;

/// Primary loader text on the home screen
pub const HOME_LOADING: &str = "Loading top anime...";

/// Empty home screen text
pub const HOME_EMPTY: &str = "No top airing anime available.";

/// Search screen prompt before any query
pub const ENTER_QUERY: &str = "Enter a query to start searching for anime.";

/// Which screen a list belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListVariant {
    /// Home screen (no query concept)
    Home,
    /// Search screen
    Search {
        /// Whether the trimmed current query is non-empty
        has_query: bool,
    },
}

/// The one thing a list area displays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListContent {
    /// Primary loading indicator, list suppressed
    Loading,
    /// "No results" message
    NoResults,
    /// "Enter a query" prompt
    EnterQuery,
    /// Cards
    Items,
}

/// Decide what a list area shows, in priority order
pub fn list_content(
    items: &[AnimeSummary],
    is_loading: bool,
    is_refreshing: bool,
    variant: ListVariant,
) -> ListContent {
    if is_loading && !is_refreshing {
        return ListContent::Loading;
    }

    let no_results = match variant {
        ListVariant::Home => true,
        ListVariant::Search { has_query } => has_query && !is_loading,
    };
    if items.is_empty() && no_results {
        return ListContent::NoResults;
    }

    if let ListVariant::Search { has_query: false } = variant
        && !is_loading
    {
        return ListContent::EnterQuery;
    }

    ListContent::Items
}

/// "No results" text for a search
pub fn no_results_message(query: &str) -> String {
    format!("No results found for \"{query}\".")
}

/// Display text for one result card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    /// Anime id (detail route key)
    pub id: u32,
    /// Title wrapped to the card width, at most two lines
    pub title_lines: Vec<String>,
    /// Score with two decimals or "N/A"
    pub score: String,
    /// Vote count with separators
    pub votes: String,
    /// Episode count or "N/A"
    pub episodes: String,
    /// Release year; the line is omitted when absent
    pub year: Option<i32>,
    /// Up to three genre names
    pub genres: Vec<String>,
    /// "+N more" when genres were cut
    pub more_genres: Option<String>,
}

impl CardView {
    /// Format a card for a given text width
    pub fn new(anime: &AnimeSummary, width: usize) -> Self {
        let genres = anime
            .genres
            .iter()
            .take(MAX_GENRE_CHIPS)
            .map(|g| g.name.clone())
            .collect();
        let hidden = anime.genres.len().saturating_sub(MAX_GENRE_CHIPS);

        Self {
            id: anime.id,
            title_lines: truncate_lines(&anime.title, width, MAX_TITLE_LINES),
            score: anime.score_label(),
            votes: anime.votes_label(),
            episodes: anime.episodes_label(),
            year: anime.release_year(),
            genres,
            more_genres: (hidden > 0).then(|| format!("+{hidden} more")),
        }
    }

    /// "Episodes: N" line
    pub fn episodes_text(&self) -> String {
        format!("Episodes: {}", self.episodes)
    }

    /// "Aired: YYYY" line, absent without a date
    pub fn aired_text(&self) -> Option<String> {
        self.year.map(|year| format!("Aired: {year}"))
    }

    /// Plain-text rendering used by the CLI
    pub fn to_plain_lines(&self) -> Vec<String> {
        let mut lines = self.title_lines.clone();
        lines.push(format!(
            "★ {} ({} votes)  {}",
            self.score,
            self.votes,
            self.episodes_text()
        ));
        if let Some(aired) = self.aired_text() {
            lines.push(aired);
        }
        if !self.genres.is_empty() {
            let mut chips: Vec<String> = self.genres.iter().map(|g| format!("[{g}]")).collect();
            if let Some(more) = &self.more_genres {
                chips.push(more.clone());
            }
            lines.push(chips.join(" "));
        }
        lines
    }
}

/// Wrap `text` to `width` columns, keeping `max_lines` and marking the cut with "…"
pub fn truncate_lines(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let width = width.max(4);
    let wrapped: Vec<String> = textwrap::wrap(text, width)
        .into_iter()
        .map(|line| line.into_owned())
        .collect();

    if wrapped.len() <= max_lines {
        return wrapped;
    }

    let mut kept: Vec<String> = wrapped.into_iter().take(max_lines).collect();
    if let Some(last) = kept.last_mut() {
        while !last.is_empty() && last.width() + 1 > width {
            last.pop();
        }
        let trimmed = last.trim_end().len();
        last.truncate(trimmed);
        last.push('…');
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Genre;

    fn anime_with_genres(n: u32) -> AnimeSummary {
        let mut anime = AnimeSummary::new(1, "Frieren");
        anime.genres = (0..n)
            .map(|id| Genre {
                id,
                name: format!("Genre{id}"),
            })
            .collect();
        anime
    }

    #[test]
    fn test_loading_wins_unless_refreshing() {
        let variant = ListVariant::Search { has_query: true };
        assert_eq!(list_content(&[], true, false, variant), ListContent::Loading);
        assert_eq!(
            list_content(&[], true, false, ListVariant::Home),
            ListContent::Loading
        );
        // Refresh keeps the list (and its own indicator) instead of the loader
        let items = vec![anime_with_genres(0)];
        assert_eq!(list_content(&items, true, true, variant), ListContent::Items);
    }

    #[test]
    fn test_home_empty_shows_no_results() {
        assert_eq!(
            list_content(&[], false, false, ListVariant::Home),
            ListContent::NoResults
        );
    }

    #[test]
    fn test_search_empty_query_prompts() {
        assert_eq!(
            list_content(&[], false, false, ListVariant::Search { has_query: false }),
            ListContent::EnterQuery
        );
    }

    #[test]
    fn test_search_with_query_and_no_results() {
        assert_eq!(
            list_content(&[], false, false, ListVariant::Search { has_query: true }),
            ListContent::NoResults
        );
        assert_eq!(no_results_message("zzz"), "No results found for \"zzz\".");
    }

    #[test]
    fn test_search_refreshing_empty_keeps_list() {
        assert_eq!(
            list_content(&[], true, true, ListVariant::Search { has_query: true }),
            ListContent::Items
        );
    }

    #[test]
    fn test_card_genre_chips() {
        let card = CardView::new(&anime_with_genres(2), 40);
        assert_eq!(card.genres.len(), 2);
        assert_eq!(card.more_genres, None);

        let card = CardView::new(&anime_with_genres(5), 40);
        assert_eq!(card.genres, vec!["Genre0", "Genre1", "Genre2"]);
        assert_eq!(card.more_genres.as_deref(), Some("+2 more"));
    }

    #[test]
    fn test_card_year_omitted_without_date() {
        let card = CardView::new(&anime_with_genres(0), 40);
        assert_eq!(card.aired_text(), None);
        assert_eq!(card.score, "N/A");
        assert_eq!(card.episodes_text(), "Episodes: N/A");
        assert!(!card.to_plain_lines().iter().any(|l| l.starts_with("Aired")));
    }

    #[test]
    fn test_title_truncated_to_two_lines() {
        let title = "Kono Subarashii Sekai ni Shukufuku wo! Kurenai Densetsu Special Edition";
        let lines = truncate_lines(title, 20, MAX_TITLE_LINES);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with('…'));
        assert!(lines.iter().all(|l| l.width() <= 20));

        let short = truncate_lines("Naruto", 20, MAX_TITLE_LINES);
        assert_eq!(short, vec!["Naruto".to_string()]);
    }
}
