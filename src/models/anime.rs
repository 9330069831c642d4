//! Anime records as displayed by the screens

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A genre, theme or demographic tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    /// MyAnimeList id of the tag
    pub id: u32,
    /// Display name
    pub name: String,
}

/// The display-relevant subset of fields for one anime title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeSummary {
    /// MyAnimeList id
    pub id: u32,
    /// Main (romanized) title
    pub title: String,
    /// Cover image URL (large JPG when available)
    pub image_url: String,
    /// Average user score
    pub score: Option<f64>,
    /// Number of users who scored the title
    pub scored_by: Option<u64>,
    /// Episode count, unknown while airing
    pub episodes: Option<u32>,
    /// Genres in API order
    pub genres: Vec<Genre>,
    /// First air date
    pub aired_from: Option<NaiveDate>,
    /// MyAnimeList page
    pub url: Option<String>,
}

impl AnimeSummary {
    /// Create a summary with only id and title set
    pub fn new(id: u32, title: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            image_url: String::new(),
            score: None,
            scored_by: None,
            episodes: None,
            genres: Vec::new(),
            aired_from: None,
            url: None,
        }
    }

    /// Score with two decimals, or "N/A".
    ///
    /// A zero score is what MAL reports for unscored titles, so it reads as "N/A" too.
    pub fn score_label(&self) -> String {
        match self.score {
            Some(score) if score > 0.0 => format!("{score:.2}"),
            _ => "N/A".to_string(),
        }
    }

    /// Episode count, or "N/A"
    pub fn episodes_label(&self) -> String {
        self.episodes
            .map_or_else(|| "N/A".to_string(), |n| n.to_string())
    }

    /// Release year, if any air date is known
    pub fn release_year(&self) -> Option<i32> {
        self.aired_from.map(|date| date.year())
    }

    /// Vote count with thousands separators ("0" when unknown)
    pub fn votes_label(&self) -> String {
        format_count(self.scored_by.unwrap_or(0))
    }
}

/// A related-title group (sequel, prequel, adaptation...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// Relation kind as reported by the API ("Sequel", "Adaptation", ...)
    pub kind: String,
    /// Names of the related entries
    pub titles: Vec<String>,
}

/// An external link (official site, streaming page...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalLink {
    /// Link label
    pub name: String,
    /// Target URL
    pub url: String,
}

/// Everything the detail view shows for one title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeDetail {
    /// The fields shared with list cards
    pub summary: AnimeSummary,
    /// Media type (TV, Movie, OVA...)
    pub kind: Option<String>,
    /// Airing status
    pub status: Option<String>,
    /// Score rank
    pub rank: Option<u32>,
    /// Member count
    pub members: Option<u64>,
    /// Synopsis, without the MAL rewrite credit
    pub synopsis: Option<String>,
    /// Background notes
    pub background: Option<String>,
    /// Human readable air range ("Oct 3, 2002 to Feb 8, 2007")
    pub aired: Option<String>,
    /// Episode duration
    pub duration: Option<String>,
    /// Source material
    pub source: Option<String>,
    /// Age rating
    pub rating: Option<String>,
    /// Producer names
    pub producers: Vec<String>,
    /// Studio names
    pub studios: Vec<String>,
    /// Explicit genres
    pub explicit_genres: Vec<Genre>,
    /// Themes
    pub themes: Vec<Genre>,
    /// Demographics
    pub demographics: Vec<Genre>,
    /// Related titles
    pub relations: Vec<Relation>,
    /// External links
    pub external: Vec<ExternalLink>,
}

impl AnimeDetail {
    /// Wrap a summary with empty extended fields
    pub fn from_summary(summary: AnimeSummary) -> Self {
        Self {
            summary,
            kind: None,
            status: None,
            rank: None,
            members: None,
            synopsis: None,
            background: None,
            aired: None,
            duration: None,
            source: None,
            rating: None,
            producers: Vec::new(),
            studios: Vec::new(),
            explicit_genres: Vec::new(),
            themes: Vec::new(),
            demographics: Vec::new(),
            relations: Vec::new(),
            external: Vec::new(),
        }
    }
}

/// Format an integer with comma thousands separators
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_label() {
        let mut anime = AnimeSummary::new(1, "Cowboy Bebop");
        assert_eq!(anime.score_label(), "N/A");
        anime.score = Some(8.75);
        assert_eq!(anime.score_label(), "8.75");
        anime.score = Some(7.0);
        assert_eq!(anime.score_label(), "7.00");
        anime.score = Some(0.0);
        assert_eq!(anime.score_label(), "N/A");
    }

    #[test]
    fn test_episodes_and_year() {
        let mut anime = AnimeSummary::new(1, "Cowboy Bebop");
        assert_eq!(anime.episodes_label(), "N/A");
        assert_eq!(anime.release_year(), None);

        anime.episodes = Some(26);
        anime.aired_from = NaiveDate::from_ymd_opt(1998, 4, 3);
        assert_eq!(anime.episodes_label(), "26");
        assert_eq!(anime.release_year(), Some(1998));
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }
}
