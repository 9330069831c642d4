//! Anime data gateway
//!
//! Screen controllers never talk to HTTP directly. They describe what they
//! need as a [`crate::screens::FetchRequest`], and whoever owns a gateway
//! executes it.

pub mod jikan;

use std::future::Future;

use crate::error::FetchError;
use crate::models::{AnimeDetail, AnimeSummary};

/// Ranking filters accepted by the top-anime endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TopFilter {
    /// Currently airing
    #[default]
    Airing,
    /// Not yet aired
    Upcoming,
    /// Ranked by member count
    ByPopularity,
    /// Ranked by favorites count
    Favorite,
}

impl TopFilter {
    /// All filters, in display order
    pub const fn all() -> &'static [Self] {
        &[Self::Airing, Self::Upcoming, Self::ByPopularity, Self::Favorite]
    }

    /// Value of the `filter` query parameter
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Airing => "airing",
            Self::Upcoming => "upcoming",
            Self::ByPopularity => "bypopularity",
            Self::Favorite => "favorite",
        }
    }

    /// Section title for this ranking
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Airing => "Top Airing Anime",
            Self::Upcoming => "Top Upcoming Anime",
            Self::ByPopularity => "Most Popular Anime",
            Self::Favorite => "Most Favorited Anime",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "airing" => Some(Self::Airing),
            "upcoming" => Some(Self::Upcoming),
            "bypopularity" | "popular" | "popularity" => Some(Self::ByPopularity),
            "favorite" | "favorites" => Some(Self::Favorite),
            _ => None,
        }
    }
}

impl std::fmt::Display for TopFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Source of anime records
pub trait AnimeGateway: Send + Sync {
    /// Top ranked anime for a filter (single page)
    fn top_anime(
        &self,
        filter: TopFilter,
    ) -> impl Future<Output = Result<Vec<AnimeSummary>, FetchError>> + Send;

    /// Titles matching a free-text query (single page)
    fn search_by_title(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<AnimeSummary>, FetchError>> + Send;

    /// Full record for one title
    fn anime_detail(&self, id: u32)
    -> impl Future<Output = Result<AnimeDetail, FetchError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_filter_parse() {
        for filter in TopFilter::all() {
            assert_eq!(TopFilter::from_str(filter.as_str()), Some(*filter));
        }
        assert_eq!(TopFilter::from_str("Popular"), Some(TopFilter::ByPopularity));
        assert_eq!(TopFilter::from_str("weekly"), None);
    }
}
