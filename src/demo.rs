//! Offline gateway backed by a bundled Jikan snapshot
//!
//! Used by `smanime demo` to show the interface without network access.

use std::cmp::Ordering;
use std::time::Duration;

use crate::api::jikan::parse_detail_list;
use crate::api::{AnimeGateway, TopFilter};
use crate::error::FetchError;
use crate::models::{AnimeDetail, AnimeSummary};

const FIXTURE: &str = include_str!("../assets/demo_anime.json");

/// Serves canned records with an optional artificial delay
pub struct DemoGateway {
    records: Vec<AnimeDetail>,
    latency: Option<Duration>,
}

impl DemoGateway {
    /// Load the bundled snapshot
    pub fn new() -> Result<Self, FetchError> {
        Self::from_body(FIXTURE)
    }

    /// Load records from a Jikan list body
    pub fn from_body(body: &str) -> Result<Self, FetchError> {
        Ok(Self {
            records: parse_detail_list(body)?,
            latency: None,
        })
    }

    /// Delay every response by `latency`
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    async fn delay(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn summaries<'a>(records: impl Iterator<Item = &'a AnimeDetail>) -> Vec<AnimeSummary> {
        records.map(|d| d.summary.clone()).collect()
    }

    fn ranked_by(&self, key: impl Fn(&AnimeDetail) -> f64) -> Vec<AnimeSummary> {
        let mut records: Vec<&AnimeDetail> = self.records.iter().collect();
        records.sort_by(|a, b| key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal));
        Self::summaries(records.into_iter())
    }

    fn with_status(&self, status: &str) -> Vec<AnimeSummary> {
        Self::summaries(
            self.records
                .iter()
                .filter(|d| d.status.as_deref() == Some(status)),
        )
    }
}

impl AnimeGateway for DemoGateway {
    async fn top_anime(&self, filter: TopFilter) -> Result<Vec<AnimeSummary>, FetchError> {
        self.delay().await;
        Ok(match filter {
            TopFilter::Airing => self.with_status("Currently Airing"),
            TopFilter::Upcoming => self.with_status("Not yet aired"),
            TopFilter::ByPopularity => self.ranked_by(|d| d.members.unwrap_or(0) as f64),
            TopFilter::Favorite => self.ranked_by(|d| d.summary.score.unwrap_or(0.0)),
        })
    }

    async fn search_by_title(&self, query: &str) -> Result<Vec<AnimeSummary>, FetchError> {
        self.delay().await;
        let needle = query.to_lowercase();
        Ok(Self::summaries(
            self.records
                .iter()
                .filter(|d| d.summary.title.to_lowercase().contains(&needle)),
        ))
    }

    async fn anime_detail(&self, id: u32) -> Result<AnimeDetail, FetchError> {
        self.delay().await;
        self.records
            .iter()
            .find(|d| d.summary.id == id)
            .cloned()
            .ok_or_else(|| FetchError::not_found(format!("anime {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_snapshot_parses() {
        let gateway = DemoGateway::new().unwrap();
        assert!(gateway.records.len() >= 5);
    }

    #[test]
    fn test_top_airing_only_airing() {
        let gateway = DemoGateway::new().unwrap();
        let airing = tokio_test::block_on(gateway.top_anime(TopFilter::Airing)).unwrap();
        assert!(!airing.is_empty());
        assert!(airing.iter().any(|a| a.title == "Sousou no Frieren"));
        assert!(airing.iter().all(|a| a.title != "Cowboy Bebop"));
    }

    #[test]
    fn test_favorite_ranking_sorted_by_score() {
        let gateway = DemoGateway::new().unwrap();
        let ranked = tokio_test::block_on(gateway.top_anime(TopFilter::Favorite)).unwrap();
        let scores: Vec<f64> = ranked.iter().map(|a| a.score.unwrap_or(0.0)).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let gateway = DemoGateway::new().unwrap();
        let found = tokio_test::block_on(gateway.search_by_title("NARUTO")).unwrap();
        let titles: Vec<&str> = found.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Naruto", "Naruto: Shippuuden"]);

        let none = tokio_test::block_on(gateway.search_by_title("zzz")).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_detail_lookup() {
        let gateway = DemoGateway::new().unwrap();
        let detail = tokio_test::block_on(gateway.anime_detail(5114)).unwrap();
        assert_eq!(detail.studios, vec!["Bones".to_string()]);
        assert_eq!(detail.relations.len(), 2);

        let err = tokio_test::block_on(gateway.anime_detail(999_999)).unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_latency_is_applied() {
        let gateway = DemoGateway::new()
            .unwrap()
            .with_latency(Duration::from_millis(20));
        let start = std::time::Instant::now();
        gateway.top_anime(TopFilter::Airing).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
