//! Jikan (unofficial MyAnimeList) API client

use std::sync::LazyLock;
use std::time::Duration;

use chrono::{DateTime, NaiveDate};
use regex_lite::Regex;
use reqwest::Client;
use serde::Deserialize;

use crate::error::FetchError;
use crate::models::{AnimeDetail, AnimeSummary, ExternalLink, Genre, Relation};

use super::{AnimeGateway, TopFilter};

/// Public Jikan v4 endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.jikan.moe/v4";

/// Jikan API client
pub struct JikanClient {
    client: Client,
    base_url: String,
}

impl JikanClient {
    /// Create a new client. `timeout` of `None` waits indefinitely.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Self {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Self {
            client: builder.build().unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build API URL
    fn api_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// GET a URL and return the body of a 2xx response
    async fn get_body(&self, url: &str) -> Result<String, FetchError> {
        tracing::debug!("GET {url}");

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: if body.is_empty() {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                } else {
                    body
                },
            });
        }

        Ok(response.text().await?)
    }
}

impl AnimeGateway for JikanClient {
    async fn top_anime(&self, filter: TopFilter) -> Result<Vec<AnimeSummary>, FetchError> {
        let url = self.api_url(&format!("/top/anime?filter={}", filter.as_str()));
        let body = self.get_body(&url).await?;
        parse_list(&body)
    }

    async fn search_by_title(&self, query: &str) -> Result<Vec<AnimeSummary>, FetchError> {
        let url = self.api_url(&format!("/anime?q={}", urlencoding::encode(query)));
        let body = self.get_body(&url).await?;
        parse_list(&body)
    }

    async fn anime_detail(&self, id: u32) -> Result<AnimeDetail, FetchError> {
        let url = self.api_url(&format!("/anime/{id}/full"));
        let body = self.get_body(&url).await?;
        parse_detail(&body)
    }
}

/// Parse a `{ "data": [Anime] }` response body
pub fn parse_list(body: &str) -> Result<Vec<AnimeSummary>, FetchError> {
    let list: JikanList = serde_json::from_str(body)?;
    Ok(list
        .data
        .unwrap_or_default()
        .into_iter()
        .map(JikanAnime::into_summary)
        .collect())
}

/// Parse a `{ "data": Anime }` response body
pub fn parse_detail(body: &str) -> Result<AnimeDetail, FetchError> {
    let single: JikanSingle = serde_json::from_str(body)?;
    Ok(single.data.into_detail())
}

/// Parse a `{ "data": [Anime] }` body keeping the full records
pub fn parse_detail_list(body: &str) -> Result<Vec<AnimeDetail>, FetchError> {
    let list: JikanList = serde_json::from_str(body)?;
    Ok(list
        .data
        .unwrap_or_default()
        .into_iter()
        .map(JikanAnime::into_detail)
        .collect())
}

// ==================== API Types ====================

#[derive(Debug, Deserialize)]
struct JikanList {
    data: Option<Vec<JikanAnime>>,
}

#[derive(Debug, Deserialize)]
struct JikanSingle {
    data: JikanAnime,
}

#[derive(Debug, Deserialize)]
struct JikanAnime {
    mal_id: u32,
    url: Option<String>,
    images: Option<JikanImages>,
    title: String,
    #[serde(rename = "type")]
    kind: Option<String>,
    source: Option<String>,
    episodes: Option<u32>,
    status: Option<String>,
    aired: Option<JikanAired>,
    duration: Option<String>,
    rating: Option<String>,
    score: Option<f64>,
    scored_by: Option<u64>,
    rank: Option<u32>,
    members: Option<u64>,
    synopsis: Option<String>,
    background: Option<String>,
    producers: Option<Vec<JikanEntity>>,
    studios: Option<Vec<JikanEntity>>,
    genres: Option<Vec<JikanEntity>>,
    explicit_genres: Option<Vec<JikanEntity>>,
    themes: Option<Vec<JikanEntity>>,
    demographics: Option<Vec<JikanEntity>>,
    relations: Option<Vec<JikanRelation>>,
    external: Option<Vec<JikanExternal>>,
}

#[derive(Debug, Deserialize)]
struct JikanImages {
    jpg: Option<JikanImageSet>,
}

#[derive(Debug, Deserialize)]
struct JikanImageSet {
    image_url: Option<String>,
    large_image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JikanAired {
    from: Option<String>,
    prop: Option<JikanAiredProp>,
    string: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JikanAiredProp {
    from: Option<JikanDateParts>,
}

#[derive(Debug, Deserialize)]
struct JikanDateParts {
    day: Option<u32>,
    month: Option<u32>,
    year: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct JikanEntity {
    mal_id: u32,
    name: String,
}

#[derive(Debug, Deserialize)]
struct JikanRelation {
    relation: String,
    #[serde(default)]
    entry: Vec<JikanEntity>,
}

#[derive(Debug, Deserialize)]
struct JikanExternal {
    name: String,
    url: String,
}

static MAL_CREDIT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\s*\[Written by MAL Rewrite\]\s*$").ok());

fn clean_synopsis(text: String) -> Option<String> {
    let cleaned = match MAL_CREDIT.as_ref() {
        Some(re) => re.replace(&text, "").trim().to_string(),
        None => text.trim().to_string(),
    };
    (!cleaned.is_empty()).then_some(cleaned)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn into_genres(entities: Option<Vec<JikanEntity>>) -> Vec<Genre> {
    entities
        .unwrap_or_default()
        .into_iter()
        .map(|e| Genre {
            id: e.mal_id,
            name: e.name,
        })
        .collect()
}

fn into_names(entities: Option<Vec<JikanEntity>>) -> Vec<String> {
    entities
        .unwrap_or_default()
        .into_iter()
        .map(|e| e.name)
        .collect()
}

impl JikanAired {
    /// First available date fragment: structured parts, then the ISO timestamp
    fn from_date(&self) -> Option<NaiveDate> {
        let from_parts = self
            .prop
            .as_ref()
            .and_then(|p| p.from.as_ref())
            .and_then(|parts| {
                let year = parts.year?;
                NaiveDate::from_ymd_opt(year, parts.month.unwrap_or(1), parts.day.unwrap_or(1))
            });

        from_parts.or_else(|| {
            self.from
                .as_deref()
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|dt| dt.date_naive())
        })
    }
}

impl JikanAnime {
    fn image_url(&self) -> String {
        self.images
            .as_ref()
            .and_then(|i| i.jpg.as_ref())
            .and_then(|jpg| {
                non_empty(jpg.large_image_url.clone()).or_else(|| non_empty(jpg.image_url.clone()))
            })
            .unwrap_or_default()
    }

    fn into_summary(self) -> AnimeSummary {
        self.split().0
    }

    fn into_detail(self) -> AnimeDetail {
        let (summary, rest) = self.split();
        let mut detail = AnimeDetail::from_summary(summary);
        rest.fill(&mut detail);
        detail
    }

    /// Separate the card fields from the detail-only fields
    fn split(self) -> (AnimeSummary, JikanAnime) {
        let image_url = self.image_url();
        let aired_from = self.aired.as_ref().and_then(JikanAired::from_date);

        let mut rest = self;
        let summary = AnimeSummary {
            id: rest.mal_id,
            title: std::mem::take(&mut rest.title),
            image_url,
            score: rest.score,
            scored_by: rest.scored_by,
            episodes: rest.episodes,
            genres: into_genres(rest.genres.take()),
            aired_from,
            url: rest.url.take(),
        };
        (summary, rest)
    }

    fn fill(self, detail: &mut AnimeDetail) {
        detail.kind = non_empty(self.kind);
        detail.status = non_empty(self.status);
        detail.rank = self.rank;
        detail.members = self.members;
        detail.synopsis = self.synopsis.and_then(clean_synopsis);
        detail.background = non_empty(self.background);
        detail.aired = self.aired.and_then(|a| non_empty(a.string));
        detail.duration = non_empty(self.duration);
        detail.source = non_empty(self.source);
        detail.rating = non_empty(self.rating);
        detail.producers = into_names(self.producers);
        detail.studios = into_names(self.studios);
        detail.explicit_genres = into_genres(self.explicit_genres);
        detail.themes = into_genres(self.themes);
        detail.demographics = into_genres(self.demographics);
        detail.relations = self
            .relations
            .unwrap_or_default()
            .into_iter()
            .map(|r| Relation {
                kind: r.relation,
                titles: r.entry.into_iter().map(|e| e.name).collect(),
            })
            .collect();
        detail.external = self
            .external
            .unwrap_or_default()
            .into_iter()
            .map(|e| ExternalLink {
                name: e.name,
                url: e.url,
            })
            .collect();
    }
}
