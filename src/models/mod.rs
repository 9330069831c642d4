//! Data models for SmAnime

mod anime;

pub use anime::{AnimeDetail, AnimeSummary, ExternalLink, Genre, Relation, format_count};
