//! # SmAnime 🎌
//!
//! A terminal anime browser backed by the Jikan (MyAnimeList) API.
//!
//! ## Overview
//!
//! SmAnime opens on the top airing anime, searches titles on submit and
//! shows the full record of any title, cover art included. Favorites are kept
//! in a local `SQLite` database.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          App                                │
//! │  Event loop, key handling, rendering, async worker          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │     Screens     │ │       API       │ │     Images      │
//! │                 │ │                 │ │                 │
//! │ • Home / Search │ │ • Jikan client  │ │ • Cover fetch   │
//! │ • Detail        │ │ • Gateway trait │ │ • LRU cache     │
//! │ • Navigator     │ │ • Demo snapshot │ │ • Protocols     │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//!          │                   │                   │
//!          └───────────────────┴───────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │     Config      │ │    Favorites    │ │     Models      │
//! │                 │ │                 │ │                 │
//! │ • Load/Save     │ │ • SQLite store  │ │ • AnimeSummary  │
//! │ • Theme         │ │ • Toggle / list │ │ • AnimeDetail   │
//! │ • Timeout       │ │                 │ │ • Genre         │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`api`] - Gateway trait and the Jikan client
//! - [`app`] - TUI application state and event loop
//! - [`config`] - Configuration management
//! - [`demo`] - Offline gateway over a bundled snapshot
//! - [`error`] - Fetch failures
//! - [`favorites`] - `SQLite` favorites store
//! - [`images`] - Cover download, caching and terminal protocols
//! - [`models`] - Anime records
//! - [`screens`] - Screen controllers and navigation
//! - [`theme`] - Theme support via ratatui-themes
//!
//! ## Example
//!
//! ```no_run
//! use smanime::app;
//!
//! fn main() -> anyhow::Result<()> {
//!     app::run()
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/smanime/0.1.0")]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::unused_async)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::if_not_else)]
#![allow(clippy::single_match_else)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::use_self)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::should_implement_trait)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::similar_names)]
#![allow(clippy::manual_let_else)]
#![allow(clippy::return_self_not_must_use)]

pub mod api;
pub mod app;
pub mod config;
pub mod demo;
pub mod error;
pub mod favorites;
pub mod images;
pub mod models;
pub mod paths;
pub mod screens;
pub mod theme;

// Re-export main types for convenience
pub use api::{AnimeGateway, TopFilter};
pub use app::AppState;
pub use config::Config;
pub use error::FetchError;
pub use favorites::{Favorite, FavoritesStore};
pub use models::{AnimeDetail, AnimeSummary, Genre};
pub use theme::{Theme, ThemeColors};

// Re-export theme types from ratatui-themes crate
pub use ratatui_themes::{ThemeName, ThemePalette};

/// ASCII logo for the application
pub const LOGO: &str = r"
   _____           ___          _
  / ___/ ____ ___ /   |  ____  (_)___ ___  ___
  \__ \ / __ `__ \/ /| | / __ \/ / __ `__ \/ _ \
 ___/ // / / / / / ___ |/ / / / / / / / / /  __/
/____//_/ /_/ /_/_/  |_/_/ /_/_/_/ /_/ /_/\___/
";

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
