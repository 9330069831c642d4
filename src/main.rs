//! SmAnime - A terminal anime browser powered by the Jikan API
#![allow(clippy::uninlined_format_args)]

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use smanime::api::jikan::JikanClient;
use smanime::api::{AnimeGateway, TopFilter};
use smanime::models::{AnimeDetail, format_count};
use smanime::screens::CardView;
use smanime::{Config, FavoritesStore};

/// Card text width for CLI listings
const CLI_WIDTH: usize = 72;

fn main() -> Result<()> {
    // Parse CLI arguments
    let command = parse_args()?;
    init_logging(&command);

    match command {
        Command::Run => smanime::app::run(),
        Command::Demo => smanime::app::run_demo(),
        Command::Top { filter, limit } => block_on(top_cli(filter, limit)),
        Command::Search { query, limit } => block_on(search_cli(&query, limit)),
        Command::Show { id } => block_on(show_cli(id)),
        Command::Favorites { remove } => favorites_cli(remove),
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Initialize logging (RUST_LOG=debug for verbose output).
///
/// The TUI owns the terminal, so it logs to a file instead of stderr.
fn init_logging(command: &Command) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let log_file = matches!(command, Command::Run | Command::Demo)
        .then(|| smanime::paths::log_path().ok())
        .flatten()
        .and_then(|path| OpenOptions::new().create(true).append(true).open(path).ok());

    match log_file {
        Some(file) => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init(),
        None => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

fn block_on<F: std::future::Future<Output = Result<()>>>(future: F) -> Result<()> {
    Runtime::new()
        .context("Failed to start async runtime")?
        .block_on(future)
}

/// CLI commands
enum Command {
    Run,
    Demo,
    Top { filter: TopFilter, limit: usize },
    Search { query: String, limit: usize },
    Show { id: u32 },
    Favorites { remove: Option<u32> },
    Help,
    Version,
}

fn parse_limit(args: &[String]) -> usize {
    args.iter()
        .position(|a| a == "--limit" || a == "-l")
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
        .unwrap_or(10)
}

fn parse_id(arg: Option<&String>) -> Result<u32> {
    let arg = arg.ok_or_else(|| anyhow::anyhow!("Missing anime id"))?;
    arg.parse()
        .with_context(|| format!("Invalid anime id: {arg}"))
}

fn parse_args() -> Result<Command> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() == 1 {
        return Ok(Command::Run);
    }

    match args[1].as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "-v" | "--version" | "version" => Ok(Command::Version),
        "--demo" | "demo" => Ok(Command::Demo),

        "top" => {
            let name = args
                .iter()
                .position(|a| a == "--filter" || a == "-f")
                .and_then(|i| args.get(i + 1))
                .or_else(|| args.get(2).filter(|a| !a.starts_with('-')));
            let filter = match name {
                Some(name) => TopFilter::from_str(name).ok_or_else(|| {
                    anyhow::anyhow!(
                        "Unknown filter: {name}\nSupported: airing, upcoming, bypopularity, favorite"
                    )
                })?,
                None => TopFilter::Airing,
            };
            Ok(Command::Top {
                filter,
                limit: parse_limit(&args),
            })
        }

        "search" | "s" => {
            let query = args
                .get(2)
                .filter(|q| !q.trim().is_empty())
                .ok_or_else(|| anyhow::anyhow!("Missing search query"))?
                .trim()
                .to_string();
            Ok(Command::Search {
                query,
                limit: parse_limit(&args),
            })
        }

        "show" => Ok(Command::Show {
            id: parse_id(args.get(2))?,
        }),

        "favorites" | "favs" => match args.get(2).map(String::as_str) {
            Some("remove" | "rm") => Ok(Command::Favorites {
                remove: Some(parse_id(args.get(3))?),
            }),
            Some(other) => Err(anyhow::anyhow!(
                "Unknown favorites action: {other}\nRun 'smanime --help' for usage"
            )),
            None => Ok(Command::Favorites { remove: None }),
        },

        other => Err(anyhow::anyhow!(
            "Unknown command: {other}\nRun 'smanime --help' for usage"
        )),
    }
}

fn print_help() {
    let config_path = smanime::Config::default_path()
        .map_or_else(|_| "Unknown".to_string(), |p| p.display().to_string());

    println!(
        r#"{}
🎌 SmAnime - A terminal anime browser

USAGE:
    smanime                            Launch TUI
    smanime [COMMAND]

COMMANDS:
    demo                               Launch TUI with offline sample data

    top [OPTIONS]                      Show top anime
      Options:
        -f, --filter <filter>          airing (default), upcoming,
                                       bypopularity, favorite
        -l, --limit <n>                Number of titles (default: 10)
      Examples:
        smanime top
        smanime top --filter bypopularity --limit 25

    search <query> [OPTIONS]           Search anime by title
      Options:
        -l, --limit <n>                Number of titles (default: 10)
      Examples:
        smanime search "cowboy bebop"

    show <id>                          Show details for a MyAnimeList id
      Examples:
        smanime show 5114

    favorites [remove <id>]            List or remove saved favorites

OPTIONS:
    -h, --help                         Show this help message
    -v, --version                      Show version information

KEYBINDINGS (TUI):
    Navigation
      j/↓           Move down
      k/↑           Move up
      Tab           Switch Home/Search
      g/G           Jump to top/bottom
      Enter         Open details
      Esc           Back

    Actions
      /             Search
      Ctrl+X        Clear search
      r             Refresh
      f             Favorite (details)
      o             Open on MyAnimeList

    View
      t             Change theme
      ?             Help

CONFIG:
    {}

LOGS:
    {}
"#,
        smanime::LOGO,
        config_path,
        smanime::paths::log_path()
            .map_or_else(|_| "Unknown".to_string(), |p| p.display().to_string()),
    );
}

fn print_version() {
    println!("smanime {}", smanime::VERSION);
}

fn client() -> Result<JikanClient> {
    let config = Config::load()?;
    Ok(JikanClient::new(
        &config.api_base_url,
        config.request_timeout(),
    ))
}

fn print_cards(anime: &[smanime::models::AnimeSummary], limit: usize) -> Result<()> {
    let favorites = FavoritesStore::open()?.ids()?;

    for item in anime.iter().take(limit) {
        let card = CardView::new(item, CLI_WIDTH);
        let marker = if favorites.contains(&item.id) { " ♥" } else { "" };
        println!("\n[{}]{}", item.id, marker);
        for line in card.to_plain_lines() {
            println!("  {}", line);
        }
    }
    Ok(())
}

async fn top_cli(filter: TopFilter, limit: usize) -> Result<()> {
    let anime = client()?
        .top_anime(filter)
        .await
        .context("Failed to fetch top anime")?;

    println!("📺 {}", filter.title());
    println!("{}", "─".repeat(60));

    if anime.is_empty() {
        println!("No anime found.");
        return Ok(());
    }
    print_cards(&anime, limit)
}

async fn search_cli(query: &str, limit: usize) -> Result<()> {
    let anime = client()?
        .search_by_title(query)
        .await
        .context("Failed to search anime")?;

    println!("🔍 Results for: \"{}\"", query);
    println!("{}", "─".repeat(60));

    if anime.is_empty() {
        println!("No results found for \"{}\".", query);
        return Ok(());
    }
    print_cards(&anime, limit)
}

fn print_detail(detail: &AnimeDetail) {
    let summary = &detail.summary;
    let or_na = |v: &Option<String>| v.clone().unwrap_or_else(|| "N/A".to_string());

    println!("{}", summary.title);
    println!("{}", "─".repeat(60));
    println!(
        "★ {} ({} votes){}",
        summary.score_label(),
        summary.votes_label(),
        detail.rank.map(|r| format!("  Rank #{r}")).unwrap_or_default()
    );
    println!("Type:      {}", or_na(&detail.kind));
    println!("Episodes:  {}", summary.episodes_label());
    println!("Status:    {}", or_na(&detail.status));
    println!("Aired:     {}", or_na(&detail.aired));
    println!("Duration:  {}", or_na(&detail.duration));
    println!("Rating:    {}", or_na(&detail.rating));
    println!(
        "Members:   {}",
        detail
            .members
            .map_or_else(|| "N/A".to_string(), format_count)
    );
    if !detail.studios.is_empty() {
        println!("Studios:   {}", detail.studios.join(", "));
    }
    if !summary.genres.is_empty() {
        let genres: Vec<&str> = summary.genres.iter().map(|g| g.name.as_str()).collect();
        println!("Genres:    {}", genres.join(", "));
    }
    if let Some(synopsis) = &detail.synopsis {
        println!("\n{}", textwrap::fill(synopsis, 72));
    }
    if let Some(url) = &summary.url {
        println!("\n{}", url);
    }
}

async fn show_cli(id: u32) -> Result<()> {
    let detail = client()?
        .anime_detail(id)
        .await
        .with_context(|| format!("Failed to fetch anime {id}"))?;
    print_detail(&detail);

    if FavoritesStore::open()?.is_favorite(id)? {
        println!("\n♥ In your favorites");
    }
    Ok(())
}

fn favorites_cli(remove: Option<u32>) -> Result<()> {
    let store = FavoritesStore::open()?;

    if let Some(id) = remove {
        if store.remove(id)? {
            println!("✓ Removed {} from favorites", id);
        } else {
            println!("{} is not in your favorites.", id);
        }
        return Ok(());
    }

    let favorites = store.list()?;
    if favorites.is_empty() {
        println!("No favorites yet.");
        println!("\nPress 'f' on an anime's detail screen to save it.");
        return Ok(());
    }

    println!("Favorites:\n");
    for favorite in favorites {
        println!(
            "  ♥ {} [{}]\n    Added: {}",
            favorite.title,
            favorite.anime_id,
            favorite.added_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}
