//! UI rendering for the TUI

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};
use ratatui_image::StatefulImage;

use super::state::{AppState, Mode, View};
use crate::api::TopFilter;
use crate::models::{AnimeDetail, Genre};
use crate::screens::results::{ENTER_QUERY, HOME_EMPTY, HOME_LOADING, no_results_message};
use crate::screens::{CardView, DetailPhase, ListContent, QueryInput, Route};
use crate::theme::{Theme, ThemeColors};

/// App icon
const ICON: &str = "🎌";

/// Spinner animation frames
const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Cover column width in the detail view and list preview
const COVER_WIDTH: u16 = 30;

/// Narrowest list area that still gets a cover preview
const PREVIEW_MIN_WIDTH: u16 = 80;

/// Main render function
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let colors = state.theme.colors();

    // Set background
    let area = frame.area();
    let bg_block = Block::default().style(Style::default().bg(colors.palette.bg));
    frame.render_widget(bg_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_tabs(frame, state, chunks[0]);
    match state.view() {
        View::Home => render_home(frame, state, chunks[1]),
        View::Search => render_search(frame, state, chunks[1]),
        View::Detail => render_detail(frame, state, chunks[1]),
    }
    render_status_bar(frame, state, chunks[2]);

    // Render modal dialogs
    match state.mode {
        Mode::Help => render_help_popup(frame, state),
        Mode::ThemePicker => render_theme_picker(frame, state),
        Mode::Input | Mode::Normal => {}
    }
}

fn spinner(state: &AppState) -> &'static str {
    SPINNER[(state.current_tick() / 2) as usize % SPINNER.len()]
}

fn render_tabs(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let selected = usize::from(!matches!(state.nav.drawer(), Route::Home));

    let titles: Vec<Line> = ["Home", "Search"]
        .iter()
        .enumerate()
        .map(|(i, name)| Line::from(format!("{}  {name}", if i == selected { "●" } else { "○" })))
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(colors.border(false))
                .title(Line::from(vec![
                    Span::styled(format!(" {ICON} Sm"), colors.heading()),
                    Span::styled("Anime ", colors.key()),
                ])),
        )
        .select(selected)
        .style(colors.muted())
        .highlight_style(colors.heading())
        .divider(Span::styled(" │ ", colors.muted()));

    frame.render_widget(tabs, area);
}

fn render_input(frame: &mut Frame, colors: &ThemeColors, input: &QueryInput, editing: bool, area: Rect) {
    let mut spans = vec![Span::styled(" 🔍 ", colors.muted())];
    if input.is_empty() {
        spans.push(Span::styled(input.placeholder().to_string(), colors.muted()));
    } else {
        spans.push(Span::styled(input.text().to_string(), colors.text()));
    }
    if editing {
        spans.push(Span::styled("▏", colors.accent()));
    }

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(colors.border(editing));
    if input.can_clear() {
        block = block.title_bottom(
            Line::from(vec![
                Span::styled(" Ctrl+X", colors.key()),
                Span::styled(" clear ", colors.muted()),
            ])
            .right_aligned(),
        );
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_home(frame: &mut Frame, state: &mut AppState, area: Rect) {
    let colors = state.theme.colors();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_input(
        frame,
        &colors,
        &state.home_input,
        state.mode == Mode::Input,
        chunks[0],
    );

    let title = Line::from(Span::styled(
        format!(" 📺 {} ", TopFilter::Airing.title()),
        colors.heading(),
    ));
    let empty = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  ℹ ", colors.info()),
            Span::styled(HOME_EMPTY, colors.muted()),
        ]),
    ];
    let content = state.home.list_content();
    let is_refreshing = state.home.state().is_refreshing;
    render_results(
        frame,
        state,
        chunks[1],
        title,
        content,
        is_refreshing,
        HOME_LOADING,
        empty,
    );
}

fn render_search(frame: &mut Frame, state: &mut AppState, area: Rect) {
    let colors = state.theme.colors();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_input(
        frame,
        &colors,
        &state.search_input,
        state.mode == Mode::Input,
        chunks[0],
    );

    let title = Line::from(Span::styled(
        format!(" {} ", state.search.heading()),
        colors.heading(),
    ));
    let content = state.search.list_content();
    let empty = match content {
        ListContent::EnterQuery => vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  ", Style::default()),
                Span::styled(ENTER_QUERY, colors.muted()),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("  Press ", colors.dim()),
                Span::styled("[/]", colors.key()),
                Span::styled(" to type a title", colors.dim()),
            ]),
        ],
        _ => vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  ℹ ", colors.info()),
                Span::styled(
                    no_results_message(state.search.current_query()),
                    colors.muted(),
                ),
            ]),
        ],
    };
    let is_refreshing = state.search.state().is_refreshing;
    render_results(
        frame,
        state,
        chunks[1],
        title,
        content,
        is_refreshing,
        "Searching...",
        empty,
    );
}

#[allow(clippy::too_many_arguments)]
fn render_results(
    frame: &mut Frame,
    state: &mut AppState,
    area: Rect,
    title: Line<'_>,
    content: ListContent,
    is_refreshing: bool,
    loading_text: &str,
    empty: Vec<Line<'_>>,
) {
    let colors = state.theme.colors();

    let mut block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(colors.border(state.mode == Mode::Normal));
    if matches!(state.view(), View::Home) {
        block = block.title(
            Line::from(Span::styled(" Show more › ", colors.info())).right_aligned(),
        );
    }
    if is_refreshing {
        block = block.title(
            Line::from(Span::styled(
                format!(" {} refreshing ", spinner(state)),
                colors.secondary(),
            ))
            .right_aligned(),
        );
    }

    match content {
        ListContent::Loading => {
            let loading = Paragraph::new(vec![
                Line::from(""),
                Line::from(vec![
                    Span::styled("  ", Style::default()),
                    Span::styled(format!("{} ", spinner(state)), colors.secondary()),
                    Span::styled(loading_text.to_string(), colors.muted()),
                ]),
            ])
            .block(block);
            frame.render_widget(loading, area);
        }
        ListContent::NoResults | ListContent::EnterQuery => {
            frame.render_widget(Paragraph::new(empty).block(block), area);
        }
        ListContent::Items => {
            // Selected card's cover beside the list
            let (area, preview_area) = if state.config.show_images && area.width >= PREVIEW_MIN_WIDTH {
                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Min(0), Constraint::Length(COVER_WIDTH)])
                    .split(area);
                (columns[0], Some(columns[1]))
            } else {
                (area, None)
            };

            let results = state.current_results();
            let width = area.width.saturating_sub(4) as usize;
            let selected = state.selected_index();

            let items: Vec<ListItem> = results
                .iter()
                .enumerate()
                .map(|(i, anime)| {
                    let card = CardView::new(anime, width.saturating_sub(3));
                    card_item(
                        &colors,
                        &card,
                        state.favorite_ids.contains(&anime.id),
                        i == selected,
                        width,
                    )
                })
                .collect();

            let list = List::new(items).block(block);
            let mut list_state = ListState::default();
            list_state.select(Some(selected));
            frame.render_stateful_widget(list, area, &mut list_state);

            if let Some(preview_area) = preview_area {
                render_cover_preview(frame, state, preview_area);
            }
        }
    }
}

fn render_cover_preview(frame: &mut Frame, state: &mut AppState, area: Rect) {
    let colors = state.theme.colors();
    let block = Block::default()
        .title(Span::styled(" 🖼 Cover ", colors.accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(colors.border(false));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(url) = state.selected_anime().map(|anime| anime.image_url.clone()) else {
        return;
    };
    if state.has_cover(&url) {
        render_cover(frame, state, &url, inner);
        return;
    }

    let note = if state.loading_covers.contains(&url) {
        Line::from(vec![
            Span::styled(format!(" {} ", spinner(state)), colors.secondary()),
            Span::styled("Loading cover...", colors.muted()),
        ])
    } else {
        Line::from(Span::styled(" No cover", colors.muted()))
    };
    frame.render_widget(Paragraph::new(vec![Line::from(""), note]), inner);
}

fn render_cover(frame: &mut Frame, state: &mut AppState, url: &str, area: Rect) {
    let padded = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(1),
    };
    if let Some(protocol) = state.cover_protocol(url) {
        frame.render_stateful_widget(StatefulImage::new(), padded, protocol);
    }
}

fn card_item(
    colors: &ThemeColors,
    card: &CardView,
    is_favorite: bool,
    is_selected: bool,
    width: usize,
) -> ListItem<'static> {
    // Full-width background for the selected card
    let base = if is_selected {
        colors.selected()
    } else {
        Style::default()
    };
    let pad = |line: Line<'static>| {
        let used = line.width();
        let mut line = line;
        if used < width {
            line.spans.push(Span::styled(" ".repeat(width - used), base));
        }
        line
    };

    let mut lines = Vec::new();
    for (i, title_line) in card.title_lines.iter().enumerate() {
        let mut spans = vec![Span::styled(
            format!(" {} ", if i == 0 && is_selected { "▸" } else { " " }),
            base.patch(colors.accent()),
        )];
        spans.push(Span::styled(
            title_line.clone(),
            base.patch(colors.text()).add_modifier(Modifier::BOLD),
        ));
        if i == 0 && is_favorite {
            spans.push(Span::styled(" ♥", base.patch(colors.favorite())));
        }
        lines.push(pad(Line::from(spans)));
    }

    let mut meta = vec![
        Span::styled("   ★ ", base.patch(colors.score())),
        Span::styled(card.score.clone(), base.patch(colors.score())),
        Span::styled(format!(" ({} votes)", card.votes), base.patch(colors.muted())),
        Span::styled(format!("  {}", card.episodes_text()), base.patch(colors.dim())),
    ];
    if let Some(aired) = card.aired_text() {
        meta.push(Span::styled(format!("  {aired}"), base.patch(colors.dim())));
    }
    lines.push(pad(Line::from(meta)));

    if !card.genres.is_empty() {
        let mut chips = vec![Span::styled("   ", base)];
        for genre in &card.genres {
            chips.push(Span::styled(format!(" {genre} "), colors.chip()));
            chips.push(Span::styled(" ", base));
        }
        if let Some(more) = &card.more_genres {
            chips.push(Span::styled(more.clone(), base.patch(colors.muted())));
        }
        lines.push(pad(Line::from(chips)));
    }

    lines.push(Line::from(""));
    ListItem::new(lines)
}

fn render_detail(frame: &mut Frame, state: &mut AppState, area: Rect) {
    let colors = state.theme.colors();

    let block = Block::default()
        .title(Span::styled(
            " 📖 Anime Details ",
            colors.heading(),
        ))
        .title_bottom(
            Line::from(vec![
                Span::styled(" Esc", colors.key()),
                Span::styled(" back  ", colors.muted()),
                Span::styled("f", colors.key()),
                Span::styled(" favorite  ", colors.muted()),
                Span::styled("o", colors.key()),
                Span::styled(" open MAL ", colors.muted()),
            ])
            .right_aligned(),
        )
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(colors.border(true));

    let detail = match state.detail.phase() {
        DetailPhase::Loaded(detail) => (**detail).clone(),
        DetailPhase::NotFound => {
            let not_found = Paragraph::new(vec![
                Line::from(""),
                Line::from(vec![
                    Span::styled("  ⚠ ", colors.warning()),
                    Span::styled("Anime not found.", colors.text()),
                ]),
            ])
            .block(block);
            frame.render_widget(not_found, area);
            return;
        }
        DetailPhase::Idle | DetailPhase::Loading => {
            let loading = Paragraph::new(vec![
                Line::from(""),
                Line::from(vec![
                    Span::styled("  ", Style::default()),
                    Span::styled(format!("{} ", spinner(state)), colors.secondary()),
                    Span::styled("Loading...", colors.muted()),
                ]),
            ])
            .block(block);
            frame.render_widget(loading, area);
            return;
        }
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let url = detail.summary.image_url.clone();
    let (cover_area, text_area) = if state.config.show_images && state.has_cover(&url) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(COVER_WIDTH), Constraint::Min(0)])
            .split(inner);
        (Some(columns[0]), columns[1])
    } else {
        (None, inner)
    };

    let lines = detail_lines(&colors, &detail, state.detail.is_favorite());
    let text = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((state.detail_scroll, 0));
    frame.render_widget(text, text_area);

    if let Some(cover_area) = cover_area {
        render_cover(frame, state, &url, cover_area);
    }
}

fn section<'a>(colors: &ThemeColors, title: &'a str) -> Vec<Line<'a>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {title}"),
            colors.heading(),
        )),
    ]
}

fn field(colors: &ThemeColors, label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label:<12}"), colors.muted()),
        Span::styled(value, colors.text()),
    ])
}

fn tag_line(colors: &ThemeColors, label: &str, tags: &[Genre]) -> Option<Line<'static>> {
    if tags.is_empty() {
        return None;
    }
    let mut spans = vec![Span::styled(format!("  {label:<12}"), colors.muted())];
    for tag in tags {
        spans.push(Span::styled(format!(" {} ", tag.name), colors.chip()));
        spans.push(Span::raw(" "));
    }
    Some(Line::from(spans))
}

fn detail_lines(colors: &ThemeColors, detail: &AnimeDetail, is_favorite: bool) -> Vec<Line<'static>> {
    let summary = &detail.summary;
    let or_na = |value: &Option<String>| value.clone().unwrap_or_else(|| "N/A".to_string());

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("  {}", summary.title),
                colors.heading(),
            ),
            Span::styled(
                if is_favorite { "  ♥" } else { "  ♡" },
                if is_favorite {
                    colors.favorite()
                } else {
                    colors.muted()
                },
            ),
        ]),
        Line::from(vec![
            Span::styled("  ★ ", colors.score()),
            Span::styled(summary.score_label(), colors.score()),
            Span::styled(format!(" ({} votes)", summary.votes_label()), colors.muted()),
            Span::styled(
                detail
                    .rank
                    .map(|rank| format!("   Rank #{rank}"))
                    .unwrap_or_default(),
                colors.secondary(),
            ),
        ]),
    ];

    lines.extend(section(colors, "Information"));
    lines.push(field(colors, "Type", or_na(&detail.kind)));
    lines.push(field(colors, "Episodes", summary.episodes_label()));
    lines.push(field(colors, "Status", or_na(&detail.status)));
    lines.push(field(colors, "Aired", or_na(&detail.aired)));
    lines.push(field(colors, "Duration", or_na(&detail.duration)));
    lines.push(field(colors, "Source", or_na(&detail.source)));
    lines.push(field(colors, "Rating", or_na(&detail.rating)));
    lines.push(field(
        colors,
        "Members",
        detail
            .members
            .map_or_else(|| "N/A".to_string(), crate::models::format_count),
    ));
    if !detail.studios.is_empty() {
        lines.push(field(colors, "Studios", detail.studios.join(", ")));
    }
    if !detail.producers.is_empty() {
        lines.push(field(colors, "Producers", detail.producers.join(", ")));
    }

    let tags = [
        ("Genres", &summary.genres),
        ("Explicit", &detail.explicit_genres),
        ("Themes", &detail.themes),
        ("Demographic", &detail.demographics),
    ];
    if tags.iter().any(|(_, t)| !t.is_empty()) {
        lines.extend(section(colors, "Tags"));
        lines.extend(tags.iter().filter_map(|(label, t)| tag_line(colors, label, t)));
    }

    lines.extend(section(colors, "Synopsis"));
    for paragraph in or_na(&detail.synopsis).lines() {
        lines.push(Line::from(Span::styled(format!("  {paragraph}"), colors.text())));
    }

    if let Some(background) = &detail.background {
        lines.extend(section(colors, "Background"));
        for paragraph in background.lines() {
            lines.push(Line::from(Span::styled(format!("  {paragraph}"), colors.dim())));
        }
    }

    if !detail.relations.is_empty() {
        lines.extend(section(colors, "Related"));
        for relation in &detail.relations {
            lines.push(field(colors, &relation.kind, relation.titles.join(", ")));
        }
    }

    if !detail.external.is_empty() {
        lines.extend(section(colors, "Links"));
        for link in &detail.external {
            lines.push(Line::from(vec![
                Span::styled(format!("  {} ", link.name), colors.secondary()),
                Span::styled(link.url.clone(), colors.info().add_modifier(Modifier::UNDERLINED)),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines
}

fn render_status_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();

    let loading_indicator = if state.is_busy() {
        format!("{} ", spinner(state))
    } else {
        String::new()
    };

    let hints: &[(&str, &str)] = match (state.mode, state.view()) {
        (Mode::Input, _) => &[("Enter", "search"), ("Ctrl+X", "clear"), ("Esc", "done")],
        (_, View::Detail) => &[
            ("Esc", "back"),
            ("f", "favorite"),
            ("o", "open"),
            ("r", "reload"),
            ("?", "help"),
            ("q", "quit"),
        ],
        _ => &[
            ("Tab", "screens"),
            ("/", "search"),
            ("Enter", "details"),
            ("r", "refresh"),
            ("t", "theme"),
            ("?", "help"),
            ("q", "quit"),
        ],
    };

    let content = if state.status.is_empty() {
        let mut spans = vec![
            Span::styled(" ", Style::default()),
            Span::styled(loading_indicator, colors.secondary()),
        ];
        for (key, action) in hints {
            spans.push(Span::styled(*key, colors.key()));
            spans.push(Span::styled(format!(": {action}  "), colors.muted()));
        }
        spans
    } else {
        vec![
            Span::styled(" ", Style::default()),
            Span::styled(loading_indicator, colors.secondary()),
            Span::styled(state.status.as_str(), status_style(&colors, &state.status)),
        ]
    };

    let status =
        Paragraph::new(Line::from(content)).style(Style::default().bg(colors.panel));
    frame.render_widget(status, area);
}

fn status_style(colors: &ThemeColors, status: &str) -> Style {
    if status.starts_with('✓') {
        colors.success()
    } else if status.starts_with('❌') {
        colors.error()
    } else {
        colors.secondary()
    }
}

fn help_section<'a>(colors: &ThemeColors, title: &'a str, keys: &[(&'a str, &'a str)]) -> Vec<Line<'a>> {
    let mut lines = vec![Line::from(vec![Span::styled(
        format!("  {title}"),
        colors.heading(),
    )])];
    for (key, action) in keys {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:<17}"), colors.key()),
            Span::styled(*action, colors.text()),
        ]));
    }
    lines.push(Line::from(""));
    lines
}

fn render_help_popup(frame: &mut Frame, state: &AppState) {
    let colors = state.theme.colors();
    let popup_area = centered_rect(50, 70, frame.area());

    // Solid background to cover everything underneath
    let bg_block = Block::default().style(Style::default().bg(colors.panel));
    frame.render_widget(Clear, popup_area);
    frame.render_widget(bg_block, popup_area);

    let mut help_content = vec![Line::from("")];
    help_content.extend(help_section(
        &colors,
        "Navigation",
        &[
            ("Tab / 1 / 2", "Switch between Home and Search"),
            ("j/k or ↑/↓", "Move selection / scroll details"),
            ("g/G", "First/last item"),
            ("Enter", "Open details"),
            ("Esc / Backspace", "Back from details"),
        ],
    ));
    help_content.extend(help_section(
        &colors,
        "Search bar",
        &[
            ("/ or i", "Start typing"),
            ("Enter", "Submit query"),
            ("Ctrl+X", "Clear query"),
            ("Esc", "Stop typing"),
        ],
    ));
    help_content.extend(help_section(
        &colors,
        "Actions",
        &[
            ("r", "Refresh current screen"),
            ("f", "Toggle favorite (details)"),
            ("o", "Open on MyAnimeList"),
        ],
    ));
    help_content.extend(help_section(
        &colors,
        "General",
        &[
            ("t", "Open theme selector"),
            ("?", "Toggle this help"),
            ("q", "Quit application"),
        ],
    ));
    help_content.push(Line::from(vec![
        Span::styled("  Press ", colors.muted()),
        Span::styled("Esc", colors.key()),
        Span::styled(" or ", colors.muted()),
        Span::styled("?", colors.key()),
        Span::styled(" to close", colors.muted()),
    ]));

    let help = Paragraph::new(help_content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(colors.border(true))
                .style(Style::default().bg(colors.panel))
                .title(" ⌨ Keyboard Shortcuts ")
                .title_style(colors.accent()),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(help, popup_area);
}

fn render_theme_picker(frame: &mut Frame, state: &AppState) {
    let colors = state.theme.colors();
    let bg = colors.palette.bg;
    let popup_area = centered_rect(50, 70, frame.area());

    let bg_block = Block::default().style(Style::default().bg(bg));
    frame.render_widget(Clear, popup_area);
    frame.render_widget(bg_block, popup_area);

    let themes = Theme::all();
    let items: Vec<ListItem> = themes
        .iter()
        .enumerate()
        .map(|(i, theme_name)| {
            let palette = theme_name.palette();
            let selected = i == state.theme_picker_index;

            let preview = format!(
                "  {} {} ",
                if selected { "▸" } else { " " },
                theme_name.display_name()
            );

            let style = if selected {
                Style::default()
                    .fg(palette.accent)
                    .bg(palette.selection)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.fg).bg(bg)
            };

            ListItem::new(Line::from(vec![
                Span::styled(preview, style),
                Span::styled("█", Style::default().fg(palette.accent).bg(bg)),
                Span::styled("█", Style::default().fg(palette.secondary).bg(bg)),
                Span::styled("█", Style::default().fg(palette.success).bg(bg)),
                Span::styled("█", Style::default().fg(palette.warning).bg(bg)),
            ]))
        })
        .collect();

    let theme_list = List::new(items)
        .style(Style::default().bg(bg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(colors.border(true))
                .border_type(BorderType::Rounded)
                .style(Style::default().bg(bg))
                .title(format!(
                    " 🎨 Select Theme ({}/{}) ",
                    state.theme_picker_index + 1,
                    themes.len()
                ))
                .title_bottom(Line::from(" ↑↓ navigate │ ↵ apply │ Esc cancel ").centered()),
        );

    let mut list_state = ListState::default();
    list_state.select(Some(state.theme_picker_index));
    frame.render_stateful_widget(theme_list, popup_area, &mut list_state);
}

/// Helper function to create a centered rect
const fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_width = r.width * percent_x / 100;
    let popup_height = r.height * percent_y / 100;
    Rect {
        x: r.x + (r.width.saturating_sub(popup_width)) / 2,
        y: r.y + (r.height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height,
    }
}
