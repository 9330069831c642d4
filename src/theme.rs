//! Theme selection and the styles the browser draws with.
//!
//! Palettes come from `ratatui-themes`. Panel and chip backgrounds are mixed
//! from the palette so they read on light and dark themes alike.

use ratatui::style::{Color, Modifier, Style};
use ratatui_themes::{ThemeName, ThemePalette};
use serde::{Deserialize, Serialize};

/// Share of the foreground mixed into the status bar and popup background
const PANEL_MIX: f32 = 0.08;

/// Share of the foreground mixed into genre chips
const CHIP_MIX: f32 = 0.18;

/// Configured theme, stored in `config.toml` by its slug.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Theme(pub ThemeName);

impl Theme {
    /// Every theme the picker offers, in rotation order.
    #[must_use]
    pub const fn all() -> &'static [ThemeName] {
        ThemeName::all()
    }

    /// Next theme in rotation
    #[must_use]
    pub fn next(&self) -> Self {
        Self(self.0.next())
    }

    /// Previous theme in rotation
    #[must_use]
    pub fn prev(&self) -> Self {
        Self(self.0.prev())
    }

    /// Display name, e.g. "Tokyo Night"
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.0.display_name()
    }

    /// Styles for this theme
    #[must_use]
    pub fn colors(&self) -> ThemeColors {
        ThemeColors::from_palette(self.0.palette())
    }

    /// The wrapped `ThemeName`
    #[must_use]
    pub const fn inner(&self) -> ThemeName {
        self.0
    }
}

impl From<ThemeName> for Theme {
    fn from(name: ThemeName) -> Self {
        Self(name)
    }
}

/// Palette plus the two backgrounds derived from it.
#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    /// Source palette
    pub palette: ThemePalette,
    /// Status bar and popup background
    pub panel: Color,
    /// Genre chip background
    pub chip_bg: Color,
}

impl ThemeColors {
    /// Derive the browser's colors from a palette
    #[must_use]
    pub fn from_palette(palette: ThemePalette) -> Self {
        Self {
            palette,
            panel: mix(palette.bg, palette.fg, PANEL_MIX).unwrap_or(palette.bg),
            chip_bg: mix(palette.bg, palette.fg, CHIP_MIX).unwrap_or(palette.selection),
        }
    }

    /// Body text
    #[must_use]
    pub fn text(&self) -> Style {
        Style::default().fg(self.palette.fg)
    }

    /// Secondary body text, such as a background section
    #[must_use]
    pub fn dim(&self) -> Style {
        self.text().add_modifier(Modifier::DIM)
    }

    /// Labels, placeholders and hints
    #[must_use]
    pub fn muted(&self) -> Style {
        Style::default().fg(self.palette.muted)
    }

    /// Accent foreground
    #[must_use]
    pub fn accent(&self) -> Style {
        Style::default().fg(self.palette.accent)
    }

    /// Block titles and section headings
    #[must_use]
    pub fn heading(&self) -> Style {
        self.accent().add_modifier(Modifier::BOLD)
    }

    /// Spinners, ranks and link names
    #[must_use]
    pub fn secondary(&self) -> Style {
        Style::default().fg(self.palette.secondary)
    }

    /// Informational notes and URLs
    #[must_use]
    pub fn info(&self) -> Style {
        Style::default().fg(self.palette.info)
    }

    /// Successful actions in the status bar
    #[must_use]
    pub fn success(&self) -> Style {
        Style::default().fg(self.palette.success)
    }

    /// Not-found notices
    #[must_use]
    pub fn warning(&self) -> Style {
        Style::default().fg(self.palette.warning)
    }

    /// Failed actions in the status bar
    #[must_use]
    pub fn error(&self) -> Style {
        Style::default().fg(self.palette.error)
    }

    /// Block border, accented when the block has focus
    #[must_use]
    pub fn border(&self, focused: bool) -> Style {
        let color = if focused {
            self.palette.accent
        } else {
            self.palette.muted
        };
        Style::default().fg(color)
    }

    /// Background of the selected card
    #[must_use]
    pub fn selected(&self) -> Style {
        Style::default()
            .bg(self.palette.selection)
            .fg(self.palette.fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Keyboard shortcut labels
    #[must_use]
    pub fn key(&self) -> Style {
        self.secondary().add_modifier(Modifier::BOLD)
    }

    /// Score star and value
    #[must_use]
    pub fn score(&self) -> Style {
        Style::default()
            .fg(self.palette.warning)
            .add_modifier(Modifier::BOLD)
    }

    /// Genre and theme tags
    #[must_use]
    pub fn chip(&self) -> Style {
        Style::default().bg(self.chip_bg).fg(self.palette.secondary)
    }

    /// Favorite heart
    #[must_use]
    pub fn favorite(&self) -> Style {
        Style::default()
            .fg(self.palette.error)
            .add_modifier(Modifier::BOLD)
    }
}

/// Move `base` toward `toward` by `amount` (0.0..=1.0).
///
/// Only RGB colors can be mixed; named colors yield `None`.
fn mix(base: Color, toward: Color, amount: f32) -> Option<Color> {
    let (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) = (base, toward) else {
        return None;
    };
    let channel = |a: u8, b: u8| {
        let value = f32::from(a) + (f32::from(b) - f32::from(a)) * amount;
        value.round().clamp(0.0, 255.0) as u8
    };
    Some(Color::Rgb(channel(r1, r2), channel(g1, g2), channel(b1, b2)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_rotation_wraps() {
        let first = Theme::default();
        let mut theme = first;
        for _ in 0..Theme::all().len() {
            theme = theme.next();
        }
        assert_eq!(theme, first);
        assert_eq!(first.next().prev(), first);
    }

    #[test]
    fn test_mix_moves_toward_foreground() {
        let black = Color::Rgb(0, 0, 0);
        let white = Color::Rgb(255, 255, 255);
        assert_eq!(mix(black, white, 0.5), Some(Color::Rgb(128, 128, 128)));
        // Light themes darken instead of saturating at white
        assert_eq!(mix(white, black, 0.2), Some(Color::Rgb(204, 204, 204)));
        assert_eq!(mix(Color::Red, white, 0.5), None);
    }

    #[test]
    fn test_chips_stand_out_on_every_theme() {
        for name in Theme::all() {
            let colors = Theme::from(*name).colors();
            assert_ne!(colors.chip_bg, colors.palette.bg, "{}", name.display_name());
            assert_eq!(colors.favorite().fg, Some(colors.palette.error));
        }
    }
}
