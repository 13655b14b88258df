//! Semantic styling for the TUI chrome, derived from the core theme
//! palette so light and dark stay in step with the graph colors.

use ratatui::style::{Color, Modifier, Style};
use topoview_core::{Theme, ThemePalette};

/// Status accents that do not change with the theme.
pub const OK_GREEN: Color = Color::Rgb(16, 185, 129); // #10b981
pub const WARN_AMBER: Color = Color::Rgb(245, 158, 11); // #f59e0b
pub const ERROR_RED: Color = Color::Rgb(239, 68, 68); // #ef4444

/// Convert a core color to a terminal truecolor.
pub fn rgb(color: topoview_core::Color) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

fn palette(theme: Theme) -> ThemePalette {
    ThemePalette::for_theme(theme)
}

// ── Surfaces ──────────────────────────────────────────────────────────

pub fn background(theme: Theme) -> Color {
    rgb(palette(theme).background)
}

/// Fill for overlays (popup, help).
pub fn overlay(theme: Theme) -> Style {
    let p = palette(theme);
    Style::default().bg(rgb(p.surface)).fg(rgb(p.foreground))
}

pub fn text(theme: Theme) -> Style {
    Style::default().fg(rgb(palette(theme).foreground))
}

pub fn muted(theme: Theme) -> Style {
    Style::default().fg(rgb(palette(theme).muted))
}

// ── Semantic Styles ───────────────────────────────────────────────────

pub fn title_style(theme: Theme) -> Style {
    Style::default()
        .fg(rgb(palette(theme).highlight))
        .add_modifier(Modifier::BOLD)
}

pub fn border_focused(theme: Theme) -> Style {
    Style::default().fg(rgb(palette(theme).highlight))
}

pub fn border_default(theme: Theme) -> Style {
    Style::default().fg(rgb(palette(theme).edge))
}

pub fn border(theme: Theme, focused: bool) -> Style {
    if focused {
        border_focused(theme)
    } else {
        border_default(theme)
    }
}

pub fn table_header(theme: Theme) -> Style {
    Style::default()
        .fg(rgb(palette(theme).highlight))
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn table_selected(theme: Theme) -> Style {
    let p = palette(theme);
    Style::default()
        .fg(rgb(p.highlight))
        .bg(rgb(p.surface))
        .add_modifier(Modifier::BOLD)
}

pub fn tab_active(theme: Theme) -> Style {
    Style::default()
        .fg(rgb(palette(theme).highlight))
        .add_modifier(Modifier::BOLD)
}

pub fn tab_inactive(theme: Theme) -> Style {
    muted(theme)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint(theme: Theme) -> Style {
    muted(theme)
}

/// Key hint key character.
pub fn key_hint_key(theme: Theme) -> Style {
    Style::default()
        .fg(rgb(palette(theme).foreground))
        .add_modifier(Modifier::BOLD)
}
