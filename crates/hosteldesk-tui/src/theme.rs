//! WorkNStay palette and semantic styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

use hosteldesk_core::Severity;

// ── Core Palette ──────────────────────────────────────────────────────

pub const BRAND_GREEN: Color = Color::Rgb(26, 127, 90); // #1a7f5a
pub const SUCCESS_GREEN: Color = Color::Rgb(16, 185, 129); // #10b981
pub const WARNING_AMBER: Color = Color::Rgb(245, 158, 11); // #f59e0b
pub const ERROR_RED: Color = Color::Rgb(239, 68, 68); // #ef4444
pub const INFO_BLUE: Color = Color::Rgb(59, 130, 246); // #3b82f6

// ── Extended Palette ──────────────────────────────────────────────────

pub const SLATE_LIGHT: Color = Color::Rgb(148, 163, 184); // #94a3b8
pub const SLATE_MID: Color = Color::Rgb(100, 116, 139); // #64748b
pub const CARD_SLATE: Color = Color::Rgb(30, 41, 59); // #1e293b
pub const BG_DARK: Color = Color::Rgb(15, 23, 42); // #0f172a
pub const PAPER_WHITE: Color = Color::Rgb(241, 245, 249); // #f1f5f9
pub const STAR_GOLD: Color = Color::Rgb(251, 191, 36); // #fbbf24

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(BRAND_GREEN).add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(BRAND_GREEN)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(SLATE_MID)
}

/// Table header row.
pub fn table_header() -> Style {
    Style::default()
        .fg(BRAND_GREEN)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Normal table row text.
pub fn table_row() -> Style {
    Style::default().fg(PAPER_WHITE)
}

/// Selected / highlighted table row.
pub fn table_selected() -> Style {
    Style::default()
        .fg(BRAND_GREEN)
        .bg(CARD_SLATE)
        .add_modifier(Modifier::BOLD)
}

/// Active tab in the tab bar.
pub fn tab_active() -> Style {
    Style::default()
        .fg(BRAND_GREEN)
        .add_modifier(Modifier::BOLD)
}

/// Inactive tab in the tab bar.
pub fn tab_inactive() -> Style {
    Style::default().fg(SLATE_LIGHT)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(SLATE_MID)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(BRAND_GREEN).add_modifier(Modifier::BOLD)
}

/// Accent color for a notice severity.
pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Success => SUCCESS_GREEN,
        Severity::Warning => WARNING_AMBER,
        Severity::Error => ERROR_RED,
        Severity::Info => INFO_BLUE,
    }
}

/// Toast icon for a notice severity.
pub fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "\u{2713}",
        Severity::Warning => "!",
        Severity::Error => "\u{2717}",
        Severity::Info => "\u{00b7}",
    }
}
