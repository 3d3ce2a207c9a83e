//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme.  All widget styles come from here.
pub struct Theme;

impl Theme {
    // ── toolbar ────────────────────────────────────────────────
    pub fn toolbar_style() -> Style {
        Style::default().bg(Color::Black).fg(Color::Gray)
    }

    pub fn field_label_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn field_value_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn focused_field_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn button_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    // ── canvas ─────────────────────────────────────────────────
    pub fn node_label_style() -> Style {
        Style::default().fg(Color::White)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn alert_style() -> Style {
        Style::default()
            .fg(Color::LightRed)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
