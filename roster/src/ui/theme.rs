//! Color theme and styling for the roster TUI

use ratatui::style::{Color, Modifier, Style};

/// Roster UI color theme
#[derive(Debug, Clone)]
pub struct RosterTheme {
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,

    pub card_title: Color,
    pub pending: Color,
    pub info_text: Color,
    pub error_text: Color,
    pub system_text: Color,
    pub input_text: Color,
}

impl Default for RosterTheme {
    fn default() -> Self {
        Self {
            foreground: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Cyan,

            card_title: Color::Yellow,
            pending: Color::DarkGray,
            info_text: Color::Green,
            error_text: Color::LightRed,
            system_text: Color::DarkGray,
            input_text: Color::Cyan,
        }
    }
}

impl RosterTheme {
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }

    pub fn card_title_style(&self) -> Style {
        Style::default()
            .fg(self.card_title)
            .add_modifier(Modifier::BOLD)
    }

    pub fn system_style(&self) -> Style {
        Style::default()
            .fg(self.system_text)
            .add_modifier(Modifier::DIM)
    }

    pub fn input_style(&self) -> Style {
        Style::default().fg(self.input_text)
    }

    /// Badge color for a creature type, falling back to the foreground.
    pub fn type_color(&self, kind: &str) -> Color {
        match kind {
            "fire" => Color::LightRed,
            "water" => Color::LightBlue,
            "grass" | "bug" => Color::LightGreen,
            "electric" => Color::Yellow,
            "ice" => Color::Cyan,
            "poison" | "ghost" => Color::Magenta,
            "psychic" | "fairy" => Color::LightMagenta,
            "ground" | "rock" | "fighting" => Color::Rgb(181, 137, 82),
            "dragon" => Color::Blue,
            "dark" | "steel" => Color::Gray,
            "flying" => Color::LightCyan,
            _ => self.foreground,
        }
    }

    pub fn type_style(&self, kind: &str) -> Style {
        Style::default()
            .fg(self.type_color(kind))
            .add_modifier(Modifier::BOLD)
    }
}
