//! Layout calculations for the roster TUI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use roster_core::ROSTER_CAPACITY;

/// Screen areas for the main view
pub struct AppLayout {
    pub title_area: Rect,
    pub card_areas: Vec<Rect>,
    pub history_area: Rect,
    pub status_bar: Rect,
    pub hotkey_bar: Rect,
    pub input_area: Rect,
}

impl AppLayout {
    pub fn calculate(area: Rect) -> Self {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title bar
                Constraint::Length(7), // Team cards
                Constraint::Min(4),    // History
                Constraint::Length(1), // Status bar
                Constraint::Length(1), // Hotkey bar
                Constraint::Length(3), // Input area
            ])
            .split(area);

        let card_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![
                Constraint::Ratio(1, ROSTER_CAPACITY as u32);
                ROSTER_CAPACITY
            ])
            .split(main_chunks[1])
            .to_vec();

        Self {
            title_area: main_chunks[0],
            card_areas,
            history_area: main_chunks[2],
            status_bar: main_chunks[3],
            hotkey_bar: main_chunks[4],
            input_area: main_chunks[5],
        }
    }
}

/// Calculate fixed-size centered popup
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
