//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Toolbar on top, canvas/info in the middle, status bar at the bottom.
pub struct AppLayout {
    pub toolbar_area: Rect,
    pub main_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // selectors + buttons
                Constraint::Min(3),    // canvas / info panel
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            toolbar_area: chunks[0],
            main_area: chunks[1],
            status_area: chunks[2],
        }
    }

    /// Drawable interior of the main area (inside its border).
    pub fn canvas_area(&self) -> Rect {
        Rect::new(
            self.main_area.x.saturating_add(1),
            self.main_area.y.saturating_add(1),
            self.main_area.width.saturating_sub(2),
            self.main_area.height.saturating_sub(2),
        )
    }
}
