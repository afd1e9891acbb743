//! Screen geometry shared by drawing and mouse hit-testing.

use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};

pub const CARD_WIDTH: u16 = 34;
pub const CARD_HEIGHT: u16 = 7;

/// Top-level regions of the main screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub search: Rect,
    pub genre: Rect,
    pub sort: Rect,
    pub grid: Rect,
    pub status: Rect,
}

pub fn screen_layout(area: Rect) -> ScreenLayout {
    // Layout: header(3) + toolbar(3) + grid(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    let toolbar = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Percentage(30),
            Constraint::Percentage(20),
        ])
        .split(chunks[1]);

    ScreenLayout {
        header: chunks[0],
        search: toolbar[0],
        genre: toolbar[1],
        sort: toolbar[2],
        grid: chunks[2],
        status: chunks[3],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub columns: usize,
    pub rows: usize,
}

impl GridGeometry {
    pub fn page_size(&self) -> usize {
        self.columns * self.rows
    }
}

fn grid_inner(grid: Rect) -> Rect {
    grid.inner(Margin::new(1, 1))
}

/// How many cards fit in the grid block. Never less than one.
pub fn grid_geometry(grid: Rect) -> GridGeometry {
    let inner = grid_inner(grid);
    GridGeometry {
        columns: ((inner.width / CARD_WIDTH) as usize).max(1),
        rows: ((inner.height / CARD_HEIGHT) as usize).max(1),
    }
}

/// Cells for the first `count` cards of a page, row-major. Columns stretch to the full width.
pub fn card_cells(grid: Rect, count: usize) -> Vec<Rect> {
    let inner = grid_inner(grid);
    let geometry = grid_geometry(grid);
    let cell_width = inner.width / geometry.columns as u16;
    let cell_height = CARD_HEIGHT.min(inner.height);

    (0..count.min(geometry.page_size()))
        .map(|i| {
            let col = (i % geometry.columns) as u16;
            let row = (i / geometry.columns) as u16;
            Rect::new(
                inner.x + col * cell_width,
                inner.y + row * cell_height,
                cell_width,
                cell_height,
            )
        })
        .collect()
}

/// Create a centered rectangle using percentage of parent area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

/// The modal content panel. Everything outside it is backdrop.
pub fn modal_area(area: Rect) -> Rect {
    centered_rect(80, 80, area)
}

pub const CLOSE_LABEL: &str = "[×]";

/// The close control sits on the modal's top border, right-aligned.
pub fn close_button_area(modal: Rect) -> Rect {
    let width = 3;
    Rect::new(
        modal.right().saturating_sub(width + 2).max(modal.x),
        modal.y,
        width.min(modal.width),
        1.min(modal.height),
    )
}

/// Popup listing the genre options, hanging under the genre control.
pub fn dropdown_area(genre: Rect, options: usize, screen: Rect) -> Rect {
    let y = genre.bottom().min(screen.bottom());
    let available = screen.bottom().saturating_sub(y);
    let height = (options as u16).saturating_add(2).min(available);
    Rect::new(genre.x, y, genre.width, height)
}

/// First option shown when the list is taller than the popup.
pub fn dropdown_offset(highlighted: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 {
        return 0;
    }
    highlighted.saturating_sub(visible_rows - 1)
}
