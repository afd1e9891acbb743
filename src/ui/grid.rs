use super::layout::{self, ScreenLayout};
use crate::app::{App, Focus};
use crate::cards::{Card, GridState};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const NO_RESULTS: &str = "No podcasts found.";

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();
    let regions = layout::screen_layout(area);

    render_header(app, frame, regions.header);
    render_toolbar(app, frame, &regions);
    render_cards(app, frame, regions.grid);
    render_status(app, frame, regions.status);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let header_text = format!(
        " Podcast Explorer   [{} of {} podcasts]",
        app.results.len(),
        app.catalog.podcasts.len()
    );
    let header = Paragraph::new(header_text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(header, area);
}

fn control_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn render_toolbar(app: &App, frame: &mut Frame, regions: &ScreenLayout) {
    // ── Search ──
    let editing = app.focus == Focus::Search;
    let search_style = control_style(editing);
    let search_label = " 🔍 ";
    let search = Paragraph::new(format!("{}{}", search_label, app.query.search))
        .style(if editing { search_style } else { Style::default().fg(Color::White) })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(search_style)
                .title(if editing { " Search (Enter/Esc to finish) " } else { " Search (/) " }),
        );
    frame.render_widget(search, regions.search);

    if editing {
        let cursor_x = regions.search.x
            + 1
            + search_label.width() as u16
            + app.query.search.width() as u16;
        let max_x = regions.search.right().saturating_sub(2);
        frame.set_cursor_position((cursor_x.min(max_x), regions.search.y + 1));
    }

    // ── Genre ──
    let genre_style = control_style(app.focus == Focus::Genre);
    let genre = Paragraph::new(format!(" {} ▾", app.dropdown.selected_label()))
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(genre_style)
                .title(" Genre (g) "),
        );
    frame.render_widget(genre, regions.genre);

    // ── Sort ──
    let sort_style = control_style(app.focus == Focus::Sort);
    let sort = Paragraph::new(format!(" {}", app.query.sort.label()))
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(sort_style)
                .title(" Sort (s) "),
        );
    frame.render_widget(sort, regions.sort);
}

fn render_cards(app: &App, frame: &mut Frame, area: Rect) {
    let page_start = app.page_start();
    let visible = app.visible_cards();

    let page_info = format!(
        " {}-{} of {} ",
        if visible.is_empty() { 0 } else { page_start + 1 },
        page_start + visible.len(),
        app.grid.len()
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Podcasts ")
        .title_bottom(Line::from(page_info).alignment(Alignment::Right));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &app.grid {
        GridState::Pending => {
            let pending = Paragraph::new("Loading catalog...")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(pending, inner);
        }
        GridState::Empty => {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    NO_RESULTS,
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )),
            ])
            .alignment(Alignment::Center);
            frame.render_widget(empty, inner);
        }
        GridState::Cards(_) => {
            let cells = layout::card_cells(area, visible.len());
            let highlight = app.focus == Focus::Grid && !app.detail.is_open();
            for (offset, (card, cell)) in visible.iter().zip(cells).enumerate() {
                let selected = page_start + offset == app.selected;
                render_card(card, selected, highlight, frame, cell);
            }
        }
    }
}

fn render_card(card: &Card, selected: bool, highlight: bool, frame: &mut Frame, area: Rect) {
    let border_style = match (selected, highlight) {
        (true, true) => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        (true, false) => Style::default().fg(Color::White),
        _ => Style::default().fg(Color::DarkGray),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(
            format!(" {} ", card.initials),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ));
    let width = block.inner(area).width as usize;

    let lines = vec![
        Line::from(Span::styled(
            truncate_str(&card.title, width),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            truncate_str(&card.genres, width),
            Style::default().fg(Color::Magenta),
        )),
        Line::from(Span::styled(card.seasons_label(), Style::default().fg(Color::Yellow))),
        Line::from(Span::styled(
            truncate_str(&card.updated, width),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            truncate_str(&format!("▣ {}", card.cover), width),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status(app: &App, frame: &mut Frame, area: Rect) {
    let key = |k: &'static str| {
        Span::styled(
            k,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    };
    let status_line = Line::from(vec![
        key(" ←↑↓→"),
        Span::raw(" Navigate  "),
        key("Enter"),
        Span::raw(" Details  "),
        key("/"),
        Span::raw(" Search  "),
        key("g"),
        Span::raw(" Genre  "),
        key("s"),
        Span::raw(" Sort  "),
        key("?"),
        Span::raw(" Help  "),
        key("q"),
        Span::raw(" Quit  "),
        Span::styled(&app.status_msg, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), area);
}

/// Truncate a string to `max_width` display columns, adding "…" if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        result.push(c);
        used += w;
    }
    if max_width > 0 {
        result.push('…');
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_str("Podcast", 10), "Podcast");
        assert_eq!(truncate_str("Podcast Explorer", 8), "Podcast…");
        assert_eq!(truncate_str("abc", 0), "");
    }

    #[test]
    fn test_truncate_wide_chars() {
        // Each CJK character is two columns wide.
        assert_eq!(truncate_str("播客节目", 5), "播客…");
        assert!(truncate_str("播客节目", 5).width() <= 5);
    }
}
