use super::layout;
use crate::app::App;
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

pub fn render(app: &App, frame: &mut Frame) {
    let regions = app.layout();
    let area = layout::dropdown_area(regions.genre, app.dropdown.options.len(), frame.area());
    if area.height < 3 {
        return;
    }
    frame.render_widget(Clear, area);

    let visible_rows = area.height.saturating_sub(2) as usize;
    let offset = layout::dropdown_offset(app.dropdown.highlighted, visible_rows);

    let lines: Vec<Line> = app
        .dropdown
        .options
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible_rows)
        .map(|(i, option)| {
            let marker = if i == app.dropdown.selected { "● " } else { "  " };
            let style = if i == app.dropdown.highlighted {
                Style::default()
                    .bg(Color::DarkGray)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(Span::styled(format!("{}{}", marker, option.label), style))
        })
        .collect();

    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Genres "),
    );
    frame.render_widget(popup, area);
}
