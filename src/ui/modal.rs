use super::layout::{self, CLOSE_LABEL};
use crate::app::App;
use crate::detail::{DetailContent, NO_SEASONS, SeasonsView};
use unicode_width::UnicodeWidthStr;
use ratatui::{
    Frame,
    layout::{Alignment, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub fn render(app: &App, frame: &mut Frame) {
    let Some(detail) = app.detail.content() else {
        return;
    };
    let screen = frame.area();

    // Dim the grid behind the panel
    frame
        .buffer_mut()
        .set_style(screen, Style::default().add_modifier(Modifier::DIM));

    let area = layout::modal_area(screen);
    frame.render_widget(Clear, area);

    let scroll = app.detail.scroll().min(scroll_limit(detail, area));
    let label = Style::default().fg(Color::DarkGray);

    let panel = Paragraph::new(detail_lines(detail))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Podcast Details ")
                .title_bottom(
                    Line::from(" Esc/x close  ↑↓ scroll ")
                        .style(label)
                        .alignment(Alignment::Right),
                ),
        );
    frame.render_widget(panel, area);

    let close = Paragraph::new(CLOSE_LABEL).style(
        Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(close, layout::close_button_area(area));
}

/// Largest useful scroll offset for `detail` drawn in the modal `area`.
pub fn scroll_limit(detail: &DetailContent, area: Rect) -> u16 {
    let inner = area.inner(Margin::new(1, 1));
    let width = inner.width as usize;
    let rows: usize = detail_lines(detail)
        .iter()
        .map(|line| {
            let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
            wrapped_rows(&text, width)
        })
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX).saturating_sub(inner.height)
}

/// Rows a word-wrapped line occupies at `width`.
fn wrapped_rows(text: &str, width: usize) -> usize {
    if width == 0 {
        return 0;
    }
    let mut rows = 1;
    let mut used = 0;
    for word in text.split(' ') {
        let w = word.width();
        let needed = if used == 0 { w } else { used + 1 + w };
        if needed <= width {
            used = needed;
        } else if w <= width {
            rows += 1;
            used = w;
        } else {
            // Long words are broken across rows
            if used > 0 {
                rows += 1;
            }
            let spans = w.div_ceil(width);
            rows += spans - 1;
            used = w - (spans - 1) * width;
        }
    }
    rows
}

fn detail_lines(detail: &DetailContent) -> Vec<Line<'_>> {
    let label = Style::default().fg(Color::DarkGray);

    let mut lines = vec![
        Line::from(Span::styled(
            detail.title.as_str(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            detail.description.as_str(),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
    ];

    // ── Genre badges ──
    let mut genre_spans = vec![Span::styled("Genres: ", label)];
    for (i, genre) in detail.genres.iter().enumerate() {
        if i > 0 {
            genre_spans.push(Span::raw(" "));
        }
        genre_spans.push(Span::styled(
            format!(" {} ", genre),
            Style::default().fg(Color::Black).bg(Color::Magenta),
        ));
    }
    lines.push(Line::from(genre_spans));

    lines.push(Line::from(vec![
        Span::styled("Last updated: ", label),
        Span::styled(detail.updated.as_str(), Style::default().fg(Color::White)),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Cover: ", label),
        Span::styled(
            detail.image.as_str(),
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
        ),
    ]));
    lines.push(Line::from(""));

    // ── Seasons ──
    lines.push(Line::from(Span::styled(
        "Seasons",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    )));
    match &detail.seasons {
        SeasonsView::Unavailable => {
            lines.push(Line::from(Span::styled(
                NO_SEASONS,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )));
        }
        SeasonsView::Listed(seasons) => {
            let label_width = seasons.iter().map(|s| s.label.chars().count()).max().unwrap_or(0);
            for season in seasons {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {:<width$}  ", season.label, width = label_width),
                        Style::default().fg(Color::White),
                    ),
                    Span::styled(season.episodes_label(), label),
                ]));
            }
        }
    }

    lines
}
