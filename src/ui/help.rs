use super::layout::centered_rect;
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

fn section(title: &'static str) -> Line<'static> {
    Line::from(vec![Span::styled(
        title,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )])
}

fn binding(keys: &'static str, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("    {:<12}", keys), Style::default().fg(Color::Yellow)),
        Span::raw(action),
    ])
}

pub fn render(frame: &mut Frame) {
    let area = centered_rect(70, 80, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let help_text = vec![
        Line::from(""),
        section("  Global"),
        binding("?", "Toggle this help"),
        binding("q", "Quit application"),
        binding("Ctrl+C", "Quit from anywhere"),
        binding("Tab", "Cycle focus: grid, search, genre, sort"),
        Line::from(""),
        section("  Podcast Grid"),
        binding("←↑↓→ hjkl", "Move between cards"),
        binding("PgUp/PgDn", "Previous/next page"),
        binding("Home/End", "First/last card"),
        binding("Enter", "Open podcast details"),
        binding("/", "Search titles (type to filter)"),
        binding("g", "Choose a genre"),
        binding("s", "Toggle sort: newest first / title"),
        binding("Esc", "Clear the search"),
        binding("Click", "Open the clicked card"),
        Line::from(""),
        section("  Genre List"),
        binding("↑/↓", "Highlight a genre"),
        binding("Enter", "Apply the highlighted genre"),
        binding("Esc", "Keep the current genre"),
        Line::from(""),
        section("  Details"),
        binding("↑/↓ PgUp/PgDn", "Scroll"),
        binding("Esc / x", "Close"),
        binding("Click outside", "Close"),
        Line::from(""),
    ];

    let help = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help - Keybindings ")
                .title_bottom(Line::from(" Press any key to close ").style(Style::default().fg(Color::DarkGray))),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(help, area);
}
