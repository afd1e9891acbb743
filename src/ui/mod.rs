mod dropdown;
mod grid;
mod help;
pub mod layout;
mod modal;

pub use grid::NO_RESULTS;
pub use modal::scroll_limit;

use crate::app::App;
use ratatui::Frame;

/// Top-level render dispatch. The grid is always drawn; overlays stack on top.
pub fn render(app: &App, frame: &mut Frame) {
    grid::render(app, frame);

    if app.dropdown.open {
        dropdown::render(app, frame);
    }

    if app.detail.is_open() {
        modal::render(app, frame);
    }

    // Render help overlay on top if active
    if app.show_help {
        help::render(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::parse_updated;
    use crate::query::SortMode;
    use crate::test_support::scenario_catalog;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer, layout::Rect};

    fn app() -> App {
        let mut app = App::new(scenario_catalog(), SortMode::Recency, parse_updated("2024-06-01").unwrap());
        app.update_viewport(Rect::new(0, 0, 100, 30));
        app.init();
        app
    }

    fn draw(app: &App) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_cards_drawn_in_result_order() {
        let screen = text(&draw(&app()));
        let beta = screen.find("Beta").unwrap();
        let alpha = screen.find("Alpha").unwrap();
        assert!(beta < alpha);
        assert!(screen.contains("Comedy, Unknown"));
        assert!(screen.contains("2 seasons"));
        assert!(!screen.contains(NO_RESULTS));
    }

    #[test]
    fn test_no_results_message() {
        let mut app = app();
        app.push_search_char('z');
        let screen = text(&draw(&app));
        assert!(screen.contains(NO_RESULTS));
        assert!(!screen.contains("Alpha"));
    }

    #[test]
    fn test_pending_grid_is_not_empty_state() {
        let mut app = App::new(scenario_catalog(), SortMode::Recency, parse_updated("2024-06-01").unwrap());
        app.update_viewport(Rect::new(0, 0, 100, 30));
        let screen = text(&draw(&app));
        assert!(!screen.contains(NO_RESULTS));
        assert!(screen.contains("Loading catalog"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let app = app();
        assert_eq!(draw(&app), draw(&app));
    }

    #[test]
    fn test_modal_shows_seasons() {
        let mut app = app();
        app.open_podcast(0);
        let screen = text(&draw(&app));
        assert!(screen.contains("Podcast Details"));
        assert!(screen.contains("Season 1"));
        assert!(screen.contains("10 episodes"));
        assert!(screen.contains("1 January 2023"));
        assert!(screen.contains(crate::ui::layout::CLOSE_LABEL));
    }

    #[test]
    fn test_modal_placeholder_without_seasons() {
        let mut app = app();
        app.open_podcast(1);
        let screen = text(&draw(&app));
        assert!(screen.contains(crate::detail::NO_SEASONS));
    }

    #[test]
    fn test_dropdown_lists_genres() {
        let mut app = app();
        app.open_dropdown();
        let screen = text(&draw(&app));
        assert!(screen.contains("All genres"));
        assert!(screen.contains("News"));
        assert!(screen.contains("Comedy"));
    }

    #[test]
    fn test_help_overlay() {
        let mut app = app();
        app.show_help = true;
        let screen = text(&draw(&app));
        assert!(screen.contains("Keybindings"));
    }
}
