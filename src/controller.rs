use crate::app::{App, Focus};
use crate::detail::CloseTrigger;
use crate::ui::layout;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

const MODAL_PAGE: u16 = 10;

/// Dispatch one terminal event. Each event is handled to completion.
pub fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) => {
            if key.kind == KeyEventKind::Press {
                handle_key(app, key);
            }
        }
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        Event::Resize(width, height) => app.update_viewport(Rect::new(0, 0, width, height)),
        _ => {}
    }
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // Escape closes the modal whatever has focus
    if key.code == KeyCode::Esc && app.close_detail(CloseTrigger::Escape) {
        return;
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    if app.detail.is_open() {
        handle_detail_key(app, key);
    } else if app.dropdown.open {
        handle_dropdown_key(app, key);
    } else {
        match app.focus {
            Focus::Search => handle_search_input(app, key),
            Focus::Grid => handle_grid_key(app, key),
            Focus::Genre => handle_genre_key(app, key),
            Focus::Sort => handle_sort_key(app, key),
        }
    }
}

fn handle_detail_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('x') | KeyCode::Char('q') => {
            app.close_detail(CloseTrigger::Button);
        }
        KeyCode::Down | KeyCode::Char('j') => app.scroll_detail_down(1),
        KeyCode::Up | KeyCode::Char('k') => app.detail.scroll_up(1),
        KeyCode::PageDown => app.scroll_detail_down(MODAL_PAGE),
        KeyCode::PageUp => app.detail.scroll_up(MODAL_PAGE),
        _ => {}
    }
}

fn handle_dropdown_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.dropdown_next(),
        KeyCode::Up | KeyCode::Char('k') => app.dropdown_prev(),
        KeyCode::Enter | KeyCode::Char(' ') => app.confirm_dropdown(),
        KeyCode::Esc => app.cancel_dropdown(),
        _ => {}
    }
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => {
            app.focus = Focus::Grid;
        }
        KeyCode::Tab => {
            app.focus = app.focus.next();
        }
        KeyCode::Backspace => {
            app.pop_search_char();
        }
        KeyCode::Char(c) => {
            app.push_search_char(c);
        }
        _ => {}
    }
}

fn handle_grid_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('/') => {
            app.focus = Focus::Search;
        }
        KeyCode::Char('g') => {
            app.open_dropdown();
        }
        KeyCode::Char('s') => {
            app.toggle_sort();
        }
        KeyCode::Tab => {
            app.focus = app.focus.next();
        }
        KeyCode::Right | KeyCode::Char('l') => app.select_next(),
        KeyCode::Left | KeyCode::Char('h') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_down(),
        KeyCode::Up | KeyCode::Char('k') => app.select_up(),
        KeyCode::PageDown => app.page_down(),
        KeyCode::PageUp => app.page_up(),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),
        KeyCode::Enter => {
            app.open_selected();
        }
        KeyCode::Esc => {
            // Clear search
            app.clear_search();
        }
        _ => {}
    }
}

fn handle_genre_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => app.open_dropdown(),
        KeyCode::Down | KeyCode::Right => {
            let next = app.dropdown.selected + 1;
            app.select_genre(next);
        }
        KeyCode::Up | KeyCode::Left => {
            if let Some(prev) = app.dropdown.selected.checked_sub(1) {
                app.select_genre(prev);
            }
        }
        KeyCode::Tab => app.focus = app.focus.next(),
        KeyCode::Esc => app.focus = Focus::Grid,
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}

fn handle_sort_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right | KeyCode::Char('s') => {
            app.toggle_sort();
        }
        KeyCode::Tab => app.focus = app.focus.next(),
        KeyCode::Esc => app.focus = Focus::Grid,
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}

pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let pos = Position::new(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => handle_click(app, pos),
        MouseEventKind::ScrollDown => {
            if app.detail.is_open() {
                app.scroll_detail_down(3);
            } else if app.dropdown.open {
                app.dropdown_next();
            } else {
                app.select_down();
            }
        }
        MouseEventKind::ScrollUp => {
            if app.detail.is_open() {
                app.detail.scroll_up(3);
            } else if app.dropdown.open {
                app.dropdown_prev();
            } else {
                app.select_up();
            }
        }
        _ => {}
    }
}

fn handle_click(app: &mut App, pos: Position) {
    if app.show_help {
        app.show_help = false;
        return;
    }

    if app.detail.is_open() {
        let modal = layout::modal_area(app.viewport);
        if layout::close_button_area(modal).contains(pos) {
            app.close_detail(CloseTrigger::Button);
        } else if !modal.contains(pos) {
            app.close_detail(CloseTrigger::Backdrop);
        }
        return;
    }

    let regions = app.layout();

    if app.dropdown.open {
        let popup = layout::dropdown_area(regions.genre, app.dropdown.options.len(), app.viewport);
        let rows = popup.height.saturating_sub(2);
        let first_row = popup.y + 1;
        if popup.contains(pos) && pos.y >= first_row && pos.y < first_row + rows {
            let offset = layout::dropdown_offset(app.dropdown.highlighted, rows as usize);
            let option = offset + (pos.y - first_row) as usize;
            if option < app.dropdown.options.len() {
                app.dropdown.highlighted = option;
                app.confirm_dropdown();
                return;
            }
        }
        app.cancel_dropdown();
        return;
    }

    if regions.search.contains(pos) {
        app.focus = Focus::Search;
    } else if regions.genre.contains(pos) {
        app.open_dropdown();
    } else if regions.sort.contains(pos) {
        app.focus = Focus::Sort;
        app.toggle_sort();
    } else if let Some(index) = app.card_at(pos.x, pos.y) {
        app.focus = Focus::Grid;
        app.selected = index;
        app.open_selected();
    }
}
