use crate::cards::{Card, GridState};
use crate::catalog::Catalog;
use crate::detail::{CloseTrigger, DetailContent, DetailView};
use crate::genre::{GenreIndex, GenreOption};
use crate::query::{GenreFilter, Query, SortMode, run_query};
use crate::ui;
use crate::ui::layout::{self, ScreenLayout};
use chrono::{DateTime, Utc};
use ratatui::layout::{Position, Rect};
use tracing::debug;

/// Which control receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Grid,
    Search,
    Genre,
    Sort,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Self::Grid => Self::Search,
            Self::Search => Self::Genre,
            Self::Genre => Self::Sort,
            Self::Sort => Self::Grid,
        }
    }
}

/// Genre selector. Options are fixed once the catalog is loaded.
#[derive(Debug, Clone)]
pub struct GenreDropdown {
    pub options: Vec<GenreOption>,
    pub selected: usize,
    pub highlighted: usize,
    pub open: bool,
}

impl GenreDropdown {
    pub fn new(options: Vec<GenreOption>) -> Self {
        Self {
            options,
            selected: 0,
            highlighted: 0,
            open: false,
        }
    }

    pub fn selected_label(&self) -> &str {
        self.options
            .get(self.selected)
            .map(|o| o.label.as_str())
            .unwrap_or("")
    }

    pub fn filter(&self) -> GenreFilter {
        self.options
            .get(self.selected)
            .map(|o| GenreFilter::from(o.id))
            .unwrap_or_default()
    }
}

/// Main application state.
pub struct App {
    pub catalog: Catalog,
    pub genres: GenreIndex,
    pub query: Query,
    pub dropdown: GenreDropdown,
    pub focus: Focus,

    // Engine output and its projection
    pub results: Vec<usize>,
    pub grid: GridState,
    pub selected: usize, // Index into `results`

    pub viewport: Rect,
    pub detail: DetailView,

    pub should_quit: bool,
    pub show_help: bool,
    pub status_msg: String,

    /// Reference time for the relative "Updated ..." labels.
    pub now: DateTime<Utc>,
}

impl App {
    pub fn new(catalog: Catalog, sort: SortMode, now: DateTime<Utc>) -> Self {
        let genres = GenreIndex::build(&catalog.genres);
        let dropdown = GenreDropdown::new(genres.options());
        Self {
            catalog,
            genres,
            query: Query {
                sort,
                ..Query::default()
            },
            dropdown,
            focus: Focus::Grid,

            results: Vec::new(),
            grid: GridState::Pending,
            selected: 0,

            viewport: Rect::new(0, 0, 80, 24),
            detail: DetailView::new(),

            should_quit: false,
            show_help: false,
            status_msg: "Loading catalog...".to_string(),

            now,
        }
    }

    /// Initial render of the full catalog.
    pub fn init(&mut self) {
        self.apply_filter();
        self.status_msg = if self.genres.is_empty() {
            format!("{} podcasts loaded", self.catalog.podcasts.len())
        } else {
            format!(
                "{} podcasts loaded, {} genres",
                self.catalog.podcasts.len(),
                self.genres.len()
            )
        };
    }

    /// Re-run the engine with the current query and rebuild the grid from scratch.
    pub fn apply_filter(&mut self) {
        self.results = run_query(&self.catalog.podcasts, &self.query);
        self.grid = GridState::project(&self.catalog.podcasts, &self.results, &self.genres, self.now);
        self.selected = 0;

        debug!(
            search = %self.query.search,
            genre = ?self.query.genre,
            sort = %self.query.sort,
            results = self.results.len(),
            "query applied"
        );

        self.status_msg = format!(
            "{} podcasts for \"{}\" in {}, {}",
            self.results.len(),
            if self.query.search.is_empty() { "all" } else { &self.query.search },
            self.dropdown.selected_label(),
            self.query.sort.label()
        );
    }

    // ── Query changes ──

    pub fn push_search_char(&mut self, c: char) {
        self.query.search.push(c);
        self.apply_filter();
    }

    pub fn pop_search_char(&mut self) {
        if self.query.search.pop().is_some() {
            self.apply_filter();
        }
    }

    pub fn clear_search(&mut self) {
        if !self.query.search.is_empty() {
            self.query.search.clear();
            self.apply_filter();
        }
    }

    /// Select a dropdown option by position.
    pub fn select_genre(&mut self, option: usize) {
        if option >= self.dropdown.options.len() {
            return;
        }
        self.dropdown.selected = option;
        self.dropdown.highlighted = option;
        self.query.genre = self.dropdown.filter();
        self.apply_filter();
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.query.sort = sort;
        self.apply_filter();
    }

    pub fn toggle_sort(&mut self) {
        self.set_sort(self.query.sort.toggle());
    }

    // ── Genre dropdown ──

    pub fn open_dropdown(&mut self) {
        self.focus = Focus::Genre;
        self.dropdown.open = true;
        self.dropdown.highlighted = self.dropdown.selected;
    }

    pub fn dropdown_next(&mut self) {
        if self.dropdown.highlighted + 1 < self.dropdown.options.len() {
            self.dropdown.highlighted += 1;
        }
    }

    pub fn dropdown_prev(&mut self) {
        self.dropdown.highlighted = self.dropdown.highlighted.saturating_sub(1);
    }

    pub fn confirm_dropdown(&mut self) {
        self.dropdown.open = false;
        self.select_genre(self.dropdown.highlighted);
    }

    pub fn cancel_dropdown(&mut self) {
        self.dropdown.open = false;
        self.dropdown.highlighted = self.dropdown.selected;
    }

    // ── Geometry ──

    pub fn update_viewport(&mut self, area: Rect) {
        self.viewport = area;
    }

    pub fn layout(&self) -> ScreenLayout {
        layout::screen_layout(self.viewport)
    }

    pub fn columns(&self) -> usize {
        layout::grid_geometry(self.layout().grid).columns
    }

    pub fn page_size(&self) -> usize {
        layout::grid_geometry(self.layout().grid).page_size()
    }

    /// First result index of the page holding the selection.
    pub fn page_start(&self) -> usize {
        let page = self.page_size();
        (self.selected / page) * page
    }

    /// Cards on the current page.
    pub fn visible_cards(&self) -> &[Card] {
        let cards = self.grid.cards();
        let start = self.page_start().min(cards.len());
        let end = (start + self.page_size()).min(cards.len());
        &cards[start..end]
    }

    /// Result index of the card under a screen position.
    pub fn card_at(&self, column: u16, row: u16) -> Option<usize> {
        let cells = layout::card_cells(self.layout().grid, self.visible_cards().len());
        cells
            .iter()
            .position(|cell| cell.contains(Position::new(column, row)))
            .map(|i| self.page_start() + i)
    }

    // ── Grid navigation (suppressed while the modal is open) ──

    fn move_selection(&mut self, delta: isize) {
        if self.detail.locks_background() || self.grid.is_empty() {
            return;
        }
        let last = self.grid.len() - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(last);
    }

    pub fn select_next(&mut self) {
        self.move_selection(1);
    }

    pub fn select_prev(&mut self) {
        self.move_selection(-1);
    }

    pub fn select_down(&mut self) {
        self.move_selection(self.columns() as isize);
    }

    pub fn select_up(&mut self) {
        self.move_selection(-(self.columns() as isize));
    }

    pub fn page_down(&mut self) {
        self.move_selection(self.page_size() as isize);
    }

    pub fn page_up(&mut self) {
        self.move_selection(-(self.page_size() as isize));
    }

    pub fn select_first(&mut self) {
        self.move_selection(isize::MIN);
    }

    pub fn select_last(&mut self) {
        self.move_selection(isize::MAX);
    }

    // ── Detail view ──

    pub fn open_selected(&mut self) {
        if let Some(card) = self.grid.cards().get(self.selected) {
            let index = card.index;
            self.open_podcast(index);
        }
    }

    /// Open the modal for the podcast at `index` in the catalog.
    pub fn open_podcast(&mut self, index: usize) {
        if let Some(podcast) = self.catalog.podcasts.get(index) {
            let content = DetailContent::build(index, podcast, &self.catalog, &self.genres);
            self.status_msg = format!("Viewing {}", content.title);
            self.detail.open(content);
        }
    }

    /// Scroll the modal down, stopping once the last line is in view.
    pub fn scroll_detail_down(&mut self, lines: u16) {
        let Some(content) = self.detail.content() else {
            return;
        };
        let limit = ui::scroll_limit(content, layout::modal_area(self.viewport));
        self.detail.scroll_down(lines, limit);
    }

    pub fn close_detail(&mut self, trigger: CloseTrigger) -> bool {
        let closed = self.detail.close(trigger);
        if closed {
            self.status_msg.clear();
        }
        closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::parse_updated;
    use crate::test_support::scenario_catalog;

    fn app() -> App {
        let mut app = App::new(scenario_catalog(), SortMode::Recency, parse_updated("2024-06-01").unwrap());
        app.init();
        app
    }

    fn titles(app: &App) -> Vec<String> {
        app.grid.cards().iter().map(|c| c.title.clone()).collect()
    }

    #[test]
    fn test_pending_until_init() {
        let app = App::new(scenario_catalog(), SortMode::Recency, Utc::now());
        assert_eq!(app.grid, GridState::Pending);
    }

    #[test]
    fn test_dropdown_options_populated() {
        let app = app();
        let labels: Vec<&str> = app.dropdown.options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["All genres", "News", "Comedy"]);
        assert_eq!(app.dropdown.selected_label(), "All genres");
    }

    #[test]
    fn test_scenario_through_controller_state() {
        let mut app = app();
        assert_eq!(titles(&app), vec!["Beta", "Alpha"]);

        for c in "alp".chars() {
            app.push_search_char(c);
        }
        assert_eq!(titles(&app), vec!["Alpha"]);

        app.clear_search();
        app.select_genre(2);
        assert_eq!(app.query.genre, GenreFilter::Only(2));
        assert_eq!(titles(&app), vec!["Beta"]);
    }

    #[test]
    fn test_no_results_state() {
        let mut app = app();
        app.push_search_char('z');
        assert_eq!(app.grid, GridState::Empty);
        assert!(app.status_msg.starts_with("0 podcasts"));
    }

    #[test]
    fn test_sort_toggle_rerenders() {
        let mut app = app();
        app.toggle_sort();
        assert_eq!(app.query.sort, SortMode::Title);
        assert_eq!(titles(&app), vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_filter_resets_selection() {
        let mut app = app();
        app.select_next();
        assert_eq!(app.selected, 1);
        app.toggle_sort();
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_navigation_clamps() {
        let mut app = app();
        app.select_prev();
        assert_eq!(app.selected, 0);
        app.select_last();
        assert_eq!(app.selected, 1);
        app.select_next();
        assert_eq!(app.selected, 1);
        app.select_first();
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_navigation_locked_while_open() {
        let mut app = app();
        app.open_selected();
        assert!(app.detail.is_open());
        app.select_next();
        assert_eq!(app.selected, 0);
        assert!(app.close_detail(CloseTrigger::Escape));
        app.select_next();
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_open_selected_shows_that_podcast() {
        let mut app = app();
        app.select_next();
        app.open_selected();
        assert_eq!(app.detail.content().unwrap().title, "Alpha");
    }

    #[test]
    fn test_dropdown_cancel_keeps_selection() {
        let mut app = app();
        app.open_dropdown();
        app.dropdown_next();
        app.cancel_dropdown();
        assert!(!app.dropdown.open);
        assert_eq!(app.dropdown.selected, 0);
        assert_eq!(app.query.genre, GenreFilter::All);
    }

    #[test]
    fn test_dropdown_confirm_applies() {
        let mut app = app();
        app.open_dropdown();
        app.dropdown_next();
        app.confirm_dropdown();
        assert_eq!(app.query.genre, GenreFilter::Only(1));
        assert_eq!(titles(&app), vec!["Alpha"]);
    }

    #[test]
    fn test_card_hit_testing() {
        let mut app = app();
        app.update_viewport(Rect::new(0, 0, 100, 30));
        let cells = layout::card_cells(app.layout().grid, app.visible_cards().len());
        let second = cells[1];
        assert_eq!(app.card_at(second.x + 1, second.y + 1), Some(1));
        assert_eq!(app.card_at(0, 0), None);
    }
}
