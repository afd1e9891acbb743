use crate::cards::format_date;
use crate::catalog::{Catalog, Podcast};
use crate::genre::GenreIndex;
use tracing::debug;

/// Placeholder shown when a podcast has no season data.
pub const NO_SEASONS: &str = "No seasons available.";

/// What asked the modal to close. All triggers behave the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseTrigger {
    Button,
    Backdrop,
    Escape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonLine {
    pub label: String,
    pub episodes: u32,
}

impl SeasonLine {
    pub fn episodes_label(&self) -> String {
        if self.episodes == 1 {
            "1 episode".to_string()
        } else {
            format!("{} episodes", self.episodes)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeasonsView {
    Unavailable,
    Listed(Vec<SeasonLine>),
}

/// Everything the modal shows for one podcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailContent {
    pub podcast_index: usize,
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub genres: Vec<String>,
    pub updated: String,
    pub seasons: SeasonsView,
}

impl DetailContent {
    pub fn build(podcast_index: usize, podcast: &Podcast, catalog: &Catalog, genres: &GenreIndex) -> Self {
        let seasons = match catalog.seasons_for(podcast) {
            Some(list) => SeasonsView::Listed(
                list.iter()
                    .enumerate()
                    .map(|(i, s)| SeasonLine {
                        label: s.label(i),
                        episodes: s.episodes,
                    })
                    .collect(),
            ),
            None => SeasonsView::Unavailable,
        };

        Self {
            podcast_index,
            id: podcast.id.clone(),
            title: podcast.title.clone(),
            description: podcast.description.clone(),
            image: podcast.image.clone(),
            genres: genres.names(&podcast.genres).into_iter().map(String::from).collect(),
            updated: format_date(podcast.updated),
            seasons,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Open(Box<DetailContent>),
}

/// The detail modal. At most one podcast is shown at a time.
#[derive(Debug, Clone, Default)]
pub struct DetailView {
    state: ModalState,
    scroll: u16,
}

impl DetailView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open(_))
    }

    pub fn content(&self) -> Option<&DetailContent> {
        match &self.state {
            ModalState::Open(content) => Some(content),
            ModalState::Closed => None,
        }
    }

    /// Show `content`, replacing whatever was open.
    pub fn open(&mut self, content: DetailContent) {
        debug!(podcast = %content.id, replacing = self.is_open(), "detail opened");
        self.state = ModalState::Open(Box::new(content));
        self.scroll = 0;
    }

    /// Close the modal. Returns `false` when it was already closed.
    pub fn close(&mut self, trigger: CloseTrigger) -> bool {
        if !self.is_open() {
            return false;
        }
        debug!(?trigger, "detail closed");
        self.state = ModalState::Closed;
        self.scroll = 0;
        true
    }

    /// The grid must not scroll or move while the modal is up.
    pub fn locks_background(&self) -> bool {
        self.is_open()
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Scroll towards the end of the content, never past `limit`.
    pub fn scroll_down(&mut self, lines: u16, limit: u16) {
        if self.is_open() {
            self.scroll = self.scroll.saturating_add(lines).min(limit.max(self.scroll));
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }
}
