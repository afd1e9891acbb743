use crate::catalog::{GenreId, Podcast};
use icu_collator::{Collator, CollatorOptions};
use serde::Deserialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum SortMode {
    Title,
    /// Newest first.
    #[default]
    Recency,
}

impl SortMode {
    /// `title` selects title order; every other value means recency.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("title") {
            Self::Title
        } else {
            Self::Recency
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Title => Self::Recency,
            Self::Recency => Self::Title,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title A-Z",
            Self::Recency => "Newest first",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Recency => "recency",
        }
    }
}

impl From<String> for SortMode {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Genre selector. Always numeric, so a selector can never be compared as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenreFilter {
    #[default]
    All,
    Only(GenreId),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("genre selector must be a numeric id or \"all\", got {0:?}")]
pub struct GenreFilterError(pub String);

impl GenreFilter {
    /// Empty text and `all` select every genre; anything else must be a decimal id.
    pub fn parse(value: &str) -> Result<Self, GenreFilterError> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        trimmed
            .parse::<GenreId>()
            .map(Self::Only)
            .map_err(|_| GenreFilterError(value.to_string()))
    }

    pub fn matches(self, genres: &[GenreId]) -> bool {
        match self {
            Self::All => true,
            Self::Only(id) => genres.contains(&id),
        }
    }
}

impl From<Option<GenreId>> for GenreFilter {
    fn from(id: Option<GenreId>) -> Self {
        id.map_or(Self::All, Self::Only)
    }
}

impl FromStr for GenreFilter {
    type Err = GenreFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The combined search state the controller feeds to the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub search: String,
    pub genre: GenreFilter,
    pub sort: SortMode,
}

impl Query {
    pub fn matches(&self, podcast: &Podcast) -> bool {
        title_contains(&podcast.title, &self.search.to_lowercase()) && self.genre.matches(&podcast.genres)
    }
}

fn title_contains(title: &str, folded_needle: &str) -> bool {
    folded_needle.is_empty() || title.to_lowercase().contains(folded_needle)
}

/// Locale-aware title comparison (root collation: accents and case are secondary
/// and tertiary differences, lowercase before uppercase).
pub struct TitleCollator(Option<Collator>);

impl TitleCollator {
    pub fn new() -> Self {
        let collator = Collator::try_new(&Default::default(), CollatorOptions::new())
            .map_err(|e| warn!(error = ?e, "collation data unavailable, comparing titles by code point"))
            .ok();
        Self(collator)
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.0 {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| b.cmp(a)),
        }
    }
}

impl Default for TitleCollator {
    fn default() -> Self {
        Self::new()
    }
}

/// One-off title comparison. Sorting builds a single collator instead.
pub fn collate(a: &str, b: &str) -> Ordering {
    TitleCollator::new().compare(a, b)
}

/// Indices of the podcasts that pass the search and genre filters, in collection order.
pub fn filter_podcasts(podcasts: &[Podcast], query: &Query) -> Vec<usize> {
    let needle = query.search.to_lowercase();
    podcasts
        .iter()
        .enumerate()
        .filter(|(_, p)| title_contains(&p.title, &needle) && query.genre.matches(&p.genres))
        .map(|(i, _)| i)
        .collect()
}

/// Stable in-place sort of indices into `podcasts`.
pub fn sort_indices(podcasts: &[Podcast], indices: &mut [usize], sort: SortMode) {
    match sort {
        SortMode::Title => {
            let collator = TitleCollator::new();
            indices.sort_by(|&a, &b| collator.compare(&podcasts[a].title, &podcasts[b].title));
        }
        SortMode::Recency => indices.sort_by(|&a, &b| podcasts[b].updated.cmp(&podcasts[a].updated)),
    }
}

/// Filter then sort. The collection itself is never reordered.
pub fn run_query(podcasts: &[Podcast], query: &Query) -> Vec<usize> {
    let mut indices = filter_podcasts(podcasts, query);
    sort_indices(podcasts, &mut indices, query.sort);
    indices
}
