use crate::catalog::{Genre, GenreId};
use std::collections::HashMap;

/// Label shown for genre references that do not resolve.
pub const UNKNOWN_GENRE: &str = "Unknown";

/// Label of the dropdown sentinel that selects every genre.
pub const ALL_GENRES: &str = "All genres";

/// One entry of the genre dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreOption {
    /// `None` is the "all genres" sentinel.
    pub id: Option<GenreId>,
    pub label: String,
}

/// Genre id → title lookup, built once per session.
///
/// Keeps the dataset order so the dropdown lists genres the way the dataset does.
#[derive(Debug, Clone, Default)]
pub struct GenreIndex {
    entries: Vec<Genre>,
    by_id: HashMap<GenreId, usize>,
}

impl GenreIndex {
    pub fn build(genres: &[Genre]) -> Self {
        let mut index = Self::default();
        for genre in genres {
            if index.by_id.contains_key(&genre.id) {
                continue;
            }
            index.by_id.insert(genre.id, index.entries.len());
            index.entries.push(genre.clone());
        }
        index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Title for `id`, or [`UNKNOWN_GENRE`].
    pub fn title(&self, id: GenreId) -> &str {
        self.by_id
            .get(&id)
            .map(|&i| self.entries[i].title.as_str())
            .unwrap_or(UNKNOWN_GENRE)
    }

    pub fn names(&self, ids: &[GenreId]) -> Vec<&str> {
        ids.iter().map(|&id| self.title(id)).collect()
    }

    /// Comma-separated genre names, as shown on cards.
    pub fn joined(&self, ids: &[GenreId]) -> String {
        self.names(ids).join(", ")
    }

    /// Case-insensitive reverse lookup.
    pub fn resolve_title(&self, title: &str) -> Option<GenreId> {
        let wanted = title.trim().to_lowercase();
        self.entries
            .iter()
            .find(|g| g.title.to_lowercase() == wanted)
            .map(|g| g.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Genre> {
        self.entries.iter()
    }

    /// Dropdown options: the sentinel first, then every genre in dataset order.
    pub fn options(&self) -> Vec<GenreOption> {
        std::iter::once(GenreOption {
            id: None,
            label: ALL_GENRES.to_string(),
        })
        .chain(self.entries.iter().map(|g| GenreOption {
            id: Some(g.id),
            label: g.title.clone(),
        }))
        .collect()
    }
}
