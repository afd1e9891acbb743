use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Numeric genre identifier. Every genre reference is normalized to this type at load time.
pub type GenreId = u32;

/// Dataset compiled into the binary, used when no `--data` file is given.
const BUNDLED_DATASET: &str = include_str!("../data/podcasts.json");

/// One season summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Season {
    pub title: Option<String>,
    pub episodes: u32,
}

impl Season {
    /// Display label; untitled seasons are named after their 1-based position.
    pub fn label(&self, position: usize) -> String {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => format!("Season {}", position + 1),
        }
    }
}

/// A single podcast record.
#[derive(Debug, Clone)]
pub struct Podcast {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub genres: Vec<GenreId>,
    pub season_count: u32,
    pub updated: DateTime<Utc>,
    /// Season list carried inside the podcast record (embedded datasets).
    pub seasons: Option<Vec<Season>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    pub id: GenreId,
    pub title: String,
}

/// Season list for one podcast, stored apart from the podcast records.
#[derive(Debug, Clone)]
pub struct SeasonDetail {
    pub seasons: Vec<Season>,
}

/// Where the season data of a catalog lives.
#[derive(Debug, Clone)]
pub enum SeasonSource {
    Embedded,
    Separate(HashMap<String, SeasonDetail>),
}

/// Errors raised while loading a dataset.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Podcast {podcast} has an invalid timestamp: {value}")]
    InvalidTimestamp { podcast: String, value: String },

    #[error("Invalid genre identifier: {0}")]
    InvalidGenreId(String),
}

impl CatalogError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::Io { path, source } => {
                format!("Could not read the dataset at {}: {}", path.display(), source)
            }
            CatalogError::Json(e) => format!("The dataset is not valid JSON: {}", e),
            CatalogError::InvalidTimestamp { podcast, value } => {
                format!("Podcast {} has an unreadable 'updated' value: {}", podcast, value)
            }
            CatalogError::InvalidGenreId(value) => {
                format!("Genre identifiers must be numbers, got: {}", value)
            }
        }
    }
}

// ── Raw dataset shape ──

#[derive(Deserialize)]
struct RawDataset {
    podcasts: Vec<RawPodcast>,
    #[serde(default)]
    genres: Option<Vec<RawGenre>>,
    #[serde(default)]
    seasons: Option<Vec<RawSeasonDetail>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawGenreRef {
    Id(GenreId),
    Text(String),
}

impl RawGenreRef {
    fn numeric(&self) -> Option<GenreId> {
        match self {
            RawGenreRef::Id(id) => Some(*id),
            RawGenreRef::Text(text) => text.trim().parse().ok(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSeasons {
    Count(u32),
    List(Vec<RawSeason>),
}

#[derive(Deserialize)]
struct RawSeason {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    episodes: u32,
}

impl From<RawSeason> for Season {
    fn from(raw: RawSeason) -> Self {
        Season {
            title: raw.title,
            episodes: raw.episodes,
        }
    }
}

#[derive(Deserialize)]
struct RawPodcast {
    id: RawId,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    genres: Vec<RawGenreRef>,
    #[serde(default)]
    seasons: Option<RawSeasons>,
    updated: String,
}

#[derive(Deserialize)]
struct RawGenre {
    id: RawId,
    title: String,
}

#[derive(Deserialize)]
struct RawSeasonDetail {
    id: RawId,
    #[serde(rename = "seasonDetails", default)]
    season_details: Vec<RawSeason>,
}

/// Parse a last-updated value: RFC 3339, a naive ISO timestamp, or a plain date (midnight UTC).
pub fn parse_updated(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// The whole read-only dataset for a session.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub podcasts: Vec<Podcast>,
    pub genres: Vec<Genre>,
    pub season_source: SeasonSource,
}

impl Catalog {
    /// Load the dataset compiled into the binary.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_DATASET)
    }

    /// Load a dataset from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parse and normalize a dataset document.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let raw: RawDataset = serde_json::from_str(text)?;

        // Without a genre collection, genres are derived from the titles podcasts reference.
        let derive_genres = raw.genres.is_none();
        let mut genres = Vec::new();
        for g in raw.genres.unwrap_or_default() {
            let id_text = g.id.into_string();
            let id = id_text
                .trim()
                .parse::<GenreId>()
                .map_err(|_| CatalogError::InvalidGenreId(id_text.clone()))?;
            genres.push(Genre { id, title: g.title });
        }

        // Derived ids start above every numeric id in use, so they never alias one.
        let mut next_derived = derive_genres.then(|| {
            raw.podcasts
                .iter()
                .flat_map(|p| p.genres.iter().filter_map(RawGenreRef::numeric))
                .chain(genres.iter().map(|g| g.id))
                .max()
                .unwrap_or(0)
                .saturating_add(1)
        });

        let mut podcasts = Vec::with_capacity(raw.podcasts.len());
        for p in raw.podcasts {
            let id = p.id.into_string();
            let updated = parse_updated(&p.updated).ok_or_else(|| CatalogError::InvalidTimestamp {
                podcast: id.clone(),
                value: p.updated.clone(),
            })?;

            let mut genre_ids = Vec::with_capacity(p.genres.len());
            for reference in p.genres {
                match normalize_genre_ref(reference, &mut genres, next_derived.as_mut()) {
                    Some(gid) => genre_ids.push(gid),
                    None => warn!(podcast = %id, "dropping genre reference with no matching genre"),
                }
            }

            let (season_count, seasons) = match p.seasons {
                Some(RawSeasons::Count(n)) => (n, None),
                Some(RawSeasons::List(list)) => {
                    let list: Vec<Season> = list.into_iter().map(Season::from).collect();
                    (list.len() as u32, Some(list))
                }
                None => (0, None),
            };

            podcasts.push(Podcast {
                id,
                title: p.title,
                description: p.description,
                image: p.image,
                genres: genre_ids,
                season_count,
                updated,
                seasons,
            });
        }

        let season_source = match raw.seasons {
            None => SeasonSource::Embedded,
            Some(details) => {
                let mut map: HashMap<String, SeasonDetail> = HashMap::new();
                for d in details {
                    let podcast_id = d.id.into_string();
                    if map.contains_key(&podcast_id) {
                        warn!(podcast = %podcast_id, "duplicate season record ignored");
                        continue;
                    }
                    let seasons = d.season_details.into_iter().map(Season::from).collect();
                    map.insert(podcast_id, SeasonDetail { seasons });
                }
                SeasonSource::Separate(map)
            }
        };

        debug!(
            podcasts = podcasts.len(),
            genres = genres.len(),
            separate_seasons = matches!(season_source, SeasonSource::Separate(_)),
            "dataset parsed"
        );

        Ok(Catalog {
            podcasts,
            genres,
            season_source,
        })
    }

    /// Find a podcast by identifier.
    pub fn podcast(&self, id: &str) -> Option<&Podcast> {
        self.position(id).map(|i| &self.podcasts[i])
    }

    /// Catalog index of a podcast by identifier.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.podcasts.iter().position(|p| p.id == id)
    }

    /// Season list for a podcast. `None` when there is no season data at all or the list is empty.
    pub fn seasons_for<'a>(&'a self, podcast: &'a Podcast) -> Option<&'a [Season]> {
        let found = match &self.season_source {
            SeasonSource::Embedded => podcast.seasons.as_deref(),
            SeasonSource::Separate(details) => details
                .get(&podcast.id)
                .map(|d| d.seasons.as_slice())
                .or(podcast.seasons.as_deref()),
        };
        found.filter(|s| !s.is_empty())
    }
}

fn normalize_genre_ref(
    reference: RawGenreRef,
    genres: &mut Vec<Genre>,
    next_derived: Option<&mut GenreId>,
) -> Option<GenreId> {
    if let Some(id) = reference.numeric() {
        return Some(id);
    }
    let RawGenreRef::Text(text) = reference else {
        return None;
    };
    let title = text.trim();
    if let Some(g) = genres.iter().find(|g| g.title.eq_ignore_ascii_case(title)) {
        return Some(g.id);
    }
    let next = next_derived?;
    let id = *next;
    *next = next.saturating_add(1);
    genres.push(Genre {
        id,
        title: title.to_string(),
    });
    Some(id)
}
