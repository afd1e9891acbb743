use crate::catalog::Podcast;
use crate::genre::GenreIndex;
use chrono::{DateTime, Utc};

/// Summary of one podcast as drawn in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Position of the podcast in the catalog.
    pub index: usize,
    pub title: String,
    pub initials: String,
    pub cover: String,
    pub genres: String,
    pub seasons: u32,
    pub updated: String,
}

impl Card {
    pub fn from_podcast(index: usize, podcast: &Podcast, genres: &GenreIndex, now: DateTime<Utc>) -> Self {
        Self {
            index,
            title: podcast.title.clone(),
            initials: initials(&podcast.title),
            cover: cover_name(&podcast.image),
            genres: genres.joined(&podcast.genres),
            seasons: podcast.season_count,
            updated: humanize_updated(podcast.updated, now),
        }
    }

    pub fn seasons_label(&self) -> String {
        plural(self.seasons as i64, "season")
    }
}

/// What the grid currently shows. `Empty` is a rendered result with no matches,
/// distinct from `Pending`, which has not been rendered yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GridState {
    #[default]
    Pending,
    Empty,
    Cards(Vec<Card>),
}

impl GridState {
    /// Project engine output into cards. Always builds a fresh grid.
    pub fn project(podcasts: &[Podcast], indices: &[usize], genres: &GenreIndex, now: DateTime<Utc>) -> Self {
        if indices.is_empty() {
            return Self::Empty;
        }
        Self::Cards(
            indices
                .iter()
                .map(|&i| Card::from_podcast(i, &podcasts[i], genres, now))
                .collect(),
        )
    }

    pub fn cards(&self) -> &[Card] {
        match self {
            Self::Cards(cards) => cards,
            _ => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.cards().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards().is_empty()
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

/// Relative last-updated label, e.g. "Updated 3 weeks ago".
pub fn humanize_updated(updated: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = now.signed_duration_since(updated).num_days();
    match days {
        i64::MIN..=0 => "Updated today".to_string(),
        1 => "Updated yesterday".to_string(),
        2..=6 => format!("Updated {} ago", plural(days, "day")),
        7..=29 => format!("Updated {} ago", plural(days / 7, "week")),
        30..=364 => format!("Updated {} ago", plural(days / 30, "month")),
        _ => format!("Updated {} ago", plural(days / 365, "year")),
    }
}

/// Absolute date as shown in the detail view, e.g. "3 November 2022".
pub fn format_date(updated: DateTime<Utc>) -> String {
    updated.format("%-d %B %Y").to_string()
}

fn initials(title: &str) -> String {
    let letters: String = title
        .split_whitespace()
        .filter_map(|word| word.chars().find(|c| c.is_alphanumeric()))
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    if letters.is_empty() { "?".to_string() } else { letters }
}

/// File name of the cover image URL.
fn cover_name(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or("");
    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => "no cover".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::parse_updated;
    use crate::test_support::scenario_catalog;

    fn now() -> DateTime<Utc> {
        parse_updated("2024-03-01T12:00:00Z").unwrap()
    }

    #[test]
    fn test_card_projection() {
        let catalog = scenario_catalog();
        let genres = GenreIndex::build(&catalog.genres);
        let card = Card::from_podcast(1, &catalog.podcasts[1], &genres, now());
        assert_eq!(card.title, "Beta");
        assert_eq!(card.genres, "Comedy, Unknown");
        assert_eq!(card.cover, "beta.jpg");
        assert_eq!(card.initials, "B");
        assert_eq!(card.seasons_label(), "0 seasons");
        assert_eq!(card.updated, "Updated 2 months ago");
    }

    #[test]
    fn test_grid_empty_is_distinct_from_pending() {
        let catalog = scenario_catalog();
        let genres = GenreIndex::build(&catalog.genres);
        let grid = GridState::project(&catalog.podcasts, &[], &genres, now());
        assert_eq!(grid, GridState::Empty);
        assert_ne!(grid, GridState::Pending);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_grid_keeps_engine_order() {
        let catalog = scenario_catalog();
        let genres = GenreIndex::build(&catalog.genres);
        let grid = GridState::project(&catalog.podcasts, &[1, 0], &genres, now());
        let titles: Vec<&str> = grid.cards().iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Beta", "Alpha"]);
        assert_eq!(grid, GridState::project(&catalog.podcasts, &[1, 0], &genres, now()));
    }

    #[test]
    fn test_humanize_updated() {
        let now = now();
        let at = |s: &str| parse_updated(s).unwrap();
        assert_eq!(humanize_updated(at("2024-03-01T08:00:00Z"), now), "Updated today");
        assert_eq!(humanize_updated(at("2024-03-05"), now), "Updated today");
        assert_eq!(humanize_updated(at("2024-02-29T10:00:00Z"), now), "Updated yesterday");
        assert_eq!(humanize_updated(at("2024-02-26"), now), "Updated 4 days ago");
        assert_eq!(humanize_updated(at("2024-02-20"), now), "Updated 1 week ago");
        assert_eq!(humanize_updated(at("2023-12-01"), now), "Updated 3 months ago");
        assert_eq!(humanize_updated(at("2021-01-01"), now), "Updated 3 years ago");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(parse_updated("2023-01-01").unwrap()), "1 January 2023");
    }

    #[test]
    fn test_initials_and_cover() {
        assert_eq!(initials("the daily briefing"), "TD");
        assert_eq!(initials("Comedy Bang! Bang!"), "CB");
        assert_eq!(initials("   "), "?");
        assert_eq!(cover_name("https://x.test/a/cover.jpg?w=300"), "cover.jpg");
        assert_eq!(cover_name(""), "no cover");
        assert_eq!(cover_name("https://x.test/a/"), "no cover");
    }
}
