//! Fixtures shared by the unit tests.

use crate::catalog::{Catalog, GenreId, Podcast, parse_updated};

pub fn podcast(id: &str, title: &str, genres: &[GenreId], updated: &str) -> Podcast {
    Podcast {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        image: String::new(),
        genres: genres.to_vec(),
        season_count: 0,
        updated: parse_updated(updated).expect("fixture timestamp"),
        seasons: None,
    }
}

/// Alpha (News, 2023) and Beta (Comedy, 2024); only Alpha has a season record.
pub fn scenario_catalog() -> Catalog {
    Catalog::from_json(
        r#"{
            "podcasts": [
                {"id": 1, "title": "Alpha", "description": "First show", "image": "https://img.example/alpha.jpg",
                 "genres": [1], "seasons": 2, "updated": "2023-01-01"},
                {"id": 2, "title": "Beta", "description": "Second show", "image": "https://img.example/beta.jpg",
                 "genres": [2, 42], "seasons": 0, "updated": "2024-01-01"}
            ],
            "genres": [{"id": 1, "title": "News"}, {"id": 2, "title": "Comedy"}],
            "seasons": [
                {"id": 1, "seasonDetails": [{"title": "Season 1", "episodes": 10}, {"episodes": 8}]}
            ]
        }"#,
    )
    .expect("fixture dataset")
}
