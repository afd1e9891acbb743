//! Property-based tests for the filter/sort engine.

use crate::catalog::Podcast;
use crate::query::{GenreFilter, Query, SortMode, collate, filter_podcasts, run_query, sort_indices};
use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use std::cmp::Ordering;

fn arb_podcasts() -> impl Strategy<Value = Vec<Podcast>> {
    prop::collection::vec(
        ("[a-zA-Z ]{0,8}", prop::collection::vec(1u32..6, 0..3), 0i64..2000),
        0..24,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (title, genres, days))| Podcast {
                id: i.to_string(),
                title,
                description: String::new(),
                image: String::new(),
                genres,
                season_count: 0,
                updated: Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap() + Duration::days(days),
                seasons: None,
            })
            .collect()
    })
}

fn arb_genre() -> impl Strategy<Value = GenreFilter> {
    prop_oneof![Just(GenreFilter::All), (1u32..8).prop_map(GenreFilter::Only)]
}

fn arb_sort() -> impl Strategy<Value = SortMode> {
    prop_oneof![Just(SortMode::Title), Just(SortMode::Recency)]
}

proptest! {
    /// Property: the search keeps exactly the titles that contain it, ignoring case
    #[test]
    fn prop_search_selects_matching_titles(podcasts in arb_podcasts(), search in "[a-zA-Z]{0,3}") {
        let query = Query { search: search.clone(), ..Query::default() };
        let kept = filter_podcasts(&podcasts, &query);
        let needle = search.to_lowercase();
        for (i, p) in podcasts.iter().enumerate() {
            let expected = p.title.to_lowercase().contains(&needle);
            prop_assert_eq!(kept.contains(&i), expected);
        }
    }

    /// Property: an empty search with all genres returns every podcast
    #[test]
    fn prop_empty_search_returns_all(podcasts in arb_podcasts(), sort in arb_sort()) {
        let query = Query { sort, ..Query::default() };
        let mut result = run_query(&podcasts, &query);
        result.sort_unstable();
        prop_assert_eq!(result, (0..podcasts.len()).collect::<Vec<_>>());
    }

    /// Property: title order is non-decreasing and sorting again changes nothing
    #[test]
    fn prop_title_sort_ordered_and_idempotent(podcasts in arb_podcasts()) {
        let query = Query { sort: SortMode::Title, ..Query::default() };
        let sorted = run_query(&podcasts, &query);
        for pair in sorted.windows(2) {
            prop_assert_ne!(collate(&podcasts[pair[0]].title, &podcasts[pair[1]].title), Ordering::Greater);
        }
        let mut again = sorted.clone();
        sort_indices(&podcasts, &mut again, SortMode::Title);
        prop_assert_eq!(again, sorted);
    }

    /// Property: recency order is non-increasing in the last-updated timestamp
    #[test]
    fn prop_recency_sort_newest_first(podcasts in arb_podcasts()) {
        let sorted = run_query(&podcasts, &Query::default());
        for pair in sorted.windows(2) {
            prop_assert!(podcasts[pair[0]].updated >= podcasts[pair[1]].updated);
        }
    }

    /// Property: filtering then sorting equals sorting then filtering
    #[test]
    fn prop_filter_and_sort_commute(
        podcasts in arb_podcasts(),
        search in "[a-zA-Z]{0,2}",
        genre in arb_genre(),
        sort in arb_sort(),
    ) {
        let query = Query { search, genre, sort };
        let filtered_first = run_query(&podcasts, &query);

        let mut sorted_first: Vec<usize> = (0..podcasts.len()).collect();
        sort_indices(&podcasts, &mut sorted_first, sort);
        sorted_first.retain(|&i| query.matches(&podcasts[i]));

        prop_assert_eq!(filtered_first, sorted_first);
    }

    /// Property: a genre no podcast carries yields an empty result
    #[test]
    fn prop_absent_genre_is_empty(podcasts in arb_podcasts(), search in "[a-z]{0,2}") {
        let query = Query { search, genre: GenreFilter::Only(99), sort: SortMode::Recency };
        prop_assert!(run_query(&podcasts, &query).is_empty());
    }

    /// Property: numeric selectors parse to the same filter as their id
    #[test]
    fn prop_genre_selector_normalizes(id in 0u32..10_000) {
        prop_assert_eq!(GenreFilter::parse(&id.to_string()), Ok(GenreFilter::Only(id)));
        prop_assert_eq!(GenreFilter::parse(&format!(" {id} ")), Ok(GenreFilter::Only(id)));
    }
}
