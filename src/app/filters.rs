// src/app/filters.rs
use rand::seq::SliceRandom;
use rand::Rng;

use super::data::MovieRecord;
use super::types::FilterCriteria;

/// "Recently added" is the tail of the catalog, not a timestamp.
pub const RECENT_COUNT: usize = 5;
pub const SURPRISE_COUNT: usize = 3;

/// Decade + runtime filter, input order preserved.
pub fn filter(movies: &[MovieRecord], criteria: &FilterCriteria) -> Vec<MovieRecord> {
    movies
        .iter()
        .filter(|m| criteria.decade.matches(m) && criteria.runtime.matches(m))
        .cloned()
        .collect()
}

pub fn recent(mut movies: Vec<MovieRecord>) -> Vec<MovieRecord> {
    let skip = movies.len().saturating_sub(RECENT_COUNT);
    movies.drain(..skip);
    movies
}

/// Up to three distinct picks, unseeded.
pub fn surprise(movies: &[MovieRecord]) -> Vec<MovieRecord> {
    surprise_with(&mut rand::thread_rng(), movies)
}

pub fn surprise_with<R: Rng + ?Sized>(rng: &mut R, movies: &[MovieRecord]) -> Vec<MovieRecord> {
    let n = SURPRISE_COUNT.min(movies.len());
    movies.choose_multiple(rng, n).cloned().collect()
}

/// Filter, then recency, then the optional surprise draw.
pub fn apply(
    movies: &[MovieRecord],
    criteria: &FilterCriteria,
) -> (Vec<MovieRecord>, Option<Vec<MovieRecord>>) {
    let mut shown = filter(movies, criteria);
    if criteria.recent_only {
        shown = recent(shown);
    }
    let picks = criteria.surprise.then(|| surprise(&shown));
    (shown, picks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::types::{DecadeFilter, RuntimeBucket, RuntimeFilter};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn movie(title: &str, year: &str, runtime: Option<u32>) -> MovieRecord {
        MovieRecord {
            title: title.into(),
            overview: String::new(),
            release_year: year.into(),
            poster_url: String::new(),
            genres: Vec::new(),
            runtime_minutes: runtime,
        }
    }

    fn titles(movies: &[MovieRecord]) -> Vec<&str> {
        movies.iter().map(|m| m.title.as_str()).collect()
    }

    #[test]
    fn decade_filter_keeps_order_and_isolates_unknown() {
        let movies = vec![
            movie("Pulp Fiction", "1994", Some(154)),
            movie("Unreleased", "Unknown", None),
            movie("Heat", "1995", Some(170)),
            movie("Alien", "1979", Some(117)),
        ];

        let nineties = FilterCriteria {
            decade: DecadeFilter::Decade(1990),
            ..Default::default()
        };
        assert_eq!(titles(&filter(&movies, &nineties)), ["Pulp Fiction", "Heat"]);

        let unknown = FilterCriteria {
            decade: DecadeFilter::Unknown,
            ..Default::default()
        };
        assert_eq!(titles(&filter(&movies, &unknown)), ["Unreleased"]);

        assert_eq!(filter(&movies, &FilterCriteria::default()).len(), 4);
    }

    #[test]
    fn runtime_filter_uses_inclusive_medium() {
        let movies = vec![
            movie("a", "2000", Some(89)),
            movie("b", "2000", Some(90)),
            movie("c", "2000", Some(120)),
            movie("d", "2000", Some(121)),
            movie("e", "2000", None),
        ];
        let medium = FilterCriteria {
            runtime: RuntimeFilter::Only(RuntimeBucket::Medium),
            ..Default::default()
        };
        assert_eq!(titles(&filter(&movies, &medium)), ["b", "c"]);

        let unknown = FilterCriteria {
            runtime: RuntimeFilter::Only(RuntimeBucket::Unknown),
            ..Default::default()
        };
        assert_eq!(titles(&filter(&movies, &unknown)), ["e"]);
    }

    #[test]
    fn recent_keeps_last_five() {
        let movies: Vec<_> = ["A", "B", "C", "D", "E", "F", "G"]
            .iter()
            .map(|t| movie(t, "2000", None))
            .collect();
        assert_eq!(titles(&recent(movies)), ["C", "D", "E", "F", "G"]);

        let short = vec![movie("A", "2000", None), movie("B", "2000", None)];
        assert_eq!(titles(&recent(short)), ["A", "B"]);
    }

    #[test]
    fn surprise_never_oversamples() {
        assert!(surprise(&[]).is_empty());

        let two = vec![movie("A", "2000", None), movie("B", "2000", None)];
        let picks = surprise(&two);
        assert_eq!(picks.len(), 2);
        let set: HashSet<_> = titles(&picks).into_iter().collect();
        assert_eq!(set, HashSet::from(["A", "B"]));
    }

    #[test]
    fn surprise_draws_three_distinct() {
        let movies: Vec<_> = (0..10)
            .map(|i| movie(&format!("m{i}"), "2000", None))
            .collect();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let picks = surprise_with(&mut rng, &movies);
            assert_eq!(picks.len(), 3);
            let set: HashSet<_> = titles(&picks).into_iter().collect();
            assert_eq!(set.len(), 3);
            assert!(picks.iter().all(|p| movies.contains(p)));
        }
    }

    #[test]
    fn apply_runs_recency_before_surprise() {
        let movies: Vec<_> = (0..8)
            .map(|i| movie(&format!("m{i}"), "1990", Some(100)))
            .collect();
        let criteria = FilterCriteria {
            recent_only: true,
            surprise: true,
            ..Default::default()
        };
        let (shown, picks) = apply(&movies, &criteria);
        assert_eq!(titles(&shown), ["m3", "m4", "m5", "m6", "m7"]);
        let picks = picks.unwrap();
        assert_eq!(picks.len(), 3);
        assert!(picks.iter().all(|p| shown.contains(p)));

        let (_, none) = apply(&movies, &FilterCriteria::default());
        assert!(none.is_none());
    }
}
