//! Title resolution and deduplication.
//!
//! Turns the ranked aggregates back into named movies. Each candidate
//! carries both the computed mean and one representative row rating, so the
//! caller can decide which one to report.

use crate::popularity::{JoinedRow, PopularityAggregate};
use data_loader::MovieId;
use std::collections::{HashMap, HashSet};

/// A ranked, title-unique movie eligible for sampling
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub movie_id: MovieId,
    pub title: String,
    /// Mean of every joined rating for this movie
    pub mean_rating: f32,
    /// First joined rating row for this movie
    pub row_rating: f32,
    pub rating_count: u32,
}

/// Map ranked aggregates to titles and drop repeated titles.
///
/// Output follows `ranked` order, a title taking the slot of its
/// highest-ranked movieId. When several ranked movieIds share a title (e.g. a
/// re-release), the one whose rows come first in `rows` represents it: its
/// id, mean, count and first row rating are reported.
pub fn resolve_candidates(
    ranked: &[PopularityAggregate],
    rows: &[JoinedRow<'_>],
) -> Vec<Candidate> {
    let by_id: HashMap<MovieId, &PopularityAggregate> =
        ranked.iter().map(|aggregate| (aggregate.movie_id, aggregate)).collect();

    // First ranked row per title, in join order
    let mut representatives: HashMap<&str, &JoinedRow<'_>> = HashMap::new();
    for row in rows {
        if by_id.contains_key(&row.movie.id) {
            representatives.entry(row.movie.title.as_str()).or_insert(row);
        }
    }

    let mut titles: HashMap<MovieId, &str> = HashMap::with_capacity(by_id.len());
    for row in rows {
        titles.entry(row.movie.id).or_insert(row.movie.title.as_str());
    }

    let mut seen_titles: HashSet<&str> = HashSet::new();
    let mut candidates = Vec::with_capacity(ranked.len());

    for aggregate in ranked {
        let Some(&title) = titles.get(&aggregate.movie_id) else {
            continue;
        };
        if !seen_titles.insert(title) {
            tracing::debug!(movie_id = aggregate.movie_id, title, "dropping duplicate title");
            continue;
        }
        let Some(row) = representatives.get(title) else {
            continue;
        };
        let Some(stats) = by_id.get(&row.movie.id) else {
            continue;
        };
        candidates.push(Candidate {
            movie_id: row.movie.id,
            title: title.to_string(),
            mean_rating: stats.mean_rating,
            row_rating: row.rating.rating,
            rating_count: stats.rating_count,
        });
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::popularity::{aggregate, inner_join, rank_by_count};
    use data_loader::{Movie, Rating};

    fn hamlet_setup() -> (Vec<Movie>, Vec<Rating>) {
        let movies = vec![
            Movie { id: 10, title: "Hamlet".to_string(), genres: "Drama".to_string() },
            Movie { id: 11, title: "Hamlet".to_string(), genres: "Drama".to_string() },
            Movie { id: 12, title: "Othello".to_string(), genres: "Drama".to_string() },
        ];
        let ratings = vec![
            Rating { user_id: 1, movie_id: 10, rating: 2.0, timestamp: None },
            Rating { user_id: 1, movie_id: 11, rating: 5.0, timestamp: None },
            Rating { user_id: 2, movie_id: 11, rating: 3.0, timestamp: None },
            Rating { user_id: 3, movie_id: 12, rating: 4.0, timestamp: None },
        ];
        (movies, ratings)
    }

    #[test]
    fn test_duplicate_titles_keep_rank_slot() {
        let (movies, ratings) = hamlet_setup();
        let refs: Vec<&Movie> = movies.iter().collect();

        let rows = inner_join(&refs, &ratings);
        let ranked = rank_by_count(aggregate(&rows), 100);
        let candidates = resolve_candidates(&ranked, &rows);

        // Hamlet ranks first through movie 11, Othello follows
        let titles: Vec<&str> = candidates.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Hamlet", "Othello"]);
    }

    #[test]
    fn test_duplicate_title_represented_by_first_listed_movie() {
        let (movies, ratings) = hamlet_setup();
        let refs: Vec<&Movie> = movies.iter().collect();

        let rows = inner_join(&refs, &ratings);
        let ranked = rank_by_count(aggregate(&rows), 100);
        let candidates = resolve_candidates(&ranked, &rows);

        // Movie 10 comes first in the movies table, so its row stands for Hamlet
        assert_eq!(candidates[0].movie_id, 10);
        assert_eq!(candidates[0].row_rating, 2.0);
        assert_eq!(candidates[0].rating_count, 1);
        assert!((candidates[0].mean_rating - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_representative_must_be_ranked() {
        let (movies, ratings) = hamlet_setup();
        let refs: Vec<&Movie> = movies.iter().collect();

        let rows = inner_join(&refs, &ratings);
        // Only movie 11 survives the cut, so movie 10 cannot stand for Hamlet
        let ranked = rank_by_count(aggregate(&rows), 1);
        let candidates = resolve_candidates(&ranked, &rows);

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].movie_id, 11);
        assert_eq!(candidates[0].row_rating, 5.0);
    }

    #[test]
    fn test_row_rating_is_first_joined_row() {
        let movies = vec![Movie { id: 1, title: "A".to_string(), genres: "Comedy".to_string() }];
        let refs: Vec<&Movie> = movies.iter().collect();
        let ratings = vec![
            Rating { user_id: 1, movie_id: 1, rating: 5.0, timestamp: None },
            Rating { user_id: 2, movie_id: 1, rating: 4.0, timestamp: None },
        ];

        let rows = inner_join(&refs, &ratings);
        let candidates = resolve_candidates(&rank_by_count(aggregate(&rows), 100), &rows);

        assert_eq!(candidates[0].row_rating, 5.0);
        assert!((candidates[0].mean_rating - 4.5).abs() < 1e-6);
    }
}
