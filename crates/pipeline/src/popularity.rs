//! Join, aggregate and rank stages.
//!
//! ## Algorithm
//! 1. Inner join the filtered movies with the ratings table on movieId
//! 2. Group the joined rows by movieId: mean rating and number of rows
//! 3. Stable sort by rating count, descending, and keep the top N
//!
//! Popularity means rating *count*; the mean never affects ranking.

use data_loader::{Movie, MovieId, Rating};
use std::collections::{BTreeMap, HashMap};

/// One row of the movies ⋈ ratings inner join
#[derive(Debug, Clone, Copy)]
pub struct JoinedRow<'a> {
    pub movie: &'a Movie,
    pub rating: &'a Rating,
}

/// Per-movie popularity computed from joined rows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopularityAggregate {
    pub movie_id: MovieId,
    pub mean_rating: f32,
    pub rating_count: u32,
}

/// Inner join on movieId.
///
/// Rows come out in `movies` order, and in ratings-file order within one
/// movie. Movies without a single rating produce no rows; ratings pointing
/// at a movie outside `movies` are dropped. If `movies` repeats an id, only
/// the first row joins.
pub fn inner_join<'a>(movies: &[&'a Movie], ratings: &'a [Rating]) -> Vec<JoinedRow<'a>> {
    let mut by_movie: HashMap<MovieId, Vec<&'a Rating>> = HashMap::with_capacity(movies.len());
    for &movie in movies {
        by_movie.entry(movie.id).or_default();
    }
    for rating in ratings {
        if let Some(bucket) = by_movie.get_mut(&rating.movie_id) {
            bucket.push(rating);
        }
    }

    let mut rows = Vec::new();
    for &movie in movies {
        // take() so a repeated id joins once
        let Some(bucket) = by_movie.get_mut(&movie.id).map(std::mem::take) else {
            continue;
        };
        rows.extend(bucket.into_iter().map(|rating| JoinedRow { movie, rating }));
    }
    rows
}

/// Group joined rows by movieId.
///
/// Every row counts, so a user who rated the same movie twice contributes
/// two ratings. The result is ordered by ascending movieId.
pub fn aggregate(rows: &[JoinedRow<'_>]) -> Vec<PopularityAggregate> {
    let mut groups: BTreeMap<MovieId, (f64, u32)> = BTreeMap::new();
    for row in rows {
        let entry = groups.entry(row.movie.id).or_insert((0.0, 0));
        entry.0 += f64::from(row.rating.rating);
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(movie_id, (total, count))| PopularityAggregate {
            movie_id,
            mean_rating: (total / f64::from(count)) as f32,
            rating_count: count,
        })
        .collect()
}

/// Keep the `top_n` most-rated aggregates.
///
/// The sort is stable: movies with equal counts keep their incoming order,
/// so identical inputs always rank identically.
pub fn rank_by_count(mut aggregates: Vec<PopularityAggregate>, top_n: usize) -> Vec<PopularityAggregate> {
    aggregates.sort_by(|a, b| b.rating_count.cmp(&a.rating_count));
    aggregates.truncate(top_n);
    aggregates
}
