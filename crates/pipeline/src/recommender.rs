//! # Recommender
//!
//! Runs the whole genre → recommendation pipeline over one loaded dataset:
//! 1. Filter movies by genre
//! 2. Inner join with ratings
//! 3. Aggregate mean rating and rating count per movie
//! 4. Rank by count and keep the top N
//! 5. Resolve titles and drop repeated titles
//! 6. Sample the final handful
//!
//! Steps 1-5 are deterministic and exposed separately as
//! [`Recommender::candidates`]; only step 6 involves randomness.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use data_loader::{Dataset, Movie, Rating};
use tracing::debug;

use crate::candidates::{Candidate, resolve_candidates};
use crate::filter_pipeline::FilterPipeline;
use crate::filters::GenreFilter;
use crate::popularity::{aggregate, inner_join, rank_by_count};
use crate::sampler::RandomSampler;
use crate::traits::Sampler;

/// How many of the most-rated movies form the candidate pool
pub const DEFAULT_TOP_N: usize = 100;

/// How many recommendations a request returns at most
pub const DEFAULT_SAMPLE_SIZE: usize = 5;

/// Which rating value is reported alongside each title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RatingMode {
    /// Mean of all ratings for the movie
    #[default]
    Mean,
    /// The first rating row joined to the movie. For a repeated title this
    /// is the first row of the copy listed first in the movies table.
    RowSample,
}

impl fmt::Display for RatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatingMode::Mean => write!(f, "mean"),
            RatingMode::RowSample => write!(f, "row-sample"),
        }
    }
}

impl FromStr for RatingMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mean" => Ok(RatingMode::Mean),
            "row-sample" | "row" => Ok(RatingMode::RowSample),
            other => Err(format!("unknown rating mode '{other}' (expected 'mean' or 'row-sample')")),
        }
    }
}

/// Tunable policy for a [`Recommender`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommenderConfig {
    pub top_n: usize,
    pub sample_size: usize,
    pub rating_mode: RatingMode,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            sample_size: DEFAULT_SAMPLE_SIZE,
            rating_mode: RatingMode::default(),
        }
    }
}

/// Final recommendation returned to the user
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub title: String,
    pub rating: f32,
}

/// Genre-based popular-movie recommender
#[derive(Clone)]
pub struct Recommender {
    config: RecommenderConfig,
    sampler: Arc<dyn Sampler>,
}

impl Recommender {
    /// Recommender with the given policy and an unseeded random sampler
    pub fn new(config: RecommenderConfig) -> Self {
        Self::with_sampler(config, RandomSampler)
    }

    /// Recommender that draws the final sample with `sampler`
    pub fn with_sampler(config: RecommenderConfig, sampler: impl Sampler + 'static) -> Self {
        Self {
            config,
            sampler: Arc::new(sampler),
        }
    }

    /// The deterministic candidate set for `genre`, in rank order.
    ///
    /// An empty or unmatched genre yields an empty Vec, not an error.
    pub fn candidates(&self, movies: &[Movie], ratings: &[Rating], genre: &str) -> Result<Vec<Candidate>> {
        let filtered = FilterPipeline::new()
            .add_filter(GenreFilter::new(genre))
            .apply(movies)
            .context("Failed to filter movies by genre")?;
        debug!(genre, matched = filtered.len(), "genre filter applied");

        let joined = inner_join(&filtered, ratings);
        debug!(rows = joined.len(), "joined with ratings");

        let aggregates = aggregate(&joined);
        let ranked = rank_by_count(aggregates, self.config.top_n);
        debug!(ranked = ranked.len(), top_n = self.config.top_n, "ranked by rating count");

        let candidates = resolve_candidates(&ranked, &joined);
        debug!(candidates = candidates.len(), "resolved candidate titles");
        Ok(candidates)
    }

    /// Recommend up to `sample_size` movies for `genre`.
    ///
    /// With fewer candidates than `sample_size` every candidate is returned.
    /// Sampled entries keep their rank order.
    pub fn recommend(&self, movies: &[Movie], ratings: &[Rating], genre: &str) -> Result<Vec<Recommendation>> {
        let candidates = self.candidates(movies, ratings, genre)?;
        Ok(self.sample(candidates))
    }

    /// Convenience wrapper over a loaded [`Dataset`]
    pub fn recommend_from(&self, dataset: &Dataset, genre: &str) -> Result<Vec<Recommendation>> {
        self.recommend(&dataset.movies, &dataset.ratings, genre)
    }

    fn sample(&self, candidates: Vec<Candidate>) -> Vec<Recommendation> {
        let picked = if candidates.len() >= self.config.sample_size {
            let mut indices = self.sampler.select(candidates.len(), self.config.sample_size);
            indices.sort_unstable();
            indices
        } else {
            (0..candidates.len()).collect()
        };

        let mode = self.config.rating_mode;
        let mut slots: Vec<Option<Candidate>> = candidates.into_iter().map(Some).collect();
        picked
            .into_iter()
            .filter_map(|i| slots.get_mut(i).and_then(Option::take))
            .map(|candidate| Recommendation {
                rating: match mode {
                    RatingMode::Mean => candidate.mean_rating,
                    RatingMode::RowSample => candidate.row_rating,
                },
                title: candidate.title,
            })
            .collect()
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new(RecommenderConfig::default())
    }
}

/// Recommend with the default policy: top 100 by count, 5 random picks,
/// mean rating reported.
pub fn recommend(movies: &[Movie], ratings: &[Rating], genre: &str) -> Result<Vec<Recommendation>> {
    Recommender::default().recommend(movies, ratings, genre)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::FirstNSampler;

    fn movie(id: u32, title: &str, genres: &str) -> Movie {
        Movie { id, title: title.to_string(), genres: genres.to_string() }
    }

    fn rating(user_id: u32, movie_id: u32, value: f32) -> Rating {
        Rating { user_id, movie_id, rating: value, timestamp: None }
    }

    /// Eight comedies; movie `i` gets `i` ratings of value `i / 2`
    fn comedy_dataset() -> (Vec<Movie>, Vec<Rating>) {
        let movies: Vec<Movie> = (1..=8).map(|i| movie(i, &format!("Comedy {i}"), "Comedy")).collect();
        let mut ratings = Vec::new();
        for movie_id in 1..=8 {
            for user in 0..movie_id {
                ratings.push(rating(user, movie_id, movie_id as f32 / 2.0));
            }
        }
        (movies, ratings)
    }

    #[test]
    fn test_rating_mode_parse() {
        assert_eq!("mean".parse::<RatingMode>().unwrap(), RatingMode::Mean);
        assert_eq!("Row-Sample".parse::<RatingMode>().unwrap(), RatingMode::RowSample);
        assert!("median".parse::<RatingMode>().is_err());
        assert_eq!(RatingMode::RowSample.to_string(), "row-sample");
    }

    #[test]
    fn test_sample_size_caps_output() {
        let (movies, ratings) = comedy_dataset();
        let recs = Recommender::default().recommend(&movies, &ratings, "comedy").unwrap();
        assert_eq!(recs.len(), 5);
    }

    #[test]
    fn test_first_n_sampler_returns_most_rated() {
        let (movies, ratings) = comedy_dataset();
        let recommender = Recommender::with_sampler(RecommenderConfig::default(), FirstNSampler);

        let recs = recommender.recommend(&movies, &ratings, "comedy").unwrap();
        let titles: Vec<&str> = recs.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Comedy 8", "Comedy 7", "Comedy 6", "Comedy 5", "Comedy 4"]);
        assert_eq!(recs[0].rating, 4.0);
    }

    #[test]
    fn test_top_n_limits_pool() {
        let (movies, ratings) = comedy_dataset();
        let config = RecommenderConfig { top_n: 3, ..RecommenderConfig::default() };
        let recommender = Recommender::new(config);

        let candidates = recommender.candidates(&movies, &ratings, "comedy").unwrap();
        let ids: Vec<u32> = candidates.iter().map(|c| c.movie_id).collect();
        assert_eq!(ids, vec![8, 7, 6]);

        // Fewer than five candidates: all of them come back
        let recs = recommender.recommend(&movies, &ratings, "comedy").unwrap();
        assert_eq!(recs.len(), 3);
    }

    #[test]
    fn test_row_sample_mode_reports_row_rating() {
        let movies = vec![movie(1, "A", "Comedy")];
        let ratings = vec![rating(1, 1, 5.0), rating(2, 1, 4.0)];

        let mean = Recommender::default().recommend(&movies, &ratings, "comedy").unwrap();
        assert_eq!(mean[0].rating, 4.5);

        let config = RecommenderConfig { rating_mode: RatingMode::RowSample, ..RecommenderConfig::default() };
        let row = Recommender::new(config).recommend(&movies, &ratings, "comedy").unwrap();
        assert_eq!(row[0].rating, 5.0);
    }

    #[test]
    fn test_row_sample_for_repeated_title_uses_first_listed_copy() {
        let movies = vec![movie(10, "Hamlet", "Drama"), movie(11, "Hamlet", "Drama")];
        let ratings = vec![rating(1, 10, 2.0), rating(1, 11, 5.0), rating(2, 11, 3.0)];
        let config = RecommenderConfig { rating_mode: RatingMode::RowSample, ..RecommenderConfig::default() };
        let recommender = Recommender::with_sampler(config, FirstNSampler);

        let recs = recommender.recommend(&movies, &ratings, "drama").unwrap();

        assert_eq!(recs, vec![Recommendation { title: "Hamlet".to_string(), rating: 2.0 }]);
    }

    #[test]
    fn test_recommend_from_dataset() {
        let (movies, ratings) = comedy_dataset();
        let dataset = Dataset::from_parts(movies, ratings);
        let recs = recommend(&dataset.movies, &dataset.ratings, "drama").unwrap();
        assert!(recs.is_empty());
        let recs = Recommender::default().recommend_from(&dataset, "COM").unwrap();
        assert_eq!(recs.len(), 5);
    }
}
