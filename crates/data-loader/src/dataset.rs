//! Loading the two tables into a [`Dataset`].
//!
//! The movies and ratings files are independent, so they are parsed in
//! parallel with `rayon::join`.

use crate::error::Result;
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::{debug, info};

/// Number of leading rows echoed to the debug log after a load
const PREVIEW_ROWS: usize = 5;

impl Dataset {
    /// Load both tables from disk.
    ///
    /// Fails on the first error from either file; nothing is cached, so every
    /// call reads the files again.
    pub fn load_from_files(movies_path: &Path, ratings_path: &Path) -> Result<Self> {
        info!(
            "Loading dataset from {} and {}",
            movies_path.display(),
            ratings_path.display()
        );

        let (movies, ratings) = rayon::join(
            || parser::parse_movies(movies_path),
            || parser::parse_ratings(ratings_path),
        );
        let movies = movies?;
        let ratings = ratings?;

        info!("Loaded {} movies, {} ratings", movies.len(), ratings.len());
        for movie in movies.iter().take(PREVIEW_ROWS) {
            debug!(movie_id = movie.id, title = %movie.title, genres = %movie.genres, "movies head");
        }
        for rating in ratings.iter().take(PREVIEW_ROWS) {
            debug!(
                user_id = rating.user_id,
                movie_id = rating.movie_id,
                rating = rating.rating,
                "ratings head"
            );
        }

        Ok(Dataset::from_parts(movies, ratings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DataLoadError;

    #[test]
    fn test_load_dataset() {
        // Only runs when a MovieLens "latest-small" copy sits in data/
        let movies = Path::new("../../data/movies.csv");
        let ratings = Path::new("../../data/ratings.csv");

        if movies.exists() && ratings.exists() {
            let dataset = Dataset::load_from_files(movies, ratings).unwrap();
            let (movie_count, rating_count) = dataset.counts();
            assert!(movie_count > 0);
            assert!(rating_count > 0);
        }
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = Dataset::load_from_files(
            Path::new("missing/movies.csv"),
            Path::new("missing/ratings.csv"),
        )
        .unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }
}
