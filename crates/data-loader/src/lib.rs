//! # Data Loader Crate
//!
//! Loads the two CSV tables the recommender works over.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, Rating, Dataset)
//! - **parser**: Parse the CSV files into Rust structs, checking headers
//! - **dataset**: Load both tables in parallel
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Dataset;
//! use std::path::Path;
//!
//! let dataset = Dataset::load_from_files(
//!     Path::new("data/movies.csv"),
//!     Path::new("data/ratings.csv"),
//! )?;
//!
//! let (movies, ratings) = dataset.counts();
//! println!("{} movies, {} ratings", movies, ratings);
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod dataset;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{
    // Type aliases
    UserId,
    MovieId,
    // Core types
    Movie,
    Rating,
    Dataset,
    GENRE_SEPARATOR,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_creation() {
        let dataset = Dataset::default();
        let (movies, ratings) = dataset.counts();

        assert_eq!(movies, 0);
        assert_eq!(ratings, 0);
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_from_parts_keeps_row_order() {
        let movies = vec![
            Movie { id: 2, title: "Jumanji (1995)".to_string(), genres: "Adventure|Children|Fantasy".to_string() },
            Movie { id: 1, title: "Toy Story (1995)".to_string(), genres: "Animation|Comedy".to_string() },
        ];
        let ratings = vec![Rating { user_id: 1, movie_id: 1, rating: 4.0, timestamp: None }];

        let dataset = Dataset::from_parts(movies, ratings);

        assert_eq!(dataset.counts(), (2, 1));
        assert_eq!(dataset.movies[0].id, 2);
        assert_eq!(dataset.movies[1].id, 1);
    }

    #[test]
    fn test_genre_tags_skip_empty() {
        let movie = Movie { id: 1, title: "X".to_string(), genres: "Comedy||Drama|".to_string() };
        assert_eq!(movie.genre_tags().collect::<Vec<_>>(), vec!["Comedy", "Drama"]);
    }
}
