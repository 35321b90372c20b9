//! Core domain types for the movies and ratings tables.
//!
//! Both tables are loaded fresh for every recommendation request and are
//! never mutated after parsing.

use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// Identifier of the user who left a rating
pub type UserId = u32;

/// Identifier of a movie; the join key between the two tables
pub type MovieId = u32;

/// Separator between genre tags in the `genres` column
pub const GENRE_SEPARATOR: char = '|';

// =============================================================================
// Movie
// =============================================================================

/// One row of `movies.csv`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "movieId")]
    pub id: MovieId,
    pub title: String,
    /// Raw tag string, e.g. `"Adventure|Animation|Children"`
    ///
    /// Kept as-is: genre matching is a substring test over the whole string,
    /// not a tag lookup.
    pub genres: String,
}

impl Movie {
    /// Split the raw genre string into individual tags.
    ///
    /// Empty tags (from stray separators) are skipped.
    pub fn genre_tags(&self) -> impl Iterator<Item = &str> {
        self.genres
            .split(GENRE_SEPARATOR)
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
    }
}

// =============================================================================
// Rating
// =============================================================================

/// One row of `ratings.csv`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "movieId")]
    pub movie_id: MovieId,
    pub rating: f32,
    /// Unix timestamp, when the file carries one
    #[serde(default)]
    pub timestamp: Option<i64>,
}

// =============================================================================
// Dataset
// =============================================================================

/// The two tables a recommendation request works over.
///
/// Rows are kept in file order. The pipeline relies on that order for
/// reproducible tie-breaking and for picking a representative rating row.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub movies: Vec<Movie>,
    pub ratings: Vec<Rating>,
}

impl Dataset {
    /// Build a dataset from already-parsed tables
    pub fn from_parts(movies: Vec<Movie>, ratings: Vec<Rating>) -> Self {
        Self { movies, ratings }
    }

    /// Get counts for debugging/validation
    pub fn counts(&self) -> (usize, usize) {
        (self.movies.len(), self.ratings.len())
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty() && self.ratings.is_empty()
    }
}
