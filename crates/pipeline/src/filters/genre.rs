//! Filter to keep only movies whose tag string mentions a genre.

use crate::traits::Filter;
use anyhow::Result;
use data_loader::Movie;
use rayon::prelude::*;

/// Keeps movies whose `genres` string contains the requested text,
/// ignoring case.
///
/// This is a substring test over the raw tag string, not a tag lookup:
/// `"Com"` matches `"Comedy"` and `"fi"` matches `"Sci-Fi"`. There is no
/// vocabulary check and no trimming: `"comedy "` does not match `"Comedy"`.
/// An empty request matches nothing.
pub struct GenreFilter {
    needle: String,
}

impl GenreFilter {
    pub fn new(genre: &str) -> Self {
        Self {
            needle: genre.to_lowercase(),
        }
    }

    /// Does this movie's tag string match?
    pub fn matches(&self, movie: &Movie) -> bool {
        !self.needle.is_empty() && movie.genres.to_lowercase().contains(&self.needle)
    }
}

impl Filter for GenreFilter {
    fn name(&self) -> &str {
        "GenreFilter"
    }

    fn apply<'a>(&self, movies: Vec<&'a Movie>) -> Result<Vec<&'a Movie>> {
        if self.needle.is_empty() {
            return Ok(Vec::new());
        }
        // Indexed parallel collect keeps input order
        let filtered: Vec<&Movie> = movies
            .into_par_iter()
            .filter(|movie| self.matches(movie))
            .collect();
        Ok(filtered)
    }
}
