//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::traits::Filter;
use anyhow::Result;
use data_loader::Movie;
use tracing;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(GenreFilter::new("comedy"));
///
/// let filtered = pipeline.apply(&dataset.movies)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Apply all filters in sequence to the movie table.
    ///
    /// An empty pipeline keeps every movie.
    pub fn apply<'a>(&self, movies: &'a [Movie]) -> Result<Vec<&'a Movie>> {
        let mut current: Vec<&Movie> = movies.iter().collect();
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current)?;
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        Ok(current)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::GenreFilter;

    fn movies() -> Vec<Movie> {
        vec![
            Movie { id: 1, title: "A".to_string(), genres: "Comedy".to_string() },
            Movie { id: 2, title: "B".to_string(), genres: "Comedy|Romance".to_string() },
            Movie { id: 3, title: "C".to_string(), genres: "Drama".to_string() },
        ]
    }

    #[test]
    fn test_empty_pipeline() {
        let movies = movies();
        let filtered = FilterPipeline::new().apply(&movies).unwrap();
        assert_eq!(filtered.len(), 3);
    }

    #[test]
    fn test_chained_filters() {
        let movies = movies();
        let pipeline = FilterPipeline::new()
            .add_filter(GenreFilter::new("comedy"))
            .add_filter(GenreFilter::new("romance"));

        let filtered = pipeline.apply(&movies).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 2);
    }
}
