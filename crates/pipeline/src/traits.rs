//! Core traits for the recommendation pipeline.
//!
//! Two seams are pluggable: which movies survive filtering, and how the
//! final handful is drawn from the candidate set.

use anyhow::Result;
use data_loader::Movie;

/// Core trait for filtering movies before the ratings join.
///
/// All filters must implement this trait to be used in the FilterPipeline.
/// Filters borrow rows from the loaded table and must keep the relative
/// order of the rows they retain.
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of movies.
    ///
    /// # Arguments
    /// * `movies` - The movies to filter (takes ownership of the Vec)
    ///
    /// # Returns
    /// * `Ok(Vec<&Movie>)` - The retained movies, in input order
    /// * `Err` - If filtering fails
    fn apply<'a>(&self, movies: Vec<&'a Movie>) -> Result<Vec<&'a Movie>>;
}

/// Chooses which candidates make it into the final recommendation.
///
/// Implementations return `amount` distinct indices into a candidate list of
/// length `len`. Callers guarantee `amount <= len`.
pub trait Sampler: Send + Sync {
    fn select(&self, len: usize, amount: usize) -> Vec<usize>;
}
