//! Genre-based popular-movie recommendation pipeline.
//!
//! This crate provides:
//! - Filter trait and the genre filter, composed by FilterPipeline
//! - Join / aggregate / rank stages over the ratings table
//! - Candidate resolution (titles, deduplication)
//! - Sampler trait with random, seeded and first-N implementations
//! - Recommender, which runs every stage for one request
//!
//! ## Architecture
//! The pipeline processes one loaded dataset per request:
//! 1. Filters remove movies outside the requested genre
//! 2. Remaining movies are joined with ratings and ranked by rating count
//! 3. The top 100 become the candidate set, one entry per title
//! 4. A Sampler picks up to five of them
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{Recommender, RecommenderConfig};
//!
//! let recommender = Recommender::new(RecommenderConfig::default());
//! let recs = recommender.recommend(&dataset.movies, &dataset.ratings, "comedy")?;
//! for rec in recs {
//!     println!("{} ({:.1})", rec.title, rec.rating);
//! }
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod popularity;
pub mod candidates;
pub mod sampler;
pub mod recommender;

// Re-export main types
pub use traits::{Filter, Sampler};
pub use filter_pipeline::FilterPipeline;
pub use candidates::Candidate;
pub use popularity::PopularityAggregate;
pub use sampler::{FirstNSampler, RandomSampler, SeededSampler};
pub use recommender::{
    recommend, RatingMode, Recommendation, Recommender, RecommenderConfig, DEFAULT_SAMPLE_SIZE,
    DEFAULT_TOP_N,
};
