//! Server configuration.
//!
//! Built once at startup and shared read-only with every handler through
//! [`crate::AppState`]. There is no global application object.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use pipeline::RecommenderConfig;

/// Default address the HTTP server binds to
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Default upper bound on loading both tables for one request
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address for `POST /recommend` and friends
    pub bind_addr: SocketAddr,
    pub movies_path: PathBuf,
    pub ratings_path: PathBuf,
    /// Applies to the dataset load step only
    pub load_timeout: Duration,
    pub recommender: RecommenderConfig,
}

impl ServerConfig {
    pub fn new(movies_path: impl Into<PathBuf>, ratings_path: impl Into<PathBuf>) -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            movies_path: movies_path.into(),
            ratings_path: ratings_path.into(),
            load_timeout: DEFAULT_LOAD_TIMEOUT,
            recommender: RecommenderConfig::default(),
        }
    }

    pub fn with_bind_addr(mut self, bind_addr: SocketAddr) -> Self {
        self.bind_addr = bind_addr;
        self
    }

    pub fn with_load_timeout(mut self, load_timeout: Duration) -> Self {
        self.load_timeout = load_timeout;
        self
    }

    pub fn with_recommender(mut self, recommender: RecommenderConfig) -> Self {
        self.recommender = recommender;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new("data/movies.csv", "data/ratings.csv")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bind_addr_matches_constant() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.load_timeout, DEFAULT_LOAD_TIMEOUT);
        assert_eq!(config.recommender.sample_size, 5);
    }
}
