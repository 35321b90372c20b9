//! Server crate for the ReelRecs recommendation engine.
//!
//! Serves a single HTML page: a genre form and, after a POST, up to five
//! popular movies from that genre.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use pipeline::Recommender;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod handlers;
pub mod render;

pub use config::ServerConfig;
pub use error::ApiError;

/// Application state shared across HTTP handlers
///
/// Holds only immutable values; datasets are loaded per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub recommender: Recommender,
}

impl AppState {
    /// State whose recommender follows `config.recommender` with random sampling
    pub fn new(config: ServerConfig) -> Self {
        let recommender = Recommender::new(config.recommender);
        Self::with_recommender(config, recommender)
    }

    /// State with an explicit recommender, e.g. one with a deterministic sampler
    pub fn with_recommender(config: ServerConfig, recommender: Recommender) -> Self {
        Self {
            config: Arc::new(config),
            recommender,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/recommend", post(handlers::recommend))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind to `config.bind_addr` and serve until the process exits
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let bind_addr = config.bind_addr;
    let app = build_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("ReelRecs listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
