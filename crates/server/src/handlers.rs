//! HTTP handlers.
//!
//! - `GET /` renders the empty form
//! - `POST /recommend` runs the pipeline for the submitted genre
//! - `GET /health` reports liveness
//!
//! Every recommendation request reloads both tables from disk; nothing
//! loaded for one request is visible to another.

use std::time::Instant;

use anyhow::anyhow;
use axum::extract::{Form, State};
use axum::response::Html;
use axum::Json;
use data_loader::Dataset;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::render::{self, Outcome, PageView};
use crate::AppState;

/// Form body of `POST /recommend`
#[derive(Debug, Deserialize)]
pub struct RecommendForm {
    pub genre: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// GET /
pub async fn index() -> Html<String> {
    Html(render::render_page(&PageView::empty()))
}

/// POST /recommend
///
/// A missing `genre` field is rejected before any file is read.
pub async fn recommend(
    State(state): State<AppState>,
    Form(form): Form<RecommendForm>,
) -> Result<Html<String>, ApiError> {
    let genre = form.genre.ok_or(ApiError::MissingParameter("genre"))?;
    let start_time = Instant::now();

    let dataset = load_dataset(&state.config).await?;

    let recommender = state.recommender.clone();
    let request_genre = genre.clone();
    let recommendations = tokio::task::spawn_blocking(move || {
        recommender.recommend_from(&dataset, &request_genre)
    })
    .await
    .map_err(|e| anyhow!("Recommendation task failed: {e}"))??;

    info!(
        "Recommended {} movies for genre '{}' in {:.2?}",
        recommendations.len(),
        genre,
        start_time.elapsed()
    );

    let view = PageView::results(genre, Outcome::from(recommendations));
    Ok(Html(render::render_page(&view)))
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Read both tables on the blocking pool, bounded by the configured timeout.
///
/// The timeout only stops the wait: a timed-out read keeps running on the
/// blocking pool until it finishes, and its result is discarded.
async fn load_dataset(config: &ServerConfig) -> Result<Dataset, ApiError> {
    let movies_path = config.movies_path.clone();
    let ratings_path = config.ratings_path.clone();
    let load = tokio::task::spawn_blocking(move || {
        Dataset::load_from_files(&movies_path, &ratings_path)
    });

    match tokio::time::timeout(config.load_timeout, load).await {
        Ok(joined) => {
            let loaded = joined.map_err(|e| anyhow!("Dataset load task failed: {e}"))?;
            Ok(loaded?)
        }
        Err(_) => Err(ApiError::Timeout(config.load_timeout)),
    }
}
