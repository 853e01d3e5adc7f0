use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::RecommendationResponse,
    services::{metadata, recommendations},
};

use super::AppState;

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: String,
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// The single-page UI
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Catalog titles in catalog order, for the movie selector
pub async fn list_movies(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.catalog.titles().map(str::to_string).collect())
}

/// Similar movies for the selected title, each with its metadata
pub async fn get_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    if params.title.trim().is_empty() {
        return Err(AppError::InvalidInput("Title cannot be empty".to_string()));
    }

    tracing::info!(
        request_id = %request_id,
        title = %params.title,
        "Processing recommendation request"
    );

    let movie_ids =
        recommendations::recommend(&state.catalog, &params.title, state.recommendation_count)?;
    let (cards, warnings) = metadata::fetch_all(state.provider.clone(), movie_ids).await;

    tracing::info!(
        request_id = %request_id,
        results = cards.len(),
        degraded = warnings.len(),
        "Recommendations completed"
    );

    Ok(Json(RecommendationResponse {
        selected: params.title,
        recommendations: cards,
        warnings,
    }))
}
