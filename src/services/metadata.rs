use std::sync::Arc;

use crate::{
    models::{MovieId, RecommendationCard},
    services::providers::MetadataProvider,
};

/// Shown to the user once for every card that fell back to the placeholder
pub const FETCH_WARNING: &str =
    "Could not fetch movie details due to a connection issue. Please try again later.";

/// Fetches display metadata for one movie, never failing
///
/// A provider error (after the HTTP client's retries are spent) is logged,
/// reported to the user through `warnings`, and replaced by a placeholder
/// card so the remaining recommendations still render.
pub async fn fetch_details(
    provider: &dyn MetadataProvider,
    movie_id: MovieId,
    warnings: &mut Vec<String>,
) -> RecommendationCard {
    match provider.fetch_movie(movie_id).await {
        Ok(card) => card,
        Err(e) => {
            tracing::error!(
                movie_id = %movie_id,
                provider = provider.name(),
                error = %e,
                "Could not fetch movie details"
            );
            warnings.push(FETCH_WARNING.to_string());
            RecommendationCard::unavailable(movie_id)
        }
    }
}

/// Fetches metadata for several movies in parallel, keeping input order
///
/// Returns one card per identifier plus the warnings raised along the way.
pub async fn fetch_all(
    provider: Arc<dyn MetadataProvider>,
    movie_ids: Vec<MovieId>,
) -> (Vec<RecommendationCard>, Vec<String>) {
    let mut tasks = Vec::with_capacity(movie_ids.len());

    for movie_id in movie_ids {
        let provider = provider.clone();
        let task = tokio::spawn(async move {
            let mut warnings = Vec::new();
            let card = fetch_details(provider.as_ref(), movie_id, &mut warnings).await;
            (card, warnings)
        });
        tasks.push((movie_id, task));
    }

    let mut cards = Vec::with_capacity(tasks.len());
    let mut warnings = Vec::new();

    for (movie_id, task) in tasks {
        match task.await {
            Ok((card, task_warnings)) => {
                cards.push(card);
                warnings.extend(task_warnings);
            }
            Err(e) => {
                tracing::error!(movie_id = %movie_id, error = %e, "Task join error");
                warnings.push(FETCH_WARNING.to_string());
                cards.push(RecommendationCard::unavailable(movie_id));
            }
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(
            success_count = cards.len() - warnings.len(),
            error_count = warnings.len(),
            provider = provider.name(),
            "Partial metadata fetch failure"
        );
    }

    (cards, warnings)
}
