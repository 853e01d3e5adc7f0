/// Movie metadata provider abstraction
///
/// Recommendations only carry catalog identifiers; everything shown on a
/// card (poster, overview, rating, genres, trailer) comes from a remote
/// provider. Providers report failures as errors; turning a failure into a
/// placeholder card is the caller's job (see `services::metadata`).
use crate::{
    error::AppResult,
    models::{MovieId, RecommendationCard},
};

pub mod http;
pub mod tmdb;

#[cfg(test)]
pub(crate) mod test_support;

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch poster and display details for one movie
    async fn fetch_movie(&self, movie_id: MovieId) -> AppResult<RecommendationCard>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
