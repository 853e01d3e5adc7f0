/// TMDB (The Movie Database) provider
///
/// API Flow:
/// 1. Details: /movie/{id} → title, overview, rating, genres, poster path
/// 2. Videos: /movie/{id}/videos → first YouTube trailer key
///
/// Both calls go through the shared retrying [`HttpClient`].
use crate::{
    config::Config,
    error::AppResult,
    models::{MovieId, RecommendationCard, TmdbMovie, TmdbVideos},
    services::providers::{http::HttpClient, MetadataProvider},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: Arc<HttpClient>,
    api_key: String,
    api_url: String,
    language: String,
    image_base_url: String,
    video_embed_base_url: String,
}

impl TmdbProvider {
    pub fn new(
        http_client: Arc<HttpClient>,
        api_key: String,
        api_url: String,
        language: String,
        image_base_url: String,
        video_embed_base_url: String,
    ) -> Self {
        Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            language,
            image_base_url,
            video_embed_base_url,
        }
    }

    pub fn from_config(config: &Config, http_client: Arc<HttpClient>) -> Self {
        Self::new(
            http_client,
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.tmdb_language.clone(),
            config.image_base_url.clone(),
            config.video_embed_base_url.clone(),
        )
    }

    fn query(&self) -> [(&str, &str); 2] {
        [
            ("api_key", self.api_key.as_str()),
            ("language", self.language.as_str()),
        ]
    }

    /// Poster URL for a TMDB poster path, or empty when there is none
    fn poster_url(&self, poster_path: Option<&str>) -> String {
        match poster_path.map(|path| path.trim_start_matches('/')) {
            Some(path) if !path.is_empty() => join_url(&self.image_base_url, path),
            _ => String::new(),
        }
    }

    fn trailer_url(&self, key: &str) -> String {
        join_url(&self.video_embed_base_url, key)
    }
}

fn join_url(base: &str, tail: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), tail)
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn fetch_movie(&self, movie_id: MovieId) -> AppResult<RecommendationCard> {
        let details_url = format!("{}/movie/{}", self.api_url, movie_id);
        let movie: TmdbMovie = self
            .http_client
            .get_json(&details_url, &self.query())
            .await?;

        let videos_url = format!("{}/movie/{}/videos", self.api_url, movie_id);
        let videos: TmdbVideos = self
            .http_client
            .get_json(&videos_url, &self.query())
            .await?;

        let trailer_url = videos.trailer_key().map(|key| self.trailer_url(key));
        let poster_url = self.poster_url(movie.poster_path.as_deref());
        let details = movie.into_details(trailer_url);

        tracing::info!(
            movie_id = %movie_id,
            title = %details.title,
            has_trailer = details.trailer_url.is_some(),
            provider = "tmdb",
            "Movie details fetched"
        );

        Ok(RecommendationCard {
            movie_id,
            poster_url,
            details,
        })
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
