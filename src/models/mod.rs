use serde::{Deserialize, Serialize};

pub mod movie;

pub use movie::{CatalogEntry, MovieDetails, MovieId, RecommendationCard};

const DEFAULT_TITLE: &str = "Unknown";
const DEFAULT_OVERVIEW: &str = "No description available.";
const TRAILER_TYPE: &str = "Trailer";
const TRAILER_SITE: &str = "YouTube";

/// Response body for a recommendation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub selected: String,
    pub recommendations: Vec<RecommendationCard>,
    /// User-facing notices for cards that fell back to the placeholder
    pub warnings: Vec<String>,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// API response from GET /movie/{id}
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbMovie {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub vote_average: Option<serde_json::Number>,
    #[serde(default)]
    pub genres: Option<Vec<TmdbGenre>>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub name: String,
}

impl TmdbMovie {
    /// Converts the raw response into display details, filling in defaults
    /// for every field the provider left out
    pub fn into_details(self, trailer_url: Option<String>) -> MovieDetails {
        let genres = self
            .genres
            .unwrap_or_default()
            .into_iter()
            .map(|genre| genre.name)
            .collect::<Vec<_>>()
            .join(", ");

        MovieDetails {
            title: self.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            overview: self
                .overview
                .unwrap_or_else(|| DEFAULT_OVERVIEW.to_string()),
            rating: self
                .vote_average
                .map(|rating| rating.to_string())
                .unwrap_or_else(|| movie::NOT_AVAILABLE.to_string()),
            genres,
            trailer_url,
        }
    }
}

/// API response from GET /movie/{id}/videos
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbVideos {
    #[serde(default)]
    pub results: Option<Vec<TmdbVideo>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideo {
    #[serde(rename = "type", default)]
    pub video_type: String,
    #[serde(default)]
    pub site: String,
    #[serde(default)]
    pub key: String,
}

impl TmdbVideos {
    /// Key of the first YouTube trailer, in response order
    pub fn trailer_key(&self) -> Option<&str> {
        self.results
            .iter()
            .flatten()
            .find(|video| video.video_type == TRAILER_TYPE && video.site == TRAILER_SITE)
            .map(|video| video.key.as_str())
            .filter(|key| !key.is_empty())
    }
}
