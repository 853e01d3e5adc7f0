use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub const PLACEHOLDER_TITLE: &str = "Unavailable";
pub const PLACEHOLDER_OVERVIEW: &str = "Movie information could not be loaded.";
pub const NOT_AVAILABLE: &str = "N/A";

/// TMDB movie identifier, distinct from a movie's row in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub u64);

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of the precomputed catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    pub movie_id: MovieId,
    pub title: String,
}

impl CatalogEntry {
    pub fn new(movie_id: u64, title: impl Into<String>) -> Self {
        Self {
            movie_id: MovieId(movie_id),
            title: title.into(),
        }
    }
}

/// Display metadata for a recommended movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub title: String,
    pub overview: String,
    pub rating: String,
    /// Genre names joined with ", "
    pub genres: String,
    pub trailer_url: Option<String>,
}

impl MovieDetails {
    /// Record substituted when a movie's metadata could not be fetched
    pub fn placeholder() -> Self {
        Self {
            title: PLACEHOLDER_TITLE.to_string(),
            overview: PLACEHOLDER_OVERVIEW.to_string(),
            rating: NOT_AVAILABLE.to_string(),
            genres: NOT_AVAILABLE.to_string(),
            trailer_url: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        *self == Self::placeholder()
    }
}

/// A recommended movie as rendered by the page: poster plus details
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationCard {
    pub movie_id: MovieId,
    /// Empty when the provider has no poster or the fetch failed
    pub poster_url: String,
    pub details: MovieDetails,
}

impl RecommendationCard {
    pub fn unavailable(movie_id: MovieId) -> Self {
        Self {
            movie_id,
            poster_url: String::new(),
            details: MovieDetails::placeholder(),
        }
    }
}
