use serde::Deserialize;
use std::{path::PathBuf, time::Duration};

use crate::services::providers::http::RetryPolicy;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Language requested from TMDB
    #[serde(default = "default_tmdb_language")]
    pub tmdb_language: String,

    /// Prefix joined with a movie's poster path
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Prefix joined with a trailer's video key
    #[serde(default = "default_video_embed_base_url")]
    pub video_embed_base_url: String,

    /// Per-call timeout for provider requests, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Retries after the first attempt for retryable failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Backoff before the first retry, doubled for each retry after it
    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,

    /// Number of similar movies returned per request
    #[serde(default = "default_recommendation_count")]
    pub recommendation_count: usize,

    /// Catalog artifact (JSON array of `{movie_id, title}`)
    #[serde(default = "default_movies_path")]
    pub movies_path: PathBuf,

    /// Similarity artifact (JSON array of rows)
    #[serde(default = "default_similarity_path")]
    pub similarity_path: PathBuf,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_language() -> String {
    "en-US".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_video_embed_base_url() -> String {
    "https://www.youtube.com/embed".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    3
}

fn default_backoff_base_ms() -> u64 {
    1000
}

fn default_recommendation_count() -> usize {
    5
}

fn default_movies_path() -> PathBuf {
    PathBuf::from("data/movies.json")
}

fn default_similarity_path() -> PathBuf {
    PathBuf::from("data/similarity.json")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Retry policy for provider calls, built from the retry settings
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            backoff_base: Duration::from_millis(self.backoff_base_ms),
            ..RetryPolicy::default()
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
