use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use movie_recommender::{
    api::{create_router, AppState},
    catalog::Catalog,
    config::Config,
    services::providers::{http::HttpClient, tmdb::TmdbProvider},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movie_recommender=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let catalog = Catalog::load(&config.movies_path, &config.similarity_path)
        .context("Failed to load recommendation artifacts")?;

    let http_client = HttpClient::new(config.request_timeout(), config.retry_policy())
        .context("Failed to build HTTP client")?;
    let provider = TmdbProvider::from_config(&config, Arc::new(http_client));

    let state = AppState::new(
        Arc::new(catalog),
        Arc::new(provider),
        config.recommendation_count,
    );
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
