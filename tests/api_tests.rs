use std::{collections::HashSet, path::Path, sync::Arc};

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::Value;

use movie_recommender::{
    api::{create_router, AppState},
    catalog::Catalog,
    error::{AppError, AppResult},
    models::{MovieDetails, MovieId, RecommendationCard},
    services::providers::MetadataProvider,
};

const MOVIES: &str = r#"[
    {"movie_id": 1, "title": "A"},
    {"movie_id": 2, "title": "B"},
    {"movie_id": 3, "title": "C"}
]"#;
const SIMILARITY: &str = "[[1.0, 0.8, 0.3], [0.8, 1.0, 0.5], [0.3, 0.5, 1.0]]";

/// Provider that answers from memory and fails for chosen ids
struct FakeProvider {
    failing: HashSet<MovieId>,
}

#[async_trait::async_trait]
impl MetadataProvider for FakeProvider {
    async fn fetch_movie(&self, movie_id: MovieId) -> AppResult<RecommendationCard> {
        if self.failing.contains(&movie_id) {
            return Err(AppError::ExternalApi(
                "API returned status 503 Service Unavailable: ".to_string(),
            ));
        }

        Ok(RecommendationCard {
            movie_id,
            poster_url: format!("https://image.tmdb.org/t/p/w500/{}.jpg", movie_id),
            details: MovieDetails {
                title: format!("Movie {}", movie_id),
                overview: "An overview.".to_string(),
                rating: "7.5".to_string(),
                genres: "Drama, Comedy".to_string(),
                trailer_url: Some(format!("https://www.youtube.com/embed/key{}", movie_id)),
            },
        })
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

fn create_test_server(failing: &[u64]) -> TestServer {
    let catalog = Catalog::from_json(MOVIES, SIMILARITY).unwrap();
    let provider = FakeProvider {
        failing: failing.iter().copied().map(MovieId).collect(),
    };
    let state = AppState::new(Arc::new(catalog), Arc::new(provider), 5);
    TestServer::new(create_router(state)).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(&[]);
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_index_page_served() {
    let server = create_test_server(&[]);
    let response = server.get("/").await;
    response.assert_status_ok();
    assert!(response.text().contains("Show Recommendations"));
}

#[tokio::test]
async fn test_index_page_reports_failed_requests() {
    let server = create_test_server(&[]);
    let page = server.get("/").await.text();

    assert!(page.contains("catch (err)"));
    assert!(page.contains("Could not load recommendations. Please try again later."));
}

#[tokio::test]
async fn test_list_movies_in_catalog_order() {
    let server = create_test_server(&[]);
    let response = server.get("/api/v1/movies").await;
    response.assert_status_ok();
    let titles: Vec<String> = response.json();
    assert_eq!(titles, vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_recommendations_for_title() {
    let server = create_test_server(&[]);

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "A")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["selected"], "A");

    let recommendations = body["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 2);
    assert_eq!(recommendations[0]["movie_id"], 2);
    assert_eq!(recommendations[1]["movie_id"], 3);
    assert_eq!(recommendations[0]["details"]["title"], "Movie 2");
    assert_eq!(
        recommendations[0]["poster_url"],
        "https://image.tmdb.org/t/p/w500/2.jpg"
    );
    assert!(body["warnings"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_fetch_degrades_single_card() {
    let server = create_test_server(&[2]);

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "A")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();

    let recommendations = body["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 2);
    assert_eq!(recommendations[0]["details"]["title"], "Unavailable");
    assert_eq!(
        recommendations[0]["details"]["overview"],
        "Movie information could not be loaded."
    );
    assert_eq!(recommendations[0]["details"]["genres"], "N/A");
    assert_eq!(recommendations[0]["poster_url"], "");
    assert!(recommendations[0]["details"]["trailer_url"].is_null());
    assert_eq!(recommendations[1]["details"]["title"], "Movie 3");

    let warnings = body["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
}

#[tokio::test]
async fn test_unknown_title_returns_404() {
    let server = create_test_server(&[]);

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Not A Movie")
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("Not A Movie"));
}

#[tokio::test]
async fn test_blank_title_returns_400() {
    let server = create_test_server(&[]);

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "  ")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server(&[]);
    let request_id = "6f1c2a3e-8b44-4b6f-9d7a-2a1e5c3b9f10";

    let response = server
        .get("/health")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_static(request_id),
        )
        .await;

    assert_eq!(response.header("x-request-id"), request_id);
}

#[test]
fn test_bundled_artifacts_load() {
    let data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let catalog = Catalog::load(
        &data_dir.join("movies.json"),
        &data_dir.join("similarity.json"),
    )
    .unwrap();

    assert_eq!(catalog.len(), 10);
    let ids = movie_recommender::services::recommendations::recommend(&catalog, "The Dark Knight", 5)
        .unwrap();
    assert_eq!(ids.len(), 5);
    assert_eq!(ids[0], MovieId(49026));
}
