//! In-process stand-in for the provider's REST API, for exercising real
//! HTTP behavior (status codes, retries, query strings) in tests.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{Query, State},
    http::{HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Value};

/// Canned responses for one path; the last response repeats once the
/// sequence is used up
#[derive(Debug, Clone)]
pub struct StubRoute {
    path: String,
    responses: Vec<(StatusCode, Value)>,
    headers: Vec<(&'static str, &'static str)>,
    echo_query: bool,
}

impl StubRoute {
    pub fn sequence(path: &str, responses: Vec<(StatusCode, Value)>) -> Self {
        Self {
            path: path.to_string(),
            responses,
            headers: Vec::new(),
            echo_query: false,
        }
    }

    pub fn always(path: &str, status: StatusCode, body: Value) -> Self {
        Self::sequence(path, vec![(status, body)])
    }

    pub fn ok(path: &str, body: Value) -> Self {
        Self::always(path, StatusCode::OK, body)
    }

    /// Responds with the request's query parameters as a JSON object
    pub fn echo_query(path: &str) -> Self {
        Self {
            echo_query: true,
            ..Self::sequence(path, Vec::new())
        }
    }

    pub fn with_header(mut self, name: &'static str, value: &'static str) -> Self {
        self.headers.push((name, value));
        self
    }
}

#[derive(Clone)]
struct StubState {
    routes: Arc<HashMap<String, StubRoute>>,
    hits: Arc<Mutex<HashMap<String, usize>>>,
}

pub struct StubServer {
    base_url: String,
    hits: Arc<Mutex<HashMap<String, usize>>>,
}

impl StubServer {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Requests received for `path` so far
    pub fn hits(&self, path: &str) -> usize {
        self.hits.lock().unwrap().get(path).copied().unwrap_or(0)
    }
}

pub async fn spawn_stub(routes: Vec<StubRoute>) -> StubServer {
    let routes = routes
        .into_iter()
        .map(|route| (route.path.clone(), route))
        .collect::<HashMap<_, _>>();
    let hits = Arc::new(Mutex::new(HashMap::new()));

    let state = StubState {
        routes: Arc::new(routes),
        hits: hits.clone(),
    };
    let app = Router::new().fallback(respond).with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubServer {
        base_url: format!("http://{}", addr),
        hits,
    }
}

async fn respond(
    State(state): State<StubState>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let path = uri.path().to_string();
    let hit = {
        let mut hits = state.hits.lock().unwrap();
        let count = hits.entry(path.clone()).or_insert(0);
        *count += 1;
        *count
    };

    let Some(route) = state.routes.get(&path) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"status_message": "The resource you requested could not be found."})),
        )
            .into_response();
    };

    if route.echo_query {
        return Json(json!(params)).into_response();
    }

    let (status, body) = route
        .responses
        .get(hit - 1)
        .or_else(|| route.responses.last())
        .cloned()
        .unwrap_or((StatusCode::OK, Value::Null));

    let mut response = (status, Json(body)).into_response();
    for (name, value) in &route.headers {
        response
            .headers_mut()
            .insert(*name, HeaderValue::from_static(*value));
    }
    response
}
