pub mod fixtures;

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// Query pairs of each request received on `/`, in arrival order.
pub type RequestLog = Arc<RwLock<Vec<Vec<(String, String)>>>>;

#[derive(Clone)]
pub struct MockState {
    pub token: String,
    pub log: RequestLog,
}

pub fn app(token: &str) -> Router {
    let state = MockState {
        token: token.to_string(),
        log: Arc::new(RwLock::new(Vec::new())),
    };
    Router::new()
        .route("/", get(report))
        .route("/__requests", get(requests))
        .with_state(state)
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(token)).await
}

fn first<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

fn api_error(message: &str) -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "error": message })))
}

/// Mirrors the real API: rejected queries still answer 200 with an
/// `{"error": ..}` body. Only a missing `from` is a 400.
async fn report(
    State(state): State<MockState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> (StatusCode, Json<Value>) {
    state.log.write().await.push(pairs.clone());

    let Some(from) = first(&pairs, "from") else {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "from is required" })));
    };
    match first(&pairs, "token") {
        Some(token) if token == state.token => {}
        Some(_) => return api_error("invalid token"),
        None => return api_error("token is required"),
    }
    if first(&pairs, "target").is_none() {
        return api_error("target is required");
    }
    let Some(mut body) = fixtures::body_for(from) else {
        return api_error(&format!("unknown from: {from}"));
    };
    if let Some(limit) = first(&pairs, "limit").and_then(|l| l.parse().ok()) {
        fixtures::apply_limit(&mut body, limit);
    }
    (StatusCode::OK, Json(body))
}

async fn requests(State(state): State<MockState>) -> Json<Vec<Vec<(String, String)>>> {
    Json(state.log.read().await.clone())
}
