//! Fake catalog service for integration tests.
#![allow(dead_code)]

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Initialize tracing for tests
pub fn tracing_init() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_line_number(true)
        .with_target(false)
        .with_file(true)
        .try_init();
}

/// A request seen by the fake service.
#[derive(Clone, Debug)]
pub struct Recorded {
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone)]
pub struct CatalogState {
    pub total_pages: u32,
    /// Respond to the listing with this status and body instead of a page.
    pub listing_failure: Option<(StatusCode, &'static str)>,
    /// Token accepted by the service. Requests with another token get 401.
    pub accepted_token: Option<&'static str>,
    pub requests: Arc<Mutex<Vec<Recorded>>>,
}

impl CatalogState {
    pub fn new(total_pages: u32) -> Self {
        Self {
            total_pages,
            listing_failure: None,
            accepted_token: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, path: String, query: HashMap<String, String>, headers: &HeaderMap, body: Option<Value>) {
        let authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.requests.lock().unwrap().push(Recorded {
            path,
            query,
            authorization,
            body,
        });
    }

    fn rejects(&self, headers: &HeaderMap) -> bool {
        let Some(token) = self.accepted_token else {
            return false;
        };
        let expected = format!("Bearer {token}");
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map_or(true, |v| v != expected)
    }
}

fn car_json(id: &str, make: &str) -> Value {
    json!({
        "_id": id,
        "make": make,
        "model": "Model",
        "type": "suv",
        "pricing": {"basePrice": 1500, "currency": "AED"},
        "availability": {"location": {"name": "DIFC Branch"}}
    })
}

async fn list_cars(
    State(state): State<CatalogState>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    state.record("/api/cars".into(), query.clone(), &headers, None);

    if state.rejects(&headers) {
        return (StatusCode::UNAUTHORIZED, "expired").into_response();
    }
    if let Some((status, body)) = state.listing_failure {
        return (status, body).into_response();
    }

    let page: u32 = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let make = query.get("make").cloned().unwrap_or_else(|| "any".into());
    let cars = vec![
        car_json(&format!("p{page}-a"), &make),
        car_json(&format!("p{page}-b"), &make),
    ];
    Json(json!({
        "cars": cars,
        "currentPage": page,
        "totalPages": state.total_pages,
        "totalCars": state.total_pages * 2,
    }))
    .into_response()
}

async fn get_car(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    state.record(format!("/api/cars/{id}"), HashMap::new(), &headers, None);
    if id == "missing" {
        return (StatusCode::NOT_FOUND, "no such car").into_response();
    }
    Json(car_json(&id, "Lexus")).into_response()
}

async fn create_car(
    State(state): State<CatalogState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.record("/api/cars".into(), HashMap::new(), &headers, Some(body.clone()));
    if state.rejects(&headers) {
        return (StatusCode::UNAUTHORIZED, "expired").into_response();
    }
    let make = body["make"].as_str().unwrap_or_default().to_string();
    (StatusCode::CREATED, Json(car_json("new-1", &make))).into_response()
}

/// Serve the fake catalog on an ephemeral port. Returns its base URL.
pub async fn spawn_catalog(state: CatalogState) -> String {
    let app = Router::new()
        .route("/api/cars", get(list_cars).post(create_car))
        .route("/api/cars/:id", get(get_car))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}
