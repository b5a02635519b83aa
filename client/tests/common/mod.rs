#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Context;
use axum::extract::{Path, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{Method, StatusCode, Uri};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use client::{ApiClient, MemoryStorage, Navigator, TokenStore};
use jsonwebtoken::{EncodingKey, Header};
use serde_json::{json, Value};
use shared::{EntityId, Itinerary, ItineraryStatus, ItineraryTruck, Route, StatusUpdate};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use url::Url;

pub const TEST_SECRET: &[u8] = b"greenlog-test-secret";
pub const ANA_EMAIL: &str = "ana@greenlog.test";
pub const ANA_PASSWORD: &str = "coleta123";

/// Signs `claims` the way the backend does. The client never checks the signature.
pub fn mint_token(claims: &Value) -> anyhow::Result<String> {
    let token = jsonwebtoken::encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(TEST_SECRET),
    )?;
    Ok(token)
}

pub fn ana_token() -> anyhow::Result<String> {
    mint_token(&json!({"id": 7, "name": "Ana"}))
}

/// Builds a token by hand from a raw payload string.
pub fn raw_token(payload: &str) -> String {
    format!(
        "{header}.{payload}.c2lnbmF0dXJl",
        header = base64_url::encode(r#"{"alg":"HS256","typ":"JWT"}"#),
        payload = base64_url::encode(payload),
    )
}

#[derive(Default)]
pub struct CountingNavigator {
    resets: AtomicUsize,
}

impl CountingNavigator {
    pub fn resets(&self) -> usize {
        self.resets.load(Ordering::SeqCst)
    }
}

impl Navigator for CountingNavigator {
    fn navigate_to_root(&self) {
        self.resets.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn memory_tokens() -> TokenStore {
    TokenStore::new(Arc::new(MemoryStorage::new()))
}

/// Client without connection pooling, so a stopped stub fails fast.
pub fn api_client(url: &Url, tokens: &TokenStore) -> anyhow::Result<ApiClient> {
    let http = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .build()?;
    Ok(ApiClient::with_client(http, url.clone(), tokens.clone()))
}

pub fn itinerary(id: EntityId, status: ItineraryStatus) -> Itinerary {
    Itinerary {
        id,
        status,
        route: Route {
            id: 100 + id,
            name: format!("Rota {id}"),
            distance_km: Some(12.5),
            points: vec![json!({"id": 1}), json!({"id": 2}), json!({"id": 3})],
        },
        truck: ItineraryTruck {
            plate: format!("ABC1D{id:02}"),
            driver_name: "Joana".to_owned(),
        },
        date: NaiveDate::from_ymd_opt(2025, 5, 1).expect("valid date"),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
}

#[derive(Default)]
pub struct BackendState {
    pub itineraries: Mutex<Vec<Itinerary>>,
    pub requests: Mutex<Vec<Recorded>>,
    pub bodies: Mutex<Vec<(String, Value)>>,
    /// Canned answers keyed by `"METHOD /path"`, or `"*"` for every request.
    pub failures: Mutex<HashMap<String, (StatusCode, String)>>,
}

pub struct StubBackend {
    pub url: Url,
    pub state: Arc<BackendState>,
    shutdown: Option<oneshot::Sender<()>>,
    server: Option<JoinHandle<()>>,
}

impl StubBackend {
    pub async fn start() -> anyhow::Result<Self> {
        Self::with_itineraries(Vec::new()).await
    }

    pub async fn with_itineraries(itineraries: Vec<Itinerary>) -> anyhow::Result<Self> {
        let state = Arc::new(BackendState {
            itineraries: Mutex::new(itineraries),
            ..Default::default()
        });
        let app = Router::new()
            .route("/login", post(login))
            .route("/register", post(register))
            .route("/trucks", get(list_trucks).post(create_entity))
            .route("/trucks/{id}", delete(delete_entity))
            .route("/points", get(list_points).post(create_entity))
            .route("/points/{id}", delete(delete_entity))
            .route("/routes", get(list_routes).post(create_entity))
            .route("/routes/{id}", delete(delete_entity))
            .route("/schedule", get(list_schedule))
            .route("/itineraries", post(create_entity))
            .route("/itineraries/{id}/status", patch(update_status))
            .layer(middleware::from_fn_with_state(state.clone(), record))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let server = tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            let _ = server.await;
        });

        Ok(Self {
            url: Url::parse(&format!("http://{addr}"))?,
            state,
            shutdown: Some(shutdown_tx),
            server: Some(server),
        })
    }

    /// Stops accepting connections; later requests fail at the transport level.
    pub async fn stop(&mut self) -> anyhow::Result<()> {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(server) = self.server.take() {
            tokio::time::timeout(Duration::from_secs(5), server)
                .await
                .context("stub backend did not stop in time")??;
        }
        Ok(())
    }

    pub fn fail(&self, route: &str, status: StatusCode, body: &str) {
        self.state
            .failures
            .lock()
            .unwrap()
            .insert(route.to_owned(), (status, body.to_owned()));
    }

    pub fn clear_failures(&self) {
        self.state.failures.lock().unwrap().clear();
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|request| request.method == method && request.path == path)
            .count()
    }

    pub fn bodies(&self) -> Vec<(String, Value)> {
        self.state.bodies.lock().unwrap().clone()
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

async fn record(State(state): State<Arc<BackendState>>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let authorization = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    state.requests.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: path.clone(),
        authorization,
    });

    let canned = {
        let failures = state.failures.lock().unwrap();
        failures
            .get(&format!("{method} {path}"))
            .or_else(|| failures.get("*"))
            .cloned()
    };
    match canned {
        Some((status, body)) => (status, body).into_response(),
        None => next.run(request).await,
    }
}

async fn login(Json(payload): Json<Value>) -> Response {
    if payload["email"] == ANA_EMAIL && payload["password"] == ANA_PASSWORD {
        match ana_token() {
            Ok(token) => Json(json!({"token": token})).into_response(),
            Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Credenciais inválidas"})),
        )
            .into_response()
    }
}

async fn register(Json(payload): Json<Value>) -> Response {
    let name = payload["name"].as_str().unwrap_or_default().to_owned();
    match mint_token(&json!({"id": 8, "name": name})) {
        Ok(token) => (StatusCode::CREATED, Json(json!({"token": token}))).into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn list_trucks() -> Json<Value> {
    Json(json!([
        {"id": 1, "plate": "ABC1D23", "driverName": "Joana", "capacity": 1000, "wasteTypes": ["PLASTICO", "PAPEL"]},
        {"id": 2, "plate": "XYZ9A87", "driverName": "Rui", "capacity": 800, "wasteTypes": ["METAL"]}
    ]))
}

async fn list_points() -> Json<Value> {
    Json(json!([
        {"id": 1, "name": "Praça Central", "address": "Rua A, 10", "responsible": "Admin", "contact": "12345678", "wasteTypes": ["VIDRO"]}
    ]))
}

async fn list_routes() -> Json<Value> {
    Json(json!([
        {"id": 101, "name": "Centro", "distanceKm": 12.5, "points": [{"id": 1}, {"id": 2}]}
    ]))
}

async fn create_entity(
    State(state): State<Arc<BackendState>>,
    uri: Uri,
    Json(payload): Json<Value>,
) -> Response {
    state
        .bodies
        .lock()
        .unwrap()
        .push((uri.path().to_owned(), payload.clone()));
    (StatusCode::CREATED, Json(payload)).into_response()
}

async fn delete_entity(Path(_id): Path<EntityId>) -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn list_schedule(State(state): State<Arc<BackendState>>) -> Json<Vec<Itinerary>> {
    Json(state.itineraries.lock().unwrap().clone())
}

async fn update_status(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<EntityId>,
    Json(update): Json<StatusUpdate>,
) -> Response {
    let mut itineraries = state.itineraries.lock().unwrap();
    match itineraries.iter_mut().find(|itinerary| itinerary.id == id) {
        Some(itinerary) => {
            itinerary.status = update.status;
            StatusCode::NO_CONTENT.into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Itinerário não encontrado"})),
        )
            .into_response(),
    }
}
