//! Shared test helpers for integration tests.
//!
//! Starts an in-process fake backend on an ephemeral port and builds a
//! [`Console`] pointed at it, over in-memory session storage.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::sync::Notify;

use infradesk_auth::MemoryStorage;
use infradesk_core::config::AppConfig;
use infradesk_core::traits::Navigator;
use infradesk_entity::Credentials;
use infradesk_service::Console;

pub const TOKEN: &str = "tok-alice";

/// One request the fake backend received.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub bearer: Option<String>,
    pub body: Value,
}

/// In-memory backend state shared with the router.
#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    requests: Arc<Mutex<Vec<Recorded>>>,
    datacenters: Arc<Mutex<Vec<Value>>>,
    maintenance: Arc<Mutex<Vec<Value>>>,
    forbid: Arc<AtomicBool>,
    me_failure: Arc<Mutex<Option<StatusCode>>>,
    me_gate: Arc<Mutex<Option<MeGate>>>,
}

/// Holds `/me/` open until released.
#[derive(Debug, Clone, Default)]
pub struct MeGate {
    /// Signalled when a `/me/` request arrives.
    pub reached: Arc<Notify>,
    /// Signal to let the held `/me/` request answer.
    pub release: Arc<Notify>,
}

impl FakeBackend {
    fn seeded() -> Self {
        let backend = Self::default();
        *backend.datacenters.lock().unwrap() = vec![
            json!({ "id": 1, "name": "DC1", "location": "NYC" }),
            json!({ "id": 2, "name": "DC2", "location": "SFO" }),
        ];
        // No target: the backend omits object_id and content_type.
        *backend.maintenance.lock().unwrap() = vec![json!({
            "id": 7,
            "title": "Swap PSU",
            "description": "Replaced the failed supply",
            "performed_at": "2024-03-01T09:30:00Z",
            "datacenter": 1,
        })];
        backend
    }

    /// Answer `/me/` with `status` from now on.
    pub fn fail_profile(&self, status: StatusCode) {
        *self.me_failure.lock().unwrap() = Some(status);
    }

    /// Hold every `/me/` request until the returned gate is released.
    pub fn hold_profile(&self) -> MeGate {
        let gate = MeGate::default();
        *self.me_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests matching `method` and `path`.
    pub fn requests_to(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    /// Answer every authenticated call with 403 from now on.
    pub fn revoke_token(&self) {
        self.forbid.store(true, Ordering::SeqCst);
    }

    pub fn datacenters(&self) -> Vec<Value> {
        self.datacenters.lock().unwrap().clone()
    }
}

/// Records navigation requests.
#[derive(Debug, Default)]
pub struct RecordingNavigator(Mutex<Vec<String>>);

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.0.lock().unwrap().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        self.0.lock().unwrap().push(route.to_string());
    }
}

/// Test application context
pub struct TestApp {
    pub console: Console,
    pub backend: FakeBackend,
    pub storage: Arc<MemoryStorage>,
    pub navigator: Arc<RecordingNavigator>,
}

impl TestApp {
    /// Start the fake backend and a console with no stored session.
    pub async fn new() -> Self {
        Self::with_storage(Arc::new(MemoryStorage::new())).await
    }

    /// Start the fake backend and a console hydrating from `storage`.
    pub async fn with_storage(storage: Arc<MemoryStorage>) -> Self {
        let backend = FakeBackend::seeded();
        let router = Router::new().fallback(handle).with_state(backend.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake backend");
        let addr = listener.local_addr().expect("Failed to read local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Fake backend crashed");
        });

        let mut config = AppConfig::default();
        config.api.base_url = format!("http://{addr}/api");
        config.api.request_timeout_seconds = 5;

        let navigator = Arc::new(RecordingNavigator::default());
        let console = Console::with_storage(config, storage.clone(), navigator.clone())
            .await
            .expect("Failed to build console");

        Self {
            console,
            backend,
            storage,
            navigator,
        }
    }

    /// Start signed in as alice, with the login traffic cleared.
    pub async fn signed_in() -> Self {
        let app = Self::new().await;
        app.console
            .login(&Credentials::new("alice", "correct"))
            .await
            .expect("Login should succeed");
        app.backend.clear_requests();
        app
    }
}

fn reply(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn id_segment(path: &str, collection: &str) -> Option<i64> {
    path.strip_prefix(collection)?.trim_end_matches('/').parse().ok()
}

async fn handle(
    State(backend): State<FakeBackend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().strip_prefix("/api").unwrap_or(uri.path()).to_string();
    let bearer = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string);
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    backend.requests.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path: path.clone(),
        bearer: bearer.clone(),
        body: body.clone(),
    });

    if path == "/login/" && method == Method::POST {
        return if body["username"] == "alice" && body["password"] == "correct" {
            reply(StatusCode::OK, json!({ "access_token": TOKEN }))
        } else {
            reply(StatusCode::UNAUTHORIZED, json!({ "detail": "Invalid credentials" }))
        };
    }

    if bearer.as_deref() != Some(TOKEN) {
        return reply(StatusCode::UNAUTHORIZED, json!({ "detail": "Not authenticated" }));
    }
    if backend.forbid.load(Ordering::SeqCst) {
        return reply(StatusCode::FORBIDDEN, json!({ "detail": "Token revoked" }));
    }

    match (method.clone(), path.as_str()) {
        (Method::GET, "/me/") => profile(&backend).await,
        (Method::GET, "/datacenters/") => reply(StatusCode::OK, Value::Array(backend.datacenters())),
        (Method::POST, "/datacenters/") => {
            let mut datacenters = backend.datacenters.lock().unwrap();
            let next = datacenters.iter().filter_map(|dc| dc["id"].as_i64()).max().unwrap_or(0) + 1;
            let mut created = body;
            created["id"] = json!(next);
            datacenters.push(created.clone());
            reply(StatusCode::CREATED, created)
        }
        (Method::GET, "/clusters/") => reply(
            StatusCode::OK,
            json!([
                { "id": 11, "name": "nyc-a", "datacenter": 1 },
                { "id": 21, "name": "sfo-a", "datacenter": 2 },
            ]),
        ),
        (Method::GET, "/networks/") => reply(
            StatusCode::OK,
            json!([
                { "id": 31, "name": "nyc-prod", "cidr": "10.1.0.0/24", "datacenter": 1 },
                { "id": 41, "name": "sfo-prod", "cidr": "10.2.0.0/24", "datacenter": 2 },
            ]),
        ),
        (Method::POST, "/deployments/") => {
            let mut job = body;
            job["id"] = json!(501);
            job["status"] = json!("pending");
            reply(StatusCode::CREATED, job)
        }
        (Method::GET, "/maintenance/by-datacenter/1/") => {
            let records = backend.maintenance.lock().unwrap().clone();
            reply(StatusCode::OK, Value::Array(records))
        }
        (m, p) if p.starts_with("/datacenters/") => {
            item(&backend.datacenters, m, id_segment(p, "/datacenters/"), body)
        }
        (m, p) if p.starts_with("/maintenance/") => {
            item(&backend.maintenance, m, id_segment(p, "/maintenance/"), body)
        }
        _ => reply(StatusCode::NOT_FOUND, json!({ "detail": "Not found" })),
    }
}

/// `/me/`, honouring the failure switch and the gate.
async fn profile(backend: &FakeBackend) -> Response {
    let gate = backend.me_gate.lock().unwrap().clone();
    if let Some(gate) = gate {
        gate.reached.notify_one();
        gate.release.notified().await;
    }
    let failure = *backend.me_failure.lock().unwrap();
    if let Some(status) = failure {
        return reply(status, json!({ "message": "Profile service unavailable" }));
    }
    reply(
        StatusCode::OK,
        json!({ "user": {
            "id": 1,
            "first_name": "Alice",
            "last_name": "Ng",
            "email": "alice@example.com",
            "role": "admin",
            "status": "active",
        }}),
    )
}

/// PATCH or DELETE one record of `collection`.
fn item(collection: &Mutex<Vec<Value>>, method: Method, id: Option<i64>, body: Value) -> Response {
    let not_found = || reply(StatusCode::NOT_FOUND, json!({ "detail": "Not found" }));
    let Some(id) = id else {
        return not_found();
    };
    let mut records = collection.lock().unwrap();
    let Some(index) = records.iter().position(|r| r["id"] == id) else {
        return not_found();
    };
    match method {
        Method::PATCH => {
            if let (Some(record), Value::Object(patch)) = (records[index].as_object_mut(), body) {
                record.extend(patch);
            }
            reply(StatusCode::OK, records[index].clone())
        }
        Method::DELETE => {
            records.remove(index);
            StatusCode::NO_CONTENT.into_response()
        }
        _ => reply(StatusCode::METHOD_NOT_ALLOWED, Value::Null),
    }
}
