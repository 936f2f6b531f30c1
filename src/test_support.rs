//! Shared fixtures for unit tests: a stub account server and recorders.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Json;
use axum::Router as AxumRouter;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use serde_json::{Value, json};

use crate::config::PortalConfig;
use crate::net::{HttpGateway, UserApi};
use crate::notify::NoticeLog;
use crate::routing::{LoginRedirect, RouteTable, Router};
use crate::session::{MemorySessionStore, SessionStore};

/// Port that nothing listens on; connections are refused.
pub const DEAD_BASE_URL: &str = "http://127.0.0.1:1";

// =============================================================================
// RECORDERS
// =============================================================================

/// Records each login redirect together with whether a session was still
/// stored at that moment.
pub struct RecordingRedirect {
    session: Rc<dyn SessionStore>,
    pub calls: RefCell<Vec<bool>>,
}

impl RecordingRedirect {
    pub fn new(session: Rc<dyn SessionStore>) -> Self {
        Self { session, calls: RefCell::new(Vec::new()) }
    }
}

impl LoginRedirect for RecordingRedirect {
    fn redirect_to_login(&self) {
        self.calls.borrow_mut().push(self.session.is_present());
    }
}

// =============================================================================
// HARNESS
// =============================================================================

/// Fully wired client: session, notices, router, gateway, and user API.
pub struct Harness {
    pub session: Rc<MemorySessionStore>,
    pub notices: Rc<NoticeLog>,
    pub router: Rc<Router>,
    pub api: UserApi,
}

impl Harness {
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(5))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        let config = PortalConfig { base_url: base_url.to_owned(), timeout, ..PortalConfig::default() };
        let session = Rc::new(MemorySessionStore::new());
        let store: Rc<dyn SessionStore> = session.clone();
        let notices = Rc::new(NoticeLog::new());
        let router = Rc::new(Router::new(RouteTable::default(), store.clone(), config.app_title.clone()));
        let gateway = HttpGateway::new(&config, store, notices.clone(), router.clone()).unwrap();
        Self { session, notices, router, api: UserApi::new(Rc::new(gateway)) }
    }
}

// =============================================================================
// STUB SERVER
// =============================================================================

/// Session header values seen by the stub, per request, in arrival order.
pub type SeenHeaders = Arc<Mutex<Vec<(String, Option<String>)>>>;

#[derive(Clone)]
struct StubState {
    seen: SeenHeaders,
}

fn record(state: &StubState, path: &str, headers: &HeaderMap) {
    let session = headers.get("x-session-id").and_then(|v| v.to_str().ok()).map(ToOwned::to_owned);
    state.seen.lock().unwrap().push((path.to_owned(), session));
}

async fn verification_code(
    State(state): State<StubState>,
    headers: HeaderMap,
    Query(query): Query<std::collections::HashMap<String, String>>,
) -> Json<Value> {
    record(&state, "/api/user/verification-code", &headers);
    match query.get("email").map(String::as_str) {
        Some("bad@example.com") => Json(json!({ "code": 400, "message": "invalid email", "data": null })),
        Some(_) => Json(json!({ "code": 200, "message": "ok", "data": null })),
        None => Json(json!({ "code": 400, "message": "email required", "data": null })),
    }
}

async fn register(State(state): State<StubState>, headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    record(&state, "/api/user/register", &headers);
    if body["email"] == "taken@example.com" {
        return Json(json!({ "code": 400, "message": "email already used" }));
    }
    Json(json!({ "code": 200, "message": "ok", "data": null }))
}

async fn login(State(state): State<StubState>, headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    record(&state, "/api/user/login", &headers);
    if body["password"] != "Secret123" {
        return Json(json!({ "code": 1003, "message": "wrong password", "data": null }));
    }
    let session_id = if body["username"] == "nosession" { Value::Null } else { json!("abc123") };
    Json(json!({
        "code": 200,
        "message": "ok",
        "data": {
            "id": 7,
            "username": body["username"],
            "email": "alice@example.com",
            "sex": "F",
            "registerDate": "2024-01-01T00:00:00",
            "lastModifyDate": "2024-01-01T00:00:00",
            "sessionId": session_id
        }
    }))
}

async fn logout(State(state): State<StubState>, headers: HeaderMap) -> Json<Value> {
    record(&state, "/api/user/logout", &headers);
    Json(json!({ "code": 200, "message": "ok", "data": null }))
}

async fn reset_password(State(state): State<StubState>, headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    record(&state, "/api/user/reset-password", &headers);
    if body["verificationCode"] != "123456" {
        return Json(json!({ "code": 1005, "message": "verification code invalid or expired" }));
    }
    Json(json!({ "code": 200, "message": "ok", "data": null }))
}

async fn status(
    State(state): State<StubState>,
    headers: HeaderMap,
    Query(query): Query<std::collections::HashMap<String, String>>,
) -> impl IntoResponse {
    record(&state, "/api/status", &headers);
    let code: u16 = query.get("code").and_then(|c| c.parse().ok()).unwrap_or(200);
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = match query.get("message") {
        Some(message) => json!({ "code": code, "message": message }),
        None => json!({}),
    };
    (status, Json(body))
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_millis(500)).await;
    Json(json!({ "code": 200, "message": "ok", "data": null }))
}

/// Start the stub on an ephemeral port; returns its base URL and the
/// header recorder.
pub async fn spawn_stub() -> (String, SeenHeaders) {
    let seen = SeenHeaders::default();
    let app = AxumRouter::new()
        .route("/api/user/verification-code", get(verification_code))
        .route("/api/user/register", post(register))
        .route("/api/user/login", post(login))
        .route("/api/user/logout", post(logout))
        .route("/api/user/reset-password", post(reset_password))
        .route("/api/status", get(status))
        .route("/api/slow", get(slow))
        .with_state(StubState { seen: seen.clone() });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), seen)
}

/// Session header recorded for the most recent request to `path`.
pub fn last_session_for(seen: &SeenHeaders, path: &str) -> Option<Option<String>> {
    seen.lock().unwrap().iter().rev().find(|(p, _)| p == path).map(|(_, s)| s.clone())
}
