#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, patch};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};

use danci_admin::config::Config;

pub const TOKEN: &str = "test-token";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: &'static str,
    pub path: String,
    pub query: HashMap<String, String>,
    pub body: Option<Value>,
    pub authorization: Option<String>,
    pub accept_language: Option<String>,
}

#[derive(Default)]
pub struct MockState {
    requests: Mutex<Vec<Recorded>>,
    feedback: Mutex<Vec<Value>>,
}

impl MockState {
    fn record(
        &self,
        method: &'static str,
        path: impl Into<String>,
        headers: &HeaderMap,
        query: HashMap<String, String>,
        body: Option<Value>,
    ) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.requests.lock().push(Recorded {
            method,
            path: path.into(),
            query,
            body,
            authorization: header("authorization"),
            accept_language: header("accept-language"),
        });
    }
}

pub struct MockBackend {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockBackend {
    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().clone()
    }

    pub fn requests_for(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    pub fn config(&self) -> Config {
        Config {
            api_base_url: self.base_url.clone(),
            api_token: Some(TOKEN.to_string()),
            changelog_page_size: 5,
            ..Config::default()
        }
    }
}

type Shared = State<Arc<MockState>>;
type Reply = Result<Json<Value>, (StatusCode, Json<Value>)>;

const STAMP: &str = "2024-03-01T12:00:00Z";

fn changelog_items() -> Vec<Value> {
    let tags = ["new_feature", "bug_fix", "announcement"];
    (0..12)
        .map(|i| {
            json!({
                "id": format!("c{i}"),
                "title": format!("Release note {i}"),
                "content": "Details",
                "tag": tags[i % 3],
                "created_at": STAMP,
                "updated_at": STAMP,
            })
        })
        .collect()
}

fn feedback_seed() -> Vec<Value> {
    ["fb-1", "fb-2"]
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "category": "bug",
                "message": "Audio does not play on the lesson screen",
                "status": "new",
                "admin_response": null,
                "created_at": STAMP,
                "updated_at": STAMP,
            })
        })
        .collect()
}

fn page_of(items: Vec<Value>) -> Json<Value> {
    let total = items.len();
    Json(json!({ "items": items, "total": total, "page": 1, "page_size": 20 }))
}

async fn list_changelog(
    State(state): Shared,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.record("GET", "/changelog", &headers, query, None);
    page_of(changelog_items())
}

async fn update_changelog(
    State(state): Shared,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    state.record("PATCH", format!("/changelog/{id}"), &headers, HashMap::new(), Some(body.clone()));

    let Some(mut record) = changelog_items().into_iter().find(|c| c["id"] == id.as_str()) else {
        return Err((StatusCode::NOT_FOUND, Json(json!({ "detail": "Entry not found" }))));
    };
    if let (Some(target), Some(changes)) = (record.as_object_mut(), body.as_object()) {
        for (key, value) in changes {
            target.insert(key.clone(), value.clone());
        }
    }
    Ok(Json(record))
}

async fn list_feedback(
    State(state): Shared,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.record("GET", "/admin/feedback", &headers, query, None);
    page_of(state.feedback.lock().clone())
}

async fn get_feedback(State(state): Shared, Path(id): Path<String>, headers: HeaderMap) -> Reply {
    state.record("GET", format!("/admin/feedback/{id}"), &headers, HashMap::new(), None);
    state
        .feedback
        .lock()
        .iter()
        .find(|f| f["id"] == id.as_str())
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, Json(json!({ "detail": "Feedback not found" }))))
}

async fn update_feedback(
    State(state): Shared,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    state.record("PATCH", format!("/admin/feedback/{id}"), &headers, HashMap::new(), Some(body.clone()));

    let mut feedback = state.feedback.lock();
    let Some(record) = feedback.iter_mut().find(|f| f["id"] == id.as_str()) else {
        return Err((StatusCode::NOT_FOUND, Json(json!({ "detail": "Feedback not found" }))));
    };
    if let (Some(target), Some(changes)) = (record.as_object_mut(), body.as_object()) {
        for (key, value) in changes {
            target.insert(key.clone(), value.clone());
        }
    }
    Ok(Json(record.clone()))
}

async fn list_cards(
    State(state): Shared,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.record("GET", "/admin/cards", &headers, query, None);
    page_of(vec![json!({
        "id": "card-1",
        "word": "книга",
        "part_of_speech": "noun",
        "translation_en": "book",
        "translation_en_plural": "books",
        "translation_ru": "книга",
        "audio_status": "generating",
        "grammar_filled": 5,
        "grammar_total": 9,
        "example_count": 2,
        "examples_with_en": 2,
        "examples_with_ru": 1,
        "examples_with_audio": 2,
    })])
}

async fn list_card_errors(
    State(state): Shared,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.record("GET", "/admin/card-errors", &headers, query, None);
    page_of(Vec::new())
}

async fn update_card_error(
    State(state): Shared,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    state.record("PATCH", format!("/admin/card-errors/{id}"), &headers, HashMap::new(), Some(body));
    Err((
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "detail": [{ "msg": "Report is already closed" }] })),
    ))
}

async fn list_empty(State(state): Shared, headers: HeaderMap) -> Json<Value> {
    state.record("GET", "/admin/*", &headers, HashMap::new(), None);
    page_of(Vec::new())
}

async fn create_news(State(state): Shared, headers: HeaderMap, Json(body): Json<Value>) -> Reply {
    state.record("POST", "/admin/news", &headers, HashMap::new(), Some(body.clone()));
    if body["title"] == "Duplicate" {
        return Err((StatusCode::CONFLICT, Json(json!({ "detail": "A news item with this title exists" }))));
    }
    let mut created = body;
    if let Some(obj) = created.as_object_mut() {
        obj.insert("id".into(), json!("news-1"));
        obj.insert("created_at".into(), json!(STAMP));
        obj.insert("updated_at".into(), json!(STAMP));
    }
    Ok(Json(created))
}

async fn delete_news(State(state): Shared, Path(id): Path<String>, headers: HeaderMap) -> StatusCode {
    state.record("DELETE", format!("/admin/news/{id}"), &headers, HashMap::new(), None);
    StatusCode::NO_CONTENT
}

async fn broken(State(state): Shared, headers: HeaderMap) -> &'static str {
    state.record("GET", "/broken", &headers, HashMap::new(), None);
    "<html>not json</html>"
}

/// Starts the mock admin API on an ephemeral port. The server lives until the
/// test's runtime shuts down.
pub async fn spawn_backend() -> MockBackend {
    let state = Arc::new(MockState::default());
    *state.feedback.lock() = feedback_seed();

    let app = Router::new()
        .route("/api/changelog", get(list_changelog))
        .route("/api/changelog/:id", patch(update_changelog))
        .route("/api/admin/feedback", get(list_feedback))
        .route("/api/admin/feedback/:id", get(get_feedback).patch(update_feedback))
        .route("/api/admin/cards", get(list_cards))
        .route("/api/admin/card-errors", get(list_card_errors))
        .route("/api/admin/card-errors/:id", patch(update_card_error))
        .route("/api/admin/news", get(list_empty).post(create_news))
        .route("/api/admin/news/:id", delete(delete_news))
        .route("/api/admin/announcements", get(list_empty))
        .route("/api/admin/culture-questions", get(list_empty))
        .route("/api/broken", get(broken))
        .with_state(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("mock backend address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock backend crashed");
    });

    MockBackend { base_url: format!("http://{addr}/api"), state }
}
