//! In-process stand-in for a Meilisearch server.
//!
//! One wiremock responder dispatches on method and path over shared state. It
//! checks API keys the way the server does, enqueues every mutation as a task,
//! and only applies the mutation once the task has been polled to completion
//! (enqueued -> processing -> succeeded/failed, one step per poll).

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use meilisearch_async::types::WaitOptions;
use meilisearch_async::{Client, MeiliConfig};
use serde_json::{Value, json};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const MASTER_KEY: &str = "masterKey";
pub const PRIVATE_KEY: &str = "private-admin-key";
pub const PUBLIC_KEY: &str = "public-search-key";

/// Value that makes a settings task fail when the server applies it
pub const INVALID_ATTRIBUTE: &str = "__invalid__";

enum Effect {
    CreateIndex(String),
    AddDocuments { index: String, docs: Vec<Value> },
    Setting {
        index: String,
        setting: String,
        value: Value,
    },
    Settings { index: String, patch: Value },
    ResetSettings(String),
}

struct FakeTask {
    uid: u64,
    index_uid: String,
    kind: &'static str,
    polls: u32,
    effect: Effect,
    outcome: Option<Result<(), Value>>,
}

#[derive(Default)]
struct State {
    next_uid: u64,
    stall: bool,
    tasks: BTreeMap<u64, FakeTask>,
    indexes: HashMap<String, Index>,
}

#[derive(Default)]
struct Index {
    settings: HashMap<String, Value>,
    documents: Vec<Value>,
}

pub struct FakeMeili {
    pub server: MockServer,
    prefix: String,
    state: Arc<Mutex<State>>,
}

impl FakeMeili {
    pub async fn start() -> Self {
        Self::start_with_prefix("").await
    }

    /// Serves the API below `prefix`, like a gateway mounting it at `/api`.
    pub async fn start_with_prefix(prefix: &str) -> Self {
        let server = MockServer::start().await;
        let state = Arc::new(Mutex::new(State::default()));

        let handler_state = Arc::clone(&state);
        let handler_prefix = prefix.to_string();
        Mock::given(any())
            .respond_with(move |req: &Request| handle(&handler_state, &handler_prefix, req))
            .mount(&server)
            .await;

        Self {
            server,
            prefix: prefix.to_string(),
            state,
        }
    }

    pub fn host(&self) -> String {
        format!("{}{}", self.server.uri(), self.prefix)
    }

    pub fn client(&self, key: Option<&str>) -> Client<MeiliConfig> {
        client_for(&self.host(), key)
    }

    /// Keeps every task in `processing` from now on.
    pub fn stall_tasks(&self) {
        self.state.lock().unwrap().stall = true;
    }

    pub fn polls(&self, task_uid: u64) -> u32 {
        self.state
            .lock()
            .unwrap()
            .tasks
            .get(&task_uid)
            .map_or(0, |t| t.polls)
    }

    /// Creates `movies_test` with a couple of documents, the way fixtures seed it.
    pub async fn seed_movies(&self) {
        let client = self.client(Some(MASTER_KEY));
        let task = client
            .index("movies_test")
            .documents()
            .add_or_replace(&dataset(), None)
            .await
            .unwrap();
        let done = client.wait_for_task(task.uid).await.unwrap();
        assert!(done.is_success());
    }
}

pub fn client_for(host: &str, key: Option<&str>) -> Client<MeiliConfig> {
    let cfg = MeiliConfig::new().with_host(host);
    let cfg = match key {
        Some(k) => cfg.with_api_key(k),
        None => cfg.without_api_key(),
    };
    Client::with_config(cfg).with_wait_options(
        WaitOptions::new()
            .with_interval(Duration::from_millis(5))
            .with_timeout(Duration::from_secs(2)),
    )
}

pub fn dataset() -> Vec<Value> {
    vec![
        json!({"id": 123, "title": "Pride and Prejudice", "genre": "romance"}),
        json!({"id": 456, "title": "Le Petit Prince", "genre": "adventure"}),
        json!({"id": 1, "title": "Alice In Wonderland", "genre": "fantasy"}),
        json!({"id": 2, "title": "Le Rouge et le Noir", "genre": "romance"}),
    ]
}

const SETTING_PATHS: [&str; 8] = [
    "distinct-attribute",
    "filterable-attributes",
    "sortable-attributes",
    "searchable-attributes",
    "displayed-attributes",
    "ranking-rules",
    "stop-words",
    "synonyms",
];

fn setting_default(setting: &str) -> Value {
    match setting {
        "distinct-attribute" => Value::Null,
        "synonyms" => json!({}),
        "searchable-attributes" | "displayed-attributes" => json!(["*"]),
        "ranking-rules" => json!(["words", "typo", "proximity", "attribute", "sort", "exactness"]),
        _ => json!([]),
    }
}

/// `stopWords` -> `stop-words`
fn kebab(camel: &str) -> String {
    let mut out = String::with_capacity(camel.len() + 2);
    for c in camel.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// `stop-words` -> `stopWords`
fn camel(kebab: &str) -> String {
    let mut parts = kebab.split('-');
    let mut out = parts.next().unwrap_or_default().to_string();
    for part in parts {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.extend(chars);
        }
    }
    out
}

fn index_not_found(index: &str) -> ResponseTemplate {
    api_error(
        404,
        "index_not_found",
        "invalid_request",
        &format!("Index `{index}` not found."),
    )
}

fn rejects(value: &Value) -> bool {
    value
        .as_array()
        .is_some_and(|v| v.iter().any(|a| a == INVALID_ATTRIBUTE))
}

fn api_error(status: u16, code: &str, kind: &str, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(error_body(code, kind, message))
}

fn error_body(code: &str, kind: &str, message: &str) -> Value {
    json!({
        "message": message,
        "code": code,
        "type": kind,
        "link": format!("https://docs.meilisearch.com/errors#{code}"),
    })
}

fn authorize(req: &Request) -> Result<(), ResponseTemplate> {
    let Some(value) = req.headers.get("authorization") else {
        return Err(api_error(
            401,
            "missing_authorization_header",
            "auth",
            "The Authorization header is missing. It must use the bearer authorization method.",
        ));
    };
    let value = value.to_str().unwrap_or_default();
    if value == format!("Bearer {MASTER_KEY}") || value == format!("Bearer {PRIVATE_KEY}") {
        return Ok(());
    }
    Err(api_error(
        403,
        "invalid_api_key",
        "auth",
        "The provided API key is invalid.",
    ))
}

fn handle(state: &Mutex<State>, prefix: &str, req: &Request) -> ResponseTemplate {
    let Some(path) = req.url.path().strip_prefix(prefix) else {
        return api_error(404, "not_found", "invalid_request", "Not found");
    };
    if let Err(denied) = authorize(req) {
        return denied;
    }

    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    let body: Value = serde_json::from_slice(&req.body).unwrap_or(Value::Null);
    let mut st = state.lock().unwrap();

    match (req.method.as_str(), segments.as_slice()) {
        ("GET", ["tasks", uid]) => match uid.parse::<u64>() {
            Ok(uid) => poll_task(&mut st, uid),
            Err(_) => api_error(400, "invalid_task_uid", "invalid_request", "bad uid"),
        },
        ("POST", ["indexes"]) => {
            let uid = body["uid"].as_str().unwrap_or_default().to_string();
            enqueue(&mut st, &uid, "indexCreation", Effect::CreateIndex(uid.clone()))
        }
        ("POST" | "PUT", ["indexes", index, "documents"]) => {
            let docs = body.as_array().cloned().unwrap_or_default();
            enqueue(
                &mut st,
                index,
                "documentAdditionOrUpdate",
                Effect::AddDocuments {
                    index: (*index).to_string(),
                    docs,
                },
            )
        }
        ("GET", ["indexes", index, "settings"]) => match st.indexes.get(*index) {
            Some(idx) => {
                let all: serde_json::Map<String, Value> = SETTING_PATHS
                    .iter()
                    .map(|path| {
                        let value = idx
                            .settings
                            .get(*path)
                            .cloned()
                            .unwrap_or_else(|| setting_default(path));
                        (camel(path), value)
                    })
                    .collect();
                ResponseTemplate::new(200).set_body_json(Value::Object(all))
            }
            None => index_not_found(index),
        },
        ("PATCH", ["indexes", index, "settings"]) => enqueue(
            &mut st,
            index,
            "settingsUpdate",
            Effect::Settings {
                index: (*index).to_string(),
                patch: body,
            },
        ),
        ("DELETE", ["indexes", index, "settings"]) => enqueue(
            &mut st,
            index,
            "settingsUpdate",
            Effect::ResetSettings((*index).to_string()),
        ),
        ("GET", ["indexes", index, "settings", setting]) => match st.indexes.get(*index) {
            Some(idx) => ResponseTemplate::new(200).set_body_json(
                idx.settings
                    .get(*setting)
                    .cloned()
                    .unwrap_or_else(|| setting_default(setting)),
            ),
            None => index_not_found(index),
        },
        ("POST", ["indexes", index, "settings", setting]) => enqueue(
            &mut st,
            index,
            "settingsUpdate",
            Effect::Setting {
                index: (*index).to_string(),
                setting: (*setting).to_string(),
                value: body,
            },
        ),
        ("DELETE", ["indexes", index, "settings", setting]) => enqueue(
            &mut st,
            index,
            "settingsUpdate",
            Effect::Setting {
                index: (*index).to_string(),
                setting: (*setting).to_string(),
                value: Value::Null,
            },
        ),
        _ => api_error(404, "not_found", "invalid_request", "Not found"),
    }
}

fn enqueue(st: &mut State, index: &str, kind: &'static str, effect: Effect) -> ResponseTemplate {
    let uid = st.next_uid;
    st.next_uid += 1;
    st.tasks.insert(
        uid,
        FakeTask {
            uid,
            index_uid: index.to_string(),
            kind,
            polls: 0,
            effect,
            outcome: None,
        },
    );
    ResponseTemplate::new(202).set_body_json(json!({
        "taskUid": uid,
        "indexUid": index,
        "status": "enqueued",
        "type": kind,
        "enqueuedAt": "2024-01-01T00:00:00Z",
    }))
}

fn poll_task(st: &mut State, uid: u64) -> ResponseTemplate {
    let stall = st.stall;
    let Some(task) = st.tasks.get_mut(&uid) else {
        return api_error(
            404,
            "task_not_found",
            "invalid_request",
            &format!("Task `{uid}` not found."),
        );
    };
    task.polls += 1;
    let polls = task.polls;
    let terminal = !stall && polls >= 3;

    if terminal && task.outcome.is_none() {
        let outcome = apply(&mut st.indexes, &st.tasks[&uid].effect);
        if let Some(task) = st.tasks.get_mut(&uid) {
            task.outcome = Some(outcome);
        }
    }

    let task = &st.tasks[&uid];
    let mut out = json!({
        "uid": task.uid,
        "indexUid": task.index_uid,
        "type": task.kind,
        "enqueuedAt": "2024-01-01T00:00:00Z",
    });
    match &task.outcome {
        Some(Ok(())) if terminal => out["status"] = json!("succeeded"),
        Some(Err(e)) if terminal => {
            out["status"] = json!("failed");
            out["error"] = e.clone();
        }
        _ if polls == 1 => out["status"] = json!("enqueued"),
        _ => out["status"] = json!("processing"),
    }
    ResponseTemplate::new(200).set_body_json(out)
}

fn apply(indexes: &mut HashMap<String, Index>, effect: &Effect) -> Result<(), Value> {
    match effect {
        Effect::CreateIndex(uid) => {
            if indexes.contains_key(uid) {
                return Err(error_body(
                    "index_already_exists",
                    "invalid_request",
                    &format!("Index `{uid}` already exists."),
                ));
            }
            indexes.insert(uid.clone(), Index::default());
            Ok(())
        }
        Effect::AddDocuments { index, docs } => {
            indexes
                .entry(index.clone())
                .or_default()
                .documents
                .extend(docs.iter().cloned());
            Ok(())
        }
        Effect::Setting {
            index,
            setting,
            value,
        } => {
            let Some(idx) = indexes.get_mut(index) else {
                return Err(error_body(
                    "index_not_found",
                    "invalid_request",
                    &format!("Index `{index}` not found."),
                ));
            };
            if rejects(value) {
                return Err(error_body(
                    "invalid_settings",
                    "invalid_request",
                    "Invalid attribute in settings.",
                ));
            }
            if value.is_null() {
                idx.settings.remove(setting);
            } else {
                idx.settings.insert(setting.clone(), value.clone());
            }
            Ok(())
        }
        Effect::Settings { index, patch } => {
            let Some(idx) = indexes.get_mut(index) else {
                return Err(error_body(
                    "index_not_found",
                    "invalid_request",
                    &format!("Index `{index}` not found."),
                ));
            };
            let fields = patch.as_object().cloned().unwrap_or_default();
            if fields.values().any(rejects) {
                return Err(error_body(
                    "invalid_settings",
                    "invalid_request",
                    "Invalid attribute in settings.",
                ));
            }
            for (name, value) in fields {
                let path = kebab(&name);
                if value.is_null() {
                    idx.settings.remove(&path);
                } else {
                    idx.settings.insert(path, value);
                }
            }
            Ok(())
        }
        Effect::ResetSettings(index) => {
            let Some(idx) = indexes.get_mut(index) else {
                return Err(error_body(
                    "index_not_found",
                    "invalid_request",
                    &format!("Index `{index}` not found."),
                ));
            };
            idx.settings.clear();
            Ok(())
        }
    }
}
