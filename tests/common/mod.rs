#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
    Json, Router,
};
use mockall::mock;
use recruitment_admin::{
    client::auth::{MemoryTokenStore, TokenStore},
    config::Config,
    error::Result,
    views::{notifier::MemoryNotifier, DialogResult, Prompter},
    AdminApp,
};
use serde_json::{json, Value as JsonValue};
use tokio::net::TcpListener;

mock! {
    pub Prompter {}

    impl Prompter for Prompter {
        fn confirm(&self, message: &str) -> Result<DialogResult<()>>;
        fn prompt(&self, message: &str) -> Result<DialogResult<String>>;
    }
}

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl Recorded {
    pub fn json(&self) -> JsonValue {
        serde_json::from_slice(&self.body).unwrap_or(JsonValue::Null)
    }
}

#[derive(Default)]
struct Shared {
    routes: Mutex<HashMap<(Method, String), VecDeque<(StatusCode, JsonValue)>>>,
    requests: Mutex<Vec<Recorded>>,
}

/// HTTP stand-in for the recruitment API. Answers are queued per
/// method + path; the last queued answer keeps being served.
#[derive(Clone)]
pub struct MockBackend {
    shared: Arc<Shared>,
    pub base_url: String,
}

impl MockBackend {
    pub async fn start() -> Self {
        let shared = Arc::new(Shared::default());
        let router = Router::new().fallback(handle).with_state(shared.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve");
        });
        Self {
            shared,
            base_url: format!("http://{}/api", addr),
        }
    }

    pub fn on(&self, method: Method, path: &str, status: StatusCode, body: JsonValue) -> &Self {
        self.shared
            .routes
            .lock()
            .unwrap()
            .entry((method, format!("/api/{}", path.trim_start_matches('/'))))
            .or_default()
            .push_back((status, body));
        self
    }

    pub fn ok(&self, method: Method, path: &str, data: JsonValue) -> &Self {
        self.on(method, path, StatusCode::OK, json!({"success": true, "data": data}))
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.shared.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<Recorded> {
        let full = format!("/api/{}", path.trim_start_matches('/'));
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == full)
            .collect()
    }

    pub fn config(&self) -> Config {
        Config::for_base_url(&self.base_url).expect("config")
    }

    pub fn app_with(
        &self,
        token: Option<&str>,
        prompter: impl Prompter + 'static,
    ) -> (AdminApp, Arc<MemoryNotifier>, Arc<MemoryTokenStore>) {
        let tokens = Arc::new(MemoryTokenStore::new(token.map(str::to_string)));
        let notifier = Arc::new(MemoryNotifier::new());
        let store: Arc<dyn TokenStore> = tokens.clone();
        let app = AdminApp::new(&self.config(), store, notifier.clone(), Arc::new(prompter))
            .expect("app");
        (app, notifier, tokens)
    }

    pub fn app(&self) -> (AdminApp, Arc<MemoryNotifier>) {
        let (app, notifier, _) = self.app_with(Some("test-token"), MockPrompter::new());
        (app, notifier)
    }
}

async fn handle(
    State(shared): State<Arc<Shared>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    shared.requests.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: header("authorization"),
        content_type: header("content-type"),
        body,
    });

    let mut routes = shared.routes.lock().unwrap();
    match routes.get_mut(&(method, uri.path().to_string())) {
        Some(queue) => {
            let answer = if queue.len() > 1 {
                queue.pop_front().unwrap()
            } else {
                queue.front().cloned().unwrap()
            };
            (answer.0, Json(answer.1))
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"success": false, "message": "Route not found"})),
        ),
    }
}

pub fn position_json(id: &str, title: &str, status: &str) -> JsonValue {
    json!({
        "_id": id,
        "title": title,
        "department": "Engineering",
        "location": "Remote",
        "jobType": "full-time",
        "minimumExperience": 3,
        "relevantExperience": 2,
        "status": status,
        "description": "Build services",
        "requirements": ["Rust"]
    })
}
