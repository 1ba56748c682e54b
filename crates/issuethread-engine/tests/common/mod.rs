#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use issuethread_client::{TokenExchange, Transport};
use issuethread_engine::{CommentThread, MemoryNavigation, Notifier, ThreadBuilder};
use issuethread_persist::{IdentityCache, MemoryIdentityCache, ACCESS_TOKEN_KEY, USER_KEY};
use issuethread_types::{Result, ThreadError, ThreadOptions};
use serde_json::{json, Value};
use tokio::sync::Notify;

#[derive(Debug, Clone)]
pub struct Call {
    pub method: &'static str,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Call {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Holds one request until the test releases it
#[derive(Default)]
pub struct Gate {
    pub arrived: Notify,
    pub release: Notify,
}

/// Scripted tracker.
///
/// Responses are keyed by `"METHOD path?query"`, falling back to `"METHOD path"`.
/// One-shot responses queued with `push` win over stubs registered with `stub`.
#[derive(Default)]
pub struct FakeTransport {
    stubs: Mutex<HashMap<String, Result<Value>>>,
    queued: Mutex<HashMap<String, VecDeque<Result<Value>>>>,
    gates: Mutex<HashMap<String, Arc<Gate>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn stub(&self, key: &str, response: Result<Value>) {
        self.stubs.lock().unwrap().insert(key.to_string(), response);
    }

    pub fn push(&self, key: &str, response: Result<Value>) {
        self.queued
            .lock()
            .unwrap()
            .entry(key.to_string())
            .or_default()
            .push_back(response);
    }

    /// Gate the next request matching `key`
    pub fn gate(&self, key: &str) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        self.gates
            .lock()
            .unwrap()
            .insert(key.to_string(), Arc::clone(&gate));
        gate
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, method: &str, path: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.method == method && c.path == path)
            .collect()
    }

    async fn respond(
        &self,
        method: &'static str,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<Value> {
        let base = format!("{} {}", method, path);
        let full = if query.is_empty() {
            base.clone()
        } else {
            let encoded: Vec<String> = query.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            format!("{}?{}", base, encoded.join("&"))
        };

        self.calls.lock().unwrap().push(Call {
            method,
            path: path.to_string(),
            query,
            body,
        });

        let gate = {
            let mut gates = self.gates.lock().unwrap();
            gates.remove(&full).or_else(|| gates.remove(&base))
        };
        if let Some(gate) = gate {
            gate.arrived.notify_one();
            gate.release.notified().await;
        }

        for key in [&full, &base] {
            if let Some(response) = self
                .queued
                .lock()
                .unwrap()
                .get_mut(key)
                .and_then(|q| q.pop_front())
            {
                return response;
            }
            if let Some(response) = self.stubs.lock().unwrap().get(key) {
                return response.clone();
            }
        }
        Err(ThreadError::http_status(404, format!("no stub for {}", full)))
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let query = query
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        self.respond("GET", path, query, None).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value> {
        self.respond("POST", path, Vec::new(), Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<Value> {
        self.respond("DELETE", path, Vec::new(), None).await
    }
}

pub struct FakeExchange {
    result: Result<String>,
    pub codes: Mutex<Vec<String>>,
}

impl FakeExchange {
    pub fn ok(token: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(token.to_string()),
            codes: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Err(ThreadError::Exchange(message.to_string())),
            codes: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl TokenExchange for FakeExchange {
    async fn exchange(&self, code: &str, _client_id: &str, _client_secret: &str) -> Result<String> {
        self.codes.lock().unwrap().push(code.to_string());
        self.result.clone()
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

pub const PAGE_URL: &str = "https://blog.example.com/post-1";
pub const ISSUES: &str = "/repos/a/b/issues";
pub const COMMENTS: &str = "/repos/a/b/issues/7/comments";
pub const REACTIONS: &str = "/repos/a/b/issues/7/reactions";

pub fn issue_json(hearts: u32, comments: u32) -> Value {
    json!({
        "id": 1007,
        "number": 7,
        "title": "Post 1",
        "html_url": "https://github.com/a/b/issues/7",
        "comments_url": COMMENTS,
        "comments": comments,
        "reactions": {
            "url": REACTIONS,
            "total_count": hearts,
            "heart": hearts,
        },
        "labels": [{ "name": "gitment" }, { "name": "post-1" }],
    })
}

pub fn comment_json(id: u64, login: &str) -> Value {
    json!({
        "id": id,
        "user": { "login": login },
        "body": format!("comment {}", id),
        "body_html": format!("<p>comment {}</p>", id),
        "created_at": "2024-03-01T10:00:00Z",
    })
}

pub fn reaction_json(id: u64, login: &str) -> Value {
    json!({
        "id": id,
        "user": { "login": login },
        "content": "heart",
    })
}

pub fn user_json(login: &str) -> Value {
    json!({ "login": login, "avatar_url": format!("https://avatars.example.com/{}", login) })
}

pub fn options() -> ThreadOptions {
    ThreadOptions::new("a", "b").with_id("post-1").with_title("Post 1")
}

pub fn logged_in_cache(login: &str) -> Arc<MemoryIdentityCache> {
    Arc::new(MemoryIdentityCache::with_entries([
        (ACCESS_TOKEN_KEY.to_string(), "token-123".to_string()),
        (
            USER_KEY.to_string(),
            json!({ "login": login, "from_cache": false }).to_string(),
        ),
    ]))
}

pub struct Harness {
    pub thread: Arc<CommentThread>,
    pub transport: Arc<FakeTransport>,
    pub notifier: Arc<RecordingNotifier>,
    pub navigation: Arc<MemoryNavigation>,
}

pub fn harness_with(
    options: ThreadOptions,
    url: &str,
    cache: Arc<dyn IdentityCache>,
    exchange: Arc<dyn TokenExchange>,
) -> Harness {
    let transport = FakeTransport::new();
    let notifier = Arc::new(RecordingNotifier::default());
    let navigation = Arc::new(MemoryNavigation::parse(url).unwrap().with_title("Post 1"));

    let thread = ThreadBuilder::new()
        .options(options)
        .navigation(navigation.clone())
        .identity_cache(cache)
        .transport(transport.clone())
        .exchange(exchange)
        .notifier(notifier.clone())
        .build()
        .unwrap();

    Harness {
        thread,
        transport,
        notifier,
        navigation,
    }
}

pub fn anonymous() -> Harness {
    harness_with(
        options(),
        PAGE_URL,
        Arc::new(MemoryIdentityCache::new()),
        FakeExchange::ok("unused"),
    )
}

pub fn logged_in(login: &str) -> Harness {
    harness_with(
        options(),
        PAGE_URL,
        logged_in_cache(login),
        FakeExchange::ok("unused"),
    )
}
