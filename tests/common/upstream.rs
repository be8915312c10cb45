//! One local server impersonating every remote API the service talks to.
//!
//! Each route answers from an [`UpstreamScript`] fixed at spawn time (chat
//! replies are consumed in order) and records what it received.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Canned behavior for each upstream.
#[derive(Debug, Clone)]
pub struct UpstreamScript {
    /// Titles returned by the encyclopedia search.
    pub wiki_titles: Vec<String>,
    pub search1api_status: u16,
    pub search1api_body: Value,
    /// Sub-queries containing this text fail with 500.
    pub google_fail_on: Option<String>,
    pub brave_status: u16,
    pub brave_body: Value,
    /// Replies for successive chat-completion calls.
    pub chat_replies: Vec<String>,
    /// Message text on the post embed page; `None` answers 404.
    pub embed_text: Option<String>,
}

impl Default for UpstreamScript {
    fn default() -> Self {
        Self {
            wiki_titles: vec!["Golden Gate Bridge".to_string()],
            search1api_status: 200,
            search1api_body: json!({"results": []}),
            google_fail_on: None,
            brave_status: 200,
            brave_body: json!({"web": {"results": []}}),
            chat_replies: Vec::new(),
            embed_text: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Recorded {
    pub route: &'static str,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Value,
}

#[derive(Clone)]
struct Shared {
    script: Arc<UpstreamScript>,
    chat_replies: Arc<Mutex<VecDeque<String>>>,
    recorded: Arc<Mutex<Vec<Recorded>>>,
}

impl Shared {
    fn record(&self, route: &'static str, query: Option<String>, headers: HeaderMap, body: &[u8]) {
        let body = serde_json::from_slice(body).unwrap_or(Value::Null);
        self.recorded.lock().unwrap().push(Recorded {
            route,
            query,
            headers,
            body,
        });
    }
}

pub struct FakeUpstream {
    pub addr: SocketAddr,
    recorded: Arc<Mutex<Vec<Recorded>>>,
    handle: JoinHandle<()>,
}

impl Drop for FakeUpstream {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl FakeUpstream {
    pub async fn spawn(script: UpstreamScript) -> Self {
        let recorded = Arc::new(Mutex::new(Vec::new()));
        let shared = Shared {
            chat_replies: Arc::new(Mutex::new(script.chat_replies.iter().cloned().collect())),
            script: Arc::new(script),
            recorded: recorded.clone(),
        };

        let app = Router::new()
            .route("/w/api.php", get(wikipedia))
            .route("/search", post(search1api))
            .route("/customsearch/v1", get(google))
            .route("/res/v1/web/search", get(brave))
            .route("/v1/chat/completions", post(chat_completions))
            .route("/tg/{bot}/sendMessage", post(send_message))
            .route("/embed/{channel}/{id}", get(embed_page))
            .with_state(shared);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            recorded,
            handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn recorded(&self, route: &str) -> Vec<Recorded> {
        self.recorded
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.route == route)
            .cloned()
            .collect()
    }

    /// Texts delivered through the bot API, in order.
    pub fn sent_texts(&self) -> Vec<String> {
        self.recorded("telegram")
            .into_iter()
            .filter_map(|r| r.body["text"].as_str().map(str::to_string))
            .collect()
    }
}

fn query_param(query: &Option<String>, key: &str) -> Option<String> {
    let query = query.as_deref()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap()
}

async fn wikipedia(
    State(shared): State<Shared>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Json<Value> {
    shared.record("wikipedia", query.clone(), headers, b"");
    let limit: usize = query_param(&query, "srlimit")
        .and_then(|l| l.parse().ok())
        .unwrap_or(10);
    let hits: Vec<Value> = shared
        .script
        .wiki_titles
        .iter()
        .take(limit)
        .map(|t| json!({"title": t, "snippet": format!("<span class=\"searchmatch\">{t}</span> article")}))
        .collect();
    Json(json!({"query": {"search": hits}}))
}

async fn search1api(State(shared): State<Shared>, headers: HeaderMap, body: Bytes) -> Response {
    shared.record("search1api", None, headers, &body);
    (
        status(shared.script.search1api_status),
        Json(shared.script.search1api_body.clone()),
    )
        .into_response()
}

async fn google(
    State(shared): State<Shared>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    shared.record("google", query.clone(), headers, b"");
    let q = query_param(&query, "q").unwrap_or_default();

    if let Some(fail_on) = &shared.script.google_fail_on
        && q.contains(fail_on.as_str())
    {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": {"code": 500, "message": "Backend Error"}})),
        )
            .into_response();
    }

    Json(json!({
        "items": [{
            "title": format!("Result for {q}"),
            "link": format!("https://results.example/{}", q.len()),
            "snippet": "snippet",
            "displayLink": "results.example"
        }]
    }))
    .into_response()
}

async fn brave(
    State(shared): State<Shared>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    shared.record("brave", query, headers, b"");
    (
        status(shared.script.brave_status),
        Json(shared.script.brave_body.clone()),
    )
        .into_response()
}

async fn chat_completions(
    State(shared): State<Shared>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    shared.record("chat", None, headers, &body);
    let Some(content) = shared.chat_replies.lock().unwrap().pop_front() else {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({"error": {"message": "no scripted reply left"}})),
        )
            .into_response();
    };
    Json(json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000u32,
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 1, "completion_tokens": 1, "total_tokens": 2}
    }))
    .into_response()
}

async fn send_message(
    State(shared): State<Shared>,
    Path(_bot): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<Value> {
    shared.record("telegram", None, headers, &body);
    Json(json!({"ok": true, "result": {"message_id": 1}}))
}

async fn embed_page(
    State(shared): State<Shared>,
    Path((channel, id)): Path<(String, String)>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    let post = json!(format!("{channel}/{id}")).to_string();
    shared.record("embed", query, headers, post.as_bytes());
    match &shared.script.embed_text {
        Some(text) => Html(format!(
            "<html><body><div class=\"tgme_widget_message_text js-message_text\">{text}</div></body></html>"
        ))
        .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
