//! Full-stack runs: HTTP in, every collaborator reached over HTTP.

mod common;

use chrono::Utc;
use serde_json::{Value, json};

use common::harness::{BOT_TOKEN, Secondary, spawn_test_server};
use common::upstream::UpstreamScript;
use sourcehound::gateway::auth::sign_init_data;

const CLAIM: &str = "The Golden Gate Bridge opened to traffic in 1937";
const QUERY_REPLY: &str = r#"{"query":"Golden Gate Bridge opening 1937"}"#;

fn init_data() -> String {
    let now = Utc::now().timestamp().to_string();
    sign_init_data(&[("auth_date", now.as_str()), ("query_id", "AAQ")], BOT_TOKEN)
}

fn analysis_reply(scores: &[u8]) -> String {
    let sources: Vec<Value> = scores
        .iter()
        .map(|s| json!({"relevanceScore": s, "confidenceLevel": "medium", "explanation": "related", "matches": ["1937"]}))
        .collect();
    json!({"sources": sources, "summary": "The opening date is confirmed."}).to_string()
}

fn update(text: &str) -> Value {
    json!({
        "update_id": 1,
        "message": {"message_id": 7, "chat": {"id": 555, "type": "private"}, "date": 0, "text": text}
    })
}

fn wiki_titles(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("Wiki article {i}")).collect()
}

#[tokio::test]
async fn test_find_sources_end_to_end_with_truncation() {
    let server = spawn_test_server(
        UpstreamScript {
            wiki_titles: wiki_titles(3),
            brave_body: json!({"web": {"results": [
                {"title": "Brave 1", "url": "https://b.example/1", "description": "d1"},
                {"title": "Brave 2", "url": "https://b.example/2", "description": "d2"},
                {"title": "Brave 3", "url": "https://b.example/3", "description": "d3"}
            ]}}),
            chat_replies: vec![QUERY_REPLY.to_string(), analysis_reply(&[20, 95, 60, 95, 10, 99])],
            ..Default::default()
        },
        Secondary::Brave,
    )
    .await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/find-sources", server.url()))
        .json(&json!({"text": CLAIM, "initData": init_data()}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();

    // Six candidates found, five analyzed; the invented sixth verdict is dropped.
    let sources = body["sources"].as_array().unwrap();
    assert_eq!(sources.len(), 5);
    let titles: Vec<&str> = sources
        .iter()
        .map(|s| s["sourceTitle"].as_str().unwrap())
        .collect();
    assert_eq!(
        titles,
        vec!["Wiki article 2", "Brave 1", "Wiki article 3", "Wiki article 1", "Brave 2"]
    );
    assert_eq!(body["summary"], "The opening date is confirmed.");

    let chat = server.upstream.recorded("chat");
    assert_eq!(chat.len(), 2);
    assert_eq!(chat[0].headers["authorization"], "Bearer sk-integration");
    assert_eq!(chat[1].body["response_format"]["type"], "json_object");
    let analysis_prompt = chat[1].body["messages"][1]["content"].as_str().unwrap();
    assert!(analysis_prompt.contains("Brave 2"));
    assert!(!analysis_prompt.contains("Brave 3"));

    let searched = server.upstream.recorded("brave");
    assert_eq!(searched.len(), 1);
    assert!(
        searched[0]
            .query
            .as_deref()
            .unwrap()
            .contains("Golden+Gate+Bridge+opening+1937")
    );
    assert!(server.upstream.sent_texts().is_empty());
}

#[tokio::test]
async fn test_find_sources_without_results_is_400() {
    let server = spawn_test_server(
        UpstreamScript {
            wiki_titles: Vec::new(),
            chat_replies: vec![QUERY_REPLY.to_string()],
            ..Default::default()
        },
        Secondary::None,
    )
    .await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/find-sources", server.url()))
        .json(&json!({"text": CLAIM, "initData": init_data()}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("No sources found"));
    assert_eq!(server.upstream.recorded("chat").len(), 1);
}

#[tokio::test]
async fn test_find_sources_rejects_unsigned_request() {
    let server = spawn_test_server(UpstreamScript::default(), Secondary::None).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/find-sources", server.url()))
        .json(&json!({"text": CLAIM, "initData": "auth_date=1&hash=deadbeef"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
    assert!(server.upstream.recorded("chat").is_empty());
    assert!(server.upstream.recorded("wikipedia").is_empty());
}

#[tokio::test]
async fn test_webhook_resolves_post_link_and_replies() {
    let post_text = "Golden Gate Bridge opened on May 27, 1937 to pedestrians";
    let server = spawn_test_server(
        UpstreamScript {
            wiki_titles: wiki_titles(1),
            search1api_body: json!({"results": [
                {"title": "Aggregated", "link": "https://agg.example/x", "snippet": "x"}
            ]}),
            chat_replies: vec![QUERY_REPLY.to_string(), analysis_reply(&[40, 80])],
            embed_text: Some(post_text.to_string()),
            ..Default::default()
        },
        Secondary::Search1Api,
    )
    .await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/telegram", server.url()))
        .json(&update("check https://t.me/history/42"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.json::<Value>().await.unwrap(), json!({"ok": true}));

    let chat = server.upstream.recorded("chat");
    let query_prompt = chat[0].body["messages"][1]["content"].as_str().unwrap();
    assert!(query_prompt.contains(post_text));

    let texts = server.upstream.sent_texts();
    assert_eq!(texts.len(), 5);
    assert!(texts[1].contains("Wikipedia"));
    assert!(texts[2].contains("Search1API"));
    let reply = texts.last().unwrap();
    assert!(reply.contains("1. ⚠️ Aggregated"));
    assert!(reply.contains("🟢 Relevance: 80%"));
    assert!(reply.contains("2. ⚠️ Wiki article 1"));
    assert!(reply.contains("The opening date is confirmed."));

    let delivered = server.upstream.recorded("telegram");
    assert!(delivered.iter().all(|r| r.body["chat_id"] == 555));
}

#[tokio::test]
async fn test_webhook_reports_provider_failure_with_hint() {
    let server = spawn_test_server(
        UpstreamScript {
            search1api_status: 402,
            search1api_body: json!({"message": "payment required"}),
            chat_replies: vec![QUERY_REPLY.to_string()],
            ..Default::default()
        },
        Secondary::Search1Api,
    )
    .await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/telegram", server.url()))
        .json(&update(CLAIM))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let reply = server.upstream.sent_texts().last().cloned().unwrap();
    assert!(reply.starts_with("❌"));
    assert!(reply.contains("SEARCH1API_KEY"));
    assert_eq!(server.upstream.recorded("chat").len(), 1);
}

#[tokio::test]
async fn test_webhook_google_partial_failure_still_answers() {
    let server = spawn_test_server(
        UpstreamScript {
            wiki_titles: Vec::new(),
            google_fail_on: Some("site:ria.ru".to_string()),
            chat_replies: vec![QUERY_REPLY.to_string(), analysis_reply(&[70, 50, 30])],
            ..Default::default()
        },
        Secondary::Google,
    )
    .await;

    reqwest::Client::new()
        .post(format!("{}/api/telegram", server.url()))
        .json(&update(CLAIM))
        .send()
        .await
        .unwrap();

    assert_eq!(server.upstream.recorded("google").len(), 4);
    let reply = server.upstream.sent_texts().last().cloned().unwrap();
    assert!(reply.contains("Relevance: 70%"));
    assert!(reply.contains("Relevance: 30%"));
}

#[tokio::test]
async fn test_healthz_over_http() {
    let server = spawn_test_server(UpstreamScript::default(), Secondary::None).await;

    let response = reqwest::get(format!("{}/healthz", server.url()))
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["x-sourcehound-status"], "healthy");
}
