//! Test server harness.
//!
//! Spawns the real router with every outbound call pointed at a
//! [`FakeUpstream`], so requests cross real HTTP on both sides.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use sourcehound::config::Config;
use sourcehound::gateway::{AppState, create_router_with_state};
use sourcehound::http::build_client;
use sourcehound::llm::{ChatCompletionsBackend, LanguageBackend};
use sourcehound::pipeline::{PostLinkResolver, SourcePipeline, TelegramPostResolver};
use sourcehound::search::{
    BraveSearch, GoogleSearch, Search1ApiSearch, SearchOrchestrator, SearchProvider,
    WikipediaSearch,
};
use sourcehound::telegram::{ChatTransport, TelegramClient};

use super::upstream::{FakeUpstream, UpstreamScript};

pub const BOT_TOKEN: &str = "424242:integration-token";
const CLIENT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Secondary {
    #[default]
    None,
    Search1Api,
    Google,
    Brave,
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub upstream: FakeUpstream,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Wires the search chain the same way `SearchOrchestrator::from_config`
/// does, but against the fake upstream.
pub fn orchestrator_for(
    upstream: &FakeUpstream,
    secondary: Secondary,
    client: reqwest::Client,
) -> SearchOrchestrator {
    let baseline = WikipediaSearch::new(client.clone(), &upstream.url("/w/api.php"))
        .expect("valid wikipedia url");
    let secondary: Option<Arc<dyn SearchProvider>> = match secondary {
        Secondary::None => None,
        Secondary::Search1Api => Some(Arc::new(
            Search1ApiSearch::new(client, "s1-key").with_base_url(upstream.url("")),
        )),
        Secondary::Google => Some(Arc::new(
            GoogleSearch::new(client, "g-key", "g-cx")
                .with_base_url(upstream.url("/customsearch/v1")),
        )),
        Secondary::Brave => Some(Arc::new(
            BraveSearch::new(client, "brave-key").with_base_url(upstream.url("")),
        )),
    };
    SearchOrchestrator::new(Arc::new(baseline), secondary)
}

pub async fn spawn_test_server(script: UpstreamScript, secondary: Secondary) -> TestServer {
    let upstream = FakeUpstream::spawn(script).await;
    let client = build_client(CLIENT_TIMEOUT).expect("client builds");

    let config = Config {
        openai_api_key: Some("sk-integration".to_string()),
        openai_base_url: Some(upstream.url("/v1")),
        telegram_bot_token: Some(BOT_TOKEN.to_string()),
        ..Default::default()
    };

    let backend = ChatCompletionsBackend::from_config(&config, client.clone())
        .map(|b| Arc::new(b) as Arc<dyn LanguageBackend>);
    let resolver: Arc<dyn PostLinkResolver> = Arc::new(TelegramPostResolver::with_base_url(
        client.clone(),
        upstream.url("/embed"),
    ));
    let pipeline = SourcePipeline::new(
        backend,
        orchestrator_for(&upstream, secondary, client.clone()),
        Some(resolver),
    );
    let transport: Arc<dyn ChatTransport> = Arc::new(TelegramClient::with_base_url(
        client,
        BOT_TOKEN,
        upstream.url("/tg"),
    ));

    let state = AppState::new(Arc::new(pipeline), Some(transport), Arc::new(config));
    let app = create_router_with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    TestServer {
        addr,
        upstream,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    }
}
