//! SourceHound HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use sourcehound::config::Config;
use sourcehound::gateway::{AppState, create_router_with_state};
use sourcehound::http::build_client;
use sourcehound::pipeline::SourcePipeline;
use sourcehound::telegram::{ChatTransport, TelegramClient};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!(
        r#"
 ___  ___  _   _ ___  ___ ___ _  _  ___  _   _ _  _ ___
/ __|/ _ \| | | | _ \/ __| __| || |/ _ \| | | | \| |   \
\__ \ (_) | |_| |   / (__| _|| __ | (_) | |_| | .` | |) |
|___/\___/ \___/|_|_\\___|___|_||_|\___/ \___/|_|\_|___/

        FIND. WEIGH. CITE.
                                        AGPL-3.0
"#
    );

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        config = ?config,
        "SourceHound starting"
    );

    if !config.has_backend_credential() {
        tracing::warn!("No AI credential configured, every run will fail until one is set");
    }
    if config.has_partial_google_credentials() {
        tracing::warn!(
            "Only one of GOOGLE_SEARCH_API_KEY / GOOGLE_SEARCH_ENGINE_ID is set, Google Search stays disabled"
        );
    }

    let client = build_client(config.http_timeout)?;
    let pipeline = Arc::new(SourcePipeline::from_config(&config, client.clone())?);

    let transport = config
        .telegram_bot_token
        .as_ref()
        .map(|token| Arc::new(TelegramClient::new(client, token)) as Arc<dyn ChatTransport>);
    if transport.is_none() {
        tracing::warn!("No TELEGRAM_BOT_TOKEN configured, webhook and mini-app endpoint are disabled");
    }

    let state = AppState::new(pipeline, transport, Arc::new(config));
    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("SourceHound shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
