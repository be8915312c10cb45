//! Resolution of chat-platform post links into the post's text.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_EMBED_BASE_URL: &str = "https://t.me";

/// Ends at the numeric post id so trailing punctuation stays out of the link.
static POST_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://t\.me/(?:[cs]/)?[^/\s]+/\d+").expect("static regex is valid")
});

static MESSAGE_TEXT: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".tgme_widget_message_text").expect("static selector is valid")
});

/// First post link embedded in `text`, if any.
pub fn find_post_link(text: &str) -> Option<&str> {
    POST_LINK.find(text).map(|m| m.as_str())
}

/// A public post: `t.me/<channel>/<id>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRef {
    pub channel: String,
    pub message_id: u64,
}

/// Parses a post link. Private `t.me/c/...` links yield `None`; their
/// content is not reachable without membership. Web-preview links
/// (`t.me/s/<channel>/<id>`) name the same public post.
pub fn parse_post_link(link: &str) -> Option<PostRef> {
    let url = Url::parse(link).ok()?;
    if url.host_str() != Some("t.me") {
        return None;
    }
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty()).peekable();
    segments.next_if_eq(&"s");
    let channel = segments.next()?;
    if channel == "c" {
        return None;
    }
    let message_id = segments.next()?.parse().ok()?;
    Some(PostRef {
        channel: channel.to_string(),
        message_id,
    })
}

/// Text of the first message element on an embed page.
pub fn extract_message_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let element = document.select(&MESSAGE_TEXT).next()?;
    let text = element.text().collect::<String>().trim().to_string();
    (!text.is_empty()).then_some(text)
}

/// Turns a post link into the post's text. Failures are soft: `None` means
/// "keep the original input".
#[async_trait]
pub trait PostLinkResolver: Send + Sync {
    async fn resolve(&self, link: &str) -> Option<String>;
}

/// Reads public posts through their embed page.
#[derive(Debug, Clone)]
pub struct TelegramPostResolver {
    client: Client,
    base_url: String,
}

impl TelegramPostResolver {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, DEFAULT_EMBED_BASE_URL)
    }

    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn embed_url(&self, post: &PostRef) -> String {
        format!(
            "{}/{}/{}?embed=1",
            self.base_url, post.channel, post.message_id
        )
    }
}

#[async_trait]
impl PostLinkResolver for TelegramPostResolver {
    #[tracing::instrument(skip(self))]
    async fn resolve(&self, link: &str) -> Option<String> {
        let post = parse_post_link(link)?;

        let response = match self.client.get(self.embed_url(&post)).send().await {
            Ok(r) if r.status().is_success() => r,
            Ok(r) => {
                warn!(status = %r.status(), "Post embed page unavailable");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "Post embed fetch failed");
                return None;
            }
        };

        let html = response.text().await.ok()?;
        let text = extract_message_text(&html);
        debug!(found = text.is_some(), "Post link resolved");
        text
    }
}

#[cfg(any(test, feature = "mock"))]
pub use mock::MockPostResolver;

#[cfg(any(test, feature = "mock"))]
mod mock {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::PostLinkResolver;

    /// Resolver with a fixed answer that records the links it was given.
    #[derive(Debug, Default)]
    pub struct MockPostResolver {
        reply: Option<String>,
        links: Mutex<Vec<String>>,
    }

    impl MockPostResolver {
        pub fn returning(text: impl Into<String>) -> Self {
            Self {
                reply: Some(text.into()),
                links: Mutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self::default()
        }

        pub fn links(&self) -> Vec<String> {
            self.links.lock().map(|l| l.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl PostLinkResolver for MockPostResolver {
        async fn resolve(&self, link: &str) -> Option<String> {
            if let Ok(mut links) = self.links.lock() {
                links.push(link.to_string());
            }
            self.reply.clone()
        }
    }
}
