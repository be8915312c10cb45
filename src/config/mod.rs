//! Environment-backed configuration.
//!
//! Server settings use `SOURCEHOUND_*` variables; vendor credentials use the
//! names their vendors document. Everything is read once by [`Config::from_env`]
//! at process start and handed to the pipeline by reference.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::time::Duration;

use crate::constants::{DEFAULT_AUTH_MAX_AGE_SECS, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_MODEL};

/// Default encyclopedia search endpoint for the baseline provider.
pub const DEFAULT_WIKIPEDIA_API: &str = "https://ru.wikipedia.org/w/api.php";

/// Service configuration loaded from environment variables.
///
/// Credentials are `None` when unset or blank. Which ones are present decides
/// the backend endpoint and the secondary search provider.
#[derive(Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Timeout applied to every outbound HTTP call. Default: 20s.
    pub http_timeout: Duration,

    /// Chat-completion model name. Default: `gpt-4o-mini`.
    pub model: String,

    /// Baseline encyclopedia API endpoint.
    pub wikipedia_api_url: String,

    /// Freshness window for signed session tokens. Default: 24h.
    pub auth_max_age: Duration,

    /// Primary language-backend credential.
    pub openai_api_key: Option<String>,

    /// Alternate language-backend credential (takes precedence).
    pub openrouter_api_key: Option<String>,

    /// Base-URL override for the language backend.
    pub openai_base_url: Option<String>,

    /// `HTTP-Referer` attribution value sent to the alternate backend.
    pub openrouter_referer: Option<String>,

    /// Secondary provider A credential.
    pub search1api_key: Option<String>,

    /// Secondary provider B credential (requires `google_engine_id`).
    pub google_api_key: Option<String>,

    /// Secondary provider B companion identifier.
    pub google_engine_id: Option<String>,

    /// Secondary provider C credential.
    pub brave_api_key: Option<String>,

    /// Chat transport credential; also keys the signed-session check.
    pub telegram_bot_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            model: DEFAULT_MODEL.to_string(),
            wikipedia_api_url: DEFAULT_WIKIPEDIA_API.to_string(),
            auth_max_age: Duration::from_secs(DEFAULT_AUTH_MAX_AGE_SECS),
            openai_api_key: None,
            openrouter_api_key: None,
            openai_base_url: None,
            openrouter_referer: None,
            search1api_key: None,
            google_api_key: None,
            google_engine_id: None,
            brave_api_key: None,
            telegram_bot_token: None,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn redact(value: &Option<String>) -> &'static str {
            if value.is_some() { "<set>" } else { "<unset>" }
        }

        f.debug_struct("Config")
            .field("port", &self.port)
            .field("bind_addr", &self.bind_addr)
            .field("http_timeout", &self.http_timeout)
            .field("model", &self.model)
            .field("wikipedia_api_url", &self.wikipedia_api_url)
            .field("auth_max_age", &self.auth_max_age)
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("openrouter_api_key", &redact(&self.openrouter_api_key))
            .field("openai_base_url", &self.openai_base_url)
            .field("openrouter_referer", &self.openrouter_referer)
            .field("search1api_key", &redact(&self.search1api_key))
            .field("google_api_key", &redact(&self.google_api_key))
            .field("google_engine_id", &redact(&self.google_engine_id))
            .field("brave_api_key", &redact(&self.brave_api_key))
            .field("telegram_bot_token", &redact(&self.telegram_bot_token))
            .finish()
    }
}

impl Config {
    const ENV_PORT: &'static str = "SOURCEHOUND_PORT";
    const ENV_BIND_ADDR: &'static str = "SOURCEHOUND_BIND_ADDR";
    const ENV_HTTP_TIMEOUT_SECS: &'static str = "SOURCEHOUND_HTTP_TIMEOUT_SECS";
    const ENV_MODEL: &'static str = "SOURCEHOUND_MODEL";
    const ENV_WIKIPEDIA_API: &'static str = "SOURCEHOUND_WIKIPEDIA_API";
    const ENV_AUTH_MAX_AGE_SECS: &'static str = "SOURCEHOUND_AUTH_MAX_AGE_SECS";
    const ENV_OPENAI_API_KEY: &'static str = "OPENAI_API_KEY";
    const ENV_OPENROUTER_API_KEY: &'static str = "OPENROUTER_API_KEY";
    const ENV_OPENAI_BASE_URL: &'static str = "OPENAI_BASE_URL";
    const ENV_OPENROUTER_REFERER: &'static str = "OPENROUTER_HTTP_REFERER";
    const ENV_SEARCH1API_KEY: &'static str = "SEARCH1API_KEY";
    const ENV_GOOGLE_API_KEY: &'static str = "GOOGLE_SEARCH_API_KEY";
    const ENV_GOOGLE_ENGINE_ID: &'static str = "GOOGLE_SEARCH_ENGINE_ID";
    const ENV_BRAVE_API_KEY: &'static str = "BRAVE_API_KEY";
    const ENV_TELEGRAM_BOT_TOKEN: &'static str = "TELEGRAM_BOT_TOKEN";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let http_timeout = Self::parse_secs_from_env(Self::ENV_HTTP_TIMEOUT_SECS)?
            .unwrap_or(defaults.http_timeout);
        let model = Self::parse_optional_from_env(Self::ENV_MODEL).unwrap_or(defaults.model);
        let wikipedia_api_url = Self::parse_optional_from_env(Self::ENV_WIKIPEDIA_API)
            .unwrap_or(defaults.wikipedia_api_url);
        let auth_max_age = Self::parse_secs_from_env(Self::ENV_AUTH_MAX_AGE_SECS)?
            .unwrap_or(defaults.auth_max_age);

        Ok(Self {
            port,
            bind_addr,
            http_timeout,
            model,
            wikipedia_api_url,
            auth_max_age,
            openai_api_key: Self::parse_optional_from_env(Self::ENV_OPENAI_API_KEY),
            openrouter_api_key: Self::parse_optional_from_env(Self::ENV_OPENROUTER_API_KEY),
            openai_base_url: Self::parse_optional_from_env(Self::ENV_OPENAI_BASE_URL),
            openrouter_referer: Self::parse_optional_from_env(Self::ENV_OPENROUTER_REFERER),
            search1api_key: Self::parse_optional_from_env(Self::ENV_SEARCH1API_KEY),
            google_api_key: Self::parse_optional_from_env(Self::ENV_GOOGLE_API_KEY),
            google_engine_id: Self::parse_optional_from_env(Self::ENV_GOOGLE_ENGINE_ID),
            brave_api_key: Self::parse_optional_from_env(Self::ENV_BRAVE_API_KEY),
            telegram_bot_token: Self::parse_optional_from_env(Self::ENV_TELEGRAM_BOT_TOKEN),
        })
    }

    /// Validates URLs and timeouts. Missing credentials are not errors: they
    /// only narrow which providers and endpoints are available.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout {
                name: Self::ENV_HTTP_TIMEOUT_SECS,
            });
        }

        url::Url::parse(&self.wikipedia_api_url).map_err(|e| ConfigError::InvalidUrl {
            name: Self::ENV_WIKIPEDIA_API,
            value: self.wikipedia_api_url.clone(),
            source: e,
        })?;

        if let Some(ref base) = self.openai_base_url {
            url::Url::parse(base).map_err(|e| ConfigError::InvalidUrl {
                name: Self::ENV_OPENAI_BASE_URL,
                value: base.clone(),
                source: e,
            })?;
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Returns `true` if any language-backend credential is present.
    pub fn has_backend_credential(&self) -> bool {
        self.openrouter_api_key.is_some() || self.openai_api_key.is_some()
    }

    /// Returns `true` when only one half of the search-engine key/id pair is set.
    pub fn has_partial_google_credentials(&self) -> bool {
        self.google_api_key.is_some() != self.google_engine_id.is_some()
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_secs_from_env(var_name: &'static str) -> Result<Option<Duration>, ConfigError> {
        match Self::parse_optional_from_env(var_name) {
            Some(value) => value
                .parse::<u64>()
                .map(|secs| Some(Duration::from_secs(secs)))
                .map_err(|e| ConfigError::InvalidNumber {
                    name: var_name,
                    value,
                    source: e,
                }),
            None => Ok(None),
        }
    }

    fn parse_optional_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}
