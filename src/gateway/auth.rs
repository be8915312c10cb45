//! Signed-session check for mini-app requests.
//!
//! The mini-app forwards its launch parameters (`initData`) verbatim. They
//! are trusted only when their `hash` is the HMAC-SHA256 of the remaining
//! pairs under a key derived from the bot token, and `auth_date` is recent.

use std::time::Duration;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

const SECRET_KEY_SEED: &[u8] = b"WebAppData";

/// How far `auth_date` may lie ahead of the server clock.
pub const MAX_CLOCK_SKEW_SECS: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("initData is missing the hash")]
    MissingHash,

    #[error("initData is missing auth_date")]
    MissingAuthDate,

    #[error("initData auth_date is not a timestamp")]
    InvalidAuthDate,

    #[error("initData expired {age_secs}s ago")]
    Expired { age_secs: i64 },

    #[error("initData auth_date is {ahead_secs}s in the future")]
    FromFuture { ahead_secs: i64 },

    #[error("initData signature mismatch")]
    InvalidSignature,
}

/// Checks `init_data` against `bot_token` using the current time.
pub fn validate_init_data(
    init_data: &str,
    bot_token: &str,
    max_age: Duration,
) -> Result<(), AuthError> {
    validate_init_data_at(init_data, bot_token, max_age, Utc::now())
}

pub fn validate_init_data_at(
    init_data: &str,
    bot_token: &str,
    max_age: Duration,
    now: DateTime<Utc>,
) -> Result<(), AuthError> {
    let mut hash = None;
    let mut pairs: Vec<(String, String)> = Vec::new();
    for (key, value) in url::form_urlencoded::parse(init_data.as_bytes()) {
        if key == "hash" {
            hash = Some(value.into_owned());
        } else {
            pairs.push((key.into_owned(), value.into_owned()));
        }
    }

    let hash = hash.filter(|h| !h.is_empty()).ok_or(AuthError::MissingHash)?;
    let auth_date = pairs
        .iter()
        .find(|(k, _)| k == "auth_date")
        .map(|(_, v)| v.as_str())
        .ok_or(AuthError::MissingAuthDate)?;
    let auth_date: i64 = auth_date.parse().map_err(|_| AuthError::InvalidAuthDate)?;

    let age_secs = now
        .timestamp()
        .checked_sub(auth_date)
        .ok_or(AuthError::InvalidAuthDate)?;
    if age_secs < -MAX_CLOCK_SKEW_SECS {
        return Err(AuthError::FromFuture {
            ahead_secs: age_secs.saturating_neg(),
        });
    }
    if age_secs > i64::try_from(max_age.as_secs()).unwrap_or(i64::MAX) {
        return Err(AuthError::Expired { age_secs });
    }

    let expected = hex::decode(&hash).map_err(|_| AuthError::InvalidSignature)?;
    signature_mac(&pairs, bot_token)
        .verify_slice(&expected)
        .map_err(|_| AuthError::InvalidSignature)
}

/// `key=value` lines sorted by key.
fn data_check_string(pairs: &[(String, String)]) -> String {
    let mut sorted: Vec<&(String, String)> = pairs.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));
    sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn signature_mac(pairs: &[(String, String)], bot_token: &str) -> HmacSha256 {
    let mut secret =
        HmacSha256::new_from_slice(SECRET_KEY_SEED).expect("HMAC accepts keys of any length");
    secret.update(bot_token.as_bytes());
    let secret_key = secret.finalize().into_bytes();

    let mut mac =
        HmacSha256::new_from_slice(&secret_key).expect("HMAC accepts keys of any length");
    mac.update(data_check_string(pairs).as_bytes());
    mac
}

/// Builds a signed `initData` query string. Mirrors what the platform sends.
#[cfg(any(test, feature = "mock"))]
pub fn sign_init_data(pairs: &[(&str, &str)], bot_token: &str) -> String {
    let owned: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let hash = hex::encode(signature_mac(&owned, bot_token).finalize().into_bytes());

    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (k, v) in pairs {
        serializer.append_pair(k, v);
    }
    serializer.append_pair("hash", &hash);
    serializer.finish()
}
