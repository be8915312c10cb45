use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("Telegram API error: {status} {description}")]
    Api { status: u16, description: String },

    #[error("Telegram network error: {0}")]
    Network(String),
}

pub type TransportResult<T> = Result<T, TransportError>;
