//! Platform-facing error type.
//!
//! A "not found" trackable lookup is deliberately NOT an error — it is the
//! signal the transiting-product protocol is built on — so `get_trackable`
//! returns `Ok(None)` for it and `HubError` only covers genuine failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HubError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("platform returned status {status} for {path}")]
    Status { status: u16, path: String },

    #[error("malformed platform payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("push channel failure: {0}")]
    Socket(#[from] tokio_tungstenite::tungstenite::Error),
}

pub type HubResult<T> = Result<T, HubError>;
