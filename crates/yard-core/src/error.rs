//! Base error type.
//!
//! Sub-crates define their own error enums (`HubError`, `RouteError`,
//! `SimError`) and keep them separate; `CoreError` covers only the concerns
//! this crate owns — configuration loading.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
