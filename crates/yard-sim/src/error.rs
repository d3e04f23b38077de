use thiserror::Error;

use yard_hub::HubError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("platform call failed: {0}")]
    Hub(#[from] HubError),
}

pub type SimResult<T> = Result<T, SimError>;
