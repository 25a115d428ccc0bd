use reqwest::StatusCode;
use safegate_primitives::ResolveError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("chain {0} has no transaction service")]
    UnsupportedChain(u64),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("transaction service returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl From<ServiceError> for ResolveError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::UnsupportedChain(chain_id) => ResolveError::UnsupportedChain(chain_id),
            ServiceError::NotFound(_) => ResolveError::NotFound,
            other => ResolveError::Upstream(other.to_string()),
        }
    }
}
