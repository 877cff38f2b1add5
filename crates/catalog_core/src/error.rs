use shared::error::{ApiError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("sign in to like courses")]
    NotAuthenticated,
    #[error("course query failed: {message}")]
    RemoteFetch { message: String },
    #[error("address parameter '{param}' is not a valid inquiry: {reason}")]
    MalformedAddressState { param: String, reason: String },
    #[error("invalid access token: {0}")]
    InvalidToken(String),
    #[error("failed to encode inquiry: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

impl CatalogError {
    pub fn remote(message: impl Into<String>) -> Self {
        Self::RemoteFetch {
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CatalogError::NotAuthenticated | CatalogError::InvalidToken(_) => {
                ErrorCode::NotAuthenticated
            }
            CatalogError::RemoteFetch { .. } | CatalogError::Transport(_) => ErrorCode::RemoteFetch,
            CatalogError::MalformedAddressState { .. } => ErrorCode::MalformedAddressState,
            CatalogError::Encode(_) => ErrorCode::Internal,
        }
    }

    pub fn to_api_error(&self) -> ApiError {
        ApiError::new(self.code(), self.to_string())
    }
}

impl From<&CatalogError> for ApiError {
    fn from(value: &CatalogError) -> Self {
        value.to_api_error()
    }
}
