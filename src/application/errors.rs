// Client error taxonomy surfaced to the presentation layer
use crate::application::token_store::StoreError;
use crate::infrastructure::api_client::ApiError;
use thiserror::Error;

pub const LOGIN_REQUIRED: &str = "Please log in first to use this feature.";

#[derive(Debug, Error)]
pub enum ClientError {
    /// The resource does not exist yet; a displayable empty state.
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    RequestFailed(#[from] ApiError),
    /// Rejected before any request was made.
    #[error("{0}")]
    ValidationFailed(String),
    #[error(transparent)]
    Storage(#[from] StoreError),
    #[error("Could not save report: {0}")]
    SaveFailed(#[source] std::io::Error),
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::ValidationFailed(message.into())
    }

    pub fn login_required() -> Self {
        Self::validation(LOGIN_REQUIRED)
    }
}
