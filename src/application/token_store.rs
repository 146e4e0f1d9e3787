// Token store trait for persisting the credential between runs
use crate::domain::credential::Credential;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("session storage is corrupt: {0}")]
    Format(#[from] serde_json::Error),
}

/// Key/value accessor for the persisted (token, username) pair. No network,
/// no validation of the token, no client-side expiry.
pub trait TokenStore: Send + Sync {
    /// Persist both values together.
    fn save(&self, credential: &Credential) -> Result<(), StoreError>;

    /// `None` unless both values are present.
    fn load(&self) -> Result<Option<Credential>, StoreError>;

    fn clear(&self) -> Result<(), StoreError>;
}
