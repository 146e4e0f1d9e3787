// Credential and authentication state
use serde::{Deserialize, Serialize};

/// Token/username pair returned by `/auth/login/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub token: String,
    pub username: String,
}

impl Credential {
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    #[default]
    Anonymous,
    Authenticated(Credential),
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            AuthState::Authenticated(credential) => Some(credential.token.as_str()),
            AuthState::Anonymous => None,
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            AuthState::Authenticated(credential) => Some(credential.username.as_str()),
            AuthState::Anonymous => None,
        }
    }
}
